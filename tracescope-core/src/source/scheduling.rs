use super::{describe, metadata_row, HoverSpec, SourceValue, VisualSource, SCHEDULING_RECT_KEYS};
use crate::error::ChartError;
use crate::geometry::RectGeometry;
use crate::legend::LegendManager;
use model::{Callback, TraceEntity};
use record::{Clip, ClockConverter, RecordTable};

pub const RECT_HEIGHT: f64 = 0.3;
const RECT_Y_STEP: f64 = -1.5;

const GEOMETRY_FIELDS: [&str; 4] = ["x", "y", "width", "height"];

/// Builds one rectangle per recorded execution span, stacked on a vertical
/// band exclusive to the callback. Later callbacks render lower on the
/// chart.
#[derive(Debug)]
pub struct SchedRectSource {
    clip: Clip,
    converter: Option<ClockConverter>,
    rect_y_base: f64,
}

impl SchedRectSource {
    pub fn new(clip: Clip, converter: Option<ClockConverter>) -> Self {
        Self {
            clip,
            converter,
            rect_y_base: 0.0,
        }
    }

    pub fn rect_y_base(&self) -> f64 {
        self.rect_y_base
    }

    pub fn hover(&self) -> HoverSpec {
        HoverSpec::for_keys(&SCHEDULING_RECT_KEYS)
    }

    /// One source row per execution span, in table order. The span table's
    /// first column is the start timestamp, its last column the completion
    /// timestamp; a missing value in either is a data-integrity failure.
    pub fn generate(
        &self,
        callback: &Callback,
        spans: &RecordTable,
        legend: &mut LegendManager,
    ) -> Result<VisualSource, ChartError> {
        if spans.columns().len() < 2 {
            return Err(ChartError::InvalidArgument(format!(
                "execution-span table for '{}' needs a start and an end column",
                callback.callback_name
            )));
        }

        let clipped = self.clip.apply(spans);
        let start_column = clipped.columns()[0].clone();
        let end_column = clipped.columns()[clipped.columns().len() - 1].clone();
        let entity = TraceEntity::Callback(callback.clone());

        let mut source = VisualSource::with_fields(
            GEOMETRY_FIELDS.iter().chain(&SCHEDULING_RECT_KEYS).copied(),
        );
        for row in 0..clipped.len() {
            let start_raw = clipped.value(row, &start_column)?;
            let end_raw = clipped.value(row, &end_column)?;
            let (start, end) = match &self.converter {
                Some(converter) => (converter.convert(start_raw), converter.convert(end_raw)),
                None => (start_raw as f64, end_raw as f64),
            };
            let rect = RectGeometry::from_spans(
                (start, end),
                (
                    self.rect_y_base - RECT_HEIGHT,
                    self.rect_y_base + RECT_HEIGHT,
                ),
            );
            source.push_row(vec![
                SourceValue::Number(rect.x),
                SourceValue::Number(rect.y),
                SourceValue::Number(rect.width),
                SourceValue::Number(rect.height),
                SourceValue::Text(describe("legend_label", &entity, legend)?),
                SourceValue::Text(format!("callback_start = {start} [ns]")),
                SourceValue::Text(format!("callback_end = {end} [ns]")),
                SourceValue::Text(format!("latency = {} [ms]", (end - start) * 1e-6)),
            ]);
        }
        Ok(source)
    }

    /// Moves the band base to the next step. Callers invoke this once per
    /// callback to keep bands non-overlapping.
    pub fn advance_band(&mut self) {
        self.rect_y_base += RECT_Y_STEP;
    }
}

/// Builds the full-width context bar behind one callback's band, annotated
/// with the callback's static metadata.
#[derive(Debug)]
pub struct SchedBarSource {
    frame_min: f64,
    frame_max: f64,
}

impl SchedBarSource {
    pub fn new(frame_min: f64, frame_max: f64) -> Self {
        Self {
            frame_min,
            frame_max,
        }
    }

    pub fn generate(
        &self,
        callback: &Callback,
        rect_y_base: f64,
        legend: &mut LegendManager,
    ) -> Result<VisualSource, ChartError> {
        let entity = TraceEntity::Callback(callback.clone());
        let metadata = metadata_row(&entity, legend)?;
        let rect = RectGeometry::from_spans(
            (self.frame_min, self.frame_max),
            (rect_y_base - 0.5, rect_y_base + 0.5),
        );

        let mut source = VisualSource::with_fields(
            GEOMETRY_FIELDS
                .iter()
                .copied()
                .chain(metadata.iter().map(|(key, _)| *key)),
        );
        let mut row = vec![
            SourceValue::Number(rect.x),
            SourceValue::Number(rect.y),
            SourceValue::Number(rect.width),
            SourceValue::Number(rect.height),
        ];
        row.extend(metadata.into_iter().map(|(_, value)| value));
        source.push_row(row);
        Ok(source)
    }
}
