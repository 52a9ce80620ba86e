use super::{metadata_keys, metadata_row, SourceValue, VisualSource};
use crate::error::ChartError;
use crate::legend::LegendManager;
use crate::options::XAxisType;
use model::TraceEntity;
use record::RecordTable;

/// Builds one line-chart source per tracked entity across the observed time
/// axis. The record table carries exactly two columns: a timestamp and a
/// metric value.
#[derive(Debug)]
pub struct LineSource {
    frame_min: i64,
    xaxis_type: XAxisType,
}

impl LineSource {
    pub fn new(frame_min: i64, xaxis_type: XAxisType) -> Self {
        Self {
            frame_min,
            xaxis_type,
        }
    }

    pub fn generate(
        &self,
        entity: &TraceEntity,
        records: &RecordTable,
        legend: &mut LegendManager,
    ) -> Result<VisualSource, ChartError> {
        if records.columns().len() != 2 {
            return Err(ChartError::InvalidArgument(format!(
                "time-series table needs exactly two columns (timestamp, metric), got {}",
                records.columns().len()
            )));
        }
        let timestamp_column = records.columns()[0].clone();
        let value_column = records.columns()[1].clone();
        let timestamps = records.column_values(&timestamp_column)?;
        let raw_values = records.column_values(&value_column)?;

        // Latency and period metrics are recorded in nanoseconds but plotted
        // in milliseconds.
        let lowered = value_column.to_lowercase();
        let to_ms = lowered.contains("latency") || lowered.contains("period");
        let ys: Vec<f64> = raw_values
            .iter()
            .map(|v| {
                if to_ms {
                    *v as f64 * 1e-6
                } else {
                    *v as f64
                }
            })
            .collect();
        let xs: Vec<f64> = match self.xaxis_type {
            XAxisType::SystemTime => timestamps
                .iter()
                .map(|ts| (ts - self.frame_min) as f64 * 1e-9)
                .collect(),
            XAxisType::Index => (0..ys.len()).map(|i| i as f64).collect(),
            XAxisType::SimTime => timestamps.iter().map(|ts| *ts as f64).collect(),
        };

        let metadata = metadata_row(entity, legend)?;
        let mut source = VisualSource::with_fields(
            ["x", "y"]
                .iter()
                .chain(metadata_keys(entity))
                .copied(),
        );
        for (x, y) in xs.into_iter().zip(ys) {
            let mut row = vec![SourceValue::Number(x), SourceValue::Number(y)];
            row.extend(metadata.iter().map(|(_, value)| value.clone()));
            source.push_row(row);
        }
        Ok(source)
    }
}
