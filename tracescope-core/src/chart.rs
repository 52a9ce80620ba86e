use crate::error::ChartError;
use crate::legend::{LegendEntry, LegendManager, RendererHandle};
use crate::options::{ChartOptions, ColoringRule, XAxisType};
use crate::source::scheduling::{SchedBarSource, SchedRectSource};
use crate::source::timeseries::LineSource;
use crate::source::{metadata_hover, HoverSpec, VisualSource};
use model::{
    Application, Callback, CallbackGroup, CausalPath, EntityId, Executor, Node, TraceEntity,
};
use record::{Clip, ClockConverter, RecordTable};
use std::collections::HashSet;

/// Anything a scheduling chart can be requested for: an aggregate holding
/// callback groups, a causal path, one group, or an explicit list.
#[derive(Debug, Clone)]
pub enum ChartTarget {
    Application(Application),
    Executor(Executor),
    Node(Node),
    Path(CausalPath),
    CallbackGroup(CallbackGroup),
    CallbackGroups(Vec<CallbackGroup>),
}

/// Record-store query seam. Tables are assumed already materialized in
/// memory by the trace layer; the pipeline consumes them read-only.
pub trait TraceDataProvider {
    fn execution_spans(&self, callback: &Callback) -> Result<RecordTable, ChartError>;
    fn timeseries(&self, entity: &TraceEntity) -> Result<RecordTable, ChartError>;
    fn sim_time_converter(&self) -> Option<ClockConverter>;
}

/// Rendering seam. The pipeline hands finished sources, hover specs and
/// legend pages across this boundary; windows, palettes and export formats
/// live on the other side.
pub trait RenderSurface {
    fn draw_bar(&mut self, source: &VisualSource, hover: &HoverSpec) -> RendererHandle;
    fn draw_rects(
        &mut self,
        source: &VisualSource,
        hover: &HoverSpec,
        color_key: &str,
    ) -> RendererHandle;
    fn draw_line(
        &mut self,
        source: &VisualSource,
        hover: &HoverSpec,
        color_key: &str,
    ) -> RendererHandle;
    fn add_legend_page(&mut self, entries: &[LegendEntry]);
    fn enable_legend_hide_on_click(&mut self);
    fn export(&mut self, path: &str, title: &str);
}

fn aggregate_groups(
    groups: &Option<Vec<CallbackGroup>>,
    target: &str,
) -> Result<Vec<CallbackGroup>, ChartError> {
    groups
        .clone()
        .ok_or_else(|| ChartError::InvalidArgument(format!("{target} has no callback groups")))
}

/// Flattens a chart target into the callback groups to plot. Causal paths
/// take the union of the publish-node groups of every hop plus the
/// subscribe-node groups of the last hop, deduplicated by id in insertion
/// order.
pub fn resolve_callback_groups(target: &ChartTarget) -> Result<Vec<CallbackGroup>, ChartError> {
    match target {
        ChartTarget::Application(app) => aggregate_groups(&app.callback_groups, "application"),
        ChartTarget::Executor(executor) => {
            aggregate_groups(&executor.callback_groups, &executor.executor_name)
        }
        ChartTarget::Node(node) => aggregate_groups(&node.callback_groups, &node.node_name),
        ChartTarget::Path(path) => {
            let mut seen: HashSet<EntityId> = HashSet::new();
            let mut groups = Vec::new();
            let mut collect = |node: &Node| {
                for group in node.callback_groups.iter().flatten() {
                    if seen.insert(group.id) {
                        groups.push(group.clone());
                    }
                }
            };
            for hop in &path.hops {
                collect(&hop.publish_node);
            }
            if let Some(last) = path.hops.last() {
                collect(&last.subscribe_node);
            }
            if groups.is_empty() {
                return Err(ChartError::InvalidArgument(format!(
                    "path '{}' has no callback groups",
                    path.path_name
                )));
            }
            Ok(groups)
        }
        ChartTarget::CallbackGroup(group) => Ok(vec![group.clone()]),
        ChartTarget::CallbackGroups(groups) => Ok(groups.clone()),
    }
}

struct SchedItem {
    callback: Callback,
    bar: VisualSource,
    bar_hover: HoverSpec,
    rect: VisualSource,
    rect_hover: HoverSpec,
    color_key: String,
}

/// Drives the source builders for one chart request and composes the result
/// onto a render surface. Owns the legend state and the vertical-band
/// counter for the duration of the call; one orchestrator serves one chart
/// session at a time.
pub struct ChartOrchestrator<'a, P: TraceDataProvider> {
    provider: &'a P,
    legend: LegendManager,
}

impl<'a, P: TraceDataProvider> ChartOrchestrator<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            legend: LegendManager::new(),
        }
    }

    pub fn legend(&self) -> &LegendManager {
        &self.legend
    }

    /// Scheduling chart: per callback one context bar plus one rectangle
    /// per recorded execution span, stacked on stepped vertical bands.
    /// Every source is built before anything is drawn, so a failing call
    /// leaves the surface untouched.
    pub fn scheduling_chart(
        &mut self,
        target: &ChartTarget,
        options: &ChartOptions,
        surface: &mut dyn RenderSurface,
    ) -> Result<(), ChartError> {
        let xaxis_type = XAxisType::parse_scheduling(&options.xaxis_type)?;
        let coloring_rule = ColoringRule::parse(&options.coloring_rule)?;
        let groups = resolve_callback_groups(target)?;

        let mut spans = Vec::new();
        for group in &groups {
            for callback in &group.callbacks {
                let table = self.provider.execution_spans(callback)?;
                spans.push((group, callback, table));
            }
        }

        let (frame_min, frame_max) = frame_bounds(spans.iter().map(|(_, _, table)| table))?;
        let clip =
            Clip::from_trimmed_frame(frame_min, frame_max, options.lstrip_s, options.rstrip_s);
        let converter = match xaxis_type {
            XAxisType::SimTime => Some(self.provider.sim_time_converter().ok_or_else(|| {
                ChartError::InvalidArgument(
                    "sim_time axis requires a clock converter from the trace layer".to_string(),
                )
            })?),
            _ => None,
        };
        let (bar_min, bar_max) = match &converter {
            Some(converter) => (
                converter.convert(clip.begin_ns()),
                converter.convert(clip.end_ns()),
            ),
            None => (clip.begin_ns() as f64, clip.end_ns() as f64),
        };

        let mut rect_builder = SchedRectSource::new(clip, converter);
        let bar_builder = SchedBarSource::new(bar_min, bar_max);

        let mut items = Vec::with_capacity(spans.len());
        for (group, callback, table) in &spans {
            let entity = TraceEntity::Callback((*callback).clone());
            let bar = bar_builder.generate(callback, rect_builder.rect_y_base(), &mut self.legend)?;
            let rect = rect_builder.generate(callback, table, &mut self.legend)?;
            let color_key = match coloring_rule {
                ColoringRule::Callback => callback.callback_name.clone(),
                ColoringRule::CallbackGroup => group.callback_group_name.clone(),
                ColoringRule::Node => callback.node_name.clone(),
            };
            items.push(SchedItem {
                callback: (*callback).clone(),
                bar,
                bar_hover: metadata_hover(&entity),
                rect,
                rect_hover: rect_builder.hover(),
                color_key,
            });
            rect_builder.advance_band();
        }

        log::debug!(
            "scheduling chart: {} callback groups, {} callbacks",
            groups.len(),
            items.len()
        );
        for item in &items {
            surface.draw_bar(&item.bar, &item.bar_hover);
            let renderer = surface.draw_rects(&item.rect, &item.rect_hover, &item.color_key);
            self.legend.register(&item.callback, renderer);
        }
        self.legend
            .render(surface, options.max_legends, options.show_all_legends);
        if let Some(path) = &options.export_path {
            surface.export(path, &options.title);
        }
        Ok(())
    }

    /// Time-series chart: one line source per entity across the observed
    /// time axis.
    pub fn timeseries_chart(
        &mut self,
        entities: &[TraceEntity],
        options: &ChartOptions,
        surface: &mut dyn RenderSurface,
    ) -> Result<(), ChartError> {
        let xaxis_type = XAxisType::parse(&options.xaxis_type)?;
        ColoringRule::parse(&options.coloring_rule)?;
        if entities.is_empty() {
            return Err(ChartError::InvalidArgument(
                "no entities to plot".to_string(),
            ));
        }

        let mut series = Vec::with_capacity(entities.len());
        for entity in entities {
            series.push((entity, self.provider.timeseries(entity)?));
        }
        let frame_min = series_frame_min(series.iter().map(|(_, table)| table))?;

        let line_builder = LineSource::new(frame_min, xaxis_type);
        let mut items = Vec::with_capacity(series.len());
        for (entity, table) in &series {
            let source = line_builder.generate(entity, table, &mut self.legend)?;
            let label = self.legend.label_for(*entity);
            items.push(((*entity).clone(), source, metadata_hover(entity), label));
        }

        log::debug!("time-series chart: {} entities", items.len());
        for (entity, source, hover, label) in &items {
            let renderer = surface.draw_line(source, hover, label);
            self.legend.register(entity, renderer);
        }
        self.legend
            .render(surface, options.max_legends, options.show_all_legends);
        if let Some(path) = &options.export_path {
            surface.export(path, &options.title);
        }
        Ok(())
    }
}

/// Observed frame over execution-span tables: earliest first-column
/// timestamp to latest last-column timestamp. Missing cells do not widen
/// the frame; the builders reject them when consumed.
fn frame_bounds<'t>(
    tables: impl Iterator<Item = &'t RecordTable>,
) -> Result<(i64, i64), ChartError> {
    let mut frame_min: Option<i64> = None;
    let mut frame_max: Option<i64> = None;
    for table in tables {
        let columns = table.columns();
        if columns.len() < 2 {
            continue;
        }
        let first = columns[0].clone();
        let last = columns[columns.len() - 1].clone();
        for value in table.column_series(&first)?.into_iter().flatten() {
            frame_min = Some(frame_min.map_or(value, |m| m.min(value)));
        }
        for value in table.column_series(&last)?.into_iter().flatten() {
            frame_max = Some(frame_max.map_or(value, |m| m.max(value)));
        }
    }
    Ok((frame_min.unwrap_or(0), frame_max.unwrap_or(0)))
}

fn series_frame_min<'t>(
    tables: impl Iterator<Item = &'t RecordTable>,
) -> Result<i64, ChartError> {
    let mut frame_min: Option<i64> = None;
    for table in tables {
        let Some(first) = table.columns().first().cloned() else {
            continue;
        };
        for value in table.column_series(&first)?.into_iter().flatten() {
            frame_min = Some(frame_min.map_or(value, |m| m.min(value)));
        }
    }
    Ok(frame_min.unwrap_or(0))
}
