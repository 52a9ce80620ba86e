pub mod chart;
pub mod error;
pub mod geometry;
pub mod legend;
pub mod options;
pub mod source;

pub use chart::{
    resolve_callback_groups, ChartOrchestrator, ChartTarget, RenderSurface, TraceDataProvider,
};
pub use error::{ChartError, OptionsError};
pub use geometry::RectGeometry;
pub use legend::{LegendEntry, LegendManager, LegendTarget, RendererHandle, LEGEND_PAGE_SIZE};
pub use options::{ChartOptions, ColoringRule, XAxisType};
pub use source::scheduling::{SchedBarSource, SchedRectSource, RECT_HEIGHT};
pub use source::timeseries::LineSource;
pub use source::{
    describe, metadata_hover, metadata_keys, metadata_row, HoverSpec, SourceValue, VisualSource,
    SCHEDULING_RECT_KEYS,
};
