pub mod scheduling;
pub mod timeseries;

use crate::error::ChartError;
use crate::legend::LegendManager;
use model::{CallbackKind, TraceEntity};

#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    Number(f64),
    Text(String),
}

impl SourceValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SourceValue::Number(value) => Some(*value),
            SourceValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SourceValue::Number(_) => None,
            SourceValue::Text(text) => Some(text),
        }
    }
}

/// Insertion-ordered mapping from field name to one value per plotted row.
/// All field sequences stay the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualSource {
    columns: Vec<(String, Vec<SourceValue>)>,
}

impl VisualSource {
    pub fn with_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            columns: fields
                .into_iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
        }
    }

    /// Appends one value per field, in field order.
    pub fn push_row(&mut self, values: Vec<SourceValue>) {
        debug_assert_eq!(values.len(), self.columns.len());
        for ((_, column), value) in self.columns.iter_mut().zip(values) {
            column.push(value);
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&[SourceValue]> {
        self.columns
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn len(&self) -> usize {
        self.columns.first().map(|(_, v)| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tooltip spec for a drawn glyph: lists each schema key, follows the
/// pointer, and never consumes pointer focus itself.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverSpec {
    pub tooltip_keys: Vec<&'static str>,
    pub follow_mouse: bool,
    pub interactive: bool,
}

impl HoverSpec {
    pub fn for_keys(keys: &[&'static str]) -> Self {
        Self {
            tooltip_keys: keys.to_vec(),
            follow_mouse: true,
            interactive: false,
        }
    }
}

/// Hover/data keys of a scheduling rectangle. Only callbacks are drawn as
/// scheduling rects.
pub const SCHEDULING_RECT_KEYS: [&str; 4] =
    ["legend_label", "callback_start", "callback_end", "latency"];

const CALLBACK_METADATA_KEYS: [&str; 6] = [
    "legend_label",
    "node_name",
    "callback_name",
    "callback_type",
    "callback_param",
    "symbol",
];
const COMMUNICATION_METADATA_KEYS: [&str; 4] = [
    "legend_label",
    "topic_name",
    "publish_node_name",
    "subscribe_node_name",
];
const PUB_SUB_METADATA_KEYS: [&str; 3] = ["legend_label", "node_name", "topic_name"];

/// The closed per-kind table of metadata keys exposed in hovers and data
/// sources.
pub fn metadata_keys(entity: &TraceEntity) -> &'static [&'static str] {
    match entity {
        TraceEntity::Callback(_) => &CALLBACK_METADATA_KEYS,
        TraceEntity::Communication(_) => &COMMUNICATION_METADATA_KEYS,
        TraceEntity::Publisher(_) | TraceEntity::Subscription(_) => &PUB_SUB_METADATA_KEYS,
    }
}

pub fn metadata_hover(entity: &TraceEntity) -> HoverSpec {
    HoverSpec::for_keys(metadata_keys(entity))
}

/// Resolves one source key to its `key = value` display string for the
/// given entity. Keys with no rule for the entity kind fail with
/// [`ChartError::UnsupportedKey`].
pub fn describe(
    key: &'static str,
    entity: &TraceEntity,
    legend: &mut LegendManager,
) -> Result<String, ChartError> {
    match (key, entity) {
        ("legend_label", _) => Ok(format!("legend_label = {}", legend.label_for(entity))),
        ("node_name", TraceEntity::Callback(c)) => Ok(format!("node_name = {}", c.node_name)),
        ("node_name", TraceEntity::Publisher(p)) => Ok(format!("node_name = {}", p.node_name)),
        ("node_name", TraceEntity::Subscription(s)) => Ok(format!("node_name = {}", s.node_name)),
        ("callback_name", TraceEntity::Callback(c)) => {
            Ok(format!("callback_name = {}", c.callback_name))
        }
        ("callback_type", TraceEntity::Callback(c)) => {
            Ok(format!("callback_type = {}", c.kind.type_name()))
        }
        ("callback_param", TraceEntity::Callback(c)) => match &c.kind {
            CallbackKind::Timer { period_ns } => Ok(format!("period_ns = {period_ns}")),
            CallbackKind::Subscription { topic_name } => {
                Ok(format!("subscribe_topic_name = {topic_name}"))
            }
            CallbackKind::Service { .. } => Err(ChartError::UnsupportedKey("callback_param")),
        },
        ("symbol", TraceEntity::Callback(c)) => Ok(format!("symbol = {}", c.symbol)),
        ("topic_name", TraceEntity::Communication(c)) => {
            Ok(format!("topic_name = {}", c.topic_name))
        }
        ("topic_name", TraceEntity::Publisher(p)) => Ok(format!("topic_name = {}", p.topic_name)),
        ("topic_name", TraceEntity::Subscription(s)) => {
            Ok(format!("topic_name = {}", s.topic_name))
        }
        ("publish_node_name", TraceEntity::Communication(c)) => {
            Ok(format!("publish_node_name = {}", c.publish_node_name))
        }
        ("subscribe_node_name", TraceEntity::Communication(c)) => {
            Ok(format!("subscribe_node_name = {}", c.subscribe_node_name))
        }
        (key, _) => Err(ChartError::UnsupportedKey(key)),
    }
}

/// The full `key = value` dict for an entity's schema, one text value per
/// key, shared by context bars and time-series points.
pub fn metadata_row(
    entity: &TraceEntity,
    legend: &mut LegendManager,
) -> Result<Vec<(&'static str, SourceValue)>, ChartError> {
    metadata_keys(entity)
        .iter()
        .map(|&key| describe(key, entity, legend).map(|text| (key, SourceValue::Text(text))))
        .collect()
}
