use crate::error::{ChartError, OptionsError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxisType {
    SystemTime,
    Index,
    SimTime,
}

impl XAxisType {
    pub fn parse(value: &str) -> Result<Self, ChartError> {
        match value {
            "system_time" => Ok(XAxisType::SystemTime),
            "index" => Ok(XAxisType::Index),
            "sim_time" => Ok(XAxisType::SimTime),
            _ => Err(ChartError::UnsupportedType {
                option: "xaxis_type",
                value: value.to_string(),
                supported: "system_time/index/sim_time",
            }),
        }
    }

    /// Scheduling charts plot real spans, so an index axis is meaningless
    /// there.
    pub fn parse_scheduling(value: &str) -> Result<Self, ChartError> {
        match value {
            "system_time" => Ok(XAxisType::SystemTime),
            "sim_time" => Ok(XAxisType::SimTime),
            _ => Err(ChartError::UnsupportedType {
                option: "xaxis_type",
                value: value.to_string(),
                supported: "system_time/sim_time",
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            XAxisType::SystemTime => "system_time",
            XAxisType::Index => "index",
            XAxisType::SimTime => "sim_time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColoringRule {
    Callback,
    CallbackGroup,
    Node,
}

impl ColoringRule {
    pub fn parse(value: &str) -> Result<Self, ChartError> {
        match value {
            "callback" => Ok(ColoringRule::Callback),
            "callback_group" => Ok(ColoringRule::CallbackGroup),
            "node" => Ok(ColoringRule::Node),
            _ => Err(ChartError::UnsupportedType {
                option: "coloring_rule",
                value: value.to_string(),
                supported: "callback/callback_group/node",
            }),
        }
    }
}

/// Per-chart-request configuration. Enum-valued fields stay strings here
/// and are validated when a chart is rendered, so a bad value is reported
/// with the offending string and the supported set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default = "default_xaxis_type")]
    pub xaxis_type: String,
    #[serde(default = "default_coloring_rule")]
    pub coloring_rule: String,
    #[serde(default = "default_max_legends")]
    pub max_legends: usize,
    #[serde(default)]
    pub show_all_legends: bool,
    #[serde(default)]
    pub lstrip_s: f64,
    #[serde(default)]
    pub rstrip_s: f64,
    #[serde(default)]
    pub export_path: Option<String>,
    #[serde(default)]
    pub title: String,
}

fn default_xaxis_type() -> String {
    "system_time".to_string()
}

fn default_coloring_rule() -> String {
    "callback".to_string()
}

fn default_max_legends() -> usize {
    20
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            xaxis_type: default_xaxis_type(),
            coloring_rule: default_coloring_rule(),
            max_legends: default_max_legends(),
            show_all_legends: false,
            lstrip_s: 0.0,
            rstrip_s: 0.0,
            export_path: None,
            title: String::new(),
        }
    }
}

impl ChartOptions {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let data = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&data)?)
    }
}
