use record::RecordError;

/// Failure taxonomy of the chart pipeline. Every error aborts the current
/// chart-generation call; no partial visual source is handed to the surface.
#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported {option}. {option} = {value}. supported {option}: [{supported}]")]
    UnsupportedType {
        option: &'static str,
        value: String,
        supported: &'static str,
    },
    #[error("no value or description rule for source key '{0}'")]
    UnsupportedKey(&'static str),
    #[error("data integrity violation: {0}")]
    DataIntegrity(#[from] RecordError),
}

/// Errors of the chart-options file surface.
#[derive(thiserror::Error, Debug)]
pub enum OptionsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
