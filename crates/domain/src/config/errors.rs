#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid zone entry '{entry}': {reason}")]
    InvalidZoneEntry { entry: String, reason: String },

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub(crate) fn zone_entry(entry: &str, reason: impl Into<String>) -> Self {
        Self::InvalidZoneEntry {
            entry: entry.to_string(),
            reason: reason.into(),
        }
    }
}
