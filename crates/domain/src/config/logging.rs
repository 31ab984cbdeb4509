use serde::{Deserialize, Serialize};

/// Console log output. `RUST_LOG`, when set, replaces `level`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `ferrous_rewrite=debug,warn`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Colour escapes in log lines. Turn off when stdout goes to journald.
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl LoggingConfig {
    pub fn filter_directive(&self) -> &str {
        match self.level.trim() {
            "" => "info",
            level => level,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            ansi: default_ansi(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ansi() -> bool {
    true
}
