pub mod errors;
pub mod logging;
pub mod rewrite;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use rewrite::RewriteConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
