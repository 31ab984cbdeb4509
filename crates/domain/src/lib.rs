//! Ferrous Rewrite Domain Layer
pub mod authority;
pub mod config;
pub mod dns_protocol;
pub mod errors;
pub mod rewrite;
pub mod zone;
pub mod zone_table;

pub use authority::{SoaTemplate, PLACEHOLDER_ZONE};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_protocol::{ForwardProtocol, UpstreamAddr};
pub use errors::DomainError;
pub use rewrite::rewrite_name;
pub use zone::{normalize_zone, ZoneConfig};
pub use zone_table::{ZoneMatch, ZoneTable};
