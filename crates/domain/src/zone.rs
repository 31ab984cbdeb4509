use crate::config::ConfigError;
use crate::dns_protocol::{ForwardProtocol, UpstreamAddr};
use std::sync::Arc;

/// One rewritten zone: names under `zone` are forwarded to `upstream`
/// with the zone suffix replaced by a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneConfig {
    /// Lower-case, always ends with `.`.
    pub zone: Arc<str>,

    /// Falls back to the process-wide default prefix when `None`.
    pub prefix: Option<Arc<str>>,

    pub protocol: ForwardProtocol,

    pub upstream: UpstreamAddr,
}

impl ZoneConfig {
    pub fn new(
        zone: &str,
        prefix: Option<&str>,
        protocol: ForwardProtocol,
        upstream: UpstreamAddr,
    ) -> Self {
        Self {
            zone: normalize_zone(zone).into(),
            prefix: prefix.filter(|p| !p.is_empty()).map(Arc::from),
            protocol,
            upstream,
        }
    }

    /// Parses one `<zone>=[<prefix>:]<proto>:<upstream>` entry.
    ///
    /// The first colon-delimited field is the protocol when it reads `udp`
    /// or `tcp`, otherwise it is taken as the prefix override.
    pub fn parse_entry(entry: &str) -> Result<Self, ConfigError> {
        let entry = entry.trim();

        let mut parts = entry.split('=');
        let (zone, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(zone), Some(value), None) => (zone.trim(), value.trim()),
            _ => return Err(ConfigError::zone_entry(entry, "expected '<zone>=<target>'")),
        };

        if zone.is_empty() || zone == "." {
            return Err(ConfigError::zone_entry(entry, "zone name is empty"));
        }

        let (prefix, proto_upstream) = match value.split_once(':') {
            Some((field, _)) if field == "udp" || field == "tcp" => (None, value),
            Some((field, rest)) => (Some(field), rest),
            None => (None, value),
        };

        let (proto, upstream) = proto_upstream
            .split_once(':')
            .ok_or_else(|| ConfigError::zone_entry(entry, "invalid upstream syntax"))?;

        let protocol: ForwardProtocol = proto
            .parse()
            .map_err(|e: String| ConfigError::zone_entry(entry, e))?;
        let upstream: UpstreamAddr = upstream
            .parse()
            .map_err(|e: String| ConfigError::zone_entry(entry, e))?;

        Ok(Self::new(zone, prefix, protocol, upstream))
    }

    pub fn effective_prefix<'a>(&'a self, default_prefix: &'a str) -> &'a str {
        self.prefix.as_deref().unwrap_or(default_prefix)
    }

    pub fn label_count(&self) -> usize {
        self.zone.trim_end_matches('.').split('.').count()
    }
}

/// Lower-cases `name` and makes it absolute.
pub fn normalize_zone(name: &str) -> String {
    let mut zone = name.trim().to_ascii_lowercase();
    if !zone.ends_with('.') {
        zone.push('.');
    }
    zone
}
