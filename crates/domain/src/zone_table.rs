use crate::config::ConfigError;
use crate::zone::ZoneConfig;

/// Outcome of looking a query name up in the [`ZoneTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneMatch<'a> {
    None,
    Apex(&'a ZoneConfig),
    Subdomain(&'a ZoneConfig),
}

impl<'a> ZoneMatch<'a> {
    pub fn zone(&self) -> Option<&'a ZoneConfig> {
        match *self {
            ZoneMatch::None => None,
            ZoneMatch::Apex(cfg) | ZoneMatch::Subdomain(cfg) => Some(cfg),
        }
    }
}

/// Immutable registry of configured zones, built once at startup.
///
/// Zones are kept deepest-first so that when two configured zones nest
/// (`a.example.` and `sub.a.example.`) the longest suffix wins.
#[derive(Debug, Clone, Default)]
pub struct ZoneTable {
    zones: Vec<ZoneConfig>,
}

impl ZoneTable {
    pub fn new(zones: Vec<ZoneConfig>) -> Result<Self, ConfigError> {
        let mut sorted: Vec<ZoneConfig> = Vec::with_capacity(zones.len());
        for zone in zones {
            if sorted.iter().any(|z| z.zone == zone.zone) {
                return Err(ConfigError::Validation(format!(
                    "Zone '{}' is configured more than once",
                    zone.zone
                )));
            }
            sorted.push(zone);
        }
        sorted.sort_by(|a, b| {
            b.label_count()
                .cmp(&a.label_count())
                .then_with(|| a.zone.cmp(&b.zone))
        });
        Ok(Self { zones: sorted })
    }

    /// Parses a comma-separated list of zone entries.
    pub fn parse(list: &str) -> Result<Self, ConfigError> {
        Self::from_entries(list.split(','))
    }

    pub fn from_entries<'a, I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let zones = entries
            .into_iter()
            .filter(|e| !e.trim().is_empty())
            .map(ZoneConfig::parse_entry)
            .collect::<Result<Vec<_>, _>>()?;

        if zones.is_empty() {
            return Err(ConfigError::Validation(
                "No zones configured".to_string(),
            ));
        }

        Self::new(zones)
    }

    pub fn lookup(&self, name: &str) -> ZoneMatch<'_> {
        let name = name.to_ascii_lowercase();

        for cfg in &self.zones {
            if name == *cfg.zone {
                return ZoneMatch::Apex(cfg);
            }
            if is_proper_subdomain(&name, &cfg.zone) {
                return ZoneMatch::Subdomain(cfg);
            }
        }

        ZoneMatch::None
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneConfig> {
        self.zones.iter()
    }
}

/// `name` ends with `"." + zone`.
fn is_proper_subdomain(name: &str, zone: &str) -> bool {
    name.len() > zone.len()
        && name.ends_with(zone)
        && name.as_bytes()[name.len() - zone.len() - 1] == b'.'
}
