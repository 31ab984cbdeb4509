use super::errors::ConfigError;
use crate::authority::SoaTemplate;
use crate::zone_table::ZoneTable;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RewriteConfig {
    /// Prefix substituted for the zone suffix when a zone has no override.
    #[serde(default = "default_prefix")]
    pub default_prefix: String,

    /// TTL and MINIMUM of every synthesized SOA.
    #[serde(default = "default_negative_ttl")]
    pub negative_ttl: u32,

    /// TTL written onto forwarded records owned by the rewritten name.
    #[serde(default = "default_answer_ttl")]
    pub answer_ttl: u32,

    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    #[serde(default = "default_soa_mname")]
    pub soa_mname: String,

    #[serde(default = "default_soa_rname")]
    pub soa_rname: String,

    /// Entries of the form `<zone>=[<prefix>:]<proto>:<upstream>`.
    #[serde(default)]
    pub zones: Vec<String>,
}

impl RewriteConfig {
    pub fn zone_table(&self) -> Result<ZoneTable, ConfigError> {
        ZoneTable::from_entries(self.zones.iter().map(String::as_str))
    }

    pub fn soa_template(&self) -> SoaTemplate {
        SoaTemplate::new(&self.soa_mname, &self.soa_rname, self.negative_ttl)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    /// Splits a comma-separated `ZONES` value into entries.
    pub fn set_zones_from_list(&mut self, list: &str) {
        self.zones = list
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect();
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            default_prefix: default_prefix(),
            negative_ttl: default_negative_ttl(),
            answer_ttl: default_answer_ttl(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
            soa_mname: default_soa_mname(),
            soa_rname: default_soa_rname(),
            zones: vec![],
        }
    }
}

fn default_prefix() -> String {
    "systemd-".to_string()
}

fn default_negative_ttl() -> u32 {
    60
}

fn default_answer_ttl() -> u32 {
    300
}

fn default_upstream_timeout_ms() -> u64 {
    2000
}

fn default_soa_mname() -> String {
    "dns-pod.hetmer.net.".to_string()
}

fn default_soa_rname() -> String {
    "pod.hetmer.net.".to_string()
}
