use ferrous_rewrite_application::use_cases::HandleDnsQueryUseCase;
use ferrous_rewrite_domain::{Config, ZoneTable};
use ferrous_rewrite_infrastructure::dns::{DnsForwarder, DnsServerHandler};
use std::sync::Arc;
use tracing::info;

/// Everything the listeners need, built once before the first packet.
pub struct DnsServices {
    pub zones: Arc<ZoneTable>,
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let zones = Arc::new(config.rewrite.zone_table()?);

        for zone in zones.iter() {
            info!(
                zone = %zone.zone,
                prefix = zone.effective_prefix(&config.rewrite.default_prefix),
                protocol = %zone.protocol,
                upstream = %zone.upstream,
                "Zone configured"
            );
        }

        let forwarder = Arc::new(DnsForwarder::new(config.rewrite.upstream_timeout()));
        let handler_use_case = Arc::new(HandleDnsQueryUseCase::new(
            zones.clone(),
            forwarder,
            &config.rewrite,
        )?);

        Ok(Self {
            zones,
            handler_use_case,
        })
    }

    pub fn handler(&self) -> DnsServerHandler {
        DnsServerHandler::new(self.handler_use_case.clone())
    }
}
