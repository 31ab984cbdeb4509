use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::{create_transport, resolver::resolve_upstream};
use async_trait::async_trait;
use ferrous_rewrite_application::ports::UpstreamForwarder;
use ferrous_rewrite_domain::{DomainError, ZoneConfig};
use hickory_proto::op::Message;
use hickory_proto::rr::{Name, RecordType};
use std::time::{Duration, Instant};
use tracing::debug;

/// Sends one rewritten query to a zone's upstream over the zone's protocol.
pub struct DnsForwarder {
    timeout: Duration,
}

impl DnsForwarder {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl UpstreamForwarder for DnsForwarder {
    async fn forward(
        &self,
        name: &Name,
        record_type: RecordType,
        id: u16,
        zone: &ZoneConfig,
    ) -> Result<Message, DomainError> {
        let server_addr = resolve_upstream(&zone.upstream, self.timeout).await?;
        let request_bytes = MessageBuilder::build_query(name, record_type, id)?;
        let transport = create_transport(zone.protocol, server_addr);

        let start = Instant::now();
        let result = transport.send(&request_bytes, self.timeout).await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                debug!(
                    server = %server_addr,
                    protocol = transport.protocol_name(),
                    transport_error = ResponseParser::is_transport_error(&e),
                    error = %e,
                    "Upstream exchange failed"
                );
                return Err(e);
            }
        };

        let message = ResponseParser::parse(&response.bytes, id)?;

        debug!(
            server = %server_addr,
            protocol = response.protocol_used,
            domain = %name,
            rcode = ResponseParser::rcode_to_status(message.response_code()),
            latency_us = start.elapsed().as_micros() as u64,
            "Upstream answered"
        );

        Ok(message)
    }
}
