use ferrous_rewrite_domain::DomainError;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Decodes an upstream reply and checks it answers the query sent with
    /// `expected_id`.
    pub fn parse(response_bytes: &[u8], expected_id: u16) -> Result<Message, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.id() != expected_id {
            return Err(DomainError::UpstreamIdMismatch {
                expected: expected_id,
                received: message.id(),
            });
        }

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "Upstream sent a query instead of a response".to_string(),
            ));
        }

        debug!(
            rcode = Self::rcode_to_status(message.response_code()),
            answers = message.answers().len(),
            authority = message.name_servers().len(),
            truncated = message.truncated(),
            "DNS response parsed"
        );

        Ok(message)
    }

    pub fn is_transport_error(error: &DomainError) -> bool {
        matches!(
            error,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportConnectionReset { .. }
                | DomainError::IoError(_)
        )
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
