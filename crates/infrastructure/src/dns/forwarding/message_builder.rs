//! DNS Message Builder
//!
//! Constructs the outgoing upstream query in wire format using `hickory-proto`.

use ferrous_rewrite_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for `name` carrying the caller-chosen `id`.
    ///
    /// The client's transaction ID is reused upstream so that the reply can
    /// be matched without keeping a translation table.
    pub fn build_query(name: &Name, record_type: RecordType, id: u16) -> Result<Vec<u8>, DomainError> {
        let mut query = Query::query(name.clone(), record_type);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(query);

        Self::serialize_message(&message)
    }

    /// Serialize a Message to wire format bytes
    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
