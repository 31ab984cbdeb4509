use async_trait::async_trait;
use ferrous_rewrite_domain::{DomainError, ZoneConfig};
use hickory_proto::op::Message;
use hickory_proto::rr::{Name, RecordType};

#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Send one query for `name`/`record_type` to the zone's upstream and
    /// return its response.
    ///
    /// The outgoing message carries `id` and has recursion desired set.
    /// Exactly one exchange is attempted; timeouts, refused connections and
    /// unparseable replies all surface as `Err`.
    async fn forward(
        &self,
        name: &Name,
        record_type: RecordType,
        id: u16,
        zone: &ZoneConfig,
    ) -> Result<Message, DomainError>;
}
