use crate::dns::forwarding::MessageBuilder;
use async_trait::async_trait;
use ferrous_rewrite_application::services::reply_to;
use ferrous_rewrite_application::use_cases::HandleDnsQueryUseCase;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Length of the fixed DNS header.
const DNS_HEADER_LEN: usize = 12;

/// Entry point for both listeners. UDP datagrams go through `handle_raw`;
/// TCP connections are served by hickory-server through `RequestHandler`.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns `None` when nothing should be sent back.
    pub async fn handle_raw(&self, query_buf: &[u8]) -> Option<Vec<u8>> {
        let request = match Message::from_vec(query_buf) {
            Ok(request) => request,
            Err(e) => {
                warn!(len = query_buf.len(), error = %e, "Malformed DNS query");
                return malformed_query_response(query_buf);
            }
        };

        if request.message_type() == MessageType::Response {
            debug!(id = request.id(), "Ignoring inbound DNS response");
            return None;
        }

        let response = self.use_case.execute(request.clone()).await;

        match MessageBuilder::serialize_message(&response) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(id = request.id(), error = %e, "Failed to encode response");
                MessageBuilder::serialize_message(&reply_to(&request, ResponseCode::ServFail)).ok()
            }
        }
    }
}

#[async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        if request.header().message_type() == MessageType::Response {
            debug!(id = request.header().id(), "Ignoring inbound DNS response");
            return ResponseInfo::from(*request.header());
        }

        let response = self.use_case.execute(request_message(request)).await;

        let mut builder = MessageResponseBuilder::from_message_request(request);
        if let Some(edns) = response.extensions() {
            builder.edns(edns.clone());
        }
        let reply = builder.build(
            *response.header(),
            response.answers(),
            response.name_servers(),
            &[] as &[Record],
            response.additionals(),
        );

        match response_handle.send_response(reply).await {
            Ok(info) => info,
            Err(e) => {
                error!(id = request.header().id(), error = %e, "Failed to send TCP response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

/// Rebuilds the plain message the use case works on from a decoded request.
fn request_message(request: &Request) -> Message {
    let header = request.header();

    let mut message = Message::new();
    message
        .set_id(header.id())
        .set_message_type(header.message_type())
        .set_op_code(header.op_code())
        .set_recursion_desired(header.recursion_desired())
        .set_checking_disabled(header.checking_disabled());
    message.add_query(request.query().original().clone());
    if let Some(edns) = request.edns() {
        message.set_edns(edns.clone());
    }
    message
}

/// SERVFAIL echoing the ID and RD bit of a query that could not be decoded.
/// Anything shorter than a header has no ID to echo and is dropped.
fn malformed_query_response(query_buf: &[u8]) -> Option<Vec<u8>> {
    if query_buf.len() < DNS_HEADER_LEN {
        return None;
    }

    let id = u16::from_be_bytes([query_buf[0], query_buf[1]]);
    let recursion_desired = query_buf[2] & 0x01 != 0;

    let mut response = Message::new();
    response
        .set_id(id)
        .set_message_type(MessageType::Response)
        .set_recursion_desired(recursion_desired)
        .set_response_code(ResponseCode::ServFail);

    MessageBuilder::serialize_message(&response).ok()
}
