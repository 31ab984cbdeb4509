use ferrous_rewrite_application::use_cases::HandleDnsQueryUseCase;
use ferrous_rewrite_domain::config::RewriteConfig;
use ferrous_rewrite_infrastructure::dns::{DnsForwarder, DnsServerHandler};
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RecordType};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

mod helpers;
use helpers::{answer_with_a, answer_with_code, MockDnsServer};

fn handler_for(protocol: &str, upstream: SocketAddr) -> DnsServerHandler {
    let mut config = RewriteConfig::default();
    config.set_zones_from_list(&format!("pod.example={}:{}", protocol, upstream));

    let zones = Arc::new(config.zone_table().unwrap());
    let forwarder = Arc::new(DnsForwarder::new(Duration::from_secs(2)));
    let use_case = HandleDnsQueryUseCase::new(zones, forwarder, &config).unwrap();
    DnsServerHandler::new(Arc::new(use_case))
}

fn query_bytes(id: u16, name: &str, record_type: RecordType, dnssec_ok: bool) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), record_type));
    if dnssec_ok {
        let mut edns = Edns::new();
        edns.set_dnssec_ok(true);
        message.set_edns(edns);
    }
    message.to_vec().unwrap()
}

#[tokio::test]
async fn test_udp_zone_end_to_end() {
    let upstream = MockDnsServer::start_udp(answer_with_a(Ipv4Addr::new(10, 1, 1, 1), 5)).await;
    let handler = handler_for("udp", upstream.addr());

    let bytes = handler
        .handle_raw(&query_bytes(0x0101, "Foo.pod.example.", RecordType::A, true))
        .await
        .unwrap();
    let response = Message::from_vec(&bytes).unwrap();

    assert_eq!(response.id(), 0x0101);
    assert_eq!(response.message_type(), MessageType::Response);
    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert_eq!(response.queries()[0].name().to_ascii(), "Foo.pod.example.");
    assert_eq!(response.answers().len(), 1);
    assert_eq!(response.answers()[0].name().to_ascii(), "Foo.pod.example.");
    assert_eq!(response.answers()[0].ttl(), 300);
    assert!(!response
        .extensions()
        .as_ref()
        .map(|edns| edns.dnssec_ok())
        .unwrap_or(false));
    assert_eq!(upstream.query_count(), 1);
}

#[tokio::test]
async fn test_tcp_zone_end_to_end() {
    let upstream = MockDnsServer::start_tcp(answer_with_a(Ipv4Addr::new(10, 1, 1, 2), 5)).await;
    let handler = handler_for("tcp", upstream.addr());

    let bytes = handler
        .handle_raw(&query_bytes(0x0202, "bar.pod.example.", RecordType::A, false))
        .await
        .unwrap();
    let response = Message::from_vec(&bytes).unwrap();

    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert_eq!(response.answers()[0].name().to_ascii(), "bar.pod.example.");
    assert_eq!(upstream.query_count(), 1);
}

#[tokio::test]
async fn test_upstream_nxdomain_end_to_end() {
    let upstream = MockDnsServer::start_udp(answer_with_code(ResponseCode::NXDomain)).await;
    let handler = handler_for("udp", upstream.addr());

    let bytes = handler
        .handle_raw(&query_bytes(3, "gone.pod.example.", RecordType::A, false))
        .await
        .unwrap();
    let response = Message::from_vec(&bytes).unwrap();

    assert_eq!(response.response_code(), ResponseCode::NXDomain);
    assert_eq!(response.name_servers().len(), 1);
    assert_eq!(response.name_servers()[0].name().to_ascii(), "pod.example.");
    assert_eq!(response.name_servers()[0].record_type(), RecordType::SOA);
}

#[tokio::test]
async fn test_unreachable_upstream_is_servfail() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let handler = handler_for("tcp", addr);

    let bytes = handler
        .handle_raw(&query_bytes(4, "foo.pod.example.", RecordType::A, false))
        .await
        .unwrap();
    let response = Message::from_vec(&bytes).unwrap();

    assert_eq!(response.id(), 4);
    assert_eq!(response.response_code(), ResponseCode::ServFail);
}

#[tokio::test]
async fn test_local_answers_need_no_upstream() {
    let upstream = MockDnsServer::start_udp(answer_with_code(ResponseCode::NoError)).await;
    let handler = handler_for("udp", upstream.addr());

    let bytes = handler
        .handle_raw(&query_bytes(5, "pod.example.", RecordType::SOA, false))
        .await
        .unwrap();
    let response = Message::from_vec(&bytes).unwrap();
    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert_eq!(response.answers()[0].record_type(), RecordType::SOA);

    let bytes = handler
        .handle_raw(&query_bytes(6, "foo.pod.example.", RecordType::MX, false))
        .await
        .unwrap();
    let response = Message::from_vec(&bytes).unwrap();
    assert_eq!(response.response_code(), ResponseCode::NXDomain);

    assert_eq!(upstream.query_count(), 0);
}

#[tokio::test]
async fn test_malformed_and_response_packets() {
    let upstream = MockDnsServer::start_udp(answer_with_code(ResponseCode::NoError)).await;
    let handler = handler_for("udp", upstream.addr());

    assert!(handler.handle_raw(&[0x00, 0x01]).await.is_none());

    let truncated = [
        0x77, 0x77, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05,
    ];
    let bytes = handler.handle_raw(&truncated).await.unwrap();
    let response = Message::from_vec(&bytes).unwrap();
    assert_eq!(response.id(), 0x7777);
    assert_eq!(response.response_code(), ResponseCode::ServFail);

    let mut reflected = Message::from_vec(&query_bytes(8, "foo.pod.example.", RecordType::A, false))
        .unwrap();
    reflected.set_message_type(MessageType::Response);
    assert!(handler
        .handle_raw(&reflected.to_vec().unwrap())
        .await
        .is_none());
}
