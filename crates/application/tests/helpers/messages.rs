#![allow(dead_code)]

use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, SOA};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::Ipv4Addr;

pub fn name(value: &str) -> Name {
    Name::from_ascii(value).unwrap()
}

pub fn query_message(id: u16, qname: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(name(qname), record_type));
    message
}

pub fn with_dnssec_ok(mut message: Message) -> Message {
    let mut edns = Edns::new();
    edns.set_dnssec_ok(true);
    message.set_edns(edns);
    message
}

pub fn a_record(owner: &str, ttl: u32, ip: Ipv4Addr) -> Record {
    Record::from_rdata(name(owner), ttl, RData::A(A(ip)))
}

pub fn soa_record(owner: &str, ttl: u32) -> Record {
    let soa = SOA::new(
        name("ns.upstream.example."),
        name("hostmaster.upstream.example."),
        2024010101,
        7200,
        900,
        1_209_600,
        ttl,
    );
    Record::from_rdata(name(owner), ttl, RData::SOA(soa))
}

/// Upstream-side reply for `qname`, as a real resolver would send it.
pub fn upstream_reply(id: u16, qname: &str, record_type: RecordType, code: ResponseCode) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .set_recursion_available(true)
        .set_response_code(code);
    message.add_query(Query::query(name(qname), record_type));
    message
}
