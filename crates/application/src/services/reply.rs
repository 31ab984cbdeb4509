use hickory_proto::op::{Message, MessageType, ResponseCode};

/// Empty response correlated with `request`: same id, opcode, RD/CD bits
/// and first question.
pub fn reply_to(request: &Message, code: ResponseCode) -> Message {
    let mut response = Message::new();
    response.set_response_code(code);
    adopt_request_header(&mut response, request);
    response
}

/// Rewrites the header and question of `response` so that it answers
/// `request`. Record sections and the response code are left untouched.
pub fn adopt_request_header(response: &mut Message, request: &Message) {
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_checking_disabled(request.checking_disabled());

    response.take_queries();
    if let Some(query) = request.queries().first() {
        response.add_query(query.clone());
    }
}
