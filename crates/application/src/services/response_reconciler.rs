use super::authority_synthesizer::AuthoritySynthesizer;
use super::query_classifier::RewriteContext;
use super::reply::adopt_request_header;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::Record;
use tracing::debug;

/// Turns an upstream response for the rewritten name back into an answer
/// for the name the client asked about.
pub struct ResponseReconciler<'a> {
    authority: &'a AuthoritySynthesizer,
    answer_ttl: u32,
}

impl<'a> ResponseReconciler<'a> {
    pub fn new(authority: &'a AuthoritySynthesizer, answer_ttl: u32) -> Self {
        Self {
            authority,
            answer_ttl,
        }
    }

    pub fn reconcile(
        &self,
        mut response: Message,
        request: &Message,
        ctx: &RewriteContext<'_>,
    ) -> Message {
        if response.response_code() == ResponseCode::NXDomain {
            let dropped = response.take_name_servers().len();
            response.add_name_server(self.authority.synthesize_for(ctx.zone));
            debug!(
                zone = %ctx.zone.zone,
                dropped_authority = dropped,
                "Replaced upstream negative authority with local SOA"
            );
        }

        adopt_request_header(&mut response, request);

        // The client never asked for DNSSEC; do not let the upstream claim it.
        if let Some(edns) = response.extensions_mut().as_mut() {
            edns.set_dnssec_ok(false);
        }

        let answers = self.restore_owner(response.take_answers(), ctx);
        response.insert_answers(answers);
        let authority = self.restore_owner(response.take_name_servers(), ctx);
        response.insert_name_servers(authority);
        let additionals = self.restore_owner(response.take_additionals(), ctx);
        response.insert_additionals(additionals);

        response
    }

    /// Records owned by the rewritten name get the client's original name
    /// and the configured answer TTL; everything else passes through.
    fn restore_owner(&self, mut records: Vec<Record>, ctx: &RewriteContext<'_>) -> Vec<Record> {
        for record in records
            .iter_mut()
            .filter(|r| r.name() == &ctx.upstream_name)
        {
            record
                .set_name(ctx.original_name.clone())
                .set_ttl(self.answer_ttl);
        }
        records
    }
}
