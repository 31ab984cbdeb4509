use crate::ports::UpstreamForwarder;
use crate::services::{
    reply_to, AuthoritySynthesizer, Classification, QueryClassifier, ResponseReconciler,
    RewriteContext,
};
use ferrous_rewrite_domain::config::RewriteConfig;
use ferrous_rewrite_domain::{DomainError, ZoneConfig, ZoneTable};
use hickory_proto::op::{Message, Query, ResponseCode};
use hickory_proto::rr::{Record, RecordType};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Terminal outcome of one query. Every path through the pipeline ends in
/// exactly one of these; none of them aborts the listener.
#[derive(Debug)]
pub enum Disposition {
    ServerFailure,

    /// NXDOMAIN carrying a locally synthesized SOA in the authority section.
    NameError { authority: Record },

    /// SOA query at a zone apex.
    ApexAnswer { soa: Record },

    /// Any other query at a zone apex: NOERROR, empty answer.
    NoData { authority: Record },

    /// Upstream response, already reconciled for the client.
    Forwarded(Message),
}

impl Disposition {
    pub fn response_code(&self) -> ResponseCode {
        match self {
            Disposition::ServerFailure => ResponseCode::ServFail,
            Disposition::NameError { .. } => ResponseCode::NXDomain,
            Disposition::ApexAnswer { .. } | Disposition::NoData { .. } => ResponseCode::NoError,
            Disposition::Forwarded(message) => message.response_code(),
        }
    }

    pub fn into_response(self, request: &Message) -> Message {
        let code = self.response_code();
        match self {
            Disposition::Forwarded(message) => message,
            Disposition::ServerFailure => reply_to(request, code),
            Disposition::ApexAnswer { soa } => {
                let mut response = reply_to(request, code);
                response.add_answer(soa);
                response
            }
            Disposition::NameError { authority } | Disposition::NoData { authority } => {
                let mut response = reply_to(request, code);
                response.add_name_server(authority);
                response
            }
        }
    }
}

pub struct HandleDnsQueryUseCase {
    zones: Arc<ZoneTable>,
    forwarder: Arc<dyn UpstreamForwarder>,
    authority: AuthoritySynthesizer,
    default_prefix: Arc<str>,
    answer_ttl: u32,
}

impl HandleDnsQueryUseCase {
    /// Fails when a zone or the SOA identity is not a valid DNS name.
    pub fn new(
        zones: Arc<ZoneTable>,
        forwarder: Arc<dyn UpstreamForwarder>,
        config: &RewriteConfig,
    ) -> Result<Self, DomainError> {
        let authority = AuthoritySynthesizer::new(&config.soa_template(), &zones)?;

        Ok(Self {
            zones,
            forwarder,
            authority,
            default_prefix: config.default_prefix.as_str().into(),
            answer_ttl: config.answer_ttl,
        })
    }

    /// Produces the message to send back to the client. Never fails.
    pub async fn execute(&self, mut request: Message) -> Message {
        if let Some(edns) = request.extensions_mut().as_mut() {
            edns.set_dnssec_ok(false);
        }

        let start = Instant::now();
        let disposition = self.resolve(&request).await;

        debug!(
            id = request.id(),
            domain = ?request.queries().first().map(|q| q.name().to_ascii()),
            rcode = ?disposition.response_code(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Query handled"
        );

        disposition.into_response(&request)
    }

    pub async fn resolve(&self, request: &Message) -> Disposition {
        let classifier = QueryClassifier::new(&self.zones);

        match classifier.classify(request) {
            Classification::ServerFailure => {
                debug!(id = request.id(), "Query carries no question");
                Disposition::ServerFailure
            }
            Classification::Unmatched => Disposition::NameError {
                authority: self.authority.synthesize_placeholder(),
            },
            Classification::Apex { zone, record_type } => {
                let soa = self.authority.synthesize_for(zone);
                if record_type == RecordType::SOA {
                    Disposition::ApexAnswer { soa }
                } else {
                    Disposition::NoData { authority: soa }
                }
            }
            Classification::DisallowedType { zone } => Disposition::NameError {
                authority: self.authority.synthesize_for(zone),
            },
            Classification::Rewrite { zone, query } => self.forward(request, zone, query).await,
        }
    }

    async fn forward(&self, request: &Message, zone: &ZoneConfig, query: &Query) -> Disposition {
        let ctx = match RewriteContext::build(query, zone, &self.default_prefix) {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!(domain = %query.name(), zone = %zone.zone, error = %e, "Name rewrite failed");
                return Disposition::ServerFailure;
            }
        };

        debug!(
            domain = %ctx.original_name,
            upstream_name = %ctx.upstream_name,
            record_type = ?ctx.record_type,
            upstream = %zone.upstream,
            protocol = %zone.protocol,
            "Forwarding rewritten query"
        );

        match self
            .forwarder
            .forward(&ctx.upstream_name, ctx.record_type, request.id(), zone)
            .await
        {
            Ok(response) => {
                let reconciler = ResponseReconciler::new(&self.authority, self.answer_ttl);
                Disposition::Forwarded(reconciler.reconcile(response, request, &ctx))
            }
            Err(e) => {
                warn!(
                    domain = %ctx.original_name,
                    upstream = %zone.upstream,
                    error = %e,
                    "Upstream exchange failed"
                );
                Disposition::ServerFailure
            }
        }
    }
}
