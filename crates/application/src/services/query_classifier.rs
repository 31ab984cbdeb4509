use super::authority_synthesizer::parse_name;
use ferrous_rewrite_domain::{rewrite_name, DomainError, ZoneConfig, ZoneMatch, ZoneTable};
use hickory_proto::op::{Message, Query};
use hickory_proto::rr::{Name, RecordType};

/// Where a query goes after zone matching.
#[derive(Debug)]
pub enum Classification<'a> {
    /// No question in the message.
    ServerFailure,

    /// Name outside every configured zone.
    Unmatched,

    /// Query for the zone apex, answered locally.
    Apex {
        zone: &'a ZoneConfig,
        record_type: RecordType,
    },

    /// Subdomain queried for a type other than A/AAAA.
    DisallowedType { zone: &'a ZoneConfig },

    /// Subdomain A/AAAA query that should be rewritten and forwarded.
    Rewrite {
        zone: &'a ZoneConfig,
        query: &'a Query,
    },
}

/// Per-query state threaded through rewrite, forward and reconcile.
#[derive(Debug, Clone)]
pub struct RewriteContext<'a> {
    pub zone: &'a ZoneConfig,

    /// Question name as the client sent it, case preserved.
    pub original_name: Name,

    pub upstream_name: Name,

    pub record_type: RecordType,
}

impl<'a> RewriteContext<'a> {
    pub fn build(
        query: &Query,
        zone: &'a ZoneConfig,
        default_prefix: &str,
    ) -> Result<Self, DomainError> {
        let original_name = query.name().clone();
        let rewritten = rewrite_name(&fqdn_ascii(&original_name), zone, default_prefix)?;

        Ok(Self {
            zone,
            upstream_name: parse_name(&rewritten)?,
            original_name,
            record_type: query.query_type(),
        })
    }
}

pub struct QueryClassifier<'a> {
    zones: &'a ZoneTable,
}

impl<'a> QueryClassifier<'a> {
    pub fn new(zones: &'a ZoneTable) -> Self {
        Self { zones }
    }

    /// Only the first question is considered.
    pub fn classify(&self, request: &'a Message) -> Classification<'a> {
        let Some(query) = request.queries().first() else {
            return Classification::ServerFailure;
        };

        let record_type = query.query_type();
        let name = fqdn_ascii(query.name());

        match self.zones.lookup(&name) {
            ZoneMatch::None => Classification::Unmatched,
            ZoneMatch::Apex(zone) => Classification::Apex { zone, record_type },
            ZoneMatch::Subdomain(zone) => {
                if is_address_type(record_type) {
                    Classification::Rewrite { zone, query }
                } else {
                    Classification::DisallowedType { zone }
                }
            }
        }
    }
}

fn is_address_type(record_type: RecordType) -> bool {
    matches!(record_type, RecordType::A | RecordType::AAAA)
}

fn fqdn_ascii(name: &Name) -> String {
    let mut ascii = name.to_ascii();
    if !ascii.ends_with('.') {
        ascii.push('.');
    }
    ascii
}
