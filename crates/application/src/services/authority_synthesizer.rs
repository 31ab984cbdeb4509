use ferrous_rewrite_domain::authority::{SOA_EXPIRE, SOA_REFRESH, SOA_RETRY, SOA_SERIAL};
use ferrous_rewrite_domain::{
    DomainError, SoaTemplate, ZoneConfig, ZoneTable, PLACEHOLDER_ZONE,
};
use hickory_proto::rr::rdata::SOA;
use hickory_proto::rr::{Name, RData, Record};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds the locally owned SOA used for apex answers and for every
/// negative response the proxy emits.
///
/// Output depends only on the zone and the template: the serial is a
/// fixed placeholder, never derived from the clock.
#[derive(Debug, Clone)]
pub struct AuthoritySynthesizer {
    mname: Name,
    rname: Name,
    negative_ttl: u32,
    placeholder: Name,
    owners: HashMap<Arc<str>, Name>,
}

impl AuthoritySynthesizer {
    /// Parses the SOA identity and every zone name once. Fails when any of
    /// them is not a valid DNS name.
    pub fn new(template: &SoaTemplate, zones: &ZoneTable) -> Result<Self, DomainError> {
        let owners = zones
            .iter()
            .map(|zone| Ok((zone.zone.clone(), parse_name(&zone.zone)?)))
            .collect::<Result<HashMap<_, _>, DomainError>>()?;

        Ok(Self {
            mname: parse_name(&template.mname)?,
            rname: parse_name(&template.rname)?,
            negative_ttl: template.negative_ttl,
            placeholder: parse_name(PLACEHOLDER_ZONE)?,
            owners,
        })
    }

    pub fn synthesize(&self, owner: &Name) -> Record {
        let soa = SOA::new(
            self.mname.clone(),
            self.rname.clone(),
            SOA_SERIAL,
            SOA_REFRESH,
            SOA_RETRY,
            SOA_EXPIRE,
            self.negative_ttl,
        );
        Record::from_rdata(owner.clone(), self.negative_ttl, RData::SOA(soa))
    }

    /// SOA owned by the apex of `zone`. A zone that was not in the table at
    /// construction gets the placeholder owner.
    pub fn synthesize_for(&self, zone: &ZoneConfig) -> Record {
        self.synthesize(self.owners.get(&zone.zone).unwrap_or(&self.placeholder))
    }

    /// SOA for names outside every configured zone.
    pub fn synthesize_placeholder(&self) -> Record {
        self.synthesize(&self.placeholder)
    }
}

pub(crate) fn parse_name(name: &str) -> Result<Name, DomainError> {
    let mut parsed = Name::from_ascii(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("'{}': {}", name, e)))?;
    parsed.set_fqdn(true);
    Ok(parsed)
}
