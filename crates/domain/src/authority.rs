//! Fixed fields of the locally synthesized SOA record.

/// Owner used for negative answers to names outside every configured zone.
pub const PLACEHOLDER_ZONE: &str = "invalid.";

pub const SOA_SERIAL: u32 = 1;
pub const SOA_REFRESH: i32 = 3600;
pub const SOA_RETRY: i32 = 600;
pub const SOA_EXPIRE: i32 = 86_400;

/// Operator identity published in every synthesized SOA, plus the
/// negative-caching TTL used for both the record TTL and its MINIMUM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaTemplate {
    pub mname: String,
    pub rname: String,
    pub negative_ttl: u32,
}

impl SoaTemplate {
    pub fn new(mname: impl Into<String>, rname: impl Into<String>, negative_ttl: u32) -> Self {
        Self {
            mname: mname.into(),
            rname: rname.into(),
            negative_ttl,
        }
    }
}
