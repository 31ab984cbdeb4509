use crate::errors::DomainError;
use crate::zone::ZoneConfig;

/// Builds the upstream query name for a subdomain of `zone`:
/// `foo.pod.example.` becomes `<prefix>foo.`.
///
/// The remainder is lower-cased; the prefix is used as configured.
pub fn rewrite_name(
    name: &str,
    zone: &ZoneConfig,
    default_prefix: &str,
) -> Result<String, DomainError> {
    let name = name.to_ascii_lowercase();
    let suffix = format!(".{}", zone.zone);

    let remainder = name.strip_suffix(suffix.as_str()).unwrap_or(&name);
    if remainder.is_empty() || remainder == name {
        return Err(DomainError::EmptySubdomain {
            name,
            zone: zone.zone.to_string(),
        });
    }

    let prefix = zone.effective_prefix(default_prefix);
    let mut rewritten = String::with_capacity(prefix.len() + remainder.len() + 1);
    rewritten.push_str(prefix);
    rewritten.push_str(remainder);
    rewritten.push('.');
    Ok(rewritten)
}
