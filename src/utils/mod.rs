pub mod identity_cache;
pub mod identity_filter;
pub mod validation;

/// Rolls and emails compare case-insensitively and ignore surrounding space
#[inline]
fn normalize(identity: &str) -> String {
    identity.trim().to_lowercase()
}
