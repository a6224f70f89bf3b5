//! API key lookup.
//!
//! Keys come from environment variables only and are wrapped in
//! [`SecretString`] immediately, so they never reach logs or `Debug` output.

use secrecy::SecretString;

/// Read an API key from the named environment variable.
///
/// Returns `None` if the variable is unset, not valid Unicode, or blank.
pub fn api_key_from_env(var: &str) -> Option<SecretString> {
    api_key_from_lookup(var, |name| std::env::var(name).ok())
}

/// Same as [`api_key_from_env`], reading through `lookup` instead of the process environment.
pub fn api_key_from_lookup(
    var: &str,
    lookup: impl FnOnce(&str) -> Option<String>,
) -> Option<SecretString> {
    let value = lookup(var)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(SecretString::from(trimmed.to_string()))
}
