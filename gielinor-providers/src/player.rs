//! Player name handling shared by the player-keyed providers.

use gielinor_core::{ApiError, ProviderKind};

/// Validates a player name for use in a URL.
///
/// Surrounding whitespace is dropped; an empty name is rejected before any
/// network access.
pub(crate) fn username(provider: ProviderKind, raw: &str) -> Result<&str, ApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidRequest {
            provider,
            message: "username must not be empty".to_string(),
        });
    }
    Ok(name)
}

/// Returns the cache-key form of a player name.
///
/// Names are case-insensitive in game, so `Zezima` and `zezima` share a key.
pub(crate) fn cache_name(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_trims() {
        assert_eq!(username(ProviderKind::Temple, "  Zezima ").unwrap(), "Zezima");
    }

    #[test]
    fn test_empty_username_rejected() {
        let err = username(ProviderKind::WiseOldMan, "   ").unwrap_err();
        assert_eq!(err.kind(), gielinor_core::ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_cache_name_is_lowercase() {
        assert_eq!(cache_name("Iron Man"), "iron man");
    }
}
