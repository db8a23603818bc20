//! Serialization tests for core model types.

use crate::error::ErrorKind;
use crate::models::ProviderKind;

#[test]
fn test_provider_kind_serializes_kebab_case() {
    let json = serde_json::to_string(&ProviderKind::WiseOldMan).unwrap();
    assert_eq!(json, r#""wise-old-man""#);

    let json = serde_json::to_string(&ProviderKind::CollectionLog).unwrap();
    assert_eq!(json, r#""collection-log""#);
}

#[test]
fn test_provider_kind_deserializes() {
    let kind: ProviderKind = serde_json::from_str(r#""temple""#).unwrap();
    assert_eq!(kind, ProviderKind::Temple);

    let result: Result<ProviderKind, _> = serde_json::from_str(r#""runelite""#);
    assert!(result.is_err());
}

#[test]
fn test_provider_kind_as_map_key() {
    let mut map = std::collections::HashMap::new();
    map.insert(ProviderKind::Osrsbox, 1);
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"osrsbox":1}"#);
}

#[test]
fn test_error_kind_wire_names() {
    for kind in [
        ErrorKind::NotFound,
        ErrorKind::RateLimit,
        ErrorKind::ServerError,
        ErrorKind::ParseError,
    ] {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.as_str()));
    }
}
