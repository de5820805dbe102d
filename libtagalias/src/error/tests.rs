use super::*;
use std::error::Error;

#[test]
fn test_config_error_invalid_limit() {
    let err = TagAliasError::config("limit must be a positive integer, got '0'");

    assert!(matches!(err, TagAliasError::Config { .. }));
    assert!(err.to_string().contains("positive integer"));
}

#[test]
fn test_config_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
    let err = TagAliasError::config_with_source("failed to read config file", io_err);

    assert!(err.source().is_some());
    assert!(err.source().unwrap().to_string().contains("permission denied"));
}

#[test]
fn test_validation_error() {
    let err = TagAliasError::validation("image reference cannot be empty");

    assert!(matches!(err, TagAliasError::Validation { .. }));
    assert!(err.to_string().contains("cannot be empty"));
}

#[test]
fn test_authentication_error_includes_status() {
    let err = TagAliasError::authentication("token request rejected", Some(401));

    assert!(matches!(err, TagAliasError::Authentication { .. }));
    assert!(err.to_string().contains("401"));
    assert!(err.to_string().contains("token request rejected"));
}

#[test]
fn test_registry_error_includes_status_and_url() {
    let err = TagAliasError::registry(
        "internal server error",
        500,
        "https://registry.example.com/v2/org/app/tags/list",
    );

    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("/v2/org/app/tags/list"));
}

#[test]
fn test_registry_404_is_not_found() {
    let err = TagAliasError::registry("manifest unknown", 404, "https://r.example/v2/a/manifests/x");
    assert!(err.is_not_found());
}

#[test]
fn test_registry_500_is_not_not_found() {
    let err = TagAliasError::registry("boom", 500, "https://r.example/v2/a/manifests/x");
    assert!(!err.is_not_found());
}

#[test]
fn test_other_variants_are_not_not_found() {
    assert!(!TagAliasError::validation("bad manifest").is_not_found());
    assert!(!TagAliasError::authentication("expired", Some(404)).is_not_found());
    assert!(!TagAliasError::missing_digest("library/nginx:latest").is_not_found());
}

#[test]
fn test_network_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    let err = TagAliasError::network_with_source("failed to connect", io_err);

    assert!(matches!(err, TagAliasError::Network { .. }));
    assert!(err.source().is_some());
}

#[test]
fn test_missing_digest_names_reference() {
    let err = TagAliasError::missing_digest("library/nginx:1.25");

    assert!(matches!(err, TagAliasError::MissingDigest { .. }));
    assert!(err.to_string().contains("library/nginx:1.25"));
}

#[test]
fn test_io_error_keeps_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
    let err = TagAliasError::io("failed to write match", io_err);

    assert!(err.to_string().contains("failed to write match"));
    assert!(err.source().unwrap().to_string().contains("broken pipe"));
}

#[test]
fn test_error_implements_error_trait() {
    let err = TagAliasError::missing_digest("library/nginx:latest");
    let _: &dyn std::error::Error = &err;
}
