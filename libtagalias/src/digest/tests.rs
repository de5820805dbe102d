use super::*;

#[test]
fn test_digest_new_keeps_value_verbatim() {
    let digest = Digest::new("sha256:4abcf20661432fb2d719b4568d94db3b").unwrap();
    assert_eq!(digest.as_str(), "sha256:4abcf20661432fb2d719b4568d94db3b");
}

#[test]
fn test_digest_new_empty_is_none() {
    assert!(Digest::new("").is_none());
    assert!(Digest::new("   ").is_none());
}

#[test]
fn test_digest_is_not_validated() {
    // Anything non-empty is accepted; equality is the only operation.
    assert!(Digest::new("not-a-real-digest").is_some());
}

#[test]
fn test_digest_equality_is_exact() {
    let a = Digest::new("sha256:abc").unwrap();
    let b = Digest::new("sha256:abc").unwrap();
    let upper = Digest::new("sha256:ABC").unwrap();

    assert_eq!(a, b);
    assert_ne!(a, upper);
}

#[test]
fn test_digest_display() {
    let digest = Digest::new("sha256:abc").unwrap();
    assert_eq!(digest.to_string(), "sha256:abc");
}
