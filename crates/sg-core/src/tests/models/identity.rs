use crate::Identity;

#[test]
fn test_identity_new() {
    let identity = Identity::new("u1", Some("u1@example.com")).unwrap();
    assert_eq!(identity.id, "u1");
    assert_eq!(identity.email.as_deref(), Some("u1@example.com"));
}

#[test]
fn test_identity_rejects_empty_id() {
    assert!(Identity::new("", None).is_err());
    assert!(Identity::new("   ", None).is_err());
}

#[test]
fn test_identity_display_is_id() {
    let identity = Identity::new("u1", None).unwrap();
    assert_eq!(identity.to_string(), "u1");
}
