use crate::{Identity, Profile, Role};

use serde_json::json;

#[test]
fn test_profile_matches_identity() {
    let identity = Identity::new("u1", None).unwrap();
    assert!(Profile::new("u1", Role::User).matches_identity(&identity));
    assert!(!Profile::new("u2", Role::User).matches_identity(&identity));
}

#[test]
fn test_guest_profile_has_guest_role() {
    let profile = Profile::guest("g1");
    assert_eq!(profile.role, Role::Guest);
    assert_eq!(profile.id, "g1");
}

#[test]
fn test_profile_preserves_opaque_attributes() {
    let body = json!({
        "id": "u1",
        "role": "USER",
        "display_name": "User One",
        "theme": "dark"
    });

    let profile: Profile = serde_json::from_value(body).unwrap();
    assert_eq!(profile.role, Role::User);
    assert_eq!(profile.attributes["display_name"], "User One");

    let round_trip = serde_json::to_value(&profile).unwrap();
    assert_eq!(round_trip["theme"], "dark");
}
