use crate::{Identity, Profile, Role, SessionView};

#[test]
fn test_initial_view_is_loading() {
    let view = SessionView::initial();
    assert!(view.loading);
    assert!(view.identity.is_none());
    assert!(view.profile.is_none());
}

#[test]
fn test_signed_out_view_is_settled() {
    let view = SessionView::signed_out();
    assert!(!view.loading);
    assert!(!view.is_authenticated());
    assert!(!view.is_guest());
}

#[test]
fn test_guest_view_detection() {
    let view = SessionView {
        identity: None,
        profile: Some(Profile::guest("g1")),
        loading: false,
    };
    assert!(view.is_guest());
    assert!(!view.is_authenticated());
}

#[test]
fn test_authenticated_view_is_not_guest() {
    let view = SessionView {
        identity: Some(Identity::new("u1", None).unwrap()),
        profile: Some(Profile::new("u1", Role::User)),
        loading: false,
    };
    assert!(view.is_authenticated());
    assert!(!view.is_guest());
}
