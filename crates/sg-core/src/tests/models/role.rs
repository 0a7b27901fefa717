use crate::Role;

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Guest.as_str(), "GUEST");
    assert_eq!(Role::User.as_str(), "USER");
    assert_eq!(Role::Admin.as_str(), "ADMIN");
    assert_eq!(Role::SuperAdmin.as_str(), "SUPERADMIN");
}

#[test]
fn test_role_from_str() {
    assert_eq!(Role::from_str("GUEST").unwrap(), Role::Guest);
    assert_eq!(Role::from_str("SUPERADMIN").unwrap(), Role::SuperAdmin);
    assert!(Role::from_str("superadmin").is_err());
    assert!(Role::from_str("OWNER").is_err());
}

#[test]
fn test_role_serde_round_trip() {
    let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
    assert_eq!(json, "\"SUPERADMIN\"");

    let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
    assert_eq!(role, Role::Admin);
}

#[test]
fn test_role_can_manage_sessions() {
    assert!(!Role::Guest.can_manage_sessions());
    assert!(!Role::User.can_manage_sessions());
    assert!(Role::Admin.can_manage_sessions());
    assert!(Role::SuperAdmin.can_manage_sessions());
}
