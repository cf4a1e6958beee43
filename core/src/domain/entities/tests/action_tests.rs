use std::str::FromStr;

use crate::domain::entities::{BulkAction, QuickAction};
use crate::errors::DomainError;

#[test]
fn test_bulk_action_names() {
    assert_eq!(BulkAction::from_str("verify_unlock").unwrap(), BulkAction::Unlock);
    assert_eq!(BulkAction::from_str("verify_resend").unwrap(), BulkAction::Resend);
    assert_eq!(BulkAction::Unlock.to_string(), "verify_unlock");
}

#[test]
fn test_bulk_action_unknown_name_is_invalid() {
    match BulkAction::from_str("delete") {
        Err(DomainError::InvalidAction { action }) => assert_eq!(action, "delete"),
        other => panic!("Expected InvalidAction, got {:?}", other),
    }
    assert!(BulkAction::recognize("delete").is_none());
}

#[test]
fn test_bulk_action_serde_uses_dispatcher_names() {
    let json = serde_json::to_string(&BulkAction::Resend).unwrap();
    assert_eq!(json, "\"verify_resend\"");
}

#[test]
fn test_quick_action_parsing() {
    assert_eq!("unlock".parse::<QuickAction>().unwrap(), QuickAction::Unlock);
    assert_eq!("resend".parse::<QuickAction>().unwrap(), QuickAction::Resend);
    assert!("verify_unlock".parse::<QuickAction>().is_err());
    assert_eq!(BulkAction::from(QuickAction::Resend), BulkAction::Resend);
}
