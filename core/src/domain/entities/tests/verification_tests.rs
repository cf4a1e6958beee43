use crate::domain::entities::verification::parse_attempts;
use crate::domain::entities::{
    AccountId, LockState, VerificationRecord, VerificationStatus, UNLOCKED_VALUE,
};

#[test]
fn test_lock_state_from_stored_value() {
    assert_eq!(LockState::from_stored(UNLOCKED_VALUE), LockState::Unlocked);
    assert_eq!(LockState::from_stored("a1b2c3d4"), LockState::Locked);
    assert_eq!(LockState::from_stored(""), LockState::Locked);
    assert_eq!(LockState::from_stored("Unlocked"), LockState::Locked);
}

#[test]
fn test_record_from_stored_strings() {
    let record = VerificationRecord::from_stored(Some("token-123"), Some("3"));
    assert_eq!(record.lock_state, Some(LockState::Locked));
    assert_eq!(record.attempt_count, Some(3));
    assert_eq!(record.attempts(), 3);
}

#[test]
fn test_record_absent_fields_fold_to_defaults() {
    let record = VerificationRecord::from_stored(None, None);
    assert_eq!(record.lock_state, None);
    assert_eq!(record.effective_lock(), LockState::Unlocked);
    assert_eq!(record.attempts(), 0);
}

#[test]
fn test_unparseable_attempts_read_as_zero() {
    let record = VerificationRecord::from_stored(Some("locked"), Some("many"));
    assert_eq!(record.attempt_count, Some(0));

    let record = VerificationRecord::from_stored(Some("locked"), Some("-2"));
    assert_eq!(record.attempts(), 0);
}

#[test]
fn test_attempts_parse_like_the_sql_counter() {
    assert_eq!(parse_attempts(" 7 "), 7);
    assert_eq!(parse_attempts("007"), 7);
    assert_eq!(parse_attempts("7\n"), 0);
    assert_eq!(parse_attempts("\t7"), 0);
    assert_eq!(parse_attempts("+7"), 0);
    assert_eq!(parse_attempts(""), 0);
    assert_eq!(parse_attempts("   "), 0);
    assert_eq!(parse_attempts("4294967295"), u32::MAX);
    assert_eq!(parse_attempts("4294967296"), u32::MAX);
    assert_eq!(parse_attempts("99999999999999999999999"), u32::MAX);
}

#[test]
fn test_account_id_serializes_transparently() {
    let id = AccountId::new(77);
    assert_eq!(serde_json::to_string(&id).unwrap(), "77");
    let parsed: AccountId = serde_json::from_str("77").unwrap();
    assert_eq!(parsed, id);
    assert_eq!(" 77 ".parse::<AccountId>().unwrap(), id);
}

#[test]
fn test_status_serialization() {
    assert_eq!(
        serde_json::to_string(&VerificationStatus::LockedOut).unwrap(),
        "\"locked_out\""
    );
    assert_eq!(VerificationStatus::Verified.to_string(), "verified");
}
