use av_core::domain::{StatusFilter, StatusPredicate};

use crate::database::predicate_sql::{base_query, push_predicate, ATTEMPTS_EXPR};

fn render(predicate: &StatusPredicate) -> String {
    let mut builder = base_query("SELECT COUNT(DISTINCT a.id) AS total");
    push_predicate(&mut builder, predicate);
    builder.sql().to_string()
}

fn where_clause(predicate: &StatusPredicate) -> String {
    let sql = render(predicate);
    let at = sql.find(" WHERE ").expect("query has a WHERE clause");
    sql[at + " WHERE ".len()..].to_string()
}

#[test]
fn test_base_query_joins_both_meta_rows() {
    let sql = render(&StatusPredicate::LockAbsent);
    assert!(sql.starts_with("SELECT COUNT(DISTINCT a.id) AS total FROM accounts a"));
    assert!(sql.contains("LEFT JOIN account_meta l ON l.account_id = a.id AND l.meta_key = ?"));
    assert!(sql.contains("LEFT JOIN account_meta n ON n.account_id = a.id AND n.meta_key = ?"));
}

#[test]
fn test_verified_predicate_sql() {
    let clause = where_clause(&StatusPredicate::for_filter(StatusFilter::Verified, 5));
    assert_eq!(clause, "(l.meta_value IS NULL OR l.meta_value = ?)");
}

#[test]
fn test_unverified_predicate_requires_present_lock() {
    let clause = where_clause(&StatusPredicate::for_filter(StatusFilter::Unverified, 5));
    assert_eq!(clause, "(l.meta_value IS NOT NULL AND l.meta_value <> ?)");
}

#[test]
fn test_locked_out_predicate_compares_coalesced_attempts() {
    let clause = where_clause(&StatusPredicate::for_filter(StatusFilter::LockedOut, 5));
    assert!(clause.starts_with("((l.meta_value IS NOT NULL AND l.meta_value <> ?) AND "));
    assert!(clause.contains("COALESCE("));
    assert!(clause.contains("CAST(TRIM(n.meta_value) AS UNSIGNED)"));
    assert!(clause.ends_with(" >= ?)"));
}

#[test]
fn test_attempts_expression_rejects_non_digits() {
    // Whitespace other than spaces and signs must fall through to 0
    assert!(ATTEMPTS_EXPR.contains("TRIM(n.meta_value) <> ''"));
    assert!(ATTEMPTS_EXPR.contains("NOT REGEXP '[^0-9]'"));
    assert!(!ATTEMPTS_EXPR.contains('$'));
}

#[test]
fn test_empty_combinators() {
    assert_eq!(where_clause(&StatusPredicate::All(vec![])), "1 = 1");
    assert_eq!(where_clause(&StatusPredicate::Any(vec![])), "1 = 0");
}

#[test]
fn test_pending_predicate_uses_below() {
    let clause = where_clause(&StatusPredicate::pending(3));
    assert!(clause.ends_with(" < ?)"));
}
