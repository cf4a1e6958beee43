//! SQL rendering of [`StatusPredicate`] for MySQL.
//!
//! Queries join `accounts` (alias `a`) to the lock row (alias `l`) and the
//! attempts row (alias `n`) of `account_meta`, so an account without metadata
//! still appears with NULL meta values.

use sqlx::{MySql, QueryBuilder};

use av_core::domain::{StatusPredicate, ATTEMPTS_KEY, LOCK_KEY};

/// Attempt counter as an unsigned number; absent or non-numeric values read as 0.
///
/// `TRIM` strips spaces only, and any other non-digit character rejects the
/// value, matching `parse_attempts`.
pub(crate) const ATTEMPTS_EXPR: &str = "COALESCE(IF(TRIM(n.meta_value) <> '' \
     AND TRIM(n.meta_value) NOT REGEXP '[^0-9]', CAST(TRIM(n.meta_value) AS UNSIGNED), 0), 0)";

/// Start a query over every account with its verification metadata joined.
///
/// `select` is the projection, e.g. `SELECT COUNT(DISTINCT a.id) AS total`.
/// The returned builder ends right after `WHERE `.
pub fn base_query<'a>(select: &str) -> QueryBuilder<'a, MySql> {
    let mut builder = QueryBuilder::new(select);
    builder
        .push(" FROM accounts a LEFT JOIN account_meta l ON l.account_id = a.id AND l.meta_key = ")
        .push_bind(LOCK_KEY)
        .push(" LEFT JOIN account_meta n ON n.account_id = a.id AND n.meta_key = ")
        .push_bind(ATTEMPTS_KEY)
        .push(" WHERE ");
    builder
}

/// Append the predicate as a boolean SQL expression
pub fn push_predicate(builder: &mut QueryBuilder<'_, MySql>, predicate: &StatusPredicate) {
    match predicate {
        StatusPredicate::LockAbsent => {
            builder.push("l.meta_value IS NULL");
        }
        StatusPredicate::LockIs(value) => {
            builder.push("l.meta_value = ").push_bind(value.clone());
        }
        StatusPredicate::LockIsNot(value) => {
            builder
                .push("(l.meta_value IS NOT NULL AND l.meta_value <> ")
                .push_bind(value.clone())
                .push(")");
        }
        StatusPredicate::AttemptsAtLeast(n) => {
            builder.push(ATTEMPTS_EXPR).push(" >= ").push_bind(*n);
        }
        StatusPredicate::AttemptsBelow(n) => {
            builder.push(ATTEMPTS_EXPR).push(" < ").push_bind(*n);
        }
        StatusPredicate::All(parts) => push_joined(builder, parts, " AND ", "1 = 1"),
        StatusPredicate::Any(parts) => push_joined(builder, parts, " OR ", "1 = 0"),
    }
}

fn push_joined(
    builder: &mut QueryBuilder<'_, MySql>,
    parts: &[StatusPredicate],
    separator: &str,
    empty: &str,
) {
    if parts.is_empty() {
        builder.push(empty);
        return;
    }
    builder.push("(");
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        push_predicate(builder, part);
    }
    builder.push(")");
}
