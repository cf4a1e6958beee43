//! Administrative actions that mutate verification state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Action name registered with the bulk dispatcher for unlocking
pub const BULK_UNLOCK: &str = "verify_unlock";

/// Action name registered with the bulk dispatcher for resending
pub const BULK_RESEND: &str = "verify_resend";

/// Bulk action recognized by the verification dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulkAction {
    #[serde(rename = "verify_unlock")]
    Unlock,
    #[serde(rename = "verify_resend")]
    Resend,
}

impl BulkAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkAction::Unlock => BULK_UNLOCK,
            BulkAction::Resend => BULK_RESEND,
        }
    }

    /// Lenient lookup used by the dispatcher: unknown names are not an error there
    pub fn recognize(name: &str) -> Option<Self> {
        match name {
            BULK_UNLOCK => Some(BulkAction::Unlock),
            BULK_RESEND => Some(BulkAction::Resend),
            _ => None,
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BulkAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::recognize(s).ok_or_else(|| DomainError::InvalidAction {
            action: s.to_string(),
        })
    }
}

/// Single-account action offered as a per-row control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickAction {
    Unlock,
    Resend,
}

impl QuickAction {
    pub const ALL: [QuickAction; 2] = [QuickAction::Unlock, QuickAction::Resend];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuickAction::Unlock => "unlock",
            QuickAction::Resend => "resend",
        }
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unlock" => Ok(QuickAction::Unlock),
            "resend" => Ok(QuickAction::Resend),
            other => Err(DomainError::InvalidAction {
                action: other.to_string(),
            }),
        }
    }
}

impl From<QuickAction> for BulkAction {
    fn from(action: QuickAction) -> Self {
        match action {
            QuickAction::Unlock => BulkAction::Unlock,
            QuickAction::Resend => BulkAction::Resend,
        }
    }
}
