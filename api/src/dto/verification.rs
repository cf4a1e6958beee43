use av_core::domain::entities::{AccountId, QuickAction};
use av_core::domain::value_objects::StatusFilter;
use av_core::services::verification::{BulkDispatch, VerificationSummary};
use av_shared::{PaginatedResponse, Pagination};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for `GET /accounts`
#[derive(Debug, Clone, Deserialize)]
pub struct AccountListQuery {
    /// Absent means every unverified account (locked-out included)
    pub status: Option<StatusFilter>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl AccountListQuery {
    pub fn filter(&self) -> StatusFilter {
        self.status.unwrap_or(StatusFilter::Unverified)
    }

    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.per_page),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountListResponse {
    pub status: StatusFilter,
    #[serde(flatten)]
    pub accounts: PaginatedResponse<AccountId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDetailResponse {
    pub account_id: AccountId,
    #[serde(flatten)]
    pub summary: VerificationSummary,
    /// Human-readable status column text
    pub label: String,
    pub available_actions: Vec<QuickAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkActionRequest {
    /// Bulk action name, e.g. `verify_unlock`
    #[validate(length(min = 1, max = 64))]
    pub action: String,

    #[validate(length(max = 1000))]
    pub account_ids: Vec<AccountId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkActionResponse {
    /// False when the action name belongs to another handler
    pub handled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub succeeded: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempted: Option<usize>,
}

impl From<BulkDispatch> for BulkActionResponse {
    fn from(dispatch: BulkDispatch) -> Self {
        match dispatch {
            BulkDispatch::Handled(summary) => Self {
                handled: true,
                action: Some(summary.action.as_str().to_string()),
                succeeded: Some(summary.succeeded),
                attempted: Some(summary.attempted),
            },
            BulkDispatch::PassThrough => Self {
                handled: false,
                action: None,
                succeeded: None,
                attempted: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionTokenRequest {
    pub action: QuickAction,
}

/// Query string for the quick action links
#[derive(Debug, Clone, Deserialize)]
pub struct QuickActionQuery {
    #[serde(default)]
    pub token: String,
}
