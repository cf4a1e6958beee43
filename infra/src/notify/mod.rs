//! Verification email delivery
//!
//! This module provides the notifier implementations the lockout engine sends
//! through:
//!
//! - **Mock**: logs the send and counts it, for development
//! - **HTTP**: posts to a transactional mail API with a bearer key
//! - **Attempt tracking**: wraps any notifier and bumps the resend counter
//!   atomically before delivery

pub mod attempt_tracking;
pub mod http_email;
pub mod mock_notifier;


pub use attempt_tracking::AttemptTrackingNotifier;
pub use http_email::HttpEmailNotifier;
pub use mock_notifier::MockNotifier;

pub use av_core::services::verification::Notifier;
use av_shared::config::{NotifierConfig, NotifierProvider};

/// Create a notifier based on configuration
///
/// An HTTP notifier that cannot be built (missing endpoint, bad client
/// settings) falls back to the mock implementation with an error log.
pub fn create_notifier(config: &NotifierConfig) -> Box<dyn Notifier> {
    match config.provider {
        NotifierProvider::Mock => Box::new(MockNotifier::new()),
        NotifierProvider::Http => match HttpEmailNotifier::new(config) {
            Ok(notifier) => Box::new(notifier),
            Err(e) => {
                tracing::error!("Failed to initialize HTTP email notifier: {}", e);
                tracing::warn!("Falling back to mock notifier");
                Box::new(MockNotifier::new())
            }
        },
    }
}
