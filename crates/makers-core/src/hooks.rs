//! Hooks and traits for the hosting application
//!
//! These traits let the draft form and the vote toggle talk to the session provider,
//! the notification surface and the remote endpoints of whatever application embeds
//! them, without depending on any of them directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Product, ProductSubmission, ToggleVoteResponse};

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

/// Authentication session provider
///
/// Read synchronously to gate operations that require a signed-in user.
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> Option<CurrentUser>;

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Session provider with a fixed user, or none
#[derive(Debug, Clone, Default)]
pub struct StaticSession(Option<CurrentUser>);

impl StaticSession {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn signed_in(user: CurrentUser) -> Self {
        Self(Some(user))
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<CurrentUser> {
        self.0.clone()
    }
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Transient user-facing notifications (toasts)
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);

    fn info(&self, message: &str) {
        self.notify(NoticeLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.notify(NoticeLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

/// No-op implementation for headless use
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _level: NoticeLevel, _message: &str) {}
}

/// Remote vote toggle endpoint
///
/// The server enforces at most one vote per (user, product) pair and reports the
/// authoritative flag and tally. Transport failures are returned as errors; a
/// rejected toggle comes back as a response with `success: false`.
#[async_trait]
pub trait VoteBackend: Send + Sync {
    async fn toggle_vote(&self, product_id: Uuid) -> Result<ToggleVoteResponse, AppError>;
}

/// Remote product submission endpoint
#[async_trait]
pub trait ProductBackend: Send + Sync {
    async fn create_product(&self, submission: &ProductSubmission) -> Result<Product, AppError>;

    async fn update_product(
        &self,
        product_id: Uuid,
        submission: &ProductSubmission,
    ) -> Result<Product, AppError>;
}
