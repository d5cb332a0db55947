//! Vote toggle state machine
//!
//! ```text
//! Idle --begin--> Pending --server ok------> Reconciled
//!                         --rejected/error--> RolledBack
//!                         --abandon---------> RolledBack
//! ```
//!
//! `Reconciled` and `RolledBack` accept a new `begin` just like `Idle`. Only one toggle
//! per product may be pending at a time.

use crate::error::VoteError;
use makers_core::models::{ToggleVoteResponse, VoteSnapshot};
use makers_core::{AppError, SessionProvider, VoteBackend};
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Idle,
    Pending,
    Reconciled,
    RolledBack,
}

pub struct VoteToggle {
    product_id: Uuid,
    state: ToggleState,
    displayed: VoteSnapshot,
    /// What was displayed before the pending toggle was applied
    previous: Option<VoteSnapshot>,
    tx: watch::Sender<VoteSnapshot>,
}

impl VoteToggle {
    pub fn new(product_id: Uuid, initial: VoteSnapshot) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            product_id,
            state: ToggleState::Idle,
            displayed: initial,
            previous: None,
            tx,
        }
    }

    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    /// Currently displayed flag and tally
    pub fn snapshot(&self) -> VoteSnapshot {
        self.displayed
    }

    /// Receiver that sees every displayed state change
    pub fn subscribe(&self) -> watch::Receiver<VoteSnapshot> {
        self.tx.subscribe()
    }

    /// Apply the optimistic toggle.
    ///
    /// Anonymous users and a toggle already in flight leave the displayed state untouched.
    pub fn begin(&mut self, session: &dyn SessionProvider) -> Result<VoteSnapshot, VoteError> {
        if !session.is_authenticated() {
            tracing::debug!(product_id = %self.product_id, "Vote toggle refused: not signed in");
            return Err(VoteError::AuthenticationRequired);
        }
        if self.state == ToggleState::Pending {
            return Err(VoteError::InFlight);
        }

        self.previous = Some(self.displayed);
        self.state = ToggleState::Pending;
        self.show(self.displayed.toggled());

        tracing::debug!(
            product_id = %self.product_id,
            has_voted = self.displayed.has_voted,
            vote_count = self.displayed.vote_count,
            "Optimistic vote applied"
        );
        Ok(self.displayed)
    }

    /// Settle the pending toggle with the server's answer.
    ///
    /// A successful response carrying flag and tally replaces the displayed state with
    /// the server's snapshot. Anything else restores the state shown before `begin`.
    pub fn complete(
        &mut self,
        result: Result<ToggleVoteResponse, AppError>,
    ) -> Result<VoteSnapshot, VoteError> {
        if self.state != ToggleState::Pending {
            tracing::debug!(product_id = %self.product_id, state = ?self.state, "No pending vote to settle");
            return Ok(self.displayed);
        }

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.roll_back(&e.to_string());
                return Err(VoteError::Transport(e));
            }
        };

        match response.snapshot() {
            Some(server) => {
                self.show(server);
                self.previous = None;
                self.state = ToggleState::Reconciled;
                tracing::info!(
                    product_id = %self.product_id,
                    has_voted = server.has_voted,
                    vote_count = server.vote_count,
                    "Vote recorded"
                );
                Ok(server)
            }
            None => {
                let message = match response.error {
                    Some(message) => message,
                    None if response.success => "the server response was incomplete".to_string(),
                    None => "the server did not accept the vote".to_string(),
                };
                self.roll_back(&message);
                Err(VoteError::Rejected(message))
            }
        }
    }

    /// Toggle and wait for the server: `begin`, call the endpoint, `complete`.
    ///
    /// Dropping the returned future before the server answers rolls the toggle back.
    pub async fn toggle(
        &mut self,
        session: &dyn SessionProvider,
        backend: &dyn VoteBackend,
    ) -> Result<VoteSnapshot, VoteError> {
        self.begin(session)?;
        let product_id = self.product_id;
        let guard = PendingGuard { toggle: self };
        let result = backend.toggle_vote(product_id).await;
        guard.toggle.complete(result)
    }

    /// Give up on the pending toggle without an answer and restore the previous state.
    ///
    /// No-op unless a toggle is pending.
    pub fn abandon(&mut self) {
        if self.state == ToggleState::Pending {
            self.roll_back("abandoned before the server answered");
        }
    }

    fn roll_back(&mut self, reason: &str) {
        if let Some(previous) = self.previous.take() {
            self.show(previous);
        }
        self.state = ToggleState::RolledBack;
        tracing::warn!(product_id = %self.product_id, reason = %reason, "Vote rolled back");
    }

    fn show(&mut self, snapshot: VoteSnapshot) {
        self.displayed = snapshot;
        self.tx.send_replace(snapshot);
    }
}

/// Rolls back a toggle whose request future was dropped mid-flight
struct PendingGuard<'a> {
    toggle: &'a mut VoteToggle,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.toggle.abandon();
    }
}
