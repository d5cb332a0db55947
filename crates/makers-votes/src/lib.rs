//! Optimistic vote toggle.
//!
//! A `VoteToggle` shows the toggled state immediately, then either adopts the server's
//! authoritative snapshot or rolls back to what was shown before.

pub mod error;
pub mod toggle;

pub use error::VoteError;
pub use toggle::{ToggleState, VoteToggle};
