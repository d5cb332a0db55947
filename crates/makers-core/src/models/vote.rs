use serde::{Deserialize, Serialize};

/// One user's relationship to one product's vote tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSnapshot {
    pub has_voted: bool,
    pub vote_count: i64,
}

impl VoteSnapshot {
    pub fn new(has_voted: bool, vote_count: i64) -> Self {
        Self {
            has_voted,
            vote_count,
        }
    }

    /// The optimistic guess for a toggle: flag flipped, tally moved by one.
    pub fn toggled(&self) -> Self {
        let vote_count = if self.has_voted {
            (self.vote_count - 1).max(0)
        } else {
            self.vote_count + 1
        };
        Self {
            has_voted: !self.has_voted,
            vote_count,
        }
    }
}

/// Response of the vote toggle endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleVoteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_voted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToggleVoteResponse {
    /// Authoritative state reported by the server, if the toggle succeeded.
    pub fn snapshot(&self) -> Option<VoteSnapshot> {
        if !self.success {
            return None;
        }
        match (self.has_voted, self.vote_count) {
            (Some(has_voted), Some(vote_count)) => Some(VoteSnapshot::new(has_voted, vote_count)),
            _ => None,
        }
    }
}
