use makers_core::AppError;

#[derive(Debug, thiserror::Error)]
pub enum VoteError {
    #[error("You must be signed in to vote")]
    AuthenticationRequired,

    /// A toggle for this product is still waiting on the server
    #[error("A vote for this product is already in progress")]
    InFlight,

    #[error("Vote was not recorded: {0}")]
    Rejected(String),

    #[error("Vote request failed: {0}")]
    Transport(#[source] AppError),
}

impl From<VoteError> for AppError {
    fn from(err: VoteError) -> Self {
        match err {
            VoteError::AuthenticationRequired => {
                AppError::Unauthorized("sign in to vote".to_string())
            }
            VoteError::InFlight => {
                AppError::InvalidInput("vote already in progress".to_string())
            }
            VoteError::Rejected(msg) => AppError::Remote(msg),
            VoteError::Transport(e) => e,
        }
    }
}
