use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid move list: {0}")]
    InvalidMoveList(String),

    #[error("Invalid move '{given}'. Available moves: {}", valid.join(", "))]
    InvalidMove { given: String, valid: Vec<String> },

    #[error("Invalid choice '{input}'. Please select 0-{max} or ?")]
    InvalidSelection { input: String, max: usize },

    #[error("Commitment mismatch: revealed move does not match the issued HMAC")]
    CommitmentMismatch,

    #[error("Invalid round state: {0}")]
    InvalidState(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GameError {
    pub fn move_list(msg: impl Into<String>) -> Self {
        Self::InvalidMoveList(msg.into())
    }

    pub fn state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Per-round input errors leave the session usable; everything else ends it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidMove { .. } | GameError::InvalidSelection { .. }
        )
    }
}

impl From<hex::FromHexError> for GameError {
    fn from(err: hex::FromHexError) -> Self {
        GameError::InvalidHex(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_move_lists_valid_options() {
        let err = GameError::InvalidMove {
            given: "spoon".to_string(),
            valid: vec!["rock".into(), "paper".into(), "scissors".into()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid move 'spoon'. Available moves: rock, paper, scissors"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_mismatch_is_not_recoverable() {
        assert!(!GameError::CommitmentMismatch.is_recoverable());
        assert!(!GameError::move_list("too short").is_recoverable());
    }
}
