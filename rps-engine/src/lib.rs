//! Provably fair rock-paper-scissors for any odd number of moves
//!
//! The move list is arranged in a ring; each move beats the next half of the
//! ring and loses to the other half. The computer commits to its move with
//! HMAC-SHA256 before the human chooses, then reveals the key so the human
//! can check the commitment.

pub mod commitment;
pub mod error;
pub mod game;
pub mod menu;
pub mod rules;
pub mod table;

pub use commitment::{verify_reveal, CommitmentScheme, HmacSha256Scheme, MoveCommitment, SecretKey};
pub use error::{GameError, Result};
pub use game::{FairnessProtocol, RoundCommitment, RoundReport, RoundState};
pub use menu::{render_menu, MenuChoice};
pub use rules::{MoveList, Outcome, RuleMap, Verdict};
pub use table::RuleTable;

use std::sync::Arc;

/// Validate a move list and build its shared rule map
pub fn build_rules(moves: Vec<String>) -> Result<Arc<RuleMap>> {
    Ok(Arc::new(RuleMap::build(MoveList::new(moves)?)))
}

/// New session against the OS random source
pub fn new_game(moves: Vec<String>) -> Result<FairnessProtocol> {
    Ok(FairnessProtocol::new(build_rules(moves)?))
}
