use crate::commitment::{MoveCommitment, SecretKey};
use crate::{GameError, Outcome, Result, RuleMap};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Round state for the commit-reveal protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Idle,
    Committed,
    Revealed,
}

struct Round {
    id: Uuid,
    key: SecretKey,
    computer_move: usize,
    commitment: MoveCommitment,
    human_move: Option<usize>,
    started_at: DateTime<Utc>,
}

/// What the human sees before choosing: the HMAC only, never the key or move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundCommitment {
    pub round_id: Uuid,
    pub commitment: MoveCommitment,
    pub started_at: DateTime<Utc>,
}

/// Everything disclosed at the end of a round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundReport {
    pub round_id: Uuid,
    pub human_move: String,
    pub computer_move: String,
    pub commitment: MoveCommitment,
    pub key: SecretKey,
    pub outcome: Outcome,
    pub started_at: DateTime<Utc>,
    pub revealed_at: DateTime<Utc>,
}

impl RoundReport {
    /// Recompute the HMAC over the revealed move and key.
    pub fn verify(&self) -> Result<()> {
        if self.commitment.verify(&self.key, &self.computer_move)? {
            Ok(())
        } else {
            Err(GameError::CommitmentMismatch)
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Computer opponent that commits to its move before the human picks one.
///
/// Rounds run strictly one at a time: `start_round` -> `submit_human_move`
/// -> `reveal`. Each round gets a fresh key from `R`.
pub struct FairnessProtocol<R = OsRng> {
    rules: Arc<RuleMap>,
    rng: R,
    round: Option<Round>,
    rounds_played: u64,
}

impl FairnessProtocol<OsRng> {
    pub fn new(rules: Arc<RuleMap>) -> Self {
        Self::with_rng(rules, OsRng)
    }
}

impl<R: RngCore + CryptoRng> FairnessProtocol<R> {
    pub fn with_rng(rules: Arc<RuleMap>, rng: R) -> Self {
        Self {
            rules,
            rng,
            round: None,
            rounds_played: 0,
        }
    }

    pub fn rules(&self) -> &RuleMap {
        &self.rules
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    pub fn state(&self) -> RoundState {
        match &self.round {
            None => RoundState::Idle,
            Some(round) if round.human_move.is_none() => RoundState::Committed,
            Some(_) => RoundState::Revealed,
        }
    }

    /// Pick the computer's move and commit to it
    pub fn start_round(&mut self) -> Result<RoundCommitment> {
        if self.round.is_some() {
            return Err(GameError::state("a round is already in progress"));
        }

        let key = SecretKey::generate(&mut self.rng);
        let computer_move = self.rng.gen_range(0..self.rules.moves().len());
        let name = self
            .rules
            .moves()
            .get(computer_move)
            .ok_or_else(|| GameError::state("selected move out of range"))?;
        let commitment = MoveCommitment::new(&key, name)?;

        let id = uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid();
        let started_at = Utc::now();

        self.round = Some(Round {
            id,
            key,
            computer_move,
            commitment,
            human_move: None,
            started_at,
        });

        tracing::info!("Round {} started", id);
        tracing::debug!("Round {} commitment {}", id, commitment);

        Ok(RoundCommitment {
            round_id: id,
            commitment,
            started_at,
        })
    }

    /// Record the human's move. An unknown move leaves the round committed.
    pub fn submit_human_move(&mut self, mv: &str) -> Result<()> {
        let round = match self.round.as_mut() {
            Some(round) if round.human_move.is_none() => round,
            Some(_) => return Err(GameError::state("human move already submitted")),
            None => return Err(GameError::state("no round in progress")),
        };

        let index = self
            .rules
            .moves()
            .index_of(mv)
            .ok_or_else(|| GameError::InvalidMove {
                given: mv.to_string(),
                valid: self.rules.moves().as_slice().to_vec(),
            })?;

        round.human_move = Some(index);
        tracing::debug!("Round {} human move recorded", round.id);
        Ok(())
    }

    /// Disclose the key and the computer's move, verify, and score the round.
    pub fn reveal(&mut self) -> Result<RoundReport> {
        if self.state() != RoundState::Revealed {
            return Err(GameError::state("human move not submitted yet"));
        }
        let round = self
            .round
            .take()
            .ok_or_else(|| GameError::state("no round in progress"))?;
        let human_index = round
            .human_move
            .ok_or_else(|| GameError::state("human move not submitted yet"))?;

        let moves = self.rules.moves();
        let (human_move, computer_move) = match (moves.get(human_index), moves.get(round.computer_move)) {
            (Some(h), Some(c)) => (h.to_string(), c.to_string()),
            _ => return Err(GameError::state("round refers to unknown moves")),
        };

        if !round.commitment.verify(&round.key, &computer_move)? {
            tracing::error!("Round {} failed commitment verification", round.id);
            return Err(GameError::CommitmentMismatch);
        }

        let outcome = Outcome::from(self.rules.verdict_by_index(human_index, round.computer_move));
        self.rounds_played += 1;

        tracing::info!("Round {} completed: {:?}", round.id, outcome);

        Ok(RoundReport {
            round_id: round.id,
            human_move,
            computer_move,
            commitment: round.commitment,
            key: round.key,
            outcome,
            started_at: round.started_at,
            revealed_at: Utc::now(),
        })
    }

    /// Drop the current round, if any. Returns whether one was in progress.
    pub fn abandon_round(&mut self) -> bool {
        match self.round.take() {
            Some(round) => {
                tracing::warn!("Round {} abandoned", round.id);
                true
            }
            None => false,
        }
    }
}

impl<R> std::fmt::Debug for FairnessProtocol<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FairnessProtocol")
            .field("moves", &self.rules.moves().len())
            .field("round_id", &self.round.as_ref().map(|r| r.id))
            .field("rounds_played", &self.rounds_played)
            .finish()
    }
}
