use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Ordered, duplicate-free list of an odd number (>= 3) of move names.
/// The order defines the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveList {
    moves: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl MoveList {
    pub fn new(moves: Vec<String>) -> Result<Self> {
        if moves.len() < 3 {
            return Err(GameError::move_list(format!(
                "need at least 3 moves, got {}",
                moves.len()
            )));
        }

        if moves.len() % 2 == 0 {
            return Err(GameError::move_list(format!(
                "need an odd number of moves, got {}",
                moves.len()
            )));
        }

        let mut index = HashMap::with_capacity(moves.len());
        for (i, name) in moves.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(GameError::move_list(format!("move #{} has an empty name", i + 1)));
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(GameError::move_list(format!("duplicate move '{}'", name)));
            }
        }

        Ok(Self { moves, index })
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.moves.get(index).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.moves
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.index_of(name).ok_or_else(|| GameError::InvalidMove {
            given: name.to_string(),
            valid: self.moves.clone(),
        })
    }
}

impl<'de> Deserialize<'de> for MoveList {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            moves: Vec<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        MoveList::new(raw.moves).map_err(serde::de::Error::custom)
    }
}

/// Result of pitting one move against another, seen from the first move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Win,
    Lose,
    Draw,
}

impl Verdict {
    pub fn flip(self) -> Self {
        match self {
            Verdict::Win => Verdict::Lose,
            Verdict::Lose => Verdict::Win,
            Verdict::Draw => Verdict::Draw,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Win => "Win",
            Verdict::Lose => "Lose",
            Verdict::Draw => "Draw",
        };
        f.write_str(s)
    }
}

/// Round outcome between the human and the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    HumanWins,
    ComputerWins,
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::HumanWins => "You win!",
            Outcome::ComputerWins => "Computer wins.",
            Outcome::Draw => "It's a draw.",
        };
        f.write_str(s)
    }
}

impl From<Verdict> for Outcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Win => Outcome::HumanWins,
            Verdict::Lose => Outcome::ComputerWins,
            Verdict::Draw => Outcome::Draw,
        }
    }
}

/// Win/lose relation over a [`MoveList`].
///
/// The move at position `i` beats the `(N-1)/2` moves at positions
/// `(i+1) mod N ..= (i+(N-1)/2) mod N` and loses to the rest.
#[derive(Debug, Clone)]
pub struct RuleMap {
    moves: MoveList,
    half: usize,
}

impl RuleMap {
    pub fn build(moves: MoveList) -> Self {
        let half = (moves.len() - 1) / 2;
        tracing::debug!("Built rule map for {} moves ({} wins each)", moves.len(), half);
        Self { moves, half }
    }

    pub fn moves(&self) -> &MoveList {
        &self.moves
    }

    /// Number of moves each move beats (and loses to).
    pub fn half(&self) -> usize {
        self.half
    }

    /// The moves beaten by `name`, in cyclic order starting right after it.
    pub fn beaten_by(&self, name: &str) -> Result<Vec<&str>> {
        let i = self.moves.require(name)?;
        Ok(self.beaten_by_index(i).collect())
    }

    fn beaten_by_index(&self, i: usize) -> impl Iterator<Item = &str> + '_ {
        let n = self.moves.len();
        (1..=self.half).filter_map(move |k| self.moves.get((i + k) % n))
    }

    /// Verdict by position. Both indices must be in range.
    pub fn verdict_by_index(&self, a: usize, b: usize) -> Verdict {
        if a == b {
            return Verdict::Draw;
        }
        let n = self.moves.len();
        let distance = (b + n - a) % n;
        if distance <= self.half {
            Verdict::Win
        } else {
            Verdict::Lose
        }
    }

    pub fn verdict(&self, a: &str, b: &str) -> Result<Verdict> {
        let a = self.moves.require(a)?;
        let b = self.moves.require(b)?;
        Ok(self.verdict_by_index(a, b))
    }

    pub fn outcome(&self, human: &str, computer: &str) -> Result<Outcome> {
        self.verdict(human, computer).map(Outcome::from)
    }
}
