use crate::{GameError, MoveList, Result};

/// A line typed at the move prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    Help,
    /// Zero-based index into the move list
    Play(usize),
}

impl MenuChoice {
    /// `0` exits, `?` asks for help, `1..=n` picks a move.
    pub fn parse(input: &str, n: usize) -> Result<Self> {
        let input = input.trim();
        let invalid = || GameError::InvalidSelection {
            input: input.to_string(),
            max: n,
        };

        if input == "?" {
            return Ok(MenuChoice::Help);
        }

        match input.parse::<usize>() {
            Ok(0) => Ok(MenuChoice::Exit),
            Ok(i) if i <= n => Ok(MenuChoice::Play(i - 1)),
            _ => Err(invalid()),
        }
    }
}

pub fn render_menu(moves: &MoveList) -> String {
    let mut out = String::from("Available moves:\n");
    for (i, name) in moves.iter().enumerate() {
        out.push_str(&format!("{} - {}\n", i + 1, name));
    }
    out.push_str("0 - Exit\n");
    out.push_str("? - Help\n");
    out
}
