use crate::RuleMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full outcome grid, rows and columns in move-list order.
///
/// Cell `(row, col)` reads "row against col": Win, Lose or Draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RuleTable {
    pub fn from_rules(rules: &RuleMap) -> Self {
        let n = rules.moves().len();
        let header: Vec<String> = rules.moves().iter().map(str::to_string).collect();

        let rows = (0..n)
            .map(|row| {
                (0..n)
                    .map(|col| rules.verdict_by_index(row, col).to_string())
                    .collect()
            })
            .collect();

        Self { header, rows }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Outcome cells without the row labels
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Header plus labelled rows, `(N+1) x (N+1)` with an empty corner cell.
    pub fn grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);

        let mut top = vec![String::new()];
        top.extend(self.header.iter().cloned());
        grid.push(top);

        for (label, cells) in self.header.iter().zip(&self.rows) {
            let mut row = vec![label.clone()];
            row.extend(cells.iter().cloned());
            grid.push(row);
        }

        grid
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rules:")?;
        for row in self.grid() {
            writeln!(f, "{}", row.join("\t"))?;
        }
        Ok(())
    }
}
