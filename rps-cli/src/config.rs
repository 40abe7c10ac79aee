use anyhow::Context;
use rps_engine::MoveList;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub default_moves: Vec<String>,
    pub verbose: bool,
    pub json_output: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_moves: vec!["rock".into(), "scissors".into(), "paper".into()],
            verbose: false,
            json_output: false,
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rps")
}

impl CliConfig {
    /// Read `<data_dir>/config.json`, falling back to defaults when absent.
    pub fn load(data_dir: &Path) -> anyhow::Result<Self> {
        let path = data_dir.join(CONFIG_FILE);

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<CliConfig>(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };

        config.data_dir = data_dir.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        MoveList::new(self.default_moves.clone()).context("default_moves in config")?;
        Ok(())
    }

    /// Moves from the command line win over the configured defaults.
    pub fn resolve_moves(&self, cli_moves: Vec<String>) -> Vec<String> {
        if cli_moves.is_empty() {
            self.default_moves.clone()
        } else {
            cli_moves
        }
    }
}
