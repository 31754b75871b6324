//! Slot engine configuration

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::paytable::{PayTable, Payline, standard_20_paylines};
use crate::symbols::ALL_SYMBOLS;

/// Grid specification (reels × rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of reels (columns)
    pub reels: usize,
    /// Number of visible cells per reel
    pub rows: usize,
}

impl GridSpec {
    /// Standard 5×3
    pub fn standard_5x3() -> Self {
        Self { reels: 5, rows: 3 }
    }

    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.reels * self.rows
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard_5x3()
    }
}

/// Complete static game configuration, loaded once per process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Grid dimensions
    pub grid: GridSpec,
    /// Ordered paylines; active lines are a prefix of this list
    pub paylines: Vec<Payline>,
    /// Payout tables
    pub paytable: PayTable,
    /// Bankroll of a fresh session
    pub starting_balance: u64,
    /// Bet per line of a fresh session
    pub default_bet_per_line: u64,
    /// Upper bound for bet per line
    pub max_bet_per_line: u64,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::standard_5x3(),
            paylines: standard_20_paylines(),
            paytable: PayTable::standard(),
            starting_balance: 1000,
            default_bet_per_line: 1,
            max_bet_per_line: 10,
        }
    }
}

impl SlotConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.yaml`/`.yml` is read as YAML, anything else as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&text)?,
            _ => Self::from_json(&text)?,
        };
        log::info!(
            "Loaded slot config from {}: {}x{}, {} paylines",
            path.display(),
            config.grid.reels,
            config.grid.rows,
            config.paylines.len()
        );
        Ok(config)
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Check the configuration is internally consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSpec { reels, rows } = self.grid;
        if reels == 0 || rows == 0 {
            return Err(ConfigError::Invalid(
                "grid must have at least 1 reel and 1 row".into(),
            ));
        }

        if self.paylines.is_empty() {
            return Err(ConfigError::Invalid("at least one payline is required".into()));
        }
        for (index, line) in self.paylines.iter().enumerate() {
            if line.positions.len() != reels {
                return Err(ConfigError::Invalid(format!(
                    "payline {index} has {} positions, expected {reels}",
                    line.positions.len()
                )));
            }
            if let Some(&row) = line.positions.iter().find(|&&row| row >= rows) {
                return Err(ConfigError::Invalid(format!(
                    "payline {index} uses row {row}, grid has {rows} rows"
                )));
            }
        }

        let mut seen = HashSet::new();
        for entry in self.paytable.entries() {
            if !seen.insert(entry.symbol) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate paytable entry for {}",
                    entry.symbol
                )));
            }
            if entry.symbol.is_scatter() {
                if entry.payout_per_match.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "scatter {} has no payout tiers",
                        entry.symbol
                    )));
                }
            } else if entry.payout_per_match.len() <= reels {
                return Err(ConfigError::Invalid(format!(
                    "{} needs {} payout tiers, has {}",
                    entry.symbol,
                    reels + 1,
                    entry.payout_per_match.len()
                )));
            }
        }
        if let Some(missing) = ALL_SYMBOLS.iter().find(|s| !seen.contains(*s)) {
            return Err(ConfigError::Invalid(format!("no paytable entry for {missing}")));
        }

        if self.max_bet_per_line == 0
            || self.default_bet_per_line == 0
            || self.default_bet_per_line > self.max_bet_per_line
        {
            return Err(ConfigError::Invalid(format!(
                "default bet per line {} must be between 1 and max {}",
                self.default_bet_per_line, self.max_bet_per_line
            )));
        }

        Ok(())
    }
}

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("YAML parse error: {0}")]
    Yaml(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
