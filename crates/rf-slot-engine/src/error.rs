//! Spin errors

use crate::symbols::Symbol;

/// Errors raised while resolving a spin or changing session settings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    /// Paytable has no entry for a symbol on the grid. Fatal: the spin is aborted.
    #[error("Missing pay info for symbol {0}")]
    MissingPayInfo(Symbol),

    /// Caller-supplied grid does not fit the configured shape
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Insufficient funds: balance {balance}, total bet {total_bet}")]
    InsufficientFunds { balance: u64, total_bet: u64 },

    #[error("Invalid bet per line {bet}: must be between 1 and {max}")]
    InvalidBet { bet: u64, max: u64 },

    #[error("Invalid line count {lines}: must be between 1 and {max}")]
    InvalidLineCount { lines: usize, max: usize },

    /// Bet settings are frozen while free spins are running or pending
    #[error("Bet cannot change during free spins")]
    FeatureActive,
}

impl SlotError {
    /// Configuration errors mean the game data is broken, not the request
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingPayInfo(_))
    }
}
