//! Paytable and payline definitions

use serde::{Deserialize, Serialize};

use crate::error::SlotError;
use crate::symbols::Symbol;

/// A payline definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    /// Display group the client uses to colour lines
    pub line_group: u8,
    /// Row positions for each reel (e.g., [0, 1, 2, 1, 0] for a "V" shape)
    pub positions: Vec<usize>,
}

impl Payline {
    pub fn new(line_group: u8, positions: &[usize]) -> Self {
        Self {
            line_group,
            positions: positions.to_vec(),
        }
    }

    /// Create a straight line (same row across all reels)
    pub fn straight(line_group: u8, row: usize, reel_count: usize) -> Self {
        Self {
            line_group,
            positions: vec![row; reel_count],
        }
    }

    /// Row for a reel
    pub fn row(&self, reel: usize) -> Option<usize> {
        self.positions.get(reel).copied()
    }
}

/// The 20 paylines of the standard 5×3 game, in activation order.
///
/// Activating N lines means the first N entries of this list.
pub fn standard_20_paylines() -> Vec<Payline> {
    vec![
        Payline::straight(0, 1, 5),
        Payline::straight(0, 0, 5),
        Payline::straight(0, 2, 5),
        Payline::new(0, &[0, 1, 2, 1, 0]),
        Payline::new(0, &[2, 1, 0, 1, 2]),
        Payline::new(1, &[0, 0, 1, 2, 2]),
        Payline::new(1, &[2, 2, 1, 0, 0]),
        Payline::new(2, &[1, 0, 1, 2, 1]),
        Payline::new(3, &[1, 2, 1, 0, 1]),
        Payline::new(2, &[0, 1, 1, 1, 2]),
        Payline::new(3, &[2, 1, 1, 1, 0]),
        Payline::new(3, &[1, 0, 0, 1, 2]),
        Payline::new(2, &[1, 2, 2, 1, 0]),
        Payline::new(1, &[1, 1, 0, 1, 2]),
        Payline::new(4, &[1, 1, 2, 1, 0]),
        Payline::new(4, &[0, 0, 1, 2, 1]),
        Payline::new(4, &[2, 2, 1, 0, 1]),
        Payline::new(0, &[1, 0, 1, 2, 2]),
        Payline::new(2, &[1, 2, 1, 0, 0]),
        Payline::new(4, &[0, 0, 0, 1, 2]),
    ]
}

/// Payout multipliers for one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaytableEntry {
    pub symbol: Symbol,
    /// Multiplier indexed by match count (scatter: by scatter count)
    pub payout_per_match: Vec<u64>,
}

impl PaytableEntry {
    pub fn new(symbol: Symbol, pays: &[u64]) -> Self {
        Self {
            symbol,
            payout_per_match: pays.to_vec(),
        }
    }

    /// Multiplier for a run of `match_count` cells; zero past the table
    pub fn pay_for(&self, match_count: usize) -> u64 {
        self.payout_per_match.get(match_count).copied().unwrap_or(0)
    }

    /// Multiplier for a scatter count, clamped to the highest tier
    pub fn scatter_pay_for(&self, count: usize) -> u64 {
        let last = self.payout_per_match.len().saturating_sub(1);
        self.pay_for(count.min(last))
    }

    /// Smallest match count with a non-zero payout
    pub fn min_winning_count(&self) -> Option<usize> {
        self.payout_per_match.iter().position(|&pay| pay > 0)
    }
}

/// Complete paytable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayTable {
    entries: Vec<PaytableEntry>,
}

impl PayTable {
    pub fn new(entries: Vec<PaytableEntry>) -> Self {
        Self { entries }
    }

    /// The standard paytable
    pub fn standard() -> Self {
        Self::new(vec![
            PaytableEntry::new(Symbol::Wild, &[0, 0, 10, 75, 150, 5000]),
            PaytableEntry::new(Symbol::Sherif, &[0, 0, 2, 30, 75, 500]),
            PaytableEntry::new(Symbol::Diamonds, &[0, 0, 2, 30, 75, 500]),
            PaytableEntry::new(Symbol::Hearts, &[0, 0, 0, 20, 50, 250]),
            PaytableEntry::new(Symbol::Spades, &[0, 0, 0, 20, 50, 250]),
            PaytableEntry::new(Symbol::Clubs, &[0, 0, 0, 20, 50, 250]),
            PaytableEntry::new(Symbol::Ace, &[0, 0, 0, 10, 30, 150]),
            PaytableEntry::new(Symbol::King, &[0, 0, 0, 5, 20, 100]),
            PaytableEntry::new(Symbol::Queen, &[0, 0, 0, 5, 20, 100]),
            PaytableEntry::new(Symbol::Jack, &[0, 0, 0, 5, 20, 100]),
            PaytableEntry::new(Symbol::Ten, &[0, 0, 0, 5, 15, 75]),
            PaytableEntry::new(Symbol::Nine, &[0, 0, 2, 5, 15, 75]),
            PaytableEntry::new(Symbol::Reward1000, &[0, 0, 0, 1, 3, 10, 50, 100, 1000]),
        ])
    }

    pub fn entries(&self) -> &[PaytableEntry] {
        &self.entries
    }

    /// Get entry by symbol
    pub fn get(&self, symbol: Symbol) -> Option<&PaytableEntry> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    /// Get entry by symbol, failing on a table that does not cover it
    pub fn entry(&self, symbol: Symbol) -> Result<&PaytableEntry, SlotError> {
        self.get(symbol).ok_or(SlotError::MissingPayInfo(symbol))
    }
}

impl Default for PayTable {
    fn default() -> Self {
        Self::standard()
    }
}
