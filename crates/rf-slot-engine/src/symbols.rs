//! Symbol definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SymbolType {
    /// Regular paying symbol
    Regular = 0,
    /// Wild - substitutes for regular symbols inside a payline run
    Wild = 1,
    /// Scatter - pays anywhere on the grid, never part of a payline run
    Scatter = 2,
    /// Bonus - awards free spins, never substituted by wild
    Bonus = 3,
}

/// A reel symbol
///
/// The serialized spelling is the one clients see on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "wild")]
    Wild,
    #[serde(rename = "sherif")]
    Sherif,
    #[serde(rename = "reward1000")]
    Reward1000,
    #[serde(rename = "diamonds")]
    Diamonds,
    #[serde(rename = "hearts")]
    Hearts,
    #[serde(rename = "spades")]
    Spades,
    #[serde(rename = "clubs")]
    Clubs,
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "9")]
    Nine,
}

/// Every symbol a reel can show, in paytable order
pub const ALL_SYMBOLS: [Symbol; 13] = [
    Symbol::Wild,
    Symbol::Sherif,
    Symbol::Reward1000,
    Symbol::Diamonds,
    Symbol::Hearts,
    Symbol::Spades,
    Symbol::Clubs,
    Symbol::Ace,
    Symbol::King,
    Symbol::Queen,
    Symbol::Jack,
    Symbol::Ten,
    Symbol::Nine,
];

impl Symbol {
    /// Symbol type
    pub fn symbol_type(self) -> SymbolType {
        match self {
            Symbol::Wild => SymbolType::Wild,
            Symbol::Reward1000 => SymbolType::Scatter,
            Symbol::Sherif => SymbolType::Bonus,
            _ => SymbolType::Regular,
        }
    }

    pub fn is_wild(self) -> bool {
        self.symbol_type() == SymbolType::Wild
    }

    pub fn is_scatter(self) -> bool {
        self.symbol_type() == SymbolType::Scatter
    }

    /// Bonus-trigger symbol (awards free spins)
    pub fn is_bonus(self) -> bool {
        self.symbol_type() == SymbolType::Bonus
    }

    /// Wire name (e.g. "wild", "K", "10")
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Wild => "wild",
            Symbol::Sherif => "sherif",
            Symbol::Reward1000 => "reward1000",
            Symbol::Diamonds => "diamonds",
            Symbol::Hearts => "hearts",
            Symbol::Spades => "spades",
            Symbol::Clubs => "clubs",
            Symbol::Ace => "A",
            Symbol::King => "K",
            Symbol::Queen => "Q",
            Symbol::Jack => "J",
            Symbol::Ten => "10",
            Symbol::Nine => "9",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown symbol name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown symbol: {0}")]
pub struct UnknownSymbol(pub String);

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_SYMBOLS
            .iter()
            .copied()
            .find(|symbol| symbol.as_str() == s)
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}
