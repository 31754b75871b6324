//! Reel grid and grid generation

use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::config::GridSpec;
use crate::error::SlotError;
use crate::symbols::{ALL_SYMBOLS, Symbol};

/// Grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub reel: usize,
    pub cell: usize,
}

/// A symbol at a fixed grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub position: Position,
    pub symbol: Symbol,
}

impl Cell {
    pub fn new(reel: usize, cell: usize, symbol: Symbol) -> Self {
        Self {
            position: Position { reel, cell },
            symbol,
        }
    }
}

/// Reel-major symbol grid: `reels[reel][cell]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    reels: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(reels: Vec<Vec<Cell>>) -> Self {
        Self { reels }
    }

    /// Build a grid from symbols, deriving positions from indices
    pub fn from_symbols(symbols: Vec<Vec<Symbol>>) -> Self {
        let reels = symbols
            .into_iter()
            .enumerate()
            .map(|(reel, column)| {
                column
                    .into_iter()
                    .enumerate()
                    .map(|(cell, symbol)| Cell::new(reel, cell, symbol))
                    .collect()
            })
            .collect();
        Self { reels }
    }

    pub fn reels(&self) -> &[Vec<Cell>] {
        &self.reels
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn cell(&self, reel: usize, cell: usize) -> Option<&Cell> {
        self.reels.get(reel).and_then(|r| r.get(cell))
    }

    /// All cells, reel by reel
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.reels.iter().flatten()
    }

    /// Check shape and recorded positions against the configured grid
    pub fn validate(&self, spec: &GridSpec) -> Result<(), SlotError> {
        if self.reels.len() != spec.reels {
            return Err(SlotError::InvalidGrid(format!(
                "expected {} reels, got {}",
                spec.reels,
                self.reels.len()
            )));
        }
        for (reel, column) in self.reels.iter().enumerate() {
            if column.len() != spec.rows {
                return Err(SlotError::InvalidGrid(format!(
                    "reel {reel} has {} cells, expected {}",
                    column.len(),
                    spec.rows
                )));
            }
            for (index, cell) in column.iter().enumerate() {
                if cell.position != (Position { reel, cell: index }) {
                    return Err(SlotError::InvalidGrid(format!(
                        "cell at reel {reel} row {index} claims position ({}, {})",
                        cell.position.reel, cell.position.cell
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Where a spin's grid comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSource {
    /// Draw a fresh random grid
    Generated,
    /// Use a caller-supplied grid (forced outcome); validated before use
    Provided(Grid),
}

/// Uniform random grid generator
///
/// Every cell is drawn independently from [`ALL_SYMBOLS`] with a ChaCha20 stream.
pub struct GridGenerator {
    rng: ChaCha20Rng,
}

impl GridGenerator {
    /// Seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_os_rng(),
        }
    }

    /// Seeded for reproducible results
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
    }

    pub fn generate(&mut self, spec: &GridSpec) -> Grid {
        let mut reels = Vec::with_capacity(spec.reels);
        for reel in 0..spec.reels {
            let mut column = Vec::with_capacity(spec.rows);
            for cell in 0..spec.rows {
                let symbol = ALL_SYMBOLS[self.rng.random_range(0..ALL_SYMBOLS.len())];
                column.push(Cell::new(reel, cell, symbol));
            }
            reels.push(column);
        }
        Grid::new(reels)
    }
}

impl Default for GridGenerator {
    fn default() -> Self {
        Self::new()
    }
}
