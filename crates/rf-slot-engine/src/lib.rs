//! # rf-slot-engine — Payline Slot Resolution Engine
//!
//! Turns a grid of reel symbols into paid wins and advances a player session:
//! bankroll, bet settings and the free-spins feature.
//!
//! ## Features
//!
//! - **Line Evaluation**: left-to-right payline runs with wild substitution
//! - **Scatter Pays**: scatter symbols counted anywhere, paid on total bet
//! - **Free Spins**: bonus-symbol runs award spins, winnings held until the feature ends
//! - **Forced Outcomes**: caller-supplied grids, validated before use
//!
//! ## Architecture
//!
//! ```text
//! SlotSession ── GameState, one-shot rig, SessionStats
//!     │
//!     v
//! SlotEngine
//!     │
//!     ├── GridGenerator (or GridSource::Provided)
//!     ├── evaluate_lines + evaluate_scatter
//!     ├── apply_payouts (PayTable)
//!     └── GameState::settle
//!           │
//!           v
//!     SpinOutcome → wire::SpinResponse
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod grid;
pub mod paytable;
pub mod session;
pub mod state;
pub mod symbols;
pub mod wire;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use evaluate::*;
pub use grid::*;
pub use paytable::*;
pub use session::*;
pub use state::*;
pub use symbols::*;
