//! Versioned response payloads for transports
//!
//! These are the shapes a client receives. They are built from engine types
//! but kept separate so the engine can change without breaking clients.

use serde::{Deserialize, Serialize};

use crate::engine::{InitOutcome, SpinOutcome};
use crate::evaluate::WinLine;
use crate::grid::{Cell, Grid};
use crate::paytable::{PayTable, Payline};
use crate::state::{Flow, GameState};
use crate::symbols::Symbol;

/// Current payload schema version
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinLinePayload {
    pub win_symbol: Symbol,
    pub win_cells: Vec<Cell>,
    pub payout: u64,
    /// Payline index; absent for scatter wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl From<&WinLine> for WinLinePayload {
    fn from(win: &WinLine) -> Self {
        Self {
            win_symbol: win.symbol,
            win_cells: win.cells.clone(),
            payout: win.payout,
            line: win.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatePayload {
    pub balance: u64,
    pub win: u64,
    pub flow: Flow,
    pub next_flow: Flow,
    pub bet_per_line: u64,
    pub max_bet_per_line: u64,
    pub lines: usize,
    pub total_bet: u64,
    pub fs_won: u32,
    pub fs_left: u32,
}

impl From<&GameState> for GameStatePayload {
    fn from(state: &GameState) -> Self {
        Self {
            balance: state.balance,
            win: state.win,
            flow: state.flow,
            next_flow: state.next_flow,
            bet_per_line: state.bet_per_line,
            max_bet_per_line: state.max_bet_per_line,
            lines: state.lines,
            total_bet: state.total_bet(),
            fs_won: state.fs_won,
            fs_left: state.fs_left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePayload {
    pub line_group: u8,
    pub win_positions: Vec<usize>,
}

impl From<&Payline> for LinePayload {
    fn from(line: &Payline) -> Self {
        Self {
            line_group: line.line_group,
            win_positions: line.positions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaytablePayload {
    pub symbol: Symbol,
    pub payout_per_match: Vec<u64>,
}

fn paytable_payload(table: &PayTable) -> Vec<PaytablePayload> {
    table
        .entries()
        .iter()
        .map(|e| PaytablePayload {
            symbol: e.symbol,
            payout_per_match: e.payout_per_match.clone(),
        })
        .collect()
}

/// Response to a spin request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResponse {
    pub version: u32,
    pub highlight: Vec<WinLinePayload>,
    pub image: Grid,
    pub game_state: GameStatePayload,
}

impl From<&SpinOutcome> for SpinResponse {
    fn from(outcome: &SpinOutcome) -> Self {
        Self {
            version: SCHEMA_VERSION,
            highlight: outcome.highlight.iter().map(WinLinePayload::from).collect(),
            image: outcome.grid.clone(),
            game_state: GameStatePayload::from(&outcome.game_state),
        }
    }
}

/// Response to an init request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitResponse {
    pub version: u32,
    pub image: Grid,
    pub game_state: GameStatePayload,
    pub lines: Vec<LinePayload>,
    pub paytable: Vec<PaytablePayload>,
}

impl From<&InitOutcome> for InitResponse {
    fn from(init: &InitOutcome) -> Self {
        Self {
            version: SCHEMA_VERSION,
            image: init.grid.clone(),
            game_state: GameStatePayload::from(&init.game_state),
            lines: init.paylines.iter().map(LinePayload::from).collect(),
            paytable: paytable_payload(&init.paytable),
        }
    }
}

/// Body of a rig request: the grid to use for the next spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigRequest {
    pub rig_data: Grid,
}
