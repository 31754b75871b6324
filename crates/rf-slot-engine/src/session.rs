//! Player session: state, one-shot rig and statistics around a [`SlotEngine`]

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::engine::{InitOutcome, SlotEngine, SpinOutcome};
use crate::error::SlotError;
use crate::grid::{Grid, GridSource};
use crate::state::{Flow, GameState};

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub free_spins: u64,
    pub total_bet: u64,
    pub total_win: u64,
    pub wins: u64,
    pub features_triggered: u64,
    pub max_win: u64,
}

impl SessionStats {
    /// Return to player, in percent of total bet
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            (self.total_win as f64 / self.total_bet as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Share of spins with a non-zero payout, in percent
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    fn record(&mut self, outcome: &SpinOutcome) {
        let settlement = &outcome.settlement;
        self.total_spins += 1;
        if outcome.flow == Flow::FreeSpins {
            self.free_spins += 1;
        }
        self.total_bet += settlement.bet;
        self.total_win += settlement.payout;
        if settlement.payout > 0 {
            self.wins += 1;
        }
        if settlement.free_spins_awarded > 0 {
            self.features_triggered += 1;
        }
        self.max_win = self.max_win.max(settlement.payout);
    }
}

/// One player's session.
///
/// Holds what a transport keeps between requests: the game state, a pending
/// rigged grid and running statistics.
pub struct SlotSession {
    engine: SlotEngine,
    state: GameState,
    rig: Option<Grid>,
    stats: SessionStats,
}

impl SlotSession {
    pub fn new(engine: SlotEngine) -> Self {
        let state = engine.new_game_state();
        Self {
            engine,
            state,
            rig: None,
            stats: SessionStats::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn engine(&self) -> &SlotEngine {
        &self.engine
    }

    pub fn init(&mut self) -> InitOutcome {
        self.engine.init_outcome(&self.state)
    }

    /// Force the grid of the next spin. Rejected if it does not fit the configured shape.
    pub fn rig(&mut self, grid: Grid) -> Result<(), SlotError> {
        if let Err(e) = grid.validate(&self.engine.config().grid) {
            log::warn!("Rejected rig: {}", e);
            return Err(e);
        }
        self.rig = Some(grid);
        Ok(())
    }

    pub fn has_rig(&self) -> bool {
        self.rig.is_some()
    }

    /// Play one spin.
    ///
    /// An unaffordable spin is refused before anything else and leaves a pending
    /// rig in place; otherwise the rig is used up by this spin, even if it fails.
    pub fn spin(&mut self) -> Result<SpinOutcome, SlotError> {
        self.state.ensure_affordable()?;

        let source = match self.rig.take() {
            Some(grid) => GridSource::Provided(grid),
            None => GridSource::Generated,
        };
        let outcome = self.engine.spin_outcome(source, &mut self.state)?;
        self.stats.record(&outcome);
        Ok(outcome)
    }

    pub fn set_bet_per_line(&mut self, bet: u64) -> Result<(), SlotError> {
        self.state.set_bet_per_line(bet)
    }

    pub fn set_lines(&mut self, lines: usize) -> Result<(), SlotError> {
        let max = self.engine.config().paylines.len();
        self.state.set_lines(lines, max)
    }

    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }
}

/// Thread-safe session handle
///
/// Spins on one session are serialized by the lock, so at most one is in flight.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<SlotSession>>,
}

impl SharedSession {
    pub fn new(session: SlotSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn lock(&self) -> parking_lot::MutexGuard<'_, SlotSession> {
        self.inner.lock()
    }

    pub fn spin(&self) -> Result<SpinOutcome, SlotError> {
        self.inner.lock().spin()
    }

    pub fn init(&self) -> InitOutcome {
        self.inner.lock().init()
    }

    pub fn rig(&self, grid: Grid) -> Result<(), SlotError> {
        self.inner.lock().rig(grid)
    }

    pub fn state(&self) -> GameState {
        self.inner.lock().state().clone()
    }
}
