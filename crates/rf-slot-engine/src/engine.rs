//! Slot engine — spin resolution pipeline

use std::sync::Arc;

use crate::config::SlotConfig;
use crate::error::SlotError;
use crate::evaluate::{Evaluation, WinLine};
use crate::grid::{Grid, GridGenerator, GridSource};
use crate::paytable::{PayTable, Payline};
use crate::state::{Flow, GameState, Settlement};

/// Data for the first render: a display grid plus the static tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    pub grid: Grid,
    pub game_state: GameState,
    pub paylines: Vec<Payline>,
    pub paytable: PayTable,
}

/// Result of one resolved spin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    /// Winning lines (non-zero payouts only), payline order then scatter
    pub highlight: Vec<WinLine>,
    pub grid: Grid,
    /// Session state after the spin
    pub game_state: GameState,
    /// Mode this spin was resolved in
    pub flow: Flow,
    pub settlement: Settlement,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.settlement.payout > 0
    }
}

/// Resolves spins against a fixed configuration.
///
/// The engine owns the RNG and the read-only game tables; session state is
/// passed in by the caller.
pub struct SlotEngine {
    config: Arc<SlotConfig>,
    generator: GridGenerator,
}

impl SlotEngine {
    /// Create an engine seeded from OS entropy
    pub fn new(config: Arc<SlotConfig>) -> Self {
        Self {
            config,
            generator: GridGenerator::new(),
        }
    }

    /// Create an engine with a reproducible RNG
    pub fn with_seed(config: Arc<SlotConfig>, seed: u64) -> Self {
        Self {
            config,
            generator: GridGenerator::with_seed(seed),
        }
    }

    /// Reseed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.generator.seed(seed);
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Fresh session state for this configuration
    pub fn new_game_state(&self) -> GameState {
        GameState::new(&self.config)
    }

    /// Display grid and static tables; no payout is evaluated and the state is untouched
    pub fn init_outcome(&mut self, game_state: &GameState) -> InitOutcome {
        InitOutcome {
            grid: self.generator.generate(&self.config.grid),
            game_state: game_state.clone(),
            paylines: self.config.paylines.clone(),
            paytable: self.config.paytable.clone(),
        }
    }

    /// Resolve one spin and apply it to `game_state`.
    ///
    /// Nothing in `game_state` changes when an error is returned.
    pub fn spin_outcome(
        &mut self,
        source: GridSource,
        game_state: &mut GameState,
    ) -> Result<SpinOutcome, SlotError> {
        let grid = match source {
            GridSource::Generated => self.generator.generate(&self.config.grid),
            GridSource::Provided(grid) => {
                grid.validate(&self.config.grid)?;
                log::debug!("Spinning with provided grid");
                grid
            }
        };

        game_state.ensure_affordable()?;

        let evaluation = Evaluation::run(
            &grid,
            &self.config.paylines,
            &self.config.paytable,
            game_state.bet_per_line,
            game_state.lines,
        )?;

        game_state.begin_spin();
        let flow = game_state.flow;
        let settlement = game_state.settle(evaluation.total_payout, evaluation.longest_bonus_run())?;

        log::debug!(
            "Spin resolved ({:?}): payout {}, balance {}",
            flow,
            settlement.payout,
            game_state.balance
        );
        if settlement.free_spins_awarded > 0 {
            log::info!("Free spins triggered: {}", settlement.free_spins_awarded);
        }
        if let Some(total) = settlement.feature_payout {
            log::info!("Free spins finished, feature win {}", total);
        }

        Ok(SpinOutcome {
            highlight: evaluation.highlighted(),
            grid,
            game_state: game_state.clone(),
            flow,
            settlement,
        })
    }
}

impl Default for SlotEngine {
    fn default() -> Self {
        Self::new(Arc::new(SlotConfig::default()))
    }
}
