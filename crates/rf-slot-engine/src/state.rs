//! Session state machine: bankroll, bet settings and free spins

use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;
use crate::error::SlotError;

/// Free spins awarded per cell of the longest bonus run
pub const FREE_SPINS_PER_BONUS_CELL: u32 = 2;

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Flow {
    /// Paid spins
    #[default]
    #[serde(rename = "baseGame")]
    Normal,
    /// Feature spins: no bet is taken, wins are held until the feature ends
    #[serde(rename = "freeSpins")]
    FreeSpins,
}

/// Mutable state of one player session
///
/// Owned by the caller and passed into every spin; the engine keeps no copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub balance: u64,
    /// Win of the last base spin, or the running total of the current feature
    pub win: u64,
    /// Mode of the spin most recently resolved
    pub flow: Flow,
    /// Mode the next spin will run in
    pub next_flow: Flow,
    pub bet_per_line: u64,
    pub max_bet_per_line: u64,
    /// Active line count (a prefix of the configured paylines)
    pub lines: usize,
    pub fs_won: u32,
    pub fs_left: u32,
}

/// What a settled spin did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settlement {
    /// Amount debited for the spin (0 for free spins)
    pub bet: u64,
    /// Spin payout
    pub payout: u64,
    /// Free spins awarded by this spin
    pub free_spins_awarded: u32,
    /// Feature winnings credited because the last free spin was played
    pub feature_payout: Option<u64>,
}

impl GameState {
    /// Fresh session using the config's defaults, all lines active
    pub fn new(config: &SlotConfig) -> Self {
        Self {
            balance: config.starting_balance,
            win: 0,
            flow: Flow::Normal,
            next_flow: Flow::Normal,
            bet_per_line: config.default_bet_per_line,
            max_bet_per_line: config.max_bet_per_line,
            lines: config.paylines.len(),
            fs_won: 0,
            fs_left: 0,
        }
    }

    pub fn total_bet(&self) -> u64 {
        self.bet_per_line * self.lines as u64
    }

    /// Free spins running or latched for the next spin
    pub fn in_feature(&self) -> bool {
        self.flow == Flow::FreeSpins || self.next_flow == Flow::FreeSpins
    }

    /// Whether the next spin can be paid for
    pub fn can_afford_next_spin(&self) -> bool {
        self.next_flow == Flow::FreeSpins || self.balance >= self.total_bet()
    }

    /// Fail with `InsufficientFunds` when the next spin is paid and unaffordable
    pub fn ensure_affordable(&self) -> Result<(), SlotError> {
        if self.can_afford_next_spin() {
            Ok(())
        } else {
            Err(SlotError::InsufficientFunds {
                balance: self.balance,
                total_bet: self.total_bet(),
            })
        }
    }

    pub fn set_bet_per_line(&mut self, bet: u64) -> Result<(), SlotError> {
        if self.in_feature() {
            return Err(SlotError::FeatureActive);
        }
        if bet == 0 || bet > self.max_bet_per_line {
            return Err(SlotError::InvalidBet {
                bet,
                max: self.max_bet_per_line,
            });
        }
        self.bet_per_line = bet;
        Ok(())
    }

    /// Set the active line count; `max` is the number of configured paylines
    pub fn set_lines(&mut self, lines: usize, max: usize) -> Result<(), SlotError> {
        if self.in_feature() {
            return Err(SlotError::FeatureActive);
        }
        if lines == 0 || lines > max {
            return Err(SlotError::InvalidLineCount { lines, max });
        }
        self.lines = lines;
        Ok(())
    }

    /// Latch the pending flow for the spin about to be resolved
    pub(crate) fn begin_spin(&mut self) {
        if self.flow == Flow::Normal && self.next_flow == Flow::FreeSpins {
            self.win = 0;
        }
        self.flow = self.next_flow;
    }

    /// Apply a spin's total payout.
    ///
    /// Must follow [`GameState::begin_spin`]. `longest_bonus_run` is the length of
    /// the longest paying bonus-symbol run on any active line.
    pub(crate) fn settle(
        &mut self,
        total_payout: u64,
        longest_bonus_run: Option<usize>,
    ) -> Result<Settlement, SlotError> {
        let mut settlement = Settlement {
            payout: total_payout,
            ..Default::default()
        };

        if self.flow == Flow::FreeSpins {
            self.fs_left = self.fs_left.saturating_sub(1);
            self.win = self.win.saturating_add(total_payout);
            if self.fs_left == 0 {
                self.next_flow = Flow::Normal;
                self.balance = self.balance.saturating_add(self.win);
                self.fs_won = 0;
                settlement.feature_payout = Some(self.win);
            }
            return Ok(settlement);
        }

        let total_bet = self.total_bet();
        self.balance = self
            .balance
            .checked_sub(total_bet)
            .ok_or(SlotError::InsufficientFunds {
                balance: self.balance,
                total_bet,
            })?;
        self.balance = self.balance.saturating_add(total_payout);
        self.win = total_payout;
        settlement.bet = total_bet;

        if let Some(run) = longest_bonus_run {
            let awarded = run as u32 * FREE_SPINS_PER_BONUS_CELL;
            self.fs_won = awarded;
            self.fs_left = awarded;
            self.next_flow = Flow::FreeSpins;
            settlement.free_spins_awarded = awarded;
        }

        Ok(settlement)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&SlotConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = GameState::default();
        assert_eq!(state.balance, 1000);
        assert_eq!(state.lines, 20);
        assert_eq!(state.total_bet(), 20);
        assert_eq!(state.flow, Flow::Normal);
        assert!(state.can_afford_next_spin());
    }

    #[test]
    fn test_normal_spin_debits_then_credits() {
        let mut state = GameState::default();
        state.begin_spin();
        let settlement = state.settle(35, None).unwrap();

        assert_eq!(state.balance, 1000 - 20 + 35);
        assert_eq!(state.win, 35);
        assert_eq!(settlement.bet, 20);
        assert_eq!(state.next_flow, Flow::Normal);
    }

    #[test]
    fn test_bonus_run_latches_free_spins() {
        let mut state = GameState::default();
        state.begin_spin();
        let settlement = state.settle(30, Some(4)).unwrap();

        assert_eq!(state.fs_won, 8);
        assert_eq!(state.fs_left, 8);
        assert_eq!(settlement.free_spins_awarded, 8);
        assert_eq!(state.flow, Flow::Normal);
        assert_eq!(state.next_flow, Flow::FreeSpins);
        assert_eq!(state.balance, 1000 - 20 + 30);
    }

    #[test]
    fn test_free_spins_hold_winnings_until_the_end() {
        let mut state = GameState::default();
        state.begin_spin();
        state.settle(30, Some(2)).unwrap();
        assert_eq!(state.fs_left, 4);
        let balance = state.balance;

        state.begin_spin();
        assert_eq!(state.flow, Flow::FreeSpins);
        assert_eq!(state.win, 0);
        state.settle(10, None).unwrap();
        assert_eq!(state.balance, balance);
        assert_eq!(state.win, 10);
        assert_eq!(state.fs_left, 3);

        for _ in 0..2 {
            state.begin_spin();
            state.settle(0, None).unwrap();
        }
        assert_eq!(state.fs_left, 1);
        assert_eq!(state.balance, balance);

        state.begin_spin();
        let settlement = state.settle(5, Some(3)).unwrap();
        assert_eq!(settlement.feature_payout, Some(15));
        assert_eq!(settlement.free_spins_awarded, 0);
        assert_eq!(state.balance, balance + 15);
        assert_eq!(state.fs_left, 0);
        assert_eq!(state.fs_won, 0);
        assert_eq!(state.next_flow, Flow::Normal);
    }

    #[test]
    fn test_last_free_spin_reverts_flow() {
        let mut state = GameState {
            flow: Flow::FreeSpins,
            next_flow: Flow::FreeSpins,
            fs_won: 6,
            fs_left: 1,
            ..Default::default()
        };
        state.begin_spin();
        state.settle(0, None).unwrap();
        assert_eq!(state.fs_left, 0);
        assert_eq!(state.next_flow, Flow::Normal);
    }

    #[test]
    fn test_unaffordable_spin_is_rejected_without_change() {
        let mut state = GameState {
            balance: 5,
            ..Default::default()
        };
        assert!(matches!(
            state.ensure_affordable(),
            Err(SlotError::InsufficientFunds { balance: 5, total_bet: 20 })
        ));

        state.begin_spin();
        assert!(state.settle(100, None).is_err());
        assert_eq!(state.balance, 5);
    }

    #[test]
    fn test_bet_settings() {
        let mut state = GameState::default();
        assert!(state.set_bet_per_line(10).is_ok());
        assert_eq!(state.total_bet(), 200);
        assert!(matches!(state.set_bet_per_line(11), Err(SlotError::InvalidBet { .. })));
        assert!(state.set_bet_per_line(0).is_err());

        assert!(state.set_lines(5, 20).is_ok());
        assert_eq!(state.total_bet(), 50);
        assert!(matches!(state.set_lines(21, 20), Err(SlotError::InvalidLineCount { .. })));

        state.next_flow = Flow::FreeSpins;
        assert_eq!(state.set_bet_per_line(2), Err(SlotError::FeatureActive));
        assert_eq!(state.set_lines(1, 20), Err(SlotError::FeatureActive));
    }

    #[test]
    fn test_credits_saturate_at_max_balance() {
        let mut state = GameState {
            balance: u64::MAX - 5,
            ..Default::default()
        };
        state.begin_spin();
        state.settle(100, None).unwrap();
        assert_eq!(state.balance, u64::MAX);

        let mut state = GameState {
            balance: u64::MAX,
            flow: Flow::FreeSpins,
            next_flow: Flow::FreeSpins,
            win: u64::MAX - 1,
            fs_won: 2,
            fs_left: 1,
            ..Default::default()
        };
        state.begin_spin();
        let settlement = state.settle(10, None).unwrap();
        assert_eq!(state.win, u64::MAX);
        assert_eq!(settlement.feature_payout, Some(u64::MAX));
        assert_eq!(state.balance, u64::MAX);
    }

    #[test]
    fn test_flow_wire_names() {
        assert_eq!(serde_json::to_string(&Flow::Normal).unwrap(), "\"baseGame\"");
        assert_eq!(serde_json::to_string(&Flow::FreeSpins).unwrap(), "\"freeSpins\"");
    }
}
