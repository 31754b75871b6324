//! Win evaluation: payline runs, scatter collection and payouts

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Grid};
use crate::paytable::{PayTable, Payline};
use crate::error::SlotError;
use crate::symbols::Symbol;

/// A resolved match: a payline run or the scatter collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    /// Matched symbol
    pub symbol: Symbol,
    /// Matched cells; for payline runs these are contiguous from reel 0
    pub cells: Vec<Cell>,
    /// Currency won (0 until payouts are applied)
    pub payout: u64,
    /// Payline index, `None` for the scatter win
    pub line: Option<usize>,
}

impl WinLine {
    fn seed(cell: Cell, line: usize) -> Self {
        Self {
            symbol: cell.symbol,
            cells: vec![cell],
            payout: 0,
            line: Some(line),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_scatter(&self) -> bool {
        self.line.is_none()
    }
}

/// Whether `candidate` extends a run currently tagged `run_symbol`
pub fn is_matching(run_symbol: Symbol, candidate: Symbol) -> bool {
    if run_symbol.is_scatter() || candidate.is_scatter() {
        return false;
    }
    if run_symbol == candidate {
        return true;
    }
    // wild never stands in for the bonus symbol
    if run_symbol.is_bonus() || candidate.is_bonus() {
        return false;
    }
    run_symbol.is_wild() || candidate.is_wild()
}

/// Walk the first `line_count` paylines left to right and collect run candidates.
///
/// A wild-only prefix followed by a concrete symbol yields two candidates: the
/// wild run as it stood, then the full run retagged with the concrete symbol.
pub fn evaluate_lines(grid: &Grid, paylines: &[Payline], line_count: usize) -> Vec<WinLine> {
    let mut candidates = Vec::new();

    for (index, payline) in paylines.iter().take(line_count).enumerate() {
        let mut cells = payline
            .positions
            .iter()
            .enumerate()
            .map_while(|(reel, &row)| grid.cell(reel, row).copied());

        let Some(first) = cells.next() else {
            continue;
        };
        let mut run = WinLine::seed(first, index);

        for cell in cells {
            if !is_matching(run.symbol, cell.symbol) {
                break;
            }
            if run.symbol.is_wild() && !cell.symbol.is_wild() {
                candidates.push(run.clone());
                run.symbol = cell.symbol;
            }
            run.cells.push(cell);
        }
        candidates.push(run);
    }

    candidates
}

/// Collect every scatter cell on the grid, regardless of paylines
pub fn evaluate_scatter(grid: &Grid) -> Option<WinLine> {
    let cells: Vec<Cell> = grid.cells().filter(|c| c.symbol.is_scatter()).copied().collect();
    let symbol = cells.first()?.symbol;
    Some(WinLine {
        symbol,
        cells,
        payout: 0,
        line: None,
    })
}

/// Fill in payouts.
///
/// Payline runs pay `table[run length] × bet_per_line`; the scatter win pays
/// `table[min(count, last tier)] × bet_per_line × line_count`.
pub fn apply_payouts(
    candidates: &mut [WinLine],
    paytable: &PayTable,
    bet_per_line: u64,
    line_count: usize,
) -> Result<(), SlotError> {
    for win in candidates.iter_mut() {
        let entry = paytable.entry(win.symbol)?;
        win.payout = if win.is_scatter() {
            entry.scatter_pay_for(win.len()) * bet_per_line * line_count as u64
        } else {
            entry.pay_for(win.len()) * bet_per_line
        };
    }
    Ok(())
}

/// Every candidate of one spin with payouts applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub candidates: Vec<WinLine>,
    /// Sum over all candidates, zero payouts included
    pub total_payout: u64,
}

impl Evaluation {
    /// Run line, scatter and payout evaluation for one grid
    pub fn run(
        grid: &Grid,
        paylines: &[Payline],
        paytable: &PayTable,
        bet_per_line: u64,
        line_count: usize,
    ) -> Result<Self, SlotError> {
        let mut candidates = evaluate_lines(grid, paylines, line_count);
        candidates.extend(evaluate_scatter(grid));
        apply_payouts(&mut candidates, paytable, bet_per_line, line_count)?;

        let total_payout = candidates.iter().map(|w| w.payout).sum();
        Ok(Self {
            candidates,
            total_payout,
        })
    }

    /// Wins reported to the player (non-zero payouts only)
    pub fn highlighted(&self) -> Vec<WinLine> {
        self.candidates.iter().filter(|w| w.payout > 0).cloned().collect()
    }

    /// Longest paid run of the bonus symbol, if any
    pub fn longest_bonus_run(&self) -> Option<usize> {
        self.candidates
            .iter()
            .filter(|w| w.symbol.is_bonus() && w.payout > 0)
            .map(WinLine::len)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paytable::standard_20_paylines;
    use crate::symbols::Symbol::*;

    /// Grid where every cell shows `filler`, with `overrides` as (reel, row, symbol)
    fn grid_with(filler: Symbol, overrides: &[(usize, usize, Symbol)]) -> Grid {
        let mut symbols = vec![vec![filler; 3]; 5];
        for &(reel, row, symbol) in overrides {
            symbols[reel][row] = symbol;
        }
        Grid::from_symbols(symbols)
    }

    fn middle_line() -> Vec<Payline> {
        vec![Payline::straight(0, 1, 5)]
    }

    #[test]
    fn test_matching_rules() {
        assert!(is_matching(King, King));
        assert!(is_matching(King, Wild));
        assert!(is_matching(Wild, Ace));
        assert!(is_matching(Sherif, Sherif));
        assert!(!is_matching(Sherif, Wild));
        assert!(!is_matching(Wild, Sherif));
        assert!(!is_matching(King, Queen));
        assert!(!is_matching(Reward1000, Reward1000));
        assert!(!is_matching(Wild, Reward1000));
    }

    #[test]
    fn test_full_line_of_kings() {
        let grid = grid_with(Ten, &[(0, 1, King), (1, 1, King), (2, 1, King), (3, 1, King), (4, 1, King)]);
        let wins = evaluate_lines(&grid, &middle_line(), 1);

        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].symbol, King);
        assert_eq!(wins[0].len(), 5);
        assert_eq!(wins[0].line, Some(0));
    }

    #[test]
    fn test_run_stops_at_first_mismatch() {
        let grid = grid_with(Ten, &[(0, 1, King), (1, 1, Wild), (2, 1, Queen), (3, 1, King)]);
        let wins = evaluate_lines(&grid, &middle_line(), 1);

        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].symbol, King);
        assert_eq!(wins[0].len(), 2);
    }

    #[test]
    fn test_single_cell_run_is_still_a_candidate() {
        let grid = grid_with(Ten, &[(0, 1, Ace)]);
        let wins = evaluate_lines(&grid, &middle_line(), 1);
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].len(), 1);
    }

    #[test]
    fn test_wild_prefix_splits_once() {
        let grid = grid_with(Ten, &[(0, 1, Wild), (1, 1, Wild), (2, 1, Ace), (3, 1, Wild), (4, 1, Ace)]);
        let wins = evaluate_lines(&grid, &middle_line(), 1);

        assert_eq!(wins.len(), 2);
        assert_eq!(wins[0].symbol, Wild);
        assert_eq!(wins[0].len(), 2);
        assert_eq!(wins[1].symbol, Ace);
        assert_eq!(wins[1].len(), 5);
        assert_eq!(wins[1].cells[..2], wins[0].cells[..]);
    }

    #[test]
    fn test_all_wild_line() {
        let grid = grid_with(Wild, &[]);
        let wins = evaluate_lines(&grid, &middle_line(), 1);
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].symbol, Wild);
        assert_eq!(wins[0].len(), 5);
    }

    #[test]
    fn test_wild_does_not_extend_bonus_run() {
        let grid = grid_with(Ten, &[(0, 1, Sherif), (1, 1, Sherif), (2, 1, Wild)]);
        let wins = evaluate_lines(&grid, &middle_line(), 1);
        assert_eq!(wins[0].symbol, Sherif);
        assert_eq!(wins[0].len(), 2);

        let grid = grid_with(Ten, &[(0, 1, Wild), (1, 1, Sherif)]);
        let wins = evaluate_lines(&grid, &middle_line(), 1);
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].symbol, Wild);
        assert_eq!(wins[0].len(), 1);
    }

    #[test]
    fn test_scatter_never_joins_a_run() {
        let grid = grid_with(Reward1000, &[]);
        let wins = evaluate_lines(&grid, &standard_20_paylines(), 20);
        assert_eq!(wins.len(), 20);
        assert!(wins.iter().all(|w| w.len() == 1));

        let grid = grid_with(Nine, &[(2, 1, Reward1000)]);
        let wins = evaluate_lines(&grid, &middle_line(), 1);
        assert_eq!(wins[0].len(), 2);
    }

    #[test]
    fn test_only_active_lines_are_walked() {
        let grid = grid_with(Queen, &[]);
        let wins = evaluate_lines(&grid, &standard_20_paylines(), 3);
        assert_eq!(wins.len(), 3);
        assert_eq!(wins.iter().map(|w| w.line).collect::<Vec<_>>(), vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_scatter_collection() {
        assert!(evaluate_scatter(&grid_with(King, &[])).is_none());

        let grid = grid_with(King, &[(0, 0, Reward1000), (2, 2, Reward1000), (4, 1, Reward1000)]);
        let scatter = evaluate_scatter(&grid).unwrap();
        assert_eq!(scatter.symbol, Reward1000);
        assert_eq!(scatter.len(), 3);
        assert!(scatter.is_scatter());
    }

    #[test]
    fn test_payouts() {
        let grid = grid_with(Ten, &[(0, 1, King), (1, 1, King), (2, 1, King), (3, 1, King), (4, 1, King)]);
        let eval = Evaluation::run(&grid, &middle_line(), &PayTable::standard(), 1, 1).unwrap();
        assert_eq!(eval.total_payout, 100);
        assert_eq!(eval.highlighted().len(), 1);
    }

    #[test]
    fn test_short_runs_pay_nothing() {
        let grid = grid_with(Ten, &[(0, 1, King), (1, 1, King), (2, 1, Queen)]);
        let eval = Evaluation::run(&grid, &middle_line(), &PayTable::standard(), 5, 1).unwrap();
        assert_eq!(eval.candidates.len(), 1);
        assert_eq!(eval.candidates[0].payout, 0);
        assert!(eval.highlighted().is_empty());
    }

    #[test]
    fn test_scatter_pays_on_total_bet() {
        let grid = grid_with(
            King,
            &[(0, 0, Reward1000), (1, 0, Queen), (2, 2, Reward1000), (3, 0, Jack), (4, 1, Reward1000)],
        );
        let mut wins = vec![evaluate_scatter(&grid).unwrap()];
        apply_payouts(&mut wins, &PayTable::standard(), 2, 20).unwrap();
        assert_eq!(wins[0].payout, 40);
    }

    #[test]
    fn test_wild_split_pays_both_tiers() {
        let grid = grid_with(Ten, &[(0, 1, Wild), (1, 1, Wild), (2, 1, Wild), (3, 1, Ace), (4, 1, Nine)]);
        let eval = Evaluation::run(&grid, &middle_line(), &PayTable::standard(), 1, 1).unwrap();
        // wild×3 = 75, A×4 = 30
        assert_eq!(eval.total_payout, 105);
    }

    #[test]
    fn test_missing_pay_info_fails() {
        let grid = grid_with(King, &[]);
        let table = PayTable::new(vec![]);
        let result = Evaluation::run(&grid, &middle_line(), &table, 1, 1);
        assert_eq!(result, Err(SlotError::MissingPayInfo(King)));
    }

    #[test]
    fn test_longest_bonus_run() {
        let grid = grid_with(
            Ten,
            &[(0, 1, Sherif), (1, 1, Sherif), (2, 1, Sherif), (0, 0, Sherif), (1, 0, Sherif), (2, 0, Sherif), (3, 0, Sherif)],
        );
        let eval = Evaluation::run(&grid, &standard_20_paylines(), &PayTable::standard(), 1, 20).unwrap();
        assert_eq!(eval.longest_bonus_run(), Some(4));
    }

    #[test]
    fn test_unpaid_bonus_run_does_not_count() {
        let grid = grid_with(Ten, &[(0, 1, Sherif)]);
        let eval = Evaluation::run(&grid, &middle_line(), &PayTable::standard(), 1, 1).unwrap();
        assert!(eval.candidates.iter().any(|w| w.symbol == Sherif && w.len() == 1));
        assert_eq!(eval.longest_bonus_run(), None);

        let grid = grid_with(Ten, &[(0, 1, Sherif), (1, 1, Sherif)]);
        let eval = Evaluation::run(&grid, &middle_line(), &PayTable::standard(), 1, 1).unwrap();
        assert_eq!(eval.longest_bonus_run(), Some(2));
        assert_eq!(eval.total_payout, 2);
    }

    #[test]
    fn test_run_stops_at_row_outside_grid() {
        let grid = grid_with(King, &[]);
        let lines = vec![Payline::new(0, &[1, 1, 7, 1, 1])];
        let candidates = evaluate_lines(&grid, &lines, 1);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].len(), 2);
        assert!(candidates[0].cells.iter().all(|c| c.position.reel < 2));
    }
}
