//! Win detection.
//!
//! Two uses share this code: the real terminal check after any placement,
//! and the simulation oracle inside the AI ("would placing here win?").
//! The oracle path goes through [`Board::probe`], so the board is always
//! reverted regardless of the answer.

use crate::board::{Board, Player, Pos};
use crate::constants::{DIRECTIONS, WIN_LEN};
use crate::scan::centered_run;

/// The stones of the winning run through `pos`, if the stone placed there
/// completed one. Directions are tried in fixed order and the first
/// qualifying run wins; runs longer than 5 are returned whole.
pub fn winning_line(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let player = board.get(pos)?;
    for dir in DIRECTIONS {
        let run = centered_run(board, pos, dir, player);
        if run.count >= WIN_LEN {
            return Some(run.stones);
        }
    }
    None
}

/// True iff the stone at `pos` sits in a run of 5 or more.
pub fn check_win(board: &Board, pos: Pos) -> bool {
    winning_line(board, pos).is_some()
}

/// Simulation oracle: would `player` win by playing `pos`? The tentative
/// stone is removed again before returning.
pub fn wins_at(board: &mut Board, pos: Pos, player: Player) -> bool {
    board.probe(pos, player, |b| check_win(b, pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player::{Black, White};

    fn row_of(board: &mut Board, player: Player, y: usize, xs: std::ops::Range<usize>) {
        for x in xs {
            board.place((x, y), player).unwrap();
        }
    }

    #[test]
    fn test_runs_of_three_and_four_do_not_win() {
        for len in [3, 4] {
            let mut b = Board::new(13);
            row_of(&mut b, Black, 6, 2..2 + len);
            assert!(!check_win(&b, (2, 6)), "run of {len} must not win");
        }
    }

    #[test]
    fn test_runs_of_five_and_six_win() {
        for len in [5, 6] {
            let mut b = Board::new(13);
            row_of(&mut b, Black, 6, 2..2 + len);
            for x in 2..2 + len {
                assert!(check_win(&b, (x, 6)), "run of {len}, probe at x={x}");
            }
        }
    }

    #[test]
    fn test_win_all_directions() {
        // horizontal, vertical, both diagonals through (6,6)
        for dir in DIRECTIONS {
            let mut b = Board::new(13);
            for step in -2isize..=2 {
                let p = b.offset((6, 6), dir, step).unwrap();
                b.place(p, White).unwrap();
            }
            assert!(check_win(&b, (6, 6)), "direction {dir:?}");
        }
    }

    #[test]
    fn test_mixed_colors_break_run() {
        let mut b = Board::new(13);
        row_of(&mut b, Black, 6, 2..6);
        b.place((6, 6), White).unwrap();
        b.place((1, 6), White).unwrap();
        assert!(!check_win(&b, (3, 6)));
    }

    #[test]
    fn test_winning_line_contents() {
        let mut b = Board::new(13);
        for i in 0..5 {
            b.place((4 + i, 4 + i), Black).unwrap();
        }
        let line = winning_line(&b, (6, 6)).unwrap();
        assert_eq!(
            line,
            vec![(4, 4), (5, 5), (6, 6), (7, 7), (8, 8)],
            "line ordered backmost first"
        );
    }

    #[test]
    fn test_winning_line_overlength() {
        let mut b = Board::new(13);
        row_of(&mut b, White, 3, 2..8);
        let line = winning_line(&b, (4, 3)).unwrap();
        assert_eq!(line.len(), 6);
    }

    #[test]
    fn test_wins_at_reverts_board() {
        let mut b = Board::new(13);
        row_of(&mut b, White, 6, 2..6);
        let before = b.clone();
        assert!(wins_at(&mut b, (6, 6), White));
        assert!(!wins_at(&mut b, (6, 6), Black));
        assert!(!wins_at(&mut b, (0, 0), White));
        for p in before.positions() {
            assert_eq!(b.get(p), before.get(p), "board changed at {p:?}");
        }
    }

    #[test]
    fn test_winning_line_at_edge() {
        let mut b = Board::new(13);
        row_of(&mut b, Black, 0, 8..13);
        assert!(check_win(&b, (12, 0)));
        assert_eq!(
            winning_line(&b, (8, 0)).unwrap(),
            vec![(8, 0), (9, 0), (10, 0), (11, 0), (12, 0)]
        );
    }

    #[test]
    fn test_empty_cell_no_win() {
        let b = Board::new(13);
        assert_eq!(winning_line(&b, (6, 6)), None);
    }
}
