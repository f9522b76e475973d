//! Line scanning primitives.
//!
//! Every tactical detector reduces to the same question: how many stones of
//! one player sit consecutively along an axis through some cell, and what
//! lies just beyond the run. This module owns that logic so the detectors
//! stay declarative.
//!
//! A "direction" here is one signed axis vector from
//! [`crate::constants::DIRECTIONS`]; runs centered on a cell extend in both
//! signs of it.

use crate::board::{Board, Player, Pos};
use crate::constants::WIN_LEN;

/// A consecutive run of one player's stones along a single axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Number of stones in the run, origin included.
    pub count: usize,
    /// The stones in line order, backmost first.
    pub stones: Vec<Pos>,
}

/// Count consecutive `player` stones walking from `origin` (exclusive) in
/// one sign of `dir`, up to `max_steps` cells, stopping at the board edge
/// or the first mismatch.
pub fn forward_count(
    board: &Board,
    origin: Pos,
    dir: (isize, isize),
    player: Player,
    max_steps: usize,
) -> usize {
    let mut count = 0;
    for step in 1..=max_steps as isize {
        match board.offset(origin, dir, step) {
            Some(p) if board.get(p) == Some(player) => count += 1,
            _ => break,
        }
    }
    count
}

/// The run through `origin`, counting the origin cell itself exactly once
/// and extending in both signs of `dir`. The origin need not actually hold
/// a `player` stone: callers probing a *potential* placement rely on that.
pub fn centered_run(board: &Board, origin: Pos, dir: (isize, isize), player: Player) -> Run {
    let max = WIN_LEN - 1;
    let back = forward_count(board, origin, (-dir.0, -dir.1), player, max);
    let fwd = forward_count(board, origin, dir, player, max);

    let mut stones = Vec::with_capacity(back + fwd + 1);
    for step in (1..=back as isize).rev() {
        // in bounds by construction: forward_count already visited the cell
        stones.push(board.offset(origin, dir, -step).unwrap());
    }
    stones.push(origin);
    for step in 1..=fwd as isize {
        stones.push(board.offset(origin, dir, step).unwrap());
    }
    Run {
        count: back + fwd + 1,
        stones,
    }
}

/// Run length through `pos` as if `player` had a stone there. Equivalent to
/// `centered_run(..).count` but without building the stone list.
pub fn count_through(board: &Board, pos: Pos, dir: (isize, isize), player: Player) -> usize {
    1 + forward_count(board, pos, dir, player, WIN_LEN - 1)
        + forward_count(board, pos, (-dir.0, -dir.1), player, WIN_LEN - 1)
}

/// The cell just beyond one end of a run, if it is in bounds and empty.
/// `extremal` is the run's stone nearest that end; `dir` points outward.
pub fn open_end(board: &Board, extremal: Pos, dir: (isize, isize)) -> Option<Pos> {
    let p = board.offset(extremal, dir, 1)?;
    if board.get(p).is_none() { Some(p) } else { None }
}

/// Like [`open_end`], but additionally requires the cell one step further
/// out to be empty too: the run can actually grow into a line, not merely
/// touch one free cell. Used by the double-threat detectors.
pub fn extendable_end(board: &Board, extremal: Pos, dir: (isize, isize)) -> Option<Pos> {
    let end = open_end(board, extremal, dir)?;
    let beyond = board.offset(end, dir, 1)?;
    if board.get(beyond).is_none() {
        Some(end)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player::{Black, White};

    fn board_with(stones: &[(Pos, Player)]) -> Board {
        let mut b = Board::new(13);
        for &(p, pl) in stones {
            b.place(p, pl).unwrap();
        }
        b
    }

    #[test]
    fn test_forward_count_stops_at_gap() {
        let b = board_with(&[
            ((4, 4), Black),
            ((5, 4), Black),
            ((6, 4), Black),
            ((8, 4), Black),
        ]);
        assert_eq!(forward_count(&b, (4, 4), (1, 0), Black, 4), 2);
        assert_eq!(forward_count(&b, (4, 4), (1, 0), Black, 1), 1);
        assert_eq!(forward_count(&b, (4, 4), (1, 0), White, 4), 0);
    }

    #[test]
    fn test_forward_count_stops_at_edge() {
        let b = board_with(&[((12, 0), Black), ((12, 1), Black)]);
        assert_eq!(forward_count(&b, (12, 1), (0, -1), Black, 4), 1);
        assert_eq!(forward_count(&b, (12, 1), (1, 0), Black, 4), 0);
    }

    #[test]
    fn test_centered_run_both_signs() {
        let b = board_with(&[
            ((3, 6), White),
            ((4, 6), White),
            ((5, 6), White),
            ((6, 6), White),
        ]);
        let run = centered_run(&b, (4, 6), (1, 0), White);
        assert_eq!(run.count, 4);
        assert_eq!(run.stones, vec![(3, 6), (4, 6), (5, 6), (6, 6)]);
    }

    #[test]
    fn test_centered_run_counts_empty_origin_once() {
        // Probing a potential placement: origin is empty but still counts.
        let b = board_with(&[((4, 4), Black), ((6, 4), Black)]);
        let run = centered_run(&b, (5, 4), (1, 0), Black);
        assert_eq!(run.count, 3);
        assert_eq!(count_through(&b, (5, 4), (1, 0), Black), 3);
    }

    #[test]
    fn test_count_through_diagonal() {
        let b = board_with(&[((5, 5), Black), ((6, 6), Black), ((8, 8), Black)]);
        assert_eq!(count_through(&b, (7, 7), (1, 1), Black), 4);
        assert_eq!(count_through(&b, (7, 7), (1, -1), Black), 1);
    }

    #[test]
    fn test_open_end() {
        let b = board_with(&[((4, 4), Black), ((5, 4), Black), ((6, 4), White)]);
        assert_eq!(open_end(&b, (5, 4), (1, 0)), None); // blocked by White
        assert_eq!(open_end(&b, (4, 4), (-1, 0)), Some((3, 4)));
        let edge = board_with(&[((0, 0), Black)]);
        assert_eq!(open_end(&edge, (0, 0), (-1, 0)), None); // board edge
    }

    #[test]
    fn test_extendable_end() {
        // _ _ X X vs O _ X X: the free cell must itself have room behind it.
        let open = board_with(&[((4, 4), Black), ((5, 4), Black)]);
        assert_eq!(extendable_end(&open, (4, 4), (-1, 0)), Some((3, 4)));

        let cramped = board_with(&[((2, 4), White), ((4, 4), Black), ((5, 4), Black)]);
        assert_eq!(extendable_end(&cramped, (4, 4), (-1, 0)), None);

        // At the edge there is no cell beyond the free one.
        let edge = board_with(&[((1, 0), Black), ((2, 0), Black)]);
        assert_eq!(extendable_end(&edge, (1, 0), (-1, 0)), None);
    }
}
