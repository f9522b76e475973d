//! Tactical pattern detectors.
//!
//! Each detector inspects the board for one pattern and returns the cell to
//! play, or `None`. Detectors never commit moves themselves; the policy
//! runner in [`crate::engine`] commits the first candidate of a tier's
//! cascade. Detectors that simulate a placement go through
//! [`Board::probe`], so a no-match call leaves the board untouched.
//!
//! Scan order is row-major over the grid with directions tried in
//! [`DIRECTIONS`] order; detectors whose pattern has several equally valid
//! placements (the two flanks of an open three, the two ends of a four)
//! draw uniformly among them.

use fastrand::Rng;

use crate::board::{Board, Player, Pos};
use crate::constants::{DIRECTIONS, WIN_LEN};
use crate::scan::{centered_run, count_through, extendable_end, forward_count, open_end, Run};
use crate::win::wins_at;

/// Uniform draw from a nonempty candidate list.
pub(crate) fn pick(rng: &mut Rng, candidates: &[Pos]) -> Pos {
    candidates[rng.usize(0..candidates.len())]
}

/// The empty cells just beyond both extremal stones of a run.
fn open_ends_of(board: &Board, run: &Run, dir: (isize, isize)) -> Vec<Pos> {
    let mut ends = Vec::with_capacity(2);
    // stones are ordered backmost first
    let back = run.stones[0];
    let front = run.stones[run.stones.len() - 1];
    if let Some(p) = open_end(board, front, dir) {
        ends.push(p);
    }
    if let Some(p) = open_end(board, back, (-dir.0, -dir.1)) {
        ends.push(p);
    }
    ends
}

/// First empty cell (row-major) where `player` completes 5-in-a-row.
pub fn immediate_win(board: &mut Board, player: Player) -> Option<Pos> {
    let cells: Vec<Pos> = board.empty_positions().collect();
    cells.into_iter().find(|&p| wins_at(board, p, player))
}

/// Exact 4-run of `player` with at least one open extension end: play the
/// fifth stone there (or deny it, when `player` is the opponent).
pub fn four_completion(board: &Board, player: Player, rng: &mut Rng) -> Option<Pos> {
    for origin in board.stones_of(player) {
        for dir in DIRECTIONS {
            let run = centered_run(board, origin, dir, player);
            if run.count != 4 {
                continue;
            }
            let ends = open_ends_of(board, &run, dir);
            if !ends.is_empty() {
                return Some(pick(rng, &ends));
            }
        }
    }
    None
}

/// Exactly 3 contiguous stones with BOTH flanking cells empty. Candidates
/// are the two flanks. One-sided threes belong to [`three_extension`].
pub fn open_three(board: &Board, player: Player, rng: &mut Rng) -> Option<Pos> {
    for origin in board.stones_of(player) {
        for dir in DIRECTIONS {
            if forward_count(board, origin, dir, player, 2) != 2 {
                continue;
            }
            // run is origin plus two forward stones; flanks sit at
            // origin+3*dir and origin-dir
            let front = board.offset(origin, dir, 2).unwrap();
            let fwd_flank = open_end(board, front, dir);
            let back_flank = open_end(board, origin, (-dir.0, -dir.1));
            if let (Some(a), Some(b)) = (fwd_flank, back_flank) {
                return Some(pick(rng, &[a, b]));
            }
        }
    }
    None
}

/// 3 contiguous stones with at least one open end; extends (or caps) the
/// run at whichever ends are free.
pub fn three_extension(board: &Board, player: Player, rng: &mut Rng) -> Option<Pos> {
    for origin in board.stones_of(player) {
        for dir in DIRECTIONS {
            if forward_count(board, origin, dir, player, 2) != 2 {
                continue;
            }
            let front = board.offset(origin, dir, 2).unwrap();
            let mut ends = Vec::with_capacity(2);
            if let Some(p) = open_end(board, front, dir) {
                ends.push(p);
            }
            if let Some(p) = open_end(board, origin, (-dir.0, -dir.1)) {
                ends.push(p);
            }
            if !ends.is_empty() {
                return Some(pick(rng, &ends));
            }
        }
    }
    None
}

/// Grow a 2-run into a 3-run at either open end.
pub fn two_extension(board: &Board, player: Player, rng: &mut Rng) -> Option<Pos> {
    for origin in board.stones_of(player) {
        for dir in DIRECTIONS {
            if forward_count(board, origin, dir, player, 1) != 1 {
                continue;
            }
            let front = board.offset(origin, dir, 1).unwrap();
            let mut ends = Vec::with_capacity(2);
            if let Some(p) = open_end(board, front, dir) {
                ends.push(p);
            }
            if let Some(p) = open_end(board, origin, (-dir.0, -dir.1)) {
                ends.push(p);
            }
            if !ends.is_empty() {
                return Some(pick(rng, &ends));
            }
        }
    }
    None
}

/// The hard tier's cruder cousin of the extension detectors: first run of
/// 2 or more found gets extended at its forward end, else its backward
/// end, deterministically.
pub fn pair_extension(board: &Board, player: Player) -> Option<Pos> {
    for origin in board.stones_of(player) {
        for dir in DIRECTIONS {
            let count = 1 + forward_count(board, origin, dir, player, 2);
            if count < 2 {
                continue;
            }
            if let Some(p) = board.offset(origin, dir, count as isize) {
                if board.get(p).is_none() {
                    return Some(p);
                }
            }
            if let Some(p) = open_end(board, origin, (-dir.0, -dir.1)) {
                return Some(p);
            }
        }
    }
    None
}

/// True, with the board probed, iff placing `player` at `p` makes an
/// extendable open three along `dir`: run of exactly 3 whose flanks are
/// both empty *and* backed by a further empty cell.
fn makes_extendable_three(board: &Board, p: Pos, dir: (isize, isize), player: Player) -> bool {
    let run = centered_run(board, p, dir, player);
    if run.count != 3 {
        return false;
    }
    let back = run.stones[0];
    let front = run.stones[run.stones.len() - 1];
    extendable_end(board, front, dir).is_some()
        && extendable_end(board, back, (-dir.0, -dir.1)).is_some()
}

/// First empty cell where placing `player`'s stone creates open threes in
/// two or more directions at once. With `player` = the computer this is
/// the double-threat attack; with the opponent it is the 3-3 block.
pub fn double_open_three_spot(board: &mut Board, player: Player) -> Option<Pos> {
    let cells: Vec<Pos> = board.empty_positions().collect();
    cells.into_iter().find(|&p| {
        board.probe(p, player, |b| {
            let threats = DIRECTIONS
                .iter()
                .filter(|&&dir| makes_extendable_three(b, p, dir, player))
                .count();
            threats >= 2
        })
    })
}

/// First empty cell where a single `player` placement both completes an
/// exact 4-run and forms an open three. Used to pre-empt the opponent's
/// 4-3 fork.
pub fn four_three_spot(board: &mut Board, player: Player) -> Option<Pos> {
    let cells: Vec<Pos> = board.empty_positions().collect();
    cells.into_iter().find(|&p| {
        board.probe(p, player, |b| {
            let mut has_four = false;
            let mut has_open_three = false;
            for dir in DIRECTIONS {
                let run = centered_run(b, p, dir, player);
                match run.count {
                    4 => has_four = true,
                    3 => {
                        let back = run.stones[0];
                        let front = run.stones[run.stones.len() - 1];
                        if open_end(b, front, dir).is_some()
                            && open_end(b, back, (-dir.0, -dir.1)).is_some()
                        {
                            has_open_three = true;
                        }
                    }
                    _ => {}
                }
            }
            has_four && has_open_three
        })
    })
}

/// Broken-four shapes: placing `player` here either puts 3+ own stones
/// inside the 2-cell radius of the new stone along one axis, or lines up a
/// run-gap-run shape totalling 4+. Deliberately an ad hoc radius/skip
/// heuristic rather than the textbook definition.
pub fn hidden_four(board: &mut Board, player: Player) -> Option<Pos> {
    let cells: Vec<Pos> = board.empty_positions().collect();
    cells.into_iter().find(|&p| {
        board.probe(p, player, |b| {
            DIRECTIONS
                .iter()
                .any(|&dir| hidden_four_along(b, p, dir, player))
        })
    })
}

fn hidden_four_along(board: &Board, p: Pos, dir: (isize, isize), player: Player) -> bool {
    // radius-2 window on either side of the placed stone
    let mut window = 0;
    for step in [-2isize, -1, 1, 2] {
        if let Some(q) = board.offset(p, dir, step) {
            if board.get(q) == Some(player) {
                window += 1;
            }
        }
    }
    if window >= 3 {
        return true;
    }

    // skip-one shape: contiguous run from p, one-cell gap, continuation run
    for sign in [1isize, -1] {
        let d = (dir.0 * sign, dir.1 * sign);
        let a = forward_count(board, p, d, player, WIN_LEN - 1);
        let Some(gap) = board.offset(p, d, a as isize + 1) else {
            continue;
        };
        if board.get(gap).is_some() {
            continue;
        }
        let b2 = forward_count(board, gap, d, player, WIN_LEN - 1);
        if b2 > 0 && 1 + a + b2 >= 4 {
            return true;
        }
    }
    false
}

/// The `OO_OO` gap: own stones at offsets +-1 and +-2 around an empty
/// cell. Filling the gap builds an overlapping pair of threes.
pub fn potential_open_three(board: &Board, player: Player) -> Option<Pos> {
    board.empty_positions().find(|&p| {
        DIRECTIONS.iter().any(|&dir| {
            [-2isize, -1, 1, 2].iter().all(|&step| {
                board
                    .offset(p, dir, step)
                    .is_some_and(|q| board.get(q) == Some(player))
            })
        })
    })
}

/// A placement that starts 2-in-a-row in two different directions at once,
/// the seed of a later double threat.
pub fn double_two(board: &Board, player: Player) -> Option<Pos> {
    board.empty_positions().find(|&p| {
        let mut qualifying = 0;
        for dir in DIRECTIONS {
            if count_through(board, p, dir, player) >= 2 {
                qualifying += 1;
                if qualifying >= 2 {
                    return true;
                }
            }
        }
        false
    })
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

    fn assert_unchanged(before: &Board, after: &Board) {
        for p in before.positions() {
            assert_eq!(before.get(p), after.get(p), "board mutated at {p:?}");
        }
    }

    #[test]
    fn test_immediate_win_found() {
        let mut b = board_with(&[
            ((2, 6), White),
            ((3, 6), White),
            ((4, 6), White),
            ((5, 6), White),
        ]);
        let p = immediate_win(&mut b, White).unwrap();
        assert!(p == (1, 6) || p == (6, 6), "got {p:?}");
    }

    #[test]
    fn test_immediate_win_row_major_order() {
        // Two separate winning cells: row-major scan finds the upper one.
        let mut b = board_with(&[
            ((2, 2), White),
            ((3, 2), White),
            ((4, 2), White),
            ((5, 2), White),
            ((2, 9), White),
            ((3, 9), White),
            ((4, 9), White),
            ((5, 9), White),
        ]);
        assert_eq!(immediate_win(&mut b, White), Some((1, 2)));
    }

    #[test]
    fn test_immediate_win_no_match_purity() {
        let mut b = board_with(&[((4, 4), White), ((5, 5), Black)]);
        let before = b.clone();
        assert_eq!(immediate_win(&mut b, White), None);
        assert_unchanged(&before, &b);
    }

    #[test]
    fn test_four_completion_endpoints() {
        let mut rng = Rng::with_seed(1);
        let b = board_with(&[
            ((5, 5), White),
            ((5, 6), White),
            ((5, 7), White),
            ((5, 8), White),
        ]);
        for _ in 0..20 {
            let p = four_completion(&b, White, &mut rng).unwrap();
            assert!(p == (5, 4) || p == (5, 9), "got {p:?}");
        }
    }

    #[test]
    fn test_four_completion_one_side_blocked() {
        let mut rng = Rng::with_seed(2);
        let b = board_with(&[
            ((5, 4), Black),
            ((5, 5), White),
            ((5, 6), White),
            ((5, 7), White),
            ((5, 8), White),
        ]);
        assert_eq!(four_completion(&b, White, &mut rng), Some((5, 9)));
    }

    #[test]
    fn test_four_completion_ignores_three() {
        let mut rng = Rng::with_seed(3);
        let b = board_with(&[((5, 5), White), ((5, 6), White), ((5, 7), White)]);
        assert_eq!(four_completion(&b, White, &mut rng), None);
    }

    #[test]
    fn test_open_three_both_flanks() {
        let mut rng = Rng::with_seed(4);
        // _XXX_ along the row
        let b = board_with(&[((4, 6), Black), ((5, 6), Black), ((6, 6), Black)]);
        for _ in 0..20 {
            let p = open_three(&b, Black, &mut rng).unwrap();
            assert!(p == (3, 6) || p == (7, 6), "got {p:?}");
        }
    }

    #[test]
    fn test_open_three_rejects_blocked_side() {
        let mut rng = Rng::with_seed(5);
        // OXXX_ : not an open three
        let left = board_with(&[
            ((3, 6), White),
            ((4, 6), Black),
            ((5, 6), Black),
            ((6, 6), Black),
        ]);
        assert_eq!(open_three(&left, Black, &mut rng), None);
        // _XXXO
        let right = board_with(&[
            ((4, 6), Black),
            ((5, 6), Black),
            ((6, 6), Black),
            ((7, 6), White),
        ]);
        assert_eq!(open_three(&right, Black, &mut rng), None);
    }

    #[test]
    fn test_three_extension_accepts_one_side() {
        let mut rng = Rng::with_seed(6);
        let b = board_with(&[
            ((3, 6), White),
            ((4, 6), Black),
            ((5, 6), Black),
            ((6, 6), Black),
        ]);
        assert_eq!(three_extension(&b, Black, &mut rng), Some((7, 6)));
    }

    #[test]
    fn test_two_extension() {
        let mut rng = Rng::with_seed(7);
        let b = board_with(&[((5, 5), White), ((6, 6), White)]);
        for _ in 0..20 {
            let p = two_extension(&b, White, &mut rng).unwrap();
            assert!(p == (4, 4) || p == (7, 7), "got {p:?}");
        }
    }

    #[test]
    fn test_pair_extension_prefers_forward_end() {
        let b = board_with(&[((5, 6), White), ((6, 6), White)]);
        assert_eq!(pair_extension(&b, White), Some((7, 6)));
    }

    #[test]
    fn test_pair_extension_falls_back_to_back_end() {
        let b = board_with(&[((5, 6), White), ((6, 6), White), ((7, 6), Black)]);
        assert_eq!(pair_extension(&b, White), Some((4, 6)));
    }

    #[test]
    fn test_double_open_three_cross() {
        // Placing at (6,6) completes _XXX_ both horizontally and vertically.
        let mut b = board_with(&[
            ((5, 6), Black),
            ((7, 6), Black),
            ((6, 5), Black),
            ((6, 7), Black),
        ]);
        assert_eq!(double_open_three_spot(&mut b, Black), Some((6, 6)));
    }

    #[test]
    fn test_double_open_three_requires_extendable_flanks() {
        // Same cross, but stones pinch the horizontal line two cells out
        // on both sides: only the vertical three is truly extendable.
        let mut b = board_with(&[
            ((5, 6), Black),
            ((7, 6), Black),
            ((6, 5), Black),
            ((6, 7), Black),
            ((3, 6), White),
            ((9, 6), White),
        ]);
        assert_eq!(double_open_three_spot(&mut b, Black), None);
    }

    #[test]
    fn test_double_open_three_purity() {
        let mut b = board_with(&[((4, 4), Black)]);
        let before = b.clone();
        assert_eq!(double_open_three_spot(&mut b, Black), None);
        assert_unchanged(&before, &b);
    }

    #[test]
    fn test_four_three_spot() {
        // (6,6) completes XXXX vertically (three above it; one below) and
        // an open three horizontally.
        let mut b = board_with(&[
            ((6, 3), Black),
            ((6, 4), Black),
            ((6, 5), Black),
            ((5, 6), Black),
            ((7, 6), Black),
        ]);
        assert_eq!(four_three_spot(&mut b, Black), Some((6, 6)));
    }

    #[test]
    fn test_four_three_spot_needs_both_halves() {
        // Only the four, no accompanying open three
        let mut b = board_with(&[((6, 3), Black), ((6, 4), Black), ((6, 5), Black)]);
        let before = b.clone();
        assert_eq!(four_three_spot(&mut b, Black), None);
        assert_unchanged(&before, &b);
    }

    #[test]
    fn test_hidden_four_gap_shape() {
        // OO_OO row: the first row-major cell that lines up a run-gap-run
        // totalling 4+ is (2,6), making XXX_XX.
        let mut b = board_with(&[
            ((3, 6), White),
            ((4, 6), White),
            ((6, 6), White),
            ((7, 6), White),
        ]);
        assert_eq!(hidden_four(&mut b, White), Some((2, 6)));
    }

    #[test]
    fn test_hidden_four_skip_run() {
        // X_XXX: placing at (2,6) gives run 1, gap at (3,6), continuation
        // of 3 => broken four.
        let mut b = board_with(&[((4, 6), White), ((5, 6), White), ((6, 6), White)]);
        assert_eq!(hidden_four(&mut b, White), Some((2, 6)));
    }

    #[test]
    fn test_hidden_four_no_match_purity() {
        let mut b = board_with(&[((4, 6), White), ((9, 9), Black)]);
        let before = b.clone();
        assert_eq!(hidden_four(&mut b, White), None);
        assert_unchanged(&before, &b);
    }

    #[test]
    fn test_potential_open_three() {
        let b = board_with(&[
            ((4, 6), White),
            ((5, 6), White),
            ((7, 6), White),
            ((8, 6), White),
        ]);
        assert_eq!(potential_open_three(&b, White), Some((6, 6)));
    }

    #[test]
    fn test_potential_open_three_rejects_occupied_gap() {
        let b = board_with(&[
            ((4, 6), White),
            ((5, 6), White),
            ((6, 6), Black),
            ((7, 6), White),
            ((8, 6), White),
        ]);
        assert_eq!(potential_open_three(&b, White), None);
    }

    #[test]
    fn test_double_two() {
        // (5,5) lines up with (6,5) horizontally and (5,6) vertically:
        // two-in-a-row in two directions.
        let b = board_with(&[((5, 6), White), ((6, 5), White)]);
        assert_eq!(double_two(&b, White), Some((5, 5)));
    }

    #[test]
    fn test_double_two_single_direction_no_match() {
        let b = board_with(&[((5, 6), White)]);
        assert_eq!(double_two(&b, White), None);
    }
}
