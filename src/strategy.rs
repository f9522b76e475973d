//! Positional fallback policies.
//!
//! When no tactical pattern fires, the cascade falls back to positional
//! judgment: opening moves near the center, weighted-random placement, and
//! the strategic scoring variants. Scoring accumulates an integer weight
//! per empty cell; the strategic and shape policies then draw uniformly
//! among the top-scoring cells, while the medium tier draws proportionally
//! to weight (its defining behavior is the weight ratio itself).

use fastrand::Rng;

use crate::board::{Board, Player, Pos};
use crate::constants::{
    CENTER_RADIUS_ADVANCED, CENTER_RADIUS_BASIC, DIRECTIONS, KNIGHT_OFFSETS, MEDIUM_CENTER_BASE,
    SHAPE_KEEP_DEN, SHAPE_KEEP_NUM, SHAPE_KNIGHT, SHAPE_TRIANGLE, W_LINE_BLOCK, W_LINE_OWN,
    W_OPP_ADJACENT, W_OPP_PER_STONE, W_OWN_ADJACENT, W_OWN_CONTESTED, W_STAR_NEIGHBOR,
    W_STAR_POINT,
};
use crate::scan::count_through;
use crate::tactics::pick;

/// How an opening move falls back when the center is already taken.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CenterFallback {
    /// Give up and let the next tactic decide.
    None,
    /// Try the 4 orthogonal neighbors of the center, in fixed order.
    Orthogonal,
    /// Try all 8 neighbors of the center, row-major.
    AllNeighbors,
}

/// Per-cell score accumulator.
struct ScoreMap {
    size: usize,
    scores: Vec<u32>,
}

impl ScoreMap {
    fn new(board: &Board) -> Self {
        Self {
            size: board.size(),
            scores: vec![0; board.size() * board.size()],
        }
    }

    #[inline]
    fn add(&mut self, (x, y): Pos, w: u32) {
        self.scores[y * self.size + x] += w;
    }

    /// All cells tied at the maximum positive score.
    fn top_candidates(&self) -> Vec<Pos> {
        let top = self.scores.iter().copied().max().unwrap_or(0);
        if top == 0 {
            return Vec::new();
        }
        self.scores
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == top)
            .map(|(i, _)| (i % self.size, i / self.size))
            .collect()
    }

    /// Cells within `num/den` of the maximum score.
    fn near_top_candidates(&self, num: u32, den: u32) -> Vec<Pos> {
        let top = self.scores.iter().copied().max().unwrap_or(0);
        if top == 0 {
            return Vec::new();
        }
        self.scores
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s > 0 && s * den >= top * num)
            .map(|(i, _)| (i % self.size, i / self.size))
            .collect()
    }
}

/// Proportional draw over a weighted candidate list.
fn weighted_pick(rng: &mut Rng, candidates: &[(Pos, u32)]) -> Option<Pos> {
    let total: u32 = candidates.iter().map(|&(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let mut r = rng.u32(0..total);
    for &(p, w) in candidates {
        if r < w {
            return Some(p);
        }
        r -= w;
    }
    None
}

/// Uniform-random empty cell (the whole easy tier).
pub fn uniform_random(board: &Board, rng: &mut Rng) -> Option<Pos> {
    let cells: Vec<Pos> = board.empty_positions().collect();
    if cells.is_empty() {
        None
    } else {
        Some(pick(rng, &cells))
    }
}

/// Center-weighted random placement: every empty cell weighted
/// max(1, 10 - manhattan distance to center), drawn proportionally.
pub fn center_weighted_random(board: &Board, rng: &mut Rng) -> Option<Pos> {
    let (cx, cy) = board.center();
    let candidates: Vec<(Pos, u32)> = board
        .empty_positions()
        .map(|p| {
            let d = p.0.abs_diff(cx) + p.1.abs_diff(cy);
            let w = MEDIUM_CENTER_BASE.saturating_sub(d as u32).max(1);
            (p, w)
        })
        .collect();
    weighted_pick(rng, &candidates)
}

/// Opening bias: while fewer than 2 stones are on the board, take the
/// center, or a neighbor of it per the tier's fallback rule.
pub fn center_opening(board: &Board, fallback: CenterFallback) -> Option<Pos> {
    if board.stone_count() >= 2 {
        return None;
    }
    let center = board.center();
    if board.get(center).is_none() {
        return Some(center);
    }
    match fallback {
        CenterFallback::None => None,
        CenterFallback::Orthogonal => [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .iter()
            .filter_map(|&d| board.offset(center, d, 1))
            .find(|&p| board.get(p).is_none()),
        CenterFallback::AllNeighbors => board.neighbors8(center).find(|&p| board.get(p).is_none()),
    }
}

/// Basic strategic scoring: adjacency to either player's stones plus
/// center proximity in a 5x5 window. Uniform draw among the top scorers.
pub fn strategic_basic(board: &Board, computer: Player, rng: &mut Rng) -> Option<Pos> {
    let mut map = ScoreMap::new(board);
    score_adjacency(board, computer, &mut map, false);
    score_center_window(board, &mut map, CENTER_RADIUS_BASIC, |d| {
        (CENTER_RADIUS_BASIC as u32 * 2 + 1).saturating_sub(d).max(1)
    });
    let candidates = map.top_candidates();
    if candidates.is_empty() {
        None
    } else {
        Some(pick(rng, &candidates))
    }
}

/// Advanced strategic scoring: contested-territory adjacency, a wider
/// center window, per-direction line potential for both players (own
/// lines weighted above blocks), and star-point bonuses.
pub fn strategic_advanced(board: &Board, computer: Player, rng: &mut Rng) -> Option<Pos> {
    let mut map = ScoreMap::new(board);
    score_adjacency(board, computer, &mut map, true);
    score_center_window(board, &mut map, CENTER_RADIUS_ADVANCED, |d| {
        (CENTER_RADIUS_ADVANCED as u32 * 2 + 1).saturating_sub(d).max(1)
    });
    score_line_potential(board, computer, &mut map);
    score_star_points(board, &mut map);
    let candidates = map.top_candidates();
    if candidates.is_empty() {
        None
    } else {
        Some(pick(rng, &candidates))
    }
}

/// Adjacency component shared by both strategic variants. The advanced
/// variant boosts contested cells and scales the defensive weight with
/// the local opponent presence.
fn score_adjacency(board: &Board, computer: Player, map: &mut ScoreMap, advanced: bool) {
    let opponent = computer.opponent();
    for stone in board.stones_of(computer) {
        for n in board.neighbors8(stone) {
            if board.get(n).is_some() {
                continue;
            }
            let contested =
                advanced && board.neighbors8(n).any(|q| board.get(q) == Some(opponent));
            map.add(n, if contested { W_OWN_CONTESTED } else { W_OWN_ADJACENT });
        }
    }
    for stone in board.stones_of(opponent) {
        for n in board.neighbors8(stone) {
            if board.get(n).is_some() {
                continue;
            }
            let w = if advanced {
                let around = board
                    .neighbors8(n)
                    .filter(|&q| board.get(q) == Some(opponent))
                    .count() as u32;
                W_OPP_ADJACENT + W_OPP_PER_STONE * around
            } else {
                W_OPP_ADJACENT
            };
            map.add(n, w);
        }
    }
}

/// Weight empty cells of the (2r+1)x(2r+1) window around the center.
fn score_center_window(
    board: &Board,
    map: &mut ScoreMap,
    radius: isize,
    weight_at: impl Fn(u32) -> u32,
) {
    let center = board.center();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let Some(p) = board.offset(center, (dx, dy), 1) else {
                continue;
            };
            if board.get(p).is_none() {
                let d = (dx.unsigned_abs() + dy.unsigned_abs()) as u32;
                map.add(p, weight_at(d));
            }
        }
    }
}

/// Re-simulated per-direction potential of every empty cell: how long a
/// line we would own through it, and how long an opponent line it would
/// cut. Own lines count for more than blocks.
fn score_line_potential(board: &Board, computer: Player, map: &mut ScoreMap) {
    let opponent = computer.opponent();
    for p in board.empty_positions() {
        let mut w = 0u32;
        for dir in DIRECTIONS {
            w += (count_through(board, p, dir, computer) as u32 - 1) * W_LINE_OWN;
            w += (count_through(board, p, dir, opponent) as u32 - 1) * W_LINE_BLOCK;
        }
        if w > 0 {
            map.add(p, w);
        }
    }
}

/// Star points and their surroundings keep some pull even with no stones
/// nearby.
fn score_star_points(board: &Board, map: &mut ScoreMap) {
    for star in board.star_points() {
        if board.get(star).is_none() {
            map.add(star, W_STAR_POINT);
        }
        for n in board.neighbors8(star) {
            if board.get(n).is_none() {
                map.add(n, W_STAR_NEIGHBOR);
            }
        }
    }
}

/// Good-shape heuristic: reward compact diagonal triangles and
/// knight's-move relations to our own stones, then draw uniformly among
/// candidates within 80% of the best score.
pub fn good_shape(board: &Board, computer: Player, rng: &mut Rng) -> Option<Pos> {
    let mut map = ScoreMap::new(board);
    for p in board.empty_positions() {
        let mut w = 0u32;
        for (dx, dy) in [(1isize, 1isize), (1, -1), (-1, 1), (-1, -1)] {
            let corner = board.offset(p, (dx, dy), 1);
            if corner.map(|q| board.get(q)) != Some(Some(computer)) {
                continue;
            }
            // triangle: diagonal corner plus one of its adjacent orthogonals
            let horiz = board.offset(p, (dx, 0), 1);
            let vert = board.offset(p, (0, dy), 1);
            if horiz.is_some_and(|q| board.get(q) == Some(computer)) {
                w += SHAPE_TRIANGLE;
            }
            if vert.is_some_and(|q| board.get(q) == Some(computer)) {
                w += SHAPE_TRIANGLE;
            }
        }
        for &off in &KNIGHT_OFFSETS {
            if board
                .offset(p, off, 1)
                .is_some_and(|q| board.get(q) == Some(computer))
            {
                w += SHAPE_KNIGHT;
            }
        }
        if w > 0 {
            map.add(p, w);
        }
    }
    let candidates = map.near_top_candidates(SHAPE_KEEP_NUM, SHAPE_KEEP_DEN);
    if candidates.is_empty() {
        None
    } else {
        Some(pick(rng, &candidates))
    }
}
