//! Constants for board geometry, win detection, and positional scoring.
//!
//! The board size itself is a runtime parameter of [`crate::board::Board`]
//! (the engine must handle anything from 5x5 test boards up to full games);
//! everything here is a fixed tunable of the rule cascade.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). The original game is played on 13x13.
pub const DEFAULT_SIZE: usize = 13;

/// Smallest board on which a game can be decided.
pub const MIN_SIZE: usize = 5;

/// Run length that wins the game.
pub const WIN_LEN: usize = 5;

/// The 4 undirected line axes through a cell: horizontal, vertical,
/// diagonal-down, diagonal-up. Each is scanned in both signs.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

// =============================================================================
// Strategic Position Scoring
// =============================================================================

/// Weight for an empty cell adjacent to one of our stones (basic variant).
pub const W_OWN_ADJACENT: u32 = 5;

/// Weight for an own-adjacent cell that also touches an opponent stone
/// (contested territory, advanced variant only).
pub const W_OWN_CONTESTED: u32 = 10;

/// Base weight for an empty cell adjacent to an opponent stone.
pub const W_OPP_ADJACENT: u32 = 3;

/// Extra weight per opponent stone around an opponent-adjacent cell
/// (advanced variant only).
pub const W_OPP_PER_STONE: u32 = 2;

/// Half-width of the center window scored by the basic variant (5x5).
pub const CENTER_RADIUS_BASIC: isize = 2;

/// Half-width of the center window scored by the advanced variant (7x7).
pub const CENTER_RADIUS_ADVANCED: isize = 3;

/// Per-direction multiplier for our own line potential (advanced variant).
/// Kept strictly above [`W_LINE_BLOCK`]: building beats blocking.
pub const W_LINE_OWN: u32 = 4;

/// Per-direction multiplier for blocking the opponent's line potential.
pub const W_LINE_BLOCK: u32 = 3;

/// Weight on an empty star point (advanced variant).
pub const W_STAR_POINT: u32 = 3;

/// Weight on each empty neighbor of a star point.
pub const W_STAR_NEIGHBOR: u32 = 2;

/// Base used by the medium tier's center-weighted draw:
/// weight = max(1, MEDIUM_CENTER_BASE - manhattan distance).
pub const MEDIUM_CENTER_BASE: u32 = 10;

// =============================================================================
// Good-Shape Scoring
// =============================================================================

/// Score for a diagonal triangle (own stones on an orthogonal neighbor and
/// the matching diagonal corner of the candidate).
pub const SHAPE_TRIANGLE: u32 = 4;

/// Score per own stone a knight's move away from the candidate.
pub const SHAPE_KNIGHT: u32 = 2;

/// Knight's-move offsets around a candidate cell.
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Candidates within this fraction of the top good-shape score stay in the
/// draw pool (80%, expressed as a ratio to avoid float compares).
pub const SHAPE_KEEP_NUM: u32 = 4;
pub const SHAPE_KEEP_DEN: u32 = 5;
