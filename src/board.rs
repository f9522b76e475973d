//! Board representation and stone placement.
//!
//! The board is a runtime-sized NxN grid of `Option<Player>` cells,
//! 0-indexed with `x` = column and `y` = row. The engine mutates it through
//! [`Board::place`] for real moves and [`Board::probe`] for tactical
//! simulation (place, evaluate, always revert).

use std::fmt;

use crate::constants::MIN_SIZE;

/// A stone owner. By convention Black is the human and White the computer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    Black,
    White,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

/// A cell coordinate: `(x, y)` with `x` = column, `y` = row.
pub type Pos = (usize, usize);

/// Result of attempting an illegal placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceError {
    /// Coordinate outside the board.
    OutOfBounds,
    /// Cell already holds a stone.
    Occupied,
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceError::OutOfBounds => write!(f, "illegal move: out of bounds"),
            PlaceError::Occupied => write!(f, "illegal move: cell not empty"),
        }
    }
}

impl std::error::Error for PlaceError {}

#[derive(Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Player>>,
}

impl Board {
    /// Create an empty board. Sizes below 5 cannot host a winning run and
    /// are clamped up to [`MIN_SIZE`].
    pub fn new(size: usize) -> Self {
        let size = size.max(MIN_SIZE);
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    #[inline]
    fn idx(&self, (x, y): Pos) -> usize {
        y * self.size + x
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Center cell, e.g. (6,6) on a 13x13 board.
    #[inline]
    pub fn center(&self) -> Pos {
        (self.size / 2, self.size / 2)
    }

    #[inline]
    pub fn in_bounds(&self, (x, y): Pos) -> bool {
        x < self.size && y < self.size
    }

    /// Stone at `pos`, or `None` when empty or out of bounds.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Player> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[self.idx(pos)]
    }

    #[inline]
    pub fn is_empty_cell(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.cells[self.idx(pos)].is_none()
    }

    /// Place a stone. Fails on occupied or out-of-bounds cells; a failed
    /// placement leaves the board untouched.
    pub fn place(&mut self, pos: Pos, player: Player) -> Result<(), PlaceError> {
        if !self.in_bounds(pos) {
            return Err(PlaceError::OutOfBounds);
        }
        let i = self.idx(pos);
        if self.cells[i].is_some() {
            return Err(PlaceError::Occupied);
        }
        self.cells[i] = Some(player);
        Ok(())
    }

    /// Remove a stone. Only simulation code should need this; real moves
    /// are never retracted.
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        let i = self.idx(pos);
        self.cells[i] = None;
    }

    /// Tentatively place `player` at `pos`, evaluate `f`, and revert. The
    /// revert is unconditional, so detectors cannot leave a probe stone
    /// behind on an early return inside `f`.
    ///
    /// Callers must pass an empty in-bounds cell.
    pub fn probe<T>(&mut self, pos: Pos, player: Player, f: impl FnOnce(&Board) -> T) -> T {
        debug_assert!(self.is_empty_cell(pos));
        let i = self.idx(pos);
        self.cells[i] = Some(player);
        let out = f(self);
        self.cells[i] = None;
        out
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Total stones on the board.
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Step `steps` cells from `pos` along `dir` (either sign), staying in
    /// bounds. The workhorse behind every line scan.
    pub fn offset(&self, (x, y): Pos, (dx, dy): (isize, isize), steps: isize) -> Option<Pos> {
        let nx = x as isize + dx * steps;
        let ny = y as isize + dy * steps;
        if nx < 0 || ny < 0 {
            return None;
        }
        let pos = (nx as usize, ny as usize);
        if self.in_bounds(pos) { Some(pos) } else { None }
    }

    /// The up-to-8 in-bounds neighbors of a cell.
    pub fn neighbors8(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        let mut v = Vec::with_capacity(8);
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if let Some(n) = self.offset(pos, (dx, dy), 1) {
                    v.push(n);
                }
            }
        }
        v.into_iter()
    }

    /// Row-major iterator over all cell coordinates.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let s = self.size;
        (0..s).flat_map(move |y| (0..s).map(move |x| (x, y)))
    }

    /// Row-major iterator over empty cells.
    pub fn empty_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(|&p| self.get(p).is_none())
    }

    /// Row-major iterator over cells held by `player`.
    pub fn stones_of(&self, player: Player) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(move |&p| self.get(p) == Some(player))
    }

    /// Star points of the board: the traditional handicap-style anchors
    /// used by the advanced positional scoring. On 13x13 these are the
    /// 3x3 grid over columns/rows {3, 7, 11}.
    pub fn star_points(&self) -> Vec<Pos> {
        let n = self.size;
        if n < 8 {
            return Vec::new();
        }
        let lines = [3, n / 2 + 1, n - 2];
        let mut pts = Vec::with_capacity(9);
        for &y in &lines {
            for &x in &lines {
                if self.in_bounds((x, y)) && !pts.contains(&(x, y)) {
                    pts.push((x, y));
                }
            }
        }
        pts
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_SIZE)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            write!(f, "{:>2} ", self.size - y)?;
            for x in 0..self.size {
                let ch = match self.get((x, y)) {
                    Some(Player::Black) => 'X',
                    Some(Player::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for x in 0..self.size {
            write!(f, "{} ", col_letter(x))?;
        }
        writeln!(f)
    }
}

/// Column letter for index `x`, skipping 'I' in the Go tradition.
fn col_letter(x: usize) -> char {
    let mut c = b'A' + x as u8;
    if c >= b'I' {
        c += 1;
    }
    c as char
}

/// Parse a coordinate like `D4` or `g11` into a 0-indexed position.
/// Row 1 is the bottom of the printed board. Returns `None` for malformed
/// or out-of-range input.
pub fn parse_coord(board: &Board, s: &str) -> Option<Pos> {
    let s = s.trim();
    let mut chars = s.chars();
    let col_char = chars.next()?.to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == 'I' {
        return None;
    }
    let mut x = (col_char as u8 - b'A') as usize;
    if col_char > 'I' {
        x -= 1;
    }
    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 || row > board.size() || x >= board.size() {
        return None;
    }
    Some((x, board.size() - row))
}

/// Format a position as a coordinate string, inverse of [`parse_coord`].
pub fn str_coord(board: &Board, (x, y): Pos) -> String {
    format!("{}{}", col_letter(x), board.size() - y)
}
