//! Move selection engine.
//!
//! Each difficulty tier is a declarative ordered list of tactics; picking a
//! move walks the list and takes the first tactic that produces a position.
//! Stronger tiers are built by prefixing new tactics onto the next tier
//! down, so every tier inherits its fallbacks. Before any tier-specific
//! tactic runs, a shared pre-check takes an immediate win or blocks an
//! immediate loss, so even the weakest tiers never miss a five.

use std::fmt;
use std::str::FromStr;

use fastrand::Rng;

use crate::board::{Board, Player, Pos};
use crate::strategy::{
    self, CenterFallback, center_opening, center_weighted_random, good_shape, strategic_advanced,
    strategic_basic, uniform_random,
};
use crate::tactics;
use crate::win::winning_line;

/// Playing strength of the computer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
    Master,
    UltraMaster,
}

impl Difficulty {
    pub const ALL: [Difficulty; 6] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
        Difficulty::Master,
        Difficulty::UltraMaster,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
            Difficulty::Master => "master",
            Difficulty::UltraMaster => "ultra-master",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = std::convert::Infallible;

    /// Parses a tier name, case-insensitively and ignoring `-`/`_`.
    /// Unrecognized names fall back to `Medium`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Ok(match key.as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            "expert" => Difficulty::Expert,
            "master" => Difficulty::Master,
            "ultramaster" => Difficulty::UltraMaster,
            _ => Difficulty::Medium,
        })
    }
}

/// Which side a pattern tactic plays for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    /// Extend the computer's own patterns.
    Attack,
    /// Disrupt the opponent's patterns.
    Defense,
}

/// One step of a difficulty cascade.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tactic {
    CenterOpening(CenterFallback),
    WinNow,
    BlockNow,
    DoubleThreat,
    ThreeThreeBlock,
    FourThreeBlock,
    FourCompletion(Role),
    HiddenFour,
    OpenThree(Role),
    ThreeExtension(Role),
    TwoExtension,
    PotentialOpenThree,
    DoubleTwo,
    PairExtension(Role),
    StrategicBasic,
    StrategicAdvanced,
    GoodShape,
    CenterWeightedRandom,
    UniformRandom,
}

/// The ordered tactic list consulted by `tier`, strongest first.
pub fn tactic_sequence(tier: Difficulty) -> Vec<Tactic> {
    use Role::{Attack, Defense};
    use Tactic::*;

    match tier {
        Difficulty::Easy => vec![UniformRandom],
        Difficulty::Medium => vec![
            CenterOpening(CenterFallback::None),
            CenterWeightedRandom,
        ],
        Difficulty::Hard => {
            let mut seq = vec![PairExtension(Attack), PairExtension(Defense)];
            seq.extend(tactic_sequence(Difficulty::Medium));
            seq
        }
        Difficulty::Expert => {
            let mut seq = vec![
                CenterOpening(CenterFallback::None),
                FourCompletion(Attack),
                FourCompletion(Defense),
                OpenThree(Attack),
                OpenThree(Defense),
                ThreeExtension(Attack),
                ThreeExtension(Defense),
                TwoExtension,
                StrategicBasic,
            ];
            seq.extend(tactic_sequence(Difficulty::Hard));
            seq
        }
        Difficulty::Master => {
            let mut seq = vec![
                CenterOpening(CenterFallback::Orthogonal),
                WinNow,
                BlockNow,
                ThreeThreeBlock,
                FourCompletion(Attack),
                FourCompletion(Defense),
                OpenThree(Attack),
                OpenThree(Defense),
                ThreeExtension(Attack),
                ThreeExtension(Defense),
                TwoExtension,
                StrategicBasic,
            ];
            seq.extend(tactic_sequence(Difficulty::Hard));
            seq
        }
        Difficulty::UltraMaster => {
            let mut seq = vec![
                CenterOpening(CenterFallback::AllNeighbors),
                WinNow,
                BlockNow,
                DoubleThreat,
                ThreeThreeBlock,
                FourThreeBlock,
                FourCompletion(Attack),
                FourCompletion(Defense),
                HiddenFour,
                OpenThree(Attack),
                OpenThree(Defense),
                ThreeExtension(Attack),
                ThreeExtension(Defense),
                TwoExtension,
                PotentialOpenThree,
                DoubleTwo,
                StrategicAdvanced,
                GoodShape,
            ];
            seq.extend(tactic_sequence(Difficulty::Master));
            seq
        }
    }
}

/// State of the game after a stone lands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Continue,
    Win { winner: Player, line: Vec<Pos> },
    Draw,
}

/// Result of asking the computer for a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Placed { pos: Pos, status: GameStatus },
    /// No empty cell was left to play.
    Draw,
}

/// Status of the game after the stone at `pos` was placed.
pub fn move_completed(board: &Board, pos: Pos) -> GameStatus {
    if let Some(player) = board.get(pos) {
        if let Some(line) = winning_line(board, pos) {
            return GameStatus::Win {
                winner: player,
                line,
            };
        }
    }
    if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::Continue
    }
}

/// The computer player: a seedable RNG plus the color it plays.
pub struct Engine {
    rng: Rng,
    computer: Player,
}

impl Engine {
    pub fn new(computer: Player) -> Self {
        Self {
            rng: Rng::new(),
            computer,
        }
    }

    /// Deterministic engine for reproducible games and tests.
    pub fn with_seed(computer: Player, seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
            computer,
        }
    }

    pub fn player(&self) -> Player {
        self.computer
    }

    /// Picks a cell for the computer without placing it.
    pub fn choose(&mut self, board: &mut Board, tier: Difficulty) -> Option<Pos> {
        if board.is_full() {
            return None;
        }
        // Shared pre-check: win on the spot, else deny the opponent's win.
        if let Some(p) = tactics::immediate_win(board, self.computer) {
            return Some(p);
        }
        if let Some(p) = tactics::immediate_win(board, self.computer.opponent()) {
            return Some(p);
        }
        for tactic in tactic_sequence(tier) {
            if let Some(p) = self.run_tactic(board, tactic) {
                return Some(p);
            }
        }
        // The medium fallback covers every tier above easy, and easy's
        // uniform draw covers any non-full board, so this is a last resort.
        uniform_random(board, &mut self.rng)
    }

    /// Picks and places a move, reporting the resulting game status.
    pub fn computer_move(&mut self, board: &mut Board, tier: Difficulty) -> TurnOutcome {
        let Some(pos) = self.choose(board, tier) else {
            return TurnOutcome::Draw;
        };
        if board.place(pos, self.computer).is_err() {
            // Tactics only return empty in-bounds cells.
            return TurnOutcome::Draw;
        }
        TurnOutcome::Placed {
            pos,
            status: move_completed(board, pos),
        }
    }

    fn role_player(&self, role: Role) -> Player {
        match role {
            Role::Attack => self.computer,
            Role::Defense => self.computer.opponent(),
        }
    }

    fn run_tactic(&mut self, board: &mut Board, tactic: Tactic) -> Option<Pos> {
        let me = self.computer;
        let opp = me.opponent();
        match tactic {
            Tactic::CenterOpening(fallback) => center_opening(board, fallback),
            Tactic::WinNow => tactics::immediate_win(board, me),
            Tactic::BlockNow => tactics::immediate_win(board, opp),
            Tactic::DoubleThreat => tactics::double_open_three_spot(board, me),
            Tactic::ThreeThreeBlock => tactics::double_open_three_spot(board, opp),
            Tactic::FourThreeBlock => tactics::four_three_spot(board, opp),
            Tactic::FourCompletion(role) => {
                tactics::four_completion(board, self.role_player(role), &mut self.rng)
            }
            Tactic::HiddenFour => tactics::hidden_four(board, me),
            Tactic::OpenThree(role) => {
                tactics::open_three(board, self.role_player(role), &mut self.rng)
            }
            Tactic::ThreeExtension(role) => {
                tactics::three_extension(board, self.role_player(role), &mut self.rng)
            }
            Tactic::TwoExtension => tactics::two_extension(board, me, &mut self.rng),
            Tactic::PotentialOpenThree => tactics::potential_open_three(board, me),
            Tactic::DoubleTwo => tactics::double_two(board, me),
            Tactic::PairExtension(role) => {
                tactics::pair_extension(board, self.role_player(role))
            }
            Tactic::StrategicBasic => strategic_basic(board, me, &mut self.rng),
            Tactic::StrategicAdvanced => strategic_advanced(board, me, &mut self.rng),
            Tactic::GoodShape => good_shape(board, me, &mut self.rng),
            Tactic::CenterWeightedRandom => center_weighted_random(board, &mut self.rng),
            Tactic::UniformRandom => strategy::uniform_random(board, &mut self.rng),
        }
    }
}
