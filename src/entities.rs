/// All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GamePhase {
    Running,
    Over,
}

/// Fixed size of the play area, in playfield units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

// ── Avatar & falling objects ─────────────────────────────────────────────────

/// The pointer-driven catcher.  `y` and `radius` never change for a session;
/// only `x` is written, by the input side.
#[derive(Clone, Debug, PartialEq)]
pub struct Avatar {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// A coin dropping through the playfield.  `radius` and `speed` are fixed
/// when it spawns.
#[derive(Clone, Debug, PartialEq)]
pub struct FallingObject {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Units moved per tick before the difficulty multiplier is applied.
    pub speed: f64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub avatar: Avatar,
    /// Active set: coins still in play.  Order carries no meaning.
    pub objects: Vec<FallingObject>,
    pub score: u32,
    /// Best score seen this process; only ever raised at the game-over transition.
    pub high_score: u32,
    /// Always `difficulty_multiplier(score)`.
    pub multiplier: f64,
    pub phase: GamePhase,
    pub frame: u64,
    pub playfield: Playfield,
}

/// What the presentation side reads after each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub high_score: u32,
    pub is_over: bool,
}
