/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{Avatar, FallingObject, GamePhase, GameState, Playfield, Scoreboard};

// ── Tuning ───────────────────────────────────────────────────────────────────

pub const AVATAR_RADIUS: f64 = 20.0;
/// Distance from the bottom edge to the avatar centre.
pub const AVATAR_BOTTOM_OFFSET: f64 = 30.0;

pub const BASE_SPAWN_PROBABILITY: f64 = 0.02;
/// Spawn height: just above the visible top edge.
pub const SPAWN_Y: f64 = -20.0;
pub const COIN_RADIUS: f64 = 10.0;
pub const BASE_MIN_SPEED: f64 = 2.0;
pub const SPEED_JITTER: f64 = 2.0;

/// Points needed per difficulty step, and the multiplier gained per step.
const SCORE_PER_STEP: u32 = 10;
const MULTIPLIER_STEP: f64 = 0.1;

// ── Difficulty ───────────────────────────────────────────────────────────────

/// Speed/spawn multiplier for a score: `1.0 + floor(score / 10) * 0.1`.
///
/// Always derived from the score, never accumulated.
pub fn difficulty_multiplier(score: u32) -> f64 {
    1.0 + f64::from(score / SCORE_PER_STEP) * MULTIPLIER_STEP
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// One Bernoulli trial per tick.  Returns the new coin; inserting it into the
/// active set is up to the caller.
pub fn maybe_spawn(
    multiplier: f64,
    playfield_width: f64,
    rng: &mut impl Rng,
) -> Option<FallingObject> {
    if rng.gen::<f64>() >= BASE_SPAWN_PROBABILITY * multiplier {
        return None;
    }
    Some(FallingObject {
        x: rng.gen_range(0.0..playfield_width),
        y: SPAWN_Y,
        radius: COIN_RADIUS,
        speed: rng.gen_range(BASE_MIN_SPEED..BASE_MIN_SPEED + SPEED_JITTER),
    })
}

// ── Physics / collision ──────────────────────────────────────────────────────

/// Result of moving every active coin by one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Survivors, already displaced.
    pub objects: Vec<FallingObject>,
    pub score_delta: u32,
    pub game_over: bool,
}

/// Strict overlap: touching circles do not collide.
pub fn overlaps(avatar: &Avatar, object: &FallingObject) -> bool {
    let distance = (avatar.x - object.x).hypot(avatar.y - object.y);
    distance < avatar.radius + object.radius
}

/// True once the whole coin is below the bottom edge.
pub fn passed_bottom(object: &FallingObject, playfield: &Playfield) -> bool {
    object.y > playfield.height + object.radius
}

/// Move every coin, collect the caught ones and report whether any coin
/// escaped.  Each coin is evaluated exactly once; a caught coin is never
/// checked against the bottom edge.
pub fn advance(
    avatar: &Avatar,
    objects: &[FallingObject],
    multiplier: f64,
    playfield: &Playfield,
) -> StepOutcome {
    let mut score_delta = 0;
    let mut game_over = false;

    let objects = objects
        .iter()
        .filter_map(|o| {
            let moved = FallingObject {
                y: o.y + o.speed * multiplier,
                ..o.clone()
            };
            if overlaps(avatar, &moved) {
                score_delta += 1;
                return None;
            }
            if passed_bottom(&moved, playfield) {
                game_over = true;
            }
            Some(moved)
        })
        .collect();

    StepOutcome {
        objects,
        score_delta,
        game_over,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh RUNNING session.  `high_score` carries over from earlier sessions.
pub fn init_state(playfield: Playfield, high_score: u32) -> GameState {
    GameState {
        avatar: Avatar {
            x: playfield.width / 2.0,
            y: playfield.height - AVATAR_BOTTOM_OFFSET,
            radius: AVATAR_RADIUS,
        },
        objects: Vec::new(),
        score: 0,
        high_score,
        multiplier: difficulty_multiplier(0),
        phase: GamePhase::Running,
        frame: 0,
        playfield,
    }
}

// ── Input / commands ─────────────────────────────────────────────────────────

/// Pointer write.  No clamping: the avatar may leave the playfield sideways.
/// Ignored while OVER, when nothing on the playfield moves.
pub fn move_avatar_to(state: &GameState, x: f64) -> GameState {
    if state.phase == GamePhase::Over {
        return state.clone();
    }
    GameState {
        avatar: Avatar {
            x,
            ..state.avatar.clone()
        },
        ..state.clone()
    }
}

/// OVER → RUNNING.  A fresh session that keeps only the best score.
/// Ignored while RUNNING.
pub fn reset(state: &GameState) -> GameState {
    if state.phase != GamePhase::Over {
        return state.clone();
    }
    log::info!("reset (best score {})", state.high_score);
    init_state(state.playfield, state.high_score)
}

pub fn scoreboard(state: &GameState) -> Scoreboard {
    Scoreboard {
        score: state.score,
        high_score: state.high_score,
        is_over: state.phase == GamePhase::Over,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A no-op while OVER.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.phase == GamePhase::Over {
        return state.clone();
    }
    let frame = state.frame + 1;

    // ── 1. Move, catch, detect escapes ───────────────────────────────────────
    let step = advance(&state.avatar, &state.objects, state.multiplier, &state.playfield);
    let score = state.score + step.score_delta;
    let multiplier = difficulty_multiplier(score);

    // ── 2. Escaped coin: freeze ──────────────────────────────────────────────
    if step.game_over {
        let high_score = state.high_score.max(score);
        log::info!("game over at frame {frame}: score {score}, best {high_score}");
        return GameState {
            objects: step.objects,
            score,
            high_score,
            multiplier,
            phase: GamePhase::Over,
            frame,
            ..state.clone()
        };
    }

    // ── 3. Spawn ─────────────────────────────────────────────────────────────
    let mut objects = step.objects;
    if let Some(coin) = maybe_spawn(state.multiplier, state.playfield.width, rng) {
        log::trace!("spawned coin at x={:.1} speed={:.2}", coin.x, coin.speed);
        objects.push(coin);
    }

    GameState {
        objects,
        score,
        multiplier,
        frame,
        ..state.clone()
    }
}
