//! All game entity types and fixed dimensions. Pure data, no logic.

// ── Entity dimensions & speeds (canvas units) ─────────────────────────────────

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 30.0;
/// Horizontal units the player moves per frame while a direction is held.
pub const PLAYER_SPEED: f32 = 5.0;

pub const ENEMY_WIDTH: f32 = 30.0;
pub const ENEMY_HEIGHT: f32 = 25.0;
pub const ENEMY_ROWS: usize = 5;
pub const ENEMY_COLS: usize = 10;

pub const BULLET_WIDTH: f32 = 4.0;
pub const BULLET_HEIGHT: f32 = 10.0;
/// Per-frame vertical delta of a player bullet (negative is upward).
pub const PLAYER_BULLET_SPEED: f32 = 5.0;
/// Per-frame vertical delta of an enemy bullet (positive is downward).
pub const ENEMY_BULLET_SPEED: f32 = 3.0;

pub const STARTING_LIVES: u32 = 3;

// ── Status & input ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Victory,
}

/// Snapshot of the directions currently held, taken once per frame by the
/// input layer. Shooting is edge-triggered and does not appear here.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
}

/// One slot of the enemy grid. Killed enemies are kept with `alive = false`
/// so grid indices stay stable; movement, shooting, collision and rendering
/// all skip dead entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub alive: bool,
}

/// Shared shape for player and enemy bullets. `vy` is the vertical delta
/// applied each frame: negative for player bullets, positive for enemy ones.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire world state. Cloneable so pure update functions can return a
/// new copy without mutating the original; there are no ambient globals.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldState {
    pub player: Player,
    /// Fixed `ENEMY_ROWS` x `ENEMY_COLS` grid for the lifetime of a round.
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    /// Linear difficulty scalar. Constant 1 for now; movement and shoot
    /// cadence are computed from it.
    pub game_speed: u32,
    /// Horizontal sweep direction of the formation, +1.0 or -1.0.
    pub enemy_direction: f32,
    /// Horizontal units the formation shifts per movement step.
    pub enemy_speed: f32,
    /// Frames since the formation last moved.
    pub move_timer: u32,
    /// Frames since an enemy last fired.
    pub shoot_timer: u32,
    /// One-shot end-of-round text for the presentation layer; set exactly
    /// at the Playing -> GameOver / Victory transition, cleared on reset.
    pub message: Option<&'static str>,
    /// Logical canvas size, supplied by the presentation layer.
    pub width: f32,
    pub height: f32,
}
