//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `WorldState` (and, where needed, an RNG handle) and returns a brand-new
//! `WorldState`. Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{
    Bullet, Enemy, GameStatus, InputState, Player, WorldState, BULLET_HEIGHT, BULLET_WIDTH,
    ENEMY_BULLET_SPEED, ENEMY_COLS, ENEMY_HEIGHT, ENEMY_ROWS, ENEMY_WIDTH, PLAYER_BULLET_SPEED,
    PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH, STARTING_LIVES,
};
use crate::geometry::{overlaps, Rect};

// ── Cadence & scoring tables ─────────────────────────────────────────────────

/// Frames between formation movement steps.
fn enemy_move_interval(game_speed: u32) -> u32 {
    60 - game_speed * 5
}

/// Frames between enemy shots.
fn enemy_shoot_interval(game_speed: u32) -> u32 {
    120 - game_speed * 10
}

/// Score awarded per enemy destroyed.
const KILL_SCORE: u32 = 10;

pub const GAME_OVER_MESSAGE: &str = "GAME OVER!";
pub const VICTORY_MESSAGE: &str = "YOU WIN!";

// ── Formation layout ─────────────────────────────────────────────────────────

/// Vertical units the whole formation descends after touching an edge.
const ENEMY_DESCENT: f32 = 20.0;
/// Top edge of the first enemy row.
const ENEMY_START_Y: f32 = 80.0;
const ENEMY_ROW_SPACING: f32 = 40.0;
/// Column spacing cap; narrow canvases shrink below it.
const ENEMY_COL_SPACING_MAX: f32 = 50.0;
/// Horizontal canvas margin the grid never spreads into.
const GRID_SIDE_MARGIN: f32 = 100.0;

/// Vertical offset of the player's top edge from the canvas bottom.
const PLAYER_BOTTOM_OFFSET: f32 = 50.0;

// ── Bounding boxes ───────────────────────────────────────────────────────────

pub fn player_rect(player: &Player) -> Rect {
    Rect {
        x: player.x,
        y: player.y,
        width: PLAYER_WIDTH,
        height: PLAYER_HEIGHT,
    }
}

pub fn enemy_rect(enemy: &Enemy) -> Rect {
    Rect {
        x: enemy.x,
        y: enemy.y,
        width: ENEMY_WIDTH,
        height: ENEMY_HEIGHT,
    }
}

pub fn bullet_rect(bullet: &Bullet) -> Rect {
    Rect {
        x: bullet.x,
        y: bullet.y,
        width: BULLET_WIDTH,
        height: BULLET_HEIGHT,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Lay out a fresh, fully-alive enemy grid. The layout is a pure function
/// of the canvas width: columns are spaced `min(50, (width - 100) / 10)`
/// apart and the grid as a whole is centered.
pub fn create_enemies(width: f32) -> Vec<Enemy> {
    let spacing = ENEMY_COL_SPACING_MAX.min((width - GRID_SIDE_MARGIN) / ENEMY_COLS as f32);
    let start_x = (width - ENEMY_COLS as f32 * spacing) / 2.0;

    let mut enemies = Vec::with_capacity(ENEMY_ROWS * ENEMY_COLS);
    for row in 0..ENEMY_ROWS {
        for col in 0..ENEMY_COLS {
            enemies.push(Enemy {
                x: start_x + col as f32 * spacing,
                y: ENEMY_START_Y + row as f32 * ENEMY_ROW_SPACING,
                alive: true,
            });
        }
    }
    enemies
}

/// Build the initial world state for a given canvas size.
pub fn init_state(width: f32, height: f32) -> WorldState {
    WorldState {
        player: Player {
            x: width / 2.0 - PLAYER_WIDTH / 2.0,
            y: height - PLAYER_BOTTOM_OFFSET,
        },
        enemies: create_enemies(width),
        player_bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        score: 0,
        lives: STARTING_LIVES,
        status: GameStatus::Playing,
        game_speed: 1,
        enemy_direction: 1.0,
        enemy_speed: 1.0,
        move_timer: 0,
        shoot_timer: 0,
        message: None,
        width,
        height,
    }
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Fire a bullet from the player's midpoint. No-op outside `Playing`.
pub fn player_shoot(state: &WorldState) -> WorldState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let mut player_bullets = state.player_bullets.clone();
    player_bullets.push(spawn_player_bullet(&state.player));
    WorldState {
        player_bullets,
        ..state.clone()
    }
}

/// Start a fresh round on the current canvas: score zeroed, lives and the
/// enemy grid restored, bullet containers emptied, message cleared.
pub fn reset(state: &WorldState) -> WorldState {
    init_state(state.width, state.height)
}

/// Adopt a new canvas size: the player is re-centered, and while a round is
/// in progress the enemy grid is regenerated for the new width. Score,
/// lives, bullets and timers carry over.
pub fn resize(state: &WorldState, width: f32, height: f32) -> WorldState {
    let player = Player {
        x: width / 2.0 - PLAYER_WIDTH / 2.0,
        y: height - PLAYER_BOTTOM_OFFSET,
    };
    let enemies = if state.status == GameStatus::Playing {
        create_enemies(width)
    } else {
        state.enemies.clone()
    };
    WorldState {
        player,
        enemies,
        width,
        height,
        ..state.clone()
    }
}

// ── Projectile subsystem ─────────────────────────────────────────────────────

/// A player bullet, centered on the player's horizontal midpoint and
/// starting at the player's top edge, moving upward.
pub fn spawn_player_bullet(player: &Player) -> Bullet {
    Bullet {
        x: player.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
        y: player.y,
        vy: -PLAYER_BULLET_SPEED,
    }
}

/// A downward bullet from a uniformly-chosen alive enemy, or `None` when
/// the grid has no alive enemies left.
pub fn spawn_enemy_bullet(enemies: &[Enemy], rng: &mut impl Rng) -> Option<Bullet> {
    let alive: Vec<&Enemy> = enemies.iter().filter(|e| e.alive).collect();
    if alive.is_empty() {
        return None;
    }
    let shooter = alive[rng.gen_range(0..alive.len())];
    Some(Bullet {
        x: shooter.x + ENEMY_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
        y: shooter.y + ENEMY_HEIGHT,
        vy: ENEMY_BULLET_SPEED,
    })
}

/// Advance every bullet by its own vertical velocity, keeping only the
/// survivors still inside the canvas's vertical bounds.
pub fn advance_bullets(bullets: &[Bullet], height: f32) -> Vec<Bullet> {
    bullets
        .iter()
        .filter_map(|b| {
            let y = b.y + b.vy;
            if y < 0.0 || y > height {
                None
            } else {
                Some(Bullet { y, ..b.clone() })
            }
        })
        .collect()
}

// ── Enemy formation subsystem ────────────────────────────────────────────────

/// One formation movement step: either the whole alive set shifts
/// horizontally, or, when any alive enemy touched an edge while sweeping
/// toward it, the whole alive set descends and the direction flips with no
/// horizontal movement that step. Returns the moved grid and the new
/// direction. The edge scan uses the pre-move positions; dead enemies take
/// no part in either phase.
pub fn step_formation(
    enemies: &[Enemy],
    direction: f32,
    speed: f32,
    width: f32,
) -> (Vec<Enemy>, f32) {
    let hit_edge = enemies.iter().any(|e| {
        e.alive
            && ((e.x <= 0.0 && direction < 0.0)
                || (e.x + ENEMY_WIDTH >= width && direction > 0.0))
    });

    let moved: Vec<Enemy> = enemies
        .iter()
        .map(|e| {
            if !e.alive {
                e.clone()
            } else if hit_edge {
                Enemy {
                    y: e.y + ENEMY_DESCENT,
                    ..e.clone()
                }
            } else {
                Enemy {
                    x: e.x + direction * speed,
                    ..e.clone()
                }
            }
        })
        .collect();

    let direction = if hit_edge { -direction } else { direction };
    (moved, direction)
}

// ── Collision & outcome evaluator ────────────────────────────────────────────

/// Cross-check projectiles against their targets, apply damage and score,
/// and decide win/loss. Evaluation order: player bullets vs enemies, enemy
/// bullets vs player, formation overrun, then victory.
pub fn resolve_collisions(state: &WorldState) -> WorldState {
    let mut enemies = state.enemies.clone();
    let mut score = state.score;
    let mut lives = state.lives;
    let mut status = state.status.clone();
    let mut message = state.message;

    // ── 1. Player bullets vs enemies ─────────────────────────────────────────
    // A bullet kills at most one enemy (first alive hit in grid order) and
    // is consumed by the kill; the rest survive into the next frame.
    let mut player_bullets = Vec::with_capacity(state.player_bullets.len());
    for bullet in &state.player_bullets {
        let rect = bullet_rect(bullet);
        let mut consumed = false;
        for enemy in enemies.iter_mut() {
            if enemy.alive && overlaps(&rect, &enemy_rect(enemy)) {
                enemy.alive = false;
                score += KILL_SCORE;
                consumed = true;
                break;
            }
        }
        if !consumed {
            player_bullets.push(bullet.clone());
        }
    }

    // ── 2. Enemy bullets vs player ───────────────────────────────────────────
    let player_box = player_rect(&state.player);
    let mut enemy_bullets = Vec::with_capacity(state.enemy_bullets.len());
    for bullet in &state.enemy_bullets {
        if overlaps(&bullet_rect(bullet), &player_box) {
            lives = lives.saturating_sub(1);
            if lives == 0 {
                status = GameStatus::GameOver;
                message = Some(GAME_OVER_MESSAGE);
            }
        } else {
            enemy_bullets.push(bullet.clone());
        }
    }

    // ── 3. Formation overrun ─────────────────────────────────────────────────
    // Any alive enemy whose bottom edge reaches the player's row ends the
    // round, regardless of horizontal position or remaining lives.
    if enemies
        .iter()
        .any(|e| e.alive && e.y + ENEMY_HEIGHT >= state.player.y)
    {
        status = GameStatus::GameOver;
        message = Some(GAME_OVER_MESSAGE);
    }

    // ── 4. Victory ───────────────────────────────────────────────────────────
    if !enemies.iter().any(|e| e.alive) {
        status = GameStatus::Victory;
        message = Some(VICTORY_MESSAGE);
    }

    WorldState {
        enemies,
        player_bullets,
        enemy_bullets,
        score,
        lives,
        status,
        message,
        ..state.clone()
    }
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// Advance the simulation by one frame: player movement from the held-key
/// snapshot, formation cadence, enemy fire cadence, projectile advancement,
/// then collision resolution. Returns the state untouched once a terminal
/// status holds, so the end-of-round message fires exactly once.
pub fn update(state: &WorldState, input: &InputState, rng: &mut impl Rng) -> WorldState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    // ── 1. Player movement, clamped to the canvas ────────────────────────────
    let mut player = state.player.clone();
    if input.move_left {
        player.x = (player.x - PLAYER_SPEED).max(0.0);
    }
    if input.move_right {
        player.x = (player.x + PLAYER_SPEED).min(state.width - PLAYER_WIDTH);
    }

    // ── 2. Formation sweep on its cadence ────────────────────────────────────
    let mut enemies = state.enemies.clone();
    let mut enemy_direction = state.enemy_direction;
    let mut move_timer = state.move_timer + 1;
    if move_timer >= enemy_move_interval(state.game_speed) {
        let (stepped, flipped) =
            step_formation(&enemies, enemy_direction, state.enemy_speed, state.width);
        enemies = stepped;
        enemy_direction = flipped;
        move_timer = 0;
    }

    // ── 3. Enemy fire on its cadence ─────────────────────────────────────────
    let mut enemy_bullets = state.enemy_bullets.clone();
    let mut shoot_timer = state.shoot_timer + 1;
    if shoot_timer >= enemy_shoot_interval(state.game_speed) {
        if let Some(bullet) = spawn_enemy_bullet(&enemies, rng) {
            enemy_bullets.push(bullet);
        }
        shoot_timer = 0;
    }

    // ── 4. Advance projectiles, pruning off-screen bullets ───────────────────
    let player_bullets = advance_bullets(&state.player_bullets, state.height);
    let enemy_bullets = advance_bullets(&enemy_bullets, state.height);

    let moved = WorldState {
        player,
        enemies,
        player_bullets,
        enemy_bullets,
        enemy_direction,
        move_timer,
        shoot_timer,
        ..state.clone()
    };

    // ── 5. Collisions & win/loss ─────────────────────────────────────────────
    resolve_collisions(&moved)
}
