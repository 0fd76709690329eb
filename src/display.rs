//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! world state. No game logic is performed; this module only translates
//! state into terminal commands, scaling canvas units down to cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_invaders::compute::{bullet_rect, enemy_rect, player_rect};
use space_invaders::entities::{GameStatus, WorldState};
use space_invaders::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────
// Two semantic families: the player and its bullets, the enemies and theirs.

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Blue;
const C_BULLET_PLAYER: Color = Color::Yellow;
const C_ENEMY: Color = Color::Red;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── World-to-cell projection ──────────────────────────────────────────────────

/// Maps canvas-unit rectangles into the bordered playfield cell area:
/// columns 1..cols-1, rows 2..rows-2. Row 0 is the HUD, row 1 the top
/// border, and the two bottom rows the border and the controls hint.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(cols: u16, rows: u16, state: &WorldState) -> Viewport {
        let inner_w = cols.saturating_sub(2).max(1) as f32;
        let inner_h = rows.saturating_sub(4).max(1) as f32;
        Viewport {
            cols,
            rows,
            sx: inner_w / state.width.max(1.0),
            sy: inner_h / state.height.max(1.0),
        }
    }

    /// Project a world rect to (col, row, width, height) in cells. Every
    /// entity keeps at least one cell so 4-unit bullets stay visible.
    fn project(&self, rect: &Rect) -> (u16, u16, u16, u16) {
        let col = (1 + (rect.x * self.sx) as u16).min(self.cols.saturating_sub(2));
        let row = (2 + (rect.y * self.sy) as u16).min(self.rows.saturating_sub(3));
        let width = ((rect.width * self.sx) as u16).max(1);
        let height = ((rect.height * self.sy) as u16).max(1);
        (col, row, width, height)
    }
}

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    color: Color,
) -> std::io::Result<()> {
    let (col, row, width, height) = view.project(rect);
    out.queue(style::SetForegroundColor(color))?;
    for dy in 0..height {
        let r = row + dy;
        if r >= view.rows.saturating_sub(2) {
            break;
        }
        let clipped = width.min(view.cols.saturating_sub(1).saturating_sub(col));
        if clipped == 0 {
            continue;
        }
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print("█".repeat(clipped as usize)))?;
    }
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame from an immutable state snapshot.
pub fn render<W: Write>(out: &mut W, state: &WorldState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cols, rows, state);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, state, cols)?;
    draw_border(out, cols, rows)?;

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        fill_rect(out, &view, &enemy_rect(enemy), C_ENEMY)?;
    }
    for bullet in &state.enemy_bullets {
        fill_rect(out, &view, &bullet_rect(bullet), C_BULLET_ENEMY)?;
    }
    for bullet in &state.player_bullets {
        fill_rect(out, &view, &bullet_rect(bullet), C_BULLET_PLAYER)?;
    }
    fill_rect(out, &view, &player_rect(&state.player), C_PLAYER)?;

    draw_controls_hint(out, rows)?;

    if let Some(message) = state.message {
        draw_round_end(out, state, message, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &WorldState, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;

    let hearts: String = "♥".repeat(state.lives as usize);
    let lives_str = format!("Lives:{}", hearts);
    let rx = cols.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let w = cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   R : Restart   Q : Quit"))?;
    Ok(())
}

// ── Round-end overlay ─────────────────────────────────────────────────────────

fn draw_round_end<W: Write>(
    out: &mut W,
    state: &WorldState,
    message: &str,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let box_color = match state.status {
        GameStatus::Victory => Color::Green,
        _ => Color::Red,
    };

    let inner = format!("   {}   ", message);
    let top = format!("╔{}╗", "═".repeat(inner.chars().count()));
    let mid = format!("║{}║", inner);
    let bottom = format!("╚{}╝", "═".repeat(inner.chars().count()));
    let score_line = format!("Final Score: {:>6}", state.score);
    let hint = "R - Play Again  Q - Quit";

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(3);

    for (i, line) in [&top, &mid, &bottom].iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(box_color))?;
        out.queue(Print(line.as_str()))?;
    }

    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + 3))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + 4))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
