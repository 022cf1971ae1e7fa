/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use coin_catcher::compute::scoreboard;
use coin_catcher::entities::GameState;
use coin_catcher::input::{play_again_button, Viewport, PLAY_AGAIN_LABEL};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::White;
const C_AVATAR: Color = Color::Blue;
const C_COIN: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

const AVATAR_GLYPH: &str = "█";
const COIN_GLYPH: &str = "●";

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame into a `cols` × `rows` terminal.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let view = Viewport::fit(cols, rows, &state.playfield);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, cols, rows)?;
    draw_hud(out, state, cols)?;

    for coin in &state.objects {
        draw_disc(out, &view, coin.x, coin.y, coin.radius, COIN_GLYPH, C_COIN)?;
    }
    let a = &state.avatar;
    draw_disc(out, &view, a.x, a.y, a.radius, AVATAR_GLYPH, C_AVATAR)?;

    draw_controls_hint(out, rows)?;

    if scoreboard(state).is_over {
        draw_game_over(out, state, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let w = cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, cols: u16) -> std::io::Result<()> {
    let board = scoreboard(state);

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", board.score)))?;

    let best = format!("High Score: {}", board.high_score);
    let bx = cols.saturating_sub(best.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(bx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_BEST))?;
    out.queue(Print(&best))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Fill every play-area cell whose centre lies inside the circle.  A circle
/// smaller than a cell still gets the cell under its centre.
fn draw_disc<W: Write>(
    out: &mut W,
    view: &Viewport,
    x: f64,
    y: f64,
    radius: f64,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;

    let c0 = ((x - radius) / view.scale_x).floor().max(0.0) as i64;
    let c1 = ((x + radius) / view.scale_x).floor().min(f64::from(view.cols) - 1.0) as i64;
    let r0 = ((y - radius) / view.scale_y).floor().max(0.0) as i64;
    let r1 = ((y + radius) / view.scale_y).floor().min(f64::from(view.rows) - 1.0) as i64;

    let mut drawn = false;
    for r in r0..=r1 {
        for c in c0..=c1 {
            let col = view.left + c as u16;
            let row = view.top + r as u16;
            let (cx, cy) = view.cell_center(col, row);
            if (cx - x).hypot(cy - y) < radius {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(glyph))?;
                drawn = true;
            }
        }
    }

    if !drawn {
        if let Some((col, row)) = view.to_cell(x, y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Mouse : Move   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let board = scoreboard(state);
    let score_line = format!("Final Score: {:>6}", board.score);
    let new_best = board.score > 0 && board.score >= board.high_score;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", board.high_score)
    } else {
        format!("High Score:  {:>6}", board.high_score)
    };

    let lines: [(&str, Color); 3] = [
        ("╔════════════════════╗", Color::Red),
        ("║     Game Over!     ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    // Laid out upwards from the button so the click target stays put
    let button = play_again_button(cols, rows);
    let cx = cols / 2;
    let start_row = button.row.saturating_sub(lines.len() as u16 + 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(best_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(if new_best {
        Color::Yellow
    } else {
        Color::DarkGrey
    }))?;
    out.queue(Print(&best_line))?;

    out.queue(cursor::MoveTo(button.col, button.row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(style::SetBackgroundColor(Color::Blue))?;
    out.queue(Print(PLAY_AGAIN_LABEL))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;

    let hint = "R - Play Again  Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, button.row + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    Ok(())
}
