/// Mapping between terminal cells and playfield units.
///
/// The terminal screen is laid out as:
///   row 0        — HUD
///   row 1        — top border
///   rows 2..h-2  — play area
///   row h-2      — bottom border
///   row h-1      — controls hint
/// with one border column on each side.  The play area is stretched to cover
/// the whole playfield, so one cell spans `scale_x` × `scale_y` units.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::entities::Playfield;

/// Rows used by HUD, borders and hint.
const CHROME_ROWS: u16 = 4;
/// Columns used by the side borders.
const CHROME_COLS: u16 = 2;

pub const PLAY_AGAIN_LABEL: &str = "[ Play Again ]";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Screen column of the first play-area cell.
    pub left: u16,
    /// Screen row of the first play-area cell.
    pub top: u16,
    pub cols: u16,
    pub rows: u16,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Viewport {
    /// Fit the playfield into a terminal of `term_cols` × `term_rows`.
    pub fn fit(term_cols: u16, term_rows: u16, playfield: &Playfield) -> Self {
        let cols = term_cols.saturating_sub(CHROME_COLS).max(1);
        let rows = term_rows.saturating_sub(CHROME_ROWS).max(1);
        Viewport {
            left: 1,
            top: 2,
            cols,
            rows,
            scale_x: playfield.width / f64::from(cols),
            scale_y: playfield.height / f64::from(rows),
        }
    }

    /// Playfield-local x for a pointer at screen `column`: the surface origin
    /// is subtracted, then the cell centre is scaled.  Not clamped, so
    /// pointing at the border yields x outside `[0, width)`.
    pub fn pointer_x(&self, column: u16) -> f64 {
        (f64::from(column) - f64::from(self.left) + 0.5) * self.scale_x
    }

    /// Screen cell holding the playfield point, if it is visible.
    pub fn to_cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.scale_x).floor();
        let row = (y / self.scale_y).floor();
        if col >= f64::from(self.cols) || row >= f64::from(self.rows) {
            return None;
        }
        Some((self.left + col as u16, self.top + row as u16))
    }

    /// Playfield coordinates of a screen cell's centre.
    pub fn cell_center(&self, col: u16, row: u16) -> (f64, f64) {
        (
            (f64::from(col) - f64::from(self.left) + 0.5) * self.scale_x,
            (f64::from(row) - f64::from(self.top) + 0.5) * self.scale_y,
        )
    }
}

/// A one-row clickable strip of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
}

impl CellRect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        row == self.row && col >= self.col && col < self.col + self.width
    }
}

/// Where the "Play Again" button sits on the game-over panel.  Shared by the
/// renderer and the click handler so they always agree.
pub fn play_again_button(term_cols: u16, term_rows: u16) -> CellRect {
    let width = PLAY_AGAIN_LABEL.chars().count() as u16;
    CellRect {
        col: (term_cols / 2).saturating_sub(width / 2),
        row: (term_rows / 2) + 2,
        width,
    }
}

// ── Per-frame event folding ───────────────────────────────────────────────────

/// Everything the input side wrote since the previous tick.  Events are
/// folded in arrival order; the pointer is mapped only once all of them are
/// in, so it always uses the final terminal size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameInput {
    pub cols: u16,
    pub rows: u16,
    /// Last pointer column seen; last write wins.
    pub pointer_column: Option<u16>,
    /// Last left-button press.
    pub click: Option<(u16, u16)>,
    pub reset: bool,
    pub quit: bool,
}

impl FrameInput {
    pub fn new(cols: u16, rows: u16) -> Self {
        FrameInput {
            cols,
            rows,
            pointer_column: None,
            click: None,
            reset: false,
            quit: false,
        }
    }

    pub fn apply(&mut self, event: Event) {
        match event {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Moved | MouseEventKind::Drag(_),
                column,
                ..
            }) => self.pointer_column = Some(column),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => self.click = Some((column, row)),
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    self.quit = true
                }
                KeyCode::Char('r') | KeyCode::Char('R') => self.reset = true,
                _ => {}
            },
            Event::Resize(cols, rows) => {
                self.cols = cols;
                self.rows = rows;
            }
            _ => {}
        }
    }

    pub fn viewport(&self, playfield: &Playfield) -> Viewport {
        Viewport::fit(self.cols, self.rows, playfield)
    }

    /// Playfield x of the last pointer position, mapped with the final size.
    pub fn pointer_x(&self, playfield: &Playfield) -> Option<f64> {
        let view = self.viewport(playfield);
        self.pointer_column.map(|column| view.pointer_x(column))
    }

    /// A restart was asked for, by key or by clicking the button.
    pub fn wants_reset(&self) -> bool {
        let button = play_again_button(self.cols, self.rows);
        self.reset || self.click.is_some_and(|(col, row)| button.contains(col, row))
    }
}
