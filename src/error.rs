use thiserror::Error;

/// Smallest terminal the game will draw into.
pub const MIN_COLS: u16 = 20;
pub const MIN_ROWS: u16 = 10;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("stdout is not a terminal")]
    NotATerminal,
    #[error(
        "terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}",
        min_cols = MIN_COLS,
        min_rows = MIN_ROWS
    )]
    SurfaceTooSmall { cols: u16, rows: u16 },
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Decide whether the drawing surface is usable.  Runs before any terminal
/// state is changed; on error the frame loop must not start.
pub fn check_surface(is_tty: bool, cols: u16, rows: u16) -> Result<(), GameError> {
    if !is_tty {
        return Err(GameError::NotATerminal);
    }
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(GameError::SurfaceTooSmall { cols, rows });
    }
    Ok(())
}
