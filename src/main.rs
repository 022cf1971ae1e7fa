mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use crossterm::{
    event::{self, Event},
    terminal,
    tty::IsTty,
};
use rand::thread_rng;

use coin_catcher::compute::{init_state, move_avatar_to, reset, scoreboard, tick};
use coin_catcher::config::{self, GameConfig};
use coin_catcher::error::{check_surface, GameError};
use coin_catcher::input::FrameInput;
use coin_catcher::scheduler::FrameLoop;
use coin_catcher::terminal::TerminalSession;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so log lines go to a file or nowhere.
fn init_logging(path: Option<&Path>) {
    let Some(path) = path else { return };
    match File::create(path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("cannot open log file {}: {}", path.display(), e),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drives one tick per frame until the player quits.
///
/// Input model: events are drained before every tick and folded into one
/// `FrameInput`, so tick N sees whatever was written before it began and
/// only the last pointer position counts.
fn run<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), GameError> {
    let mut rng = thread_rng();
    let mut state = init_state(config.playfield, 0);
    let (mut cols, mut rows) = terminal::size()?;

    let frame_loop = FrameLoop::new(config.frame_interval);
    let cancel = frame_loop.cancel_handle();

    let frames = frame_loop.run(|_frame| {
        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut input = FrameInput::new(cols, rows);
        while let Ok(ev) = rx.try_recv() {
            input.apply(ev);
        }
        cols = input.cols;
        rows = input.rows;

        if input.quit {
            cancel.cancel();
            return Ok(());
        }
        if input.wants_reset() {
            state = reset(&state);
        }
        if let Some(x) = input.pointer_x(&state.playfield) {
            state = move_avatar_to(&state, x);
        }

        let before = scoreboard(&state);
        state = tick(&state, &mut rng);
        let after = scoreboard(&state);
        if after != before {
            log::debug!(
                "score {} best {} over {}",
                after.score,
                after.high_score,
                after.is_over
            );
        }

        display::render(out, &state, cols, rows)?;
        Ok::<(), GameError>(())
    })?;

    log::info!("quit after {} frames, best score {}", frames, state.high_score);
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging(config::log_file_from_env().as_deref());
    let config = GameConfig::load_or_default();
    log::info!("starting with {:?}", config);

    // Refuse to start on an unusable surface, before touching terminal state
    let (width, height) = terminal::size().unwrap_or((0, 0));
    if let Err(e) = check_surface(stdout().is_tty(), width, height) {
        log::error!("{}", e);
        return Err(e);
    }

    let mut session = TerminalSession::enter(BufWriter::new(stdout()))?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(session.out(), &config, &rx);
    drop(rx);

    // Always restore the terminal
    drop(session);

    result
}
