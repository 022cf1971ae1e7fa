use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use coin_catcher::terminal::TerminalSession;

const ENTER_ALT_SCREEN: &str = "\x1b[?1049h";
const LEAVE_ALT_SCREEN: &str = "\x1b[?1049l";
const MOUSE_ON: &str = "\x1b[?1000h";
const MOUSE_OFF: &str = "\x1b[?1000l";
const SHOW_CURSOR: &str = "\x1b[?25h";

/// Records everything written; fails the first write containing `fail_on`.
#[derive(Clone)]
struct FlakyTerminal {
    written: Rc<RefCell<Vec<u8>>>,
    fail_on: Option<&'static str>,
}

impl FlakyTerminal {
    fn new(fail_on: Option<&'static str>) -> Self {
        FlakyTerminal {
            written: Rc::new(RefCell::new(Vec::new())),
            fail_on,
        }
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.written.borrow()).into_owned()
    }
}

impl Write for FlakyTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(marker) = self.fail_on {
            if String::from_utf8_lossy(buf).contains(marker) {
                self.fail_on = None;
                return Err(io::Error::new(io::ErrorKind::Other, "terminal went away"));
            }
        }
        self.written.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn ok() -> io::Result<()> {
    Ok(())
}

fn refuse() -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::Other, "no tty"))
}

// ── enter / drop ──────────────────────────────────────────────────────────────

static NORMAL_RESTORES: AtomicUsize = AtomicUsize::new(0);

fn count_normal_restore() -> io::Result<()> {
    NORMAL_RESTORES.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

#[test]
fn session_sets_up_and_restores() {
    let term = FlakyTerminal::new(None);
    let session = TerminalSession::enter_with(term.clone(), ok, count_normal_restore)
        .expect("enter");

    let setup = term.text();
    assert!(setup.contains(ENTER_ALT_SCREEN));
    assert!(setup.contains(MOUSE_ON));
    assert_eq!(NORMAL_RESTORES.load(Ordering::SeqCst), 0);

    drop(session);
    let all = term.text();
    assert!(all.contains(MOUSE_OFF));
    assert!(all.contains(SHOW_CURSOR));
    assert!(all.contains(LEAVE_ALT_SCREEN));
    assert_eq!(NORMAL_RESTORES.load(Ordering::SeqCst), 1);
}

static HALFWAY_RESTORES: AtomicUsize = AtomicUsize::new(0);

fn count_halfway_restore() -> io::Result<()> {
    HALFWAY_RESTORES.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

#[test]
fn failed_mouse_capture_still_leaves_raw_mode() {
    let term = FlakyTerminal::new(Some(MOUSE_ON));
    let result = TerminalSession::enter_with(term.clone(), ok, count_halfway_restore);

    assert!(result.is_err());
    assert_eq!(HALFWAY_RESTORES.load(Ordering::SeqCst), 1);
    let all = term.text();
    assert!(all.contains(MOUSE_OFF));
    assert!(all.contains(LEAVE_ALT_SCREEN));
}

static EARLY_RESTORES: AtomicUsize = AtomicUsize::new(0);

fn count_early_restore() -> io::Result<()> {
    EARLY_RESTORES.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

#[test]
fn failed_alt_screen_still_leaves_raw_mode() {
    let term = FlakyTerminal::new(Some(ENTER_ALT_SCREEN));
    let result = TerminalSession::enter_with(term.clone(), ok, count_early_restore);

    assert!(result.is_err());
    assert_eq!(EARLY_RESTORES.load(Ordering::SeqCst), 1);
    assert!(!term.text().contains(MOUSE_ON));
}

static UNUSED_RESTORES: AtomicUsize = AtomicUsize::new(0);

fn count_unused_restore() -> io::Result<()> {
    UNUSED_RESTORES.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

#[test]
fn refused_raw_mode_touches_nothing() {
    let term = FlakyTerminal::new(None);
    let result = TerminalSession::enter_with(term.clone(), refuse, count_unused_restore);

    assert!(result.is_err());
    assert!(term.text().is_empty());
    assert_eq!(UNUSED_RESTORES.load(Ordering::SeqCst), 0);
}

#[test]
fn out_writes_through_to_the_terminal() {
    let term = FlakyTerminal::new(None);
    let mut session = TerminalSession::enter_with(term.clone(), ok, ok).expect("enter");
    session.out().write_all(b"frame").expect("write");
    assert!(term.text().contains("frame"));
}
