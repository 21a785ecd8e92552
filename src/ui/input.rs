/// Keyboard input and terminal ownership.
///
/// A listener thread blocks on `crossterm::event::read` and forwards each
/// key press to the session loop over a channel. It also owns the interrupt
/// path: Ctrl+C (delivered as a key event in raw mode) restores the
/// terminal and exits the process directly, without going through the loop.
///
/// A SIGINT handler installed at the top of `main` covers everything
/// before and around raw mode.
///
/// Restoring the terminal is idempotent. The interrupt paths, the normal
/// exit path and `Drop` all call it; only the first call does anything.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use crossterm::{
    cursor, execute,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::ResetColor,
    terminal,
};

use crate::domain::movement::Command;

/// What a single key event means to the session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Input {
    Command(Command),
    Interrupt,
}

/// Map a key event. Release events are ignored.
pub fn classify(key: KeyEvent) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && (key.code == KeyCode::Char('c') || key.code == KeyCode::Char('C'))
    {
        return Some(Input::Interrupt);
    }
    let cmd = match key.code {
        KeyCode::Up    => Command::Up,
        KeyCode::Down  => Command::Down,
        KeyCode::Left  => Command::Left,
        KeyCode::Right => Command::Right,
        KeyCode::Esc   => Command::Escape,
        _ => Command::Other,
    };
    Some(Input::Command(cmd))
}

// ── Terminal ownership ──

/// Raw-mode owner. Restores the terminal when dropped.
pub struct TerminalGuard {
    handle: TerminalHandle,
}

/// Shareable restore handle; does not restore on drop.
///
/// Created before the terminal is taken over so the signal handler can hold
/// one from the start of `main`. Restoring an unarmed handle does nothing.
#[derive(Clone, Default)]
pub struct TerminalHandle {
    active: Arc<AtomicBool>,
}

impl TerminalGuard {
    /// Enter raw mode and arm `handle` so every clone of it can restore.
    pub fn enable(handle: TerminalHandle) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        handle.arm();
        let guard = TerminalGuard { handle };
        execute!(io::stdout(), cursor::Hide)?;
        Ok(guard)
    }

    pub fn restore(&self) -> io::Result<()> {
        self.handle.restore()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.handle.restore() {
            log::error!("terminal cleanup failed: {e}");
        }
    }
}

impl TerminalHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn arm(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    /// True for exactly one caller after `arm`.
    fn claim(&self) -> bool {
        self.active.swap(false, Ordering::SeqCst)
    }

    /// Leave raw mode and show the cursor. Later calls are no-ops.
    pub fn restore(&self) -> io::Result<()> {
        if !self.claim() {
            return Ok(());
        }
        let mut out = io::stdout();
        execute!(out, ResetColor, cursor::Show)?;
        out.flush()?;
        terminal::disable_raw_mode()
    }
}

// ── Interrupts ──

/// Handle SIGINT for the whole session, including the name prompt and the
/// roster read. In raw mode Ctrl+C arrives as a key instead; the listener
/// takes that path to the same exit.
pub fn install_interrupt_handler(term: TerminalHandle) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        interrupt(&term);
    })
}

// ── Listener ──

/// Start the key listener. The channel closes when reading keys fails.
pub fn spawn_listener(term: TerminalHandle) -> io::Result<Receiver<Command>> {
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name("key-listener".into())
        .spawn(move || loop {
            match event::read() {
                Ok(Event::Key(key)) => match classify(key) {
                    Some(Input::Interrupt) => interrupt(&term),
                    Some(Input::Command(cmd)) => {
                        if tx.send(cmd).is_err() {
                            break;
                        }
                    }
                    None => {}
                },
                Ok(_) => {}
                Err(e) => {
                    log::error!("Error reading keyboard input: {e}");
                    break;
                }
            }
        })?;

    Ok(rx)
}

fn interrupt(term: &TerminalHandle) -> ! {
    if let Err(e) = term.restore() {
        log::error!("terminal cleanup failed: {e}");
    }
    println!("\nExiting the game. Goodbye!");
    std::process::exit(0);
}
