use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};
use std::panic;

use crossterm::{
    ExecutableCommand,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// The terminal in raw mode on the alternate screen with mouse capture.
///
/// Restored when dropped.
pub struct TerminalGuard {
    terminal: AppTerminal,
}

impl TerminalGuard {
    pub fn acquire() -> io::Result<Self> {
        setup_panic_hook();
        enable_raw_mode()?;
        let terminal = or_rollback(enter(), || {
            let _ = restore();
        })?;
        Ok(Self { terminal })
    }
}

impl Deref for TerminalGuard {
    type Target = AppTerminal;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore();
        let _ = self.terminal.show_cursor();
    }
}

fn enter() -> io::Result<AppTerminal> {
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

/// Runs `rollback` when a setup step failed after raw mode was enabled.
fn or_rollback<T>(result: io::Result<T>, rollback: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        rollback();
    }
    result
}

/// Undo every setup step, even when an earlier one fails.
fn restore() -> io::Result<()> {
    let mut stdout = io::stdout();
    let raw = disable_raw_mode();
    let mouse = stdout.execute(DisableMouseCapture).map(|_| ());
    let screen = stdout.execute(LeaveAlternateScreen).map(|_| ());
    raw.and(mouse).and(screen)
}

fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}
