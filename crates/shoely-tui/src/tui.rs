//! Full-screen terminal session: raw mode plus the alternate screen,
//! given back to the shell on drop and from the panic hook.

use std::io::{Stdout, stdout};

use color_eyre::config::HookBuilder;
use color_eyre::eyre::Result;
use crossterm::ExecutableCommand;
use crossterm::cursor;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

/// A live terminal session.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    /// Take over the terminal. A failure part way through restores it.
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Self::open().inspect_err(|_| restore())
    }

    fn open() -> Result<Self> {
        let mut out = stdout();
        out.execute(EnterAlternateScreen)?.execute(cursor::Hide)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(out))?;
        terminal.clear()?;
        Ok(Self { terminal })
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        restore();
    }
}

/// Undo [`Tui::enter`], ignoring errors.
fn restore() {
    let mut out = stdout();
    let _ = out.execute(cursor::Show);
    let _ = out.execute(LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Report errors and panics through color-eyre, restoring the terminal
/// before a panic is printed. Call before [`Tui::enter`].
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    let report_panic = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        report_panic(info);
    }));
    Ok(())
}
