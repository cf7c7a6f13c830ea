//! Animated, steppable view of a run
//!
//! The simulator knows nothing about time or keys. This loop decides when to ask it for the next
//! step, and draws each record as it arrives.
//!
//! Keys: space pauses and resumes, n or right arrow steps while paused, + and - change speed,
//! q, Esc or Ctrl-C quit the run.

use std::io::{self, Write};
use std::time::Duration;
use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::queue;
use pagelib::simulator::Simulator;
use pagelib::summary::SimulationSummary;
use crate::table;

const MIN_DELAY: Duration = Duration::from_millis(50);
const MAX_DELAY: Duration = Duration::from_millis(5000);

/// Holds the terminal in raw mode, restoring it when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        disable_raw_mode().ok();
    }
}

/// A key press, as far as the animation cares
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    TogglePause,
    Step,
    Faster,
    Slower,
    Quit,
    Ignore,
}

impl From<KeyEvent> for Command {
    fn from(key: KeyEvent) -> Self {
        if key.kind != KeyEventKind::Press {
            return Command::Ignore;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            KeyCode::Char(' ') | KeyCode::Char('p') => Command::TogglePause,
            KeyCode::Char('n') | KeyCode::Right | KeyCode::Enter => Command::Step,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Command::Faster,
            KeyCode::Char('-') | KeyCode::Down => Command::Slower,
            _ => Command::Ignore,
        }
    }
}

/// Pause, speed and quit state of the animation
#[derive(Debug, Clone, Eq, PartialEq)]
struct Playback {
    paused: bool,
    delay: Duration,
    quit: bool,
}

impl Playback {
    fn new(delay: Duration) -> Self {
        Self {
            paused: false,
            delay: delay.clamp(MIN_DELAY, MAX_DELAY),
            quit: false,
        }
    }

    /// Applies a command, returning true if a step should be taken right away
    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::TogglePause => self.paused = !self.paused,
            Command::Step => return self.paused,
            Command::Faster => self.delay = (self.delay / 2).max(MIN_DELAY),
            Command::Slower => self.delay = (self.delay * 2).min(MAX_DELAY),
            Command::Quit => self.quit = true,
            Command::Ignore => {}
        }
        false
    }

    fn status(&self) -> String {
        let state = if self.paused { "paused, n to step" } else { "playing" };
        format!(
            "[{state}] {}ms per step | space pause | +/- speed | q quit",
            self.delay.as_millis()
        )
    }
}

fn read_command() -> io::Result<Command> {
    match event::read()? {
        Event::Key(key) => Ok(Command::from(key)),
        _ => Ok(Command::Ignore),
    }
}

/// Raw mode needs explicit carriage returns
fn raw_line(out: &mut impl Write, text: &str) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    for line in text.lines() {
        queue!(out, Print(line), Print("\r\n"))?;
    }
    Ok(())
}

fn draw_status(out: &mut impl Write, playback: &Playback) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(playback.status()))?;
    out.flush()
}

/// Animates a run until it finishes or the user quits
///
/// The terminal is put in raw mode for the duration and restored on every exit path. A quit
/// aborts the simulator, so the summary covers only the steps that were shown
pub fn run(simulator: &mut Simulator<'_>, delay: Duration) -> io::Result<SimulationSummary> {
    let mut out = io::stdout();
    let frames = simulator.frames();
    print!("{}", table::title(simulator.policy()));
    println!("{}", table::header(frames));
    {
        let _guard = RawModeGuard::acquire()?;
        let mut playback = Playback::new(delay);
        while !simulator.is_finished() {
            draw_status(&mut out, &playback)?;
            let step = if playback.paused {
                let command = read_command()?;
                playback.apply(command)
            } else if event::poll(playback.delay)? {
                let command = read_command()?;
                playback.apply(command)
            } else {
                true
            };
            if playback.quit {
                simulator.abort();
                break;
            }
            if step {
                if let Some(record) = simulator.advance() {
                    raw_line(&mut out, &table::row(record))?;
                }
            }
        }
        queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        out.flush()?;
    }
    println!("{}", table::separator(frames));
    let summary = simulator.summary();
    println!("{}", table::stats(&summary));
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(Command::from(key(KeyCode::Char(' '))), Command::TogglePause);
        assert_eq!(Command::from(key(KeyCode::Char('q'))), Command::Quit);
        assert_eq!(Command::from(key(KeyCode::Right)), Command::Step);
        assert_eq!(Command::from(key(KeyCode::Char('+'))), Command::Faster);
        assert_eq!(Command::from(key(KeyCode::Char('x'))), Command::Ignore);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::from(ctrl_c), Command::Quit);
    }

    #[test]
    fn step_only_works_while_paused() {
        let mut playback = Playback::new(Duration::from_millis(400));
        assert!(!playback.apply(Command::Step));
        playback.apply(Command::TogglePause);
        assert!(playback.paused);
        assert!(playback.apply(Command::Step));
        playback.apply(Command::TogglePause);
        assert!(!playback.paused);
    }

    #[test]
    fn speed_is_clamped() {
        let mut playback = Playback::new(Duration::from_millis(400));
        playback.apply(Command::Faster);
        assert_eq!(playback.delay, Duration::from_millis(200));
        for _ in 0..10 {
            playback.apply(Command::Faster);
        }
        assert_eq!(playback.delay, MIN_DELAY);
        for _ in 0..10 {
            playback.apply(Command::Slower);
        }
        assert_eq!(playback.delay, MAX_DELAY);
    }

    #[test]
    fn quit_is_sticky() {
        let mut playback = Playback::new(Duration::ZERO);
        assert_eq!(playback.delay, MIN_DELAY);
        playback.apply(Command::Quit);
        playback.apply(Command::TogglePause);
        assert!(playback.quit);
    }

    #[test]
    fn status_reflects_state() {
        let mut playback = Playback::new(Duration::from_millis(100));
        assert!(playback.status().starts_with("[playing] 100ms"));
        playback.apply(Command::TogglePause);
        assert!(playback.status().starts_with("[paused"));
    }
}
