//! The interactive menu
//!
//! Asks for an algorithm, a reference string and a frame count, then runs it. Bad input is
//! reported and the menu starts over; nothing is ever corrected behind the user's back.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use colored::Colorize;
use rand::Rng;
use pagelib::config::{check_frames, check_reference_count, PolicyKind, MAX_FRAMES, MAX_PAGE, MAX_REFERENCES};
use pagelib::error::ConfigError;
use pagelib::reference::{generate_reference_string, parse_reference_string};
use pagelib::simulator::{compare, Simulator};
use pagelib::Page;
use crate::{animate, table};

/// What the user picked from the menu
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Choice {
    Run(PolicyKind),
    CompareAll,
    Exit,
}

impl Choice {
    fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "1" => Some(Choice::Run(PolicyKind::Fifo)),
            "2" => Some(Choice::Run(PolicyKind::LeastRecentlyUsed)),
            "3" => Some(Choice::Run(PolicyKind::Optimal)),
            "4" => Some(Choice::CompareAll),
            "5" => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// Reads whitespace separated tokens, across as many lines as it takes
struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// The next token, or None at end of input
    fn next(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    /// The rest of the current line, trimmed, or None at end of input. A blank line gives an empty string
    fn next_line(&mut self) -> io::Result<Option<String>> {
        if !self.pending.is_empty() {
            let rest: Vec<String> = self.pending.drain(..).collect();
            return Ok(Some(rest.join(" ")));
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Drops whatever is left of the current line, so a bad entry doesn't spill into the next prompt
    fn discard_pending(&mut self) {
        self.pending.clear();
    }
}

/// Failure modes of a single menu round
enum RoundError {
    Input(ConfigError),
    Message(String),
    Eof,
    Io(io::Error),
}

impl From<io::Error> for RoundError {
    fn from(value: io::Error) -> Self {
        RoundError::Io(value)
    }
}

impl From<ConfigError> for RoundError {
    fn from(value: ConfigError) -> Self {
        RoundError::Input(value)
    }
}

/// The menu loop, generic over its input and output so it can be driven from tests
pub struct Menu<R, W, G> {
    tokens: Tokens<R>,
    out: W,
    rng: G,
    animation_delay: Option<Duration>,
}

impl<R: BufRead, W: Write, G: Rng> Menu<R, W, G> {
    /// Creates a new menu
    ///
    /// # Arguments
    ///
    /// * `input`: Where answers are read from
    /// * `out`: Where prompts and tables are written
    /// * `rng`: Used when the user asks for a random reference string
    /// * `animation_delay`: If set, single algorithm runs may be animated with this step delay
    ///
    /// returns: Menu
    pub fn new(input: R, out: W, rng: G, animation_delay: Option<Duration>) -> Self {
        Self {
            tokens: Tokens::new(input),
            out,
            rng,
            animation_delay,
        }
    }

    /// Runs rounds until the user exits or input runs out
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.round() {
                Ok(true) => {}
                Ok(false) | Err(RoundError::Eof) => {
                    writeln!(self.out, "\n{}", "Exiting... Goodbye!".green().bold())?;
                    return Ok(());
                }
                Err(RoundError::Input(e)) => {
                    self.tokens.discard_pending();
                    writeln!(self.out, "\n{}", format!("Error: {e}").red().bold())?;
                }
                Err(RoundError::Message(message)) => {
                    self.tokens.discard_pending();
                    writeln!(self.out, "\n{}", message.red().bold())?;
                }
                Err(RoundError::Io(e)) => return Err(e),
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Result<String, RoundError> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        self.tokens.next()?.ok_or(RoundError::Eof)
    }

    fn prompt_number(&mut self, text: &str) -> Result<usize, RoundError> {
        let token = self.prompt(text)?;
        token.parse().map_err(|_| RoundError::Message(format!("Error: '{token}' is not a number")))
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let rule = "==============================".cyan();
        writeln!(self.out, "\n{rule}\n{}\n{rule}", "  Page Replacement Simulator".bold())?;
        writeln!(self.out, "1. FIFO Algorithm")?;
        writeln!(self.out, "2. LRU Algorithm")?;
        writeln!(self.out, "3. Optimal Algorithm")?;
        writeln!(self.out, "4. Compare All")?;
        writeln!(self.out, "5. Exit")
    }

    /// One pass through the menu. Returns false when the user chose to exit
    fn round(&mut self) -> Result<bool, RoundError> {
        self.print_menu()?;
        let token = self.prompt(&format!("{}", "Enter your choice: ".bold()))?;
        let choice = Choice::parse(&token)
            .ok_or_else(|| RoundError::Message("Invalid choice! Please select a valid option.".to_string()))?;
        if choice == Choice::Exit {
            return Ok(false);
        }

        let count = self.prompt_number(&format!("\nEnter number of pages (1-{MAX_REFERENCES}): "))?;
        check_reference_count(count, MAX_REFERENCES)?;
        let references = self.read_references(count)?;
        let frames = self.prompt_number(&format!("Enter number of frames (1-{MAX_FRAMES}): "))?;
        check_frames(frames)?;

        match choice {
            Choice::Run(policy) => self.run_one(policy, &references, frames)?,
            Choice::CompareAll => {
                for policy in PolicyKind::ALL {
                    self.run_one_table(policy, &references, frames)?;
                }
                let summary = compare(&references, frames, &PolicyKind::ALL);
                write!(self.out, "{}", table::comparison(&summary))?;
            }
            Choice::Exit => {}
        }
        Ok(true)
    }

    /// Reads `count` pages, or draws them at random if the first answer is `r`
    fn read_references(&mut self, count: usize) -> Result<Vec<Page>, RoundError> {
        writeln!(self.out, "Enter reference string (space-separated, pages 0-{MAX_PAGE}), or r for random:")?;
        let first = self.tokens.next()?.ok_or(RoundError::Eof)?;
        if first.eq_ignore_ascii_case("r") {
            let pages = generate_reference_string(count, MAX_PAGE, &mut self.rng);
            let text: Vec<_> = pages.iter().map(Page::to_string).collect();
            writeln!(self.out, "Generated: {}", text.join(" "))?;
            return Ok(pages);
        }
        let mut tokens = vec![first];
        while tokens.len() < count {
            tokens.push(self.tokens.next()?.ok_or(RoundError::Eof)?);
        }
        if !self.tokens.pending.is_empty() {
            let got = count + self.tokens.pending.len();
            return Err(RoundError::Message(format!("Error: expected {count} pages, got {got}")));
        }
        Ok(parse_reference_string(&tokens.join(" "), MAX_PAGE)?)
    }

    fn run_one(&mut self, policy: PolicyKind, references: &[Page], frames: usize) -> Result<(), RoundError> {
        if let Some(delay) = self.animation_delay {
            write!(self.out, "View as (t)able or (a)nimation? [t]: ")?;
            self.out.flush()?;
            // Enter alone picks the table
            let answer = self.tokens.next_line()?.ok_or(RoundError::Eof)?;
            match answer.to_ascii_lowercase().as_str() {
                "" | "t" => {}
                "a" => {
                    let mut simulator = Simulator::new(policy, references, frames);
                    animate::run(&mut simulator, delay)?;
                    return Ok(());
                }
                _ => return Err(RoundError::Message(format!("Invalid view '{answer}'! Please answer t or a."))),
            }
        }
        self.run_one_table(policy, references, frames)
    }

    fn run_one_table(&mut self, policy: PolicyKind, references: &[Page], frames: usize) -> Result<(), RoundError> {
        let mut simulator = Simulator::new(policy, references, frames);
        let summary = simulator.run_to_end();
        writeln!(self.out, "{}", table::full_table(policy, frames, simulator.records(), &summary))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run_menu(input: &str) -> String {
        run_menu_with_delay(input, None)
    }

    fn run_menu_with_delay(input: &str, animation_delay: Option<Duration>) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        Menu::new(input.as_bytes(), &mut out, StdRng::seed_from_u64(3), animation_delay).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn runs_fifo_then_exits() {
        let out = run_menu("1\n12\n1 2 3 4 1 2 5 1 2 3 4 5\n3\n5\n");
        assert!(out.contains("===== FIFO Page Replacement ====="));
        assert!(out.contains("Total Page Faults = 9"));
        assert!(out.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn reference_string_may_span_lines() {
        let out = run_menu("3\n12\n1 2 3 4\n1 2 5 1\n2 3 4 5\n3\n5\n");
        assert!(out.contains("Total Page Faults = 7"));
    }

    #[test]
    fn compare_all_prints_every_policy() {
        let out = run_menu("4\n12\n1 2 3 4 1 2 5 1 2 3 4 5\n3\n5\n");
        assert!(out.contains("FIFO Page Replacement"));
        assert!(out.contains("LRU Page Replacement"));
        assert!(out.contains("Optimal Page Replacement"));
        assert!(out.contains("Comparison Summary"));
    }

    #[test]
    fn invalid_choice_asks_again() {
        let out = run_menu("9\n5\n");
        assert!(out.contains("Invalid choice!"));
        assert_eq!(out.matches("Page Replacement Simulator").count(), 2);
    }

    #[test]
    fn out_of_range_input_is_reported() {
        let out = run_menu("1\n0\n1\n3\n1000 1 2\n1\n2\n1 2\n101\n5\n");
        assert!(out.contains("Number of pages must be between 1 and 100, got 0"));
        assert!(out.contains("Page numbers must be between 0 and 999, got 1000"));
        assert!(out.contains("Frames must be between 1 and 100, got 101"));
    }

    #[test]
    fn random_reference_string() {
        let out = run_menu("2\n8\nr\n4\n5\n");
        let generated = out.lines().find(|l| l.starts_with("Generated: ")).unwrap();
        assert_eq!(generated.split_whitespace().count(), 9);
        assert!(out.contains("LRU Page Replacement"));
    }

    #[test]
    fn extra_pages_are_rejected() {
        let out = run_menu("1\n3\n1 2 3 4\n5\n");
        assert!(out.contains("Error: expected 3 pages, got 4"));
        // "5" is read as the next menu choice, not as a frame count
        assert!(!out.contains("FIFO Page Replacement"));
        assert_eq!(out.matches("Page Replacement Simulator").count(), 2);
    }

    #[test]
    fn blank_view_answer_picks_table() {
        let out = run_menu_with_delay("1\n3\n1 2 3\n2\n\n9\n5\n", Some(Duration::from_millis(100)));
        assert!(out.contains("View as (t)able or (a)nimation? [t]: "));
        assert_eq!(out.matches("===== FIFO Page Replacement =====").count(), 1);
        assert!(out.contains("Total Page Faults = 3"));
        assert!(out.contains("Invalid choice! Please select a valid option."));
        assert!(out.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn unknown_view_answer_is_reported() {
        let out = run_menu_with_delay("1\n3\n1 2 3\n2\nx\n5\n", Some(Duration::from_millis(100)));
        assert!(out.contains("Invalid view 'x'! Please answer t or a."));
        assert!(!out.contains("FIFO Page Replacement"));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let out = run_menu("1\n3\n1 2");
        assert!(out.ends_with("Exiting... Goodbye!\n"));
    }
}
