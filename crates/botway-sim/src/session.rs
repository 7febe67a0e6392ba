//! The session driver: one owner of the current snapshot.
//!
//! A [`Session`] holds the one [`WorldMap`] that counts as "now".  Commands
//! and ticks both follow the same copy-on-write discipline: work happens on
//! a clone, and the clone replaces the current snapshot only if it succeeds.
//! Anything that borrowed an earlier snapshot (a renderer mid-frame, a
//! report) keeps a consistent world for as long as it holds on.
//!
//! # Console voice
//!
//! [`Session::submit`] never fails.  Whatever happens to an input line comes
//! back as a printable [`ConsoleEntry`], errors included; the reply strings
//! are deliberately informal and lowercase the underlying error text.

use std::fmt;

use botway_command::{apply, apply_command, Command, CommandError, CommandParser, Outcome, ParsedCommand};
use botway_world::WorldMap;

/// Default acknowledgement for commands with no report of their own.
const DONE: &str = "done.";
/// Reply when the parsing collaborator produced nothing.
const NOT_UNDERSTOOD: &str = "i don't understand that :(";
/// First line of every error reply.
const ERROR_PREFIX: &str = "i got an error :((";

// ── ConsoleEntry ──────────────────────────────────────────────────────────────

/// One processed console line: the raw input and the engine's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleEntry {
    pub input:  String,
    pub output: String,
}

impl fmt::Display for ConsoleEntry {
    /// The echoed transcript form: `> input` on one line, reply below.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "> {}\n{}", self.input, self.output)
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Owns the current [`WorldMap`] and serializes commands and ticks onto it.
pub struct Session<P: CommandParser> {
    parser: P,
    map:    WorldMap,
    ticks:  u64,
}

impl<P: CommandParser> Session<P> {
    /// Start a session over an empty standard map.
    pub fn new(parser: P) -> Self {
        Self::with_map(parser, WorldMap::new())
    }

    /// Start from an existing snapshot, e.g. a prepared scenario.
    pub fn with_map(parser: P, map: WorldMap) -> Self {
        Self { parser, map, ticks: 0 }
    }

    /// The current snapshot.  Renderers read this between ticks.
    pub fn current(&self) -> &WorldMap {
        &self.map
    }

    /// Ticks advanced since the session started.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Feed one raw console line through the parsing collaborator and the
    /// pipeline.  Always yields a printable entry, never an error.
    pub fn submit(&mut self, input: &str) -> ConsoleEntry {
        let result = match self.parser.parse(input) {
            None => Err(CommandError::InputNotUnderstood),
            Some(parsed) => self.run(&parsed),
        };
        ConsoleEntry { input: input.to_owned(), output: reply(result) }
    }

    /// Run a collaborator result against the current snapshot, adopting the
    /// fresh snapshot on success.  Returns the report text, if any.
    pub fn run(&mut self, parsed: &ParsedCommand) -> Result<Option<String>, CommandError> {
        let outcome = apply(&self.map, parsed)?;
        Ok(self.adopt(outcome))
    }

    /// Like [`Session::run`] for drivers that build [`Command`] values
    /// directly and skip text parsing.
    pub fn run_command(&mut self, command: &Command) -> Result<Option<String>, CommandError> {
        let outcome = apply_command(&self.map, command)?;
        Ok(self.adopt(outcome))
    }

    /// Advance the simulation one tick: clone, step the clone, swap it in.
    pub fn tick(&mut self) {
        let mut next = self.map.clone();
        next.step();
        self.map = next;
        self.ticks += 1;
    }

    /// Advance `n` ticks.
    pub fn tick_many(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    fn adopt(&mut self, outcome: Outcome) -> Option<String> {
        match outcome {
            Outcome::Updated { map, report } => {
                self.map = map;
                report
            }
            Outcome::Info(text) => Some(text),
        }
    }
}

// ── Console formatting ────────────────────────────────────────────────────────

/// Render a pipeline result in the console's voice.
fn reply(result: Result<Option<String>, CommandError>) -> String {
    match result {
        Ok(Some(report)) => report,
        Ok(None) => DONE.to_owned(),
        Err(CommandError::InputNotUnderstood) => NOT_UNDERSTOOD.to_owned(),
        Err(err) => format!("{}\n{}", ERROR_PREFIX, err.to_string().to_lowercase()),
    }
}
