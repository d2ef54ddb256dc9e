//! Piskvork (Gomocup) protocol front end.
//!
//! The manager sends one command per line on stdin and reads our replies on
//! stdout. This module only tokenizes, parses numbers and routes commands to
//! the [`Brain`]; it makes no decisions of its own.
//!
//! ## Supported Commands
//!
//! - `START <size>` - new game, replies `OK` or `ERROR`
//! - `RESTART` - clear the board, replies `OK` or `ERROR`
//! - `BEGIN` - we move first, replies `x,y`
//! - `TURN <x>,<y>` - opponent's move, replies with ours
//! - `BOARD` - position lines `x,y,code` up to `DONE`, then replies with our move
//! - `TAKEBACK <x>,<y>` - undo the last move, replies `OK` or `ERROR`
//! - `INFO <key> <value>` - settings, no reply (`timeout_turn` and `rule` are used)
//! - `ABOUT` - engine metadata
//! - `END` - exit
//!
//! Anything else is answered with `UNKNOWN`. Coordinates may be written
//! `x,y` or `x y`.
//!
//! ## Example
//!
//! ```ignore
//! use pbrain_gomoku::engine::Brain;
//! use pbrain_gomoku::protocol::PiskvorkServer;
//! use pbrain_gomoku::transcript::Transcript;
//!
//! let mut server = PiskvorkServer::new(Brain::new(), Transcript::disabled());
//! server.run()?;
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Context;
use log::{debug, warn};
use thiserror::Error;

use crate::board::{MoveError, Point};
use crate::engine::{Brain, EngineError};
use crate::response::Reply;
use crate::transcript::Transcript;

/// Why a command was answered with `ERROR`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("cannot parse {0:?}")]
    Parse(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("no legal move available")]
    NoMove,
}

impl From<MoveError> for CommandError {
    fn from(e: MoveError) -> Self {
        CommandError::Engine(e.into())
    }
}

/// Result of one command: an optional reply, or a failure sent as `ERROR`.
type Outcome = Result<Option<Reply>, CommandError>;

/// Protocol server state.
pub struct PiskvorkServer {
    brain: Brain,
    transcript: Transcript,
    /// Precede every `ERROR` with a `DEBUG <reason>` line and send
    /// `MESSAGE` notes.
    debug_replies: bool,
    /// `MESSAGE` lines waiting to go out before the next reply.
    notices: Vec<String>,
}

impl PiskvorkServer {
    pub fn new(brain: Brain, transcript: Transcript) -> Self {
        Self {
            brain,
            transcript,
            debug_replies: false,
            notices: Vec::new(),
        }
    }

    pub fn with_debug_replies(mut self, enabled: bool) -> Self {
        self.debug_replies = enabled;
        self
    }

    pub fn brain(&self) -> &Brain {
        &self.brain
    }

    /// Serve stdin/stdout until `END` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout().lock();
        self.serve(stdin.lock(), &mut stdout)
    }

    /// Serve commands from `input`, writing replies to `output`.
    pub fn serve<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> anyhow::Result<()> {
        while let Some(line) = read_line(&mut input).context("reading command")? {

            // Skip empty lines
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.transcript.command(line);

            let (name, args) = split_command(line);
            let command = name.to_ascii_uppercase();

            let outcome = match command.as_str() {
                "END" => break,
                "BOARD" => self.read_board(&mut input)?,
                _ => self.execute(&command, args),
            };
            self.respond(output, outcome)?;
        }
        Ok(())
    }

    /// Execute a single-line command.
    fn execute(&mut self, command: &str, args: &str) -> Outcome {
        match command {
            "ABOUT" => Ok(Some(Reply::About)),

            "START" => {
                let size = args
                    .split_whitespace()
                    .next()
                    .and_then(|s| s.parse::<usize>().ok())
                    .ok_or_else(|| CommandError::Parse(args.to_string()))?;
                self.brain.start(size)?;
                Ok(Some(Reply::Ok))
            }

            "RESTART" => {
                self.brain.restart()?;
                Ok(Some(Reply::Ok))
            }

            "BEGIN" => self.play_turn(),

            "TURN" => {
                let p = parse_point(args)?;
                self.brain.apply_opponent_move(p)?;
                self.play_turn()
            }

            "TAKEBACK" => {
                let p = parse_point(args)?;
                self.brain.takeback(p)?;
                Ok(Some(Reply::Ok))
            }

            "INFO" => {
                self.info(args);
                Ok(None)
            }

            _ => Ok(Some(Reply::Unknown)),
        }
    }

    /// Choose our move, play it and reply with it.
    fn play_turn(&mut self) -> Outcome {
        if self.brain.size().is_none() {
            return Err(EngineError::NotStarted.into());
        }
        let mv = self.brain.choose_move().ok_or(CommandError::NoMove)?;
        self.brain.apply_own_move(mv)?;
        if self.brain.winner().is_some() {
            self.note(format!("five in a row at {},{}", mv.0, mv.1));
        }
        Ok(Some(Reply::Move(mv)))
    }

    /// Apply an `INFO key value` setting. Unknown keys and bad values are
    /// ignored, as the protocol expects no reply either way.
    fn info(&mut self, args: &str) {
        let (key, value) = split_command(args);
        let key = key.to_ascii_lowercase();
        match key.as_str() {
            "timeout_turn" | "rule" => {
                let Ok(n) = value.parse::<i64>() else {
                    warn!("ignoring INFO {key} with value {value:?}");
                    return;
                };
                if key == "rule" {
                    self.brain.set_rule_flags(n);
                } else {
                    self.brain.set_timeout_turn_ms(n);
                }
            }
            _ => debug!("ignoring INFO {key}"),
        }
    }

    /// Handle `BOARD`: replace the position with the lines up to `DONE`,
    /// then move. Every line up to `DONE` is consumed even after an error
    /// so the rest of the block is not read as commands.
    fn read_board<R: BufRead>(&mut self, input: &mut R) -> anyhow::Result<Outcome> {
        let mut stones = Vec::new();
        let mut failure = None;

        loop {
            let Some(line) = read_line(input).context("reading BOARD block")? else {
                return Ok(Err(CommandError::Parse("BOARD without DONE".into())));
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.transcript.command(line);
            if line.eq_ignore_ascii_case("DONE") {
                break;
            }
            if failure.is_some() {
                continue;
            }
            match board_line(line) {
                Ok(stone) => stones.push(stone),
                Err(e) => failure = Some(e),
            }
        }

        if let Some(e) = failure {
            return Ok(Err(e));
        }
        if let Err(e) = self.brain.load_position(&stones) {
            return Ok(Err(e.into()));
        }
        Ok(self.play_turn())
    }

    /// Queue a `MESSAGE` line; only sent with debug replies enabled.
    fn note(&mut self, text: String) {
        debug!("{text}");
        if self.debug_replies {
            self.notices.push(text);
        }
    }

    fn respond<W: Write>(&mut self, output: &mut W, outcome: Outcome) -> anyhow::Result<()> {
        for text in std::mem::take(&mut self.notices) {
            self.send(output, &Reply::Message(text))?;
        }
        match outcome {
            Ok(Some(reply)) => self.send(output, &reply),
            Ok(None) => Ok(()),
            Err(e) => {
                warn!("{e}");
                if self.debug_replies {
                    self.send(output, &Reply::Debug(e.to_string()))?;
                }
                self.send(output, &Reply::Error)
            }
        }
    }

    fn send<W: Write>(&mut self, output: &mut W, reply: &Reply) -> anyhow::Result<()> {
        let text = reply.to_string();
        self.transcript.reply(&text);
        writeln!(output, "{text}").context("writing reply")?;
        output.flush().context("flushing reply")?;
        Ok(())
    }
}

/// Next line of `input`, or `None` at end of input. Bytes that are not
/// UTF-8 are replaced, so a garbled line is answered like any unknown one.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// One `x,y,code` line of a `BOARD` block.
fn board_line(line: &str) -> Result<(Point, i64), CommandError> {
    let [x, y, code] = parse_ints(line).ok_or_else(|| CommandError::Parse(line.to_string()))?;
    Ok((to_point(x, y)?, code))
}

/// Split a line at the first blank into command and trimmed arguments.
fn split_command(line: &str) -> (&str, &str) {
    match line.split_once([' ', '\t']) {
        Some((command, args)) => (command, args.trim()),
        None => (line, ""),
    }
}

/// Parse the first `N` integers of a comma- or blank-separated list.
fn parse_ints<const N: usize>(text: &str) -> Option<[i64; N]> {
    let mut fields = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let mut out = [0; N];
    for slot in &mut out {
        *slot = fields.next()?.parse().ok()?;
    }
    Some(out)
}

/// Negative coordinates can never be on the board.
fn to_point(x: i64, y: i64) -> Result<Point, CommandError> {
    match (usize::try_from(x), usize::try_from(y)) {
        (Ok(x), Ok(y)) => Ok((x, y)),
        _ => Err(MoveError::OutOfBounds.into()),
    }
}

fn parse_point(text: &str) -> Result<Point, CommandError> {
    let [x, y] = parse_ints(text).ok_or_else(|| CommandError::Parse(text.to_string()))?;
    to_point(x, y)
}
