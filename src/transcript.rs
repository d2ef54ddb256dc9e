//! Protocol transcript sink.
//!
//! Records every command received (`>> ...`) and reply sent (`<< ...`).
//! The sink is owned by the protocol server and handed to it at startup;
//! nothing in the engine core writes to it.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use log::warn;

#[derive(Default)]
pub struct Transcript {
    sink: Option<Box<dyn Write>>,
}

impl Transcript {
    /// A transcript that drops everything.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn stderr() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Append to the file at `path`, creating it if needed.
    pub fn to_file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(file))
    }

    pub fn with_writer(writer: impl Write + 'static) -> Self {
        Self {
            sink: Some(Box::new(writer)),
        }
    }

    pub fn enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn command(&mut self, line: &str) {
        self.record(">>", line);
    }

    pub fn reply(&mut self, line: &str) {
        self.record("<<", line);
    }

    /// A failing sink is dropped after the first error.
    fn record(&mut self, marker: &str, line: &str) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let result = writeln!(sink, "{marker} {line}").and_then(|_| sink.flush());
        if let Err(e) = result {
            warn!("transcript disabled: {e}");
            self.sink = None;
        }
    }
}
