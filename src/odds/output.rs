use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use log::info;
use serde::Serialize;

use crate::odds::error::Result;

pub const DEFAULT_OUTPUT_FILE: &str = "nhl_odds.json";

#[derive(Debug, Clone, PartialEq)]
pub enum OutputSink {
    /// Compact JSON on one line.
    Stdout,
    /// Pretty JSON with 2-space indentation.
    File(PathBuf),
}

impl Default for OutputSink {
    fn default() -> Self { OutputSink::Stdout }
}

/// Renders the whole document before anything is written, so a
/// serialization failure never leaves half an array behind.
pub fn render<T: Serialize + ?Sized>(value: &T, sink: &OutputSink) -> Result<String> {
    let text = match sink {
        OutputSink::Stdout => serde_json::to_string(value)?,
        OutputSink::File(_) => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}

pub fn write_json<T: Serialize + ?Sized>(value: &T, sink: &OutputSink) -> Result<()> {
    let text = render(value, sink)?;
    match sink {
        OutputSink::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", text)?;
            handle.flush()?;
        }
        OutputSink::File(path) => {
            let mut f = File::create(path)?;
            f.write_all(text.as_bytes())?;
            f.write_all(b"\n")?;
            info!("wrote {} bytes to {}", text.len() + 1, path.display());
        }
    }
    Ok(())
}
