//! Replay Module
//!
//! Drives an `LruCache<String, String>` from a line-oriented command stream
//! and writes one JSON response per command.

mod command;
mod response;

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::cache::LruCache;
use crate::error::CacheError;

pub use command::Command;
pub use response::{ErrorResponse, Response, StatsResponse};

/// Totals for one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Commands executed
    pub commands: usize,
    /// Lines rejected as malformed
    pub errors: usize,
}

/// Applies a single command to the cache.
pub fn execute(cache: &mut LruCache<String, String>, command: Command) -> Response {
    match command {
        Command::Set { key, value } => {
            let updated = cache.set(key.clone(), value);
            Response::Set { key, updated }
        }
        Command::Get { key } => {
            let value = cache.get(&key).cloned();
            Response::Get {
                found: value.is_some(),
                key,
                value,
            }
        }
        Command::Del { key } => {
            let removed = cache.remove(&key).is_some();
            Response::Del { key, removed }
        }
        Command::Clear => {
            let cleared = cache.len();
            cache.clear();
            Response::Clear { cleared }
        }
        Command::Len => Response::Len {
            len: cache.len(),
            capacity: cache.capacity(),
        },
        Command::Stats => Response::Stats(cache.stats().into()),
    }
}

/// Reads commands from `input` until EOF, writing a JSON line per command.
///
/// Malformed lines produce an [`ErrorResponse`] and do not stop the run.
/// Only I/O failures are returned as errors.
pub fn replay<R, W>(
    cache: &mut LruCache<String, String>,
    input: R,
    mut output: W,
) -> io::Result<ReplaySummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = ReplaySummary::default();

    for (index, bytes) in input.split(b'\n').enumerate() {
        let mut bytes = bytes?;
        let line_no = index + 1;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        let parsed = match String::from_utf8(bytes) {
            Ok(line) => Command::parse_line(&line),
            Err(_) => Some(Err(CacheError::InvalidCommand(
                "line is not valid UTF-8".to_string(),
            ))),
        };

        match parsed {
            None => continue,
            Some(Ok(command)) => {
                debug!(line = line_no, ?command, "executing command");
                let response = execute(cache, command);
                serde_json::to_writer(&mut output, &response)?;
                summary.commands += 1;
            }
            Some(Err(err)) => {
                warn!(line = line_no, %err, "rejected command");
                let response = ErrorResponse::new(line_no, err.to_string());
                serde_json::to_writer(&mut output, &response)?;
                summary.errors += 1;
            }
        }
        output.write_all(b"\n")?;
    }

    output.flush()?;
    Ok(summary)
}
