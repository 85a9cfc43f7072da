//! Durable line-oriented storage for the task list.
//!
//! Each task is one pipe-delimited line, `TYPE | DONE | FIELD...`, with
//! the separator exactly `" | "`. Decoding tolerates corruption: a
//! malformed line is skipped and counted, never fatal for the whole file.

use crate::error::Result;
use crate::task::Task;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

const SEPARATOR: &str = " | ";

/// Why a single persisted line was rejected. Internal to the codec;
/// callers only ever see the aggregate skip count.
#[derive(Error, Debug)]
enum CorruptRecord {
    #[error("wrong field count")]
    FieldCount,
    #[error("unknown task type '{0}'")]
    UnknownType(String),
    #[error("bad done flag '{0}'")]
    DoneFlag(String),
    #[error("{0}")]
    Invalid(String),
}

fn decode_line(line: &str) -> std::result::Result<Task, CorruptRecord> {
    let fields: Vec<&str> = line.split(SEPARATOR).map(str::trim).collect();
    if fields.len() < 3 {
        return Err(CorruptRecord::FieldCount);
    }

    let done = match fields[1] {
        "0" => false,
        "1" => true,
        other => return Err(CorruptRecord::DoneFlag(other.to_string())),
    };

    let expected = match fields[0] {
        "T" => 3,
        "D" => 4,
        "E" => 5,
        other => return Err(CorruptRecord::UnknownType(other.to_string())),
    };
    if fields.len() != expected {
        return Err(CorruptRecord::FieldCount);
    }

    // The model constructors enforce the same rules as fresh input:
    // non-empty description, machine date format, from <= to.
    let mut task = match fields[0] {
        "T" => Task::todo(fields[2]),
        "D" => Task::deadline(fields[2], fields[3]),
        _ => Task::event(fields[2], fields[3], fields[4]),
    }
    .map_err(|e| CorruptRecord::Invalid(e.to_string()))?;

    task.set_done(done);
    Ok(task)
}

/// Decode persisted lines into tasks, skipping malformed lines.
///
/// Returns the decoded tasks in file order and the number of lines that
/// were skipped. Blank lines are ignored without counting.
pub fn decode_all<'a, I>(lines: I) -> (Vec<Task>, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tasks = Vec::new();
    let mut skipped = 0;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match decode_line(line) {
            Ok(task) => tasks.push(task),
            Err(reason) => {
                warn!(%reason, line, "skipping corrupt task record");
                skipped += 1;
            }
        }
    }
    (tasks, skipped)
}

/// Encode the whole collection as the file's contents. Pure.
pub fn encode_all(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&task.encode());
        out.push('\n');
    }
    out
}

/// Load tasks from the data file, creating an empty file (and its parent
/// directory) on first run. Returns the tasks and the corrupt-line count.
pub fn load(path: &Path) -> Result<(Vec<Task>, usize)> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::File::create(path)?;
        debug!(path = %path.display(), "created new data file");
        return Ok((Vec::new(), 0));
    }

    let contents = fs::read_to_string(path)?;
    let (tasks, skipped) = decode_all(contents.lines());
    debug!(path = %path.display(), loaded = tasks.len(), skipped, "loaded data file");
    Ok((tasks, skipped))
}

/// Save the collection, fully overwriting the data file.
pub fn save(path: &Path, tasks: &[Task]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, encode_all(tasks))?;
    debug!(path = %path.display(), count = tasks.len(), "saved data file");
    Ok(())
}
