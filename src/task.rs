use crate::error::{Result, TaskError};
use chrono::NaiveDateTime;

/// Machine format used for command input and the persisted file.
pub const MACHINE_FORMAT: &str = "%Y-%m-%d %H%M";

/// Human format used when rendering tasks for display.
pub const DISPLAY_FORMAT: &str = "%b %d %Y %-I:%M%p";

/// One task in the list.
///
/// A closed set of three kinds: a plain todo, a deadline due by a single
/// date-time, and an event spanning a start and end date-time. Encode,
/// render and sort dispatch exhaustively over the kinds, so adding a new
/// kind is a compile-checked single-point change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Todo {
        description: String,
        done: bool,
    },
    Deadline {
        description: String,
        done: bool,
        by: NaiveDateTime,
    },
    Event {
        description: String,
        done: bool,
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
}

fn parse_datetime(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), MACHINE_FORMAT).map_err(|_| {
        TaskError::validation("Invalid date format! Use: yyyy-MM-dd HHmm (e.g., 2019-12-02 1800)")
    })
}

fn check_description(description: &str, kind: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(TaskError::Validation(format!(
            "The description of {kind} cannot be empty."
        )));
    }
    // " | " is the storage field separator; a description containing it
    // could not be decoded back.
    if description.contains(" | ") {
        return Err(TaskError::Validation(format!(
            "The description of {kind} cannot contain ' | '."
        )));
    }
    Ok(())
}

impl Task {
    /// Create a plain todo task.
    pub fn todo(description: &str) -> Result<Task> {
        check_description(description, "a todo")?;
        Ok(Task::Todo {
            description: description.trim().to_string(),
            done: false,
        })
    }

    /// Create a deadline task; `by_text` must be in `yyyy-MM-dd HHmm`.
    pub fn deadline(description: &str, by_text: &str) -> Result<Task> {
        check_description(description, "a deadline")?;
        Ok(Task::Deadline {
            description: description.trim().to_string(),
            done: false,
            by: parse_datetime(by_text)?,
        })
    }

    /// Create an event task. The start must not be after the end.
    pub fn event(description: &str, from_text: &str, to_text: &str) -> Result<Task> {
        check_description(description, "an event")?;
        let from = parse_datetime(from_text)?;
        let to = parse_datetime(to_text)?;
        if from > to {
            return Err(TaskError::validation("Start time cannot be after end time."));
        }
        Ok(Task::Event {
            description: description.trim().to_string(),
            done: false,
            from,
            to,
        })
    }

    pub fn description(&self) -> &str {
        match self {
            Task::Todo { description, .. }
            | Task::Deadline { description, .. }
            | Task::Event { description, .. } => description,
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            Task::Todo { done, .. } | Task::Deadline { done, .. } | Task::Event { done, .. } => {
                *done
            }
        }
    }

    /// Set the completion flag. Idempotent.
    pub fn set_done(&mut self, value: bool) {
        match self {
            Task::Todo { done, .. } | Task::Deadline { done, .. } | Task::Event { done, .. } => {
                *done = value
            }
        }
    }

    /// Single-letter kind tag used in both rendering and the file format.
    pub fn kind_tag(&self) -> &'static str {
        match self {
            Task::Todo { .. } => "T",
            Task::Deadline { .. } => "D",
            Task::Event { .. } => "E",
        }
    }

    /// The date-time this task orders by. `None` for todos, which sort
    /// after every dated task.
    pub fn sort_key(&self) -> Option<NaiveDateTime> {
        match self {
            Task::Todo { .. } => None,
            Task::Deadline { by, .. } => Some(*by),
            Task::Event { from, .. } => Some(*from),
        }
    }

    /// Human-readable line, e.g. `[D] [X] return book (by: Dec 02 2019 6:00PM)`.
    pub fn render(&self) -> String {
        let status = if self.is_done() { "X" } else { " " };
        let head = format!("[{}] [{}] {}", self.kind_tag(), status, self.description());
        match self {
            Task::Todo { .. } => head,
            Task::Deadline { by, .. } => {
                format!("{head} (by: {})", by.format(DISPLAY_FORMAT))
            }
            Task::Event { from, to, .. } => format!(
                "{head} (from: {} to: {})",
                from.format(DISPLAY_FORMAT),
                to.format(DISPLAY_FORMAT)
            ),
        }
    }

    /// Persisted line for this task, e.g. `D | 0 | return book | 2019-12-02 1800`.
    ///
    /// Left inverse of the storage codec's per-line decode.
    pub fn encode(&self) -> String {
        let done = if self.is_done() { "1" } else { "0" };
        match self {
            Task::Todo { description, .. } => format!("T | {done} | {description}"),
            Task::Deadline {
                description, by, ..
            } => format!("D | {done} | {description} | {}", by.format(MACHINE_FORMAT)),
            Task::Event {
                description,
                from,
                to,
                ..
            } => format!(
                "E | {done} | {description} | {} | {}",
                from.format(MACHINE_FORMAT),
                to.format(MACHINE_FORMAT)
            ),
        }
    }
}
