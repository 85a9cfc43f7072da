use crate::error::Result;
use crate::task::Task;
use crate::tasklist::TaskList;
use chrono::NaiveDate;

/// A validated, executable operation derived from one line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Task),
    Mark(usize),
    Unmark(usize),
    Delete(usize),
    Find(String),
    List,
    Sort,
    Help,
    Exit,
}

/// How a `find` query was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindQuery {
    Keyword(String),
    Date(NaiveDate),
}

/// Presentation-agnostic result of applying a command: the kind of
/// operation performed plus the data a front-end needs to render it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added { task: Task, total: usize },
    Deleted { task: Task, total: usize },
    Marked { task: Task },
    Unmarked { task: Task },
    Found { matches: Vec<Task>, query: FindQuery },
    Listing(Vec<Task>),
    Sorted,
    Help,
    Exit,
}

impl Command {
    /// Whether applying this command changes the task list, obliging the
    /// caller to persist afterwards.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add(_)
                | Command::Mark(_)
                | Command::Unmark(_)
                | Command::Delete(_)
                | Command::Sort
        )
    }

    /// Apply this command to the task list.
    ///
    /// On any error the list is left exactly as it was. After `Exit` the
    /// caller must not dispatch further commands.
    pub fn apply(self, tasks: &mut TaskList) -> Result<Outcome> {
        match self {
            Command::Add(task) => {
                tasks.add(task.clone());
                Ok(Outcome::Added {
                    task,
                    total: tasks.len(),
                })
            }
            Command::Delete(index) => {
                let task = tasks.remove(index)?;
                Ok(Outcome::Deleted {
                    task,
                    total: tasks.len(),
                })
            }
            Command::Mark(index) => {
                let task = tasks.set_done(index, true)?;
                Ok(Outcome::Marked { task })
            }
            Command::Unmark(index) => {
                let task = tasks.set_done(index, false)?;
                Ok(Outcome::Unmarked { task })
            }
            Command::Find(text) => {
                // A query shaped exactly like yyyy-MM-dd searches by
                // date; anything else, including unpadded near-dates
                // such as 2025-3-1, is a keyword search.
                let as_date = NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                    .ok()
                    .filter(|d| d.format("%Y-%m-%d").to_string() == text);
                match as_date {
                    Some(date) => Ok(Outcome::Found {
                        matches: tasks.find_by_date(&text)?,
                        query: FindQuery::Date(date),
                    }),
                    None => Ok(Outcome::Found {
                        matches: tasks.find_by_keyword(&text),
                        query: FindQuery::Keyword(text),
                    }),
                }
            }
            Command::List => Ok(Outcome::Listing(tasks.snapshot())),
            Command::Sort => {
                tasks.sort();
                Ok(Outcome::Sorted)
            }
            Command::Help => Ok(Outcome::Help),
            Command::Exit => Ok(Outcome::Exit),
        }
    }
}
