use crate::error::{Result, TaskError};
use crate::task::Task;
use chrono::{NaiveDate, NaiveDateTime};

/// The owned, ordered task collection.
///
/// Insertion order is the canonical display and index order. All indices
/// are 0-based and validated against the current bounds before any
/// mutation; readers receive clones, never views into the backing store.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> TaskList {
        TaskList::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> TaskList {
        TaskList { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a task. No failure mode.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, index: usize) -> Result<&Task> {
        self.tasks.get(index).ok_or(TaskError::Index(index))
    }

    /// Remove and return the task at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Task> {
        if index >= self.tasks.len() {
            return Err(TaskError::Index(index));
        }
        Ok(self.tasks.remove(index))
    }

    /// Set the completion flag of the task at `index` and return a copy.
    pub fn set_done(&mut self, index: usize, done: bool) -> Result<Task> {
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(TaskError::Index(index))?;
        task.set_done(done);
        Ok(task.clone())
    }

    /// Case-insensitive substring search over descriptions, preserving
    /// list order. Empty input matches nothing.
    pub fn find_by_keyword(&self, keyword: &str) -> Vec<Task> {
        if keyword.is_empty() {
            return Vec::new();
        }
        let needle = keyword.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.description().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Tasks that fall on the given calendar date (`yyyy-MM-dd`).
    ///
    /// Matches a deadline on its due date and an event on its start date.
    /// An event's end date is deliberately not consulted, mirroring the
    /// long-standing behavior of the original tracker.
    pub fn find_by_date(&self, date_text: &str) -> Result<Vec<Task>> {
        let target = NaiveDate::parse_from_str(date_text, "%Y-%m-%d").map_err(|_| {
            TaskError::validation(
                "Please enter a valid date. Format: yyyy-MM-dd (e.g., 2025-03-11)",
            )
        })?;
        Ok(self
            .tasks
            .iter()
            .filter(|t| match t {
                Task::Deadline { by, .. } => by.date() == target,
                Task::Event { from, .. } => from.date() == target,
                Task::Todo { .. } => false,
            })
            .cloned()
            .collect())
    }

    /// Stable sort by date, ascending. Todos carry no date and move to the
    /// end; ties keep their relative order.
    pub fn sort(&mut self) {
        self.tasks
            .sort_by_key(|t| t.sort_key().unwrap_or(NaiveDateTime::MAX));
    }

    /// Independent copy of the whole list, handed to the storage codec so
    /// saves never observe in-flight mutation.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }
}
