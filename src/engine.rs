//! The command engine boundary consumed by front-ends.
//!
//! A host hands each raw input line to [`Engine::handle`] and renders the
//! returned [`Outcome`]. The engine is synchronous and assumes exclusive,
//! non-reentrant access; event-driven hosts must serialize calls.

use crate::command::Outcome;
use crate::error::Result;
use crate::parser;
use crate::storage;
use crate::tasklist::TaskList;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct Engine {
    tasks: TaskList,
    data_path: PathBuf,
}

impl Engine {
    /// Load the persisted task list, creating the data file if absent.
    ///
    /// Returns the engine and the number of corrupt lines that were
    /// skipped during the load, for the host to surface as a warning.
    pub fn bootstrap(data_path: impl Into<PathBuf>) -> Result<(Engine, usize)> {
        let data_path = data_path.into();
        let (tasks, skipped) = storage::load(&data_path)?;
        if skipped > 0 {
            warn!(skipped, "data file contained corrupt records");
        }
        let engine = Engine {
            tasks: TaskList::from_tasks(tasks),
            data_path,
        };
        Ok((engine, skipped))
    }

    /// An engine over an empty list, for hosts that could not load the
    /// data file but still want to run. Saves still target `data_path`.
    pub fn empty(data_path: impl Into<PathBuf>) -> Engine {
        Engine {
            tasks: TaskList::new(),
            data_path: data_path.into(),
        }
    }

    /// Parse and apply one line of input, persisting the list when the
    /// command mutated it.
    ///
    /// On any error the task list is unchanged and nothing is written.
    /// After `Outcome::Exit` the host must stop dispatching.
    pub fn handle(&mut self, raw: &str) -> Result<Outcome> {
        let command = parser::parse(raw)?;
        let persist = command.mutates();
        let outcome = command.apply(&mut self.tasks)?;
        if persist {
            storage::save(&self.data_path, &self.tasks.snapshot())?;
        }
        Ok(outcome)
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use std::fs;
    use tempfile::TempDir;

    fn engine_in(dir: &TempDir) -> Engine {
        let (engine, skipped) = Engine::bootstrap(dir.path().join("tasks.txt")).unwrap();
        assert_eq!(skipped, 0);
        engine
    }

    #[test]
    fn bootstrap_creates_data_file() {
        let dir = TempDir::new().unwrap();
        let engine = engine_in(&dir);
        assert!(engine.data_path().exists());
        assert!(engine.tasks().is_empty());
    }

    #[test]
    fn mutating_commands_persist() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);

        engine.handle("todo read book").unwrap();
        engine.handle("mark 1").unwrap();

        let contents = fs::read_to_string(engine.data_path()).unwrap();
        assert_eq!(contents, "T | 1 | read book\n");
    }

    #[test]
    fn read_only_commands_do_not_write() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);
        engine.handle("todo x").unwrap();
        fs::write(engine.data_path(), "sentinel").unwrap();

        engine.handle("list").unwrap();
        engine.handle("find x").unwrap();
        engine.handle("help").unwrap();

        let contents = fs::read_to_string(engine.data_path()).unwrap();
        assert_eq!(contents, "sentinel");
    }

    #[test]
    fn failed_command_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);
        engine.handle("todo x").unwrap();

        assert!(matches!(engine.handle("delete 9"), Err(TaskError::Index(8))));
        assert!(matches!(
            engine.handle("deadline no date"),
            Err(TaskError::Validation(_))
        ));
        assert_eq!(engine.tasks().len(), 1);
    }

    #[test]
    fn bootstrap_reloads_persisted_tasks_and_reports_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        {
            let (mut engine, _) = Engine::bootstrap(&path).unwrap();
            engine.handle("todo read book").unwrap();
            engine
                .handle("deadline return book /by 2019-12-02 1800")
                .unwrap();
        }

        // Corrupt one record on disk between sessions.
        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push_str("garbage line\n");
        fs::write(&path, contents).unwrap();

        let (engine, skipped) = Engine::bootstrap(&path).unwrap();
        assert_eq!(engine.tasks().len(), 2);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn exit_is_reported_to_the_host() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);
        assert!(matches!(engine.handle("bye").unwrap(), Outcome::Exit));
    }
}
