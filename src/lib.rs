//! taskline - a line-command personal task tracker.
//!
//! This library contains the command engine: parser, task model, the owned
//! task collection, and the durable line codec. Presentation (the read
//! loop and message formatting) lives in the binary and consumes the
//! engine only through [`engine::Engine`].

pub mod command;
pub mod engine;
pub mod error;
pub mod parser;
pub mod storage;
pub mod task;
pub mod tasklist;

pub use command::{Command, FindQuery, Outcome};
pub use engine::Engine;
pub use error::{Result, TaskError};
pub use task::Task;
pub use tasklist::TaskList;
