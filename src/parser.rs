//! Turns one raw line of user input into a validated [`Command`].
//!
//! The parser owns all tokenization rules: verb dispatch, the `/by`,
//! `/from` and `/to` markers, and 1-based task numbers. It never
//! bounds-checks an index against the list; that happens at execution
//! time and produces a distinct error.

use crate::command::Command;
use crate::error::{Result, TaskError};
use crate::task::Task;

/// Parse a full input line into a command, or a validation error with a
/// corrective message. Never produces a partially valid command.
pub fn parse(raw: &str) -> Result<Command> {
    // Only leading whitespace is stripped before the verb split: the
    // marker searches below must still see input like "... /by " whose
    // date text is empty, to report the specific missing piece.
    let line = raw.trim_start();
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (line.trim_end(), ""),
    };
    if verb.is_empty() {
        return Err(TaskError::validation("The command is empty!"));
    }

    match verb.to_lowercase().as_str() {
        "bye" => Ok(Command::Exit),
        "list" => Ok(Command::List),
        "help" => Ok(Command::Help),
        "sort" => Ok(Command::Sort),
        "todo" => Ok(Command::Add(Task::todo(rest)?)),
        "deadline" => parse_deadline(rest),
        "event" => parse_event(rest),
        "mark" => Ok(Command::Mark(parse_index(verb, rest)?)),
        "unmark" => Ok(Command::Unmark(parse_index(verb, rest)?)),
        "delete" => Ok(Command::Delete(parse_index(verb, rest)?)),
        "find" => {
            let query = rest.trim();
            if query.is_empty() {
                return Err(TaskError::validation("Please enter a keyword to search for."));
            }
            Ok(Command::Find(query.to_string()))
        }
        _ => Err(TaskError::Validation(format!(
            "I don't know what '{}' means. Type 'help' to see what I can do.",
            line.trim_end()
        ))),
    }
}

fn parse_deadline(rest: &str) -> Result<Command> {
    let Some((desc, by_text)) = rest.split_once("/by ") else {
        return Err(TaskError::validation(
            "A deadline task must include a task and '/by'. \
             Example: deadline return book /by 2025-03-10 1300",
        ));
    };
    let desc = desc.trim();
    let by_text = by_text.trim();
    if desc.is_empty() {
        return Err(TaskError::validation(
            "The description of a deadline cannot be empty.",
        ));
    }
    if by_text.is_empty() {
        return Err(TaskError::validation(
            "The '/by' part cannot be empty. Please specify when it's due.",
        ));
    }
    Ok(Command::Add(Task::deadline(desc, by_text)?))
}

fn parse_event(rest: &str) -> Result<Command> {
    let from_at = rest.find("/from ");
    let to_at = rest.find("/to ");
    let Some(from_at) = from_at else {
        return Err(TaskError::validation(
            "An event must include '/from' to specify start time and '/to' to specify end time. \
             Example: event birthday /from 2025-03-11 0000 /to 2025-03-11 2359",
        ));
    };
    let Some(to_at) = to_at else {
        return Err(TaskError::validation(
            "An event must include '/to' to specify end time.",
        ));
    };
    if from_at >= to_at {
        return Err(TaskError::validation(
            "'/from' must come before '/to' in the input.",
        ));
    }

    let desc = rest[..from_at].trim();
    let from_text = rest[from_at + "/from ".len()..to_at].trim();
    let to_text = rest[to_at + "/to ".len()..].trim();
    if desc.is_empty() {
        return Err(TaskError::validation(
            "The description of an event cannot be empty.",
        ));
    }
    if from_text.is_empty() {
        return Err(TaskError::validation(
            "The '/from' part cannot be empty. Please specify a start time.",
        ));
    }
    if to_text.is_empty() {
        return Err(TaskError::validation(
            "The '/to' part cannot be empty. Please specify an end time.",
        ));
    }
    Ok(Command::Add(Task::event(desc, from_text, to_text)?))
}

/// Convert the remaining token of `mark 3` and friends into a 0-based
/// index. The task number on the wire is 1-based.
fn parse_index(verb: &str, rest: &str) -> Result<usize> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(TaskError::Validation(format!(
            "Please specify a task number. Example: {verb} 1"
        )));
    }
    match rest.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(TaskError::validation("Task number must be a valid number.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_parses_into_add() {
        let cmd = parse("todo read book").unwrap();
        let Command::Add(task) = cmd else {
            panic!("expected add");
        };
        assert_eq!(task.render(), "[T] [ ] read book");
    }

    #[test]
    fn todo_without_description_fails() {
        assert!(parse("todo").is_err());
        assert!(parse("todo    ").is_err());
    }

    #[test]
    fn deadline_parses_description_and_by() {
        let cmd = parse("deadline return book /by 2025-03-10 1300").unwrap();
        let Command::Add(Task::Deadline {
            description, by, ..
        }) = cmd
        else {
            panic!("expected deadline");
        };
        assert_eq!(description, "return book");
        assert_eq!(by.format("%Y-%m-%dT%H:%M").to_string(), "2025-03-10T13:00");
    }

    #[test]
    fn deadline_missing_by_names_the_marker() {
        let err = parse("deadline return book").unwrap_err();
        assert!(err.to_string().contains("/by"));
    }

    #[test]
    fn deadline_empty_description_fails() {
        assert!(parse("deadline /by 2025-03-15 2359").is_err());
    }

    #[test]
    fn deadline_empty_by_fails() {
        assert!(parse("deadline return book /by ").is_err());
    }

    #[test]
    fn deadline_trailing_empty_by_gets_specific_message() {
        let err = parse("deadline return book /by ").unwrap_err();
        assert!(err.to_string().contains("'/by' part cannot be empty"));
    }

    #[test]
    fn description_with_field_separator_fails() {
        assert!(parse("todo read | write").is_err());
        assert!(parse("deadline a | b /by 2025-03-10 1300").is_err());
    }

    #[test]
    fn event_parses_all_parts() {
        let cmd = parse("event Team Sync /from 2025-03-16 1000 /to 2025-03-16 1100").unwrap();
        let Command::Add(Task::Event { from, to, .. }) = cmd else {
            panic!("expected event");
        };
        assert_eq!(from.format("%H%M").to_string(), "1000");
        assert_eq!(to.format("%H%M").to_string(), "1100");
    }

    #[test]
    fn event_missing_from_fails() {
        assert!(parse("event Team Sync /to 2025-03-16 1100").is_err());
    }

    #[test]
    fn event_missing_to_fails() {
        assert!(parse("event Team Sync /from 2025-03-16 1000").is_err());
    }

    #[test]
    fn event_from_after_to_fails() {
        assert!(parse("event sync /from 2025-03-16 1100 /to 2025-03-16 1000").is_err());
    }

    #[test]
    fn event_markers_out_of_order_fail() {
        assert!(parse("event sync /to 2025-03-16 1100 /from 2025-03-16 1000").is_err());
    }

    #[test]
    fn mark_converts_to_zero_based() {
        assert!(matches!(parse("mark 1").unwrap(), Command::Mark(0)));
        assert!(matches!(parse("unmark 3").unwrap(), Command::Unmark(2)));
        assert!(matches!(parse("delete 2").unwrap(), Command::Delete(1)));
        assert!(matches!(parse("mark 1 ").unwrap(), Command::Mark(0)));
    }

    #[test]
    fn mark_without_number_fails() {
        let err = parse("mark").unwrap_err();
        assert!(err.to_string().contains("task number"));
    }

    #[test]
    fn mark_with_non_number_fails() {
        assert!(parse("mark abc").is_err());
        assert!(parse("mark 0").is_err());
        assert!(parse("mark -1").is_err());
    }

    #[test]
    fn find_carries_the_query() {
        let Command::Find(query) = parse("find 2025-03-18").unwrap() else {
            panic!("expected find");
        };
        assert_eq!(query, "2025-03-18");
    }

    #[test]
    fn find_without_query_fails() {
        assert!(parse("find").is_err());
    }

    #[test]
    fn bare_commands_parse() {
        assert!(matches!(parse("list").unwrap(), Command::List));
        assert!(matches!(parse("sort").unwrap(), Command::Sort));
        assert!(matches!(parse("help").unwrap(), Command::Help));
        assert!(matches!(parse("bye").unwrap(), Command::Exit));
        assert!(matches!(parse("LIST").unwrap(), Command::List));
    }

    #[test]
    fn unknown_and_empty_input_fail() {
        assert!(parse("unknowncommand hello").is_err());
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }
}
