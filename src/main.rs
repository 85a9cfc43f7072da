use anyhow::Context;
use std::io::{self, BufRead, Write};
use taskline::{Engine, FindQuery, Outcome, Task};

const DATA_FILE: &str = "data/tasks.txt";

const HELP_TEXT: &str = "\
Available commands:
todo <desc>                     - Add a todo
deadline <desc> /by <time>      - Add a deadline
event <desc> /from <start> /to <end> - Add an event
list                            - Show all tasks
mark <index>                    - Mark task as done
unmark <index>                  - Mark task as not done
delete <index>                  - Delete a task
find <keyword or yyyy-MM-dd>    - Find tasks by keyword or date
sort                            - Sort deadlines/events by date
bye                             - Exit the app";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let (mut engine, skipped) = match Engine::bootstrap(DATA_FILE) {
        Ok(loaded) => loaded,
        Err(e) => {
            // Start usable even when the data file is unreadable.
            println!("Error loading: {e}");
            println!("Starting with empty task list.");
            (Engine::empty(DATA_FILE), 0)
        }
    };

    println!("Loaded {} tasks.", engine.tasks().len());
    if skipped > 0 {
        println!("Warning: skipped {skipped} corrupt lines in the data file.");
    }
    println!("Hello! I'm taskline");
    println!("What can I do for you?");
    println!("Type 'help' for a list of commands.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading input")?;
        match engine.handle(&line) {
            Ok(Outcome::Exit) => {
                println!("Bye. Hope to see you again soon!");
                break;
            }
            Ok(outcome) => print!("{}", render(&outcome)),
            Err(e) => println!("{e}"),
        }
        io::stdout().flush().ok();
    }
    Ok(())
}

fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Added { task, total } => format!(
            "Got it. I've added this task:\n  {}\nNow you have {total} tasks in the list.\n",
            task.render()
        ),
        Outcome::Deleted { task, total } => format!(
            "Noted. I've removed this task:\n  {}\nNow you have {total} tasks in the list.\n",
            task.render()
        ),
        Outcome::Marked { task } => {
            format!("Nice! I've marked this task as done:\n  {}\n", task.render())
        }
        Outcome::Unmarked { task } => format!(
            "OK, I've marked this task as not done yet:\n  {}\n",
            task.render()
        ),
        Outcome::Found { matches, query } => render_matches(matches, query),
        Outcome::Listing(tasks) => {
            if tasks.is_empty() {
                return "Your task list is empty!\n".to_string();
            }
            let mut out = String::from("Here are the tasks in your list:\n");
            for (i, task) in tasks.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, task.render()));
            }
            out
        }
        Outcome::Sorted => "Tasks sorted by deadline/event time!\n".to_string(),
        Outcome::Help => format!("{HELP_TEXT}\n"),
        Outcome::Exit => String::new(),
    }
}

fn render_matches(matches: &[Task], query: &FindQuery) -> String {
    let label = match query {
        FindQuery::Keyword(kw) => format!("matching '{kw}'"),
        FindQuery::Date(date) => format!("on {}", date.format("%b %d %Y")),
    };
    if matches.is_empty() {
        return format!("No tasks found {label}.\n");
    }
    let mut out = format!("Here are the tasks {label}:\n");
    for (i, task) in matches.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, task.render()));
    }
    out
}
