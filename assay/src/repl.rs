use crate::session::Session;
use colored::Colorize;
use rustyline::{DefaultEditor, error::ReadlineError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Empty,
    Help,
    Exit,
    Question(String),
}

#[must_use]
pub fn parse_repl_input(line: &str) -> ReplInput {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Empty;
    }

    match line.to_ascii_lowercase().as_str() {
        "exit" | "quit" => ReplInput::Exit,
        "help" => ReplInput::Help,
        _ => ReplInput::Question(line.to_string()),
    }
}

fn repl_help() {
    println!(
        "\
Ask a question about movies, for example:
  who directed the matrix?
  which movies did christopher nolan direct
  what is the revenue of avatar
  which genres were most successful in 1999
  what is the yearly box office trend

  help                  Show this help
  exit | quit           Leave
"
    );
}

fn prompt() -> String {
    format!("{} ", "You ▸".bright_blue().bold())
}

/// Reads questions until `exit`/`quit` or end of input, answering each before
/// reading the next. Closes the session on the way out.
pub async fn run(session: &Session) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("Welcome to the Movie QA System! Type 'exit' to quit.\n");

    let result = loop {
        match rl.readline(&prompt()) {
            Ok(line) => match parse_repl_input(&line) {
                ReplInput::Empty => {}
                ReplInput::Help => repl_help(),
                ReplInput::Exit => break Ok(()),
                ReplInput::Question(question) => {
                    let _ = rl.add_history_entry(question.as_str());
                    let reply = session.answer(&question).await;
                    println!("{} {}", "Bot:".bright_green().bold(), reply.text);
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break Ok(()),
            Err(e) => break Err(e.into()),
        }
    };

    session.close().await;
    println!("Goodbye!");
    result
}
