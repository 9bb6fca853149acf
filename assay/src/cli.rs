use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "assay")]
#[command(about = "Answer questions about a movie knowledge graph")]
pub struct Cli {
    /// Config file (defaults to .assay/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Cmd {
    /// Interactive question loop (default)
    Repl,
    /// Answer a single question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Show the recognized intent and entities
    Parse {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Show the synthesized query without running it
    Query {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// List supported intents and their templates
    Intents,
}

/// Rejoins a question split into shell words.
#[must_use]
pub fn join_question(words: &[String]) -> String {
    words.join(" ")
}
