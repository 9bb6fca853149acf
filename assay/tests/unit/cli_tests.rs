use assay::cli::{Cli, Cmd, join_question};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_no_subcommand_means_repl() {
    let cli = Cli::parse_from(["assay"]);
    assert_eq!(cli.cmd, None);
    assert!(!cli.verbose);
}

#[test]
fn test_ask_collects_words() {
    let cli = Cli::parse_from(["assay", "ask", "who", "directed", "alien"]);
    let Some(Cmd::Ask { question }) = cli.cmd else {
        panic!("expected ask");
    };
    assert_eq!(join_question(&question), "who directed alien");
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "assay",
        "parse",
        "who directed alien",
        "--config",
        "custom.toml",
        "-v",
    ]);
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    assert!(cli.verbose);
    assert_eq!(
        cli.cmd,
        Some(Cmd::Parse {
            question: vec!["who directed alien".to_string()],
        })
    );
}

#[test]
fn test_question_is_required() {
    assert!(Cli::try_parse_from(["assay", "query"]).is_err());
}

#[test]
fn test_intents() {
    let cli = Cli::parse_from(["assay", "intents"]);
    assert_eq!(cli.cmd, Some(Cmd::Intents));
}
