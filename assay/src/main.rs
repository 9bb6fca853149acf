use anyhow::{Context, Result};
use assay::catalog::{synthesize, template};
use assay::cli::{Cli, Cmd, join_question};
use assay::config::Config;
use assay::executor::Neo4jExecutor;
use assay::intent::Intent;
use assay::recognizer::{
    EntityRecognizer, HttpEntityRecognizer, NullRecognizer, Recognition, Recognizer,
};
use assay::repl;
use assay::render::NOT_UNDERSTOOD;
use assay::session::Session;
use clap::Parser;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(&config, cli.verbose);

    match cli.cmd.unwrap_or(Cmd::Repl) {
        Cmd::Repl => {
            let session = connect(&config).await?;
            repl::run(&session).await?;
        }
        Cmd::Ask { question } => {
            let session = connect(&config).await?;
            let reply = session.answer(&join_question(&question)).await;
            println!("{}", reply.text);
            session.close().await;
        }
        Cmd::Parse { question } => {
            let recognition = build_recognizer(&config)?
                .recognize(&join_question(&question))
                .await;
            println!("Intent: {}", recognition.label());
            match recognition.entities() {
                Some(entities) => println!("Entities: {entities}"),
                None => println!("Entities: {{}}"),
            }
        }
        Cmd::Query { question } => {
            let recognition = build_recognizer(&config)?
                .recognize(&join_question(&question))
                .await;
            print_query(&recognition)?;
        }
        Cmd::Intents => print_intents(),
    }

    Ok(())
}

fn init_tracing(config: &Config, verbose: bool) {
    let level = if verbose {
        Level::DEBUG
    } else {
        config.log.level()
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_recognizer(config: &Config) -> Result<Recognizer> {
    let fallback: Arc<dyn EntityRecognizer> = match &config.ner.url {
        Some(url) => Arc::new(
            HttpEntityRecognizer::new(url.clone()).context("failed to build entity client")?,
        ),
        None => Arc::new(NullRecognizer),
    };
    Ok(Recognizer::new(fallback))
}

async fn connect(config: &Config) -> Result<Session> {
    let executor = Neo4jExecutor::connect(&config.store)
        .await
        .with_context(|| format!("cannot reach graph store at {}", config.store.uri))?;
    Ok(Session::new(build_recognizer(config)?, Arc::new(executor)))
}

fn print_query(recognition: &Recognition) -> Result<()> {
    let Recognition::Matched { intent, entities } = recognition else {
        println!("Intent: {}", recognition.label());
        println!("{NOT_UNDERSTOOD}");
        return Ok(());
    };

    match synthesize(*intent, entities) {
        Ok(query) => {
            println!("Intent:   {intent}");
            println!("Template: {}", query.template_id);
            println!("Params:   {}", serde_json::to_string(&query.params)?);
            println!();
            println!("{}", query.cypher);
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn print_intents() {
    for intent in Intent::iter() {
        let template = template(intent);
        let slots = template
            .required_slots()
            .map(|slot| slot.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:<24} {:<28} [{slots}]", intent.to_string(), template.id);
    }
}
