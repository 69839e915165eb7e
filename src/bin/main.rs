use anyhow::{bail, Context, Result};
use beo_core::ChatEngine;
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use std::io::{stdin, stdout, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_MODEL_PATH: &str = "model.json";
const HOOK_ARG_PREFIX: &str = "hook:";

#[derive(Parser, Debug)]
#[command(name = "beo", version, about = "Train and query a small retrieval chatbot")]
struct Cli {
    /// Knowledge-base file (`.bin` for bincode, anything else is JSON)
    #[arg(long, short, env = "BEO_MODEL", default_value = DEFAULT_MODEL_PATH, global = true)]
    model: PathBuf,

    /// Seed for answer selection, for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask a question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Add a question with answers, or extend an existing one
    Train {
        question: String,
        /// Answers; a trailing `hook:NAME` argument sets the hook
        answers: Vec<String>,
        #[arg(long)]
        hook: Option<String>,
    },
    /// Define a named answer pool
    Hook {
        name: String,
        #[arg(required = true, num_args = 1..)]
        answers: Vec<String>,
    },
    /// Define a %placeholder% value
    Placeholder { key: String, value: String },
    /// Interactive session; type `exit` to quit
    Chat,
    /// Show corrected tokens and matched records for a query
    Explain {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
}

fn init_tracing(verbose: u8) {
    // Quiet unless asked; RUST_LOG wins when set.
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("beo_core={level},beo={level}")));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Splits a trailing `hook:NAME` off the answer list.
fn split_hook_arg(mut answers: Vec<String>, hook: Option<String>) -> (Vec<String>, String) {
    if let Some(hook) = hook {
        return (answers, hook);
    }
    match answers.last().and_then(|a| a.strip_prefix(HOOK_ARG_PREFIX)) {
        Some(name) => {
            let name = name.to_string();
            answers.pop();
            (answers, name)
        }
        None => (answers, String::new()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut engine = ChatEngine::from_file_or_new(&cli.model)
        .with_context(|| format!("failed to load model {}", cli.model.display()))?;
    if let Some(seed) = cli.seed {
        engine = engine.with_seed(seed);
    }

    match cli.command {
        Command::Ask { question } => {
            println!("Answer: {}", engine.ask(&question.join(" ")));
        }
        Command::Train {
            question,
            answers,
            hook,
        } => {
            let (answers, hook) = split_hook_arg(answers, hook);
            if answers.is_empty() && hook.is_empty() {
                bail!("please provide answers or a hook for {question:?}");
            }
            engine.train(&question, answers, &hook);
            engine.save().context("failed to save model")?;
            println!("Model successfully trained.");
        }
        Command::Hook { name, answers } => {
            engine.add_hook(&name, answers);
            engine.save().context("failed to save model")?;
            println!("Hook successfully added.");
        }
        Command::Placeholder { key, value } => {
            engine.add_placeholder(&key, &value);
            engine.save().context("failed to save placeholder")?;
            println!("Placeholder successfully added.");
        }
        Command::Chat => chat(&mut engine)?,
        Command::Explain { question } => explain(&engine, &question.join(" ")),
    }
    Ok(())
}

fn chat(engine: &mut ChatEngine) -> Result<()> {
    let name = engine.knowledge_base().ai_name.clone();
    println!("{} (type 'exit' to quit)", name.as_str().bold());

    let mut out = stdout();
    let mut lines = stdin().lock().lines();
    loop {
        print!("{} ", "you>".cyan().bold());
        out.flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();
        match input {
            "exit" | "quit" => break,
            "" => continue,
            query => {
                let answer = engine.ask(query);
                println!("{} {}", format!("{name}>").green().bold(), answer);
            }
        }
    }
    Ok(())
}

fn explain(engine: &ChatEngine, query: &str) {
    let kb = engine.knowledge_base();
    for trace in engine.explain(query) {
        println!("{} {:?}", "segment:".bold(), trace.segment);
        println!("  tokens:    {}", trace.tokens.join(" "));
        println!("  corrected: {}", trace.corrected.join(" "));
        if trace.matches.is_empty() {
            println!("  {}", "no match".yellow());
        }
        for found in &trace.matches {
            let question = kb
                .record(found.record)
                .map(|r| r.question.as_str())
                .unwrap_or("?");
            println!(
                "  [{}..{}] -> {:?} (similarity {:.3})",
                found.start,
                found.start + found.len,
                question,
                found.similarity
            );
        }
    }
}
