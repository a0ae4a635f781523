use std::io;
use std::process::ExitCode;

use anyhow::Context;
use rag::{Config, answer_query, init_tracing, run_repl};

fn main() -> ExitCode {
    init_tracing();

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cfg: &Config) -> anyhow::Result<()> {
    println!("--- Peach Blossom Spring RAG ---");
    println!("Chat model: {} / vector table: {}", cfg.chat_model, cfg.vector_table);
    println!("Type 'exit' or 'quit' to leave.");
    println!("{}", "-".repeat(30));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_repl(stdin.lock(), &mut stdout, |question| {
        let outcome = answer_query(cfg, question);
        for degradation in &outcome.degradations {
            tracing::debug!(%degradation, "stage fell back");
        }
        outcome.answer
    })
    .context("interactive loop failed")
}
