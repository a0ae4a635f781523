use std::process::ExitCode;

use anyhow::Context;
use rag::{Config, ingest_document, init_tracing};

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
    let report = ingest_document(cfg, &cfg.document_path)
        .with_context(|| format!("ingesting {}", cfg.document_path.display()))?;
    println!(
        "Inserted {} rows into {} ({} chunks).",
        report.inserted, cfg.vector_table, report.chunks
    );
    Ok(())
}
