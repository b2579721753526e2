//! Verity batch entrypoint.
//!
//! Reads JSON-lines jobs from stdin and writes one JSON verdict per line to stdout.

use std::io::{self, BufWriter};

use mimalloc::MiMalloc;

use verity::batch;
use verity::config::Config;
use verity::storage::{JsonlStore, RecordStore};
use verity::verification::TokenVerifier;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let verifier = TokenVerifier::new(config.verifier_config())?;

    tracing::info!(
        threshold = config.threshold,
        min_length_ratio = config.min_length_ratio,
        record = config.record,
        "Verity starting"
    );

    let store = if config.record {
        let store = JsonlStore::new(config.storage_path.clone());
        match store.setup() {
            Ok(()) => Some(store),
            Err(e) => {
                tracing::warn!(
                    "Failed to set up record store: {}. Verdicts will not be persisted.",
                    e
                );
                None
            }
        }
    } else {
        None
    };

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());

    let summary = batch::run(
        stdin,
        stdout,
        &verifier,
        store.as_ref().map(|s| s as &dyn RecordStore),
    )?;

    if summary.malformed > 0 || summary.persist_failures > 0 {
        tracing::warn!(
            malformed = summary.malformed,
            persist_failures = summary.persist_failures,
            "Some jobs were not fully processed"
        );
    }

    Ok(())
}
