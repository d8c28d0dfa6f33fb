use std::fs::File;
use std::io::{self, BufReader};

use anyhow::Context;
use fitness_tracker_cli::{CliConfig, env_filter, log_filter_from_env, run};

fn main() -> anyhow::Result<()> {
    // Configure logging from env var `TRACKER_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = log_filter_from_env();
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter(&log_env))
        .init();
    tracing::info!("fitness_tracker: log filter: {}", log_env);

    let cfg = CliConfig::from_env().context("failed to load configuration")?;
    tracing::info!(day = %cfg.day, output = ?cfg.output, "fitness_tracker: starting");

    let stdout = io::stdout().lock();
    let stats = match &cfg.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            run(&cfg, BufReader::new(file), stdout)?
        }
        None => run(&cfg, io::stdin().lock(), stdout)?,
    };

    if stats.rejected > 0 {
        tracing::warn!(rejected = stats.rejected, "some records were skipped");
    }
    Ok(())
}
