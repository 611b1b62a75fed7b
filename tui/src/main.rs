use std::fs::File;

use anyhow::{Context, Result};
use predictor::PredictorConfig;

mod app;
mod state;
mod ui;

/// The terminal owns stdout, so logs go to a file next to the working directory.
const LOG_FILE: &str = "housing-tui.log";

fn main() -> Result<()> {
    let log_file =
        File::create(LOG_FILE).with_context(|| format!("failed to create {LOG_FILE}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let config = PredictorConfig::from_env()?;
    app::run::run(config)
}
