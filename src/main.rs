use std::io;

use anyhow::Result;
use clap::Parser;
use housing_predictor::cli::{self, Cli};
use predictor::PredictorConfig;

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let cli = Cli::parse();
    let config = cli.resolve(PredictorConfig::from_env()?);

    cli::run(&cli.command, &config, io::stdout().lock())
}
