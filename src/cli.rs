use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use predictor::features::PREDICTION_COLUMN;
use predictor::{
    format_currency, price_message, ArtifactStore, BulkPrediction, ManualInput, OceanProximity,
    PersistPolicy, PredictorConfig, Regressor, Strictness, Transform, FEATURE_NAMES,
};

#[derive(Debug, Parser)]
#[command(name = "housing-predictor", author, version, about, long_about = None)]
pub struct Cli {
    /// Model artifact, overrides HOUSING_MODEL_PATH
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Scaler artifact, overrides HOUSING_SCALER_PATH
    #[arg(long, global = true)]
    pub scaler: Option<PathBuf>,

    /// Reject missing columns and unknown categories instead of filling them with 0
    #[arg(long, global = true)]
    pub strict: bool,

    /// Write the artifacts back after the command: never or always
    #[arg(long, global = true)]
    pub persist: Option<PersistPolicy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that both artifacts are present and valid
    Check,
    /// Predict every row of a CSV file
    Bulk {
        input: PathBuf,

        /// Also write the table with a Predicted_Price column here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Predict the price of a single house
    Manual(ManualArgs),
}

/// Unset fields keep the form defaults.
#[derive(Debug, Args)]
pub struct ManualArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,
    #[arg(long)]
    pub housing_median_age: Option<f64>,
    #[arg(long)]
    pub total_rooms: Option<f64>,
    #[arg(long)]
    pub total_bedrooms: Option<f64>,
    #[arg(long)]
    pub population: Option<f64>,
    #[arg(long)]
    pub households: Option<f64>,
    #[arg(long)]
    pub median_income: Option<f64>,
    /// One of: <1H OCEAN, INLAND, ISLAND, NEAR BAY, NEAR OCEAN
    #[arg(long, value_parser = parse_proximity)]
    pub ocean_proximity: Option<OceanProximity>,
}

impl ManualArgs {
    pub fn input(&self) -> ManualInput {
        let mut input = ManualInput::default();
        let values = [
            self.longitude,
            self.latitude,
            self.housing_median_age,
            self.total_rooms,
            self.total_bedrooms,
            self.population,
            self.households,
            self.median_income,
        ];

        for (i, value) in values.into_iter().enumerate() {
            if let Some(value) = value {
                input.set_numeric(i, value);
            }
        }
        if let Some(category) = self.ocean_proximity {
            input.ocean_proximity = category;
        }

        input
    }
}

fn parse_proximity(s: &str) -> std::result::Result<OceanProximity, String> {
    OceanProximity::from_label(s).ok_or_else(|| {
        let labels = OceanProximity::ALL.map(|c| c.label()).join(", ");
        format!("unknown ocean proximity '{s}', expected one of: {labels}")
    })
}

impl Cli {
    /// Applies the flags on top of `config`.
    pub fn resolve(&self, mut config: PredictorConfig) -> PredictorConfig {
        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(scaler) = &self.scaler {
            config.scaler_path = scaler.clone();
        }
        if self.strict {
            config.strictness = Strictness::Strict;
        }
        if let Some(persist) = self.persist {
            config.persist = persist;
        }
        config
    }
}

/// Runs `command` against the artifacts named by `config`, writing results to `out`.
///
/// # Errors
/// Missing or invalid artifacts, unreadable input and failed writes.
pub fn run<W: Write>(command: &Command, config: &PredictorConfig, mut out: W) -> Result<()> {
    let store = ArtifactStore::from_config(config);
    let predictor = store.load()?;

    match command {
        Command::Check => {
            writeln!(
                out,
                "model:  {} ({}, {} features)",
                store.model_path().display(),
                predictor.model().kind(),
                predictor.model().num_features()
            )?;
            writeln!(
                out,
                "scaler: {} ({}, {} features)",
                store.scaler_path().display(),
                predictor.scaler().kind(),
                predictor.scaler().num_features()
            )?;
        }
        Command::Bulk { input, output } => {
            let file = File::open(input)
                .with_context(|| format!("failed to open {}", input.display()))?;
            let bulk = predictor.predict_csv(BufReader::new(file), config.strictness)?;

            write_table(&mut out, &bulk)?;
            for message in bulk.report.messages() {
                writeln!(out, "note: {message}")?;
            }

            if let Some(output) = output {
                let file = File::create(output)
                    .with_context(|| format!("failed to create {}", output.display()))?;
                bulk.write_csv(BufWriter::new(file))?;
                writeln!(out, "saved {} row(s) to {}", bulk.len(), output.display())?;
            }
        }
        Command::Manual(args) => {
            let prediction = predictor.predict_manual(&args.input())?;
            writeln!(out, "{}", price_message(prediction))?;
        }
    }

    if config.persist == PersistPolicy::Always {
        store.persist(&predictor)?;
        info!("artifacts written back");
    }

    Ok(())
}

/// Prints the features and formatted predictions as aligned columns.
fn write_table<W: Write>(out: &mut W, bulk: &BulkPrediction) -> Result<()> {
    let header = FEATURE_NAMES
        .iter()
        .map(|s| s.to_string())
        .chain(std::iter::once(PREDICTION_COLUMN.to_string()))
        .collect::<Vec<_>>();

    let rows = bulk
        .rows()
        .into_iter()
        .zip(&bulk.predictions)
        .map(|(mut cells, prediction)| {
            if let Some(last) = cells.last_mut() {
                *last = format_currency(*prediction);
            }
            cells
        })
        .collect::<Vec<_>>();

    let widths = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    for cells in std::iter::once(&header).chain(&rows) {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:>width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "{line}")?;
    }

    Ok(())
}
