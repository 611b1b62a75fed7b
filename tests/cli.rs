use std::fs;

use clap::Parser;
use housing_predictor::cli::{self, Cli, Command};
use predictor::{
    ArtifactStore, Model, OceanProximity, PersistPolicy, Predictor, PredictorConfig, Scaler,
    Strictness, FEATURE_NAMES,
};
use tempfile::TempDir;

fn predictor() -> Predictor {
    let names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
    let mut coef = vec![0.0; 9];
    coef[7] = 10_000.0;
    coef[8] = 1_000.0;

    Predictor::new(
        Scaler::Standard {
            feature_names: names.clone(),
            mean: vec![0.0; 9],
            scale: vec![1.0; 9],
        },
        Model::LinearRegression {
            feature_names: names,
            coef,
            intercept: 100_000.0,
        },
    )
}

/// Writes the artifacts into `dir` and returns the flags pointing at them.
fn artifact_args(dir: &TempDir) -> Vec<String> {
    let model = dir.path().join("housing_model.json");
    let scaler = dir.path().join("scaler.json");
    ArtifactStore::new(&model, &scaler)
        .persist(&predictor())
        .unwrap();

    vec![
        "--model".into(),
        model.display().to_string(),
        "--scaler".into(),
        scaler.display().to_string(),
    ]
}

fn run(args: &[String]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("housing-predictor".to_string()).chain(args.iter().cloned()))?;
    let config = cli.resolve(PredictorConfig::default());

    let mut out = Vec::new();
    cli::run(&cli.command, &config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn flags_override_the_config() {
    let cli = Cli::try_parse_from([
        "housing-predictor",
        "manual",
        "--model",
        "m.json",
        "--strict",
        "--persist",
        "always",
    ])
    .unwrap();

    let config = cli.resolve(PredictorConfig::default());

    assert_eq!(config.model_path, std::path::PathBuf::from("m.json"));
    assert_eq!(config.scaler_path, PredictorConfig::default().scaler_path);
    assert_eq!(config.strictness, Strictness::Strict);
    assert_eq!(config.persist, PersistPolicy::Always);
}

#[test]
fn manual_flags_fill_the_form() {
    let cli = Cli::try_parse_from([
        "housing-predictor",
        "manual",
        "--longitude",
        "-122.5",
        "--median-income",
        "4.5",
        "--ocean-proximity",
        "NEAR BAY",
    ])
    .unwrap();

    let Command::Manual(manual) = cli.command else {
        panic!("expected the manual command");
    };
    let input = manual.input();

    assert_eq!(input.longitude, -122.5);
    assert_eq!(input.latitude, 35.0);
    assert_eq!(input.median_income, 4.5);
    assert_eq!(input.ocean_proximity, OceanProximity::NearBay);
}

#[test]
fn unknown_proximity_is_a_usage_error() {
    let err = Cli::try_parse_from(["housing-predictor", "manual", "--ocean-proximity", "MOON"])
        .unwrap_err();

    assert!(err.to_string().contains("expected one of"));
}

#[test]
fn check_describes_both_artifacts() {
    let dir = TempDir::new().unwrap();
    let mut argv = artifact_args(&dir);
    argv.push("check".into());

    let out = run(&argv).unwrap();

    assert!(out.contains("linear_regression, 9 features"), "{out}");
    assert!(out.contains("standard, 9 features"), "{out}");
}

#[test]
fn missing_artifacts_fail_every_command() {
    let dir = TempDir::new().unwrap();
    let mut argv = args(&["--model", "nope.json", "--scaler", "nope.json", "manual"]);
    argv.iter_mut().for_each(|a| {
        if a == "nope.json" {
            *a = dir.path().join("nope.json").display().to_string();
        }
    });

    let err = run(&argv).unwrap_err();

    assert!(err.to_string().starts_with("Model or scaler file not found."));
}

#[test]
fn manual_prints_the_formatted_price() {
    let dir = TempDir::new().unwrap();
    let mut argv = artifact_args(&dir);
    argv.push("manual".into());

    assert_eq!(run(&argv).unwrap(), "Predicted Price: $130,000.00\n");
}

#[test]
fn bulk_prints_and_exports_the_table() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("houses.csv");
    let output = dir.path().join("predictions.csv");
    fs::write(
        &input,
        "median_income,ocean_proximity,median_house_value\n4.5,NEAR BAY,350000\n",
    )
    .unwrap();

    let mut argv = artifact_args(&dir);
    argv.extend(args(&["bulk", input.to_str().unwrap(), "--output", output.to_str().unwrap()]));

    let out = run(&argv).unwrap();

    assert!(out.contains("Predicted_Price"), "{out}");
    assert!(out.contains("$148,000.00"), "{out}");
    assert!(out.contains("note: dropped ground truth column median_house_value"), "{out}");
    assert!(out.contains("saved 1 row(s)"), "{out}");

    let written = fs::read_to_string(&output).unwrap();
    assert!(!written.contains("median_house_value"));
    assert!(written.lines().nth(1).unwrap().ends_with(",3,148000"));
}

#[test]
fn strict_bulk_rejects_partial_uploads() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("partial.csv");
    fs::write(&input, "median_income\n4.5\n").unwrap();

    let mut argv = artifact_args(&dir);
    argv.extend(args(&["--strict", "bulk", input.to_str().unwrap()]));

    assert!(run(&argv).is_err());
}

#[test]
fn persist_always_rewrites_identical_artifacts() {
    let dir = TempDir::new().unwrap();
    let mut argv = artifact_args(&dir);
    let model = dir.path().join("housing_model.json");
    let before = fs::read(&model).unwrap();

    argv.extend(args(&["--persist", "always", "manual"]));
    run(&argv).unwrap();

    assert_eq!(fs::read(&model).unwrap(), before);
}
