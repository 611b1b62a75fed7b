use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type used in the entire predictor crate.
pub type Result<T> = std::result::Result<T, PredictorError>;

/// The predictor crate's error type.
#[derive(Debug)]
pub enum PredictorError {
    /// One or both artifact files are absent, nothing else may run.
    ArtifactsMissing {
        model: PathBuf,
        scaler: PathBuf,
        missing: Vec<PathBuf>,
    },
    /// An artifact parsed but its content does not fit the feature layout.
    InvalidArtifact { path: PathBuf, reason: String },
    /// The uploaded table lacks expected columns and the strict policy is on.
    MissingColumns(Vec<&'static str>),
    /// A category outside the lookup table was found and the strict policy is on.
    UnknownCategory { row: usize, value: String },
    /// A numeric cell could not be parsed.
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidConfig(String),
    Csv(csv::Error),
    Json { path: PathBuf, source: serde_json::Error },
    Io(io::Error),
}

impl Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArtifactsMissing { model, scaler, .. } => write!(
                f,
                "Model or scaler file not found. Please ensure '{}' and '{}' are present.",
                model.display(),
                scaler.display()
            ),
            Self::InvalidArtifact { path, reason } => {
                write!(f, "invalid artifact '{}': {reason}", path.display())
            }
            Self::MissingColumns(columns) => {
                write!(f, "input is missing expected columns: {}", columns.join(", "))
            }
            Self::UnknownCategory { row, value } => {
                write!(f, "row {row}: unknown ocean_proximity category '{value}'")
            }
            Self::InvalidValue { row, column, value } => {
                write!(f, "row {row}: cannot parse '{value}' in column {column} as a number")
            }
            Self::SizeMismatch { what, got, expected } => {
                write!(f, "size mismatch in {what}: got {got}, expected {expected}")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Csv(e) => write!(f, "csv error: {e}"),
            Self::Json { path, source } => {
                write!(f, "cannot parse '{}': {source}", path.display())
            }
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for PredictorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(e) => Some(e),
            Self::Json { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PredictorError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PredictorError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
