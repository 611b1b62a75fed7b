pub mod artifacts;
pub mod config;
pub mod error;
pub mod features;
pub mod format;
pub mod frame;
pub mod manual;
pub mod pipeline;
pub mod regressor;
pub mod scaler;

pub use artifacts::ArtifactStore;
pub use config::{PersistPolicy, PredictorConfig, Strictness};
pub use error::{PredictorError, Result};
pub use features::{FEATURE_NAMES, OceanProximity};
pub use format::format_currency;
pub use frame::{FeatureFrame, PreprocessReport};
pub use manual::ManualInput;
pub use pipeline::{BulkPrediction, Predictor, price_message};
pub use regressor::{Model, Regressor};
pub use scaler::{Scaler, Transform};
