use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use predictor::{BulkPrediction, ManualInput, Predictor, Strictness};

/// Everything a screen needs to run predictions.
///
/// Built once at startup from the loaded artifacts and handed to every key
/// handler by reference.
#[derive(Debug)]
pub struct Session {
    predictor: Predictor,
    strictness: Strictness,
}

impl Session {
    pub fn new(predictor: Predictor, strictness: Strictness) -> Self {
        Self {
            predictor,
            strictness,
        }
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// Reads the CSV at `path` and predicts every row.
    ///
    /// # Errors
    /// Any I/O, parsing or preprocessing failure, unchanged.
    pub fn predict_file(&self, path: &Path) -> predictor::Result<BulkPrediction> {
        let file = File::open(path)?;
        let bulk = self
            .predictor
            .predict_csv(BufReader::new(file), self.strictness)?;

        info!("predicted {} row(s) from {}", bulk.len(), path.display());
        Ok(bulk)
    }

    pub fn predict_manual(&self, input: &ManualInput) -> predictor::Result<f64> {
        self.predictor.predict_manual(input)
    }

    /// Writes the augmented table to `path`.
    pub fn export(&self, bulk: &BulkPrediction, path: &Path) -> predictor::Result<()> {
        let file = File::create(path)?;
        bulk.write_csv(BufWriter::new(file))
    }
}
