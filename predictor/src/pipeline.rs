use std::io;

use log::info;

use crate::{
    PredictorError, Result,
    config::Strictness,
    features::PREDICTION_COLUMN,
    format::format_currency,
    frame::{FeatureFrame, PreprocessReport},
    manual::ManualInput,
    regressor::{Model, Regressor},
    scaler::{Scaler, Transform},
};

/// A loaded scaler and model, owned by the session that loaded them.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictor<S = Scaler, M = Model> {
    scaler: S,
    model: M,
}

impl<S, M> Predictor<S, M>
where
    S: Transform,
    M: Regressor,
{
    /// Creates a new `Predictor`.
    ///
    /// # Arguments
    /// * `scaler` - The transform applied to every row first.
    /// * `model` - The model applied to the scaled rows.
    pub fn new(scaler: S, model: M) -> Self {
        Self { scaler, model }
    }

    pub fn scaler(&self) -> &S {
        &self.scaler
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Scales then predicts every row of the frame.
    ///
    /// # Returns
    /// One prediction per row, in row order.
    pub fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>> {
        if self.scaler.num_features() != self.model.num_features() {
            return Err(PredictorError::SizeMismatch {
                what: "model features against scaler features",
                got: self.model.num_features(),
                expected: self.scaler.num_features(),
            });
        }

        let scaled = self.scaler.transform(frame.view())?;
        let predictions = self.model.predict(scaled.view())?;

        info!("predicted {} row(s)", predictions.len());
        Ok(predictions.to_vec())
    }

    /// Runs the upload path: reindex, encode, scale, predict.
    ///
    /// # Arguments
    /// * `reader` - The uploaded CSV.
    /// * `strictness` - Whether missing columns and unknown categories are rejected.
    pub fn predict_csv<R: io::Read>(
        &self,
        reader: R,
        strictness: Strictness,
    ) -> Result<BulkPrediction> {
        let (frame, report) = FeatureFrame::read_csv(reader, strictness)?;
        let predictions = self.predict(&frame)?;

        Ok(BulkPrediction {
            frame,
            predictions,
            report,
        })
    }

    /// Runs the manual path for a single form.
    pub fn predict_manual(&self, input: &ManualInput) -> Result<f64> {
        let frame = FeatureFrame::from_rows([input.to_row()]);
        let predictions = self.predict(&frame)?;

        predictions
            .first()
            .copied()
            .ok_or(PredictorError::SizeMismatch {
                what: "manual predictions",
                got: 0,
                expected: 1,
            })
    }
}

/// The result of the upload path.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkPrediction {
    pub frame: FeatureFrame,
    pub predictions: Vec<f64>,
    pub report: PreprocessReport,
}

impl BulkPrediction {
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// The table as display strings: the features followed by the prediction.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.predictions
            .iter()
            .enumerate()
            .map(|(i, prediction)| {
                self.frame
                    .row(i)
                    .iter()
                    .map(|v| v.to_string())
                    .chain(std::iter::once(prediction.to_string()))
                    .collect()
            })
            .collect()
    }

    /// Writes the augmented table as CSV with a `Predicted_Price` column.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        self.frame.write_csv(&self.predictions, writer)?;
        info!(
            "exported {} row(s) with a {PREDICTION_COLUMN} column",
            self.len()
        );
        Ok(())
    }
}

/// The manual path's rendered output line.
pub fn price_message(prediction: f64) -> String {
    format!("Predicted Price: {}", format_currency(prediction))
}
