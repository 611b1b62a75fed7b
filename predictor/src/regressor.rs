use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{
    PredictorError, Result,
    artifacts::{check_feature_names, check_vector},
};

/// A fitted model mapping scaled feature rows to one value each.
pub trait Regressor {
    /// The amount of columns this model was fit on.
    fn num_features(&self) -> usize;

    /// Predicts one value per row of `x`.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>>;
}

/// The fitted parameters of the price model, as stored in `housing_model.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Model {
    /// `y = x · coef + intercept`
    LinearRegression {
        feature_names: Vec<String>,
        coef: Vec<f64>,
        intercept: f64,
    },
}

impl Model {
    pub fn kind(&self) -> &'static str {
        match self {
            Model::LinearRegression { .. } => "linear_regression",
        }
    }

    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        match self {
            Model::LinearRegression {
                feature_names,
                coef,
                intercept,
            } => {
                check_feature_names(feature_names)?;
                check_vector("coef", coef)?;
                if !intercept.is_finite() {
                    return Err(format!("intercept is not finite: {intercept}"));
                }
                Ok(())
            }
        }
    }
}

impl Regressor for Model {
    fn num_features(&self) -> usize {
        match self {
            Model::LinearRegression { coef, .. } => coef.len(),
        }
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.num_features() {
            return Err(PredictorError::SizeMismatch {
                what: "model input columns",
                got: x.ncols(),
                expected: self.num_features(),
            });
        }

        match self {
            Model::LinearRegression {
                coef, intercept, ..
            } => Ok(x.dot(&ArrayView1::from(coef)) + *intercept),
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::*;
    use crate::features::FEATURE_NAMES;

    fn linear(coef: Vec<f64>, intercept: f64) -> Model {
        Model::LinearRegression {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            coef,
            intercept,
        }
    }

    #[test]
    fn linear_regression_is_dot_plus_intercept() {
        let model = linear(vec![1.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0], 100.0);
        let x = array![
            [1.0, 1.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0],
        ];

        let y = model.predict(x.view()).unwrap();

        assert_eq!(y, array![103.0, 130.0]);
    }

    #[test]
    fn empty_input_predicts_nothing() {
        let model = linear(vec![1.0; 9], 5.0);
        let x = Array2::<f64>::zeros((0, 9));

        let y = model.predict(x.view()).unwrap();

        assert!(y.is_empty());
    }

    #[test]
    fn validate_rejects_short_coefficients() {
        let model = linear(vec![1.0; 8], 0.0);

        let reason = model.validate().unwrap_err();

        assert!(reason.contains("coef"), "{reason}");
    }

    #[test]
    fn validate_rejects_non_finite_intercept() {
        let model = linear(vec![1.0; 9], f64::NAN);

        assert!(model.validate().is_err());
    }
}
