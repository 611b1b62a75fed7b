use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{
    PredictorError, Result,
    artifacts::{check_feature_names, check_vector},
};

/// A fitted preprocessing step applied to every feature row before prediction.
pub trait Transform {
    /// The amount of columns this transform was fit on.
    fn num_features(&self) -> usize;

    /// Scales a `(rows, num_features)` matrix.
    ///
    /// # Arguments
    /// * `x` - The feature rows.
    ///
    /// # Returns
    /// The scaled matrix, same shape as `x`.
    fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>>;
}

/// The fitted parameters of a feature scaler, as stored in `scaler.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Scaler {
    /// `z = (x - mean) / scale`
    Standard {
        feature_names: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    /// `z = x * scale + min`
    MinMax {
        feature_names: Vec<String>,
        min: Vec<f64>,
        scale: Vec<f64>,
    },
}

impl Scaler {
    pub fn kind(&self) -> &'static str {
        match self {
            Scaler::Standard { .. } => "standard",
            Scaler::MinMax { .. } => "min_max",
        }
    }

    /// Checks the parameters fit the expected feature layout.
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        match self {
            Scaler::Standard {
                feature_names,
                mean,
                scale,
            } => {
                check_feature_names(feature_names)?;
                check_vector("mean", mean)?;
                check_vector("scale", scale)?;
                if let Some(i) = scale.iter().position(|&s| s == 0.0) {
                    return Err(format!("scale[{i}] is zero"));
                }
                Ok(())
            }
            Scaler::MinMax {
                feature_names,
                min,
                scale,
            } => {
                check_feature_names(feature_names)?;
                check_vector("min", min)?;
                check_vector("scale", scale)
            }
        }
    }
}

impl Transform for Scaler {
    fn num_features(&self) -> usize {
        match self {
            Scaler::Standard { scale, .. } | Scaler::MinMax { scale, .. } => scale.len(),
        }
    }

    fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.num_features() {
            return Err(PredictorError::SizeMismatch {
                what: "scaler input columns",
                got: x.ncols(),
                expected: self.num_features(),
            });
        }

        let z = match self {
            Scaler::Standard { mean, scale, .. } => {
                (&x - &ArrayView1::from(mean)) / &ArrayView1::from(scale)
            }
            Scaler::MinMax { min, scale, .. } => {
                &x * &ArrayView1::from(scale) + &ArrayView1::from(min)
            }
        };

        Ok(z)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::features::FEATURE_NAMES;

    fn names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn standard_scaler_centers_and_divides() {
        let scaler = Scaler::Standard {
            feature_names: names(),
            mean: vec![1.0; 9],
            scale: vec![2.0; 9],
        };
        let x = array![[3.0, 1.0, -1.0, 5.0, 1.0, 1.0, 1.0, 1.0, 0.0]];

        let z = scaler.transform(x.view()).unwrap();

        assert_eq!(z, array![[1.0, 0.0, -1.0, 2.0, 0.0, 0.0, 0.0, 0.0, -0.5]]);
    }

    #[test]
    fn min_max_scaler_multiplies_then_shifts() {
        let scaler = Scaler::MinMax {
            feature_names: names(),
            min: vec![-1.0; 9],
            scale: vec![0.5; 9],
        };
        let mut x = Array2::from_elem((2, 9), 2.0);
        x.row_mut(1).fill(4.0);

        let z = scaler.transform(x.view()).unwrap();

        assert!(z.row(0).iter().all(|&v| v == 0.0));
        assert!(z.row(1).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn transform_rejects_wrong_width() {
        let scaler = Scaler::Standard {
            feature_names: names(),
            mean: vec![0.0; 9],
            scale: vec![1.0; 9],
        };
        let x = array![[1.0, 2.0]];

        let err = scaler.transform(x.view()).unwrap_err();

        assert!(matches!(
            err,
            PredictorError::SizeMismatch { got: 2, expected: 9, .. }
        ));
    }

    #[test]
    fn validate_rejects_zero_scale() {
        let mut scale = vec![1.0; 9];
        scale[4] = 0.0;
        let scaler = Scaler::Standard {
            feature_names: names(),
            mean: vec![0.0; 9],
            scale,
        };

        assert_eq!(scaler.validate().unwrap_err(), "scale[4] is zero");
    }

    #[test]
    fn scaler_json_is_tagged_by_kind() {
        let scaler = Scaler::MinMax {
            feature_names: names(),
            min: vec![0.0; 9],
            scale: vec![1.0; 9],
        };

        let json = serde_json::to_value(&scaler).unwrap();

        assert_eq!(json["kind"], "min_max");
        assert_eq!(json["feature_names"][8], "ocean_proximity");
    }
}
