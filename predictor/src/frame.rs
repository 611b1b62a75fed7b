use std::io;

use log::{debug, info, warn};
use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::{
    PredictorError, Result,
    config::Strictness,
    features::{
        CATEGORY_INDEX, FEATURE_NAMES, NUM_FEATURES, OceanProximity, PREDICTION_COLUMN,
        TARGET_COLUMN, category_code, feature_index,
    },
};

/// What the reindexing step did to an uploaded table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreprocessReport {
    /// Expected features absent from the input, filled with 0.
    pub filled: Vec<&'static str>,
    /// Input columns that are not features and were discarded.
    pub dropped: Vec<String>,
    /// Whether the ground truth column was present and removed.
    pub target_dropped: bool,
    /// `(row, value)` pairs whose category fell outside the lookup table.
    pub unknown_categories: Vec<(usize, String)>,
}

impl PreprocessReport {
    /// Returns whether any value was made up rather than read.
    pub fn has_imputations(&self) -> bool {
        !self.filled.is_empty() || !self.unknown_categories.is_empty()
    }

    /// Human readable lines, one per finding.
    pub fn messages(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if self.target_dropped {
            lines.push(format!("dropped ground truth column {TARGET_COLUMN}"));
        }
        if !self.dropped.is_empty() {
            lines.push(format!("ignored columns: {}", self.dropped.join(", ")));
        }
        if !self.filled.is_empty() {
            lines.push(format!("filled with 0: {}", self.filled.join(", ")));
        }
        if !self.unknown_categories.is_empty() {
            let rows = self
                .unknown_categories
                .iter()
                .map(|(row, _)| row.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("unknown ocean_proximity mapped to 0 in rows: {rows}"));
        }

        lines
    }
}

/// Rows of features in the order the artifacts expect, categories already encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    values: Array2<f64>,
}

impl FeatureFrame {
    /// Creates a frame from already ordered and encoded rows.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = [f64; NUM_FEATURES]>,
    {
        let rows: Vec<[f64; NUM_FEATURES]> = rows.into_iter().collect();
        Self {
            values: Array2::from(rows),
        }
    }

    /// Reads a CSV table with a header row and reindexes it to the expected features.
    ///
    /// # Arguments
    /// * `reader` - The CSV source.
    /// * `strictness` - Whether made up values are tolerated or rejected.
    ///
    /// # Returns
    /// The frame and a report of the columns and categories that had to be normalized.
    pub fn read_csv<R: io::Read>(
        reader: R,
        strictness: Strictness,
    ) -> Result<(Self, PreprocessReport)> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut report = PreprocessReport::default();
        let mut sources: [Option<usize>; NUM_FEATURES] = [None; NUM_FEATURES];

        for (col, name) in headers.iter().enumerate() {
            if name == TARGET_COLUMN {
                report.target_dropped = true;
                continue;
            }
            match feature_index(name) {
                Some(i) if sources[i].is_none() => sources[i] = Some(col),
                _ => report.dropped.push(name.to_string()),
            }
        }

        report.filled = FEATURE_NAMES
            .iter()
            .zip(&sources)
            .filter(|(_, src)| src.is_none())
            .map(|(&name, _)| name)
            .collect();

        if !report.dropped.is_empty() {
            debug!("dropping columns not used by the model: {:?}", report.dropped);
        }
        if !report.filled.is_empty() {
            if strictness == Strictness::Strict {
                return Err(PredictorError::MissingColumns(report.filled));
            }
            warn!("filling missing columns with 0: {}", report.filled.join(", "));
        }

        let mut rows = Vec::new();

        for record in rdr.records() {
            let record = record?;
            let row_no = rows.len() + 1;
            let mut row = [0.0; NUM_FEATURES];

            for (i, src) in sources.iter().enumerate() {
                let cell = src.and_then(|col| record.get(col));

                row[i] = if i == CATEGORY_INDEX {
                    if src.is_some() && OceanProximity::from_label(cell.unwrap_or("")).is_none() {
                        let raw = cell.unwrap_or("").to_string();
                        if strictness == Strictness::Strict {
                            return Err(PredictorError::UnknownCategory { row: row_no, value: raw });
                        }
                        report.unknown_categories.push((row_no, raw));
                    }
                    f64::from(category_code(cell))
                } else {
                    match cell {
                        None => 0.0,
                        Some(raw) => match raw.trim().parse::<f64>() {
                            // `nan` and `inf` parse, but are as missing as an empty cell.
                            Ok(v) if v.is_finite() => v,
                            _ => {
                                return Err(PredictorError::InvalidValue {
                                    row: row_no,
                                    column: FEATURE_NAMES[i],
                                    value: raw.to_string(),
                                });
                            }
                        },
                    }
                };
            }

            rows.push(row);
        }

        if !report.unknown_categories.is_empty() {
            warn!(
                "{} row(s) with an unknown ocean_proximity were mapped to 0",
                report.unknown_categories.len()
            );
        }

        info!("read {} row(s) from the uploaded table", rows.len());
        Ok((Self::from_rows(rows), report))
    }

    /// The amount of rows in the frame.
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.nrows() == 0
    }

    /// A `(rows, NUM_FEATURES)` view of the values.
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.values.row(i)
    }

    /// Returns the column named `name`, if it is a feature.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        feature_index(name).map(|i| self.values.column(i))
    }

    /// Writes the frame plus a prediction column as CSV.
    ///
    /// # Arguments
    /// * `predictions` - One value per row.
    /// * `writer` - The CSV destination.
    pub fn write_csv<W: io::Write>(&self, predictions: &[f64], writer: W) -> Result<()> {
        if predictions.len() != self.nrows() {
            return Err(PredictorError::SizeMismatch {
                what: "predictions",
                got: predictions.len(),
                expected: self.nrows(),
            });
        }

        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(FEATURE_NAMES.iter().chain([&PREDICTION_COLUMN]))?;

        for (row, prediction) in self.values.rows().into_iter().zip(predictions) {
            let fields = row
                .iter()
                .chain([prediction])
                .map(|v| v.to_string());
            wtr.write_record(fields)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
