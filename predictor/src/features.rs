use std::fmt;

/// The number of features the scaler and model were fit on.
pub const NUM_FEATURES: usize = 9;

/// Feature names in the order the artifacts expect them.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "ocean_proximity",
];

/// Index of the categorical column inside a feature row.
pub const CATEGORY_INDEX: usize = 8;

/// Ground truth column, never fed to the scaler.
pub const TARGET_COLUMN: &str = "median_house_value";

/// Column appended to the bulk output.
pub const PREDICTION_COLUMN: &str = "Predicted_Price";

/// The categorical `ocean_proximity` feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OceanProximity {
    #[default]
    LessThanOneHour,
    Inland,
    Island,
    NearBay,
    NearOcean,
}

impl OceanProximity {
    pub const ALL: [OceanProximity; 5] = [
        Self::LessThanOneHour,
        Self::Inland,
        Self::Island,
        Self::NearBay,
        Self::NearOcean,
    ];

    /// The label as it appears in the housing dataset.
    pub fn label(self) -> &'static str {
        match self {
            Self::LessThanOneHour => "<1H OCEAN",
            Self::Inland => "INLAND",
            Self::Island => "ISLAND",
            Self::NearBay => "NEAR BAY",
            Self::NearOcean => "NEAR OCEAN",
        }
    }

    /// The integer code the model was trained with.
    pub fn code(self) -> u8 {
        match self {
            Self::LessThanOneHour => 0,
            Self::Inland => 1,
            Self::Island => 2,
            Self::NearBay => 3,
            Self::NearOcean => 4,
        }
    }

    /// Looks up a label, matching exactly.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for OceanProximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a raw `ocean_proximity` cell to its integer code.
///
/// Labels outside the table, and missing cells, map to 0.
pub fn category_code(value: Option<&str>) -> u8 {
    value
        .and_then(OceanProximity::from_label)
        .map(OceanProximity::code)
        .unwrap_or(0)
}

/// Returns the position of `name` in [`FEATURE_NAMES`].
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|&f| f == name)
}
