use crate::features::{NUM_FEATURES, OceanProximity};

/// The values of the manual entry form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualInput {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: f64,
    pub total_rooms: f64,
    pub total_bedrooms: f64,
    pub population: f64,
    pub households: f64,
    pub median_income: f64,
    pub ocean_proximity: OceanProximity,
}

impl Default for ManualInput {
    fn default() -> Self {
        Self {
            longitude: -120.0,
            latitude: 35.0,
            housing_median_age: 25.0,
            total_rooms: 1000.0,
            total_bedrooms: 200.0,
            population: 500.0,
            households: 150.0,
            median_income: 3.0,
            ocean_proximity: OceanProximity::LessThanOneHour,
        }
    }
}

impl ManualInput {
    /// The form as a feature row, category encoded.
    pub fn to_row(&self) -> [f64; NUM_FEATURES] {
        [
            self.longitude,
            self.latitude,
            self.housing_median_age,
            self.total_rooms,
            self.total_bedrooms,
            self.population,
            self.households,
            self.median_income,
            f64::from(self.ocean_proximity.code()),
        ]
    }

    /// The numeric fields as `(feature name, value)` pairs, in feature order.
    pub fn numeric_fields(&self) -> [(&'static str, f64); NUM_FEATURES - 1] {
        let row = self.to_row();
        std::array::from_fn(|i| (crate::features::FEATURE_NAMES[i], row[i]))
    }

    /// Sets the numeric feature at `index`, ignoring the categorical slot.
    pub fn set_numeric(&mut self, index: usize, value: f64) {
        match index {
            0 => self.longitude = value,
            1 => self.latitude = value,
            2 => self.housing_median_age = value,
            3 => self.total_rooms = value,
            4 => self.total_bedrooms = value,
            5 => self.population = value,
            6 => self.households = value,
            7 => self.median_income = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_row_matches_form_defaults() {
        let row = ManualInput::default().to_row();

        assert_eq!(
            row,
            [-120.0, 35.0, 25.0, 1000.0, 200.0, 500.0, 150.0, 3.0, 0.0]
        );
    }

    #[test]
    fn category_is_encoded_last() {
        let input = ManualInput {
            ocean_proximity: OceanProximity::NearOcean,
            ..Default::default()
        };

        assert_eq!(input.to_row()[8], 4.0);
    }

    #[test]
    fn set_numeric_follows_feature_order() {
        let mut input = ManualInput::default();
        input.set_numeric(3, 4242.0);
        input.set_numeric(8, 99.0);

        assert_eq!(input.total_rooms, 4242.0);
        assert_eq!(input.ocean_proximity, OceanProximity::LessThanOneHour);
        assert_eq!(input.numeric_fields()[3], ("total_rooms", 4242.0));
    }
}
