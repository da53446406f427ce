//! Tax depreciation schedules

use serde::{Deserialize, Serialize};

/// 7-year MACRS (half-year convention) annual rates, years 1-8
pub const MACRS_7_YEAR: [f64; 8] = [0.1429, 0.2449, 0.1749, 0.1249, 0.0893, 0.0892, 0.0893, 0.0446];

/// Recovery life the MACRS table applies to
pub const MACRS_TABLE_LIFE: u32 = 7;

/// Depreciation method for equipment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    #[default]
    Macrs,
    StraightLine,
}

impl DepreciationMethod {
    /// Parse a method name; anything other than exactly "macrs" is straight-line
    pub fn from_label(label: &str) -> Self {
        if label == "macrs" {
            DepreciationMethod::Macrs
        } else {
            DepreciationMethod::StraightLine
        }
    }
}

/// Depreciation for one tax year (1-indexed)
///
/// MACRS is only tabulated for a 7-year life; any other life falls back to
/// straight-line. Years outside the schedule depreciate nothing.
pub fn calculate_depreciation(cost_basis: f64, method: DepreciationMethod, life: u32, year: u32) -> f64 {
    if year == 0 {
        return 0.0;
    }

    if method == DepreciationMethod::Macrs && life == MACRS_TABLE_LIFE {
        return MACRS_7_YEAR
            .get(year as usize - 1)
            .map(|rate| cost_basis * rate)
            .unwrap_or(0.0);
    }

    if year <= life {
        cost_basis / life as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_macrs_first_year() {
        let dep = calculate_depreciation(100_000.0, DepreciationMethod::Macrs, 7, 1);
        assert!((dep - 14_290.0).abs() < 0.1, "got {}", dep);
    }

    #[test]
    fn test_macrs_schedule_fully_recovers_basis() {
        let total: f64 = (1..=8)
            .map(|year| calculate_depreciation(100_000.0, DepreciationMethod::Macrs, 7, year))
            .sum();
        assert_relative_eq!(total, 100_000.0, epsilon = 1e-6);
        assert_eq!(calculate_depreciation(100_000.0, DepreciationMethod::Macrs, 7, 9), 0.0);
    }

    #[test]
    fn test_straight_line() {
        for year in 1..=39 {
            assert_eq!(
                calculate_depreciation(390_000.0, DepreciationMethod::StraightLine, 39, year),
                390_000.0 / 39.0
            );
        }
        assert_eq!(calculate_depreciation(390_000.0, DepreciationMethod::StraightLine, 39, 40), 0.0);
    }

    #[test]
    fn test_macrs_other_life_falls_back_to_straight_line() {
        let dep = calculate_depreciation(50_000.0, DepreciationMethod::Macrs, 5, 1);
        assert_eq!(dep, 10_000.0);
        assert_eq!(calculate_depreciation(50_000.0, DepreciationMethod::Macrs, 5, 6), 0.0);
    }

    #[test]
    fn test_out_of_range_years() {
        assert_eq!(calculate_depreciation(50_000.0, DepreciationMethod::Macrs, 7, 0), 0.0);
        assert_eq!(calculate_depreciation(50_000.0, DepreciationMethod::StraightLine, 0, 1), 0.0);
    }

    #[test]
    fn test_method_labels() {
        assert_eq!(DepreciationMethod::from_label("macrs"), DepreciationMethod::Macrs);
        assert_eq!(DepreciationMethod::from_label("straight_line"), DepreciationMethod::StraightLine);
        assert_eq!(DepreciationMethod::from_label("double_declining"), DepreciationMethod::StraightLine);
        // label matching is exact
        assert_eq!(DepreciationMethod::from_label("MACRS"), DepreciationMethod::StraightLine);
        assert_eq!(DepreciationMethod::from_label(" macrs"), DepreciationMethod::StraightLine);
    }
}
