//! Maintenance cost model

use super::{all_machines, Dryer, Machine, Washer};

/// Units at or above this age (years) count toward the maintenance age uplift
pub const AGED_UNIT_YEARS: f64 = 9.0;

/// Share of units at or above [`AGED_UNIT_YEARS`]; 0 when there are no units
pub fn aged_unit_share(washers: &[Washer], dryers: &[Dryer]) -> f64 {
    let mut total_units = 0.0;
    let mut old_units = 0.0;

    for machine in all_machines(washers, dryers) {
        total_units += machine.count();
        if machine.age() >= AGED_UNIT_YEARS {
            old_units += machine.count();
        }
    }

    if total_units != 0.0 {
        old_units / total_units
    } else {
        0.0
    }
}

/// Monthly maintenance cost
///
/// `base_revenue × base_pct/100` plus an age uplift of
/// `base_revenue × age_uplift_pct/100 × aged share`.
pub fn calculate_maintenance_costs(
    base_revenue: f64,
    base_pct: f64,
    age_uplift_pct: f64,
    washers: &[Washer],
    dryers: &[Dryer],
) -> f64 {
    let base_maint = base_revenue * base_pct / 100.0;
    let age_adj = base_revenue * (age_uplift_pct / 100.0) * aged_unit_share(washers, dryers);
    base_maint + age_adj
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn washer(count: f64, age: f64) -> Washer {
        Washer { count, age, ..Default::default() }
    }

    fn dryer(count: f64, age: f64) -> Dryer {
        Dryer { count, age, ..Default::default() }
    }

    #[test]
    fn test_aged_share_threshold_is_inclusive() {
        let washers = vec![washer(6.0, 10.0), washer(4.0, 3.0)];
        let dryers = vec![dryer(10.0, 9.0)];
        assert_relative_eq!(aged_unit_share(&washers, &dryers), 0.8);
    }

    #[test]
    fn test_maintenance_with_age_uplift() {
        let washers = vec![washer(6.0, 10.0), washer(4.0, 3.0)];
        let dryers = vec![dryer(10.0, 9.0)];

        // 8% of 10,000 plus 3% × 80% aged
        let maint = calculate_maintenance_costs(10_000.0, 8.0, 3.0, &washers, &dryers);
        assert_relative_eq!(maint, 1040.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_units_means_no_uplift() {
        let maint = calculate_maintenance_costs(10_000.0, 8.0, 3.0, &[], &[]);
        assert_relative_eq!(maint, 800.0);
    }
}
