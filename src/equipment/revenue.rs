//! Coin-op equipment revenue

use serde::{Deserialize, Serialize};

use super::{Dryer, Washer};

/// Monthly revenue from washers and dryers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRevenue {
    pub wash_revenue: f64,
    pub dry_revenue: f64,
    pub total: f64,
}

/// Monthly washer and dryer revenue
///
/// Washers earn `count × vend × turns × days`; dryers are priced by the minute
/// and earn `count × price_per_min × avg_mins × cycles × days`.
pub fn calculate_equipment_revenue(
    washers: &[Washer],
    dryers: &[Dryer],
    days_per_month: f64,
) -> EquipmentRevenue {
    let wash_revenue: f64 = washers
        .iter()
        .map(|w| w.count * w.vend * w.turns * days_per_month)
        .sum();

    let dry_revenue: f64 = dryers
        .iter()
        .map(|d| d.count * d.price_per_min * d.avg_mins * d.cycles * days_per_month)
        .sum();

    EquipmentRevenue {
        wash_revenue,
        dry_revenue,
        total: wash_revenue + dry_revenue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equipment_revenue() {
        let washers = vec![
            Washer { count: 8.0, vend: 3.25, turns: 2.2, ..Default::default() },
            Washer { count: 6.0, vend: 4.25, turns: 2.3, ..Default::default() },
        ];
        let dryers = vec![Dryer {
            count: 12.0,
            price_per_min: 0.25,
            avg_mins: 35.0,
            cycles: 3.8,
            ..Default::default()
        }];

        let revenue = calculate_equipment_revenue(&washers, &dryers, 30.0);

        assert_relative_eq!(revenue.wash_revenue, 8.0 * 3.25 * 2.2 * 30.0 + 6.0 * 4.25 * 2.3 * 30.0);
        assert_relative_eq!(revenue.dry_revenue, 12.0 * 0.25 * 35.0 * 3.8 * 30.0);
        assert_relative_eq!(revenue.total, revenue.wash_revenue + revenue.dry_revenue);
    }

    #[test]
    fn test_no_machines_no_revenue() {
        let revenue = calculate_equipment_revenue(&[], &[], 30.0);
        assert_eq!(revenue, EquipmentRevenue::default());
    }
}
