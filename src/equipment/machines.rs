//! Washer and dryer definitions

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::inputs::form::{lenient_f64, lenient_f64_map};

/// Common view over a machine tier, used wherever washers and dryers are
/// aggregated together (age risk, maintenance, replacement reserve)
pub trait Machine {
    fn name(&self) -> &str;
    fn count(&self) -> f64;
    fn age(&self) -> f64;
}

/// One washer tier (identical machines sharing price and consumption)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Washer {
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub count: f64,
    /// Age in years
    #[serde(deserialize_with = "lenient_f64")]
    pub age: f64,
    /// Price per cycle
    #[serde(deserialize_with = "lenient_f64")]
    pub vend: f64,
    /// Cycles per machine per day
    #[serde(deserialize_with = "lenient_f64")]
    pub turns: f64,
    /// Cycle length in minutes
    #[serde(deserialize_with = "lenient_f64")]
    pub mins: f64,
    /// Electricity per cycle
    #[serde(deserialize_with = "lenient_f64")]
    pub kwh: f64,
    /// Gas per cycle
    #[serde(deserialize_with = "lenient_f64")]
    pub therms: f64,
    /// Water per cycle
    #[serde(deserialize_with = "lenient_f64")]
    pub gals: f64,
}

impl Washer {
    /// Cycles run by the whole tier in a month
    pub fn monthly_cycles(&self, days_per_month: f64) -> f64 {
        self.count * self.turns * days_per_month
    }
}

impl Machine for Washer {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> f64 {
        self.count
    }

    fn age(&self) -> f64 {
        self.age
    }
}

/// One dryer tier, priced by the minute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dryer {
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub count: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub age: f64,
    #[serde(alias = "price_per_min", deserialize_with = "lenient_f64")]
    pub price_per_min: f64,
    /// Average paid minutes per cycle
    #[serde(alias = "avg_mins", deserialize_with = "lenient_f64")]
    pub avg_mins: f64,
    /// Cycles per machine per day
    #[serde(deserialize_with = "lenient_f64")]
    pub cycles: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub kwh: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub therms: f64,
}

impl Dryer {
    pub fn monthly_cycles(&self, days_per_month: f64) -> f64 {
        self.count * self.cycles * days_per_month
    }
}

impl Machine for Dryer {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> f64 {
        self.count
    }

    fn age(&self) -> f64 {
        self.age
    }
}

/// Iterate washers then dryers as [`Machine`]s
pub fn all_machines<'a>(
    washers: &'a [Washer],
    dryers: &'a [Dryer],
) -> impl Iterator<Item = &'a dyn Machine> + 'a {
    washers
        .iter()
        .map(|w| w as &dyn Machine)
        .chain(dryers.iter().map(|d| d as &dyn Machine))
}

/// Replacement cost per unit, keyed by machine name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentCosts {
    #[serde(deserialize_with = "lenient_f64_map")]
    costs: HashMap<String, f64>,
}

impl EquipmentCosts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, cost: f64) {
        self.costs.insert(name.into(), cost);
    }

    /// Unit cost for a machine name; unknown names cost nothing
    pub fn cost_of(&self, name: &str) -> f64 {
        self.costs.get(name).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Installed replacement value of a set of machines (count × unit cost)
    pub fn installed_value<'a, I>(&self, machines: I) -> f64
    where
        I: IntoIterator<Item = &'a dyn Machine>,
    {
        machines
            .into_iter()
            .map(|m| m.count() * self.cost_of(m.name()))
            .sum()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for EquipmentCosts {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut costs = EquipmentCosts::new();
        for (name, cost) in iter {
            costs.insert(name, cost);
        }
        costs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_value() {
        let washers = vec![
            Washer { name: "A".into(), count: 2.0, ..Default::default() },
            Washer { name: "Unpriced".into(), count: 5.0, ..Default::default() },
        ];
        let dryers = vec![Dryer { name: "D".into(), count: 3.0, ..Default::default() }];
        let costs: EquipmentCosts = [("A", 100.0), ("D", 50.0)].into_iter().collect();

        let total = costs.installed_value(all_machines(&washers, &dryers));
        assert_eq!(total, 350.0);
    }

    #[test]
    fn test_dryer_accepts_snake_case_aliases() {
        let dryer: Dryer =
            serde_json::from_str(r#"{"name":"Stack","price_per_min":0.25,"avgMins":35}"#).unwrap();
        assert_eq!(dryer.price_per_min, 0.25);
        assert_eq!(dryer.avg_mins, 35.0);
    }

    #[test]
    fn test_equipment_costs_coerce_blank_values() {
        let costs: EquipmentCosts =
            serde_json::from_str(r#"{"A": null, "B": "", "C": "4500", "D": 900}"#).unwrap();
        assert_eq!(costs.len(), 4);
        assert_eq!(costs.cost_of("A"), 0.0);
        assert_eq!(costs.cost_of("B"), 0.0);
        assert_eq!(costs.cost_of("C"), 4500.0);
        assert_eq!(costs.cost_of("D"), 900.0);
    }
}
