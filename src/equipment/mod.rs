//! Equipment model: machine definitions, revenue, utilities, maintenance,
//! industry lifts and age risk

mod machines;
mod revenue;
mod utilities;
mod maintenance;
mod lifts;
mod age_risk;
pub mod loader;

pub use machines::{all_machines, Dryer, EquipmentCosts, Machine, Washer};
pub use revenue::{calculate_equipment_revenue, EquipmentRevenue};
pub use utilities::{calculate_utility_costs, EfficiencyFactors, EfficiencyPcts, RateTable, UtilityCosts};
pub use maintenance::{aged_unit_share, calculate_maintenance_costs, AGED_UNIT_YEARS};
pub use lifts::{calculate_industry_lifts, lift_percentages, IndustryLifts, COMBINED_MAX_PCT};
pub use age_risk::{base_severity, calc_age_risk, oldest_kicker, valuation_multiple, AgeRisk, RiskLabel};
