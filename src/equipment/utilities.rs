//! Utility consumption costs

use serde::{Deserialize, Serialize};

use super::{Dryer, Washer};
use crate::inputs::form::lenient_f64;

/// Cost per unit of utility consumption
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    /// Per kWh
    #[serde(deserialize_with = "lenient_f64")]
    pub elec: f64,
    /// Per therm
    #[serde(deserialize_with = "lenient_f64")]
    pub gas: f64,
    /// Per gallon
    #[serde(deserialize_with = "lenient_f64")]
    pub water: f64,
}

/// Fractional utility reductions (0–1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyFactors {
    pub elec: f64,
    pub gas: f64,
    pub water: f64,
}

/// Utility reductions as entered, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyPcts {
    #[serde(deserialize_with = "lenient_f64")]
    pub elec_pct: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub gas_pct: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub water_pct: f64,
}

impl EfficiencyPcts {
    pub fn to_factors(&self) -> EfficiencyFactors {
        EfficiencyFactors {
            elec: self.elec_pct / 100.0,
            gas: self.gas_pct / 100.0,
            water: self.water_pct / 100.0,
        }
    }
}

/// Monthly utility cost by type
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilityCosts {
    pub elec: f64,
    pub gas: f64,
    pub water: f64,
    pub total: f64,
}

impl UtilityCosts {
    /// Add a gas cost that is modeled outside the per-cycle consumption
    pub fn add_gas(&mut self, amount: f64) {
        self.gas += amount;
        self.total += amount;
    }

    /// Scale every line by `1 + drift_pct/100`
    pub fn apply_drift(&mut self, drift_pct: f64) {
        let drift = 1.0 + drift_pct / 100.0;
        self.elec *= drift;
        self.gas *= drift;
        self.water *= drift;
        self.total *= drift;
    }
}

/// Monthly utility costs for the machine mix
///
/// Each utility is multiplied by `1 - efficiency` for that utility. Dryers use
/// electricity and gas only.
pub fn calculate_utility_costs(
    washers: &[Washer],
    dryers: &[Dryer],
    rates: &RateTable,
    days_per_month: f64,
    efficiency: &EfficiencyFactors,
) -> UtilityCosts {
    let eff_elec = 1.0 - efficiency.elec;
    let eff_gas = 1.0 - efficiency.gas;
    let eff_water = 1.0 - efficiency.water;

    let mut elec = 0.0;
    let mut gas = 0.0;
    let mut water = 0.0;

    for w in washers {
        let cycles = w.monthly_cycles(days_per_month);
        elec += cycles * w.kwh * rates.elec * eff_elec;
        gas += cycles * w.therms * rates.gas * eff_gas;
        water += cycles * w.gals * rates.water * eff_water;
    }

    for d in dryers {
        let cycles = d.monthly_cycles(days_per_month);
        elec += cycles * d.kwh * rates.elec * eff_elec;
        gas += cycles * d.therms * rates.gas * eff_gas;
    }

    UtilityCosts {
        elec,
        gas,
        water,
        total: elec + gas + water,
    }
}
