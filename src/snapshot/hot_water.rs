//! Gas cost of heating washer water

use serde::{Deserialize, Serialize};

use crate::equipment::Washer;
use crate::inputs::HotWaterParams;

/// Weight of one gallon of water in pounds
pub const LBS_PER_GALLON: f64 = 8.34;

/// BTU per therm
pub const BTU_PER_THERM: f64 = 100_000.0;

const DEFAULT_HEATER_EFF_PCT: f64 = 80.0;

/// Monthly hot-water heating estimate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HotWaterEstimate {
    /// Total washer water per month
    pub washer_gallons: f64,
    /// Portion of that water which is heated
    pub hot_gallons: f64,
    pub therms: f64,
    /// Monthly gas cost after any retool gas efficiency
    pub cost: f64,
    /// Heater efficiency used (fraction)
    pub heater_efficiency: f64,
    /// Retool gas efficiency applied to the cost (fraction)
    pub gas_efficiency: f64,
}

/// Heating gas for washer hot water
///
/// `therms = hot_gallons × 8.34 × ΔT / (100,000 × heater efficiency)`, costed at
/// the gas rate less the retool gas efficiency. A heater efficiency of zero
/// is read as the 80% default; any other value is used as given.
pub fn estimate_hot_water(
    washers: &[Washer],
    days_per_month: f64,
    params: &HotWaterParams,
    gas_rate: f64,
    gas_efficiency: f64,
) -> HotWaterEstimate {
    let hot_share = params.hot_share_pct / 100.0;
    let heater_eff_pct = if params.heater_eff_pct == 0.0 || params.heater_eff_pct.is_nan() {
        DEFAULT_HEATER_EFF_PCT
    } else {
        params.heater_eff_pct
    };
    let heater_efficiency = heater_eff_pct / 100.0;

    let washer_gallons: f64 = washers
        .iter()
        .map(|w| w.count * w.turns * days_per_month * w.gals)
        .sum();
    let hot_gallons = washer_gallons * hot_share;
    let therms = (hot_gallons * LBS_PER_GALLON * params.delta_t_f) / (BTU_PER_THERM * heater_efficiency);
    let cost = therms * gas_rate * (1.0 - gas_efficiency);

    HotWaterEstimate {
        washer_gallons,
        hot_gallons,
        therms,
        cost,
        heater_efficiency,
        gas_efficiency,
    }
}
