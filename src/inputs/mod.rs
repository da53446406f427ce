//! Calculator inputs
//!
//! Everything the snapshot and projection engines read lives in
//! [`ProFormaInputs`]. The structure is immutable during a calculation and is
//! supplied wholesale by the caller, either built directly, loaded from a JSON
//! scenario file, or coerced from the flat form fields in [`form`].

pub mod form;
pub mod loader;

pub use form::{coerce_number, FormValues};
pub use loader::{form_from_value, inputs_from_reader, load_form_json, load_inputs_json};

use form::lenient_f64;

use serde::{Deserialize, Serialize};

use crate::equipment::{Dryer, EfficiencyFactors, EfficiencyPcts, EquipmentCosts, RateTable, Washer};
use crate::finance::{DepreciationMethod, EntityType};

/// Container for every input to a pro-forma run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProFormaInputs {
    /// Operating days per month
    #[serde(deserialize_with = "lenient_f64")]
    pub days_per_month: f64,
    pub rates: RateTable,
    pub washers: Vec<Washer>,
    pub dryers: Vec<Dryer>,
    /// Replacement cost per unit, by machine name
    pub equipment_costs: EquipmentCosts,
    pub wash_fold: WashFold,
    pub vending: Vending,
    pub lifts: LiftSettings,
    pub hot_water: HotWaterParams,
    pub operating: OperatingCosts,
    pub equipment_life: EquipmentLife,
    pub financing: Financing,
    pub tax: TaxParams,
    pub growth: GrowthParams,
}

impl ProFormaInputs {
    /// Total machine count across washers and dryers
    pub fn total_machines(&self) -> f64 {
        let washers: f64 = self.washers.iter().map(|w| w.count).sum();
        let dryers: f64 = self.dryers.iter().map(|d| d.count).sum();
        washers + dryers
    }
}

/// Wash-and-fold service pricing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WashFold {
    #[serde(deserialize_with = "lenient_f64")]
    pub price_per_lb: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub lbs_per_day: f64,
}

impl WashFold {
    pub fn monthly_revenue(&self, days_per_month: f64) -> f64 {
        self.price_per_lb * self.lbs_per_day * days_per_month
    }
}

/// Vending machine sales
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vending {
    /// Gross vending revenue per month
    #[serde(deserialize_with = "lenient_f64")]
    pub monthly_revenue: f64,
    /// Cost of goods sold as a percentage of vending revenue
    #[serde(deserialize_with = "lenient_f64")]
    pub cogs_pct: f64,
}

impl Vending {
    pub fn cogs(&self) -> f64 {
        self.monthly_revenue * (self.cogs_pct / 100.0)
    }
}

/// Retool/branding upgrade program ("lifts")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftSettings {
    /// Whether the lift revenue and efficiency gains are applied
    pub enabled: bool,
    #[serde(deserialize_with = "lenient_f64")]
    pub retool_budget: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub brand_budget: f64,
    /// Lift budgets are already part of the project cost (not extra cash)
    pub included_in_project: bool,
    /// Utility reductions from the retool, as percentages
    pub efficiency: EfficiencyPcts,
}

impl LiftSettings {
    /// Efficiency factors in effect; all zero unless lifts are enabled
    pub fn active_efficiency(&self) -> EfficiencyFactors {
        if self.enabled {
            self.efficiency.to_factors()
        } else {
            EfficiencyFactors::default()
        }
    }
}

/// Water heating assumptions for washer hot-water gas cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotWaterParams {
    /// Share of washer water that is heated (percent)
    #[serde(deserialize_with = "lenient_f64")]
    pub hot_share_pct: f64,
    /// Required temperature rise in °F
    #[serde(deserialize_with = "lenient_f64")]
    pub delta_t_f: f64,
    /// Water heater efficiency (percent)
    #[serde(deserialize_with = "lenient_f64")]
    pub heater_eff_pct: f64,
}

impl Default for HotWaterParams {
    fn default() -> Self {
        Self {
            hot_share_pct: 60.0,
            delta_t_f: 65.0,
            heater_eff_pct: 80.0,
        }
    }
}

/// Fixed and semi-variable operating costs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingCosts {
    /// Monthly rent
    #[serde(deserialize_with = "lenient_f64")]
    pub rent: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub labor_hours_per_day: f64,
    /// Hourly wage
    #[serde(deserialize_with = "lenient_f64")]
    pub wage: f64,
    /// Base maintenance as a percentage of base revenue
    #[serde(deserialize_with = "lenient_f64")]
    pub maint_base_pct: f64,
    /// Extra maintenance for aged units, percentage of base revenue at 100% aged
    #[serde(deserialize_with = "lenient_f64")]
    pub maint_age_uplift_pct: f64,
}

impl OperatingCosts {
    pub fn monthly_labor(&self, days_per_month: f64) -> f64 {
        self.labor_hours_per_day * self.wage * days_per_month
    }
}

/// Useful lives used for the replacement reserve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentLife {
    #[serde(deserialize_with = "lenient_f64")]
    pub washer_years: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub dryer_years: f64,
}

impl Default for EquipmentLife {
    fn default() -> Self {
        Self {
            washer_years: 13.0,
            dryer_years: 17.0,
        }
    }
}

/// Acquisition financing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Financing {
    #[serde(deserialize_with = "lenient_f64")]
    pub project_cost: f64,
    /// Cash down payment
    #[serde(deserialize_with = "lenient_f64")]
    pub cash_invested: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub working_capital: f64,
    pub tranche_a: TrancheTerms,
    pub tranche_b: TrancheTerms,
}

/// Terms of one loan tranche
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrancheTerms {
    /// Ceiling on the tranche as a percentage of project cost
    #[serde(deserialize_with = "lenient_f64")]
    pub max_pct_of_project: f64,
    /// Annual interest rate (percent)
    #[serde(deserialize_with = "lenient_f64")]
    pub annual_rate_pct: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub term_years: f64,
}

/// Tax and depreciation settings for the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxParams {
    pub method: DepreciationMethod,
    /// Equipment recovery period in years
    pub equipment_life: u32,
    /// Building recovery period in years (always straight-line)
    pub building_life: u32,
    #[serde(deserialize_with = "lenient_f64")]
    pub federal_rate_pct: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub state_rate_pct: f64,
    pub entity: EntityType,
}

impl Default for TaxParams {
    fn default() -> Self {
        Self {
            method: DepreciationMethod::Macrs,
            equipment_life: 7,
            building_life: 39,
            federal_rate_pct: 21.0,
            state_rate_pct: 8.84,
            entity: EntityType::Llc,
        }
    }
}

/// Growth assumptions and horizon for the multi-year projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    #[serde(deserialize_with = "lenient_f64")]
    pub revenue_growth_pct: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub opex_inflation_pct: f64,
    pub horizon_years: u32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            revenue_growth_pct: 2.5,
            opex_inflation_pct: 3.0,
            horizon_years: 10,
        }
    }
}
