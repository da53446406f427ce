//! Canonical store preset
//!
//! A 22-washer / 18-dryer store used as the default scenario by the binaries
//! and as the reference case in tests.

use crate::equipment::{Dryer, EfficiencyPcts, EquipmentCosts, RateTable, Washer};
use crate::finance::{DepreciationMethod, EntityType};
use crate::inputs::{
    EquipmentLife, Financing, FormValues, GrowthParams, HotWaterParams, LiftSettings,
    OperatingCosts, ProFormaInputs, TaxParams, TrancheTerms, Vending, WashFold,
};

#[allow(clippy::too_many_arguments)]
fn washer(name: &str, count: f64, vend: f64, turns: f64, mins: f64, kwh: f64, gals: f64, age: f64) -> Washer {
    Washer {
        name: name.to_string(),
        count,
        age,
        vend,
        turns,
        mins,
        kwh,
        therms: 0.0,
        gals,
    }
}

fn dryer(name: &str, count: f64, avg_mins: f64, cycles: f64, kwh: f64, therms: f64, age: f64) -> Dryer {
    Dryer {
        name: name.to_string(),
        count,
        age,
        price_per_min: 0.25,
        avg_mins,
        cycles,
        kwh,
        therms,
    }
}

pub fn canonical_washers() -> Vec<Washer> {
    vec![
        washer("20lb Top-Load", 8.0, 3.25, 2.2, 28.0, 0.4, 20.0, 5.0),
        washer("27lb Top-Load", 6.0, 4.25, 2.3, 32.0, 0.5, 25.0, 4.0),
        washer("40lb Front-Load", 4.0, 6.00, 2.0, 35.0, 0.3, 35.0, 3.0),
        washer("60lb Front-Load", 2.0, 8.50, 1.8, 40.0, 0.4, 50.0, 2.0),
        washer("80lb Front-Load", 2.0, 11.00, 1.6, 45.0, 0.6, 70.0, 1.0),
    ]
}

pub fn canonical_dryers() -> Vec<Dryer> {
    vec![
        dryer("Stack Dryer", 12.0, 35.0, 3.8, 0.3, 0.35, 3.0),
        dryer("Single Dryer", 6.0, 45.0, 3.4, 0.4, 0.25, 4.0),
    ]
}

pub fn canonical_equipment_costs() -> EquipmentCosts {
    [
        ("20lb Top-Load", 4500.0),
        ("27lb Top-Load", 5200.0),
        ("40lb Front-Load", 12000.0),
        ("60lb Front-Load", 20000.0),
        ("80lb Front-Load", 28000.0),
        ("Stack Dryer", 9000.0),
        ("Single Dryer", 12000.0),
    ]
    .into_iter()
    .collect()
}

/// Canonical store as structured inputs
pub fn canonical_store() -> ProFormaInputs {
    ProFormaInputs {
        days_per_month: 30.0,
        rates: RateTable { elec: 0.32, gas: 1.80, water: 0.018 },
        washers: canonical_washers(),
        dryers: canonical_dryers(),
        equipment_costs: canonical_equipment_costs(),
        wash_fold: WashFold { price_per_lb: 1.90, lbs_per_day: 180.0 },
        vending: Vending { monthly_revenue: 1200.0, cogs_pct: 40.0 },
        lifts: LiftSettings {
            enabled: true,
            retool_budget: 65_000.0,
            brand_budget: 35_000.0,
            included_in_project: true,
            efficiency: EfficiencyPcts { elec_pct: 8.0, gas_pct: 12.0, water_pct: 15.0 },
        },
        hot_water: HotWaterParams::default(),
        operating: OperatingCosts {
            rent: 9500.0,
            labor_hours_per_day: 12.0,
            wage: 22.0,
            maint_base_pct: 8.0,
            maint_age_uplift_pct: 3.0,
        },
        equipment_life: EquipmentLife::default(),
        financing: Financing {
            project_cost: 1_043_735.0,
            cash_invested: 260_934.0,
            working_capital: 25_000.0,
            tranche_a: TrancheTerms { max_pct_of_project: 65.0, annual_rate_pct: 7.25, term_years: 20.0 },
            tranche_b: TrancheTerms { max_pct_of_project: 15.0, annual_rate_pct: 9.5, term_years: 15.0 },
        },
        tax: TaxParams {
            method: DepreciationMethod::Macrs,
            equipment_life: 7,
            building_life: 39,
            federal_rate_pct: 21.0,
            state_rate_pct: 8.84,
            entity: EntityType::Llc,
        },
        growth: GrowthParams::default(),
    }
}

/// Canonical store as raw form fields (equipment tables are supplied separately)
pub fn canonical_form() -> FormValues {
    [
        ("days", "30"),
        ("rateElec", "0.32"),
        ("rateGas", "1.80"),
        ("rateWater", "0.018"),
        ("wfoldPrice", "1.90"),
        ("wfoldLbs", "180"),
        ("vendRev", "1200"),
        ("vendCogsPct", "40"),
        ("applyLifts", "1"),
        ("retoolBudget", "65000"),
        ("brandBudget", "35000"),
        ("includeLiftsInProject", "1"),
        ("effElecPct", "8"),
        ("effGasPct", "12"),
        ("effWaterPct", "15"),
        ("hotSharePct", "60"),
        ("deltaT", "65"),
        ("heaterEffPct", "80"),
        ("lifeWasher", "13"),
        ("lifeDryer", "17"),
        ("rent", "9500"),
        ("laborHrsDay", "12"),
        ("wage", "22"),
        ("maintBasePct", "8"),
        ("maintAgeUpliftPct", "3"),
        ("projCost", "1043735"),
        ("cashInv", "260934"),
        ("workingCap", "25000"),
        ("aPct", "65"),
        ("bPct", "15"),
        ("aRate", "7.25"),
        ("bRate", "9.5"),
        ("aTerm", "20"),
        ("bTerm", "15"),
        ("depreciationMethod", "macrs"),
        ("taxEquipLife", "7"),
        ("taxBuildingLife", "39"),
        ("fedTaxRate", "21"),
        ("stateTaxRate", "8.84"),
        ("entityType", "llc"),
        ("revGrowPct", "2.5"),
        ("opexInflPct", "3.0"),
        ("horizon", "10"),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_and_struct_presets_agree() {
        let from_form = canonical_form().to_inputs(
            canonical_washers(),
            canonical_dryers(),
            canonical_equipment_costs(),
        );
        assert_eq!(from_form, canonical_store());
    }

    #[test]
    fn test_preset_machine_counts() {
        let inputs = canonical_store();
        assert_eq!(inputs.total_machines(), 40.0);
        assert_eq!(inputs.equipment_costs.len(), 7);
    }
}
