//! Flat form boundary
//!
//! The calculator is driven by a flat set of named fields, each holding the raw
//! text typed into the form. This module turns that map into [`ProFormaInputs`]
//! using the same coercion rules the form always had:
//!
//! - blank or non-numeric values read as `0`
//! - fields with a default fall back to it when the value is blank, non-numeric
//!   *or zero* (for example `lifeWasher = 0` means 13 years)
//! - integer tax lives only fall back when the field is blank

use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use super::{
    EquipmentLife, Financing, GrowthParams, HotWaterParams, LiftSettings, OperatingCosts,
    ProFormaInputs, TaxParams, TrancheTerms, Vending, WashFold,
};
use crate::equipment::{Dryer, EfficiencyPcts, EquipmentCosts, RateTable, Washer};
use crate::finance::{DepreciationMethod, EntityType};

/// Coerce a raw text value to a number; blank, malformed and non-finite read as 0
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Parse the leading integer of a value ("7", " 39 years", "7.5" -> 7)
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Serde helper: accept numbers, numeric strings, booleans and null for an `f64` field
///
/// Used on every numeric input so scenarios with `"rent": ""` or
/// `"age": null` load with zeros instead of failing.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string, or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(if v.is_finite() { v } else { 0.0 })
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<f64, E> {
            Ok(if v { 1.0 } else { 0.0 })
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            Ok(coerce_number(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<f64, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientVisitor)
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}

/// Serde helper: a name-to-number map whose values read like [`lenient_f64`]
pub fn lenient_f64_map<'de, D>(deserializer: D) -> Result<HashMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Lenient(#[serde(deserialize_with = "lenient_f64")] f64);

    let raw: HashMap<String, Lenient> = HashMap::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(name, Lenient(value))| (name, value)).collect())
}

/// Raw form values keyed by field id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    fields: HashMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field; any displayable value is stored as its text
    pub fn set(&mut self, id: impl Into<String>, value: impl ToString) {
        self.fields.insert(id.into(), value.to_string());
    }

    /// Raw text of a field, if present
    pub fn raw(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Numeric value; missing or malformed is 0
    pub fn number(&self, id: &str) -> f64 {
        self.raw(id).map(coerce_number).unwrap_or(0.0)
    }

    /// Numeric value, replaced by `default` when it coerces to 0
    pub fn number_or(&self, id: &str, default: f64) -> f64 {
        let value = self.number(id);
        if value == 0.0 {
            default
        } else {
            value
        }
    }

    /// Numeric value, replaced by `default` only when the field is blank
    pub fn number_or_blank(&self, id: &str, default: f64) -> f64 {
        match self.raw(id) {
            Some(raw) if !raw.is_empty() => coerce_number(raw),
            _ => default,
        }
    }

    /// Leading integer, `default` when blank; unparseable or negative text reads as 0
    pub fn integer_or(&self, id: &str, default: u32) -> u32 {
        match self.raw(id) {
            Some(raw) if !raw.is_empty() => leading_integer(raw)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
            _ => default,
        }
    }

    /// Text value, `default` when blank
    pub fn text_or<'a>(&'a self, id: &str, default: &'a str) -> &'a str {
        match self.raw(id) {
            Some(raw) if !raw.is_empty() => raw,
            _ => default,
        }
    }

    /// Toggle that is on for any non-zero value
    pub fn flag(&self, id: &str) -> bool {
        self.number(id) != 0.0
    }

    /// Toggle that is on only for exactly 1
    pub fn exactly_one(&self, id: &str) -> bool {
        self.number(id) == 1.0
    }

    /// Build the calculator inputs from the form plus the equipment tables
    pub fn to_inputs(
        &self,
        washers: Vec<Washer>,
        dryers: Vec<Dryer>,
        equipment_costs: EquipmentCosts,
    ) -> ProFormaInputs {
        let method_label = self.text_or("depreciationMethod", "macrs");
        let entity_label = self.text_or("entityType", "llc");
        let entity = entity_label.parse().unwrap_or_else(|_| {
            debug!("Unknown entity type '{}', treating as llc", entity_label);
            EntityType::default()
        });

        let horizon = self.number("horizon");

        ProFormaInputs {
            days_per_month: self.number("days"),
            rates: RateTable {
                elec: self.number("rateElec"),
                gas: self.number("rateGas"),
                water: self.number("rateWater"),
            },
            washers,
            dryers,
            equipment_costs,
            wash_fold: WashFold {
                price_per_lb: self.number("wfoldPrice"),
                lbs_per_day: self.number("wfoldLbs"),
            },
            vending: Vending {
                monthly_revenue: self.number("vendRev"),
                cogs_pct: self.number("vendCogsPct"),
            },
            lifts: LiftSettings {
                enabled: self.flag("applyLifts"),
                retool_budget: self.number("retoolBudget"),
                brand_budget: self.number("brandBudget"),
                included_in_project: self.exactly_one("includeLiftsInProject"),
                efficiency: EfficiencyPcts {
                    elec_pct: self.number("effElecPct"),
                    gas_pct: self.number("effGasPct"),
                    water_pct: self.number("effWaterPct"),
                },
            },
            hot_water: HotWaterParams {
                hot_share_pct: self.number_or("hotSharePct", 60.0),
                delta_t_f: self.number_or("deltaT", 65.0),
                heater_eff_pct: self.number_or("heaterEffPct", 80.0),
            },
            operating: OperatingCosts {
                rent: self.number("rent"),
                labor_hours_per_day: self.number("laborHrsDay"),
                wage: self.number("wage"),
                maint_base_pct: self.number("maintBasePct"),
                maint_age_uplift_pct: self.number("maintAgeUpliftPct"),
            },
            equipment_life: EquipmentLife {
                washer_years: self.number_or("lifeWasher", 13.0),
                dryer_years: self.number_or("lifeDryer", 17.0),
            },
            financing: Financing {
                project_cost: self.number("projCost"),
                cash_invested: self.number("cashInv"),
                working_capital: self.number("workingCap"),
                tranche_a: TrancheTerms {
                    max_pct_of_project: self.number("aPct"),
                    annual_rate_pct: self.number("aRate"),
                    term_years: self.number("aTerm"),
                },
                tranche_b: TrancheTerms {
                    max_pct_of_project: self.number("bPct"),
                    annual_rate_pct: self.number("bRate"),
                    term_years: self.number("bTerm"),
                },
            },
            tax: TaxParams {
                method: DepreciationMethod::from_label(method_label),
                equipment_life: self.integer_or("taxEquipLife", 7),
                building_life: self.integer_or("taxBuildingLife", 39),
                federal_rate_pct: self.number_or_blank("fedTaxRate", 21.0),
                state_rate_pct: self.number_or_blank("stateTaxRate", 8.84),
                entity,
            },
            growth: GrowthParams {
                revenue_growth_pct: self.number_or("revGrowPct", 2.5),
                opex_inflation_pct: self.number_or("opexInflPct", 3.0),
                horizon_years: if horizon > 0.0 { horizon as u32 } else { 0 },
            },
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormValues::new();
        for (id, value) in iter {
            form.set(id, value);
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("12.5"), 12.5);
        assert_eq!(coerce_number("  7 "), 7.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("7"), Some(7));
        assert_eq!(leading_integer("7.5"), Some(7));
        assert_eq!(leading_integer(" 39 years"), Some(39));
        assert_eq!(leading_integer("-3"), Some(-3));
        assert_eq!(leading_integer("x7"), None);
    }

    #[test]
    fn test_defaults_apply_on_blank_and_zero() {
        let form: FormValues = [("lifeWasher", "0"), ("hotSharePct", "")].into_iter().collect();
        let inputs = form.to_inputs(Vec::new(), Vec::new(), EquipmentCosts::default());

        assert_eq!(inputs.equipment_life.washer_years, 13.0);
        assert_eq!(inputs.equipment_life.dryer_years, 17.0);
        assert_eq!(inputs.hot_water.hot_share_pct, 60.0);
        assert_eq!(inputs.hot_water.delta_t_f, 65.0);
        assert_eq!(inputs.hot_water.heater_eff_pct, 80.0);
        assert_eq!(inputs.growth.revenue_growth_pct, 2.5);
        assert_eq!(inputs.growth.opex_inflation_pct, 3.0);
        assert_eq!(inputs.tax.equipment_life, 7);
        assert_eq!(inputs.tax.building_life, 39);
        assert_eq!(inputs.tax.federal_rate_pct, 21.0);
        assert_eq!(inputs.tax.state_rate_pct, 8.84);
        assert_eq!(inputs.tax.method, DepreciationMethod::Macrs);
        assert_eq!(inputs.tax.entity, EntityType::Llc);
    }

    #[test]
    fn test_explicit_zero_tax_rate_is_kept() {
        let form: FormValues = [("stateTaxRate", "0"), ("taxEquipLife", "0")].into_iter().collect();
        let inputs = form.to_inputs(Vec::new(), Vec::new(), EquipmentCosts::default());

        assert_eq!(inputs.tax.state_rate_pct, 0.0);
        assert_eq!(inputs.tax.equipment_life, 0);
    }

    #[test]
    fn test_toggles() {
        let form: FormValues = [("applyLifts", "2"), ("includeLiftsInProject", "2")]
            .into_iter()
            .collect();
        let inputs = form.to_inputs(Vec::new(), Vec::new(), EquipmentCosts::default());

        // Any non-zero value enables lifts, but only exactly 1 counts them in project cost
        assert!(inputs.lifts.enabled);
        assert!(!inputs.lifts.included_in_project);
    }

    #[test]
    fn test_malformed_fields_read_as_zero() {
        let form: FormValues = [("rent", "lots"), ("days", "30"), ("horizon", "-4")]
            .into_iter()
            .collect();
        let inputs = form.to_inputs(Vec::new(), Vec::new(), EquipmentCosts::default());

        assert_eq!(inputs.operating.rent, 0.0);
        assert_eq!(inputs.days_per_month, 30.0);
        assert_eq!(inputs.growth.horizon_years, 0);
    }

    #[test]
    fn test_lenient_machine_fields() {
        let washer: Washer =
            serde_json::from_str(r#"{"name":"W","count":"4","age":null,"vend":"abc"}"#).unwrap();
        assert_eq!(washer.count, 4.0);
        assert_eq!(washer.age, 0.0);
        assert_eq!(washer.vend, 0.0);
        assert_eq!(washer.turns, 0.0);
    }
}
