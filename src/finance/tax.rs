//! Income tax on pass-through earnings

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ownership entity
///
/// Carried through to the tax calculation but every entity is currently taxed
/// the same flat federal + state way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    #[default]
    Llc,
    SCorp,
    CCorp,
    SoleProprietorship,
    Partnership,
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "llc" => Ok(EntityType::Llc),
            "s_corp" | "scorp" => Ok(EntityType::SCorp),
            "c_corp" | "ccorp" => Ok(EntityType::CCorp),
            "sole_proprietorship" | "sole_prop" => Ok(EntityType::SoleProprietorship),
            "partnership" => Ok(EntityType::Partnership),
            other => Err(format!("Unknown entity type: {}", other)),
        }
    }
}

/// Annual tax outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub taxable_income: f64,
    pub fed_tax: f64,
    pub state_tax: f64,
    pub total_tax: f64,
    /// EBITDA less interest and tax
    pub after_tax_income: f64,
}

/// Annual taxes on `ebitda - depreciation - interest`
///
/// Losses are not carried forward: a non-positive taxable income simply owes
/// nothing. `_entity` has no effect on the result.
pub fn calculate_taxes(
    ebitda: f64,
    depreciation: f64,
    interest: f64,
    fed_rate_pct: f64,
    state_rate_pct: f64,
    _entity: EntityType,
) -> TaxResult {
    let taxable_income = ebitda - depreciation - interest;

    if taxable_income <= 0.0 {
        return TaxResult {
            taxable_income,
            fed_tax: 0.0,
            state_tax: 0.0,
            total_tax: 0.0,
            after_tax_income: ebitda - interest,
        };
    }

    let fed_tax = taxable_income * (fed_rate_pct / 100.0);
    let state_tax = taxable_income * (state_rate_pct / 100.0);
    let total_tax = fed_tax + state_tax;

    TaxResult {
        taxable_income,
        fed_tax,
        state_tax,
        total_tax,
        after_tax_income: ebitda - interest - total_tax,
    }
}
