//! Financing, depreciation and tax calculators

mod amortization;
mod debt;
mod depreciation;
mod tax;
mod cash_basis;

pub use amortization::{pmt, LoanTerms};
pub use debt::{structure_debt, DebtStructure};
pub use depreciation::{calculate_depreciation, DepreciationMethod, MACRS_7_YEAR, MACRS_TABLE_LIFE};
pub use tax::{calculate_taxes, EntityType, TaxResult};
pub use cash_basis::{get_cash_invested_bases, CashBreakdown, CashInvestedBases, MIN_EQUITY_FLOOR_PCT};
