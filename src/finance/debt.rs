//! Two-tranche acquisition debt

use serde::{Deserialize, Serialize};

use super::LoanTerms;
use crate::inputs::Financing;

/// Loan sizing and monthly debt service
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtStructure {
    pub tranche_a: LoanTerms,
    pub tranche_b: LoanTerms,
    /// Monthly payment on tranche A
    pub pmt_a: f64,
    /// Monthly payment on tranche B
    pub pmt_b: f64,
    pub total_debt: f64,
    /// Combined monthly payment
    pub total_debt_service: f64,
}

impl DebtStructure {
    pub fn has_debt_service(&self) -> bool {
        self.total_debt_service > 0.0
    }
}

/// Size both tranches and their payments
///
/// The loan need is `project_cost - cash_invested`. Tranche A takes as much as
/// its ceiling allows; tranche B covers the remainder up to its own ceiling.
/// Any need beyond both ceilings stays unfunded.
pub fn structure_debt(financing: &Financing) -> DebtStructure {
    let project_cost = financing.project_cost;
    let total_loan = (project_cost - financing.cash_invested).max(0.0);

    let max_a = project_cost * (financing.tranche_a.max_pct_of_project / 100.0);
    let max_b = project_cost * (financing.tranche_b.max_pct_of_project / 100.0);
    let loan_a = total_loan.min(max_a);
    let loan_b = (total_loan - loan_a).max(0.0).min(max_b);

    let tranche_a = LoanTerms {
        principal: loan_a,
        annual_rate: financing.tranche_a.annual_rate_pct / 100.0,
        term_years: financing.tranche_a.term_years,
    };
    let tranche_b = LoanTerms {
        principal: loan_b,
        annual_rate: financing.tranche_b.annual_rate_pct / 100.0,
        term_years: financing.tranche_b.term_years,
    };

    let pmt_a = tranche_a.monthly_payment();
    let pmt_b = tranche_b.monthly_payment();

    DebtStructure {
        tranche_a,
        tranche_b,
        pmt_a,
        pmt_b,
        total_debt: loan_a + loan_b,
        total_debt_service: pmt_a + pmt_b,
    }
}
