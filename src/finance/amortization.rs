//! Level-payment loan amortization

use serde::{Deserialize, Serialize};

/// Periodic payment for an amortizing loan
///
/// Spreadsheet sign convention: the result is negative (an outflow).
///
/// # Arguments
/// * `rate` - periodic rate as a fraction (0.005 for 0.5% per month)
/// * `periods` - number of payments
/// * `principal` - present value borrowed
pub fn pmt(rate: f64, periods: f64, principal: f64) -> f64 {
    if rate == 0.0 {
        return -(principal / periods);
    }
    -(principal * rate) / (1.0 - (1.0 + rate).powf(-periods))
}

/// One loan tranche
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: f64,
    /// Annual rate as a fraction
    pub annual_rate: f64,
    pub term_years: f64,
}

impl LoanTerms {
    /// Monthly payment magnitude; 0 when nothing is borrowed
    pub fn monthly_payment(&self) -> f64 {
        if self.principal > 0.0 {
            pmt(self.annual_rate / 12.0, self.term_years * 12.0, self.principal).abs()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_rate_is_straight_division() {
        for periods in [1.0, 12.0, 60.0, 360.0] {
            assert_eq!(pmt(0.0, periods, 120_000.0), -(120_000.0 / periods));
        }
    }

    #[test]
    fn test_thirty_year_mortgage() {
        let payment = pmt(0.005, 360.0, 100_000.0);
        assert!(payment < 0.0);
        assert!((payment.abs() - 599.55).abs() < 1.5, "got {}", payment);
    }

    #[test]
    fn test_tranche_payment() {
        let loan = LoanTerms { principal: 678_427.75, annual_rate: 0.0725, term_years: 20.0 };
        assert_relative_eq!(loan.monthly_payment(), 5362.13001101731, max_relative = 1e-10);
    }

    #[test]
    fn test_no_principal_no_payment() {
        let loan = LoanTerms { principal: 0.0, annual_rate: 0.08, term_years: 10.0 };
        assert_eq!(loan.monthly_payment(), 0.0);
    }
}
