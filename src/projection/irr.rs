//! Discounting helpers for annual projection cash flows

const IRR_TOLERANCE: f64 = 1e-10;
const IRR_MAX_ITERATIONS: usize = 1000;
const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 10.0;

/// Present value of `flows` where `flows[0]` arrives at the end of year 1
pub fn present_value(rate: f64, flows: &[f64]) -> f64 {
    flows
        .iter()
        .enumerate()
        .map(|(i, &cf)| cf / (1.0 + rate).powi(i as i32 + 1))
        .sum()
}

/// Annual internal rate of return of `flows`, where `flows[0]` is at time zero
///
/// Newton-Raphson from a 10% guess, falling back to bisection on
/// [-99%, 1000%]. Returns `None` when the flows never change sign or no root
/// is bracketed.
pub fn calculate_irr(flows: &[f64]) -> Option<f64> {
    if flows.is_empty() {
        return None;
    }

    // All-zero flows: any rate works, report 0
    if flows.iter().all(|cf| cf.abs() < IRR_TOLERANCE) {
        return Some(0.0);
    }

    // Need at least one sign change
    let has_inflow = flows.iter().any(|&cf| cf > IRR_TOLERANCE);
    let has_outflow = flows.iter().any(|&cf| cf < -IRR_TOLERANCE);
    if !has_inflow || !has_outflow {
        return None;
    }

    // Newton-Raphson
    let mut rate = 0.10;
    for _ in 0..IRR_MAX_ITERATIONS {
        let (value, slope) = npv_and_slope(flows, rate);
        // Flat derivative, Newton step undefined
        if slope.abs() < 1e-20 {
            return irr_bisection(flows);
        }

        // Keep the step inside the bracket used by bisection
        let next = (rate - value / slope).clamp(MIN_RATE, MAX_RATE);
        if (next - rate).abs() < IRR_TOLERANCE {
            return Some(next);
        }
        rate = next;
    }

    // Did not converge
    irr_bisection(flows)
}

fn npv_at(flows: &[f64], rate: f64) -> f64 {
    flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

fn npv_and_slope(flows: &[f64], rate: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut slope = 0.0;
    for (t, &cf) in flows.iter().enumerate() {
        value += cf / (1.0 + rate).powi(t as i32);
        // d/dr of cf/(1+r)^t
        if t > 0 {
            slope -= t as f64 * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }
    (value, slope)
}

fn irr_bisection(flows: &[f64]) -> Option<f64> {
    let mut low = MIN_RATE;
    let mut high = MAX_RATE;
    let mut value_low = npv_at(flows, low);

    // Root not bracketed
    if value_low * npv_at(flows, high) > 0.0 {
        return None;
    }

    for _ in 0..IRR_MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let value_mid = npv_at(flows, mid);

        if value_mid.abs() < IRR_TOLERANCE || (high - low) / 2.0 < IRR_TOLERANCE {
            return Some(mid);
        }

        // Keep the half that still brackets the root
        if value_mid * value_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            value_low = value_mid;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_period_irr() {
        let irr = calculate_irr(&[-1000.0, 1100.0]).unwrap();
        assert_relative_eq!(irr, 0.10, epsilon = 1e-9);
    }

    #[test]
    fn test_irr_zeroes_npv() {
        let flows = [-100_000.0, 30_000.0, 35_000.0, 40_000.0, 45_000.0];
        let irr = calculate_irr(&flows).unwrap();
        assert!(npv_at(&flows, irr).abs() < 1e-6);
    }

    #[test]
    fn test_no_sign_change() {
        assert_eq!(calculate_irr(&[-1000.0, -50.0, -10.0]), None);
        assert_eq!(calculate_irr(&[1000.0, 50.0]), None);
        assert_eq!(calculate_irr(&[]), None);
    }

    #[test]
    fn test_present_value_starts_at_year_one() {
        let pv = present_value(0.06, &[106.0, 112.36]);
        assert_relative_eq!(pv, 200.0, epsilon = 1e-9);
    }
}
