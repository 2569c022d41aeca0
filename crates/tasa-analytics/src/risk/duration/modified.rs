//! Modified duration calculation.
//!
//! ## Formula
//!
//! ```text
//! D_mod = D_mac / (1 + irr/periods)
//! ```

use tasa_core::{TasaError, TasaResult};

/// Convert Macaulay duration to modified duration.
///
/// # Arguments
///
/// * `macaulay` - Macaulay duration in years
/// * `irr` - Annual rate (as decimal)
/// * `periods` - Compounding periods per year, must be positive
pub fn modified_duration(macaulay: f64, irr: f64, periods: f64) -> TasaResult<f64> {
    if !(periods.is_finite() && periods > 0.0) {
        return Err(TasaError::duration(format!(
            "compounding periods must be positive, got {periods}"
        )));
    }

    let denominator = 1.0 + irr / periods;
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(TasaError::duration(format!(
            "1 + irr/periods is {denominator} for irr {irr}"
        )));
    }

    let duration = macaulay / denominator;
    if !duration.is_finite() {
        return Err(TasaError::duration("non-finite modified duration"));
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_semi_annual() {
        assert_relative_eq!(
            modified_duration(4.5, 0.08, 2.0).unwrap(),
            4.5 / 1.04,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_rate_leaves_duration_unchanged() {
        assert_relative_eq!(modified_duration(3.2, 0.0, 2.0).unwrap(), 3.2);
    }

    #[test]
    fn test_invalid_periods() {
        for periods in [0.0, -2.0, f64::NAN] {
            assert!(matches!(
                modified_duration(4.5, 0.08, periods),
                Err(TasaError::Duration { .. })
            ));
        }
    }

    #[test]
    fn test_zero_denominator() {
        assert!(matches!(
            modified_duration(4.5, -2.0, 2.0),
            Err(TasaError::Duration { .. })
        ));
    }
}
