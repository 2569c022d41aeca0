//! Automatic bracket search.

use crate::error::{MathError, MathResult};

/// Initial half-width of the search.
const INITIAL_STEP: f64 = 0.1;

/// The search stops once the step exceeds this width.
const MAX_STEP: f64 = 1e6;

/// Finds an interval around `initial_guess` over which `f` changes sign.
///
/// Expands exponentially in both directions. When `floor` is given the left
/// edge never reaches it: each step that would cross the floor moves halfway
/// towards it instead. Points where `f` is not finite are skipped.
///
/// Returns the bracket as `(low, high)`.
///
/// # Example
///
/// ```rust
/// use tasa_math::solvers::find_bracket;
///
/// let f = |r: f64| -100.0 + 110.0 / (1.0 + r);
/// let (low, high) = find_bracket(&f, 0.5, Some(-1.0)).unwrap();
/// assert!(f(low) * f(high) <= 0.0);
/// ```
pub fn find_bracket<F>(f: &F, initial_guess: f64, floor: Option<f64>) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if let Some(floor) = floor {
        if initial_guess <= floor {
            return Err(MathError::invalid_input(format!(
                "initial guess {initial_guess} is not above floor {floor}"
            )));
        }
    }

    let f_init = f(initial_guess);
    if !f_init.is_finite() {
        return Err(MathError::non_finite(initial_guess, f_init));
    }
    if f_init == 0.0 {
        return Ok((initial_guess, initial_guess));
    }

    let mut left = initial_guess;
    let mut right = initial_guess;
    let mut delta = INITIAL_STEP;

    while delta <= MAX_STEP {
        left = match floor {
            Some(floor) if left - delta <= floor => floor + (left - floor) / 2.0,
            _ => left - delta,
        };
        right += delta;

        let f_left = f(left);
        if f_left.is_finite() && f_left * f_init <= 0.0 {
            return Ok((left, initial_guess));
        }

        let f_right = f(right);
        if f_right.is_finite() && f_right * f_init <= 0.0 {
            return Ok((initial_guess, right));
        }

        delta *= 2.0;
    }

    log::debug!("no sign change found around {initial_guess} (left={left}, right={right})");
    Err(MathError::NoBracket { initial_guess })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_to_the_right() {
        let f = |x: f64| x - 3.0;

        let (low, high) = find_bracket(&f, 0.0, None).unwrap();

        assert!(low <= 3.0 && 3.0 <= high);
    }

    #[test]
    fn test_bracket_to_the_left() {
        let f = |x: f64| x + 7.5;

        let (low, high) = find_bracket(&f, 1.0, None).unwrap();

        assert!(low <= -7.5 && -7.5 <= high);
    }

    #[test]
    fn test_left_edge_stays_above_floor() {
        // Root at -0.99, very close to the floor
        let f = |r: f64| {
            if r <= -1.0 {
                f64::NAN
            } else {
                -100.0 + 1.0 / (1.0 + r)
            }
        };

        let (low, high) = find_bracket(&f, 0.10, Some(-1.0)).unwrap();

        assert!(low > -1.0);
        assert!(f(low) * f(high) <= 0.0);
    }

    #[test]
    fn test_guess_below_floor() {
        let f = |x: f64| x;

        assert!(matches!(
            find_bracket(&f, -2.0, Some(-1.0)),
            Err(MathError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_no_root() {
        let f = |x: f64| x * x + 1.0;

        assert!(matches!(
            find_bracket(&f, 0.5, None),
            Err(MathError::NoBracket { .. })
        ));
    }
}
