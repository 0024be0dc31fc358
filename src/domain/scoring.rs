use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Number of ratings that costs one `deduction`.
    pub deviation: u64,
    pub deduction: f64,
    /// Decimal places the penalty is rounded up to.
    pub precision: u32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            deviation: 100_000,
            deduction: 0.1,
            precision: 1,
        }
    }
}

/// Penalty for having fewer ratings than the most rated film of the batch.
///
/// `ceil((max_rating_count - rating_count) / deviation * deduction)` at
/// `precision` decimals. Not clamped: a count above the maximum gives a
/// negative penalty.
pub fn penalty(
    rating_count: u64,
    max_rating_count: u64,
    deviation: u64,
    deduction: f64,
    precision: u32,
) -> Result<f64> {
    if deviation == 0 {
        return Err(EtlError::invalid_argument(
            "deviation must be non-zero, the penalty would divide by zero",
        ));
    }
    if !deduction.is_finite() {
        return Err(EtlError::invalid_argument(format!(
            "deduction must be a finite number, got {}",
            deduction
        )));
    }

    let missing = max_rating_count as f64 - rating_count as f64;
    let raw = missing / deviation as f64 * deduction;
    let scale = 10f64.powi(precision as i32);

    Ok((raw * scale).ceil() / scale)
}

/// Bonus points for Oscar wins.
pub fn award_bonus(award_count: u32) -> f64 {
    match award_count {
        0 => 0.0,
        1..=2 => 0.3,
        3..=5 => 0.5,
        6..=10 => 1.0,
        _ => 1.5,
    }
}

pub fn adjusted_score(rating: f64, penalty: f64, bonus: f64, precision: u32) -> f64 {
    round_to(rating - penalty + bonus, precision.max(1))
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_fixture_values() {
        assert_eq!(penalty(348253, 2697294, 100000, 0.1, 1).unwrap(), 2.4);
        assert_eq!(penalty(766395, 2697294, 100000, 0.1, 1).unwrap(), 2.0);
        assert_eq!(penalty(2617280, 2697294, 100000, 0.2, 2).unwrap(), 0.17);
    }

    #[test]
    fn test_penalty_zero_deviation_is_invalid_argument() {
        for (count, max) in [(766395, 2697294), (0, 0), (10, 5)] {
            let err = penalty(count, max, 0, 0.1, 1).unwrap_err();
            assert!(matches!(err, EtlError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn test_penalty_rejects_non_finite_deduction() {
        assert!(penalty(1, 2, 100000, f64::NAN, 1).is_err());
        assert!(penalty(1, 2, 100000, f64::INFINITY, 1).is_err());
    }

    #[test]
    fn test_penalty_is_zero_for_the_most_rated_film() {
        assert_eq!(penalty(2697294, 2697294, 100000, 0.1, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_penalty_is_negative_above_the_maximum() {
        let p = penalty(2_900_000, 2_697_294, 100000, 0.1, 1).unwrap();
        assert!(p < 0.0);
        assert_eq!(p, -0.2);
    }

    #[test]
    fn test_penalty_non_negative_and_non_increasing() {
        let max = 2_697_294;
        let mut previous = f64::INFINITY;
        for count in (0..=max).step_by(37_211) {
            let p = penalty(count, max, 100000, 0.1, 1).unwrap();
            assert!(p >= 0.0);
            assert!(p <= previous, "penalty rose at rating_count {}", count);
            previous = p;
        }
    }

    #[test]
    fn test_award_bonus_table() {
        assert_eq!(award_bonus(0), 0.0);
        assert_eq!(award_bonus(1), 0.3);
        assert_eq!(award_bonus(2), 0.3);
        assert_eq!(award_bonus(3), 0.5);
        assert_eq!(award_bonus(5), 0.5);
        assert_eq!(award_bonus(6), 1.0);
        assert_eq!(award_bonus(10), 1.0);
        assert_eq!(award_bonus(11), 1.5);
        assert_eq!(award_bonus(14), 1.5);
        assert_eq!(award_bonus(u32::MAX), 1.5);
    }

    #[test]
    fn test_award_bonus_non_decreasing() {
        let mut previous = 0.0;
        for count in 0..50 {
            let b = award_bonus(count);
            assert!(b >= previous);
            previous = b;
        }
    }

    #[test]
    fn test_adjusted_score_drops_float_noise() {
        assert_eq!(adjusted_score(9.2, 2.4, 0.5, 1), 7.3);
        assert_eq!(adjusted_score(9.0, 0.17, 0.3, 2), 9.13);
        assert_eq!(adjusted_score(8.1, 0.0, 0.0, 0), 8.1);
    }
}
