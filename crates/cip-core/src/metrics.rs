//! Metrics engine
//!
//! Derives the improvement percentage of a before/after measurement.
//! A non-positive baseline has no defined improvement, and neither has a
//! ratio that overflows to a non-finite value. [`compute_improvement`]
//! reports both as `0.0`, [`assess_improvement`] keeps them distinguishable.

use std::fmt;

/// Improvement of a before/after measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Improvement {
    /// Relative reduction in percent (negative when the value grew)
    Percent(f64),
    /// Baseline was zero or negative, or the ratio is not finite
    NoBaseline,
}

impl Improvement {
    /// Percentage, with a missing baseline counted as no improvement
    #[inline]
    #[must_use]
    pub fn percent_or_zero(self) -> f64 {
        match self {
            Improvement::Percent(p) => p,
            Improvement::NoBaseline => 0.0,
        }
    }

    /// Check if a baseline was available
    #[inline]
    #[must_use]
    pub fn is_defined(self) -> bool {
        matches!(self, Improvement::Percent(_))
    }
}

impl fmt::Display for Improvement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Improvement::Percent(p) => write!(f, "{p:.1}%"),
            Improvement::NoBaseline => f.write_str("n/a"),
        }
    }
}

/// Improvement of `after` relative to `before`
///
/// Always yields a finite percentage or [`Improvement::NoBaseline`].
#[must_use]
pub fn assess_improvement(before: f64, after: f64) -> Improvement {
    if before <= 0.0 {
        return Improvement::NoBaseline;
    }
    let percent = (before - after) / before * 100.0;
    if percent.is_finite() {
        Improvement::Percent(percent)
    } else {
        Improvement::NoBaseline
    }
}

/// Improvement percentage, `0.0` when `before <= 0` or the ratio overflows
#[inline]
#[must_use]
pub fn compute_improvement(before: f64, after: f64) -> f64 {
    assess_improvement(before, after).percent_or_zero()
}

/// Round to one decimal place for display
#[inline]
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improvement_of_wait_time_example() {
        let value = compute_improvement(45.0, 32.0);
        assert!((value - 28.888_888_888_888_89).abs() < 1e-9);
        assert_eq!(round_to_tenth(value), 28.9);
        assert_eq!(assess_improvement(45.0, 32.0).to_string(), "28.9%");
    }

    #[test]
    fn zero_baseline_is_guarded() {
        assert_eq!(compute_improvement(0.0, 5.0), 0.0);
        assert_eq!(compute_improvement(-3.0, 5.0), 0.0);
        assert_eq!(assess_improvement(0.0, 5.0), Improvement::NoBaseline);
        assert!(!assess_improvement(0.0, 0.0).is_defined());
        assert_eq!(Improvement::NoBaseline.to_string(), "n/a");
    }

    #[test]
    fn worsening_is_negative() {
        assert_eq!(compute_improvement(10.0, 15.0), -50.0);
        assert_eq!(compute_improvement(10.0, 10.0), 0.0);
        assert!(assess_improvement(10.0, 10.0).is_defined());
    }

    #[test]
    fn overflowing_ratio_has_no_value() {
        assert_eq!(assess_improvement(1.0, 1e307), Improvement::NoBaseline);
        assert_eq!(compute_improvement(1.0, 1e307), 0.0);
        assert_eq!(assess_improvement(f64::INFINITY, 1.0), Improvement::NoBaseline);
        assert_eq!(assess_improvement(1.0, f64::NAN), Improvement::NoBaseline);
        assert!(compute_improvement(1e-300, 1e10).is_finite());
    }
}
