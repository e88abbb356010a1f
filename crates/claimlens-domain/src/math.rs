//! Pure financial calculation primitives
//!
//! Every function here is stateless. The verification engine and the
//! analyzer build on these; nothing else in the workspace reimplements
//! them.

use crate::claim::Unit;

/// Percentage growth rate from `previous` to `current`
///
/// Returns `None` when `previous` is zero (undefined growth).
///
/// # Examples
///
/// ```
/// use claimlens_domain::math::growth_rate;
///
/// assert_eq!(growth_rate(115.0, 100.0), Some(15.0));
/// assert_eq!(growth_rate(85.0, 100.0), Some(-15.0));
/// assert_eq!(growth_rate(100.0, 0.0), None);
/// ```
pub fn growth_rate(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some(((current - previous) / previous.abs()) * 100.0)
}

/// A margin or ratio expressed as a percentage
///
/// Returns `None` when the denominator is zero.
///
/// # Examples
///
/// ```
/// use claimlens_domain::math::margin;
///
/// assert_eq!(margin(30.0, 100.0), Some(30.0));
/// assert_eq!(margin(0.0, 100.0), Some(0.0));
/// assert_eq!(margin(10.0, 0.0), None);
/// ```
pub fn margin(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some((numerator / denominator) * 100.0)
}

/// Convert basis points to percentage points
pub fn basis_points_to_percentage(bps: f64) -> f64 {
    bps / 100.0
}

/// Convert percentage points to basis points
pub fn percentage_to_basis_points(pct: f64) -> f64 {
    pct * 100.0
}

/// Convert a raw dollar value to the named unit
///
/// Percent, basis-point, and ratio units pass through unchanged: the
/// conversion only applies to dollar scaling.
///
/// # Examples
///
/// ```
/// use claimlens_domain::math::normalize_to_unit;
/// use claimlens_domain::Unit;
///
/// assert_eq!(normalize_to_unit(5_000_000_000.0, Unit::UsdBillions), 5.0);
/// assert_eq!(normalize_to_unit(5_000_000.0, Unit::UsdMillions), 5.0);
/// assert_eq!(normalize_to_unit(5.0, Unit::Usd), 5.0);
/// ```
pub fn normalize_to_unit(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::UsdBillions => value / 1_000_000_000.0,
        Unit::UsdMillions => value / 1_000_000.0,
        _ => value,
    }
}

/// Convert a value in the named unit back to raw dollars
pub fn denormalize_from_unit(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::UsdBillions => value * 1_000_000_000.0,
        Unit::UsdMillions => value * 1_000_000.0,
        _ => value,
    }
}

/// How close a stated value is to the actual value, in [0, 1]
///
/// Formula: `max(0, 1 - |stated - actual| / |actual|)`.
///
/// Special cases: both zero is a perfect match (1.0); a nonzero
/// statement against a zero actual is a total miss (0.0).
///
/// # Examples
///
/// ```
/// use claimlens_domain::math::accuracy_score;
///
/// assert_eq!(accuracy_score(15.0, 15.0), 1.0);
/// assert!((accuracy_score(15.0, 14.0) - 0.9286).abs() < 0.001);
/// assert_eq!(accuracy_score(15.0, 0.0), 0.0);
/// assert_eq!(accuracy_score(0.0, 0.0), 1.0);
/// ```
pub fn accuracy_score(stated: f64, actual: f64) -> f64 {
    if actual == 0.0 {
        return if stated != 0.0 { 0.0 } else { 1.0 };
    }
    (1.0 - (stated - actual).abs() / actual.abs()).max(0.0)
}

/// How far off `stated` is from `actual`, as a signed percentage
///
/// Positive means the stated value overshoots the actual. `None` when
/// the actual is zero.
///
/// # Examples
///
/// ```
/// use claimlens_domain::math::percentage_difference;
///
/// assert_eq!(percentage_difference(115.0, 100.0), Some(15.0));
/// assert_eq!(percentage_difference(85.0, 100.0), Some(-15.0));
/// assert_eq!(percentage_difference(10.0, 0.0), None);
/// ```
pub fn percentage_difference(stated: f64, actual: f64) -> Option<f64> {
    if actual == 0.0 {
        return None;
    }
    Some(((stated - actual) / actual.abs()) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_rate_negative_base() {
        // Growth against a negative base uses the base's magnitude
        assert_eq!(growth_rate(-50.0, -100.0), Some(50.0));
    }

    #[test]
    fn test_accuracy_score_examples() {
        // Revenue growth stated 12% vs actual ~10.67%
        let score = accuracy_score(12.0, 10.67);
        assert!((score - 0.8754).abs() < 0.001);
    }

    #[test]
    fn test_accuracy_score_symmetric_around_actual() {
        // Overshooting and undershooting by the same amount score equally
        assert_eq!(accuracy_score(11.0, 10.0), accuracy_score(9.0, 10.0));
    }

    #[test]
    fn test_basis_point_round_trip() {
        assert_eq!(basis_points_to_percentage(200.0), 2.0);
        assert_eq!(percentage_to_basis_points(2.0), 200.0);
    }

    #[test]
    fn test_unit_conversion_passthrough() {
        assert_eq!(normalize_to_unit(46.2, Unit::Percent), 46.2);
        assert_eq!(normalize_to_unit(150.0, Unit::BasisPoints), 150.0);
        assert_eq!(denormalize_from_unit(0.5, Unit::Ratio), 0.5);
    }
}
