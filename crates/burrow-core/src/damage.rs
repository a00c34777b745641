//! Fall damage.

use crate::constants::{FALL_DAMAGE_LINEAR_DIVISOR, FALL_DAMAGE_SQUARE_DIVISOR};

/// Damage taken after falling `pixels_fallen` pixels.
///
/// Falls up to `tolerance` pixels are free. Past that the damage grows
/// quadratically with the excess distance. A `None` tolerance means the
/// body never takes fall damage.
pub fn fall_damage(pixels_fallen: i32, tolerance: Option<i32>) -> i32 {
    let Some(tolerance) = tolerance else {
        return 0;
    };
    if pixels_fallen <= tolerance {
        return 0;
    }
    // Widened so falls from very tall worlds saturate instead of wrapping.
    let effective = i64::from(pixels_fallen) - i64::from(tolerance);
    let square = i64::from(FALL_DAMAGE_SQUARE_DIVISOR);
    let linear = i64::from(FALL_DAMAGE_LINEAR_DIVISOR);
    let damage = effective.saturating_mul(effective) / square / linear + effective / linear;
    i32::try_from(damage).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_tolerance_is_free() {
        assert_eq!(fall_damage(0, Some(64)), 0);
        assert_eq!(fall_damage(64, Some(64)), 0);
    }

    #[test]
    fn test_unlimited_tolerance() {
        assert_eq!(fall_damage(10_000, None), 0);
    }

    #[test]
    fn test_damage_grows_quadratically() {
        // 128 past tolerance: 128² / 256 / 8 + 128 / 8 = 8 + 16
        assert_eq!(fall_damage(192, Some(64)), 24);
        // 256 past tolerance: 32 + 32
        assert_eq!(fall_damage(320, Some(64)), 64);
        assert!(fall_damage(400, Some(0)) > 2 * fall_damage(200, Some(0)));
    }

    #[test]
    fn test_very_long_falls_do_not_overflow() {
        // 100000² / 256 / 8 + 100000 / 8 = 4882812 + 12500
        assert_eq!(fall_damage(100_000, Some(0)), 4_895_312);
        assert_eq!(fall_damage(i32::MAX, Some(i32::MIN)), i32::MAX);
        assert_eq!(fall_damage(i32::MAX, Some(0)), i32::MAX);
    }
}
