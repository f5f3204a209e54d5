// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Round a base value scaled by a multiplier to the nearest whole number.
///
/// The product is taken in double precision so that values like `15 * 1.3`
/// land on the exact half and round up instead of falling just short.
pub fn scaled_round(base: f64, multiplier: f64) -> f32 {
    (base * multiplier).round() as f32
}

/// Move `value` toward zero by `amount`, never crossing it
pub fn count_down(value: f32, amount: f32) -> f32 {
    (value - amount).max(0.0)
}
