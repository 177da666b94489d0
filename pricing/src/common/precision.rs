/// Decimal places kept for premiums.
pub const PREMIUM_DECIMALS: i32 = 2;
/// Decimal places kept for every Greek.
pub const GREEK_DECIMALS: i32 = 3;

/// Rounds half away from zero at `decimals` places. A result of negative zero
/// comes back as positive zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale + 0.0
}
