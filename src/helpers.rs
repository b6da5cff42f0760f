use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// Angle constants
// ---------------------------------------------------------------------------

pub const HALF_PI: f64 = PI / 2.0;
pub const RAD_TO_DEG: f64 = 180.0 / PI;
pub const DEG_TO_RAD: f64 = PI / 180.0;

/// Replace NaN with zero. Projections of zero-length vectors end up here.
pub fn not_nan(val: f64) -> f64 {
    if val.is_nan() {
        0.0
    } else {
        val
    }
}

/// Open-interval comparison: true for `value` in `(target - margin, target + margin)`.
pub fn equal_with_margin(value: f64, target: f64, margin: f64) -> bool {
    value > target - margin && value < target + margin
}

/// Action name carried by a tokenized command (second token, lowercased).
pub fn command_action(args: &[&str]) -> String {
    args.get(1).map(|s| s.to_lowercase()).unwrap_or_default()
}
