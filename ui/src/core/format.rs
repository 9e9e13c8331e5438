//! Formatting helpers for presenting metrics.

/// Fixed-point text with exact halves rounded away from zero, the way
/// browsers' `Number.prototype.toFixed` does. `{:.N}` alone rounds them to even.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    let value = if scaled.fract().abs() == 0.5 {
        scaled.round() / scale
    } else {
        value
    };
    format!("{value:.decimals$}")
}

pub fn format_measurement(value: f64, decimals: usize, unit: &str) -> String {
    format!("{} {unit}", format_fixed(value, decimals))
}
