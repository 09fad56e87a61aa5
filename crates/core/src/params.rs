//! Lenient extraction of tuning values from a JSON params object.
//!
//! Helpers never fail: a missing key or a value of the wrong type yields the
//! default, and out-of-range numbers are clamped. Anything that had to be
//! corrected is logged at `warn` so a bad request document is visible
//! without aborting synthesis.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// JSON integers are accepted and converted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    match params.get(name) {
        None => default,
        Some(v) => v.as_f64().unwrap_or_else(|| {
            tracing::warn!(param = name, value = %v, default, "non-numeric parameter ignored");
            default
        }),
    }
}

/// Like [`param_f64`], but clamps the result into `[min, max]`.
pub fn param_f64_clamped(params: &Value, name: &str, default: f64, min: f64, max: f64) -> f64 {
    let raw = param_f64(params, name, default);
    let clamped = raw.clamp(min, max);
    if clamped != raw {
        tracing::warn!(param = name, raw, clamped, "parameter clamped into range");
    }
    clamped
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or
/// not a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    match params.get(name) {
        None => default,
        Some(v) => v.as_u64().map(|n| n as usize).unwrap_or_else(|| {
            tracing::warn!(param = name, value = %v, default, "non-integer parameter ignored");
            default
        }),
    }
}
