//! The `Layout` trait every pixel-placement strategy implements.
//!
//! The trait is object-safe so strategies can be handled as `dyn Layout`
//! where a runtime switch is more convenient than the enum dispatcher.

use serde_json::Value;

use crate::canvas::Canvas;
use crate::prng::Xorshift64;
use crate::proportion::Swatch;

/// A pixel-placement strategy.
///
/// `place` receives normalized swatches in request order and an unset
/// canvas it owns exclusively for the duration of the call. It writes only
/// through [`Canvas::place`], so it can never overwrite a pixel or touch the
/// margin. Under-filling a quota is not an error; validation decides
/// whether the result is acceptable.
pub trait Layout {
    /// Short name used in logs and CLI output.
    fn name(&self) -> &'static str;

    /// Places every swatch onto `canvas`, drawing randomness from `rng`.
    fn place(&self, swatches: &[Swatch], canvas: &mut Canvas, rng: &mut Xorshift64);

    /// Effective tuning values as a JSON object.
    fn params(&self) -> Value {
        Value::Object(serde_json::Map::new())
    }
}

/// Pixel quota for a swatch: `round(proportion * usable * density)`.
pub fn quota(proportion: f64, usable_pixels: usize, density: f64) -> usize {
    (proportion * usable_pixels as f64 * density).round().max(0.0) as usize
}
