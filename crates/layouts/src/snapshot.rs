//! PNG export of a [`Canvas`].
//!
//! Feature-gated behind `png` (default on) so library users that only need
//! the RGBA buffer do not pull in the `image` crate.

use colorgrid_core::canvas::Canvas;
use colorgrid_core::error::SynthesisError;
use std::path::Path;

/// Writes a canvas as an RGBA PNG. Unset pixels stay fully transparent.
///
/// Returns `SynthesisError::InvalidDimensions` if the canvas dimensions
/// overflow `u32`, or `SynthesisError::Io` on write failure.
pub fn write_png(canvas: &Canvas, path: &Path) -> Result<(), SynthesisError> {
    let w = u32::try_from(canvas.width()).map_err(|_| SynthesisError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| SynthesisError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, canvas.as_rgba().to_vec())
        .ok_or_else(|| SynthesisError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| SynthesisError::Io(e.to_string()))
}
