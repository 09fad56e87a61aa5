//! Radial rings: concentric annuli around the usable region's center.

use colorgrid_core::canvas::{Canvas, Region};
use colorgrid_core::layout::Layout;
use colorgrid_core::prng::Xorshift64;
use colorgrid_core::proportion::Swatch;

/// Concentric rings, innermost first in request order.
///
/// Ring `i` is `p_i * max_radius` wide, where `max_radius` is half the
/// smaller usable dimension. Intervals are half-open `[start, end)`, so a
/// pixel exactly on a boundary belongs to the outer ring. Pixels beyond
/// `max_radius` stay unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RadialRings;

/// Center and maximum radius of the ring system for a usable region.
pub fn ring_geometry(region: &Region) -> (f64, f64, f64) {
    let cx = (region.x0 + region.x1) as f64 / 2.0;
    let cy = (region.y0 + region.y1) as f64 / 2.0;
    let max_radius = region.width().min(region.height()) as f64 / 2.0;
    (cx, cy, max_radius)
}

/// Outer boundary of each ring; the last one is exactly `max_radius`.
pub fn ring_bounds(swatches: &[Swatch], max_radius: f64) -> Vec<f64> {
    let mut edge = 0.0;
    let mut bounds: Vec<f64> = swatches
        .iter()
        .map(|s| {
            edge += s.proportion * max_radius;
            edge
        })
        .collect();
    if let Some(last) = bounds.last_mut() {
        *last = max_radius;
    }
    bounds
}

/// Index of the ring containing distance `d`, if any.
pub fn ring_index(bounds: &[f64], d: f64) -> Option<usize> {
    bounds.iter().position(|&outer| d < outer)
}

impl Layout for RadialRings {
    fn name(&self) -> &'static str {
        "radial"
    }

    fn place(&self, swatches: &[Swatch], canvas: &mut Canvas, _rng: &mut Xorshift64) {
        let region = canvas.usable();
        let (cx, cy, max_radius) = ring_geometry(&region);
        let bounds = ring_bounds(swatches, max_radius);

        for (x, y) in region.coords() {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if let Some(i) = ring_index(&bounds, (dx * dx + dy * dy).sqrt()) {
                canvas.place(x, y, swatches[i].rgb);
            }
        }
    }
}
