//! Grid bands: solid vertical stripes sized by proportion.

use colorgrid_core::canvas::Canvas;
use colorgrid_core::layout::Layout;
use colorgrid_core::prng::Xorshift64;
use colorgrid_core::proportion::Swatch;

/// Fills contiguous vertical bands, left to right in request order.
///
/// Band widths are `round(usable_width * proportion)`; the last band takes
/// whatever columns remain so the bands tile the usable width exactly.
/// Uses no randomness, which makes it the rebuild fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridBands;

/// Column widths for each swatch, summing to `usable_width`.
pub fn band_widths(swatches: &[Swatch], usable_width: usize) -> Vec<usize> {
    let mut remaining = usable_width;
    let last = swatches.len().saturating_sub(1);
    swatches
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let w = if i == last {
                remaining
            } else {
                ((usable_width as f64 * s.proportion).round() as usize).min(remaining)
            };
            remaining -= w;
            w
        })
        .collect()
}

impl Layout for GridBands {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn place(&self, swatches: &[Swatch], canvas: &mut Canvas, _rng: &mut Xorshift64) {
        let region = canvas.usable();
        let mut x = region.x0;
        for (swatch, width) in swatches.iter().zip(band_widths(swatches, region.width())) {
            for column in x..x + width {
                for y in region.y0..region.y1 {
                    canvas.place(column, y, swatch.rgb);
                }
            }
            x += width;
        }
    }
}
