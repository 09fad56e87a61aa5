//! Random scatter: colors claim individual pixels from one shuffled pool.

use colorgrid_core::canvas::Canvas;
use colorgrid_core::layout::{quota, Layout};
use colorgrid_core::prng::Xorshift64;
use colorgrid_core::proportion::Swatch;

/// Scatters each color over uniformly random, unique usable pixels.
///
/// All colors draw from one shuffled pool without replacement: the first
/// color takes the first `quota` candidates, the next color continues where
/// it stopped, and so on. Counts are exact up to rounding and pool
/// exhaustion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomScatter;

impl Layout for RandomScatter {
    fn name(&self) -> &'static str {
        "random"
    }

    fn place(&self, swatches: &[Swatch], canvas: &mut Canvas, rng: &mut Xorshift64) {
        let usable = canvas.usable_pixel_count();
        let mut pool: Vec<(usize, usize)> = canvas.usable().coords().collect();
        rng.shuffle(&mut pool);
        let mut candidates = pool.into_iter();

        for swatch in swatches {
            let target = quota(swatch.proportion, usable, 1.0);
            let mut placed = 0;
            while placed < target {
                let Some((x, y)) = candidates.next() else {
                    tracing::debug!(color = %swatch.identifier, placed, target, "scatter pool exhausted");
                    return;
                };
                if canvas.place(x, y, swatch.rgb) {
                    placed += 1;
                }
            }
        }
    }
}
