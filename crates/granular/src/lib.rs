#![deny(unsafe_code)]
//! Organic granule layout.
//!
//! Fills each color's pixel quota with irregular "rubber crumb" granules.
//! Seeds are drawn from one shuffled pool of usable pixels shared by all
//! colors, so no color can claim more than its fair random share of seed
//! positions. Granules never overwrite pixels set by an earlier granule,
//! and each color stops at its quota or when its candidate budget runs out.
//!
//! Quotas are scaled by a per-class fill ratio below 1.0, which leaves
//! gaps between granules that read as texture in the downstream image.

pub mod granule;

use colorgrid_core::canvas::Canvas;
use colorgrid_core::layout::{quota, Layout};
use colorgrid_core::params::{param_f64_clamped, param_usize};
use colorgrid_core::prng::Xorshift64;
use colorgrid_core::proportion::Swatch;
use colorgrid_core::request::GranuleDensity;
use serde_json::{json, Value};

use crate::granule::{Granule, MAX_GRANULE_SIZE, MIN_GRANULE_SIZE};

/// Default candidate budget per quota pixel.
const DEFAULT_ATTEMPT_MULTIPLIER: usize = 10;

/// Tuning for one granular run.
///
/// Use [`GranularParams::for_density`] for the built-in class profiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GranularParams {
    /// Size class these values were derived from.
    pub density: GranuleDensity,
    /// Lower bound of the nominal granule radius, in pixels.
    pub min_size: f64,
    /// Upper bound of the nominal granule radius, in pixels.
    pub max_size: f64,
    /// Fraction of each color's ideal area to fill (0.7 to 0.9).
    pub fill_ratio: f64,
    /// Multiplicative size jitter: sizes vary by `1 ± variation`.
    pub variation: f64,
    /// Probability that a granule is an irregular polygon instead of a disc.
    pub form_complexity: f64,
    /// Strength of vertex jitter and edge roughening.
    pub organic_factor: f64,
    /// Candidate seeds allowed per quota pixel before a color gives up.
    pub attempt_multiplier: usize,
}

impl GranularParams {
    /// Built-in profile for a granule-size class.
    pub fn for_density(density: GranuleDensity) -> Self {
        let (min_size, max_size, fill_ratio, variation, form_complexity, organic_factor) =
            match density {
                GranuleDensity::Small => (2.0, 5.0, 0.9, 0.3, 0.6, 0.5),
                GranuleDensity::Medium => (4.0, 9.0, 0.8, 0.35, 0.5, 0.6),
                GranuleDensity::Large => (8.0, 16.0, 0.7, 0.4, 0.4, 0.7),
            };
        Self {
            density,
            min_size,
            max_size,
            fill_ratio,
            variation,
            form_complexity,
            organic_factor,
            attempt_multiplier: DEFAULT_ATTEMPT_MULTIPLIER,
        }
    }

    /// Class profile with overrides from a JSON params object.
    ///
    /// Recognized keys: `min_size`, `max_size`, `fill_ratio`, `variation`,
    /// `form_complexity`, `organic_factor`, `attempt_multiplier`. Values are
    /// clamped into sane ranges; missing or mistyped keys keep the profile value.
    pub fn from_json(density: GranuleDensity, params: &Value) -> Self {
        let base = Self::for_density(density);
        let min_size = param_f64_clamped(params, "min_size", base.min_size, MIN_GRANULE_SIZE, MAX_GRANULE_SIZE);
        let max_size = param_f64_clamped(params, "max_size", base.max_size, min_size, MAX_GRANULE_SIZE);
        Self {
            density,
            min_size,
            max_size,
            fill_ratio: param_f64_clamped(params, "fill_ratio", base.fill_ratio, 0.1, 1.0),
            variation: param_f64_clamped(params, "variation", base.variation, 0.0, 0.9),
            form_complexity: param_f64_clamped(params, "form_complexity", base.form_complexity, 0.0, 1.0),
            organic_factor: param_f64_clamped(params, "organic_factor", base.organic_factor, 0.0, 1.0),
            attempt_multiplier: param_usize(params, "attempt_multiplier", base.attempt_multiplier).max(1),
        }
    }
}

impl Default for GranularParams {
    fn default() -> Self {
        Self::for_density(GranuleDensity::default())
    }
}

/// The organic granule layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Granular {
    params: GranularParams,
}

impl Granular {
    pub fn new(params: GranularParams) -> Self {
        Self { params }
    }

    /// Granular layout with the built-in profile for `density`.
    pub fn for_density(density: GranuleDensity) -> Self {
        Self::new(GranularParams::for_density(density))
    }

    /// Granular layout with JSON overrides on top of the `density` profile.
    pub fn from_json(density: GranuleDensity, params: &Value) -> Self {
        Self::new(GranularParams::from_json(density, params))
    }

    pub fn tuning(&self) -> &GranularParams {
        &self.params
    }

    /// Draws the next granule around seed pixel `(x, y)`.
    fn draw_granule(&self, x: usize, y: usize, rng: &mut Xorshift64) -> Granule {
        let p = &self.params;
        let size = (rng.next_range(p.min_size, p.max_size) * rng.jitter(p.variation))
            .clamp(MIN_GRANULE_SIZE, MAX_GRANULE_SIZE);
        if rng.chance(p.form_complexity) {
            Granule::polygon(x, y, size, p.variation, p.organic_factor, rng)
        } else {
            Granule::disc(x, y, size)
        }
    }
}

impl Layout for Granular {
    fn name(&self) -> &'static str {
        "granular"
    }

    fn place(&self, swatches: &[Swatch], canvas: &mut Canvas, rng: &mut Xorshift64) {
        let region = canvas.usable();
        let usable = region.area();
        let (width, height) = (canvas.width(), canvas.height());

        let mut pool: Vec<(usize, usize)> = region.coords().collect();
        rng.shuffle(&mut pool);
        let mut seeds = pool.into_iter();

        for swatch in swatches {
            let target = quota(swatch.proportion, usable, self.params.fill_ratio);
            let budget = target.saturating_mul(self.params.attempt_multiplier);
            let mut placed = 0;
            let mut attempts = 0;
            let mut granules = 0;

            while placed < target && attempts < budget {
                let Some((sx, sy)) = seeds.next() else {
                    break;
                };
                attempts += 1;
                if canvas.is_set(sx, sy) {
                    continue;
                }
                let granule = self.draw_granule(sx, sy, rng);
                granules += 1;
                for (x, y) in granule.rasterize(width, height, self.params.organic_factor, rng) {
                    if placed == target {
                        break;
                    }
                    if canvas.place(x, y, swatch.rgb) {
                        placed += 1;
                    }
                }
            }

            if placed < target {
                tracing::debug!(
                    color = %swatch.identifier,
                    placed,
                    target,
                    attempts,
                    "granular quota under-filled"
                );
            } else {
                tracing::trace!(color = %swatch.identifier, placed, granules, "granular quota met");
            }
        }
    }

    fn params(&self) -> Value {
        let p = &self.params;
        json!({
            "density": p.density.as_str(),
            "min_size": p.min_size,
            "max_size": p.max_size,
            "fill_ratio": p.fill_ratio,
            "variation": p.variation,
            "form_complexity": p.form_complexity,
            "organic_factor": p.organic_factor,
            "attempt_multiplier": p.attempt_multiplier,
        })
    }
}
