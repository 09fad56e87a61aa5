#![deny(unsafe_code)]
//! Layout registry, canvas validation and the synthesis entry point.
//!
//! This crate sits between `colorgrid-core` (which defines the `Layout`
//! trait) and the granular layout crate. The CLI depends only on this crate
//! to avoid duplicating dispatch logic.

pub mod bands;
pub mod radial;
pub mod scatter;
pub mod synth;
pub mod validate;

#[cfg(feature = "png")]
pub mod snapshot;

use colorgrid_core::canvas::Canvas;
use colorgrid_core::prng::Xorshift64;
use colorgrid_core::proportion::Swatch;
use colorgrid_core::request::{GranuleDensity, LayoutChoice};
use colorgrid_core::Layout;
use colorgrid_granular::Granular;
use serde_json::Value;

pub use bands::GridBands;
pub use radial::RadialRings;
pub use scatter::RandomScatter;
pub use synth::{synthesize, synthesize_with, Synthesis};
pub use validate::{CanvasCheck, CanvasValidator, Rejection, ValidationReport};

/// Names accepted by [`LayoutChoice`], in display order.
const LAYOUT_NAMES: &[&str] = &["auto", "random", "grid", "radial", "granular"];

/// Enumeration of all placement layouts.
///
/// Wraps each layout implementation and delegates `Layout` trait methods.
/// Use [`LayoutKind::select`] to resolve a request's choice.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutKind {
    /// Uniform random pixels from one shared pool.
    Random(RandomScatter),
    /// Vertical solid bands.
    Grid(GridBands),
    /// Concentric rings.
    Radial(RadialRings),
    /// Organic granules of a given size class.
    Granular(Granular),
}

impl LayoutKind {
    /// Resolves a layout choice for `color_count` colors.
    ///
    /// `Auto` picks random scatter for one color, medium granules for two or
    /// three, and small granules for four or more. An explicit `density`
    /// always selects granules of that class under `Auto`. `params` tunes the
    /// granular layout and is ignored by the others.
    pub fn select(
        choice: LayoutChoice,
        density: Option<GranuleDensity>,
        color_count: usize,
        params: &Value,
    ) -> Self {
        let granular = |d: GranuleDensity| LayoutKind::Granular(Granular::from_json(d, params));
        let kind = match choice {
            LayoutChoice::Random => LayoutKind::Random(RandomScatter),
            LayoutChoice::Grid => LayoutKind::Grid(GridBands),
            LayoutChoice::Radial => LayoutKind::Radial(RadialRings),
            LayoutChoice::Granular => granular(density.unwrap_or(GranuleDensity::Medium)),
            LayoutChoice::Auto => match (density, color_count) {
                (Some(d), _) => granular(d),
                (None, 0 | 1) => LayoutKind::Random(RandomScatter),
                (None, 2 | 3) => granular(GranuleDensity::Medium),
                (None, _) => granular(GranuleDensity::Small),
            },
        };
        tracing::debug!(?choice, ?density, color_count, layout = kind.name(), "layout selected");
        kind
    }

    /// Returns a slice of all recognized layout names.
    pub fn list_layouts() -> &'static [&'static str] {
        LAYOUT_NAMES
    }
}

impl Layout for LayoutKind {
    fn name(&self) -> &'static str {
        match self {
            LayoutKind::Random(l) => l.name(),
            LayoutKind::Grid(l) => l.name(),
            LayoutKind::Radial(l) => l.name(),
            LayoutKind::Granular(l) => l.name(),
        }
    }

    fn place(&self, swatches: &[Swatch], canvas: &mut Canvas, rng: &mut Xorshift64) {
        match self {
            LayoutKind::Random(l) => l.place(swatches, canvas, rng),
            LayoutKind::Grid(l) => l.place(swatches, canvas, rng),
            LayoutKind::Radial(l) => l.place(swatches, canvas, rng),
            LayoutKind::Granular(l) => l.place(swatches, canvas, rng),
        }
    }

    fn params(&self) -> Value {
        match self {
            LayoutKind::Random(l) => l.params(),
            LayoutKind::Grid(l) => l.params(),
            LayoutKind::Radial(l) => l.params(),
            LayoutKind::Granular(l) => l.params(),
        }
    }
}
