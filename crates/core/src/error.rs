//! Error types for colorgrid synthesis.

use thiserror::Error;

use crate::proportion::ColorSpec;

/// Raised when neither the selected layout nor the grid-band rebuild
/// produced a canvas that passes validation.
///
/// Carries the caller's original, un-normalized color list so the failure
/// can be reported against what was actually requested.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("colormap generation failed for colors [{}]", describe(.colors))]
pub struct ColormapGenerationError {
    pub colors: Vec<ColorSpec>,
}

fn describe(colors: &[ColorSpec]) -> String {
    colors
        .iter()
        .map(|c| format!("{} {}", c.identifier, c.proportion))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors produced by colormap synthesis.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Width or height was zero, or `width * height` overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A layout name did not match any known strategy.
    #[error("unknown layout: {0}")]
    UnknownLayout(String),

    /// A granule-size class name did not match small, medium or large.
    #[error("unknown granule density: {0}")]
    UnknownDensity(String),

    /// A color prompt contained no `<percent>% <color>` pairs.
    #[error("invalid color prompt: {0}")]
    InvalidPrompt(String),

    /// Writing or encoding an image failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Synthesis and its rebuild both failed validation.
    #[error(transparent)]
    Generation(#[from] ColormapGenerationError),
}
