#![deny(unsafe_code)]
//! Core types for the colorgrid proportional color-map synthesizer.
//!
//! Provides the static `ColorTable`, `ColorSpec` normalization, the
//! write-once RGBA `Canvas` with its margin, the `Layout` trait, the
//! `Xorshift64` PRNG, `SynthesisRequest`, prompt parsing, and errors.

pub mod canvas;
pub mod color;
pub mod error;
pub mod layout;
pub mod params;
pub mod prng;
pub mod prompt;
pub mod proportion;
pub mod request;

pub use canvas::{Canvas, Region};
pub use color::{ColorTable, Rgb};
pub use error::{ColormapGenerationError, SynthesisError};
pub use layout::Layout;
pub use prng::Xorshift64;
pub use prompt::parse_color_prompt;
pub use proportion::{normalize, resolve_swatches, ColorSpec, Swatch};
pub use request::{GranuleDensity, LayoutChoice, SynthesisRequest};
