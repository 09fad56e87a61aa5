//! Reproducible description of one colormap synthesis.
//!
//! A [`SynthesisRequest`] captures everything needed to recreate a canvas:
//! requested colors, dimensions, layout choice, granule-size class, PRNG
//! seed, and granular tuning overrides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SynthesisError;
use crate::proportion::ColorSpec;

/// Which layout strategy the caller asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutChoice {
    /// Pick by color count.
    #[default]
    Auto,
    Random,
    Grid,
    Radial,
    Granular,
}

impl LayoutChoice {
    pub const ALL: [LayoutChoice; 5] = [
        LayoutChoice::Auto,
        LayoutChoice::Random,
        LayoutChoice::Grid,
        LayoutChoice::Radial,
        LayoutChoice::Granular,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutChoice::Auto => "auto",
            LayoutChoice::Random => "random",
            LayoutChoice::Grid => "grid",
            LayoutChoice::Radial => "radial",
            LayoutChoice::Granular => "granular",
        }
    }
}

impl fmt::Display for LayoutChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutChoice {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| SynthesisError::UnknownLayout(s.to_string()))
    }
}

/// Granule-size class for the granular layout.
///
/// Smaller classes place more, smaller granules and fill a larger share of
/// each color's ideal area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GranuleDensity {
    Small,
    #[default]
    Medium,
    Large,
}

impl GranuleDensity {
    pub const ALL: [GranuleDensity; 3] = [
        GranuleDensity::Small,
        GranuleDensity::Medium,
        GranuleDensity::Large,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GranuleDensity::Small => "small",
            GranuleDensity::Medium => "medium",
            GranuleDensity::Large => "large",
        }
    }
}

impl fmt::Display for GranuleDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GranuleDensity {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == lowered)
            .ok_or_else(|| SynthesisError::UnknownDensity(s.to_string()))
    }
}

/// Everything needed to synthesize one colormap.
///
/// Two identical requests produce bit-identical canvases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub colors: Vec<ColorSpec>,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub layout: LayoutChoice,
    /// Explicit granule-size class; `None` lets the layout heuristic decide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<GranuleDensity>,
    #[serde(default)]
    pub seed: u64,
    /// Granular tuning overrides (`variation`, `form_complexity`, ...).
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl SynthesisRequest {
    /// Creates an auto-layout request with empty params.
    pub fn new(colors: Vec<ColorSpec>, width: usize, height: usize, seed: u64) -> Self {
        Self {
            colors,
            width,
            height,
            layout: LayoutChoice::Auto,
            density: None,
            seed,
            params: empty_params(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutChoice) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_density(mut self, density: GranuleDensity) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }

    /// Validates that the request has non-zero dimensions and that the
    /// RGBA buffer size does not overflow.
    pub fn validate(&self) -> Result<(), SynthesisError> {
        if self.width == 0 || self.height == 0 {
            return Err(SynthesisError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(SynthesisError::InvalidDimensions)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn red_blue() -> Vec<ColorSpec> {
        vec![ColorSpec::new("red", 70.0), ColorSpec::new("blue", 30.0)]
    }

    #[test]
    fn new_uses_auto_layout_and_empty_params() {
        let r = SynthesisRequest::new(red_blue(), 256, 128, 42);
        assert_eq!(r.layout, LayoutChoice::Auto);
        assert_eq!(r.density, None);
        assert_eq!(r.params, json!({}));
        assert_eq!((r.width, r.height, r.seed), (256, 128, 42));
    }

    #[test]
    fn json_round_trip() {
        let r = SynthesisRequest::new(red_blue(), 512, 512, 7)
            .with_layout(LayoutChoice::Granular)
            .with_density(GranuleDensity::Small)
            .with_params(json!({"variation": 0.25}));
        let json = serde_json::to_string_pretty(&r).unwrap();
        let back: SynthesisRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let r: SynthesisRequest = serde_json::from_value(json!({
            "colors": [{"identifier": "red", "proportion": 1.0}],
            "width": 64,
            "height": 64
        }))
        .unwrap();
        assert_eq!(r.layout, LayoutChoice::Auto);
        assert_eq!(r.density, None);
        assert_eq!(r.seed, 0);
        assert_eq!(r.params, json!({}));
    }

    #[test]
    fn layout_and_density_serialize_snake_case() {
        assert_eq!(serde_json::to_string(&LayoutChoice::Radial).unwrap(), "\"radial\"");
        assert_eq!(serde_json::to_string(&GranuleDensity::Large).unwrap(), "\"large\"");
    }

    #[test]
    fn layout_from_str_is_case_insensitive() {
        assert_eq!("Granular".parse::<LayoutChoice>().unwrap(), LayoutChoice::Granular);
        assert_eq!(" grid ".parse::<LayoutChoice>().unwrap(), LayoutChoice::Grid);
        assert!(matches!(
            "spiral".parse::<LayoutChoice>(),
            Err(SynthesisError::UnknownLayout(_))
        ));
    }

    #[test]
    fn density_from_str() {
        for d in GranuleDensity::ALL {
            assert_eq!(d.as_str().parse::<GranuleDensity>().unwrap(), d);
        }
        assert!(matches!(
            "huge".parse::<GranuleDensity>(),
            Err(SynthesisError::UnknownDensity(_))
        ));
    }

    #[test]
    fn validate_accepts_regular_sizes() {
        assert!(SynthesisRequest::new(red_blue(), 512, 512, 1).validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_and_overflow() {
        assert!(SynthesisRequest::new(red_blue(), 0, 512, 1).validate().is_err());
        assert!(SynthesisRequest::new(red_blue(), 512, 0, 1).validate().is_err());
        assert!(SynthesisRequest::new(red_blue(), usize::MAX, 2, 1).validate().is_err());
    }
}
