//! Requested colors, proportion normalization, and resolved swatches.

use serde::{Deserialize, Serialize};

use crate::color::{ColorTable, Rgb};

/// Identifier used when the caller requests no colors at all.
pub const DEFAULT_IDENTIFIER: &str = "gray";

/// A requested color and its raw or normalized share of the canvas.
///
/// Identifiers are case-insensitive. Duplicate identifiers are kept as
/// separate entries with independent proportions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub identifier: String,
    pub proportion: f64,
}

impl ColorSpec {
    pub fn new(identifier: impl Into<String>, proportion: f64) -> Self {
        Self {
            identifier: identifier.into(),
            proportion,
        }
    }
}

/// A normalized color paired with its resolved RGB value.
///
/// This is what layout strategies consume: the proportion is already a
/// fraction of the usable canvas and the color is copied by value.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    pub identifier: String,
    pub proportion: f64,
    pub rgb: Rgb,
}

/// Normalizes raw weights so they sum to 1.0.
///
/// Negative and NaN weights are treated as zero. If no weight is positive,
/// every entry gets `1/n`. An empty list becomes a single full-canvas
/// [`DEFAULT_IDENTIFIER`] entry. Order and duplicates are preserved.
pub fn normalize(colors: &[ColorSpec]) -> Vec<ColorSpec> {
    if colors.is_empty() {
        return vec![ColorSpec::new(DEFAULT_IDENTIFIER, 1.0)];
    }

    let weights: Vec<f64> = colors
        .iter()
        .map(|c| {
            if c.proportion.is_finite() {
                c.proportion.max(0.0)
            } else {
                0.0
            }
        })
        .collect();
    let total: f64 = weights.iter().sum();

    if total <= 0.0 || !total.is_finite() {
        let equal = 1.0 / colors.len() as f64;
        return colors
            .iter()
            .map(|c| ColorSpec::new(c.identifier.clone(), equal))
            .collect();
    }

    colors
        .iter()
        .zip(weights)
        .map(|(c, w)| ColorSpec::new(c.identifier.clone(), w / total))
        .collect()
}

/// Normalizes `colors` and resolves each identifier through the [`ColorTable`].
pub fn resolve_swatches(colors: &[ColorSpec]) -> Vec<Swatch> {
    normalize(colors)
        .into_iter()
        .map(|c| Swatch {
            rgb: ColorTable::resolve(&c.identifier),
            identifier: c.identifier,
            proportion: c.proportion,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(colors: &[ColorSpec]) -> f64 {
        colors.iter().map(|c| c.proportion).sum()
    }

    #[test]
    fn percentages_become_fractions() {
        let n = normalize(&[ColorSpec::new("red", 70.0), ColorSpec::new("blue", 30.0)]);
        assert!((n[0].proportion - 0.7).abs() < 1e-12);
        assert!((n[1].proportion - 0.3).abs() < 1e-12);
    }

    #[test]
    fn negative_weights_clamp_to_zero() {
        let n = normalize(&[ColorSpec::new("red", -5.0), ColorSpec::new("blue", 2.0)]);
        assert_eq!(n[0].proportion, 0.0);
        assert!((n[1].proportion - 1.0).abs() < 1e-12);
    }

    #[test]
    fn all_zero_weights_get_equal_shares() {
        let n = normalize(&[
            ColorSpec::new("red", 0.0),
            ColorSpec::new("blue", 0.0),
            ColorSpec::new("white", -1.0),
            ColorSpec::new("black", 0.0),
        ]);
        for c in &n {
            assert!((c.proportion - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn nan_weight_is_ignored() {
        let n = normalize(&[ColorSpec::new("red", f64::NAN), ColorSpec::new("blue", 1.0)]);
        assert_eq!(n[0].proportion, 0.0);
        assert!((sum(&n) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_becomes_default_color() {
        let n = normalize(&[]);
        assert_eq!(n, vec![ColorSpec::new(DEFAULT_IDENTIFIER, 1.0)]);
    }

    #[test]
    fn duplicates_are_not_merged() {
        let n = normalize(&[
            ColorSpec::new("red", 1.0),
            ColorSpec::new("RED", 3.0),
        ]);
        assert_eq!(n.len(), 2);
        assert!((n[0].proportion - 0.25).abs() < 1e-12);
        assert!((n[1].proportion - 0.75).abs() < 1e-12);
        assert_eq!(n[1].identifier, "RED");
    }

    #[test]
    fn resolve_swatches_attaches_colors() {
        let s = resolve_swatches(&[ColorSpec::new("Red", 1.0), ColorSpec::new("nope", 1.0)]);
        assert_eq!(s[0].rgb, Rgb::new(255, 0, 0));
        assert_eq!(s[1].rgb, Rgb::FALLBACK_GRAY);
        assert!((s[0].proportion - 0.5).abs() < 1e-12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalized_proportions_sum_to_one(
                weights in proptest::collection::vec(-10.0_f64..1e6, 1..12),
            ) {
                let colors: Vec<ColorSpec> = weights
                    .iter()
                    .enumerate()
                    .map(|(i, &w)| ColorSpec::new(format!("c{i}"), w))
                    .collect();
                let n = normalize(&colors);
                prop_assert_eq!(n.len(), colors.len());
                prop_assert!((sum(&n) - 1.0).abs() < 1e-6, "sum = {}", sum(&n));
                for c in &n {
                    prop_assert!((0.0..=1.0).contains(&c.proportion));
                }
            }

            #[test]
            fn scaling_weights_does_not_change_result(
                weights in proptest::collection::vec(0.1_f64..100.0, 1..8),
                scale in 0.01_f64..1000.0,
            ) {
                let base: Vec<ColorSpec> = weights.iter().map(|&w| ColorSpec::new("x", w)).collect();
                let scaled: Vec<ColorSpec> = weights.iter().map(|&w| ColorSpec::new("x", w * scale)).collect();
                for (a, b) in normalize(&base).iter().zip(normalize(&scaled).iter()) {
                    prop_assert!((a.proportion - b.proportion).abs() < 1e-9);
                }
            }
        }
    }
}
