//! Acceptance checks for a finished canvas.
//!
//! A canvas is rejected when it is degenerate (nothing set, or nothing but
//! fallback gray) or when the colors on it are implausible for the request:
//! too few or too many distinct color clusters, or fewer than half of the
//! requested colors actually present.

use std::collections::HashMap;
use std::fmt;

use colorgrid_core::canvas::Canvas;
use colorgrid_core::color::Rgb;
use colorgrid_core::proportion::Swatch;

/// Per-channel distance within which two colors count as one cluster.
pub const DEFAULT_TOLERANCE: u8 = 10;
/// Smallest accepted ratio of found clusters to requested colors.
pub const DEFAULT_MIN_RATIO: f64 = 0.5;
/// Largest accepted ratio of found clusters to requested colors.
pub const DEFAULT_MAX_RATIO: f64 = 2.0;

/// Why a canvas was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No pixel is set.
    Transparent,
    /// Every set pixel is the fallback gray of unresolved identifiers.
    FallbackOnly,
    /// The number of color clusters is outside the accepted ratio.
    ClusterCount { found: usize, requested: usize },
    /// Fewer than half of the requested colors appear on the canvas.
    MissingColors { matched: usize, requested: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Transparent => write!(f, "canvas has no opaque pixels"),
            Rejection::FallbackOnly => write!(f, "canvas contains only fallback gray"),
            Rejection::ClusterCount { found, requested } => {
                write!(f, "found {found} color clusters for {requested} requested colors")
            }
            Rejection::MissingColors { matched, requested } => {
                write!(f, "only {matched} of {requested} requested colors present")
            }
        }
    }
}

/// Measurements taken while validating a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub opaque: usize,
    pub clusters: usize,
    pub requested: usize,
    pub matched: usize,
    pub rejection: Option<Rejection>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Something that can accept or reject a synthesized canvas.
///
/// The orchestrator validates through this trait so callers can tighten or
/// replace the check.
pub trait CanvasCheck {
    fn check(&self, canvas: &Canvas, swatches: &[Swatch]) -> ValidationReport;
}

/// The standard degenerate-output and plausibility check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasValidator {
    pub tolerance: u8,
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl Default for CanvasValidator {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_ratio: DEFAULT_MIN_RATIO,
            max_ratio: DEFAULT_MAX_RATIO,
        }
    }
}

impl CanvasValidator {
    /// Returns `true` if the canvas is acceptable for `swatches`.
    pub fn validate(&self, canvas: &Canvas, swatches: &[Swatch]) -> bool {
        self.report(canvas, swatches).passed()
    }

    /// Validates and returns the full set of measurements.
    pub fn report(&self, canvas: &Canvas, swatches: &[Swatch]) -> ValidationReport {
        let mut exact: HashMap<Rgb, usize> = HashMap::new();
        for c in canvas.opaque_colors() {
            *exact.entry(c).or_default() += 1;
        }
        let opaque: usize = exact.values().sum();

        let requested_colors = requested_colors(swatches);
        let requested = requested_colors.len();
        let clusters = self.cluster(&exact);
        let matched = requested_colors
            .iter()
            .filter(|&&want| clusters.iter().any(|&c| c.within(want, self.tolerance)))
            .count();

        let mut report = ValidationReport {
            opaque,
            clusters: clusters.len(),
            requested,
            matched,
            rejection: None,
        };

        report.rejection = if opaque == 0 {
            Some(Rejection::Transparent)
        } else if exact.keys().all(|&c| c == Rgb::FALLBACK_GRAY) {
            Some(Rejection::FallbackOnly)
        } else if requested > 0 && !self.cluster_ratio_ok(clusters.len(), requested) {
            Some(Rejection::ClusterCount {
                found: clusters.len(),
                requested,
            })
        } else if matched * 2 < requested {
            Some(Rejection::MissingColors { matched, requested })
        } else {
            None
        };
        report
    }

    fn cluster_ratio_ok(&self, found: usize, requested: usize) -> bool {
        let ratio = found as f64 / requested as f64;
        ratio >= self.min_ratio && ratio <= self.max_ratio
    }

    /// Greedy clustering: colors visited most-frequent first; each joins the
    /// first representative within tolerance or becomes a new one.
    fn cluster(&self, exact: &HashMap<Rgb, usize>) -> Vec<Rgb> {
        let mut by_count: Vec<(Rgb, usize)> = exact.iter().map(|(&c, &n)| (c, n)).collect();
        by_count.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.to_hex().cmp(&b.0.to_hex())));

        let mut representatives: Vec<Rgb> = Vec::new();
        for (color, _) in by_count {
            if !representatives.iter().any(|r| r.within(color, self.tolerance)) {
                representatives.push(color);
            }
        }
        representatives
    }
}

impl CanvasCheck for CanvasValidator {
    fn check(&self, canvas: &Canvas, swatches: &[Swatch]) -> ValidationReport {
        self.report(canvas, swatches)
    }
}

/// Distinct colors among swatches with a positive share, in request order.
fn requested_colors(swatches: &[Swatch]) -> Vec<Rgb> {
    let mut colors: Vec<Rgb> = Vec::new();
    for s in swatches.iter().filter(|s| s.proportion > 0.0) {
        if !colors.contains(&s.rgb) {
            colors.push(s.rgb);
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorgrid_core::proportion::{resolve_swatches, ColorSpec};

    fn swatches(pairs: &[(&str, f64)]) -> Vec<Swatch> {
        let specs: Vec<ColorSpec> = pairs.iter().map(|&(n, p)| ColorSpec::new(n, p)).collect();
        resolve_swatches(&specs)
    }

    fn filled(w: usize, h: usize, colors: &[Rgb]) -> Canvas {
        let mut canvas = Canvas::new(w, h).unwrap();
        let region = canvas.usable();
        for (i, (x, y)) in region.coords().enumerate() {
            canvas.place(x, y, colors[i % colors.len()]);
        }
        canvas
    }

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);
    const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[test]
    fn transparent_canvas_fails() {
        let canvas = Canvas::new(50, 50).unwrap();
        let report = CanvasValidator::default().report(&canvas, &swatches(&[("red", 1.0)]));
        assert_eq!(report.rejection, Some(Rejection::Transparent));
    }

    #[test]
    fn fallback_gray_only_fails_for_any_request() {
        let canvas = filled(50, 50, &[Rgb::FALLBACK_GRAY]);
        let v = CanvasValidator::default();
        for pairs in [
            vec![("red", 1.0)],
            vec![("mauve", 1.0)],
            vec![("red", 0.5), ("blue", 0.5)],
        ] {
            let report = v.report(&canvas, &swatches(&pairs));
            assert_eq!(report.rejection, Some(Rejection::FallbackOnly), "{pairs:?}");
        }
    }

    #[test]
    fn all_white_canvas_fails_for_red_and_blue() {
        let canvas = filled(50, 50, &[WHITE]);
        let sw = swatches(&[("red", 0.5), ("blue", 0.5)]);
        let report = CanvasValidator::default().report(&canvas, &sw);
        assert!(!report.passed());
        assert_eq!(
            report.rejection,
            Some(Rejection::MissingColors {
                matched: 0,
                requested: 2
            })
        );
    }

    #[test]
    fn matching_two_color_canvas_passes() {
        let canvas = filled(50, 50, &[RED, BLUE]);
        assert!(CanvasValidator::default().validate(&canvas, &swatches(&[("red", 0.5), ("blue", 0.5)])));
    }

    #[test]
    fn one_of_two_colors_is_still_plausible() {
        let canvas = filled(50, 50, &[RED]);
        assert!(CanvasValidator::default().validate(&canvas, &swatches(&[("red", 0.5), ("blue", 0.5)])));
    }

    #[test]
    fn near_colors_cluster_together() {
        let canvas = filled(50, 50, &[RED, Rgb::new(250, 5, 3), BLUE]);
        let report = CanvasValidator::default().report(&canvas, &swatches(&[("red", 0.5), ("blue", 0.5)]));
        assert_eq!(report.clusters, 2);
        assert!(report.passed());
    }

    #[test]
    fn too_many_clusters_fails() {
        let noise: Vec<Rgb> = (0..5).map(|i| Rgb::new(i * 50, 255 - i * 50, 40)).collect();
        let mut colors = vec![RED];
        colors.extend(noise);
        let canvas = filled(50, 50, &colors);
        let report = CanvasValidator::default().report(&canvas, &swatches(&[("red", 1.0)]));
        assert!(matches!(report.rejection, Some(Rejection::ClusterCount { found: 6, requested: 1 })));
    }

    #[test]
    fn duplicate_and_zero_share_entries_do_not_inflate_request() {
        let canvas = filled(50, 50, &[RED]);
        let sw = swatches(&[("red", 0.5), ("RED", 0.5), ("blue", 0.0), ("white", 0.0)]);
        let report = CanvasValidator::default().report(&canvas, &sw);
        assert_eq!(report.requested, 1);
        assert!(report.passed());
    }

    #[test]
    fn validation_does_not_mutate() {
        let canvas = filled(40, 40, &[RED, BLUE]);
        let before = canvas.clone();
        CanvasValidator::default().validate(&canvas, &swatches(&[("red", 1.0)]));
        assert_eq!(canvas, before);
    }

    #[test]
    fn rejection_messages_are_readable() {
        let msg = Rejection::ClusterCount { found: 7, requested: 2 }.to_string();
        assert!(msg.contains('7') && msg.contains('2'), "{msg}");
        assert!(Rejection::FallbackOnly.to_string().contains("gray"));
    }
}
