//! Synthesis entry point: normalize, place, validate, rebuild once.

use colorgrid_core::canvas::Canvas;
use colorgrid_core::error::{ColormapGenerationError, SynthesisError};
use colorgrid_core::prng::Xorshift64;
use colorgrid_core::proportion::{normalize, resolve_swatches, Swatch};
use colorgrid_core::request::SynthesisRequest;
use colorgrid_core::Layout;
use serde_json::Value;

use crate::bands::GridBands;
use crate::validate::{CanvasCheck, CanvasValidator, ValidationReport};
use crate::LayoutKind;

/// A validated canvas and how it was produced.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub canvas: Canvas,
    /// Name of the layout that produced `canvas`.
    pub layout: &'static str,
    /// Whether the first attempt was rejected and grid bands were used.
    pub rebuilt: bool,
    /// Effective tuning values of that layout, as reported by `Layout::params`.
    pub params: Value,
    /// Validation measurements of the returned canvas.
    pub report: ValidationReport,
}

impl Synthesis {
    /// Consumes the result and returns the row-major RGBA buffer.
    pub fn into_rgba(self) -> Vec<u8> {
        self.canvas.into_rgba()
    }
}

/// Synthesizes a canvas for `request` using the standard validator.
pub fn synthesize(request: &SynthesisRequest) -> Result<Synthesis, SynthesisError> {
    synthesize_with(&CanvasValidator::default(), request)
}

/// Synthesizes a canvas for `request`, accepting it through `check`.
///
/// If the selected layout's canvas is rejected, a fresh canvas is filled
/// with [`GridBands`] and checked again. A second rejection returns
/// [`ColormapGenerationError`] carrying `request.colors` as given.
pub fn synthesize_with<C: CanvasCheck + ?Sized>(
    check: &C,
    request: &SynthesisRequest,
) -> Result<Synthesis, SynthesisError> {
    request.validate()?;
    let specs = normalize(&request.colors);
    let swatches = resolve_swatches(&specs);
    let layout = LayoutKind::select(request.layout, request.density, swatches.len(), &request.params);

    let mut rng = Xorshift64::new(request.seed);
    let (canvas, report) = attempt(&layout, &swatches, request, check, &mut rng)?;
    if report.passed() {
        return Ok(Synthesis {
            canvas,
            layout: layout.name(),
            rebuilt: false,
            params: layout.params(),
            report,
        });
    }

    tracing::warn!(
        layout = layout.name(),
        rejection = ?report.rejection,
        seed = request.seed,
        "canvas rejected, rebuilding with grid bands"
    );
    let (canvas, report) = attempt(&GridBands, &swatches, request, check, &mut rng)?;
    if report.passed() {
        return Ok(Synthesis {
            canvas,
            layout: GridBands.name(),
            rebuilt: true,
            params: GridBands.params(),
            report,
        });
    }

    tracing::error!(rejection = ?report.rejection, "grid band rebuild rejected");
    Err(ColormapGenerationError {
        colors: request.colors.clone(),
    }
    .into())
}

fn attempt<L: Layout + ?Sized, C: CanvasCheck + ?Sized>(
    layout: &L,
    swatches: &[Swatch],
    request: &SynthesisRequest,
    check: &C,
    rng: &mut Xorshift64,
) -> Result<(Canvas, ValidationReport), SynthesisError> {
    let mut canvas = Canvas::new(request.width, request.height)?;
    layout.place(swatches, &mut canvas, rng);
    let report = check.check(&canvas, swatches);
    tracing::debug!(
        layout = layout.name(),
        opaque = report.opaque,
        clusters = report.clusters,
        requested = report.requested,
        passed = report.passed(),
        "canvas checked"
    );
    Ok((canvas, report))
}
