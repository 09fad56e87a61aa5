//! Granule shapes and their rasterization.
//!
//! A granule is a single blob of one color: either a disc whose radius is
//! perturbed per pixel, or a star-shaped polygon with jittered vertices
//! filled by an even-odd ray-casting test. Rasterization only reports which
//! pixels a granule covers; the caller decides which of them to claim.

use std::f64::consts::TAU;

use colorgrid_core::prng::Xorshift64;

/// Smallest granule radius in pixels after jitter.
pub const MIN_GRANULE_SIZE: f64 = 1.5;
/// Largest granule radius in pixels after jitter.
pub const MAX_GRANULE_SIZE: f64 = 24.0;

/// Per-pixel radius distortion of disc granules.
const DISC_DISTORTION: f64 = 0.15;
/// Scales `organic_factor` into the boundary-pixel drop probability.
const BOUNDARY_DROP_SCALE: f64 = 0.2;
/// Maximum angular jitter of a polygon vertex, as a fraction of the even step.
/// Kept below 0.25 so adjacent gaps stay under half a turn and the polygon
/// always contains its center.
const VERTEX_ANGLE_JITTER: f64 = 0.2;

/// Outline of a granule.
#[derive(Debug, Clone, PartialEq)]
pub enum GranuleShape {
    Disc,
    /// Vertices in counter-clockwise angular order, canvas coordinates.
    Polygon(Vec<(f64, f64)>),
}

/// One placed shape: center in canvas coordinates, nominal radius, outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Granule {
    pub cx: f64,
    pub cy: f64,
    pub size: f64,
    pub shape: GranuleShape,
}

impl Granule {
    /// A distorted disc centered on pixel `(x, y)`.
    pub fn disc(x: usize, y: usize, size: f64) -> Self {
        Self {
            cx: x as f64 + 0.5,
            cy: y as f64 + 0.5,
            size,
            shape: GranuleShape::Disc,
        }
    }

    /// An irregular polygon of `max(3, size / 2)` vertices around pixel `(x, y)`.
    ///
    /// Vertex radii vary by `1 ± variation`; vertex angles are jittered in
    /// proportion to `organic_factor`.
    pub fn polygon(
        x: usize,
        y: usize,
        size: f64,
        variation: f64,
        organic_factor: f64,
        rng: &mut Xorshift64,
    ) -> Self {
        let cx = x as f64 + 0.5;
        let cy = y as f64 + 0.5;
        let n = ((size / 2.0) as usize).max(3);
        let step = TAU / n as f64;
        let vertices = (0..n)
            .map(|i| {
                let angle = step * i as f64
                    + rng.next_range(-1.0, 1.0) * VERTEX_ANGLE_JITTER * step * organic_factor;
                let radius = (size * rng.jitter(variation)).max(0.5);
                (cx + radius * angle.cos(), cy + radius * angle.sin())
            })
            .collect();
        Self {
            cx,
            cy,
            size,
            shape: GranuleShape::Polygon(vertices),
        }
    }

    /// Pixels covered by this granule inside a `width` x `height` canvas.
    ///
    /// Disc pixels are kept when their center distance is within the radius
    /// scaled by a fresh distortion factor. Polygon pixels are kept when
    /// their center is inside the outline; pixels on the outline's edge are
    /// dropped with probability `organic_factor * 0.2`.
    pub fn rasterize(
        &self,
        width: usize,
        height: usize,
        organic_factor: f64,
        rng: &mut Xorshift64,
    ) -> Vec<(usize, usize)> {
        match &self.shape {
            GranuleShape::Disc => self.rasterize_disc(width, height, rng),
            GranuleShape::Polygon(vertices) => {
                rasterize_polygon(vertices, width, height, organic_factor, rng)
            }
        }
    }

    fn rasterize_disc(&self, width: usize, height: usize, rng: &mut Xorshift64) -> Vec<(usize, usize)> {
        let reach = self.size * (1.0 + DISC_DISTORTION);
        let (x0, x1) = clip_span(self.cx - reach, self.cx + reach, width);
        let (y0, y1) = clip_span(self.cy - reach, self.cy + reach, height);

        let mut covered = Vec::new();
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - self.cx;
                let dy = y as f64 + 0.5 - self.cy;
                let limit = self.size * rng.jitter(DISC_DISTORTION);
                if dx * dx + dy * dy <= limit * limit {
                    covered.push((x, y));
                }
            }
        }
        covered
    }
}

fn rasterize_polygon(
    vertices: &[(f64, f64)],
    width: usize,
    height: usize,
    organic_factor: f64,
    rng: &mut Xorshift64,
) -> Vec<(usize, usize)> {
    let (min_x, max_x, min_y, max_y) = vertices.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(a, b, c, d), &(x, y)| (a.min(x), b.max(x), c.min(y), d.max(y)),
    );
    let (x0, x1) = clip_span(min_x, max_x, width);
    let (y0, y1) = clip_span(min_y, max_y, height);
    let drop_probability = organic_factor * BOUNDARY_DROP_SCALE;

    let inside = |x: f64, y: f64| point_in_polygon(x + 0.5, y + 0.5, vertices);
    let mut covered = Vec::new();
    for y in y0..y1 {
        for x in x0..x1 {
            let (fx, fy) = (x as f64, y as f64);
            if !inside(fx, fy) {
                continue;
            }
            let on_edge = !inside(fx - 1.0, fy)
                || !inside(fx + 1.0, fy)
                || !inside(fx, fy - 1.0)
                || !inside(fx, fy + 1.0);
            if on_edge && rng.chance(drop_probability) {
                continue;
            }
            covered.push((x, y));
        }
    }
    covered
}

/// Integer pixel span `[lo, hi)` covering `[min, max]`, clipped to `[0, limit)`.
fn clip_span(min: f64, max: f64, limit: usize) -> (usize, usize) {
    let lo = min.floor().max(0.0) as usize;
    let hi = (max.ceil().max(0.0) as usize + 1).min(limit);
    (lo.min(hi), hi)
}

/// Even-odd ray-casting containment test.
///
/// Casts a ray towards +x and counts edge crossings.
pub fn point_in_polygon(px: f64, py: f64, vertices: &[(f64, f64)]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > py) != (yj > py) {
            let x_cross = xi + (py - yi) * (xj - xi) / (yj - yi);
            if px < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
