//! RGBA pixel canvas with a protected margin and write-once pixels.
//!
//! A [`Canvas`] starts fully unset (transparent white). Pixels are written
//! through [`Canvas::place`], which refuses writes inside the margin band
//! and writes to pixels that are already set. Every layout strategy goes
//! through this single entry point, so the no-overwrite and margin
//! invariants hold for all of them.

use crate::color::Rgb;
use crate::error::SynthesisError;

/// RGBA value of a pixel no strategy has claimed.
pub const UNSET: [u8; 4] = [255, 255, 255, 0];

/// Fraction of each dimension reserved as margin on both sides.
pub const MARGIN_FRACTION: f64 = 0.025;

/// The half-open rectangle `[x0, x1) x [y0, y1)` where pixels may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Region {
    /// The usable region of a `width` x `height` canvas.
    pub fn usable(width: usize, height: usize) -> Self {
        let mx = (width as f64 * MARGIN_FRACTION).floor() as usize;
        let my = (height as f64 * MARGIN_FRACTION).floor() as usize;
        Self {
            x0: mx,
            y0: my,
            x1: width - mx,
            y1: height - my,
        }
    }

    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x0..self.x1).contains(&x) && (self.y0..self.y1).contains(&y)
    }

    /// All coordinates in the region, row-major.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y0..self.y1).flat_map(move |y| (self.x0..self.x1).map(move |x| (x, y)))
    }
}

/// A width x height RGBA8 buffer, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    usable: Region,
    data: Vec<u8>,
}

impl Canvas {
    /// Creates a fully unset canvas.
    ///
    /// Returns `SynthesisError::InvalidDimensions` if width or height is zero,
    /// or if the RGBA buffer length would overflow `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, SynthesisError> {
        if width == 0 || height == 0 {
            return Err(SynthesisError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(SynthesisError::InvalidDimensions)?;
        let data = UNSET.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            usable: Region::usable(width, height),
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The region outside the margin band.
    pub fn usable(&self) -> Region {
        self.usable
    }

    /// Number of pixels in the usable region.
    pub fn usable_pixel_count(&self) -> usize {
        self.usable.area()
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 4
    }

    /// RGBA bytes at `(x, y)`. Panics if out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// The color at `(x, y)` if the pixel is set.
    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgb> {
        let [r, g, b, a] = self.pixel(x, y);
        (a != 0).then_some(Rgb::new(r, g, b))
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.data[self.offset(x, y) + 3] != 0
    }

    /// Sets `(x, y)` to `color` at full opacity.
    ///
    /// Returns `true` only if the pixel was newly set. Pixels outside the
    /// usable region or already set are left untouched.
    pub fn place(&mut self, x: usize, y: usize, color: Rgb) -> bool {
        if !self.usable.contains(x, y) || self.is_set(x, y) {
            return false;
        }
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&color.to_rgba());
        true
    }

    /// Number of set pixels.
    pub fn opaque_count(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Number of set pixels exactly equal to `color`.
    pub fn count_color(&self, color: Rgb) -> usize {
        self.opaque_colors().filter(|&c| c == color).count()
    }

    /// Colors of all set pixels, row-major.
    pub fn opaque_colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(4)
            .filter(|px| px[3] != 0)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
    }

    /// Read-only access to the RGBA bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the canvas and returns the RGBA bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn new_canvas_is_fully_unset() {
        let c = Canvas::new(8, 4).unwrap();
        assert_eq!(c.as_rgba().len(), 8 * 4 * 4);
        assert!(c.as_rgba().chunks_exact(4).all(|px| px == UNSET));
        assert_eq!(c.opaque_count(), 0);
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(Canvas::new(0, 10), Err(SynthesisError::InvalidDimensions)));
        assert!(matches!(Canvas::new(10, 0), Err(SynthesisError::InvalidDimensions)));
    }

    #[test]
    fn new_rejects_overflow_dimensions() {
        assert!(matches!(
            Canvas::new(usize::MAX, 2),
            Err(SynthesisError::InvalidDimensions)
        ));
    }

    #[test]
    fn margin_is_two_and_a_half_percent() {
        let r = Region::usable(200, 80);
        assert_eq!((r.x0, r.x1), (5, 195));
        assert_eq!((r.y0, r.y1), (2, 78));
        assert_eq!(r.area(), 190 * 76);
    }

    #[test]
    fn small_canvas_has_no_margin() {
        let r = Region::usable(30, 10);
        assert_eq!(r, Region { x0: 0, y0: 0, x1: 30, y1: 10 });
    }

    #[test]
    fn place_sets_opaque_pixel() {
        let mut c = Canvas::new(100, 100).unwrap();
        assert!(c.place(50, 50, RED));
        assert_eq!(c.pixel(50, 50), [255, 0, 0, 255]);
        assert_eq!(c.color_at(50, 50), Some(RED));
        assert_eq!(c.color_at(51, 50), None);
    }

    #[test]
    fn place_never_overwrites() {
        let mut c = Canvas::new(100, 100).unwrap();
        assert!(c.place(10, 10, RED));
        assert!(!c.place(10, 10, BLUE));
        assert_eq!(c.color_at(10, 10), Some(RED));
    }

    #[test]
    fn place_refuses_margin() {
        let mut c = Canvas::new(100, 100).unwrap();
        assert!(!c.place(0, 50, RED));
        assert!(!c.place(1, 50, RED));
        assert!(!c.place(98, 50, RED));
        assert!(!c.place(50, 98, RED));
        assert!(c.place(2, 2, RED));
        assert!(c.place(97, 97, RED));
        assert_eq!(c.opaque_count(), 2);
    }

    #[test]
    fn counts_by_color() {
        let mut c = Canvas::new(10, 10).unwrap();
        c.place(1, 1, RED);
        c.place(2, 1, RED);
        c.place(3, 1, BLUE);
        assert_eq!(c.count_color(RED), 2);
        assert_eq!(c.count_color(BLUE), 1);
        assert_eq!(c.opaque_count(), 3);
    }

    #[test]
    fn region_coords_cover_area_once() {
        let r = Region::usable(40, 40);
        let coords: Vec<_> = r.coords().collect();
        assert_eq!(coords.len(), r.area());
        assert!(coords.iter().all(|&(x, y)| r.contains(x, y)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn usable_region_is_never_empty(w in 1_usize..2000, h in 1_usize..2000) {
                let r = Region::usable(w, h);
                prop_assert!(r.x0 < r.x1);
                prop_assert!(r.y0 < r.y1);
                prop_assert_eq!(r.x0, w - r.x1);
                prop_assert_eq!(r.y0, h - r.y1);
            }

            #[test]
            fn place_outside_usable_is_rejected(w in 40_usize..200, h in 40_usize..200, x in 0_usize..200, y in 0_usize..200) {
                prop_assume!(x < w && y < h);
                let mut c = Canvas::new(w, h).unwrap();
                let placed = c.place(x, y, RED);
                prop_assert_eq!(placed, c.usable().contains(x, y));
            }
        }
    }
}
