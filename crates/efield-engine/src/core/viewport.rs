use glam::Vec2;

use crate::error::{EfieldError, Result};

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Zero-sized viewport. Contains only the origin and has no pixels.
    pub const EMPTY: Self = Self { width: 0, height: 0 };

    /// Largest accepted width or height, in pixels.
    pub const MAX_DIMENSION: u32 = 4096;

    /// Create a viewport. Both dimensions must be in `1..=MAX_DIMENSION`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let in_range = |d: u32| (1..=Self::MAX_DIMENSION).contains(&d);
        if !in_range(width) || !in_range(height) {
            return Err(EfieldError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `p` lies inside `[0, width] × [0, height]`, edges included.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width as f32 && p.y >= 0.0 && p.y <= self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(Viewport::new(0, 10).is_err());
        assert!(Viewport::new(10, 0).is_err());
        assert!(Viewport::new(1, 1).is_ok());
    }

    #[test]
    fn rejects_oversized_dimensions() {
        let max = Viewport::MAX_DIMENSION;
        assert!(Viewport::new(max, max).is_ok());
        assert!(matches!(
            Viewport::new(max + 1, 10),
            Err(EfieldError::InvalidViewport { .. })
        ));
        assert!(Viewport::new(10, u32::MAX).is_err());
    }

    #[test]
    fn contains_includes_edges() {
        let vp = Viewport::new(600, 400).unwrap();
        assert!(vp.contains(Vec2::ZERO));
        assert!(vp.contains(Vec2::new(600.0, 400.0)));
        assert!(!vp.contains(Vec2::new(-0.1, 10.0)));
        assert!(!vp.contains(Vec2::new(10.0, 400.5)));
        assert!(!vp.contains(Vec2::new(f32::NAN, 10.0)));
    }

    #[test]
    fn pixel_count() {
        let vp = Viewport::new(600, 400).unwrap();
        assert_eq!(vp.pixel_count(), 240_000);
        assert_eq!(Viewport::EMPTY.pixel_count(), 0);
    }
}
