/// RGBA color with components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Marker fill for positive charges.
    pub const POSITIVE: Self = Self::RED;
    /// Marker fill for negative charges.
    pub const NEGATIVE: Self = Self::BLUE;
    /// Translucent black used for field lines and arrowheads.
    pub const FIELD_LINE: Self = Self::BLACK.with_alpha(0.3);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
