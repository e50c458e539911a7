//! Colour type.

use std::fmt;

use serde::Serialize;

/// An RGBA colour value.
///
/// Face colours are always opaque; alpha is only used by overlays such as
/// the gloss highlight and by the transparent canvas background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black, used for eyes and mouths.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Face colour for prompts mentioning "pink".
    pub const PINK: Self = Self::rgb(255, 182, 193);

    /// Face colour for prompts mentioning "green".
    pub const LIGHT_GREEN: Self = Self::rgb(144, 238, 144);

    /// Face colour for prompts mentioning "blue".
    pub const SKY_BLUE: Self = Self::rgb(135, 206, 235);

    /// Face colour for prompts mentioning "brown".
    pub const TAN: Self = Self::rgb(210, 180, 140);

    /// Classic emoji yellow, used when no colour keyword matches.
    pub const DEFAULT_YELLOW: Self = Self::rgb(255, 205, 0);

    /// Tongue fill.
    pub const HOT_PINK: Self = Self::rgb(255, 105, 180);

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS/SVG functional notation, ignoring alpha: `rgb(255,205,0)`.
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl From<[u8; 3]> for Colour {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Colour> for String {
    fn from(c: Colour) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}
