//! Color and dash-pattern primitives for display styling.

use std::fmt;

/// An 8-bit RGBA color.
///
/// Styling rules compare colors for exact equality when deciding whether a
/// redraw is needed, so colors are stored as integer channels rather than
/// floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from RGBA components.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string (e.g., `"#f00"`, `"#ff0000"` or `"#ff0000ff"`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');

        let parse = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let nibble = |s: &str| parse(s).map(|v| v << 4 | v);
                Some(Self::rgb(
                    nibble(&hex[0..1])?,
                    nibble(&hex[1..2])?,
                    nibble(&hex[2..3])?,
                ))
            }
            6 => Some(Self::rgb(
                parse(&hex[0..2])?,
                parse(&hex[2..4])?,
                parse(&hex[4..6])?,
            )),
            8 => Some(Self::rgba(
                parse(&hex[0..2])?,
                parse(&hex[2..4])?,
                parse(&hex[4..6])?,
                parse(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    /// Whether this color is fully transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    // Common colors (CSS names)
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const LIME: Self = Self::rgb(0, 255, 0);
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    pub const PURPLE: Self = Self::rgb(128, 0, 128);
    pub const TEAL: Self = Self::rgb(0, 128, 128);
    pub const DARK_BLUE: Self = Self::rgb(0, 0, 139);
    pub const MAROON: Self = Self::rgb(128, 0, 0);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// A stroke dash pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashPattern {
    /// A continuous stroke.
    #[default]
    Solid,
    /// Alternating dash and gap lengths, in display units.
    Dashed { dash: u8, gap: u8 },
}

impl DashPattern {
    /// Create a dashed pattern.
    #[inline]
    pub const fn dashed(dash: u8, gap: u8) -> Self {
        Self::Dashed { dash, gap }
    }

    /// Whether the pattern is a continuous stroke.
    #[inline]
    pub const fn is_solid(&self) -> bool {
        matches!(self, Self::Solid)
    }
}

impl fmt::Display for DashPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => write!(f, "none"),
            Self::Dashed { dash, gap } => write!(f, "{dash} {gap}"),
        }
    }
}
