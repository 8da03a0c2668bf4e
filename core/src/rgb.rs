use std::fmt;

use serde::Serialize;

/// Largest possible L1 distance between two colors (3 * 255).
pub const MAX_DISTANCE: u16 = 765;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Manhattan distance `|dR| + |dG| + |dB|`, always within `0..=MAX_DISTANCE`.
    pub fn manhattan(self, other: Rgb) -> u16 {
        self.r.abs_diff(other.r) as u16
            + self.g.abs_diff(other.g) as u16
            + self.b.abs_diff(other.b) as u16
    }

    /// `#rrggbb`, lower case.
    pub fn hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
