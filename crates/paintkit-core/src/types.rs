//! Geometry and style primitives shared by the rasterizer and the scene.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Rounds half-way values up, the way a browser's `Math.round` does.
///
/// `f64::round` rounds half away from zero, which differs for negative
/// halves (`-0.5` becomes `-1` instead of `0`).
#[inline]
pub fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// A point in surface space. Coordinates are not necessarily integral.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Nearest pixel, rounding halves up.
    pub fn rounded(&self) -> PixelPoint {
        PixelPoint::new(round_half_up(self.x), round_half_up(self.y))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An integral pixel address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for PixelPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// An RGBA color. Serialized as a `#rrggbb` (or `#rrggbbaa`) hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    channels[i] = v * 17;
                }
                Some(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Lowercase hex. The alpha pair is only written when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s).ok_or_else(|| format!("invalid color '{}'", s))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Rendering algorithm for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    /// Continuous native path stroking.
    Primitive,
    /// Explicit pixel-walk scan conversion.
    #[default]
    #[serde(alias = "BASIC")]
    Raster,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive => write!(f, "PRIMITIVE"),
            Self::Raster => write!(f, "RASTER"),
        }
    }
}

/// Pixel-walk used for straight segments in raster mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAlgorithm {
    Dda,
    #[default]
    Bresenham,
}

/// Pixel-walk used for circles in raster mode.
///
/// The two produce different pixel sets for the same radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircleAlgorithm {
    /// `d = 3 - 2r`, discs stamped at each of the 8 symmetric points.
    #[default]
    Bresenham,
    /// `d = 1 - r`, single pixels at each of the 8 symmetric points.
    Midpoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_matches_browser_rounding() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.4999), 2);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
        assert_eq!(round_half_up(-1.6), -2);
    }

    #[test]
    fn test_color_hex_parsing() {
        assert_eq!(Color::from_hex("#FFBF00"), Some(Color::rgb(255, 191, 0)));
        assert_eq!(Color::from_hex("1a1a24"), Some(Color::rgb(26, 26, 36)));
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert_eq!(
            Color::from_hex("#00000080"),
            Some(Color::rgba(0, 0, 0, 128))
        );
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
    }

    #[test]
    fn test_color_serde_as_hex() {
        let json = serde_json::to_string(&Color::rgb(255, 191, 0)).unwrap();
        assert_eq!(json, "\"#ffbf00\"");
        let back: Color = serde_json::from_str("\"#FFBF00\"").unwrap();
        assert_eq!(back, Color::rgb(255, 191, 0));
    }

    #[test]
    fn test_point_serializes_as_pair() {
        let json = serde_json::to_string(&Point::new(5.0, 7.5)).unwrap();
        assert_eq!(json, "[5.0,7.5]");
        let p: Point = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(p, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_algorithm_accepts_basic_alias() {
        let a: Algorithm = serde_json::from_str("\"BASIC\"").unwrap();
        assert_eq!(a, Algorithm::Raster);
        let a: Algorithm = serde_json::from_str("\"PRIMITIVE\"").unwrap();
        assert_eq!(a, Algorithm::Primitive);
    }
}
