use crate::core::constants::{GRID_SPACING_PX, LABEL_PLATE_SIZE, MARKER_RADIUS_PX};
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color, written as `#rrggbb` or `#rrggbbaa` in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with an opacity in `0.0..=1.0`
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
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

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color `{value}`"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Style configuration for the whole map surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    /// Flat fill behind everything
    pub background_color: Color,
    pub grid_color: Color,
    /// Grid spacing in pixels; does not scale with zoom
    pub grid_spacing: u32,
    pub markers: MarkerStyle,
    pub labels: LabelStyle,
}

/// Style for map markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub radius: f64,
    pub facility_color: Color,
    pub user_color: Color,
    pub outline_color: Color,
    pub outline_width: f64,
    pub shadow_color: Color,
    /// Shadow offset (dx, dy) in pixels
    pub shadow_offset: (f64, f64),
    pub icon_color: Color,
}

/// Style for the plate and text drawn under a labelled marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub plate_color: Color,
    pub text_color: Color,
    pub plate_width: u32,
    pub plate_height: u32,
    /// Distance from the marker center to the top of the plate
    pub offset_y: f64,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(0xe8, 0xf4, 0xf8),
            grid_color: Color::rgb(0xd0, 0xe8, 0xf0),
            grid_spacing: GRID_SPACING_PX,
            markers: MarkerStyle::default(),
            labels: LabelStyle::default(),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: MARKER_RADIUS_PX,
            facility_color: Color::rgb(0x66, 0x7e, 0xea),
            user_color: Color::rgb(0xdc, 0x35, 0x45),
            outline_color: Color::WHITE,
            outline_width: 3.0,
            shadow_color: Color::BLACK.with_opacity(0.2),
            shadow_offset: (2.0, 2.0),
            icon_color: Color::WHITE,
        }
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        let (plate_width, plate_height) = LABEL_PLATE_SIZE;
        Self {
            plate_color: Color::WHITE.with_opacity(0.95),
            text_color: Color::rgb(0x33, 0x33, 0x33),
            plate_width,
            plate_height,
            offset_y: 20.0,
        }
    }
}
