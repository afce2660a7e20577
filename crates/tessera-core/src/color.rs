// RGB colors and the fixed CGA palette.

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// An RGB color with unit-interval channels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Linear blend: `ratio == 1.0` yields `primary`, `ratio == 0.0` yields `secondary`.
    pub fn blend(primary: Color, secondary: Color, ratio: f32) -> Color {
        secondary - (secondary - primary) * ratio
    }

    /// Blend with a byte ratio where 255 means fully `primary`.
    pub fn blend_u8(primary: Color, secondary: Color, ratio: u8) -> Color {
        Self::blend(primary, secondary, ratio as f32 / 255.0)
    }

    /// Even mix of two colors.
    pub fn mix(a: Color, b: Color) -> Color {
        Self::blend(a, b, 0.5)
    }

    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
    pub const BLUE: Self = Self::from_rgb8(0, 0, 255);
    pub const GREEN: Self = Self::from_rgb8(0, 170, 0);
    pub const CYAN: Self = Self::from_rgb8(0, 170, 170);
    pub const RED: Self = Self::from_rgb8(170, 0, 0);
    pub const MAGENTA: Self = Self::from_rgb8(170, 0, 170);
    pub const BROWN: Self = Self::from_rgb8(170, 85, 0);
    pub const LIGHT_GRAY: Self = Self::from_rgb8(170, 170, 170);
    pub const GRAY: Self = Self::from_rgb8(85, 85, 85);
    pub const LIGHT_BLUE: Self = Self::from_rgb8(85, 85, 255);
    pub const LIGHT_GREEN: Self = Self::from_rgb8(85, 255, 85);
    pub const LIGHT_CYAN: Self = Self::from_rgb8(85, 255, 255);
    pub const LIGHT_RED: Self = Self::from_rgb8(255, 85, 85);
    pub const LIGHT_MAGENTA: Self = Self::from_rgb8(255, 85, 255);
    pub const YELLOW: Self = Self::from_rgb8(255, 255, 85);
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);
}

/// The 16-entry CGA palette, indexed by the classic color number.
pub const CGA: [Color; 16] = [
    Color::BLACK,
    Color::BLUE,
    Color::GREEN,
    Color::CYAN,
    Color::RED,
    Color::MAGENTA,
    Color::BROWN,
    Color::LIGHT_GRAY,
    Color::GRAY,
    Color::LIGHT_BLUE,
    Color::LIGHT_GREEN,
    Color::LIGHT_CYAN,
    Color::LIGHT_RED,
    Color::LIGHT_MAGENTA,
    Color::YELLOW,
    Color::WHITE,
];

// ── Arithmetic ──

impl Add for Color {
    type Output = Color;
    fn add(self, rhs: Color) -> Color {
        Color::rgb(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Sub for Color {
    type Output = Color;
    fn sub(self, rhs: Color) -> Color {
        Color::rgb(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl Mul for Color {
    type Output = Color;
    fn mul(self, rhs: Color) -> Color {
        Color::rgb(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Div for Color {
    type Output = Color;
    fn div(self, rhs: Color) -> Color {
        Color::rgb(self.r / rhs.r, self.g / rhs.g, self.b / rhs.b)
    }
}

impl Add<f32> for Color {
    type Output = Color;
    fn add(self, f: f32) -> Color {
        Color::rgb(self.r + f, self.g + f, self.b + f)
    }
}

impl Sub<f32> for Color {
    type Output = Color;
    fn sub(self, f: f32) -> Color {
        Color::rgb(self.r - f, self.g - f, self.b - f)
    }
}

impl Mul<f32> for Color {
    type Output = Color;
    fn mul(self, f: f32) -> Color {
        Color::rgb(self.r * f, self.g * f, self.b * f)
    }
}

impl Div<f32> for Color {
    type Output = Color;
    fn div(self, f: f32) -> Color {
        Color::rgb(self.r / f, self.g / f, self.b / f)
    }
}
