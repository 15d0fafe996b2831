use palette::{named, rgb::Srgb, WithAlpha};

pub type Color = palette::Srgba<u8>;

pub fn opaque(color: Srgb<u8>) -> Color {
    color.with_alpha(u8::MAX)
}

/// Parses `#rrggbb` or `#rgb` into an opaque color
pub fn color_from_hex(hex: &str) -> Option<Color> {
    hex.parse::<Srgb<u8>>().ok().map(opaque)
}

/// Pen used for polylines
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// Alternating dash/gap lengths in pixels; `None` draws a solid line
    pub dash: Option<Vec<f32>>,
}

impl Stroke {
    pub fn solid(width: f32, color: Color) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(mut self, pattern: &[f32]) -> Self {
        self.dash = Some(pattern.to_vec());
        self
    }

    pub fn is_dashed(&self) -> bool {
        self.dash.as_ref().is_some_and(|d| !d.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    pub fn bold(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }
}

pub mod colors {
    use super::*;

    pub fn plain() -> Color {
        opaque(named::LIGHTGREEN)
    }

    pub fn hills() -> Color {
        opaque(named::DARKGREEN)
    }

    pub fn mountains() -> Color {
        opaque(named::LIGHTGRAY)
    }

    pub fn forest() -> Color {
        opaque(named::GREEN)
    }

    pub fn desert() -> Color {
        opaque(named::SANDYBROWN)
    }

    pub fn unknown() -> Color {
        opaque(named::MAGENTA)
    }

    pub fn water() -> Color {
        opaque(named::LIGHTBLUE)
    }

    pub fn residential() -> Color {
        opaque(named::LIGHTCORAL)
    }

    pub fn rail_bed() -> Color {
        opaque(named::DARKGRAY)
    }

    pub fn rail_ties() -> Color {
        opaque(named::LIGHTGRAY)
    }

    pub fn border() -> Color {
        opaque(named::GRAY)
    }

    pub fn road_casing() -> Color {
        opaque(named::YELLOW)
    }

    pub fn road() -> Color {
        opaque(named::CORAL)
    }

    pub fn label() -> Color {
        opaque(named::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashed() {
        let stroke = Stroke::solid(1.2, colors::rail_ties());
        assert!(!stroke.is_dashed());

        let stroke = stroke.dashed(&[2.0, 4.0, 2.0]);
        assert!(stroke.is_dashed());
        assert_eq!(stroke.dash.as_deref(), Some(&[2.0, 4.0, 2.0][..]));
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(color_from_hex("#ffffff"), Some(opaque(named::WHITE)));
        assert_eq!(color_from_hex("#add8e6"), Some(colors::water()));
        assert_eq!(color_from_hex("not a color"), None);
    }

    #[test]
    fn test_named_colors_are_opaque() {
        let water = colors::water();
        assert_eq!((water.red, water.green, water.blue, water.alpha), (173, 216, 230, 255));
    }
}
