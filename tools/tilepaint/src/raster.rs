use anyhow::{anyhow, Context, Result};
use fontdue::{Font, FontSettings};
use geo::Coord;
use raqote::{
    DrawOptions, DrawTarget, LineCap, LineJoin, Mask, Path as RaqotePath, PathBuilder, SolidSource,
    Source, StrokeStyle,
};
use std::path::Path;
use tilepaint_core::style::{Color, FontSpec, FontWeight, Stroke};
use tilepaint_core::surface::DrawingSurface;

/// Bold sans fonts tried when no `--font` is given
const BOLD_FALLBACKS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Regular sans fonts tried when no `--regular-font` is given
const REGULAR_FALLBACKS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font faces available for labels, one per weight
#[derive(Default)]
pub struct LabelFonts {
    pub regular: Option<Font>,
    pub bold: Option<Font>,
}

impl LabelFonts {
    pub fn is_empty(&self) -> bool {
        self.regular.is_none() && self.bold.is_none()
    }

    /// Face for `weight`, falling back to the other weight
    fn face(&self, weight: FontWeight) -> Option<&Font> {
        pick_face(self.regular.as_ref(), self.bold.as_ref(), weight)
    }
}

fn pick_face<'a, T>(regular: Option<&'a T>, bold: Option<&'a T>, weight: FontWeight) -> Option<&'a T> {
    match weight {
        FontWeight::Bold => bold.or(regular),
        FontWeight::Regular => regular.or(bold),
    }
}

/// Load the label fonts.
///
/// An explicit path must load. Otherwise the fallback list for that weight
/// is searched and the face is left out when nothing is found.
pub fn load_fonts(bold: Option<&Path>, regular: Option<&Path>) -> Result<LabelFonts> {
    Ok(LabelFonts {
        regular: load_face(regular, &REGULAR_FALLBACKS)?,
        bold: load_face(bold, &BOLD_FALLBACKS)?,
    })
}

fn load_face(path: Option<&Path>, fallbacks: &[&str]) -> Result<Option<Font>> {
    if let Some(path) = path {
        return read_font(path).map(Some);
    }

    for candidate in fallbacks.iter().map(Path::new) {
        if candidate.is_file() {
            match read_font(candidate) {
                Ok(font) => {
                    log::debug!("Using label font {}", candidate.display());
                    return Ok(Some(font));
                }
                Err(e) => log::debug!("Skipping font {}: {:#}", candidate.display(), e),
            }
        }
    }

    Ok(None)
}

fn read_font(path: &Path) -> Result<Font> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read font: {}", path.display()))?;
    Font::from_bytes(bytes, FontSettings::default())
        .map_err(|e| anyhow!("Failed to parse font {}: {}", path.display(), e))
}

/// CPU raster tile backed by a raqote draw target
pub struct RasterSurface {
    target: DrawTarget,
    fonts: LabelFonts,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Color, fonts: LabelFonts) -> Self {
        let mut target = DrawTarget::new(width as i32, height as i32);
        target.clear(solid(background));
        Self { target, fonts }
    }

    pub fn write_png(&self, path: &Path) -> Result<()> {
        self.target
            .write_png(path)
            .with_context(|| format!("Failed to write PNG to {}", path.display()))
    }

    /// Composites an 8-bit coverage bitmap in `color` with its top-left
    /// corner at (`left`, `top`)
    fn blit_coverage(&mut self, left: i32, top: i32, width: usize, height: usize, coverage: Vec<u8>, color: Color) {
        if width == 0 || height == 0 {
            return;
        }
        let mask = Mask {
            width: width as i32,
            height: height as i32,
            data: coverage,
        };
        self.target.mask(&Source::Solid(solid(color)), left, top, &mask);
    }
}

fn solid(color: Color) -> SolidSource {
    SolidSource::from_unpremultiplied_argb(color.alpha, color.red, color.green, color.blue)
}

fn build_path(points: &[Coord<f64>], close: bool) -> RaqotePath {
    let mut pb = PathBuilder::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            pb.move_to(p.x as f32, p.y as f32);
        } else {
            pb.line_to(p.x as f32, p.y as f32);
        }
    }
    if close {
        pb.close();
    }
    pb.finish()
}

impl DrawingSurface for RasterSurface {
    fn stroke_polyline(&mut self, points: &[Coord<f64>], stroke: &Stroke) {
        let style = StrokeStyle {
            cap: LineCap::Round,
            join: LineJoin::Round,
            width: stroke.width,
            dash_array: stroke.dash.clone().unwrap_or_default(),
            ..Default::default()
        };

        self.target.stroke(
            &build_path(points, false),
            &Source::Solid(solid(stroke.color)),
            &style,
            &DrawOptions::new(),
        );
    }

    fn fill_polygon(&mut self, points: &[Coord<f64>], color: Color) {
        self.target.fill(
            &build_path(points, true),
            &Source::Solid(solid(color)),
            &DrawOptions::new(),
        );
    }

    fn draw_text(&mut self, text: &str, position: Coord<f64>, font: &FontSpec, color: Color) {
        let Some(face) = self.fonts.face(font.weight) else {
            return;
        };

        let size = font.size;
        let ascent = face
            .horizontal_line_metrics(size)
            .map(|m| m.ascent)
            .unwrap_or(size);
        let baseline = position.y as f32 + ascent;
        let mut pen_x = position.x as f32;

        let glyphs: Vec<_> = text.chars().map(|ch| face.rasterize(ch, size)).collect();
        for (metrics, coverage) in glyphs {
            let left = (pen_x + metrics.xmin as f32).round() as i32;
            let top = (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i32;
            self.blit_coverage(left, top, metrics.width, metrics.height, coverage, color);
            pen_x += metrics.advance_width;
        }
    }
}
