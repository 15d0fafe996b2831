use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use geo::{Coord, Rect};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tilepaint_core::style::{color_from_hex, Color};
use tilepaint_core::{
    Classifier, Compositor, DisplayList, EllipticalMercator, Projection, SphericalMercator,
    Taxonomy, Viewport,
};

mod input;
mod raster;

use input::read_features;
use raster::{load_fonts, RasterSurface};

#[derive(Parser, Debug)]
#[command(
    name = "tilepaint",
    author,
    version,
    about = "Render a styled raster map tile from GeoJSON features",
    long_about = "Classifies tagged GeoJSON features (roads, railways, waterways, borders, \
                  populated places and land cover), projects them with Mercator and paints \
                  them in draw-priority order onto a PNG tile.\n\n\
                  Feature properties are treated as map tags. The tag -> shape dispatch \
                  table can be replaced with --taxonomy."
)]
struct Args {
    /// Input GeoJSON file (Feature, FeatureCollection or Geometry)
    #[arg(short, long)]
    input: PathBuf,

    /// Output PNG file
    #[arg(short, long, required_unless_present = "dry_run")]
    output: Option<PathBuf>,

    /// Tile width in pixels
    #[arg(long, default_value_t = 800, value_parser = tile_size())]
    width: u32,

    /// Tile height in pixels
    #[arg(long, default_value_t = 800, value_parser = tile_size())]
    height: u32,

    /// Geographic bounds as min_lon,min_lat,max_lon,max_lat
    /// (defaults to the extent of all features)
    #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
    bbox: Option<Rect<f64>>,

    /// JSON tag -> shape dispatch table (replaces the built-in one)
    #[arg(short, long)]
    taxonomy: Option<PathBuf>,

    /// Map projection
    #[arg(long, value_enum, default_value_t = ProjectionArg::Elliptical)]
    projection: ProjectionArg,

    /// Bold TrueType font for place labels (a system bold sans is tried otherwise)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Regular TrueType font (a system sans is tried otherwise)
    #[arg(long)]
    regular_font: Option<PathBuf>,

    /// Background color as #rrggbb
    #[arg(long, value_parser = parse_color, default_value = "#ffffff")]
    background: Color,

    /// Compose into an in-memory display list and report, without writing a PNG
    #[arg(long)]
    dry_run: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProjectionArg {
    /// Web Mercator (EPSG:3857)
    Spherical,
    /// Mercator on the WGS84 ellipsoid
    Elliptical,
}

impl ProjectionArg {
    fn build(self) -> Box<dyn Projection> {
        match self {
            ProjectionArg::Spherical => Box::new(SphericalMercator),
            ProjectionArg::Elliptical => Box::new(EllipticalMercator),
        }
    }
}

/// Largest tile edge accepted on the command line
const MAX_TILE_SIZE: i64 = 16384;

fn tile_size() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=MAX_TILE_SIZE)
}

fn parse_bbox(s: &str) -> Result<Rect<f64>, String> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid number in bbox: {e}"))?;

    let [min_lon, min_lat, max_lon, max_lat] = values[..] else {
        return Err(format!("expected 4 comma-separated values, got {}", values.len()));
    };
    if min_lon >= max_lon || min_lat >= max_lat {
        return Err("bbox minimum must be below its maximum".to_string());
    }

    Ok(Rect::new(
        Coord { x: min_lon, y: min_lat },
        Coord { x: max_lon, y: max_lat },
    ))
}

fn parse_color(s: &str) -> Result<Color, String> {
    color_from_hex(s).ok_or_else(|| format!("not a #rrggbb color: {s}"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== Tile Painter ===");
    log::info!("Input: {}", args.input.display());

    if !args.input.exists() {
        bail!("Input file does not exist: {}", args.input.display());
    }

    let classifier = match &args.taxonomy {
        Some(path) => {
            log::info!("Taxonomy: {}", path.display());
            let taxonomy = Taxonomy::from_path(path).context("Failed to load taxonomy")?;
            log::info!("  {} rules", taxonomy.rules.len());
            Classifier::new(taxonomy)
        }
        None => Classifier::default(),
    };
    let projection = args.projection.build();

    // Phase 1: Read features
    log::info!("");
    log::info!("Phase 1: Reading features...");
    let features = read_features(&args.input).context("Failed to read features")?;
    log::info!("  Read {} features", features.len());

    if features.is_empty() {
        bail!("No features with geometry found in {}", args.input.display());
    }

    // Phase 2: Classify
    log::info!("");
    log::info!("Phase 2: Classifying features...");
    let pb = ProgressBar::new(features.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("{bar:40.green} {pos}/{len} {msg}")?);

    let mut compositor = Compositor::new();
    for feature in &features {
        compositor.push(classifier.classify(feature, projection.as_ref()));
        pb.inc(1);
    }
    pb.finish_with_message("classified");

    // Phase 3: Fit the viewport
    log::info!("");
    log::info!("Phase 3: Fitting {}x{} viewport...", args.width, args.height);
    let viewport = match args.bbox {
        Some(bbox) => {
            log::info!("  Bounds: {:?} -> {:?}", bbox.min(), bbox.max());
            Viewport::fit_geographic(bbox, projection.as_ref(), args.width, args.height)?
        }
        None => {
            let Some(extent) = compositor.extent() else {
                bail!("Features have no coordinates; cannot derive tile bounds");
            };
            Viewport::fit(extent, args.width, args.height)?
        }
    };
    log::debug!("  {:?}", viewport);

    // Phase 4: Compose
    log::info!("");
    log::info!("Phase 4: Composing {} shapes...", compositor.len());

    if args.dry_run {
        let mut surface = DisplayList::new();
        let stats = compositor.compose(&viewport, &mut surface)?;
        let (strokes, fills, texts) = surface.counts();

        log::info!("");
        stats.log_summary();
        log::info!("Draw commands: {} strokes, {} fills, {} labels", strokes, fills, texts);
        log::info!("Dry run, nothing written.");
        return Ok(());
    }

    let Some(output) = args.output.as_deref() else {
        bail!("--output is required unless --dry-run is set");
    };

    let fonts = load_fonts(args.font.as_deref(), args.regular_font.as_deref())
        .context("Failed to load label font")?;
    if fonts.is_empty() {
        log::warn!("  No label font found; place names will not be drawn");
        log::warn!("    Hint: Use --font <ttf> to choose one");
    }

    let mut surface = RasterSurface::new(args.width, args.height, args.background, fonts);
    let stats = compositor.compose(&viewport, &mut surface)?;

    // Phase 5: Write output
    log::info!("");
    log::info!("Phase 5: Writing output...");
    surface.write_png(output)?;

    // Summary
    log::info!("");
    stats.log_summary();
    log::info!("");
    log::info!("Output written to: {}", output.display());
    log::info!("Done!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox() {
        let bbox = parse_bbox("-0.5, 51.2,0.3,51.7").unwrap();
        assert_eq!(bbox.min(), Coord { x: -0.5, y: 51.2 });
        assert_eq!(bbox.max(), Coord { x: 0.3, y: 51.7 });

        assert!(parse_bbox("1,2,3").is_err());
        assert!(parse_bbox("1,2,x,4").is_err());
        assert!(parse_bbox("3,2,1,4").is_err());
    }

    #[test]
    fn test_args_require_output() {
        assert!(Args::try_parse_from(["tilepaint", "-i", "in.geojson"]).is_err());

        let args = Args::try_parse_from(["tilepaint", "-i", "in.geojson", "--dry-run"]).unwrap();
        assert!(args.output.is_none());
        assert_eq!(args.width, 800);
        assert!(matches!(args.projection, ProjectionArg::Elliptical));

        let args = Args::try_parse_from([
            "tilepaint",
            "-i",
            "in.geojson",
            "-o",
            "out.png",
            "--bbox",
            "-1,-1,1,1",
            "--projection",
            "spherical",
            "--background",
            "#000000",
        ])
        .unwrap();
        assert!(args.bbox.is_some());
        assert_eq!(args.background.red, 0);
    }

    #[test]
    fn test_tile_size_is_bounded() {
        let parse = |width: &str| {
            Args::try_parse_from(["tilepaint", "-i", "in.geojson", "--dry-run", "--width", width])
        };

        assert_eq!(parse("16384").unwrap().width, 16384);
        assert!(parse("0").is_err());
        assert!(parse("16385").is_err());
        assert!(parse("4294967295").is_err());
    }
}
