use anyhow::{Context, Result};
use clap::Parser;
use image::{GenericImageView, Rgba, RgbaImage, imageops::FilterType};
use kpalette::{ExtractOptions, PALETTE_FILE_NAME, Palette, PixelBuffer};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Longest side the image is scaled down to before sampling.
const MAX_DIMENSION: u32 = 1024;

/// Extract a dominant-color palette from an image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image to extract colors from
    input: PathBuf,

    /// Number of palette colors, 1 to 20 (0 means default)
    #[arg(short = 'k', long = "colors", default_value_t = kpalette::DEFAULT_K as i64, allow_negative_numbers = true)]
    k: i64,

    /// Sample every Nth pixel on both axes, 1 to 50 (0 means default)
    #[arg(short, long, default_value_t = kpalette::DEFAULT_STRIDE as i64, allow_negative_numbers = true)]
    stride: i64,

    /// Write the palette as JSON; a directory gets palette.json inside it
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the scaled image with a swatch strip on its right side
    #[arg(long)]
    swatches: Option<PathBuf>,

    /// Seed for centroid selection
    #[arg(long)]
    seed: Option<u64>,
}

/// Dimensions that fit into `max` on the longest side, keeping the aspect
/// ratio. Never upscales and never returns a zero side.
fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    let scale = f64::min(1.0, max as f64 / width.max(height) as f64);
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    (w, h)
}

fn load_rgba8(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)
        .with_context(|| format!("{} is not a readable image file", path.display()))?;
    let (w, h) = img.dimensions();
    let (fit_w, fit_h) = fit_within(w, h, MAX_DIMENSION);

    let img = if (fit_w, fit_h) == (w, h) {
        img
    } else {
        tracing::debug!(from = ?(w, h), to = ?(fit_w, fit_h), "scaling image down");
        img.resize_exact(fit_w, fit_h, FilterType::Triangle)
    };

    Ok(img.to_rgba8())
}

fn write_swatches(img: &RgbaImage, palette: &Palette, path: &Path) -> Result<()> {
    let (w, h) = img.dimensions();
    let swatch_w = (w * 2 / 10).max(1);
    let mut out = RgbaImage::new(w + swatch_w, h);

    // Left: image
    for (x, y, px) in img.enumerate_pixels() {
        out.put_pixel(x, y, *px);
    }

    // Right: one band per entry, most populated on top
    let num_colors = (palette.len() as u32).max(1);
    let swatch_h = (h / num_colors).max(1);
    for (i, entry) in palette.iter().enumerate() {
        let pixel = Rgba([entry.color.r, entry.color.g, entry.color.b, 255]);
        let y_start = (i as u32 * swatch_h).min(h);
        let y_end = if i as u32 == num_colors - 1 {
            h
        } else {
            (y_start + swatch_h).min(h)
        };
        for y in y_start..y_end {
            for x in w..(w + swatch_w) {
                out.put_pixel(x, y, pixel);
            }
        }
    }

    out.save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kpalette=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let args = Args::parse();
    let options = ExtractOptions::from_user_input(Some(args.k), Some(args.stride));

    let img = load_rgba8(&args.input)?;
    let input = PixelBuffer::try_from(&img).context("image has no pixels")?;

    let t = Instant::now();
    let palette = match args.seed {
        Some(seed) => kpalette::palette_with_rng(&mut kpalette::seeded_rng(seed), input, &options),
        None => kpalette::palette(input, &options),
    }
    .context("no palette extracted, try a smaller stride")?;
    tracing::info!(
        k = options.k,
        stride = options.stride,
        elapsed = ?t.elapsed(),
        "palette extracted"
    );

    let total = palette.total_count();
    for entry in &palette {
        let c = entry.color;
        println!(
            "{}  {:>3}, {:>3}, {:>3}  {:>5.1}%",
            entry.hex(),
            c.r,
            c.g,
            c.b,
            entry.percent_of(total)
        );
    }

    if let Some(json) = &args.json {
        let path = if json.is_dir() {
            json.join(PALETTE_FILE_NAME)
        } else {
            json.clone()
        };
        palette.write_json(&path)?;
        println!("Saved → {}", path.display());
    }

    if let Some(swatches) = &args.swatches {
        write_swatches(&img, &palette, swatches)?;
        println!("Saved → {}", swatches.display());
    }

    Ok(())
}
