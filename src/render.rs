use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use image::{imageops, DynamicImage, ImageBuffer, Rgb, RgbImage};
use serde::Serialize;
use tracing::trace;

use crate::barcode::Encoding;
use crate::error::{RenderError, RenderResult};
use crate::options::{Alignment, LabelPosition, RenderOptions, RotateFlip, SaveType};
use crate::pattern::PatternKind;
use crate::symbology::Symbology;

/*---- Geometry ----*/

/// An axis-aligned rectangle in pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Pixel layout of a symbol before rotation.
#[derive(Clone, PartialEq, Debug)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    /// Bars, plus bearer bars for ITF-14.
    pub bars: Vec<Rect>,
    /// Band reserved for the label, if one is shown.
    pub label_band: Option<Rect>,
}

/// Lays out `encoding` according to `opts`.
///
/// # Errors
///
/// Returns `RenderError::EncodingFailed` if the encoding carries errors,
/// `RenderError::ImageTooNarrow` if a module would be narrower than a pixel
/// and `RenderError::InvalidOption` for zero sizes or a bad aspect ratio.
pub fn geometry(encoding: &Encoding, opts: &RenderOptions) -> RenderResult<Geometry> {
    if !encoding.is_ok() || encoding.pattern.is_empty() {
        return Err(RenderError::EncodingFailed(encoding.errors.len()));
    }
    let pattern = &encoding.pattern;
    let height_modulated = encoding.kind == PatternKind::HeightModulated;
    let symbol_modules = if height_modulated {
        pattern.len() * 2 - 1
    } else {
        pattern.len()
    };
    let quiet = opts.quiet_zone as usize;
    let modules = symbol_modules + 2 * quiet;
    let modules_u32 = u32::try_from(modules)
        .map_err(|_| RenderError::InvalidOption(format!("{} modules is too many", modules)))?;

    let (width, bar_width) = match opts.bar_width {
        Some(0) => return Err(RenderError::InvalidOption("bar_width must be positive".into())),
        Some(bw) => {
            let width = modules_u32
                .checked_mul(bw)
                .ok_or_else(|| RenderError::InvalidOption("image width overflows".into()))?;
            (width, bw)
        }
        None => {
            let bw = opts.width / modules_u32;
            if bw == 0 {
                return Err(RenderError::ImageTooNarrow {
                    width: opts.width,
                    modules,
                });
            }
            (opts.width, bw)
        }
    };

    let height = match opts.aspect_ratio {
        Some(r) if r.is_finite() && r > 0.0 => ((f64::from(width) / r) as u32).max(1),
        Some(r) => {
            return Err(RenderError::InvalidOption(format!(
                "aspect_ratio {} must be positive",
                r
            )))
        }
        None => opts.height,
    };
    if height == 0 {
        return Err(RenderError::InvalidOption("height must be positive".into()));
    }

    let band_height = if opts.include_label && !encoding.label.is_empty() {
        opts.label_height
    } else {
        0
    };
    if band_height >= height {
        return Err(RenderError::InvalidOption(format!(
            "label_height {} leaves no room for bars in {}px",
            band_height, height
        )));
    }
    let bar_height = height - band_height;
    let (bar_top, label_band) = match (band_height, opts.label_position.is_top()) {
        (0, _) => (0, None),
        (h, true) => (h, Some(Rect { x: 0, y: 0, width, height: h })),
        (h, false) => (0, Some(Rect { x: 0, y: bar_height, width, height: h })),
    };

    // PostNet and ITF-14 stretch across the whole width.
    let fill = matches!(encoding.symbology, Symbology::PostNet | Symbology::Itf14);
    let extra = width - modules_u32 * bar_width;
    let offset = match opts.alignment {
        Alignment::Left => 0,
        Alignment::Center => extra / 2,
        Alignment::Right => extra,
    };
    let x_of = |m: usize| -> u32 {
        if fill {
            (m as u64 * u64::from(width) / modules as u64) as u32
        } else {
            offset + m as u32 * bar_width
        }
    };

    let mut bars = Vec::new();
    if height_modulated {
        for (i, full) in pattern.as_str().bytes().map(|b| b == b'1').enumerate() {
            let m = quiet + 2 * i;
            let h = if full { bar_height } else { (bar_height / 2).max(1) };
            bars.push(Rect {
                x: x_of(m),
                y: bar_top + bar_height - h,
                width: x_of(m + 1) - x_of(m),
                height: h,
            });
        }
    } else {
        let mut pos = quiet;
        for (is_bar, w) in pattern.runs() {
            if is_bar {
                bars.push(Rect {
                    x: x_of(pos),
                    y: bar_top,
                    width: x_of(pos + w) - x_of(pos),
                    height: bar_height,
                });
            }
            pos += w;
        }
    }

    if encoding.symbology == Symbology::Itf14 {
        let t = (bar_height / 12).max(1);
        let (left, right) = (x_of(0), x_of(modules));
        let span = right - left;
        bars.extend([
            Rect { x: left, y: bar_top, width: span, height: t },
            Rect { x: left, y: bar_top + bar_height - t, width: span, height: t },
            Rect { x: left, y: bar_top, width: t, height: bar_height },
            Rect { x: right.saturating_sub(t), y: bar_top, width: t, height: bar_height },
        ]);
    }

    trace!(
        "Laid out {} modules at {}px per module in {}x{}",
        modules,
        bar_width,
        width,
        height
    );
    Ok(Geometry {
        width,
        height,
        bars,
        label_band,
    })
}

/// Anchor point of the label text: horizontally at the left edge, centre or
/// right edge, vertically in the middle of the label band.
pub fn label_anchor(position: LabelPosition, width: u32, height: u32, label_height: u32) -> (u32, u32) {
    let x = match position.alignment() {
        Alignment::Left => 0,
        Alignment::Center => width / 2,
        Alignment::Right => width,
    };
    let band = label_height.min(height);
    let y = if position.is_top() {
        band / 2
    } else {
        height - band + band / 2
    };
    (x, y)
}

/*---- Raster output ----*/

fn fill_rect(img: &mut RgbImage, r: Rect, color: Rgb<u8>) {
    let x_end = (r.x + r.width).min(img.width());
    let y_end = (r.y + r.height).min(img.height());
    for y in r.y..y_end {
        for x in r.x..x_end {
            img.put_pixel(x, y, color);
        }
    }
}

/// Renders an encoding into an RGB image.
///
/// The label band is reserved but no glyphs are drawn; use
/// [`to_svg_string`] for labelled output.
///
/// # Example
///
/// ```rust
/// use barcode_standard::{generate, render, RenderOptions, Symbology};
///
/// let upc = generate(Symbology::UpcA, "12345678901");
/// let img = render::render(&upc, &RenderOptions::default()).unwrap();
/// assert_eq!(img.dimensions(), (300, 150));
/// ```
pub fn render(encoding: &Encoding, opts: &RenderOptions) -> RenderResult<RgbImage> {
    let geometry = geometry(encoding, opts)?;
    let mut img = ImageBuffer::from_pixel(geometry.width, geometry.height, Rgb(opts.background));
    for bar in &geometry.bars {
        fill_rect(&mut img, *bar, Rgb(opts.foreground));
    }
    let img = match opts.rotate_flip {
        RotateFlip::None => img,
        RotateFlip::Rotate90 => imageops::rotate90(&img),
        RotateFlip::Rotate180 => imageops::rotate180(&img),
        RotateFlip::Rotate270 => imageops::rotate270(&img),
        RotateFlip::FlipHorizontal => imageops::flip_horizontal(&img),
        RotateFlip::FlipVertical => imageops::flip_vertical(&img),
    };
    Ok(img)
}

/// Encodes `img` in the given format.
pub fn image_bytes(img: &RgbImage, format: SaveType) -> RenderResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    match format {
        // The GIF encoder wants an alpha channel.
        SaveType::Gif => DynamicImage::ImageRgba8(DynamicImage::ImageRgb8(img.clone()).to_rgba8())
            .write_to(&mut out, format.image_format())?,
        _ => img.write_to(&mut out, format.image_format())?,
    }
    Ok(out.into_inner())
}

/// Writes `img` to `path`, creating missing parent directories.
pub fn save(img: &RgbImage, path: &Path, format: SaveType) -> RenderResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, image_bytes(img, format)?)?;
    trace!("Saved {}x{} image to {}", img.width(), img.height(), path.display());
    Ok(())
}

/// Saves `img` under `directory_path` (default `generated`) as `filename`
/// (default: a timestamp) with the extension of `format`.
///
/// # Arguments
///
/// * `img` - The rendered barcode.
/// * `directory_path` - Optional. Directory to save into; created if missing.
/// * `filename` - Optional. File name without extension.
/// * `format` - Output format.
///
/// # Returns
///
/// The path that was written.
pub fn save_to_dir(
    img: &RgbImage,
    directory_path: Option<&str>,
    filename: Option<&str>,
    format: SaveType,
) -> RenderResult<String> {
    let directory_path = directory_path.unwrap_or("generated");
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            since_the_epoch.as_millis().to_string()
        }
    };
    let file_path = format!("{}/{}.{}", directory_path, filename, format.extension());
    save(img, Path::new(&file_path), format)?;
    Ok(file_path)
}

/// Printed size of an image.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
    /// Millimetres when true, inches otherwise.
    pub metric: bool,
}

/// Converts pixel dimensions to inches or millimetres at `dpi`.
pub fn physical_size(img: &RgbImage, dpi: f64, metric: bool) -> RenderResult<ImageSize> {
    if !(dpi.is_finite() && dpi > 0.0) {
        return Err(RenderError::InvalidOption(format!("dpi {} must be positive", dpi)));
    }
    let scale = if metric { 25.4 / dpi } else { 1.0 / dpi };
    Ok(ImageSize {
        width: f64::from(img.width()) * scale,
        height: f64::from(img.height()) * scale,
        metric,
    })
}

/*---- Text output ----*/

fn hex(color: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

// Returns a string of SVG code depicting the encoding with the same layout
// as `render`, plus the label as text. Rotation is not applied.
// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(encoding: &Encoding, opts: &RenderOptions) -> RenderResult<String> {
    let g = geometry(encoding, opts)?;
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{0}\" height=\"{1}\" viewBox=\"0 0 {0} {1}\" stroke=\"none\">\n",
        g.width, g.height
    );
    result += &format!("\t<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n", hex(opts.background));
    result += "\t<path d=\"";
    for (i, r) in g.bars.iter().enumerate() {
        if i != 0 {
            result += " ";
        }
        result += &format!("M{},{}h{}v{}h-{}z", r.x, r.y, r.width, r.height, r.width);
    }
    result += &format!("\" fill=\"{}\"/>\n", hex(opts.foreground));
    if let Some(band) = g.label_band {
        let (x, y) = label_anchor(opts.label_position, g.width, g.height, band.height);
        let anchor = match opts.label_position.alignment() {
            Alignment::Left => "start",
            Alignment::Center => "middle",
            Alignment::Right => "end",
        };
        result += &format!(
            "\t<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" dominant-baseline=\"middle\" font-family=\"monospace\" font-size=\"{}\" fill=\"{}\">{}</text>\n",
            x,
            y,
            anchor,
            (band.height * 4 / 5).max(1),
            hex(opts.foreground),
            escape_xml(&encoding.label)
        );
    }
    result += "</svg>\n";
    Ok(result)
}

/// Returns a text preview: four rows of full blocks for bars, with the top
/// half of PostNet half-height bars left blank.
pub fn to_ascii_string(encoding: &Encoding) -> String {
    const ROWS: usize = 4;
    let height_modulated = encoding.kind == PatternKind::HeightModulated;
    let mut out = String::new();
    for row in 0..ROWS {
        for b in encoding.pattern.as_str().bytes() {
            let c = match (height_modulated, b == b'1') {
                (false, true) => '█',
                (false, false) => ' ',
                (true, full) if full || row >= ROWS / 2 => '█',
                (true, _) => ' ',
            };
            out.push(c);
            if height_modulated {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}

/// Prints the encoding to the console.
pub fn print_barcode(encoding: &Encoding) {
    print!("{}", to_ascii_string(encoding));
    println!("{}", encoding.label);
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::generate;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn test_render_default_upca() {
        let upc = generate(Symbology::UpcA, "12345678901");
        let img = render(&upc, &RenderOptions::default()).unwrap();
        assert_eq!(img.dimensions(), (300, 150));
        // 95 modules at 3px, centred: 7px margin, then the 101 guard.
        assert_eq!(*img.get_pixel(6, 10), WHITE);
        assert_eq!(*img.get_pixel(7, 10), BLACK);
        assert_eq!(*img.get_pixel(10, 10), WHITE);
        assert_eq!(*img.get_pixel(13, 149), BLACK);
    }

    #[test]
    fn test_bar_width_and_quiet_zone() {
        let upc = generate(Symbology::UpcA, "12345678901");
        let opts = RenderOptions {
            bar_width: Some(2),
            quiet_zone: 10,
            aspect_ratio: Some(2.0),
            ..Default::default()
        };
        let img = render(&upc, &opts).unwrap();
        assert_eq!(img.dimensions(), (230, 115));
        assert_eq!(*img.get_pixel(19, 0), WHITE);
        assert_eq!(*img.get_pixel(20, 0), BLACK);
    }

    #[test]
    fn test_alignment() {
        let upc = generate(Symbology::UpcA, "12345678901");
        let left = RenderOptions {
            alignment: Alignment::Left,
            ..Default::default()
        };
        let img = render(&upc, &left).unwrap();
        assert_eq!(*img.get_pixel(0, 0), BLACK);
        let right = RenderOptions {
            alignment: Alignment::Right,
            ..Default::default()
        };
        let img = render(&upc, &right).unwrap();
        assert_eq!(*img.get_pixel(14, 0), WHITE);
        assert_eq!(*img.get_pixel(15, 0), BLACK);
    }

    #[test]
    fn test_render_errors() {
        let bad = generate(Symbology::UpcA, "12");
        assert!(matches!(
            render(&bad, &RenderOptions::default()),
            Err(RenderError::EncodingFailed(1))
        ));
        let upc = generate(Symbology::UpcA, "12345678901");
        let narrow = RenderOptions {
            width: 50,
            ..Default::default()
        };
        assert!(matches!(
            render(&upc, &narrow),
            Err(RenderError::ImageTooNarrow { width: 50, modules: 95 })
        ));
        let squashed = RenderOptions {
            include_label: true,
            label_height: 150,
            ..Default::default()
        };
        assert!(matches!(render(&upc, &squashed), Err(RenderError::InvalidOption(_))));
    }

    #[test]
    fn test_label_band_is_reserved() {
        let upc = generate(Symbology::UpcA, "12345678901");
        let opts = RenderOptions {
            include_label: true,
            ..Default::default()
        };
        let img = render(&upc, &opts).unwrap();
        assert_eq!(*img.get_pixel(7, 129), BLACK);
        assert_eq!(*img.get_pixel(7, 130), WHITE);

        let top = RenderOptions {
            include_label: true,
            label_position: LabelPosition::TopLeft,
            ..Default::default()
        };
        let img = render(&upc, &top).unwrap();
        assert_eq!(*img.get_pixel(7, 19), WHITE);
        assert_eq!(*img.get_pixel(7, 20), BLACK);
    }

    #[test]
    fn test_postnet_half_bars() {
        let zip = generate(Symbology::PostNet, "55555");
        let g = geometry(&zip, &RenderOptions::default()).unwrap();
        assert_eq!(g.bars.len(), 32);
        // Frame bar is full height, the first digit starts with a half bar.
        assert_eq!(g.bars[0].height, 150);
        assert_eq!(g.bars[1].height, 75);
        assert_eq!(g.bars[1].y, 75);
    }

    #[test]
    fn test_itf14_bearers() {
        let itf = generate(Symbology::Itf14, "1001234512345");
        let img = render(&itf, &RenderOptions::default()).unwrap();
        // Bearers frame the symbol, which fills the width.
        assert_eq!(*img.get_pixel(150, 0), BLACK);
        assert_eq!(*img.get_pixel(150, 149), BLACK);
        assert_eq!(*img.get_pixel(299, 75), BLACK);
    }

    #[test]
    fn test_rotate() {
        let upc = generate(Symbology::UpcA, "12345678901");
        let opts = RenderOptions {
            rotate_flip: RotateFlip::Rotate90,
            ..Default::default()
        };
        assert_eq!(render(&upc, &opts).unwrap().dimensions(), (150, 300));
    }

    #[test]
    fn test_svg_has_label() {
        let ean = generate(Symbology::Ean13, "400638133393");
        let opts = RenderOptions {
            include_label: true,
            ..Default::default()
        };
        let svg = to_svg_string(&ean, &opts).unwrap();
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(svg.contains(">4006381333931</text>"));
        assert!(svg.contains("fill=\"#000000\""));
        assert_eq!(escape_xml("a<b&\""), "a&lt;b&amp;&quot;");
    }

    #[test]
    fn test_export_formats() {
        let upc = generate(Symbology::UpcA, "12345678901");
        let img = render(&upc, &RenderOptions::default()).unwrap();
        let png = image_bytes(&img, SaveType::Png).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
        let bmp = image_bytes(&img, SaveType::Bmp).unwrap();
        assert_eq!(&bmp[..2], b"BM");
        for format in [SaveType::Jpg, SaveType::Gif, SaveType::Tiff] {
            assert!(!image_bytes(&img, format).unwrap().is_empty());
        }
    }

    #[test]
    fn test_save_to_dir() {
        let upc = generate(Symbology::UpcA, "12345678901");
        let img = render(&upc, &RenderOptions::default()).unwrap();
        let dir = std::env::temp_dir().join(format!("barcode-standard-{}", std::process::id()));
        let dir = dir.to_string_lossy().into_owned();
        let path = save_to_dir(&img, Some(&dir), Some("upc"), SaveType::Png).unwrap();
        assert!(path.ends_with("upc.png"));
        assert!(Path::new(&path).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_physical_size_and_anchor() {
        let img = RgbImage::new(96, 192);
        let inches = physical_size(&img, 96.0, false).unwrap();
        assert_eq!((inches.width, inches.height), (1.0, 2.0));
        let mm = physical_size(&img, 96.0, true).unwrap();
        assert!((mm.width - 25.4).abs() < 1e-9);
        assert!((mm.height - 50.8).abs() < 1e-9);
        assert!(mm.metric);
        assert!(physical_size(&img, 0.0, false).is_err());

        assert_eq!(label_anchor(LabelPosition::BottomCenter, 300, 150, 20), (150, 140));
        assert_eq!(label_anchor(LabelPosition::TopRight, 300, 150, 20), (300, 10));
    }

    #[test]
    fn test_ascii_preview() {
        let fim = generate(Symbology::Fim, "A");
        let text = to_ascii_string(&fim);
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().all(|l| l.chars().count() == 17));
        assert!(text.starts_with("█ █"));
    }
}
