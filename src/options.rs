//! Caller-facing configuration for encoding and rendering.
//!
//! Both structs implement `Default` and `serde::Deserialize` with
//! `#[serde(default)]`, so a partial JSON document only overrides the
//! fields it names.

use serde::{Deserialize, Serialize};

use crate::error::RenderResult;

/// What to do with a check digit the caller already put in the data.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum CheckDigitPolicy {
    /// Compute the check digit and use it, replacing a supplied one.
    /// Variable-length symbologies treat all input as data and append.
    #[default]
    Recompute,
    /// Treat trailing check characters in the input as caller-supplied and
    /// reject the input with `ChecksumMismatch` when they are wrong.
    Verify,
}

/// Options for a single encode request.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Label shown instead of the derived one.
    pub alternate_label: Option<String>,
    /// Group EAN-13 and UPC-A labels into their semantic fields.
    pub standardize_label: bool,
    pub check_digit_policy: CheckDigitPolicy,
    /// Prepend a `0` when an interleaved 2 of 5 payload has odd length
    /// instead of rejecting it. On by default.
    pub pad_odd_length: bool,
    /// 2- or 5-digit UPC/EAN add-on appended to the primary symbol.
    pub supplemental: Option<String>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            alternate_label: None,
            standardize_label: false,
            check_digit_policy: CheckDigitPolicy::Recompute,
            pad_odd_length: true,
            supplemental: None,
        }
    }
}

impl EncodeOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Horizontal placement of the symbol when the image is wider than it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Center,
    Left,
    Right,
}

/// Where the label band sits relative to the bars.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum LabelPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

impl LabelPosition {
    pub fn is_top(self) -> bool {
        matches!(
            self,
            LabelPosition::TopLeft | LabelPosition::TopCenter | LabelPosition::TopRight
        )
    }

    pub fn alignment(self) -> Alignment {
        match self {
            LabelPosition::TopLeft | LabelPosition::BottomLeft => Alignment::Left,
            LabelPosition::TopCenter | LabelPosition::BottomCenter => Alignment::Center,
            LabelPosition::TopRight | LabelPosition::BottomRight => Alignment::Right,
        }
    }
}

/// Rotation or mirroring applied to the finished image.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum RotateFlip {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
    FlipHorizontal,
    FlipVertical,
}

/// Raster formats available for export.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum SaveType {
    #[default]
    Jpg,
    Bmp,
    Png,
    Gif,
    Tiff,
}

impl SaveType {
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            SaveType::Jpg => image::ImageFormat::Jpeg,
            SaveType::Bmp => image::ImageFormat::Bmp,
            SaveType::Png => image::ImageFormat::Png,
            SaveType::Gif => image::ImageFormat::Gif,
            SaveType::Tiff => image::ImageFormat::Tiff,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            SaveType::Jpg => "jpg",
            SaveType::Bmp => "bmp",
            SaveType::Png => "png",
            SaveType::Gif => "gif",
            SaveType::Tiff => "tiff",
        }
    }
}

/// Rendering options. Each field is independent of the others except where
/// noted.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Image width in pixels. Ignored when `bar_width` is set.
    pub width: u32,
    /// Image height in pixels. Ignored when `aspect_ratio` is set.
    pub height: u32,
    /// Pixels per module. When set, the width is
    /// `modules * bar_width + 2 * quiet_zone * bar_width`.
    pub bar_width: Option<u32>,
    /// When set, height becomes `width / aspect_ratio` rounded down, applied
    /// after the width is known.
    pub aspect_ratio: Option<f64>,
    /// Blank modules kept on each side of the symbol.
    pub quiet_zone: u32,
    /// Not applied to PostNet or ITF-14, which always fill the width.
    pub alignment: Alignment,
    pub include_label: bool,
    pub label_position: LabelPosition,
    /// Height of the band reserved for the label, in pixels.
    pub label_height: u32,
    pub foreground: [u8; 3],
    pub background: [u8; 3],
    pub rotate_flip: RotateFlip,
    pub save_type: SaveType,
    /// Resolution used by the physical size query.
    pub dpi: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 300,
            height: 150,
            bar_width: None,
            aspect_ratio: None,
            quiet_zone: 0,
            alignment: Alignment::Center,
            include_label: false,
            label_position: LabelPosition::BottomCenter,
            label_height: 20,
            foreground: [0, 0, 0],
            background: [255, 255, 255],
            rotate_flip: RotateFlip::None,
            save_type: SaveType::Jpg,
            dpi: 96.0,
        }
    }
}

impl RenderOptions {
    /// Loads options from JSON; missing fields keep their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use barcode_standard::options::{Alignment, RenderOptions};
    ///
    /// let opts = RenderOptions::from_json(r#"{ "bar_width": 2, "alignment": "Left" }"#).unwrap();
    /// assert_eq!(opts.bar_width, Some(2));
    /// assert_eq!(opts.alignment, Alignment::Left);
    /// assert_eq!(opts.height, 150);
    /// ```
    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let opts = EncodeOptions::from_json(r#"{ "standardize_label": true }"#).unwrap();
        assert!(opts.standardize_label);
        assert_eq!(opts.check_digit_policy, CheckDigitPolicy::Recompute);
        assert!(opts.supplemental.is_none());
        assert!(opts.pad_odd_length);

        let opts = EncodeOptions::from_json(r#"{ "check_digit_policy": "Verify" }"#).unwrap();
        assert_eq!(opts.check_digit_policy, CheckDigitPolicy::Verify);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(RenderOptions::from_json("{ \"width\": \"wide\" }").is_err());
        let err = EncodeOptions::from_json("{ \"pad_odd_length\": 3 }").unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn test_label_position_geometry() {
        assert!(LabelPosition::TopRight.is_top());
        assert!(!LabelPosition::BottomLeft.is_top());
        assert_eq!(LabelPosition::BottomRight.alignment(), Alignment::Right);
    }
}
