//! # barcode-standard
//!
//! A Rust library for encoding linear barcodes and rendering them as images.
//!
//! `barcode-standard` turns application data into the bar/space module pattern of one of 39
//! linear symbologies (UPC/EAN, 2 of 5, Code 39/93/128, Codabar, MSI, Code 11, PostNet,
//! Telepen, FIM, Pharmacode and their variants). Each symbology validates its input, computes
//! its check characters and draws its start/stop patterns; the result is a single module
//! string that the renderer turns into a raster image, an SVG or a console preview.
//!
//! ## Features
//!
//! - Encode 39 symbologies with per-symbology alphabet, length and checksum rules.
//! - Collect every validation error of an input in one pass instead of stopping at the first.
//! - Recompute or verify caller-supplied check digits.
//! - Derive human-readable labels, optionally grouped for UPC-A and EAN-13, and look up the
//!   GS1 prefix country.
//! - Append 2- and 5-digit UPC/EAN add-ons.
//! - Render to RGB images with alignment, quiet zones, label bands, rotation and colors, and
//!   export JPEG, BMP, PNG, GIF, TIFF or SVG.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! barcode-standard = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Encode an EAN-13 with a grouped label:
//!
//! ```rust
//! use barcode_standard::{generate_with, EncodeOptions, Symbology};
//!
//! let options = EncodeOptions {
//!     standardize_label: true,
//!     ..Default::default()
//! };
//! let ean = generate_with(Symbology::Ean13, "400638133393", &options);
//! assert!(ean.is_ok());
//! assert_eq!(ean.label, "4 006381 33393 1");
//! assert_eq!(ean.pattern.len(), 95);
//! ```
//!
//! Render it and encode the image as PNG:
//!
//! ```rust
//! use barcode_standard::{generate, render, RenderOptions, SaveType, Symbology};
//!
//! let code = generate(Symbology::Code128, "PJJ123C");
//! let img = render::render(&code, &RenderOptions::default()).unwrap();
//! let png = render::image_bytes(&img, SaveType::Png).unwrap();
//! assert!(!png.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`barcode`]: The encoding facade and its result type.
//! - [`encoders`]: One encoder per symbology family.
//! - [`checksum`]: Check digit algorithms.
//! - [`tables`]: Static bar pattern tables.
//! - [`label`]: Label formatting and GS1 prefix lookup.
//! - [`render`]: Raster, SVG and text output.

pub mod barcode;
pub mod checksum;
pub mod encoders;
pub mod error;
pub mod label;
pub mod options;
pub mod pattern;
pub mod render;
pub mod symbology;
pub mod tables;

pub use barcode::{generate, generate_named, generate_with, Barcode, Encoding};
pub use error::{EncodeError, EncodeResult, RenderError, RenderResult};
pub use options::{CheckDigitPolicy, EncodeOptions, RenderOptions, SaveType};
pub use pattern::{Pattern, PatternKind};
pub use symbology::Symbology;
