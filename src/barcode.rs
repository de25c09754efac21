//! The encoding facade: picks the encoder, aggregates errors, attaches
//! add-ons and labels, and remembers the latest result.

use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::encoders::{encoder_for, Encoder, UpcSupplemental};
use crate::error::{EncodeError, EncodeResult};
use crate::label;
use crate::options::EncodeOptions;
use crate::pattern::{Pattern, PatternKind};
use crate::symbology::Symbology;

/// Modules of blank space between a UPC/EAN symbol and its add-on.
pub const SUPPLEMENTAL_GAP: usize = 9;

/// The result of one encode request.
///
/// A non-empty `errors` list comes with an empty pattern and must not be
/// rendered.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Encoding {
    pub symbology: Symbology,
    pub raw_data: String,
    pub pattern: Pattern,
    pub kind: PatternKind,
    pub label: String,
    #[serde(serialize_with = "messages")]
    pub errors: Vec<EncodeError>,
    /// Country or use of the GS1 prefix, for the UPC/EAN family.
    pub country: Option<&'static str>,
    #[serde(rename = "encoding_time_ms", serialize_with = "millis")]
    pub encoding_time: Duration,
}

fn messages<S: Serializer>(errors: &[EncodeError], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(errors.iter().map(ToString::to_string))
}

fn millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}

impl Encoding {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error messages in the order they were found.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Serializes the whole result, errors as messages.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

struct Symbol {
    pattern: Pattern,
    kind: PatternKind,
    label: String,
    country: Option<&'static str>,
}

fn encode_symbol(symbology: Symbology, raw: &str, options: &EncodeOptions) -> EncodeResult<Symbol> {
    let encoder = encoder_for(symbology, options).map_err(|e| vec![e])?;
    let main = encoder.encode(raw);

    let addon = match &options.supplemental {
        None => Ok(None),
        Some(_) if !symbology.is_upc_ean() => Err(vec![EncodeError::data(
            symbology,
            "supplemental add-ons apply only to UPC/EAN symbologies",
        )]),
        Some(digits) => match UpcSupplemental::for_len(digits.chars().count()) {
            Some(addon) => addon.encode(digits).map(Some),
            None => Err(vec![EncodeError::length(
                Symbology::UpcSupplemental5Digit,
                digits.chars().count(),
                "a 2 or 5 digit supplemental",
            )]),
        },
    };

    let (encoded, addon) = match (main, addon) {
        (Ok(encoded), Ok(addon)) => (encoded, addon),
        (main, addon) => {
            let mut errors = main.err().unwrap_or_default();
            errors.extend(addon.err().unwrap_or_default());
            return Err(errors);
        }
    };

    let mut pattern = encoded.pattern.clone();
    let mut label = label::format(
        symbology,
        &encoded.data,
        encoded.check.as_deref(),
        options.standardize_label,
    );
    if let Some(addon) = addon {
        pattern.append_space(SUPPLEMENTAL_GAP);
        pattern.append(&addon.pattern);
        label.push(' ');
        label.push_str(&addon.data);
    }
    if let Some(alternate) = &options.alternate_label {
        label = alternate.clone();
    }
    let country = label::gs1_digits(symbology, &encoded.text()).and_then(|d| label::country(&d));
    Ok(Symbol {
        pattern,
        kind: encoded.kind,
        label,
        country,
    })
}

/// Encodes `raw` with default options.
///
/// # Example
///
/// ```rust
/// use barcode_standard::{generate, Symbology};
///
/// let upc = generate(Symbology::UpcA, "12345678901");
/// assert!(upc.is_ok());
/// assert_eq!(upc.label, "123456789012");
/// assert_eq!(upc.pattern.len(), 95);
/// ```
pub fn generate(symbology: Symbology, raw: &str) -> Encoding {
    generate_with(symbology, raw, &EncodeOptions::default())
}

/// Encodes `raw` as `symbology`. Failures are returned in
/// [`Encoding::errors`], never raised.
pub fn generate_with(symbology: Symbology, raw: &str, options: &EncodeOptions) -> Encoding {
    let started = Instant::now();
    let result = encode_symbol(symbology, raw, options);
    let encoding_time = started.elapsed();
    match result {
        Ok(symbol) => {
            debug!(
                "Encoded {} ({} modules) in {:?}",
                symbology,
                symbol.pattern.len(),
                encoding_time
            );
            Encoding {
                symbology,
                raw_data: raw.to_string(),
                pattern: symbol.pattern,
                kind: symbol.kind,
                label: symbol.label,
                errors: Vec::new(),
                country: symbol.country,
                encoding_time,
            }
        }
        Err(errors) => {
            warn!("Encoding {} failed with {} error(s)", symbology, errors.len());
            Encoding {
                symbology,
                raw_data: raw.to_string(),
                pattern: Pattern::new(),
                kind: PatternKind::Modules,
                label: String::new(),
                errors,
                country: None,
                encoding_time,
            }
        }
    }
}

/// Like [`generate_with`], with the symbology given by name (`"EAN13"`,
/// `"code128-b"`, ...).
pub fn generate_named(name: &str, raw: &str, options: &EncodeOptions) -> Encoding {
    match name.parse::<Symbology>() {
        Ok(symbology) => generate_with(symbology, raw, options),
        Err(err) => {
            warn!("Unknown symbology name {:?}", name);
            Encoding {
                symbology: Symbology::Unspecified,
                raw_data: raw.to_string(),
                pattern: Pattern::new(),
                kind: PatternKind::Modules,
                label: String::new(),
                errors: vec![err],
                country: None,
                encoding_time: Duration::ZERO,
            }
        }
    }
}

/// A reusable encoder that keeps its options and the latest result.
#[derive(Clone, Debug, Default)]
pub struct Barcode {
    pub options: EncodeOptions,
    last: Option<Encoding>,
}

impl Barcode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            options,
            last: None,
        }
    }

    /// Encodes and stores the result, replacing the previous one.
    pub fn encode(&mut self, symbology: Symbology, raw: &str) -> &Encoding {
        let encoding = generate_with(symbology, raw, &self.options);
        self.last.insert(encoding)
    }

    pub fn encode_named(&mut self, name: &str, raw: &str) -> &Encoding {
        let encoding = generate_named(name, raw, &self.options);
        self.last.insert(encoding)
    }

    /// The most recent result, if anything was encoded.
    pub fn last(&self) -> Option<&Encoding> {
        self.last.as_ref()
    }
}
