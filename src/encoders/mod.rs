//! Symbology encoders.
//!
//! Every symbology maps to one [`Encoder`] through [`encoder_for`]. An
//! encoder validates its input, computes or verifies check characters,
//! looks its patterns up in [`crate::tables`] and returns an [`Encoded`]
//! symbol, or every error it found.

mod codabar;
mod code11;
mod code128;
mod code39;
mod code93;
mod fim;
mod msi;
mod pharmacode;
mod postnet;
mod supplemental;
mod telepen;
mod two_of_five;
mod upc_ean;

pub use codabar::Codabar;
pub use code11::Code11;
pub use code128::{Code128, Subset};
pub use code39::Code39;
pub use code93::Code93;
pub use fim::Fim;
pub use msi::Msi;
pub use pharmacode::Pharmacode;
pub use postnet::PostNet;
pub use supplemental::UpcSupplemental;
pub use telepen::Telepen;
pub use two_of_five::{Layout, TwoOfFive};
pub use upc_ean::{Bookland, Ean, UpcE};

use crate::checksum::MsiCheck;
use crate::error::{EncodeError, EncodeResult};
use crate::options::{CheckDigitPolicy, EncodeOptions};
use crate::pattern::{Pattern, PatternKind};
use crate::symbology::Symbology;

/// An encoded symbol.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Encoded {
    pub pattern: Pattern,
    pub kind: PatternKind,
    /// The human-readable payload, without printed check characters.
    pub data: String,
    /// Check characters printed after the payload, if the symbology prints any.
    pub check: Option<String>,
}

impl Encoded {
    pub(crate) fn modules(pattern: Pattern, data: impl Into<String>, check: Option<String>) -> Self {
        Self {
            pattern,
            kind: PatternKind::Modules,
            data: data.into(),
            check,
        }
    }

    /// Payload followed by its printed check characters.
    pub fn text(&self) -> String {
        match &self.check {
            Some(check) => format!("{}{}", self.data, check),
            None => self.data.clone(),
        }
    }
}

/// The `{validate, encode}` capability every symbology implements.
///
/// Encoders hold only configuration, so one instance can serve any number
/// of threads.
pub trait Encoder: Send + Sync {
    fn symbology(&self) -> Symbology;

    /// Checks alphabet and length rules without building a pattern.
    fn validate(&self, data: &str) -> EncodeResult<()>;

    /// Validates `data` and encodes it. On failure no pattern is returned.
    fn encode(&self, data: &str) -> EncodeResult<Encoded>;
}

/// Returns the encoder for `symbology`, configured from `options`.
///
/// # Errors
///
/// [`EncodeError::UnsupportedSymbology`] for [`Symbology::Unspecified`].
pub fn encoder_for(
    symbology: Symbology,
    options: &EncodeOptions,
) -> Result<Box<dyn Encoder>, EncodeError> {
    use Symbology as S;
    let policy = options.check_digit_policy;
    let pad = options.pad_odd_length;
    let two_of_five = |layout, mod10| -> Box<dyn Encoder> {
        Box::new(TwoOfFive::new(symbology, layout, mod10, policy, pad))
    };
    let encoder: Box<dyn Encoder> = match symbology {
        S::Unspecified => {
            return Err(EncodeError::UnsupportedSymbology(symbology.name().to_string()))
        }
        S::UpcA | S::Ucc12 | S::Ean13 | S::Ucc13 | S::Jan13 | S::Ean8 => {
            Box::new(Ean::new(symbology, policy))
        }
        S::UpcE => Box::new(UpcE::new(policy)),
        S::Bookland | S::Isbn => Box::new(Bookland::new(symbology, policy)),
        S::UpcSupplemental2Digit | S::UpcSupplemental5Digit => {
            Box::new(UpcSupplemental::new(symbology))
        }
        S::Interleaved2of5 => two_of_five(Layout::Interleaved, false),
        S::Interleaved2of5Mod10 => two_of_five(Layout::Interleaved, true),
        S::Standard2of5 => two_of_five(Layout::Standard, false),
        S::Standard2of5Mod10 => two_of_five(Layout::Standard, true),
        S::Industrial2of5 => two_of_five(Layout::Industrial, false),
        S::Industrial2of5Mod10 => two_of_five(Layout::Industrial, true),
        S::Itf14 => Box::new(TwoOfFive::itf14(policy)),
        S::Code39 => Box::new(Code39::new(symbology, false, false, policy)),
        S::Code39Extended => Box::new(Code39::new(symbology, true, false, policy)),
        S::Code39Mod43 | S::Logmars => Box::new(Code39::new(symbology, false, true, policy)),
        S::Code93 => Box::new(Code93),
        S::Code128 => Box::new(Code128::new(symbology, Subset::Auto)),
        S::Code128A => Box::new(Code128::new(symbology, Subset::A)),
        S::Code128B => Box::new(Code128::new(symbology, Subset::B)),
        S::Code128C => Box::new(Code128::new(symbology, Subset::C)),
        S::Codabar => Box::new(Codabar),
        S::MsiMod10 => Box::new(Msi::new(symbology, MsiCheck::Mod10, policy)),
        S::Msi2Mod10 => Box::new(Msi::new(symbology, MsiCheck::DoubleMod10, policy)),
        S::MsiMod11 => Box::new(Msi::new(symbology, MsiCheck::Mod11, policy)),
        S::MsiMod11Mod10 => Box::new(Msi::new(symbology, MsiCheck::Mod11Mod10, policy)),
        S::ModifiedPlessey => Box::new(Msi::new(symbology, MsiCheck::None, policy)),
        S::Code11 | S::Usd8 => Box::new(Code11::new(symbology, policy)),
        S::PostNet => Box::new(PostNet::new(policy)),
        S::Telepen => Box::new(Telepen),
        S::Fim => Box::new(Fim),
        S::Pharmacode => Box::new(Pharmacode),
    };
    Ok(encoder)
}

/// Collects an `UnsupportedCharacter` for every character of `data`
/// rejected by `allowed`.
pub(crate) fn check_alphabet(
    symbology: Symbology,
    data: &str,
    allowed: impl Fn(char) -> bool,
    errors: &mut Vec<EncodeError>,
) {
    errors.extend(
        data.chars()
            .enumerate()
            .filter(|(_, c)| !allowed(*c))
            .map(|(i, c)| EncodeError::character(symbology, c, i)),
    );
}

pub(crate) fn numeric(symbology: Symbology, data: &str, errors: &mut Vec<EncodeError>) {
    check_alphabet(symbology, data, |c| c.is_ascii_digit(), errors);
}

pub(crate) fn fail_if_any(errors: Vec<EncodeError>) -> EncodeResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Resolves a fixed-length payload whose last position may hold a
/// caller-supplied check digit. `data` holds `len` or `len + 1` digits.
/// Returns the payload digits and the check digit to encode.
pub(crate) fn fixed_check(
    symbology: Symbology,
    policy: CheckDigitPolicy,
    digits: &[u8],
    len: usize,
    compute: impl Fn(&[u8]) -> Result<u8, EncodeError>,
) -> EncodeResult<(Vec<u8>, u8)> {
    let payload = &digits[..len];
    let computed = compute(payload).map_err(|e| vec![e.retag(symbology)])?;
    if let (Some(&supplied), CheckDigitPolicy::Verify) = (digits.get(len), policy) {
        if supplied != computed {
            return Err(vec![EncodeError::ChecksumMismatch {
                symbology,
                supplied: supplied.to_string(),
                computed: computed.to_string(),
            }]);
        }
    }
    Ok((payload.to_vec(), computed))
}

/// Splits caller-supplied trailing check characters off `input` and
/// confirms them. `lengths` lists the possible check lengths, shortest
/// first; `compute` produces the check string for a payload.
///
/// `input` must already be validated as ASCII.
pub(crate) fn verify_trailing(
    symbology: Symbology,
    input: &str,
    lengths: &[usize],
    compute: impl Fn(&str) -> Result<String, EncodeError>,
) -> EncodeResult<(String, String)> {
    for &len in lengths {
        if input.len() <= len {
            continue;
        }
        let (data, supplied) = input.split_at(input.len() - len);
        let computed = compute(data).map_err(|e| vec![e.retag(symbology)])?;
        if computed == supplied {
            return Ok((data.to_string(), computed));
        }
    }
    let len = lengths.first().copied().unwrap_or(1);
    if input.len() <= len {
        return Err(vec![EncodeError::length(
            symbology,
            input.len(),
            "payload followed by its check characters",
        )]);
    }
    let (data, supplied) = input.split_at(input.len() - len);
    let computed = compute(data).map_err(|e| vec![e.retag(symbology)])?;
    Err(vec![EncodeError::ChecksumMismatch {
        symbology,
        supplied: supplied.to_string(),
        computed,
    }])
}

/// Converts a validated ASCII digit string into digit values.
pub(crate) fn to_digits(data: &str) -> Vec<u8> {
    data.bytes().map(|b| b - b'0').collect()
}

pub(crate) fn digit_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_symbology_has_an_encoder() {
        let options = EncodeOptions::default();
        for sym in Symbology::ALL {
            let encoder = encoder_for(sym, &options).unwrap();
            assert_eq!(encoder.symbology(), sym);
        }
        assert!(matches!(
            encoder_for(Symbology::Unspecified, &options),
            Err(EncodeError::UnsupportedSymbology(_))
        ));
    }

    #[test]
    fn test_check_alphabet_collects_every_bad_character() {
        let mut errors = Vec::new();
        numeric(Symbology::UpcA, "1a2b", &mut errors);
        assert_eq!(
            errors,
            vec![
                EncodeError::character(Symbology::UpcA, 'a', 1),
                EncodeError::character(Symbology::UpcA, 'b', 3),
            ]
        );
    }

    #[test]
    fn test_fixed_check_policies() {
        let digits = to_digits("123456789013");
        let (payload, check) = fixed_check(
            Symbology::UpcA,
            CheckDigitPolicy::Recompute,
            &digits,
            11,
            crate::checksum::weighted_mod10,
        )
        .unwrap();
        assert_eq!(payload.len(), 11);
        assert_eq!(check, 2);

        let err = fixed_check(
            Symbology::UpcA,
            CheckDigitPolicy::Verify,
            &digits,
            11,
            crate::checksum::weighted_mod10,
        )
        .unwrap_err();
        assert!(matches!(err[0], EncodeError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_verify_trailing_tries_each_length() {
        let compute = |d: &str| -> Result<String, EncodeError> {
            Ok(if d.len() % 2 == 0 { "10".to_string() } else { "7".to_string() })
        };
        let (data, check) = verify_trailing(Symbology::MsiMod11, "123410", &[1, 2], compute).unwrap();
        assert_eq!((data.as_str(), check.as_str()), ("1234", "10"));
        let err = verify_trailing(Symbology::MsiMod11, "12345", &[1, 2], compute).unwrap_err();
        assert!(matches!(err[0], EncodeError::ChecksumMismatch { .. }));
    }
}
