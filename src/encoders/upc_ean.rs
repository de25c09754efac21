//! UPC/EAN family: UPC-A, UCC-12, EAN-13, UCC-13, JAN-13, EAN-8, UPC-E and
//! the Bookland/ISBN mapping onto EAN-13.

use super::{digit_string, fail_if_any, fixed_check, numeric, to_digits, Encoded, Encoder};
use crate::checksum::weighted_mod10;
use crate::error::{EncodeError, EncodeResult};
use crate::options::CheckDigitPolicy;
use crate::pattern::Pattern;
use crate::symbology::Symbology;
use crate::tables::{self, ean_digit, Parity};

/// Draws a 13-digit EAN symbol (check included). UPC-A is the same symbol
/// with a leading zero.
pub(crate) fn ean13_pattern(full: &[u8]) -> Pattern {
    let mut p = Pattern::with_capacity(95);
    p.append_bits(tables::EAN_START);
    for (parity, &d) in tables::ean13_parity(full[0]).zip(&full[1..7]) {
        p.append_bits(ean_digit(parity, d));
    }
    p.append_bits(tables::EAN_MIDDLE);
    for &d in &full[7..13] {
        p.append_bits(ean_digit(Parity::R, d));
    }
    p.append_bits(tables::EAN_STOP);
    p
}

fn ean8_pattern(full: &[u8]) -> Pattern {
    let mut p = Pattern::with_capacity(67);
    p.append_bits(tables::EAN_START);
    for &d in &full[..4] {
        p.append_bits(ean_digit(Parity::L, d));
    }
    p.append_bits(tables::EAN_MIDDLE);
    for &d in &full[4..8] {
        p.append_bits(ean_digit(Parity::R, d));
    }
    p.append_bits(tables::EAN_STOP);
    p
}

/// UPC-A, UCC-12, EAN-13, UCC-13, JAN-13 and EAN-8.
///
/// Input is the payload with or without its check digit. Under
/// [`CheckDigitPolicy::Recompute`] a supplied check digit is replaced.
pub struct Ean {
    symbology: Symbology,
    policy: CheckDigitPolicy,
}

impl Ean {
    pub fn new(symbology: Symbology, policy: CheckDigitPolicy) -> Self {
        Self { symbology, policy }
    }

    fn payload_len(&self) -> usize {
        match self.symbology {
            Symbology::UpcA | Symbology::Ucc12 => 11,
            Symbology::Ean8 => 7,
            _ => 12,
        }
    }

    fn expected(&self) -> &'static str {
        match self.payload_len() {
            11 => "11 or 12 digits",
            7 => "7 or 8 digits",
            _ => "12 or 13 digits",
        }
    }
}

impl Encoder for Ean {
    fn symbology(&self) -> Symbology {
        self.symbology
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        numeric(self.symbology, data, &mut errors);
        let len = self.payload_len();
        let n = data.chars().count();
        if n != len && n != len + 1 {
            errors.push(EncodeError::length(self.symbology, n, self.expected()));
        }
        if self.symbology == Symbology::Jan13
            && !(data.starts_with("45") || data.starts_with("49"))
        {
            errors.push(EncodeError::data(self.symbology, "JAN-13 must start with 45 or 49"));
        }
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let len = self.payload_len();
        let digits = to_digits(data);
        let (payload, check) = fixed_check(self.symbology, self.policy, &digits, len, weighted_mod10)?;

        let mut full = Vec::with_capacity(13);
        if len == 11 {
            full.push(0);
        }
        full.extend_from_slice(&payload);
        full.push(check);
        let pattern = if len == 7 {
            ean8_pattern(&full)
        } else {
            ean13_pattern(&full)
        };
        Ok(Encoded::modules(
            pattern,
            digit_string(&payload),
            Some(check.to_string()),
        ))
    }
}

/// UPC-E, the zero-suppressed form of UPC-A.
///
/// Accepts the six UPC-E digits (number system 0), number system plus six
/// digits with or without check, or an 11/12-digit UPC-A that can be
/// compressed.
pub struct UpcE {
    policy: CheckDigitPolicy,
}

impl UpcE {
    pub fn new(policy: CheckDigitPolicy) -> Self {
        Self { policy }
    }

    /// Splits input into number system, six body digits and any supplied
    /// check digit.
    fn resolve(digits: &[u8]) -> EncodeResult<(u8, [u8; 6], Option<u8>)> {
        let mut body = [0u8; 6];
        let (ns, supplied) = match digits.len() {
            6 => {
                body.copy_from_slice(digits);
                (0, None)
            }
            7 | 8 => {
                body.copy_from_slice(&digits[1..7]);
                (digits[0], digits.get(7).copied())
            }
            _ => {
                body = compress(&digits[..11]).ok_or_else(|| {
                    vec![EncodeError::data(
                        Symbology::UpcE,
                        "UPC-A data cannot be zero-suppressed into UPC-E",
                    )]
                })?;
                (digits[0], digits.get(11).copied())
            }
        };
        if ns > 1 {
            return Err(vec![EncodeError::data(
                Symbology::UpcE,
                "UPC-E number system must be 0 or 1",
            )]);
        }
        Ok((ns, body, supplied))
    }
}

/// Applies the zero-suppression rules to an 11-digit UPC-A payload.
pub(crate) fn compress(upca: &[u8]) -> Option<[u8; 6]> {
    let (m, p) = (&upca[1..6], &upca[6..11]);
    if m[3..] == [0, 0] && m[2] <= 2 && p[..2] == [0, 0] {
        Some([m[0], m[1], p[2], p[3], p[4], m[2]])
    } else if m[3..] == [0, 0] && p[..3] == [0, 0, 0] {
        Some([m[0], m[1], m[2], p[3], p[4], 3])
    } else if m[4] == 0 && p[..4] == [0, 0, 0, 0] {
        Some([m[0], m[1], m[2], m[3], p[4], 4])
    } else if p[..4] == [0, 0, 0, 0] && p[4] >= 5 {
        Some([m[0], m[1], m[2], m[3], m[4], p[4]])
    } else {
        None
    }
}

/// Expands UPC-E body digits back to the 11-digit UPC-A payload.
pub(crate) fn expand(ns: u8, body: [u8; 6]) -> [u8; 11] {
    let [d1, d2, d3, d4, d5, d6] = body;
    let tail = match d6 {
        0..=2 => [d1, d2, d6, 0, 0, 0, 0, d3, d4, d5],
        3 => [d1, d2, d3, 0, 0, 0, 0, 0, d4, d5],
        4 => [d1, d2, d3, d4, 0, 0, 0, 0, 0, d5],
        _ => [d1, d2, d3, d4, d5, 0, 0, 0, 0, d6],
    };
    let mut out = [0u8; 11];
    out[0] = ns;
    out[1..].copy_from_slice(&tail);
    out
}

impl Encoder for UpcE {
    fn symbology(&self) -> Symbology {
        Symbology::UpcE
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        numeric(Symbology::UpcE, data, &mut errors);
        let n = data.chars().count();
        if !matches!(n, 6 | 7 | 8 | 11 | 12) {
            errors.push(EncodeError::length(Symbology::UpcE, n, "6, 7, 8, 11 or 12 digits"));
        }
        fail_if_any(errors)?;
        Self::resolve(&to_digits(data)).map(|_| ())
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let (ns, body, supplied) = Self::resolve(&to_digits(data))?;
        let upca = expand(ns, body);
        let check = weighted_mod10(&upca).map_err(|e| vec![e.retag(Symbology::UpcE)])?;
        if let (Some(s), CheckDigitPolicy::Verify) = (supplied, self.policy) {
            if s != check {
                return Err(vec![EncodeError::ChecksumMismatch {
                    symbology: Symbology::UpcE,
                    supplied: s.to_string(),
                    computed: check.to_string(),
                }]);
            }
        }

        let mut p = Pattern::with_capacity(51);
        p.append_bits(tables::EAN_START);
        for (parity, &d) in tables::upce_parity(ns, check).zip(&body) {
            p.append_bits(ean_digit(parity, d));
        }
        p.append_bits(tables::UPCE_STOP);

        let mut shown = vec![ns];
        shown.extend_from_slice(&body);
        Ok(Encoded::modules(p, digit_string(&shown), Some(check.to_string())))
    }
}

/// Bookland and ISBN: an ISBN-10 or 978/979 number drawn as EAN-13.
/// Hyphens and spaces are ignored.
pub struct Bookland {
    symbology: Symbology,
    policy: CheckDigitPolicy,
}

fn strip_separators(data: &str) -> String {
    data.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

/// ISBN-10 check character over nine digits.
pub(crate) fn isbn10_check(d: &[u8]) -> char {
    let sum: u32 = d
        .iter()
        .enumerate()
        .map(|(i, &v)| u32::from(v) * (10 - i as u32))
        .sum();
    match (11 - sum % 11) % 11 {
        10 => 'X',
        c => char::from(b'0' + c as u8),
    }
}

impl Bookland {
    pub fn new(symbology: Symbology, policy: CheckDigitPolicy) -> Self {
        Self { symbology, policy }
    }
}

impl Encoder for Bookland {
    fn symbology(&self) -> Symbology {
        self.symbology
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        let cleaned = strip_separators(data);
        let n = cleaned.chars().count();
        let mut k = 0;
        for (i, c) in data.chars().enumerate() {
            match c {
                '-' | ' ' => continue,
                '0'..='9' => {}
                'X' | 'x' if n == 10 && k == 9 => {}
                _ => errors.push(EncodeError::character(self.symbology, c, i)),
            }
            k += 1;
        }
        match n {
            9 | 10 => {}
            12 | 13 => {
                if !(cleaned.starts_with("978") || cleaned.starts_with("979")) {
                    errors.push(EncodeError::data(
                        self.symbology,
                        "13-digit ISBN must start with 978 or 979",
                    ));
                }
            }
            _ => errors.push(EncodeError::length(
                self.symbology,
                n,
                "9 or 10 ISBN-10 characters, or 12 or 13 digits",
            )),
        }
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let cleaned = strip_separators(data).to_ascii_uppercase();
        let ean = if cleaned.len() <= 10 {
            let body = &cleaned[..9];
            if let (Some(supplied), CheckDigitPolicy::Verify) = (cleaned.chars().nth(9), self.policy)
            {
                let computed = isbn10_check(&to_digits(body));
                if supplied != computed {
                    return Err(vec![EncodeError::ChecksumMismatch {
                        symbology: self.symbology,
                        supplied: supplied.to_string(),
                        computed: computed.to_string(),
                    }]);
                }
            }
            format!("978{}", body)
        } else {
            cleaned
        };
        Ean::new(Symbology::Ean13, self.policy)
            .encode(&ean)
            .map_err(|errors| errors.into_iter().map(|e| e.retag(self.symbology)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ean(sym: Symbology) -> Ean {
        Ean::new(sym, CheckDigitPolicy::Recompute)
    }

    #[test]
    fn test_upca() {
        let out = ean(Symbology::UpcA).encode("12345678901").unwrap();
        assert_eq!(out.text(), "123456789012");
        assert_eq!(out.pattern.len(), 95);
        assert!(out.pattern.as_str().starts_with("101"));
        assert!(out.pattern.as_str().ends_with("101"));
        assert_eq!(&out.pattern.as_str()[45..50], "01010");
        // Right half digit 2 in the R set.
        assert_eq!(&out.pattern.as_str()[85..92], "1101100");
    }

    #[test]
    fn test_upca_replaces_supplied_check() {
        let out = ean(Symbology::UpcA).encode("123456789019").unwrap();
        assert_eq!(out.check.as_deref(), Some("2"));
        let verify = Ean::new(Symbology::UpcA, CheckDigitPolicy::Verify);
        assert!(matches!(
            verify.encode("123456789019").unwrap_err()[0],
            EncodeError::ChecksumMismatch { .. }
        ));
        assert!(verify.encode("123456789012").is_ok());
    }

    #[test]
    fn test_ean13_parity_from_first_digit() {
        let out = ean(Symbology::Ean13).encode("400638133393").unwrap();
        assert_eq!(out.check.as_deref(), Some("1"));
        assert_eq!(out.pattern.len(), 95);
        // Leading 4 selects LGLLGG: 0 in L, then 0 in G.
        assert_eq!(&out.pattern.as_str()[3..10], "0001101");
        assert_eq!(&out.pattern.as_str()[10..17], "0100111");
    }

    #[test]
    fn test_ean8() {
        let out = ean(Symbology::Ean8).encode("9638507").unwrap();
        assert_eq!(out.text(), "96385074");
        assert_eq!(out.pattern.len(), 67);
    }

    #[test]
    fn test_collects_all_errors() {
        let errs = ean(Symbology::Ean13).encode("12a4").unwrap_err();
        assert_eq!(errs.len(), 2);
        assert!(matches!(errs[0], EncodeError::UnsupportedCharacter { position: 2, .. }));
        assert!(matches!(errs[1], EncodeError::InvalidLength { actual: 4, .. }));
    }

    #[test]
    fn test_jan13_prefix() {
        assert!(ean(Symbology::Jan13).encode("490123456789").is_ok());
        let errs = ean(Symbology::Jan13).encode("400638133393").unwrap_err();
        assert!(matches!(errs[0], EncodeError::InvalidData { .. }));
    }

    #[test]
    fn test_upce_compression() {
        assert_eq!(compress(&to_digits("04210000526")), Some([4, 2, 5, 2, 6, 1]));
        assert_eq!(expand(0, [4, 2, 5, 2, 6, 1]), to_digits("04210000526")[..]);
        assert_eq!(compress(&to_digits("12345678901")), None);
        for body in [[1, 2, 3, 4, 5, 0], [1, 2, 3, 4, 5, 3], [1, 2, 3, 4, 5, 4], [1, 2, 3, 4, 5, 7]] {
            assert_eq!(compress(&expand(0, body)), Some(body));
        }
    }

    #[test]
    fn test_upce_inputs_agree() {
        let upce = UpcE::new(CheckDigitPolicy::Recompute);
        let from_upca = upce.encode("04210000526").unwrap();
        assert_eq!(from_upca.text(), "04252614");
        assert_eq!(from_upca.pattern.len(), 51);
        assert!(from_upca.pattern.as_str().ends_with("010101"));
        // Check 4 with number system 0 selects GLGGLL: leading 4 in G.
        assert_eq!(&from_upca.pattern.as_str()[3..10], "0011101");
        assert_eq!(upce.encode("425261").unwrap(), from_upca);
        assert_eq!(upce.encode("0425261").unwrap(), from_upca);
        assert_eq!(upce.encode("04252614").unwrap(), from_upca);
    }

    #[test]
    fn test_upce_rejections() {
        let upce = UpcE::new(CheckDigitPolicy::Verify);
        assert!(matches!(
            upce.encode("2425261").unwrap_err()[0],
            EncodeError::InvalidData { .. }
        ));
        assert!(matches!(
            upce.encode("12345678901").unwrap_err()[0],
            EncodeError::InvalidData { .. }
        ));
        assert!(matches!(
            upce.encode("04252615").unwrap_err()[0],
            EncodeError::ChecksumMismatch { .. }
        ));
        assert!(matches!(
            upce.encode("12345").unwrap_err()[0],
            EncodeError::InvalidLength { .. }
        ));
    }

    #[test]
    fn test_bookland_from_isbn10() {
        let isbn = Bookland::new(Symbology::Isbn, CheckDigitPolicy::Recompute);
        let out = isbn.encode("0-306-40615-2").unwrap();
        assert_eq!(out.text(), "9780306406157");
        assert_eq!(out.pattern.len(), 95);
        assert_eq!(isbn.encode("978-0-306-40615-7").unwrap(), out);
        assert_eq!(isbn10_check(&[0, 8, 0, 4, 4, 2, 9, 5, 7]), 'X');
    }

    #[test]
    fn test_bookland_rejections() {
        let isbn = Bookland::new(Symbology::Bookland, CheckDigitPolicy::Verify);
        assert!(matches!(
            isbn.encode("0-306-40615-3").unwrap_err()[0],
            EncodeError::ChecksumMismatch { symbology: Symbology::Bookland, .. }
        ));
        assert!(matches!(
            isbn.encode("1234567890123").unwrap_err()[0],
            EncodeError::InvalidData { .. }
        ));
        assert!(matches!(
            isbn.encode("03X640615").unwrap_err()[0],
            EncodeError::UnsupportedCharacter { character: 'X', position: 2, .. }
        ));
        assert!(isbn.encode("080442957X").is_ok());
    }
}
