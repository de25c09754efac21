//! UPC/EAN 2- and 5-digit add-on symbols.

use super::{fail_if_any, numeric, to_digits, Encoded, Encoder};
use crate::checksum::upc_addon5;
use crate::error::{EncodeError, EncodeResult};
use crate::pattern::Pattern;
use crate::symbology::Symbology;
use crate::tables::{self, ean_digit, Parity};

pub struct UpcSupplemental {
    symbology: Symbology,
}

impl UpcSupplemental {
    pub fn new(symbology: Symbology) -> Self {
        Self { symbology }
    }

    fn width(&self) -> usize {
        if self.symbology == Symbology::UpcSupplemental2Digit {
            2
        } else {
            5
        }
    }

    /// Symbology of the add-on for a digit string, if it has an add-on length.
    pub fn for_len(len: usize) -> Option<Self> {
        match len {
            2 => Some(Self::new(Symbology::UpcSupplemental2Digit)),
            5 => Some(Self::new(Symbology::UpcSupplemental5Digit)),
            _ => None,
        }
    }
}

impl Encoder for UpcSupplemental {
    fn symbology(&self) -> Symbology {
        self.symbology
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        numeric(self.symbology, data, &mut errors);
        let n = data.chars().count();
        if n != self.width() {
            let expected = if self.width() == 2 { "2 digits" } else { "5 digits" };
            errors.push(EncodeError::length(self.symbology, n, expected));
        }
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let digits = to_digits(data);
        let parity: Vec<Parity> = if digits.len() == 2 {
            tables::addon2_parity(digits[0] * 10 + digits[1]).collect()
        } else {
            let check = upc_addon5(&digits).map_err(|e| vec![e.retag(self.symbology)])?;
            tables::addon5_parity(check).collect()
        };

        let mut p = Pattern::with_capacity(47);
        p.append_bits(tables::ADDON_START);
        for (i, (&d, parity)) in digits.iter().zip(parity).enumerate() {
            if i > 0 {
                p.append_bits(tables::ADDON_SEPARATOR);
            }
            p.append_bits(ean_digit(parity, d));
        }
        Ok(Encoded::modules(p, data, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_digit_addon() {
        let out = UpcSupplemental::new(Symbology::UpcSupplemental2Digit)
            .encode("12")
            .unwrap();
        assert_eq!(out.pattern.len(), 20);
        // 12 % 4 == 0 selects LL.
        assert_eq!(out.pattern.as_str(), "10110011001010010011");
    }

    #[test]
    fn test_five_digit_addon() {
        let out = UpcSupplemental::new(Symbology::UpcSupplemental5Digit)
            .encode("52495")
            .unwrap();
        assert_eq!(out.pattern.len(), 47);
        assert!(out.pattern.as_str().starts_with("1011"));
        // Check value 1 selects GLGLL: leading 5 in G.
        assert_eq!(&out.pattern.as_str()[4..11], "0111001");
        assert!(out.check.is_none());
    }

    #[test]
    fn test_length_is_exact() {
        let err = UpcSupplemental::new(Symbology::UpcSupplemental5Digit)
            .encode("1234")
            .unwrap_err();
        assert!(matches!(err[0], EncodeError::InvalidLength { actual: 4, .. }));
        assert!(UpcSupplemental::for_len(3).is_none());
    }
}
