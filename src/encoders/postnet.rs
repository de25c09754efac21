//! USPS PostNet: ZIP, ZIP+4 and delivery point codes drawn as full and
//! half height bars.

use super::{digit_string, fail_if_any, fixed_check, numeric, to_digits, Encoded, Encoder};
use crate::checksum;
use crate::error::{EncodeError, EncodeResult};
use crate::options::CheckDigitPolicy;
use crate::pattern::{Pattern, PatternKind};
use crate::symbology::Symbology;
use crate::tables::lookup;

pub struct PostNet {
    policy: CheckDigitPolicy,
}

impl PostNet {
    pub fn new(policy: CheckDigitPolicy) -> Self {
        Self { policy }
    }
}

impl Encoder for PostNet {
    fn symbology(&self) -> Symbology {
        Symbology::PostNet
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        numeric(Symbology::PostNet, data, &mut errors);
        let n = data.chars().count();
        if !matches!(n, 5 | 6 | 9 | 10 | 11 | 12) {
            errors.push(EncodeError::length(
                Symbology::PostNet,
                n,
                "5, 9 or 11 digits, optionally followed by the check digit",
            ));
        }
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let digits = to_digits(data);
        let len = match digits.len() {
            6 | 10 | 12 => digits.len() - 1,
            n => n,
        };
        let (payload, check) =
            fixed_check(Symbology::PostNet, self.policy, &digits, len, checksum::postnet)?;

        // Each character is one bar: '1' full height, '0' half height.
        let mut p = Pattern::with_capacity(len * 5 + 7);
        p.append_bar(1);
        let drawn = payload.iter().chain(std::iter::once(&check));
        for &d in drawn {
            p.append_bits(lookup(Symbology::PostNet, char::from(b'0' + d)).map_err(|e| vec![e])?);
        }
        p.append_bar(1);
        Ok(Encoded {
            pattern: p,
            kind: PatternKind::HeightModulated,
            data: digit_string(&payload),
            check: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip5() {
        let out = PostNet::new(CheckDigitPolicy::Recompute).encode("55555").unwrap();
        assert_eq!(out.kind, PatternKind::HeightModulated);
        assert_eq!(out.pattern.len(), 32);
        assert!(out.pattern.as_str().starts_with("101010"));
        // Check 5, then the closing frame bar.
        assert!(out.pattern.as_str().ends_with("010101"));
        assert_eq!(out.text(), "55555");
    }

    #[test]
    fn test_supplied_check() {
        let enc = PostNet::new(CheckDigitPolicy::Verify);
        assert!(enc.encode("555555").is_ok());
        assert!(matches!(
            enc.encode("555554").unwrap_err()[0],
            EncodeError::ChecksumMismatch { .. }
        ));
        assert_eq!(enc.encode("123456789").unwrap().pattern.len(), 52);
    }

    #[test]
    fn test_bad_length() {
        assert!(matches!(
            PostNet::new(CheckDigitPolicy::Recompute).encode("1234").unwrap_err()[0],
            EncodeError::InvalidLength { actual: 4, .. }
        ));
    }
}
