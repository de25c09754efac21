//! Code 39, its mod 43 variant (also LOGMARS) and full-ASCII extension.

use super::{check_alphabet, fail_if_any, verify_trailing, Encoded, Encoder};
use crate::checksum::mod43;
use crate::error::{EncodeError, EncodeResult};
use crate::options::CheckDigitPolicy;
use crate::pattern::Pattern;
use crate::symbology::Symbology;
use crate::tables::{lookup, ASCII_ESCAPES, CODE39, CODE39_GUARD};

pub struct Code39 {
    symbology: Symbology,
    extended: bool,
    mod43: bool,
    policy: CheckDigitPolicy,
}

impl Code39 {
    pub fn new(symbology: Symbology, extended: bool, mod43: bool, policy: CheckDigitPolicy) -> Self {
        Self {
            symbology,
            extended,
            mod43,
            policy,
        }
    }

    fn allowed(&self, c: char) -> bool {
        if self.extended {
            c.is_ascii()
        } else {
            c != CODE39_GUARD && CODE39.contains(c)
        }
    }

    /// Rewrites full-ASCII input as native Code 39 characters.
    fn symbols(&self, data: &str) -> String {
        if self.extended {
            data.bytes().map(|b| ASCII_ESCAPES[usize::from(b)]).collect()
        } else {
            data.to_string()
        }
    }

    fn check_char(&self, symbols: &str) -> Result<String, EncodeError> {
        let values = symbols
            .chars()
            .enumerate()
            .map(|(i, c)| {
                CODE39
                    .value(c)
                    .ok_or_else(|| EncodeError::character(self.symbology, c, i))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CODE39
            .char_at(mod43(&values))
            .map(String::from)
            .ok_or_else(|| EncodeError::data(self.symbology, "mod 43 value out of range"))
    }
}

impl Encoder for Code39 {
    fn symbology(&self) -> Symbology {
        self.symbology
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        if data.is_empty() {
            errors.push(EncodeError::length(self.symbology, 0, "at least one character"));
        }
        check_alphabet(self.symbology, data, |c| self.allowed(c), &mut errors);
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let (data, check) = match (self.mod43, self.policy) {
            (false, _) => (data.to_string(), None),
            (true, CheckDigitPolicy::Recompute) => {
                let check = self.check_char(data).map_err(|e| vec![e])?;
                (data.to_string(), Some(check))
            }
            (true, CheckDigitPolicy::Verify) => {
                let (data, check) = verify_trailing(self.symbology, data, &[1], |d| self.check_char(d))?;
                (data, Some(check))
            }
        };

        let mut symbols = self.symbols(&data);
        if let Some(check) = &check {
            symbols.push_str(check);
        }
        let mut p = Pattern::with_capacity((symbols.len() + 2) * 13);
        p.append_bits(CODE39.get(CODE39_GUARD).unwrap_or_default());
        for c in symbols.chars() {
            p.append_space(1);
            p.append_bits(lookup(self.symbology, c).map_err(|e| vec![e])?);
        }
        p.append_space(1);
        p.append_bits(CODE39.get(CODE39_GUARD).unwrap_or_default());
        Ok(Encoded::modules(p, data, check))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code39() -> Code39 {
        Code39::new(Symbology::Code39, false, false, CheckDigitPolicy::Recompute)
    }

    #[test]
    fn test_hello() {
        let out = code39().encode("HELLO").unwrap();
        let star = "100101101101";
        let s = out.pattern.as_str();
        assert_eq!(s.len(), 7 * 12 + 6);
        assert!(s.starts_with(star));
        assert!(s.ends_with(star));
        assert_eq!(&s[12..13], "0");
        assert_eq!(&s[13..25], "110101001101");
        assert!(out.check.is_none());
    }

    #[test]
    fn test_rejects_lowercase_and_guard() {
        let errs = code39().encode("a*B").unwrap_err();
        assert_eq!(
            errs,
            vec![
                EncodeError::character(Symbology::Code39, 'a', 0),
                EncodeError::character(Symbology::Code39, '*', 1),
            ]
        );
        assert!(code39().encode("").is_err());
    }

    #[test]
    fn test_mod43_check() {
        let enc = Code39::new(Symbology::Logmars, false, true, CheckDigitPolicy::Recompute);
        let out = enc.encode("HELLO").unwrap();
        // Sum 97, 97 % 43 = 11 -> 'B'.
        assert_eq!(out.check.as_deref(), Some("B"));
        assert_eq!(out.pattern.len(), 8 * 12 + 7);

        let verify = Code39::new(Symbology::Code39Mod43, false, true, CheckDigitPolicy::Verify);
        assert_eq!(verify.encode("HELLOB").unwrap().data, "HELLO");
        assert!(matches!(
            verify.encode("HELLOC").unwrap_err()[0],
            EncodeError::ChecksumMismatch { .. }
        ));
    }

    #[test]
    fn test_extended_escapes() {
        let enc = Code39::new(Symbology::Code39Extended, true, false, CheckDigitPolicy::Recompute);
        let out = enc.encode("a").unwrap();
        // 'a' is "+A": guard, two symbols, guard.
        assert_eq!(out.pattern.len(), 4 * 12 + 3);
        assert_eq!(out.data, "a");
        assert!(enc.encode("é").is_err());
    }
}
