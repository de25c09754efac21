//! Code 11 (USD-8): digits and dash with C and K checks.

use super::{check_alphabet, fail_if_any, verify_trailing, Encoded, Encoder};
use crate::checksum::code11_checks;
use crate::error::{EncodeError, EncodeResult};
use crate::options::CheckDigitPolicy;
use crate::pattern::Pattern;
use crate::symbology::Symbology;
use crate::tables::{lookup, CODE11, CODE11_START_STOP};

pub struct Code11 {
    symbology: Symbology,
    policy: CheckDigitPolicy,
}

impl Code11 {
    pub fn new(symbology: Symbology, policy: CheckDigitPolicy) -> Self {
        Self { symbology, policy }
    }

    fn checks(&self, data: &str) -> Result<String, EncodeError> {
        let values = data
            .chars()
            .enumerate()
            .map(|(i, c)| {
                CODE11
                    .value(c)
                    .ok_or_else(|| EncodeError::character(self.symbology, c, i))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let (c, k) = code11_checks(&values);
        [Some(c), k]
            .into_iter()
            .flatten()
            .map(|v| {
                CODE11
                    .char_at(v)
                    .ok_or_else(|| EncodeError::data(self.symbology, "check value out of range"))
            })
            .collect()
    }
}

impl Encoder for Code11 {
    fn symbology(&self) -> Symbology {
        self.symbology
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        if data.is_empty() {
            errors.push(EncodeError::length(self.symbology, 0, "at least one character"));
        }
        check_alphabet(self.symbology, data, |c| CODE11.contains(c), &mut errors);
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let (data, check) = match self.policy {
            CheckDigitPolicy::Recompute => {
                let check = self.checks(data).map_err(|e| vec![e])?;
                (data.to_string(), check)
            }
            CheckDigitPolicy::Verify => {
                verify_trailing(self.symbology, data, &[1, 2], |d| self.checks(d))?
            }
        };

        let mut p = Pattern::new();
        p.append_bits(CODE11_START_STOP);
        for c in data.chars().chain(check.chars()) {
            p.append_space(1);
            p.append_bits(lookup(self.symbology, c).map_err(|e| vec![e])?);
        }
        p.append_space(1);
        p.append_bits(CODE11_START_STOP);
        Ok(Encoded::modules(p, data, Some(check)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_check_only_below_ten() {
        let out = Code11::new(Symbology::Code11, CheckDigitPolicy::Recompute)
            .encode("123-45")
            .unwrap();
        assert_eq!(out.text(), "123-455");
        assert_eq!(out.pattern.len(), 7 + 48 + 8 + 7);
        assert!(out.pattern.as_str().starts_with("10110010"));
    }

    #[test]
    fn test_k_check_from_ten_characters() {
        let out = Code11::new(Symbology::Usd8, CheckDigitPolicy::Recompute)
            .encode("1234567890")
            .unwrap();
        assert_eq!(out.check.as_ref().map(String::len), Some(2));
        let verify = Code11::new(Symbology::Usd8, CheckDigitPolicy::Verify);
        assert_eq!(verify.encode(&out.text()).unwrap(), out);
    }

    #[test]
    fn test_rejects_letters() {
        let errs = Code11::new(Symbology::Code11, CheckDigitPolicy::Recompute)
            .encode("12A")
            .unwrap_err();
        assert_eq!(errs, vec![EncodeError::character(Symbology::Code11, 'A', 2)]);
    }
}
