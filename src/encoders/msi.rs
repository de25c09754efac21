//! MSI (Modified Plessey) with its mod 10 and mod 11 check schemes.

use super::{digit_string, fail_if_any, numeric, verify_trailing, Encoded, Encoder};
use crate::checksum::{self, MsiCheck};
use crate::error::{EncodeError, EncodeResult};
use crate::options::CheckDigitPolicy;
use crate::pattern::Pattern;
use crate::symbology::Symbology;
use crate::tables::{lookup, MSI_START, MSI_STOP};

pub struct Msi {
    symbology: Symbology,
    check: MsiCheck,
    policy: CheckDigitPolicy,
}

impl Msi {
    pub fn new(symbology: Symbology, check: MsiCheck, policy: CheckDigitPolicy) -> Self {
        Self {
            symbology,
            check,
            policy,
        }
    }

    /// Possible printed check lengths, shortest first. A mod 11 value of 10
    /// prints as two digits.
    fn check_lengths(&self) -> &'static [usize] {
        match self.check {
            MsiCheck::None => &[],
            MsiCheck::Mod10 => &[1],
            MsiCheck::DoubleMod10 => &[2],
            MsiCheck::Mod11 => &[1, 2],
            MsiCheck::Mod11Mod10 => &[2, 3],
        }
    }

    fn compute(&self, data: &str) -> Result<String, EncodeError> {
        let check = self.check.compute(&checksum::digits(data)?)?;
        Ok(digit_string(&check))
    }
}

impl Encoder for Msi {
    fn symbology(&self) -> Symbology {
        self.symbology
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        if data.is_empty() {
            errors.push(EncodeError::length(self.symbology, 0, "at least one digit"));
        }
        numeric(self.symbology, data, &mut errors);
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let (data, check) = match (self.check, self.policy) {
            (MsiCheck::None, _) => (data.to_string(), None),
            (_, CheckDigitPolicy::Recompute) => {
                let check = self.compute(data).map_err(|e| vec![e.retag(self.symbology)])?;
                (data.to_string(), Some(check))
            }
            (_, CheckDigitPolicy::Verify) => {
                let (data, check) =
                    verify_trailing(self.symbology, data, self.check_lengths(), |d| self.compute(d))?;
                (data, Some(check))
            }
        };

        let mut p = Pattern::new();
        p.append_bits(MSI_START);
        let digits = data.chars().chain(check.iter().flat_map(|c| c.chars()));
        for c in digits {
            p.append_bits(lookup(self.symbology, c).map_err(|e| vec![e])?);
        }
        p.append_bits(MSI_STOP);
        Ok(Encoded::modules(p, data, check))
    }
}
