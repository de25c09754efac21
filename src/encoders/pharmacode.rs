//! Laetus Pharmacode: a number from 3 to 131070 drawn as thin and thick bars.

use super::{fail_if_any, numeric, Encoded, Encoder};
use crate::error::{EncodeError, EncodeResult};
use crate::pattern::Pattern;
use crate::symbology::Symbology;

pub const MIN: u32 = 3;
pub const MAX: u32 = 131_070;

pub struct Pharmacode;

/// Bars from left to right, `true` for thick.
fn bars(mut n: u32) -> Vec<bool> {
    let mut out = Vec::new();
    while n > 0 {
        if n % 2 == 0 {
            out.push(true);
            n = (n - 2) / 2;
        } else {
            out.push(false);
            n = (n - 1) / 2;
        }
    }
    out.reverse();
    out
}

impl Encoder for Pharmacode {
    fn symbology(&self) -> Symbology {
        Symbology::Pharmacode
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        numeric(Symbology::Pharmacode, data, &mut errors);
        let n = data.chars().count();
        if n == 0 || n > 6 {
            errors.push(EncodeError::length(Symbology::Pharmacode, n, "1 to 6 digits"));
        }
        fail_if_any(errors)?;
        match data.parse::<u32>() {
            Ok(v) if (MIN..=MAX).contains(&v) => Ok(()),
            _ => Err(vec![EncodeError::data(
                Symbology::Pharmacode,
                format!("value must be between {} and {}", MIN, MAX),
            )]),
        }
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let value = data
            .parse::<u32>()
            .map_err(|e| vec![EncodeError::data(Symbology::Pharmacode, e.to_string())])?;
        let mut p = Pattern::new();
        for (i, thick) in bars(value).into_iter().enumerate() {
            if i > 0 {
                p.append_space(2);
            }
            p.append_bar(if thick { 3 } else { 1 });
        }
        Ok(Encoded::modules(p, value.to_string(), None))
    }
}
