//! Code 93 with full-ASCII shifts and its two mandatory check characters.

use super::{check_alphabet, fail_if_any, Encoded, Encoder};
use crate::checksum::code93_checks;
use crate::error::{EncodeError, EncodeResult};
use crate::pattern::Pattern;
use crate::symbology::Symbology;
use crate::tables::{code93_shift, ASCII_ESCAPES, CODE93, CODE93_START_STOP};

pub struct Code93;

/// Maps input to Code 93 symbol values. Characters outside the native set
/// become a shift symbol plus a letter.
fn values(data: &str) -> Result<Vec<usize>, EncodeError> {
    let mut out = Vec::with_capacity(data.len());
    for (i, c) in data.chars().enumerate() {
        if let Some(v) = CODE93.value(c) {
            out.push(v);
            continue;
        }
        let escape = ASCII_ESCAPES
            .get(c as usize)
            .ok_or_else(|| EncodeError::character(Symbology::Code93, c, i))?;
        for (j, e) in escape.chars().enumerate() {
            let symbol = if j == 0 { code93_shift(e).unwrap_or(e) } else { e };
            let v = CODE93
                .value(symbol)
                .ok_or_else(|| EncodeError::character(Symbology::Code93, c, i))?;
            out.push(v);
        }
    }
    Ok(out)
}

impl Encoder for Code93 {
    fn symbology(&self) -> Symbology {
        Symbology::Code93
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        if data.is_empty() {
            errors.push(EncodeError::length(Symbology::Code93, 0, "at least one character"));
        }
        check_alphabet(Symbology::Code93, data, |c| c.is_ascii(), &mut errors);
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let mut symbols = values(data).map_err(|e| vec![e])?;
        let (c, k) = code93_checks(&symbols);
        symbols.push(c);
        symbols.push(k);

        let mut p = Pattern::with_capacity((symbols.len() + 2) * 9 + 1);
        p.append_bits(CODE93_START_STOP);
        for v in symbols {
            let bits = CODE93
                .pattern_at(v)
                .ok_or_else(|| vec![EncodeError::data(Symbology::Code93, "symbol value out of range")])?;
            p.append_bits(bits);
        }
        p.append_bits(CODE93_START_STOP);
        p.append_bar(1);
        Ok(Encoded::modules(p, data, None))
    }
}
