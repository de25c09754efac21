//! Facing Identification Marks for business reply mail.

use super::{Encoded, Encoder};
use crate::error::{EncodeError, EncodeResult};
use crate::pattern::Pattern;
use crate::symbology::Symbology;
use crate::tables::lookup;

pub struct Fim;

impl Encoder for Fim {
    fn symbology(&self) -> Symbology {
        Symbology::Fim
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut chars = data.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => lookup(Symbology::Fim, c.to_ascii_uppercase())
                .map(|_| ())
                .map_err(|e| vec![e]),
            _ => Err(vec![EncodeError::length(
                Symbology::Fim,
                data.chars().count(),
                "a single letter A, B, C or D",
            )]),
        }
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let letter = data.to_ascii_uppercase();
        let bits = letter
            .chars()
            .next()
            .map(|c| lookup(Symbology::Fim, c))
            .transpose()
            .map_err(|e| vec![e])?
            .unwrap_or_default();

        // Nine positions, one blank module between neighbours.
        let mut p = Pattern::with_capacity(17);
        for (i, b) in bits.bytes().enumerate() {
            if i > 0 {
                p.append_space(1);
            }
            if b == b'1' {
                p.append_bar(1);
            } else {
                p.append_space(1);
            }
        }
        Ok(Encoded::modules(p, letter, None))
    }
}
