//! Codabar. Data is framed by guard characters `A`-`D`; the alternate
//! guard names `T`, `N`, `*` and `E` are accepted and either case works.

use super::{fail_if_any, Encoded, Encoder};
use crate::error::{EncodeError, EncodeResult};
use crate::pattern::Pattern;
use crate::symbology::Symbology;
use crate::tables::{lookup, CODABAR};

pub struct Codabar;

fn guard(c: char) -> Option<char> {
    match c.to_ascii_uppercase() {
        'A' | 'T' => Some('A'),
        'B' | 'N' => Some('B'),
        'C' | '*' => Some('C'),
        'D' | 'E' => Some('D'),
        _ => None,
    }
}

fn is_body(c: char) -> bool {
    guard(c).is_none() && CODABAR.contains(c)
}

impl Encoder for Codabar {
    fn symbology(&self) -> Symbology {
        Symbology::Codabar
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        let chars: Vec<char> = data.chars().collect();
        if chars.len() < 3 {
            errors.push(EncodeError::length(
                Symbology::Codabar,
                chars.len(),
                "a start guard, at least one character and a stop guard",
            ));
            return Err(errors);
        }
        let last = chars.len() - 1;
        if guard(chars[0]).is_none() || guard(chars[last]).is_none() {
            errors.push(EncodeError::data(
                Symbology::Codabar,
                "data must start and end with a guard A, B, C or D",
            ));
        }
        errors.extend(
            chars[1..last]
                .iter()
                .enumerate()
                .filter(|(_, c)| !is_body(**c))
                .map(|(i, &c)| EncodeError::character(Symbology::Codabar, c, i + 1)),
        );
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let last = data.chars().count() - 1;
        let mut p = Pattern::new();
        for (i, c) in data.chars().enumerate() {
            let symbol = if i == 0 || i == last { guard(c).unwrap_or(c) } else { c };
            if i > 0 {
                p.append_space(1);
            }
            p.append_bits(
                lookup(Symbology::Codabar, symbol)
                    .map_err(|_| vec![EncodeError::character(Symbology::Codabar, c, i)])?,
            );
        }
        Ok(Encoded::modules(p, data, None))
    }
}
