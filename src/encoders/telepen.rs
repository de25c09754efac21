//! Telepen: full ASCII, each byte sent least significant bit first with an
//! even parity bit, framed by `_` and `z` with a mod 127 check character.

use super::{check_alphabet, fail_if_any, Encoded, Encoder};
use crate::checksum;
use crate::error::{EncodeError, EncodeResult};
use crate::pattern::Pattern;
use crate::symbology::Symbology;

const START: u8 = b'_';
const STOP: u8 = b'z';

pub struct Telepen;

fn with_parity(b: u8) -> u8 {
    if b.count_ones() % 2 == 1 {
        b | 0x80
    } else {
        b
    }
}

/// Turns the bit stream into element widths:
/// `1` is narrow bar and space, `00` is wide bar and narrow space, and
/// `0 1..1 0` with n ones is a wide bar, n - 1 narrow pairs and a wide space.
fn widths(bits: &[bool]) -> Result<String, EncodeError> {
    let mut out = String::with_capacity(bits.len() * 2);
    let mut i = 0;
    while i < bits.len() {
        if bits[i] {
            out.push_str("11");
            i += 1;
            continue;
        }
        let ones = bits[i + 1..].iter().take_while(|&&b| b).count();
        if i + 1 + ones >= bits.len() {
            return Err(EncodeError::data(Symbology::Telepen, "unbalanced zero bit in bit stream"));
        }
        if ones == 0 {
            out.push_str("31");
        } else {
            out.push('3');
            out.push_str(&"11".repeat(ones - 1));
            out.push('3');
        }
        i += ones + 2;
    }
    Ok(out)
}

impl Encoder for Telepen {
    fn symbology(&self) -> Symbology {
        Symbology::Telepen
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        if data.is_empty() {
            errors.push(EncodeError::length(Symbology::Telepen, 0, "at least one character"));
        }
        check_alphabet(Symbology::Telepen, data, |c| c.is_ascii(), &mut errors);
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let check = checksum::telepen(data.as_bytes());
        let bytes = std::iter::once(START)
            .chain(data.bytes())
            .chain([check, STOP]);
        let bits: Vec<bool> = bytes
            .map(with_parity)
            .flat_map(|b| (0..8).map(move |k| b >> k & 1 == 1))
            .collect();

        let mut widths = widths(&bits).map_err(|e| vec![e])?;
        // The stream always ends on a space; the symbol ends on the last bar.
        widths.pop();
        let mut p = Pattern::new();
        p.append_widths(&widths);
        Ok(Encoded::modules(p, data, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_tokens() {
        assert_eq!(widths(&[true]).unwrap(), "11");
        assert_eq!(widths(&[false, false]).unwrap(), "31");
        assert_eq!(widths(&[false, true, false]).unwrap(), "33");
        assert_eq!(widths(&[false, true, true, false]).unwrap(), "3113");
        assert!(widths(&[true, false]).is_err());
    }

    #[test]
    fn test_start_character_and_frame() {
        let out = Telepen.encode("A").unwrap();
        let s = out.pattern.as_str();
        // '_' is 1111101 then 0: five narrow pairs, then wide bar and wide space.
        assert!(s.starts_with("1010101010111000"));
        assert!(s.ends_with('1'));
        assert_eq!(out.text(), "A");
    }

    #[test]
    fn test_all_ascii_encodes() {
        let data: String = (0u8..128).map(char::from).collect();
        assert!(Telepen.encode(&data).is_ok());
        assert!(Telepen.encode("\u{80}").is_err());
    }
}
