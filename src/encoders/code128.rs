//! Code 128 with fixed subsets A, B, C and an automatic mode that switches
//! between them.

use super::{check_alphabet, fail_if_any, Encoded, Encoder};
use crate::checksum::Code128Checksum;
use crate::error::{EncodeError, EncodeResult};
use crate::pattern::Pattern;
use crate::symbology::Symbology;
use crate::tables::{
    CODE128_CODE_A, CODE128_CODE_B, CODE128_CODE_C, CODE128_START_A, CODE128_START_B,
    CODE128_START_C, CODE128_STOP, CODE128_WIDTHS,
};

/// Code 128 character subset.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Subset {
    /// Pick and switch subsets to keep the symbol short.
    Auto,
    /// ASCII 0-95: upper case, digits, punctuation and control characters.
    A,
    /// ASCII 32-127: upper and lower case, digits and punctuation.
    B,
    /// Digit pairs 00-99.
    C,
}

impl Subset {
    fn start(self) -> u8 {
        match self {
            Subset::A => CODE128_START_A,
            Subset::C => CODE128_START_C,
            _ => CODE128_START_B,
        }
    }

    /// Symbol value of `b` in subset A or B.
    fn value(self, b: u8) -> Option<u8> {
        match self {
            Subset::A if b < 32 => Some(b + 64),
            Subset::A if b < 96 => Some(b - 32),
            Subset::B if (32..128).contains(&b) => Some(b - 32),
            _ => None,
        }
    }

    /// Code that switches from any other subset into this one.
    fn switch_code(self) -> u8 {
        match self {
            Subset::A => CODE128_CODE_A,
            Subset::C => CODE128_CODE_C,
            _ => CODE128_CODE_B,
        }
    }
}

pub struct Code128 {
    symbology: Symbology,
    subset: Subset,
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Digits at the front of `bytes`, counting at most `limit`.
fn digits_ahead(bytes: &[u8], limit: usize) -> usize {
    bytes.iter().take(limit).take_while(|b| b.is_ascii_digit()).count()
}

/// For every suffix of `bytes`: A when a control character comes before any
/// lower-case letter, else B. Built in one backward pass.
fn text_subsets(bytes: &[u8]) -> Vec<Subset> {
    let mut out = vec![Subset::B; bytes.len() + 1];
    for (i, &b) in bytes.iter().enumerate().rev() {
        out[i] = match b {
            0..=31 => Subset::A,
            96.. => Subset::B,
            _ => out[i + 1],
        };
    }
    out
}

fn pairs(digits: &[u8]) -> impl Iterator<Item = u8> + '_ {
    digits
        .chunks(2)
        .map(|pair| (pair[0] - b'0') * 10 + (pair[1] - b'0'))
}

impl Code128 {
    pub fn new(symbology: Symbology, subset: Subset) -> Self {
        Self { symbology, subset }
    }

    fn allowed(&self, c: char) -> bool {
        match self.subset {
            Subset::Auto => c.is_ascii(),
            Subset::A => u32::from(c) < 96,
            Subset::B => (32..128).contains(&u32::from(c)),
            Subset::C => c.is_ascii_digit(),
        }
    }

    /// Start code and data symbol values, switch codes included.
    fn symbols(&self, data: &str) -> Result<(u8, Vec<u8>), EncodeError> {
        let bytes = data.as_bytes();
        match self.subset {
            Subset::Auto => Ok(auto_symbols(bytes)),
            Subset::C => Ok((CODE128_START_C, pairs(bytes).collect())),
            subset => {
                let values = bytes
                    .iter()
                    .enumerate()
                    .map(|(i, &b)| {
                        subset
                            .value(b)
                            .ok_or_else(|| EncodeError::character(self.symbology, char::from(b), i))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((subset.start(), values))
            }
        }
    }
}

/// Automatic subset selection. Runs of four or more digits go to subset C;
/// an odd run first spends one digit in the current subset. Each digit run
/// is measured once, so the work stays linear in the input.
fn auto_symbols(bytes: &[u8]) -> (u8, Vec<u8>) {
    let text = text_subsets(bytes);
    let lead = digit_run(bytes);
    let mut set = if (lead >= 4 && lead % 2 == 0) || (lead == bytes.len() && lead >= 2 && lead % 2 == 0) {
        Subset::C
    } else {
        text[0]
    };
    let start = set.start();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if set == Subset::C {
            if digits_ahead(&bytes[i..], 2) == 2 {
                out.extend(pairs(&bytes[i..i + 2]));
                i += 2;
            } else {
                set = text[i];
                out.push(set.switch_code());
            }
            continue;
        }
        if digits_ahead(&bytes[i..], 4) == 4 {
            if digit_run(&bytes[i..]) % 2 == 1 {
                out.extend(set.value(bytes[i]));
                i += 1;
            }
            set = Subset::C;
            out.push(set.switch_code());
            continue;
        }
        match set.value(bytes[i]) {
            Some(v) => {
                out.push(v);
                i += 1;
            }
            None => {
                set = if set == Subset::A { Subset::B } else { Subset::A };
                out.push(set.switch_code());
            }
        }
    }
    (start, out)
}

impl Encoder for Code128 {
    fn symbology(&self) -> Symbology {
        self.symbology
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        if data.is_empty() {
            errors.push(EncodeError::length(self.symbology, 0, "at least one character"));
        }
        check_alphabet(self.symbology, data, |c| self.allowed(c), &mut errors);
        if self.subset == Subset::C && data.len() % 2 == 1 {
            errors.push(EncodeError::length(
                self.symbology,
                data.chars().count(),
                "an even number of digits",
            ));
        }
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let (start, values) = self.symbols(data).map_err(|e| vec![e])?;
        let mut checksum = Code128Checksum::new(start);
        for &v in &values {
            checksum.push(v);
        }

        let mut p = Pattern::with_capacity(11 * (values.len() + 2) + 13);
        let all = std::iter::once(start)
            .chain(values)
            .chain([checksum.value(), CODE128_STOP]);
        for v in all {
            p.append_widths(CODE128_WIDTHS[usize::from(v)]);
        }
        Ok(Encoded::modules(p, data, None))
    }
}
