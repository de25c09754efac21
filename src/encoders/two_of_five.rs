//! 2 of 5 family: interleaved, standard (matrix) and industrial layouts of
//! the same narrow/wide digit table, plus ITF-14.

use super::{
    digit_string, fail_if_any, fixed_check, numeric, to_digits, verify_trailing, Encoded, Encoder,
};
use crate::checksum::{self, weighted_mod10};
use crate::error::{EncodeError, EncodeResult};
use crate::options::CheckDigitPolicy;
use crate::pattern::Pattern;
use crate::symbology::Symbology;
use crate::tables::TWO_OF_FIVE;

/// How the five narrow/wide elements of a digit are laid out.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Layout {
    /// Digit pairs: the first on bars, the second on the spaces between
    /// them. Wide is two modules.
    Interleaved,
    /// Matrix 2 of 5: the elements alternate bar and space, then a narrow
    /// space closes the character. Wide is three modules.
    Standard,
    /// Every element is a bar followed by a narrow space. Wide is three
    /// modules.
    Industrial,
}

impl Layout {
    fn wide(self) -> usize {
        match self {
            Layout::Interleaved => 2,
            Layout::Standard | Layout::Industrial => 3,
        }
    }

    fn start(self) -> &'static str {
        match self {
            Layout::Interleaved => "1111",
            Layout::Standard => "411111",
            Layout::Industrial => "313111",
        }
    }

    fn stop(self) -> &'static str {
        match self {
            Layout::Interleaved => "211",
            Layout::Standard => "41111",
            Layout::Industrial => "31113",
        }
    }
}

pub struct TwoOfFive {
    symbology: Symbology,
    layout: Layout,
    mod10: bool,
    policy: CheckDigitPolicy,
    pad_odd: bool,
    /// Fixed payload length (ITF-14).
    fixed: Option<usize>,
}

impl TwoOfFive {
    pub fn new(
        symbology: Symbology,
        layout: Layout,
        mod10: bool,
        policy: CheckDigitPolicy,
        pad_odd: bool,
    ) -> Self {
        Self {
            symbology,
            layout,
            mod10,
            policy,
            pad_odd,
            fixed: None,
        }
    }

    /// ITF-14: thirteen digits plus a mod 10 check, interleaved.
    pub fn itf14(policy: CheckDigitPolicy) -> Self {
        Self {
            symbology: Symbology::Itf14,
            layout: Layout::Interleaved,
            mod10: true,
            policy,
            pad_odd: false,
            fixed: Some(13),
        }
    }

    /// Digits that will be drawn for `n` input digits.
    fn drawn_len(&self, n: usize) -> usize {
        match (self.mod10, self.policy) {
            (true, CheckDigitPolicy::Recompute) => n + 1,
            _ => n,
        }
    }

    fn width(&self, element: u8) -> usize {
        if element == b'W' {
            self.layout.wide()
        } else {
            1
        }
    }

    fn draw(&self, digits: &[u8]) -> Pattern {
        let mut p = Pattern::new();
        p.append_widths(self.layout.start());
        match self.layout {
            Layout::Interleaved => {
                for pair in digits.chunks(2) {
                    let bars = TWO_OF_FIVE[usize::from(pair[0])].bytes();
                    let spaces = TWO_OF_FIVE[usize::from(pair[1])].bytes();
                    for (b, s) in bars.zip(spaces) {
                        p.append_bar(self.width(b));
                        p.append_space(self.width(s));
                    }
                }
            }
            Layout::Standard => {
                for &d in digits {
                    for (i, e) in TWO_OF_FIVE[usize::from(d)].bytes().enumerate() {
                        if i % 2 == 0 {
                            p.append_bar(self.width(e));
                        } else {
                            p.append_space(self.width(e));
                        }
                    }
                    p.append_space(1);
                }
            }
            Layout::Industrial => {
                for &d in digits {
                    for e in TWO_OF_FIVE[usize::from(d)].bytes() {
                        p.append_bar(self.width(e));
                        p.append_space(1);
                    }
                }
            }
        }
        p.append_widths(self.layout.stop());
        p
    }
}

impl Encoder for TwoOfFive {
    fn symbology(&self) -> Symbology {
        self.symbology
    }

    fn validate(&self, data: &str) -> EncodeResult<()> {
        let mut errors = Vec::new();
        numeric(self.symbology, data, &mut errors);
        let n = data.chars().count();
        match self.fixed {
            Some(len) if n != len && n != len + 1 => {
                errors.push(EncodeError::length(self.symbology, n, "13 or 14 digits"));
            }
            Some(_) => {}
            None if n == 0 => {
                errors.push(EncodeError::length(self.symbology, n, "at least one digit"));
            }
            None if self.layout == Layout::Interleaved
                && !self.pad_odd
                && self.drawn_len(n) % 2 == 1 =>
            {
                errors.push(EncodeError::length(
                    self.symbology,
                    n,
                    "an even number of digits including the check digit",
                ));
            }
            None => {}
        }
        fail_if_any(errors)
    }

    fn encode(&self, data: &str) -> EncodeResult<Encoded> {
        self.validate(data)?;
        let (mut payload, check) = match self.fixed {
            Some(len) => {
                let (payload, check) =
                    fixed_check(self.symbology, self.policy, &to_digits(data), len, weighted_mod10)?;
                (digit_string(&payload), Some(check.to_string()))
            }
            None if !self.mod10 => (data.to_string(), None),
            None => match self.policy {
                CheckDigitPolicy::Recompute => {
                    let check = weighted_mod10(&to_digits(data))
                        .map_err(|e| vec![e.retag(self.symbology)])?;
                    (data.to_string(), Some(check.to_string()))
                }
                CheckDigitPolicy::Verify => {
                    let (payload, check) = verify_trailing(self.symbology, data, &[1], |d| {
                        Ok(weighted_mod10(&checksum::digits(d)?)?.to_string())
                    })?;
                    (payload, Some(check))
                }
            },
        };
        let check_len = check.as_ref().map_or(0, String::len);
        if self.layout == Layout::Interleaved && (payload.len() + check_len) % 2 == 1 {
            payload.insert(0, '0');
        }

        let mut digits = to_digits(&payload);
        if let Some(check) = &check {
            digits.extend(to_digits(check));
        }
        Ok(Encoded::modules(self.draw(&digits), payload, check))
    }
}
