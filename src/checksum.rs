//! Check digit and check character algorithms.
//!
//! Every function is pure. The numeric families take digit slices (values
//! 0-9) and reject empty or out-of-range input with
//! [`EncodeError::InvalidChecksumInput`] instead of coercing it.

use crate::error::EncodeError;

/// Converts an ASCII digit string into digit values.
///
/// # Errors
///
/// [`EncodeError::InvalidChecksumInput`] if `s` is empty or holds a non-digit.
pub fn digits(s: &str) -> Result<Vec<u8>, EncodeError> {
    if s.is_empty() {
        return Err(EncodeError::InvalidChecksumInput("empty input".into()));
    }
    s.chars()
        .map(|c| {
            c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                EncodeError::InvalidChecksumInput(format!("non-digit character {:?}", c))
            })
        })
        .collect()
}

fn ensure_digits(d: &[u8]) -> Result<(), EncodeError> {
    if d.is_empty() {
        return Err(EncodeError::InvalidChecksumInput("empty input".into()));
    }
    match d.iter().find(|&&v| v > 9) {
        Some(v) => Err(EncodeError::InvalidChecksumInput(format!("{} is not a digit", v))),
        None => Ok(()),
    }
}

/// GS1 mod 10: weights 3 and 1 alternate starting with 3 on the rightmost
/// digit; the check digit brings the sum up to a multiple of ten.
///
/// Used by UPC-A, UPC-E (over the expanded UPC-A), EAN-13, EAN-8, ITF-14,
/// Bookland and the 2-of-5 mod 10 variants.
///
/// # Example
///
/// ```rust
/// use barcode_standard::checksum::weighted_mod10;
///
/// assert_eq!(weighted_mod10(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1]).unwrap(), 2);
/// ```
pub fn weighted_mod10(d: &[u8]) -> Result<u8, EncodeError> {
    ensure_digits(d)?;
    let sum: u32 = d
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &v)| u32::from(v) * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    Ok(((10 - sum % 10) % 10) as u8)
}

/// Check value of the UPC 5-digit add-on, used only to pick its parity.
pub fn upc_addon5(d: &[u8]) -> Result<u8, EncodeError> {
    ensure_digits(d)?;
    let sum: u32 = d
        .iter()
        .enumerate()
        .map(|(i, &v)| u32::from(v) * if i % 2 == 0 { 3 } else { 9 })
        .sum();
    Ok((sum % 10) as u8)
}

/// Luhn mod 10 as used by MSI: every second digit from the right, starting
/// with the rightmost, is doubled and its digits summed.
pub fn luhn_mod10(d: &[u8]) -> Result<u8, EncodeError> {
    ensure_digits(d)?;
    let sum: u32 = d
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &v)| {
            let v = u32::from(v);
            if i % 2 == 0 {
                let doubled = v * 2;
                doubled / 10 + doubled % 10
            } else {
                v
            }
        })
        .sum();
    Ok(((10 - sum % 10) % 10) as u8)
}

/// MSI mod 11 with IBM weights 2..=7 repeating from the right. The result
/// is in `0..=10`; a value of 10 is printed as the two digits `10`.
pub fn msi_mod11(d: &[u8]) -> Result<u8, EncodeError> {
    ensure_digits(d)?;
    let sum: u32 = d
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &v)| u32::from(v) * (2 + (i as u32 % 6)))
        .sum();
    Ok(((11 - sum % 11) % 11) as u8)
}

/// The check schemes available to MSI.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MsiCheck {
    /// Modified Plessey: no check digit.
    None,
    Mod10,
    /// Mod 10 applied twice; the second pass covers the first check digit.
    DoubleMod10,
    Mod11,
    /// Mod 11 followed by mod 10 over the data and the mod 11 check.
    Mod11Mod10,
}

impl MsiCheck {
    /// Computes the check digits appended after `data`.
    pub fn compute(self, data: &[u8]) -> Result<Vec<u8>, EncodeError> {
        let mut work = data.to_vec();
        let mut out = Vec::new();
        let mut push = |work: &mut Vec<u8>, value: u8| {
            let ds: Vec<u8> = if value >= 10 { vec![1, 0] } else { vec![value] };
            work.extend_from_slice(&ds);
            out.extend_from_slice(&ds);
        };
        match self {
            MsiCheck::None => ensure_digits(data)?,
            MsiCheck::Mod10 => {
                let c = luhn_mod10(&work)?;
                push(&mut work, c);
            }
            MsiCheck::DoubleMod10 => {
                let c = luhn_mod10(&work)?;
                push(&mut work, c);
                let c = luhn_mod10(&work)?;
                push(&mut work, c);
            }
            MsiCheck::Mod11 => {
                let c = msi_mod11(&work)?;
                push(&mut work, c);
            }
            MsiCheck::Mod11Mod10 => {
                let c = msi_mod11(&work)?;
                push(&mut work, c);
                let c = luhn_mod10(&work)?;
                push(&mut work, c);
            }
        }
        Ok(out)
    }
}

/// Code 39 mod 43 over symbol values.
pub fn mod43(values: &[usize]) -> usize {
    values.iter().sum::<usize>() % 43
}

/// Sum of `values` weighted 1, 2, .., `max_weight`, 1, 2, .. from the
/// rightmost value, reduced modulo `modulus`. Code 93 and Code 11 checks.
pub fn weighted_from_right(values: &[usize], max_weight: usize, modulus: usize) -> usize {
    values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &v)| v * (i % max_weight + 1))
        .sum::<usize>()
        % modulus
}

/// Code 93 C and K check values.
pub fn code93_checks(values: &[usize]) -> (usize, usize) {
    let c = weighted_from_right(values, 20, 47);
    let mut with_c = values.to_vec();
    with_c.push(c);
    let k = weighted_from_right(&with_c, 15, 47);
    (c, k)
}

/// Code 11 C check and, for data of ten characters or more, K check.
/// Values are 0-9 for digits and 10 for `-`.
pub fn code11_checks(values: &[usize]) -> (usize, Option<usize>) {
    let c = weighted_from_right(values, 10, 11);
    if values.len() < 10 {
        return (c, None);
    }
    let mut with_c = values.to_vec();
    with_c.push(c);
    (c, Some(weighted_from_right(&with_c, 9, 11)))
}

/// Running Code 128 mod 103 checksum. The start code has weight 1, and each
/// following symbol value, including subset switches, gets the next weight.
#[derive(Clone, Copy, Debug)]
pub struct Code128Checksum {
    sum: u32,
    weight: u32,
}

impl Code128Checksum {
    pub fn new(start: u8) -> Self {
        Self {
            sum: u32::from(start),
            weight: 1,
        }
    }

    pub fn push(&mut self, value: u8) {
        self.sum += u32::from(value) * self.weight;
        self.weight += 1;
    }

    pub fn value(&self) -> u8 {
        (self.sum % 103) as u8
    }
}

/// PostNet: the check digit brings the digit sum to a multiple of ten.
pub fn postnet(d: &[u8]) -> Result<u8, EncodeError> {
    ensure_digits(d)?;
    let sum: u32 = d.iter().map(|&v| u32::from(v)).sum();
    Ok(((10 - sum % 10) % 10) as u8)
}

/// Telepen: 127 minus the ASCII sum modulo 127, with 127 folded to 0.
pub fn telepen(bytes: &[u8]) -> u8 {
    let sum: u32 = bytes.iter().map(|&b| u32::from(b)).sum();
    let check = 127 - sum % 127;
    if check == 127 {
        0
    } else {
        check as u8
    }
}
