//! Static symbology tables.
//!
//! Binary strings are module sequences (`'1'` bar, `'0'` space). Code 128
//! entries are element widths (bar, space, bar, ...), and the 2-of-5 digit
//! table lists narrow/wide elements which each 2-of-5 variant lays out in
//! its own way. Nothing here is mutated at runtime.

use crate::error::EncodeError;
use crate::symbology::Symbology;

/// A character-keyed pattern table. The index of an entry is the
/// character's symbol value where the symbology defines one.
pub struct CharTable {
    entries: &'static [(char, &'static str)],
}

impl CharTable {
    pub const fn new(entries: &'static [(char, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, c: char) -> Option<&'static str> {
        self.entries.iter().find(|(k, _)| *k == c).map(|(_, p)| *p)
    }

    /// Symbol value (table index) of `c`.
    pub fn value(&self, c: char) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == c)
    }

    pub fn pattern_at(&self, value: usize) -> Option<&'static str> {
        self.entries.get(value).map(|(_, p)| *p)
    }

    /// Character with symbol value `value`.
    pub fn char_at(&self, value: usize) -> Option<char> {
        self.entries.get(value).map(|(c, _)| *c)
    }

    pub fn contains(&self, c: char) -> bool {
        self.value(c).is_some()
    }
}

/// Looks up the bar pattern of one character for a character-keyed symbology.
///
/// Symbologies whose tables are keyed by symbol value (Code 128) or by
/// digit and parity (UPC/EAN, 2 of 5) have no character table and report
/// the character as unsupported; their encoders use the typed accessors below.
pub fn lookup(symbology: Symbology, c: char) -> Result<&'static str, EncodeError> {
    use Symbology::*;
    let table = match symbology {
        Code39 | Code39Mod43 | Code39Extended | Logmars => Some(&CODE39),
        Code93 => Some(&CODE93),
        Codabar => Some(&CODABAR),
        Code11 | Usd8 => Some(&CODE11),
        PostNet => Some(&POSTNET),
        Fim => Some(&FIM),
        MsiMod10 | Msi2Mod10 | MsiMod11 | MsiMod11Mod10 | ModifiedPlessey => Some(&MSI),
        _ => None,
    };
    table
        .and_then(|t| t.get(c))
        .ok_or_else(|| EncodeError::character(symbology, c, 0))
}

/// Which UPC/EAN digit code set a digit is drawn from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Parity {
    /// Odd parity, left half.
    L,
    /// Even parity, left half (EAN-13, UPC-E and add-ons).
    G,
    /// Right half.
    R,
}

impl Parity {
    fn from_letter(letter: u8) -> Parity {
        match letter {
            b'G' => Parity::G,
            b'R' => Parity::R,
            _ => Parity::L,
        }
    }
}

const L_CODES: [&str; 10] = [
    "0001101", "0011001", "0010011", "0111101", "0100011",
    "0110001", "0101111", "0111011", "0110111", "0001011",
];

const G_CODES: [&str; 10] = [
    "0100111", "0110011", "0011011", "0100001", "0011101",
    "0111001", "0000101", "0010001", "0001001", "0010111",
];

const R_CODES: [&str; 10] = [
    "1110010", "1100110", "1101100", "1000010", "1011100",
    "1001110", "1010000", "1000100", "1001000", "1110100",
];

/// Seven-module code of `digit` (0-9) in the given parity set.
pub fn ean_digit(parity: Parity, digit: u8) -> &'static str {
    let d = usize::from(digit);
    match parity {
        Parity::L => L_CODES[d],
        Parity::G => G_CODES[d],
        Parity::R => R_CODES[d],
    }
}

pub const EAN_START: &str = "101";
pub const EAN_MIDDLE: &str = "01010";
pub const EAN_STOP: &str = "101";
pub const UPCE_STOP: &str = "010101";
pub const ADDON_START: &str = "1011";
pub const ADDON_SEPARATOR: &str = "01";

/// Left-half parity of an EAN-13 symbol, keyed by the leading digit.
const EAN13_PARITY: [&str; 10] = [
    "LLLLLL", "LLGLGG", "LLGGLG", "LLGGGL", "LGLLGG",
    "LGGLLG", "LGGGLL", "LGLGLG", "LGLGGL", "LGGLGL",
];

/// UPC-E parity for number system 0, keyed by check digit. Number system 1
/// uses the complement.
const UPCE_PARITY: [&str; 10] = [
    "GGGLLL", "GGLGLL", "GGLLGL", "GGLLLG", "GLGGLL",
    "GLLGGL", "GLLLGG", "GLGLGL", "GLGLLG", "GLLGLG",
];

const ADDON2_PARITY: [&str; 4] = ["LL", "LG", "GL", "GG"];

const ADDON5_PARITY: [&str; 10] = [
    "GGLLL", "GLGLL", "GLLGL", "GLLLG", "LGGLL",
    "LLGGL", "LLLGG", "LGLGL", "LGLLG", "LLGLG",
];

fn parities(letters: &'static str) -> impl Iterator<Item = Parity> {
    letters.bytes().map(Parity::from_letter)
}

pub fn ean13_parity(first_digit: u8) -> impl Iterator<Item = Parity> {
    parities(EAN13_PARITY[usize::from(first_digit)])
}

pub fn upce_parity(number_system: u8, check: u8) -> impl Iterator<Item = Parity> {
    let flip = number_system == 1;
    parities(UPCE_PARITY[usize::from(check)]).map(move |p| match (flip, p) {
        (true, Parity::G) => Parity::L,
        (true, Parity::L) => Parity::G,
        (_, p) => p,
    })
}

pub fn addon2_parity(value: u8) -> impl Iterator<Item = Parity> {
    parities(ADDON2_PARITY[usize::from(value % 4)])
}

pub fn addon5_parity(check: u8) -> impl Iterator<Item = Parity> {
    parities(ADDON5_PARITY[usize::from(check)])
}

/// Narrow (`N`) / wide (`W`) elements of each digit, shared by every 2-of-5
/// variant.
pub const TWO_OF_FIVE: [&str; 10] = [
    "NNWWN", "WNNNW", "NWNNW", "WWNNN", "NNWNW",
    "WNWNN", "NWWNN", "NNNWW", "WNNWN", "NWNWN",
];

pub const CODE39: CharTable = CharTable::new(&[
    ('0', "101001101101"), ('1', "110100101011"), ('2', "101100101011"),
    ('3', "110110010101"), ('4', "101001101011"), ('5', "110100110101"),
    ('6', "101100110101"), ('7', "101001011011"), ('8', "110100101101"),
    ('9', "101100101101"), ('A', "110101001011"), ('B', "101101001011"),
    ('C', "110110100101"), ('D', "101011001011"), ('E', "110101100101"),
    ('F', "101101100101"), ('G', "101010011011"), ('H', "110101001101"),
    ('I', "101101001101"), ('J', "101011001101"), ('K', "110101010011"),
    ('L', "101101010011"), ('M', "110110101001"), ('N', "101011010011"),
    ('O', "110101101001"), ('P', "101101101001"), ('Q', "101010110011"),
    ('R', "110101011001"), ('S', "101101011001"), ('T', "101011011001"),
    ('U', "110010101011"), ('V', "100110101011"), ('W', "110011010101"),
    ('X', "100101101011"), ('Y', "110010110101"), ('Z', "100110110101"),
    ('-', "100101011011"), ('.', "110010101101"), (' ', "100110101101"),
    ('$', "100100100101"), ('/', "100100101001"), ('+', "100101001001"),
    ('%', "101001001001"), ('*', "100101101101"),
]);

pub const CODE39_GUARD: char = '*';

/// Code 39 full-ASCII escapes, indexed by ASCII code. Code 93 reuses it with
/// its own shift characters.
pub const ASCII_ESCAPES: [&str; 128] = [
    "%U", "$A", "$B", "$C", "$D", "$E", "$F", "$G",
    "$H", "$I", "$J", "$K", "$L", "$M", "$N", "$O",
    "$P", "$Q", "$R", "$S", "$T", "$U", "$V", "$W",
    "$X", "$Y", "$Z", "%A", "%B", "%C", "%D", "%E",
    " ", "/A", "/B", "/C", "/D", "/E", "/F", "/G",
    "/H", "/I", "/J", "/K", "/L", "-", ".", "/O",
    "0", "1", "2", "3", "4", "5", "6", "7",
    "8", "9", "/Z", "%F", "%G", "%H", "%I", "%J",
    "%V", "A", "B", "C", "D", "E", "F", "G",
    "H", "I", "J", "K", "L", "M", "N", "O",
    "P", "Q", "R", "S", "T", "U", "V", "W",
    "X", "Y", "Z", "%K", "%L", "%M", "%N", "%O",
    "%W", "+A", "+B", "+C", "+D", "+E", "+F", "+G",
    "+H", "+I", "+J", "+K", "+L", "+M", "+N", "+O",
    "+P", "+Q", "+R", "+S", "+T", "+U", "+V", "+W",
    "+X", "+Y", "+Z", "%P", "%Q", "%R", "%S", "%T",
];

/// Code 93 by symbol value. Values 43-46 are the shift characters
/// `($)`, `(%)`, `(/)`, `(+)`, stored under the private-use stand-ins
/// returned by [`code93_shift`].
pub const CODE93: CharTable = CharTable::new(&[
    ('0', "100010100"), ('1', "101001000"), ('2', "101000100"),
    ('3', "101000010"), ('4', "100101000"), ('5', "100100100"),
    ('6', "100100010"), ('7', "101010000"), ('8', "100010010"),
    ('9', "100001010"), ('A', "110101000"), ('B', "110100100"),
    ('C', "110100010"), ('D', "110010100"), ('E', "110010010"),
    ('F', "110001010"), ('G', "101101000"), ('H', "101100100"),
    ('I', "101100010"), ('J', "100110100"), ('K', "100011010"),
    ('L', "101011000"), ('M', "101001100"), ('N', "101000110"),
    ('O', "100101100"), ('P', "100010110"), ('Q', "110110100"),
    ('R', "110110010"), ('S', "110101100"), ('T', "110100110"),
    ('U', "110010110"), ('V', "110011010"), ('W', "101101100"),
    ('X', "101100110"), ('Y', "100110110"), ('Z', "100111010"),
    ('-', "100101110"), ('.', "111010100"), (' ', "111010010"),
    ('$', "111001010"), ('/', "101101110"), ('+', "101110110"),
    ('%', "110101110"), ('\u{E000}', "100100110"), ('\u{E001}', "111011010"),
    ('\u{E002}', "111010110"), ('\u{E003}', "100110010"),
]);

pub const CODE93_START_STOP: &str = "101011110";

/// Maps a Code 39 shift character to the Code 93 shift symbol stand-in.
pub fn code93_shift(c: char) -> Option<char> {
    match c {
        '$' => Some('\u{E000}'),
        '%' => Some('\u{E001}'),
        '/' => Some('\u{E002}'),
        '+' => Some('\u{E003}'),
        _ => None,
    }
}

/// Code 128 element widths by symbol value: 0-102 data and control values,
/// 103-105 start A/B/C, 106 stop (including the termination bar).
pub const CODE128_WIDTHS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312",
    "132212", "221213", "221312", "231212", "112232", "122132", "122231", "113222",
    "123122", "123221", "223211", "221132", "221231", "213212", "223112", "312131",
    "311222", "321122", "321221", "312212", "322112", "322211", "212123", "212321",
    "232121", "111323", "131123", "131321", "112313", "132113", "132311", "211313",
    "231113", "231311", "112133", "112331", "132131", "113123", "113321", "133121",
    "313121", "211331", "231131", "213113", "213311", "213131", "311123", "311321",
    "331121", "312113", "312311", "332111", "314111", "221411", "431111", "111224",
    "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111",
    "111242", "121142", "121241", "114212", "124112", "124211", "411212", "421112",
    "421211", "212141", "214121", "412121", "111143", "111341", "131141", "114113",
    "114311", "411113", "411311", "113141", "114131", "311141", "411131", "211412",
    "211214", "211232", "2331112",
];

pub const CODE128_START_A: u8 = 103;
pub const CODE128_START_B: u8 = 104;
pub const CODE128_START_C: u8 = 105;
pub const CODE128_STOP: u8 = 106;
pub const CODE128_CODE_C: u8 = 99;
/// "Code B" in subsets A and C.
pub const CODE128_CODE_B: u8 = 100;
/// "Code A" in subsets B and C.
pub const CODE128_CODE_A: u8 = 101;

pub const CODABAR: CharTable = CharTable::new(&[
    ('0', "101010011"), ('1', "101011001"), ('2', "101001011"),
    ('3', "110010101"), ('4', "101101001"), ('5', "110101001"),
    ('6', "100101011"), ('7', "100101101"), ('8', "100110101"),
    ('9', "110100101"), ('-', "101001101"), ('$', "101100101"),
    (':', "1101011011"), ('/', "1101101011"), ('.', "1101101101"),
    ('+', "1011011011"), ('A', "1011001001"), ('B', "1001001011"),
    ('C', "1010010011"), ('D', "1010011001"),
]);

/// Code 11 by symbol value; `-` is 10.
pub const CODE11: CharTable = CharTable::new(&[
    ('0', "101011"), ('1', "1101011"), ('2', "1001011"), ('3', "1100101"),
    ('4', "1011011"), ('5', "1101101"), ('6', "1001101"), ('7', "1010011"),
    ('8', "1101001"), ('9', "110101"), ('-', "101101"),
]);

pub const CODE11_START_STOP: &str = "1011001";

/// PostNet digits: `'1'` full bar, `'0'` half bar.
pub const POSTNET: CharTable = CharTable::new(&[
    ('0', "11000"), ('1', "00011"), ('2', "00101"), ('3', "00110"), ('4', "01001"),
    ('5', "01010"), ('6', "01100"), ('7', "10001"), ('8', "10010"), ('9', "10100"),
]);

/// Facing Identification Marks: bar (`1`) or blank (`0`) at each of the
/// nine positions.
pub const FIM: CharTable = CharTable::new(&[
    ('A', "110010011"),
    ('B', "101101101"),
    ('C', "110101011"),
    ('D', "111010111"),
]);

/// MSI digits, four bits each: bit 1 is `110`, bit 0 is `100`.
pub const MSI: CharTable = CharTable::new(&[
    ('0', "100100100100"), ('1', "100100100110"), ('2', "100100110100"),
    ('3', "100100110110"), ('4', "100110100100"), ('5', "100110100110"),
    ('6', "100110110100"), ('7', "100110110110"), ('8', "110100100100"),
    ('9', "110100100110"),
]);

pub const MSI_START: &str = "110";
pub const MSI_STOP: &str = "1001";

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_width(table: &CharTable, count: usize, modules: usize) {
        for i in 0..count {
            let p = table.pattern_at(i).unwrap();
            assert_eq!(p.len(), modules, "entry {} has wrong width", i);
        }
    }

    #[test]
    fn test_fixed_width_tables() {
        assert_width(&CODE39, 44, 12);
        assert_width(&CODE93, 47, 9);
        assert_width(&MSI, 10, 12);
        assert_width(&POSTNET, 10, 5);
        for codes in [L_CODES, G_CODES, R_CODES] {
            assert!(codes.iter().all(|c| c.len() == 7));
        }
    }

    #[test]
    fn test_code128_widths_sum_to_eleven() {
        for (value, widths) in CODE128_WIDTHS.iter().enumerate() {
            let sum: u32 = widths.bytes().map(|b| u32::from(b - b'0')).sum();
            let expected = if value == usize::from(CODE128_STOP) { 13 } else { 11 };
            assert_eq!(sum, expected, "value {}", value);
        }
    }

    #[test]
    fn test_code39_has_three_wide_elements() {
        for i in 0..44 {
            let p = CODE39.pattern_at(i).unwrap();
            assert_eq!(p.matches("11").count() + p.matches("00").count(), 3);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(Symbology::Code39, '*').unwrap(), "100101101101");
        assert_eq!(lookup(Symbology::Codabar, 'A').unwrap(), "1011001001");
        assert_eq!(
            lookup(Symbology::Code39, 'a'),
            Err(EncodeError::character(Symbology::Code39, 'a', 0))
        );
        assert!(lookup(Symbology::Code128, 'A').is_err());
    }

    #[test]
    fn test_parity_tables() {
        let p: Vec<_> = ean13_parity(0).collect();
        assert!(p.iter().all(|p| *p == Parity::L));
        let ns1: Vec<_> = upce_parity(1, 0).collect();
        assert_eq!(ns1, vec![Parity::L, Parity::L, Parity::L, Parity::G, Parity::G, Parity::G]);
    }
}
