//! The closed set of supported barcode standards.

use core::fmt;
use core::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::EncodeError;

/// A barcode standard (symbology) selected by the caller.
///
/// `Unspecified` exists so that callers holding a "not yet chosen" value can
/// pass it through; the facade always rejects it with
/// [`EncodeError::UnsupportedSymbology`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub enum Symbology {
    #[default]
    Unspecified,
    UpcA,
    UpcE,
    UpcSupplemental2Digit,
    UpcSupplemental5Digit,
    Ean13,
    Ean8,
    Interleaved2of5,
    Interleaved2of5Mod10,
    Standard2of5,
    Standard2of5Mod10,
    Industrial2of5,
    Industrial2of5Mod10,
    Code39,
    Code39Extended,
    Code39Mod43,
    Codabar,
    PostNet,
    Bookland,
    Isbn,
    Jan13,
    MsiMod10,
    Msi2Mod10,
    MsiMod11,
    MsiMod11Mod10,
    ModifiedPlessey,
    Code11,
    Usd8,
    Ucc12,
    Ucc13,
    Logmars,
    Code128,
    Code128A,
    Code128B,
    Code128C,
    Itf14,
    Code93,
    Telepen,
    Fim,
    Pharmacode,
}

impl Symbology {
    /// Every encodable symbology, in declaration order. `Unspecified` is excluded.
    pub const ALL: [Symbology; 39] = [
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::UpcSupplemental2Digit,
        Symbology::UpcSupplemental5Digit,
        Symbology::Ean13,
        Symbology::Ean8,
        Symbology::Interleaved2of5,
        Symbology::Interleaved2of5Mod10,
        Symbology::Standard2of5,
        Symbology::Standard2of5Mod10,
        Symbology::Industrial2of5,
        Symbology::Industrial2of5Mod10,
        Symbology::Code39,
        Symbology::Code39Extended,
        Symbology::Code39Mod43,
        Symbology::Codabar,
        Symbology::PostNet,
        Symbology::Bookland,
        Symbology::Isbn,
        Symbology::Jan13,
        Symbology::MsiMod10,
        Symbology::Msi2Mod10,
        Symbology::MsiMod11,
        Symbology::MsiMod11Mod10,
        Symbology::ModifiedPlessey,
        Symbology::Code11,
        Symbology::Usd8,
        Symbology::Ucc12,
        Symbology::Ucc13,
        Symbology::Logmars,
        Symbology::Code128,
        Symbology::Code128A,
        Symbology::Code128B,
        Symbology::Code128C,
        Symbology::Itf14,
        Symbology::Code93,
        Symbology::Telepen,
        Symbology::Fim,
        Symbology::Pharmacode,
    ];

    /// Canonical name of the symbology, e.g. `"UPCA"` or `"MSI_Mod11_Mod10"`.
    pub const fn name(self) -> &'static str {
        use Symbology::*;
        match self {
            Unspecified => "UNSPECIFIED",
            UpcA => "UPCA",
            UpcE => "UPCE",
            UpcSupplemental2Digit => "UPC_SUPPLEMENTAL_2DIGIT",
            UpcSupplemental5Digit => "UPC_SUPPLEMENTAL_5DIGIT",
            Ean13 => "EAN13",
            Ean8 => "EAN8",
            Interleaved2of5 => "Interleaved2of5",
            Interleaved2of5Mod10 => "Interleaved2of5_Mod10",
            Standard2of5 => "Standard2of5",
            Standard2of5Mod10 => "Standard2of5_Mod10",
            Industrial2of5 => "Industrial2of5",
            Industrial2of5Mod10 => "Industrial2of5_Mod10",
            Code39 => "CODE39",
            Code39Extended => "CODE39Extended",
            Code39Mod43 => "CODE39_Mod43",
            Codabar => "Codabar",
            PostNet => "PostNet",
            Bookland => "BOOKLAND",
            Isbn => "ISBN",
            Jan13 => "JAN13",
            MsiMod10 => "MSI_Mod10",
            Msi2Mod10 => "MSI_2Mod10",
            MsiMod11 => "MSI_Mod11",
            MsiMod11Mod10 => "MSI_Mod11_Mod10",
            ModifiedPlessey => "Modified_Plessey",
            Code11 => "CODE11",
            Usd8 => "USD8",
            Ucc12 => "UCC12",
            Ucc13 => "UCC13",
            Logmars => "LOGMARS",
            Code128 => "CODE128",
            Code128A => "CODE128A",
            Code128B => "CODE128B",
            Code128C => "CODE128C",
            Itf14 => "ITF14",
            Code93 => "CODE93",
            Telepen => "TELEPEN",
            Fim => "FIM",
            Pharmacode => "PHARMACODE",
        }
    }

    /// True for the UPC/EAN family whose check digit is always recomputed
    /// and which may carry a 2- or 5-digit add-on.
    pub const fn is_upc_ean(self) -> bool {
        use Symbology::*;
        matches!(
            self,
            UpcA | UpcE | Ean13 | Ean8 | Jan13 | Ucc12 | Ucc13 | Bookland | Isbn
        )
    }

    /// True for symbologies encoded as EAN-13 (the GS1 prefix is meaningful).
    pub const fn is_ean13_family(self) -> bool {
        use Symbology::*;
        matches!(self, Ean13 | Ucc13 | Jan13 | Bookland | Isbn)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

impl FromStr for Symbology {
    type Err = EncodeError;

    /// Parses a symbology name. Case, `-`, `_` and spaces are ignored, so
    /// `"UPC-A"`, `"upca"` and `"UPCA"` all name [`Symbology::UpcA`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Symbology::ALL
            .iter()
            .copied()
            .find(|sym| normalize(sym.name()) == wanted)
            .ok_or_else(|| EncodeError::UnsupportedSymbology(s.to_string()))
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Symbology {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case_and_separators() {
        assert_eq!("UPC-A".parse::<Symbology>().unwrap(), Symbology::UpcA);
        assert_eq!("ean 13".parse::<Symbology>().unwrap(), Symbology::Ean13);
        assert_eq!("msi_mod11_mod10".parse::<Symbology>().unwrap(), Symbology::MsiMod11Mod10);
        assert_eq!("Code 128 B".parse::<Symbology>().unwrap(), Symbology::Code128B);
    }

    #[test]
    fn test_parse_rejects_unknown_and_unspecified() {
        assert!(matches!(
            "QRCODE".parse::<Symbology>(),
            Err(EncodeError::UnsupportedSymbology(name)) if name == "QRCODE"
        ));
        assert!("UNSPECIFIED".parse::<Symbology>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for sym in Symbology::ALL {
            assert_eq!(sym.name().parse::<Symbology>().unwrap(), sym);
        }
    }
}
