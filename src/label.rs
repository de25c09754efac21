//! Human-readable labels and the GS1 prefix lookup.

use crate::symbology::Symbology;

/// Derives the label printed under a symbol.
///
/// `data` and `check` are the encoder's payload and printed check
/// characters. With `standardize`, UPC-A is grouped as number system,
/// manufacturer, product and check (`0 12345 67890 5`) and the EAN-13
/// family as prefix, manufacturer, product and check (`4 006381 33393 1`).
///
/// # Example
///
/// ```rust
/// use barcode_standard::label::format;
/// use barcode_standard::Symbology;
///
/// assert_eq!(format(Symbology::Ean13, "400638133393", Some("1"), true), "4 006381 33393 1");
/// assert_eq!(format(Symbology::Ean13, "400638133393", Some("1"), false), "4006381333931");
/// ```
pub fn format(symbology: Symbology, data: &str, check: Option<&str>, standardize: bool) -> String {
    let full = format!("{}{}", data, check.unwrap_or_default());
    if !standardize || !full.is_ascii() {
        return full;
    }
    let groups: &[usize] = match symbology {
        Symbology::UpcA | Symbology::Ucc12 if full.len() == 12 => &[1, 5, 5, 1],
        s if s.is_ean13_family() && full.len() == 13 => &[1, 6, 5, 1],
        _ => return full,
    };
    let mut out = String::with_capacity(full.len() + groups.len());
    let mut pos = 0;
    for &len in groups {
        if pos > 0 {
            out.push(' ');
        }
        out.push_str(&full[pos..pos + len]);
        pos += len;
    }
    out
}

/// GS1 prefix ranges (inclusive) and the country or use they are assigned to.
const GS1_PREFIXES: &[(u16, u16, &str)] = &[
    (0, 19, "United States & Canada"),
    (20, 29, "Restricted distribution"),
    (30, 39, "United States drugs"),
    (40, 49, "Restricted distribution"),
    (50, 59, "Coupons"),
    (60, 139, "United States & Canada"),
    (200, 299, "Restricted distribution"),
    (300, 379, "France & Monaco"),
    (380, 380, "Bulgaria"),
    (383, 383, "Slovenia"),
    (385, 385, "Croatia"),
    (387, 387, "Bosnia and Herzegovina"),
    (389, 389, "Montenegro"),
    (400, 440, "Germany"),
    (450, 459, "Japan"),
    (460, 469, "Russia"),
    (470, 470, "Kyrgyzstan"),
    (471, 471, "Taiwan"),
    (474, 474, "Estonia"),
    (475, 475, "Latvia"),
    (476, 476, "Azerbaijan"),
    (477, 477, "Lithuania"),
    (478, 478, "Uzbekistan"),
    (479, 479, "Sri Lanka"),
    (480, 480, "Philippines"),
    (481, 481, "Belarus"),
    (482, 482, "Ukraine"),
    (484, 484, "Moldova"),
    (485, 485, "Armenia"),
    (486, 486, "Georgia"),
    (487, 487, "Kazakhstan"),
    (489, 489, "Hong Kong"),
    (490, 499, "Japan"),
    (500, 509, "United Kingdom"),
    (520, 521, "Greece"),
    (528, 528, "Lebanon"),
    (529, 529, "Cyprus"),
    (530, 530, "Albania"),
    (531, 531, "North Macedonia"),
    (535, 535, "Malta"),
    (539, 539, "Ireland"),
    (540, 549, "Belgium & Luxembourg"),
    (560, 560, "Portugal"),
    (569, 569, "Iceland"),
    (570, 579, "Denmark"),
    (590, 590, "Poland"),
    (594, 594, "Romania"),
    (599, 599, "Hungary"),
    (600, 601, "South Africa"),
    (608, 608, "Bahrain"),
    (609, 609, "Mauritius"),
    (611, 611, "Morocco"),
    (613, 613, "Algeria"),
    (616, 616, "Kenya"),
    (619, 619, "Tunisia"),
    (621, 621, "Syria"),
    (622, 622, "Egypt"),
    (624, 624, "Libya"),
    (625, 625, "Jordan"),
    (626, 626, "Iran"),
    (627, 627, "Kuwait"),
    (628, 628, "Saudi Arabia"),
    (629, 629, "United Arab Emirates"),
    (640, 649, "Finland"),
    (690, 699, "China"),
    (700, 709, "Norway"),
    (729, 729, "Israel"),
    (730, 739, "Sweden"),
    (740, 740, "Guatemala"),
    (741, 741, "El Salvador"),
    (742, 742, "Honduras"),
    (743, 743, "Nicaragua"),
    (744, 744, "Costa Rica"),
    (745, 745, "Panama"),
    (746, 746, "Dominican Republic"),
    (750, 750, "Mexico"),
    (754, 755, "Canada"),
    (759, 759, "Venezuela"),
    (760, 769, "Switzerland & Liechtenstein"),
    (770, 771, "Colombia"),
    (773, 773, "Uruguay"),
    (775, 775, "Peru"),
    (777, 777, "Bolivia"),
    (779, 779, "Argentina"),
    (780, 780, "Chile"),
    (784, 784, "Paraguay"),
    (786, 786, "Ecuador"),
    (789, 790, "Brazil"),
    (800, 839, "Italy, San Marino & Vatican City"),
    (840, 849, "Spain & Andorra"),
    (850, 850, "Cuba"),
    (858, 858, "Slovakia"),
    (859, 859, "Czech Republic"),
    (860, 860, "Serbia"),
    (865, 865, "Mongolia"),
    (867, 867, "North Korea"),
    (868, 869, "Turkey"),
    (870, 879, "Netherlands"),
    (880, 880, "South Korea"),
    (884, 884, "Cambodia"),
    (885, 885, "Thailand"),
    (888, 888, "Singapore"),
    (890, 890, "India"),
    (893, 893, "Vietnam"),
    (896, 896, "Pakistan"),
    (899, 899, "Indonesia"),
    (900, 919, "Austria"),
    (930, 939, "Australia"),
    (940, 949, "New Zealand"),
    (950, 950, "GS1 Global Office"),
    (955, 955, "Malaysia"),
    (958, 958, "Macau"),
    (977, 977, "Serial publications (ISSN)"),
    (978, 979, "Bookland (ISBN)"),
    (980, 980, "Refund receipts"),
    (981, 984, "Common currency coupons"),
    (990, 999, "Coupons"),
];

/// Country or use assigned to the GS1 prefix of a 13-digit EAN/GTIN.
/// UPC-A numbers take a leading zero first.
///
/// Returns `None` for short or non-numeric input and unassigned prefixes.
pub fn country(ean13: &str) -> Option<&'static str> {
    let prefix: u16 = ean13.get(..3)?.parse().ok()?;
    GS1_PREFIXES
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&prefix))
        .map(|(_, _, name)| *name)
}

/// The 13-digit form used for the prefix lookup, for symbologies that have one.
pub(crate) fn gs1_digits(symbology: Symbology, text: &str) -> Option<String> {
    match symbology {
        Symbology::UpcA | Symbology::Ucc12 | Symbology::UpcE => Some(format!("0{}", text)),
        s if s.is_ean13_family() || s == Symbology::Ean8 => Some(text.to_string()),
        _ => None,
    }
}
