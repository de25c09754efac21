//! End-to-end encode scenarios through the public facade.

use barcode_standard::{
    generate, generate_named, generate_with, render, CheckDigitPolicy, EncodeError,
    EncodeOptions, PatternKind, RenderOptions, Symbology,
};

#[test]
fn upca_check_digit_and_guards() {
    let out = generate(Symbology::UpcA, "12345678901");
    assert!(out.is_ok());
    assert_eq!(out.label, "123456789012");
    assert_eq!(out.pattern.len(), 95);
    assert!(out.pattern.as_str().starts_with("101"));
    assert_eq!(out.country, Some("United States & Canada"));
}

#[test]
fn ean13_standardized_label() {
    let options = EncodeOptions {
        standardize_label: true,
        ..Default::default()
    };
    let out = generate_with(Symbology::Ean13, "400638133393", &options);
    assert_eq!(out.label, "4 006381 33393 1");
    assert_eq!(out.pattern.len(), 95);
}

#[test]
fn code39_hello_layout() {
    let out = generate(Symbology::Code39, "HELLO");
    let s = out.pattern.as_str();
    let star = "100101101101";
    assert!(s.starts_with(star) && s.ends_with(star));
    // Seven 12-module groups and six one-module gaps.
    assert_eq!(s.len(), 7 * 12 + 6);
    for gap in 1..7 {
        assert_eq!(&s[gap * 13 - 1..gap * 13], "0");
    }
}

#[test]
fn msi_mod10_check_and_verify() {
    let out = generate(Symbology::MsiMod10, "1234");
    assert_eq!(out.label, "12344");

    let verify = EncodeOptions {
        check_digit_policy: CheckDigitPolicy::Verify,
        ..Default::default()
    };
    let out = generate_with(Symbology::MsiMod10, "12345", &verify);
    assert!(out.pattern.is_empty());
    assert!(matches!(out.errors[..], [EncodeError::ChecksumMismatch { .. }]));
}

#[test]
fn unspecified_is_unsupported() {
    let out = generate(Symbology::Unspecified, "abc");
    assert!(out.pattern.is_empty());
    assert!(matches!(out.errors[..], [EncodeError::UnsupportedSymbology(_)]));
    assert_eq!(out.error_messages(), vec!["unsupported symbology: UNSPECIFIED"]);
}

#[test]
fn every_symbology_encodes_a_sample() {
    let samples = [
        (Symbology::UpcA, "03600029145"),
        (Symbology::UpcE, "0425261"),
        (Symbology::UpcSupplemental2Digit, "12"),
        (Symbology::UpcSupplemental5Digit, "52495"),
        (Symbology::Ean13, "590123412345"),
        (Symbology::Ean8, "9638507"),
        (Symbology::Interleaved2of5, "1234"),
        (Symbology::Interleaved2of5Mod10, "123"),
        (Symbology::Standard2of5, "12345"),
        (Symbology::Standard2of5Mod10, "12345"),
        (Symbology::Industrial2of5, "12345"),
        (Symbology::Industrial2of5Mod10, "12345"),
        (Symbology::Code39, "CODE 39"),
        (Symbology::Code39Extended, "Code 39 ext!"),
        (Symbology::Code39Mod43, "ABC-123"),
        (Symbology::Codabar, "A31117013206375B"),
        (Symbology::PostNet, "12345"),
        (Symbology::Bookland, "0306406152"),
        (Symbology::Isbn, "9780306406157"),
        (Symbology::Jan13, "4901234567894"),
        (Symbology::MsiMod10, "1234"),
        (Symbology::Msi2Mod10, "1234"),
        (Symbology::MsiMod11, "1234"),
        (Symbology::MsiMod11Mod10, "1234"),
        (Symbology::ModifiedPlessey, "1234"),
        (Symbology::Code11, "123-45"),
        (Symbology::Usd8, "123-45"),
        (Symbology::Ucc12, "03600029145"),
        (Symbology::Ucc13, "590123412345"),
        (Symbology::Logmars, "LOGMARS"),
        (Symbology::Code128, "Code 128 0123456789"),
        (Symbology::Code128A, "CODE128A\t"),
        (Symbology::Code128B, "Code128b"),
        (Symbology::Code128C, "0123456789"),
        (Symbology::Itf14, "1001234512345"),
        (Symbology::Code93, "Code 93"),
        (Symbology::Telepen, "Telepen"),
        (Symbology::Fim, "C"),
        (Symbology::Pharmacode, "1234"),
    ];
    assert_eq!(samples.len(), Symbology::ALL.len());
    for (symbology, data) in samples {
        let out = generate(symbology, data);
        assert!(out.is_ok(), "{} {:?}: {:?}", symbology, data, out.errors);
        assert!(!out.pattern.is_empty());
        assert!(render::render(&out, &RenderOptions {
            width: 1200,
            ..Default::default()
        })
        .is_ok());
    }
}

#[test]
fn postnet_is_height_modulated() {
    let out = generate(Symbology::PostNet, "123456789");
    assert_eq!(out.kind, PatternKind::HeightModulated);
    assert_eq!(out.pattern.len(), 2 + 10 * 5);
}

#[test]
fn named_symbology() {
    let out = generate_named("code128-c", "1234", &EncodeOptions::default());
    assert_eq!(out.symbology, Symbology::Code128C);
    assert_eq!(out.pattern.len(), 11 * 4 + 13);
}

#[test]
fn json_view() {
    let out = generate(Symbology::Ean8, "9638507");
    let json: serde_json::Value = serde_json::from_str(&out.to_json().unwrap()).unwrap();
    assert_eq!(json["label"], "96385074");
    assert_eq!(json["kind"], "Modules");
    assert!(json["encoding_time_ms"].as_f64().is_some());
}
