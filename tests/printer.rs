//! End-to-end tests for the streaming XML printer.
//!
//! These drive the public `XmlPrinter` API through every output encoding
//! and check the produced bytes, the escaping round trip, and the
//! protocol-violation behaviour.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use xmlprinter::encoding::OutputEncoding;
use xmlprinter::{
    print_document, DocumentAttributes, PrintError, PrintEvent, State, ValueContext, XmlPrinter,
};

fn header(label: &str) -> String {
    format!("<?xml version=\"1.0\" encoding=\"{label}\" standalone=\"yes\"?>\n")
}

/// Decodes printer output back into text for the given output encoding.
fn decode_output(encoding: OutputEncoding, out: &[u8]) -> String {
    match encoding {
        OutputEncoding::Utf8 => String::from_utf8(out.to_vec()).unwrap(),
        OutputEncoding::Utf16Be | OutputEncoding::Ucs2Be => {
            let (text, had_errors) = encoding_rs::UTF_16BE.decode_without_bom_handling(out);
            assert!(!had_errors);
            text.into_owned()
        }
        OutputEncoding::Utf16Le | OutputEncoding::Ucs2Le => {
            let (text, had_errors) = encoding_rs::UTF_16LE.decode_without_bom_handling(out);
            assert!(!had_errors);
            text.into_owned()
        }
        OutputEncoding::Ucs4Be | OutputEncoding::Ucs4Le => {
            assert_eq!(out.len() % 4, 0);
            out.chunks_exact(4)
                .map(|quad| {
                    let bytes = [quad[0], quad[1], quad[2], quad[3]];
                    let value = if encoding == OutputEncoding::Ucs4Be {
                        u32::from_be_bytes(bytes)
                    } else {
                        u32::from_le_bytes(bytes)
                    };
                    char::from_u32(value).unwrap()
                })
                .collect()
        }
        OutputEncoding::IsoLatin1 => out.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Resolves the predefined entities and decimal character references.
fn xml_unescape(text: &str) -> String {
    let mut out = String::new();
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let semi = rest[amp..].find(';').unwrap() + amp;
        let entity = &rest[amp + 1..semi];
        match entity {
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "amp" => out.push('&'),
            "apos" => out.push('\''),
            "quot" => out.push('"'),
            num => {
                let code: u32 = num.strip_prefix('#').unwrap().parse().unwrap();
                out.push(char::from_u32(code).unwrap());
            }
        }
        rest = &rest[semi + 1..];
    }
    out.push_str(rest);
    out
}

fn address_events() -> Vec<PrintEvent<'static>> {
    vec![
        PrintEvent::OpenTag(b"address"),
        PrintEvent::OpenTag(b"name"),
        PrintEvent::Value(b"John"),
        PrintEvent::CloseTag(b"name"),
        PrintEvent::OpenTag(b"street"),
        PrintEvent::Value(b"Main 1"),
        PrintEvent::CloseTag(b"street"),
        PrintEvent::CloseTag(b"address"),
    ]
}

// ---------------------------------------------------------------------------
// Encoding dispatch
// ---------------------------------------------------------------------------

#[test]
fn test_labels_select_documented_encoder() {
    let cases = [
        ("utf-8", OutputEncoding::Utf8),
        ("UTF 8", OutputEncoding::Utf8),
        ("", OutputEncoding::Utf8),
        ("Utf-16", OutputEncoding::Utf16Be),
        ("UTF-16BE", OutputEncoding::Utf16Be),
        ("utf-16-le", OutputEncoding::Utf16Le),
        ("UCS-2", OutputEncoding::Ucs2Be),
        ("UCS-2BE", OutputEncoding::Ucs2Be),
        ("ucs 2 le", OutputEncoding::Ucs2Le),
        ("UCS-4", OutputEncoding::Ucs4Be),
        ("ucs-4be", OutputEncoding::Ucs4Be),
        ("UCS-4LE", OutputEncoding::Ucs4Le),
        ("ISO-8859-1", OutputEncoding::IsoLatin1),
        ("iso-latin-1", OutputEncoding::IsoLatin1),
    ];
    for (label, expected) in cases {
        let mut printer = XmlPrinter::with_encoding(label);
        let mut out = Vec::new();
        printer.open_tag(b"a", &mut out).unwrap();
        assert_eq!(printer.selected_encoding(), Some(expected), "{label}");
    }
}

#[test]
fn test_unsupported_labels_write_nothing() {
    for label in ["UTF-7", "Shift_JIS", "EBCDIC-US", "latin1", "utf32"] {
        let mut printer = XmlPrinter::with_encoding(label);
        let mut out = Vec::new();
        let result = printer.print_events(address_events(), &mut out);
        assert!(
            matches!(result, Err(PrintError::UnsupportedEncoding { .. })),
            "{label}"
        );
        for _ in 0..3 {
            assert!(printer.open_tag(b"a", &mut out).is_err());
            assert!(printer.value(b"x", &mut out).is_err());
        }
        assert!(out.is_empty(), "{label}");
    }
}

#[test]
fn test_nesting_in_every_encoding() {
    for encoding in OutputEncoding::ALL {
        let out =
            print_document(DocumentAttributes::new(encoding.name()), address_events()).unwrap();
        assert_eq!(
            decode_output(encoding, &out),
            format!(
                "{}<address><name>John</name><street>Main 1</street></address>",
                header(encoding.name())
            ),
            "{encoding}"
        );
    }
}

#[test]
fn test_header_uses_raw_label() {
    let out = print_document(
        DocumentAttributes::new("utf-8"),
        [PrintEvent::OpenTag(b"a"), PrintEvent::CloseTag(b"a")],
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}<a/>", header("utf-8"))
    );
}

#[test]
fn test_non_ascii_transcoded_per_encoding() {
    let text = "Gr\u{fc}\u{df}e \u{20ac}";
    for encoding in OutputEncoding::ALL {
        let mut printer = XmlPrinter::with_encoding(encoding.name());
        let mut out = Vec::new();
        printer.open_tag(b"t", &mut out).unwrap();
        printer.value(text.as_bytes(), &mut out).unwrap();
        printer.close_tag(b"t", &mut out).unwrap();

        let expected = if encoding == OutputEncoding::IsoLatin1 {
            "Gr\u{fc}\u{df}e ?"
        } else {
            text
        };
        assert_eq!(
            decode_output(encoding, &out),
            format!("{}<t>{expected}</t>", header(encoding.name())),
            "{encoding}"
        );
    }
}

#[test]
fn test_application_encoding_windows_1252() {
    let attributes = DocumentAttributes::new("UTF-8")
        .with_app_encoding_label("windows-1252")
        .unwrap();
    let out = print_document(
        attributes,
        [
            PrintEvent::OpenTag(b"p"),
            PrintEvent::Value(b"caf\xE9 \x80"),
            PrintEvent::CloseTag(b"p"),
        ],
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with("<p>caf\u{e9} \u{20ac}</p>"), "{text}");
}

// ---------------------------------------------------------------------------
// Structural behaviour
// ---------------------------------------------------------------------------

#[test]
fn test_open_close_self_closes() {
    let mut printer = XmlPrinter::with_encoding("UTF-8");
    let mut out = Vec::new();
    printer.open_tag(b"a", &mut out).unwrap();
    printer.close_tag(b"a", &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), format!("{}<a/>", header("UTF-8")));
}

#[test]
fn test_attribute_has_space_before_quoted_value() {
    let mut printer = XmlPrinter::with_encoding("UTF-8");
    let mut out = Vec::new();
    printer.open_tag(b"a", &mut out).unwrap();
    printer.attribute(b"id", &mut out).unwrap();
    assert_eq!(printer.value(b"5", &mut out).unwrap(), ValueContext::Attribute);
    printer.close_tag(b"a", &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}<a id= \"5\"/>", header("UTF-8"))
    );
}

#[test]
fn test_close_tag_uses_recorded_name() {
    let mut printer = XmlPrinter::with_encoding("UTF-8");
    let mut out = Vec::new();
    printer.open_tag(b"outer", &mut out).unwrap();
    printer.value(b"x", &mut out).unwrap();
    printer.close_tag(b"something-else", &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().ends_with("<outer>x</outer>"));
}

#[test]
fn test_close_on_empty_stack() {
    let mut printer = XmlPrinter::with_encoding("UTF-8");
    let mut out = Vec::new();
    assert_eq!(printer.close_tag(b"a", &mut out), Err(PrintError::EmptyTagStack));
    assert!(out.is_empty());

    printer.open_tag(b"a", &mut out).unwrap();
    printer.close_tag(b"a", &mut out).unwrap();
    let len = out.len();
    assert_eq!(printer.close_tag(b"a", &mut out), Err(PrintError::EmptyTagStack));
    assert_eq!(out.len(), len);
}

#[test]
fn test_double_attribute_fails() {
    let mut printer = XmlPrinter::with_encoding("UTF-8");
    let mut out = Vec::new();
    printer.open_tag(b"a", &mut out).unwrap();
    printer.attribute(b"x", &mut out).unwrap();
    let err = printer.attribute(b"y", &mut out).unwrap_err();
    assert!(err.is_protocol_violation());
    assert_eq!(printer.state(), Some(State::TagAttribute));
}

#[test]
fn test_printer_usable_after_violation() {
    let mut printer = XmlPrinter::with_encoding("UTF-8");
    let mut out = Vec::new();
    assert!(printer.attribute(b"x", &mut out).is_err());
    printer.open_tag(b"a", &mut out).unwrap();
    printer.attribute(b"k", &mut out).unwrap();
    assert!(printer.close_tag(b"a", &mut out).is_err());
    printer.value(b"v", &mut out).unwrap();
    printer.close_tag(b"a", &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}<a k= \"v\"/>", header("UTF-8"))
    );
}

#[test]
fn test_clone_mid_nesting_is_independent() {
    let mut printer = XmlPrinter::with_encoding("UTF-16LE");
    let mut out = Vec::new();
    printer.open_tag(b"a", &mut out).unwrap();
    printer.open_tag(b"b", &mut out).unwrap();
    printer.value(b"x", &mut out).unwrap();

    let mut copy = printer.clone();
    let mut copy_out = out.clone();

    printer.close_tag(b"b", &mut out).unwrap();
    printer.close_tag(b"a", &mut out).unwrap();
    assert!(printer.close_tag(b"a", &mut out).is_err());

    copy.open_tag(b"c", &mut copy_out).unwrap();
    copy.close_tag(b"c", &mut copy_out).unwrap();
    copy.close_tag(b"b", &mut copy_out).unwrap();
    assert_eq!(copy.depth(), 1);
    copy.close_tag(b"a", &mut copy_out).unwrap();

    let enc = OutputEncoding::Utf16Le;
    let prefix = header("UTF-16LE");
    assert_eq!(decode_output(enc, &out), format!("{prefix}<a><b>x</b></a>"));
    assert_eq!(
        decode_output(enc, &copy_out),
        format!("{prefix}<a><b>x<c/></b></a>")
    );
}

// ---------------------------------------------------------------------------
// Escaping round trip
// ---------------------------------------------------------------------------

/// Deterministic sample strings mixing markup, control and non-ASCII
/// characters.
fn sample_texts() -> Vec<String> {
    let alphabet = [
        'a', '<', '>', '&', '\0', '\u{8}', '\'', '"', '\t', '\n', '\r', ' ', '\u{e9}', '\u{4e2d}',
        ';', '#',
    ];
    let mut seed: u32 = 0x2545_f491;
    (0..200)
        .map(|len| {
            (0..len % 23)
                .map(|_| {
                    seed ^= seed << 13;
                    seed ^= seed >> 17;
                    seed ^= seed << 5;
                    alphabet[(seed as usize) % alphabet.len()]
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_content_escaping_round_trip() {
    for text in sample_texts() {
        let mut printer = XmlPrinter::with_encoding("UTF-8");
        let mut out = Vec::new();
        printer.open_tag(b"t", &mut out).unwrap();
        printer.value(text.as_bytes(), &mut out).unwrap();
        printer.close_tag(b"t", &mut out).unwrap();

        let xml = String::from_utf8(out).unwrap();
        let body = xml
            .strip_prefix(&format!("{}<t>", header("UTF-8")))
            .and_then(|rest| rest.strip_suffix("</t>"))
            .unwrap();
        assert!(!body.contains('<'), "{body:?}");
        assert_eq!(xml_unescape(body), text);
    }
}

#[test]
fn test_attribute_escaping_round_trip() {
    for text in sample_texts() {
        let mut printer = XmlPrinter::with_encoding("UTF-8");
        let mut out = Vec::new();
        printer.open_tag(b"t", &mut out).unwrap();
        printer.attribute(b"v", &mut out).unwrap();
        printer.value(text.as_bytes(), &mut out).unwrap();
        printer.close_tag(b"t", &mut out).unwrap();

        let xml = String::from_utf8(out).unwrap();
        let body = xml
            .strip_prefix(&format!("{}<t v= \"", header("UTF-8")))
            .and_then(|rest| rest.strip_suffix("\"/>"))
            .unwrap();
        assert!(
            !body.contains(|c| matches!(c, '"' | '\'' | '<' | '\t' | '\n' | '\r')),
            "{body:?}"
        );
        assert_eq!(xml_unescape(body), text);
    }
}
