//! Character escaping for content and attribute values.
//!
//! Input text is decoded from the application encoding into characters.
//! ASCII characters found in an [`EscapeTable`] are replaced with their
//! entity or character reference; every other character, including all
//! non-ASCII ones, is passed to the output encoder unchanged. Replacement
//! strings are ASCII, so they are emitted byte by byte through the same
//! encoder.

use encoding_rs::Encoding;

use crate::encoding::{decode_app, CharEncoder};

/// A substitution table mapping ASCII bytes to replacement strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeTable {
    entries: &'static [(u8, &'static str)],
}

impl EscapeTable {
    /// Returns the replacement for `ch`, if the table has one.
    #[must_use]
    pub fn lookup(&self, ch: char) -> Option<&'static str> {
        if !ch.is_ascii() {
            return None;
        }
        let byte = ch as u8;
        self.entries
            .iter()
            .find(|(b, _)| *b == byte)
            .map(|(_, replacement)| *replacement)
    }
}

/// Escapes for element content.
pub const CONTENT_TABLE: EscapeTable = EscapeTable {
    entries: &[
        (b'<', "&lt;"),
        (b'>', "&gt;"),
        (b'&', "&amp;"),
        (0x00, "&#0;"),
        (0x08, "&#8;"),
    ],
};

/// Escapes for attribute values. Besides markup and quote characters,
/// whitespace is escaped so that attribute value normalization by a reader
/// does not alter it.
pub const ATTRIBUTE_TABLE: EscapeTable = EscapeTable {
    entries: &[
        (b'<', "&lt;"),
        (b'>', "&gt;"),
        (b'\'', "&apos;"),
        (b'"', "&quot;"),
        (b'&', "&amp;"),
        (0x00, "&#0;"),
        (0x08, "&#8;"),
        (b'\t', "&#9;"),
        (b'\n', "&#10;"),
        (b'\r', "&#13;"),
    ],
};

/// Emits a string through the output encoder without escaping.
#[inline]
pub fn print_str<E: CharEncoder>(text: &str, sink: &mut Vec<u8>) {
    for ch in text.chars() {
        E::encode(ch, sink);
    }
}

/// Transcodes application-encoded bytes into the output encoding without
/// escaping.
pub fn print_to_buffer<E: CharEncoder>(src: &[u8], app: &'static Encoding, sink: &mut Vec<u8>) {
    for ch in decode_app(src, app).chars() {
        E::encode(ch, sink);
    }
}

/// Transcodes application-encoded bytes into the output encoding, replacing
/// ASCII characters found in `table`.
///
/// # Examples
///
/// ```
/// use xmlprinter::encoding::Utf8;
/// use xmlprinter::escape::{escape_to_buffer, CONTENT_TABLE};
///
/// let mut out = Vec::new();
/// escape_to_buffer::<Utf8>(b"a < b & c", &CONTENT_TABLE, encoding_rs::UTF_8, &mut out);
/// assert_eq!(out, b"a &lt; b &amp; c");
/// ```
pub fn escape_to_buffer<E: CharEncoder>(
    src: &[u8],
    table: &EscapeTable,
    app: &'static Encoding,
    sink: &mut Vec<u8>,
) {
    for ch in decode_app(src, app).chars() {
        match table.lookup(ch) {
            Some(replacement) => print_str::<E>(replacement, sink),
            None => E::encode(ch, sink),
        }
    }
}
