//! Character encodings on both sides of the printer.
//!
//! Output side: a closed set of eight encodings the printer can serialize
//! to, selected at runtime from a textual label. Each encoding has a
//! zero-sized [`CharEncoder`] type so the element printer can be
//! specialized per encoding while the dispatcher picks one at runtime.
//!
//! Application side: the bytes handed to the printer (tag names, attribute
//! values, content) are decoded with an [`encoding_rs::Encoding`], UTF-8 by
//! default. Malformed input sequences are replaced with U+FFFD by the
//! decoder and are never reported as errors.
//!
//! # Label matching
//!
//! Labels are normalized by dropping whitespace, control bytes and hyphens
//! and lowercasing the rest, so `"UTF-16LE"`, `"utf16le"` and `" Utf-16 le"`
//! all select the same encoding:
//!
//! | Normalized label            | Encoding      |
//! |-----------------------------|---------------|
//! | empty, `utf8`               | UTF-8         |
//! | `utf16`, `utf16be`          | UTF-16BE      |
//! | `utf16le`                   | UTF-16LE      |
//! | `ucs2`, `ucs2be`            | UCS-2BE       |
//! | `ucs2le`                    | UCS-2LE       |
//! | `ucs4`, `ucs4be`            | UCS-4BE       |
//! | `ucs4le`                    | UCS-4LE       |
//! | `isolatin*`, `iso8859*`     | ISO-Latin-1   |

use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;

/// An error that occurs when resolving an application encoding label.
#[derive(Debug, Clone)]
pub struct EncodingError {
    /// A human-readable description of the encoding error.
    pub message: String,
}

impl EncodingError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encoding error: {}", self.message)
    }
}

impl std::error::Error for EncodingError {}

/// Normalizes an encoding label for matching.
///
/// Characters up to and including space, other Unicode whitespace such as
/// U+00A0, and hyphens are dropped; ASCII letters are lowercased.
///
/// # Examples
///
/// ```
/// use xmlprinter::encoding::normalize_label;
///
/// assert_eq!(normalize_label("UTF-16 LE"), "utf16le");
/// assert_eq!(normalize_label("ISO-8859-1"), "iso88591");
/// ```
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|&c| c > ' ' && c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// One of the output encodings the printer can serialize to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputEncoding {
    /// UTF-8.
    Utf8,
    /// UTF-16, big-endian, surrogate pairs outside the BMP.
    Utf16Be,
    /// UTF-16, little-endian, surrogate pairs outside the BMP.
    Utf16Le,
    /// UCS-2, big-endian. BMP only.
    Ucs2Be,
    /// UCS-2, little-endian. BMP only.
    Ucs2Le,
    /// UCS-4 (UTF-32), big-endian.
    Ucs4Be,
    /// UCS-4 (UTF-32), little-endian.
    Ucs4Le,
    /// ISO-8859-1. Code points above U+00FF are not representable.
    IsoLatin1,
}

impl OutputEncoding {
    /// All supported output encodings.
    pub const ALL: [Self; 8] = [
        Self::Utf8,
        Self::Utf16Be,
        Self::Utf16Le,
        Self::Ucs2Be,
        Self::Ucs2Le,
        Self::Ucs4Be,
        Self::Ucs4Le,
        Self::IsoLatin1,
    ];

    /// Resolves an encoding label, returning `None` when the label names no
    /// supported encoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlprinter::encoding::OutputEncoding;
    ///
    /// assert_eq!(OutputEncoding::from_label("UTF-8"), Some(OutputEncoding::Utf8));
    /// assert_eq!(OutputEncoding::from_label(""), Some(OutputEncoding::Utf8));
    /// assert_eq!(OutputEncoding::from_label("ISO-8859-1"), Some(OutputEncoding::IsoLatin1));
    /// assert_eq!(OutputEncoding::from_label("Shift_JIS"), None);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let enc = normalize_label(label);
        if enc.starts_with("isolatin") || enc.starts_with("iso8859") {
            return Some(Self::IsoLatin1);
        }
        match enc.as_str() {
            "" | "utf8" => Some(Self::Utf8),
            "utf16" | "utf16be" => Some(Self::Utf16Be),
            "utf16le" => Some(Self::Utf16Le),
            "ucs2" | "ucs2be" => Some(Self::Ucs2Be),
            "ucs2le" => Some(Self::Ucs2Le),
            "ucs4" | "ucs4be" => Some(Self::Ucs4Be),
            "ucs4le" => Some(Self::Ucs4Le),
            _ => None,
        }
    }

    /// Returns the canonical display name of the encoding.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
            Self::Ucs2Be => "UCS-2BE",
            Self::Ucs2Le => "UCS-2LE",
            Self::Ucs4Be => "UCS-4BE",
            Self::Ucs4Le => "UCS-4LE",
            Self::IsoLatin1 => "ISO-8859-1",
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serializes single characters into a specific output encoding.
///
/// Implementors are zero-sized marker types; the element printer is generic
/// over this trait so each encoding gets its own monomorphized printer.
pub trait CharEncoder: fmt::Debug + Clone + Send + 'static {
    /// The encoding this encoder produces.
    const ENCODING: OutputEncoding;

    /// Appends the byte representation of `ch` to `sink`.
    fn encode(ch: char, sink: &mut Vec<u8>);
}

/// UTF-8 output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8;

impl CharEncoder for Utf8 {
    const ENCODING: OutputEncoding = OutputEncoding::Utf8;

    #[inline]
    fn encode(ch: char, sink: &mut Vec<u8>) {
        let mut buf = [0u8; 4];
        sink.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }
}

/// UTF-16 big-endian output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf16Be;

impl CharEncoder for Utf16Be {
    const ENCODING: OutputEncoding = OutputEncoding::Utf16Be;

    #[inline]
    fn encode(ch: char, sink: &mut Vec<u8>) {
        let mut buf = [0u16; 2];
        for unit in ch.encode_utf16(&mut buf) {
            sink.extend_from_slice(&unit.to_be_bytes());
        }
    }
}

/// UTF-16 little-endian output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf16Le;

impl CharEncoder for Utf16Le {
    const ENCODING: OutputEncoding = OutputEncoding::Utf16Le;

    #[inline]
    fn encode(ch: char, sink: &mut Vec<u8>) {
        let mut buf = [0u16; 2];
        for unit in ch.encode_utf16(&mut buf) {
            sink.extend_from_slice(&unit.to_le_bytes());
        }
    }
}

/// Maps a character to its UCS-2 code unit. Characters outside the BMP
/// become U+FFFD.
#[inline]
fn ucs2_unit(ch: char) -> u16 {
    u16::try_from(u32::from(ch)).unwrap_or(0xFFFD)
}

/// UCS-2 big-endian output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ucs2Be;

impl CharEncoder for Ucs2Be {
    const ENCODING: OutputEncoding = OutputEncoding::Ucs2Be;

    #[inline]
    fn encode(ch: char, sink: &mut Vec<u8>) {
        sink.extend_from_slice(&ucs2_unit(ch).to_be_bytes());
    }
}

/// UCS-2 little-endian output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ucs2Le;

impl CharEncoder for Ucs2Le {
    const ENCODING: OutputEncoding = OutputEncoding::Ucs2Le;

    #[inline]
    fn encode(ch: char, sink: &mut Vec<u8>) {
        sink.extend_from_slice(&ucs2_unit(ch).to_le_bytes());
    }
}

/// UCS-4 big-endian output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ucs4Be;

impl CharEncoder for Ucs4Be {
    const ENCODING: OutputEncoding = OutputEncoding::Ucs4Be;

    #[inline]
    fn encode(ch: char, sink: &mut Vec<u8>) {
        sink.extend_from_slice(&u32::from(ch).to_be_bytes());
    }
}

/// UCS-4 little-endian output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ucs4Le;

impl CharEncoder for Ucs4Le {
    const ENCODING: OutputEncoding = OutputEncoding::Ucs4Le;

    #[inline]
    fn encode(ch: char, sink: &mut Vec<u8>) {
        sink.extend_from_slice(&u32::from(ch).to_le_bytes());
    }
}

/// ISO-8859-1 output. Characters above U+00FF are written as `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoLatin1;

impl CharEncoder for IsoLatin1 {
    const ENCODING: OutputEncoding = OutputEncoding::IsoLatin1;

    #[inline]
    fn encode(ch: char, sink: &mut Vec<u8>) {
        sink.push(u8::try_from(u32::from(ch)).unwrap_or(b'?'));
    }
}

/// Decodes application-encoded bytes into text.
///
/// Uses `encoding_rs` without BOM sniffing: the application encoding is
/// known, and a leading BOM in a value is content. Borrows the input when it
/// is valid UTF-8 and the application encoding is UTF-8.
///
/// # Examples
///
/// ```
/// use xmlprinter::encoding::decode_app;
///
/// assert_eq!(decode_app(b"caf\xC3\xA9", encoding_rs::UTF_8), "caf\u{e9}");
/// assert_eq!(decode_app(b"caf\xE9", encoding_rs::WINDOWS_1252), "caf\u{e9}");
/// ```
#[must_use]
pub fn decode_app<'a>(bytes: &'a [u8], app: &'static Encoding) -> Cow<'a, str> {
    app.decode_without_bom_handling(bytes).0
}

/// Resolves an application encoding label through `encoding_rs`.
///
/// Labels follow the WHATWG Encoding Standard, so `"latin1"` resolves to
/// windows-1252.
///
/// # Errors
///
/// Returns `EncodingError` if `encoding_rs` does not know the label.
pub fn app_encoding_for_label(label: &str) -> Result<&'static Encoding, EncodingError> {
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| EncodingError::new(format!("unsupported application encoding: {label}")))
}
