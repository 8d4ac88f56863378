//! Document attributes consumed by the printer.
//!
//! The printer needs two pieces of configuration: the output encoding label,
//! which is written verbatim into the XML declaration and normalized to pick
//! the output encoder, and the encoding of the application's own strings.
//! [`XmlAttributes`] abstracts over where these come from; the provided
//! [`DocumentAttributes`] holds them directly.

use std::fmt;

use encoding_rs::Encoding;

use crate::encoding::{app_encoding_for_label, EncodingError};

/// Supplies the document-level settings a printer needs.
pub trait XmlAttributes: Clone + fmt::Debug + Send + 'static {
    /// The raw output encoding label, as it should appear in the declaration.
    fn encoding(&self) -> &str;

    /// The encoding of names and values handed to the printer.
    fn app_encoding(&self) -> &'static Encoding {
        encoding_rs::UTF_8
    }
}

/// Plain document attributes.
///
/// # Examples
///
/// ```
/// use xmlprinter::attributes::{DocumentAttributes, XmlAttributes};
///
/// let attrs = DocumentAttributes::default().with_encoding("UTF-16LE");
/// assert_eq!(attrs.encoding(), "UTF-16LE");
/// assert_eq!(attrs.app_encoding(), encoding_rs::UTF_8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAttributes {
    /// Output encoding label. Defaults to `"UTF-8"`.
    pub encoding: String,
    /// Application encoding. Defaults to UTF-8.
    pub app_encoding: &'static Encoding,
}

impl Default for DocumentAttributes {
    fn default() -> Self {
        Self {
            encoding: "UTF-8".to_string(),
            app_encoding: encoding_rs::UTF_8,
        }
    }
}

impl DocumentAttributes {
    /// Creates attributes with the given output encoding label.
    #[must_use]
    pub fn new(encoding: &str) -> Self {
        Self::default().with_encoding(encoding)
    }

    /// Sets the output encoding label.
    ///
    /// The label is not validated here; an unsupported label is reported by
    /// the printer on first use.
    #[must_use]
    pub fn with_encoding(mut self, label: &str) -> Self {
        self.encoding = label.to_string();
        self
    }

    /// Sets the application encoding.
    #[must_use]
    pub fn with_app_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.app_encoding = encoding;
        self
    }

    /// Sets the application encoding by its WHATWG label.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError` if the label is not known to `encoding_rs`.
    pub fn with_app_encoding_label(self, label: &str) -> Result<Self, EncodingError> {
        let encoding = app_encoding_for_label(label)?;
        Ok(self.with_app_encoding(encoding))
    }
}

impl XmlAttributes for DocumentAttributes {
    fn encoding(&self) -> &str {
        &self.encoding
    }

    fn app_encoding(&self) -> &'static Encoding {
        self.app_encoding
    }
}
