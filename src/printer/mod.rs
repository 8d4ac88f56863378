//! Streaming XML printer.
//!
//! [`XmlPrinter`] turns a push sequence of structural operations (open tag,
//! attribute name, value, close tag) into XML bytes appended to a
//! caller-owned sink. The output encoding is chosen at runtime from the
//! attribute holder's encoding label: on first use the label is resolved to
//! one of the [`OutputEncoding`]s and an [`ElementPrinter`] specialized for
//! that encoding is instantiated behind a [`StructuralPrinter`] trait
//! object.
//!
//! The printer only keeps the names of currently open elements and a small
//! output [`State`]; nothing of the document itself is buffered.
//!
//! # Examples
//!
//! ```
//! use xmlprinter::{DocumentAttributes, XmlPrinter};
//!
//! let mut printer = XmlPrinter::new(DocumentAttributes::new("UTF-8"));
//! let mut out = Vec::new();
//! printer.open_tag(b"address", &mut out).unwrap();
//! printer.open_tag(b"name", &mut out).unwrap();
//! printer.value(b"John", &mut out).unwrap();
//! printer.close_tag(b"name", &mut out).unwrap();
//! printer.close_tag(b"address", &mut out).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
//!      <address><name>John</name></address>"
//! );
//! ```

pub mod element;
pub mod events;

use std::fmt;

use encoding_rs::Encoding;

use crate::attributes::{DocumentAttributes, XmlAttributes};
use crate::encoding::{
    IsoLatin1, OutputEncoding, Ucs2Be, Ucs2Le, Ucs4Be, Ucs4Le, Utf16Be, Utf16Le, Utf8,
};
use crate::error::{PrintError, Result};

pub use element::ElementPrinter;
pub use events::{print_document, PrintEvent};

/// Output state of a printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    /// Nothing written yet; the XML declaration is still pending.
    #[default]
    Init,
    /// Between markup: after the declaration, content, or a complete tag.
    Content,
    /// Inside a start-tag whose closing `>` has not been written.
    TagElement,
    /// After an attribute name and `=`, awaiting the attribute value.
    TagAttribute,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Content => write!(f, "content"),
            Self::TagElement => write!(f, "tag element"),
            Self::TagAttribute => write!(f, "tag attribute"),
        }
    }
}

/// How a value passed to [`XmlPrinter::value`] was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueContext {
    /// The value completed the pending attribute.
    Attribute,
    /// The value was written as element content.
    Content,
}

/// The structural operations of an encoding-specialized printer.
///
/// This is the object-safe face of [`ElementPrinter`], letting the
/// dispatcher hold one printer for an encoding chosen at runtime.
pub trait StructuralPrinter: fmt::Debug + Send {
    /// Starts an element named `name`.
    ///
    /// # Errors
    ///
    /// Never fails for a selected printer; the signature matches the other
    /// operations.
    fn open_tag(&mut self, name: &[u8], sink: &mut Vec<u8>) -> Result<()>;

    /// Starts an attribute named `name` on the current start-tag.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::ProtocolViolation` unless the printer is inside a
    /// start-tag with no pending attribute.
    fn attribute(&mut self, name: &[u8], sink: &mut Vec<u8>) -> Result<()>;

    /// Writes `text` as the pending attribute's value or as element content.
    ///
    /// # Errors
    ///
    /// Never fails for a selected printer.
    fn value(&mut self, text: &[u8], sink: &mut Vec<u8>) -> Result<ValueContext>;

    /// Closes the innermost open element.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::EmptyTagStack` if no element is open and
    /// `PrintError::ProtocolViolation` if an attribute value is pending.
    fn close_tag(&mut self, sink: &mut Vec<u8>) -> Result<()>;

    /// Returns the current output state.
    fn state(&self) -> State;

    /// Returns the number of open elements.
    fn depth(&self) -> usize;

    /// Returns the name of the innermost open element.
    fn current_tag(&self) -> Option<&[u8]>;

    /// Returns the names of all open elements, outermost first.
    fn open_tags(&self) -> Vec<&[u8]>;

    /// Returns the output encoding this printer writes.
    fn encoding(&self) -> OutputEncoding;

    /// Clones the printer, including its open-tag stack and state.
    fn box_clone(&self) -> Box<dyn StructuralPrinter>;
}

impl Clone for Box<dyn StructuralPrinter> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Encoding selection of an [`XmlPrinter`].
#[derive(Debug, Clone, Default)]
pub enum Selection {
    /// No structural operation has been issued since construction or the
    /// last reset.
    #[default]
    Unselected,
    /// The label resolved to a supported encoding.
    Selected {
        /// The resolved output encoding.
        encoding: OutputEncoding,
        /// The printer specialized for `encoding`.
        printer: Box<dyn StructuralPrinter>,
    },
    /// The label names no supported encoding. Every operation fails until
    /// the label is replaced.
    Unsupported {
        /// The rejected label.
        label: String,
    },
}

/// Instantiates the element printer for `encoding`.
fn instantiate(
    encoding: OutputEncoding,
    label: &str,
    app: &'static Encoding,
) -> Box<dyn StructuralPrinter> {
    match encoding {
        OutputEncoding::Utf8 => Box::new(ElementPrinter::<Utf8>::new(label, app)),
        OutputEncoding::Utf16Be => Box::new(ElementPrinter::<Utf16Be>::new(label, app)),
        OutputEncoding::Utf16Le => Box::new(ElementPrinter::<Utf16Le>::new(label, app)),
        OutputEncoding::Ucs2Be => Box::new(ElementPrinter::<Ucs2Be>::new(label, app)),
        OutputEncoding::Ucs2Le => Box::new(ElementPrinter::<Ucs2Le>::new(label, app)),
        OutputEncoding::Ucs4Be => Box::new(ElementPrinter::<Ucs4Be>::new(label, app)),
        OutputEncoding::Ucs4Le => Box::new(ElementPrinter::<Ucs4Le>::new(label, app)),
        OutputEncoding::IsoLatin1 => Box::new(ElementPrinter::<IsoLatin1>::new(label, app)),
    }
}

/// A streaming XML printer with a runtime-selected output encoding.
///
/// The encoding is resolved lazily, on the first structural operation or an
/// explicit [`select`](Self::select). Once resolved it stays fixed until
/// [`reset`](Self::reset) or a new label is installed.
///
/// Cloning a printer clones its open-tag stack and output state, so the
/// copy and the original continue independently.
#[derive(Debug, Clone)]
pub struct XmlPrinter<A: XmlAttributes = DocumentAttributes> {
    attributes: A,
    selection: Selection,
}

impl<A: XmlAttributes> XmlPrinter<A> {
    /// Creates a printer. No encoding is selected yet.
    #[must_use]
    pub fn new(attributes: A) -> Self {
        Self {
            attributes,
            selection: Selection::Unselected,
        }
    }

    /// Returns the attribute holder.
    #[must_use]
    pub fn attributes(&self) -> &A {
        &self.attributes
    }

    /// Replaces the attribute holder and discards the current selection,
    /// including any open elements.
    pub fn set_attributes(&mut self, attributes: A) {
        self.attributes = attributes;
        self.reset();
    }

    /// Discards the selected printer so the next operation re-reads the
    /// encoding label. Open elements and output state are dropped.
    pub fn reset(&mut self) {
        self.selection = Selection::Unselected;
    }

    /// Returns the current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the selected output encoding, if one has been resolved.
    #[must_use]
    pub fn selected_encoding(&self) -> Option<OutputEncoding> {
        match &self.selection {
            Selection::Selected { encoding, .. } => Some(*encoding),
            Selection::Unselected | Selection::Unsupported { .. } => None,
        }
    }

    /// Resolves the encoding label now instead of on first use.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::UnsupportedEncoding` if the label names no
    /// supported encoding. The failure is remembered.
    pub fn select(&mut self) -> Result<OutputEncoding> {
        match &self.selection {
            Selection::Selected { encoding, .. } => return Ok(*encoding),
            Selection::Unsupported { label } => {
                return Err(PrintError::UnsupportedEncoding {
                    label: label.clone(),
                })
            }
            Selection::Unselected => {}
        }

        let label = self.attributes.encoding();
        let Some(encoding) = OutputEncoding::from_label(label) else {
            log::debug!("rejected output encoding label {label:?}");
            self.selection = Selection::Unsupported {
                label: label.to_string(),
            };
            return Err(PrintError::UnsupportedEncoding {
                label: label.to_string(),
            });
        };

        log::debug!("selected output encoding {encoding} for label {label:?}");
        let printer = instantiate(encoding, label, self.attributes.app_encoding());
        self.selection = Selection::Selected { encoding, printer };
        Ok(encoding)
    }

    /// Returns the output state, or `None` before a printer is selected.
    #[must_use]
    pub fn state(&self) -> Option<State> {
        match &self.selection {
            Selection::Selected { printer, .. } => Some(printer.state()),
            Selection::Unselected | Selection::Unsupported { .. } => None,
        }
    }

    /// Returns the number of open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        match &self.selection {
            Selection::Selected { printer, .. } => printer.depth(),
            Selection::Unselected | Selection::Unsupported { .. } => 0,
        }
    }

    /// Returns the names of the open elements, outermost first.
    #[must_use]
    pub fn open_tags(&self) -> Vec<&[u8]> {
        match &self.selection {
            Selection::Selected { printer, .. } => printer.open_tags(),
            Selection::Unselected | Selection::Unsupported { .. } => Vec::new(),
        }
    }

    fn instance(&mut self) -> Result<&mut (dyn StructuralPrinter + 'static)> {
        self.select()?;
        match &mut self.selection {
            Selection::Selected { printer, .. } => Ok(printer.as_mut()),
            Selection::Unselected | Selection::Unsupported { .. } => {
                Err(PrintError::UnsupportedEncoding {
                    label: self.attributes.encoding().to_string(),
                })
            }
        }
    }

    /// Starts an element.
    ///
    /// Writes the XML declaration first if nothing has been written, and
    /// closes a pending start-tag with `>`.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::UnsupportedEncoding` if the encoding label is not
    /// supported.
    pub fn open_tag(&mut self, name: &[u8], sink: &mut Vec<u8>) -> Result<()> {
        self.instance()?.open_tag(name, sink)
    }

    /// Starts an attribute on the element opened last.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::ProtocolViolation` if the printer is not inside a
    /// start-tag or an attribute value is already pending, and
    /// `PrintError::UnsupportedEncoding` for an unsupported label. Nothing is
    /// written on error.
    pub fn attribute(&mut self, name: &[u8], sink: &mut Vec<u8>) -> Result<()> {
        self.instance()?.attribute(name, sink)
    }

    /// Writes an attribute value or element content, depending on state.
    ///
    /// Returns [`ValueContext::Attribute`] if the value completed a pending
    /// attribute and [`ValueContext::Content`] if it was written as content.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::UnsupportedEncoding` if the encoding label is not
    /// supported.
    pub fn value(&mut self, text: &[u8], sink: &mut Vec<u8>) -> Result<ValueContext> {
        self.instance()?.value(text, sink)
    }

    /// Closes the innermost open element.
    ///
    /// The written close tag uses the name recorded when the element was
    /// opened; `name` is not checked against it.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::EmptyTagStack` if no element is open,
    /// `PrintError::ProtocolViolation` if an attribute value is pending, and
    /// `PrintError::UnsupportedEncoding` for an unsupported label. Nothing is
    /// written on error.
    pub fn close_tag(&mut self, name: &[u8], sink: &mut Vec<u8>) -> Result<()> {
        let printer = self.instance()?;
        if let Some(open) = printer.current_tag() {
            if open != name {
                log::trace!(
                    "close tag {:?} does not match open element {:?}",
                    String::from_utf8_lossy(name),
                    String::from_utf8_lossy(open)
                );
            }
        }
        printer.close_tag(sink)
    }
}

impl XmlPrinter<DocumentAttributes> {
    /// Creates a printer for the given output encoding label and UTF-8
    /// application strings.
    #[must_use]
    pub fn with_encoding(label: &str) -> Self {
        Self::new(DocumentAttributes::new(label))
    }

    /// Installs a new output encoding label and discards the current
    /// selection.
    pub fn set_encoding(&mut self, label: &str) {
        let attributes = self.attributes.clone().with_encoding(label);
        self.set_attributes(attributes);
    }
}

impl Default for XmlPrinter<DocumentAttributes> {
    fn default() -> Self {
        Self::new(DocumentAttributes::default())
    }
}
