//! Event-driven front end for the printer.
//!
//! Callers that already hold a sequence of structural events (for example
//! from a tokenizer) can feed them as [`PrintEvent`]s instead of calling the
//! four operations one by one.

use crate::attributes::XmlAttributes;
use crate::error::Result;

use super::{ValueContext, XmlPrinter};

/// One structural operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintEvent<'a> {
    /// Start an element.
    OpenTag(&'a [u8]),
    /// Start an attribute on the current start-tag.
    Attribute(&'a [u8]),
    /// Attribute value or element content.
    Value(&'a [u8]),
    /// Close the innermost element. The name is informational.
    CloseTag(&'a [u8]),
}

impl<A: XmlAttributes> XmlPrinter<A> {
    /// Applies one event.
    ///
    /// Returns the [`ValueContext`] for value events and `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying operation.
    pub fn print_event(
        &mut self,
        event: PrintEvent<'_>,
        sink: &mut Vec<u8>,
    ) -> Result<Option<ValueContext>> {
        match event {
            PrintEvent::OpenTag(name) => self.open_tag(name, sink).map(|()| None),
            PrintEvent::Attribute(name) => self.attribute(name, sink).map(|()| None),
            PrintEvent::Value(text) => self.value(text, sink).map(Some),
            PrintEvent::CloseTag(name) => self.close_tag(name, sink).map(|()| None),
        }
    }

    /// Applies events in order, stopping at the first error.
    ///
    /// Output of the events before the failing one stays in `sink`.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn print_events<'e, I>(&mut self, events: I, sink: &mut Vec<u8>) -> Result<()>
    where
        I: IntoIterator<Item = PrintEvent<'e>>,
    {
        for event in events {
            self.print_event(event, sink)?;
        }
        Ok(())
    }
}

/// Prints a complete event sequence with a fresh printer and returns the
/// output bytes.
///
/// # Examples
///
/// ```
/// use xmlprinter::{print_document, DocumentAttributes, PrintEvent};
///
/// let out = print_document(
///     DocumentAttributes::new("UTF-8"),
///     [
///         PrintEvent::OpenTag(b"a"),
///         PrintEvent::Value(b"1 < 2"),
///         PrintEvent::CloseTag(b"a"),
///     ],
/// )
/// .unwrap();
/// assert!(out.ends_with(b"<a>1 &lt; 2</a>"));
/// ```
///
/// # Errors
///
/// Returns the first error encountered; partial output is discarded.
pub fn print_document<'e, A, I>(attributes: A, events: I) -> Result<Vec<u8>>
where
    A: XmlAttributes,
    I: IntoIterator<Item = PrintEvent<'e>>,
{
    let mut printer = XmlPrinter::new(attributes);
    let mut sink = Vec::new();
    printer.print_events(events, &mut sink)?;
    Ok(sink)
}
