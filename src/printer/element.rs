//! Encoding-specialized structural state machine.
//!
//! `ElementPrinter<E>` is the printer proper: it tracks the output state and
//! the open-tag stack, writes the markup delimiters, and routes names and
//! values through the escape engine into the output encoding `E`.

use std::marker::PhantomData;

use encoding_rs::Encoding;

use crate::encoding::{CharEncoder, OutputEncoding};
use crate::error::{Operation, PrintError, Result};
use crate::escape::{escape_to_buffer, print_str, print_to_buffer, ATTRIBUTE_TABLE, CONTENT_TABLE};
use crate::util::tagstack::TagStack;

use super::{State, StructuralPrinter, ValueContext};

/// Prints XML structure in the output encoding `E`.
///
/// # Examples
///
/// ```
/// use xmlprinter::encoding::Utf8;
/// use xmlprinter::printer::{ElementPrinter, StructuralPrinter};
///
/// let mut printer = ElementPrinter::<Utf8>::new("UTF-8", encoding_rs::UTF_8);
/// let mut out = Vec::new();
/// printer.open_tag(b"a", &mut out).unwrap();
/// printer.close_tag(&mut out).unwrap();
/// assert!(out.ends_with(b"?>\n<a/>"));
/// ```
#[derive(Debug, Clone)]
pub struct ElementPrinter<E: CharEncoder> {
    state: State,
    tags: TagStack,
    /// Encoding label written into the XML declaration, verbatim.
    label: String,
    /// Encoding of names and values passed in by the caller.
    app: &'static Encoding,
    encoder: PhantomData<E>,
}

impl<E: CharEncoder> ElementPrinter<E> {
    /// Creates a printer in the initial state.
    #[must_use]
    pub fn new(label: &str, app: &'static Encoding) -> Self {
        Self {
            state: State::Init,
            tags: TagStack::new(),
            label: label.to_string(),
            app,
            encoder: PhantomData,
        }
    }

    fn print_header(&mut self, sink: &mut Vec<u8>) {
        print_str::<E>("<?xml version=\"1.0\" encoding=\"", sink);
        print_str::<E>(&self.label, sink);
        print_str::<E>("\" standalone=\"yes\"?>\n", sink);
        self.state = State::Content;
    }

    /// Leaves start-tag context so content or a new element can follow.
    fn exit_tag_context(&mut self, sink: &mut Vec<u8>) {
        match self.state {
            State::Init => self.print_header(sink),
            State::TagElement | State::TagAttribute => {
                E::encode('>', sink);
                self.state = State::Content;
            }
            State::Content => {}
        }
    }

    fn violation(&self, operation: Operation) -> PrintError {
        log::trace!("{operation} rejected in state {}", self.state);
        PrintError::ProtocolViolation {
            operation,
            state: self.state,
        }
    }
}

impl<E: CharEncoder> StructuralPrinter for ElementPrinter<E> {
    fn open_tag(&mut self, name: &[u8], sink: &mut Vec<u8>) -> Result<()> {
        self.exit_tag_context(sink);
        E::encode('<', sink);
        print_to_buffer::<E>(name, self.app, sink);
        self.tags.push(name);
        self.state = State::TagElement;
        Ok(())
    }

    fn attribute(&mut self, name: &[u8], sink: &mut Vec<u8>) -> Result<()> {
        if self.state != State::TagElement {
            return Err(self.violation(Operation::Attribute));
        }
        E::encode(' ', sink);
        print_to_buffer::<E>(name, self.app, sink);
        E::encode('=', sink);
        self.state = State::TagAttribute;
        Ok(())
    }

    fn value(&mut self, text: &[u8], sink: &mut Vec<u8>) -> Result<ValueContext> {
        if self.state == State::TagAttribute {
            E::encode(' ', sink);
            E::encode('"', sink);
            escape_to_buffer::<E>(text, &ATTRIBUTE_TABLE, self.app, sink);
            E::encode('"', sink);
            self.state = State::TagElement;
            return Ok(ValueContext::Attribute);
        }
        self.exit_tag_context(sink);
        escape_to_buffer::<E>(text, &CONTENT_TABLE, self.app, sink);
        Ok(ValueContext::Content)
    }

    fn close_tag(&mut self, sink: &mut Vec<u8>) -> Result<()> {
        let Some(name) = self.tags.top() else {
            log::trace!("close tag rejected: no open element");
            return Err(PrintError::EmptyTagStack);
        };
        match self.state {
            State::TagElement => {
                print_str::<E>("/>", sink);
                self.state = State::Content;
            }
            State::Content => {
                print_str::<E>("</", sink);
                print_to_buffer::<E>(name, self.app, sink);
                E::encode('>', sink);
            }
            State::Init | State::TagAttribute => {
                return Err(self.violation(Operation::CloseTag));
            }
        }
        self.tags.pop();
        Ok(())
    }

    fn state(&self) -> State {
        self.state
    }

    fn depth(&self) -> usize {
        self.tags.len()
    }

    fn current_tag(&self) -> Option<&[u8]> {
        self.tags.top()
    }

    fn open_tags(&self) -> Vec<&[u8]> {
        self.tags.iter().collect()
    }

    fn encoding(&self) -> OutputEncoding {
        E::ENCODING
    }

    fn box_clone(&self) -> Box<dyn StructuralPrinter> {
        Box::new(self.clone())
    }
}
