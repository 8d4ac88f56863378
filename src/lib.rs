//! # xmlprinter
//!
//! A streaming XML printer. Structural events (open tag, attribute name,
//! value, close tag) are turned into XML bytes as they arrive, transcoded
//! from the application's character encoding into an output encoding chosen
//! at runtime from its label. Only the names of currently open elements are
//! kept; the document itself is never buffered.
//!
//! ## Quick Start
//!
//! ```
//! use xmlprinter::XmlPrinter;
//!
//! let mut printer = XmlPrinter::with_encoding("UTF-8");
//! let mut out = Vec::new();
//! printer.open_tag(b"item", &mut out).unwrap();
//! printer.attribute(b"id", &mut out).unwrap();
//! printer.value(b"5", &mut out).unwrap();
//! printer.value(b"Fish & Chips", &mut out).unwrap();
//! printer.close_tag(b"item", &mut out).unwrap();
//!
//! let xml = String::from_utf8(out).unwrap();
//! assert!(xml.ends_with("<item id= \"5\">Fish &amp; Chips</item>"));
//! ```

pub mod attributes;
pub mod encoding;
pub mod error;
pub mod escape;
pub mod printer;
pub mod script;
pub mod util;

// Re-export primary types at the crate root for convenience.
pub use attributes::{DocumentAttributes, XmlAttributes};
pub use encoding::OutputEncoding;
pub use error::{PrintError, Result};
pub use printer::{print_document, PrintEvent, State, ValueContext, XmlPrinter};
