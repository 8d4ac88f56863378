//! Error types for XML printing.
//!
//! The printer reports two kinds of failure: an operation issued in a state
//! that does not permit it (a protocol violation by the caller), and an
//! output encoding label that names no supported encoding. Neither kind
//! leaves partial output behind, and a protocol violation leaves the printer
//! usable for subsequent valid calls.

use std::fmt;

use crate::printer::State;

/// The structural operation that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
///
/// Only operations that can be rejected appear here: opening an element and
/// writing a value are legal in every state.
pub enum Operation {
    /// Starting an attribute on the current start-tag.
    Attribute,
    /// Closing the innermost open element.
    CloseTag,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute => write!(f, "attribute"),
            Self::CloseTag => write!(f, "close tag"),
        }
    }
}

/// The error type returned by the structural printing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintError {
    /// The operation is not legal in the printer's current output state.
    ProtocolViolation {
        /// The rejected operation.
        operation: Operation,
        /// The output state at the time of the call.
        state: State,
    },
    /// A close tag was requested but no element is open.
    EmptyTagStack,
    /// The output encoding label does not name a supported encoding.
    ///
    /// This error is sticky: every operation reports it until the label is
    /// replaced.
    UnsupportedEncoding {
        /// The label as supplied by the attribute holder.
        label: String,
    },
}

impl PrintError {
    /// Returns `true` for errors caused by calling an operation out of order.
    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::ProtocolViolation { .. } | Self::EmptyTagStack)
    }
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProtocolViolation { operation, state } => {
                write!(f, "{operation} not allowed in state {state}")
            }
            Self::EmptyTagStack => write!(f, "close tag without open element"),
            Self::UnsupportedEncoding { label } => {
                write!(f, "unsupported output encoding: {label:?}")
            }
        }
    }
}

impl std::error::Error for PrintError {}

/// Convenience alias for results of printing operations.
pub type Result<T> = std::result::Result<T, PrintError>;
