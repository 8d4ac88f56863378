//! Utility modules for xmlprinter.
//!
//! Contains the open-tag name stack used by the printer.

pub mod tagstack;
