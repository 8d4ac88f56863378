//! Line-oriented event scripts.
//!
//! An event script lists structural events one per line, which makes it easy
//! to drive the printer from the command line or from test fixtures:
//!
//! ```text
//! # comment
//! open address
//! attr id
//! value 42
//! open name
//! value John
//! close name
//! close
//! ```
//!
//! The keyword is separated from its argument by a single space; everything
//! after it, including further spaces, is the argument. Arguments may use the
//! escapes `\n`, `\t`, `\r`, `\0`, `\b`, `\s` (space) and `\\`. Blank lines and
//! lines starting with `#` are ignored. The argument of `close` is optional.

use std::fmt;

use crate::printer::PrintEvent;

/// The kind of a scripted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `open NAME`
    OpenTag,
    /// `attr NAME`
    Attribute,
    /// `value TEXT`
    Value,
    /// `close [NAME]`
    CloseTag,
}

/// An owned event parsed from a script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEvent {
    /// What to do.
    pub kind: EventKind,
    /// Name or text, already unescaped.
    pub arg: Vec<u8>,
    /// 1-based line number in the script.
    pub line: usize,
}

impl ScriptEvent {
    /// Borrows this event as a [`PrintEvent`].
    #[must_use]
    pub fn as_print_event(&self) -> PrintEvent<'_> {
        match self.kind {
            EventKind::OpenTag => PrintEvent::OpenTag(&self.arg),
            EventKind::Attribute => PrintEvent::Attribute(&self.arg),
            EventKind::Value => PrintEvent::Value(&self.arg),
            EventKind::CloseTag => PrintEvent::CloseTag(&self.arg),
        }
    }
}

/// A malformed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    /// 1-based line number.
    pub line: usize,
    /// What is wrong with the line.
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

/// Parses an event script.
///
/// # Examples
///
/// ```
/// use xmlprinter::script::{parse_script, EventKind};
///
/// let events = parse_script("open a\nvalue x\\ty\nclose\n").unwrap();
/// assert_eq!(events.len(), 3);
/// assert_eq!(events[1].kind, EventKind::Value);
/// assert_eq!(events[1].arg, b"x\ty");
/// ```
///
/// # Errors
///
/// Returns `ScriptError` for an unknown keyword, a missing argument or an
/// invalid escape.
pub fn parse_script(input: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    let mut events = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if raw.trim().is_empty() || raw.starts_with('#') {
            continue;
        }
        let (keyword, arg) = match raw.split_once(' ') {
            Some((keyword, arg)) => (keyword, Some(arg)),
            None => (raw, None),
        };
        let kind = match keyword {
            "open" => EventKind::OpenTag,
            "attr" => EventKind::Attribute,
            "value" => EventKind::Value,
            "close" => EventKind::CloseTag,
            other => {
                return Err(ScriptError {
                    line,
                    message: format!("unknown event {other:?}"),
                })
            }
        };
        let arg = match (kind, arg) {
            (_, Some(arg)) => unescape(arg).map_err(|message| ScriptError { line, message })?,
            (EventKind::CloseTag | EventKind::Value, None) => Vec::new(),
            (EventKind::OpenTag | EventKind::Attribute, None) => {
                return Err(ScriptError {
                    line,
                    message: format!("{keyword} needs a name"),
                })
            }
        };
        events.push(ScriptEvent { kind, arg, line });
    }
    Ok(events)
}

/// Resolves backslash escapes in a script argument.
fn unescape(arg: &str) -> Result<Vec<u8>, String> {
    let mut out = Vec::with_capacity(arg.len());
    let mut chars = arg.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            let mut buf = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        let byte = match chars.next() {
            Some('n') => b'\n',
            Some('t') => b'\t',
            Some('r') => b'\r',
            Some('0') => 0,
            Some('b') => 0x08,
            Some('s') => b' ',
            Some('\\') => b'\\',
            Some(other) => return Err(format!("invalid escape \\{other}")),
            None => return Err("trailing backslash".to_string()),
        };
        out.push(byte);
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_all_kinds() {
        let events = parse_script("open a\nattr id\nvalue 5\nclose a\n").unwrap();
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::OpenTag,
                EventKind::Attribute,
                EventKind::Value,
                EventKind::CloseTag
            ]
        );
        assert_eq!(events[3].arg, b"a");
        assert_eq!(events[3].line, 4);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let events = parse_script("# header\n\n   \nopen a\r\nclose\n").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].arg, b"a");
        assert_eq!(events[0].line, 4);
        assert!(events[1].arg.is_empty());
    }

    #[test]
    fn test_value_keeps_inner_spaces() {
        let events = parse_script("value  two  spaces \n").unwrap();
        assert_eq!(events[0].arg, b" two  spaces ");
    }

    #[test]
    fn test_escapes() {
        let events = parse_script("value a\\nb\\tc\\rd\\0e\\bf\\sg\\\\h\n").unwrap();
        assert_eq!(events[0].arg, b"a\nb\tc\rd\0e\x08f g\\h");
    }

    #[test]
    fn test_unknown_keyword() {
        let err = parse_script("open a\nfrobnicate\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(
            err.to_string(),
            "script error at line 2: unknown event \"frobnicate\""
        );
    }

    #[test]
    fn test_missing_name() {
        let err = parse_script("attr\n").unwrap_err();
        assert_eq!(err.message, "attr needs a name");
    }

    #[test]
    fn test_invalid_escape() {
        let err = parse_script("value \\q\n").unwrap_err();
        assert_eq!(err.message, "invalid escape \\q");
        let err = parse_script("value x\\\n").unwrap_err();
        assert_eq!(err.message, "trailing backslash");
    }

    #[test]
    fn test_as_print_event() {
        let events = parse_script("open a\nclose\n").unwrap();
        assert_eq!(events[0].as_print_event(), PrintEvent::OpenTag(b"a"));
        assert_eq!(events[1].as_print_event(), PrintEvent::CloseTag(b""));
    }

    #[test]
    fn test_non_ascii_argument() {
        let events = parse_script("value caf\u{e9}\n").unwrap();
        assert_eq!(events[0].arg, "caf\u{e9}".as_bytes());
    }
}
