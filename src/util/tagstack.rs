//! Stack of open tag names.
//!
//! The `TagStack` records the names of elements that have been opened but
//! not yet closed, so the printer can emit the matching close tag. Names are
//! kept as raw application-encoded bytes in one contiguous buffer with an
//! offsets vector, which keeps pushes allocation-free once the buffer has
//! grown to the document's maximum nesting.

/// A LIFO stack of byte-string tag names.
///
/// # Examples
///
/// ```
/// use xmlprinter::util::tagstack::TagStack;
///
/// let mut stack = TagStack::new();
/// stack.push(b"address");
/// stack.push(b"name");
/// assert_eq!(stack.top(), Some(&b"name"[..]));
/// assert_eq!(stack.pop(), Some(b"name".to_vec()));
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagStack {
    /// Concatenated names of all open tags, outermost first.
    names: Vec<u8>,
    /// Start offset in `names` of each open tag.
    starts: Vec<usize>,
}

impl TagStack {
    /// Creates an empty tag stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a tag name.
    pub fn push(&mut self, name: &[u8]) {
        self.starts.push(self.names.len());
        self.names.extend_from_slice(name);
    }

    /// Returns the innermost tag name without removing it.
    #[must_use]
    pub fn top(&self) -> Option<&[u8]> {
        let start = *self.starts.last()?;
        Some(&self.names[start..])
    }

    /// Removes and returns the innermost tag name.
    pub fn pop(&mut self) -> Option<Vec<u8>> {
        let start = self.starts.pop()?;
        Some(self.names.split_off(start))
    }

    /// Returns the number of open tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Returns `true` if no tag is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Iterates over open tag names from outermost to innermost.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.starts.iter().enumerate().map(move |(i, &start)| {
            let end = self.starts.get(i + 1).copied().unwrap_or(self.names.len());
            &self.names[start..end]
        })
    }
}
