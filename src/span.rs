//! Defines [`Span`], a borrowed byte range within a loaded document, and
//! [`Cursor`], which walks a document buffer and carves it into spans. These
//! are the primitives the block parser in [`crate::document`] is built from;
//! nothing here copies document bytes.

use std::fmt;

/// A read-only, half-open byte range `[start, end)` within a document buffer.
/// Spans are cheap [`Copy`] values that borrow the buffer they were cut from,
/// so a span can never outlive its document. Zero-length spans are valid and
/// represent empty content.
#[derive(Clone, Copy)]
pub struct Span<'a> {
    buf: &'a [u8],
    start: usize,
    end: usize,
}

impl<'a> Span<'a> {
    /// Creates a span over `buf[start..end]`. The range must be in bounds
    /// and `start <= end`.
    pub fn new(buf: &'a [u8], start: usize, end: usize) -> Span<'a> {
        debug_assert!(start <= end && end <= buf.len(), "invalid span {}..{}", start, end);
        Span { buf, start, end }
    }

    /// A span covering the whole of `buf`.
    pub fn whole(buf: &'a [u8]) -> Span<'a> {
        Span::new(buf, 0, buf.len())
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The bytes this span covers.
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buf[self.start..self.end]
    }

    /// Returns a narrower span with leading and trailing spaces and tabs
    /// removed. Only `' '` and `'\t'` are stripped; newlines and every other
    /// byte are content. Each step removes a leading blank if there is one,
    /// otherwise a trailing blank, until neither end is blank or the span is
    /// empty.
    pub fn trim(self) -> Span<'a> {
        let mut start = self.start;
        let mut end = self.end;
        while start < end {
            if is_blank(self.buf[start]) {
                start += 1;
            } else if is_blank(self.buf[end - 1]) {
                end -= 1;
            } else {
                break;
            }
        }
        Span {
            buf: self.buf,
            start,
            end,
        }
    }
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

impl PartialEq for Span<'_> {
    /// Spans compare by content, not by position.
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Span<'_> {}

impl PartialEq<str> for Span<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Span<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Debug for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Span({}..{}, {:?})",
            self.start,
            self.end,
            String::from_utf8_lossy(self.as_bytes())
        )
    }
}

/// A forward-only read position within a document buffer.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Cursor<'a> {
        Cursor { buf, pos: 0 }
    }

    /// The offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// The unread part of the buffer.
    pub fn remainder(&self) -> Span<'a> {
        Span::new(self.buf, self.pos, self.buf.len())
    }

    /// Returns the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Consumes and returns the next byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Scans forward to the next `term` byte and returns the span from the
    /// current position up to (not including) it. The cursor is left just
    /// past the terminator. If `term` never occurs, the span covers the whole
    /// remainder and the cursor ends up at the end of the buffer; that is not
    /// an error. With `trim` set the span is passed through [`Span::trim`].
    pub fn advance_block(&mut self, term: u8, trim: bool) -> Span<'a> {
        let start = self.pos;
        let span = match self.buf[start..].iter().position(|&b| b == term) {
            Some(offset) => {
                self.pos = start + offset + 1;
                Span::new(self.buf, start, start + offset)
            }
            None => {
                self.pos = self.buf.len();
                Span::new(self.buf, start, self.buf.len())
            }
        };
        match trim {
            true => span.trim(),
            false => span,
        }
    }
}
