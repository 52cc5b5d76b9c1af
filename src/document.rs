//! Defines the [`Document`], [`Header`], [`Block`], and [`Error`] types, and
//! the line-oriented parser that turns a document buffer into blocks.
//!
//! A document looks like this:
//!
//! ```text
//! 2024-01-01 | My Title
//!  A paragraph starts with a space.
//! # A heading
//! ! https://example.org | a link
//! - a list item
//! - another list item
//! `code lines keep their
//! `   leading whitespace
//! ```
//!
//! The first line is the header. Every following line is classified by its
//! first byte (see [`Blocks`]). Blocks are produced lazily so that a caller
//! can render them as they come; nothing is kept once a block is consumed.

use crate::span::{Cursor, Span};
use std::fmt;

const HEADER_SEPARATOR: u8 = b'|';
const LINK_SEPARATOR: u8 = b'|';
const NEWLINE: u8 = b'\n';
const PARAGRAPH_MARKER: u8 = b' ';
const HEADING_MARKER: u8 = b'#';
const LINK_MARKER: u8 = b'!';
const LIST_MARKER: u8 = b'-';
const CODE_MARKER: u8 = b'`';

/// The date and title from a document's first line (`date | title`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header<'a> {
    pub date: Span<'a>,
    pub title: Span<'a>,
}

impl<'a> Header<'a> {
    /// Parses the header from the start of `cursor`, leaving the cursor at
    /// the first body line. The header line must contain a `|` before its
    /// newline; otherwise the scanner would run the date on into the body, so
    /// [`Error::MalformedHeader`] is returned instead and the cursor is left
    /// untouched.
    pub fn parse(cursor: &mut Cursor<'a>) -> Result<Header<'a>> {
        let line = cursor.remainder().as_bytes();
        let line = match line.iter().position(|&b| b == NEWLINE) {
            Some(end) => &line[..end],
            None => line,
        };
        if !line.contains(&HEADER_SEPARATOR) {
            return Err(Error::MalformedHeader);
        }

        let date = cursor.advance_block(HEADER_SEPARATOR, true);
        let title = cursor.advance_block(NEWLINE, true);
        Ok(Header { date, title })
    }
}

/// One semantic unit of a document body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block<'a> {
    /// A line starting with a space.
    Paragraph(Span<'a>),

    /// A line starting with `#`.
    Heading(Span<'a>),

    /// A line starting with `!`, holding `href | label`.
    Link { href: Span<'a>, label: Span<'a> },

    /// Consecutive lines starting with `-`, one item per line.
    List(Vec<Span<'a>>),

    /// Consecutive lines starting with `` ` ``, kept untrimmed.
    Code(Vec<Span<'a>>),

    /// A bare newline. Renders as nothing.
    Blank,
}

/// A parsed header plus a cursor positioned at the start of the body. The
/// body itself is only parsed when [`Document::blocks`] is iterated.
#[derive(Clone, Debug)]
pub struct Document<'a> {
    pub header: Header<'a>,
    body: Cursor<'a>,
}

impl<'a> Document<'a> {
    pub fn parse(source: &'a [u8]) -> Result<Document<'a>> {
        let mut body = Cursor::new(source);
        let header = Header::parse(&mut body)?;
        Ok(Document { header, body })
    }

    pub fn blocks(self) -> Blocks<'a> {
        Blocks {
            cursor: self.body,
            failed: false,
        }
    }
}

/// Iterates over the blocks of a document body, driven by the lead byte of
/// each remaining line:
///
/// | lead byte | block |
/// |-----------|-------|
/// | `\n`      | [`Block::Blank`] |
/// | `' '`     | [`Block::Paragraph`], rest of line trimmed |
/// | `#`       | [`Block::Heading`], rest of line trimmed |
/// | `!`       | [`Block::Link`], href up to `\|` and label up to `\n`, both trimmed |
/// | `-`       | [`Block::List`], one trimmed item per consecutive `-` line |
/// | `` ` ``   | [`Block::Code`], one untrimmed line per consecutive `` ` `` line |
///
/// Any other lead byte yields [`Error::UnrecognizedBlockMarker`], after
/// which the iterator is exhausted.
pub struct Blocks<'a> {
    cursor: Cursor<'a>,
    failed: bool,
}

impl<'a> Blocks<'a> {
    fn next_block(&mut self) -> Option<Result<Block<'a>>> {
        let offset = self.cursor.position();
        let lead = self.cursor.bump()?;
        Some(match lead {
            NEWLINE => Ok(Block::Blank),
            PARAGRAPH_MARKER => Ok(Block::Paragraph(self.cursor.advance_block(NEWLINE, true))),
            HEADING_MARKER => Ok(Block::Heading(self.cursor.advance_block(NEWLINE, true))),
            LINK_MARKER => {
                let href = self.cursor.advance_block(LINK_SEPARATOR, true);
                let label = self.cursor.advance_block(NEWLINE, true);
                Ok(Block::Link { href, label })
            }
            LIST_MARKER => Ok(Block::List(self.repeated(LIST_MARKER, true))),
            CODE_MARKER => Ok(Block::Code(self.repeated(CODE_MARKER, false))),
            byte => Err(Error::UnrecognizedBlockMarker { byte, offset }),
        })
    }

    /// Reads one line per consecutive `marker` line. The marker of the first
    /// line has already been consumed. After each line, if the next byte is
    /// the same marker it is consumed and another line is read; otherwise the
    /// block is closed. A marker line always starts a new line, even when
    /// nothing follows the marker.
    fn repeated(&mut self, marker: u8, trim: bool) -> Vec<Span<'a>> {
        let mut lines = Vec::new();
        loop {
            lines.push(self.cursor.advance_block(NEWLINE, trim));
            if self.cursor.peek() != Some(marker) {
                return lines;
            }
            self.cursor.bump();
        }
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Result<Block<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.next_block();
        if let Some(Err(_)) = result {
            self.failed = true;
        }
        result
    }
}

impl std::iter::FusedIterator for Blocks<'_> {}

/// Represents the result of a document-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Returned when the first line has no `|` separating date and title,
    /// including when the document is empty.
    MalformedHeader,

    /// Returned when a body line starts with a byte that is not a block
    /// marker. `offset` is the byte's position in the document.
    UnrecognizedBlockMarker { byte: u8, offset: usize },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedHeader => {
                write!(f, "first line must be `date | title`")
            }
            Error::UnrecognizedBlockMarker { byte, offset } => write!(
                f,
                "unexpected token '{}' at byte {}",
                std::ascii::escape_default(*byte),
                offset
            ),
        }
    }
}

impl std::error::Error for Error {}
