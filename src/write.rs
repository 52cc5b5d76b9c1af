//! Renders documents and the index as HTML pages. Every page shares the same
//! head: the doctype, a UTF-8 charset, a title, and the site stylesheet
//! inlined into a `<style>` element.

use crate::config::Site;
use crate::document::{Block, Document, Error as ParseError, Header};
use crate::escape::render_block;
use crate::source::Source;
use crate::span::Cursor;
use log::warn;
use std::fmt;
use std::io::{self, Write};

/// Responsible for rendering document and index pages. A [`Writer`] holds
/// only shared, read-only state, so one writer serves a whole build.
pub struct Writer<'a> {
    /// The stylesheet contents, escaped into every page's `<style>` element.
    pub stylesheet: &'a [u8],

    /// The site title, subtitle, and back-link label.
    pub site: &'a Site,
}

/// A document source queued for the index page, with its loaded contents.
/// Only the header of `contents` is parsed.
pub struct IndexEntry<'s> {
    pub source: &'s Source,
    pub contents: Vec<u8>,
}

impl Writer<'_> {
    /// Writes everything up to and including the page's subtitle line.
    fn write_head<W: Write>(&self, w: &mut W, title: &[u8], subtitle: &[u8]) -> io::Result<()> {
        w.write_all(b"<!DOCTYPE html><head>")?;
        w.write_all(b"<meta charset=\"utf-8\">")?;
        w.write_all(b"<title>")?;
        render_block(w, title)?;
        w.write_all(b"</title>")?;
        w.write_all(b"<style>")?;
        render_block(w, self.stylesheet)?;
        w.write_all(b"</style>")?;
        w.write_all(b"</head><body>")?;
        w.write_all(b"<h1>")?;
        render_block(w, title)?;
        w.write_all(b"</h1>")?;
        w.write_all(b"<p class=\"subt\">")?;
        render_block(w, subtitle)?;
        w.write_all(b"</p>")
    }

    /// Renders a complete page for `document`: the head with the document's
    /// title and date, each body block in order, and the back link to the
    /// index. Blocks are written as they are parsed. If the body contains an
    /// unrecognized block marker, rendering stops there and the error is
    /// returned; whatever was already written to `w` stays written.
    pub fn write_document<W: Write>(&self, w: &mut W, document: Document) -> Result<()> {
        let Header { date, title } = document.header;
        self.write_head(w, title.as_bytes(), date.as_bytes())?;
        for block in document.blocks() {
            write_block(w, &block?)?;
        }
        write!(
            w,
            r#"<p class="back"><a href="index.html">{}</a></p>"#,
            self.site.back_link
        )?;
        w.write_all(b"</body></html>")?;
        Ok(())
    }

    /// Renders the index page, listing `entries` newest first: the entries
    /// are expected in enumeration (oldest first) order and are visited in
    /// reverse. Each entry links to its page as `date - title`. Entries whose
    /// header can't be parsed are left out with a warning. Returns the
    /// number of entries listed.
    pub fn write_index<'s, W, I>(&self, w: &mut W, entries: I) -> io::Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = IndexEntry<'s>>,
        I::IntoIter: DoubleEndedIterator,
    {
        self.write_head(w, self.site.title.as_bytes(), self.site.subtitle.as_bytes())?;
        let mut listed = 0;
        for entry in entries.into_iter().rev() {
            let header = match Header::parse(&mut Cursor::new(&entry.contents)) {
                Ok(header) => header,
                Err(err) => {
                    warn!("Leaving '{}' out of the index: {}", entry.source.name, err);
                    continue;
                }
            };
            write!(w, r#"<p><a href="{}">"#, entry.source.output_name)?;
            render_block(w, header.date.as_bytes())?;
            w.write_all(b" - ")?;
            render_block(w, header.title.as_bytes())?;
            w.write_all(b"</a></p>")?;
            listed += 1;
        }
        w.write_all(b"</body></html>")?;
        Ok(listed)
    }
}

fn write_block<W: Write>(w: &mut W, block: &Block) -> io::Result<()> {
    match block {
        Block::Paragraph(text) => {
            w.write_all(b"<p>")?;
            render_block(w, text.as_bytes())?;
            w.write_all(b"</p>")
        }
        Block::Heading(text) => {
            w.write_all(b"<h2>")?;
            render_block(w, text.as_bytes())?;
            w.write_all(b"</h2>")
        }
        Block::Link { href, label } => {
            w.write_all(b"<p><a href=\"")?;
            render_block(w, href.as_bytes())?;
            w.write_all(b"\">")?;
            render_block(w, label.as_bytes())?;
            w.write_all(b"</a></p>")
        }
        Block::List(items) => {
            w.write_all(b"<ul>")?;
            for item in items {
                w.write_all(b"<li>")?;
                render_block(w, item.as_bytes())?;
                w.write_all(b"</li>")?;
            }
            w.write_all(b"</ul>")
        }
        Block::Code(lines) => {
            w.write_all(b"<pre>")?;
            for line in lines {
                render_block(w, line.as_bytes())?;
                w.write_all(b"\n")?;
            }
            w.write_all(b"</pre>")
        }
        Block::Blank => Ok(()),
    }
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// The document body couldn't be parsed. The page was written up to the
    /// offending line.
    Parse(ParseError),

    /// An error writing the page.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ParseError> for Error {
    /// Converts a [`ParseError`] into an [`Error`]. This allows us to use the
    /// `?` operator on parsed blocks.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const CSS: &[u8] = b"p > a { color: red; }";

    fn render_document(source: &[u8]) -> (String, Result<()>) {
        let site = Site::default();
        let writer = Writer {
            stylesheet: CSS,
            site: &site,
        };
        let mut out = Vec::new();
        let result = writer.write_document(&mut out, Document::parse(source).unwrap());
        (String::from_utf8(out).unwrap(), result)
    }

    fn source(name: &str) -> Source {
        Source {
            name: format!("{}.txt", name),
            path: PathBuf::from(format!("in/{}.txt", name)),
            output_name: format!("{}.html", name),
        }
    }

    fn in_order(html: &str, parts: &[&str]) {
        let mut rest = html;
        for part in parts {
            match rest.find(part) {
                Some(i) => rest = &rest[i + part.len()..],
                None => panic!("{:?} not found in order in {:?}", part, html),
            }
        }
    }

    #[test]
    fn renders_every_block_kind() {
        let (html, result) = render_document(
            b"2024-01-01 | My Title\n Hello world\n# Section\n- one\n- two\n! http://x.com | link\n",
        );
        assert!(result.is_ok());
        in_order(
            &html,
            &[
                "<h1>My Title</h1>",
                "<p class=\"subt\">2024-01-01</p>",
                "<p>Hello world</p>",
                "<h2>Section</h2>",
                "<ul><li>one</li><li>two</li></ul>",
                "<p><a href=\"http://x.com\">link</a></p>",
            ],
        );
    }

    #[test]
    fn renders_exact_page() {
        let (html, result) = render_document(b"d | A <b> & c\n\n`x < y\n`  z\n");
        assert!(result.is_ok());
        assert_eq!(
            html,
            concat!(
                "<!DOCTYPE html><head><meta charset=\"utf-8\">",
                "<title>A &lt;b&gt; &amp; c</title>",
                "<style>p &gt; a { color: red; }</style>",
                "</head><body>",
                "<h1>A &lt;b&gt; &amp; c</h1>",
                "<p class=\"subt\">d</p>",
                "<pre>x &lt; y\n  z\n</pre>",
                "<p class=\"back\"><a href=\"index.html\">&larr; Back to index</a></p>",
                "</body></html>",
            )
        );
    }

    #[test]
    fn three_list_lines_make_one_list() {
        let (html, _) = render_document(b"d | t\n-a\n-b\n-c\n");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn unrecognized_marker_keeps_partial_output() {
        let (html, result) = render_document(b"d | t\n# Before\n@ bad\n# After\n");
        match result {
            Err(Error::Parse(ParseError::UnrecognizedBlockMarker { byte: b'@', .. })) => {}
            other => panic!("expected an unrecognized marker, got {:?}", other),
        }
        assert!(html.ends_with("<h2>Before</h2>"));
        assert!(!html.contains("After"));
        assert!(!html.contains("</body></html>"));
    }

    #[test]
    fn index_lists_newest_first() -> io::Result<()> {
        let site = Site::default();
        let writer = Writer {
            stylesheet: b"",
            site: &site,
        };
        let sources = vec![source("a"), source("b"), source("c"), source("d")];
        let contents = vec![
            "2024-01-01 | First\n body",
            "2024-02-01 | Second & more\n",
            "no header here\n",
            "2024-04-01 | Fourth",
        ];
        let entries = sources.iter().zip(contents).map(|(source, contents)| IndexEntry {
            source,
            contents: contents.as_bytes().to_vec(),
        });

        let mut out = Vec::new();
        let listed = writer.write_index(&mut out, entries)?;
        let html = String::from_utf8(out).unwrap();

        assert_eq!(listed, 3);
        assert_eq!(
            html,
            concat!(
                "<!DOCTYPE html><head><meta charset=\"utf-8\">",
                "<title>bareware.dev</title><style></style></head><body>",
                "<h1>bareware.dev</h1>",
                "<p class=\"subt\">Engineering without abstraction layers between you and the machine!</p>",
                "<p><a href=\"d.html\">2024-04-01 - Fourth</a></p>",
                "<p><a href=\"b.html\">2024-02-01 - Second &amp; more</a></p>",
                "<p><a href=\"a.html\">2024-01-01 - First</a></p>",
                "</body></html>",
            )
        );
        Ok(())
    }
}
