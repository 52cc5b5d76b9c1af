//! HTML text escaping for document content.
//!
//! Only `<`, `>` and `&` are replaced. Quotes are written as-is, including
//! inside `href` attributes, so a `"` in a link target ends the attribute
//! early. Generated pages must stay byte-identical to earlier builds.

use std::io::{self, Write};

fn entity(b: u8) -> Option<&'static str> {
    match b {
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        b'&' => Some("&amp;"),
        _ => None,
    }
}

/// Writes `bytes` to `w`, replacing `<`, `>` and `&` with their entities. All
/// other bytes, including newlines, tabs and non-ASCII bytes, pass through
/// unchanged. Runs of unescaped bytes are written with a single call.
pub fn render_block<W: Write + ?Sized>(w: &mut W, bytes: &[u8]) -> io::Result<()> {
    let mut run_start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if let Some(entity) = entity(b) {
            w.write_all(&bytes[run_start..i])?;
            w.write_all(entity.as_bytes())?;
            run_start = i + 1;
        }
    }
    w.write_all(&bytes[run_start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(input: &[u8]) -> String {
        let mut out = Vec::new();
        render_block(&mut out, input).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn escapes_angle_brackets_and_ampersands() {
        assert_eq!(render(b"<a & b>"), "&lt;a &amp; b&gt;");
    }

    #[test]
    fn leaves_quotes_and_whitespace_alone() {
        assert_eq!(render(b"say \"hi\"\t'x'\n"), "say \"hi\"\t'x'\n");
    }

    #[test]
    fn passes_non_ascii_bytes_through() {
        let input = "caf\u{e9} & cr\u{e8}me".as_bytes();
        assert_eq!(render(input), "caf\u{e9} &amp; cr\u{e8}me");
        let mut out = Vec::new();
        render_block(&mut out, &[0xff, b'<', 0xfe]).unwrap();
        assert_eq!(out, b"\xff&lt;\xfe");
    }

    #[test]
    fn empty_input_writes_nothing() {
        assert_eq!(render(b""), "");
    }
}
