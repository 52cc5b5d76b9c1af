//! The library code for the `plainsite` static site generator. It turns a
//! directory of plain-text documents into one HTML page per document plus an
//! index page. The architecture breaks down into three layers:
//!
//! 1. Scanning primitives over a loaded document buffer ([`crate::span`])
//! 2. The block parser, which classifies each body line by its first byte
//!    ([`crate::document`])
//! 3. Rendering pages from parsed blocks ([`crate::write`], with escaping in
//!    [`crate::escape`])
//!
//! [`crate::build`] drives a whole build: it enumerates the sources
//! ([`crate::source`]), compiles them one at a time, and writes the index.
//! Each document's buffer is owned by its own compilation and dropped as soon
//! as its page is written; the only state shared across documents is the
//! read-only stylesheet and site configuration.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod document;
pub mod escape;
pub mod source;
pub mod span;
pub mod util;
pub mod write;
