//! Finds the document sources in an input directory and derives the name of
//! the page each one compiles to.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SOURCE_EXTENSION: &str = ".txt";
const SOURCE_EXTENSION_STEM: &str = "txt";
const HTML_EXTENSION_STEM: &str = "html";

/// A document source file and the output page derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    /// The source file's name, e.g. `hello.txt`.
    pub name: String,

    /// The full path to the source file.
    pub path: PathBuf,

    /// The name of the generated page, e.g. `hello.html`. This is both the
    /// output file name and the link target on the index page.
    pub output_name: String,
}

impl Source {
    /// Returns `None` unless `name` ends in `.txt`.
    fn from_entry(name: &str, path: PathBuf) -> Option<Source> {
        if !name.ends_with(SOURCE_EXTENSION) {
            return None;
        }
        let stem = &name[..name.len() - SOURCE_EXTENSION_STEM.len()];
        Some(Source {
            name: name.to_owned(),
            path,
            output_name: format!("{}{}", stem, HTML_EXTENSION_STEM),
        })
    }

    /// Lists the `.txt` files directly inside `dir`, sorted by file name.
    /// Subdirectories are neither listed nor descended into.
    pub fn enumerate(dir: &Path) -> Result<Vec<Source>, walkdir::Error> {
        let mut sources = Vec::new();
        for result in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        {
            let entry = result?;
            if entry.file_type().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(source) = Source::from_entry(&name, entry.into_path()) {
                sources.push(source);
            }
        }
        Ok(sources)
    }
}
