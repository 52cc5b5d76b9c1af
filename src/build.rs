//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output site: loading the stylesheet, enumerating the
//! document sources ([`crate::source`]), compiling each document into a page
//! ([`crate::write`]), and finally writing the index page.

use crate::config::Config;
use crate::document::{Document, Error as ParseError};
use crate::source::Source;
use crate::util::{load, LoadError};
use crate::write::{Error as WriteError, IndexEntry, Writer};
use log::{debug, error, info, warn};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const INDEX_FILE_NAME: &str = "index.html";

/// The outcome of a build that ran to completion. Documents that failed are
/// listed in `failures`; they don't stop the build.
#[derive(Debug, Default)]
pub struct Report {
    /// The pages written completely, in enumeration order.
    pub compiled: Vec<PathBuf>,

    /// One entry per document that failed to load, parse, or write.
    pub failures: Vec<Error>,

    /// The number of entries listed on the index page.
    pub indexed: usize,
}

/// Builds the site from a [`Config`] object. The stylesheet is loaded once
/// and shared by every page. Each `.txt` source in the input directory is
/// compiled in name order into `<name>.html`; a document that fails is logged
/// and recorded in the [`Report`], and the build moves on to the next one.
/// Afterwards `index.html` lists every document newest first.
///
/// Only problems that prevent the build as a whole (an unreadable stylesheet
/// or input directory, an output directory that can't be created, or a
/// failure writing the index) are returned as errors.
pub fn build_site(config: &Config) -> Result<Report> {
    let stylesheet = load(&config.stylesheet).map_err(Error::Stylesheet)?;
    debug!(
        "Loaded stylesheet '{}' ({} bytes)",
        config.stylesheet.display(),
        stylesheet.len()
    );

    let sources =
        Source::enumerate(&config.input_directory).map_err(|err| Error::Enumerate {
            path: config.input_directory.clone(),
            err,
        })?;

    std::fs::create_dir_all(&config.output_directory).map_err(|err| {
        Error::CreateOutputDirectory {
            path: config.output_directory.clone(),
            err,
        }
    })?;

    let writer = Writer {
        stylesheet: &stylesheet,
        site: &config.site,
    };

    let mut report = Report::default();
    for source in &sources {
        info!("Processing {} ...", source.name);
        let output_path = config.output_directory.join(&source.output_name);
        match compile(&writer, source, &output_path) {
            Ok(()) => report.compiled.push(output_path),
            Err(err) => {
                error!("{}", err);
                report.failures.push(err);
            }
        }
    }

    info!("Creating {} ...", INDEX_FILE_NAME);
    let index_path = config.output_directory.join(INDEX_FILE_NAME);
    report.indexed = write_index(&writer, &sources, &index_path).map_err(|err| Error::Io {
        path: index_path.clone(),
        err,
    })?;

    Ok(report)
}

/// Compiles one document source into the page at `output_path`. The source
/// buffer lives only for the duration of this call. The output file is
/// created only once the header has parsed; after that, a body parse failure
/// leaves the partial page on disk.
fn compile(writer: &Writer, source: &Source, output_path: &Path) -> Result<()> {
    let contents = load(&source.path).map_err(Error::Load)?;
    let document = Document::parse(&contents).map_err(|err| Error::Header {
        path: source.path.clone(),
        err,
    })?;

    debug!("Writing {}", output_path.display());
    let io_err = |err: io::Error| Error::Io {
        path: output_path.to_owned(),
        err,
    };
    let mut out = BufWriter::new(File::create(output_path).map_err(io_err)?);
    let result = writer.write_document(&mut out, document);
    // flush on both paths so a partial page is still written out
    out.flush().map_err(io_err)?;
    result.map_err(|err| Error::Compile {
        path: source.path.clone(),
        err,
    })
}

/// Writes the index page. Each source is loaded again, lazily and newest
/// first, and only its header is parsed. Sources that can no longer be
/// loaded are left out with a warning.
fn write_index(writer: &Writer, sources: &[Source], index_path: &Path) -> io::Result<usize> {
    let entries = sources.iter().filter_map(|source| match load(&source.path) {
        Ok(contents) => Some(IndexEntry { source, contents }),
        Err(err) => {
            warn!("Leaving '{}' out of the index: {}", source.name, err);
            None
        }
    });
    let mut out = BufWriter::new(File::create(index_path)?);
    let listed = writer.write_index(&mut out, entries)?;
    out.flush()?;
    Ok(listed)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Document-level errors ([`Error::Load`],
/// [`Error::Header`], [`Error::Compile`], and [`Error::Io`] for a page) are
/// collected into the [`Report`]; the others end the build.
#[derive(Debug)]
pub enum Error {
    /// Returned when the stylesheet can't be loaded.
    Stylesheet(LoadError),

    /// Returned when the input directory can't be listed.
    Enumerate { path: PathBuf, err: walkdir::Error },

    /// Returned when the output directory can't be created.
    CreateOutputDirectory { path: PathBuf, err: io::Error },

    /// Returned when a document source can't be loaded.
    Load(LoadError),

    /// Returned when a document's first line isn't a `date | title` header.
    Header { path: PathBuf, err: ParseError },

    /// Returned when a document's body can't be compiled or written.
    Compile { path: PathBuf, err: WriteError },

    /// Returned for I/O problems creating or writing an output file.
    Io { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Stylesheet(err) => write!(f, "Loading stylesheet: {}", err),
            Error::Enumerate { path, err } => {
                write!(f, "Input path '{}' not found: {}", path.display(), err)
            }
            Error::CreateOutputDirectory { path, err } => {
                write!(f, "Creating output directory '{}': {}", path.display(), err)
            }
            Error::Load(err) => err.fmt(f),
            Error::Header { path, err } => {
                write!(f, "Parsing header of '{}': {}", path.display(), err)
            }
            Error::Compile {
                path,
                err: WriteError::Parse(err),
            } => write!(f, "{} in file '{}'", err, path.display()),
            Error::Compile { path, err } => {
                write!(f, "Compiling '{}': {}", path.display(), err)
            }
            Error::Io { path, err } => {
                write!(f, "Writing '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Stylesheet(err) => Some(err),
            Error::Enumerate { path: _, err } => Some(err),
            Error::CreateOutputDirectory { path: _, err } => Some(err),
            Error::Load(err) => Some(err),
            Error::Header { path: _, err } => Some(err),
            Error::Compile { path: _, err } => Some(err),
            Error::Io { path: _, err } => Some(err),
        }
    }
}
