//! Defines [`Config`], the settings for one site build, and [`Site`], the
//! site-wide identity shown on the index page. The three paths come from the
//! command line; the [`Site`] may be overridden by a YAML site file.

use crate::util::open;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Site-wide text for the index page and the page footer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Site {
    /// The index page's `<title>` and `<h1>`.
    pub title: String,

    /// The index page's subtitle line.
    pub subtitle: String,

    /// The label of the back-to-index link at the foot of every document
    /// page. This is raw HTML and is written without escaping.
    pub back_link: String,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            title: String::from("bareware.dev"),
            subtitle: String::from(
                "Engineering without abstraction layers between you and the machine!",
            ),
            back_link: String::from("&larr; Back to index"),
        }
    }
}

impl Site {
    pub fn from_file(path: &Path) -> Result<Site> {
        match serde_yaml::from_reader(open(path, "site")?) {
            Ok(site) => Ok(site),
            Err(e) => Err(anyhow!("Loading site file `{}`: {}", path.display(), e)),
        }
    }
}

pub struct Config {
    /// The directory holding the `.txt` document sources.
    pub input_directory: PathBuf,

    /// The directory the pages and `index.html` are written to. Created if
    /// it doesn't exist.
    pub output_directory: PathBuf,

    /// The stylesheet inlined into every page.
    pub stylesheet: PathBuf,

    pub site: Site,
}

impl Config {
    pub fn new(input_directory: &Path, output_directory: &Path, stylesheet: &Path) -> Config {
        Config {
            input_directory: input_directory.to_owned(),
            output_directory: output_directory.to_owned(),
            stylesheet: stylesheet.to_owned(),
            site: Site::default(),
        }
    }

    /// Replaces the default [`Site`] with one loaded from `path`.
    pub fn with_site_file(mut self, path: &Path) -> Result<Config> {
        self.site = Site::from_file(path)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn site_file_overrides_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("site.yaml");
        fs::write(&path, "title: example.org\nsubtitle: Notes & things\n")?;

        let config = Config::new(Path::new("in"), Path::new("out"), Path::new("style.css"))
            .with_site_file(&path)?;
        assert_eq!(config.site.title, "example.org");
        assert_eq!(config.site.subtitle, "Notes & things");
        assert_eq!(config.site.back_link, Site::default().back_link);
        assert_eq!(config.input_directory, PathBuf::from("in"));
        Ok(())
    }

    #[test]
    fn unknown_site_fields_are_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("site.yaml");
        fs::write(&path, "title: example.org\ntheme: dark\n")?;
        let err = Site::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("theme"));
        Ok(())
    }

    #[test]
    fn missing_site_file_is_an_error() {
        assert!(Site::from_file(Path::new("/nonexistent/site.yaml")).is_err());
    }
}
