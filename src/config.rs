//! Configuration file support
//!
//! Loads settings from ~/.hwt.toml (or %USERPROFILE%\.hwt.toml on Windows),
//! or from a path given on the command line.
//!
//! Example:
//! ```text
//! # words to flag
//! highlight = [
//!     "todo",
//!     { highlight = { pattern = "\\d+", global = true }, class_name = "number" },
//!     { highlight = [0, 5], class_name = "intro" },
//! ]
//! whitespace-wrap = true
//!
//! [colors]
//! number = "cyan"
//! intro = "dark_yellow"
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::{HighlightError, Result};
use crate::highlight::HighlightSpec;

/// Configuration settings
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// What to highlight
    pub highlight: HighlightSpec,
    /// Whether to add a break opportunity after every space
    pub whitespace_wrap: bool,
    /// Terminal color name per class name, for the preview
    pub colors: HashMap<String, String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".hwt.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".hwt.toml"))
        }
    }

    /// Load configuration from the default path.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is
    /// an error.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Config::default());
        };
        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table)?;
        Ok(config)
    }

    /// Apply settings from a parsed table. Unknown keys are ignored.
    fn apply(&mut self, table: &Table) -> Result<()> {
        if let Some(value) = table.get("highlight") {
            self.highlight =
                HighlightSpec::from_value(value).map_err(HighlightError::into_configuration)?;
        }

        if let Some(value) = table
            .get("whitespace-wrap")
            .or_else(|| table.get("whitespace_wrap"))
        {
            self.whitespace_wrap = match value {
                Value::Boolean(b) => *b,
                Value::String(s) => parse_bool(s),
                other => {
                    return Err(HighlightError::Configuration(format!(
                        "whitespace-wrap must be a boolean, found {}",
                        other.type_str()
                    )))
                }
            };
        }

        if let Some(Value::Table(colors)) = table.get("colors") {
            for (class_name, color) in colors {
                match color {
                    Value::String(color) => {
                        self.colors.insert(class_name.clone(), color.clone());
                    }
                    other => warn!(
                        class_name = %class_name,
                        found = other.type_str(),
                        "ignoring non-string color"
                    ),
                }
            }
        }

        Ok(())
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}
