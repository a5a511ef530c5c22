//! convert-chapters configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "convert-chapters.toml";

const DEFAULT_SOURCE_DIR: &str = "docs/SoucreText/txt";
const DEFAULT_OUTPUT_DIR: &str = "src/data/chapters";
const DEFAULT_EXTENSION: &str = "txt";
const DEFAULT_INDENT: usize = 2;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConvertConfig {
    /// Directory holding the numbered chapter text files
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Directory the chapter JSON files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extension of the chapter text files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Spaces per indentation level in the JSON output
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_DIR)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            extension: default_extension(),
            indent: default_indent(),
        }
    }
}

impl ConvertConfig {
    /// Load config from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists,
    /// falling back to defaults.
    ///
    /// An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ConvertConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }
}
