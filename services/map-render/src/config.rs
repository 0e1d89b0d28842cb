//! Render configuration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use map_common::RenderKind;
use thiserror::Error;

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("input {0} does not exist")]
    InputMissing(PathBuf),

    #[error("input {0} is not a regular file")]
    InputNotFile(PathBuf),

    #[error("output {0} is an existing file")]
    OutputIsFile(PathBuf),

    #[error("failed to create output directory {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything one render run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Map database to read.
    pub input: PathBuf,

    /// Directory the images are written to.
    pub output_dir: PathBuf,

    /// Which image to produce per segment.
    pub kind: RenderKind,

    /// Segments to render. Empty renders all of them.
    pub segments: BTreeSet<i64>,
}

impl RenderConfig {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, kind: RenderKind) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            kind,
            segments: BTreeSet::new(),
        }
    }

    /// Restrict rendering to the given segment ids.
    pub fn with_segments(mut self, segments: impl IntoIterator<Item = i64>) -> Self {
        self.segments = segments.into_iter().collect();
        self
    }

    /// Check the input and output paths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_input_file(&self.input)?;
        check_output_dir(&self.output_dir)?;
        Ok(())
    }

    /// Create the output directory if it does not exist yet.
    pub fn prepare_output_dir(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ConfigError::CreateOutput {
            path: self.output_dir.clone(),
            source,
        })
    }
}

fn check_input_file(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::InputMissing(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ConfigError::InputNotFile(path.to_path_buf()));
    }
    Ok(())
}

fn check_output_dir(path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        return Err(ConfigError::OutputIsFile(path.to_path_buf()));
    }
    Ok(())
}

/// clap value parser for the database path.
pub fn parse_input_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    check_input_file(&path).map_err(|e| e.to_string())?;
    Ok(path)
}

/// clap value parser for the output directory.
pub fn parse_output_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    check_output_dir(&path).map_err(|e| e.to_string())?;
    Ok(path)
}
