//! Template loading functionality.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{TemplateError, TemplateResult};

/// Loads infrastructure templates from disk.
///
/// The template body stays an opaque blob; nothing here interprets the
/// template language.
pub struct TemplateSource {
    path: PathBuf,
}

impl TemplateSource {
    /// Create a source for the given template file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the template body.
    ///
    /// A missing file is reported as [`TemplateError::NotFound`]; other IO
    /// failures propagate as-is.
    pub fn load(&self) -> TemplateResult<String> {
        debug!("Loading template from {:?}", self.path);

        if !self.path.exists() {
            return Err(TemplateError::NotFound(format!(
                "The file {:?} was not found",
                self.path
            )));
        }

        let body = fs::read_to_string(&self.path)?;
        info!("Template loaded successfully from {:?}.", self.path);
        Ok(body)
    }

    /// Load and check that the body parses as YAML.
    ///
    /// Well-formedness only; template semantics are still not interpreted.
    pub fn load_checked(&self) -> TemplateResult<String> {
        let body = self.load()?;
        lint(&body)?;
        Ok(body)
    }
}

/// Check that a template body is well-formed YAML.
pub fn lint(body: &str) -> TemplateResult<()> {
    serde_yaml::from_str::<serde_yaml::Value>(body)?;
    Ok(())
}
