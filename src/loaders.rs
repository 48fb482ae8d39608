//! Schema file loading
//!
//! Reads XSD files from disk, enforcing the configured [`Limits`].

use crate::error::{Error, Result};
use crate::limits::Limits;
use std::fs;
use std::path::Path;

/// File loader for XSD documents
#[derive(Debug, Clone, Default)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
}

impl Loader {
    /// Create a new loader with default limits
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
        }
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Limits enforced by this loader
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Load a file as a string
    pub fn load(&self, path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).map_err(|e| {
            Error::Resource(format!("failed to open XSD file '{}': {}", path.display(), e))
        })?;
        self.limits.check_xml_size(metadata.len() as usize)?;

        fs::read_to_string(path).map_err(|e| {
            Error::Resource(format!("failed to read XSD file '{}': {}", path.display(), e))
        })
    }
}
