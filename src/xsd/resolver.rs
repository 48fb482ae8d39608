//! Schema file parsing and import/include resolution
//!
//! [`SchemaParser`] reads a single XSD file. [`SchemaResolver`] follows its
//! `<import>` and `<include>` declarations recursively and attaches the
//! loaded schemas to [`Schema::imported_schemas`].

use super::Schema;
use crate::documents::Document;
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::loaders::Loader;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads XSD files into [`Schema`] values
#[derive(Debug, Clone, Default)]
pub struct SchemaParser {
    loader: Loader,
}

impl SchemaParser {
    /// Create a parser with default limits
    pub fn new() -> Self {
        Self {
            loader: Loader::new(),
        }
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.loader = self.loader.with_limits(limits);
        self
    }

    /// Limits enforced by this parser
    pub fn limits(&self) -> &Limits {
        self.loader.limits()
    }

    /// Parse a schema from a string
    pub fn parse_str(&self, xsd: &str) -> Result<Schema> {
        let doc = Document::parse(xsd.as_bytes(), self.limits())?;
        Schema::from_document(&doc)
    }

    /// Parse a single file, without following imports or includes
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Schema> {
        let path = path.as_ref();
        let content = self.loader.load(path)?;
        self.parse_str(&content).map_err(|e| match e {
            Error::Parse(pe) => Error::Parse(pe.with_location(path.display().to_string())),
            other => other,
        })
    }
}

/// Recursively loads a schema together with everything it imports or includes
#[derive(Debug, Clone, Default)]
pub struct SchemaResolver {
    parser: SchemaParser,
}

impl SchemaResolver {
    /// Create a resolver with default limits
    pub fn new() -> Self {
        Self {
            parser: SchemaParser::new(),
        }
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.parser = self.parser.with_limits(limits);
        self
    }

    /// Parse `path` and every schema reachable from it.
    ///
    /// Each file is loaded at most once; a file reached a second time (an
    /// import cycle or a diamond) is not attached again.
    pub fn resolve_file(&self, path: impl AsRef<Path>) -> Result<Schema> {
        let mut processed = HashSet::new();
        let schema = self.resolve_recursive(path.as_ref(), 0, &mut processed)?;
        // The root is never in the processed set before the first call.
        schema.ok_or_else(|| Error::Other("schema was already processed".to_string()))
    }

    fn resolve_recursive(
        &self,
        path: &Path,
        depth: usize,
        processed: &mut HashSet<PathBuf>,
    ) -> Result<Option<Schema>> {
        self.parser.limits().check_schema_depth(depth)?;

        let key = absolute_path(path)?;
        if !processed.insert(key) {
            return Ok(None);
        }

        let mut schema = self.parser.parse_file(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

        let imports = std::mem::take(&mut schema.imports);
        for import in &imports {
            let import_path = if !import.schema_location.is_empty() {
                Some(base_dir.join(&import.schema_location))
            } else {
                derive_path_from_namespace(&import.namespace, base_dir)
            };

            // Imports are optional: a missing file is skipped.
            let Some(import_path) = import_path.filter(|p| p.exists()) else {
                continue;
            };

            let imported = self
                .resolve_recursive(&import_path, depth + 1, processed)
                .map_err(|e| {
                    with_context(e, format!("failed to process import {}", import_path.display()))
                })?;
            schema.imported_schemas.extend(imported);
        }
        schema.imports = imports;

        let includes = std::mem::take(&mut schema.includes);
        for include in &includes {
            if include.schema_location.is_empty() {
                continue;
            }
            let include_path = base_dir.join(&include.schema_location);

            let included = self
                .resolve_recursive(&include_path, depth + 1, processed)
                .map_err(|e| {
                    with_context(e, format!("failed to process include {}", include.schema_location))
                })?;
            schema.imported_schemas.extend(included);
        }
        schema.includes = includes;

        Ok(Some(schema))
    }
}

/// Guess the file an `<import>` without `schemaLocation` refers to.
///
/// `./a/b` → `<dir>/a.b.xsd`, `http://host/x/y` → `<dir>/host.x.y.xsd`, and
/// anything else has its `/` replaced by `.` with `.xsd` appended.
pub fn derive_path_from_namespace(namespace: &str, base_dir: &Path) -> Option<PathBuf> {
    if namespace.is_empty() {
        return None;
    }

    let path = namespace
        .strip_prefix("./")
        .or_else(|| namespace.strip_prefix("http://"))
        .or_else(|| namespace.strip_prefix("https://"))
        .unwrap_or(namespace);

    Some(base_dir.join(format!("{}.xsd", path.replace('/', "."))))
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = fs::canonicalize(path) {
        return Ok(canonical);
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

fn with_context(err: Error, context: String) -> Error {
    match err {
        Error::LimitExceeded(_) => err,
        other => Error::Resource(format!("{}: {}", context, other)),
    }
}
