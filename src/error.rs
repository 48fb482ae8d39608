//! Error types for xsd2proto
//!
//! This module defines all error types used throughout the library.
//! Every failure is fatal to the call that produced it; callers decide
//! whether to abort a whole run or continue with other input files.

use std::fmt;
use thiserror::Error;

/// Result type alias using the xsd2proto Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xsd2proto operations
#[derive(Error, Debug)]
pub enum Error {
    /// XSD document could not be decoded into a schema tree
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Schema tree could not be converted into a proto model
    #[error("{0}")]
    Conversion(#[from] ConversionError),

    /// Schema failed the minimal structural checks
    #[error("schema validation failed: {0}")]
    Validation(String),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON serialization error
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// XSD parsing error with optional location
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// File the error was raised for
    pub location: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref loc) = self.location {
            write!(f, " (in {})", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Failure raised by the conversion engine.
///
/// The wrapping variants carry the name of the top-level entity being
/// converted and the 1-based pass number it was converted in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A type reference could not be mapped (strict mode only)
    #[error("unknown type {type_name:?}")]
    TypeMapping {
        /// The type name as written in the schema
        type_name: String,
    },

    /// An element was asked to produce a message but has no complex type
    #[error("element {element} has no complex type")]
    MissingComplexType {
        /// Element name
        element: String,
    },

    /// Failure while converting a top-level complex type
    #[error("failed to convert complex type {name} (pass {pass}): {source}")]
    ComplexType {
        /// Complex type name
        name: String,
        /// Pass number
        pass: u8,
        /// Underlying failure
        source: Box<ConversionError>,
    },

    /// Failure while converting a top-level element
    #[error("failed to convert element {name} (pass {pass}): {source}")]
    Element {
        /// Element name
        name: String,
        /// Pass number
        pass: u8,
        /// Underlying failure
        source: Box<ConversionError>,
    },
}

impl ConversionError {
    /// Wrap this error as a complex type failure
    pub fn in_complex_type(self, name: impl Into<String>, pass: u8) -> Self {
        Self::ComplexType {
            name: name.into(),
            pass,
            source: Box::new(self),
        }
    }

    /// Wrap this error as an element failure
    pub fn in_element(self, name: impl Into<String>, pass: u8) -> Self {
        Self::Element {
            name: name.into(),
            pass,
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping wrapper variants
    pub fn root_cause(&self) -> &ConversionError {
        match self {
            Self::ComplexType { source, .. } | Self::Element { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("Expected xs:schema root element, got root")
            .with_location("schemas/person.xsd");
        let msg = err.to_string();
        assert!(msg.contains("Expected xs:schema root element"));
        assert!(msg.contains("schemas/person.xsd"));
    }

    #[test]
    fn test_conversion_error_wrapping() {
        let err = ConversionError::TypeMapping {
            type_name: "tns:Missing".to_string(),
        }
        .in_complex_type("Person", 2);

        let msg = err.to_string();
        assert!(msg.starts_with("failed to convert complex type Person"));
        assert!(msg.contains("pass 2"));
        assert!(msg.contains("tns:Missing"));
        assert_eq!(
            err.root_cause(),
            &ConversionError::TypeMapping {
                type_name: "tns:Missing".to_string()
            }
        );
    }

    #[test]
    fn test_error_from_conversion() {
        let err: Error = ConversionError::MissingComplexType {
            element: "person".to_string(),
        }
        .in_element("person", 3)
        .into();
        assert!(matches!(err, Error::Conversion(_)));
        assert!(err.to_string().starts_with("failed to convert element person"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
