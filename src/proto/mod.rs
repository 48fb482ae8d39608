//! Protocol Buffers output model
//!
//! The converter produces a [`ProtoFile`]; [`render`] turns it into `.proto`
//! text. All types serialize with serde for the CLI's `--json` dump.

pub mod render;

pub use render::{render, RenderOptions};

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// The only syntax this crate produces
pub const PROTO3: &str = "proto3";

/// A complete `.proto` file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtoFile {
    /// Syntax tag, always `proto3`
    pub syntax: String,
    /// Package name (not rendered when empty)
    pub package: String,
    /// Well-known-type imports, sorted
    pub imports: Vec<String>,
    /// File options such as `go_package`, in insertion order
    pub options: IndexMap<String, String>,
    /// Top-level messages in emission order
    pub messages: Vec<ProtoMessage>,
    /// Top-level enums in emission order
    pub enums: Vec<ProtoEnum>,
}

impl Default for ProtoFile {
    fn default() -> Self {
        Self::new("")
    }
}

impl ProtoFile {
    /// Create an empty proto3 file in the given package
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            syntax: PROTO3.to_string(),
            package: package.into(),
            imports: Vec::new(),
            options: IndexMap::new(),
            messages: Vec::new(),
            enums: Vec::new(),
        }
    }

    /// Set a file option, replacing any previous value for `key`
    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    /// Find a top-level message by name
    pub fn message(&self, name: &str) -> Option<&ProtoMessage> {
        self.messages.iter().find(|m| m.name == name)
    }

    /// Find a top-level enum by name
    pub fn enumeration(&self, name: &str) -> Option<&ProtoEnum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Every field of every message, nested ones included
    pub fn all_fields(&self) -> Vec<&ProtoField> {
        let mut fields = Vec::new();
        for message in &self.messages {
            message.collect_fields(&mut fields);
        }
        fields
    }
}

/// A message definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProtoMessage {
    /// Final, unique message name
    pub name: String,
    /// Fields in number order
    pub fields: Vec<ProtoField>,
    /// Nested message definitions
    pub messages: Vec<ProtoMessage>,
    /// Nested enum definitions
    pub enums: Vec<ProtoEnum>,
}

impl ProtoMessage {
    /// Create an empty message
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Find a field by name
    pub fn field(&self, name: &str) -> Option<&ProtoField> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a ProtoField>) {
        out.extend(self.fields.iter());
        for nested in &self.messages {
            nested.collect_fields(out);
        }
    }
}

/// A message field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtoField {
    /// Field name in the configured style
    pub name: String,
    /// Scalar, well-known or message/enum type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Field number, starting at 1 in each message
    pub number: u32,
    /// Cardinality from the schema
    pub label: FieldLabel,
}

impl ProtoField {
    /// Create a field
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        number: u32,
        label: FieldLabel,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            number,
            label,
        }
    }

    /// Whether the field is `repeated`
    pub fn is_repeated(&self) -> bool {
        self.label == FieldLabel::Repeated
    }
}

/// Field cardinality
///
/// proto3 has no `required`; the label records what the schema said and
/// only `repeated` reaches the rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLabel {
    /// `minOccurs="0"`, optional attributes and choice members
    #[default]
    Optional,
    /// Exactly one occurrence
    Required,
    /// More than one occurrence allowed
    Repeated,
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldLabel::Optional => write!(f, "optional"),
            FieldLabel::Required => write!(f, "required"),
            FieldLabel::Repeated => write!(f, "repeated"),
        }
    }
}

/// An enum definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProtoEnum {
    /// Final, unique enum name
    pub name: String,
    /// Values, the zero sentinel first
    pub values: Vec<ProtoEnumValue>,
}

impl ProtoEnum {
    /// Create an empty enum
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }
}

/// A single enum value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtoEnumValue {
    /// Prefixed value name
    pub name: String,
    /// Value number
    pub number: i32,
}

impl ProtoEnumValue {
    /// Create an enum value
    pub fn new(name: impl Into<String>, number: i32) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }
}
