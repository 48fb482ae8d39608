//! XSD built-in type → protobuf type mapping

use crate::error::ConversionError;
use crate::names::clean_type_name;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Protobuf type for an XSD built-in, by prefix-free name
fn builtin_proto_type(xsd_type: &str) -> Option<&'static str> {
    let proto = match xsd_type {
        "string" | "normalizedString" | "token" | "NMTOKEN" | "Name" | "NCName" | "ID"
        | "IDREF" => "string",
        "boolean" => "bool",
        "int" | "integer" | "short" | "byte" | "unsignedByte" => "int32",
        "long" | "unsignedInt" => "int64",
        "unsignedLong" => "uint64",
        "unsignedShort" => "uint32",
        "float" => "float",
        "double" | "decimal" => "double",
        "dateTime" | "date" | "time" => "google.protobuf.Timestamp",
        "duration" => "google.protobuf.Duration",
        "anyURI" => "string",
        "base64Binary" | "hexBinary" => "bytes",
        _ => return None,
    };
    Some(proto)
}

/// Import path for a well-known protobuf type
fn well_known_import(proto_type: &str) -> Option<&'static str> {
    match proto_type {
        "google.protobuf.Timestamp" => Some("google/protobuf/timestamp.proto"),
        "google.protobuf.Duration" => Some("google/protobuf/duration.proto"),
        "google.protobuf.Any" => Some("google/protobuf/any.proto"),
        "google.protobuf.Empty" => Some("google/protobuf/empty.proto"),
        "google.protobuf.Struct" | "google.protobuf.Value" | "google.protobuf.ListValue" => {
            Some("google/protobuf/struct.proto")
        }
        "google.protobuf.FieldMask" => Some("google/protobuf/field_mask.proto"),
        _ => None,
    }
}

/// Maps XSD type references to protobuf type names
///
/// Custom mappings are keyed by prefix-free XSD name and take precedence
/// over the built-in table.
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
    custom_mappings: IndexMap<String, String>,
}

impl TypeMapper {
    /// Create a mapper with no custom mappings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper with the given custom mappings
    pub fn with_custom_mappings(custom_mappings: IndexMap<String, String>) -> Self {
        Self { custom_mappings }
    }

    /// Add or replace a custom mapping
    pub fn add_custom_mapping(&mut self, xsd_type: impl Into<String>, proto_type: impl Into<String>) {
        self.custom_mappings.insert(xsd_type.into(), proto_type.into());
    }

    /// Whether `type_name` has a custom mapping
    pub fn has_custom_mapping(&self, type_name: &str) -> bool {
        self.custom_mappings
            .contains_key(clean_type_name(type_name))
    }

    /// Map an XSD type reference to a protobuf type.
    ///
    /// Names outside the built-in table come back prefix-free and otherwise
    /// unchanged; the converter resolves them against declared types.
    pub fn map_type(&self, xsd_type: &str) -> Result<String, ConversionError> {
        let clean = clean_type_name(xsd_type);

        if let Some(proto) = self.custom_mappings.get(clean) {
            return Ok(proto.clone());
        }

        Ok(builtin_proto_type(clean).unwrap_or(clean).to_string())
    }

    /// Whether `type_name` (prefixed or not) is an XSD built-in this mapper knows
    pub fn is_built_in(&self, type_name: &str) -> bool {
        builtin_proto_type(clean_type_name(type_name)).is_some()
    }

    /// Import paths needed by the given protobuf types, sorted and deduplicated
    pub fn required_imports<'a, I>(&self, proto_types: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        proto_types
            .into_iter()
            .filter_map(well_known_import)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
