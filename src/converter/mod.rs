//! XSD → proto3 conversion
//!
//! A [`Converter`] walks a [`Schema`] in three passes:
//!
//! 1. simple types with enumerations become enums,
//! 2. named complex types become messages (array wrappers are skipped),
//! 3. top-level elements with an inline complex type become messages.
//!
//! Enums are registered first, so an enum keeps the bare name when it
//! collides with a message. All naming state lives in a
//! [`ConversionContext`] created per call; a `Converter` can be reused and
//! shared freely.
//!
//! ```
//! use std::str::FromStr;
//! use xsd2proto::converter::Converter;
//! use xsd2proto::xsd::Schema;
//!
//! let schema = Schema::from_str(r#"
//!     <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
//!                targetNamespace="http://example.com/simple">
//!       <xs:complexType name="Person">
//!         <xs:sequence>
//!           <xs:element name="firstName" type="xs:string"/>
//!         </xs:sequence>
//!       </xs:complexType>
//!     </xs:schema>"#).unwrap();
//!
//! let file = Converter::new().convert(&schema).unwrap();
//! assert_eq!(file.package, "simple");
//! assert_eq!(file.messages[0].fields[0].name, "first_name");
//! ```

mod context;
mod package;
pub mod type_mapper;

pub use context::ConversionContext;
pub use package::{package_name, DEFAULT_PACKAGE};
pub use type_mapper::TypeMapper;

use crate::error::{ConversionError, Result};
use crate::names::{clean_type_name, to_camel_case, to_pascal_case, to_snake_case};
use crate::proto::{FieldLabel, ProtoEnum, ProtoEnumValue, ProtoField, ProtoFile, ProtoMessage};
use crate::xsd::{Attribute, ComplexType, Element, ElementContent, Schema, SimpleType};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Prefix marking a candidate array wrapper type
const ARRAY_WRAPPER_PREFIX: &str = "ArrayOf";

/// Case style used for field names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldNamingStyle {
    /// `first_name`
    #[default]
    Snake,
    /// `firstName`
    Camel,
    /// `FirstName`
    Pascal,
}

impl FieldNamingStyle {
    /// Format a field name in this style
    pub fn apply(&self, name: &str) -> String {
        match self {
            FieldNamingStyle::Snake => to_snake_case(name),
            FieldNamingStyle::Camel => to_camel_case(name),
            FieldNamingStyle::Pascal => to_pascal_case(name),
        }
    }
}

impl FromStr for FieldNamingStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "snake" | "snake_case" => Ok(Self::Snake),
            "camel" | "camelcase" => Ok(Self::Camel),
            "pascal" | "pascalcase" => Ok(Self::Pascal),
            other => Err(format!(
                "unknown field style '{}' (expected snake, camel or pascal)",
                other
            )),
        }
    }
}

impl fmt::Display for FieldNamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldNamingStyle::Snake => write!(f, "snake"),
            FieldNamingStyle::Camel => write!(f, "camel"),
            FieldNamingStyle::Pascal => write!(f, "pascal"),
        }
    }
}

/// Converter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Field name style
    pub field_style: FieldNamingStyle,
    /// XSD type name → protobuf type overrides
    pub custom_mappings: IndexMap<String, String>,
    /// Reject references to types that are neither built-in nor declared
    pub strict_types: bool,
    /// File options added to every converted file
    pub options: IndexMap<String, String>,
}

impl ConverterConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field naming style
    pub fn with_field_style(mut self, style: FieldNamingStyle) -> Self {
        self.field_style = style;
        self
    }

    /// Add a custom type mapping
    pub fn with_custom_mapping(
        mut self,
        xsd_type: impl Into<String>,
        proto_type: impl Into<String>,
    ) -> Self {
        self.custom_mappings.insert(xsd_type.into(), proto_type.into());
        self
    }

    /// Enable or disable strict type checking
    pub fn with_strict_types(mut self, strict: bool) -> Self {
        self.strict_types = strict;
        self
    }

    /// Add a file option such as `go_package`
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// What a conversion produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// Top-level enums emitted
    pub enums: usize,
    /// Top-level messages emitted
    pub messages: usize,
    /// Array wrapper types folded into repeated fields
    pub collapsed_wrappers: Vec<String>,
    /// Types whose final name differs from the declared one
    pub renamed: IndexMap<String, String>,
}

/// Resolved type of a field
struct FieldType {
    type_name: String,
    repeated: bool,
}

impl FieldType {
    fn single(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            repeated: false,
        }
    }

    fn repeated(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            repeated: true,
        }
    }
}

/// Message under construction: field numbers and nested type names
struct MessageScope {
    message: ProtoMessage,
    next_number: u32,
    nested_names: HashSet<String>,
}

impl MessageScope {
    fn new(name: String) -> Self {
        Self {
            message: ProtoMessage::new(name),
            next_number: 1,
            nested_names: HashSet::new(),
        }
    }

    fn push_field(&mut self, name: String, field_type: FieldType, label: FieldLabel) {
        let label = if field_type.repeated {
            FieldLabel::Repeated
        } else {
            label
        };
        self.message.fields.push(ProtoField::new(
            name,
            field_type.type_name,
            self.next_number,
            label,
        ));
        self.next_number += 1;
    }

    /// Nested names skip top-level type names so that sibling fields
    /// referring to a top-level type are not captured by the nested one.
    fn unique_nested_name(&mut self, ctx: &ConversionContext<'_>, element_name: &str) -> String {
        let base = to_pascal_case(element_name);
        let mut candidate = base.clone();
        let mut counter = 2;
        while self.nested_names.contains(&candidate) || ctx.is_top_level_name(&candidate) {
            candidate = format!("{}{}", base, counter);
            counter += 1;
        }
        self.nested_names.insert(candidate.clone());
        candidate
    }
}

/// XSD schema → proto3 file converter
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConverterConfig,
    mapper: TypeMapper,
}

impl Converter {
    /// Converter with the default configuration
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    /// Converter with the given configuration
    pub fn with_config(config: ConverterConfig) -> Self {
        let mapper = TypeMapper::with_custom_mappings(config.custom_mappings.clone());
        Self { config, mapper }
    }

    /// The active configuration
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// The type mapper in use
    pub fn type_mapper(&self) -> &TypeMapper {
        &self.mapper
    }

    /// Convert a schema into a proto file model.
    ///
    /// Only the schema's own declarations are converted; schemas in
    /// [`Schema::imported_schemas`] are left alone.
    pub fn convert(&self, schema: &Schema) -> Result<ProtoFile> {
        self.convert_with_summary(schema).map(|(file, _)| file)
    }

    /// Convert a schema and report what was produced
    pub fn convert_with_summary(&self, schema: &Schema) -> Result<(ProtoFile, ConversionSummary)> {
        let mut ctx = ConversionContext::new(schema);
        let mut file = ProtoFile::new(package_name(&schema.target_namespace));
        let mut summary = ConversionSummary::default();

        for (key, value) in &self.config.options {
            file.set_option(key.clone(), value.clone());
        }

        // Pass 1: enums
        for simple_type in &schema.simple_types {
            if simple_type.enumerations().is_empty() {
                continue;
            }
            let name = ctx.unique_enum_name(&simple_type.name);
            file.enums.push(self.build_enum(&mut ctx, name, simple_type));
        }

        // Pass 2: messages from named complex types
        for complex_type in &schema.complex_types {
            if is_array_wrapper(complex_type) {
                summary.collapsed_wrappers.push(complex_type.name.clone());
                continue;
            }
            let name = ctx.unique_message_name(&complex_type.name);
            let message = self
                .convert_complex_type(&mut ctx, name, complex_type)
                .map_err(|e| e.in_complex_type(&complex_type.name, 2))?;
            file.messages.push(message);
        }

        // Pass 3: messages from elements with an inline complex type
        for element in &schema.elements {
            if element.complex_type().is_none() {
                continue;
            }
            let message = self
                .convert_element_to_message(&mut ctx, element)
                .map_err(|e| e.in_element(&element.name, 3))?;
            file.messages.push(message);
        }

        let field_types: Vec<&str> = file
            .all_fields()
            .into_iter()
            .map(|f| f.type_name.as_str())
            .collect();
        file.imports = self.mapper.required_imports(field_types);

        summary.enums = file.enums.len();
        summary.messages = file.messages.len();
        summary.renamed = ctx
            .rename_map()
            .iter()
            .filter(|(original, final_name)| original != final_name)
            .map(|(original, final_name)| (original.clone(), final_name.clone()))
            .collect();

        Ok((file, summary))
    }

    fn convert_element_to_message(
        &self,
        ctx: &mut ConversionContext<'_>,
        element: &Element,
    ) -> std::result::Result<ProtoMessage, ConversionError> {
        let complex_type =
            element
                .complex_type()
                .ok_or_else(|| ConversionError::MissingComplexType {
                    element: element.name.clone(),
                })?;

        let original = if complex_type.name.is_empty() {
            &element.name
        } else {
            &complex_type.name
        };
        let name = ctx.unique_message_name(original);
        self.convert_complex_type(ctx, name, complex_type)
    }

    /// Fields come in order: sequence, choice, attributes
    fn convert_complex_type(
        &self,
        ctx: &mut ConversionContext<'_>,
        name: String,
        complex_type: &ComplexType,
    ) -> std::result::Result<ProtoMessage, ConversionError> {
        let mut scope = MessageScope::new(name);

        if let Some(sequence) = &complex_type.sequence {
            for element in &sequence.elements {
                let label = occurs_label(&element.min_occurs, &element.max_occurs);
                self.add_element_field(ctx, &mut scope, element, label)?;
            }
        }

        // Exactly one alternative is set, so every choice field is optional,
        // even one that would otherwise be repeated.
        if let Some(choice) = &complex_type.choice {
            for element in &choice.elements {
                self.add_element_field(ctx, &mut scope, element, FieldLabel::Optional)?;
                if let Some(field) = scope.message.fields.last_mut() {
                    field.label = FieldLabel::Optional;
                }
            }
        }

        for attribute in &complex_type.attributes {
            self.add_attribute_field(ctx, &mut scope, attribute)?;
        }

        Ok(scope.message)
    }

    fn add_element_field(
        &self,
        ctx: &mut ConversionContext<'_>,
        scope: &mut MessageScope,
        element: &Element,
        label: FieldLabel,
    ) -> std::result::Result<(), ConversionError> {
        let field_name = self.config.field_style.apply(&element.name);

        let field_type = match &element.content {
            ElementContent::TypeRef(type_name) => self.resolve_type_ref(ctx, type_name)?,
            ElementContent::InlineComplex(complex_type) => {
                let nested_name = scope.unique_nested_name(ctx, &element.name);
                let nested = self.convert_complex_type(ctx, nested_name.clone(), complex_type)?;
                scope.message.messages.push(nested);
                FieldType::single(nested_name)
            }
            ElementContent::InlineSimple(simple_type) if !simple_type.enumerations().is_empty() => {
                let nested_name = scope.unique_nested_name(ctx, &element.name);
                let nested = self.build_enum(ctx, nested_name.clone(), simple_type);
                scope.message.enums.push(nested);
                FieldType::single(nested_name)
            }
            ElementContent::InlineSimple(simple_type) => self.simple_type_target(ctx, simple_type),
        };

        scope.push_field(field_name, field_type, label);
        Ok(())
    }

    fn add_attribute_field(
        &self,
        ctx: &mut ConversionContext<'_>,
        scope: &mut MessageScope,
        attribute: &Attribute,
    ) -> std::result::Result<(), ConversionError> {
        let label = if attribute.usage == "required" {
            FieldLabel::Required
        } else {
            FieldLabel::Optional
        };
        let field_type = self.resolve_type_ref(ctx, &attribute.type_name)?;
        scope.push_field(self.config.field_style.apply(&attribute.name), field_type, label);
        Ok(())
    }

    /// Resolve a `type="..."` reference.
    ///
    /// Order: array wrapper, built-in or custom mapping, registered type
    /// (exact, then PascalCase), named simple type, and finally the
    /// prefix-free name as written.
    fn resolve_type_ref(
        &self,
        ctx: &ConversionContext<'_>,
        type_name: &str,
    ) -> std::result::Result<FieldType, ConversionError> {
        if type_name.is_empty() {
            return Ok(FieldType::single("string"));
        }

        let mapped = self.mapper.map_type(type_name)?;
        let clean = clean_type_name(type_name);

        if let Some(item_type) = self.array_wrapper_item(ctx.schema(), clean)? {
            return Ok(FieldType::repeated(item_type));
        }

        if self.mapper.is_built_in(type_name) || self.mapper.has_custom_mapping(type_name) {
            return Ok(FieldType::single(mapped));
        }

        if let Some(renamed) = ctx.resolve_renamed(clean) {
            return Ok(FieldType::single(renamed));
        }

        if let Some(simple_type) = ctx
            .schema()
            .simple_types
            .iter()
            .find(|st| clean_type_name(&st.name) == clean)
        {
            return Ok(self.simple_type_target(ctx, simple_type));
        }

        if self.config.strict_types && !is_declared(ctx.schema(), clean) {
            return Err(ConversionError::TypeMapping {
                type_name: type_name.to_string(),
            });
        }

        Ok(FieldType::single(mapped))
    }

    /// Field type for a simple type that is not an enum
    fn simple_type_target(&self, ctx: &ConversionContext<'_>, simple_type: &SimpleType) -> FieldType {
        let mut visited = HashSet::new();
        if !simple_type.name.is_empty() {
            visited.insert(clean_type_name(&simple_type.name).to_string());
        }
        self.derive_simple_type(ctx, simple_type, &mut visited)
    }

    /// Follow restriction bases and list item types down to a scalar or a
    /// registered type. `visited` holds the simple types already on the chain.
    fn derive_simple_type(
        &self,
        ctx: &ConversionContext<'_>,
        simple_type: &SimpleType,
        visited: &mut HashSet<String>,
    ) -> FieldType {
        if let Some(restriction) = simple_type.restriction.as_ref().filter(|r| !r.base.is_empty()) {
            return self.derived_from(ctx, &restriction.base, visited);
        }
        if let Some(list) = simple_type.list.as_ref().filter(|l| !l.item_type.is_empty()) {
            let item = self.derived_from(ctx, &list.item_type, visited);
            return FieldType::repeated(item.type_name);
        }
        FieldType::single("string")
    }

    fn derived_from(
        &self,
        ctx: &ConversionContext<'_>,
        type_name: &str,
        visited: &mut HashSet<String>,
    ) -> FieldType {
        if self.mapper.is_built_in(type_name) || self.mapper.has_custom_mapping(type_name) {
            if let Ok(mapped) = self.mapper.map_type(type_name) {
                return FieldType::single(mapped);
            }
        }

        let clean = clean_type_name(type_name);
        if let Some(renamed) = ctx.resolve_renamed(clean) {
            return FieldType::single(renamed);
        }

        if visited.insert(clean.to_string()) {
            let schema = ctx.schema();
            if let Some(base) = schema
                .simple_types
                .iter()
                .find(|st| clean_type_name(&st.name) == clean)
            {
                return self.derive_simple_type(ctx, base, visited);
            }
        }

        FieldType::single("string")
    }

    /// Item type of the array wrapper named `clean_name`, if there is one.
    ///
    /// Built-in item types are mapped; custom ones are PascalCased without
    /// consulting the rename map.
    fn array_wrapper_item(
        &self,
        schema: &Schema,
        clean_name: &str,
    ) -> std::result::Result<Option<String>, ConversionError> {
        if !clean_name.starts_with(ARRAY_WRAPPER_PREFIX) {
            return Ok(None);
        }

        let wrapper = schema
            .complex_types
            .iter()
            .find(|ct| clean_type_name(&ct.name) == clean_name && is_array_wrapper(ct));
        let Some(item) = wrapper.and_then(wrapper_item) else {
            return Ok(None);
        };

        let item_type = item.type_name();
        if self.mapper.is_built_in(item_type) {
            return self.mapper.map_type(item_type).map(Some);
        }
        Ok(Some(to_pascal_case(clean_type_name(item_type))))
    }

    fn build_enum(
        &self,
        ctx: &mut ConversionContext<'_>,
        name: String,
        simple_type: &SimpleType,
    ) -> ProtoEnum {
        let mut proto_enum = ProtoEnum::new(name);

        let sentinel = ctx.enum_sentinel_name(&proto_enum.name);
        proto_enum.values.push(ProtoEnumValue::new(sentinel, 0));

        for (number, value) in (1..).zip(simple_type.enumerations()) {
            let value_name = ctx.enum_value_name(&proto_enum.name, value);
            proto_enum.values.push(ProtoEnumValue::new(value_name, number));
        }

        proto_enum
    }
}

/// Label from `minOccurs`/`maxOccurs`.
///
/// Any `maxOccurs` other than empty or `1` is repeated; otherwise
/// `minOccurs="0"` is optional and everything else required.
pub fn occurs_label(min_occurs: &str, max_occurs: &str) -> FieldLabel {
    if max_occurs == "unbounded" || (!max_occurs.is_empty() && max_occurs != "1") {
        FieldLabel::Repeated
    } else if min_occurs == "0" {
        FieldLabel::Optional
    } else {
        FieldLabel::Required
    }
}

fn wrapper_item(complex_type: &ComplexType) -> Option<&Element> {
    complex_type
        .sequence
        .as_ref()
        .filter(|seq| seq.elements.len() == 1)
        .map(|seq| &seq.elements[0])
}

/// `ArrayOf*` type whose only content is one repeated, typed element
pub fn is_array_wrapper(complex_type: &ComplexType) -> bool {
    if !clean_type_name(&complex_type.name).starts_with(ARRAY_WRAPPER_PREFIX) {
        return false;
    }
    if complex_type.choice.is_some() || !complex_type.attributes.is_empty() {
        return false;
    }
    match wrapper_item(complex_type) {
        Some(item) => {
            !item.type_name().is_empty()
                && occurs_label(&item.min_occurs, &item.max_occurs) == FieldLabel::Repeated
        }
        None => false,
    }
}

/// Whether `clean_name` is declared as a type in `schema` or anything it loaded
fn is_declared(schema: &Schema, clean_name: &str) -> bool {
    schema
        .complex_types
        .iter()
        .map(|ct| &ct.name)
        .chain(schema.simple_types.iter().map(|st| &st.name))
        .any(|name| clean_type_name(name) == clean_name)
        || schema
            .imported_schemas
            .iter()
            .any(|imported| is_declared(imported, clean_name))
}
