//! XSD input model
//!
//! The subset of XML Schema that the converter understands: top-level
//! elements, named complex types built from a sequence, a choice and
//! attributes, and simple types defined by restriction, union or list.
//! Everything else in a schema document is skipped while decoding.

mod parsing;
pub mod resolver;

pub use resolver::{SchemaParser, SchemaResolver};

use crate::documents::Document;
use crate::error::{Error, Result};
use std::str::FromStr;

/// A decoded XSD document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// `targetNamespace` attribute (empty when absent)
    pub target_namespace: String,
    /// `elementFormDefault` attribute
    pub element_form_default: String,
    /// `attributeFormDefault` attribute
    pub attribute_form_default: String,
    /// `<import>` declarations
    pub imports: Vec<Import>,
    /// `<include>` declarations
    pub includes: Vec<Include>,
    /// Top-level element declarations
    pub elements: Vec<Element>,
    /// Top-level complex type definitions
    pub complex_types: Vec<ComplexType>,
    /// Top-level simple type definitions
    pub simple_types: Vec<SimpleType>,
    /// Schemas loaded through imports and includes, imports first
    pub imported_schemas: Vec<Schema>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty schema with the given target namespace
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            target_namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Decode a schema from a parsed XML document
    pub fn from_document(doc: &Document) -> Result<Self> {
        parsing::parse_document(doc)
    }

    /// Find a top-level complex type by its prefix-free name
    pub fn complex_type(&self, name: &str) -> Option<&ComplexType> {
        self.complex_types
            .iter()
            .find(|ct| crate::names::clean_type_name(&ct.name) == name)
    }

    /// Minimal structural check: every top-level declaration must be named
    pub fn validate(&self) -> Result<()> {
        if self.elements.iter().any(|e| e.name.is_empty()) {
            return Err(Error::Validation("element with empty name found".to_string()));
        }
        if self.complex_types.iter().any(|ct| ct.name.is_empty()) {
            return Err(Error::Validation(
                "complexType with empty name found".to_string(),
            ));
        }
        if self.simple_types.iter().any(|st| st.name.is_empty()) {
            return Err(Error::Validation(
                "simpleType with empty name found".to_string(),
            ));
        }
        Ok(())
    }
}

impl FromStr for Schema {
    type Err = Error;

    fn from_str(xsd: &str) -> Result<Self> {
        let doc = Document::from_string(xsd)?;
        Self::from_document(&doc)
    }
}

/// `<import>` declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Import {
    /// Imported namespace
    pub namespace: String,
    /// Location hint, relative to the importing file
    pub schema_location: String,
}

/// `<include>` declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Include {
    /// Location of the included file, relative to the including file
    pub schema_location: String,
}

/// What an element's value is made of
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    /// Typed by reference through the `type` attribute (empty when untyped)
    TypeRef(String),
    /// Anonymous complex type declared inside the element
    InlineComplex(ComplexType),
    /// Anonymous simple type declared inside the element
    InlineSimple(SimpleType),
}

impl Default for ElementContent {
    fn default() -> Self {
        Self::TypeRef(String::new())
    }
}

/// Element declaration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Element name
    pub name: String,
    /// `minOccurs` as written (empty when absent)
    pub min_occurs: String,
    /// `maxOccurs` as written (empty when absent)
    pub max_occurs: String,
    /// Type reference or inline type
    pub content: ElementContent,
}

impl Element {
    /// Create an element typed by reference
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: ElementContent::TypeRef(type_name.into()),
            ..Self::default()
        }
    }

    /// Create an element with an inline complex type
    pub fn with_complex_type(name: impl Into<String>, complex_type: ComplexType) -> Self {
        Self {
            name: name.into(),
            content: ElementContent::InlineComplex(complex_type),
            ..Self::default()
        }
    }

    /// Set the occurrence bounds
    pub fn with_occurs(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.min_occurs = min.into();
        self.max_occurs = max.into();
        self
    }

    /// Declared type name, empty for inline types
    pub fn type_name(&self) -> &str {
        match &self.content {
            ElementContent::TypeRef(name) => name,
            _ => "",
        }
    }

    /// Inline complex type, if any
    pub fn complex_type(&self) -> Option<&ComplexType> {
        match &self.content {
            ElementContent::InlineComplex(ct) => Some(ct),
            _ => None,
        }
    }
}

/// Ordered group of element particles (`<sequence>` or `<choice>`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementGroup {
    /// Member elements in document order
    pub elements: Vec<Element>,
    /// Group `minOccurs`
    pub min_occurs: String,
    /// Group `maxOccurs`
    pub max_occurs: String,
}

impl ElementGroup {
    /// Create a group from its elements
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }
}

/// `<sequence>` content
pub type Sequence = ElementGroup;

/// `<choice>` content
pub type Choice = ElementGroup;

/// Complex type definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexType {
    /// Type name (empty for anonymous types)
    pub name: String,
    /// `<sequence>` content
    pub sequence: Option<Sequence>,
    /// `<choice>` content
    pub choice: Option<Choice>,
    /// Attribute declarations in document order
    pub attributes: Vec<Attribute>,
}

impl ComplexType {
    /// Create an empty complex type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the sequence content
    pub fn with_sequence(mut self, elements: Vec<Element>) -> Self {
        self.sequence = Some(Sequence::new(elements));
        self
    }

    /// Set the choice content
    pub fn with_choice(mut self, elements: Vec<Element>) -> Self {
        self.choice = Some(Choice::new(elements));
        self
    }

    /// Add an attribute
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// Attribute declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Declared type name (possibly prefixed)
    pub type_name: String,
    /// `use` attribute as written (`required`, `optional`, or empty)
    pub usage: String,
}

impl Attribute {
    /// Create an attribute
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        usage: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            usage: usage.into(),
        }
    }
}

/// Simple type definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleType {
    /// Type name (empty for anonymous types)
    pub name: String,
    /// Derivation by restriction
    pub restriction: Option<Restriction>,
    /// Derivation by union
    pub union: Option<Union>,
    /// Derivation by list
    pub list: Option<List>,
}

impl SimpleType {
    /// Create a simple type restricting `base` to a set of values
    pub fn enumeration(name: impl Into<String>, base: &str, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            restriction: Some(Restriction {
                base: base.to_string(),
                enumerations: values.iter().map(|v| v.to_string()).collect(),
                ..Restriction::default()
            }),
            ..Self::default()
        }
    }

    /// Enumeration values, empty when the type is not an enumeration
    pub fn enumerations(&self) -> &[String] {
        self.restriction
            .as_ref()
            .map(|r| r.enumerations.as_slice())
            .unwrap_or_default()
    }
}

/// `<restriction>` of a simple type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restriction {
    /// Base type name
    pub base: String,
    /// `<enumeration value="...">` values in document order
    pub enumerations: Vec<String>,
    /// `<pattern>` facet
    pub pattern: Option<String>,
    /// `<minLength>` facet
    pub min_length: Option<i64>,
    /// `<maxLength>` facet
    pub max_length: Option<i64>,
}

/// `<union>` of a simple type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Union {
    /// Space separated member type names
    pub member_types: String,
}

/// `<list>` of a simple type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List {
    /// Item type name
    pub item_type: String,
}
