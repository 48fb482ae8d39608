//! XML tree → XSD model mapping
//!
//! Elements are matched by local name, so any prefix bound to the XML Schema
//! namespace (or none at all) is accepted.

use super::{
    Attribute, ComplexType, Element, ElementContent, ElementGroup, Import, Include, List,
    Restriction, Schema, SimpleType, Union,
};
use crate::documents::{Document, Element as XmlElement};
use crate::error::{ParseError, Result};

/// XSD element local names
mod xsd_elements {
    pub const SCHEMA: &str = "schema";
    pub const IMPORT: &str = "import";
    pub const INCLUDE: &str = "include";
    pub const ELEMENT: &str = "element";
    pub const COMPLEX_TYPE: &str = "complexType";
    pub const SIMPLE_TYPE: &str = "simpleType";
    pub const SEQUENCE: &str = "sequence";
    pub const CHOICE: &str = "choice";
    pub const ATTRIBUTE: &str = "attribute";
    pub const RESTRICTION: &str = "restriction";
    pub const UNION: &str = "union";
    pub const LIST: &str = "list";
    pub const ENUMERATION: &str = "enumeration";
    pub const PATTERN: &str = "pattern";
    pub const MIN_LENGTH: &str = "minLength";
    pub const MAX_LENGTH: &str = "maxLength";
}

/// XSD attribute names
mod xsd_attrs {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const USE: &str = "use";
    pub const BASE: &str = "base";
    pub const VALUE: &str = "value";
    pub const TARGET_NAMESPACE: &str = "targetNamespace";
    pub const ELEMENT_FORM_DEFAULT: &str = "elementFormDefault";
    pub const ATTRIBUTE_FORM_DEFAULT: &str = "attributeFormDefault";
    pub const NAMESPACE: &str = "namespace";
    pub const SCHEMA_LOCATION: &str = "schemaLocation";
    pub const MIN_OCCURS: &str = "minOccurs";
    pub const MAX_OCCURS: &str = "maxOccurs";
    pub const MEMBER_TYPES: &str = "memberTypes";
    pub const ITEM_TYPE: &str = "itemType";
}

use xsd_attrs as attrs;
use xsd_elements as tags;

pub(super) fn parse_document(doc: &Document) -> Result<Schema> {
    let root = doc
        .root()
        .ok_or_else(|| ParseError::new("XSD document has no root element"))?;

    if root.local_name() != tags::SCHEMA {
        return Err(ParseError::new(format!(
            "Expected xs:schema root element, got {}",
            root.local_name()
        ))
        .into());
    }

    let mut schema = Schema {
        target_namespace: root.attribute_or_empty(attrs::TARGET_NAMESPACE),
        element_form_default: root.attribute_or_empty(attrs::ELEMENT_FORM_DEFAULT),
        attribute_form_default: root.attribute_or_empty(attrs::ATTRIBUTE_FORM_DEFAULT),
        ..Schema::default()
    };

    for child in &root.children {
        match child.local_name() {
            tags::IMPORT => schema.imports.push(Import {
                namespace: child.attribute_or_empty(attrs::NAMESPACE),
                schema_location: child.attribute_or_empty(attrs::SCHEMA_LOCATION),
            }),
            tags::INCLUDE => schema.includes.push(Include {
                schema_location: child.attribute_or_empty(attrs::SCHEMA_LOCATION),
            }),
            tags::ELEMENT => schema.elements.push(parse_element(child)?),
            tags::COMPLEX_TYPE => schema.complex_types.push(parse_complex_type(child)?),
            tags::SIMPLE_TYPE => schema.simple_types.push(parse_simple_type(child)?),
            _ => {} // annotations, groups, attribute declarations, ...
        }
    }

    Ok(schema)
}

fn parse_element(elem: &XmlElement) -> Result<Element> {
    let type_name = elem.attribute_or_empty(attrs::TYPE);

    // A `type` attribute wins over an inline definition.
    let content = if !type_name.is_empty() {
        ElementContent::TypeRef(type_name)
    } else if let Some(ct) = elem.child(tags::COMPLEX_TYPE) {
        ElementContent::InlineComplex(parse_complex_type(ct)?)
    } else if let Some(st) = elem.child(tags::SIMPLE_TYPE) {
        ElementContent::InlineSimple(parse_simple_type(st)?)
    } else {
        ElementContent::TypeRef(String::new())
    };

    Ok(Element {
        name: elem.attribute_or_empty(attrs::NAME),
        min_occurs: elem.attribute_or_empty(attrs::MIN_OCCURS),
        max_occurs: elem.attribute_or_empty(attrs::MAX_OCCURS),
        content,
    })
}

fn parse_group(elem: &XmlElement) -> Result<ElementGroup> {
    let elements = elem
        .children_named(tags::ELEMENT)
        .map(parse_element)
        .collect::<Result<Vec<_>>>()?;

    Ok(ElementGroup {
        elements,
        min_occurs: elem.attribute_or_empty(attrs::MIN_OCCURS),
        max_occurs: elem.attribute_or_empty(attrs::MAX_OCCURS),
    })
}

fn parse_complex_type(elem: &XmlElement) -> Result<ComplexType> {
    let sequence = elem.child(tags::SEQUENCE).map(parse_group).transpose()?;
    let choice = elem.child(tags::CHOICE).map(parse_group).transpose()?;

    let attributes = elem
        .children_named(tags::ATTRIBUTE)
        .map(|attr| Attribute {
            name: attr.attribute_or_empty(attrs::NAME),
            type_name: attr.attribute_or_empty(attrs::TYPE),
            usage: attr.attribute_or_empty(attrs::USE),
        })
        .collect();

    Ok(ComplexType {
        name: elem.attribute_or_empty(attrs::NAME),
        sequence,
        choice,
        attributes,
    })
}

fn parse_simple_type(elem: &XmlElement) -> Result<SimpleType> {
    let restriction = elem
        .child(tags::RESTRICTION)
        .map(parse_restriction)
        .transpose()?;

    Ok(SimpleType {
        name: elem.attribute_or_empty(attrs::NAME),
        restriction,
        union: elem.child(tags::UNION).map(|u| Union {
            member_types: u.attribute_or_empty(attrs::MEMBER_TYPES),
        }),
        list: elem.child(tags::LIST).map(|l| List {
            item_type: l.attribute_or_empty(attrs::ITEM_TYPE),
        }),
    })
}

fn parse_restriction(elem: &XmlElement) -> Result<Restriction> {
    Ok(Restriction {
        base: elem.attribute_or_empty(attrs::BASE),
        enumerations: elem
            .children_named(tags::ENUMERATION)
            .map(|e| e.attribute_or_empty(attrs::VALUE))
            .collect(),
        pattern: elem
            .child(tags::PATTERN)
            .map(|p| p.attribute_or_empty(attrs::VALUE)),
        min_length: facet_length(elem, tags::MIN_LENGTH)?,
        max_length: facet_length(elem, tags::MAX_LENGTH)?,
    })
}

fn facet_length(restriction: &XmlElement, facet: &str) -> Result<Option<i64>> {
    let Some(elem) = restriction.child(facet) else {
        return Ok(None);
    };
    let value = elem.get_attribute(attrs::VALUE).unwrap_or_default().trim();
    value.parse::<i64>().map(Some).map_err(|_| {
        ParseError::new(format!("invalid {} value '{}'", facet, value)).into()
    })
}
