//! Per-conversion naming state

use super::is_array_wrapper;
use crate::names::{clean_type_name, to_pascal_case, to_screaming_snake_case};
use crate::xsd::Schema;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Which name set a new type name is registered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeKind {
    Message,
    Enum,
}

/// Bookkeeping for one call to [`Converter::convert`](super::Converter::convert).
///
/// Messages and enums share a single namespace. The rename map records
/// `original → final` for every registered type; a later registration of
/// the same original name replaces the earlier entry.
#[derive(Debug)]
pub struct ConversionContext<'s> {
    schema: &'s Schema,
    message_names: HashSet<String>,
    enum_names: HashSet<String>,
    rename_map: IndexMap<String, String>,
    enum_values: HashSet<String>,
    enum_value_counters: HashMap<String, u32>,
    top_level_names: HashSet<String>,
}

impl<'s> ConversionContext<'s> {
    /// Fresh state for converting `schema`
    pub fn new(schema: &'s Schema) -> Self {
        let mut ctx = Self::empty(schema);
        ctx.top_level_names = Self::planned_top_level_names(schema);
        ctx
    }

    fn empty(schema: &'s Schema) -> Self {
        Self {
            schema,
            message_names: HashSet::new(),
            enum_names: HashSet::new(),
            rename_map: IndexMap::new(),
            enum_values: HashSet::new(),
            enum_value_counters: HashMap::new(),
            top_level_names: HashSet::new(),
        }
    }

    /// Every name a top-level type of `schema` can be referenced by: the
    /// final names the three passes will assign, plus the PascalCase form of
    /// each declared type name.
    fn planned_top_level_names(schema: &'s Schema) -> HashSet<String> {
        let mut planner = Self::empty(schema);

        for simple_type in &schema.simple_types {
            if !simple_type.enumerations().is_empty() {
                planner.unique_enum_name(&simple_type.name);
            }
        }
        for complex_type in &schema.complex_types {
            if !is_array_wrapper(complex_type) {
                planner.unique_message_name(&complex_type.name);
            }
        }
        for element in &schema.elements {
            if let Some(complex_type) = element.complex_type() {
                let original = if complex_type.name.is_empty() {
                    &element.name
                } else {
                    &complex_type.name
                };
                planner.unique_message_name(original);
            }
        }

        let declared = schema
            .complex_types
            .iter()
            .map(|ct| &ct.name)
            .chain(schema.simple_types.iter().map(|st| &st.name))
            .map(|name| to_pascal_case(clean_type_name(name)));

        planner
            .message_names
            .into_iter()
            .chain(planner.enum_names)
            .chain(declared)
            .collect()
    }

    /// Whether `name` is, or will be, a top-level type name in the file.
    ///
    /// Nested types must avoid these: inside a message, proto3 resolves a
    /// bare type name to the nested type before the top-level one.
    pub fn is_top_level_name(&self, name: &str) -> bool {
        self.top_level_names.contains(name)
    }

    /// The schema being converted
    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Original → final names, in registration order
    pub fn rename_map(&self) -> &IndexMap<String, String> {
        &self.rename_map
    }

    /// Reserve a unique message name for `original`
    pub fn unique_message_name(&mut self, original: &str) -> String {
        self.unique_type_name(original, TypeKind::Message)
    }

    /// Reserve a unique enum name for `original`
    pub fn unique_enum_name(&mut self, original: &str) -> String {
        self.unique_type_name(original, TypeKind::Enum)
    }

    fn is_type_name_used(&self, name: &str) -> bool {
        self.message_names.contains(name) || self.enum_names.contains(name)
    }

    fn unique_type_name(&mut self, original: &str, kind: TypeKind) -> String {
        let formatted = to_pascal_case(original);

        let mut candidate = formatted.clone();
        let mut counter = 2;
        while self.is_type_name_used(&candidate) {
            candidate = format!("{}{}", formatted, counter);
            counter += 1;
        }

        match kind {
            TypeKind::Message => self.message_names.insert(candidate.clone()),
            TypeKind::Enum => self.enum_names.insert(candidate.clone()),
        };
        self.rename_map.insert(original.to_string(), candidate.clone());
        candidate
    }

    /// Final name of a previously registered type.
    ///
    /// Tries the prefix-free name as written, then its PascalCase form, so
    /// that `status` finds a type declared as `Status`.
    pub fn resolve_renamed(&self, clean_name: &str) -> Option<&str> {
        self.rename_map
            .get(clean_name)
            .or_else(|| self.rename_map.get(&to_pascal_case(clean_name)))
            .map(String::as_str)
    }

    /// Reserve the `<PREFIX>_UNSPECIFIED` sentinel for an enum
    pub fn enum_sentinel_name(&mut self, enum_name: &str) -> String {
        let name = format!("{}_UNSPECIFIED", to_screaming_snake_case(enum_name));
        self.reserve_enum_value(name)
    }

    /// Reserve `<PREFIX>_<VALUE>` for an enum value
    pub fn enum_value_name(&mut self, enum_name: &str, value: &str) -> String {
        let name = format!(
            "{}_{}",
            to_screaming_snake_case(enum_name),
            value.to_uppercase()
        );
        self.reserve_enum_value(name)
    }

    /// Enum value names are unique across the whole file; collisions get
    /// `2`, `3`, ... appended, continuing where the last collision on the
    /// same base name stopped.
    fn reserve_enum_value(&mut self, name: String) -> String {
        if self.enum_values.insert(name.clone()) {
            return name;
        }

        let mut counter = self.enum_value_counters.get(&name).copied().unwrap_or(1);
        loop {
            counter += 1;
            let candidate = format!("{}{}", name, counter);
            if self.enum_values.insert(candidate.clone()) {
                self.enum_value_counters.insert(name, counter);
                return candidate;
            }
        }
    }
}
