//! Property tests for naming and numbering guarantees of the converter

use proptest::prelude::*;
use std::collections::HashSet;
use xsd2proto::converter::{Converter, TypeMapper};
use xsd2proto::proto::{render, RenderOptions};
use xsd2proto::xsd::{ComplexType, Element, Schema, SimpleType};

const BUILTINS: [&str; 8] = [
    "string", "int", "long", "boolean", "double", "dateTime", "duration", "base64Binary",
];

fn arb_type_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-zA-Z0-9]{0,6}",
        "[a-z][a-zA-Z0-9_]{0,6}",
        Just("Status".to_string()),
        Just("status".to_string()),
    ]
}

fn arb_builtin() -> impl Strategy<Value = String> {
    (0..BUILTINS.len()).prop_map(|i| format!("xs:{}", BUILTINS[i]))
}

fn arb_element() -> impl Strategy<Value = Element> {
    (
        "[a-z][a-zA-Z0-9]{0,8}",
        arb_builtin(),
        prop_oneof![Just(("", "")), Just(("0", "")), Just(("0", "unbounded"))],
    )
        .prop_map(|(name, type_name, (min, max))| Element::new(name, type_name).with_occurs(min, max))
}

fn arb_complex_type() -> impl Strategy<Value = ComplexType> {
    (
        arb_type_name(),
        prop::collection::vec(arb_element(), 0..6),
        prop::collection::vec(arb_element(), 0..3),
    )
        .prop_map(|(name, sequence, choice)| {
            let mut ct = ComplexType::new(name).with_sequence(sequence);
            if !choice.is_empty() {
                ct = ct.with_choice(choice);
            }
            ct
        })
}

fn arb_enum_type() -> impl Strategy<Value = SimpleType> {
    (
        arb_type_name(),
        prop::collection::vec("[A-Za-z][A-Za-z0-9]{0,5}", 1..5),
    )
        .prop_map(|(name, values)| {
            let refs: Vec<&str> = values.iter().map(String::as_str).collect();
            SimpleType::enumeration(name, "xs:string", &refs)
        })
}

fn arb_schema() -> impl Strategy<Value = Schema> {
    (
        prop::collection::vec(arb_enum_type(), 0..5),
        prop::collection::vec(arb_complex_type(), 0..6),
    )
        .prop_map(|(simple_types, complex_types)| {
            let mut schema = Schema::with_namespace("http://example.com/prop");
            schema.simple_types = simple_types;
            schema.complex_types = complex_types;
            schema
        })
}

proptest! {
    #[test]
    fn top_level_names_are_unique(schema in arb_schema()) {
        let (file, summary) = Converter::new().convert_with_summary(&schema).unwrap();

        let mut seen = HashSet::new();
        for name in file.enums.iter().map(|e| &e.name).chain(file.messages.iter().map(|m| &m.name)) {
            prop_assert!(seen.insert(name.clone()), "duplicate type name {}", name);
        }
        prop_assert_eq!(file.enums.len(), schema.simple_types.len());
        prop_assert_eq!(
            file.messages.len() + summary.collapsed_wrappers.len(),
            schema.complex_types.len()
        );
    }

    #[test]
    fn enums_start_with_unspecified_sentinel(schema in arb_schema()) {
        let file = Converter::new().convert(&schema).unwrap();

        let mut seen = HashSet::new();
        for proto_enum in &file.enums {
            let first = &proto_enum.values[0];
            prop_assert_eq!(first.number, 0);
            prop_assert!(first.name.ends_with("_UNSPECIFIED"));

            for (i, value) in proto_enum.values.iter().enumerate() {
                prop_assert_eq!(value.number, i as i32);
                prop_assert!(seen.insert(value.name.clone()), "duplicate enum value {}", value.name);
            }
        }
    }

    #[test]
    fn field_numbers_are_contiguous(schema in arb_schema()) {
        let file = Converter::new().convert(&schema).unwrap();

        for message in &file.messages {
            let numbers: Vec<u32> = message.fields.iter().map(|f| f.number).collect();
            let expected: Vec<u32> = (1..=message.fields.len() as u32).collect();
            prop_assert_eq!(numbers, expected);
        }
    }

    #[test]
    fn rendered_text_ends_with_single_newline(schema in arb_schema()) {
        let file = Converter::new().convert(&schema).unwrap();
        let text = render(&file, &RenderOptions::new());

        prop_assert!(text.ends_with('\n'));
        prop_assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn namespace_prefix_does_not_change_mapping(
        base in "[a-zA-Z]{1,12}",
        prefix in "[a-z]{1,5}",
    ) {
        let mapper = TypeMapper::new();
        let bare = mapper.map_type(&base).unwrap();
        let prefixed = mapper.map_type(&format!("{}:{}", prefix, base)).unwrap();
        prop_assert_eq!(bare, prefixed);
    }

    #[test]
    fn array_wrappers_collapse_to_repeated_items(item in "[A-Z][a-z]{1,8}") {
        prop_assume!(item != "Holder");
        let wrapper_name = format!("ArrayOf{}", item);
        let mut schema = Schema::new();
        schema.complex_types.push(
            ComplexType::new(wrapper_name.clone())
                .with_sequence(vec![Element::new(item.clone(), format!("tns:{}", item)).with_occurs("0", "unbounded")]),
        );
        schema.complex_types.push(ComplexType::new(item.clone()));
        schema.complex_types.push(
            ComplexType::new("Holder").with_sequence(vec![Element::new("items", format!("tns:{}", wrapper_name))]),
        );

        let file = Converter::new().convert(&schema).unwrap();
        prop_assert!(file.message(&wrapper_name).is_none());

        let holder = file.message("Holder").unwrap();
        prop_assert!(holder.fields[0].is_repeated());
        prop_assert_eq!(&holder.fields[0].type_name, &item);
    }
}
