//! `.proto` text rendering

use super::{ProtoEnum, ProtoField, ProtoFile, ProtoMessage};

const INDENT: &str = "  ";

/// Options controlling the rendered text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit the "Code generated" header comment
    pub include_header: bool,
    /// Tool version written into the header
    pub version: String,
    /// Source file name written into the header
    pub source: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderOptions {
    /// Header on, crate version
    pub fn new() -> Self {
        Self {
            include_header: true,
            version: crate::VERSION.to_string(),
            source: None,
        }
    }

    /// Enable or disable the header comment
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    /// Set the version shown in the header
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the source file shown in the header
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Render a [`ProtoFile`] as `.proto` source text.
///
/// Sections appear in a fixed order (header, syntax, package, imports,
/// options, enums, messages), separated by single blank lines. The result
/// always ends with exactly one newline.
pub fn render(file: &ProtoFile, options: &RenderOptions) -> String {
    let mut sections: Vec<String> = Vec::new();

    if options.include_header {
        let mut header = format!(
            "// Code generated by xsd2proto {}. DO NOT EDIT.\n",
            options.version
        );
        if let Some(source) = &options.source {
            header.push_str(&format!("// source: {}\n", source));
        }
        sections.push(header);
    }

    sections.push(format!("syntax = \"{}\";\n", file.syntax));

    if !file.package.is_empty() {
        sections.push(format!("package {};\n", file.package));
    }

    if !file.imports.is_empty() {
        let mut imports: Vec<&String> = file.imports.iter().collect();
        imports.sort();
        imports.dedup();
        sections.push(
            imports
                .into_iter()
                .map(|path| format!("import \"{}\";\n", path))
                .collect(),
        );
    }

    if !file.options.is_empty() {
        sections.push(
            file.options
                .iter()
                .map(|(key, value)| format!("option {} = \"{}\";\n", key, value))
                .collect(),
        );
    }

    for proto_enum in &file.enums {
        sections.push(render_enum(proto_enum, 0));
    }

    for message in &file.messages {
        sections.push(render_message(message, 0));
    }

    let mut out = sections.join("\n");
    let trimmed_len = out.trim_end_matches('\n').len();
    out.truncate(trimmed_len);
    out.push('\n');
    out
}

fn render_enum(proto_enum: &ProtoEnum, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    let mut out = format!("{}enum {} {{\n", pad, proto_enum.name);
    for value in &proto_enum.values {
        out.push_str(&format!(
            "{}{}{} = {};\n",
            pad, INDENT, value.name, value.number
        ));
    }
    out.push_str(&format!("{}}}\n", pad));
    out
}

fn render_message(message: &ProtoMessage, depth: usize) -> String {
    let pad = INDENT.repeat(depth);

    let mut blocks: Vec<String> = Vec::new();
    for nested in &message.enums {
        blocks.push(render_enum(nested, depth + 1));
    }
    for nested in &message.messages {
        blocks.push(render_message(nested, depth + 1));
    }
    if !message.fields.is_empty() {
        blocks.push(
            message
                .fields
                .iter()
                .map(|field| render_field(field, depth + 1))
                .collect(),
        );
    }

    format!(
        "{}message {} {{\n{}{}}}\n",
        pad,
        message.name,
        blocks.join("\n"),
        pad
    )
}

fn render_field(field: &ProtoField, depth: usize) -> String {
    let label = if field.is_repeated() { "repeated " } else { "" };
    format!(
        "{}{}{} {} = {};\n",
        INDENT.repeat(depth),
        label,
        field.type_name,
        field.name,
        field.number
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{FieldLabel, ProtoEnumValue};
    use pretty_assertions::assert_eq;

    fn sample_file() -> ProtoFile {
        let mut file = ProtoFile::new("simple");
        file.imports.push("google/protobuf/timestamp.proto".to_string());

        let mut status = ProtoEnum::new("Status");
        status.values.push(ProtoEnumValue::new("STATUS_UNSPECIFIED", 0));
        status.values.push(ProtoEnumValue::new("STATUS_ACTIVE", 1));
        file.enums.push(status);

        let mut person = ProtoMessage::new("Person");
        person
            .fields
            .push(ProtoField::new("first_name", "string", 1, FieldLabel::Required));
        person
            .fields
            .push(ProtoField::new("tags", "string", 2, FieldLabel::Repeated));
        person.fields.push(ProtoField::new(
            "created",
            "google.protobuf.Timestamp",
            3,
            FieldLabel::Optional,
        ));
        file.messages.push(person);
        file
    }

    #[test]
    fn test_render_without_header() {
        let text = render(&sample_file(), &RenderOptions::new().with_header(false));
        let expected = r#"syntax = "proto3";

package simple;

import "google/protobuf/timestamp.proto";

enum Status {
  STATUS_UNSPECIFIED = 0;
  STATUS_ACTIVE = 1;
}

message Person {
  string first_name = 1;
  repeated string tags = 2;
  google.protobuf.Timestamp created = 3;
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_header_and_options() {
        let mut file = ProtoFile::new("");
        file.set_option("go_package", "example.com/proto");
        let options = RenderOptions::new()
            .with_version("v1.2.3")
            .with_source("simple.xsd");

        let text = render(&file, &options);
        let expected = r#"// Code generated by xsd2proto v1.2.3. DO NOT EDIT.
// source: simple.xsd

syntax = "proto3";

option go_package = "example.com/proto";
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_nested_types() {
        let mut inner_enum = ProtoEnum::new("Kind");
        inner_enum.values.push(ProtoEnumValue::new("KIND_UNSPECIFIED", 0));

        let mut inner = ProtoMessage::new("Address");
        inner
            .fields
            .push(ProtoField::new("city", "string", 1, FieldLabel::Required));

        let mut outer = ProtoMessage::new("Person");
        outer.enums.push(inner_enum);
        outer.messages.push(inner);
        outer
            .fields
            .push(ProtoField::new("address", "Address", 1, FieldLabel::Required));

        let mut file = ProtoFile::new("pkg");
        file.messages.push(outer);

        let text = render(&file, &RenderOptions::new().with_header(false));
        let expected = r#"syntax = "proto3";

package pkg;

message Person {
  enum Kind {
    KIND_UNSPECIFIED = 0;
  }

  message Address {
    string city = 1;
  }

  Address address = 1;
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty_message_and_singular_labels() {
        let mut file = ProtoFile::new("pkg");
        file.messages.push(ProtoMessage::new("Empty"));
        let mut msg = ProtoMessage::new("Legacy");
        msg.fields
            .push(ProtoField::new("old", "string", 1, FieldLabel::Optional));
        msg.fields
            .push(ProtoField::new("new", "string", 2, FieldLabel::Required));
        file.messages.push(msg);

        let text = render(&file, &RenderOptions::new().with_header(false));
        assert!(text.contains("message Empty {\n}\n"));
        assert!(text.contains("  string old = 1;\n  string new = 2;\n"));
        assert!(text.ends_with("}\n"));
        assert!(!text.ends_with("\n\n"));
    }
}
