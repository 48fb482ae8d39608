//! Name utilities
//!
//! Namespace prefix handling for XSD type references and the case
//! conversions used to turn XSD names into protobuf identifiers.
//!
//! Conversions are token based: a name is split on `_`, `-` and `.`, and
//! each piece is split again before every ASCII uppercase letter that is not
//! its first character. `userRole` therefore becomes `["user", "Role"]` and
//! `first_name` becomes `["first", "name"]`.

/// Split a QName into prefix and local name
///
/// Only the last `:` separates the prefix, so `a:b:c` yields `(Some("a:b"), "c")`.
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.rfind(':') {
        Some(idx) => (Some(&qname[..idx]), &qname[idx + 1..]),
        None => (None, qname),
    }
}

/// Strip any namespace prefix from a type reference (`tns:Foo` → `Foo`)
pub fn clean_type_name(type_name: &str) -> &str {
    split_qname(type_name).1
}

/// Split a single token before each inner ASCII uppercase letter
pub fn split_camel_case(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if i > 0 && c.is_ascii_uppercase() && i > start {
            parts.push(&s[start..i]);
            start = i;
        }
    }
    if start < s.len() {
        parts.push(&s[start..]);
    }

    parts
}

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | '.')
}

fn tokens(s: &str) -> Vec<&str> {
    s.split(is_separator)
        .filter(|part| !part.is_empty())
        .flat_map(split_camel_case)
        .collect()
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Convert a name to PascalCase (`first_name` → `FirstName`, `XMLName` → `XMLName`)
///
/// Every token keeps only its first letter uppercase, so runs of capitals are
/// split letter by letter and then rejoined unchanged.
pub fn to_pascal_case(s: &str) -> String {
    tokens(s).into_iter().map(capitalize).collect()
}

/// Convert a name to camelCase (`first_name` → `firstName`)
pub fn to_camel_case(s: &str) -> String {
    tokens(s)
        .into_iter()
        .enumerate()
        .map(|(i, token)| {
            if i == 0 {
                token.to_lowercase()
            } else {
                capitalize(token)
            }
        })
        .collect()
}

/// Convert a name to snake_case (`firstName` → `first_name`)
///
/// An underscore goes before every inner uppercase letter, so acronyms are
/// spread out: `XMLName` → `x_m_l_name`.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for (i, c) in s.char_indices() {
        if i > 0 && c.is_ascii_uppercase() {
            result.push('_');
        }
        if c == '-' || c == '.' {
            result.push('_');
        } else {
            result.push(c);
        }
    }

    result.to_lowercase()
}

/// Convert a name to SCREAMING_SNAKE_CASE (`FixtureType` → `FIXTURE_TYPE`)
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("element"), (None, "element"));
        assert_eq!(split_qname("xs:element"), (Some("xs"), "element"));
        assert_eq!(split_qname("a:b:c"), (Some("a:b"), "c"));
    }

    #[test]
    fn test_clean_type_name() {
        assert_eq!(clean_type_name("xs:string"), "string");
        assert_eq!(clean_type_name("tns:Person"), "Person");
        assert_eq!(clean_type_name("Person"), "Person");
        assert_eq!(clean_type_name("ns:"), "");
    }

    #[test]
    fn test_split_camel_case() {
        assert_eq!(split_camel_case("userRole"), vec!["user", "Role"]);
        assert_eq!(split_camel_case("FixtureType"), vec!["Fixture", "Type"]);
        assert_eq!(split_camel_case("XML"), vec!["X", "M", "L"]);
        assert!(split_camel_case("").is_empty());
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("first_name"), "FirstName");
        assert_eq!(to_pascal_case("userRole"), "UserRole");
        assert_eq!(to_pascal_case("person"), "Person");
        assert_eq!(to_pascal_case("PERSON"), "PERSON");
        assert_eq!(to_pascal_case("order-item.line"), "OrderItemLine");
        assert_eq!(to_pascal_case("__a__b__"), "AB");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("first_name"), "firstName");
        assert_eq!(to_camel_case("FirstName"), "firstName");
        assert_eq!(to_camel_case("ID"), "iD");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("firstName"), "first_name");
        assert_eq!(to_snake_case("FixtureType"), "fixture_type");
        assert_eq!(to_snake_case("XMLName"), "x_m_l_name");
        assert_eq!(to_snake_case("order-item.line"), "order_item_line");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_to_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("UserRole"), "USER_ROLE");
        assert_eq!(to_screaming_snake_case("Status2"), "STATUS2");
    }
}
