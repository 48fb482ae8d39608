//! Package name derivation from a target namespace

/// Package used when the schema has no target namespace
pub const DEFAULT_PACKAGE: &str = "generated";

/// Derive a protobuf package name from an XSD target namespace.
///
/// ```
/// use xsd2proto::converter::package_name;
///
/// assert_eq!(package_name(""), "generated");
/// assert_eq!(package_name("http://example.com/simple"), "simple");
/// assert_eq!(package_name("urn:example:orders"), "orders");
/// assert_eq!(package_name("./api/v1"), "api.v1");
/// ```
pub fn package_name(target_namespace: &str) -> String {
    if target_namespace.is_empty() {
        return DEFAULT_PACKAGE.to_string();
    }

    if let Some(path) = target_namespace
        .strip_prefix("http://")
        .or_else(|| target_namespace.strip_prefix("https://"))
    {
        return from_url_path(path);
    }

    if let Some(path) = target_namespace.strip_prefix("./") {
        return path
            .split('/')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(".");
    }

    if target_namespace.starts_with("urn:") {
        if let Some(last) = target_namespace.split(':').rev().find(|s| !s.is_empty()) {
            return last.to_string();
        }
    }

    let dotted = target_namespace.replace(['/', '_'], ".");
    match dotted.strip_prefix('.') {
        Some(rest) => rest.to_string(),
        None => dotted,
    }
}

/// `host/a/b` → `b`; `host/a` → `a`; `host/a/` → `host.a` (dot-split host)
fn from_url_path(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').collect();

    if parts.len() == 2 {
        return parts[1].to_string();
    }

    if let Some(last) = parts.last().filter(|last| parts.len() > 1 && !last.is_empty()) {
        return last.to_string();
    }

    let mut package_parts: Vec<&str> = Vec::new();
    if !parts[0].is_empty() {
        package_parts.extend(parts[0].split('.'));
    }
    package_parts.extend(parts[1..].iter().filter(|part| !part.is_empty()));
    package_parts.join(".")
}
