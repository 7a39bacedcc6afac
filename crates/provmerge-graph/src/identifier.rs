use provmerge_model::QualifiedName;

/// Canonical key for a qualified name: `prefix:local`, or `local` when the
/// name has no prefix. The namespace URI does not take part.
pub fn encode_identifier(name: &QualifiedName) -> String {
    match name.prefix() {
        Some(prefix) => format!("{}:{}", prefix, name.local_part()),
        None => name.local_part().to_string(),
    }
}
