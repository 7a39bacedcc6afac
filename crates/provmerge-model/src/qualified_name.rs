use std::fmt;

/// A namespaced PROV identifier such as `ex:report`.
///
/// The prefix is optional: names declared in a document's default namespace
/// carry only a local part. The namespace URI is kept when known but takes no
/// part in how the name is rendered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    prefix: Option<String>,
    namespace: Option<String>,
    local_part: String,
}

impl QualifiedName {
    pub fn new(prefix: impl Into<String>, local_part: impl Into<String>) -> Self {
        Self { prefix: Some(prefix.into()), namespace: None, local_part: local_part.into() }
    }

    pub fn unprefixed(local_part: impl Into<String>) -> Self {
        Self { prefix: None, namespace: None, local_part: local_part.into() }
    }

    /// Split `prefix:local` on the first colon. Text without a colon becomes
    /// an unprefixed name.
    pub fn parse(value: &str) -> Self {
        match value.split_once(':') {
            Some((prefix, local)) if !prefix.is_empty() => Self::new(prefix, local),
            _ => Self::unprefixed(value),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local_part(&self) -> &str {
        &self.local_part
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local_part),
            None => write!(f, "{}", self.local_part),
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_first_colon() {
        let name = QualifiedName::parse("ex:a:b");
        assert_eq!(name.prefix(), Some("ex"));
        assert_eq!(name.local_part(), "a:b");
    }

    #[test]
    fn parse_without_colon_is_unprefixed() {
        let name = QualifiedName::parse("report");
        assert_eq!(name.prefix(), None);
        assert_eq!(name.to_string(), "report");
    }

    #[test]
    fn leading_colon_is_not_a_prefix() {
        let name = QualifiedName::parse(":x");
        assert_eq!(name.prefix(), None);
        assert_eq!(name.local_part(), ":x");
    }
}
