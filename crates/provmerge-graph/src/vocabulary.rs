//! Reserved names written to the graph store.
//!
//! Re-imports merge into data written by earlier runs through these values,
//! so they must not change.

/// Label carried by every imported node; upserts match on it.
pub const PRIMARY_LABEL: &str = "ProvNode";

/// Property holding the encoded identifier; the merge key.
pub const IDENTITY_KEY: &str = "provmerge:identifier";

/// Property set key holding node labels while a node is being assembled.
/// Never written to the store.
pub const LABEL_KEY: &str = "provmerge:label";

/// Keys the materializer writes itself. Document attributes never reach them.
pub fn is_reserved_key(key: &str) -> bool {
    key == IDENTITY_KEY || key == LABEL_KEY
}

/// Relationship type from an element to the bundle that declares it.
pub const BUNDLED_IN: &str = "provmerge:bundledIn";

// Node category labels
pub mod node_labels {
    pub const ACTIVITY: &str = "Activity";
    pub const AGENT: &str = "Agent";
    pub const ENTITY: &str = "Entity";
    pub const BUNDLE: &str = "Bundle";

    /// Categories that receive a uniqueness constraint on the identity key.
    pub const BASIC: &[&str] = &[ACTIVITY, AGENT, ENTITY, BUNDLE];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_materializer_keys_are_reserved() {
        assert!(is_reserved_key(IDENTITY_KEY));
        assert!(is_reserved_key(LABEL_KEY));
        assert!(!is_reserved_key(BUNDLED_IN));
        assert!(!is_reserved_key("provmerge:other"));
    }
}
