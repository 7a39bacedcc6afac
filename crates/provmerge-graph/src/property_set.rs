use crate::value::PropertyValue;
use std::collections::BTreeMap;

/// Accumulated `(key, value)` tuples for one node or edge.
///
/// A key may carry several values; each distinct value is kept once, in the
/// order it was first added. Materializing collapses singletons to scalars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    entries: BTreeMap<String, Vec<PropertyValue>>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value under `key`. Returns false when the pair was already present.
    pub fn add(&mut self, key: impl Into<String>, value: PropertyValue) -> bool {
        let values = self.entries.entry(key.into()).or_default();
        if values.iter().any(|existing| existing.same_as(&value)) {
            return false;
        }
        values.push(value);
        true
    }

    pub fn merge(&mut self, other: &PropertySet) {
        for (key, values) in &other.entries {
            for value in values {
                self.add(key.clone(), value.clone());
            }
        }
    }

    pub fn values(&self, key: &str) -> &[PropertyValue] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Vec<PropertyValue> {
        self.entries.remove(key).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PropertyValue])> {
        self.entries.iter().map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collapse into a property map: one value stays scalar, more become a list.
    pub fn materialize(&self) -> BTreeMap<String, PropertyValue> {
        self.entries
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(key, values)| {
                let value = match values.as_slice() {
                    [single] => single.clone(),
                    many => PropertyValue::List(many.to_vec()),
                };
                (key.clone(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_values_stay_scalar() {
        let mut set = PropertySet::new();
        set.add("ex:k", "v1".into());
        let map = set.materialize();
        assert_eq!(map.get("ex:k"), Some(&PropertyValue::from("v1")));
    }

    #[test]
    fn repeated_keys_collect_into_lists() {
        let mut set = PropertySet::new();
        set.add("ex:k", "v1".into());
        set.add("ex:k", "v2".into());
        assert!(!set.add("ex:k", "v1".into()));
        assert_eq!(
            set.materialize().get("ex:k"),
            Some(&PropertyValue::List(vec!["v1".into(), "v2".into()]))
        );
    }

    #[test]
    fn merge_unions_values_without_duplicates() {
        let mut left = PropertySet::new();
        left.add("ex:a", PropertyValue::Integer(1));
        left.add("ex:k", "v1".into());
        let mut right = PropertySet::new();
        right.add("ex:b", PropertyValue::Boolean(true));
        right.add("ex:k", "v1".into());
        right.add("ex:k", "v2".into());

        left.merge(&right);

        assert_eq!(left.len(), 3);
        assert_eq!(left.values("ex:k"), &[PropertyValue::from("v1"), PropertyValue::from("v2")]);
        assert_eq!(left.values("ex:a"), &[PropertyValue::Integer(1)]);
        assert_eq!(left.values("ex:b"), &[PropertyValue::Boolean(true)]);
    }

    #[test]
    fn repeated_nan_is_kept_once() {
        let mut set = PropertySet::new();
        assert!(set.add("ex:ratio", PropertyValue::Float(f64::NAN)));
        assert!(!set.add("ex:ratio", PropertyValue::Float(f64::NAN)));
        assert_eq!(set.values("ex:ratio").len(), 1);
    }

    #[test]
    fn removed_keys_are_not_materialized() {
        let mut set = PropertySet::new();
        set.add("provmerge:label", "Entity".into());
        set.add("ex:k", "v".into());
        assert_eq!(set.remove("provmerge:label"), vec![PropertyValue::from("Entity")]);
        assert!(set.remove("provmerge:label").is_empty());
        assert_eq!(set.materialize().len(), 1);
    }
}
