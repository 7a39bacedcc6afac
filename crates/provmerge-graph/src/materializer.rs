use crate::error::{GraphError, Result};
use crate::identifier::encode_identifier;
use crate::property_set::PropertySet;
use crate::value::{PropertyValue, encode_value};
use crate::vocabulary::{BUNDLED_IN, IDENTITY_KEY, LABEL_KEY, is_reserved_key};
use crate::walker::{Record, walk};
use provmerge_model::vocabulary::prov;
use provmerge_model::{Attribute, ProvDocument, QualifiedName, Relation};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

/// A merged node ready for upsert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub identity: String,
    pub labels: BTreeSet<String>,
    pub properties: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub label: String,
    pub properties: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaterializedGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl MaterializedGraph {
    pub fn node(&self, identity: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.identity == identity)
    }

    pub fn edges_labeled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| edge.label == label)
    }

    /// JSON rendering with sorted keys, used for inspection and snapshots.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Caller-owned map from encoded identity to the node being assembled.
///
/// Several documents can be materialized into the same map to merge them
/// before a single import. Nodes keep the order in which their identity was
/// first seen.
#[derive(Debug, Default)]
pub struct IdentityMap {
    index: HashMap<String, usize>,
    nodes: Vec<(String, PropertySet)>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the node for `identity`, creating an identity-only node if absent.
    pub fn ensure(&mut self, identity: &str) -> &mut PropertySet {
        let slot = match self.index.get(identity) {
            Some(slot) => *slot,
            None => {
                let mut properties = PropertySet::new();
                properties.add(IDENTITY_KEY, PropertyValue::from(identity));
                self.nodes.push((identity.to_string(), properties));
                self.index.insert(identity.to_string(), self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[slot].1
    }

    /// Union `properties` (including labels) into the node for `identity`.
    pub fn merge(&mut self, identity: &str, properties: &PropertySet) {
        self.ensure(identity).merge(properties);
    }

    pub fn add_property(&mut self, identity: &str, key: impl Into<String>, value: PropertyValue) {
        self.ensure(identity).add(key, value);
    }

    pub fn get(&self, identity: &str) -> Option<&PropertySet> {
        self.index.get(identity).map(|slot| &self.nodes[*slot].1)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.index.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Split labels out of each property set and collapse the rest.
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
            .into_iter()
            .map(|(identity, mut properties)| {
                let labels = properties
                    .remove(LABEL_KEY)
                    .iter()
                    .filter_map(PropertyValue::label_text)
                    .collect();
                Node { identity, labels, properties: properties.materialize() }
            })
            .collect()
    }
}

/// Materialize one document into a fresh graph.
pub fn materialize(document: &ProvDocument) -> Result<MaterializedGraph> {
    let mut identities = IdentityMap::new();
    let edges = materialize_with(document, &mut identities)?;
    Ok(MaterializedGraph { nodes: identities.into_nodes(), edges })
}

/// Merge the declarations of `document` into `identities` and return its edges.
pub fn materialize_with(document: &ProvDocument, identities: &mut IdentityMap) -> Result<Vec<Edge>> {
    let mut containment = Vec::new();
    for item in walk(document) {
        let identity = encode_identifier(item.record.identifier());
        if identity.is_empty() {
            return Err(GraphError::EmptyIdentifier { kind: item.record.kind_label().to_string() });
        }
        identities.merge(&identity, &record_properties(&item.record));

        if let Some(parent) = item.parent {
            if !item.record.is_bundle() {
                containment.push((identity, encode_identifier(parent)));
            }
        }
    }

    let mut edges = Vec::new();
    let mut folded = 0usize;
    for relation in document.flattened_relations() {
        match resolve_relation(relation, identities)? {
            Some(edge) => edges.push(edge),
            None => folded += 1,
        }
    }

    let mut seen = HashSet::new();
    for (element, bundle) in containment {
        identities.ensure(&bundle);
        if seen.insert((element.clone(), bundle.clone())) {
            edges.push(Edge {
                source: element,
                target: bundle,
                label: BUNDLED_IN.to_string(),
                properties: BTreeMap::new(),
            });
        }
    }

    debug!(nodes = identities.len(), edges = edges.len(), folded, "Materialized document");
    Ok(edges)
}

fn record_properties(record: &Record<'_>) -> PropertySet {
    let mut properties = PropertySet::new();
    properties.add(LABEL_KEY, PropertyValue::from(record.kind_label()));
    for attribute in record.attributes() {
        let Some(key) = attribute_key(attribute) else { continue };
        let value = encode_value(&attribute.value);
        if is_prov_type(&attribute.key) {
            properties.add(LABEL_KEY, value.clone());
        }
        properties.add(key, value);
    }
    properties
}

/// Encoded key of a document attribute, or `None` when it collides with a
/// reserved key.
fn attribute_key(attribute: &Attribute) -> Option<String> {
    let key = encode_identifier(&attribute.key);
    if is_reserved_key(&key) {
        warn!(key = %key, "Ignoring attribute with a reserved key");
        return None;
    }
    Some(key)
}

fn is_prov_type(key: &QualifiedName) -> bool {
    encode_identifier(key) == prov::TYPE
}

/// Turn a relation into an edge, or fold it into its source node when the
/// target is a literal. Returns `None` for folded relations.
fn resolve_relation(relation: &Relation, identities: &mut IdentityMap) -> Result<Option<Edge>> {
    let label = relation.kind.label();
    let source = endpoint(relation, &relation.source, "source")?;

    let Some(target_name) = relation.target_name() else {
        identities.add_property(&source, label, encode_value(&relation.target));
        return Ok(None);
    };
    let target = endpoint(relation, target_name, "target")?;

    identities.ensure(&source);
    identities.ensure(&target);

    Ok(Some(Edge {
        source,
        target,
        label: label.to_string(),
        properties: relation_properties(relation),
    }))
}

fn endpoint(relation: &Relation, name: &QualifiedName, role: &str) -> Result<String> {
    let identity = encode_identifier(name);
    if identity.is_empty() {
        return Err(GraphError::MalformedRelation {
            relation: describe(relation),
            reason: format!("{} has an empty identifier", role),
        });
    }
    Ok(identity)
}

fn relation_properties(relation: &Relation) -> BTreeMap<String, PropertyValue> {
    let mut properties = PropertySet::new();
    if let Some(identifier) = &relation.identifier {
        properties.add(IDENTITY_KEY, PropertyValue::from(encode_identifier(identifier)));
    }
    let attributes: Vec<&Attribute> =
        relation.formal_attributes.iter().chain(relation.attributes.iter()).collect();
    for attribute in attributes {
        if let Some(key) = attribute_key(attribute) {
            properties.add(key, encode_value(&attribute.value));
        }
    }
    properties.materialize()
}

fn describe(relation: &Relation) -> String {
    match &relation.identifier {
        Some(identifier) => format!("{} {}", relation.kind, identifier),
        None => format!("{}({}, ...)", relation.kind, relation.source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::node_labels;
    use provmerge_model::{ProvDocumentBuilder, RelationKind};

    fn labels(graph: &MaterializedGraph, identity: &str) -> Vec<String> {
        graph
            .node(identity)
            .map(|node| node.labels.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn used_relation_yields_two_nodes_and_one_edge() {
        let document = ProvDocumentBuilder::new()
            .activity("ex:a1", |a| a.attr("ex:k", "v1"))
            .entity("ex:e1", |e| e)
            .relation(RelationKind::Usage, "ex:a1", "ex:e1", |r| r)
            .build();

        let graph = materialize(&document).expect("materialize");

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        let edge = &graph.edges[0];
        assert_eq!((edge.source.as_str(), edge.label.as_str(), edge.target.as_str()), ("ex:a1", "used", "ex:e1"));
        let activity = graph.node("ex:a1").expect("activity node");
        assert_eq!(activity.properties.get("ex:k"), Some(&PropertyValue::from("v1")));
        assert_eq!(activity.properties.get(IDENTITY_KEY), Some(&PropertyValue::from("ex:a1")));
        assert!(!activity.properties.contains_key(LABEL_KEY));
    }

    #[test]
    fn bundle_members_get_one_containment_edge() {
        let document = ProvDocumentBuilder::new()
            .bundle("ex:b1", |b| b.entity("ex:e2", |e| e))
            .build();

        let graph = materialize(&document).expect("materialize");

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(labels(&graph, "ex:b1"), vec![node_labels::BUNDLE.to_string()]);
        let containment: Vec<&Edge> = graph.edges_labeled(BUNDLED_IN).collect();
        assert_eq!(containment.len(), 1);
        assert_eq!(containment[0].source, "ex:e2");
        assert_eq!(containment[0].target, "ex:b1");
    }

    #[test]
    fn containment_only_points_at_the_immediate_bundle() {
        let document = ProvDocumentBuilder::new()
            .bundle("ex:outer", |outer| {
                outer.bundle("ex:inner", |inner| inner.entity("ex:deep", |e| e))
            })
            .build();

        let graph = materialize(&document).expect("materialize");

        let containment: Vec<(&str, &str)> = graph
            .edges_labeled(BUNDLED_IN)
            .map(|edge| (edge.source.as_str(), edge.target.as_str()))
            .collect();
        assert_eq!(containment, vec![("ex:deep", "ex:inner")]);
    }

    #[test]
    fn literal_targets_fold_into_source_properties() {
        let document = ProvDocumentBuilder::new()
            .entity("ex:e1", |e| e)
            .literal_relation(RelationKind::Alternate, "ex:e1", "plain text")
            .build();

        let graph = materialize(&document).expect("materialize");

        assert!(graph.edges.is_empty());
        let node = graph.node("ex:e1").expect("entity node");
        assert_eq!(node.properties.get("alternateOf"), Some(&PropertyValue::from("plain text")));
    }

    #[test]
    fn redeclarations_merge_labels_and_values() {
        let document = ProvDocumentBuilder::new()
            .entity("ex:x", |e| e.attr("ex:k", "v1").attr("ex:only_first", 1i64))
            .agent("ex:x", |a| a.attr("ex:k", "v2").attr("ex:k", "v1"))
            .build();

        let graph = materialize(&document).expect("materialize");

        assert_eq!(graph.nodes.len(), 1);
        let node = graph.node("ex:x").expect("merged node");
        assert_eq!(labels(&graph, "ex:x"), vec!["Agent".to_string(), "Entity".to_string()]);
        assert_eq!(
            node.properties.get("ex:k"),
            Some(&PropertyValue::List(vec!["v1".into(), "v2".into()]))
        );
        assert_eq!(node.properties.get("ex:only_first"), Some(&PropertyValue::Integer(1)));
    }

    #[test]
    fn undeclared_endpoints_are_synthesized() {
        let document = ProvDocumentBuilder::new()
            .relation(RelationKind::Derivation, "ex:new", "ex:old", |r| r)
            .build();

        let graph = materialize(&document).expect("materialize");

        assert_eq!(graph.nodes.len(), 2);
        let old = graph.node("ex:old").expect("synthesized node");
        assert!(old.labels.is_empty());
        assert_eq!(old.properties.len(), 1);
    }

    #[test]
    fn prov_type_values_become_labels() {
        let document = ProvDocumentBuilder::new()
            .entity("ex:plan", |e| e.type_("prov:Plan"))
            .build();

        let graph = materialize(&document).expect("materialize");

        assert_eq!(labels(&graph, "ex:plan"), vec!["Entity".to_string(), "prov:Plan".to_string()]);
        let node = graph.node("ex:plan").expect("plan node");
        assert_eq!(node.properties.get(prov::TYPE), Some(&PropertyValue::from("prov:Plan")));
    }

    #[test]
    fn identified_relations_carry_their_identifier() {
        let document = ProvDocumentBuilder::new()
            .relation(RelationKind::Generation, "ex:e1", "ex:a1", |r| {
                r.id("ex:gen1").attr("ex:role", "output")
            })
            .build();

        let graph = materialize(&document).expect("materialize");

        let edge = &graph.edges[0];
        assert_eq!(edge.properties.get(IDENTITY_KEY), Some(&PropertyValue::from("ex:gen1")));
        assert_eq!(edge.properties.get("ex:role"), Some(&PropertyValue::from("output")));
    }

    #[test]
    fn reserved_keys_cannot_be_set_from_attributes() {
        let document = ProvDocumentBuilder::new()
            .entity("ex:e1", |e| {
                e.attr(IDENTITY_KEY, "spoofed").attr(LABEL_KEY, "Injected").attr("ex:k", "v1")
            })
            .relation(RelationKind::Usage, "ex:a1", "ex:e1", |r| r.attr(IDENTITY_KEY, "ex:fake"))
            .build();

        let graph = materialize(&document).expect("materialize");

        let node = graph.node("ex:e1").expect("entity node");
        assert_eq!(node.properties.get(IDENTITY_KEY), Some(&PropertyValue::from("ex:e1")));
        assert_eq!(labels(&graph, "ex:e1"), vec!["Entity".to_string()]);
        assert_eq!(node.properties.get("ex:k"), Some(&PropertyValue::from("v1")));
        assert!(!graph.edges[0].properties.contains_key(IDENTITY_KEY));
    }

    #[test]
    fn repeated_members_of_a_bundle_get_one_containment_edge() {
        let document = ProvDocumentBuilder::new()
            .bundle("ex:b", |b| {
                b.entity("ex:x", |e| e.attr("ex:k", "v1")).entity("ex:x", |e| e.attr("ex:k", "v2"))
            })
            .build();

        let graph = materialize(&document).expect("materialize");

        let containment: Vec<(&str, &str)> = graph
            .edges_labeled(BUNDLED_IN)
            .map(|edge| (edge.source.as_str(), edge.target.as_str()))
            .collect();
        assert_eq!(containment, vec![("ex:x", "ex:b")]);
        assert_eq!(graph.nodes.len(), 2);
    }

    #[test]
    fn json_rendering_sorts_keys() {
        let document = ProvDocumentBuilder::new()
            .activity("ex:a1", |a| a.attr("ex:k", "v1"))
            .build();

        let json = materialize(&document).expect("materialize").to_json().expect("json");

        assert_eq!(json["nodes"][0]["identity"], "ex:a1");
        assert_eq!(json["nodes"][0]["labels"], serde_json::json!(["Activity"]));
        assert_eq!(json["nodes"][0]["properties"]["ex:k"], "v1");
        assert_eq!(json["edges"], serde_json::json!([]));
    }

    #[test]
    fn empty_identifiers_are_rejected() {
        let document = ProvDocumentBuilder::new().entity("", |e| e).build();
        assert!(matches!(materialize(&document), Err(GraphError::EmptyIdentifier { .. })));
    }

    #[test]
    fn empty_relation_endpoints_are_malformed() {
        let document = ProvDocumentBuilder::new()
            .relation(RelationKind::Usage, "ex:a1", "", |r| r)
            .build();
        assert!(matches!(materialize(&document), Err(GraphError::MalformedRelation { .. })));
    }
}
