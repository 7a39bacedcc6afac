use crate::qualified_name::QualifiedName;
use crate::value::AttributeValue;
use crate::vocabulary::{formal, relations};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    Activity,
    Agent,
    Entity,
}

impl ElementKind {
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Activity => "Activity",
            ElementKind::Agent => "Agent",
            ElementKind::Entity => "Entity",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

macro_rules! define_relation_kinds {
    ($($variant:ident => $label:ident),* $(,)?) => {
        /// The PROV relation types.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum RelationKind {
            $($variant),*
        }

        impl RelationKind {
            pub const ALL: &'static [RelationKind] = &[$(RelationKind::$variant),*];

            /// PROV-N name, also used as the PROV-JSON section key.
            pub fn label(&self) -> &'static str {
                match self {
                    $(RelationKind::$variant => relations::$label),*
                }
            }

            /// PROV-JSON formal attribute keys; the first two are source and target.
            pub fn formal_keys(&self) -> &'static [&'static str] {
                match self {
                    $(RelationKind::$variant => formal::$label),*
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $(relations::$label => Some(RelationKind::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

define_relation_kinds!(
    Generation => WAS_GENERATED_BY,
    Usage => USED,
    Communication => WAS_INFORMED_BY,
    Start => WAS_STARTED_BY,
    End => WAS_ENDED_BY,
    Invalidation => WAS_INVALIDATED_BY,
    Derivation => WAS_DERIVED_FROM,
    Attribution => WAS_ATTRIBUTED_TO,
    Association => WAS_ASSOCIATED_WITH,
    Delegation => ACTED_ON_BEHALF_OF,
    Influence => WAS_INFLUENCED_BY,
    Alternate => ALTERNATE_OF,
    Specialization => SPECIALIZATION_OF,
    Mention => MENTION_OF,
    Membership => HAD_MEMBER,
);

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One `(key, value)` pair. Keys may repeat on the same record.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: QualifiedName,
    pub value: AttributeValue,
}

impl Attribute {
    pub fn new(key: impl Into<QualifiedName>, value: impl Into<AttributeValue>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// An Activity, Agent or Entity declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub identifier: QualifiedName,
    pub attributes: Vec<Attribute>,
}

impl Element {
    pub fn new(kind: ElementKind, identifier: impl Into<QualifiedName>) -> Self {
        Self { kind, identifier: identifier.into(), attributes: Vec::new() }
    }
}

/// A typed, directed relation.
///
/// `target` is a qualified name when the relation points at another element
/// and any other value when it points at a literal. `formal_attributes`
/// holds the positional attributes after source and target (for example
/// `prov:time`) that were present on the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub kind: RelationKind,
    pub identifier: Option<QualifiedName>,
    pub source: QualifiedName,
    pub target: AttributeValue,
    pub formal_attributes: Vec<Attribute>,
    pub attributes: Vec<Attribute>,
}

impl Relation {
    pub fn new(
        kind: RelationKind,
        source: impl Into<QualifiedName>,
        target: impl Into<AttributeValue>,
    ) -> Self {
        Self {
            kind,
            identifier: None,
            source: source.into(),
            target: target.into(),
            formal_attributes: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn target_name(&self) -> Option<&QualifiedName> {
        self.target.as_qualified_name()
    }
}

/// A named sub-document that is also an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub identifier: QualifiedName,
    pub attributes: Vec<Attribute>,
    pub elements: Vec<Element>,
    pub relations: Vec<Relation>,
    pub bundles: Vec<Bundle>,
}

impl Bundle {
    pub fn new(identifier: impl Into<QualifiedName>) -> Self {
        Self {
            identifier: identifier.into(),
            attributes: Vec::new(),
            elements: Vec::new(),
            relations: Vec::new(),
            bundles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvDocument {
    namespaces: BTreeMap<String, String>,
    elements: Vec<Element>,
    relations: Vec<Relation>,
    bundles: Vec<Bundle>,
}

impl ProvDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.namespaces.insert(prefix.into(), uri.into());
    }

    pub fn push_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn push_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub fn push_bundle(&mut self, bundle: Bundle) {
        self.bundles.push(bundle);
    }

    pub fn namespaces(&self) -> &BTreeMap<String, String> {
        &self.namespaces
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    pub fn has_bundles(&self) -> bool {
        !self.bundles.is_empty()
    }

    /// Every relation in the document regardless of the bundle it was
    /// declared in: top-level relations first, then each bundle's relations
    /// in declaration order, nested bundles after their parent.
    pub fn flattened_relations(&self) -> Vec<&Relation> {
        let mut out: Vec<&Relation> = self.relations.iter().collect();
        let mut stack: Vec<&Bundle> = self.bundles.iter().rev().collect();
        while let Some(bundle) = stack.pop() {
            out.extend(bundle.relations.iter());
            stack.extend(bundle.bundles.iter().rev());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_kind_round_trips_labels() {
        for kind in RelationKind::ALL {
            assert_eq!(RelationKind::from_label(kind.label()), Some(*kind));
        }
        assert_eq!(RelationKind::ALL.len(), 15);
        assert_eq!(RelationKind::from_label("wasBornOf"), None);
    }

    #[test]
    fn flattened_relations_cover_nested_bundles() {
        let mut inner = Bundle::new("ex:inner");
        inner.relations.push(Relation::new(
            RelationKind::Usage,
            "ex:a2",
            QualifiedName::parse("ex:e2"),
        ));
        let mut outer = Bundle::new("ex:outer");
        outer.relations.push(Relation::new(
            RelationKind::Generation,
            "ex:e1",
            QualifiedName::parse("ex:a1"),
        ));
        outer.bundles.push(inner);

        let mut doc = ProvDocument::new();
        doc.push_relation(Relation::new(
            RelationKind::Attribution,
            "ex:e0",
            QualifiedName::parse("ex:ag"),
        ));
        doc.push_bundle(outer);

        let kinds: Vec<RelationKind> =
            doc.flattened_relations().iter().map(|relation| relation.kind).collect();
        assert_eq!(
            kinds,
            vec![RelationKind::Attribution, RelationKind::Generation, RelationKind::Usage]
        );
    }
}
