use crate::document::{Attribute, Bundle, Element, ElementKind, ProvDocument, Relation, RelationKind};
use crate::qualified_name::QualifiedName;
use crate::value::AttributeValue;
use crate::vocabulary::prov;

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(kind: ElementKind, identifier: impl Into<QualifiedName>) -> Self {
        Self { element: Element::new(kind, identifier) }
    }

    pub fn attr(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.element.attributes.push(Attribute::new(key, value));
        self
    }

    /// Add a `prov:type` value naming another qualified name.
    pub fn type_(self, prov_type: &str) -> Self {
        self.attr(prov::TYPE, QualifiedName::parse(prov_type))
    }

    pub fn build(self) -> Element {
        self.element
    }
}

pub struct RelationBuilder {
    relation: Relation,
}

impl RelationBuilder {
    pub fn new(
        kind: RelationKind,
        source: impl Into<QualifiedName>,
        target: impl Into<AttributeValue>,
    ) -> Self {
        Self { relation: Relation::new(kind, source, target) }
    }

    pub fn id(mut self, identifier: &str) -> Self {
        self.relation.identifier = Some(QualifiedName::parse(identifier));
        self
    }

    /// A positional attribute beyond source and target, e.g. `prov:time`.
    pub fn formal(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.relation.formal_attributes.push(Attribute::new(key, value));
        self
    }

    pub fn attr(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.relation.attributes.push(Attribute::new(key, value));
        self
    }

    pub fn build(self) -> Relation {
        self.relation
    }
}

pub struct BundleBuilder {
    bundle: Bundle,
}

impl BundleBuilder {
    pub fn new(identifier: impl Into<QualifiedName>) -> Self {
        Self { bundle: Bundle::new(identifier) }
    }

    pub fn attr(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.bundle.attributes.push(Attribute::new(key, value));
        self
    }

    pub fn element<F>(mut self, kind: ElementKind, identifier: &str, f: F) -> Self
    where
        F: FnOnce(ElementBuilder) -> ElementBuilder,
    {
        self.bundle.elements.push(f(ElementBuilder::new(kind, identifier)).build());
        self
    }

    pub fn entity<F>(self, identifier: &str, f: F) -> Self
    where
        F: FnOnce(ElementBuilder) -> ElementBuilder,
    {
        self.element(ElementKind::Entity, identifier, f)
    }

    pub fn activity<F>(self, identifier: &str, f: F) -> Self
    where
        F: FnOnce(ElementBuilder) -> ElementBuilder,
    {
        self.element(ElementKind::Activity, identifier, f)
    }

    pub fn agent<F>(self, identifier: &str, f: F) -> Self
    where
        F: FnOnce(ElementBuilder) -> ElementBuilder,
    {
        self.element(ElementKind::Agent, identifier, f)
    }

    pub fn relation<F>(mut self, kind: RelationKind, source: &str, target: &str, f: F) -> Self
    where
        F: FnOnce(RelationBuilder) -> RelationBuilder,
    {
        let builder = RelationBuilder::new(kind, source, QualifiedName::parse(target));
        self.bundle.relations.push(f(builder).build());
        self
    }

    pub fn bundle<F>(mut self, identifier: &str, f: F) -> Self
    where
        F: FnOnce(BundleBuilder) -> BundleBuilder,
    {
        self.bundle.bundles.push(f(BundleBuilder::new(identifier)).build());
        self
    }

    pub fn build(self) -> Bundle {
        self.bundle
    }
}

pub struct ProvDocumentBuilder {
    doc: ProvDocument,
}

impl ProvDocumentBuilder {
    pub fn new() -> Self {
        Self { doc: ProvDocument::new() }
    }

    pub fn namespace(mut self, prefix: &str, uri: &str) -> Self {
        self.doc.add_namespace(prefix, uri);
        self
    }

    pub fn element<F>(mut self, kind: ElementKind, identifier: &str, f: F) -> Self
    where
        F: FnOnce(ElementBuilder) -> ElementBuilder,
    {
        self.doc.push_element(f(ElementBuilder::new(kind, identifier)).build());
        self
    }

    pub fn entity<F>(self, identifier: &str, f: F) -> Self
    where
        F: FnOnce(ElementBuilder) -> ElementBuilder,
    {
        self.element(ElementKind::Entity, identifier, f)
    }

    pub fn activity<F>(self, identifier: &str, f: F) -> Self
    where
        F: FnOnce(ElementBuilder) -> ElementBuilder,
    {
        self.element(ElementKind::Activity, identifier, f)
    }

    pub fn agent<F>(self, identifier: &str, f: F) -> Self
    where
        F: FnOnce(ElementBuilder) -> ElementBuilder,
    {
        self.element(ElementKind::Agent, identifier, f)
    }

    /// A relation between two elements.
    pub fn relation<F>(mut self, kind: RelationKind, source: &str, target: &str, f: F) -> Self
    where
        F: FnOnce(RelationBuilder) -> RelationBuilder,
    {
        let builder = RelationBuilder::new(kind, source, QualifiedName::parse(target));
        self.doc.push_relation(f(builder).build());
        self
    }

    /// A relation whose target is a literal value rather than an element.
    pub fn literal_relation(
        mut self,
        kind: RelationKind,
        source: &str,
        target: impl Into<AttributeValue>,
    ) -> Self {
        self.doc.push_relation(RelationBuilder::new(kind, source, target).build());
        self
    }

    pub fn bundle<F>(mut self, identifier: &str, f: F) -> Self
    where
        F: FnOnce(BundleBuilder) -> BundleBuilder,
    {
        self.doc.push_bundle(f(BundleBuilder::new(identifier)).build());
        self
    }

    pub fn build(self) -> ProvDocument {
        self.doc
    }
}

impl Default for ProvDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
