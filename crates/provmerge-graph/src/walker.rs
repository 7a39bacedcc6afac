use crate::vocabulary::node_labels;
use provmerge_model::{Attribute, Bundle, Element, ProvDocument, QualifiedName};
use std::collections::VecDeque;

/// A declaration reached by the walker.
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    Element(&'a Element),
    Bundle(&'a Bundle),
}

impl<'a> Record<'a> {
    pub fn identifier(&self) -> &'a QualifiedName {
        match self {
            Record::Element(element) => &element.identifier,
            Record::Bundle(bundle) => &bundle.identifier,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Record::Element(element) => element.kind.label(),
            Record::Bundle(_) => node_labels::BUNDLE,
        }
    }

    pub fn attributes(&self) -> &'a [Attribute] {
        match self {
            Record::Element(element) => &element.attributes,
            Record::Bundle(bundle) => &bundle.attributes,
        }
    }

    pub fn is_bundle(&self) -> bool {
        matches!(self, Record::Bundle(_))
    }
}

/// A record with the identifier of the bundle that declares it.
#[derive(Debug, Clone, Copy)]
pub struct WalkItem<'a> {
    pub record: Record<'a>,
    pub parent: Option<&'a QualifiedName>,
}

#[derive(Debug, Clone, Copy)]
enum Level<'a> {
    Elements(&'a [Element]),
    Bundles(&'a [Bundle]),
}

/// Breadth-first iterator over every element and bundle in a document.
///
/// Each queue entry is one level of one container. Visiting a bundle enqueues
/// its elements and then its nested bundles, so output proceeds level by level.
#[derive(Debug, Clone)]
pub struct BundleWalker<'a> {
    queue: VecDeque<(Option<&'a QualifiedName>, Level<'a>)>,
}

impl<'a> BundleWalker<'a> {
    pub fn new(document: &'a ProvDocument) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back((None, Level::Elements(document.elements())));
        queue.push_back((None, Level::Bundles(document.bundles())));
        Self { queue }
    }
}

impl<'a> Iterator for BundleWalker<'a> {
    type Item = WalkItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (parent, level) = self.queue.pop_front()?;
            match level {
                Level::Elements([first, rest @ ..]) => {
                    if !rest.is_empty() {
                        self.queue.push_front((parent, Level::Elements(rest)));
                    }
                    return Some(WalkItem { record: Record::Element(first), parent });
                }
                Level::Bundles([first, rest @ ..]) => {
                    if !rest.is_empty() {
                        self.queue.push_front((parent, Level::Bundles(rest)));
                    }
                    let id = Some(&first.identifier);
                    self.queue.push_back((id, Level::Elements(&first.elements)));
                    self.queue.push_back((id, Level::Bundles(&first.bundles)));
                    return Some(WalkItem { record: Record::Bundle(first), parent });
                }
                Level::Elements([]) | Level::Bundles([]) => continue,
            }
        }
    }
}

pub fn walk(document: &ProvDocument) -> BundleWalker<'_> {
    BundleWalker::new(document)
}
