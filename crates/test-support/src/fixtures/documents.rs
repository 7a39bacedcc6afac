//! Documents built in code, shared by the graph and store tests.

use chrono::{DateTime, Duration};
use provmerge_model::{ProvDocument, ProvDocumentBuilder, RelationKind};

pub const EXAMPLE_NAMESPACE: &str = "http://example.org/";

fn builder() -> ProvDocumentBuilder {
    ProvDocumentBuilder::new().namespace("ex", EXAMPLE_NAMESPACE)
}

/// One activity using one entity: two nodes and one `used` edge.
pub fn usage_document() -> ProvDocument {
    builder()
        .activity("ex:a1", |a| a.attr("ex:k", "v1"))
        .entity("ex:e1", |e| e)
        .relation(RelationKind::Usage, "ex:a1", "ex:e1", |r| r)
        .build()
}

/// A bundle declaring a single entity.
pub fn bundle_document() -> ProvDocument {
    builder().bundle("ex:b1", |b| b.entity("ex:e2", |e| e)).build()
}

/// Two levels of bundles, a relation crossing bundle boundaries, a literal
/// target, typed elements and attributed relations.
pub fn nested_bundle_document() -> ProvDocument {
    let started = DateTime::parse_from_rfc3339("2024-05-01T09:30:00+02:00").ok();
    builder()
        .agent("ex:alice", |a| a.type_("prov:Person").attr("ex:name", "Alice"))
        .bundle("ex:run", |run| {
            run.attr("ex:purpose", "nightly")
                .activity("ex:compile", |a| match started {
                    Some(started) => a.attr("prov:startTime", started),
                    None => a,
                })
                .entity("ex:source", |e| e.attr("ex:lines", 1200i64))
                .relation(RelationKind::Usage, "ex:compile", "ex:source", |r| {
                    r.id("ex:use1").attr("prov:role", "input")
                })
                .bundle("ex:artifacts", |artifacts| {
                    artifacts
                        .entity("ex:binary", |e| e.type_("ex:Executable").attr("ex:size", 48.5))
                        .relation(RelationKind::Generation, "ex:binary", "ex:compile", |r| r)
                })
        })
        .relation(RelationKind::Association, "ex:compile", "ex:alice", |r| r)
        .literal_relation(RelationKind::Alternate, "ex:binary", "build-42")
        .build()
}

/// The same identity declared twice with overlapping attributes, once at the
/// top level and once inside a bundle.
pub fn repeated_declaration_document() -> ProvDocument {
    builder()
        .entity("ex:report", |e| e.attr("ex:version", 1i64).attr("ex:tag", "draft"))
        .bundle("ex:review", |b| {
            b.entity("ex:report", |e| e.attr("ex:tag", "final").attr("ex:tag", "draft"))
                .activity("ex:check", |a| a.attr("ex:took", Duration::seconds(95)))
        })
        .build()
}

/// A derivation chain over `length` entities: `length` nodes and
/// `length - 1` edges.
pub fn chain_document(length: usize) -> ProvDocument {
    let mut document = builder();
    for index in 0..length {
        document = document.entity(&format!("ex:e{index}"), |e| e.attr("ex:index", index as i64));
    }
    for index in 1..length {
        document = document.relation(
            RelationKind::Derivation,
            &format!("ex:e{index}"),
            &format!("ex:e{}", index - 1),
            |r| r,
        );
    }
    document.build()
}
