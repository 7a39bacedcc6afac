//! Span constructors shared by the library crates and the CLI.
//!
//! Every span carries the `run_id` of the import it belongs to so that log
//! lines from one invocation can be correlated, including in JSON output.

use tracing::{Span, debug_span, info_span};
use uuid::Uuid;

/// Identifier for one import run.
pub fn new_run_id() -> Uuid {
    Uuid::new_v4()
}

/// Span for reading and parsing one input document.
#[inline]
pub fn read_document(run_id: &Uuid, source: &str) -> Span {
    info_span!("read_document", run_id = %run_id, source = %source)
}

/// Span for importing a materialized graph into one database.
#[inline]
pub fn import_document(run_id: &Uuid, database: &str, nodes: usize, edges: usize) -> Span {
    info_span!(
        "import_document",
        run_id = %run_id,
        database = %database,
        nodes,
        edges,
    )
}

/// Span for one batch transaction.
#[inline]
pub fn import_batch(run_id: &Uuid, kind: &str, index: usize, size: usize) -> Span {
    debug_span!("import_batch", run_id = %run_id, kind = %kind, index, size)
}
