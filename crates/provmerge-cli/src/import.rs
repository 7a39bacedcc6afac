use crate::cli::{InputFormat, RunConfig, STDIN, StoreChoice};
use anyhow::Context;
use provmerge_graph::{IdentityMap, MaterializedGraph, materialize_with};
use provmerge_model::{ProvDocument, prov_json};
use provmerge_observability::spans;
use provmerge_store::{ImportSummary, MemoryStore, StoreConnector, StoreSession};
use tracing::info;
use uuid::Uuid;

/// Read every input and merge them into one graph.
///
/// Nodes are unioned by identity across inputs; edges are concatenated and
/// left to the store's merge semantics.
pub fn read_graph(config: &RunConfig, run_id: &Uuid) -> anyhow::Result<MaterializedGraph> {
    let mut identities = IdentityMap::new();
    let mut edges = Vec::new();
    for input in &config.inputs {
        let document = {
            let _span = spans::read_document(run_id, input).entered();
            read_document(input, config.format)?
        };
        let mut document_edges = materialize_with(&document, &mut identities)
            .with_context(|| format!("failed to materialize {}", describe(input)))?;
        edges.append(&mut document_edges);
    }
    Ok(MaterializedGraph { nodes: identities.into_nodes(), edges })
}

fn read_document(input: &str, format: InputFormat) -> anyhow::Result<ProvDocument> {
    let document = match format {
        InputFormat::Json if input == STDIN => prov_json::from_reader(std::io::stdin().lock()),
        InputFormat::Json => prov_json::from_path(input),
    };
    let document = document.with_context(|| format!("failed to read {}", describe(input)))?;
    info!(
        elements = document.elements().len(),
        bundles = document.bundles().len(),
        "Read document"
    );
    Ok(document)
}

fn describe(input: &str) -> String {
    if input == STDIN {
        "standard input".to_string()
    } else {
        format!("'{input}'")
    }
}

pub async fn import_graph(config: &RunConfig, graph: &MaterializedGraph) -> anyhow::Result<ImportSummary> {
    match config.store {
        #[cfg(feature = "neo4j")]
        StoreChoice::Neo4j => import_with(provmerge_store::Neo4jConnector::new(), config, graph).await,
        #[cfg(not(feature = "neo4j"))]
        StoreChoice::Neo4j => anyhow::bail!("this build does not include the Neo4j backend"),
        StoreChoice::Memory => import_with(MemoryStore::new(), config, graph).await,
    }
}

async fn import_with<C: StoreConnector>(
    connector: C,
    config: &RunConfig,
    graph: &MaterializedGraph,
) -> anyhow::Result<ImportSummary> {
    let mut session = StoreSession::new(connector);
    session.connect(&config.connection).await?;
    let summary = session.import(graph, &config.import).await?;
    Ok(summary)
}

/// Read, merge and import every input of one invocation.
pub async fn run(config: RunConfig) -> anyhow::Result<ImportSummary> {
    let run_id = spans::new_run_id();
    let graph = read_graph(&config, &run_id)?;
    info!(
        run_id = %run_id,
        inputs = config.inputs.len(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Merged inputs"
    );
    import_graph(&config, &graph).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::io::Write;

    fn write_input(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create input");
        file.write_all(content.as_bytes()).expect("write input");
        path.to_string_lossy().into_owned()
    }

    fn config(inputs: &[String]) -> RunConfig {
        let mut args = vec!["provmerge".to_string(), "--store".to_string(), "memory".to_string()];
        args.extend(inputs.iter().cloned());
        Cli::try_parse_from(args).expect("parse").into_config().expect("config")
    }

    #[test]
    fn inputs_are_merged_by_identity() {
        let dir = tempfile::tempdir().expect("tempdir");
        let usage = write_input(&dir, "usage.json", test_support::prov_json::USAGE);
        let bundle = write_input(&dir, "bundle.json", test_support::prov_json::BUNDLE);
        let again = write_input(&dir, "again.json", test_support::prov_json::USAGE);

        let graph = read_graph(&config(&[usage, bundle, again]), &spans::new_run_id()).expect("graph");

        assert_eq!(graph.nodes.len(), 4);
        assert!(graph.node("ex:a1").is_some());
        assert!(graph.node("ex:b1").is_some());
        assert_eq!(graph.edges.len(), 3);
    }

    #[test]
    fn missing_inputs_name_the_path() {
        let err = read_graph(&config(&["/nonexistent/doc.json".to_string()]), &spans::new_run_id())
            .expect_err("missing file");
        assert!(format!("{err:#}").contains("/nonexistent/doc.json"));
    }

    #[tokio::test]
    async fn memory_store_runs_end_to_end() {
        let dir = tempfile::tempdir().expect("tempdir");
        let usage = write_input(&dir, "usage.json", test_support::prov_json::USAGE);

        let summary = run(config(&[usage])).await.expect("import");

        assert_eq!(summary.nodes, 2);
        assert_eq!(summary.edges, 1);
        assert_eq!(summary.transactions(), 2);
    }
}
