#![cfg(feature = "neo4j")]

use neo4rs::{ConfigBuilder, Graph, query};
use provmerge_store::{ConnectionParams, ImportConfig, Neo4jConnector, SessionState, StoreError, StoreSession};
use test_support::{documents, init_test_tracing};
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tokio::time::{Duration, sleep};

const PASSWORD: &str = "provmerge-test";

async fn start_neo4j() -> (ContainerAsync<GenericImage>, String) {
    let container = GenericImage::new("neo4j", "5")
        .with_exposed_port(ContainerPort::Tcp(7687))
        .with_wait_for(WaitFor::message_on_stdout("Started."))
        .with_env_var("NEO4J_AUTH", format!("neo4j/{PASSWORD}"))
        .start()
        .await
        .expect("start neo4j container");
    let mut attempts = 0;
    let host_port = loop {
        match container.get_host_port_ipv4(7687).await {
            Ok(port) => break port,
            Err(err) => {
                attempts += 1;
                if attempts > 25 {
                    panic!("get neo4j port: {err}");
                }
                sleep(Duration::from_millis(200)).await;
            }
        }
    };
    (container, format!("127.0.0.1:{host_port}"))
}

async fn count(address: &str, statement: &str) -> i64 {
    let config = ConfigBuilder::default()
        .uri(format!("bolt://{address}"))
        .user("neo4j")
        .password(PASSWORD)
        .db("neo4j")
        .build()
        .expect("config");
    let graph = Graph::connect(config).await.expect("connect");
    let mut rows = graph.execute(query(statement)).await.expect("query");
    let row = rows.next().await.expect("row").expect("one row");
    row.get::<i64>("c").expect("count column")
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn imports_into_neo4j_idempotently() {
    init_test_tracing();
    let (_container, address) = start_neo4j().await;
    let params = ConnectionParams::new(address.as_str(), "neo4j", PASSWORD);

    let mut session = StoreSession::new(Neo4jConnector::new());
    session.connect(&params).await.expect("connect");
    assert_eq!(session.state(), SessionState::Connected);

    let document = documents::nested_bundle_document();
    let config = ImportConfig::new(2).expect("config");
    let first = session.import_document(&document, &config).await.expect("first import");
    session.import_document(&document, &config).await.expect("second import");

    assert_eq!(count(&address, "MATCH (n:ProvNode) RETURN count(n) AS c").await, first.nodes as i64);
    assert_eq!(count(&address, "MATCH ()-[r]->() RETURN count(r) AS c").await, first.edges as i64);
    assert_eq!(
        count(&address, "MATCH (:ProvNode)-[r:`provmerge:bundledIn`]->(:Bundle) RETURN count(r) AS c").await,
        3
    );
    assert_eq!(count(&address, "SHOW CONSTRAINTS YIELD name RETURN count(name) AS c").await, 4);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn community_edition_cannot_create_databases() {
    let (_container, address) = start_neo4j().await;
    let params = ConnectionParams::new(address.as_str(), "neo4j", PASSWORD).with_database("provenance");

    let mut session = StoreSession::new(Neo4jConnector::new());
    let err = session.connect(&params).await.expect_err("community edition");

    assert!(matches!(err, StoreError::DatabaseCreation { .. }));
    assert_eq!(session.state(), SessionState::Failed);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn wrong_password_is_a_connection_error() {
    let (_container, address) = start_neo4j().await;
    let params = ConnectionParams::new(address.as_str(), "neo4j", "not-the-password");

    let mut session = StoreSession::new(Neo4jConnector::new());
    let err = session.connect(&params).await.expect_err("authentication");

    assert!(matches!(err, StoreError::Connection { .. }));
    assert!(!err.to_string().contains("not-the-password"));
}
