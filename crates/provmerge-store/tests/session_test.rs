use provmerge_graph::vocabulary::{IDENTITY_KEY, node_labels};
use provmerge_store::{
    ConnectionParams, ImportConfig, MemoryStore, SessionState, StoreError, StoreSession, UniquenessConstraint,
};
use test_support::{documents, init_test_tracing};

fn params(database: &str) -> ConnectionParams {
    ConnectionParams::new("localhost:7687", "neo4j", "secret").with_database(database)
}

#[tokio::test]
async fn connect_selects_database_and_creates_constraints() {
    init_test_tracing();
    let store = MemoryStore::new();
    let mut session = StoreSession::new(store.clone());
    assert_eq!(session.state(), SessionState::Disconnected);

    session.connect(&params("neo4j")).await.expect("connect");

    assert_eq!(session.state(), SessionState::Connected);
    assert_eq!(session.database(), Some("neo4j"));
    let constraints = store.constraints("neo4j").await;
    let expected: Vec<UniquenessConstraint> = {
        let mut wanted: Vec<UniquenessConstraint> = node_labels::BASIC
            .iter()
            .map(|label| UniquenessConstraint::new(*label, IDENTITY_KEY))
            .collect();
        wanted.sort();
        wanted
    };
    assert_eq!(constraints, expected);
}

#[tokio::test]
async fn reconnecting_keeps_constraints_idempotent() {
    let store = MemoryStore::new();
    let mut session = StoreSession::new(store.clone());
    session.connect(&params("neo4j")).await.expect("first connect");
    session.connect(&params("neo4j")).await.expect("second connect");
    assert_eq!(store.constraints("neo4j").await.len(), node_labels::BASIC.len());
}

#[tokio::test]
async fn missing_database_is_created() {
    let store = MemoryStore::new();
    let mut session = StoreSession::new(store.clone());
    session.connect(&params("provenance")).await.expect("connect");
    assert!(store.databases().await.contains(&"provenance".to_string()));
    assert_eq!(store.constraints("provenance").await.len(), 4);
}

#[tokio::test]
async fn single_database_editions_report_creation_failure() {
    let store = MemoryStore::new().single_database();
    let mut session = StoreSession::new(store.clone());

    let err = session.connect(&params("provenance")).await.expect_err("creation must fail");

    assert!(matches!(&err, StoreError::DatabaseCreation { database, .. } if database == "provenance"));
    assert!(err.hint().is_some_and(|hint| hint.contains("enterprise")));
    assert_eq!(session.state(), SessionState::Failed);
    assert!(!store.databases().await.contains(&"provenance".to_string()));
}

#[tokio::test]
async fn single_database_editions_accept_the_default_database() {
    let mut session = StoreSession::new(MemoryStore::new().single_database());
    session.connect(&params("neo4j")).await.expect("connect");
    assert_eq!(session.state(), SessionState::Connected);
}

#[tokio::test]
async fn unsupported_scheme_fails_before_connecting() {
    let store = MemoryStore::new().with_password("secret");
    let mut session = StoreSession::new(store.clone());

    let err = session
        .connect(&params("neo4j").with_scheme("ftp"))
        .await
        .expect_err("unsupported scheme");

    assert!(matches!(err, StoreError::UnsupportedScheme(ref scheme) if scheme == "ftp"));
    assert_eq!(session.state(), SessionState::Failed);
    assert!(store.constraints("neo4j").await.is_empty());
}

#[tokio::test]
async fn bad_credentials_fail_with_context() {
    let store = MemoryStore::new().with_password("right");
    let mut session = StoreSession::new(store);

    let err = session
        .connect(&ConnectionParams::new("db.example.org:7687", "alice", "wrong").with_scheme("bolt+s"))
        .await
        .expect_err("authentication failure");

    let message = err.to_string();
    assert!(message.contains("bolt+s://db.example.org:7687"));
    assert!(message.contains("alice"));
    assert!(!message.contains("wrong"));
    assert!(err.hint().is_some());
    assert_eq!(session.state(), SessionState::Failed);
}

#[tokio::test]
async fn failed_session_can_connect_again() {
    let store = MemoryStore::new().with_password("secret");
    let mut session = StoreSession::new(store);
    let bad = ConnectionParams::new("localhost:7687", "neo4j", "nope");
    assert!(session.connect(&bad).await.is_err());

    session.connect(&params("neo4j")).await.expect("fresh connect");
    assert_eq!(session.state(), SessionState::Connected);
}

#[tokio::test]
async fn import_requires_a_connection() {
    let session = StoreSession::new(MemoryStore::new());
    let err = session
        .import_document(&documents::usage_document(), &ImportConfig::default())
        .await
        .expect_err("not connected");
    assert!(matches!(err, StoreError::NotConnected));
}
