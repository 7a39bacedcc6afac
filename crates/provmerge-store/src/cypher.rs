//! Cypher statements issued by the Neo4j backend.
//!
//! Values always travel as parameters; only labels, relationship types and
//! property keys are rendered into the statement text, quoted when needed.

use std::collections::BTreeSet;

pub const IDENTITY_PARAM: &str = "identity";
pub const SOURCE_PARAM: &str = "source";
pub const TARGET_PARAM: &str = "target";
pub const PROPS_PARAM: &str = "props";
pub const NAME_PARAM: &str = "name";

pub const LIST_DATABASES: &str = "SHOW DATABASES YIELD name";
pub const CREATE_DATABASE: &str = "CREATE DATABASE $name IF NOT EXISTS WAIT";
pub const LIST_CONSTRAINTS: &str = "SHOW CONSTRAINTS YIELD labelsOrTypes, properties, type";

/// Upsert a node by identity.
///
/// `MERGE` matches an existing node (same identity under the primary label)
/// or creates it; `SET n += $props` adds or updates properties without
/// clearing others. Labels are only ever added.
pub fn merge_node(primary_label: &str, primary_key: &str, labels: &BTreeSet<String>) -> String {
    let mut statement = format!(
        "MERGE (n:{label} {{{key}: ${identity}}}) SET n += ${props}",
        label = quote_identifier(primary_label),
        key = quote_identifier(primary_key),
        identity = IDENTITY_PARAM,
        props = PROPS_PARAM,
    );
    if !labels.is_empty() {
        let rendered: Vec<String> = labels.iter().map(|label| quote_identifier(label)).collect();
        statement.push_str(&format!(" SET n:{}", rendered.join(":")));
    }
    statement
}

/// Upsert a relationship between two nodes.
///
/// Both endpoints are merged by identity first, so an edge batch never fails
/// on a node that a previous batch did not write.
pub fn merge_edge(primary_label: &str, primary_key: &str, rel_type: &str) -> String {
    let label = quote_identifier(primary_label);
    let key = quote_identifier(primary_key);
    format!(
        "MERGE (a:{label} {{{key}: ${source}}}) MERGE (b:{label} {{{key}: ${target}}}) MERGE (a)-[r:{rel}]->(b) SET r += ${props}",
        source = SOURCE_PARAM,
        target = TARGET_PARAM,
        rel = quote_identifier(rel_type),
        props = PROPS_PARAM,
    )
}

pub fn create_uniqueness_constraint(label: &str, property: &str) -> String {
    format!(
        "CREATE CONSTRAINT IF NOT EXISTS FOR (n:{}) REQUIRE n.{} IS UNIQUE",
        quote_identifier(label),
        quote_identifier(property)
    )
}

pub fn quote_identifier(name: &str) -> String {
    if is_safe_identifier(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

/// Determine if a name can be used without backticks in Cypher.
fn is_safe_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
