//! Shared fixtures for the provmerge test suites.

pub mod fixtures;
pub mod logging;

pub use fixtures::documents;
pub use fixtures::prov_json;
pub use logging::init_test_tracing;
