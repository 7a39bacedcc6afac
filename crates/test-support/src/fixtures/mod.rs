pub mod documents;
pub mod prov_json;
