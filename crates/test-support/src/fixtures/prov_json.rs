//! PROV-JSON documents as text, for reader and CLI tests.

/// Serialized form of [`super::documents::usage_document`].
pub const USAGE: &str = r#"{
  "prefix": {"ex": "http://example.org/"},
  "activity": {"ex:a1": {"ex:k": "v1"}},
  "entity": {"ex:e1": {}},
  "used": {"_:u1": {"prov:activity": "ex:a1", "prov:entity": "ex:e1"}}
}"#;

/// Serialized form of [`super::documents::bundle_document`].
pub const BUNDLE: &str = r#"{
  "prefix": {"ex": "http://example.org/"},
  "bundle": {
    "ex:b1": {
      "entity": {"ex:e2": {}}
    }
  }
}"#;

/// Bundles with their own prefixes, typed values, a literal relation target
/// and repeated declarations.
pub const NESTED: &str = r#"{
  "prefix": {
    "ex": "http://example.org/",
    "default": "http://example.org/default/"
  },
  "agent": {
    "ex:alice": {"prov:type": {"$": "prov:Person", "type": "prov:QUALIFIED_NAME"}}
  },
  "entity": {
    "ex:report": [
      {"ex:tag": "draft"},
      {"ex:tag": ["final", "draft"], "ex:pages": 12}
    ],
    "ex:run": {"ex:purpose": "nightly"}
  },
  "wasAttributedTo": {
    "ex:attr1": {"prov:entity": "ex:report", "prov:agent": "ex:alice"}
  },
  "bundle": {
    "ex:run": {
      "prefix": {"tool": "http://example.org/tools/"},
      "activity": {
        "tool:compile": {
          "prov:startTime": "2024-05-01T09:30:00+02:00",
          "ex:optimized": {"$": "true", "type": "xsd:boolean"}
        }
      },
      "entity": {
        "ex:binary": {"ex:size": {"$": "48.5", "type": "xsd:double"}},
        "plain": {"ex:note": {"$": "bonjour", "lang": "fr"}}
      },
      "wasGeneratedBy": {
        "_:g1": {
          "prov:entity": "ex:binary",
          "prov:activity": "tool:compile",
          "prov:time": "2024-05-01T10:00:00Z"
        }
      },
      "alternateOf": {
        "_:alt1": {"prov:alternate1": "ex:binary", "prov:alternate2": {"$": "build-42", "type": "xsd:string"}}
      },
      "bundle": {
        "ex:artifacts": {
          "entity": {"ex:checksum": {"ex:algorithm": "sha256"}}
        }
      }
    }
  }
}"#;
