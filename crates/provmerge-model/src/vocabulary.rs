//! PROV vocabulary constants.
//!
//! Relation names follow PROV-N; formal attribute keys follow PROV-JSON.

pub mod prefixes {
    pub const PROV: &str = "prov";
    pub const XSD: &str = "xsd";
    pub const DEFAULT: &str = "default";
}

pub mod namespaces {
    pub const PROV: &str = "http://www.w3.org/ns/prov#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
}

// PROV standard attributes
pub mod prov {
    pub const TYPE: &str = "prov:type";
    pub const LABEL: &str = "prov:label";
    pub const VALUE: &str = "prov:value";
    pub const LOCATION: &str = "prov:location";
    pub const ROLE: &str = "prov:role";
    pub const TIME: &str = "prov:time";
    pub const START_TIME: &str = "prov:startTime";
    pub const END_TIME: &str = "prov:endTime";
    pub const QUALIFIED_NAME: &str = "prov:QUALIFIED_NAME";
}

// PROV-JSON document sections
pub mod sections {
    pub const PREFIX: &str = "prefix";
    pub const ENTITY: &str = "entity";
    pub const ACTIVITY: &str = "activity";
    pub const AGENT: &str = "agent";
    pub const BUNDLE: &str = "bundle";
}

// PROV-N relation names
pub mod relations {
    pub const WAS_GENERATED_BY: &str = "wasGeneratedBy";
    pub const USED: &str = "used";
    pub const WAS_INFORMED_BY: &str = "wasInformedBy";
    pub const WAS_STARTED_BY: &str = "wasStartedBy";
    pub const WAS_ENDED_BY: &str = "wasEndedBy";
    pub const WAS_INVALIDATED_BY: &str = "wasInvalidatedBy";
    pub const WAS_DERIVED_FROM: &str = "wasDerivedFrom";
    pub const WAS_ATTRIBUTED_TO: &str = "wasAttributedTo";
    pub const WAS_ASSOCIATED_WITH: &str = "wasAssociatedWith";
    pub const ACTED_ON_BEHALF_OF: &str = "actedOnBehalfOf";
    pub const WAS_INFLUENCED_BY: &str = "wasInfluencedBy";
    pub const ALTERNATE_OF: &str = "alternateOf";
    pub const SPECIALIZATION_OF: &str = "specializationOf";
    pub const MENTION_OF: &str = "mentionOf";
    pub const HAD_MEMBER: &str = "hadMember";
}

// Formal attribute keys per relation, in positional order.
pub mod formal {
    pub const WAS_GENERATED_BY: &[&str] = &["prov:entity", "prov:activity", "prov:time"];
    pub const USED: &[&str] = &["prov:activity", "prov:entity", "prov:time"];
    pub const WAS_INFORMED_BY: &[&str] = &["prov:informed", "prov:informant"];
    pub const WAS_STARTED_BY: &[&str] =
        &["prov:activity", "prov:trigger", "prov:starter", "prov:time"];
    pub const WAS_ENDED_BY: &[&str] = &["prov:activity", "prov:trigger", "prov:ender", "prov:time"];
    pub const WAS_INVALIDATED_BY: &[&str] = &["prov:entity", "prov:activity", "prov:time"];
    pub const WAS_DERIVED_FROM: &[&str] = &[
        "prov:generatedEntity",
        "prov:usedEntity",
        "prov:activity",
        "prov:generation",
        "prov:usage",
    ];
    pub const WAS_ATTRIBUTED_TO: &[&str] = &["prov:entity", "prov:agent"];
    pub const WAS_ASSOCIATED_WITH: &[&str] = &["prov:activity", "prov:agent", "prov:plan"];
    pub const ACTED_ON_BEHALF_OF: &[&str] =
        &["prov:delegate", "prov:responsible", "prov:activity"];
    pub const WAS_INFLUENCED_BY: &[&str] = &["prov:influencee", "prov:influencer"];
    pub const ALTERNATE_OF: &[&str] = &["prov:alternate1", "prov:alternate2"];
    pub const SPECIALIZATION_OF: &[&str] = &["prov:specificEntity", "prov:generalEntity"];
    pub const MENTION_OF: &[&str] = &["prov:specificEntity", "prov:generalEntity", "prov:bundle"];
    pub const HAD_MEMBER: &[&str] = &["prov:collection", "prov:entity"];
}

// Datatypes decoded into native values by the PROV-JSON reader
pub mod xsd {
    pub const STRING: &str = "xsd:string";
    pub const INT: &str = "xsd:int";
    pub const INTEGER: &str = "xsd:integer";
    pub const LONG: &str = "xsd:long";
    pub const SHORT: &str = "xsd:short";
    pub const DOUBLE: &str = "xsd:double";
    pub const FLOAT: &str = "xsd:float";
    pub const DECIMAL: &str = "xsd:decimal";
    pub const BOOLEAN: &str = "xsd:boolean";
    pub const DATE_TIME: &str = "xsd:dateTime";
    pub const DATE: &str = "xsd:date";
    pub const TIME: &str = "xsd:time";
    pub const QNAME: &str = "xsd:QName";
    pub const ANY_URI: &str = "xsd:anyURI";
}
