use crate::identifier::encode_identifier;
use chrono::{DateTime, Duration, FixedOffset, NaiveTime};
use provmerge_model::AttributeValue;
use serde::{Serialize, Serializer};

/// A value in the primitive vocabulary of the graph store.
///
/// Serializes as plain JSON: temporal values become their ISO 8601 text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(#[serde(serialize_with = "datetime_text")] DateTime<FixedOffset>),
    Time(#[serde(serialize_with = "time_text")] NaiveTime),
    Duration(#[serde(serialize_with = "duration_text")] Duration),
    List(Vec<PropertyValue>),
}

fn datetime_text<S: Serializer>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339())
}

fn time_text<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format("%H:%M:%S%.f"))
}

fn duration_text<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("PT{}S", value.num_milliseconds() as f64 / 1000.0))
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Text usable as a node label. Temporal values and lists have none.
    pub fn label_text(&self) -> Option<String> {
        match self {
            PropertyValue::String(value) => Some(value.clone()),
            PropertyValue::Integer(value) => Some(value.to_string()),
            PropertyValue::Float(value) => Some(value.to_string()),
            PropertyValue::Boolean(value) => Some(value.to_string()),
            _ => None,
        }
    }

    /// Value identity for de-duplication. Floats compare by bit pattern, so
    /// a repeated NaN counts as the same value.
    pub fn same_as(&self, other: &PropertyValue) -> bool {
        match (self, other) {
            (PropertyValue::Float(left), PropertyValue::Float(right)) => left.to_bits() == right.to_bits(),
            (PropertyValue::List(left), PropertyValue::List(right)) => {
                left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l.same_as(r))
            }
            _ => self == other,
        }
    }

    /// Scalars as a one-element slice, lists as their items.
    pub fn items(&self) -> &[PropertyValue] {
        match self {
            PropertyValue::List(values) => values,
            other => std::slice::from_ref(other),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

/// Map an attribute value onto a store primitive.
///
/// Qualified names become their encoded identifier, literals their PROV-N
/// text, dates midnight UTC timestamps. A chrono duration already holds the
/// total elapsed time and is stored as is. Everything else passes through.
pub fn encode_value(value: &AttributeValue) -> PropertyValue {
    match value {
        AttributeValue::QualifiedName(name) => PropertyValue::String(encode_identifier(name)),
        AttributeValue::Literal(literal) => PropertyValue::String(literal.to_string()),
        AttributeValue::DateTime(value) => PropertyValue::DateTime(*value),
        AttributeValue::Date(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| PropertyValue::DateTime(midnight.and_utc().fixed_offset()))
            .unwrap_or_else(|| PropertyValue::String(date.to_string())),
        AttributeValue::Time(value) => PropertyValue::Time(*value),
        AttributeValue::Duration(value) => PropertyValue::Duration(*value),
        AttributeValue::String(value) => PropertyValue::String(value.clone()),
        AttributeValue::Integer(value) => PropertyValue::Integer(*value),
        AttributeValue::Float(value) => PropertyValue::Float(*value),
        AttributeValue::Boolean(value) => PropertyValue::Boolean(*value),
    }
}
