use crate::qualified_name::QualifiedName;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use std::fmt;

/// A literal whose lexical form was kept as text, optionally typed or
/// language-tagged.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<QualifiedName>,
    pub language: Option<String>,
}

impl Literal {
    pub fn typed(value: impl Into<String>, datatype: QualifiedName) -> Self {
        Self { value: value.into(), datatype: Some(datatype), language: None }
    }

    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self { value: value.into(), datatype: None, language: Some(language.into()) }
    }

    pub fn plain(value: impl Into<String>) -> Self {
        Self { value: value.into(), datatype: None, language: None }
    }
}

/// PROV-N form: `"text" %% xsd:type` or `"text"@lang`.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escaped = self.value.replace('\\', "\\\\").replace('"', "\\\"");
        match (&self.language, &self.datatype) {
            (Some(language), _) => write!(f, "\"{}\"@{}", escaped, language),
            (None, Some(datatype)) => write!(f, "\"{}\" %% {}", escaped, datatype),
            (None, None) => write!(f, "\"{}\"", escaped),
        }
    }
}

/// Value of an attribute or of a relation's formal target.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    QualifiedName(QualifiedName),
    Literal(Literal),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Time(NaiveTime),
    Duration(Duration),
}

impl AttributeValue {
    pub fn as_qualified_name(&self) -> Option<&QualifiedName> {
        match self {
            AttributeValue::QualifiedName(name) => Some(name),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<QualifiedName> for AttributeValue {
    fn from(value: QualifiedName) -> Self {
        AttributeValue::QualifiedName(value)
    }
}

impl From<Literal> for AttributeValue {
    fn from(value: Literal) -> Self {
        AttributeValue::Literal(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<NaiveDate> for AttributeValue {
    fn from(value: NaiveDate) -> Self {
        AttributeValue::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for AttributeValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        AttributeValue::DateTime(value)
    }
}

impl From<NaiveTime> for AttributeValue {
    fn from(value: NaiveTime) -> Self {
        AttributeValue::Time(value)
    }
}

impl From<Duration> for AttributeValue {
    fn from(value: Duration) -> Self {
        AttributeValue::Duration(value)
    }
}
