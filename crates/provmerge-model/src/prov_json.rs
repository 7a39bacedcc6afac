//! PROV-JSON reader.
//!
//! Reads the W3C PROV-JSON serialization into a [`ProvDocument`]. Bundles
//! inherit the prefixes of their enclosing scope and may declare their own.
//! Typed values whose datatype has a native counterpart (numbers, booleans,
//! dates and times, qualified names) are decoded; every other typed value is
//! kept as a [`Literal`].

use crate::document::{Attribute, Bundle, Element, ElementKind, ProvDocument, Relation, RelationKind};
use crate::error::{ModelError, Result};
use crate::qualified_name::QualifiedName;
use crate::value::{AttributeValue, Literal};
use crate::vocabulary::{namespaces, prefixes, prov, sections, xsd};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

pub fn from_str(text: &str) -> Result<ProvDocument> {
    let value: Value = serde_json::from_str(text)?;
    from_value(&value)
}

pub fn from_reader<R: Read>(reader: R) -> Result<ProvDocument> {
    let value: Value = serde_json::from_reader(reader)?;
    from_value(&value)
}

pub fn from_path(path: impl AsRef<Path>) -> Result<ProvDocument> {
    let file = std::fs::File::open(path)?;
    from_reader(std::io::BufReader::new(file))
}

pub fn from_value(value: &Value) -> Result<ProvDocument> {
    let root = as_object(value, "$")?;
    let scope = Scope::root().child(root, "$")?;
    let container = read_container(root, &scope, "$")?;

    let mut doc = ProvDocument::new();
    for (prefix, uri) in &scope.prefixes {
        doc.add_namespace(prefix.clone(), uri.clone());
    }
    for element in container.elements {
        doc.push_element(element);
    }
    for relation in container.relations {
        doc.push_relation(relation);
    }
    for bundle in container.bundles {
        doc.push_bundle(bundle);
    }
    Ok(doc)
}

/// Prefix bindings visible at one level of the document.
#[derive(Debug, Clone)]
struct Scope {
    prefixes: BTreeMap<String, String>,
    default_namespace: Option<String>,
}

impl Scope {
    fn root() -> Self {
        let mut prefixes = BTreeMap::new();
        prefixes.insert(prefixes::PROV.to_string(), namespaces::PROV.to_string());
        prefixes.insert(prefixes::XSD.to_string(), namespaces::XSD.to_string());
        Self { prefixes, default_namespace: None }
    }

    fn child(&self, container: &Map<String, Value>, path: &str) -> Result<Self> {
        let mut scope = self.clone();
        let Some(declared) = container.get(sections::PREFIX) else {
            return Ok(scope);
        };
        let declared = as_object(declared, &format!("{path}.prefix"))?;
        for (prefix, uri) in declared {
            let uri = uri.as_str().ok_or_else(|| ModelError::InvalidDocument {
                path: format!("{path}.prefix.{prefix}"),
                reason: "namespace URI must be a string".to_string(),
            })?;
            if prefix == prefixes::DEFAULT {
                scope.default_namespace = Some(uri.to_string());
            } else {
                scope.prefixes.insert(prefix.clone(), uri.to_string());
            }
        }
        Ok(scope)
    }

    fn name(&self, text: &str) -> QualifiedName {
        if let Some((prefix, local)) = text.split_once(':') {
            if let Some(uri) = self.prefixes.get(prefix) {
                return QualifiedName::new(prefix, local).with_namespace(uri.clone());
            }
            return QualifiedName::parse(text);
        }
        match &self.default_namespace {
            Some(uri) => QualifiedName::unprefixed(text).with_namespace(uri.clone()),
            None => QualifiedName::unprefixed(text),
        }
    }
}

#[derive(Default)]
struct Container {
    elements: Vec<Element>,
    relations: Vec<Relation>,
    bundles: Vec<Bundle>,
}

fn read_container(body: &Map<String, Value>, scope: &Scope, path: &str) -> Result<Container> {
    let mut container = Container::default();
    for (section, records) in body {
        let section_path = format!("{path}.{section}");
        match section.as_str() {
            sections::PREFIX => {}
            sections::ENTITY => {
                read_elements(ElementKind::Entity, records, scope, &section_path, &mut container)?
            }
            sections::ACTIVITY => {
                read_elements(ElementKind::Activity, records, scope, &section_path, &mut container)?
            }
            sections::AGENT => {
                read_elements(ElementKind::Agent, records, scope, &section_path, &mut container)?
            }
            sections::BUNDLE => {
                for (id, content) in as_object(records, &section_path)? {
                    let bundle_path = format!("{section_path}.{id}");
                    let content = as_object(content, &bundle_path)?;
                    let inner_scope = scope.child(content, &bundle_path)?;
                    let inner = read_container(content, &inner_scope, &bundle_path)?;
                    container.bundles.push(Bundle {
                        identifier: scope.name(id),
                        attributes: Vec::new(),
                        elements: inner.elements,
                        relations: inner.relations,
                        bundles: inner.bundles,
                    });
                }
            }
            other => {
                let kind = RelationKind::from_label(other)
                    .ok_or_else(|| ModelError::UnknownRelation(other.to_string()))?;
                for (id, declarations) in as_object(records, &section_path)? {
                    let record_path = format!("{section_path}.{id}");
                    for declaration in declarations_of(declarations, &record_path)? {
                        if let Some(relation) =
                            read_relation(kind, id, declaration, scope, &record_path)?
                        {
                            container.relations.push(relation);
                        }
                    }
                }
            }
        }
    }
    Ok(container)
}

fn read_elements(
    kind: ElementKind,
    records: &Value,
    scope: &Scope,
    path: &str,
    container: &mut Container,
) -> Result<()> {
    for (id, declarations) in as_object(records, path)? {
        let record_path = format!("{path}.{id}");
        for declaration in declarations_of(declarations, &record_path)? {
            let mut element = Element::new(kind, scope.name(id));
            for (key, value) in declaration {
                let key_name = scope.name(key);
                for value in read_values(key, value, scope, &record_path)? {
                    element.attributes.push(Attribute { key: key_name.clone(), value });
                }
            }
            container.elements.push(element);
        }
    }
    Ok(())
}

fn read_relation(
    kind: RelationKind,
    id: &str,
    declaration: &Map<String, Value>,
    scope: &Scope,
    path: &str,
) -> Result<Option<Relation>> {
    let formal_keys = kind.formal_keys();
    let missing = |attribute: &str| ModelError::MissingFormal {
        relation: kind.label().to_string(),
        path: path.to_string(),
        attribute: attribute.to_string(),
    };

    let source = declaration
        .get(formal_keys[0])
        .and_then(Value::as_str)
        .ok_or_else(|| missing(formal_keys[0]))?;
    let Some(target) = declaration.get(formal_keys[1]) else {
        warn!(relation = kind.label(), path, "Relation has no target, skipping");
        return Ok(None);
    };
    let target = match target {
        Value::String(text) => AttributeValue::QualifiedName(scope.name(text)),
        other => read_value(formal_keys[1], other, scope, path)?,
    };

    let mut relation = Relation::new(kind, scope.name(source), target);
    if !id.starts_with("_:") {
        relation.identifier = Some(scope.name(id));
    }
    for key in &formal_keys[2..] {
        let Some(value) = declaration.get(*key) else { continue };
        let value = match value {
            Value::String(text) if *key == prov::TIME => {
                AttributeValue::DateTime(parse_datetime(text)?)
            }
            Value::String(text) => AttributeValue::QualifiedName(scope.name(text)),
            other => read_value(key, other, scope, path)?,
        };
        relation.formal_attributes.push(Attribute { key: scope.name(key), value });
    }
    for (key, value) in declaration {
        if formal_keys.contains(&key.as_str()) {
            continue;
        }
        let key_name = scope.name(key);
        for value in read_values(key, value, scope, path)? {
            relation.attributes.push(Attribute { key: key_name.clone(), value });
        }
    }
    Ok(Some(relation))
}

/// A record body is either one declaration or a list of repeated ones.
fn declarations_of<'a>(value: &'a Value, path: &str) -> Result<Vec<&'a Map<String, Value>>> {
    match value {
        Value::Object(map) => Ok(vec![map]),
        Value::Array(items) => items.iter().map(|item| as_object(item, path)).collect(),
        _ => Err(ModelError::InvalidDocument {
            path: path.to_string(),
            reason: "record must be an object or a list of objects".to_string(),
        }),
    }
}

fn read_values(key: &str, value: &Value, scope: &Scope, path: &str) -> Result<Vec<AttributeValue>> {
    match value {
        Value::Array(items) => items.iter().map(|item| read_value(key, item, scope, path)).collect(),
        other => Ok(vec![read_value(key, other, scope, path)?]),
    }
}

fn read_value(key: &str, value: &Value, scope: &Scope, path: &str) -> Result<AttributeValue> {
    match value {
        Value::String(text) if key == prov::START_TIME || key == prov::END_TIME || key == prov::TIME => {
            Ok(AttributeValue::DateTime(parse_datetime(text)?))
        }
        Value::String(text) => Ok(AttributeValue::String(text.clone())),
        Value::Bool(flag) => Ok(AttributeValue::Boolean(*flag)),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => Ok(AttributeValue::Integer(integer)),
            None => Ok(AttributeValue::Float(number.as_f64().unwrap_or(f64::NAN))),
        },
        Value::Object(map) => {
            let lexical = match map.get("$") {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Number(number)) => number.to_string(),
                Some(Value::Bool(flag)) => flag.to_string(),
                _ => {
                    return Err(ModelError::InvalidDocument {
                        path: format!("{path}.{key}"),
                        reason: "typed value must carry a '$' entry".to_string(),
                    });
                }
            };
            if let Some(language) = map.get("lang").and_then(Value::as_str) {
                return Ok(AttributeValue::Literal(Literal::lang(lexical, language)));
            }
            match map.get("type").and_then(Value::as_str) {
                Some(datatype) => decode_typed(&lexical, datatype, scope),
                None => Ok(AttributeValue::String(lexical)),
            }
        }
        Value::Null => Err(ModelError::InvalidDocument {
            path: format!("{path}.{key}"),
            reason: "attribute value cannot be null".to_string(),
        }),
        Value::Array(_) => Err(ModelError::InvalidDocument {
            path: format!("{path}.{key}"),
            reason: "nested lists are not valid attribute values".to_string(),
        }),
    }
}

fn decode_typed(lexical: &str, datatype: &str, scope: &Scope) -> Result<AttributeValue> {
    let invalid = || ModelError::InvalidValue {
        datatype: datatype.to_string(),
        value: lexical.to_string(),
    };
    let value = match datatype {
        xsd::STRING => AttributeValue::String(lexical.to_string()),
        xsd::INT | xsd::INTEGER | xsd::LONG => {
            AttributeValue::Integer(lexical.trim().parse().map_err(|_| invalid())?)
        }
        xsd::DOUBLE | xsd::FLOAT => {
            AttributeValue::Float(lexical.trim().parse().map_err(|_| invalid())?)
        }
        xsd::BOOLEAN => match lexical.trim() {
            "true" | "1" => AttributeValue::Boolean(true),
            "false" | "0" => AttributeValue::Boolean(false),
            _ => return Err(invalid()),
        },
        xsd::DATE_TIME => AttributeValue::DateTime(parse_datetime(lexical)?),
        xsd::DATE => AttributeValue::Date(
            NaiveDate::parse_from_str(lexical.trim(), "%Y-%m-%d").map_err(|_| invalid())?,
        ),
        xsd::TIME => AttributeValue::Time(
            NaiveTime::parse_from_str(lexical.trim(), "%H:%M:%S%.f").map_err(|_| invalid())?,
        ),
        prov::QUALIFIED_NAME | xsd::QNAME => AttributeValue::QualifiedName(scope.name(lexical)),
        other => AttributeValue::Literal(Literal::typed(lexical, scope.name(other))),
    };
    Ok(value)
}

/// RFC 3339 timestamps; values without an offset are taken as UTC.
fn parse_datetime(text: &str) -> Result<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Ok(value);
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|_| ModelError::InvalidValue {
            datatype: xsd::DATE_TIME.to_string(),
            value: text.to_string(),
        })
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| ModelError::InvalidDocument {
        path: path.to_string(),
        reason: "expected a JSON object".to_string(),
    })
}
