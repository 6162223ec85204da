//! Records whose descriptor table is built at runtime.
//!
//! A [`DynamicRecord`] owns both its [`RecordMeta`] and its field values. It
//! can be assembled programmatically or decoded from a self-describing JSON
//! document:
//!
//! ```json
//! {
//!   "name": "product",
//!   "namespace": "urn:shop",
//!   "fields": [
//!     {"name": "number", "kind": "element", "value": 557},
//!     {"name": "color", "kind": "element", "nillable": true},
//!     {"name": "lang", "kind": "attribute",
//!      "namespace": "http://www.w3.org/XML/1998/namespace", "value": "en"},
//!     {"name": "content", "kind": "wildcard-element",
//!      "value": ["lead ", {"qname": "b", "text": "bold"}, " trail"]},
//!     {"name": "extra", "kind": "wildcard-attribute",
//!      "value": {"{urn:ext}flag": "1"}}
//!   ]
//! }
//! ```
//!
//! Element values are decoded by shape: objects carrying a `fields` key are
//! nested records, arrays are repeated values, everything else is a leaf.

use std::borrow::Cow;

use serde::Deserialize;
use serde_json::Value as Json;

use crate::any::AnyContent;
use crate::error::{ModelError, Result};
use crate::meta::{FieldKind, FieldMeta, Record, RecordMeta};
use crate::single_or_vec::SingleOrVec;
use crate::value::{AttributeMap, Primitive, Value};

/// Owned field value of a [`DynamicRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    Leaf(Primitive<'static>),
    Record(Box<DynamicRecord>),
    Sequence(Vec<DynamicValue>),
    Attributes(AttributeMap),
    Any(Vec<AnyContent>),
}

impl DynamicValue {
    fn as_value(&self) -> Value<'_> {
        match self {
            DynamicValue::Leaf(p) => Value::Leaf(p.reborrow()),
            DynamicValue::Record(r) => Value::Composite(&**r),
            DynamicValue::Sequence(items) => {
                Value::Sequence(items.iter().map(DynamicValue::as_value).collect())
            }
            DynamicValue::Attributes(attrs) => Value::Attributes(attrs),
            DynamicValue::Any(content) => Value::any(content),
        }
    }
}

impl<'a> From<Primitive<'a>> for DynamicValue {
    fn from(p: Primitive<'a>) -> Self {
        DynamicValue::Leaf(p.into_owned())
    }
}

impl From<DynamicRecord> for DynamicValue {
    fn from(record: DynamicRecord) -> Self {
        DynamicValue::Record(Box::new(record))
    }
}

/// A record with a runtime descriptor table and owned values.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    meta: RecordMeta,
    values: Vec<Option<DynamicValue>>,
}

impl DynamicRecord {
    /// Creates a record with every field absent.
    pub fn new(meta: RecordMeta) -> Self {
        let values = vec![None; meta.fields().len()];
        Self { meta, values }
    }

    /// Assigns the value of the field called `name`.
    pub fn set(&mut self, name: &str, value: impl Into<DynamicValue>) -> Result<()> {
        let index = self
            .meta
            .position(name)
            .ok_or_else(|| ModelError::UnknownField {
                record: self.meta.qname().to_string(),
                field: name.to_string(),
            })?;
        self.values[index] = Some(value.into());
        Ok(())
    }

    pub fn with(mut self, name: &str, value: impl Into<DynamicValue>) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&DynamicValue> {
        let index = self.meta.position(name)?;
        self.values[index].as_ref()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: RecordDoc = serde_json::from_str(json)?;
        doc.into_record()
    }

    pub fn from_json_slice(json: &[u8]) -> Result<Self> {
        let doc: RecordDoc = serde_json::from_slice(json)?;
        doc.into_record()
    }

    pub fn from_json_value(json: Json) -> Result<Self> {
        let doc: RecordDoc = serde_json::from_value(json)?;
        doc.into_record()
    }
}

impl Record for DynamicRecord {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn value(&self, index: usize) -> Option<Value<'_>> {
        self.values.get(index)?.as_ref().map(DynamicValue::as_value)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordDoc {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    fields: Vec<FieldDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDoc {
    name: String,
    #[serde(default = "default_kind")]
    kind: FieldKind,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    local_name: Option<String>,
    #[serde(default)]
    nillable: bool,
    #[serde(default)]
    value: Option<Json>,
}

fn default_kind() -> FieldKind {
    FieldKind::Element
}

impl RecordDoc {
    fn into_record(self) -> Result<DynamicRecord> {
        let mut meta = RecordMeta::new(self.name);
        if let Some(ns) = self.namespace {
            meta = meta.with_namespace(ns);
        }

        let mut values = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            let mut field_meta = FieldMeta::new(field.name, field.kind);
            if let Some(ns) = field.namespace {
                field_meta = field_meta.with_namespace(ns);
            }
            if let Some(local) = field.local_name {
                field_meta = field_meta.with_local_name(local);
            }
            if field.nillable {
                field_meta = field_meta.nillable();
            }

            let value = match field.value {
                None | Some(Json::Null) => None,
                Some(json) => Some(decode_field(&field_meta, json)?),
            };
            meta.push_field(field_meta);
            values.push(value);
        }

        meta.validate()?;
        Ok(DynamicRecord { meta, values })
    }
}

fn decode_field(field: &FieldMeta, json: Json) -> Result<DynamicValue> {
    match field.kind {
        FieldKind::Element | FieldKind::Text => decode_element(json),
        FieldKind::Attribute => decode_leaf(json)
            .map(DynamicValue::Leaf)
            .ok_or_else(|| invalid(field, "a scalar or a list of scalars")),
        FieldKind::WildcardElement => {
            let content: SingleOrVec<AnyContent> = serde_json::from_value(json)?;
            Ok(DynamicValue::Any(content.into_vec()))
        }
        FieldKind::WildcardAttribute => {
            let attrs: AttributeMap = serde_json::from_value(json)?;
            Ok(DynamicValue::Attributes(attrs))
        }
    }
}

fn decode_element(json: Json) -> Result<DynamicValue> {
    match json {
        Json::Array(items) => items
            .into_iter()
            .map(decode_element)
            .collect::<Result<Vec<_>>>()
            .map(DynamicValue::Sequence),
        Json::Object(map) if map.contains_key("fields") => {
            DynamicRecord::from_json_value(Json::Object(map)).map(DynamicValue::from)
        }
        other => decode_leaf(other).map(DynamicValue::Leaf).ok_or_else(|| {
            ModelError::InvalidDocument("element values must be scalars, arrays or records".into())
        }),
    }
}

fn decode_leaf(json: Json) -> Option<Primitive<'static>> {
    match json {
        Json::String(s) => Some(Primitive::Str(Cow::Owned(s))),
        Json::Bool(b) => Some(Primitive::Bool(b)),
        Json::Number(n) => n
            .as_i64()
            .map(Primitive::Int)
            .or_else(|| n.as_u64().map(Primitive::UInt))
            .or_else(|| n.as_f64().map(Primitive::Float)),
        Json::Array(items) => items
            .into_iter()
            .map(decode_leaf)
            .collect::<Option<Vec<_>>>()
            .map(Primitive::List),
        Json::Null | Json::Object(_) => None,
    }
}

fn invalid(field: &FieldMeta, expected: &str) -> ModelError {
    ModelError::InvalidDocument(format!(
        "{} field `{}` expects {}",
        field.kind, field.name, expected
    ))
}
