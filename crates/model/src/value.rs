//! Borrowed field values and the primitive value converter.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::any::AnyContent;
use crate::meta::Record;
use crate::qname::QName;
use crate::single_or_vec::SingleOrVec;

/// Ordered attribute set keyed by qualified name.
pub type AttributeMap = IndexMap<QName, String>;

/// A leaf value with a lexical XML representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive<'a> {
    Str(Cow<'a, str>),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Decimal(Decimal),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    DateTimeTz(DateTime<FixedOffset>),
    QName(QName),
    /// An enumeration value, already in its lexical form.
    Token(Cow<'a, str>),
    /// A whitespace-separated list (`xs:list`).
    List(Vec<Primitive<'a>>),
}

impl Primitive<'_> {
    /// Converts the value to its lexical XML form.
    pub fn to_xml_text(&self) -> String {
        match self {
            Primitive::Str(s) | Primitive::Token(s) => s.to_string(),
            Primitive::Bool(b) => bool_to_string(*b).to_string(),
            Primitive::Int(i) => i.to_string(),
            Primitive::UInt(u) => u.to_string(),
            Primitive::Float(f) => float_to_string(*f),
            Primitive::Decimal(d) => d.normalize().to_string(),
            Primitive::Date(d) => d.format("%Y-%m-%d").to_string(),
            Primitive::Time(t) => t.format("%H:%M:%S%.f").to_string(),
            Primitive::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            Primitive::DateTimeTz(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Primitive::QName(q) => q.to_string(),
            Primitive::List(items) => items
                .iter()
                .map(Primitive::to_xml_text)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Borrows an owned primitive without copying its strings.
    pub fn reborrow(&self) -> Primitive<'_> {
        match self {
            Primitive::Str(s) => Primitive::Str(Cow::Borrowed(&**s)),
            Primitive::Token(s) => Primitive::Token(Cow::Borrowed(&**s)),
            Primitive::List(items) => {
                Primitive::List(items.iter().map(Primitive::reborrow).collect())
            }
            Primitive::Bool(b) => Primitive::Bool(*b),
            Primitive::Int(i) => Primitive::Int(*i),
            Primitive::UInt(u) => Primitive::UInt(*u),
            Primitive::Float(f) => Primitive::Float(*f),
            Primitive::Decimal(d) => Primitive::Decimal(*d),
            Primitive::Date(d) => Primitive::Date(*d),
            Primitive::Time(t) => Primitive::Time(*t),
            Primitive::DateTime(dt) => Primitive::DateTime(*dt),
            Primitive::DateTimeTz(dt) => Primitive::DateTimeTz(*dt),
            Primitive::QName(q) => Primitive::QName(q.clone()),
        }
    }

    /// Detaches the value from any borrowed data.
    pub fn into_owned(self) -> Primitive<'static> {
        match self {
            Primitive::Str(s) => Primitive::Str(Cow::Owned(s.into_owned())),
            Primitive::Token(s) => Primitive::Token(Cow::Owned(s.into_owned())),
            Primitive::List(items) => {
                Primitive::List(items.into_iter().map(Primitive::into_owned).collect())
            }
            Primitive::Bool(b) => Primitive::Bool(b),
            Primitive::Int(i) => Primitive::Int(i),
            Primitive::UInt(u) => Primitive::UInt(u),
            Primitive::Float(f) => Primitive::Float(f),
            Primitive::Decimal(d) => Primitive::Decimal(d),
            Primitive::Date(d) => Primitive::Date(d),
            Primitive::Time(t) => Primitive::Time(t),
            Primitive::DateTime(dt) => Primitive::DateTime(dt),
            Primitive::DateTimeTz(dt) => Primitive::DateTimeTz(dt),
            Primitive::QName(q) => Primitive::QName(q),
        }
    }
}

impl fmt::Display for Primitive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_text())
    }
}

fn bool_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

fn float_to_string(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        f.to_string()
    }
}

/// The value of one field, as handed to the renderer by [`Record::value`].
///
/// Whether a value is a leaf or a nested record is decided by the record
/// implementation, not discovered by the renderer.
#[derive(Clone)]
pub enum Value<'a> {
    Leaf(Primitive<'a>),
    Composite(&'a dyn Record),
    /// Several values for a repeated field.
    Sequence(Vec<Value<'a>>),
    /// Open attributes of a wildcard-attribute field.
    Attributes(&'a AttributeMap),
    /// One item of wildcard element content.
    Any(&'a AnyContent),
}

impl<'a> Value<'a> {
    pub fn record<R: Record>(record: &'a R) -> Self {
        Value::Composite(record)
    }

    /// A repeated field built from any iterator of values.
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value<'a>>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// A repeated field of nested records.
    pub fn records<R: Record>(records: &'a [R]) -> Self {
        Value::Sequence(records.iter().map(|r| Value::Composite(r)).collect())
    }

    /// Wildcard element content.
    pub fn any(content: &'a [AnyContent]) -> Self {
        Value::Sequence(content.iter().map(Value::Any).collect())
    }

    /// Normalizes the value to a sequence of items.
    pub fn into_items(self) -> SingleOrVec<Value<'a>> {
        match self {
            Value::Sequence(items) => SingleOrVec::from(items),
            single => SingleOrVec::single(single),
        }
    }

    /// Short description of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Leaf(_) => "leaf",
            Value::Composite(_) => "record",
            Value::Sequence(_) => "sequence",
            Value::Attributes(_) => "attribute map",
            Value::Any(_) => "wildcard content",
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Leaf(p) => f.debug_tuple("Leaf").field(p).finish(),
            Value::Composite(r) => f.debug_tuple("Composite").field(r).finish(),
            Value::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Value::Attributes(attrs) => f.debug_tuple("Attributes").field(attrs).finish(),
            Value::Any(content) => f.debug_tuple("Any").field(content).finish(),
        }
    }
}

impl<'a> From<Primitive<'a>> for Value<'a> {
    fn from(p: Primitive<'a>) -> Self {
        Value::Leaf(p)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Leaf(Primitive::Str(Cow::Borrowed(s)))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Leaf(Primitive::Str(Cow::Borrowed(s.as_str())))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Leaf(Primitive::Str(Cow::Owned(s)))
    }
}

impl<'a> From<&'a AttributeMap> for Value<'a> {
    fn from(attrs: &'a AttributeMap) -> Self {
        Value::Attributes(attrs)
    }
}

impl<'a> From<&'a AnyContent> for Value<'a> {
    fn from(content: &'a AnyContent) -> Self {
        Value::Any(content)
    }
}

macro_rules! leaf_from {
    ($variant:ident: $($ty:ty => $conv:expr),* $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                #[allow(clippy::redundant_closure_call)]
                fn from(v: $ty) -> Self {
                    Value::Leaf(Primitive::$variant(($conv)(v)))
                }
            }
        )*
    };
}

leaf_from!(Int: i8 => i64::from, i16 => i64::from, i32 => i64::from, i64 => |v| v);
leaf_from!(UInt: u8 => u64::from, u16 => u64::from, u32 => u64::from, u64 => |v| v);
leaf_from!(Float: f32 => f64::from, f64 => |v| v);
leaf_from!(Bool: bool => |v| v);
leaf_from!(Decimal: Decimal => |v| v);
leaf_from!(Date: NaiveDate => |v| v);
leaf_from!(Time: NaiveTime => |v| v);
leaf_from!(DateTime: NaiveDateTime => |v| v);
leaf_from!(DateTimeTz: DateTime<FixedOffset> => |v| v, DateTime<Utc> => |v: DateTime<Utc>| v.fixed_offset());
leaf_from!(QName: QName => |v| v);
