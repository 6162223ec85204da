//! # xmlbind data model
//!
//! Types shared between record definitions and the XML renderer in
//! `xmlbind-serde`.
//!
//! - [`QName`]: a `(namespace, local name)` pair, written in Clark notation
//!   (`{uri}local`) when it has to travel as a string.
//! - [`RecordMeta`] / [`FieldMeta`]: the static descriptor table of a record
//!   type. Every field is classified as an element, attribute, text, wildcard
//!   element or wildcard attribute.
//! - [`Record`]: implemented by every type that can be rendered. The renderer
//!   only ever consults the descriptor table and the borrowed [`Value`] view a
//!   record hands out for each field, never the concrete Rust type.
//! - [`AnyContent`]: open wildcard content (plain text, annotated text or a
//!   pre-rendered element).
//! - [`Primitive`]: leaf values and their lexical XML form.
//! - [`DynamicRecord`]: a record whose descriptor table is built at runtime,
//!   for example from a JSON document.
//!
//! ## Describing a record
//!
//! ```
//! use std::sync::LazyLock;
//! use xmlbind_model::{FieldMeta, Record, RecordMeta, Value};
//!
//! struct Product {
//!     number: i32,
//!     name: String,
//!     color: Option<String>,
//! }
//!
//! static PRODUCT: LazyLock<RecordMeta> = LazyLock::new(|| {
//!     RecordMeta::new("product")
//!         .field(FieldMeta::element("number"))
//!         .field(FieldMeta::element("name"))
//!         .field(FieldMeta::element("color").nillable())
//! });
//!
//! impl Record for Product {
//!     fn meta(&self) -> &RecordMeta {
//!         &PRODUCT
//!     }
//!
//!     fn value(&self, index: usize) -> Option<Value<'_>> {
//!         match index {
//!             0 => Some(self.number.into()),
//!             1 => Some(self.name.as_str().into()),
//!             2 => self.color.as_deref().map(Value::from),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

pub mod any;
pub mod dynamic;
pub mod error;
pub mod meta;
pub mod namespace;
pub mod qname;
pub mod single_or_vec;
pub mod value;

pub use any::{AnyContent, AnyElement, AnyText, NsMap};
pub use dynamic::{DynamicRecord, DynamicValue};
pub use error::{ModelError, Result};
pub use meta::{FieldKind, FieldMeta, Record, RecordMeta};
pub use namespace::Namespace;
pub use qname::QName;
pub use single_or_vec::SingleOrVec;
pub use value::{AttributeMap, Primitive, Value};
