//! XML rendering of records.
//!
//! ## Architecture
//!
//! - [`Namespaces`]: the per-render URI to prefix registry.
//! - [`Element`]: the in-memory element tree a record is rendered into.
//! - `TreeBuilder`: walks a record's descriptor table and dispatches every
//!   field on its classification.
//! - [`XmlSerializer`]: builds the tree, moves every namespace declaration to
//!   the root and writes the result through quick-xml.
//!
//! ## Field mapping
//!
//! | Classification | XML |
//! |----------------|-----|
//! | element | one child element per value, `<number>1</number>` |
//! | attribute | one attribute on the owner, `id="7"` |
//! | text | the owner's text content |
//! | wildcard element | pre-rendered children, with mixed text as text/tail |
//! | wildcard attribute | open attributes copied onto the owner |
//!
//! ## Nil handling
//!
//! A nillable field whose element ends up with neither text nor children is
//! written as `<color xsi:nil="true"/>`, with the `xsi` prefix declared on the
//! root element. An element holding an empty string is not nil.

mod builder;
pub mod namespaces;
pub mod ser;
pub mod tree;
mod utils;

pub use namespaces::Namespaces;
pub use ser::{XmlSerializer, to_xml_string, to_xml_tree, to_xml_vec, to_xml_writer};
pub use tree::{DeclMap, Element};
