//! # xmlbind XML renderer
//!
//! Renders [`Record`](xmlbind_model::Record) instances into an XML element tree
//! and from there into text.
//!
//! ## Features
//!
//! - **Descriptor driven**: the renderer only consults the record's static
//!   descriptor table, never the concrete Rust type.
//! - **Namespaces**: every namespace is registered once per render and
//!   declared once on the root element. Well-known namespaces (`xsi`, `xs`,
//!   `xlink`, ...) always keep their conventional prefix; others are named
//!   `ns0`, `ns1`, ... in first-use order.
//! - **Wildcard content**: open element content with mixed text, annotated
//!   text and open attributes.
//! - **All or nothing**: the tree is built completely before any text is
//!   written, so a failing render produces no output.
//!
//! ## Examples
//!
//! ```
//! use xmlbind_model::{DynamicRecord, FieldMeta, Primitive, RecordMeta};
//! use xmlbind_serde::{SerializerConfig, XmlSerializer};
//!
//! let meta = RecordMeta::new("product")
//!     .with_namespace("urn:shop")
//!     .field(FieldMeta::element("name").with_namespace("urn:shop"))
//!     .field(FieldMeta::element("color").with_namespace("urn:shop").nillable());
//! let product = DynamicRecord::new(meta).with("name", Primitive::Str("Shirt".into()))?;
//!
//! let serializer = XmlSerializer::new(SerializerConfig {
//!     xml_declaration: false,
//!     ..Default::default()
//! });
//! let xml = serializer.render(&product)?;
//! assert_eq!(
//!     xml,
//!     "<ns0:product xmlns:ns0=\"urn:shop\" \
//!      xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
//!      <ns0:name>Shirt</ns0:name><ns0:color xsi:nil=\"true\"/></ns0:product>"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod xml;

// Re-export common types and functions
pub use config::SerializerConfig;
pub use error::{Result, SerdeError};
pub use xml::{
    Element, Namespaces, XmlSerializer, to_xml_string, to_xml_tree, to_xml_vec, to_xml_writer,
};
