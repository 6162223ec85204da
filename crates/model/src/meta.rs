//! Record type descriptors.
//!
//! A [`RecordMeta`] is the complete, ordered description of how a record type
//! maps onto XML. It is built once per type (typically in a `LazyLock`) and
//! consulted by the renderer for every instance of that type.

use std::borrow::Cow;
use std::fmt;

use crate::error::{ModelError, Result};
use crate::qname::QName;
use crate::value::Value;

/// How a field is represented in XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// One child element per value.
    Element,
    /// A single attribute on the owning element.
    Attribute,
    /// The owning element's text content.
    Text,
    /// Open element content (`xs:any`), possibly mixed with text.
    #[serde(alias = "wildcard")]
    WildcardElement,
    /// Open attribute content (`xs:anyAttribute`).
    #[serde(alias = "attributes")]
    WildcardAttribute,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldKind::Element => "element",
            FieldKind::Attribute => "attribute",
            FieldKind::Text => "text",
            FieldKind::WildcardElement => "wildcard-element",
            FieldKind::WildcardAttribute => "wildcard-attribute",
        })
    }
}

/// Descriptor of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Field name on the Rust side, used in diagnostics.
    pub name: Cow<'static, str>,
    /// Name of the element or attribute the field renders as.
    pub qname: QName,
    pub kind: FieldKind,
    /// Whether an empty element for this field carries `xsi:nil="true"`.
    pub nillable: bool,
}

impl FieldMeta {
    /// Creates a field whose XML local name equals its field name.
    pub fn new(name: impl Into<Cow<'static, str>>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            qname: QName::local(name.clone()),
            name,
            kind,
            nillable: false,
        }
    }

    pub fn element(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::Element)
    }

    pub fn attribute(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::Attribute)
    }

    pub fn text(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn wildcard(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::WildcardElement)
    }

    pub fn wildcard_attributes(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::WildcardAttribute)
    }

    pub fn with_namespace(mut self, namespace: impl Into<Cow<'static, str>>) -> Self {
        self.qname = QName::with_ns(namespace, self.qname.local_name().to_string());
        self
    }

    pub fn with_local_name(mut self, local_name: impl Into<Cow<'static, str>>) -> Self {
        self.qname.set_local_name(local_name);
        self
    }

    pub fn nillable(mut self) -> Self {
        self.nillable = true;
        self
    }

    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace()
    }
}

/// Descriptor of a record type: its element name and its fields in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMeta {
    qname: QName,
    fields: Vec<FieldMeta>,
}

impl RecordMeta {
    pub fn new(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            qname: QName::local(local_name),
            fields: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<Cow<'static, str>>) -> Self {
        self.qname = QName::with_ns(namespace, self.qname.local_name().to_string());
        self
    }

    /// Appends a field descriptor.
    pub fn field(mut self, field: FieldMeta) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push_field(&mut self, field: FieldMeta) {
        self.fields.push(field);
    }

    pub fn qname(&self) -> &QName {
        &self.qname
    }

    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    /// Position of the field called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn text_field(&self) -> Option<&FieldMeta> {
        self.fields.iter().find(|field| field.kind == FieldKind::Text)
    }

    /// The element name of an instance rendered as a document root.
    ///
    /// An explicit namespace takes precedence over the type's own.
    pub fn resolve_qname(&self, namespace: Option<&str>) -> QName {
        match namespace {
            Some(ns) => self.qname.in_namespace(Some(ns)),
            None => self.qname.clone(),
        }
    }

    /// Checks that at most one field is text-classified.
    pub fn validate(&self) -> Result<()> {
        let mut text_fields = self.fields.iter().filter(|f| f.kind == FieldKind::Text);
        if let (Some(first), Some(second)) = (text_fields.next(), text_fields.next()) {
            return Err(ModelError::DuplicateTextField {
                record: self.qname.to_string(),
                first: first.name.to_string(),
                second: second.name.to_string(),
            });
        }
        Ok(())
    }
}

/// A value that can be rendered as an XML element.
///
/// `value` is called once per field, with the field's position in
/// [`RecordMeta::fields`]. `None` means the field is absent.
pub trait Record {
    fn meta(&self) -> &RecordMeta;

    fn value(&self, index: usize) -> Option<Value<'_>>;
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn meta(&self) -> &RecordMeta {
        (**self).meta()
    }

    fn value(&self, index: usize) -> Option<Value<'_>> {
        (**self).value(index)
    }
}

impl fmt::Debug for dyn Record + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("qname", &self.meta().qname().to_string())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_builders() {
        let field = FieldMeta::element("color")
            .with_namespace("urn:shop")
            .with_local_name("colour")
            .nillable();
        assert_eq!(field.name, "color");
        assert_eq!(field.qname, QName::with_ns("urn:shop", "colour"));
        assert_eq!(field.kind, FieldKind::Element);
        assert!(field.nillable);
    }

    #[test]
    fn test_resolve_qname_override() {
        let meta = RecordMeta::new("product").with_namespace("urn:shop");
        assert_eq!(meta.resolve_qname(None), QName::with_ns("urn:shop", "product"));
        assert_eq!(
            meta.resolve_qname(Some("urn:other")),
            QName::with_ns("urn:other", "product")
        );
        assert_eq!(meta.resolve_qname(Some("")), QName::local("product"));
    }

    #[test]
    fn test_validate_rejects_second_text_field() {
        let meta = RecordMeta::new("span")
            .field(FieldMeta::text("content"))
            .field(FieldMeta::text("more"));
        let err = meta.validate().unwrap_err();
        assert!(matches!(err, ModelError::DuplicateTextField { .. }));

        let meta = RecordMeta::new("span").field(FieldMeta::text("content"));
        assert!(meta.validate().is_ok());
        assert_eq!(meta.text_field().map(|f| f.name.as_ref()), Some("content"));
    }

    #[test]
    fn test_field_kind_names() {
        let kind: FieldKind = serde_json::from_str("\"wildcard-attribute\"").unwrap();
        assert_eq!(kind, FieldKind::WildcardAttribute);
        let kind: FieldKind = serde_json::from_str("\"wildcard\"").unwrap();
        assert_eq!(kind, FieldKind::WildcardElement);
        assert_eq!(FieldKind::WildcardElement.to_string(), "wildcard-element");
    }
}
