//! Record to element tree conversion.
//!
//! [`TreeBuilder`] walks a record's descriptor table in declaration order and
//! dispatches every present field on its [`FieldKind`]. Namespaces are
//! recorded in the render's [`Namespaces`] registry as they are met, so that
//! the renderer can declare all of them once on the root element.

use tracing::trace;
use xmlbind_model::{
    AnyContent, AnyElement, AttributeMap, FieldKind, FieldMeta, Namespace, Primitive, Record,
    Value,
};

use crate::error::{Result, SerdeError};
use crate::xml::namespaces::Namespaces;
use crate::xml::tree::Element;
use crate::xml::utils;

/// Builds element trees for one render.
pub(crate) struct TreeBuilder<'n> {
    namespaces: &'n mut Namespaces,
    max_depth: usize,
}

impl<'n> TreeBuilder<'n> {
    pub(crate) fn new(namespaces: &'n mut Namespaces, max_depth: usize) -> Self {
        Self {
            namespaces,
            max_depth,
        }
    }

    /// Renders the fields of `record` into `parent`, which is the element the
    /// record itself is rendered as.
    pub(crate) fn build(&mut self, record: &dyn Record, parent: &mut Element) -> Result<()> {
        self.render_record(record, parent, 0)
    }

    fn render_record(
        &mut self,
        record: &dyn Record,
        parent: &mut Element,
        depth: usize,
    ) -> Result<()> {
        self.enter(depth)?;
        let meta = record.meta();
        meta.validate()?;

        for (index, field) in meta.fields().iter().enumerate() {
            match record.value(index) {
                Some(value) => self.render_field(field, value, parent, depth)?,
                None => self.render_absent(field, parent),
            }
        }
        Ok(())
    }

    fn render_field(
        &mut self,
        field: &FieldMeta,
        value: Value<'_>,
        parent: &mut Element,
        depth: usize,
    ) -> Result<()> {
        // Wildcard content declares its own namespaces.
        if field.kind != FieldKind::WildcardElement {
            self.namespaces.add(field.namespace(), None);
        }

        match field.kind {
            FieldKind::Attribute => set_attribute(field, value, parent),
            FieldKind::WildcardAttribute => match value {
                Value::Attributes(attrs) => {
                    self.set_attributes(attrs, parent);
                    Ok(())
                }
                other => Err(SerdeError::unexpected(
                    &field.name,
                    "an attribute map",
                    other.kind_name(),
                )),
            },
            FieldKind::WildcardElement => self.set_any_children(field, value, parent, depth),
            FieldKind::Text => set_text(field, value, parent),
            FieldKind::Element => self.set_children(field, value, parent, depth),
        }
    }

    fn render_absent(&mut self, field: &FieldMeta, parent: &mut Element) {
        match field.kind {
            FieldKind::Text => self.set_nil_attribute(field, parent),
            FieldKind::Element if field.nillable => {
                self.namespaces.add(field.namespace(), None);
                let child = parent.sub_element(field.qname.clone());
                self.set_nil_attribute(field, child);
            }
            _ => {}
        }
    }

    /// One child per item, each named after the field.
    fn set_children(
        &mut self,
        field: &FieldMeta,
        value: Value<'_>,
        parent: &mut Element,
        depth: usize,
    ) -> Result<()> {
        for item in value.into_items() {
            let child = parent.sub_element(field.qname.clone());
            match item {
                Value::Leaf(primitive) => child.set_text(Some(primitive.to_xml_text())),
                Value::Composite(record) => self.render_record(record, child, depth + 1)?,
                other => {
                    return Err(SerdeError::unexpected(
                        &field.name,
                        "a primitive or a record",
                        other.kind_name(),
                    ));
                }
            }
            self.set_nil_attribute(field, child);
        }
        Ok(())
    }

    fn set_any_children(
        &mut self,
        field: &FieldMeta,
        value: Value<'_>,
        parent: &mut Element,
        depth: usize,
    ) -> Result<()> {
        for item in value.into_items() {
            match item {
                Value::Any(content) => self.render_any(content, parent, depth)?,
                Value::Leaf(Primitive::Str(text)) => utils::append_mixed_text(parent, &text),
                Value::Composite(record) => {
                    let qname = record.meta().qname().clone();
                    self.namespaces.add(qname.namespace(), None);
                    let child = parent.sub_element(qname);
                    self.render_record(record, child, depth + 1)?;
                }
                other => {
                    return Err(SerdeError::unexpected(
                        &field.name,
                        "wildcard content",
                        other.kind_name(),
                    ));
                }
            }
        }
        Ok(())
    }

    fn render_any(&mut self, content: &AnyContent, parent: &mut Element, depth: usize) -> Result<()> {
        match content {
            AnyContent::Text(text) => utils::append_mixed_text(parent, text),
            AnyContent::AnnotatedText(annotated) => {
                parent.set_text(annotated.text.clone());
                self.namespaces.add_all(&annotated.nsmap);
                self.set_attributes(&annotated.attributes, parent);
            }
            AnyContent::Element(element) => self.render_any_element(element, parent, depth + 1)?,
        }
        Ok(())
    }

    fn render_any_element(
        &mut self,
        element: &AnyElement,
        parent: &mut Element,
        depth: usize,
    ) -> Result<()> {
        self.enter(depth)?;
        self.namespaces.add(element.qname.namespace(), None);

        let child = parent.sub_element(element.qname.clone());
        child.set_text(element.text.clone());
        child.set_tail(element.tail.clone());
        self.set_attributes(&element.attributes, child);

        for nested in &element.children {
            self.render_any(nested, child, depth)?;
        }
        Ok(())
    }

    /// Copies attributes verbatim, registering qualified keys.
    fn set_attributes(&mut self, attrs: &AttributeMap, parent: &mut Element) {
        for (name, value) in attrs {
            self.namespaces.add(name.namespace(), None);
            parent.set(name.clone(), value.as_str());
        }
    }

    /// Marks a nillable element that ended up with no text and no children.
    fn set_nil_attribute(&mut self, field: &FieldMeta, element: &mut Element) {
        if field.nillable && element.text().is_none() && element.len() == 0 {
            let xsi = Namespace::Xsi;
            self.namespaces.add(Some(xsi.uri()), Some(xsi.prefix()));
            trace!(element = %element.tag(), "marked nil");
            element.set(xsi.qname(utils::NIL), "true");
        }
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(SerdeError::DepthLimitExceeded(self.max_depth));
        }
        Ok(())
    }
}

fn set_attribute(field: &FieldMeta, value: Value<'_>, parent: &mut Element) -> Result<()> {
    match value {
        Value::Leaf(primitive) => {
            parent.set(field.qname.clone(), primitive.to_xml_text());
            Ok(())
        }
        other => Err(SerdeError::unexpected(
            &field.name,
            "a primitive",
            other.kind_name(),
        )),
    }
}

fn set_text(field: &FieldMeta, value: Value<'_>, parent: &mut Element) -> Result<()> {
    match value {
        Value::Leaf(primitive) => {
            parent.set_text(Some(primitive.to_xml_text()));
            Ok(())
        }
        Value::Composite(record) => Err(SerdeError::Structural(format!(
            "text field `{}` of `{}` holds a `{}` record; text content must be a primitive",
            field.name,
            parent.tag(),
            record.meta().qname(),
        ))),
        other => Err(SerdeError::unexpected(
            &field.name,
            "a primitive",
            other.kind_name(),
        )),
    }
}
