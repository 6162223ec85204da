//! Rendering records to XML text.
//!
//! Rendering happens in two passes. [`XmlSerializer::render_tree`] builds the
//! complete element tree, and only once that succeeded is the tree written
//! out through quick-xml. A failing render therefore never produces partial
//! output.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;
use xmlbind_model::{Namespace, QName, Record};

use crate::config::SerializerConfig;
use crate::error::{Result, SerdeError};
use crate::xml::builder::TreeBuilder;
use crate::xml::namespaces::Namespaces;
use crate::xml::tree::Element;
use crate::xml::utils;

/// Render a record to an XML string with the default configuration.
///
/// # Examples
///
/// ```
/// use xmlbind_model::{DynamicRecord, FieldMeta, Primitive, RecordMeta};
/// use xmlbind_serde::to_xml_string;
///
/// let meta = RecordMeta::new("product").field(FieldMeta::element("number"));
/// let product = DynamicRecord::new(meta).with("number", Primitive::Int(1))?;
///
/// let xml = to_xml_string(&product)?;
/// assert_eq!(
///     xml,
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<product><number>1</number></product>"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn to_xml_string(record: &dyn Record) -> Result<String> {
    XmlSerializer::default().render(record)
}

/// Render a record to an XML byte vector with the default configuration.
pub fn to_xml_vec(record: &dyn Record) -> Result<Vec<u8>> {
    XmlSerializer::default().render_bytes(record)
}

/// Render a record to an XML writer with the default configuration.
pub fn to_xml_writer<W: Write>(record: &dyn Record, writer: W) -> Result<()> {
    XmlSerializer::default().render_to_writer(record, writer)
}

/// Build the element tree of a record without writing it.
pub fn to_xml_tree(record: &dyn Record) -> Result<Element> {
    XmlSerializer::default().render_tree(record, None)
}

/// Renders records to element trees and XML text.
#[derive(Debug, Clone, Default)]
pub struct XmlSerializer {
    config: SerializerConfig,
}

impl XmlSerializer {
    pub fn new(config: SerializerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Renders `record` to a string.
    pub fn render(&self, record: &dyn Record) -> Result<String> {
        let bytes = self.render_bytes(record)?;
        String::from_utf8(bytes).map_err(|e| SerdeError::Custom(e.to_string()))
    }

    pub fn render_bytes(&self, record: &dyn Record) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.render_to_writer(record, &mut buffer)?;
        Ok(buffer)
    }

    /// Renders `record` into `writer`. Nothing is written if building the
    /// tree fails.
    pub fn render_to_writer<W: Write>(&self, record: &dyn Record, writer: W) -> Result<()> {
        let tree = self.render_tree(record, None)?;
        self.write_tree(&tree, writer)
    }

    /// Builds the element tree for `record`.
    ///
    /// `namespace`, when given, replaces the namespace of the record type's
    /// own element name. Every namespace used in the tree is declared once, on
    /// the root element.
    pub fn render_tree(&self, record: &dyn Record, namespace: Option<&str>) -> Result<Element> {
        let qname = record.meta().resolve_qname(namespace);

        let mut namespaces = Namespaces::new();
        namespaces.add(qname.namespace(), None);

        let mut root = Element::new(qname);
        TreeBuilder::new(&mut namespaces, self.config.max_depth).build(record, &mut root)?;

        let prefixes = namespaces.prefixes();
        root.cleanup_namespaces(&namespaces.ns_map(), &prefixes);

        debug!(
            root = %root.tag(),
            namespaces = namespaces.len(),
            "rendered element tree"
        );
        Ok(root)
    }

    /// Writes an element tree as XML text.
    pub fn write_tree<W: Write>(&self, tree: &Element, writer: W) -> Result<()> {
        if !self.config.is_utf8() {
            return Err(SerdeError::UnsupportedEncoding(self.config.encoding.clone()));
        }

        let mut writer = if self.config.pretty_print {
            Writer::new_with_indent(writer, b' ', 2)
        } else {
            Writer::new(writer)
        };

        if self.config.xml_declaration {
            writer.write_event(Event::Decl(BytesDecl::new(
                "1.0",
                Some(self.config.encoding.as_str()),
                None,
            )))?;
            // The indenting writer breaks the line itself.
            if !self.config.pretty_print {
                writer.get_mut().write_all(b"\n")?;
            }
        }

        let mut scope = NamespaceScope::default();
        write_element(&mut writer, tree, &mut scope)
    }

    /// Writes an element tree to a string.
    pub fn tree_to_string(&self, tree: &Element) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_tree(tree, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| SerdeError::Custom(e.to_string()))
    }
}

type Declaration = (Option<String>, String);

/// Namespace declarations in scope while writing, innermost last.
#[derive(Debug, Default)]
struct NamespaceScope {
    frames: Vec<Vec<Declaration>>,
}

impl NamespaceScope {
    fn push(&mut self, declarations: Vec<Declaration>) {
        self.frames.push(declarations);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    /// Adds a declaration to the innermost frame, replacing any entry there for
    /// the same prefix.
    fn declare(&mut self, declaration: Declaration) {
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        match frame.iter_mut().find(|(prefix, _)| *prefix == declaration.0) {
            Some(existing) => existing.1 = declaration.1,
            None => frame.push(declaration),
        }
    }

    /// URI bound to `prefix`; an empty default namespace counts as unbound.
    fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, uri)| uri.as_str())
            .filter(|uri| !uri.is_empty())
    }

    /// A prefix currently bound to `uri`.
    fn prefix_for(&self, uri: &str, allow_default: bool) -> Option<Option<&str>> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .filter(|(prefix, bound)| bound == uri && (allow_default || prefix.is_some()))
            .map(|(prefix, _)| prefix.as_deref())
            .find(|prefix| self.resolve(*prefix) == Some(uri))
    }

    fn fresh_prefix(&self) -> String {
        (0..)
            .map(|n| format!("{}{}", utils::FALLBACK_PREFIX, n))
            .find(|candidate| self.resolve(Some(candidate.as_str())).is_none())
            .unwrap_or_else(|| utils::FALLBACK_PREFIX.to_string())
    }

    /// Lexical name of `qname`, declaring its namespace in the current frame
    /// when nothing in scope binds it.
    fn lexical_name(&mut self, qname: &QName, is_attribute: bool) -> String {
        let local = qname.local_name();
        let Some(uri) = qname.namespace() else {
            if !is_attribute && self.resolve(None).is_some() {
                self.declare((None, String::new()));
            }
            return local.to_string();
        };

        if uri == Namespace::Xml.uri() {
            return format!("{}:{}", Namespace::Xml.prefix(), local);
        }

        let bound = self
            .prefix_for(uri, !is_attribute)
            .map(|prefix| prefix.map(str::to_string));
        match bound {
            Some(Some(prefix)) => format!("{prefix}:{local}"),
            Some(None) => local.to_string(),
            None => {
                let prefix = self.fresh_prefix();
                self.declare((Some(prefix.clone()), uri.to_string()));
                format!("{prefix}:{local}")
            }
        }
    }
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &Element,
    scope: &mut NamespaceScope,
) -> Result<()> {
    scope.push(
        element
            .nsmap()
            .iter()
            .map(|(prefix, uri)| (prefix.clone(), uri.clone()))
            .collect(),
    );

    let name = scope.lexical_name(element.tag(), false);
    let attributes: Vec<(String, &str)> = element
        .attributes()
        .iter()
        .map(|(qname, value)| (scope.lexical_name(qname, true), value.as_str()))
        .collect();

    let mut start = BytesStart::new(name.as_str());
    if let Some(frame) = scope.frames.last() {
        for (prefix, uri) in frame {
            let key = match prefix {
                Some(prefix) => format!("xmlns:{prefix}"),
                None => "xmlns".to_string(),
            };
            start.push_attribute((key.as_str(), uri.as_str()));
        }
    }
    for (key, value) in &attributes {
        start.push_attribute((key.as_str(), *value));
    }

    if element.is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        if let Some(text) = element.text() {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in element.children() {
            write_element(writer, child, scope)?;
        }
        writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    }
    scope.pop();

    if let Some(tail) = element.tail() {
        writer.write_event(Event::Text(BytesText::new(tail)))?;
    }
    Ok(())
}
