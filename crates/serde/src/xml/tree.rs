//! In-memory XML element tree.
//!
//! Names are always stored as [`QName`]s; prefixes only appear in namespace
//! declarations and are resolved when the tree is written. Text that follows an
//! element's end tag is stored as that element's `tail`.

use std::collections::HashSet;

use indexmap::IndexMap;
use xmlbind_model::{AttributeMap, Namespace, QName};

use crate::xml::utils::FALLBACK_PREFIX;

/// Namespace declarations of one element: prefix (`None` for the default
/// namespace) to URI.
pub type DeclMap = IndexMap<Option<String>, String>;

/// An XML element with its attributes, text, tail and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: QName,
    attributes: AttributeMap,
    nsmap: DeclMap,
    text: Option<String>,
    tail: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: QName) -> Self {
        Self {
            tag,
            attributes: AttributeMap::new(),
            nsmap: DeclMap::new(),
            text: None,
            tail: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &QName {
        &self.tag
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    /// Appends to the element's text, creating it if needed.
    pub fn append_text(&mut self, text: &str) {
        self.text.get_or_insert_with(String::new).push_str(text);
    }

    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    pub fn set_tail(&mut self, tail: Option<String>) {
        self.tail = tail;
    }

    /// Appends to the element's tail, creating it if needed.
    pub fn append_tail(&mut self, tail: &str) {
        self.tail.get_or_insert_with(String::new).push_str(tail);
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn get(&self, name: &QName) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Sets an attribute. An existing attribute keeps its position.
    pub fn set(&mut self, name: QName, value: impl Into<String>) {
        self.attributes.insert(name, value.into());
    }

    pub fn nsmap(&self) -> &DeclMap {
        &self.nsmap
    }

    /// Declares `prefix` for `uri` on this element.
    pub fn declare(&mut self, prefix: Option<String>, uri: impl Into<String>) {
        self.nsmap.insert(prefix, uri.into());
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Appends a new child named `tag` and returns it.
    pub fn sub_element(&mut self, tag: QName) -> &mut Element {
        self.children.push(Element::new(tag));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn last_child_mut(&mut self) -> Option<&mut Element> {
        self.children.last_mut()
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when the element has neither text nor children.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }

    /// First child with the given name.
    pub fn find(&self, tag: &QName) -> Option<&Element> {
        self.children.iter().find(|child| &child.tag == tag)
    }

    /// Depth-first iterator over this element and all of its descendants.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Moves namespace declarations to this (root) element.
    ///
    /// Every entry of `top_nsmap` whose URI is used somewhere in the tree, or
    /// whose prefix is listed in `keep_prefixes`, is declared here. Descendant
    /// declarations that the root now covers are dropped, as are declarations
    /// of unused namespaces. The `xml` namespace is bound implicitly and never
    /// declared.
    ///
    /// An unqualified root cannot carry a default namespace declaration, so a
    /// default URI is given a generated prefix there instead.
    pub fn cleanup_namespaces(&mut self, top_nsmap: &DeclMap, keep_prefixes: &[&str]) {
        let used = self.used_namespaces();
        let xml = Namespace::Xml.uri();

        let mut root_decls = DeclMap::new();
        for (prefix, uri) in top_nsmap {
            let keep = prefix
                .as_deref()
                .is_some_and(|p| keep_prefixes.contains(&p));
            if uri != xml && (keep || used.contains(uri.as_str())) {
                root_decls.insert(prefix.clone(), uri.clone());
            }
        }
        for (prefix, uri) in std::mem::take(&mut self.nsmap) {
            if uri != xml && used.contains(uri.as_str()) && !root_decls.contains_key(&prefix) {
                root_decls.insert(prefix, uri);
            }
        }
        if self.tag.namespace().is_none() {
            if let Some(uri) = root_decls.shift_remove(&None::<String>) {
                let prefix = (0..)
                    .map(|n| format!("{FALLBACK_PREFIX}{n}"))
                    .find(|candidate| !root_decls.contains_key(&Some(candidate.clone())))
                    .unwrap_or_else(|| FALLBACK_PREFIX.to_string());
                root_decls.insert(Some(prefix), uri);
            }
        }
        self.nsmap = root_decls;

        let root_decls = self.nsmap.clone();
        for child in &mut self.children {
            child.prune_declarations(&root_decls, &used);
        }
    }

    fn prune_declarations(&mut self, covered: &DeclMap, used: &HashSet<String>) {
        self.nsmap.retain(|prefix, uri| {
            covered.get(prefix) != Some(&*uri)
                && uri.as_str() != Namespace::Xml.uri()
                && used.contains(uri.as_str())
        });
        for child in &mut self.children {
            child.prune_declarations(covered, used);
        }
    }

    fn used_namespaces(&self) -> HashSet<String> {
        let mut used = HashSet::new();
        for element in self.iter() {
            if let Some(ns) = element.tag.namespace() {
                used.insert(ns.to_string());
            }
            for name in element.attributes.keys() {
                if let Some(ns) = name.namespace() {
                    used.insert(ns.to_string());
                }
            }
        }
        used
    }
}

/// Depth-first, document-order iterator returned by [`Element::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decls(entries: &[(Option<&str>, &str)]) -> DeclMap {
        entries
            .iter()
            .map(|(p, u)| (p.map(str::to_string), u.to_string()))
            .collect()
    }

    #[test]
    fn test_iter_is_document_order() {
        let mut root = Element::new(QName::local("a"));
        let b = root.sub_element(QName::local("b"));
        b.sub_element(QName::local("c"));
        root.sub_element(QName::local("d"));

        let names: Vec<_> = root.iter().map(|e| e.tag().local_name().to_string()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_set_keeps_attribute_position() {
        let mut el = Element::new(QName::local("a"));
        el.set(QName::local("x"), "1");
        el.set(QName::local("y"), "2");
        el.set(QName::local("x"), "3");
        let attrs: Vec<_> = el.attributes().iter().map(|(k, v)| (k.local_name(), v.as_str())).collect();
        assert_eq!(attrs, vec![("x", "3"), ("y", "2")]);
    }

    #[test]
    fn test_append_text_and_tail() {
        let mut el = Element::new(QName::local("a"));
        el.append_text("x");
        el.append_text("y");
        el.append_tail("z");
        assert_eq!(el.text(), Some("xy"));
        assert_eq!(el.tail(), Some("z"));
        assert!(!el.is_empty());
    }

    #[test]
    fn test_cleanup_declares_used_namespaces_on_root() {
        let mut root = Element::new(QName::with_ns("urn:a", "root"));
        let child = root.sub_element(QName::with_ns("urn:b", "child"));
        child.declare(Some("b".to_string()), "urn:b");

        let top = decls(&[(Some("ns0"), "urn:a"), (Some("b"), "urn:b"), (Some("u"), "urn:unused")]);
        root.cleanup_namespaces(&top, &[]);

        assert_eq!(root.nsmap(), &decls(&[(Some("ns0"), "urn:a"), (Some("b"), "urn:b")]));
        assert!(root.children()[0].nsmap().is_empty());
    }

    #[test]
    fn test_cleanup_keeps_listed_prefixes() {
        let mut root = Element::new(QName::local("root"));
        let top = decls(&[(Some("u"), "urn:unused"), (None, "urn:default")]);
        root.cleanup_namespaces(&top, &["u"]);
        assert_eq!(root.nsmap(), &decls(&[(Some("u"), "urn:unused")]));
    }

    #[test]
    fn test_cleanup_rebinds_default_on_unqualified_root() {
        let mut root = Element::new(QName::local("p"));
        root.sub_element(QName::with_ns("urn:d", "x"));
        let top = decls(&[(Some("ns0"), "urn:unused"), (None, "urn:d")]);
        root.cleanup_namespaces(&top, &[]);
        assert_eq!(root.nsmap(), &decls(&[(Some("ns0"), "urn:d")]));
    }

    #[test]
    fn test_cleanup_keeps_default_on_qualified_root() {
        let mut root = Element::new(QName::with_ns("urn:a", "p"));
        root.sub_element(QName::with_ns("urn:d", "x"));
        let top = decls(&[(Some("ns0"), "urn:a"), (None, "urn:d")]);
        root.cleanup_namespaces(&top, &[]);
        assert_eq!(root.nsmap(), &decls(&[(Some("ns0"), "urn:a"), (None, "urn:d")]));
    }

    #[test]
    fn test_cleanup_never_declares_xml_namespace() {
        let mut root = Element::new(QName::local("root"));
        root.set(Namespace::Xml.qname("lang"), "en");
        let top = decls(&[(Some("xml"), Namespace::Xml.uri())]);
        root.cleanup_namespaces(&top, &["xml"]);
        assert!(root.nsmap().is_empty());
    }
}
