//! Per-render namespace registry.
//!
//! Every namespace used while building a tree is recorded here, in first-use
//! order, together with the prefix it will be declared with on the root
//! element. A URI keeps the prefix it was first registered with, and a
//! non-default prefix never names two URIs.

use indexmap::IndexMap;
use tracing::trace;
use xmlbind_model::{Namespace, NsMap};

use crate::xml::tree::DeclMap;

/// URI to prefix table. `None` is the default (unprefixed) namespace.
#[derive(Debug, Clone, Default)]
pub struct Namespaces {
    items: IndexMap<String, Option<String>>,
    auto_ns: usize,
}

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `uri`.
    ///
    /// Empty URIs and URIs already present are ignored. Well-known namespaces
    /// always get their catalog prefix. Otherwise the requested prefix is used
    /// when it is free; an empty prefix asks for the default namespace slot.
    /// Everything else gets the next free `ns{n}` name.
    pub fn add(&mut self, uri: Option<&str>, prefix: Option<&str>) {
        let Some(uri) = uri.filter(|uri| !uri.is_empty()) else {
            return;
        };
        if self.items.contains_key(uri) {
            return;
        }

        let prefix = match (Namespace::from_uri(uri), prefix) {
            (Some(well_known), _) => Some(well_known.prefix().to_string()),
            (None, Some("")) if !self.has_default() => None,
            (None, Some(p)) if !p.is_empty() && self.is_free(p) => Some(p.to_string()),
            _ => Some(self.next_auto_prefix()),
        };

        trace!(uri, prefix = ?prefix, "registered namespace");
        self.items.insert(uri.to_string(), prefix);
    }

    /// Registers every `prefix -> uri` entry of a namespace map.
    pub fn add_all(&mut self, ns_map: &NsMap) {
        for (prefix, uri) in ns_map {
            self.add(Some(uri), Some(prefix));
        }
    }

    /// Registered prefixes, excluding the default namespace.
    pub fn prefixes(&self) -> Vec<&str> {
        self.items.values().filter_map(|p| p.as_deref()).collect()
    }

    /// Inverse view used for namespace declarations: prefix to URI.
    pub fn ns_map(&self) -> DeclMap {
        self.items
            .iter()
            .map(|(uri, prefix)| (prefix.clone(), uri.clone()))
            .collect()
    }

    /// Prefix assigned to `uri`; `Some(None)` for the default namespace.
    pub fn prefix_of(&self, uri: &str) -> Option<Option<&str>> {
        self.items.get(uri).map(|p| p.as_deref())
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.items.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn has_default(&self) -> bool {
        self.items.values().any(Option::is_none)
    }

    // Catalog prefixes stay reserved for their own namespaces.
    fn is_free(&self, prefix: &str) -> bool {
        Namespace::from_prefix(prefix).is_none()
            && !self.items.values().any(|p| p.as_deref() == Some(prefix))
    }

    fn next_auto_prefix(&mut self) -> String {
        loop {
            let candidate = format!("ns{}", self.auto_ns);
            self.auto_ns += 1;
            if self.is_free(&candidate) {
                return candidate;
            }
        }
    }
}
