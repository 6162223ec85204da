//! Qualified names.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A `(namespace URI, local name)` pair identifying an element or attribute.
///
/// An empty namespace is the same as no namespace. The string form is Clark
/// notation: `{http://example.com/ns}local`, or just `local` when unqualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    namespace: Option<Cow<'static, str>>,
    local_name: Cow<'static, str>,
}

impl QName {
    /// Creates an unqualified name.
    pub fn local(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Creates a name in the given namespace.
    pub fn with_ns(
        namespace: impl Into<Cow<'static, str>>,
        local_name: impl Into<Cow<'static, str>>,
    ) -> Self {
        let namespace = namespace.into();
        Self {
            namespace: (!namespace.is_empty()).then_some(namespace),
            local_name: local_name.into(),
        }
    }

    /// Creates a name from an optional namespace.
    pub fn new(namespace: Option<&str>, local_name: impl Into<Cow<'static, str>>) -> Self {
        match namespace {
            Some(ns) => Self::with_ns(ns.to_string(), local_name),
            None => Self::local(local_name),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Returns a copy of this name moved into `namespace` (or out of any
    /// namespace when `None`).
    pub fn in_namespace(&self, namespace: Option<&str>) -> Self {
        Self::new(namespace, self.local_name.clone())
    }

    pub fn set_local_name(&mut self, local_name: impl Into<Cow<'static, str>>) {
        self.local_name = local_name.into();
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

impl FromStr for QName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidQName(s.to_string());

        let (namespace, local_name) = match s.strip_prefix('{') {
            Some(rest) => {
                let (ns, local) = rest.split_once('}').ok_or_else(invalid)?;
                (Some(ns), local)
            }
            None => (None, s),
        };

        if local_name.is_empty() || local_name.contains(['{', '}']) {
            return Err(invalid());
        }

        Ok(Self::new(namespace, local_name.to_string()))
    }
}

impl From<&'static str> for QName {
    fn from(local_name: &'static str) -> Self {
        Self::local(local_name)
    }
}

impl serde::Serialize for QName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for QName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
