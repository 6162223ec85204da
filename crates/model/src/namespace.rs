//! Catalog of well-known namespaces.
//!
//! These namespaces always serialize with their conventional prefix, whatever
//! prefix a record or wildcard content asks for.

use crate::qname::QName;

/// A namespace with a fixed, conventional prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// XML Schema
    Xs,
    /// The `xml:` namespace, bound implicitly by every XML document
    Xml,
    /// XML Schema instance metadata (`xsi:nil`, `xsi:type`, ...)
    Xsi,
    Xlink,
    Xhtml,
    /// SOAP 1.1 WSDL binding
    Soap11,
    /// SOAP 1.2 WSDL binding
    Soap12,
    /// SOAP envelope
    SoapEnv,
}

impl Namespace {
    pub const ALL: [Namespace; 8] = [
        Namespace::Xs,
        Namespace::Xml,
        Namespace::Xsi,
        Namespace::Xlink,
        Namespace::Xhtml,
        Namespace::Soap11,
        Namespace::Soap12,
        Namespace::SoapEnv,
    ];

    pub const fn uri(self) -> &'static str {
        match self {
            Namespace::Xs => "http://www.w3.org/2001/XMLSchema",
            Namespace::Xml => "http://www.w3.org/XML/1998/namespace",
            Namespace::Xsi => "http://www.w3.org/2001/XMLSchema-instance",
            Namespace::Xlink => "http://www.w3.org/1999/xlink",
            Namespace::Xhtml => "http://www.w3.org/1999/xhtml",
            Namespace::Soap11 => "http://schemas.xmlsoap.org/wsdl/soap/",
            Namespace::Soap12 => "http://schemas.xmlsoap.org/wsdl/soap12/",
            Namespace::SoapEnv => "http://schemas.xmlsoap.org/soap/envelope/",
        }
    }

    pub const fn prefix(self) -> &'static str {
        match self {
            Namespace::Xs => "xs",
            Namespace::Xml => "xml",
            Namespace::Xsi => "xsi",
            Namespace::Xlink => "xlink",
            Namespace::Xhtml => "xhtml",
            Namespace::Soap11 => "soap",
            Namespace::Soap12 => "soap12",
            Namespace::SoapEnv => "soapenv",
        }
    }

    /// Looks up a namespace by URI.
    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.uri() == uri)
    }

    /// Looks up a namespace by its reserved prefix.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.prefix() == prefix)
    }

    /// Builds a name in this namespace.
    pub fn qname(self, local_name: &'static str) -> QName {
        QName::with_ns(self.uri(), local_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_uri() {
        assert_eq!(
            Namespace::from_uri("http://www.w3.org/2001/XMLSchema-instance"),
            Some(Namespace::Xsi)
        );
        assert_eq!(Namespace::from_uri("urn:not-well-known"), None);
    }

    #[test]
    fn test_lookup_by_prefix() {
        assert_eq!(Namespace::from_prefix("xlink"), Some(Namespace::Xlink));
        assert_eq!(Namespace::from_prefix("ns0"), None);
    }

    #[test]
    fn test_catalog_is_bijective() {
        for ns in Namespace::ALL {
            assert_eq!(Namespace::from_uri(ns.uri()), Some(ns));
            assert_eq!(Namespace::from_prefix(ns.prefix()), Some(ns));
        }
    }
}
