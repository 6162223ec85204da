//! Wildcard (`xs:any`) content.
//!
//! Content that the descriptor table does not describe travels as a closed set
//! of variants. Elements and text in this form are already in their lexical
//! representation; the renderer copies them verbatim.

use indexmap::IndexMap;

use crate::qname::QName;
use crate::value::AttributeMap;

/// Prefix to namespace URI mapping. The empty prefix is the default namespace.
pub type NsMap = IndexMap<String, String>;

/// One item of wildcard element content.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum AnyContent {
    /// Character data. Between elements it becomes the preceding element's tail.
    Text(String),
    /// A pre-rendered child element.
    Element(AnyElement),
    /// Text content of the owning element together with its attributes and
    /// namespace declarations.
    AnnotatedText(AnyText),
}

impl AnyContent {
    pub fn text(text: impl Into<String>) -> Self {
        AnyContent::Text(text.into())
    }
}

impl From<AnyElement> for AnyContent {
    fn from(element: AnyElement) -> Self {
        AnyContent::Element(element)
    }
}

impl From<AnyText> for AnyContent {
    fn from(text: AnyText) -> Self {
        AnyContent::AnnotatedText(text)
    }
}

impl From<&str> for AnyContent {
    fn from(text: &str) -> Self {
        AnyContent::Text(text.to_string())
    }
}

/// Text with attributes and namespace declarations for the owning element.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnyText {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: AttributeMap,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub nsmap: NsMap,
}

impl AnyText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value.into());
        self
    }

    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.nsmap.insert(prefix.into(), uri.into());
        self
    }
}

/// A generic element with pre-rendered text, tail and nested wildcard content.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnyElement {
    pub qname: QName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: AttributeMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AnyContent>,
}

impl AnyElement {
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            text: None,
            tail: None,
            attributes: AttributeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    pub fn with_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<AnyContent>) -> Self {
        self.children.push(child.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::single_or_vec::SingleOrVec;

    #[test]
    fn test_deserialize_mixed_content() {
        let json = r#"[
            "lead ",
            {"qname": "b", "text": "bold"},
            " trail"
        ]"#;
        let content: SingleOrVec<AnyContent> = serde_json::from_str(json).unwrap();
        assert_eq!(
            content.into_vec(),
            vec![
                AnyContent::text("lead "),
                AnyElement::new(QName::local("b")).with_text("bold").into(),
                AnyContent::text(" trail"),
            ]
        );
    }

    #[test]
    fn test_deserialize_annotated_text() {
        let json = r#"{
            "text": "hello",
            "attributes": {"{urn:a}lang": "en"},
            "nsmap": {"a": "urn:a"}
        }"#;
        let content: AnyContent = serde_json::from_str(json).unwrap();
        let expected = AnyText::new("hello")
            .with_attribute(QName::with_ns("urn:a", "lang"), "en")
            .with_namespace("a", "urn:a");
        assert_eq!(content, AnyContent::AnnotatedText(expected));
    }

    #[test]
    fn test_deserialize_nested_element() {
        let json = r#"{
            "qname": "{http://www.w3.org/1999/xhtml}p",
            "children": ["a ", {"qname": "{http://www.w3.org/1999/xhtml}em", "text": "b", "tail": " c"}]
        }"#;
        let content: AnyContent = serde_json::from_str(json).unwrap();
        let AnyContent::Element(element) = content else {
            panic!("expected an element");
        };
        assert_eq!(element.qname.local_name(), "p");
        assert_eq!(element.children.len(), 2);
    }
}
