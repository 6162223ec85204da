//! Small helpers shared by the builder and the writer.

use crate::xml::tree::Element;

/// Local name of the instance-metadata nil marker (`xsi:nil`).
pub const NIL: &str = "nil";

/// Prefix given to namespaces the writer has to declare on the fly.
pub const FALLBACK_PREFIX: &str = "ns";

/// Adds mixed-content text to `parent`.
///
/// Once the parent has text of its own, later text goes to the tail of its most
/// recent child. Until then text is appended to the parent, even when children
/// were already added.
pub fn append_mixed_text(parent: &mut Element, text: &str) {
    let has_text = parent.text().is_some();
    match parent.last_child_mut() {
        Some(child) if has_text => child.append_tail(text),
        _ => parent.append_text(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlbind_model::QName;

    #[test]
    fn test_append_mixed_text_before_children() {
        let mut parent = Element::new(QName::local("p"));
        append_mixed_text(&mut parent, "a");
        append_mixed_text(&mut parent, "b");
        assert_eq!(parent.text(), Some("ab"));
    }

    #[test]
    fn test_append_mixed_text_after_child() {
        let mut parent = Element::new(QName::local("p"));
        parent.set_text(Some("lead".to_string()));
        parent.sub_element(QName::local("b"));
        append_mixed_text(&mut parent, " trail");
        assert_eq!(parent.text(), Some("lead"));
        assert_eq!(parent.children()[0].tail(), Some(" trail"));
    }

    #[test]
    fn test_append_mixed_text_child_first() {
        let mut parent = Element::new(QName::local("p"));
        parent.sub_element(QName::local("b"));
        append_mixed_text(&mut parent, "after");
        assert_eq!(parent.text(), Some("after"));
        assert_eq!(parent.children()[0].tail(), None);
    }
}
