//! Parser SOAP et parcours de l'arbre XML

use xmltree::{Element, XMLNode};

use crate::ResponseDocument;

/// Erreur de parsing SOAP
#[derive(Debug, thiserror::Error)]
pub enum SoapParseError {
    #[error("XML parse error: {0}")]
    XmlError(#[from] xmltree::ParseError),
}

/// Parse une réponse SOAP brute
///
/// Only well-formedness is checked here: a document without an `Envelope`
/// root is still accepted, since the decoder has fallbacks for that shape.
pub fn parse_response(raw: impl Into<String>) -> Result<ResponseDocument, SoapParseError> {
    let raw = raw.into();
    let root = Element::parse(raw.as_bytes())?;
    Ok(ResponseDocument { raw, root })
}

/// Direct element children, skipping text and comments.
pub(crate) fn child_elements(elem: &Element) -> impl Iterator<Item = &Element> {
    elem.children.iter().filter_map(|n| n.as_element())
}

pub(crate) fn has_child_elements(elem: &Element) -> bool {
    child_elements(elem).next().is_some()
}

/// Concatenated text of the element and all of its descendants.
pub(crate) fn text_content(elem: &Element) -> String {
    let mut out = String::new();
    push_text(elem, &mut out);
    out
}

fn push_text(elem: &Element, out: &mut String) {
    for node in &elem.children {
        match node {
            XMLNode::Text(t) | XMLNode::CData(t) => out.push_str(t),
            XMLNode::Element(e) => push_text(e, out),
            _ => {}
        }
    }
}

/// Descendants in document order, not including `elem` itself.
pub(crate) fn descendants(elem: &Element) -> Vec<&Element> {
    let mut out = Vec::new();
    collect_descendants(elem, &mut out);
    out
}

fn collect_descendants<'a>(elem: &'a Element, out: &mut Vec<&'a Element>) {
    for child in child_elements(elem) {
        out.push(child);
        collect_descendants(child, out);
    }
}

/// First element of the tree rooted at `root` (root included) matching `pred`.
pub(crate) fn find_in_tree<'a>(
    root: &'a Element,
    pred: &dyn Fn(&Element) -> bool,
) -> Option<&'a Element> {
    if pred(root) {
        return Some(root);
    }
    find_descendant(root, pred)
}

/// First strict descendant of `elem` matching `pred`, depth-first.
pub(crate) fn find_descendant<'a>(
    elem: &'a Element,
    pred: &dyn Fn(&Element) -> bool,
) -> Option<&'a Element> {
    for child in child_elements(elem) {
        if pred(child) {
            return Some(child);
        }
        if let Some(found) = find_descendant(child, pred) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_raw_text() {
        let raw = r#"<?xml version="1.0"?>
<S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/">
  <S:Body/>
</S:Envelope>"#;
        let doc = parse_response(raw).unwrap();
        assert_eq!(doc.raw(), raw);
        assert_eq!(doc.root().name, "Envelope");
        assert_eq!(doc.root().prefix.as_deref(), Some("S"));
    }

    #[test]
    fn test_parse_rejects_non_xml() {
        let err = parse_response("Service Unavailable").unwrap_err();
        assert!(matches!(err, SoapParseError::XmlError(_)));
    }

    #[test]
    fn test_text_content_is_recursive() {
        let root = Element::parse(
            "<a>x<b>y<c>z</c></b><![CDATA[<w>]]></a>".as_bytes(),
        )
        .unwrap();
        assert_eq!(text_content(&root), "xyz<w>");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let root = Element::parse("<a><b><c/></b><d/></a>".as_bytes()).unwrap();
        let names: Vec<_> = descendants(&root).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "d"]);
        assert!(find_descendant(&root, &|e| e.name == "a").is_none());
        assert_eq!(find_in_tree(&root, &|e| e.name == "a").unwrap().name, "a");
        assert_eq!(find_in_tree(&root, &|e| e.name == "d").unwrap().name, "d");
    }
}
