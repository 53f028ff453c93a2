//! Construction des requêtes SOAP

use std::string::FromUtf8Error;

use xmltree::{Element, XMLNode};

use crate::{METHOD_PREFIX, SOAP_ENVELOPE_NS};

/// Erreur de construction d'une enveloppe
#[derive(Debug, thiserror::Error)]
pub enum SoapBuildError {
    #[error("XML write error: {0}")]
    XmlError(#[from] xmltree::Error),

    #[error("Envelope is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// A named remote method and its parameters, in insertion order.
///
/// Parameters whose value is absent or empty are kept here but never
/// serialized: the service must read a missing element as "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteCall {
    pub method: String,
    pub parameters: Vec<(String, Option<String>)>,
}

impl RemoteCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            parameters: Vec::new(),
        }
    }

    /// Ajoute un paramètre présent
    pub fn arg<T: ToString>(mut self, name: &str, value: T) -> Self {
        self.parameters
            .push((name.to_string(), Some(value.to_string())));
        self
    }

    /// Ajoute un paramètre optionnel
    pub fn opt_arg<T: ToString>(mut self, name: &str, value: Option<T>) -> Self {
        self.parameters
            .push((name.to_string(), value.map(|v| v.to_string())));
        self
    }

    /// Parameters that will actually appear in the envelope.
    pub fn serialized_parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parameters
            .iter()
            .filter_map(|(name, value)| match value.as_deref() {
                Some(v) if !v.is_empty() => Some((name.as_str(), v)),
                _ => None,
            })
    }
}

/// Construit l'enveloppe SOAP d'une requête
///
/// The body holds a single `cour:<method>` element (the `cour` prefix is bound
/// to `namespace`) with one child per serialized parameter.
///
/// Parameter text goes through the XML emitter and is therefore escaped
/// (`&` becomes `&amp;`, `<` becomes `&lt;`).
pub fn build_soap_request(namespace: &str, call: &RemoteCall) -> Result<String, SoapBuildError> {
    let mut request_elem = Element::new(&format!("{}:{}", METHOD_PREFIX, call.method));
    for (name, value) in call.serialized_parameters() {
        let mut child = Element::new(name);
        child.children.push(XMLNode::Text(value.to_string()));
        request_elem.children.push(XMLNode::Element(child));
    }

    let header = Element::new("soapenv:Header");

    let mut body = Element::new("soapenv:Body");
    body.children.push(XMLNode::Element(request_elem));

    let mut envelope = Element::new("soapenv:Envelope");
    envelope
        .attributes
        .insert("xmlns:soapenv".to_string(), SOAP_ENVELOPE_NS.to_string());
    envelope
        .attributes
        .insert(format!("xmlns:{}", METHOD_PREFIX), namespace.to_string());
    envelope.children.push(XMLNode::Element(header));
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new()
        .write_document_declaration(true)
        .perform_indent(true)
        .indent_string("  ");
    envelope.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8(buf)?)
}
