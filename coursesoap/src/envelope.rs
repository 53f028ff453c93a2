//! Document de réponse SOAP

use xmltree::Element;

use crate::parser::{SoapParseError, child_elements, parse_response};

/// A parsed response, together with the text it was parsed from.
///
/// The raw text is kept because acknowledgement decoding may have to hand it
/// back verbatim when no structural node matches.
#[derive(Debug, Clone)]
pub struct ResponseDocument {
    pub(crate) raw: String,
    pub(crate) root: Element,
}

impl ResponseDocument {
    /// Parse le texte brut renvoyé par le transport
    pub fn parse(raw: impl Into<String>) -> Result<Self, SoapParseError> {
        parse_response(raw)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// SOAP `Header` element, if the root is an envelope carrying one.
    pub fn header(&self) -> Option<&Element> {
        self.envelope_child("Header")
    }

    /// SOAP `Body` element, if the root is an envelope carrying one.
    pub fn body(&self) -> Option<&Element> {
        self.envelope_child("Body")
    }

    fn envelope_child(&self, name: &str) -> Option<&Element> {
        if self.root.name != "Envelope" {
            return None;
        }
        child_elements(&self.root).find(|e| e.name == name)
    }
}
