//! Décodage des réponses sans schéma
//!
//! No WSDL tells us whether a response carries nothing, one value, one
//! object or a list of objects. The only signal the service gives is how many
//! `return` elements it wrote, so decoding branches on that count:
//!
//! - zero: the text of the response scope, or [`DecodedValue::None`] when blank
//! - one: a [`DecodedValue::Scalar`] if it has no child elements, a
//!   [`DecodedValue::Record`] otherwise
//! - more: a [`DecodedValue::Sequence`], each member decoded like the single case
//!
//! Where the scope comes from is itself a chain of fallbacks, written down
//! as [`ScopeLookup::ORDER`] and [`AckLookup::ORDER`].

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use tracing::{debug, trace};
use xmltree::Element;

use crate::ResponseDocument;
use crate::parser::{child_elements, descendants, find_in_tree, has_child_elements, text_content};

/// Methods whose response is a plain acknowledgement string.
pub const ACKNOWLEDGEMENT_METHODS: &[&str] = &[
    "addCourse",
    "updateCourse",
    "deleteCourse",
    "enrollStudent",
    "unenrollStudent",
    "addSchedule",
    "deleteSchedule",
];

const RETURN_TAG: &str = "return";

pub fn is_acknowledgement_method(method: &str) -> bool {
    ACKNOWLEDGEMENT_METHODS.contains(&method)
}

/// Valeur décodée d'une réponse
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DecodedValue {
    #[default]
    None,
    Scalar(String),
    Record(Record),
    Sequence(Vec<DecodedValue>),
}

impl DecodedValue {
    pub fn is_none(&self) -> bool {
        matches!(self, DecodedValue::None)
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            DecodedValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            DecodedValue::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Records carried by this value, whatever its cardinality.
    ///
    /// `None` gives an empty list, a single record a one-element list.
    /// Scalars are not records and are left out.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            DecodedValue::Record(r) => vec![r],
            DecodedValue::Sequence(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    DecodedValue::Record(r) => Some(r),
                    _ => None,
                })
                .collect(),
            DecodedValue::None | DecodedValue::Scalar(_) => Vec::new(),
        }
    }

    /// Scalars carried by this value, whatever its cardinality.
    pub fn into_scalars(self) -> Vec<String> {
        match self {
            DecodedValue::Scalar(s) => vec![s],
            DecodedValue::Sequence(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    DecodedValue::Scalar(s) => Some(s),
                    _ => None,
                })
                .collect(),
            DecodedValue::None | DecodedValue::Record(_) => Vec::new(),
        }
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DecodedValue::None => serializer.serialize_none(),
            DecodedValue::Scalar(s) => serializer.serialize_str(s),
            DecodedValue::Record(r) => r.serialize(serializer),
            DecodedValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Object-shaped result: child element name to value, in document order.
///
/// Repeated names are kept; lookups return the first one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, DecodedValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: DecodedValue) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&DecodedValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Text of a scalar field; nested records have no text here.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(DecodedValue::as_scalar)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &DecodedValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Where the `return` elements of an object/array response are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeLookup {
    /// `<method>Response` in the service namespace.
    NamespacedResponse,
    /// `<method>Response` in any namespace.
    AnyResponse,
    /// The SOAP `Body` element.
    Body,
    /// The whole document.
    Document,
}

impl ScopeLookup {
    pub const ORDER: [ScopeLookup; 4] = [
        ScopeLookup::NamespacedResponse,
        ScopeLookup::AnyResponse,
        ScopeLookup::Body,
        ScopeLookup::Document,
    ];

    pub fn locate<'a>(
        &self,
        doc: &'a ResponseDocument,
        method: &str,
        namespace: &str,
    ) -> Option<&'a Element> {
        let response_tag = format!("{}Response", method);
        match self {
            ScopeLookup::NamespacedResponse => find_in_tree(doc.root(), &|e| {
                e.name == response_tag && e.namespace.as_deref() == Some(namespace)
            }),
            ScopeLookup::AnyResponse => find_in_tree(doc.root(), &|e| e.name == response_tag),
            ScopeLookup::Body => doc.body(),
            ScopeLookup::Document => Some(doc.root()),
        }
    }
}

/// How an acknowledgement string is recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckLookup {
    /// First `return` element anywhere in the document.
    ReturnElement,
    /// Text of the namespaced `<method>Response` wrapper.
    NamespacedResponse,
    /// The response text, untouched.
    RawText,
}

impl AckLookup {
    pub const ORDER: [AckLookup; 3] = [
        AckLookup::ReturnElement,
        AckLookup::NamespacedResponse,
        AckLookup::RawText,
    ];

    pub fn resolve(
        &self,
        doc: &ResponseDocument,
        method: &str,
        namespace: &str,
    ) -> Option<DecodedValue> {
        match self {
            AckLookup::ReturnElement => find_in_tree(doc.root(), &is_return)
                .map(|e| DecodedValue::Scalar(text_content(e))),
            AckLookup::NamespacedResponse => ScopeLookup::NamespacedResponse
                .locate(doc, method, namespace)
                .map(trimmed_text),
            AckLookup::RawText => Some(DecodedValue::Scalar(doc.raw().to_string())),
        }
    }
}

/// Décodeur de réponses pour un espace de noms de service
#[derive(Debug, Clone)]
pub struct ResponseDecoder {
    namespace: String,
}

impl ResponseDecoder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Décode la réponse de `method`
    ///
    /// Never fails: when nothing usable is found the result degrades to
    /// [`DecodedValue::None`]. Faults must be checked before calling this.
    pub fn decode(&self, doc: &ResponseDocument, method: &str) -> DecodedValue {
        if is_acknowledgement_method(method) {
            return self.decode_acknowledgement(doc, method);
        }

        let scope = self.locate_scope(doc, method);
        let value = decode_scope(scope);
        if value.is_none() {
            debug!(method, "No value found in SOAP response");
        }
        value
    }

    fn decode_acknowledgement(&self, doc: &ResponseDocument, method: &str) -> DecodedValue {
        for lookup in AckLookup::ORDER {
            if let Some(value) = lookup.resolve(doc, method, &self.namespace) {
                trace!(method, strategy = ?lookup, "Acknowledgement resolved");
                return value;
            }
        }
        DecodedValue::None
    }

    /// Element the `return` nodes are counted in.
    pub fn locate_scope<'a>(&self, doc: &'a ResponseDocument, method: &str) -> &'a Element {
        for lookup in ScopeLookup::ORDER {
            if let Some(scope) = lookup.locate(doc, method, &self.namespace) {
                trace!(method, strategy = ?lookup, "Response scope located");
                return scope;
            }
        }
        doc.root()
    }
}

/// Whether a structured `return` element is an entity (course, schedule...).
///
/// Entities always carry an `id` child; anything else structured is not
/// decoded field by field.
pub fn is_entity_record(elem: &Element) -> bool {
    child_elements(elem).any(|c| c.name == "id")
}

fn is_return(elem: &Element) -> bool {
    elem.name == RETURN_TAG
}

fn trimmed_text(elem: &Element) -> DecodedValue {
    let text = text_content(elem);
    let text = text.trim();
    if text.is_empty() {
        DecodedValue::None
    } else {
        DecodedValue::Scalar(text.to_string())
    }
}

fn decode_scope(scope: &Element) -> DecodedValue {
    let returns: Vec<&Element> = descendants(scope)
        .into_iter()
        .filter(|e| is_return(e))
        .collect();

    match returns.as_slice() {
        [] => trimmed_text(scope),
        [single] => decode_return(single),
        many => DecodedValue::Sequence(many.iter().map(|e| decode_return(e)).collect()),
    }
}

fn decode_return(elem: &Element) -> DecodedValue {
    if !has_child_elements(elem) {
        return DecodedValue::Scalar(text_content(elem));
    }
    if is_entity_record(elem) {
        return DecodedValue::Record(record_from_element(elem));
    }
    debug!("Structured return element without id, keeping its text");
    DecodedValue::Scalar(text_content(elem))
}

fn record_from_element(elem: &Element) -> Record {
    let mut record = Record::new();
    for child in child_elements(elem) {
        let value = if has_child_elements(child) {
            DecodedValue::Record(record_from_element(child))
        } else {
            DecodedValue::Scalar(text_content(child))
        };
        record.push(child.name.clone(), value);
    }
    record
}
