//! # coursesoap - schema-less SOAP for the course service
//!
//! This crate holds the protocol side of the course-service client: building
//! request envelopes by hand, detecting faults in a response, and recovering
//! structured data from a response whose shape is only known at decode time.
//!
//! ## Fonctionnalités
//!
//! - Construction d'enveloppes de requête sans WSDL
//! - Détection des SOAP Faults quel que soit le préfixe utilisé
//! - Décodage par cardinalité des éléments `return`
//!
//! ## Architecture
//!
//! - [`RemoteCall`] : méthode distante et ses paramètres ordonnés
//! - [`ResponseDocument`] : réponse brute et son arbre XML
//! - [`SoapFault`] : erreur renvoyée par le service
//! - [`DecodedValue`] : résultat décodé (None, Scalar, Record, Sequence)
//!
//! ## Example
//!
//! ```
//! use coursesoap::{RemoteCall, ResponseDecoder, ResponseDocument, build_soap_request, detect_fault};
//!
//! let call = RemoteCall::new("deleteCourse").arg("id", 7);
//! let request = build_soap_request("http://course.university.com/", &call).unwrap();
//! assert!(request.contains("<cour:deleteCourse>"));
//!
//! let raw = r#"<S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/">
//!   <S:Body>
//!     <ns2:deleteCourseResponse xmlns:ns2="http://course.university.com/">
//!       <return>Course deleted</return>
//!     </ns2:deleteCourseResponse>
//!   </S:Body>
//! </S:Envelope>"#;
//! let doc = ResponseDocument::parse(raw).unwrap();
//! assert!(detect_fault(&doc).is_none());
//!
//! let decoder = ResponseDecoder::new("http://course.university.com/");
//! let value = decoder.decode(&doc, "deleteCourse");
//! assert_eq!(value.as_scalar(), Some("Course deleted"));
//! ```

mod builder;
mod decoder;
mod envelope;
mod fault;
mod parser;

pub use builder::{RemoteCall, SoapBuildError, build_soap_request};
pub use decoder::{
    ACKNOWLEDGEMENT_METHODS, AckLookup, DecodedValue, Record, ResponseDecoder, ScopeLookup,
    is_acknowledgement_method, is_entity_record,
};
pub use envelope::ResponseDocument;
pub use fault::{DEFAULT_FAULT_MESSAGE, FAULT_TAGS, FaultTag, SoapFault, detect_fault};
pub use parser::{SoapParseError, parse_response};

/// Namespace de l'enveloppe SOAP 1.1
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Préfixe lié à l'espace de noms des méthodes dans les requêtes
pub const METHOD_PREFIX: &str = "cour";
