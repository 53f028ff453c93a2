//! Détection des SOAP Faults

use tracing::debug;
use xmltree::Element;

use crate::ResponseDocument;
use crate::parser::{find_descendant, find_in_tree, text_content};

/// Message used when a fault carries neither `faultstring` nor `detail` text.
pub const DEFAULT_FAULT_MESSAGE: &str = "SOAP Fault";

/// Erreur SOAP (Fault) renvoyée par le service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    /// Message lisible extrait du fault
    pub message: String,
}

/// One qualified name a fault element may be emitted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultTag {
    pub prefix: Option<&'static str>,
}

impl FaultTag {
    fn matches(&self, elem: &Element) -> bool {
        elem.name == "Fault" && elem.prefix.as_deref() == self.prefix
    }
}

/// Fault names, checked in this order; the first hit wins.
///
/// Deployments differ on the prefix: JAX-WS writes `S:Fault`, other stacks
/// `soap:Fault`, some an unprefixed `Fault` under a default namespace.
pub const FAULT_TAGS: &[FaultTag] = &[
    FaultTag { prefix: Some("S") },
    FaultTag {
        prefix: Some("soap"),
    },
    FaultTag { prefix: None },
    FaultTag {
        prefix: Some("soapenv"),
    },
    FaultTag {
        prefix: Some("SOAP-ENV"),
    },
];

/// Cherche un fault dans la réponse
///
/// Returns `None` for a clean document. When a fault is found its message is
/// the `faultstring` text, else the `detail` text, else [`DEFAULT_FAULT_MESSAGE`].
pub fn detect_fault(doc: &ResponseDocument) -> Option<SoapFault> {
    let fault = FAULT_TAGS
        .iter()
        .find_map(|tag| find_in_tree(doc.root(), &|e| tag.matches(e)))?;

    let message = ["faultstring", "detail"]
        .iter()
        .find_map(|name| {
            find_descendant(fault, &|e| e.name == *name)
                .map(text_content)
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_FAULT_MESSAGE.to_string());

    debug!(prefix = ?fault.prefix, message = %message, "SOAP fault detected");
    Some(SoapFault { message })
}
