use std::sync::Arc;

use coursesoap::{
    DecodedValue, RemoteCall, ResponseDecoder, ResponseDocument, build_soap_request,
    detect_fault,
};
use tracing::{debug, warn};
use ureq::Agent;

use crate::errors::CourseClientError;

pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Sends one request envelope and returns the raw response body.
///
/// Implementations fail with [`CourseClientError::Transport`] on any
/// non-success status.
pub trait SoapTransport: Send + Sync {
    fn send(&self, envelope: &str) -> Result<String, CourseClientError>;
}

impl<T: SoapTransport + ?Sized> SoapTransport for Arc<T> {
    fn send(&self, envelope: &str) -> Result<String, CourseClientError> {
        (**self).send(envelope)
    }
}

impl<T: SoapTransport + ?Sized> SoapTransport for Box<T> {
    fn send(&self, envelope: &str) -> Result<String, CourseClientError> {
        (**self).send(envelope)
    }
}

/// HTTP POST transport to a fixed SOAP endpoint.
///
/// No retry and no timeout beyond the agent defaults.
#[derive(Clone)]
pub struct HttpTransport {
    endpoint: String,
    agent: Agent,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        // 4xx/5xx ne doivent pas devenir des Error::StatusCode :
        // on veut toujours pouvoir lire le corps de la réponse.
        let config = Agent::config_builder().http_status_as_error(false).build();

        Self {
            endpoint: endpoint.into(),
            agent: config.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SoapTransport for HttpTransport {
    fn send(&self, envelope: &str) -> Result<String, CourseClientError> {
        let mut response = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", SOAP_CONTENT_TYPE)
            .header("SOAPAction", "")
            .send(envelope.to_string())?;

        let status = response.status();

        if !status.is_success() {
            // Le corps est joint à l'erreur quand il est lisible
            let body = response.body_mut().read_to_string().unwrap_or_default();
            warn!(endpoint = %self.endpoint, status = status.as_u16(), "SOAP request failed");
            return Err(CourseClientError::transport(status.as_u16(), &body));
        }

        Ok(response.body_mut().read_to_string()?)
    }
}

/// Runs one remote call: build, send, check for a fault, decode.
pub fn invoke_soap_call<T: SoapTransport + ?Sized>(
    transport: &T,
    decoder: &ResponseDecoder,
    call: &RemoteCall,
) -> Result<DecodedValue, CourseClientError> {
    let envelope = build_soap_request(decoder.namespace(), call)?;
    debug!(method = %call.method, bytes = envelope.len(), "Sending SOAP request");

    let raw = transport.send(&envelope)?;
    let doc = ResponseDocument::parse(raw)?;

    if let Some(fault) = detect_fault(&doc) {
        warn!(method = %call.method, message = %fault.message, "SOAP fault returned");
        return Err(fault.into());
    }

    Ok(decoder.decode(&doc, &call.method))
}
