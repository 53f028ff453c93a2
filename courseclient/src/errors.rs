use coursesoap::{SoapBuildError, SoapFault, SoapParseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourseClientError {
    /// Non-success HTTP status; the body is kept so the failure can be read
    /// without a second round trip.
    #[error("SOAP request failed with HTTP status {status}: {body}")]
    Transport { status: u16, body: String },
    #[error("SOAP fault: {message}")]
    RemoteFault { message: String },
    #[error("HTTP error when sending SOAP request: {0}")]
    Http(#[from] ureq::Error),
    #[error("Malformed SOAP response: {0}")]
    MalformedResponse(#[from] SoapParseError),
    #[error("Failed to build SOAP request: {0}")]
    Envelope(#[from] SoapBuildError),
}

impl CourseClientError {
    pub fn transport(status: u16, body: &str) -> Self {
        CourseClientError::Transport {
            status,
            body: body.to_string(),
        }
    }

    pub fn remote_fault(message: &str) -> Self {
        CourseClientError::RemoteFault {
            message: message.to_string(),
        }
    }

    /// HTTP status of a transport failure
    pub fn status(&self) -> Option<u16> {
        match self {
            CourseClientError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<SoapFault> for CourseClientError {
    fn from(fault: SoapFault) -> Self {
        CourseClientError::RemoteFault {
            message: fault.message,
        }
    }
}
