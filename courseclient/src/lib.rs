//! Client of the course service SOAP endpoint.
//!
//! A call goes through a fixed, sequential pipeline: the envelope is built
//! ([`coursesoap::build_soap_request`]), sent by a [`SoapTransport`], checked
//! for a fault, decoded by cardinality, and finally normalized into
//! [`CourseRecord`] / [`ScheduleRecord`] values.
//!
//! ```no_run
//! use courseclient::{CourseFilter, CourseServiceClient};
//!
//! let config = courseconfig::get_config();
//! courseclient::logging::init_logging(&config)?;
//!
//! let client = CourseServiceClient::from_config(&config);
//! for course in client.list_courses_filtered(&CourseFilter {
//!     filiere: Some("INFO".into()),
//!     ..Default::default()
//! })? {
//!     println!("{:?} {:?}", course.code, course.nom);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod course_service_client;
pub mod errors;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod soap_client;

pub use course_service_client::CourseServiceClient;
pub use errors::CourseClientError;
pub use model::{CourseDraft, CourseFilter, CourseRecord, ScheduleDraft, ScheduleRecord};
pub use normalize::{coerce_int_lossy, normalize_course, normalize_schedule};
pub use soap_client::{HttpTransport, SOAP_CONTENT_TYPE, SoapTransport, invoke_soap_call};

pub use coursesoap::{DecodedValue, Record, RemoteCall};
