//! Repository ingest form flow.

mod backend;
mod flow;
mod form;
mod page;
mod response;
mod validate;

pub use backend::{HttpIngestBackend, IngestBackend};
pub use flow::{IngestController, IngestOutcome};
pub use form::IngestForm;
pub use page::{MemoryPage, PageView, RESULTS_ATTRIBUTE, SLIDER_ID, STARS_ID};
pub use response::{IngestResponse, ERROR_MARKER_ID};
pub use validate::validate_repository;
