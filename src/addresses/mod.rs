//! Address management operations and their HTTP handlers

pub mod handlers;
pub mod outcome;
pub mod service;

pub use handlers::AppState;
pub use outcome::{AddressPage, DeleteOutcome, ExportOutcome, ListOutcome, RecordOutcome};
pub use service::AddressService;
