//! # Application Layer
//!
//! Clinic context, background delivery, search, and the service facade.

pub mod context;
pub mod delivery;
pub mod search;
pub mod service;

pub use context::ClinicContext;
pub use delivery::DeliveryHandle;
pub use search::{filter_transactions, SearchPipeline};
pub use service::RecordService;
