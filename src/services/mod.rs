//! Service layer for business logic.
//!
//! Every service here is a pure, single-pass transformation over an already
//! validated [`crate::models::AreaStatement`]. The one exception is the
//! generator module, whose AI-backed implementation performs the single
//! outbound HTTP call of the whole system.

pub mod analytics;

pub mod export;

pub mod flatten;

pub mod generator;

#[cfg(feature = "openai")]
pub mod openai;

pub mod schedule;

pub mod validation;

pub use analytics::{calculate_analytics, AnalyticsData};
pub use flatten::{apply_edit, flatten, EditError, FieldPath, FlatRow};
pub use generator::{
    extract_first_json_object, GenerateError, LocalSynthesizer, ScheduleGenerator, ScheduleResult,
};
pub use schedule::{synthesize_schedule, ScheduleSection, ScheduleSections, ScheduleTask};
pub use validation::{parse_upload, validate_statement, StructureError, UploadError};
