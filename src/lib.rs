//! Admission score calculation and course eligibility matching.
//!
//! [`scoring::calculate`] turns a list of subject/grade entries into a score
//! using the selection and normalisation rules of one jurisdiction, then ranks
//! a course catalog against that score. The engine does no I/O; catalogs and
//! courses are loaded by the caller (see [`config`] and [`catalog`]).

pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod logging;
pub mod output;
pub mod scoring;

pub use catalog::{CourseRecord, SubjectCatalogEntry, UnknownSubjectPolicy};
pub use error::CalculationError;
pub use scoring::{calculate, calculate_with_policy, CalculationResult, JurisdictionId, SubjectEntry};
