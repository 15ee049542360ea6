//! Deterministic, synchronous handling of Lighthouse reports: validation,
//! reduction to a bounded tree, chunking of its text form, and formatting
//! of the context injected into the assistant's system prompt.

pub mod bound;
pub mod chunk;
pub mod injection;
pub mod reduce;
pub mod report;
pub mod snapshot;
pub mod validate;

pub use bound::bound;
pub use chunk::chunk;
pub use reduce::{BoundedReport, CategoryScore, ReportReducer};
pub use report::ReductionReport;
pub use validate::{parse_report, validate_report, ValidatedReport};
