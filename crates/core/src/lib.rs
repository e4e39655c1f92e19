//! Core domain types and conversion planning for PowerPoint to PDF
//! batch conversion.

pub mod error;
pub mod plan;
pub mod types;

pub use error::{Error, Result};
pub use plan::ConversionPlan;
pub use types::{BatchReport, ConversionJob, ConvertedFile, FailedFile, SourceFormat};
