//! Error types for PowerPoint to PDF conversion.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while planning or running a conversion batch.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file or directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input directory does not exist.
    #[error("The directory {0} does not exist")]
    MissingInputDir(String),

    /// The output directory could not be created.
    #[error("Error creating output directory: {0}")]
    OutputDir(String),

    /// The automation interface of the external application failed.
    #[error("PowerPoint automation error: {0}")]
    Automation(String),

    /// Built without PowerPoint automation support for this platform.
    #[error("PowerPoint automation is only available on Windows")]
    UnsupportedPlatform,
}
