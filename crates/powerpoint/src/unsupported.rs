//! Stub backend for platforms without PowerPoint automation.

use deck2pdf_core::{Error, Result};
use std::path::Path;

/// Placeholder for the PowerPoint application handle.
///
/// Conversion needs the COM automation interface of an installed
/// PowerPoint; on this platform launching always fails.
pub struct PowerPoint(());

impl PowerPoint {
    /// Always fails: automation is unavailable on this platform.
    pub fn launch() -> Result<Self> {
        Err(Error::UnsupportedPlatform)
    }

    /// Unreachable in practice, as `launch` never succeeds here.
    pub fn convert_to_pdf(&self, _input: &Path, _output: &Path) -> Result<()> {
        Err(Error::UnsupportedPlatform)
    }
}
