//! Domain types describing a conversion batch and its outcome.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The format of a source presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary).
    Ppt,
}

impl SourceFormat {
    /// Detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" => Some(Self::Pptx),
            "ppt" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from a file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// A single file scheduled for conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionJob {
    /// Absolute path of the source presentation.
    pub input: PathBuf,

    /// Absolute path of the PDF to produce.
    pub output: PathBuf,

    /// Detected format of the source file.
    pub format: SourceFormat,
}

impl ConversionJob {
    /// File name of the source presentation, for messages.
    pub fn file_name(&self) -> &str {
        self.input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
    }
}

/// A successfully converted file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertedFile {
    /// File name of the source presentation.
    pub file: String,
    /// Path of the PDF that was written.
    pub output: PathBuf,
}

/// A file that could not be converted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    /// File name of the source presentation.
    pub file: String,
    /// Why the conversion failed.
    pub error: String,
}

/// Summary of a conversion batch, accumulated in processing order.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Files successfully converted.
    pub converted: Vec<ConvertedFile>,
    /// Files that failed to convert.
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    /// Record a successful conversion.
    pub fn record_success(&mut self, job: &ConversionJob) {
        self.converted.push(ConvertedFile {
            file: job.file_name().to_string(),
            output: job.output.clone(),
        });
    }

    /// Record a failed conversion.
    pub fn record_failure(&mut self, job: &ConversionJob, error: impl fmt::Display) {
        self.failed.push(FailedFile {
            file: job.file_name().to_string(),
            error: error.to_string(),
        });
    }

    /// Total number of files processed.
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(name: &str) -> ConversionJob {
        ConversionJob {
            input: PathBuf::from("/decks").join(name),
            output: PathBuf::from("/decks/out.pdf"),
            format: SourceFormat::Pptx,
        }
    }

    #[test]
    fn test_from_extension_is_case_insensitive() {
        assert_eq!(SourceFormat::from_extension("pptx"), Some(SourceFormat::Pptx));
        assert_eq!(SourceFormat::from_extension("PPTX"), Some(SourceFormat::Pptx));
        assert_eq!(SourceFormat::from_extension("Ppt"), Some(SourceFormat::Ppt));
        assert_eq!(SourceFormat::from_extension("pdf"), None);
        assert_eq!(SourceFormat::from_extension(""), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("/decks/deck.PPTX")),
            Some(SourceFormat::Pptx)
        );
        assert_eq!(SourceFormat::from_path(Path::new("/decks/notes.txt")), None);
        assert_eq!(SourceFormat::from_path(Path::new("/decks/noext")), None);
    }

    #[test]
    fn test_report_accounting() {
        let mut report = BatchReport::default();
        assert_eq!(report.total(), 0);

        report.record_success(&job("a.pptx"));
        report.record_failure(&job("b.pptx"), "SaveAs failed");

        assert_eq!(report.converted.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.total(), 2);
        assert_eq!(report.converted[0].file, "a.pptx");
        assert_eq!(report.failed[0].file, "b.pptx");
        assert_eq!(report.failed[0].error, "SaveAs failed");
    }
}
