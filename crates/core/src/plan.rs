//! Directory validation and per-file conversion planning.

use crate::error::{Error, Result};
use crate::types::{ConversionJob, SourceFormat};
use std::fs;
use std::path::{Path, PathBuf};

/// A validated conversion batch: resolved directories plus one job per
/// eligible presentation file.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    input_dir: PathBuf,
    output_dir: PathBuf,
    jobs: Vec<ConversionJob>,
}

impl ConversionPlan {
    /// Build a plan for every `.ppt`/`.pptx` file directly inside `input_dir`.
    ///
    /// The output directory defaults to the input directory and is created
    /// if missing. Fails if the input directory does not exist or the output
    /// directory cannot be created.
    pub fn build(input_dir: &Path, output_dir: Option<&Path>) -> Result<Self> {
        // The automation server resolves relative paths against its own
        // working directory, so the plan only carries absolute paths.
        let input_dir = std::path::absolute(input_dir)?;
        if !input_dir.is_dir() {
            return Err(Error::MissingInputDir(input_dir.display().to_string()));
        }

        let output_dir = match output_dir {
            Some(dir) => std::path::absolute(dir)?,
            None => input_dir.clone(),
        };
        fs::create_dir_all(&output_dir)
            .map_err(|e| Error::OutputDir(format!("{}: {}", output_dir.display(), e)))?;

        let jobs = scan_presentations(&input_dir, &output_dir)?;
        log::debug!(
            "Planned {} conversions from {}",
            jobs.len(),
            input_dir.display()
        );

        Ok(Self {
            input_dir,
            output_dir,
            jobs,
        })
    }

    /// The resolved input directory.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// The resolved output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The planned jobs, in processing order.
    pub fn jobs(&self) -> &[ConversionJob] {
        &self.jobs
    }

    /// Number of planned jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the scan found no eligible files.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Enumerate presentation files in `input_dir` and pair each with its
/// output path in `output_dir`.
fn scan_presentations(input_dir: &Path, output_dir: &Path) -> Result<Vec<ConversionJob>> {
    let mut jobs = Vec::new();

    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let format = match SourceFormat::from_path(&path) {
            Some(format) => format,
            None => continue,
        };

        let output = output_dir.join(pdf_file_name(&path));
        jobs.push(ConversionJob {
            input: path,
            output,
            format,
        });
    }

    // Directory order is platform dependent; sort for a stable batch order.
    jobs.sort_by(|a, b| a.input.cmp(&b.input));

    Ok(jobs)
}

/// Derive the output file name: same stem, `.pdf` extension.
fn pdf_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    format!("{}.pdf", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn test_pdf_file_name_replaces_extension() {
        assert_eq!(pdf_file_name(Path::new("deck.pptx")), "deck.pdf");
        assert_eq!(pdf_file_name(Path::new("deck.PPTX")), "deck.pdf");
        assert_eq!(pdf_file_name(Path::new("old.ppt")), "old.pdf");
    }

    #[test]
    fn test_pdf_file_name_preserves_stem_case() {
        assert_eq!(pdf_file_name(Path::new("Quarterly Review.PPTX")), "Quarterly Review.pdf");
    }

    #[test]
    fn test_missing_input_dir() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("not-there");

        let result = ConversionPlan::build(&missing, None);
        assert!(matches!(result, Err(Error::MissingInputDir(_))));
    }

    #[test]
    fn test_empty_dir_gives_empty_plan() {
        let tmp = TempDir::new().unwrap();

        let plan = ConversionPlan::build(tmp.path(), None).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.pptx");
        touch(tmp.path(), "b.PPT");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "archive.pdf");
        fs::create_dir(tmp.path().join("folder.pptx")).unwrap();

        let plan = ConversionPlan::build(tmp.path(), None).unwrap();
        let names: Vec<&str> = plan.jobs().iter().map(|j| j.file_name()).collect();
        assert_eq!(names, vec!["a.pptx", "b.PPT"]);
    }

    #[test]
    fn test_jobs_carry_detected_format() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "new.pptx");
        touch(tmp.path(), "old.ppt");

        let plan = ConversionPlan::build(tmp.path(), None).unwrap();
        let formats: Vec<SourceFormat> = plan.jobs().iter().map(|j| j.format).collect();
        assert_eq!(formats, vec![SourceFormat::Pptx, SourceFormat::Ppt]);
    }

    #[test]
    fn test_output_dir_defaults_to_input_dir() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "deck.pptx");

        let plan = ConversionPlan::build(tmp.path(), None).unwrap();
        assert_eq!(plan.input_dir(), plan.output_dir());
        assert_eq!(
            plan.jobs()[0].output,
            plan.input_dir().join("deck.pdf")
        );
    }

    #[test]
    fn test_output_dir_is_created() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "deck.pptx");
        let out = tmp.path().join("pdfs").join("nested");

        let plan = ConversionPlan::build(tmp.path(), Some(&out)).unwrap();
        assert!(out.is_dir());
        assert_eq!(plan.jobs()[0].output, out.join("deck.pdf"));
    }

    #[test]
    fn test_uncreatable_output_dir() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "blocker");
        let out = tmp.path().join("blocker");

        let result = ConversionPlan::build(tmp.path(), Some(&out));
        assert!(matches!(result, Err(Error::OutputDir(_))));
    }

    #[test]
    fn test_jobs_sorted_by_input_path() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "c.pptx");
        touch(tmp.path(), "a.pptx");
        touch(tmp.path(), "b.ppt");

        let plan = ConversionPlan::build(tmp.path(), None).unwrap();
        let names: Vec<&str> = plan.jobs().iter().map(|j| j.file_name()).collect();
        assert_eq!(names, vec!["a.pptx", "b.ppt", "c.pptx"]);
    }
}
