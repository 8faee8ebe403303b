//! End-to-end validation of a package directory.

use std::path::{Path, PathBuf};

use rayforge_package_core::{AUTHOR_SCHEMA, Mapping, PACKAGE_SCHEMA, ValidationError, Value};
use rayforge_package_inspect::SourceInspector;
use tracing::{debug, info};

use crate::config::ValidatorConfig;
use crate::content::{ContentValidator, Expectations, Failures, Halt};
use crate::entry_point::EntryPointResolver;
use crate::loader::load_document;
use crate::progress::Progress;

/// Runs the load, schema, and content phases against a package root.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use rayforge_package_validate::{
///     Expectations, NoProgress, ValidationPipeline, ValidatorConfig,
/// };
///
/// let pipeline = ValidationPipeline::new(ValidatorConfig::default());
/// let report = pipeline.run(Path::new("."), &Expectations::default(), &mut NoProgress);
/// for failure in report.failures() {
///     eprintln!("{failure}");
/// }
/// ```
#[derive(Debug)]
pub struct ValidationPipeline {
    config: ValidatorConfig,
    content: ContentValidator,
}

impl ValidationPipeline {
    pub fn new(config: ValidatorConfig) -> Self {
        let content = ContentValidator::new(
            config.placeholder_markers.clone(),
            EntryPointResolver::default(),
        );
        Self { config, content }
    }

    /// Replaces the source inspector used for `provides.code`.
    pub fn with_inspector(mut self, inspector: Box<dyn SourceInspector>) -> Self {
        self.content = ContentValidator::new(
            self.config.placeholder_markers.clone(),
            EntryPointResolver::new(inspector),
        );
        self
    }

    /// Validates the package at `root`.
    ///
    /// Never panics and never returns early with an error; every outcome,
    /// including a missing or unparseable metadata file, is captured in the
    /// returned [`Report`].
    pub fn run(
        &self,
        root: &Path,
        expectations: &Expectations,
        progress: &mut dyn Progress,
    ) -> Report {
        let root = resolve_root(root);
        info!(root = %root.display(), mode = ?self.config.mode, "validating package");
        progress.begin(&root);

        let mut failures = Failures::new(self.config.mode);
        if self
            .run_phases(&root, expectations, progress, &mut failures)
            .is_err()
        {
            debug!("stopped at first failure");
        }

        let report = Report {
            root,
            failures: failures.errors,
        };
        if report.is_success() {
            info!("package metadata is valid");
        } else {
            info!(failures = report.failures.len(), "package metadata is invalid");
        }
        report
    }

    fn run_phases(
        &self,
        root: &Path,
        expectations: &Expectations,
        progress: &mut dyn Progress,
        failures: &mut Failures,
    ) -> Result<(), Halt> {
        let path = root.join(&self.config.metadata_file);
        let Some(document) = failures.record(load_document(&path))? else {
            return Ok(());
        };
        let Some(document) = failures.record(self.expect_mapping(document))? else {
            return Ok(());
        };

        progress.phase("Running schema validation...");
        for err in schema_failures(&document) {
            failures.record::<()>(Err(err))?;
        }
        if !failures.is_empty() {
            return Ok(());
        }
        progress.passed("Schema OK");

        progress.phase("Running content validation...");
        self.content
            .run(&document, root, expectations, progress, failures)?;
        if failures.is_empty() {
            progress.passed("Content OK");
        }
        Ok(())
    }

    fn expect_mapping(&self, document: Value) -> Result<Mapping, ValidationError> {
        match document {
            Value::Mapping(mapping) => Ok(mapping),
            _ => Err(ValidationError::WrongShape(self.config.metadata_file.clone())),
        }
    }
}

/// Top-level and author schema failures, in field order.
fn schema_failures(document: &Mapping) -> Vec<ValidationError> {
    let mut errors = PACKAGE_SCHEMA.collect(document, None);
    if let Some(author) = document.get("author").and_then(Value::as_mapping) {
        errors.extend(AUTHOR_SCHEMA.collect(author, Some("author")));
    }
    errors
}

fn resolve_root(root: &Path) -> PathBuf {
    root.canonicalize()
        .or_else(|_| std::path::absolute(root))
        .unwrap_or_else(|_| root.to_path_buf())
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    root: PathBuf,
    failures: Vec<ValidationError>,
}

impl Report {
    /// The resolved package root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Failures in the order they were found. Holds at most one entry in
    /// fail-fast mode.
    pub fn failures(&self) -> &[ValidationError] {
        &self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn first_failure(&self) -> Option<&ValidationError> {
        self.failures.first()
    }

    /// Process exit status: `0` on success, `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }

    /// Converts into the first failure, if any.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.failures.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
