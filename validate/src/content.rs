//! Semantic content checks.
//!
//! Runs after the schema phase, so field types are already known to be
//! right. Checks run in a fixed order (tag, name match, non-empty fields,
//! author, provides) which makes the first reported failure deterministic.

use std::path::Path;
use std::sync::LazyLock;

use rayforge_package_core::{Mapping, ValidationError, Value, ValueKind};
use regex::Regex;
use tracing::debug;

use crate::assets::check_asset;
use crate::config::ValidationMode;
use crate::entry_point::EntryPointResolver;
use crate::progress::Progress;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$")
        .expect("static regex must compile")
});

/// Values supplied by the caller (usually CI) that the document must agree
/// with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expectations {
    /// Release tag, e.g. `v1.2.3`.
    pub tag: Option<String>,
    /// Package name the document must declare.
    pub name: Option<String>,
}

/// Failures gathered during one run.
#[derive(Debug)]
pub(crate) struct Failures {
    mode: ValidationMode,
    pub(crate) errors: Vec<ValidationError>,
}

/// Signals that a fail-fast run must stop.
#[derive(Debug)]
pub(crate) struct Halt;

impl Failures {
    pub(crate) fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
        }
    }

    /// Records the outcome of one check. Returns `Err(Halt)` once a failure
    /// is recorded in fail-fast mode.
    pub(crate) fn record<T>(&mut self, result: Result<T, ValidationError>) -> Result<Option<T>, Halt> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                debug!(kind = %err.kind(), "check failed: {err}");
                self.errors.push(err);
                match self.mode {
                    ValidationMode::FailFast => Err(Halt),
                    ValidationMode::CollectAll => Ok(None),
                }
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Orchestrates the content checks.
#[derive(Debug)]
pub struct ContentValidator {
    placeholder_markers: Vec<String>,
    entry_points: EntryPointResolver,
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self::new(
            rayforge_package_core::DEFAULT_PLACEHOLDER_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            EntryPointResolver::default(),
        )
    }
}

impl ContentValidator {
    pub fn new(placeholder_markers: Vec<String>, entry_points: EntryPointResolver) -> Self {
        Self {
            placeholder_markers,
            entry_points,
        }
    }

    /// Runs every content check and stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first failing check's [`ValidationError`].
    pub fn validate(
        &self,
        document: &Mapping,
        root: &Path,
        expectations: &Expectations,
        progress: &mut dyn Progress,
    ) -> Result<(), ValidationError> {
        let mut failures = Failures::new(ValidationMode::FailFast);
        // `Halt` only ends the walk; the failure is already in `failures`.
        self.run(document, root, expectations, progress, &mut failures).ok();
        match failures.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Runs every content check and returns all failures.
    pub fn collect(
        &self,
        document: &Mapping,
        root: &Path,
        expectations: &Expectations,
        progress: &mut dyn Progress,
    ) -> Vec<ValidationError> {
        let mut failures = Failures::new(ValidationMode::CollectAll);
        self.run(document, root, expectations, progress, &mut failures).ok();
        failures.errors
    }

    pub(crate) fn run(
        &self,
        document: &Mapping,
        root: &Path,
        expectations: &Expectations,
        progress: &mut dyn Progress,
        failures: &mut Failures,
    ) -> Result<(), Halt> {
        if let Some(tag) = expectations.tag.as_deref().filter(|t| !t.is_empty()) {
            if failures.record(check_tag(tag))?.is_some() {
                progress.passed(&format!("Version tag '{tag}' OK"));
            }
        }

        let name = document.get("name");
        if let Some(expected) = expectations.name.as_deref().filter(|n| !n.is_empty()) {
            if failures.record(check_name_match(name, expected))?.is_some() {
                progress.passed(&format!("Package name '{expected}' OK"));
            }
        }

        failures.record(check_non_empty(name, "name"))?;
        failures.record(check_non_empty(document.get("description"), "description"))?;

        let author = document.get("author").and_then(Value::as_mapping);
        self.check_author(author, failures)?;

        let provides = document.get("provides").and_then(Value::as_mapping);
        self.check_provides(provides, root, progress, failures)
    }

    fn check_author(&self, author: Option<&Mapping>, failures: &mut Failures) -> Result<(), Halt> {
        let name = author.and_then(|a| a.get("name"));
        let email = author.and_then(|a| a.get("email"));

        let name_ok = failures.record(check_non_empty(name, "author.name"))?.is_some();
        let email_ok = failures.record(check_non_empty(email, "author.email"))?.is_some();

        if name_ok {
            let name = name.and_then(Value::as_str).unwrap_or_default();
            failures.record(self.check_placeholder(name, "author.name"))?;
        }
        if email_ok {
            let email = email.and_then(Value::as_str).unwrap_or_default();
            failures.record(check_email(email))?;
        }
        Ok(())
    }

    fn check_placeholder(&self, value: &str, key: &str) -> Result<(), ValidationError> {
        match self
            .placeholder_markers
            .iter()
            .find(|marker| value.contains(marker.as_str()))
        {
            Some(marker) => Err(ValidationError::PlaceholderDetected {
                key: key.to_string(),
                marker: marker.clone(),
            }),
            None => Ok(()),
        }
    }

    fn check_provides(
        &self,
        provides: Option<&Mapping>,
        root: &Path,
        progress: &mut dyn Progress,
        failures: &mut Failures,
    ) -> Result<(), Halt> {
        let assets = provides.and_then(|p| p.get("assets"));
        let code = provides.and_then(|p| p.get("code"));
        if assets.is_none() && code.is_none() {
            failures.record::<()>(Err(ValidationError::EmptyProvides))?;
            return Ok(());
        }

        if let Some(assets) = assets {
            let entries = failures.record(expect_kind(assets, ValueKind::Sequence, "provides.assets"))?;
            for (index, entry) in entries
                .and_then(Value::as_sequence)
                .unwrap_or_default()
                .iter()
                .enumerate()
            {
                let key = format!("provides.assets[{index}]");
                let Some(entry) = failures.record(expect_kind(entry, ValueKind::Mapping, &key))?
                else {
                    continue;
                };
                if let Some(path) = failures.record(check_asset(index, entry.get("path"), root))? {
                    progress.passed(&format!("Asset '{path}' OK"));
                }
            }
        }

        if let Some(code) = code {
            let Some(reference) = failures
                .record(expect_kind(code, ValueKind::String, "provides.code"))?
                .and_then(Value::as_str)
            else {
                return Ok(());
            };
            if failures.record(self.entry_points.check(reference, root))?.is_some() {
                progress.passed(&format!("Code entry point '{reference}' OK"));
            }
        }
        Ok(())
    }
}

/// Checks that `tag`, minus one leading `v`, is a semantic version.
///
/// ```
/// use rayforge_package_validate::check_tag;
///
/// assert!(check_tag("v1.2.3").is_ok());
/// assert!(check_tag("2.0.0-rc.1+build.5").is_ok());
/// assert!(check_tag("v1.2").is_err());
/// ```
pub fn check_tag(tag: &str) -> Result<(), ValidationError> {
    let version = tag.strip_prefix('v').unwrap_or(tag);
    semver::Version::parse(version)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidVersion(tag.to_string()))
}

fn check_name_match(actual: Option<&Value>, expected: &str) -> Result<(), ValidationError> {
    let actual = actual.and_then(Value::as_str).unwrap_or_default();
    if actual == expected {
        Ok(())
    } else {
        Err(ValidationError::NameMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

fn check_non_empty(value: Option<&Value>, key: &str) -> Result<(), ValidationError> {
    match value.and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::EmptyField(key.to_string())),
    }
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

fn expect_kind<'a>(value: &'a Value, kind: ValueKind, key: &str) -> Result<&'a Value, ValidationError> {
    if value.kind() == kind {
        Ok(value)
    } else {
        Err(ValidationError::WrongType {
            key: key.to_string(),
            expected: kind,
            actual: value.kind(),
        })
    }
}
