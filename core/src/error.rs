//! Failure taxonomy for package validation.
//!
//! Every check in the pipeline fails with a [`ValidationError`]. Variants
//! carry the offending key, path, or reference so the `Display` text alone
//! is enough to fix the package; [`ValidationError::kind`] gives tooling a
//! stable [`FailureKind`] to match on.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::ValueKind;

/// Package validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required key is absent. Holds the dotted key path.
    #[error("Missing required key: '{0}'")]
    MissingKey(String),
    /// A key holds a value of the wrong type.
    #[error("Key '{key}' has wrong type. Expected {expected}, but got {actual}.")]
    WrongType {
        key: String,
        expected: ValueKind,
        actual: ValueKind,
    },
    /// The expected tag is not a semantic version.
    #[error("Version tag '{0}' is not a valid semantic version (e.g., v1.2.3).")]
    InvalidVersion(String),
    /// The document name differs from the expected package name.
    #[error("Package name mismatch. Expected '{expected}', but metadata has '{actual}'.")]
    NameMismatch { expected: String, actual: String },
    /// A string field is empty or whitespace-only.
    #[error("Key '{0}' must not be empty.")]
    EmptyField(String),
    /// A field still carries template placeholder text.
    #[error("Placeholder '{key}' detected (contains '{marker}'). Please update it.")]
    PlaceholderDetected { key: String, marker: String },
    /// The author email does not look like an address.
    #[error("Author email '{0}' has an invalid format.")]
    InvalidEmail(String),
    /// `provides` declares neither `assets` nor `code`.
    #[error("The 'provides' section must contain 'code' and/or 'assets'.")]
    EmptyProvides,
    /// An asset entry has no usable `path`. Holds the entry index.
    #[error("Asset entry {0} is missing a valid 'path' key.")]
    InvalidAsset(usize),
    /// An asset path walks out through a `..` segment.
    #[error("Invalid asset path: '{0}'. Paths must not use '..'.")]
    PathTraversal(String),
    /// An asset path does not exist under the package root.
    #[error("Asset path '{0}' does not exist.")]
    AssetNotFound(String),
    /// A code entry point lacks the `module:attribute` separator.
    #[error("Code entry point '{0}' is invalid. Expected format 'path.to.module:function_name'.")]
    MalformedRef(String),
    /// The entry point's module resolves to no source file.
    #[error("Module '{0}' not found.")]
    ModuleNotFound(String),
    /// The module defines no top-level attribute with that name.
    #[error("Attribute '{attribute}' not found in module '{module}'.")]
    AttributeNotFound { module: String, attribute: String },
    /// The metadata file is missing.
    #[error("Metadata file not found at '{}'", .0.display())]
    FileNotFound(PathBuf),
    /// The metadata file is not well-formed.
    #[error("Could not parse '{file}'. {message}")]
    ParseError { file: String, message: String },
    /// The metadata document is not a mapping at the top level.
    #[error("'{0}' must be a YAML mapping.")]
    WrongShape(String),
    /// Anything not anticipated by the checks above.
    #[error("An unexpected error occurred. {0}")]
    Unexpected(String),
}

impl ValidationError {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingKey(_) => FailureKind::MissingKey,
            Self::WrongType { .. } => FailureKind::WrongType,
            Self::InvalidVersion(_) => FailureKind::InvalidVersion,
            Self::NameMismatch { .. } => FailureKind::NameMismatch,
            Self::EmptyField(_) => FailureKind::EmptyField,
            Self::PlaceholderDetected { .. } => FailureKind::PlaceholderDetected,
            Self::InvalidEmail(_) => FailureKind::InvalidEmail,
            Self::EmptyProvides => FailureKind::EmptyProvides,
            Self::InvalidAsset(_) => FailureKind::InvalidAsset,
            Self::PathTraversal(_) => FailureKind::PathTraversal,
            Self::AssetNotFound(_) => FailureKind::AssetNotFound,
            Self::MalformedRef(_) => FailureKind::MalformedRef,
            Self::ModuleNotFound(_) => FailureKind::ModuleNotFound,
            Self::AttributeNotFound { .. } => FailureKind::AttributeNotFound,
            Self::FileNotFound(_) => FailureKind::FileNotFound,
            Self::ParseError { .. } => FailureKind::ParseError,
            Self::WrongShape(_) => FailureKind::WrongShape,
            Self::Unexpected(_) => FailureKind::Unexpected,
        }
    }
}

/// Stable classification of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    MissingKey,
    WrongType,
    InvalidVersion,
    NameMismatch,
    EmptyField,
    PlaceholderDetected,
    InvalidEmail,
    EmptyProvides,
    InvalidAsset,
    PathTraversal,
    AssetNotFound,
    MalformedRef,
    ModuleNotFound,
    AttributeNotFound,
    FileNotFound,
    ParseError,
    WrongShape,
    Unexpected,
}

impl FailureKind {
    /// Returns `true` for failures raised by a metadata check, as opposed
    /// to failing to obtain the document at all.
    ///
    /// ```
    /// use rayforge_package_core::FailureKind;
    ///
    /// assert!(FailureKind::InvalidEmail.is_check_failure());
    /// assert!(!FailureKind::ParseError.is_check_failure());
    /// ```
    pub fn is_check_failure(self) -> bool {
        !matches!(
            self,
            Self::FileNotFound | Self::ParseError | Self::Unexpected
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
