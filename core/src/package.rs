//! Schemas and constants for `rayforge-package.yaml`.

use crate::{FieldRule, Schema, ValueKind};

/// File name of the package metadata document at the package root.
pub const METADATA_FILENAME: &str = "rayforge-package.yaml";

/// Placeholder text shipped in the package template.
pub const DEFAULT_PLACEHOLDER_MARKERS: &[&str] = &["your-github-username"];

/// Top-level fields of a package metadata document.
pub const PACKAGE_SCHEMA: Schema = Schema::new(&[
    FieldRule::required("name", ValueKind::String),
    FieldRule::required("description", ValueKind::String),
    FieldRule::required("author", ValueKind::Mapping),
    FieldRule::required("provides", ValueKind::Mapping),
]);

/// Fields of the nested `author` mapping.
pub const AUTHOR_SCHEMA: Schema = Schema::new(&[
    FieldRule::required("name", ValueKind::String),
    FieldRule::required("email", ValueKind::String),
]);
