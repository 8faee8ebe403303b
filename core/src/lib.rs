//! Core document model and schema checking for Rayforge packages.
//!
//! This crate defines the pieces every other crate in the workspace builds
//! on:
//!
//! - [`Value`]: tagged union for untyped metadata documents, with
//!   [`ValueKind`] as its runtime type tag.
//! - [`Schema`] / [`FieldRule`]: declarative required/optional field lists
//!   checked against a [`Mapping`].
//! - [`ValidationError`] / [`FailureKind`]: the failure taxonomy shared by
//!   every validation phase.
//! - [`PACKAGE_SCHEMA`] and [`AUTHOR_SCHEMA`]: the schemas for
//!   `rayforge-package.yaml`.
//!
//! # Example
//!
//! ```
//! use rayforge_package_core::*;
//!
//! let mut doc = Mapping::new();
//! doc.insert("name".into(), Value::from("laser-tools"));
//! doc.insert("description".into(), Value::from(42));
//!
//! let err = PACKAGE_SCHEMA.validate(&doc, None).unwrap_err();
//! assert_eq!(err.kind(), FailureKind::WrongType);
//! assert_eq!(
//!     err.to_string(),
//!     "Key 'description' has wrong type. Expected string, but got integer."
//! );
//! ```

mod error;
mod package;
mod validate;
mod value;

pub use error::{FailureKind, ValidationError};
pub use package::{
    AUTHOR_SCHEMA, DEFAULT_PLACEHOLDER_MARKERS, METADATA_FILENAME, PACKAGE_SCHEMA,
};
pub use validate::{FieldRule, Schema, key_path};
pub use value::{Mapping, Value, ValueKind};
