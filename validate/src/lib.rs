//! Validation pipeline for `rayforge-package.yaml`.
//!
//! A run loads the metadata file, checks its shape against the schemas in
//! [`rayforge_package_core`], and then checks content: version tag, package
//! name, author details, asset paths, and the code entry point.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use rayforge_package_validate::{
//!     Expectations, RecordedProgress, ValidationPipeline, ValidatorConfig,
//! };
//!
//! let expectations = Expectations {
//!     tag: Some("v1.2.3".into()),
//!     name: Some("laser-tools".into()),
//! };
//! let mut progress = RecordedProgress::default();
//! let report = ValidationPipeline::new(ValidatorConfig::default())
//!     .run(Path::new("laser-tools"), &expectations, &mut progress);
//!
//! if let Some(failure) = report.first_failure() {
//!     eprintln!("{} ({})", failure, failure.kind());
//! }
//! ```

pub mod assets;
pub mod config;
pub mod content;
pub mod entry_point;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod progress;

pub use config::{ValidationMode, ValidatorConfig};
pub use content::{ContentValidator, Expectations, check_tag};
pub use entry_point::EntryPointResolver;
pub use error::{ConfigError, Result};
pub use loader::load_document;
pub use pipeline::{Report, ValidationPipeline};
pub use progress::{NoProgress, Progress, ProgressEvent, RecordedProgress};
