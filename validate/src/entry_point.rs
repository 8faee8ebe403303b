//! Code entry point resolution.
//!
//! A reference like `laser_tools.plugin:register` names a module and an
//! attribute. The module is located on disk and its top-level statements
//! are inspected; the package's code is never run.

use std::fs;
use std::path::Path;

use rayforge_package_core::ValidationError;
use rayforge_package_inspect::python::PythonInspector;
use rayforge_package_inspect::{Definition, SourceInspector};
use tracing::debug;

/// Resolves `module:attribute` references with a [`SourceInspector`].
pub struct EntryPointResolver {
    inspector: Box<dyn SourceInspector>,
}

impl Default for EntryPointResolver {
    fn default() -> Self {
        Self::new(Box::new(PythonInspector))
    }
}

impl std::fmt::Debug for EntryPointResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryPointResolver")
            .field("language", &self.inspector.language())
            .finish()
    }
}

impl EntryPointResolver {
    pub fn new(inspector: Box<dyn SourceInspector>) -> Self {
        Self { inspector }
    }

    /// Confirms that `reference` names a top-level definition under `root`.
    ///
    /// The reference is split on its first `:`; everything after it is the
    /// attribute name.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MalformedRef`] when there is no `:`.
    /// - [`ValidationError::ModuleNotFound`] when the module has no source
    ///   file under `root`.
    /// - [`ValidationError::AttributeNotFound`] when no top-level statement
    ///   binds the attribute.
    /// - [`ValidationError::Unexpected`] when the source cannot be read or
    ///   tokenized.
    pub fn check(&self, reference: &str, root: &Path) -> Result<Definition, ValidationError> {
        let Some((module, attribute)) = reference.split_once(':') else {
            return Err(ValidationError::MalformedRef(reference.to_string()));
        };

        let path = self
            .inspector
            .resolve_module(root, module)
            .ok_or_else(|| ValidationError::ModuleNotFound(module.to_string()))?;
        debug!(
            module,
            path = %path.display(),
            language = self.inspector.language(),
            "resolved entry point module"
        );

        let source = fs::read_to_string(&path).map_err(|err| {
            ValidationError::Unexpected(format!("failed to read '{}': {err}", path.display()))
        })?;
        let definition = self
            .inspector
            .find_definition(&source, attribute)
            .map_err(|err| {
                ValidationError::Unexpected(format!(
                    "failed to parse '{}': {err}",
                    path.display()
                ))
            })?;

        let definition = definition.ok_or_else(|| ValidationError::AttributeNotFound {
            module: module.to_string(),
            attribute: attribute.to_string(),
        })?;
        debug!(
            attribute,
            kind = %definition.kind,
            line = definition.line,
            "found entry point definition"
        );
        Ok(definition)
    }
}
