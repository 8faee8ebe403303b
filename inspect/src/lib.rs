//! Static inspection of package source code.
//!
//! Entry points declared in package metadata are checked by reading the
//! target module's text and looking at its top-level statements. Nothing is
//! imported, compiled, or executed.
//!
//! The capability is expressed as the [`SourceInspector`] trait so the
//! validator can be pointed at packages written in other languages;
//! [`python::PythonInspector`] is the implementation shipped here.
//!
//! # Example
//!
//! ```
//! use rayforge_package_inspect::{DefinitionKind, SourceInspector, python::PythonInspector};
//!
//! let source = "\
//! class Exporter:
//!     def run(self):
//!         pass
//!
//! exporter = Exporter()
//! ";
//!
//! let defs = PythonInspector.top_level_definitions(source).unwrap();
//! assert_eq!(defs.len(), 2);
//! assert_eq!(defs[0].kind, DefinitionKind::Class);
//! assert!(PythonInspector.find_definition(source, "run").unwrap().is_none());
//! ```

pub mod python;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while tokenizing source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectError {
    /// A string literal runs past the end of its line or the file.
    #[error("unterminated string starting at line {line}")]
    UnterminatedString { line: usize },
    /// A closing bracket does not match, or an opening one is never closed.
    #[error("unbalanced '{bracket}' at line {line}")]
    UnbalancedBracket { bracket: char, line: usize },
    /// A backslash is followed by something other than a newline.
    #[error("unexpected character after line continuation at line {line}")]
    InvalidContinuation { line: usize },
}

/// How a top-level name is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Function,
    Class,
    Assignment,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Assignment => "assignment",
        })
    }
}

/// A name bound at module level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub kind: DefinitionKind,
    /// 1-based source line of the name.
    pub line: usize,
}

/// Language-specific, non-executing view of package source.
pub trait SourceInspector {
    /// Short language label for diagnostics.
    fn language(&self) -> &'static str;

    /// Maps a dotted module path to a source file below `root`.
    ///
    /// Returns `None` when the path is not a valid module name or no source
    /// file exists for it.
    fn resolve_module(&self, root: &Path, module: &str) -> Option<PathBuf>;

    /// Lists definitions made directly at module level, in source order.
    ///
    /// # Errors
    ///
    /// Returns an [`InspectError`] when the source cannot be tokenized.
    fn top_level_definitions(&self, source: &str) -> Result<Vec<Definition>, InspectError>;

    /// Returns the first top-level definition of `name`, if any.
    fn find_definition(
        &self,
        source: &str,
        name: &str,
    ) -> Result<Option<Definition>, InspectError> {
        Ok(self
            .top_level_definitions(source)?
            .into_iter()
            .find(|def| def.name == name))
    }
}
