//! Python source inspection.

pub mod lexer;
pub mod scan;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Definition, InspectError, SourceInspector};

use lexer::{PythonLexer, is_identifier_continue, is_identifier_start};

/// Inspector for Python packages.
///
/// Module paths resolve like the import system would with the package root
/// as the only search path entry, but only source files are considered and
/// nothing is imported: `a.b.c` maps to `a/b/c/__init__.py`, falling back to
/// `a/b/c.py`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonInspector;

impl SourceInspector for PythonInspector {
    fn language(&self) -> &'static str {
        "python"
    }

    fn resolve_module(&self, root: &Path, module: &str) -> Option<PathBuf> {
        let segments: Vec<&str> = module.split('.').collect();
        if !segments.iter().all(|segment| is_identifier(segment)) {
            debug!(module, "module path is not a dotted identifier");
            return None;
        }
        let (last, parents) = segments.split_last()?;

        let mut dir = root.to_path_buf();
        for parent in parents {
            dir.push(parent);
            if !dir.is_dir() {
                debug!(module, missing = %dir.display(), "parent package directory not found");
                return None;
            }
        }

        let package_init = dir.join(last).join("__init__.py");
        if package_init.is_file() {
            return Some(package_init);
        }
        let module_file = dir.join(format!("{last}.py"));
        module_file.is_file().then_some(module_file)
    }

    fn top_level_definitions(&self, source: &str) -> Result<Vec<Definition>, InspectError> {
        let lines = PythonLexer::tokenize(source)?;
        let definitions = scan::top_level_definitions(&lines);
        debug!(
            logical_lines = lines.len(),
            definitions = definitions.len(),
            "scanned python module"
        );
        Ok(definitions)
    }
}

/// Returns `true` when `name` is a valid Python identifier.
///
/// ```
/// use rayforge_package_inspect::python::is_identifier;
///
/// assert!(is_identifier("laser_tools"));
/// assert!(!is_identifier("2d"));
/// assert!(!is_identifier(""));
/// ```
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_continue)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::DefinitionKind;

    #[test]
    fn test_resolve_module_prefers_package_init() {
        let root = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(root.path().join("pkg/tools")).unwrap();
        fs::write(root.path().join("pkg/tools/__init__.py"), "").unwrap();
        fs::write(root.path().join("pkg/tools.py"), "").unwrap();

        let resolved = PythonInspector.resolve_module(root.path(), "pkg.tools");
        assert_eq!(resolved, Some(root.path().join("pkg/tools/__init__.py")));
    }

    #[test]
    fn test_resolve_module_falls_back_to_source_file() {
        let root = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(root.path().join("pkg")).unwrap();
        fs::write(root.path().join("pkg/mod.py"), "").unwrap();

        let resolved = PythonInspector.resolve_module(root.path(), "pkg.mod");
        assert_eq!(resolved, Some(root.path().join("pkg/mod.py")));
    }

    #[test]
    fn test_resolve_module_rejects_missing_and_invalid_paths() {
        let root = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(root.path().join("ns")).unwrap();

        assert_eq!(PythonInspector.resolve_module(root.path(), "absent"), None);
        assert_eq!(PythonInspector.resolve_module(root.path(), "ns"), None);
        assert_eq!(PythonInspector.resolve_module(root.path(), "ns..x"), None);
        assert_eq!(PythonInspector.resolve_module(root.path(), "../escape"), None);
        assert_eq!(PythonInspector.resolve_module(root.path(), ""), None);
    }

    #[test]
    fn test_find_definition_uses_scanner() {
        let found = PythonInspector
            .find_definition("def main():\n    pass\n", "main")
            .expect("parse");
        assert_eq!(found.map(|d| d.kind), Some(DefinitionKind::Function));
    }
}
