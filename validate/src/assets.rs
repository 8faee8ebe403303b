//! Asset path checks.

use std::path::{Component, Path};

use rayforge_package_core::{ValidationError, Value};
use tracing::debug;

/// Checks the `path` of the asset entry at `index` and returns it.
///
/// The path must be a non-empty string, must stay inside the package root
/// (no `..` segments, not absolute), and must exist. Existence is the only
/// filesystem requirement; files and directories are both accepted.
///
/// # Errors
///
/// - [`ValidationError::InvalidAsset`] when `path` is missing, empty, or not
///   a string.
/// - [`ValidationError::PathTraversal`] when the path leaves the root.
/// - [`ValidationError::AssetNotFound`] when nothing exists at the path.
pub fn check_asset<'a>(
    index: usize,
    path: Option<&'a Value>,
    root: &Path,
) -> Result<&'a str, ValidationError> {
    let path = match path.and_then(Value::as_str) {
        Some(path) if !path.is_empty() => path,
        _ => return Err(ValidationError::InvalidAsset(index)),
    };

    if escapes_root(Path::new(path)) {
        return Err(ValidationError::PathTraversal(path.to_string()));
    }

    let resolved = root.join(path);
    debug!(asset = path, resolved = %resolved.display(), "checking asset");
    if !resolved.exists() {
        return Err(ValidationError::AssetNotFound(path.to_string()));
    }
    Ok(path)
}

fn escapes_root(path: &Path) -> bool {
    path.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rayforge_package_core::FailureKind;

    use super::*;

    fn package() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("assets/profiles")).unwrap();
        fs::write(dir.path().join("assets/logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("..hidden"), "").unwrap();
        dir
    }

    fn kind_of(path: Option<&Value>, root: &Path) -> FailureKind {
        check_asset(0, path, root).unwrap_err().kind()
    }

    #[test]
    fn test_existing_file_and_directory_pass() {
        let root = package();
        let file = Value::from("assets/logo.svg");
        let dir = Value::from("assets/profiles");
        assert_eq!(check_asset(0, Some(&file), root.path()), Ok("assets/logo.svg"));
        assert_eq!(check_asset(1, Some(&dir), root.path()), Ok("assets/profiles"));
    }

    #[test]
    fn test_missing_empty_or_non_string_path_is_invalid() {
        let root = package();
        assert_eq!(kind_of(None, root.path()), FailureKind::InvalidAsset);
        assert_eq!(kind_of(Some(&Value::from("")), root.path()), FailureKind::InvalidAsset);
        assert_eq!(kind_of(Some(&Value::from(7)), root.path()), FailureKind::InvalidAsset);
        assert_eq!(
            check_asset(3, Some(&Value::Null), root.path()),
            Err(ValidationError::InvalidAsset(3))
        );
    }

    #[test]
    fn test_parent_segment_is_traversal_even_when_target_exists() {
        let root = package();
        let path = Value::from("assets/../assets/logo.svg");
        assert_eq!(
            check_asset(0, Some(&path), root.path()),
            Err(ValidationError::PathTraversal("assets/../assets/logo.svg".into()))
        );
        let missing = Value::from("assets/../secret");
        assert_eq!(kind_of(Some(&missing), root.path()), FailureKind::PathTraversal);
    }

    #[test]
    fn test_dotdot_prefixed_name_is_not_traversal() {
        let root = package();
        let path = Value::from("..hidden");
        assert_eq!(check_asset(0, Some(&path), root.path()), Ok("..hidden"));
    }

    #[test]
    fn test_absolute_path_is_traversal() {
        let root = package();
        let path = Value::from("/etc");
        assert_eq!(kind_of(Some(&path), root.path()), FailureKind::PathTraversal);
    }

    #[test]
    fn test_nonexistent_asset() {
        let root = package();
        let path = Value::from("assets/missing.png");
        assert_eq!(
            check_asset(0, Some(&path), root.path()),
            Err(ValidationError::AssetNotFound("assets/missing.png".into()))
        );
    }
}
