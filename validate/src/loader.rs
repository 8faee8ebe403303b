//! Metadata document loading.
//!
//! Reads the metadata file and converts the parsed YAML into the core
//! [`Value`] model. YAML mapping keys that are scalars (numbers, booleans,
//! null) are stringified so lookups by field name behave predictably;
//! sequence or mapping keys cannot name a field and are rejected.

use std::fs;
use std::path::Path;

use rayforge_package_core::{Mapping, ValidationError, Value};
use tracing::debug;

/// Loads and parses the metadata document at `path`.
///
/// # Errors
///
/// - [`ValidationError::FileNotFound`] when `path` is not a file.
/// - [`ValidationError::ParseError`] when the content is not valid YAML.
/// - [`ValidationError::Unexpected`] when the file exists but cannot be read.
pub fn load_document(path: &Path) -> Result<Value, ValidationError> {
    if !path.is_file() {
        return Err(ValidationError::FileNotFound(path.to_path_buf()));
    }

    let raw = fs::read(path).map_err(|err| {
        ValidationError::Unexpected(format!("failed to read '{}': {err}", path.display()))
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "read metadata file");

    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let parse_error = |message: String| ValidationError::ParseError {
        file: file.clone(),
        message,
    };

    let yaml: serde_yaml::Value =
        serde_yaml::from_slice(&raw).map_err(|err| parse_error(err.to_string()))?;
    convert(yaml).map_err(parse_error)
}

/// Converts a parsed YAML tree into a [`Value`].
///
/// # Errors
///
/// Returns a message naming the offending key when a mapping key is not a
/// scalar.
pub fn convert(value: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(convert)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Yaml::Mapping(entries) => {
            let mut mapping = Mapping::new();
            for (key, value) in entries {
                mapping.insert(scalar_key(key)?, convert(value)?);
            }
            Value::Mapping(mapping)
        }
        Yaml::Tagged(tagged) => convert(tagged.value)?,
    })
}

fn scalar_key(key: serde_yaml::Value) -> Result<String, String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => scalar_key(tagged.value),
        other => Err(format!(
            "mapping keys must be scalars, found {}",
            match other {
                Yaml::Sequence(_) => "a sequence",
                _ => "a mapping",
            }
        )),
    }
}
