//! Reading the source document into a typed record.
//!
//! The document is overlaid on the zero tree of the record's shape, so every
//! field absent from the source gets its zero value. Keys the record does not
//! know are dropped; `serde_ignored` collects them so they can be reported.

use std::path::Path;

use serde::de::DeserializeOwned;
use toml::{Table, Value};

use crate::error::PromptfigError;
use crate::introspect::shape_of;
use crate::merge;

/// Read a file, treating a missing file as `None`. Other I/O errors are fatal.
pub fn read_optional(path: &Path) -> Result<Option<String>, PromptfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PromptfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Decode `content` into `C`, defaulting missing fields to their zero value.
///
/// `content` of `None` (no source file) yields the all-zero record. `path` is
/// only used in diagnostics.
pub fn decode<C: DeserializeOwned + 'static>(
    content: Option<&str>,
    path: &Path,
) -> Result<C, PromptfigError> {
    let shape = shape_of::<C>()?;

    let document = match content {
        Some(content) => toml::from_str::<Table>(content).map_err(|e| PromptfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?,
        None => Table::new(),
    };
    let tree = merge::overlay(&shape, shape.zero(), Value::Table(document));

    let mut ignored: Vec<String> = Vec::new();
    let config: C = serde_ignored::deserialize(tree, |key| ignored.push(key.to_string()))
        .map_err(|e| PromptfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    for key in &ignored {
        log::warn!("ignoring unknown key '{key}' in {}", path.display());
    }
    Ok(config)
}

/// Load a previously written document. Unlike a template, it must exist.
pub fn load_file<C: DeserializeOwned + 'static>(path: &Path) -> Result<C, PromptfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| PromptfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode(Some(&content), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{AppConfig, WithEnum};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn path() -> PathBuf {
        PathBuf::from("/test/promptfig.toml")
    }

    #[test]
    fn no_source_is_all_zero() {
        let config: AppConfig = decode(None, &path()).unwrap();
        assert_eq!(config.name, "");
        assert_eq!(config.retries, 0);
        assert_eq!(config.server.port, 0);
        assert!(config.tags.is_empty());
        assert!(config.limits.is_empty());
    }

    #[test]
    fn sparse_source_is_defaulted() {
        let content = "name = \"svc\"\n[server]\nport = 8080\n";
        let config: AppConfig = decode(Some(content), &path()).unwrap();
        assert_eq!(config.name, "svc");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "");
        assert!(!config.debug);
    }

    #[test]
    fn full_source_round_trips_values() {
        let content = r#"
name = "svc"
debug = true
retries = -3
ratio = 0.5
tags = ["x", "y"]

[server]
host = "0.0.0.0"
port = 443

[limits]
api = 100
"#;
        let config: AppConfig = decode(Some(content), &path()).unwrap();
        assert!(config.debug);
        assert_eq!(config.retries, -3);
        assert_eq!(config.ratio, 0.5);
        assert_eq!(config.tags, vec!["x", "y"]);
        assert_eq!(config.limits["api"], 100);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let content = "typo = 1\n[server]\nbogus = true\nport = 1\n";
        let config: AppConfig = decode(Some(content), &path()).unwrap();
        assert_eq!(config.server.port, 1);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = decode::<AppConfig>(Some("name = "), &path()).unwrap_err();
        assert!(matches!(err, PromptfigError::ParseError { .. }));
        assert!(err.to_string().contains("promptfig.toml"));
    }

    #[test]
    fn wrong_value_type_is_parse_error() {
        let err = decode::<AppConfig>(Some("retries = \"many\"\n"), &path()).unwrap_err();
        assert!(matches!(err, PromptfigError::ParseError { .. }));
    }

    #[test]
    fn out_of_range_value_is_parse_error() {
        let err = decode::<AppConfig>(Some("retries = 99999\n"), &path()).unwrap_err();
        assert!(matches!(err, PromptfigError::ParseError { .. }));
    }

    #[test]
    fn unsupported_type_fails_before_reading() {
        let err = decode::<WithEnum>(None, &path()).unwrap_err();
        assert!(matches!(err, PromptfigError::UnsupportedShape { .. }));
    }

    #[test]
    fn read_optional_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_optional(&dir.path().join("absent.toml")).unwrap(), None);
    }

    #[test]
    fn load_file_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_file::<AppConfig>(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, PromptfigError::IoError { .. }));
    }

    #[test]
    fn load_file_reads_document() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("promptfig.toml");
        fs::write(&file, "name = \"from-disk\"\n").unwrap();
        let config: AppConfig = load_file(&file).unwrap();
        assert_eq!(config.name, "from-disk");
    }
}
