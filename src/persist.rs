//! Writing the final record.
//!
//! The whole document is rendered in memory before the destination is opened,
//! so a failure at any earlier point leaves no partial file behind. Parent
//! directories are created as needed.

use std::path::Path;

use serde::Serialize;

use crate::error::PromptfigError;

/// Pure function: render `config` as a TOML document.
///
/// Field names become keys in declaration order; nested records become
/// sections.
pub fn render<C: Serialize>(config: &C) -> Result<String, PromptfigError> {
    Ok(toml::to_string(config)?)
}

/// I/O wrapper: render `config` and write it to `path`.
pub fn persist<C: Serialize>(path: &Path, config: &C) -> Result<(), PromptfigError> {
    let content = render(config)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| PromptfigError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, &content).map_err(|e| PromptfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    log::info!("wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{AppConfig, ServerConfig};
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> AppConfig {
        AppConfig {
            name: "svc".into(),
            debug: true,
            retries: 3,
            ratio: 0.25,
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            tags: vec!["edge".into()],
            limits: BTreeMap::from([("api".to_string(), 10)]),
        }
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} not in {haystack}"))
    }

    #[test]
    fn keys_follow_declaration_order() {
        let out = render(&sample()).unwrap();
        let name = position(&out, "name = ");
        let debug = position(&out, "debug = ");
        let retries = position(&out, "retries = ");
        let ratio = position(&out, "ratio = ");
        let tags = position(&out, "tags = ");
        assert!(name < debug && debug < retries && retries < ratio && ratio < tags);
    }

    #[test]
    fn plain_values_precede_sections() {
        // TOML cannot put a plain key after a table header, so `tags` is
        // written ahead of `[server]` even though it is declared after it.
        let out = render(&sample()).unwrap();
        assert!(position(&out, "tags = ") < position(&out, "[server]"));
    }

    #[test]
    fn nested_records_become_sections_in_order() {
        let out = render(&sample()).unwrap();
        let server = position(&out, "[server]");
        let limits = position(&out, "[limits]");
        assert!(server < limits);
        assert!(out.contains("port = 8080"));
        assert!(out.contains("api = 10"));
    }

    #[test]
    fn rendered_document_decodes_back() {
        let out = render(&sample()).unwrap();
        let back: AppConfig = toml::from_str(&out).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn persist_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("promptfig.toml");
        persist(&path, &sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("name = \"svc\""));
    }

    #[test]
    fn persist_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("promptfig.toml");
        fs::write(&path, "stale = true\n").unwrap();

        persist(&path, &sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
    }

    #[test]
    fn persist_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("dir").join("promptfig.toml");

        persist(&path, &sample()).unwrap();
        assert!(path.exists());
    }
}
