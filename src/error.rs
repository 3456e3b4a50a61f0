use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Any of these aborts the whole session; nothing is persisted.
///
/// Operator mistakes (bad numbers, unknown menu letters, missing keys) are not
/// represented here. They are [`InputError`](crate::codec::InputError)s and are
/// handled by re-prompting.
#[derive(Debug, Error)]
pub enum PromptfigError {
    #[error("Failed to read operator input: {0}")]
    Input(#[source] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Edited values do not fit the configuration type: {0}")]
    InvalidDocument(#[source] toml::de::Error),

    #[error("Unsupported field '{path}': {reason}")]
    UnsupportedShape { path: String, reason: String },

    #[error("Cannot guess the module of the target type: no package name in {root}/Cargo.toml; pass --module")]
    ModuleNotFound { root: PathBuf },

    #[error("No target type set; pass --type")]
    TypeRequired,
}

impl PromptfigError {
    pub(crate) fn unsupported(path: &str, reason: impl Into<String>) -> Self {
        PromptfigError::UnsupportedShape {
            path: if path.is_empty() {
                "<root>".into()
            } else {
                path.into()
            },
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_shape_formats_correctly() {
        let err = PromptfigError::unsupported("server.mode", "enums are not supported");
        let msg = err.to_string();
        assert!(msg.contains("server.mode"));
        assert!(msg.contains("enums"));
    }

    #[test]
    fn unsupported_shape_at_root() {
        let err = PromptfigError::unsupported("", "the root must be a struct");
        assert!(err.to_string().contains("<root>"));
    }

    #[test]
    fn io_error_includes_path() {
        let err = PromptfigError::IoError {
            path: "/srv/app/promptfig.toml".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("promptfig.toml"));
    }

    #[test]
    fn module_not_found_mentions_flag() {
        let err = PromptfigError::ModuleNotFound { root: "..".into() };
        assert!(err.to_string().contains("--module"));
    }
}
