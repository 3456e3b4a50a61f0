use std::path::{Path, PathBuf};

/// Whether a session asks the operator anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Prompt for every field (the default).
    #[default]
    Interactive,
    /// Forward the loaded document to persistence without reading any input.
    NonInteractive,
}

/// Where a session's starting values come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A template document (explicit, or the `.dist.toml` default).
    Template(PathBuf),
    /// The destination itself, from an earlier run.
    Existing(PathBuf),
}

impl Source {
    pub fn path(&self) -> &Path {
        match self {
            Source::Template(p) | Source::Existing(p) => p,
        }
    }
}
