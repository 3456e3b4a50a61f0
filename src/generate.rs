//! Boilerplate generation for a project that wants a promptfig editor.
//!
//! Two files are emitted by plain text substitution:
//!
//! - `src/bin/promptfig.rs`: an editor binary for the target type, wired to
//!   [`EditorArgs`](crate::EditorArgs) (`--destination`, `--template`,
//!   `--non-interactive`).
//! - `src/promptfig_loaders.rs`: a `load_config()` function that reads the
//!   persisted `promptfig.toml` from the executable's directory.
//!
//! Nothing here is used by the editor at runtime.

use std::path::{Path, PathBuf};

use crate::error::PromptfigError;

const EDITOR_TEMPLATE: &str = r#"//! Generated by promptfig-gen: interactive editor for `{{type_path}}`.

use clap::Parser;

#[derive(Parser)]
#[command(about = "Fill in {{type_name}} interactively and write it as TOML")]
struct Cli {
    #[command(flatten)]
    editor: promptfig::EditorArgs,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.editor.session::<{{type_path}}>().run() {
        eprintln!("promptfig: {e}");
        std::process::exit(1);
    }
}
"#;

const LOADERS_TEMPLATE: &str = r#"//! Generated by promptfig-gen: loads the document written by the promptfig editor.

/// Load `{{type_name}}` from `promptfig.toml` next to the running executable.
pub fn load_config() -> Result<{{local_type_path}}, promptfig::PromptfigError> {
    let dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(std::path::Path::to_path_buf))
        .unwrap_or_default();
    promptfig::load_file(&dir.join("promptfig.toml"))
}
"#;

/// Inputs of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    /// Name of the configuration struct, e.g. `AppConfig`.
    pub type_name: String,
    /// Rust path of the module holding it, e.g. `myapp::config`. Guessed from
    /// `<root>/Cargo.toml` when `None`.
    pub module: Option<String>,
    /// Project root.
    pub root: PathBuf,
}

/// What a generation run wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub type_path: String,
    pub editor: PathBuf,
    pub loaders: PathBuf,
}

/// Replace every `{{name}}` placeholder in `template`.
fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{{{name}}}}}"), value)
    })
}

/// Full path of the target type as seen from outside the library crate.
pub fn type_path(module: &str, type_name: &str) -> String {
    format!("{module}::{type_name}")
}

/// The same path as seen from inside the library: the crate segment becomes `crate`.
fn local_type_path(type_path: &str) -> String {
    match type_path.split_once("::") {
        Some((_, rest)) => format!("crate::{rest}"),
        None => type_path.to_string(),
    }
}

fn short_name(type_path: &str) -> &str {
    type_path.rsplit("::").next().unwrap_or(type_path)
}

pub fn render_editor_main(type_path: &str) -> String {
    substitute(
        EDITOR_TEMPLATE,
        &[("type_path", type_path), ("type_name", short_name(type_path))],
    )
}

pub fn render_loaders(type_path: &str) -> String {
    substitute(
        LOADERS_TEMPLATE,
        &[
            ("local_type_path", &local_type_path(type_path)),
            ("type_name", short_name(type_path)),
        ],
    )
}

/// Guess the module of the target type: the library crate's name from
/// `<root>/Cargo.toml`, with hyphens turned into underscores.
pub fn guess_module(root: &Path) -> Result<String, PromptfigError> {
    let manifest = root.join("Cargo.toml");
    let content = std::fs::read_to_string(&manifest).map_err(|e| PromptfigError::IoError {
        path: manifest.clone(),
        source: e,
    })?;
    let table: toml::Table = toml::from_str(&content).map_err(|e| PromptfigError::ParseError {
        path: manifest.clone(),
        source: e,
    })?;

    table
        .get("lib")
        .and_then(|lib| lib.get("name"))
        .or_else(|| table.get("package").and_then(|pkg| pkg.get("name")))
        .and_then(|name| name.as_str())
        .map(|name| name.replace('-', "_"))
        .ok_or_else(|| PromptfigError::ModuleNotFound {
            root: root.to_path_buf(),
        })
}

/// Write the editor binary and the loader into `options.root`.
pub fn generate(options: &GenerateOptions) -> Result<Generated, PromptfigError> {
    if options.type_name.is_empty() {
        return Err(PromptfigError::TypeRequired);
    }
    let module = match &options.module {
        Some(module) => module.clone(),
        None => guess_module(&options.root)?,
    };
    let type_path = type_path(&module, &options.type_name);
    log::debug!("generating promptfig boilerplate for {type_path}");

    let editor = options.root.join("src").join("bin").join("promptfig.rs");
    write(&editor, &render_editor_main(&type_path))?;

    let loaders = options.root.join("src").join("promptfig_loaders.rs");
    write(&loaders, &render_loaders(&type_path))?;

    Ok(Generated {
        type_path,
        editor,
        loaders,
    })
}

fn write(path: &Path, content: &str) -> Result<(), PromptfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PromptfigError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| PromptfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}
