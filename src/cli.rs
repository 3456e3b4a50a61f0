//! Clap adapter for promptfig.
//!
//! Compiled only with the `clap` Cargo feature (on by default). The core
//! session API never depends on it.
//!
//! [`EditorArgs`] is meant to be flattened into an editor binary's parser and
//! turned into a [`Session`] with [`EditorArgs::session()`]. [`GenerateArgs`]
//! is the full parser of the `promptfig-gen` tool.

use std::path::PathBuf;

use clap::{Args, Parser};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PromptfigError;
use crate::generate::GenerateOptions;
use crate::session::{DEFAULT_DESTINATION, Promptfig, Session};

/// Options shared by every generated editor binary.
///
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     editor: EditorArgs,
/// }
///
/// let config = Cli::parse().editor.session::<AppConfig>().run()?;
/// ```
#[derive(Debug, Clone, PartialEq, Args)]
pub struct EditorArgs {
    /// Where the configuration document is written.
    #[arg(short, long, default_value = DEFAULT_DESTINATION)]
    pub destination: PathBuf,

    /// Start from this template instead of the destination or promptfig.dist.toml.
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Write the loaded values without asking anything.
    #[arg(short = 'n', long)]
    pub non_interactive: bool,
}

impl EditorArgs {
    /// Build a session for `C` configured from these arguments.
    pub fn session<C>(&self) -> Session<C>
    where
        C: Serialize + DeserializeOwned + 'static,
    {
        let session = Promptfig::session::<C>()
            .destination(&self.destination)
            .interactive(!self.non_interactive);
        match &self.template {
            Some(template) => session.template(template),
            None => session,
        }
    }
}

/// Generate an editor binary and a loader for a configuration struct.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "promptfig-gen", version)]
pub struct GenerateArgs {
    /// Name of the configuration struct.
    #[arg(short = 't', long = "type")]
    pub type_name: Option<String>,

    /// Module holding the struct (default: the package name from Cargo.toml).
    #[arg(short, long)]
    pub module: Option<String>,

    /// Project root to write into.
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

impl GenerateArgs {
    pub fn into_options(self) -> Result<GenerateOptions, PromptfigError> {
        let type_name = self
            .type_name
            .filter(|name| !name.is_empty())
            .ok_or(PromptfigError::TypeRequired)?;
        Ok(GenerateOptions {
            type_name,
            module: self.module,
            root: self.root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::AppConfig;
    use crate::types::Source;
    use std::path::Path;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        editor: EditorArgs,
    }

    fn editor(args: &[&str]) -> EditorArgs {
        TestCli::try_parse_from(args).unwrap().editor
    }

    #[test]
    fn editor_defaults() {
        let args = editor(&["app"]);
        assert_eq!(args.destination, PathBuf::from("promptfig.toml"));
        assert_eq!(args.template, None);
        assert!(!args.non_interactive);
    }

    #[test]
    fn editor_all_flags() {
        let args = editor(&[
            "app",
            "--destination",
            "out/app.toml",
            "--template",
            "base.toml",
            "--non-interactive",
        ]);
        assert_eq!(args.destination, PathBuf::from("out/app.toml"));
        assert_eq!(args.template, Some(PathBuf::from("base.toml")));
        assert!(args.non_interactive);
    }

    #[test]
    fn editor_short_flags() {
        let args = editor(&["app", "-d", "x.toml", "-t", "y.toml", "-n"]);
        assert_eq!(args.destination, PathBuf::from("x.toml"));
        assert_eq!(args.template, Some(PathBuf::from("y.toml")));
        assert!(args.non_interactive);
    }

    #[test]
    fn session_carries_destination_and_template() {
        let args = editor(&["app", "-d", "x.toml", "-t", "y.toml"]);
        let session = args.session::<AppConfig>();
        assert_eq!(session.destination_path(), Path::new("x.toml"));
        assert_eq!(session.source(), Source::Template("y.toml".into()));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(TestCli::try_parse_from(["app", "--bogus"]).is_err());
    }

    #[test]
    fn generate_parses_all_options() {
        let args =
            GenerateArgs::try_parse_from(["promptfig-gen", "--type", "AppConfig", "-m", "my_app::cfg", "-r", "proj"])
                .unwrap();
        let options = args.into_options().unwrap();
        assert_eq!(options.type_name, "AppConfig");
        assert_eq!(options.module.as_deref(), Some("my_app::cfg"));
        assert_eq!(options.root, PathBuf::from("proj"));
    }

    #[test]
    fn generate_defaults_root_to_cwd() {
        let args = GenerateArgs::try_parse_from(["promptfig-gen", "-t", "AppConfig"]).unwrap();
        let options = args.into_options().unwrap();
        assert_eq!(options.root, PathBuf::from("."));
        assert_eq!(options.module, None);
    }

    #[test]
    fn generate_without_type_is_an_error() {
        let args = GenerateArgs::try_parse_from(["promptfig-gen"]).unwrap();
        assert!(matches!(
            args.into_options(),
            Err(PromptfigError::TypeRequired)
        ));
    }
}
