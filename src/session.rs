use std::io::{BufRead, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::editor::{self, Path as SlotPath};
use crate::error::PromptfigError;
use crate::introspect::shape_of;
use crate::load;
use crate::persist;
use crate::terminal::{Style, Terminal};
use crate::types::{Mode, Source};

/// Default destination document.
pub const DEFAULT_DESTINATION: &str = "promptfig.toml";

/// Template used when none is given and the destination does not exist yet.
pub const DEFAULT_TEMPLATE: &str = "promptfig.dist.toml";

/// Entry point for building an editing session.
pub struct Promptfig;

impl Promptfig {
    pub fn session<C>() -> Session<C>
    where
        C: Serialize + DeserializeOwned + 'static,
    {
        Session::new()
    }
}

/// One load → edit → persist run over record type `C`.
///
/// ```ignore
/// let config: AppConfig = Promptfig::session()
///     .destination("app.toml")
///     .run()?;
/// ```
pub struct Session<C> {
    destination: PathBuf,
    template: Option<PathBuf>,
    mode: Mode,
    color: bool,
    _phantom: PhantomData<C>,
}

impl<C> Session<C>
where
    C: Serialize + DeserializeOwned + 'static,
{
    fn new() -> Self {
        Self {
            destination: PathBuf::from(DEFAULT_DESTINATION),
            template: None,
            mode: Mode::default(),
            color: true,
            _phantom: PhantomData,
        }
    }

    /// Where the final document is written (default: `promptfig.toml`).
    pub fn destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination = path.into();
        self
    }

    /// Start from this template instead of the destination or the default template.
    pub fn template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    /// Choose interactive (default) or non-interactive mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for [`mode`](Self::mode).
    pub fn interactive(self, interactive: bool) -> Self {
        self.mode(if interactive {
            Mode::Interactive
        } else {
            Mode::NonInteractive
        })
    }

    /// Enable or disable colored prompts (default: enabled).
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Decide which document seeds the session.
    ///
    /// An explicit template always wins. Otherwise an existing destination is
    /// re-edited, and failing that the default template is used.
    pub fn source(&self) -> Source {
        if let Some(template) = &self.template {
            return Source::Template(template.clone());
        }
        if self.destination.exists() {
            return Source::Existing(self.destination.clone());
        }
        Source::Template(PathBuf::from(DEFAULT_TEMPLATE))
    }

    /// Load the starting record from the resolved source.
    ///
    /// A missing source yields the all-zero record.
    pub fn load(&self) -> Result<C, PromptfigError> {
        let source = self.source();
        let content = load::read_optional(source.path())?;
        if content.is_none() {
            log::debug!(
                "{} not found, starting from zero values",
                source.path().display()
            );
        }
        load::decode(content.as_deref(), source.path())
    }

    /// Run against the process's stdin and stdout.
    pub fn run(self) -> Result<C, PromptfigError> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run against an arbitrary line channel.
    ///
    /// The destination is written exactly once, after editing has finished.
    /// Returns the record that was written.
    pub fn run_with<R: BufRead, W: Write>(self, input: R, output: W) -> Result<C, PromptfigError> {
        let shape = shape_of::<C>()?;
        let mut term = Terminal::new(input, output).color(self.color);

        term.styled(Style::Banner, "Welcome to promptfig!")?;
        term.styled(
            Style::Info,
            &format!(
                "Working with {} configuration object.",
                std::any::type_name::<C>()
            ),
        )?;

        let source = self.source();
        let message = match &source {
            Source::Existing(p) => format!(
                "Destination ({}) already exists, loading values from it.",
                p.display()
            ),
            Source::Template(p) => format!("Reading template data from {}", p.display()),
        };
        term.styled(Style::Info, &message)?;
        let loaded = self.load()?;

        let config = match self.mode {
            Mode::NonInteractive => {
                term.styled(Style::Info, "Non-interactive mode: skipping user input.")?;
                loaded
            }
            Mode::Interactive => {
                term.styled(Style::Info, "Now let's set up the configuration values:")?;
                let mut tree = toml::Value::try_from(&loaded)?;
                editor::edit(&mut term, &SlotPath::root(), &shape, &mut tree)?;
                term.styled(
                    Style::Success,
                    "Thank you, that will be all. Generating config...",
                )?;
                tree.try_into().map_err(PromptfigError::InvalidDocument)?
            }
        };

        persist::persist(&self.destination, &config)?;
        term.styled(
            Style::Success,
            &format!(
                "Config successfully generated to '{}'.",
                self.destination.display()
            ),
        )?;
        Ok(config)
    }

    pub fn destination_path(&self) -> &Path {
        &self.destination
    }
}
