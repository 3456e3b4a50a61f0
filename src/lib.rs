//! Interactive, type-driven configuration editing for Rust applications.
//! Define a struct, run a session, and answer the prompts.
//!
//! Promptfig walks a configuration struct field by field on a line-based
//! terminal, shows the current value of each one, validates what the operator
//! types, and writes the result back as a TOML document.
//!
//! ```ignore
//! let config: AppConfig = Promptfig::session()
//!     .destination("app.toml")
//!     .run()?;
//! ```
//!
//! That call loads the starting values, asks for every field, and writes
//! `app.toml` once editing has finished.
//!
//! # The struct is the schema
//!
//! The configuration type only needs `Serialize` and `Deserialize`. Its shape
//! is discovered from the `Deserialize` impl (see [`shape_of`]) and drives
//! every prompt:
//!
//! - **Strings, booleans, integers and floats** are edited in place. Integers
//!   are range-checked against their declared width, so `300` is refused for a
//!   `u8` and the operator is asked again.
//! - **Nested structs** are edited recursively, indented under their name.
//! - **`Vec<T>`** and **`BTreeMap<String, T>`** / **`HashMap<String, T>`** get
//!   an `(A)dd/(R)emove/(P)urge/(N)ext` menu. Elements may themselves be
//!   structs or collections.
//!
//! `Option`, enums, tuples, non-string map keys and self-containing structs
//! are refused with [`PromptfigError::UnsupportedShape`] before any prompt is
//! shown.
//!
//! # Where the starting values come from
//!
//! ```text
//! explicit .template(path)            always wins
//!        ↓ otherwise
//! existing destination                re-edit the previous run
//!        ↓ otherwise
//! promptfig.dist.toml                 the shipped default template
//! ```
//!
//! The source may be sparse: keys it omits start from zero values (`""`,
//! `false`, `0`, empty collections, recursively zeroed structs). A missing
//! source file is the same as an empty one. A malformed source is fatal.
//! Keys the struct does not know are logged and dropped.
//!
//! # Editing rules
//!
//! - An empty answer keeps the current value.
//! - Booleans accept only `Y/y/N/n`; the hint's capital letter marks the
//!   current value.
//! - Invalid answers print a reason and repeat the same prompt. They never
//!   end the session.
//! - End of input, read or write failures are fatal and nothing is written.
//!
//! # Non-interactive mode
//!
//! With [`Mode::NonInteractive`] the loaded values are written to the
//! destination without reading a single line. Useful for provisioning from a
//! template in scripts.
//!
//! # Clap adapter
//!
//! The `cli` module (behind the `clap` feature, on by default) provides
//! [`EditorArgs`], ready to be flattened into an editor binary, and
//! [`GenerateArgs`], the parser of the `promptfig-gen` tool that writes such
//! a binary plus a `load_config()` helper into a project. To use promptfig
//! without clap:
//!
//! ```toml
//! promptfig = { version = "...", default-features = false }
//! ```
//!
//! # Error handling
//!
//! Fatal failures return [`PromptfigError`]. Operator mistakes are
//! [`InputError`]s, shown on the terminal and answered by re-prompting.

pub mod codec;
pub mod collection;
pub mod editor;
pub mod error;
pub mod shape;
pub mod terminal;
pub mod types;

#[cfg(feature = "clap")]
mod cli;
mod generate;
mod introspect;
mod load;
pub(crate) mod merge;
mod persist;
mod session;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "clap")]
pub use cli::{EditorArgs, GenerateArgs};
pub use codec::InputError;
pub use collection::MenuCommand;
pub use editor::edit;
pub use error::PromptfigError;
pub use generate::{Generated, GenerateOptions, generate, guess_module};
pub use introspect::shape_of;
pub use load::load_file;
pub use persist::render;
pub use session::{DEFAULT_DESTINATION, DEFAULT_TEMPLATE, Promptfig, Session};
pub use shape::{Field, ScalarKind, Shape};
pub use terminal::{Style, Terminal};
pub use types::{Mode, Source};
