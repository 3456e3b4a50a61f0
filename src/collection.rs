//! Modal editing of lists and maps.
//!
//! Each collection gets the same small menu: `(A)dd`, `(R)emove`, `(P)urge`
//! and `(N)ext`. New entries start from the zero value of their shape and are
//! edited through [`editor::edit`] before they are stored, so a half-entered
//! element never shows up in the collection. The loop only ends on `Next` (or
//! a blank answer) and on a failure of the operator channel.

use std::io::{BufRead, Write};
use std::num::IntErrorKind;

use toml::{Table, Value};

use crate::codec::{self, InputError};
use crate::editor::{self, Path};
use crate::error::PromptfigError;
use crate::shape::Shape;
use crate::terminal::{Style, Terminal};

const SEPARATOR: &str = "---------------";

/// One instruction of the collection menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Add,
    Remove,
    Purge,
    Next,
}

impl MenuCommand {
    /// Parse a menu answer. Blank means `Next`; letters are case-insensitive.
    pub fn parse(text: &str) -> Result<Self, InputError> {
        match text.to_ascii_lowercase().as_str() {
            "" | "n" => Ok(MenuCommand::Next),
            "a" => Ok(MenuCommand::Add),
            "r" => Ok(MenuCommand::Remove),
            "p" => Ok(MenuCommand::Purge),
            _ => Err(InputError::UnknownCommand),
        }
    }
}

fn menu(has_entries: bool) -> &'static str {
    if has_entries {
        "(A)dd/(R)emove/(P)urge/(N)ext (N): "
    } else {
        "(A)dd/(P)urge/(N)ext (N): "
    }
}

/// Show the header, the current entries and the menu; return the parsed answer.
fn ask<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    path: &Path,
    heading: &str,
    entries: Vec<String>,
) -> Result<Result<MenuCommand, InputError>, PromptfigError> {
    let label = term.paint(Style::Label, &format!("{path}:"));
    term.line(&label)?;
    term.indented(|t| {
        if !entries.is_empty() {
            t.styled(Style::Hint, heading)?;
            t.indented(|t| {
                for entry in &entries {
                    t.styled(Style::Hint, entry)?;
                }
                Ok(())
            })?;
        }
        let prompt = t.paint(Style::Hint, menu(!entries.is_empty()));
        t.prompt(&prompt)?;
        Ok(t.read_line()?.and_then(|line| MenuCommand::parse(&line)))
    })
}

fn separator<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> Result<(), PromptfigError> {
    term.indented(|t| t.styled(Style::Hint, SEPARATOR))
}

/// Edit an ordered list in place.
pub fn edit_list<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    path: &Path,
    element: &Shape,
    items: &mut Vec<Value>,
) -> Result<(), PromptfigError> {
    loop {
        let entries = items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{i}: {}", codec::display(item)))
            .collect();
        let command = match ask(term, path, "Existing values (index : value):", entries)? {
            Ok(command) => command,
            Err(err) => {
                term.indented(|t| t.reject(&err))?;
                separator(term)?;
                continue;
            }
        };

        match command {
            MenuCommand::Next => return Ok(()),
            MenuCommand::Purge => items.clear(),
            MenuCommand::Add => {
                let mut item = element.zero();
                let item_path = path.index(items.len());
                term.indented(|t| editor::edit(t, &item_path, element, &mut item))?;
                items.push(item);
            }
            MenuCommand::Remove => {
                let len = items.len();
                let removed = term.indented(|t| {
                    let prompt = t.paint(Style::Hint, "Index to remove: ");
                    t.prompt(&prompt)?;
                    let answer = t.read_line()?;
                    if answer.as_deref() == Ok("") {
                        return Ok(None);
                    }
                    match answer.and_then(|line| parse_index(&line, len)) {
                        Ok(index) => Ok(Some(index)),
                        Err(err) => {
                            t.reject(&err)?;
                            Ok(None)
                        }
                    }
                })?;
                if let Some(index) = removed {
                    items.remove(index);
                }
            }
        }
        separator(term)?;
    }
}

/// Parse a list index; anything outside `[0, len)` is out of bounds.
fn parse_index(text: &str, len: usize) -> Result<usize, InputError> {
    let index: i128 = text.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            InputError::IndexOutOfBounds { len }
        }
        _ => InputError::Syntax { what: "integer" },
    })?;
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(InputError::IndexOutOfBounds { len })
}

/// Edit an associative map in place. Keys stay unique: adding an existing key
/// replaces its value.
pub fn edit_map<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    path: &Path,
    key_shape: &Shape,
    value_shape: &Shape,
    entries: &mut Table,
) -> Result<(), PromptfigError> {
    loop {
        let listing = entries
            .iter()
            .map(|(k, v)| format!("{k} : {}", codec::display(v)))
            .collect();
        let command = match ask(term, path, "Existing values (key : value):", listing)? {
            Ok(command) => command,
            Err(err) => {
                term.indented(|t| t.reject(&err))?;
                separator(term)?;
                continue;
            }
        };

        match command {
            MenuCommand::Next => return Ok(()),
            MenuCommand::Purge => entries.clear(),
            MenuCommand::Add => {
                let (key, value) = term.indented(|t| {
                    let mut key = key_shape.zero();
                    editor::edit(t, &path.key("<new key>"), key_shape, &mut key)?;
                    let key = codec::display(&key);

                    let mut value = value_shape.zero();
                    editor::edit(t, &path.key(&key), value_shape, &mut value)?;
                    Ok((key, value))
                })?;
                entries.insert(key, value);
            }
            MenuCommand::Remove => {
                let key = term.indented(|t| {
                    let mut key = key_shape.zero();
                    editor::edit(t, &path.key("<key to remove>"), key_shape, &mut key)?;
                    Ok(codec::display(&key))
                })?;
                // Blank cancels, even when the map holds an empty key.
                if !key.is_empty() && entries.remove(&key).is_none() {
                    term.indented(|t| t.reject(&InputError::KeyNotFound))?;
                }
            }
        }
        separator(term)?;
    }
}
