//! Recursive value editor.
//!
//! [`edit`] walks a value according to its [`Shape`], asking the operator for
//! every scalar, descending into records field by field and handing lists and
//! maps to the [collection editor](crate::collection). The slot is mutated in
//! place. Bad answers are reported and asked again; the only error that
//! escapes is a failure of the operator channel itself.

use std::fmt;
use std::io::{BufRead, Write};

use toml::Value;

use crate::codec;
use crate::collection;
use crate::error::PromptfigError;
use crate::shape::{ScalarKind, Shape};
use crate::terminal::{Style, Terminal};

/// One step from a value to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

/// Location of a slot inside the value tree, rendered dotted (`server.ports.0`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn field(&self, name: &str) -> Path {
        self.join(Segment::Field(name.to_string()))
    }

    pub fn index(&self, index: usize) -> Path {
        self.join(Segment::Index(index))
    }

    pub fn key(&self, key: &str) -> Path {
        self.join(Segment::Key(key.to_string()))
    }

    fn join(&self, segment: Segment) -> Path {
        let mut segments = self.0.clone();
        segments.push(segment);
        Path(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match segment {
                Segment::Field(name) | Segment::Key(name) => write!(f, "{name}")?,
                Segment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}

/// Edit `slot` until it holds an accepted value of `shape`.
///
/// A slot whose current value does not match the shape (for example a string
/// where the type wants an integer) is reset to the shape's zero value first.
pub fn edit<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    path: &Path,
    shape: &Shape,
    slot: &mut Value,
) -> Result<(), PromptfigError> {
    if !shape.accepts(slot) {
        log::warn!("{path}: value does not match its type, starting from zero");
        *slot = shape.zero();
    }

    match (shape, slot) {
        (Shape::Scalar(kind), slot) => edit_scalar(term, path, *kind, slot),
        (Shape::Record(_), Value::Table(table)) => {
            if path.is_root() {
                edit_fields(term, path, shape, table)
            } else {
                let label = term.paint(Style::Label, &format!("{path}:"));
                term.line(&label)?;
                term.indented(|t| edit_fields(t, path, shape, table))
            }
        }
        (Shape::List(element), Value::Array(items)) => {
            collection::edit_list(term, path, element, items)
        }
        (Shape::Map { key, value }, Value::Table(entries)) => {
            collection::edit_map(term, path, key, value, entries)
        }
        // `accepts` guarantees the representation matches the shape.
        _ => unreachable!("slot at {path} does not match its shape"),
    }
}

fn edit_fields<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    path: &Path,
    shape: &Shape,
    table: &mut toml::Table,
) -> Result<(), PromptfigError> {
    for field in shape.fields() {
        let slot = table
            .entry(field.name)
            .or_insert_with(|| field.shape.zero());
        edit(term, &path.field(field.name), &field.shape, slot)?;
    }
    Ok(())
}

fn edit_scalar<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    path: &Path,
    kind: ScalarKind,
    slot: &mut Value,
) -> Result<(), PromptfigError> {
    loop {
        let current = match (kind, &*slot) {
            (ScalarKind::Bool, Value::Boolean(b)) => codec::bool_hint(*b).to_string(),
            (_, value) => codec::display(value),
        };
        let prompt = format!(
            "{}{}{}",
            term.paint(Style::Label, &path.to_string()),
            term.paint(Style::Hint, &format!(" ({current})")),
            term.paint(Style::Label, ": "),
        );
        term.prompt(&prompt)?;

        let answer = term.read_line()?;
        match answer.and_then(|line| codec::parse(kind, &line)) {
            Ok(Some(value)) => {
                *slot = value;
                return Ok(());
            }
            Ok(None) => return Ok(()),
            Err(err) => term.reject(&err)?,
        }
    }
}
