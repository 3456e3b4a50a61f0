//! Structural description of an editable value.
//!
//! A [`Shape`] is computed once per record type (see [`shape_of`](crate::shape_of))
//! and then drives every later step: which prompt to render, how to parse the
//! operator's answer, and what a freshly added list or map entry looks like.

use std::fmt;

use toml::{Table, Value};

/// Kind and declared width of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Bool,
    SignedInt { width: u8 },
    UnsignedInt { width: u8 },
    Float { width: u8 },
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::String => write!(f, "string"),
            ScalarKind::Bool => write!(f, "bool"),
            ScalarKind::SignedInt { width } => write!(f, "i{width}"),
            ScalarKind::UnsignedInt { width } => write!(f, "u{width}"),
            ScalarKind::Float { width } => write!(f, "f{width}"),
        }
    }
}

/// A named field of a record, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
}

/// Tagged description of a value's structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Scalar(ScalarKind),
    List(Box<Shape>),
    Map { key: Box<Shape>, value: Box<Shape> },
    Record(Vec<Field>),
}

impl Shape {
    /// The zero value of this shape, as a document value.
    ///
    /// Used both to default fields missing from the source document and to seed
    /// new list elements and map entries before they are edited.
    pub fn zero(&self) -> Value {
        match self {
            Shape::Scalar(ScalarKind::String) => Value::String(String::new()),
            Shape::Scalar(ScalarKind::Bool) => Value::Boolean(false),
            Shape::Scalar(ScalarKind::SignedInt { .. } | ScalarKind::UnsignedInt { .. }) => {
                Value::Integer(0)
            }
            Shape::Scalar(ScalarKind::Float { .. }) => Value::Float(0.0),
            Shape::List(_) => Value::Array(Vec::new()),
            Shape::Map { .. } => Value::Table(Table::new()),
            Shape::Record(fields) => Value::Table(
                fields
                    .iter()
                    .map(|f| (f.name.to_string(), f.shape.zero()))
                    .collect(),
            ),
        }
    }

    /// Whether `value` has the document representation this shape expects.
    ///
    /// Only the outer layer is checked; nested values are checked when the
    /// editor descends into them.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Shape::Scalar(ScalarKind::String), Value::String(_))
                | (Shape::Scalar(ScalarKind::Bool), Value::Boolean(_))
                | (
                    Shape::Scalar(ScalarKind::SignedInt { .. } | ScalarKind::UnsignedInt { .. }),
                    Value::Integer(_)
                )
                | (Shape::Scalar(ScalarKind::Float { .. }), Value::Float(_))
                | (Shape::List(_), Value::Array(_))
                | (Shape::Map { .. } | Shape::Record(_), Value::Table(_))
        )
    }

    /// Fields of a record shape, or an empty slice for any other shape.
    pub fn fields(&self) -> &[Field] {
        match self {
            Shape::Record(fields) => fields,
            _ => &[],
        }
    }
}
