//! Shape derivation: a tracing serde `Deserializer` that records what each
//! field's `Deserialize` impl asks for, instead of supplying real data.
//!
//! Every `deserialize_*` call is answered with a zero value and noted in the
//! shape under construction. Structs are walked field by field in declaration
//! order, sequences yield a single traced element and maps a single traced
//! entry, which is enough to learn the element, key and value shapes.
//!
//! Kinds the editor cannot handle (options, enums, tuples, bytes, self-describing
//! values) fail here, before any session starts. A struct that re-enters itself
//! while being traced is reported as a cycle. Structs are identified by name and
//! field list, so same-named structs from different modules nest freely.

use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde::de::value::StrDeserializer;
use serde::de::{self, DeserializeOwned, DeserializeSeed, IntoDeserializer, MapAccess, SeqAccess, Visitor};

use crate::error::PromptfigError;
use crate::shape::{Field, ScalarKind, Shape};

thread_local! {
    static SHAPES: RefCell<HashMap<TypeId, Shape>> = RefCell::new(HashMap::new());
}

/// Derive the [`Shape`] of record type `T`.
///
/// The result is cached per type, so repeated calls are cheap. Failures are
/// not cached.
pub fn shape_of<T: DeserializeOwned + 'static>() -> Result<Shape, PromptfigError> {
    let id = TypeId::of::<T>();
    if let Some(shape) = SHAPES.with(|shapes| shapes.borrow().get(&id).cloned()) {
        return Ok(shape);
    }

    let shape = trace::<T>()?;
    log::debug!(
        "derived shape for {} ({} fields)",
        std::any::type_name::<T>(),
        shape.fields().len()
    );
    SHAPES.with(|shapes| shapes.borrow_mut().insert(id, shape.clone()));
    Ok(shape)
}

fn trace<T: DeserializeOwned>() -> Result<Shape, PromptfigError> {
    let mut stack: Vec<StructId> = Vec::new();
    let mut out = None;
    T::deserialize(Tracer {
        path: String::new(),
        stack: &mut stack,
        out: &mut out,
    })
    .map_err(|e| PromptfigError::unsupported(&e.path, e.reason))?;

    match out {
        Some(shape @ Shape::Record(_)) => Ok(shape),
        _ => Err(PromptfigError::unsupported(
            "",
            "the configuration type must be a struct",
        )),
    }
}

#[derive(Debug)]
struct TraceError {
    path: String,
    reason: String,
}

impl TraceError {
    fn at(path: &str, reason: impl Into<String>) -> Self {
        TraceError {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

impl std::error::Error for TraceError {}

impl de::Error for TraceError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        TraceError {
            path: String::new(),
            reason: msg.to_string(),
        }
    }
}

fn dotted(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// A struct's name and declared field names.
type StructId = (&'static str, &'static [&'static str]);

struct Tracer<'a> {
    path: String,
    /// Structs currently being traced, outermost first.
    stack: &'a mut Vec<StructId>,
    out: &'a mut Option<Shape>,
}

impl Tracer<'_> {
    fn scalar(self, kind: ScalarKind) {
        *self.out = Some(Shape::Scalar(kind));
    }

    fn reject<T>(self, what: &str) -> Result<T, TraceError> {
        Err(TraceError::at(&self.path, format!("{what} are not supported")))
    }

    /// Attach the current path to errors raised by a visitor.
    fn locate(path: &str, err: TraceError) -> TraceError {
        if err.path.is_empty() {
            TraceError::at(path, err.reason)
        } else {
            err
        }
    }
}

impl<'de> de::Deserializer<'de> for Tracer<'_> {
    type Error = TraceError;

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        let path = self.path.clone();
        self.scalar(ScalarKind::Bool);
        visitor.visit_bool(false).map_err(|e| Self::locate(&path, e))
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        self.scalar(ScalarKind::SignedInt { width: 8 });
        visitor.visit_i8(0)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        self.scalar(ScalarKind::SignedInt { width: 16 });
        visitor.visit_i16(0)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        self.scalar(ScalarKind::SignedInt { width: 32 });
        visitor.visit_i32(0)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        self.scalar(ScalarKind::SignedInt { width: 64 });
        visitor.visit_i64(0)
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        self.scalar(ScalarKind::UnsignedInt { width: 8 });
        visitor.visit_u8(0)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        self.scalar(ScalarKind::UnsignedInt { width: 16 });
        visitor.visit_u16(0)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        self.scalar(ScalarKind::UnsignedInt { width: 32 });
        visitor.visit_u32(0)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        self.scalar(ScalarKind::UnsignedInt { width: 64 });
        visitor.visit_u64(0)
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        self.scalar(ScalarKind::Float { width: 32 });
        visitor.visit_f32(0.0)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        self.scalar(ScalarKind::Float { width: 64 });
        visitor.visit_f64(0.0)
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        let path = self.path.clone();
        self.scalar(ScalarKind::String);
        // Types parsed from strings (addresses, URLs) reject the empty zero value.
        visitor.visit_str("").map_err(|e| Self::locate(&path, e))
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        self.deserialize_str(visitor)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        let mut access = ElementTrace {
            path: format!("{}[]", self.path),
            stack: self.stack,
            shape: None,
        };
        let value = visitor.visit_seq(&mut access)?;
        let element = access
            .shape
            .ok_or_else(|| TraceError::at(&self.path, "sequence element was never read"))?;
        *self.out = Some(Shape::List(Box::new(element)));
        Ok(value)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, TraceError> {
        let mut access = EntryTrace {
            path: self.path.clone(),
            stack: self.stack,
            key: None,
            value: None,
            done: false,
        };
        let value = visitor.visit_map(&mut access)?;
        let (Some(key), Some(entry)) = (access.key, access.value) else {
            return Err(TraceError::at(&self.path, "map entry was never read"));
        };
        if key != Shape::Scalar(ScalarKind::String) {
            return Err(TraceError::at(&self.path, "map keys must be strings"));
        }
        *self.out = Some(Shape::Map {
            key: Box::new(key),
            value: Box::new(entry),
        });
        Ok(value)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, TraceError> {
        if self
            .stack
            .iter()
            .any(|&(other, other_fields)| other == name && other_fields == fields)
        {
            return Err(TraceError::at(
                &self.path,
                format!("struct {name} contains itself"),
            ));
        }

        self.stack.push((name, fields));
        let mut access = FieldTrace {
            path: &self.path,
            names: fields,
            next: 0,
            stack: &mut *self.stack,
            fields: Vec::with_capacity(fields.len()),
        };
        let value = visitor
            .visit_map(&mut access)
            .map_err(|e| Self::locate(&self.path, e))?;
        let traced = access.fields;
        self.stack.pop();

        *self.out = Some(Shape::Record(traced));
        Ok(value)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, TraceError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_option<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, TraceError> {
        self.reject("optional fields")
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, TraceError> {
        self.reject("enums")
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, _visitor: V) -> Result<V::Value, TraceError> {
        self.reject("tuples and fixed-size arrays")
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value, TraceError> {
        self.reject("tuple structs")
    }

    fn deserialize_unit<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, TraceError> {
        self.reject("unit values")
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _visitor: V,
    ) -> Result<V::Value, TraceError> {
        self.reject("unit structs")
    }

    fn deserialize_char<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, TraceError> {
        self.reject("char fields")
    }

    fn deserialize_i128<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, TraceError> {
        self.reject("128-bit integers")
    }

    fn deserialize_u128<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, TraceError> {
        self.reject("128-bit integers")
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, TraceError> {
        self.reject("byte buffers")
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, TraceError> {
        self.reject("byte buffers")
    }

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, TraceError> {
        self.reject("self-describing values")
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, TraceError> {
        self.reject("identifiers")
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, TraceError> {
        self.reject("ignored values")
    }
}

// --- Struct fields ---

struct FieldTrace<'a> {
    path: &'a str,
    names: &'static [&'static str],
    next: usize,
    stack: &'a mut Vec<StructId>,
    fields: Vec<Field>,
}

impl<'de> MapAccess<'de> for FieldTrace<'_> {
    type Error = TraceError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, TraceError> {
        let Some(&name) = self.names.get(self.next) else {
            return Ok(None);
        };
        let key: StrDeserializer<'static, TraceError> = name.into_deserializer();
        seed.deserialize(key).map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, TraceError> {
        let name = self.names[self.next];
        self.next += 1;

        let path = dotted(self.path, name);
        let mut shape = None;
        let value = seed.deserialize(Tracer {
            path: path.clone(),
            stack: &mut *self.stack,
            out: &mut shape,
        })?;
        let shape = shape.ok_or_else(|| TraceError::at(&path, "field was never read"))?;
        self.fields.push(Field { name, shape });
        Ok(value)
    }
}

// --- Sequence element ---

struct ElementTrace<'a> {
    path: String,
    stack: &'a mut Vec<StructId>,
    shape: Option<Shape>,
}

impl<'de> SeqAccess<'de> for ElementTrace<'_> {
    type Error = TraceError;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, TraceError> {
        if self.shape.is_some() {
            return Ok(None);
        }
        let value = seed.deserialize(Tracer {
            path: self.path.clone(),
            stack: &mut *self.stack,
            out: &mut self.shape,
        })?;
        Ok(Some(value))
    }
}

// --- Map entry ---

struct EntryTrace<'a> {
    path: String,
    stack: &'a mut Vec<StructId>,
    key: Option<Shape>,
    value: Option<Shape>,
    done: bool,
}

impl<'de> MapAccess<'de> for EntryTrace<'_> {
    type Error = TraceError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, TraceError> {
        if self.done {
            return Ok(None);
        }
        self.done = true;
        let key = seed.deserialize(Tracer {
            path: format!("{}{{key}}", self.path),
            stack: &mut *self.stack,
            out: &mut self.key,
        })?;
        Ok(Some(key))
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, TraceError> {
        seed.deserialize(Tracer {
            path: format!("{}{{}}", self.path),
            stack: &mut *self.stack,
            out: &mut self.value,
        })
    }
}
