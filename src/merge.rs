use toml::Value;

use crate::shape::Shape;

/// Overlay a source `document` on top of `base`, guided by `shape`.
///
/// Records recurse field by field, so keys missing from the document keep the
/// base value. Any other shape is replaced wholesale by the document's value:
/// a list or map in the source is taken as the complete collection. Keys the
/// shape does not know are carried over untouched, leaving it to the typed
/// decode to report them.
pub fn overlay(shape: &Shape, base: Value, document: Value) -> Value {
    match (shape, base, document) {
        (Shape::Record(fields), Value::Table(mut base), Value::Table(document)) => {
            for (key, doc_val) in document {
                let merged = match (fields.iter().find(|f| f.name == key), base.remove(&key)) {
                    (Some(field), Some(base_val)) => overlay(&field.shape, base_val, doc_val),
                    _ => doc_val,
                };
                base.insert(key, merged);
            }
            Value::Table(base)
        }
        (_, _, document) => document,
    }
}
