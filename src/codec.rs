//! Scalar codec: operator text in, document value out.
//!
//! Empty input always means "keep the previous value" and is never an error.
//! Everything the operator can get wrong is an [`InputError`], which the
//! editor shows before asking the same question again.

use std::num::IntErrorKind;

use thiserror::Error;
use toml::Value;

use crate::shape::ScalarKind;

/// A recoverable operator mistake. The session never aborts because of one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Invalid value, only Y/y/N/n allowed.")]
    Format,

    #[error("Error parsing {what}. Wrong syntax.")]
    Syntax { what: &'static str },

    #[error("Error parsing {what}. Value out of range, destination type is {kind}.")]
    Range {
        what: &'static str,
        kind: ScalarKind,
    },

    #[error("Index out of bounds. Index must be between 0 and {len}")]
    IndexOutOfBounds { len: usize },

    #[error("Key not found.")]
    KeyNotFound,

    #[error("Unknown operation. Only A/a/R/r/P/p/N/n are allowed.")]
    UnknownCommand,

    #[error("Invalid input, text must be valid UTF-8.")]
    Encoding,
}

/// Parse operator input for a scalar of `kind`.
///
/// Returns `Ok(None)` for empty input (keep the current value).
pub fn parse(kind: ScalarKind, text: &str) -> Result<Option<Value>, InputError> {
    if text.is_empty() {
        return Ok(None);
    }

    let value = match kind {
        ScalarKind::String => Value::String(text.to_string()),
        ScalarKind::Bool => match text.to_ascii_lowercase().as_str() {
            "y" => Value::Boolean(true),
            "n" => Value::Boolean(false),
            _ => return Err(InputError::Format),
        },
        ScalarKind::SignedInt { width } => Value::Integer(parse_signed(text, width, kind)?),
        ScalarKind::UnsignedInt { width } => Value::Integer(parse_unsigned(text, width, kind)?),
        ScalarKind::Float { width } => Value::Float(parse_float(text, width, kind)?),
    };
    Ok(Some(value))
}

fn int_error(err: &std::num::ParseIntError, what: &'static str, kind: ScalarKind) -> InputError {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => InputError::Range { what, kind },
        _ => InputError::Syntax { what },
    }
}

fn parse_signed(text: &str, width: u8, kind: ScalarKind) -> Result<i64, InputError> {
    const WHAT: &str = "integer";
    let parsed: i128 = text.parse().map_err(|e| int_error(&e, WHAT, kind))?;

    let max = (1i128 << (width - 1)) - 1;
    let min = -(1i128 << (width - 1));
    if parsed < min || parsed > max {
        return Err(InputError::Range { what: WHAT, kind });
    }
    Ok(parsed as i64)
}

fn parse_unsigned(text: &str, width: u8, kind: ScalarKind) -> Result<i64, InputError> {
    const WHAT: &str = "unsigned integer";
    let parsed: u128 = text.parse().map_err(|e| int_error(&e, WHAT, kind))?;

    // Document integers are signed 64-bit, which caps u64 fields at i64::MAX.
    let max = ((1u128 << width) - 1).min(i64::MAX as u128);
    if parsed > max {
        return Err(InputError::Range { what: WHAT, kind });
    }
    Ok(parsed as i64)
}

fn parse_float(text: &str, width: u8, kind: ScalarKind) -> Result<f64, InputError> {
    const WHAT: &str = "float";
    let parsed: f64 = text.parse().map_err(|_| InputError::Syntax { what: WHAT })?;

    if parsed.is_infinite() && !names_infinity(text) {
        return Err(InputError::Range { what: WHAT, kind });
    }
    if width == 32 && parsed.is_finite() && (parsed as f32).is_infinite() {
        return Err(InputError::Range { what: WHAT, kind });
    }
    Ok(parsed)
}

fn names_infinity(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Render a document value for display next to a prompt.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => display_nested(other),
    }
}

fn display_nested(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{s:?}"),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(d) => d.to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(display_nested).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Table(table) => {
            let entries: Vec<String> = table
                .iter()
                .map(|(k, v)| format!("{k} = {}", display_nested(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// The `Y/n` hint, capitalizing the current choice.
pub fn bool_hint(current: bool) -> &'static str {
    if current { "Y/n" } else { "y/N" }
}

#[cfg(test)]
mod tests {
    use super::*;

    const I16: ScalarKind = ScalarKind::SignedInt { width: 16 };
    const I32: ScalarKind = ScalarKind::SignedInt { width: 32 };
    const I64: ScalarKind = ScalarKind::SignedInt { width: 64 };
    const U8: ScalarKind = ScalarKind::UnsignedInt { width: 8 };
    const U64: ScalarKind = ScalarKind::UnsignedInt { width: 64 };
    const F32: ScalarKind = ScalarKind::Float { width: 32 };
    const F64: ScalarKind = ScalarKind::Float { width: 64 };

    #[test]
    fn empty_input_keeps_every_kind() {
        for kind in [ScalarKind::String, ScalarKind::Bool, I32, U8, F64] {
            assert_eq!(parse(kind, ""), Ok(None), "kind {kind}");
        }
    }

    #[test]
    fn string_is_taken_verbatim() {
        assert_eq!(
            parse(ScalarKind::String, " spaced out "),
            Ok(Some(Value::String(" spaced out ".into())))
        );
    }

    #[test]
    fn bool_accepts_y_and_n_in_any_case() {
        assert_eq!(parse(ScalarKind::Bool, "y"), Ok(Some(Value::Boolean(true))));
        assert_eq!(parse(ScalarKind::Bool, "Y"), Ok(Some(Value::Boolean(true))));
        assert_eq!(parse(ScalarKind::Bool, "n"), Ok(Some(Value::Boolean(false))));
        assert_eq!(parse(ScalarKind::Bool, "N"), Ok(Some(Value::Boolean(false))));
    }

    #[test]
    fn bool_rejects_words() {
        assert_eq!(parse(ScalarKind::Bool, "yes"), Err(InputError::Format));
        assert_eq!(parse(ScalarKind::Bool, "true"), Err(InputError::Format));
    }

    #[test]
    fn signed_range_follows_width() {
        assert_eq!(parse(I16, "32767"), Ok(Some(Value::Integer(32767))));
        assert_eq!(parse(I16, "-32768"), Ok(Some(Value::Integer(-32768))));
        assert!(matches!(parse(I16, "99999"), Err(InputError::Range { .. })));
        assert!(matches!(parse(I16, "-32769"), Err(InputError::Range { .. })));
    }

    #[test]
    fn signed_64_bit_bounds() {
        assert_eq!(
            parse(I64, "-9223372036854775808"),
            Ok(Some(Value::Integer(i64::MIN)))
        );
        assert!(matches!(
            parse(I64, "9223372036854775808"),
            Err(InputError::Range { .. })
        ));
        assert!(matches!(
            parse(I64, "99999999999999999999999999999999999999999"),
            Err(InputError::Range { .. })
        ));
    }

    #[test]
    fn malformed_integer_is_syntax_error() {
        assert_eq!(
            parse(I32, "12abc"),
            Err(InputError::Syntax { what: "integer" })
        );
        assert_eq!(
            parse(U8, "-1"),
            Err(InputError::Syntax {
                what: "unsigned integer"
            })
        );
    }

    #[test]
    fn unsigned_range_follows_width() {
        assert_eq!(parse(U8, "255"), Ok(Some(Value::Integer(255))));
        assert!(matches!(parse(U8, "256"), Err(InputError::Range { .. })));
    }

    #[test]
    fn unsigned_64_capped_by_document_integers() {
        assert_eq!(
            parse(U64, "9223372036854775807"),
            Ok(Some(Value::Integer(i64::MAX)))
        );
        assert!(matches!(
            parse(U64, "9223372036854775808"),
            Err(InputError::Range { .. })
        ));
    }

    #[test]
    fn float_parsing() {
        assert_eq!(parse(F64, "1.5"), Ok(Some(Value::Float(1.5))));
        assert_eq!(parse(F64, "abc"), Err(InputError::Syntax { what: "float" }));
        assert!(matches!(parse(F64, "1e400"), Err(InputError::Range { .. })));
    }

    #[test]
    fn float_32_overflow_is_range_error() {
        assert!(matches!(parse(F32, "1e39"), Err(InputError::Range { .. })));
        assert!(parse(F64, "1e39").is_ok());
    }

    #[test]
    fn explicit_infinity_is_accepted() {
        assert_eq!(parse(F32, "inf"), Ok(Some(Value::Float(f64::INFINITY))));
        assert_eq!(
            parse(F64, "-infinity"),
            Ok(Some(Value::Float(f64::NEG_INFINITY)))
        );
    }

    #[test]
    fn range_error_names_destination_type() {
        let err = parse(I16, "99999").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error parsing integer. Value out of range, destination type is i16."
        );
    }

    #[test]
    fn display_renders_without_quotes_at_top_level() {
        assert_eq!(display(&Value::String("localhost".into())), "localhost");
        assert_eq!(display(&Value::Integer(5)), "5");
        assert_eq!(
            display(&Value::Array(vec![
                Value::String("a".into()),
                Value::String("b".into())
            ])),
            "[\"a\", \"b\"]"
        );
    }

    #[test]
    fn bool_hint_capitalizes_current() {
        assert_eq!(bool_hint(true), "Y/n");
        assert_eq!(bool_hint(false), "y/N");
    }
}
