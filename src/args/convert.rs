//! Converter table: one pure conversion function per [`TypeTag`].
//!
//! A converter returns `Ok(None)` when the literal means "leave unset" (an optional
//! parameter given `None`).

use crate::args::tokenize::RawValue;
use crate::error::ConversionError;
use crate::types::{TypeTag, Value};
use rust_decimal::Decimal;
use std::str::FromStr;

pub type Converter = fn(&RawValue) -> Result<Option<Value>, ConversionError>;

/// Look up the converter for a declared type.
pub fn converter(tag: TypeTag) -> Converter {
    match tag {
        TypeTag::Bool => to_bool,
        TypeTag::Int => to_int,
        TypeTag::Float => to_float,
        TypeTag::Decimal => to_decimal,
        TypeTag::String => to_text,
        TypeTag::OptionalBool => to_optional_bool,
        TypeTag::OptionalOther => to_optional_text,
        TypeTag::Untyped => to_text,
    }
}

/// Convert a raw value to the declared type.
pub fn coerce(tag: TypeTag, raw: &RawValue) -> Result<Option<Value>, ConversionError> {
    converter(tag)(raw)
}

fn to_bool(raw: &RawValue) -> Result<Option<Value>, ConversionError> {
    if let Some(value) = raw.as_bool() {
        return Ok(Some(Value::Bool(value)));
    }
    let text = raw.text().trim();
    match text.to_ascii_lowercase().as_str() {
        "true" | "t" => Ok(Some(Value::Bool(true))),
        "false" | "f" => Ok(Some(Value::Bool(false))),
        _ => Err(ConversionError::new(text, TypeTag::Bool)),
    }
}

fn to_optional_bool(raw: &RawValue) -> Result<Option<Value>, ConversionError> {
    if is_none_literal(raw) {
        return Ok(None);
    }
    to_bool(raw).map_err(|e| ConversionError::new(e.literal, TypeTag::OptionalBool))
}

fn to_int(raw: &RawValue) -> Result<Option<Value>, ConversionError> {
    let text = numeric_text(raw, TypeTag::Int)?;
    text.parse::<i64>()
        .map(|i| Some(Value::Int(i)))
        .map_err(|_| ConversionError::new(raw.text(), TypeTag::Int))
}

fn to_float(raw: &RawValue) -> Result<Option<Value>, ConversionError> {
    let text = numeric_text(raw, TypeTag::Float)?;
    text.parse::<f64>()
        .map(|x| Some(Value::Float(x)))
        .map_err(|_| ConversionError::new(raw.text(), TypeTag::Float))
}

fn to_decimal(raw: &RawValue) -> Result<Option<Value>, ConversionError> {
    let text = numeric_text(raw, TypeTag::Decimal)?;
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(|d| Some(Value::Decimal(d)))
        .map_err(|_| ConversionError::new(raw.text(), TypeTag::Decimal))
}

fn to_text(raw: &RawValue) -> Result<Option<Value>, ConversionError> {
    Ok(Some(Value::Str(raw.text().to_string())))
}

fn to_optional_text(raw: &RawValue) -> Result<Option<Value>, ConversionError> {
    if is_none_literal(raw) {
        return Ok(None);
    }
    to_text(raw)
}

/// Numbers never come from boolean literals or bare switches.
fn numeric_text(raw: &RawValue, expected: TypeTag) -> Result<&str, ConversionError> {
    match raw {
        RawValue::Text(text) => Ok(text.trim()),
        other => Err(ConversionError::new(other.text(), expected)),
    }
}

fn is_none_literal(raw: &RawValue) -> bool {
    matches!(raw, RawValue::Text(text) if text == "None" || text == "none")
}
