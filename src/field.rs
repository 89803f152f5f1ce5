//! Named-field access for models and DTOs.
//!
//! Every model and DTO that takes part in a uniqueness check implements [`Fields`] by hand,
//! mapping snake_case field names to [`FieldValue`]s. Lookups by name go through
//! [`property_value`], which normalizes the requested name and reports unknown or null fields.

use crate::case::to_snake_case;
use crate::error::FieldError;

/// Dynamically typed value of one field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v.into())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(v: &String) -> Self {
        FieldValue::Text(v.clone())
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Coercion from a non-null [`FieldValue`] to a concrete type.
pub trait FromFieldValue: Sized {
    const EXPECTED: &'static str;

    fn from_field_value(value: FieldValue) -> Option<Self>;
}

impl FromFieldValue for FieldValue {
    const EXPECTED: &'static str = "any";

    fn from_field_value(value: FieldValue) -> Option<Self> {
        Some(value)
    }
}

impl FromFieldValue for String {
    const EXPECTED: &'static str = "text";

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl FromFieldValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(n) => Some(n),
            _ => None,
        }
    }
}

impl FromFieldValue for i32 {
    const EXPECTED: &'static str = "int";

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(n) => i32::try_from(n).ok(),
            _ => None,
        }
    }
}

impl FromFieldValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl FromFieldValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(f) => Some(f),
            FieldValue::Int(n) => Some(n as f64),
            _ => None,
        }
    }
}

/// Compile-time field accessors, keyed by snake_case name.
pub trait Fields {
    /// Name used in lookup error messages.
    fn type_name(&self) -> &'static str;

    /// `None` when the type has no field called `name`.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Read the field `name` off `obj`, coerced to `T`.
///
/// `name` may be given in camelCase, PascalCase or snake_case.
pub fn property_value<T, O>(obj: &O, name: &str) -> Result<T, FieldError>
where
    T: FromFieldValue,
    O: Fields + ?Sized,
{
    let type_name = obj.type_name();
    let value = obj
        .field(&to_snake_case(name))
        .ok_or_else(|| FieldError::NotFound {
            type_name,
            field: name.to_string(),
        })?;
    if value.is_null() {
        return Err(FieldError::MissingValue {
            type_name,
            field: name.to_string(),
        });
    }
    let found = value.kind();
    T::from_field_value(value).ok_or_else(|| FieldError::TypeMismatch {
        type_name,
        field: name.to_string(),
        expected: T::EXPECTED,
        found,
    })
}

/// Untyped variant of [`property_value`]: the non-null value as stored.
pub fn property<O: Fields + ?Sized>(obj: &O, name: &str) -> Result<FieldValue, FieldError> {
    property_value::<FieldValue, O>(obj, name)
}
