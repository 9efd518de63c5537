//! Values bound to variable placeholders.

use serde_json::Value;

use crate::error::TermError;

/// A value sent to the database alongside a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns the value as an SQL literal, for display and logs.
    ///
    /// Quotes inside text are doubled.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(true) => String::from("TRUE"),
            Self::Bool(false) => String::from("FALSE"),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("X'{hex}'")
            }
        }
    }

    /// Converts the value to JSON. Blobs become arrays of bytes.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(n) => Value::from(*n),
            Self::Float(f) => Value::from(*f),
            Self::Text(s) => Value::String(s.clone()),
            Self::Blob(b) => Value::from(b.clone()),
        }
    }
}

impl TryFrom<&Value> for SqlValue {
    type Error = TermError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Err(TermError::IntegerOutOfRange(u))
                } else {
                    n.as_f64()
                        .map(Self::Float)
                        .ok_or_else(|| TermError::UnsupportedValue(n.to_string()))
                }
            }
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => {
                Err(TermError::UnsupportedValue(value.to_string()))
            }
        }
    }
}

/// Conversion into a bound value.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

macro_rules! impl_to_sql_value {
    ($variant:ident: $($ty:ty),+ => $convert:expr) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::$variant($convert(self))
                }
            }
        )+
    };
}

impl_to_sql_value!(Int: i8, i16, i32, i64, u8, u16, u32 => i64::from);
impl_to_sql_value!(Float: f32, f64 => f64::from);
impl_to_sql_value!(Bool: bool => std::convert::identity);
impl_to_sql_value!(Text: String, &str, &String => String::from);
impl_to_sql_value!(Blob: Vec<u8>, &[u8] => Vec::from);

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        self.map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}
