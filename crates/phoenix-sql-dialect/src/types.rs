//! Column type mapping.
//!
//! See <https://phoenix.apache.org/language/datatypes.html>.

use core::fmt;

/// Length used when a sized type does not specify one.
pub const DEFAULT_LENGTH: u32 = 255;
/// Precision used when a decimal type does not specify one.
pub const DEFAULT_PRECISION: u16 = 19;
/// Scale used when a decimal type does not specify one.
pub const DEFAULT_SCALE: u16 = 2;

/// Portable column types an ORM maps entity fields to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    // Boolean
    /// Single bit.
    Bit,
    /// Boolean.
    Boolean,

    // Integer types
    /// Tiny integer (1 byte).
    TinyInt,
    /// Small integer (2 bytes).
    SmallInt,
    /// Integer (4 bytes).
    Integer,
    /// Big integer (8 bytes).
    BigInt,

    // Floating point
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
    /// Numeric with precision and scale.
    Numeric {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },
    /// Decimal with precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },

    // String types
    /// Single character.
    Char,
    /// Variable-length character string.
    Varchar(Option<u32>),

    // Binary types
    /// Fixed-length binary.
    Binary(Option<u32>),
    /// Variable-length binary.
    VarBinary,

    // Date/time types
    /// Date.
    Date,
    /// Time.
    Time,
    /// Timestamp.
    Timestamp,

    /// Array with an optional fixed length.
    Array(Option<u32>),
}

/// Maps a portable type to the Phoenix column type.
#[must_use]
pub fn column_type(ty: SqlType) -> String {
    match ty {
        SqlType::Bit | SqlType::Boolean => String::from("boolean"),
        SqlType::TinyInt => String::from("tinyint"),
        SqlType::SmallInt => String::from("smallint"),
        SqlType::Integer => String::from("integer"),
        SqlType::BigInt => String::from("bigint"),
        SqlType::Float => String::from("float"),
        SqlType::Double => String::from("double"),
        SqlType::Numeric { precision, scale } | SqlType::Decimal { precision, scale } => format!(
            "decimal({},{})",
            precision.unwrap_or(DEFAULT_PRECISION),
            scale.unwrap_or(DEFAULT_SCALE)
        ),
        SqlType::Char => String::from("char(1)"),
        SqlType::Varchar(len) => format!("varchar({})", len.unwrap_or(DEFAULT_LENGTH)),
        SqlType::Binary(len) => format!("binary({})", len.unwrap_or(DEFAULT_LENGTH)),
        SqlType::VarBinary => String::from("varbinary"),
        SqlType::Date => String::from("date"),
        SqlType::Time => String::from("time"),
        SqlType::Timestamp => String::from("timestamp"),
        SqlType::Array(len) => format!("array[{}]", len.unwrap_or(DEFAULT_LENGTH)),
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&column_type(*self))
    }
}
