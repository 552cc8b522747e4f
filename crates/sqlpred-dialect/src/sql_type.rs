//! Semantic SQL types used to select a quoting rule.

/// The semantic type a literal is rendered as.
///
/// This is the closed set a [`Dialect`](crate::Dialect) knows how to
/// quote. Each value carries its natural type (see
/// [`Value::sql_type`](crate::Value::sql_type)); callers may ask for a
/// different one, e.g. an enum name held as text is quoted as
/// [`SqlType::EnumName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// Character data.
    Text,
    /// Whole numbers.
    Integer,
    /// Fractional numbers.
    Float,
    /// Booleans, spelled per dialect.
    Boolean,
    /// Date and time.
    DateTime,
    /// The symbolic name of an enum member, stored as text.
    EnumName,
    /// The `null` literal.
    Null,
}

impl SqlType {
    /// Returns the display name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            SqlType::Text => "text",
            SqlType::Integer => "integer",
            SqlType::Float => "float",
            SqlType::Boolean => "boolean",
            SqlType::DateTime => "datetime",
            SqlType::EnumName => "enum name",
            SqlType::Null => "null",
        }
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
