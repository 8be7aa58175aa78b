use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic data type of a field.
///
/// Declared schema types that have no dedicated variant are carried
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Enum,
    String,
    Citext,
    Text,
    Integer,
    Float,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Time,
    Json,
    Jsonb,
    Hstore,
    Attachment,
    Association,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Enum => "enum",
            FieldType::String => "string",
            FieldType::Citext => "citext",
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Decimal => "decimal",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::Time => "time",
            FieldType::Json => "json",
            FieldType::Jsonb => "jsonb",
            FieldType::Hstore => "hstore",
            FieldType::Attachment => "attachment",
            FieldType::Association => "association",
            FieldType::Other(name) => name,
        }
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, FieldType::String | FieldType::Citext | FieldType::Text)
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "enum" => FieldType::Enum,
            "string" => FieldType::String,
            "citext" => FieldType::Citext,
            "text" => FieldType::Text,
            "integer" => FieldType::Integer,
            "float" => FieldType::Float,
            "decimal" => FieldType::Decimal,
            "boolean" => FieldType::Boolean,
            "date" => FieldType::Date,
            "datetime" => FieldType::DateTime,
            "time" => FieldType::Time,
            "json" => FieldType::Json,
            "jsonb" => FieldType::Jsonb,
            "hstore" => FieldType::Hstore,
            "attachment" => FieldType::Attachment,
            "association" => FieldType::Association,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::from(name.as_str())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
