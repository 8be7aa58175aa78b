use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::model::ValidatorKind;

/// Rendering widget hint derived from a field's type and key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Component {
    String,
    Text,
    Password,
    Url,
    Email,
    Search,
    Phone,
    Time,
    Date,
    DateTime,
    Number,
    Color,
    Boolean,
    Code,
    Enum,
    Attachment,
    Association,
    Other(String),
}

impl Component {
    pub fn as_str(&self) -> &str {
        match self {
            Component::String => "string",
            Component::Text => "text",
            Component::Password => "password",
            Component::Url => "url",
            Component::Email => "email",
            Component::Search => "search",
            Component::Phone => "phone",
            Component::Time => "time",
            Component::Date => "date",
            Component::DateTime => "datetime",
            Component::Number => "number",
            Component::Color => "color",
            Component::Boolean => "boolean",
            Component::Code => "code",
            Component::Enum => "enum",
            Component::Attachment => "attachment",
            Component::Association => "association",
            Component::Other(name) => name,
        }
    }
}

impl From<Component> for String {
    fn from(component: Component) -> Self {
        component.as_str().to_string()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Key-name heuristic for textual fields
// ============================================================================

const PASSWORD_EXACT: &[&str] = &["password"];
const PASSWORD_PREFIXES: &[&str] = &["encrypted_", "password_"];
const PASSWORD_SUFFIXES: &[&str] = &["_password", "_digest", "_hash", "_token"];

/// Ordered; the first matching pattern wins.
static KEY_PATTERNS: LazyLock<Vec<(Regex, Component)>> = LazyLock::new(|| {
    [
        (r"url$|^link|^site", Component::Url),
        (r"^email", Component::Email),
        (r"^search", Component::Search),
        (r"phone|tel(ephone)?", Component::Phone),
        (r"^time", Component::Time),
        (r"^date", Component::Date),
        (r"^number|_count$|_amount$", Component::Number),
        (r"^color", Component::Color),
    ]
    .into_iter()
    .map(|(pattern, component)| (Regex::new(pattern).unwrap(), component))
    .collect()
});

pub fn is_password_key(key: &str) -> bool {
    PASSWORD_EXACT.contains(&key)
        || PASSWORD_PREFIXES.iter().any(|p| key.starts_with(p))
        || PASSWORD_SUFFIXES.iter().any(|s| key.ends_with(s))
}

/// Widget implied by the field key alone, if any.
pub fn component_from_key(key: &str) -> Option<Component> {
    let key = key.to_lowercase();

    if is_password_key(&key) {
        return Some(Component::Password);
    }

    KEY_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(&key))
        .map(|(_, component)| component.clone())
}

/// Widget implied by declared validators, if any.
pub fn component_from_validators(validators: &[ValidatorKind]) -> Option<Component> {
    if validators.contains(&ValidatorKind::Numericality) {
        Some(Component::Number)
    } else if validators.contains(&ValidatorKind::EmailFormat) {
        Some(Component::Email)
    } else {
        None
    }
}
