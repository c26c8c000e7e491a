//! Three-state prompt field values.
//!
//! The admin API encodes "use the system default" and "explicitly empty" as
//! sentinel strings. Inside the crate they are a proper enum; the sentinels only
//! exist on the wire.

use serde::{Deserialize, Serialize};

/// Wire sentinel meaning "resolve from the system defaults".
pub const USE_SYSTEM_DEFAULT: &str = "__USE_SYSTEM_DEFAULT__";
/// Wire sentinel meaning "explicitly no value".
pub const NONE_VALUE: &str = "__NONE__";

/// A prompt text or model parameter as stored on a template.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum PromptValue {
    /// User-authored text.
    Literal(String),
    /// Take the configured system default.
    UseDefault,
    /// No value, whether explicit or absent.
    #[default]
    None,
}

impl PromptValue {
    /// Decode a raw wire value.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            None => PromptValue::None,
            Some(USE_SYSTEM_DEFAULT) => PromptValue::UseDefault,
            Some(NONE_VALUE) | Some("") => PromptValue::None,
            Some(text) => PromptValue::Literal(text.to_string()),
        }
    }

    /// Encode for the wire.
    pub fn to_wire(&self) -> &str {
        match self {
            PromptValue::Literal(text) => text,
            PromptValue::UseDefault => USE_SYSTEM_DEFAULT,
            PromptValue::None => NONE_VALUE,
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        PromptValue::from_wire(Some(&text.into()))
    }

    /// Literal text, if any.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            PromptValue::Literal(text) => Some(text),
            _ => None,
        }
    }
}

impl From<Option<String>> for PromptValue {
    fn from(value: Option<String>) -> Self {
        PromptValue::from_wire(value.as_deref())
    }
}

impl From<PromptValue> for Option<String> {
    fn from(value: PromptValue) -> Self {
        Some(value.to_wire().to_string())
    }
}
