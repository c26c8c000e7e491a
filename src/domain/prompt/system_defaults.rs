//! System-wide defaults referenced by `UseDefault` template fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Template fields that may defer to a system default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateField {
    SystemPrompt,
    UserPrompt,
    MaxTokens,
    Temperature,
    TopP,
    TopK,
}

impl TemplateField {
    pub const ALL: [TemplateField; 6] = [
        TemplateField::SystemPrompt,
        TemplateField::UserPrompt,
        TemplateField::MaxTokens,
        TemplateField::Temperature,
        TemplateField::TopP,
        TemplateField::TopK,
    ];

    /// Field name as used in template payloads.
    pub fn name(&self) -> &'static str {
        match self {
            TemplateField::SystemPrompt => "system_prompt",
            TemplateField::UserPrompt => "user_prompt",
            TemplateField::MaxTokens => "max_tokens",
            TemplateField::Temperature => "temperature",
            TemplateField::TopP => "top_p",
            TemplateField::TopK => "top_k",
        }
    }

    /// System config code holding this field's default. Both prompt fields
    /// share the system prompt default.
    pub fn default_code(&self) -> &'static str {
        match self {
            TemplateField::SystemPrompt | TemplateField::UserPrompt => "DEFAULT_SYSTEM_PROMPT",
            TemplateField::MaxTokens => "DEFAULT_MAX_TOKENS",
            TemplateField::Temperature => "DEFAULT_TEMPERATURE",
            TemplateField::TopP => "DEFAULT_TOP_P",
            TemplateField::TopK => "DEFAULT_TOP_K",
        }
    }
}

/// Config codes requested from the backend when loading defaults.
pub fn default_config_codes() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = Vec::with_capacity(TemplateField::ALL.len());
    for code in TemplateField::ALL.iter().map(TemplateField::default_code) {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

/// Config code to content, as returned by the system config endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemDefaults {
    values: BTreeMap<String, String>,
}

impl SystemDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, code: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(code, content);
        self
    }

    pub fn insert(&mut self, code: impl Into<String>, content: impl Into<String>) {
        self.values.insert(code.into(), content.into());
    }

    /// Configured default for a field. Empty content counts as not configured.
    pub fn get(&self, field: TemplateField) -> Option<&str> {
        self.get_code(field.default_code())
    }

    pub fn get_code(&self, code: &str) -> Option<&str> {
        self.values.get(code).map(String::as_str).filter(|content| !content.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for SystemDefaults {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
