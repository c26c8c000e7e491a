//! Prompt template records and the model parameters they carry.

use serde::{Deserialize, Serialize};

use super::placeholder::PlaceholderCollector;
use super::prompt_value::PromptValue;
use super::system_defaults::{SystemDefaults, TemplateField};
use crate::domain::AppError;

/// A prompt template as stored by the admin API.
///
/// Fields the crate does not use are dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub system_prompt: PromptValue,
    #[serde(default)]
    pub user_prompt: PromptValue,
    #[serde(default)]
    pub max_tokens: PromptValue,
    #[serde(default)]
    pub temperature: PromptValue,
    #[serde(default)]
    pub top_p: PromptValue,
    #[serde(default)]
    pub top_k: PromptValue,
}

impl PromptTemplate {
    /// Distinct placeholders of the system prompt followed by those first seen in
    /// the user prompt.
    pub fn placeholders(&self) -> Vec<String> {
        let mut collector = PlaceholderCollector::default();
        for value in [&self.system_prompt, &self.user_prompt] {
            if let Some(text) = value.as_literal() {
                collector.scan(text);
            }
        }
        collector.finish()
    }
}

/// Generation parameters resolved from a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl ModelParams {
    /// Resolve every parameter of `template`. Unset parameters and unconfigured
    /// defaults are omitted; unparsable text is rejected.
    pub fn from_template(
        template: &PromptTemplate,
        defaults: &SystemDefaults,
    ) -> Result<Self, AppError> {
        Ok(Self {
            max_tokens: resolve_param(&template.max_tokens, TemplateField::MaxTokens, defaults)?,
            temperature: resolve_param(
                &template.temperature,
                TemplateField::Temperature,
                defaults,
            )?,
            top_p: resolve_param(&template.top_p, TemplateField::TopP, defaults)?,
            top_k: resolve_param(&template.top_k, TemplateField::TopK, defaults)?,
        })
    }
}

fn resolve_param<T: std::str::FromStr>(
    value: &PromptValue,
    field: TemplateField,
    defaults: &SystemDefaults,
) -> Result<Option<T>, AppError> {
    let raw = match value {
        PromptValue::Literal(text) => text.as_str(),
        PromptValue::UseDefault => match defaults.get(field) {
            Some(text) => text,
            None => return Ok(None),
        },
        PromptValue::None => return Ok(None),
    };

    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| AppError::InvalidModelParam { field: field.name(), value: raw.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_scan_system_prompt_first() {
        let template = PromptTemplate {
            system_prompt: PromptValue::literal("<$persona> speaks about <$topic>"),
            user_prompt: PromptValue::literal("<$question> on <$topic> as <$persona>"),
            ..PromptTemplate::default()
        };
        assert_eq!(template.placeholders(), vec!["persona", "topic", "question"]);
    }

    #[test]
    fn sentinel_prompts_have_no_placeholders() {
        let template = PromptTemplate {
            system_prompt: PromptValue::UseDefault,
            user_prompt: PromptValue::literal("Explain <$concept>"),
            ..PromptTemplate::default()
        };
        assert_eq!(template.placeholders(), vec!["concept"]);
    }

    #[test]
    fn deserializes_api_record_with_sentinels() {
        let json = r#"{
            "id": "tpl-1",
            "template_name": "summary",
            "system_prompt": "__USE_SYSTEM_DEFAULT__",
            "user_prompt": "Summarize <$text>",
            "max_tokens": "__NONE__",
            "temperature": "0.2",
            "top_p": null,
            "created_at": "2025-01-01T00:00:00"
        }"#;
        let template: PromptTemplate = serde_json::from_str(json).unwrap();

        assert_eq!(template.id.as_deref(), Some("tpl-1"));
        assert_eq!(template.system_prompt, PromptValue::UseDefault);
        assert_eq!(template.max_tokens, PromptValue::None);
        assert_eq!(template.top_k, PromptValue::None);
        assert_eq!(template.temperature, PromptValue::Literal("0.2".into()));
    }

    #[test]
    fn model_params_resolve_literals_and_defaults() {
        let template = PromptTemplate {
            max_tokens: PromptValue::UseDefault,
            temperature: PromptValue::literal("0.7"),
            top_p: PromptValue::None,
            top_k: PromptValue::UseDefault,
            ..PromptTemplate::default()
        };
        let defaults = SystemDefaults::new().with("DEFAULT_MAX_TOKENS", "1024");

        let params = ModelParams::from_template(&template, &defaults).unwrap();
        assert_eq!(
            params,
            ModelParams { max_tokens: Some(1024), temperature: Some(0.7), top_p: None, top_k: None }
        );
    }

    #[test]
    fn unparsable_param_is_rejected() {
        let template =
            PromptTemplate { top_k: PromptValue::literal("many"), ..PromptTemplate::default() };
        let err = ModelParams::from_template(&template, &SystemDefaults::new()).unwrap_err();
        assert!(matches!(err, AppError::InvalidModelParam { field: "top_k", .. }));
    }
}
