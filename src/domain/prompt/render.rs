//! Sentinel resolution and placeholder substitution.
//!
//! Rendering never fails. Anything the renderer cannot fill degrades to a
//! marker produced by the active [`Markup`].

use std::collections::BTreeMap;

use regex::Captures;

use super::placeholder::PLACEHOLDER_PATTERN;
use super::prompt_value::PromptValue;
use super::system_defaults::{SystemDefaults, TemplateField};
use super::template::PromptTemplate;

/// Placeholder identifier to bound value.
pub type Bindings = BTreeMap<String, String>;

/// Outcome of resolving a field's sentinel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPrompt {
    /// User-authored text.
    Literal(String),
    /// Text taken from the system defaults.
    SystemDefault(String),
    /// The field defers to a default that is not configured.
    DefaultNotConfigured,
    /// No value.
    Empty,
}

impl ResolvedPrompt {
    /// Real text to substitute into, or `None` for markers.
    pub fn text(&self) -> Option<&str> {
        match self {
            ResolvedPrompt::Literal(text) | ResolvedPrompt::SystemDefault(text) => Some(text),
            ResolvedPrompt::DefaultNotConfigured | ResolvedPrompt::Empty => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        self.text().is_none()
    }
}

impl PromptValue {
    /// Resolve the sentinel state of this value for `field`.
    pub fn resolve(&self, field: TemplateField, defaults: &SystemDefaults) -> ResolvedPrompt {
        match self {
            PromptValue::Literal(text) if text.is_empty() => ResolvedPrompt::Empty,
            PromptValue::Literal(text) => ResolvedPrompt::Literal(text.clone()),
            PromptValue::UseDefault => match defaults.get(field) {
                Some(text) => ResolvedPrompt::SystemDefault(text.to_string()),
                None => ResolvedPrompt::DefaultNotConfigured,
            },
            PromptValue::None => ResolvedPrompt::Empty,
        }
    }
}

/// Resolve a raw wire value.
pub fn resolve_sentinel(
    raw: Option<&str>,
    field: TemplateField,
    defaults: &SystemDefaults,
) -> ResolvedPrompt {
    PromptValue::from_wire(raw).resolve(field, defaults)
}

/// How markers and filled values are written into display output.
pub trait Markup {
    /// Display text for a field with no value.
    fn empty(&self) -> String;
    /// Display text for a field whose default is not configured.
    fn default_not_configured(&self) -> String;
    /// A placeholder replaced by its bound value.
    fn filled(&self, identifier: &str, value: &str) -> String;
    /// A placeholder that has no usable value yet.
    fn awaiting(&self, identifier: &str) -> String;
}

/// Markup for the admin web views.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMarkup;

impl Markup for HtmlMarkup {
    fn empty(&self) -> String {
        r#"<em class="text-muted">none</em>"#.to_string()
    }

    fn default_not_configured(&self) -> String {
        r#"<em class="text-muted">system default (not configured)</em>"#.to_string()
    }

    fn filled(&self, identifier: &str, value: &str) -> String {
        let value = escape_html(value);
        format!(r#"<span class="variable-highlight" data-var="{identifier}">{value}</span>"#)
    }

    fn awaiting(&self, identifier: &str) -> String {
        format!(
            r#"<span class="variable-placeholder" data-var="{identifier}">&lt;${identifier}&gt;</span>"#
        )
    }
}

/// Markup for terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainMarkup;

impl Markup for PlainMarkup {
    fn empty(&self) -> String {
        "[none]".to_string()
    }

    fn default_not_configured(&self) -> String {
        "[system default: not configured]".to_string()
    }

    fn filled(&self, _identifier: &str, value: &str) -> String {
        value.to_string()
    }

    fn awaiting(&self, identifier: &str) -> String {
        format!("[awaiting: {identifier}]")
    }
}

/// Render a field for display.
///
/// Markers are returned as-is. Otherwise every placeholder bound to a non-blank
/// value is filled and every other placeholder becomes an awaiting marker.
pub fn render(
    value: &PromptValue,
    field: TemplateField,
    defaults: &SystemDefaults,
    bindings: &Bindings,
    markup: &impl Markup,
) -> String {
    let resolved = value.resolve(field, defaults);
    let text = match &resolved {
        ResolvedPrompt::Empty => return markup.empty(),
        ResolvedPrompt::DefaultNotConfigured => return markup.default_not_configured(),
        ResolvedPrompt::Literal(text) | ResolvedPrompt::SystemDefault(text) => text,
    };

    substitute(text, bindings, |identifier, bound| match bound {
        Some(value) => markup.filled(identifier, value),
        None => markup.awaiting(identifier),
    })
}

/// Render a field as plain text for a text-generation request.
///
/// Markers become empty strings and placeholders without a non-blank value are
/// substituted with nothing.
pub fn render_for_machine(
    value: &PromptValue,
    field: TemplateField,
    defaults: &SystemDefaults,
    bindings: &Bindings,
) -> String {
    match value.resolve(field, defaults).text() {
        Some(text) => substitute(text, bindings, |_, bound| bound.unwrap_or_default().to_string()),
        None => String::new(),
    }
}

/// Display rendering of both prompt fields of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Placeholders without a usable value, in template order.
    pub awaiting: Vec<String>,
}

/// Render both prompts of `template` and list the placeholders still missing input.
pub fn render_preview(
    template: &PromptTemplate,
    defaults: &SystemDefaults,
    bindings: &Bindings,
    markup: &impl Markup,
) -> RenderedTemplate {
    let awaiting = template
        .placeholders()
        .into_iter()
        .filter(|identifier| usable_value(bindings, identifier).is_none())
        .collect();

    RenderedTemplate {
        system_prompt: render(
            &template.system_prompt,
            TemplateField::SystemPrompt,
            defaults,
            bindings,
            markup,
        ),
        user_prompt: render(
            &template.user_prompt,
            TemplateField::UserPrompt,
            defaults,
            bindings,
            markup,
        ),
        awaiting,
    }
}

fn usable_value<'a>(bindings: &'a Bindings, identifier: &str) -> Option<&'a str> {
    bindings.get(identifier).map(String::as_str).filter(|value| !value.trim().is_empty())
}

/// Single pass over the placeholders of `text`. `replace` gets the bound value
/// when it is non-blank; absent and blank bindings both arrive as `None`.
fn substitute(
    text: &str,
    bindings: &Bindings,
    replace: impl Fn(&str, Option<&str>) -> String,
) -> String {
    PLACEHOLDER_PATTERN
        .replace_all(text, |captures: &Captures| {
            let identifier = &captures[1];
            replace(identifier, usable_value(bindings, identifier))
        })
        .into_owned()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
