//! Minijinja template rendering for notification messages.
//!
//! Turns the identifiers appended in one tick into the message text. The
//! built-in template names the source endpoint and lists the new
//! identifiers verbatim; operators can supply their own template, which is
//! syntax-checked once at construction.
//!
//! Templates are arbitrary strings (not pre-registered), so a fresh
//! [`minijinja::Environment`] is created per render call.

use idwatch_core::{format_ids, Identifier};

use crate::traits::{Notification, NotifyError};

/// Message used when no custom template is configured.
pub const DEFAULT_TEMPLATE: &str =
    "{{ count }} new record{{ count | pluralize }} added to '{{ source_url }}': {{ ids }}";

/// Context data available to notification templates.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MessageContext<'a> {
    /// Endpoint the identifiers were read from.
    pub source_url: &'a str,
    /// Number of newly added identifiers.
    pub count: usize,
    /// Bracketed list, e.g. `[4, 5]`.
    pub ids: String,
    /// The identifiers themselves, for templates that iterate.
    pub id_list: &'a [Identifier],
}

impl<'a> MessageContext<'a> {
    pub fn new(source_url: &'a str, added: &'a [Identifier]) -> Self {
        Self {
            source_url,
            count: added.len(),
            ids: format_ids(added),
            id_list: added,
        }
    }
}

/// Renders notification text from a validated template.
#[derive(Debug, Clone)]
pub struct MessageRenderer {
    template: String,
}

impl MessageRenderer {
    /// Create a renderer, falling back to [`DEFAULT_TEMPLATE`] when `template` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Template`] if the template has syntax errors.
    pub fn new(template: Option<String>) -> Result<Self, NotifyError> {
        let template = template.unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());
        Self::validate(&template)?;
        Ok(Self { template })
    }

    /// Build a configured minijinja environment with custom filters.
    fn build_env() -> minijinja::Environment<'static> {
        let mut env = minijinja::Environment::new();
        env.add_filter("pluralize", pluralize_filter);
        env
    }

    fn validate(template_str: &str) -> Result<(), NotifyError> {
        let env = Self::build_env();
        env.template_from_str(template_str)
            .map_err(|e| NotifyError::Template(e.to_string()))?;
        Ok(())
    }

    /// Render the message text for a context.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Template`] if rendering fails (e.g. a filter
    /// applied to the wrong type).
    pub fn render(&self, ctx: &MessageContext<'_>) -> Result<String, NotifyError> {
        let env = Self::build_env();
        env.render_str(&self.template, ctx)
            .map_err(|e| NotifyError::Template(e.to_string()))
    }

    /// Render a ready-to-send [`Notification`] for newly added identifiers.
    pub fn notification(
        &self,
        source_url: &str,
        added: &[Identifier],
    ) -> Result<Notification, NotifyError> {
        let text = self.render(&MessageContext::new(source_url, added))?;
        Ok(Notification::new(text))
    }
}

/// Custom filter: `"s"` unless the count is exactly one.
fn pluralize_filter(count: i64) -> String {
    if count == 1 {
        String::new()
    } else {
        "s".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "http://localhost:8080/api/track";

    fn ids(values: &[u64]) -> Vec<Identifier> {
        values.iter().copied().map(Identifier::new).collect()
    }

    #[test]
    fn default_template_plural() {
        let renderer = MessageRenderer::new(None).unwrap();
        let text = renderer.notification(SOURCE, &ids(&[4, 5])).unwrap().text;
        assert_eq!(
            text,
            "2 new records added to 'http://localhost:8080/api/track': [4, 5]"
        );
    }

    #[test]
    fn default_template_singular() {
        let renderer = MessageRenderer::new(None).unwrap();
        let text = renderer.notification(SOURCE, &ids(&[42])).unwrap().text;
        assert_eq!(
            text,
            "1 new record added to 'http://localhost:8080/api/track': [42]"
        );
    }

    #[test]
    fn default_template_does_not_html_escape_url() {
        let renderer = MessageRenderer::new(None).unwrap();
        let text = renderer
            .notification("http://host/ids?a=1&b=2", &ids(&[1]))
            .unwrap()
            .text;
        assert!(text.contains("'http://host/ids?a=1&b=2'"), "got: {text}");
    }

    #[test]
    fn custom_template_iterates_ids() {
        let renderer = MessageRenderer::new(Some(
            "{% for id in id_list %}#{{ id }}{% if not loop.last %} {% endif %}{% endfor %}"
                .to_string(),
        ))
        .unwrap();
        let text = renderer.notification(SOURCE, &ids(&[7, 8, 9])).unwrap().text;
        assert_eq!(text, "#7 #8 #9");
    }

    #[test]
    fn custom_template_with_count_and_pluralize() {
        let renderer = MessageRenderer::new(Some(
            "New track{{ count | pluralize }} on {{ source_url }}: {{ ids }}".to_string(),
        ))
        .unwrap();
        let text = renderer.notification(SOURCE, &ids(&[3])).unwrap().text;
        assert_eq!(text, "New track on http://localhost:8080/api/track: [3]");
    }

    #[test]
    fn invalid_template_is_rejected_at_construction() {
        let result = MessageRenderer::new(Some("{{ unclosed".to_string()));
        match result.unwrap_err() {
            NotifyError::Template(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Template error, got: {:?}", other),
        }
    }

    #[test]
    fn pluralize_filter_values() {
        assert_eq!(pluralize_filter(0), "s");
        assert_eq!(pluralize_filter(1), "");
        assert_eq!(pluralize_filter(2), "s");
    }
}
