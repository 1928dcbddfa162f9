//! MiniJinja-based template implementation
//!
//! [`JinjaTemplate`] wraps a named template string and renders it with JSON
//! variables through the Jinja2-compatible MiniJinja engine.

use crate::{PromptError, Result};
use minijinja::Environment;

/// A prompt template backed by MiniJinja
///
/// # Template Syntax
///
/// Standard Jinja2 syntax:
/// - Variables: `{{ variable }}`
/// - Conditionals: `{% if condition %}...{% endif %}`
/// - Loops: `{% for item in items %}...{% endfor %}`
///
/// # Examples
///
/// ```
/// use crew_prompt::JinjaTemplate;
/// use serde_json::json;
///
/// let template = JinjaTemplate::new(
///     "greeting",
///     "Hello, {{ name }}!",
/// ).unwrap();
///
/// let result = template.render(&json!({ "name": "World" })).unwrap();
/// assert_eq!(result, "Hello, World!");
/// ```
pub struct JinjaTemplate {
    name: String,
    source: String,
}

impl JinjaTemplate {
    /// Create a new template, validating the source up front
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let source = source.into();

        // Parse once at construction so registration fails loudly instead of
        // the first render
        let mut env = Environment::new();
        env.add_template("__validate__", &source).map_err(|e| {
            PromptError::TemplateParseFailed {
                name: name.clone(),
                detail: e.to_string(),
            }
        })?;

        Ok(Self { name, source })
    }

    /// Get the template name/identifier
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the raw template string (for debugging/inspection)
    pub fn raw(&self) -> &str {
        &self.source
    }

    /// Render the template with variables
    ///
    /// Variables are passed as `serde_json::Value`.
    pub fn render(&self, vars: &serde_json::Value) -> Result<String> {
        // A fresh environment per render avoids lifetime entanglement with
        // the stored source
        let env = Environment::new();
        let value = minijinja::value::Value::from_serialize(vars);

        env.render_str(&self.source, value)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
