//! Thread-safe registry of prompt templates

use crate::{JinjaTemplate, PromptError, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Centralized registry of named prompt templates
///
/// Pipelines register all their templates at bootstrap and render them by
/// name when building stage instructions.
#[derive(Default)]
pub struct PromptRegistry {
    templates: RwLock<HashMap<String, Arc<JinjaTemplate>>>,
}

impl PromptRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under its own name
    pub fn register(&self, template: JinjaTemplate) {
        let mut templates = self
            .templates
            .write()
            .expect("prompt registry lock poisoned");
        templates.insert(template.name().to_string(), Arc::new(template));
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<Arc<JinjaTemplate>> {
        let templates = self
            .templates
            .read()
            .expect("prompt registry lock poisoned");
        templates.get(name).cloned()
    }

    /// Render a registered template with variables
    pub fn render(&self, name: &str, vars: &serde_json::Value) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| PromptError::TemplateNotRegistered(name.to_string()))?;
        template.render(vars)
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        let templates = self
            .templates
            .read()
            .expect("prompt registry lock poisoned");
        templates.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let templates = self
            .templates
            .read()
            .expect("prompt registry lock poisoned");
        templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_and_render() {
        let registry = PromptRegistry::new();
        assert!(registry.is_empty());

        registry.register(JinjaTemplate::new("greet", "Hello, {{ name }}!").unwrap());
        assert_eq!(registry.len(), 1);

        let rendered = registry.render("greet", &json!({ "name": "World" })).unwrap();
        assert_eq!(rendered, "Hello, World!");
    }

    #[test]
    fn test_render_unregistered_fails() {
        let registry = PromptRegistry::new();
        let err = registry.render("missing", &json!({})).unwrap_err();
        assert!(matches!(err, PromptError::TemplateNotRegistered(_)));
    }

    #[test]
    fn test_reregistration_overrides() {
        let registry = PromptRegistry::new();
        registry.register(JinjaTemplate::new("t", "old").unwrap());
        registry.register(JinjaTemplate::new("t", "new").unwrap());

        assert_eq!(registry.render("t", &json!({})).unwrap(), "new");
    }
}
