//! Prompt template management for crew-rs
//!
//! This crate provides a small, type-safe system for managing prompt
//! templates with variable interpolation and a thread-safe registry.
//!
//! # Quick Start
//!
//! ```
//! use crew_prompt::{JinjaTemplate, PromptRegistry};
//! use serde_json::json;
//!
//! let registry = PromptRegistry::new();
//!
//! let template = JinjaTemplate::new(
//!     "portfolio.analysis",
//!     "Raw holdings:\n\n{{ previous }}",
//! ).unwrap();
//! registry.register(template);
//!
//! let prompt = registry
//!     .render("portfolio.analysis", &json!({ "previous": "INFY 100" }))
//!     .unwrap();
//! assert!(prompt.contains("INFY 100"));
//! ```

mod error;
mod registry;
mod template;

pub use error::{PromptError, Result};
pub use registry::PromptRegistry;
pub use template::JinjaTemplate;
