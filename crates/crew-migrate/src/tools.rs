//! Local tools for the migration review
//!
//! The assessment agent's only tool: reading the legacy source file. The
//! path is fixed at construction; the tool takes no parameters.

use async_trait::async_trait;
use crew_tools::Tool;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Name the assessment agent calls this tool by
pub const SOURCE_TOOL: &str = "read_source";

/// Tool that reads the legacy Java source file under review
pub struct SourceFileTool {
    path: PathBuf,
}

impl SourceFileTool {
    /// Create a tool bound to the given source file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the file this tool reads
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl Tool for SourceFileTool {
    async fn execute(&self, _params: Value) -> crew_core::Result<Value> {
        debug!("Reading legacy source from {}", self.path.display());

        let source = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            crew_core::Error::ProcessingFailed(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))
        })?;

        Ok(Value::String(source))
    }

    fn name(&self) -> &str {
        SOURCE_TOOL
    }

    fn description(&self) -> &str {
        "Read the legacy Java source file under review and return its full contents"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": [],
        })
    }
}
