//! `Logger` adapter that forwards to `tracing`

use tracing::{error, warn};

use crate::host::Logger;

/// Emits tool diagnostics as `tracing` events tagged with the tool name
#[derive(Debug, Clone)]
pub struct TracingLogger {
    tool: String,
}

impl TracingLogger {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }
}

impl Logger for TracingLogger {
    fn error(&self, message: &str) {
        error!(tool = %self.tool, "{message}");
    }

    fn warn(&self, message: &str) {
        warn!(tool = %self.tool, "{message}");
    }
}
