use serde::{Deserialize, Serialize};

/// A single captured console event.
///
/// Produced by the log-capture collaborator and never modified afterwards.
/// `message` may still be bracket-wrapped and percent-encoded; cleanup
/// happens at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Category tag (`log`, `warn`, `error`, `assert`, `trace`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    /// Comma-joined stack frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl LogEntry {
    /// Creates an entry without a stack trace.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            stack: None,
        }
    }

    /// Attaches a comma-joined stack trace.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}
