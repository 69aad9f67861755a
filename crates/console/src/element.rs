//! Conversion of log entries into display elements.

use webio_protocol::LogEntry;
use webio_protocol::constants::PREFORMATTED_TYPES;

/// Markup tag used for a rendered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Regular block (`code`).
    Block,
    /// Whitespace-preserving block (`pre`) for object dumps and traces.
    Preformatted,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "code",
            Self::Preformatted => "pre",
        }
    }
}

/// A display fragment derived from a [`LogEntry`]. Recomputed on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedElement {
    pub tag: Tag,
    pub class_name: String,
    pub message: String,
}

impl RenderedElement {
    /// Builds the display fragment for `entry`.
    pub fn from_entry(entry: &LogEntry) -> Self {
        let mut tag = Tag::Block;
        let mut message = strip_brackets(&entry.message).to_owned();
        let mut css = entry.kind.as_str();

        if entry.kind == "assert" {
            let outcome = strip_brackets(&message).split(',').next().unwrap_or_default();
            if !outcome.eq_ignore_ascii_case("true") {
                css = "assert-failed";
            }
        }

        // Some embedded browsers hand over percent-encoded spaces.
        message = message.replace("%20", " ");

        if message.contains('{') && message.contains('}') {
            tag = Tag::Preformatted;
        }

        if let Some(stack) = entry.stack.as_deref().filter(|s| !s.is_empty()) {
            let frames = stack
                .split(',')
                .collect::<Vec<_>>()
                .join("\n")
                .replace('"', "")
                .replace("%20", " ");
            message.push('\n');
            message.push_str(strip_brackets(&frames));
        }

        if PREFORMATTED_TYPES.contains(&entry.kind.as_str()) {
            tag = Tag::Preformatted;
        }

        if message.is_empty() {
            message.push('.');
        }

        Self {
            tag,
            class_name: format!("console type-{css}"),
            message,
        }
    }
}

/// Removes one enclosing `[` `]` pair, if both are present.
pub fn strip_brackets(text: &str) -> &str {
    text.strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(text)
}
