//! Presentation and bootstrap configuration.

use serde::{Deserialize, Serialize};

use webio_protocol::{ConfigPatch, ControlPatch, Filters, Position};

/// Presentation settings for the console container.
///
/// Treated as an immutable snapshot: updates go through [`ViewConfig::merged`],
/// which returns a new value, and the renderer is handed the new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    /// Docked containers flow with the page; undocked ones are absolutely positioned.
    pub docked: bool,
    pub position: Position,
    /// CSS length. Empty means "leave to the stylesheet".
    pub height: String,
    /// CSS length. Empty means "leave to the stylesheet".
    pub width: String,
    pub container_id: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            docked: false,
            position: Position::Bottom,
            height: "300px".into(),
            width: "99%".into(),
            container_id: "console-log".into(),
        }
    }
}

impl ViewConfig {
    /// Returns a copy with every field present in `patch` overwritten.
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        let mut next = self.clone();
        if let Some(docked) = patch.docked {
            next.docked = docked;
        }
        if let Some(position) = patch.position {
            next.position = position;
        }
        if let Some(height) = &patch.height {
            next.height.clone_from(height);
        }
        if let Some(width) = &patch.width {
            next.width.clone_from(width);
        }
        next
    }
}

/// Configuration handed to `WebIo::set_up`: presentation plus initial policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupConfig {
    #[serde(flatten)]
    pub view: ViewConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl SetupConfig {
    /// The control update applied right after mounting.
    pub fn initial_control(&self) -> ControlPatch {
        ControlPatch {
            filters: self.filters.clone(),
            page_size: self.page_size,
            search: self.search.clone().map(Some),
            ..ControlPatch::default()
        }
    }
}
