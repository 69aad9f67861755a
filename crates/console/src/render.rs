//! Rendering port and the renderer that keeps the visible list capped.
//!
//! The host supplies a [`RenderTarget`] (the page body in a browser, an
//! in-memory stand-in in tests). The renderer attaches one container to it
//! and mirrors the controller's selection into that container, newest entry
//! at the front, never holding more than `page_size` children.

use std::sync::Arc;

use webio_protocol::{LogEntry, Position};

use crate::config::ViewConfig;
use crate::control::Control;
use crate::element::RenderedElement;

/// Container style rules that do not depend on configuration.
const BASE_STYLES: &[&str] = &[
    "background-color: rgba(219, 255, 232, 0.3)",
    "overflow: auto",
    "margin: 5px",
    "-o-box-shadow: 0 0 5px 1px #888",
    "-moz-box-shadow: 0 0 5px 1px #888",
    "-webkit-box-shadow: 0 0 5px 1px #888",
    "box-shadow: 0 0 5px 1px #888",
];

/// One end of an ordered visual list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Front,
    Back,
}

/// An ordered list of rendered elements, e.g. the children of a DOM node.
pub trait VisualList {
    /// Inserts a single element at `edge`.
    fn insert_at_edge(&mut self, element: RenderedElement, edge: Edge);

    /// Inserts `elements` as one block at `edge`, keeping their order.
    ///
    /// Hosts that can build a detached fragment should override this so the
    /// whole batch costs a single reflow.
    fn insert_batch_at_edge(&mut self, elements: Vec<RenderedElement>, edge: Edge) {
        match edge {
            Edge::Front => {
                for element in elements.into_iter().rev() {
                    self.insert_at_edge(element, Edge::Front);
                }
            }
            Edge::Back => {
                for element in elements {
                    self.insert_at_edge(element, Edge::Back);
                }
            }
        }
    }

    /// Removes the element at `edge`, if any.
    fn remove_at(&mut self, edge: Edge) -> Option<RenderedElement>;

    /// Removes every element.
    fn clear(&mut self);

    /// Number of elements currently in the list.
    fn child_count(&self) -> usize;
}

/// The host surface the console container is mounted on.
pub trait RenderTarget {
    type Container: VisualList;

    /// Creates a container described by `spec` and attaches it.
    fn attach(&mut self, spec: &ContainerSpec) -> Self::Container;

    /// Detaches a container previously returned by [`RenderTarget::attach`].
    fn detach(&mut self, container: Self::Container);
}

/// Attributes of the console container node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub id: String,
    pub style: String,
    pub tab_index: u32,
    /// Where in the target the container goes.
    pub edge: Edge,
}

impl ContainerSpec {
    /// Derives the container attributes from a presentation snapshot.
    ///
    /// Empty height/width are left out so the stylesheet default applies.
    pub fn from_config(config: &ViewConfig) -> Self {
        let mut styles: Vec<String> = BASE_STYLES.iter().map(|s| (*s).to_owned()).collect();

        if !config.docked {
            styles.push("position:absolute".into());
        }
        if !config.height.is_empty() {
            styles.push(format!("height:{}", config.height));
        }
        if !config.width.is_empty() {
            styles.push(format!("width:{}", config.width));
        }

        let edge = match config.position {
            Position::Top => {
                styles.push("top: 5px".into());
                Edge::Front
            }
            Position::Bottom => {
                styles.push("bottom: 5px".into());
                Edge::Back
            }
        };

        Self {
            id: config.container_id.clone(),
            style: styles.join(";"),
            tab_index: 1,
            edge,
        }
    }
}

/// Materializes entries into the mounted container.
pub struct Renderer<T: RenderTarget> {
    config: Arc<ViewConfig>,
    target: Option<T>,
    container: Option<T::Container>,
}

impl<T: RenderTarget> Renderer<T> {
    /// Creates an unmounted renderer reading the given config snapshot.
    pub fn new(config: Arc<ViewConfig>) -> Self {
        Self {
            config,
            target: None,
            container: None,
        }
    }

    /// Mounts a fresh container on `target`.
    pub fn render(&mut self, target: T) {
        self.destroy();
        self.target = Some(target);
        self.create_container();
    }

    /// Clears and recreates the container using a new config snapshot.
    pub fn reload(&mut self, config: Arc<ViewConfig>) {
        self.config = config;
        if self.target.is_none() {
            return;
        }
        self.destroy();
        self.create_container();
        tracing::debug!(position = self.config.position.as_str(), "console container reloaded");
    }

    /// Clears and detaches the container. The target is kept for a later reload.
    pub fn destroy(&mut self) {
        self.clear();
        if let (Some(target), Some(container)) = (self.target.as_mut(), self.container.take()) {
            target.detach(container);
        }
    }

    /// Renders one entry at the front if it passes `control`.
    ///
    /// Returns `false` when the entry was rejected or nothing is mounted.
    pub fn add(&mut self, entry: &LogEntry, control: &Control) -> bool {
        if !control.accepts(entry) {
            return false;
        }
        let Some(container) = self.container.as_mut() else {
            tracing::debug!(kind = %entry.kind, "no console container mounted, entry not rendered");
            return false;
        };

        container.insert_at_edge(RenderedElement::from_entry(entry), Edge::Front);
        self.remove_overflow_element(control.page_size());
        true
    }

    /// Renders an already-selected, newest-first run of entries in one insertion.
    pub fn add_batch(&mut self, entries: &[&LogEntry], control: &Control) {
        if entries.is_empty() {
            return;
        }
        let Some(container) = self.container.as_mut() else {
            tracing::debug!(count = entries.len(), "no console container mounted, batch not rendered");
            return;
        };

        let elements = entries
            .iter()
            .map(|entry| RenderedElement::from_entry(entry))
            .collect();
        container.insert_batch_at_edge(elements, Edge::Front);
        self.remove_overflow_element(control.page_size());
    }

    /// Removes every visible element.
    pub fn clear(&mut self) {
        if let Some(container) = self.container.as_mut() {
            container.clear();
        }
    }

    /// Drops elements from the back until at most `page_size` remain.
    pub fn remove_overflow_element(&mut self, page_size: usize) {
        let Some(container) = self.container.as_mut() else {
            return;
        };
        while container.child_count() > page_size {
            if container.remove_at(Edge::Back).is_none() {
                break;
            }
        }
    }

    /// Number of visible elements.
    pub fn visible_count(&self) -> usize {
        self.container.as_ref().map_or(0, |c| c.child_count())
    }

    pub fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    pub fn config(&self) -> &Arc<ViewConfig> {
        &self.config
    }

    pub fn container(&self) -> Option<&T::Container> {
        self.container.as_ref()
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    fn create_container(&mut self) {
        let Some(target) = self.target.as_mut() else {
            return;
        };
        let spec = ContainerSpec::from_config(&self.config);
        tracing::debug!(id = %spec.id, edge = ?spec.edge, "mounting console container");
        self.container = Some(target.attach(&spec));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;
    use webio_protocol::{ControlPatch, Filters};

    fn mounted(page_size: usize) -> (Renderer<MemoryHost>, Control) {
        let mut renderer = Renderer::new(Arc::new(ViewConfig::default()));
        renderer.render(MemoryHost::new());
        let mut control = Control::default();
        control
            .apply(&ControlPatch {
                page_size: Some(page_size),
                ..ControlPatch::default()
            })
            .unwrap();
        (renderer, control)
    }

    fn visible(renderer: &Renderer<MemoryHost>) -> Vec<String> {
        renderer
            .container()
            .unwrap()
            .children()
            .iter()
            .map(|el| el.message.clone())
            .collect()
    }

    #[test]
    fn container_spec_defaults() {
        let spec = ContainerSpec::from_config(&ViewConfig::default());
        assert_eq!(spec.id, "console-log");
        assert_eq!(spec.tab_index, 1);
        assert_eq!(spec.edge, Edge::Back);
        assert!(spec.style.starts_with("background-color: rgba(219, 255, 232, 0.3);"));
        assert!(spec.style.contains("position:absolute"));
        assert!(spec.style.contains("height:300px"));
        assert!(spec.style.contains("width:99%"));
        assert!(spec.style.ends_with("bottom: 5px"));
    }

    #[test]
    fn container_spec_docked_top_without_size() {
        let config = ViewConfig {
            docked: true,
            position: Position::Top,
            height: String::new(),
            width: String::new(),
            ..ViewConfig::default()
        };
        let spec = ContainerSpec::from_config(&config);
        assert_eq!(spec.edge, Edge::Front);
        assert!(!spec.style.contains("position:absolute"));
        assert!(!spec.style.contains("height:"));
        assert!(!spec.style.contains("width:"));
        assert!(spec.style.ends_with("top: 5px"));
    }

    #[test]
    fn add_puts_newest_first_and_trims() {
        let (mut renderer, control) = mounted(2);
        for msg in ["1", "2", "3"] {
            assert!(renderer.add(&LogEntry::new("log", msg), &control));
        }
        assert_eq!(visible(&renderer), vec!["3", "2"]);
    }

    #[test]
    fn add_rechecks_policy() {
        let (mut renderer, mut control) = mounted(10);
        control
            .apply(&ControlPatch {
                filters: Some(Filters::Csv("error".into())),
                ..ControlPatch::default()
            })
            .unwrap();

        assert!(!renderer.add(&LogEntry::new("log", "skip"), &control));
        assert!(renderer.add(&LogEntry::new("error", "keep"), &control));
        assert_eq!(visible(&renderer), vec!["keep"]);
    }

    #[test]
    fn add_batch_goes_in_front_of_existing() {
        let (mut renderer, control) = mounted(10);
        renderer.add(&LogEntry::new("log", "old"), &control);

        let newer = [LogEntry::new("log", "b"), LogEntry::new("log", "a")];
        let refs: Vec<&LogEntry> = newer.iter().collect();
        renderer.add_batch(&refs, &control);

        assert_eq!(visible(&renderer), vec!["b", "a", "old"]);
        assert_eq!(renderer.container().unwrap().batch_insertions(), 1);
    }

    #[test]
    fn add_batch_trims_overflow() {
        let (mut renderer, control) = mounted(2);
        let batch = [
            LogEntry::new("log", "c"),
            LogEntry::new("log", "b"),
            LogEntry::new("log", "a"),
        ];
        let refs: Vec<&LogEntry> = batch.iter().collect();
        renderer.add_batch(&refs, &control);
        assert_eq!(visible(&renderer), vec!["c", "b"]);
    }

    #[test]
    fn remove_overflow_is_idempotent() {
        let (mut renderer, control) = mounted(3);
        renderer.add(&LogEntry::new("log", "1"), &control);
        renderer.add(&LogEntry::new("log", "2"), &control);

        renderer.remove_overflow_element(3);
        renderer.remove_overflow_element(3);
        assert_eq!(visible(&renderer), vec!["2", "1"]);

        renderer.remove_overflow_element(1);
        assert_eq!(visible(&renderer), vec!["2"]);
    }

    #[test]
    fn clear_empties_container() {
        let (mut renderer, control) = mounted(3);
        renderer.add(&LogEntry::new("log", "1"), &control);
        renderer.clear();
        assert_eq!(renderer.visible_count(), 0);
        assert!(renderer.is_mounted());
    }

    #[test]
    fn reload_recreates_container_with_new_config() {
        let (mut renderer, control) = mounted(3);
        renderer.add(&LogEntry::new("log", "1"), &control);

        let config = ViewConfig {
            position: Position::Top,
            ..ViewConfig::default()
        };
        renderer.reload(Arc::new(config));

        let host = renderer.target().unwrap();
        assert_eq!(host.attach_count(), 2);
        assert_eq!(host.detach_count(), 1);
        assert_eq!(renderer.visible_count(), 0);
        assert_eq!(renderer.container().unwrap().spec().edge, Edge::Front);
    }

    #[test]
    fn destroy_detaches() {
        let (mut renderer, control) = mounted(3);
        renderer.add(&LogEntry::new("log", "1"), &control);
        renderer.destroy();

        assert!(!renderer.is_mounted());
        assert_eq!(renderer.target().unwrap().detach_count(), 1);
        assert!(!renderer.add(&LogEntry::new("log", "2"), &control));
    }

    #[test]
    fn unmounted_renderer_ignores_input() {
        let mut renderer: Renderer<MemoryHost> = Renderer::new(Arc::new(ViewConfig::default()));
        let control = Control::default();
        assert!(!renderer.add(&LogEntry::new("log", "x"), &control));
        renderer.add_batch(&[&LogEntry::new("log", "y")], &control);
        renderer.reload(Arc::new(ViewConfig::default()));
        assert_eq!(renderer.visible_count(), 0);
        assert!(!renderer.is_mounted());
    }
}
