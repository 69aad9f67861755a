//! In-memory render target, used by the headless host and by tests.

use std::collections::VecDeque;

use crate::element::RenderedElement;
use crate::render::{ContainerSpec, Edge, RenderTarget, VisualList};

/// A render target that keeps containers as plain values.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    attached: usize,
    detached: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many containers have been attached so far.
    pub fn attach_count(&self) -> usize {
        self.attached
    }

    /// How many containers have been detached so far.
    pub fn detach_count(&self) -> usize {
        self.detached
    }
}

impl RenderTarget for MemoryHost {
    type Container = MemoryContainer;

    fn attach(&mut self, spec: &ContainerSpec) -> MemoryContainer {
        self.attached += 1;
        MemoryContainer::new(spec.clone())
    }

    fn detach(&mut self, _container: MemoryContainer) {
        self.detached += 1;
    }
}

/// Ordered children of one container; index 0 is the front.
#[derive(Debug, Clone)]
pub struct MemoryContainer {
    spec: ContainerSpec,
    children: VecDeque<RenderedElement>,
    batch_insertions: usize,
}

impl MemoryContainer {
    pub fn new(spec: ContainerSpec) -> Self {
        Self {
            spec,
            children: VecDeque::new(),
            batch_insertions: 0,
        }
    }

    pub fn spec(&self) -> &ContainerSpec {
        &self.spec
    }

    /// Children, front first.
    pub fn children(&self) -> &VecDeque<RenderedElement> {
        &self.children
    }

    /// Number of batch insertions performed (each counts once, whatever its size).
    pub fn batch_insertions(&self) -> usize {
        self.batch_insertions
    }
}

impl VisualList for MemoryContainer {
    fn insert_at_edge(&mut self, element: RenderedElement, edge: Edge) {
        match edge {
            Edge::Front => self.children.push_front(element),
            Edge::Back => self.children.push_back(element),
        }
    }

    fn insert_batch_at_edge(&mut self, elements: Vec<RenderedElement>, edge: Edge) {
        self.batch_insertions += 1;
        match edge {
            Edge::Front => {
                let mut fragment: VecDeque<RenderedElement> = elements.into();
                fragment.append(&mut self.children);
                self.children = fragment;
            }
            Edge::Back => self.children.extend(elements),
        }
    }

    fn remove_at(&mut self, edge: Edge) -> Option<RenderedElement> {
        match edge {
            Edge::Front => self.children.pop_front(),
            Edge::Back => self.children.pop_back(),
        }
    }

    fn clear(&mut self) {
        self.children.clear();
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }
}
