//! HTML serialization of the console container.

use crate::element::RenderedElement;
use crate::memory::MemoryContainer;
use crate::render::ContainerSpec;

/// Serializes a container and its children, front first.
pub fn container_html<'a>(
    spec: &ContainerSpec,
    children: impl IntoIterator<Item = &'a RenderedElement>,
) -> String {
    let mut out = format!(
        r#"<div id="{}" style="{}" tabindex="{}">"#,
        escape(&spec.id),
        escape(&spec.style),
        spec.tab_index
    );
    for child in children {
        out.push_str(&element_html(child));
    }
    out.push_str("</div>");
    out
}

/// Serializes one rendered entry; the message is escaped.
pub fn element_html(element: &RenderedElement) -> String {
    let tag = element.tag.as_str();
    format!(
        r#"<{tag} class="{}">{}</{tag}>"#,
        escape(&element.class_name),
        escape(&element.message)
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl MemoryContainer {
    pub fn to_html(&self) -> String {
        container_html(self.spec(), self.children())
    }
}
