use crate::core::tree::MenuTree;
use crate::domain::model::{MenuItem, PageItem};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineOptions {
    /// Skip the children of collapsed items.
    pub respect_expanded: bool,
    pub show_urls: bool,
}

fn render_item(out: &mut String, item: &MenuItem, depth: usize, options: OutlineOptions) {
    let marker = if !item.has_children() {
        "-"
    } else if item.is_expanded() {
        "▾"
    } else {
        "▸"
    };

    let _ = write!(out, "{}{} {}", "  ".repeat(depth), marker, item.label);
    if options.show_urls {
        let _ = write!(out, " ({})", item.url);
    }
    if let Some(css) = item.css_class.as_deref().filter(|c| !c.is_empty()) {
        let _ = write!(out, " [{}]", css);
    }
    if item.is_editing() {
        out.push_str(" *");
    }
    out.push('\n');

    if options.respect_expanded && !item.is_expanded() {
        return;
    }
    for child in &item.children {
        render_item(out, child, depth + 1, options);
    }
}

pub fn render_outline(tree: &MenuTree, options: OutlineOptions) -> String {
    let mut out = String::new();
    for item in tree.items() {
        render_item(&mut out, item, 0, options);
    }
    out
}

pub fn render_pages(pages: &[PageItem]) -> String {
    pages
        .iter()
        .map(|page| format!("{} ({})\n", page.name, page.url))
        .collect()
}
