//! Builds a [`PageDocument`] from page markup.

use crate::document::{Element, ElementId, PageDocument};
use anyhow::{Context, Result};
use scraper::{ElementRef, Html};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub fn parse_page(markup: &str) -> PageDocument {
    let parsed = Html::parse_document(markup);
    let html = parsed.root_element();
    let mut root = convert(html);
    root.id = root.attributes.get("id").cloned();
    let mut doc = PageDocument::with_root(root);
    copy_children(html, doc.root(), &mut doc);
    debug!(elements = doc.iter().count(), "Parsed page markup");
    doc
}

pub fn load_page(path: &Path) -> Result<PageDocument> {
    let markup =
        fs::read_to_string(path).with_context(|| format!("reading page {}", path.display()))?;
    let doc = parse_page(&markup);
    info!(path = %path.display(), "Loaded page");
    Ok(doc)
}

fn copy_children(source: ElementRef<'_>, parent: ElementId, doc: &mut PageDocument) {
    for child in source.children().filter_map(ElementRef::wrap) {
        let id = doc.append(parent, convert(child));
        if child.value().name() == "body" {
            doc.set_body(id);
        }
        copy_children(child, id, doc);
    }
}

fn convert(source: ElementRef<'_>) -> Element {
    let mut element = Element::new(source.value().name());
    for (name, value) in source.value().attrs() {
        element
            .attributes
            .insert(name.to_string(), value.to_string());
    }
    element.text = source.text().collect();
    element.inner_html = source.inner_html();
    element
}
