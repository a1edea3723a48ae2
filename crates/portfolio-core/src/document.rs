//! In-memory page model that the binder and the page behaviors mutate.
//!
//! Elements live in an arena indexed by [`ElementId`]. The model only tracks
//! what the page script touches: ids, classes, attributes, text, inner HTML,
//! inline style and layout boxes reported by the host.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Mutations the config binder performs on a page.
pub trait Document {
    /// Replace the text content of the element with `element_id`. Returns
    /// `false` when no such element exists.
    fn set_text_content(&mut self, element_id: &str, text: &str) -> bool;
    /// Set an inline style property (including custom properties) on the
    /// document root element.
    fn set_root_style(&mut self, property: &str, value: &str);
    /// Set an inline style property on `<body>`.
    fn set_body_style(&mut self, property: &str, value: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub usize);

/// Vertical layout box in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub classes: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub inner_html: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Rect>,
    #[serde(skip)]
    pub parent: Option<ElementId>,
    #[serde(skip)]
    pub children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageDocument {
    elements: Vec<Element>,
    root: ElementId,
    body: ElementId,
}

impl Default for PageDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PageDocument {
    /// Empty page with just `<html>` and `<body>`.
    pub fn new() -> Self {
        let mut doc = Self {
            elements: vec![Element::new("html")],
            root: ElementId(0),
            body: ElementId(0),
        };
        doc.body = doc.append(doc.root, Element::new("body"));
        doc
    }

    /// Page whose root is `root`; the body is assigned once parsing finds it.
    pub(crate) fn with_root(root: Element) -> Self {
        Self {
            elements: vec![root],
            root: ElementId(0),
            body: ElementId(0),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub(crate) fn set_body(&mut self, body: ElementId) {
        self.body = body;
    }

    /// Attach `element` as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        element.parent = Some(parent);
        element.children.clear();
        if let Some(id_attr) = element.attributes.get("id").cloned() {
            element.id = Some(id_attr);
        }
        if let Some(class_attr) = element.attributes.get("class").cloned() {
            element
                .classes
                .extend(class_attr.split_whitespace().map(str::to_string));
        }
        self.elements.push(element);
        self.elements[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// First attached element whose `id` attribute matches.
    pub fn element_by_id(&self, element_id: &str) -> Option<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .find(|id| self.elements[id.0].id.as_deref() == Some(element_id))
    }

    /// Attached elements carrying `class`, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.descendants_with_class(self.root, class)
    }

    /// Descendants of `scope` (excluding `scope`) carrying `class`.
    pub fn descendants_with_class(&self, scope: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| *id != scope && self.elements[id.0].has_class(class))
            .collect()
    }

    pub fn text(&self, element_id: &str) -> Option<&str> {
        self.element_by_id(element_id)
            .map(|id| self.elements[id.0].text.as_str())
    }

    pub fn root_style(&self, property: &str) -> Option<&str> {
        self.elements[self.root.0].style(property)
    }

    pub fn body_style(&self, property: &str) -> Option<&str> {
        self.elements[self.body.0].style(property)
    }

    /// Position of `id` among its parent's children.
    pub fn index_in_parent(&self, id: ElementId) -> Option<usize> {
        let parent = self.elements.get(id.0)?.parent?;
        self.elements[parent.0]
            .children
            .iter()
            .position(|child| *child == id)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id.0)?.parent
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.classes.remove(class);
        }
    }

    /// Replace the whole class list.
    pub fn set_class_name(&mut self, id: ElementId, class_name: &str) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.classes = class_name.split_whitespace().map(str::to_string).collect();
        }
    }

    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element
                .style
                .insert(property.to_string(), value.to_string());
        }
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.attributes.remove(name);
        }
    }

    pub fn set_layout(&mut self, id: ElementId, rect: Rect) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.layout = Some(rect);
        }
    }

    /// Replace an element's content with plain text, detaching its children.
    pub fn replace_text(&mut self, id: ElementId, text: &str) {
        self.detach_children(id);
        if let Some(element) = self.elements.get_mut(id.0) {
            element.text = text.to_string();
            element.inner_html = escape_html(text);
        }
    }

    /// Replace an element's content with raw markup, detaching its children.
    pub fn replace_inner_html(&mut self, id: ElementId, html: &str) {
        self.detach_children(id);
        if let Some(element) = self.elements.get_mut(id.0) {
            element.text.clear();
            element.inner_html = html.to_string();
        }
    }

    /// Elements reachable from the root, as `(id, element)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.descendants(self.root)
            .into_iter()
            .map(|id| (id, &self.elements[id.0]))
    }

    fn detach_children(&mut self, id: ElementId) {
        let Some(element) = self.elements.get_mut(id.0) else {
            return;
        };
        let children = std::mem::take(&mut element.children);
        for child in children {
            self.elements[child.0].parent = None;
        }
    }

    /// Pre-order walk starting at (and including) `start`.
    fn descendants(&self, start: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Some(element) = self.elements.get(id.0) else {
                continue;
            };
            out.push(id);
            stack.extend(element.children.iter().rev().copied());
        }
        out
    }
}

impl Document for PageDocument {
    fn set_text_content(&mut self, element_id: &str, text: &str) -> bool {
        match self.element_by_id(element_id) {
            Some(id) => {
                self.replace_text(id, text);
                true
            }
            None => false,
        }
    }

    fn set_root_style(&mut self, property: &str, value: &str) {
        trace!(property, value, "Root style updated");
        self.set_style(self.root, property, value);
    }

    fn set_body_style(&mut self, property: &str, value: &str) {
        trace!(property, value, "Body style updated");
        self.set_style(self.body, property, value);
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
