//! Renderer-agnostic UI element descriptions
//!
//! Generators produce a [`UiNode`] tree; the surrounding form container decides how to
//! show it. [`UiNode`] renders itself to HTML through `Display`.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::FormState;

/// Elements rendered without a closing tag
const VOID_TAGS: &[&str] = &["input", "img", "br", "hr"];

/// Class convention shared by every generated control: `<field>-<kind> periqles-<kind>`
pub fn class_for(field_name: &str, kind: &str) -> String {
    format!("{field_name}-{kind} periqles-{kind}")
}

// ============================================================================
// Form container callbacks
// ============================================================================

/// One edit of a form input
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub name: String,
    pub value: Value,
}

/// Change handler supplied by the form container, invoked on every field edit
#[derive(Clone)]
pub struct ChangeHandler(Arc<dyn Fn(FieldChange) + Send + Sync>);

impl ChangeHandler {
    pub fn new(handler: impl Fn(FieldChange) + Send + Sync + 'static) -> Self {
        Self(Arc::new(handler))
    }

    /// Handler that ignores every change
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn call(&self, change: FieldChange) {
        (self.0)(change)
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeHandler")
    }
}

impl PartialEq for ChangeHandler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// State setter supplied by the form container; only custom renderers receive it
#[derive(Clone)]
pub struct FormStateSetter(Arc<dyn Fn(FormState) + Send + Sync>);

impl FormStateSetter {
    pub fn new(setter: impl Fn(FormState) + Send + Sync + 'static) -> Self {
        Self(Arc::new(setter))
    }

    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn set(&self, state: FormState) {
        (self.0)(state)
    }
}

impl fmt::Debug for FormStateSetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FormStateSetter")
    }
}

// ============================================================================
// Element tree
// ============================================================================

/// A node of the element tree: an element or a run of text
#[derive(Debug, Clone, PartialEq)]
pub enum UiNode {
    Element(UiElement),
    Text(String),
}

impl UiNode {
    pub fn text(text: impl Into<String>) -> Self {
        UiNode::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&UiElement> {
        match self {
            UiNode::Element(element) => Some(element),
            UiNode::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            UiNode::Text(text) => text.clone(),
            UiNode::Element(element) => element.text_content(),
        }
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl From<UiElement> for UiNode {
    fn from(element: UiElement) -> Self {
        UiNode::Element(element)
    }
}

/// One element: tag, ordered attributes, children and an optional change binding
#[derive(Debug, Clone, PartialEq)]
pub struct UiElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<UiNode>,
    pub on_change: Option<ChangeHandler>,
}

impl UiElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            on_change: None,
        }
    }

    /// Set an attribute, replacing an earlier value of the same name
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
        self
    }

    pub fn attr_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Set a boolean attribute such as `checked` when `on` is true
    pub fn flag(self, name: &str, on: bool) -> Self {
        if on {
            self.attr(name, name)
        } else {
            self
        }
    }

    pub fn child(mut self, node: impl Into<UiNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = UiNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(UiNode::Text(text.into()))
    }

    pub fn on_change(mut self, handler: &ChangeHandler) -> Self {
        self.on_change = Some(handler.clone());
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.get_attr("class")
    }

    /// Forward an edit of this control to its change handler.
    ///
    /// Returns false when the element is not wired to a handler.
    pub fn emit_change(&self, value: Value) -> bool {
        match &self.on_change {
            Some(handler) => {
                handler.call(FieldChange {
                    name: self.get_attr("name").unwrap_or_default().to_string(),
                    value,
                });
                true
            }
            None => false,
        }
    }

    /// Child elements, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &UiElement> {
        self.children.iter().filter_map(UiNode::as_element)
    }

    /// All descendant elements in document order
    pub fn descendants(&self) -> Vec<&UiElement> {
        let mut found = Vec::new();
        for child in self.child_elements() {
            found.push(child);
            found.extend(child.descendants());
        }
        found
    }

    /// First element (self included) whose class list contains `class`
    pub fn find_by_class(&self, class: &str) -> Option<&UiElement> {
        std::iter::once(self)
            .chain(self.descendants())
            .find(|el| {
                el.class_name()
                    .is_some_and(|list| list.split_whitespace().any(|c| c == class))
            })
    }

    /// First element (self included) with the given tag
    pub fn find_by_tag(&self, tag: &str) -> Option<&UiElement> {
        std::iter::once(self)
            .chain(self.descendants())
            .find(|el| el.tag == tag)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(UiNode::text_content).collect()
    }
}

impl fmt::Display for UiNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiNode::Text(text) => f.write_str(&tera::escape_html(text)),
            UiNode::Element(element) => fmt::Display::fmt(element, f),
        }
    }
}

impl fmt::Display for UiElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, tera::escape_html(value))?;
        }
        f.write_str(">")?;

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return Ok(());
        }

        for child in &self.children {
            fmt::Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}
