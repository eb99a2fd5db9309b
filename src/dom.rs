//! A minimal page document: element hooks addressed by id.
//!
//! Controllers never reach for ambient globals. They receive `&mut Document`,
//! look up the hooks they were configured with, and mutate them. A missing
//! optional hook is simply skipped; a missing mandatory container turns the
//! render into a no-op.
//!
//! Element content is always replaced wholesale ([`Element::replace_content`]),
//! never diffed or appended, so every render is a single synchronous pass.
//!
//! # Trusted markup
//!
//! Some record fields (post `title`, `summary`, `content`, project `title` and
//! `description`) are HTML authored by the site operator and are inserted
//! without escaping. That trust decision is made in exactly one place,
//! [`trusted_markup`], so a sanitizer can later be added there without touching
//! any call site.

use maud::{Markup, PreEscaped, html};
use std::collections::{BTreeMap, BTreeSet};

/// Insert operator-authored HTML verbatim.
///
/// The content API is operator-controlled, not user-submitted; this is the one
/// place that assumption is encoded.
pub fn trusted_markup(raw: &str) -> PreEscaped<String> {
    PreEscaped(raw.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    content: String,
    hidden: bool,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Current inner HTML.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the element's contents with rendered markup.
    pub fn replace_content(&mut self, markup: Markup) {
        self.content = markup.into_string();
    }

    /// Replace the element's contents with escaped text.
    pub fn set_text(&mut self, text: &str) {
        self.replace_content(html! { (text) });
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Flip `class`; returns whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.classes.remove(class) {
            false
        } else {
            self.classes.insert(class.to_string());
            true
        }
    }

    /// Space-joined class list, `None` when empty.
    pub fn class_attr(&self) -> Option<String> {
        if self.classes.is_empty() {
            None
        } else {
            Some(self.classes.iter().cloned().collect::<Vec<_>>().join(" "))
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }
}

/// The page's title plus every element hook, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Document {
    title: String,
    elements: BTreeMap<String, Element>,
}

impl Document {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            elements: BTreeMap::new(),
        }
    }

    pub fn with_element(mut self, id: &str, element: Element) -> Self {
        self.insert(id, element);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_string(), element);
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Detach an element from the page. Removing a missing id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    /// Run `f` on the element if the page has it.
    pub fn with<F: FnOnce(&mut Element)>(&mut self, id: &str, f: F) {
        if let Some(el) = self.elements.get_mut(id) {
            f(el);
        }
    }

    /// Mutable access to every element carrying `class`, in id order.
    pub fn elements_with_class_mut<'a>(
        &'a mut self,
        class: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a mut Element)> {
        self.elements
            .iter_mut()
            .filter(move |(_, el)| el.has_class(class))
            .map(|(id, el)| (id.as_str(), el))
    }

    pub fn elements_with_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Element)> {
        self.elements
            .iter()
            .filter(move |(_, el)| el.has_class(class))
            .map(|(id, el)| (id.as_str(), el))
    }
}
