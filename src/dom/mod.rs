pub mod node;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

pub use node::{render_all, Node};

/// Shared handle to one page's document. Controllers of the same page share
/// it; different pages never do.
pub type Page = Arc<Mutex<Document>>;

pub fn page(doc: Document) -> Page {
    Arc::new(Mutex::new(doc))
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("missing anchor #{id}")]
    MissingAnchor { id: String },

    #[error("anchor #{id} is not a form")]
    NotAForm { id: String },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub value: String,
    pub default_value: String,
    pub input_type: Option<String>,
    pub form: Option<String>,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<Node>,
    pub disabled: bool,
    pub visible: bool,
    pub required: bool,
    pub custom_validity: String,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            visible: true,
            ..Default::default()
        }
    }

    pub fn input(input_type: &str) -> Self {
        Self {
            input_type: Some(input_type.to_string()),
            ..Self::new("input")
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.default_value = value.to_string();
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn in_form(mut self, form_id: &str) -> Self {
        self.form = Some(form_id.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn text(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    pub fn set_text(&mut self, text: &str) {
        self.children = vec![Node::text(text)];
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

    pub fn inner_html(&self) -> String {
        render_all(&self.children)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Assign(String),
    Reload,
}

#[derive(Clone, Debug, Default)]
pub struct Window {
    pub navigations: Vec<Navigation>,
    pub scroll_requests: Vec<String>,
}

impl Window {
    pub fn last_navigation(&self) -> Option<&Navigation> {
        self.navigations.last()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Document {
    elements: BTreeMap<String, Element>,
    pub window: Window,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, element: Element) -> Self {
        self.insert(id, element);
        self
    }

    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_string(), element);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Result<&Element, DomError> {
        self.elements.get(id).ok_or_else(|| DomError::MissingAnchor {
            id: id.to_string(),
        })
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Element, DomError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| DomError::MissingAnchor { id: id.to_string() })
    }

    pub fn require(&self, ids: &[&str]) -> Result<(), DomError> {
        for id in ids {
            self.get(id)?;
        }
        Ok(())
    }

    pub fn value(&self, id: &str) -> Result<String, DomError> {
        Ok(self.get(id)?.value.clone())
    }

    pub fn set_value(&mut self, id: &str, value: &str) -> Result<(), DomError> {
        self.get_mut(id)?.value = value.to_string();
        Ok(())
    }

    pub fn set_text(&mut self, id: &str, text: &str) -> Result<(), DomError> {
        self.get_mut(id)?.set_text(text);
        Ok(())
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) -> Result<(), DomError> {
        self.get_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn replace_children(&mut self, id: &str, nodes: Vec<Node>) -> Result<(), DomError> {
        self.get_mut(id)?.children = nodes;
        Ok(())
    }

    pub fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.ids_where(|el| el.has_class(class))
    }

    pub fn ids_where(&self, pred: impl Fn(&Element) -> bool) -> Vec<String> {
        self.elements
            .iter()
            .filter(|(_, el)| pred(el))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn reset_form(&mut self, form_id: &str) -> Result<(), DomError> {
        if self.get(form_id)?.tag != "form" {
            return Err(DomError::NotAForm {
                id: form_id.to_string(),
            });
        }
        for el in self.elements.values_mut() {
            if el.form.as_deref() == Some(form_id) {
                el.value = el.default_value.clone();
                el.custom_validity.clear();
            }
        }
        Ok(())
    }

    pub fn scroll_into_view(&mut self, id: &str) {
        self.window.scroll_requests.push(id.to_string());
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        self.window.navigations.push(navigation);
    }
}
