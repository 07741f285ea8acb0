//! Rendered document of the simulated console.
//!
//! There is no XPath engine here. Each render registers, for every locator the
//! page objects use, which nodes that locator resolves to (optionally scoped to
//! a parent node). Lookups with a locator nobody registered find nothing, the
//! same as a selector that matches no element in a real browser.

use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use infra_pages_widgets::{Element, Locator};

/// What clicking a node does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Login,
    Logout,
    Menu(String),
    ToggleDropdown(String),
    DropdownItem { menu: String, item: String },
    OpenPool(String),
    PagerFirst,
    PagerNext,
    Search,
    ClearSearch,
    ViewMode(String),
    ToggleAccordion { body: usize },
    TreeNode(String),
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub tag: &'static str,
    pub text: String,
    pub attrs: BTreeMap<String, String>,
    pub action: Option<Action>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn class(self, classes: impl Into<String>) -> Self {
        self.attr("class", classes)
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attrs
            .get("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = self.attrs.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
    }

    pub fn remove_class(&mut self, class: &str) {
        if let Some(classes) = self.attrs.get_mut("class") {
            *classes = classes
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }
}

/// One render of a page. Element references carry the render id, so a
/// reference handed out by an earlier render is recognised as stale.
#[derive(Debug)]
pub struct Dom {
    render: Uuid,
    nodes: Vec<Node>,
    index: HashMap<(Option<usize>, Locator), Vec<usize>>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    pub fn new() -> Self {
        Self {
            render: Uuid::new_v4(),
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn add(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Make `locator` resolve to `nodes` (appended to earlier registrations).
    pub fn expose(&mut self, parent: Option<usize>, locator: Locator, nodes: &[usize]) {
        self.index
            .entry((parent, locator))
            .or_default()
            .extend_from_slice(nodes);
    }

    /// Add a node and make `locator` resolve to it.
    pub fn add_exposed(&mut self, parent: Option<usize>, locator: Locator, node: Node) -> usize {
        let id = self.add(node);
        self.expose(parent, locator, &[id]);
        id
    }

    pub fn query(&self, parent: Option<usize>, locator: &Locator) -> Vec<usize> {
        self.index
            .get(&(parent, locator.clone()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: usize) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn element(&self, id: usize) -> Element {
        Element::new(format!("{}-{id}", self.render))
    }

    /// Node index behind `element`, `None` when it belongs to another render.
    pub fn resolve(&self, element: &Element) -> Option<usize> {
        let (render, id) = element.id().rsplit_once('-')?;
        if render != self.render.to_string() {
            return None;
        }
        id.parse::<usize>().ok().filter(|id| *id < self.nodes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_of_older_render_do_not_resolve() {
        let mut first = Dom::new();
        let title = first.add_exposed(None, Locator::xpath("//h1"), Node::new("h1").text("A"));
        let element = first.element(title);
        assert_eq!(first.resolve(&element), Some(title));

        let mut second = Dom::new();
        second.add_exposed(None, Locator::xpath("//h1"), Node::new("h1").text("A"));
        assert_eq!(second.resolve(&element), None);
        assert_eq!(second.resolve(&Element::new("garbage")), None);
    }

    #[test]
    fn test_scoped_queries_and_classes() {
        let mut dom = Dom::new();
        let table = dom.add_exposed(None, Locator::xpath("//table"), Node::new("table"));
        let row = dom.add(Node::new("tr").class("row"));
        dom.expose(Some(table), Locator::xpath("./tr"), &[row]);

        assert_eq!(dom.query(Some(table), &Locator::xpath("./tr")), vec![row]);
        assert!(dom.query(None, &Locator::xpath("./tr")).is_empty());

        let node = dom.node_mut(row).unwrap();
        node.add_class("in");
        node.add_class("in");
        assert_eq!(node.attrs["class"], "row in");
        node.remove_class("row");
        assert!(node.has_class("in"));
        assert!(!node.has_class("row"));
    }
}
