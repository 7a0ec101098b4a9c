//! Keyed element tree rendered by the simulated application

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use crate::driver::Locator;

use super::app::Action;

/// Builder for one element and its children.
///
/// `key` identifies the element across re-renders, the way a framework
/// keeps a DOM node alive while its component survives.
#[derive(Debug, Clone)]
pub(crate) struct El {
    key: String,
    tag: String,
    attrs: BTreeMap<String, String>,
    text: String,
    hidden: bool,
    action: Option<Action>,
    children: Vec<El>,
}

impl El {
    pub(crate) fn new(key: impl Into<String>, tag: &str) -> Self {
        Self {
            key: key.into(),
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            text: String::new(),
            hidden: false,
            action: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub(crate) fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub(crate) fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub(crate) fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub(crate) fn on_click(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub(crate) fn child(mut self, child: El) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn children(mut self, children: impl IntoIterator<Item = El>) -> Self {
        self.children.extend(children);
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub key: String,
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub hidden: bool,
    pub action: Option<Action>,
    pub children: Vec<usize>,
    pub parent: Option<usize>,
}

impl Node {
    pub fn has_class(&self, class: &str) -> bool {
        self.attrs
            .get("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// `tag.first-class`, for error messages
    pub fn describe(&self) -> String {
        match self
            .attrs
            .get("class")
            .and_then(|c| c.split_whitespace().next())
        {
            Some(class) => format!("{}.{}", self.tag, class),
            None => self.tag.clone(),
        }
    }
}

/// Flattened element tree, index 0 is the root
#[derive(Debug, Default)]
pub(crate) struct Dom {
    nodes: Vec<Node>,
    by_key: HashMap<String, usize>,
}

impl Dom {
    pub fn build(root: El) -> Self {
        let mut dom = Dom::default();
        dom.insert(root, None);
        dom
    }

    fn insert(&mut self, el: El, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        debug_assert!(
            !self.by_key.contains_key(&el.key),
            "duplicate element key {}",
            el.key
        );
        self.by_key.insert(el.key.clone(), index);
        self.nodes.push(Node {
            key: el.key,
            tag: el.tag,
            attrs: el.attrs,
            text: el.text,
            hidden: el.hidden,
            action: el.action,
            children: Vec::new(),
            parent,
        });

        for child in el.children {
            let child_index = self.insert(child, Some(index));
            self.nodes[index].children.push(child_index);
        }
        index
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn find(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// Descendants of `scope` in document order, `scope` itself excluded
    pub fn descendants(&self, scope: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[scope].children.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            out.push(index);
            stack.extend(self.nodes[index].children.iter().rev());
        }
        out
    }

    /// Own text of `index` and every descendant, space separated
    pub fn subtree_text(&self, index: usize) -> String {
        std::iter::once(index)
            .chain(self.descendants(index))
            .map(|i| self.nodes[i].text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Hidden itself or below a hidden ancestor
    pub fn is_hidden(&self, index: usize) -> bool {
        self.ancestors_and_self(index).any(|i| self.nodes[i].hidden)
    }

    pub fn ancestors_and_self(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(index), move |&i| self.nodes[i].parent)
    }

    /// Nearest element, from `index` upwards, that reacts to clicks
    pub fn click_target(&self, index: usize) -> Option<Action> {
        self.ancestors_and_self(index)
            .find_map(|i| self.nodes[i].action.clone())
    }

    pub fn matches(&self, index: usize, locator: &Locator) -> bool {
        let node = &self.nodes[index];
        match locator {
            Locator::Tag(tag) => node.tag == *tag,
            Locator::Class(class) => node.has_class(class),
            Locator::Attribute { name, value } => node.attrs.get(name) == Some(value),
            Locator::Text(text) => node.text.contains(text.as_str()),
            Locator::TagWithText { tag, text } => {
                node.tag == *tag && self.subtree_text(index).contains(text.as_str())
            }
        }
    }

    /// Indented outline of the tree, used as the simulated screenshot
    pub fn outline(&self) -> String {
        let mut out = String::new();
        if !self.nodes.is_empty() {
            self.outline_into(0, 0, &mut out);
        }
        out
    }

    fn outline_into(&self, index: usize, depth: usize, out: &mut String) {
        let node = &self.nodes[index];
        let _ = write!(out, "{}<{}", "  ".repeat(depth), node.tag);
        for (name, value) in &node.attrs {
            let _ = write!(out, " {}=\"{}\"", name, value);
        }
        let _ = writeln!(out, ">{}", node.text);
        for &child in &node.children {
            self.outline_into(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dom {
        Dom::build(
            El::new("root", "html").child(
                El::new("card", "nb-card")
                    .child(El::new("card/header", "nb-card-header").text("Inline form"))
                    .child(
                        El::new("card/form", "form").child(
                            El::new("card/form/check", "input")
                                .attr("type", "checkbox")
                                .class("native-input visually-hidden")
                                .hidden(),
                        ),
                    ),
            ),
        )
    }

    #[test]
    fn test_descendants_in_document_order() {
        let dom = sample();
        let keys: Vec<_> = dom
            .descendants(0)
            .into_iter()
            .map(|i| dom.node(i).key.clone())
            .collect();
        assert_eq!(keys, ["card", "card/header", "card/form", "card/form/check"]);
    }

    #[test]
    fn test_tag_with_text_matches_on_subtree() {
        let dom = sample();
        let card = dom.find("card").unwrap();
        assert!(dom.matches(card, &Locator::tag_with_text("nb-card", "Inline form")));
        assert!(!dom.matches(card, &Locator::text("Inline form")));
    }

    #[test]
    fn test_hidden_and_classes() {
        let dom = sample();
        let check = dom.find("card/form/check").unwrap();
        assert!(dom.is_hidden(check));
        assert!(dom.matches(check, &Locator::class("visually-hidden")));
        assert_eq!(dom.node(check).describe(), "input.native-input");
        assert!(!dom.is_hidden(dom.find("card").unwrap()));
    }
}
