use ego_tree::{NodeId, NodeRef};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Text;
use scraper::{ElementRef, Html, Node, Selector};

use crate::models::error::TruncateError;
use crate::models::types::NodeKind;
use crate::services::collapse::{CollapsePlan, CollapseSettings};
use crate::traits::tree_node::{SelectorMatch, TreeNode};

static DOCUMENT_MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<!doctype|<html[\s>]").expect("document markup pattern"));

impl<'a> TreeNode for NodeRef<'a, Node> {
    type Id = NodeId;

    fn id(&self) -> NodeId {
        NodeRef::id(self)
    }

    fn kind(&self) -> NodeKind {
        match self.value() {
            Node::Document => NodeKind::Document,
            Node::Fragment => NodeKind::DocumentFragment,
            Node::Doctype(_) => NodeKind::Doctype,
            Node::Comment(_) => NodeKind::Comment,
            Node::Text(_) => NodeKind::Text,
            Node::Element(_) => NodeKind::Element,
            Node::ProcessingInstruction(_) => NodeKind::ProcessingInstruction,
        }
    }

    fn parent(&self) -> Option<Self> {
        NodeRef::parent(self)
    }

    fn first_child(&self) -> Option<Self> {
        NodeRef::first_child(self)
    }

    fn next_sibling(&self) -> Option<Self> {
        NodeRef::next_sibling(self)
    }

    fn character_data(&self) -> Option<&str> {
        match self.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        }
    }

    fn local_name(&self) -> Option<&str> {
        match self.value() {
            Node::Element(element) => Some(element.name()),
            _ => None,
        }
    }
}

impl<'a> SelectorMatch for NodeRef<'a, Node> {
    type Compiled = Selector;

    fn compile(selector: &str) -> Result<Selector, TruncateError> {
        Selector::parse(selector).map_err(|e| TruncateError::invalid_selector(selector, e))
    }

    fn matches(&self, compiled: &Selector) -> bool {
        ElementRef::wrap(*self).is_some_and(|element| compiled.matches(&element))
    }
}

/// Parses a whole document when the markup looks like one, a body fragment otherwise.
pub fn parse(markup: &str) -> Html {
    if DOCUMENT_MARKUP.is_match(markup) {
        Html::parse_document(markup)
    } else {
        Html::parse_fragment(markup)
    }
}

/// Elements matching `css`, in document order.
pub fn select_roots<'a>(html: &'a Html, css: &str) -> Result<Vec<NodeRef<'a, Node>>, TruncateError> {
    let selector = <NodeRef<'a, Node> as SelectorMatch>::compile(css)?;
    Ok(html.select(&selector).map(|element| *element).collect())
}

/// Serializes `html` with every plan applied: the toggler right after the
/// anchor, hidden elements moved into one wrapper where the first of them was.
///
/// The plans are applied to a copy; `html` itself is left untouched.
pub fn render_collapsed(
    html: &Html,
    plans: &[CollapsePlan<NodeRef<'_, Node>>],
    settings: &CollapseSettings,
) -> Result<String, TruncateError> {
    let parts = CollapseParts::parse(settings)?;
    let mut collapsed = html.clone();
    let tree = &mut collapsed.tree;

    for plan in plans {
        let Some(first) = plan.hidden.first() else {
            continue;
        };
        if let Some(mut anchor) = tree.get_mut(plan.anchor.id()) {
            anchor.insert_after(parts.toggler.clone()).append(parts.toggler_text.clone());
        }
        let Some(mut first) = tree.get_mut(first.id()) else {
            continue;
        };
        let wrapper = first.insert_before(parts.wrapper.clone()).id();
        for node in &plan.hidden {
            if let Some(mut wrapper) = tree.get_mut(wrapper) {
                wrapper.append_id(node.id());
            }
        }
    }

    // Fragments are parsed into a synthetic <html> element; emit only its content.
    Ok(match collapsed.tree.root().value() {
        Node::Fragment => collapsed.root_element().inner_html(),
        _ => collapsed.html(),
    })
}

/// Wrapper and toggler nodes, built by the html parser from the settings.
struct CollapseParts {
    wrapper: Node,
    toggler: Node,
    toggler_text: Node,
}

impl CollapseParts {
    fn parse(settings: &CollapseSettings) -> Result<Self, TruncateError> {
        settings.validate()?;
        let markup = format!(
            r#"<{wrapper} class="{wrapper_class}"></{wrapper}><{toggler} class="{toggler_class}" href="{href}"></{toggler}>"#,
            wrapper = settings.wrapper_tag,
            wrapper_class = quote_attribute(&settings.wrapper_class),
            toggler = settings.toggler_tag,
            toggler_class = quote_attribute(&settings.toggler_class),
            href = quote_attribute(&settings.toggler_href),
        );
        let fragment = Html::parse_fragment(&markup);
        let mut elements = fragment.root_element().children().filter(|child| child.value().is_element());

        let wrapper = take_element(elements.next(), "wrapper_tag", &settings.wrapper_tag)?;
        let toggler = take_element(elements.next(), "toggler_tag", &settings.toggler_tag)?;
        Ok(CollapseParts {
            wrapper,
            toggler,
            toggler_text: Node::Text(Text {
                text: settings.toggler_text.as_str().into(),
            }),
        })
    }
}

/// The parser drops tags that cannot stand in a body, e.g. `tr` or `html`.
fn take_element(
    parsed: Option<NodeRef<'_, Node>>,
    field: &'static str,
    tag: &str,
) -> Result<Node, TruncateError> {
    match parsed {
        Some(node) if node.local_name().is_some_and(|name| name.eq_ignore_ascii_case(tag)) => {
            Ok(node.value().clone())
        }
        _ => Err(TruncateError::InvalidTagName {
            field,
            value: tag.to_string(),
        }),
    }
}

fn quote_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
