use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::{Document, Node, NodeId, NodeType};

use crate::models::error::TruncateError;
use crate::models::types::NodeKind;
use crate::traits::tree_node::{SelectorMatch, TreeNode};

static NAME_SELECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\*|[A-Za-z_][\w.\-]*)$").expect("xml name selector pattern"));

/// Element local name, or any element for `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSelector {
    Any,
    Local(String),
}

impl<'a, 'input> TreeNode for Node<'a, 'input> {
    type Id = NodeId;

    fn id(&self) -> NodeId {
        Node::id(self)
    }

    fn kind(&self) -> NodeKind {
        match self.node_type() {
            NodeType::Root => NodeKind::Document,
            NodeType::Element => NodeKind::Element,
            NodeType::PI => NodeKind::ProcessingInstruction,
            NodeType::Comment => NodeKind::Comment,
            NodeType::Text => NodeKind::Text,
        }
    }

    fn parent(&self) -> Option<Self> {
        Node::parent(self)
    }

    fn first_child(&self) -> Option<Self> {
        Node::first_child(self)
    }

    fn next_sibling(&self) -> Option<Self> {
        Node::next_sibling(self)
    }

    fn character_data(&self) -> Option<&str> {
        if self.is_text() { self.text() } else { None }
    }

    fn local_name(&self) -> Option<&str> {
        if self.is_element() {
            Some(self.tag_name().name())
        } else {
            None
        }
    }
}

impl<'a, 'input> SelectorMatch for Node<'a, 'input> {
    type Compiled = NameSelector;

    fn compile(selector: &str) -> Result<NameSelector, TruncateError> {
        let selector = selector.trim();
        if !NAME_SELECTOR.is_match(selector) {
            return Err(TruncateError::invalid_selector(
                selector,
                "only an element name or `*` is supported for xml",
            ));
        }
        Ok(match selector {
            "*" => NameSelector::Any,
            name => NameSelector::Local(name.to_string()),
        })
    }

    fn matches(&self, compiled: &NameSelector) -> bool {
        if !self.is_element() {
            return false;
        }
        match compiled {
            NameSelector::Any => true,
            NameSelector::Local(name) => self.tag_name().name() == name.as_str(),
        }
    }
}

pub fn parse(text: &str) -> Result<Document<'_>, TruncateError> {
    Document::parse(text).map_err(|e| TruncateError::MalformedXml {
        reason: e.to_string(),
    })
}

/// Elements matching `selector`, in document order.
pub fn select_roots<'a, 'input>(
    doc: &'a Document<'input>,
    selector: &str,
) -> Result<Vec<Node<'a, 'input>>, TruncateError> {
    let compiled = <Node<'a, 'input> as SelectorMatch>::compile(selector)?;
    Ok(doc
        .descendants()
        .filter(|node| node.matches(&compiled))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::TruncationSettings;
    use crate::services::closest_child::{Selector, closest_child};
    use crate::services::truncator::truncate;

    const FEED: &str = r#"<feed><entry><title>First</title><summary>One sentence here. Another one.</summary></entry><!-- skip. me --><entry><summary>Later.</summary></entry></feed>"#;

    #[test]
    fn truncates_across_xml_elements() {
        let doc = parse(FEED).unwrap();
        let settings = TruncationSettings::builder().word_safe(false).build();
        let result = truncate([doc.root_element()], 8, &settings);
        assert_eq!(result.text, "FirstOne sentence here.");
        assert_eq!(result.last_visited.and_then(|n| n.local_name().map(str::to_owned)), Some("summary".into()));
    }

    #[test]
    fn cdata_is_read_as_text() {
        let doc = parse("<r><![CDATA[Raw <b>text</b>. Tail]]></r>").unwrap();
        let settings = TruncationSettings::builder().word_safe(false).build();
        let result = truncate([doc.root_element()], 3, &settings);
        assert_eq!(result.text, "Raw <b>text</b>.");
    }

    #[test]
    fn closest_child_by_name() {
        let doc = parse(FEED).unwrap();
        let summary = select_roots(&doc, "summary").unwrap()[0];
        let found = closest_child(&[summary], Selector::Css("feed"), None).unwrap();
        assert_eq!(found[0].local_name(), Some("entry"));
    }

    #[test]
    fn css_syntax_is_rejected_for_xml() {
        let err = select_roots(&parse(FEED).unwrap(), "feed > entry").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn malformed_input_is_reported() {
        let err = parse("<open>").unwrap_err();
        assert!(matches!(err, TruncateError::MalformedXml { .. }));
    }
}
