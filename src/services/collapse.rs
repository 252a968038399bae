use bon::Builder;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::error::TruncateError;
use crate::models::types::{NodeKind, TruncationSettings};
use crate::services::closest_child::{Selector, closest_child};
use crate::services::truncator::truncate;
use crate::traits::tree_node::SelectorMatch;

static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("tag name pattern"));

/// How the hidden part and its reveal control are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct CollapseSettings {
    #[builder(default = "div".to_string())]
    pub wrapper_tag: String,
    #[builder(default = "element-hidden".to_string())]
    pub wrapper_class: String,
    #[builder(default = "a".to_string())]
    pub toggler_tag: String,
    #[builder(default = "Continue reading".to_string())]
    pub toggler_text: String,
    #[builder(default = "read-more".to_string())]
    pub toggler_class: String,
    #[builder(default = "#".to_string())]
    pub toggler_href: String,
}

impl Default for CollapseSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CollapseSettings {
    pub fn validate(&self) -> Result<(), TruncateError> {
        for (field, value) in [
            ("wrapper_tag", &self.wrapper_tag),
            ("toggler_tag", &self.toggler_tag),
        ] {
            if !TAG_NAME.is_match(value) {
                return Err(TruncateError::InvalidTagName {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Where a root gets split into a visible and a hidden part.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapsePlan<N> {
    pub root: N,
    /// Direct child of `root` holding the cut point; the toggler goes after it.
    pub anchor: N,
    /// Element siblings following `anchor`, in document order.
    pub hidden: Vec<N>,
}

/// Works out what to hide below `root` so roughly `min_length` chars stay visible.
///
/// Returns `None` when nothing has to be hidden: the text fit, the cut fell
/// into the root's own text, or no element follows the anchor.
pub fn plan_collapse<N: SelectorMatch>(
    root: N,
    min_length: usize,
    settings: &TruncationSettings,
) -> Result<Option<CollapsePlan<N>>, TruncateError> {
    let result = truncate([root], min_length, settings);
    if !result.truncated {
        return Ok(None);
    }
    let Some(cut) = result.last_visited else {
        return Ok(None);
    };

    let Some(anchor) = closest_child(&[cut], Selector::Node(root), None)?
        .into_iter()
        .next()
    else {
        return Ok(None);
    };
    if anchor.same_node(&root) {
        return Ok(None);
    }

    let hidden: Vec<N> = anchor
        .next_siblings()
        .filter(|sibling| sibling.kind() == NodeKind::Element)
        .collect();
    debug!(hidden = hidden.len(), "collapse: planned");
    if hidden.is_empty() {
        return Ok(None);
    }

    Ok(Some(CollapsePlan {
        root,
        anchor,
        hidden,
    }))
}

/// [`plan_collapse`] for every root, skipping roots with nothing to hide.
pub fn plan_all<N: SelectorMatch>(
    roots: &[N],
    min_length: usize,
    settings: &TruncationSettings,
) -> Result<Vec<CollapsePlan<N>>, TruncateError> {
    let mut plans = Vec::new();
    for &root in roots {
        if let Some(plan) = plan_collapse(root, min_length, settings)? {
            plans.push(plan);
        }
    }
    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::html;
    use crate::traits::tree_node::TreeNode;

    const ARTICLE: &str = r#"<article><p>First paragraph is here. It goes on.</p><p>Second paragraph.</p> <p>Third.</p></article>"#;

    fn root(doc: &scraper::Html) -> ego_tree::NodeRef<'_, scraper::Node> {
        html::select_roots(doc, "article").unwrap()[0]
    }

    #[test]
    fn hides_element_siblings_after_anchor() {
        let doc = html::parse(ARTICLE);
        let plan = plan_collapse(root(&doc), 10, &TruncationSettings::DEFAULT)
            .unwrap()
            .unwrap();
        assert_eq!(plan.anchor.local_name(), Some("p"));
        assert_eq!(plan.hidden.len(), 2);
        assert!(plan.hidden.iter().all(|n| n.kind() == NodeKind::Element));
    }

    #[test]
    fn short_text_is_left_alone() {
        let doc = html::parse(ARTICLE);
        let plan = plan_collapse(root(&doc), 500, &TruncationSettings::DEFAULT).unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn cut_in_last_child_hides_nothing() {
        let doc = html::parse("<article><p>Tiny.</p><p>Now a much longer one. Really.</p></article>");
        let plan = plan_collapse(root(&doc), 12, &TruncationSettings::DEFAULT).unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn cut_in_root_text_hides_nothing() {
        let doc = html::parse("<article>Root text is long enough. Yes.<p>child</p></article>");
        let plan = plan_collapse(root(&doc), 5, &TruncationSettings::DEFAULT).unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn default_settings_match_the_classic_markup() {
        let settings = CollapseSettings::default();
        assert_eq!(settings.wrapper_tag, "div");
        assert_eq!(settings.wrapper_class, "element-hidden");
        assert_eq!(settings.toggler_text, "Continue reading");
        assert_eq!(settings.toggler_class, "read-more");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn tag_names_are_validated() {
        let settings = CollapseSettings::builder()
            .wrapper_tag("div onclick=x".to_string())
            .build();
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, TruncateError::InvalidTagName { field: "wrapper_tag", .. }));
    }
}
