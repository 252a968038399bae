use ahash::AHashSet;
use tracing::trace;

use crate::models::error::TruncateError;
use crate::traits::tree_node::{SelectorMatch, TreeNode};

/// What an ancestor has to be for its child on the path to be returned.
#[derive(Debug, Clone, Copy)]
pub enum Selector<'s, N> {
    /// Selector string understood by the host tree.
    Css(&'s str),
    Node(N),
    Nodes(&'s [N]),
}

/// Selector resolved once before any walk starts.
enum Resolved<N: SelectorMatch> {
    Compiled(N::Compiled),
    Members(AHashSet<N::Id>),
}

impl<N: SelectorMatch> Resolved<N> {
    fn new(selector: Selector<'_, N>) -> Result<Self, TruncateError> {
        Ok(match selector {
            Selector::Css(css) => Resolved::Compiled(N::compile(css)?),
            Selector::Node(node) => Resolved::Members(AHashSet::from_iter([node.id()])),
            Selector::Nodes(nodes) => Resolved::Members(nodes.iter().map(TreeNode::id).collect()),
        })
    }

    fn matches(&self, node: &N) -> bool {
        match self {
            Resolved::Compiled(compiled) => node.matches(compiled),
            Resolved::Members(members) => members.contains(&node.id()),
        }
    }
}

/// For every node, finds the ancestor-or-self that sits directly below a node
/// matching `selector`.
///
/// The upward walk gives up at the document node, at a fragment root and at
/// `context`. A node that matches the selector itself is returned as is.
/// Results are deduplicated, first occurrence wins.
pub fn closest_child<N: SelectorMatch>(
    nodes: &[N],
    selector: Selector<'_, N>,
    context: Option<N>,
) -> Result<Vec<N>, TruncateError> {
    let resolved = Resolved::new(selector)?;
    let mut seen = AHashSet::new();
    let mut found = Vec::new();

    for &node in nodes {
        let Some(child) = climb(node, &resolved, context) else {
            continue;
        };
        if seen.insert(child.id()) {
            found.push(child);
        }
    }

    trace!(inputs = nodes.len(), found = found.len(), "closest_child: done");
    Ok(found)
}

fn climb<N: SelectorMatch>(node: N, resolved: &Resolved<N>, context: Option<N>) -> Option<N> {
    let mut below = node;
    let mut current = node;
    loop {
        if resolved.matches(&current) {
            return Some(below);
        }
        below = current;
        let parent = current.parent()?;
        let stop = parent.kind().is_tree_root()
            || context.is_some_and(|ctx| ctx.same_node(&parent));
        if stop {
            return None;
        }
        current = parent;
    }
}
