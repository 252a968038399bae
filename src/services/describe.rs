use crate::models::types::{NodeKind, NodeSummary};
use crate::traits::tree_node::TreeNode;

/// Summarizes a node so it can outlive the tree it was found in.
pub fn describe<N: TreeNode>(node: N) -> NodeSummary {
    let mut segments = Vec::new();
    let mut current = Some(node);
    while let Some(step) = current {
        if step.kind().is_tree_root() {
            break;
        }
        segments.push(segment(step));
        current = step.parent();
    }
    segments.reverse();

    let path = if segments.is_empty() {
        // Only the document or fragment itself.
        node.kind().to_string()
    } else {
        segments.join(" > ")
    };

    NodeSummary {
        kind: node.kind(),
        name: node.local_name().map(str::to_owned),
        path,
    }
}

fn segment<N: TreeNode>(node: N) -> String {
    match (node.kind(), node.local_name()) {
        (NodeKind::Element, Some(name)) => {
            let position = node
                .parent()
                .map(|parent| {
                    parent
                        .children()
                        .filter(|sibling| sibling.kind() == NodeKind::Element)
                        .position(|sibling| sibling.same_node(&node))
                        .map_or(1, |index| index + 1)
                })
                .unwrap_or(1);
            format!("{name}:nth-child({position})")
        }
        (kind, _) => kind.to_string(),
    }
}
