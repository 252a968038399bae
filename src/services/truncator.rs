use std::ops::ControlFlow;

use regex::Regex;
use tracing::{debug, trace};

use crate::models::types::{Truncated, TruncationResult, TruncationSettings};
use crate::services::boundary::{active_pattern, byte_offset};
use crate::traits::tree_node::TreeNode;

/// Truncates the text below `nodes` to at least `min_length` chars, extended to
/// the next boundary allowed by `settings`.
///
/// Nodes are walked depth-first in document order; every entry of `nodes` is
/// walked as its own subtree. The walk stops as soon as a cut is made, so
/// nodes after the cut point are never visited. When no cut can be made the
/// whole accumulated text is returned and `truncated` is `false`.
pub fn truncate<N, I>(nodes: I, min_length: usize, settings: &TruncationSettings) -> TruncationResult<N>
where
    N: TreeNode,
    I: IntoIterator<Item = N>,
{
    let mut acc = Accumulator::new(min_length, settings);
    for entry in nodes {
        if walk_subtree(entry, &mut acc).is_break() {
            acc.truncated = true;
            break;
        }
    }
    debug!(
        min_length,
        chars = acc.chars,
        truncated = acc.truncated,
        "truncate: finished"
    );
    acc.finish()
}

/// [`truncate`] on a single root, narrowed by `settings.return_mode`.
pub fn truncate_shaped<N: TreeNode>(
    node: N,
    min_length: usize,
    settings: &TruncationSettings,
) -> Truncated<N> {
    truncate([node], min_length, settings).shape(settings.return_mode)
}

/// Pre-order walk bounded to the subtree of `entry`.
fn walk_subtree<N: TreeNode>(entry: N, acc: &mut Accumulator<'_, N>) -> ControlFlow<()> {
    let mut current = entry;
    loop {
        acc.visit(current)?;

        if current.kind().is_structural() {
            if let Some(child) = current.first_child() {
                current = child;
                continue;
            }
        }

        loop {
            if current.same_node(&entry) {
                return ControlFlow::Continue(());
            }
            if let Some(sibling) = current.next_sibling() {
                current = sibling;
                break;
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => return ControlFlow::Continue(()),
            }
        }
    }
}

/// Traversal state carried across the whole walk.
struct Accumulator<'s, N> {
    text: String,
    /// Length of `text` in chars.
    chars: usize,
    min_length: usize,
    settings: &'s TruncationSettings,
    pattern: Option<&'static Regex>,
    /// Byte offset of char `min_length`, fixed once the text is long enough.
    floor: Option<usize>,
    /// Byte offset where the next boundary scan starts.
    resume: usize,
    last_visited: Option<N>,
    truncated: bool,
}

impl<'s, N: TreeNode> Accumulator<'s, N> {
    fn new(min_length: usize, settings: &'s TruncationSettings) -> Self {
        Self {
            text: String::new(),
            chars: 0,
            min_length,
            settings,
            pattern: active_pattern(settings),
            floor: None,
            resume: 0,
            last_visited: None,
            truncated: false,
        }
    }

    fn visit(&mut self, node: N) -> ControlFlow<()> {
        let kind = node.kind();
        if kind.is_text_like() {
            self.push_text(node.character_data().unwrap_or_default());
            self.settle()
        } else {
            if kind.is_structural() {
                self.last_visited = Some(node);
            }
            ControlFlow::Continue(())
        }
    }

    fn push_text(&mut self, data: &str) {
        // Leading whitespace is dropped until the first visible char.
        let data = if self.text.is_empty() { data.trim_start() } else { data };

        if !self.settings.truncate_whitespace {
            self.text.push_str(data);
            self.chars += data.chars().count();
            return;
        }

        // The prefix is already collapsed, so only a trailing space can merge
        // with a leading run of this chunk.
        let mut in_space = self.text.ends_with(' ');
        for ch in data.chars() {
            if ch.is_whitespace() {
                if !in_space {
                    self.text.push(' ');
                    self.chars += 1;
                    in_space = true;
                }
            } else {
                self.text.push(ch);
                self.chars += 1;
                in_space = false;
            }
        }
    }

    fn settle(&mut self) -> ControlFlow<()> {
        if self.chars < self.min_length {
            return ControlFlow::Continue(());
        }
        let Some(pattern) = self.pattern else {
            trace!(chars = self.chars, "truncate: hard stop");
            return ControlFlow::Break(());
        };

        let floor = *self
            .floor
            .get_or_insert_with(|| byte_offset(&self.text, self.min_length));
        let from = self.resume.max(floor);

        match pattern.find_at(&self.text, from) {
            Some(found) => {
                let index = self.text[floor..found.start()].chars().count();
                let cut = self.min_length + index + self.settings.delimiter_offset();
                let end = byte_offset(&self.text, cut);
                self.text.truncate(end);
                self.chars = cut;
                trace!(cut, "truncate: boundary found");
                ControlFlow::Break(())
            }
            None => {
                // A two-char boundary may start at the last char already seen.
                let last = self.text.char_indices().next_back().map_or(0, |(at, _)| at);
                self.resume = last.max(floor);
                ControlFlow::Continue(())
            }
        }
    }

    fn finish(self) -> TruncationResult<N> {
        TruncationResult {
            text: self.text,
            last_visited: self.last_visited,
            truncated: self.truncated,
        }
    }
}
