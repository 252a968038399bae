#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use dom_truncate::hosts::html;
use ego_tree::NodeRef;
use scraper::{Html, Node};

pub fn resource(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources").join(name)
}

pub fn read_resource(name: &str) -> String {
    fs::read_to_string(resource(name)).unwrap()
}

/// First element matching `css`.
pub fn first<'a>(doc: &'a Html, css: &str) -> NodeRef<'a, Node> {
    html::select_roots(doc, css).unwrap()[0]
}

pub fn name_of(node: Option<NodeRef<'_, Node>>) -> Option<String> {
    use dom_truncate::traits::TreeNode;
    node.and_then(|n| n.local_name().map(str::to_owned))
}

/// Longest run of consecutive whitespace chars in `text`.
pub fn longest_whitespace_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch.is_whitespace() {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
