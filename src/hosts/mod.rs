//! Tree adapters for the document models the crate reads.

pub mod html;
pub mod xml;
