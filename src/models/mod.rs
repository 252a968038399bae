pub mod error;
pub mod job;
pub mod types;

pub use error::TruncateError;
pub use job::{Action, Job};
pub use types::{
    CutReport, DocumentFormat, NodeKind, NodeSummary, ReturnMode, Truncated, TruncationResult,
    TruncationSettings,
};
