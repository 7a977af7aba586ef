//! Release tagging
//!
//! The engine decides version numbers; git owns the tags themselves. The
//! collaborator boundary is text: a newline-delimited tag listing in, tag
//! strings out.

mod tags;
mod workflow;

pub use tags::GitTags;
pub use workflow::{cut_release, next_version, ReleaseOutcome};
