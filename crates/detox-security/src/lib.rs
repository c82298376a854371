//! Artifact denylist and token rewriting

pub mod denylist;
pub mod rewriter;

pub use denylist::ArtifactDenylist;
pub use rewriter::{Rewrite, Rewriter};
