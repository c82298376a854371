pub mod completions;
pub mod preview;
pub mod variant;
