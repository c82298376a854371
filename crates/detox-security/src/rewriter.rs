use crate::denylist::ArtifactDenylist;
use detox_core::policy::DEFAULT_MASK_PLACEHOLDER;
use detox_core::{AlignedToken, MatchTarget, Strategy};

/// Outcome of rewriting one token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite<'a> {
    /// Original text, passed through untouched
    Kept(&'a str),
    /// Replacement for an artifact token
    Replaced(&'a str),
}

impl Rewrite<'_> {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Rewrite::Replaced(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Rewrite::Kept(s) | Rewrite::Replaced(s) => s,
        }
    }
}

impl AsRef<str> for Rewrite<'_> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Replaces artifact tokens according to a fixed strategy
#[derive(Debug, Clone)]
pub struct Rewriter {
    denylist: ArtifactDenylist,
    strategy: Strategy,
    match_target: MatchTarget,
    replacement: String,
}

impl Rewriter {
    pub fn new(denylist: ArtifactDenylist, strategy: Strategy) -> Self {
        Self {
            denylist,
            strategy,
            match_target: MatchTarget::default(),
            replacement: replacement_for(strategy, DEFAULT_MASK_PLACEHOLDER),
        }
    }

    /// Placeholder used by the mask strategy
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.replacement = replacement_for(self.strategy, &placeholder.into());
        self
    }

    pub fn with_match_target(mut self, match_target: MatchTarget) -> Self {
        self.match_target = match_target;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Rewrite one sub-word token.
    ///
    /// Only pieces that are themselves on the denylist are replaced; other
    /// pieces of the same word pass through.
    pub fn rewrite<'a>(&'a self, token: &str, source: &'a str) -> Rewrite<'a> {
        let candidate = match self.match_target {
            MatchTarget::Token => token,
            MatchTarget::Source => source,
        };

        if self.denylist.contains(candidate) {
            Rewrite::Replaced(&self.replacement)
        } else {
            Rewrite::Kept(source)
        }
    }

    pub fn rewrite_aligned<'a>(&'a self, aligned: &AlignedToken<'a>) -> Rewrite<'a> {
        self.rewrite(aligned.token, aligned.source)
    }
}

fn replacement_for(strategy: Strategy, placeholder: &str) -> String {
    match strategy {
        // A space keeps the neighbouring pieces from merging into a new word
        Strategy::Delete => " ".to_string(),
        Strategy::Mask => placeholder.to_string(),
    }
}
