//! Resolves CLI flags and the config file into typed run settings.
//!
//! Every free-form policy string is parsed here, once, so an unknown value
//! fails before any file is opened.

use crate::cli::PolicyArgs;
use anyhow::{Context, Result};
use detox_config::Config;
use detox_core::{ClassFilter, ConfigError, MatchTarget, Strategy};
use detox_engine::Sanitizer;
use detox_security::{ArtifactDenylist, Rewriter};
use detox_tokens::whitespace::WHITESPACE_TOKENIZER;
use detox_tokens::{
    EmojiVocabulary, HfTokenizer, ReservedVocabulary, SubwordTokenizer, TokenizerSource,
    WhitespaceTokenizer,
};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerChoice {
    Whitespace,
    HuggingFace(TokenizerSource),
}

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub artifacts: PathBuf,
    pub strategy: Strategy,
    pub class_filter: ClassFilter,
    pub match_target: MatchTarget,
    pub mask_placeholder: String,
    pub tokenizer: TokenizerChoice,
    pub vocabulary: ReservedVocabulary,
}

impl RunSettings {
    /// CLI flags take precedence over the config file
    pub fn resolve(args: &PolicyArgs, config: &Config) -> std::result::Result<Self, ConfigError> {
        let strategy = args
            .strategy
            .as_deref()
            .or(config.sanitize.strategy.as_deref())
            .ok_or(ConfigError::MissingOption("strategy"))?
            .parse::<Strategy>()?;

        let class_filter = args
            .classes
            .as_deref()
            .unwrap_or(&config.sanitize.classes)
            .parse::<ClassFilter>()?;

        let match_target = args
            .match_on
            .as_deref()
            .unwrap_or(&config.sanitize.match_on)
            .parse::<MatchTarget>()?;

        let mask_placeholder = args
            .mask_placeholder
            .clone()
            .unwrap_or_else(|| config.sanitize.mask_placeholder.clone());

        let tokenizer = match (&args.tokenizer_file, &args.tokenizer) {
            (Some(path), _) => TokenizerChoice::HuggingFace(TokenizerSource::File(path.clone())),
            (None, Some(identity)) => tokenizer_by_identity(identity),
            (None, None) => match &config.tokenizer.file {
                Some(path) => TokenizerChoice::HuggingFace(TokenizerSource::File(path.clone())),
                None => tokenizer_by_identity(&config.tokenizer.identity),
            },
        };

        let add_emojis = config.tokenizer.add_emojis && !args.no_emojis;
        let emoji = if add_emojis {
            EmojiVocabulary::Glyphs
        } else {
            EmojiVocabulary::Placeholder(config.tokenizer.emoji_placeholder.clone())
        };
        let vocabulary = ReservedVocabulary::new(config.tokenizer.special_tokens.clone(), emoji);

        Ok(Self {
            artifacts: args.artifacts.clone(),
            strategy,
            class_filter,
            match_target,
            mask_placeholder,
            tokenizer,
            vocabulary,
        })
    }

    /// Load the tokenizer and register the reserved vocabulary
    pub fn build_tokenizer(&self) -> Result<Box<dyn SubwordTokenizer>> {
        let mut tokenizer: Box<dyn SubwordTokenizer> = match &self.tokenizer {
            TokenizerChoice::Whitespace => Box::new(WhitespaceTokenizer::new()),
            TokenizerChoice::HuggingFace(source) => Box::new(HfTokenizer::load(source)?),
        };
        self.vocabulary.register(&mut tokenizer)?;
        Ok(tokenizer)
    }

    pub fn build_sanitizer(&self) -> Result<Sanitizer<Box<dyn SubwordTokenizer>>> {
        let denylist = ArtifactDenylist::load(&self.artifacts).with_context(|| {
            format!("Failed to read artifact list {}", self.artifacts.display())
        })?;
        tracing::info!(artifacts = denylist.len(), "Loaded artifact list");

        let rewriter = Rewriter::new(denylist, self.strategy)
            .with_placeholder(self.mask_placeholder.clone())
            .with_match_target(self.match_target);

        Ok(Sanitizer::new(self.build_tokenizer()?, rewriter, self.class_filter))
    }
}

fn tokenizer_by_identity(identity: &str) -> TokenizerChoice {
    if identity == WHITESPACE_TOKENIZER {
        TokenizerChoice::Whitespace
    } else {
        TokenizerChoice::HuggingFace(TokenizerSource::Pretrained(identity.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strategy: Option<&str>) -> PolicyArgs {
        PolicyArgs {
            artifacts: PathBuf::from("artifacts.txt"),
            strategy: strategy.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = RunSettings::resolve(&args(Some("mask")), &Config::default()).unwrap();

        assert_eq!(settings.strategy, Strategy::Mask);
        assert_eq!(settings.class_filter, ClassFilter::All);
        assert_eq!(settings.match_target, MatchTarget::Token);
        assert_eq!(settings.mask_placeholder, "[unused0]");
        assert_eq!(
            settings.tokenizer,
            TokenizerChoice::HuggingFace(TokenizerSource::Pretrained(
                "bert-base-uncased".to_string()
            ))
        );
        assert_eq!(settings.vocabulary.emoji(), &EmojiVocabulary::Glyphs);
    }

    #[test]
    fn test_unknown_strategy() {
        let err = RunSettings::resolve(&args(Some("frobnicate")), &Config::default()).unwrap_err();
        assert_eq!(err, ConfigError::UnknownStrategy("frobnicate".to_string()));
    }

    #[test]
    fn test_missing_strategy() {
        let err = RunSettings::resolve(&args(None), &Config::default()).unwrap_err();
        assert_eq!(err, ConfigError::MissingOption("strategy"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = Config::default();
        config.sanitize.strategy = Some("mask".to_string());
        config.sanitize.classes = "hateful".to_string();
        config.tokenizer.identity = "whitespace".to_string();

        let from_config = RunSettings::resolve(&args(None), &config).unwrap();
        assert_eq!(from_config.strategy, Strategy::Mask);
        assert_eq!(from_config.class_filter, ClassFilter::HatefulOnly);
        assert_eq!(from_config.tokenizer, TokenizerChoice::Whitespace);

        let mut overridden = args(Some("del"));
        overridden.classes = Some("all".to_string());
        overridden.tokenizer_file = Some(PathBuf::from("tokenizer.json"));
        let from_cli = RunSettings::resolve(&overridden, &config).unwrap();
        assert_eq!(from_cli.strategy, Strategy::Delete);
        assert_eq!(from_cli.class_filter, ClassFilter::All);
        assert_eq!(
            from_cli.tokenizer,
            TokenizerChoice::HuggingFace(TokenizerSource::File(PathBuf::from("tokenizer.json")))
        );
    }

    #[test]
    fn test_no_emojis_flag() {
        let mut flagged = args(Some("mask"));
        flagged.no_emojis = true;

        let settings = RunSettings::resolve(&flagged, &Config::default()).unwrap();

        assert_eq!(
            settings.vocabulary.emoji(),
            &EmojiVocabulary::Placeholder("[EMOJI]".to_string())
        );
    }

    #[test]
    fn test_whitespace_tokenizer_build() {
        let mut whitespace = args(Some("mask"));
        whitespace.tokenizer = Some("whitespace".to_string());
        let settings = RunSettings::resolve(&whitespace, &Config::default()).unwrap();

        let tokenizer = settings.build_tokenizer().unwrap();

        assert_eq!(tokenizer.tokenize("a  b").unwrap(), vec!["a", "b"]);
    }
}
