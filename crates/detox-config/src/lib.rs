use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Simple configuration for detox
///
/// Policy values stay as strings here; they are resolved (and rejected if
/// unknown) before a run starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sanitize: SanitizeConfig,

    #[serde(default)]
    pub tokenizer: TokenizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeConfig {
    /// `delete` or `mask`. No default, every run must choose.
    #[serde(default)]
    pub strategy: Option<String>,

    #[serde(default = "default_classes")]
    pub classes: String,

    #[serde(default = "default_match_on")]
    pub match_on: String,

    #[serde(default = "default_mask_placeholder")]
    pub mask_placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Pretrained identifier, or `whitespace` for the built-in tokenizer
    #[serde(default = "default_identity")]
    pub identity: String,

    /// Local `tokenizer.json`; takes precedence over `identity`
    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default = "default_add_emojis")]
    pub add_emojis: bool,

    #[serde(default = "default_special_tokens")]
    pub special_tokens: Vec<String>,

    #[serde(default = "default_emoji_placeholder")]
    pub emoji_placeholder: String,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            strategy: None,
            classes: default_classes(),
            match_on: default_match_on(),
            mask_placeholder: default_mask_placeholder(),
        }
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            identity: default_identity(),
            file: None,
            add_emojis: default_add_emojis(),
            special_tokens: default_special_tokens(),
            emoji_placeholder: default_emoji_placeholder(),
        }
    }
}

fn default_classes() -> String {
    "all".to_string()
}

fn default_match_on() -> String {
    "token".to_string()
}

fn default_mask_placeholder() -> String {
    "[unused0]".to_string()
}

fn default_identity() -> String {
    "bert-base-uncased".to_string()
}

fn default_add_emojis() -> bool {
    true
}

fn default_special_tokens() -> Vec<String> {
    vec![
        "[USER]".to_string(),
        "[URL]".to_string(),
        "[EMAIL]".to_string(),
    ]
}

fn default_emoji_placeholder() -> String {
    "[EMOJI]".to_string()
}

impl Config {
    /// Load config from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "detox", "detox") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.detox/config.toml")
        }
    }
}
