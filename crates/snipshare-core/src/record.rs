use crate::error::CoreError;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Display-hint tag for a snippet body.
///
/// The registry never interprets this; it exists so the retrieving side
/// can pick a highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
    Python,
    Rust,
    Go,
    Java,
    Csharp,
    Cpp,
    C,
    Ruby,
    Php,
    Html,
    Css,
    Sql,
    Bash,
    Json,
    Yaml,
    Markdown,
    #[default]
    Plaintext,
}

impl Language {
    /// Returns the lowercase wire tag for this language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Go => "go",
            Language::Java => "java",
            Language::Csharp => "csharp",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Html => "html",
            Language::Css => "css",
            Language::Sql => "sql",
            Language::Bash => "bash",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Markdown => "markdown",
            Language::Plaintext => "plaintext",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "javascript" => Ok(Language::Javascript),
            "typescript" => Ok(Language::Typescript),
            "python" => Ok(Language::Python),
            "rust" => Ok(Language::Rust),
            "go" => Ok(Language::Go),
            "java" => Ok(Language::Java),
            "csharp" => Ok(Language::Csharp),
            "cpp" => Ok(Language::Cpp),
            "c" => Ok(Language::C),
            "ruby" => Ok(Language::Ruby),
            "php" => Ok(Language::Php),
            "html" => Ok(Language::Html),
            "css" => Ok(Language::Css),
            "sql" => Ok(Language::Sql),
            "bash" => Ok(Language::Bash),
            "json" => Ok(Language::Json),
            "yaml" => Ok(Language::Yaml),
            "markdown" => Ok(Language::Markdown),
            "plaintext" => Ok(Language::Plaintext),
            other => Err(CoreError::InvalidLanguage(other.to_string())),
        }
    }
}

/// A stored snippet.
///
/// The share code is the repository key and is not duplicated in the
/// record. Records are immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetRecord {
    /// Display title; never empty once published.
    pub title: String,
    /// The raw snippet text, stored verbatim.
    pub body: String,
    /// Display hint for the retrieving side.
    pub language: Language,
    /// Instant of publication.
    pub created_at: Timestamp,
    /// `created_at` plus the registry TTL, fixed at creation.
    pub expires_at: Timestamp,
}

impl SnippetRecord {
    /// Liveness is derived from time at the moment of asking; it is
    /// never stored.
    pub fn is_live(&self, now: Timestamp) -> bool {
        now < self.expires_at
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        !self.is_live(now)
    }
}

/// Parameters for publishing a snippet.
#[derive(Debug, Clone)]
pub struct PublishParams {
    /// Display title; a timestamped placeholder is substituted when
    /// absent or whitespace-only.
    pub title: Option<String>,
    /// The snippet text. Publish rejects a whitespace-only body.
    pub body: String,
    /// Display hint for the retrieving side.
    pub language: Language,
}
