use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use snipshare_core::{Language, ShareCode, SnippetRecord};

/// Wire format matches the original snippet API: camelCase fields,
/// lowercase language tags.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishSnippetRequest {
    pub title: Option<String>,
    pub body: String,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareCodeResponse {
    pub share_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetResponse {
    pub share_code: String,
    pub title: String,
    pub body: String,
    pub language: Language,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl SnippetResponse {
    pub fn from_record(code: &ShareCode, record: SnippetRecord) -> Self {
        Self {
            share_code: code.to_string(),
            title: record.title,
            body: record.body,
            language: record.language,
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }
}
