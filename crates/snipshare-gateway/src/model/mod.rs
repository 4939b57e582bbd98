mod snippet;

pub use snippet::{PublishSnippetRequest, ShareCodeResponse, SnippetResponse};

use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
