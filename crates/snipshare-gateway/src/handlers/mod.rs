mod health;
mod snippet;

pub use health::health_handler;
pub use snippet::{get_snippet_handler, publish_snippet_handler};
