//! API request bodies

use crate::optimization::Mode;
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/optimize`
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeRequest {
    pub input: String,
    pub format: String,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Body of `POST /v1/convert-to-toon`
#[derive(Debug, Clone, Serialize)]
pub struct EncodeRequest {
    pub input: String,
    pub format: String,
}

/// Body of `POST /v1/convert-from-toon`
#[derive(Debug, Clone, Serialize)]
pub struct DecodeRequest {
    pub toon: String,
}

/// A prior conversation turn sent along with history compression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

impl HistoryMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Body of `POST /v1/optimize-run`
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeRunRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub input: String,
    pub format: String,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub use_rag: bool,
    pub use_history: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryMessage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_chunk_limit: Option<u32>,
    pub debug: bool,
}

/// Caller-facing options for the optimize-and-run workflow
#[derive(Debug, Clone)]
pub struct OptimizeRunOptions {
    pub input: String,
    /// Accepts either naming vocabulary; normalized before sending
    pub mode: String,
    pub format: String,
    pub model: Option<String>,
    pub use_rag: bool,
    pub use_history: bool,
    pub history: Option<Vec<HistoryMessage>>,
    pub rag_chunk_limit: Option<u32>,
    pub debug: bool,
}

impl OptimizeRunOptions {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            mode: Mode::Balanced.as_str().to_string(),
            format: "auto".to_string(),
            model: None,
            use_rag: false,
            use_history: false,
            history: None,
            rag_chunk_limit: None,
            debug: false,
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Enable RAG document compression with an optional chunk limit
    pub fn with_rag(mut self, chunk_limit: Option<u32>) -> Self {
        self.use_rag = true;
        self.rag_chunk_limit = chunk_limit;
        self
    }

    /// Enable history compression over the given prior turns
    pub fn with_history(mut self, history: Vec<HistoryMessage>) -> Self {
        self.use_history = true;
        self.history = Some(history);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
