use serde::{Deserialize, Serialize};

/// One question/answer/category record available to the assistant.
///
/// Entries are immutable once loaded; ingestion drops any record whose
/// `question` or `answer` ends up empty after normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeEntry {
    pub question: String,
    /// Lower-cased search boost terms. Empty for sources that don't supply any.
    #[serde(default)]
    pub keywords: String,
    pub answer: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
}

/// Response envelope produced per query. Optional fields are omitted from the
/// JSON body when absent: `category` only accompanies a confident match,
/// `suggestions` only accompany the fallback reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AssistantError>;
