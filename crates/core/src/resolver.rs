//! Query resolution: search the index, apply the confidence threshold and
//! produce either a direct answer or the fallback with follow-up suggestions.

use crate::knowledge::Snapshot;
use crate::CoreConfig;
use folio_ai_common::{Confidence, SearchResult};
use tracing::debug;

/// The fixed, ordered follow-up questions offered with a fallback reply.
pub fn suggested_questions(owner_name: &str) -> Vec<String> {
    vec![
        format!("Who is {}?", owner_name),
        "What technologies do you use?".to_string(),
        "Tell me about your projects".to_string(),
        "What certifications do you have?".to_string(),
        "How can I contact you?".to_string(),
    ]
}

/// Pure function of (query, snapshot): no state is mutated during resolution.
/// The query is assumed trimmed and non-empty; the boundary rejects anything
/// else before it reaches the core.
pub fn resolve(query: &str, snapshot: &Snapshot, config: &CoreConfig) -> SearchResult {
    let candidates = snapshot.index.search(query);

    if let Some(best) = candidates.first() {
        if best.score < config.confidence_threshold {
            let entry = &snapshot.entries[best.index];
            debug!(
                "Confident match for '{}': '{}' (score {:.3})",
                query, entry.question, best.score
            );
            return SearchResult {
                reply: entry.answer.clone(),
                category: Some(entry.category.clone()),
                confidence: Confidence::High,
                suggestions: None,
            };
        }
    }

    debug!("No confident match for '{}', falling back", query);
    fallback(snapshot, config)
}

fn fallback(snapshot: &Snapshot, config: &CoreConfig) -> SearchResult {
    let mut categories: Vec<&str> = Vec::new();
    for entry in &snapshot.entries {
        if !entry.category.is_empty() && !categories.contains(&entry.category.as_str()) {
            categories.push(&entry.category);
        }
    }

    let reply = if categories.is_empty() {
        format!(
            "I'm not sure about that yet, but feel free to ask me anything about {}!",
            config.owner_name
        )
    } else {
        format!(
            "I'm not sure about that, but I can tell you about {}'s {}!",
            config.owner_name,
            categories.join(", ")
        )
    };

    SearchResult {
        reply,
        category: None,
        confidence: Confidence::Low,
        suggestions: Some(suggested_questions(&config.owner_name)),
    }
}
