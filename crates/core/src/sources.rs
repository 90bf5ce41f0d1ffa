//! Per-source-kind normalizers turning raw input into uniform [`KnowledgeEntry`]
//! records. New source kinds are added here, not inside the loader.

use folio_ai_common::{AssistantError, KnowledgeEntry, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Document extensions the loader recognizes for chunked ingestion.
pub const DOC_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];

/// Chunks shorter than this are whitespace/noise fragments and are dropped.
const MIN_CHUNK_CHARS: usize = 30;

/// A chunk's first line becomes the entry question only if it is at least
/// this long; shorter headings fall back to a prefix of the chunk.
const MIN_HEADING_CHARS: usize = 10;
const QUESTION_PREFIX_CHARS: usize = 60;

#[derive(Debug, Deserialize)]
struct TableRow {
    #[serde(default)]
    question: String,
    #[serde(default)]
    keywords: String,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    category: String,
}

/// Parses a header-addressed CSV table into entries. The `keywords` column is
/// optional and defaults to empty; rows missing a question or answer are
/// skipped rather than failing the whole table.
pub fn parse_table(path: &Path) -> Result<Vec<KnowledgeEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| {
            AssistantError::Ingestion(format!("failed to open table {}: {}", path.display(), e))
        })?;

    let mut entries = Vec::new();
    for row in reader.deserialize::<TableRow>() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping malformed table row in {}: {}", path.display(), e);
                continue;
            }
        };

        if row.question.is_empty() || row.answer.is_empty() {
            continue;
        }

        entries.push(KnowledgeEntry {
            question: row.question,
            keywords: row.keywords.to_lowercase(),
            answer: row.answer,
            category: row.category,
        });
    }

    Ok(entries)
}

/// Splits extracted document text into entries on blank-line boundaries.
/// Each surviving chunk becomes one `"resume"` entry whose question is its
/// first line (or a prefix of the chunk when that line is too short to be a
/// useful label).
pub fn chunk_document(text: &str) -> Vec<KnowledgeEntry> {
    let separator = Regex::new(r"\n{2,}").unwrap();
    let normalized = text.replace("\r\n", "\n");

    separator
        .split(&normalized)
        .filter_map(|raw| {
            let chunk = raw.trim();
            if chunk.chars().count() < MIN_CHUNK_CHARS {
                return None;
            }

            let first_line = chunk.lines().next().unwrap_or("").trim();
            let question = if first_line.chars().count() >= MIN_HEADING_CHARS {
                first_line.to_string()
            } else {
                chunk.chars().take(QUESTION_PREFIX_CHARS).collect()
            };
            let keywords = question.to_lowercase();

            Some(KnowledgeEntry {
                question,
                keywords,
                answer: chunk.to_string(),
                category: "resume".to_string(),
            })
        })
        .collect()
}

/// Extracts plain text from a recognized document file.
pub fn extract_text(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => pdf_extract::extract_text(path).map_err(|e| {
            AssistantError::Ingestion(format!(
                "failed to extract text from {}: {}",
                path.display(),
                e
            ))
        }),
        "txt" | "md" => fs::read_to_string(path).map_err(|e| {
            AssistantError::Ingestion(format!("failed to read {}: {}", path.display(), e))
        }),
        other => Err(AssistantError::Ingestion(format!(
            "unsupported document extension '{}' for {}",
            other,
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_table(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_table_maps_rows_to_entries() {
        let file = write_table(
            "question,keywords,answer,category\n\
             What is your current role?,Role Job Title Current,Full-Stack Software Engineer & QA Specialist.,background\n",
        );

        let entries = parse_table(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].question, "What is your current role?");
        assert_eq!(entries[0].keywords, "role job title current");
        assert_eq!(entries[0].answer, "Full-Stack Software Engineer & QA Specialist.");
        assert_eq!(entries[0].category, "background");
    }

    #[test]
    fn test_parse_table_without_keywords_column() {
        let file = write_table(
            "question,answer,category\n\
             Who are you?,A portfolio assistant.,general\n",
        );

        let entries = parse_table(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].keywords, "");
    }

    #[test]
    fn test_parse_table_skips_incomplete_rows() {
        let file = write_table(
            "question,answer,category\n\
             ,Answer with no question,general\n\
             Question with no answer,,general\n\
             Valid question?,Valid answer.,general\n",
        );

        let entries = parse_table(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].question, "Valid question?");
    }

    #[test]
    fn test_chunk_document_splits_on_blank_lines() {
        let text = "Professional Experience\nSoftware engineer since 2019.\n\n\nCertifications\nAWS Cloud Practitioner, issued 2023.";

        let entries = chunk_document(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].question, "Professional Experience");
        assert!(entries[0].answer.contains("Software engineer since 2019."));
        assert_eq!(entries[0].category, "resume");
        assert_eq!(entries[1].keywords, "certifications");
    }

    #[test]
    fn test_chunk_document_drops_short_chunks() {
        let short = "Too short.";
        assert!(chunk_document(short).is_empty());

        // 29 chars is dropped, 30 is kept.
        let boundary = format!("{}\n\n{}", "a".repeat(29), "b".repeat(30));
        let entries = chunk_document(&boundary);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].answer.starts_with('b'));
    }

    #[test]
    fn test_chunk_document_short_heading_falls_back_to_prefix() {
        let text = format!("Skills\n{}", "Rust, TypeScript, Playwright, SQL and more tooling.");

        let entries = chunk_document(&text);
        assert_eq!(entries.len(), 1);
        // "Skills" is under the heading threshold, so the question is a chunk prefix.
        let expected: String = entries[0].answer.chars().take(60).collect();
        assert_eq!(entries[0].question, expected);
        assert_eq!(entries[0].keywords, entries[0].question.to_lowercase());
    }

    #[test]
    fn test_chunk_document_handles_crlf() {
        let text = "Professional Experience\r\n\r\nBuilt and tested web applications since 2019.";

        // The heading alone is under the chunk minimum; only the body survives.
        let entries = chunk_document(text);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].answer.contains("web applications"));
    }

    #[test]
    fn test_extract_text_reads_plain_files() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"plain text resume").unwrap();

        let text = extract_text(file.path()).unwrap();
        assert_eq!(text, "plain text resume");
    }

    #[test]
    fn test_extract_text_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        assert!(extract_text(file.path()).is_err());
    }
}
