//! Weighted multi-field fuzzy index over the knowledge collection.
//!
//! Scores are distance-style: 0.0 is a perfect match, 1.0 is no overlap at
//! all. Matching is position-independent and tolerates minor misspellings via
//! normalized Levenshtein similarity between tokens.

use folio_ai_common::KnowledgeEntry;
use std::cmp::Ordering;

/// Query fragments shorter than this are ignored to avoid single-character
/// noise matches.
const MIN_TOKEN_CHARS: usize = 2;

/// Token pairs whose normalized similarity falls below this contribute
/// nothing; above it, a near-miss still counts proportionally. 0.55 keeps a
/// two-edit typo in a five-letter word inside the tolerance.
const SIMILARITY_FLOOR: f32 = 0.55;

/// Contained tokens must be at least this long before containment counts as a
/// near-match on its own.
const MIN_CONTAINMENT_CHARS: usize = 3;

/// Relative field weights. Keywords are curated signals and count the most,
/// entry titles next, incidental overlap in long answer text the least.
#[derive(Debug, Clone, Copy)]
pub struct FieldWeights {
    pub keywords: f32,
    pub question: f32,
    pub answer: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            keywords: 3.0,
            question: 2.0,
            answer: 0.5,
        }
    }
}

#[derive(Debug)]
struct IndexedEntry {
    keywords: Vec<String>,
    question: Vec<String>,
    answer: Vec<String>,
}

/// A ranked match: `index` points into the collection the index was built
/// from, `score` is the distance (lower is better).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub index: usize,
    pub score: f32,
}

#[derive(Debug)]
pub struct FuzzyIndex {
    entries: Vec<IndexedEntry>,
    weights: FieldWeights,
}

impl FuzzyIndex {
    pub fn build(entries: &[KnowledgeEntry]) -> Self {
        Self::with_weights(entries, FieldWeights::default())
    }

    pub fn with_weights(entries: &[KnowledgeEntry], weights: FieldWeights) -> Self {
        let entries = entries
            .iter()
            .map(|entry| IndexedEntry {
                keywords: tokenize(&entry.keywords),
                question: tokenize(&entry.question),
                answer: tokenize(&entry.answer),
            })
            .collect();

        Self { entries, weights }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns candidates sorted ascending by score. Ties keep collection
    /// order (stable sort). An empty index or an all-noise query yields no
    /// candidates.
    pub fn search(&self, query: &str) -> Vec<Candidate> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let max_weight = self
            .weights
            .keywords
            .max(self.weights.question)
            .max(self.weights.answer);

        let mut candidates = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let mut total = 0.0;
            for token in &query_tokens {
                let keywords = best_similarity(token, &entry.keywords) * self.weights.keywords;
                let question = best_similarity(token, &entry.question) * self.weights.question;
                let answer = best_similarity(token, &entry.answer) * self.weights.answer;
                total += keywords.max(question).max(answer) / max_weight;
            }

            let coverage = total / query_tokens.len() as f32;
            if coverage > 0.0 {
                candidates.push(Candidate {
                    index,
                    score: 1.0 - coverage,
                });
            }
        }

        candidates.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
        candidates
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

fn best_similarity(token: &str, field: &[String]) -> f32 {
    field
        .iter()
        .map(|candidate| token_similarity(token, candidate))
        .fold(0.0, f32::max)
}

fn token_similarity(a: &str, b: &str) -> f32 {
    if a == b {
        return 1.0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if shorter.chars().count() >= MIN_CONTAINMENT_CHARS && longer.contains(shorter) {
        return 0.9;
    }

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }

    let similarity = 1.0 - levenshtein(a, b) as f32 / max_len as f32;
    if similarity >= SIMILARITY_FLOOR {
        similarity
    } else {
        0.0
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<KnowledgeEntry> {
        vec![
            KnowledgeEntry {
                question: "What is your current role?".to_string(),
                keywords: "role job title current".to_string(),
                answer: "Full-Stack Software Engineer & QA Specialist.".to_string(),
                category: "background".to_string(),
            },
            KnowledgeEntry {
                question: "What technologies do you use?".to_string(),
                keywords: "tech stack tools languages".to_string(),
                answer: "Rust, TypeScript, Playwright and PostgreSQL.".to_string(),
                category: "tech-stack".to_string(),
            },
        ]
    }

    #[test]
    fn test_levenshtein_distances() {
        assert_eq!(levenshtein("role", "role"), 0);
        assert_eq!(levenshtein("title", "titel"), 2);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_exact_keyword_query_ranks_first_with_low_score() {
        let index = FuzzyIndex::build(&sample_entries());
        let candidates = index.search("role job title current");

        assert_eq!(candidates[0].index, 0);
        assert!(candidates[0].score < 0.1);
    }

    #[test]
    fn test_question_match_outscores_answer_match() {
        let index = FuzzyIndex::build(&sample_entries());
        let question_hit = index.search("what technologies");
        let answer_hit = index.search("postgresql playwright");

        assert_eq!(question_hit[0].index, 1);
        assert_eq!(answer_hit[0].index, 1);
        assert!(question_hit[0].score < answer_hit[0].score);
    }

    #[test]
    fn test_misspelled_query_still_matches() {
        let index = FuzzyIndex::build(&sample_entries());
        let candidates = index.search("jb titel");

        assert_eq!(candidates[0].index, 0);
        assert!(candidates[0].score < 0.4);
    }

    #[test]
    fn test_unrelated_query_yields_no_candidates() {
        let index = FuzzyIndex::build(&sample_entries());
        assert!(index.search("favorite pizza topping").is_empty());
    }

    #[test]
    fn test_empty_index_yields_no_candidates() {
        let index = FuzzyIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.search("anything at all").is_empty());
    }

    #[test]
    fn test_single_char_tokens_are_ignored() {
        let index = FuzzyIndex::build(&sample_entries());
        assert!(index.search("a b c d").is_empty());
    }

    #[test]
    fn test_ties_keep_collection_order() {
        let mut entries = sample_entries();
        entries.push(entries[0].clone());
        let index = FuzzyIndex::build(&entries);

        let candidates = index.search("job title");
        assert_eq!(candidates[0].index, 0);
        assert_eq!(candidates[1].index, 2);
        assert_eq!(candidates[0].score, candidates[1].score);
    }
}
