pub mod index;
pub mod knowledge;
pub mod resolver;
pub mod sources;

use std::path::PathBuf;

pub use knowledge::{KnowledgeBase, Snapshot};
pub use resolver::resolve;

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory holding the structured table and any resume-style documents.
    pub data_dir: PathBuf,
    /// File name of the structured table inside `data_dir`.
    pub table_file: String,
    /// Name used in fallback replies and suggested questions.
    pub owner_name: String,
    /// Matches scoring strictly below this distance are answered directly.
    pub confidence_threshold: f32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            table_file: "knowledge.csv".to_string(),
            owner_name: "Rhuzzel".to_string(),
            confidence_threshold: 0.4,
        }
    }
}
