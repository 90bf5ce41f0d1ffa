//! Knowledge loading and the process-wide memoized knowledge base.

use crate::index::FuzzyIndex;
use crate::sources;
use crate::CoreConfig;
use folio_ai_common::{AssistantError, KnowledgeEntry, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// The merged entry collection plus its derived index. Built once, shared
/// read-only for the rest of the process lifetime.
#[derive(Debug)]
pub struct Snapshot {
    pub entries: Vec<KnowledgeEntry>,
    pub index: FuzzyIndex,
}

/// Lazily-initialized knowledge base service. The first `snapshot()` caller
/// triggers the build; concurrent first callers await the same in-flight
/// build instead of each reading the sources independently. A failed build
/// leaves the cell empty so the next request retries.
pub struct KnowledgeBase {
    config: CoreConfig,
    state: OnceCell<Arc<Snapshot>>,
}

impl KnowledgeBase {
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config,
            state: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub async fn snapshot(&self) -> Result<Arc<Snapshot>> {
        let snapshot = self
            .state
            .get_or_try_init(|| {
                let config = self.config.clone();
                async move {
                    let entries = tokio::task::spawn_blocking(move || load_entries(&config))
                        .await
                        .map_err(|e| {
                            AssistantError::Internal(format!("knowledge load task failed: {}", e))
                        })??;

                    let index = FuzzyIndex::build(&entries);
                    info!("Knowledge base ready with {} entries", entries.len());

                    Ok::<_, AssistantError>(Arc::new(Snapshot { entries, index }))
                }
            })
            .await?;

        Ok(snapshot.clone())
    }
}

/// Reads every configured source once: the structured table first, then each
/// recognized document in sorted filename order. Failures inside one source
/// are contained to that source.
fn load_entries(config: &CoreConfig) -> Result<Vec<KnowledgeEntry>> {
    let data_dir = &config.data_dir;
    if !data_dir.is_dir() {
        debug!(
            "Data directory {} not found, starting with an empty knowledge base",
            data_dir.display()
        );
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();

    let table_path = data_dir.join(&config.table_file);
    if table_path.is_file() {
        match sources::parse_table(&table_path) {
            Ok(rows) => {
                debug!("Loaded {} entries from {}", rows.len(), table_path.display());
                entries.extend(rows);
            }
            Err(e) => warn!("Skipping table {}: {}", table_path.display(), e),
        }
    }

    for path in discover_documents(data_dir)? {
        match sources::extract_text(&path).map(|text| sources::chunk_document(&text)) {
            Ok(chunks) => {
                debug!("Loaded {} entries from {}", chunks.len(), path.display());
                entries.extend(chunks);
            }
            Err(e) => warn!("Skipping document {}: {}", path.display(), e),
        }
    }

    Ok(entries)
}

fn discover_documents(data_dir: &std::path::Path) -> Result<Vec<PathBuf>> {
    let dir = fs::read_dir(data_dir).map_err(|e| {
        AssistantError::Ingestion(format!(
            "failed to read data directory {}: {}",
            data_dir.display(),
            e
        ))
    })?;

    let mut documents = Vec::new();
    for dir_entry in dir {
        let dir_entry = match dir_entry {
            Ok(dir_entry) => dir_entry,
            Err(_) => continue,
        };

        let path = dir_entry.path();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        if path.is_file()
            && extension
                .as_deref()
                .map_or(false, |e| sources::DOC_EXTENSIONS.contains(&e))
        {
            documents.push(path);
        }
    }

    // Deterministic discovery order across platforms.
    documents.sort();
    Ok(documents)
}
