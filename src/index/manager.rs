//! Index lifecycle and document maintenance
//!
//! The `IndexManager` owns the process-wide Tantivy index. Searches borrow it
//! through an `IndexHandle`, which is released when dropped; writes go
//! through short-lived writers that commit before returning.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tantivy::directory::MmapDirectory;
use tantivy::schema::Schema;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Term};

use super::document::ActivityDocument;
use super::schema::{activity_schema, ActivityFields};
use super::IndexError;
use crate::activity::ActivityKey;
use crate::config::IndexConfig;

/// Owner of the activity index
pub struct IndexManager {
    index: Index,
    fields: ActivityFields,
    /// Directory backing the index (`None` for RAM)
    path: Option<PathBuf>,
    writer_heap_bytes: usize,
    /// Handles acquired and not yet dropped
    open_handles: Arc<AtomicUsize>,
}

impl IndexManager {
    /// Open the configured index, creating it if it does not exist
    pub fn open(config: &IndexConfig) -> Result<Self, IndexError> {
        let (schema, fields) = activity_schema();

        let index = match &config.path {
            Some(path) => Self::open_dir(path, schema)?,
            None => Index::create_in_ram(schema),
        };

        let docs = index_doc_count(&index)?;
        tracing::info!(path = ?config.path, docs, "Opened activity index");

        Ok(Self {
            index,
            fields,
            path: config.path.clone(),
            writer_heap_bytes: config.writer_heap_bytes,
            open_handles: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Open an empty index in RAM
    pub fn in_ram() -> Result<Self, IndexError> {
        Self::open(&IndexConfig::in_ram())
    }

    fn open_dir(path: &Path, schema: Schema) -> Result<Index, IndexError> {
        std::fs::create_dir_all(path)?;
        let directory = MmapDirectory::open(path)?;
        Ok(Index::open_or_create(directory, schema)?)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn schema(&self) -> Schema {
        self.index.schema()
    }

    /// Acquire a read handle on the latest committed state
    pub fn acquire(&self) -> Result<IndexHandle, IndexError> {
        let reader = self
            .index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        let open = self.open_handles.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(open, "Acquired index handle");

        Ok(IndexHandle {
            index: self.index.clone(),
            reader,
            fields: self.fields,
            open_handles: Arc::clone(&self.open_handles),
        })
    }

    /// Number of handles currently held
    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    pub fn add_dataset(&self, dataset: &Value) -> Result<(), IndexError> {
        self.add_datasets(std::iter::once(dataset)).map(|_| ())
    }

    /// Index datasets in a single commit; returns the number added
    pub fn add_datasets<'a, I>(&self, datasets: I) -> Result<usize, IndexError>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let documents = datasets
            .into_iter()
            .map(ActivityDocument::from_dataset)
            .collect::<Result<Vec<_>, _>>()?;
        self.add_documents(documents)
    }

    pub fn add_documents<I>(&self, documents: I) -> Result<usize, IndexError>
    where
        I: IntoIterator<Item = ActivityDocument>,
    {
        self.with_writer("add", |writer, fields| {
            let mut added = 0;
            for document in documents {
                writer.add_document(document.to_tantivy(fields))?;
                added += 1;
            }
            Ok(added)
        })
    }

    /// Replace the document sharing this dataset's key
    pub fn update_dataset(&self, dataset: &Value) -> Result<(), IndexError> {
        let document = ActivityDocument::from_dataset(dataset)?;
        self.with_writer("update", |writer, fields| {
            writer.delete_term(Term::from_field_text(fields.key, &document.key().join()));
            writer.add_document(document.to_tantivy(fields))?;
            Ok(())
        })
    }

    pub fn delete_dataset(&self, key: &ActivityKey) -> Result<(), IndexError> {
        self.with_writer("delete", |writer, fields| {
            writer.delete_term(Term::from_field_text(fields.key, &key.join()));
            Ok(())
        })
    }

    /// Remove every document belonging to one database
    pub fn delete_database(&self, database: &str) -> Result<(), IndexError> {
        self.with_writer("delete_database", |writer, fields| {
            writer.delete_term(Term::from_field_text(fields.database, database));
            Ok(())
        })
    }

    pub fn clear(&self) -> Result<(), IndexError> {
        self.with_writer("clear", |writer, _| {
            writer.delete_all_documents()?;
            Ok(())
        })
    }

    fn with_writer<T, F>(&self, operation: &str, f: F) -> Result<T, IndexError>
    where
        F: FnOnce(&mut IndexWriter, &ActivityFields) -> Result<T, IndexError>,
    {
        let start = std::time::Instant::now();
        let mut writer: IndexWriter = self.index.writer(self.writer_heap_bytes)?;

        let out = f(&mut writer, &self.fields)?;
        writer.commit()?;

        tracing::info!(
            operation,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Index commit complete"
        );
        Ok(out)
    }
}

fn index_doc_count(index: &Index) -> Result<u64, IndexError> {
    let reader = index
        .reader_builder()
        .reload_policy(ReloadPolicy::Manual)
        .try_into()?;
    Ok(reader.searcher().num_docs())
}

/// A read handle on the index, released on drop
pub struct IndexHandle {
    index: Index,
    reader: IndexReader,
    fields: ActivityFields,
    open_handles: Arc<AtomicUsize>,
}

impl IndexHandle {
    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn schema(&self) -> Schema {
        self.index.schema()
    }

    pub fn fields(&self) -> &ActivityFields {
        &self.fields
    }

    pub fn searcher(&self) -> tantivy::Searcher {
        self.reader.searcher()
    }

    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }
}

impl Drop for IndexHandle {
    fn drop(&mut self) {
        let open = self.open_handles.fetch_sub(1, Ordering::SeqCst) - 1;
        tracing::debug!(open, "Released index handle");
    }
}
