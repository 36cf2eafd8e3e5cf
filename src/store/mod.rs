//! In-memory document store.
//!
//! The store owns one [`DocumentIndex`] per uploaded document, keyed by the generated
//! document id. State is process-local and volatile: every upload is lost on restart,
//! which is the service's baseline contract. All access goes through an async
//! `RwLock` so concurrent upload/ask/delete on the same id stay atomic.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::processing::types::Segment;

/// Errors raised by store lookups.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document is stored under the requested id.
    #[error("Document not found. Please upload the document first.")]
    NotFound {
        /// The id that missed.
        document_id: String,
    },
}

/// Per-document retrieval structure.
#[derive(Debug, Clone)]
pub enum DocumentIndex {
    /// Similarity-searchable index built when an embedding backend was available.
    Vector(VectorIndex),
    /// Raw segment list used by the keyword-overlap fallback.
    Segments(Vec<Segment>),
}

impl DocumentIndex {
    /// The document's segments regardless of index flavor.
    pub fn segments(&self) -> &[Segment] {
        match self {
            Self::Vector(index) => index.segments(),
            Self::Segments(segments) => segments,
        }
    }
}

/// Stored entry for one uploaded document.
#[derive(Debug, Clone)]
pub struct DocumentEntry {
    /// Original filename supplied at upload time.
    pub filename: String,
    /// Retrieval index over the document's segments.
    pub index: DocumentIndex,
}

/// Cosine-similarity index over a document's segments.
///
/// Vectors and segments are parallel: `vectors[i]` embeds `segments[i]`.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    vectors: Vec<Vec<f32>>,
    segments: Vec<Segment>,
}

impl VectorIndex {
    /// Build an index from parallel embedding/segment pairs.
    pub fn new(entries: Vec<(Vec<f32>, Segment)>) -> Self {
        let (vectors, segments) = entries.into_iter().unzip();
        Self { vectors, segments }
    }

    /// The indexed segments in insertion order.
    ///
    /// Used by the keyword fallback when query embedding fails at ask time.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Rank segments by cosine similarity to `query`, returning the top `max_results`.
    pub fn search(&self, query: &[f32], max_results: usize) -> Vec<Segment> {
        let mut scored: Vec<(f32, &Segment)> = self
            .vectors
            .iter()
            .zip(self.segments.iter())
            .map(|(vector, segment)| (cosine_similarity(query, vector), segment))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(max_results)
            .map(|(_, segment)| segment.clone())
            .collect()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Service-owned map from document id to its index.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<HashMap<String, DocumentEntry>>,
}

impl DocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry stored under `document_id`.
    pub async fn put(&self, document_id: &str, entry: DocumentEntry) {
        let mut documents = self.documents.write().await;
        documents.insert(document_id.to_string(), entry);
    }

    /// Fetch a clone of the entry stored under `document_id`.
    pub async fn get(&self, document_id: &str) -> Result<DocumentEntry, StoreError> {
        let documents = self.documents.read().await;
        documents
            .get(document_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                document_id: document_id.to_string(),
            })
    }

    /// Remove the entry stored under `document_id`, if any.
    ///
    /// Idempotent: deleting an absent id is not an error. Returns whether an entry
    /// was actually removed.
    pub async fn delete(&self, document_id: &str) -> bool {
        let mut documents = self.documents.write().await;
        documents.remove(document_id).is_some()
    }

    /// List the ids of all stored documents.
    pub async fn list(&self) -> Vec<String> {
        let documents = self.documents.read().await;
        documents.keys().cloned().collect()
    }
}
