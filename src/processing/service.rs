//! Pipeline service coordinating extraction, storage, retrieval, and answering.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    config::get_config,
    embedding::{get_embedding_client, EmbeddingClient},
    generation::{answer_prompt, get_generation_client, summary_prompt, GenerationClient},
    metrics::{MetricsSnapshot, ServiceMetrics},
    processing::{
        answer::{compose_answer, truncate_chars, BACKEND_CONFIDENCE, HEURISTIC_CONFIDENCE},
        extract::{extract, extract_plain_text},
        retrieval::keyword_retrieve,
        summarize::{extractive_summary, summary_outcome, SummaryStyle},
        types::{
            AnswerOutcome, ExtractError, IngestOutcome, PipelineError, Segment, SourcePreview,
            SummaryOutcome,
        },
    },
    store::{DocumentEntry, DocumentIndex, DocumentStore, VectorIndex},
};

const SOURCE_PREVIEW_CHARS: usize = 200;

/// Coordinates the full document pipeline: extraction, indexing, retrieval, and
/// answer/summary generation with heuristic fallbacks.
///
/// The service owns the document store, the optional backend clients, and the metrics
/// registry. Construct it once near process start and share it through an `Arc`.
pub struct PipelineService {
    store: DocumentStore,
    embedding: Option<Box<dyn EmbeddingClient + Send + Sync>>,
    generation: Option<Box<dyn GenerationClient + Send + Sync>>,
    metrics: Arc<ServiceMetrics>,
}

/// Abstraction over the pipeline used by the HTTP surface.
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Extract, index, and store an uploaded document.
    async fn ingest(&self, filename: &str, bytes: &[u8]) -> Result<IngestOutcome, PipelineError>;

    /// Answer a question over a stored document.
    async fn ask(
        &self,
        document_id: &str,
        question: &str,
        max_results: Option<usize>,
    ) -> Result<AnswerOutcome, PipelineError>;

    /// Summarize raw text in the requested style.
    async fn summarize(&self, text: &str, style: SummaryStyle) -> SummaryOutcome;

    /// Extract an uploaded document's text and summarize it.
    async fn summarize_document(
        &self,
        filename: &str,
        bytes: &[u8],
        style: SummaryStyle,
    ) -> Result<SummaryOutcome, PipelineError>;

    /// List the ids of all stored documents.
    async fn list_documents(&self) -> Vec<String>;

    /// Remove a stored document. Idempotent; returns whether an entry existed.
    async fn delete_document(&self, document_id: &str) -> bool;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl PipelineService {
    /// Build a new pipeline service, selecting backends from configuration.
    pub fn new() -> Self {
        let config = get_config();
        tracing::info!(
            embedding = ?config.embedding_provider,
            generation = ?config.generation_provider,
            "Initializing pipeline service"
        );
        Self {
            store: DocumentStore::new(),
            embedding: get_embedding_client(),
            generation: get_generation_client(),
            metrics: Arc::new(ServiceMetrics::new()),
        }
    }

    /// Extract, index, and store an uploaded document under a fresh id.
    ///
    /// Re-uploading the same bytes always produces a new id and a new entry; there is
    /// no deduplication.
    pub async fn ingest(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<IngestOutcome, PipelineError> {
        let config = get_config();
        let document_id = Uuid::new_v4().to_string();
        let segments = extract(bytes, filename, config.chunk_size, config.chunk_overlap)?;
        let segment_count = segments.len();

        let index = self.build_index(segments).await;
        self.store
            .put(
                &document_id,
                DocumentEntry {
                    filename: filename.to_string(),
                    index,
                },
            )
            .await;

        self.metrics.record_ingest(segment_count as u64);
        tracing::info!(
            document_id = %document_id,
            filename,
            segments = segment_count,
            "Document ingested"
        );

        Ok(IngestOutcome {
            document_id,
            filename: filename.to_string(),
            segments_stored: segment_count,
        })
    }

    /// Build a vector index when an embedding backend is available, otherwise keep
    /// the raw segment list. Embedding failures degrade silently to the raw list.
    async fn build_index(&self, segments: Vec<Segment>) -> DocumentIndex {
        let Some(embedder) = &self.embedding else {
            return DocumentIndex::Segments(segments);
        };

        let texts: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
        match embedder.generate_embeddings(&texts).await {
            Ok(vectors) if vectors.len() == segments.len() => DocumentIndex::Vector(
                VectorIndex::new(vectors.into_iter().zip(segments).collect()),
            ),
            Ok(vectors) => {
                tracing::warn!(
                    expected = texts.len(),
                    actual = vectors.len(),
                    "Embedding count mismatch; storing raw segments"
                );
                DocumentIndex::Segments(segments)
            }
            Err(error) => {
                tracing::warn!(error = %error, "Embedding backend failed; storing raw segments");
                DocumentIndex::Segments(segments)
            }
        }
    }

    /// Answer a question over a stored document.
    pub async fn ask(
        &self,
        document_id: &str,
        question: &str,
        max_results: Option<usize>,
    ) -> Result<AnswerOutcome, PipelineError> {
        let config = get_config();
        let entry = self.store.get(document_id).await?;
        let max_results = max_results.unwrap_or(config.qa_default_max_results);

        let relevant = self.retrieve(&entry.index, question, max_results).await;
        let (answer, confidence) = self.answer(question, &relevant).await;
        let sources = relevant
            .iter()
            .map(|segment| SourcePreview {
                content: format!("{}...", truncate_chars(&segment.text, SOURCE_PREVIEW_CHARS)),
                metadata: segment.metadata(),
            })
            .collect();

        self.metrics.record_answer();
        tracing::info!(
            document_id,
            matches = relevant.len(),
            confidence,
            "Question answered"
        );

        Ok(AnswerOutcome {
            answer,
            confidence,
            sources,
        })
    }

    /// Rank segments by relevance, preferring the vector index when usable.
    async fn retrieve(
        &self,
        index: &DocumentIndex,
        question: &str,
        max_results: usize,
    ) -> Vec<Segment> {
        if let (DocumentIndex::Vector(vector_index), Some(embedder)) = (index, &self.embedding) {
            match embedder.generate_embeddings(&[question.to_string()]).await {
                Ok(mut vectors) if !vectors.is_empty() => {
                    let query = vectors.remove(0);
                    return vector_index.search(&query, max_results);
                }
                Ok(_) => {
                    tracing::warn!("Embedding backend returned no query vector; using keywords");
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Query embedding failed; using keywords");
                }
            }
        }
        keyword_retrieve(index.segments(), question, max_results)
    }

    /// Produce an answer from retrieved segments, falling back to the template
    /// composition when no backend is configured or the backend call fails.
    async fn answer(&self, question: &str, relevant: &[Segment]) -> (String, f64) {
        if relevant.is_empty() {
            return (compose_answer(relevant), HEURISTIC_CONFIDENCE);
        }

        if let Some(generator) = &self.generation {
            match generator.generate(&answer_prompt(question, relevant)).await {
                Ok(answer) if !answer.is_empty() => return (answer, BACKEND_CONFIDENCE),
                Ok(_) => tracing::warn!("Generation backend returned empty answer; using template"),
                Err(error) => {
                    tracing::warn!(error = %error, "Generation backend failed; using template");
                }
            }
        }

        (compose_answer(relevant), HEURISTIC_CONFIDENCE)
    }

    /// Summarize raw text, preferring the generative backend when configured.
    pub async fn summarize(&self, text: &str, style: SummaryStyle) -> SummaryOutcome {
        let summary = if let Some(generator) = &self.generation {
            match generator.generate(&summary_prompt(text, style)).await {
                Ok(summary) if !summary.is_empty() => summary,
                Ok(_) => {
                    tracing::warn!("Generation backend returned empty summary; using extraction");
                    extractive_summary(text, style)
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Generation backend failed; using extraction");
                    extractive_summary(text, style)
                }
            }
        } else {
            extractive_summary(text, style)
        };

        self.metrics.record_summary();
        summary_outcome(text, summary)
    }

    /// Extract an uploaded document's text and summarize it.
    pub async fn summarize_document(
        &self,
        filename: &str,
        bytes: &[u8],
        style: SummaryStyle,
    ) -> Result<SummaryOutcome, PipelineError> {
        let text = extract_plain_text(bytes, filename)?;
        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent.into());
        }
        Ok(self.summarize(&text, style).await)
    }

    /// List the ids of all stored documents.
    pub async fn list_documents(&self) -> Vec<String> {
        self.store.list().await
    }

    /// Remove a stored document; absent ids are not an error.
    pub async fn delete_document(&self, document_id: &str) -> bool {
        let removed = self.store.delete(document_id).await;
        tracing::info!(document_id, removed, "Document delete requested");
        removed
    }

    /// Return the current metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl Default for PipelineService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PipelineApi for PipelineService {
    async fn ingest(&self, filename: &str, bytes: &[u8]) -> Result<IngestOutcome, PipelineError> {
        PipelineService::ingest(self, filename, bytes).await
    }

    async fn ask(
        &self,
        document_id: &str,
        question: &str,
        max_results: Option<usize>,
    ) -> Result<AnswerOutcome, PipelineError> {
        PipelineService::ask(self, document_id, question, max_results).await
    }

    async fn summarize(&self, text: &str, style: SummaryStyle) -> SummaryOutcome {
        PipelineService::summarize(self, text, style).await
    }

    async fn summarize_document(
        &self,
        filename: &str,
        bytes: &[u8],
        style: SummaryStyle,
    ) -> Result<SummaryOutcome, PipelineError> {
        PipelineService::summarize_document(self, filename, bytes, style).await
    }

    async fn list_documents(&self) -> Vec<String> {
        PipelineService::list_documents(self).await
    }

    async fn delete_document(&self, document_id: &str) -> bool {
        PipelineService::delete_document(self, document_id).await
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        PipelineService::metrics_snapshot(self)
    }
}
