use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing service activity.
#[derive(Default)]
pub struct ServiceMetrics {
    documents_ingested: AtomicU64,
    segments_stored: AtomicU64,
    questions_answered: AtomicU64,
    summaries_generated: AtomicU64,
}

impl ServiceMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an ingested document and the number of segments it produced.
    pub fn record_ingest(&self, segment_count: u64) {
        self.documents_ingested.fetch_add(1, Ordering::Relaxed);
        self.segments_stored
            .fetch_add(segment_count, Ordering::Relaxed);
    }

    /// Record a completed question-answering request.
    pub fn record_answer(&self) {
        self.questions_answered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed summarization request.
    pub fn record_summary(&self) {
        self.summaries_generated.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_ingested: self.documents_ingested.load(Ordering::Relaxed),
            segments_stored: self.segments_stored.load(Ordering::Relaxed),
            questions_answered: self.questions_answered.load(Ordering::Relaxed),
            summaries_generated: self.summaries_generated.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of service counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of documents ingested since startup.
    pub documents_ingested: u64,
    /// Total segment count stored across all ingested documents.
    pub segments_stored: u64,
    /// Number of questions answered since startup.
    pub questions_answered: u64,
    /// Number of summaries produced since startup.
    pub summaries_generated: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_documents_and_segments() {
        let metrics = ServiceMetrics::new();
        metrics.record_ingest(2);
        metrics.record_ingest(3);
        metrics.record_answer();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.documents_ingested, 2);
        assert_eq!(snapshot.segments_stored, 5);
        assert_eq!(snapshot.questions_answered, 1);
        assert_eq!(snapshot.summaries_generated, 0);
    }

    #[test]
    fn snapshot_starts_empty() {
        let metrics = ServiceMetrics::new();
        assert_eq!(metrics.snapshot().documents_ingested, 0);
        assert_eq!(metrics.snapshot().segments_stored, 0);
    }
}
