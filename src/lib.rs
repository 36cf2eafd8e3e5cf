#![deny(missing_docs)]

//! Core library for the docbrain microservice.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Embedding client abstraction and adapters.
pub mod embedding;
/// Generative text client abstraction and adapters.
pub mod generation;
/// Static learning-path catalog and plan generation.
pub mod learning;
/// Structured logging and tracing setup.
pub mod logging;
/// Service activity counters.
pub mod metrics;
/// Document processing pipeline: extraction, retrieval, answering, summarization.
pub mod processing;
/// In-memory document store and per-document indexes.
pub mod store;
