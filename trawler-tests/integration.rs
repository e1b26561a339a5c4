//! Integration tests for Trawler
//!
//! Drive the public pipeline API end to end against fake index and metadata
//! capabilities: pagination, extraction, correction, bounded resolution and
//! the per-item failure policy.

#[path = "integration/fakes.rs"]
mod fakes;

#[path = "integration/pipeline.rs"]
mod pipeline;

#[path = "integration/pagination.rs"]
mod pagination;

#[path = "integration/concurrency.rs"]
mod concurrency;
