//! External enrichment: job-search lookup and AI-generated summaries
//!
//! Both providers sit outside the core pipeline. Failures are soft: a
//! provider that times out or returns garbage yields an empty result set or
//! a short user-visible message, never an error that propagates inward.

pub mod job_search;
pub mod summary;

pub use job_search::{JSearchClient, JobPosting, JobSearchProvider};
pub use summary::{OpenAiClient, SummaryProvider};
