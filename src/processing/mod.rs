//! Core analysis: text normalization, field extraction, similarity, insights

pub mod insights;
pub mod profile;
pub mod similarity;
pub mod text_processor;

pub use insights::InsightEngine;
pub use profile::{extract_profile, CandidateProfile, NOT_FOUND};
pub use similarity::{SimilarityEngine, SimilarityResult};
pub use text_processor::TextProcessor;
