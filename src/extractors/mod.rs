// src/extractors/mod.rs
pub mod dictation;

// Re-export key extraction types for convenience
pub use dictation::{DictationEntry, DictationExtractor, Extraction, DEFAULT_MAX_HEADING_LEVEL};
