// src/docx/mod.rs
pub mod models;
pub mod reader;

pub use models::Paragraph;
pub use reader::read_paragraphs;
