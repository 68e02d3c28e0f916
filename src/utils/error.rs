// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum DocxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid .docx container: {0}")]
    Container(#[from] zip::result::ZipError),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Document part not found: {0}")]
    MissingPart(String),

    #[error("Malformed document: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Document reading failed: {0}")]
    Docx(#[from] DocxError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
