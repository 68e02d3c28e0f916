// src/docx/models.rs

/// A flattened document paragraph: the only view of the source document the
/// extraction core ever sees. `style_name` is the resolved display name of
/// the paragraph style (e.g. "Heading 1"), when the paragraph has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub style_name: Option<String>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style_name: Option<String>) -> Self {
        Self {
            text: text.into(),
            style_name,
        }
    }
}
