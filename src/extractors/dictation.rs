// src/extractors/dictation.rs

use std::collections::HashSet;

use crate::docx::Paragraph;

/// Trigger marker: a paragraph whose trimmed text starts with this literal
/// (case-sensitive) opens an example body.
pub const EXAMPLE_MARKER: &str = "Dictation Example";

/// Default bound on heading recognition and display-label depth.
pub const DEFAULT_MAX_HEADING_LEVEL: u8 = 3;

/// Category used when no level-1 or level-2 heading precedes an example.
pub const DEFAULT_CATEGORY: &str = "General";

/// Labels that terminate example collection. Pure prefix match against the
/// trimmed paragraph text; the matching paragraph is never consumed as
/// example content.
pub const STOP_PREFIXES: [&str; 14] = [
    "Dictation Template",
    "Dragon Template",
    "Sections for Histology",
    "Procedure",
    "Description",
    "Example Header",
    "Header Example",
    "Sample Header",
    "Triage Needed",
    "Notes",
    "Header Notes",
    "Orientation",
    "Tips for opening",
    "Other parts",
];

/// Fixed style table: the five built-in heading styles map one-to-one to
/// levels 1-5. Every other style name (or none) is not a heading.
pub fn heading_level(style_name: Option<&str>) -> Option<u8> {
    match style_name? {
        "Heading 1" => Some(1),
        "Heading 2" => Some(2),
        "Heading 3" => Some(3),
        "Heading 4" => Some(4),
        "Heading 5" => Some(5),
        _ => None,
    }
}

fn starts_with_stop_phrase(text: &str) -> bool {
    STOP_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}

/// One extracted dictation example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictationEntry {
    /// Grouping label, from the nearest level-1 (or level-2 fallback)
    /// heading, else "General".
    pub category: String,
    /// Most specific heading text available at trigger time.
    pub display: String,
    /// Example body, newline-joined and trimmed. Never empty.
    pub text: String,
}

/// Everything one document scan produces.
#[derive(Debug, Default, Clone)]
pub struct Extraction {
    pub entries: Vec<DictationEntry>,
    /// Distinct categories with at least one entry, level-1 heading order
    /// first, entry discovery order for the rest.
    pub ordered_categories: Vec<String>,
}

/// Current heading text at each of the 5 levels. A heading at level L
/// invalidates everything deeper than L, never shallower.
#[derive(Debug, Default)]
struct HeadingState {
    levels: [Option<String>; 5],
}

impl HeadingState {
    /// Records the paragraph as structural context if it is a heading within
    /// `max_level`. Returns whether the paragraph was consumed. Empty-text
    /// paragraphs are never headings regardless of style.
    fn observe(&mut self, para: &Paragraph, max_level: u8) -> bool {
        let text = para.text.trim();
        if text.is_empty() {
            return false;
        }
        match heading_level(para.style_name.as_deref()) {
            Some(level) if level <= max_level => {
                let idx = (level - 1) as usize;
                self.levels[idx] = Some(text.to_string());
                for deeper in self.levels[idx + 1..].iter_mut() {
                    *deeper = None;
                }
                true
            }
            _ => false,
        }
    }

    fn get(&self, level: u8) -> Option<&str> {
        self.levels[(level - 1) as usize].as_deref()
    }
}

/// Single-pass extractor for "Dictation Example" bodies in a styled
/// paragraph sequence.
pub struct DictationExtractor {
    max_heading_level: u8,
}

impl DictationExtractor {
    /// `max_heading_level` is clamped to 1..=5.
    pub fn new(max_heading_level: u8) -> Self {
        Self {
            max_heading_level: max_heading_level.clamp(1, 5),
        }
    }

    /// Scans the paragraph sequence top to bottom and returns all examples
    /// plus the stable category ordering. Infallible: malformed styles,
    /// missing headings, and empty bodies degrade by omission.
    pub fn extract(&self, paragraphs: &[Paragraph]) -> Extraction {
        let mut entries = Vec::new();
        let mut headings = HeadingState::default();

        let mut i = 0;
        while i < paragraphs.len() {
            let para = &paragraphs[i];
            let text = para.text.trim();
            if text.is_empty() {
                i += 1;
                continue;
            }

            if headings.observe(para, self.max_heading_level) {
                i += 1;
                continue;
            }

            if text.starts_with(EXAMPLE_MARKER) {
                let (body, resume) = self.collect_example(paragraphs, i);
                if !body.is_empty() {
                    let (category, display) = self.attribute(&headings);
                    entries.push(DictationEntry {
                        category,
                        display,
                        text: body,
                    });
                }
                // Resume at the paragraph that ended collection so a
                // terminating heading still updates heading state.
                i = resume;
                continue;
            }

            i += 1;
        }

        let ordered_categories = self.order_categories(paragraphs, &entries);
        Extraction {
            entries,
            ordered_categories,
        }
    }

    fn is_heading(&self, para: &Paragraph) -> bool {
        matches!(
            heading_level(para.style_name.as_deref()),
            Some(level) if level <= self.max_heading_level
        )
    }

    /// Collects the example body starting at the trigger paragraph.
    /// Returns the trimmed body and the index where the outer scan resumes.
    fn collect_example(&self, paragraphs: &[Paragraph], start: usize) -> (String, usize) {
        let mut collected: Vec<String> = Vec::new();

        // Allow inline content: "Dictation Example: blah..."
        let trigger = paragraphs[start].text.trim();
        if trigger.contains(':') && trigger.to_lowercase().starts_with("dictation example") {
            if let Some((_, after)) = trigger.split_once(':') {
                let after = after.trim();
                if !after.is_empty() {
                    collected.push(after.to_string());
                }
            }
        }

        let mut j = start + 1;
        while j < paragraphs.len() {
            let text = paragraphs[j].text.trim();

            if text.is_empty() {
                // Keep intentional blank lines unless the run leads straight
                // into a heading, a stop label, or the end of the document.
                let mut k = j + 1;
                while k < paragraphs.len() && paragraphs[k].text.trim().is_empty() {
                    k += 1;
                }
                if k >= paragraphs.len() {
                    break;
                }
                let next = &paragraphs[k];
                if self.is_heading(next) || starts_with_stop_phrase(next.text.trim()) {
                    break;
                }
                collected.push(String::new());
                j = k;
                continue;
            }

            if self.is_heading(&paragraphs[j]) || starts_with_stop_phrase(text) {
                break;
            }

            collected.push(text.to_string());
            j += 1;
        }

        (collected.join("\n").trim().to_string(), j)
    }

    /// Category/display attribution from the current heading state.
    fn attribute(&self, headings: &HeadingState) -> (String, String) {
        let category = headings
            .get(1)
            .or_else(|| headings.get(2))
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        // Display label: most specific populated heading, max level down to 1.
        let display = (1..=self.max_heading_level)
            .rev()
            .find_map(|level| headings.get(level))
            .map(str::to_string)
            .unwrap_or_else(|| category.clone());

        (category, display)
    }

    /// Stable category ordering: level-1 headings in document order first
    /// (restricted to categories that produced entries), then any remaining
    /// category in entry order. Every entry category appears exactly once.
    fn order_categories(
        &self,
        paragraphs: &[Paragraph],
        entries: &[DictationEntry],
    ) -> Vec<String> {
        let mut ordered = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for para in paragraphs {
            if heading_level(para.style_name.as_deref()) != Some(1) {
                continue;
            }
            let name = para.text.trim();
            if name.is_empty() || seen.contains(name) {
                continue;
            }
            if entries.iter().any(|e| e.category == name) {
                ordered.push(name.to_string());
                seen.insert(name.to_string());
            }
        }

        // Categories without a backing level-1 heading, e.g. "General".
        for entry in entries {
            if !seen.contains(entry.category.as_str()) {
                ordered.push(entry.category.clone());
                seen.insert(entry.category.clone());
            }
        }

        ordered
    }
}

impl Default for DictationExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEADING_LEVEL)
    }
}
