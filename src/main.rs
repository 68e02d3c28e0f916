// src/main.rs
mod docx;
mod extractors;
mod utils;
mod viewer;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use extractors::{DictationEntry, DictationExtractor, DEFAULT_MAX_HEADING_LEVEL};
use utils::AppError;

// Long filename stems make unwieldy category labels.
const MAX_PREFIX_CHARS: usize = 40;

/// Build a single-file grossing template viewer from a folder of .docx
/// dictation templates.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input folder containing .docx files
    #[arg(long = "in", value_name = "DIR")]
    input: PathBuf,

    /// Output HTML path
    #[arg(long, value_name = "FILE")]
    out: PathBuf,

    /// Optional CAP html to copy the embedded base64 logo from
    #[arg(long, value_name = "FILE")]
    cap: Option<PathBuf>,

    /// How to separate files into categories
    #[arg(long, value_enum, default_value = "filename")]
    prefix_mode: PrefixMode,

    /// Use Heading 1..N for display/category logic
    #[arg(long, default_value_t = DEFAULT_MAX_HEADING_LEVEL)]
    keep_heading_levels: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PrefixMode {
    /// Prefix every category with the source file stem
    Filename,
    /// Keep categories exactly as extracted
    None,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting viewer build for args: {:?}", args);

    if !args.input.is_dir() {
        return Err(AppError::Config(format!(
            "Input folder not found: {}",
            args.input.display()
        )));
    }

    // 3. Discover input documents
    let documents = discover_docx(&args.input)?;
    if documents.is_empty() {
        return Err(AppError::Config(format!(
            "No .docx files found in: {}",
            args.input.display()
        )));
    }
    tracing::info!("Found {} .docx files", documents.len());

    let extractor = DictationExtractor::new(args.keep_heading_levels);

    // 4. Extract examples per document, disambiguating categories across
    //    documents with the filename prefix (unless disabled).
    let mut all_entries: Vec<DictationEntry> = Vec::new();
    let mut ordered_categories: Vec<String> = Vec::new();
    let mut seen_categories: HashSet<String> = HashSet::new();
    let mut failure_count = 0usize;

    for document in &documents {
        tracing::info!("Processing document: {}", document.display());

        let paragraphs = match docx::read_paragraphs(document) {
            Ok(paragraphs) => paragraphs,
            Err(e) => {
                tracing::error!("Failed to read {}: {}", document.display(), e);
                failure_count += 1;
                continue;
            }
        };

        let extraction = extractor.extract(&paragraphs);
        tracing::info!(
            "Extracted {} examples across {} categories from {}",
            extraction.entries.len(),
            extraction.ordered_categories.len(),
            document.display()
        );

        let prefix = match args.prefix_mode {
            PrefixMode::Filename => file_prefix(document),
            PrefixMode::None => String::new(),
        };

        for mut entry in extraction.entries {
            entry.category = prefix_category(&prefix, &entry.category);
            all_entries.push(entry);
        }
        for category in extraction.ordered_categories {
            let category = prefix_category(&prefix, &category);
            if seen_categories.insert(category.clone()) {
                ordered_categories.push(category);
            }
        }
    }

    let success_count = documents.len() - failure_count;
    if success_count == 0 {
        return Err(AppError::Processing(format!(
            "Failed to read any of the {} documents",
            documents.len()
        )));
    }
    if all_entries.is_empty() {
        tracing::warn!("No dictation examples found; the viewer will be empty");
    }

    // 5. Render and write the artifact
    let groups = viewer::group_entries(&all_entries, &ordered_categories);
    let logo_tag = viewer::logo::extract_logo_tag(args.cap.as_deref());
    let html = viewer::build_html(&groups, &logo_tag)?;
    std::fs::write(&args.out, html)?;

    tracing::info!("Wrote: {}", args.out.display());
    tracing::info!(
        "Docs: {} | Categories: {} | Examples: {}",
        success_count,
        groups.len(),
        groups.iter().map(|g| g.items.len()).sum::<usize>()
    );

    Ok(())
}

/// Lists `*.docx` files in the input folder, sorted by name for a stable
/// cross-document category order.
fn discover_docx(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("docx") => documents.push(path),
            _ => {}
        }
    }
    documents.sort();
    Ok(documents)
}

/// Category prefix from the document's file stem, truncated to keep labels
/// shortish.
fn file_prefix(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
        .trim();

    if stem.chars().count() > MAX_PREFIX_CHARS {
        let short: String = stem.chars().take(MAX_PREFIX_CHARS).collect();
        format!("{}…", short.trim_end())
    } else {
        stem.to_string()
    }
}

fn prefix_category(prefix: &str, category: &str) -> String {
    if prefix.is_empty() {
        category.to_string()
    } else {
        format!("{} — {}", prefix, category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_prefix_uses_trimmed_stem() {
        assert_eq!(file_prefix(Path::new("/docs/Skin Templates.docx")), "Skin Templates");
    }

    #[test]
    fn file_prefix_truncates_long_stems() {
        let long = "a".repeat(60);
        let path = PathBuf::from(format!("/docs/{}.docx", long));
        let prefix = file_prefix(&path);
        assert_eq!(prefix.chars().count(), MAX_PREFIX_CHARS + 1);
        assert!(prefix.ends_with('…'));
    }

    #[test]
    fn prefix_category_joins_with_em_dash() {
        assert_eq!(prefix_category("Skin", "General"), "Skin — General");
        assert_eq!(prefix_category("", "General"), "General");
    }
}
