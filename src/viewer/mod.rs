// src/viewer/mod.rs
pub mod logo;

use serde::Serialize;

use crate::extractors::DictationEntry;
use crate::utils::error::RenderError;

/// Self-contained viewer shell; the build substitutes the data payload,
/// logo tag, and generation date into it.
const VIEWER_TEMPLATE: &str = include_str!("viewer.html");

/// One example as the viewer consumes it.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ViewerItem {
    pub display: String,
    pub text: String,
}

/// All examples of one category, in extraction order.
#[derive(Debug, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<ViewerItem>,
}

/// Groups entries by category following the ordered category sequence.
/// Categories without entries produce no group.
pub fn group_entries(entries: &[DictationEntry], ordered_categories: &[String]) -> Vec<CategoryGroup> {
    ordered_categories
        .iter()
        .filter_map(|category| {
            let items: Vec<ViewerItem> = entries
                .iter()
                .filter(|e| &e.category == category)
                .map(|e| ViewerItem {
                    display: e.display.clone(),
                    text: e.text.clone(),
                })
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(CategoryGroup {
                    category: category.clone(),
                    items,
                })
            }
        })
        .collect()
}

/// Renders the single-file HTML artifact with the JSON payload embedded.
pub fn build_html(groups: &[CategoryGroup], logo_tag: &str) -> Result<String, RenderError> {
    let data_json = serde_json::to_string(groups)?;
    let generated = chrono::Utc::now().format("%Y-%m-%d").to_string();

    Ok(VIEWER_TEMPLATE
        .replace("{DATA_JSON}", &data_json)
        .replace("{LOGO_TAG}", logo_tag)
        .replace("{GENERATED}", &generated))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: &str, display: &str, text: &str) -> DictationEntry {
        DictationEntry {
            category: category.to_string(),
            display: display.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn grouping_follows_category_order() {
        let entries = vec![
            entry("General", "General", "early"),
            entry("Skin", "Punch Biopsy", "a"),
            entry("Skin", "Shave Biopsy", "b"),
        ];
        let ordered = vec!["Skin".to_string(), "General".to_string()];

        let groups = group_entries(&entries, &ordered);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Skin");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[0].items[0].display, "Punch Biopsy");
        assert_eq!(groups[1].category, "General");
    }

    #[test]
    fn categories_without_entries_are_dropped() {
        let entries = vec![entry("Skin", "Skin", "a")];
        let ordered = vec!["Skin".to_string(), "Phantom".to_string()];

        let groups = group_entries(&entries, &ordered);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "Skin");
    }

    #[test]
    fn html_embeds_payload_and_substitutes_placeholders() {
        let entries = vec![entry("Skin", "Punch Biopsy", "Received fresh.")];
        let ordered = vec!["Skin".to_string()];
        let groups = group_entries(&entries, &ordered);

        let html = build_html(&groups, r#"<img src="data:image/png;base64,AAAA" alt="Logo" />"#)
            .unwrap();

        assert!(html.contains(r#""category":"Skin""#));
        assert!(html.contains(r#""display":"Punch Biopsy""#));
        assert!(html.contains("data:image/png;base64,AAAA"));
        assert!(!html.contains("{DATA_JSON}"));
        assert!(!html.contains("{LOGO_TAG}"));
        assert!(!html.contains("{GENERATED}"));
    }

    #[test]
    fn empty_data_still_renders() {
        let html = build_html(&[], "").unwrap();
        assert!(html.contains("const DATA = [];"));
    }
}
