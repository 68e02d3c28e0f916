// src/docx/reader.rs

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use roxmltree::{Document, Node};
use zip::ZipArchive;

use crate::docx::models::Paragraph;
use crate::utils::error::DocxError;

/// Reads a .docx file and flattens its body into ordered paragraph records.
///
/// A .docx is a ZIP container: `word/document.xml` holds the body and
/// `word/styles.xml` maps style IDs to display names. Style names are
/// resolved through that map so "Heading1" comes out as "Heading 1"; when
/// `styles.xml` is absent the raw style ID is passed through.
pub fn read_paragraphs(path: &Path) -> Result<Vec<Paragraph>, DocxError> {
    tracing::debug!("Reading paragraphs from {}", path.display());

    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let styles = match read_part(&mut archive, "word/styles.xml") {
        Ok(xml) => parse_styles(&xml)?,
        Err(DocxError::MissingPart(_)) => HashMap::new(),
        Err(e) => return Err(e),
    };

    let document_xml = read_part(&mut archive, "word/document.xml")?;
    let paragraphs = parse_document(&document_xml, &styles)?;

    tracing::debug!(
        "Read {} paragraphs from {}",
        paragraphs.len(),
        path.display()
    );
    Ok(paragraphs)
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, DocxError> {
    let mut part = match archive.by_name(name) {
        Ok(part) => part,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(DocxError::MissingPart(name.to_string()))
        }
        Err(e) => return Err(DocxError::Container(e)),
    };
    let mut content = String::new();
    part.read_to_string(&mut content)?;
    Ok(content)
}

/// Builds the paragraph-style ID → display name map from `word/styles.xml`.
fn parse_styles(xml: &str) -> Result<HashMap<String, String>, DocxError> {
    let doc = Document::parse(xml)?;
    let mut map = HashMap::new();

    for style in doc.descendants().filter(|n| n.tag_name().name() == "style") {
        if attr_local(style, "type") != Some("paragraph") {
            continue;
        }
        let id = match attr_local(style, "styleId") {
            Some(id) => id,
            None => continue,
        };
        let name = style
            .children()
            .find(|c| c.tag_name().name() == "name")
            .and_then(|n| attr_local(n, "val"));
        if let Some(name) = name {
            map.insert(id.to_string(), name.to_string());
        }
    }

    Ok(map)
}

/// Flattens the document body into paragraph records. Only direct body
/// children count as paragraphs (table-cell paragraphs are not body text).
fn parse_document(
    xml: &str,
    styles: &HashMap<String, String>,
) -> Result<Vec<Paragraph>, DocxError> {
    let doc = Document::parse(xml)?;
    let body = doc
        .root_element()
        .children()
        .find(|n| n.tag_name().name() == "body")
        .ok_or_else(|| DocxError::Malformed("missing w:body element".to_string()))?;

    let mut paragraphs = Vec::new();
    for node in body.children().filter(|n| n.tag_name().name() == "p") {
        paragraphs.push(Paragraph::new(
            paragraph_text(node),
            paragraph_style(node, styles),
        ));
    }
    Ok(paragraphs)
}

/// Assembles visible paragraph text: `w:t` runs plus tab and line-break
/// characters, matching what a word processor shows for the paragraph.
fn paragraph_text(para: Node) -> String {
    let mut text = String::new();
    for node in para.descendants() {
        match node.tag_name().name() {
            "t" => text.push_str(node.text().unwrap_or("")),
            // Tab stops under w:pPr/w:tabs share the tag name; only run
            // content produces characters.
            "tab" if in_run(node) => text.push('\t'),
            "br" | "cr" if in_run(node) => text.push('\n'),
            _ => {}
        }
    }
    text
}

fn in_run(node: Node) -> bool {
    node.parent().map(|p| p.tag_name().name()) == Some("r")
}

fn paragraph_style(para: Node, styles: &HashMap<String, String>) -> Option<String> {
    let style_id = para
        .children()
        .find(|n| n.tag_name().name() == "pPr")?
        .children()
        .find(|n| n.tag_name().name() == "pStyle")
        .and_then(|n| attr_local(n, "val"))?;

    Some(
        styles
            .get(style_id)
            .cloned()
            .unwrap_or_else(|| style_id.to_string()),
    )
}

fn attr_local<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|a| a.name() == name)
        .map(|a| a.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    fn styles_xml() -> String {
        format!(
            r#"<w:styles xmlns:w="{WML_NS}">
                 <w:style w:type="paragraph" w:styleId="Heading1">
                   <w:name w:val="Heading 1"/>
                 </w:style>
                 <w:style w:type="paragraph" w:styleId="Heading2">
                   <w:name w:val="Heading 2"/>
                 </w:style>
                 <w:style w:type="character" w:styleId="Strong">
                   <w:name w:val="Strong"/>
                 </w:style>
               </w:styles>"#
        )
    }

    #[test]
    fn styles_map_resolves_paragraph_styles_only() {
        let styles = parse_styles(&styles_xml()).unwrap();

        assert_eq!(styles.get("Heading1").map(String::as_str), Some("Heading 1"));
        assert_eq!(styles.get("Heading2").map(String::as_str), Some("Heading 2"));
        // Character styles never name a paragraph.
        assert!(!styles.contains_key("Strong"));
    }

    #[test]
    fn document_paragraphs_resolve_text_and_style() {
        let styles = parse_styles(&styles_xml()).unwrap();
        let xml = format!(
            r#"<w:document xmlns:w="{WML_NS}">
                 <w:body>
                   <w:p>
                     <w:pPr><w:pStyle w:val="Heading1"/></w:pPr>
                     <w:r><w:t>Skin</w:t></w:r>
                   </w:p>
                   <w:p>
                     <w:r><w:t>Dictation Example:</w:t></w:r>
                   </w:p>
                   <w:p>
                     <w:r><w:t>Received</w:t><w:tab/><w:t>fresh</w:t></w:r>
                     <w:r><w:br/><w:t>second line</w:t></w:r>
                   </w:p>
                   <w:p>
                     <w:pPr><w:pStyle w:val="CustomQuote"/></w:pPr>
                     <w:r><w:t>styled but unmapped</w:t></w:r>
                   </w:p>
                 </w:body>
               </w:document>"#
        );

        let paras = parse_document(&xml, &styles).unwrap();
        assert_eq!(paras.len(), 4);

        assert_eq!(paras[0].text, "Skin");
        assert_eq!(paras[0].style_name.as_deref(), Some("Heading 1"));

        assert_eq!(paras[1].text, "Dictation Example:");
        assert_eq!(paras[1].style_name, None);

        assert_eq!(paras[2].text, "Received\tfresh\nsecond line");

        // Unmapped style IDs pass through raw; the core treats them as
        // non-heading content.
        assert_eq!(paras[3].style_name.as_deref(), Some("CustomQuote"));
    }

    #[test]
    fn table_cell_paragraphs_are_not_body_text() {
        let xml = format!(
            r#"<w:document xmlns:w="{WML_NS}">
                 <w:body>
                   <w:p><w:r><w:t>body paragraph</w:t></w:r></w:p>
                   <w:tbl>
                     <w:tr><w:tc>
                       <w:p><w:r><w:t>cell paragraph</w:t></w:r></w:p>
                     </w:tc></w:tr>
                   </w:tbl>
                 </w:body>
               </w:document>"#
        );

        let paras = parse_document(&xml, &HashMap::new()).unwrap();
        assert_eq!(paras.len(), 1);
        assert_eq!(paras[0].text, "body paragraph");
    }

    #[test]
    fn tab_stop_definitions_do_not_emit_characters() {
        let xml = format!(
            r#"<w:document xmlns:w="{WML_NS}">
                 <w:body>
                   <w:p>
                     <w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>
                     <w:r><w:t>no tabs here</w:t></w:r>
                   </w:p>
                 </w:body>
               </w:document>"#
        );

        let paras = parse_document(&xml, &HashMap::new()).unwrap();
        assert_eq!(paras[0].text, "no tabs here");
    }

    #[test]
    fn missing_body_is_malformed() {
        let xml = format!(r#"<w:document xmlns:w="{WML_NS}"/>"#);
        let result = parse_document(&xml, &HashMap::new());
        assert!(matches!(result, Err(DocxError::Malformed(_))));
    }
}
