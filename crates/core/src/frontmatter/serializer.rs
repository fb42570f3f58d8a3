//! Frontmatter serialization back to markdown.

use super::types::ParsedDocument;

/// Serialize a parsed document back to a markdown string.
///
/// Fields are written in mapping order. A document whose frontmatter is
/// absent or empty serializes to its body alone.
pub fn serialize(doc: &ParsedDocument) -> String {
    if let Some(fm) = &doc.frontmatter
        && !fm.fields.is_empty()
    {
        let yaml = serde_yaml::to_string(&fm.fields).unwrap_or_default();
        return format!("---\n{}---\n{}", yaml, doc.body);
    }
    doc.body.clone()
}
