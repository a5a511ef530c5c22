//! Chapter record types and their JSON form.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// One parsed chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// Chapter number
    pub id: u32,
    /// Title line as it appears in the source, trimmed
    pub title: String,
    /// Title with the leading 第…回 marker removed
    #[serde(rename = "titleText")]
    pub title_text: String,
    /// Body paragraphs in source order
    pub paragraphs: Vec<Paragraph>,
}

/// A paragraph of body text.
///
/// `content` always holds exactly one non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub content: Vec<String>,
}

impl Paragraph {
    pub fn new(text: String) -> Self {
        Self {
            content: vec![text],
        }
    }

    /// The paragraph text.
    pub fn text(&self) -> &str {
        self.content.first().map(String::as_str).unwrap_or("")
    }
}

impl ChapterRecord {
    /// File name the record is written under, e.g. `chapter-007.json`.
    pub fn output_file_name(&self) -> String {
        output_file_name(self.id)
    }

    /// Serialize as indented JSON with non-ASCII characters written literally.
    pub fn to_json_pretty(&self, indent: usize) -> Result<String> {
        let indent = " ".repeat(indent);
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Parse a record previously written by [`ChapterRecord::to_json_pretty`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Output file name for a chapter id, zero-padded to three digits.
pub fn output_file_name(id: u32) -> String {
    format!("chapter-{:03}.json", id)
}
