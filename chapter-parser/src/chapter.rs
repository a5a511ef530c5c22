//! Chapter text parsing: title line, chapter number and paragraphs.

use crate::error::{ChapterError, Result};
use crate::numeral::parse_numeral;
use crate::record::{ChapterRecord, Paragraph};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// 第<numeral>回 followed by the heading text.
static TITLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^第([零一二三四五六七八九十百]+)回\s*(.+)").expect("title pattern should compile")
});

/// Split a title line into its chapter number and heading text.
///
/// Returns `(0, line)` when the line has no 第…回 marker, or when the numeral
/// decodes to 0.
///
/// ```
/// use chapter_parser::parse_title;
///
/// let (id, text) = parse_title("第二十一回 賢襲人嬌嗔箴寶玉");
/// assert_eq!(id, 21);
/// assert_eq!(text, "賢襲人嬌嗔箴寶玉");
/// ```
pub fn parse_title(line: &str) -> (u32, String) {
    let line = line.trim();

    match TITLE_PATTERN.captures(line) {
        Some(caps) => (parse_numeral(&caps[1]), caps[2].trim().to_string()),
        None => (0, line.to_string()),
    }
}

/// Group body lines into paragraphs.
///
/// Consecutive non-blank lines are trimmed and joined with no separator. A
/// blank line closes the current paragraph; further blank lines do nothing.
pub fn segment_paragraphs<'a, I>(lines: I) -> Vec<Paragraph>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in lines {
        let stripped = line.trim();
        if !stripped.is_empty() {
            current.push(stripped);
        } else if !current.is_empty() {
            paragraphs.push(Paragraph::new(current.concat()));
            current.clear();
        }
    }

    if !current.is_empty() {
        paragraphs.push(Paragraph::new(current.concat()));
    }

    paragraphs
}

/// Chapter number taken from a file stem such as `"12"`.
fn id_from_stem(stem: &str) -> Result<u32> {
    let invalid = || ChapterError::InvalidChapterId {
        stem: stem.to_string(),
    };

    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    stem.parse().map_err(|_| invalid())
}

/// Parse the full text of one chapter file.
///
/// `stem` is the file name without extension; it supplies the chapter number
/// when the title line does not.
pub fn parse_chapter(text: &str, stem: &str) -> Result<ChapterRecord> {
    let mut lines = text.trim().split('\n');

    let title = lines.next().unwrap_or("").trim().to_string();
    let (id, title_text) = parse_title(&title);

    let id = if id == 0 {
        log::debug!("No chapter number in title {:?}, using file name {:?}", title, stem);
        id_from_stem(stem)?
    } else {
        id
    };

    Ok(ChapterRecord {
        id,
        title,
        title_text,
        paragraphs: segment_paragraphs(lines),
    })
}

/// Read a chapter file as UTF-8 and parse it.
pub fn parse_chapter_file(path: &Path) -> Result<ChapterRecord> {
    let text = fs::read_to_string(path).map_err(|source| ChapterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let stem = path.file_stem().and_then(OsStr::to_str).unwrap_or("");
    parse_chapter(&text, stem)
}
