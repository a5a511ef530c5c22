//! Chapter parsing for classical Chinese novel text files.
//!
//! Turns the raw text of one chapter into a [`ChapterRecord`]:
//! - the chapter number, decoded from the 第…回 heading (see [`numeral`])
//! - the title line and the heading text after the marker
//! - the body, grouped into paragraphs on blank lines

pub mod chapter;
pub mod error;
pub mod numeral;
pub mod record;

pub use chapter::{parse_chapter, parse_chapter_file, parse_title, segment_paragraphs};
pub use error::{ChapterError, Result};
pub use numeral::parse_numeral;
pub use record::{ChapterRecord, Paragraph, output_file_name};
