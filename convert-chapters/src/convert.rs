//! Batch conversion of chapter text files to JSON records.

use crate::config::ConvertConfig;
use anyhow::{Context, Result};
use chapter_parser::{ChapterRecord, parse_chapter_file};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Characters of the heading text shown in progress lines.
const PREVIEW_CHARS: usize = 20;

/// A source file that could not be converted.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

/// Outcome of one conversion run.
#[derive(Debug, Default)]
pub struct ConversionSummary {
    /// Number of chapter files found
    pub found: usize,
    /// Ids written, in processing order
    pub converted: Vec<u32>,
    pub failures: Vec<FileFailure>,
}

/// Numeric value of a file stem for ordering; non-numeric stems sort as 0.
fn sort_key(path: &Path) -> u64 {
    path.file_stem()
        .and_then(OsStr::to_str)
        .filter(|stem| !stem.is_empty() && stem.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|stem| stem.parse().ok())
        .unwrap_or(0)
}

/// Check if a path has the given extension (case-sensitive).
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext == extension)
        .unwrap_or(false)
}

/// Check if a path names a hidden file (leading dot).
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Find chapter files in `dir`, ordered by chapter number then file name.
///
/// Hidden files are skipped. A missing directory yields no files.
pub fn find_chapter_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        log::debug!("Source directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).context("Failed to read source directory")? {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if path.is_file() && !is_hidden(&path) && has_extension(&path, extension) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| {
        sort_key(a)
            .cmp(&sort_key(b))
            .then_with(|| a.file_name().cmp(&b.file_name()))
    });

    Ok(files)
}

/// Parse one chapter file and write its JSON record into `output_dir`.
///
/// Returns the record and the path written.
pub fn convert_file(
    path: &Path,
    output_dir: &Path,
    indent: usize,
) -> Result<(ChapterRecord, PathBuf)> {
    let record = parse_chapter_file(path)?;
    let json = record
        .to_json_pretty(indent)
        .context("Failed to serialize chapter")?;

    let output_path = output_dir.join(record.output_file_name());
    fs::write(&output_path, json)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok((record, output_path))
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

/// Convert every chapter file in the configured source directory.
///
/// Per-file failures are reported and collected; they never stop the run.
pub fn convert_all(config: &ConvertConfig) -> Result<ConversionSummary> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let files = find_chapter_files(&config.source_dir, &config.extension)?;
    let mut summary = ConversionSummary {
        found: files.len(),
        ..Default::default()
    };

    if files.is_empty() {
        println!(
            "No .{} files found in {}",
            config.extension,
            config.source_dir.display()
        );
        return Ok(summary);
    }

    println!("Found {} chapter files", files.len());

    let mut written: HashMap<u32, String> = HashMap::new();

    for file_path in &files {
        let file_name = file_path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("unknown")
            .to_string();
        println!("Processing: {}", file_name);

        match convert_file(file_path, &config.output_dir, config.indent) {
            Ok((record, output_path)) => {
                let output_name = output_path
                    .file_name()
                    .and_then(OsStr::to_str)
                    .unwrap_or("unknown");
                println!(
                    "  -> Created: {} (Chapter {}: {}...)",
                    output_name,
                    record.id,
                    preview(&record.title_text)
                );
                log::debug!(
                    "{} -> {} ({} paragraphs)",
                    file_path.display(),
                    output_path.display(),
                    record.paragraphs.len()
                );

                if let Some(previous) = written.insert(record.id, file_name.clone()) {
                    log::warn!(
                        "Chapter {} from {} overwrote the output of {}",
                        record.id,
                        file_name,
                        previous
                    );
                }
                summary.converted.push(record.id);
            }
            Err(e) => {
                println!("  ERROR: {:#}", e);
                log::debug!("Conversion failed for {}", file_path.display());
                summary.failures.push(FileFailure {
                    file_name,
                    message: format!("{:#}", e),
                });
            }
        }
    }

    println!(
        "\nConverted: {}, Errors: {}",
        summary.converted.len(),
        summary.failures.len()
    );
    println!("Done! JSON files saved to {}", config.output_dir.display());

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(root: &Path) -> ConvertConfig {
        ConvertConfig {
            source_dir: root.join("txt"),
            output_dir: root.join("out").join("chapters"),
            ..Default::default()
        }
    }

    fn write_source(config: &ConvertConfig, name: &str, text: &str) {
        fs::create_dir_all(&config.source_dir).unwrap();
        fs::write(config.source_dir.join(name), text).unwrap();
    }

    fn file_names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_sort_key() {
        assert_eq!(sort_key(Path::new("12.txt")), 12);
        assert_eq!(sort_key(Path::new("007.txt")), 7);
        assert_eq!(sort_key(Path::new("preface.txt")), 0);
        assert_eq!(sort_key(Path::new("-3.txt")), 0);
    }

    #[test]
    fn test_find_chapter_files_numeric_order() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        for name in ["10.txt", "2.txt", "1.txt", "preface.txt", "notes.md", "3.TXT"] {
            write_source(&config, name, "x");
        }

        let files = find_chapter_files(&config.source_dir, "txt").unwrap();
        assert_eq!(
            file_names(&files),
            vec!["preface.txt", "1.txt", "2.txt", "10.txt"]
        );
    }

    #[test]
    fn test_find_chapter_files_skips_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        for name in [".5.txt", ".txt", "5.txt"] {
            write_source(&config, name, "x");
        }

        let files = find_chapter_files(&config.source_dir, "txt").unwrap();
        assert_eq!(file_names(&files), vec!["5.txt"]);
    }

    #[test]
    fn test_find_chapter_files_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let files = find_chapter_files(&temp_dir.path().join("nope"), "txt").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_convert_file_output_name() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        write_source(&config, "7.txt", "第七回 送宮花賈璉戲熙鳳\n\n正文");
        fs::create_dir_all(&config.output_dir).unwrap();

        let (record, output_path) =
            convert_file(&config.source_dir.join("7.txt"), &config.output_dir, 2).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(output_path, config.output_dir.join("chapter-007.json"));
        assert!(output_path.exists());
    }

    #[test]
    fn test_convert_all_writes_records() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        write_source(&config, "1.txt", "第一回 甲\n\nA\nB\n\n\nC\n");
        write_source(&config, "5.txt", "Some preface\n\n序文");

        let summary = convert_all(&config).unwrap();
        assert_eq!(summary.found, 2);
        assert_eq!(summary.converted, vec![1, 5]);
        assert!(summary.failures.is_empty());

        let json = fs::read_to_string(config.output_dir.join("chapter-001.json")).unwrap();
        let record = ChapterRecord::from_json(&json).unwrap();
        assert_eq!(record.title_text, "甲");
        let texts: Vec<&str> = record.paragraphs.iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["AB", "C"]);

        let json = fs::read_to_string(config.output_dir.join("chapter-005.json")).unwrap();
        let record = ChapterRecord::from_json(&json).unwrap();
        assert_eq!(record.id, 5);
        assert_eq!(record.title, "Some preface");
        assert_eq!(record.title_text, "Some preface");
    }

    #[test]
    fn test_convert_all_continues_after_failure() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        write_source(&config, "preface.txt", "No marker here");
        write_source(&config, "2.txt", "第二回 賈夫人仙逝揚州城\n\n正文");

        let summary = convert_all(&config).unwrap();
        assert_eq!(summary.converted, vec![2]);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].file_name, "preface.txt");
        assert!(summary.failures[0].message.contains("preface"));
        assert!(config.output_dir.join("chapter-002.json").exists());
    }

    #[test]
    fn test_convert_all_continues_after_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        write_source(&config, "1.txt", "第一回 甲\n\n一");
        write_source(&config, "2.txt", "第二回 乙\n\n二");
        // A directory in place of the output file makes the write fail
        fs::create_dir_all(config.output_dir.join("chapter-001.json")).unwrap();

        let summary = convert_all(&config).unwrap();
        assert_eq!(summary.converted, vec![2]);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].file_name, "1.txt");
        assert!(summary.failures[0].message.contains("Failed to write"));
        assert!(config.output_dir.join("chapter-002.json").is_file());
    }

    #[test]
    fn test_convert_all_empty_source() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        fs::create_dir_all(&config.source_dir).unwrap();

        let summary = convert_all(&config).unwrap();
        assert_eq!(summary.found, 0);
        assert!(summary.converted.is_empty());
        assert!(config.output_dir.is_dir());
    }

    #[test]
    fn test_convert_all_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        write_source(&config, "1.txt", "第一回 甄士隱夢幻識通靈\n\n　　此開卷第一回也。\n作者自云\n\n");
        write_source(&config, "21.txt", "第二十一回 賢襲人嬌嗔箴寶玉\n\n話說\n");

        convert_all(&config).unwrap();
        let first: Vec<Vec<u8>> = ["chapter-001.json", "chapter-021.json"]
            .iter()
            .map(|name| fs::read(config.output_dir.join(name)).unwrap())
            .collect();

        convert_all(&config).unwrap();
        let second: Vec<Vec<u8>> = ["chapter-001.json", "chapter-021.json"]
            .iter()
            .map(|name| fs::read(config.output_dir.join(name)).unwrap())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_convert_all_duplicate_id_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        write_source(&config, "3.txt", "第三回 先\n\n一");
        write_source(&config, "4.txt", "第三回 後\n\n二");

        let summary = convert_all(&config).unwrap();
        assert_eq!(summary.converted, vec![3, 3]);

        let json = fs::read_to_string(config.output_dir.join("chapter-003.json")).unwrap();
        let record = ChapterRecord::from_json(&json).unwrap();
        assert_eq!(record.title_text, "後");
    }

    #[test]
    fn test_preview_counts_chars() {
        let text = "甄士隱夢幻識通靈 賈雨村風塵懷閨秀再加幾字";
        assert_eq!(preview(text).chars().count(), 20);
        assert_eq!(preview("短"), "短");
    }
}
