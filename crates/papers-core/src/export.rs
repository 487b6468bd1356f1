use std::path::{Path, PathBuf};

use crate::record::PaperRecord;

/// Characters that are invalid in a file name on at least one major platform.
const INVALID_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

const RESERVED_STEMS: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Leaves room for the `.md` extension within a 255-byte file name.
const MAX_STEM_BYTES: usize = 255 - ".md".len();

/// Result of one export pass.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Records written, or that would have been written without an output
    /// directory.
    pub processed: usize,
    pub written: Vec<PathBuf>,
    /// Labels of records without usable full text.
    pub skipped: Vec<String>,
    /// Labels of records whose file could not be written.
    pub failed: Vec<String>,
}

/// `# {title}`, a blank line, then the full text verbatim.
pub fn markdown_document(title: &str, fulltext: &str) -> String {
    format!("# {title}\n\n{fulltext}")
}

/// Make a title safe to use as a file name on Windows, macOS and Linux.
///
/// Removes path separators, reserved punctuation and control characters,
/// trims surrounding whitespace and trailing dots, suffixes Windows device
/// names with `_`, and caps the result at 252 bytes. May return an empty
/// string.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_control() && !INVALID_FILENAME_CHARS.contains(c))
        .collect();
    let mut out = cleaned.trim().trim_end_matches(['.', ' ']).to_string();

    let stem = out.split('.').next().unwrap_or_default();
    if RESERVED_STEMS.iter().any(|r| r.eq_ignore_ascii_case(stem)) {
        out.push('_');
    }

    if out.len() > MAX_STEM_BYTES {
        let mut end = MAX_STEM_BYTES;
        while !out.is_char_boundary(end) {
            end -= 1;
        }
        out.truncate(end);
        out = out.trim_end_matches(['.', ' ']).to_string();
    }
    out
}

/// `<dir>/<sanitized title>.md`, falling back to the Zotero key when the
/// title sanitizes to nothing.
pub fn markdown_path(dir: &Path, record: &PaperRecord) -> PathBuf {
    let mut stem = sanitize_filename(&record.title);
    if stem.is_empty() {
        stem = sanitize_filename(&record.key);
    }
    if stem.is_empty() {
        stem = "untitled".to_string();
    }
    dir.join(format!("{stem}.md"))
}

/// Write one markdown file per paper with usable full text.
///
/// With `output_dir == None` nothing touches the filesystem; qualifying papers
/// are only logged and counted. A failed write is logged and the export moves
/// on to the next paper. Existing files are overwritten.
pub fn export_papers(papers: &[PaperRecord], output_dir: Option<&Path>) -> ExportReport {
    let mut report = ExportReport::default();
    if papers.is_empty() {
        tracing::warn!("No papers found in the library.");
        return report;
    }
    tracing::info!("Found {} papers in the library.", papers.len());

    for (index, paper) in papers.iter().enumerate() {
        let Some(fulltext) = paper.usable_fulltext() else {
            let label = paper.label(index);
            tracing::warn!("No fulltext found for paper '{label}'");
            report.skipped.push(label);
            continue;
        };
        let document = markdown_document(&paper.title, fulltext);

        let Some(dir) = output_dir else {
            tracing::info!(
                "Would process paper '{}' (no output directory specified)",
                paper.title
            );
            report.processed += 1;
            continue;
        };

        let path = markdown_path(dir, paper);
        match std::fs::write(&path, document.as_bytes()) {
            Ok(()) => {
                tracing::info!("Saved fulltext of paper '{}' to {}", paper.title, path.display());
                report.processed += 1;
                report.written.push(path);
            }
            Err(e) => {
                tracing::error!("Failed to save paper '{}': {e}", paper.title);
                report.failed.push(paper.label(index));
            }
        }
    }

    tracing::info!("Successfully processed {} papers", report.processed);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_layout() {
        assert_eq!(markdown_document("Paper A", "Body A"), "# Paper A\n\nBody A");
    }

    #[test]
    fn sanitize_removes_invalid_characters() {
        assert_eq!(sanitize_filename("a/b\\c:d*e?f\"g<h>i|j"), "abcdefghij");
        assert_eq!(sanitize_filename("Line\nbreak\ttab"), "Linebreaktab");
    }

    #[test]
    fn sanitize_keeps_ordinary_titles() {
        assert_eq!(sanitize_filename("Paper A"), "Paper A");
        assert_eq!(
            sanitize_filename("Attention Is All You Need (2017)"),
            "Attention Is All You Need (2017)"
        );
        assert_eq!(sanitize_filename("Über Räume"), "Über Räume");
    }

    #[test]
    fn sanitize_trims_edges() {
        assert_eq!(sanitize_filename("  spaced out.  "), "spaced out");
        assert_eq!(sanitize_filename("..."), "");
        assert_eq!(sanitize_filename("???"), "");
    }

    #[test]
    fn sanitize_suffixes_reserved_names() {
        assert_eq!(sanitize_filename("CON"), "CON_");
        assert_eq!(sanitize_filename("lpt1.txt"), "lpt1.txt_");
        assert_eq!(sanitize_filename("Console"), "Console");
    }

    #[test]
    fn sanitize_truncates_on_char_boundary() {
        let long = "é".repeat(200);
        let out = sanitize_filename(&long);
        assert!(out.len() <= MAX_STEM_BYTES);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[test]
    fn path_falls_back_to_key() {
        let record = PaperRecord {
            key: "ABCD2345".into(),
            title: "<>".into(),
            ..Default::default()
        };
        assert_eq!(
            markdown_path(Path::new("/notes"), &record),
            Path::new("/notes/ABCD2345.md")
        );
    }
}
