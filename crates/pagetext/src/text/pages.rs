//! Page framing for OCR output.
//!
//! Pages recognized by OCR are joined into one string where each page is
//! introduced by a marker line `--- Page N ---` (1-based). Consumers segment
//! the text back into pages by looking for those lines:
//!
//! ```text
//! \n\n
//! \n--- Page 1 ---\n<page 1 text>\n
//! \n
//! \n--- Page 2 ---\n<page 2 text>\n
//! ```
//!
//! The page text is not the raw OCR output. It is normalized first: control
//! characters other than `\n`, `\r` and `\t` are stripped and trailing
//! whitespace is trimmed (see [`crate::ocr::normalize_page_text`]), so the
//! engine's closing newline and form feed never appear inside a frame.

use crate::types::PageText;

/// Leading newlines before the first page marker.
pub const DOCUMENT_PREFIX: &str = "\n\n";

/// Separator between two page fragments (the blank line after a page).
pub const PAGE_SEPARATOR: &str = "\n";

const MARKER_PREFIX: &str = "--- Page ";
const MARKER_SUFFIX: &str = " ---";

/// The marker line for a 1-based page number, without newlines.
pub fn page_marker(page_number: usize) -> String {
    format!("{}{}{}", MARKER_PREFIX, page_number, MARKER_SUFFIX)
}

/// One page's framed fragment: marker line, text, terminating newline.
fn page_fragment(page: &PageText) -> String {
    format!("\n{}\n{}\n", page_marker(page.index + 1), page.text)
}

/// Join recognized pages into the framed document text.
///
/// `pages` must already be in page order; this does not sort.
pub fn assemble_pages(pages: &[PageText]) -> String {
    let fragments: Vec<String> = pages.iter().map(page_fragment).collect();
    let mut text = String::with_capacity(DOCUMENT_PREFIX.len() + fragments.iter().map(|f| f.len() + 1).sum::<usize>());
    text.push_str(DOCUMENT_PREFIX);
    text.push_str(&fragments.join(PAGE_SEPARATOR));
    text
}

fn parse_marker(line: &str) -> Option<usize> {
    line.strip_prefix(MARKER_PREFIX)?.strip_suffix(MARKER_SUFFIX)?.parse().ok()
}

/// Split framed OCR text back into `(page_number, page_text)` pairs.
///
/// Page numbers are the 1-based numbers from the markers. Text before the
/// first marker is ignored. Page text has its framing newlines removed.
pub fn split_pages(text: &str) -> Vec<(usize, String)> {
    let mut pages = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if let Some(page_number) = parse_marker(line.trim_end_matches(['\n', '\r'])) {
            if let Some((number, body_start)) = current.take() {
                pages.push((number, text[body_start..line_start].trim_end().to_string()));
            }
            current = Some((page_number, offset));
        }
    }

    if let Some((number, body_start)) = current {
        pages.push((number, text[body_start..].trim_end().to_string()));
    }

    pages
}

/// Count the page marker lines in `text`.
pub fn count_page_markers(text: &str) -> usize {
    text.lines().filter(|line| parse_marker(line.trim_end_matches('\r')).is_some()).count()
}
