/// Remove ASCII control characters except newline, carriage return and tab.
///
/// Tesseract terminates every page with a form feed; this drops it.
pub fn strip_control_characters(text: &str) -> String {
    if text
        .chars()
        .any(|c| matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}') && c != '\n' && c != '\r' && c != '\t')
    {
        text.chars()
            .filter(|c| !matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}') || matches!(c, '\n' | '\r' | '\t'))
            .collect()
    } else {
        text.to_string()
    }
}

/// Normalize the raw output of an OCR engine for one page.
pub fn normalize_page_text(text: &str) -> String {
    let mut cleaned = strip_control_characters(text);
    let trimmed_len = cleaned.trim_end().len();
    cleaned.truncate(trimmed_len);
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_control_characters() {
        let input = "Hello\x00World\x01Test";
        let output = strip_control_characters(input);
        assert_eq!(output, "HelloWorldTest");

        let input_with_newlines = "Hello\nWorld\rTest\t!";
        let output = strip_control_characters(input_with_newlines);
        assert_eq!(output, "Hello\nWorld\rTest\t!");
    }

    #[test]
    fn test_strip_control_characters_all_control() {
        assert_eq!(strip_control_characters("\x00\x01\x02\x03"), "");
    }

    #[test]
    fn test_strip_control_characters_delete_char() {
        assert_eq!(strip_control_characters("Hello\x7FWorld"), "HelloWorld");
    }

    #[test]
    fn test_normalize_drops_form_feed_and_trailing_newlines() {
        assert_eq!(normalize_page_text("Hello\n\x0c"), "Hello");
        assert_eq!(normalize_page_text("Hello\nWorld\n\n"), "Hello\nWorld");
    }

    #[test]
    fn test_normalize_keeps_leading_whitespace() {
        assert_eq!(normalize_page_text("  indented\n"), "  indented");
    }

    #[test]
    fn test_normalize_blank_page() {
        assert_eq!(normalize_page_text("\x0c"), "");
        assert_eq!(normalize_page_text(" \n \n"), "");
    }
}
