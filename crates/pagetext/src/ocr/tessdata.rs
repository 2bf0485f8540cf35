//! Locating Tesseract language data.

use super::error::OcrError;
use std::env;
use std::path::{Path, PathBuf};

const FALLBACK_TESSDATA_PATHS: &[&str] = &[
    "/opt/homebrew/share/tessdata",
    "/opt/homebrew/opt/tesseract/share/tessdata",
    "/usr/local/opt/tesseract/share/tessdata",
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    r#"C:\Program Files\Tesseract-OCR\tessdata"#,
    r#"C:\ProgramData\Tesseract-OCR\tessdata"#,
];

/// Resolve the tessdata directory.
///
/// `TESSDATA_PREFIX` wins when set; otherwise the first existing well-known
/// install location is used.
pub fn resolve_tessdata_path() -> Option<PathBuf> {
    if let Some(prefix) = env::var_os("TESSDATA_PREFIX")
        && !prefix.is_empty()
    {
        return Some(PathBuf::from(prefix));
    }

    FALLBACK_TESSDATA_PATHS
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .map(Path::to_path_buf)
}

/// Split a `+`-joined Tesseract language spec (`"eng+deu"`) into its codes.
pub fn language_codes(language: &str) -> Vec<&str> {
    language.split('+').map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// Check that every requested language has a traineddata file in `tessdata`.
pub fn validate_languages(tessdata: &Path, language: &str) -> Result<(), OcrError> {
    let codes = language_codes(language);
    if codes.is_empty() {
        return Err(OcrError::InvalidLanguageCode(
            "Language cannot be empty. Please specify a valid language code (e.g., 'eng')".to_string(),
        ));
    }

    for lang in codes {
        let traineddata_path = tessdata.join(format!("{}.traineddata", lang));
        if !traineddata_path.exists() {
            return Err(OcrError::InvalidLanguageCode(format!(
                "Language '{}' not found. Traineddata file does not exist: {}",
                lang,
                traineddata_path.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_language_codes() {
        assert_eq!(language_codes("eng"), vec!["eng"]);
        assert_eq!(language_codes("eng+deu"), vec!["eng", "deu"]);
        assert_eq!(language_codes(" eng + fra +"), vec!["eng", "fra"]);
        assert!(language_codes("").is_empty());
    }

    #[test]
    fn test_validate_languages_present() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("eng.traineddata"), b"").unwrap();
        std::fs::write(dir.path().join("deu.traineddata"), b"").unwrap();
        assert!(validate_languages(dir.path(), "eng+deu").is_ok());
    }

    #[test]
    fn test_validate_languages_missing() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("eng.traineddata"), b"").unwrap();
        let err = validate_languages(dir.path(), "eng+fra").unwrap_err();
        assert!(matches!(err, OcrError::InvalidLanguageCode(ref msg) if msg.contains("'fra'")));
    }

    #[test]
    fn test_validate_languages_empty() {
        let dir = tempdir().unwrap();
        assert!(validate_languages(dir.path(), "  ").is_err());
    }
}
