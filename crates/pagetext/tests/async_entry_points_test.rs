//! Async entry points delegate to the blocking pipeline on tokio's blocking pool.

#![cfg(all(feature = "pdf", feature = "tokio-runtime"))]

mod helpers;

use helpers::pdf_with_page_texts;
use pagetext::{ExtractionConfig, ExtractionSource, PagetextError, extract_bytes, extract_file};

#[tokio::test]
async fn test_extract_file_reads_text_layer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.pdf");
    std::fs::write(&path, pdf_with_page_texts(&["Invoice #123"])).unwrap();

    let result = extract_file(&path, &ExtractionConfig::default()).await.unwrap();

    assert_eq!(result.source, ExtractionSource::SelectableText);
    assert_eq!(result.text, "Invoice #123");
}

#[tokio::test]
async fn test_extract_bytes_reads_text_layer() {
    let pdf = pdf_with_page_texts(&["Quarterly report", "Page two"]);

    let result = extract_bytes(&pdf, &ExtractionConfig::default()).await.unwrap();

    assert_eq!(result.source, ExtractionSource::SelectableText);
    assert!(result.text.contains("Quarterly report"));
    assert!(result.text.contains("Page two"));
}

#[tokio::test]
async fn test_extract_file_rejects_non_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.png");
    std::fs::write(&path, b"\x89PNG").unwrap();

    let err = extract_file(&path, &ExtractionConfig::default()).await.unwrap_err();

    assert!(matches!(err, PagetextError::Validation { .. }));
}

#[tokio::test]
async fn test_extract_bytes_rejects_unknown_backend() {
    let mut config = ExtractionConfig::default();
    config.ocr.backend = "easyocr".to_string();

    let err = extract_bytes(b"%PDF-1.4", &config).await.unwrap_err();

    assert!(matches!(err, PagetextError::Validation { .. }));
}

#[tokio::test]
async fn test_extract_bytes_corrupt_input_fails_to_open() {
    let err = extract_bytes(b"this is not a pdf at all", &ExtractionConfig::default())
        .await
        .unwrap_err();

    // Tesseract is only needed once a document has pages to recognize.
    match &err {
        PagetextError::DocumentOpen { document, .. } => assert_eq!(document, "<bytes>"),
        PagetextError::MissingDependency(message) => {
            assert!(message.contains("Pdfium"), "unexpected missing dependency: {message}")
        }
        other => panic!("expected DocumentOpen, got {other:?}"),
    }
}
