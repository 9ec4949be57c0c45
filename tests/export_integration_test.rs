//! Integration tests for exporting converted HTML
//!
//! The export artifact and its ETag must be stable for identical Markdown
//! input, and saving must land in `converted.html`.

use std::fs;

use markdown_html_converter::etag::ETagGenerator;
use markdown_html_converter::{
    EXPORT_FILE_NAME, EXPORT_MIME_TYPE, HtmlExport, MarkdownConverter,
};

#[test]
fn test_etag_consistency_with_conversion() {
    let markdown = "# Hello World\n\nTest content";

    let first = MarkdownConverter::new().convert_document(markdown).unwrap();
    let second = MarkdownConverter::new().convert_document(markdown).unwrap();
    assert_eq!(first.html_output(), second.html_output());

    let etag1 = HtmlExport::from_result(&first).etag();
    let etag2 = HtmlExport::from_result(&second).etag();
    assert_eq!(etag1, etag2, "ETags should be consistent for identical input");
}

#[test]
fn test_etag_changes_with_content() {
    let converter = MarkdownConverter::new();
    let a = HtmlExport::new(converter.convert("first"));
    let b = HtmlExport::new(converter.convert("second"));
    assert_ne!(a.etag(), b.etag());
}

#[test]
fn test_etag_matches_generator() {
    let export = HtmlExport::new("<p>x</p>");
    assert_eq!(export.etag(), ETagGenerator::new().generate(b"<p>x</p>"));
}

#[test]
fn test_save_in_writes_converted_html() {
    let dir = tempfile::tempdir().unwrap();
    let result = MarkdownConverter::new()
        .convert_document("* a\n* b")
        .unwrap();

    let path = HtmlExport::from_result(&result).save_in(dir.path()).unwrap();

    assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
    assert_eq!(fs::read_to_string(&path).unwrap(), "<ul><li>a</li><li>b</li></ul>");
}

#[test]
fn test_save_in_overwrites_previous_export() {
    let dir = tempfile::tempdir().unwrap();
    HtmlExport::new("<p>old</p>").save_in(dir.path()).unwrap();
    let path = HtmlExport::new("<p>new</p>").save_in(dir.path()).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "<p>new</p>");
}

#[test]
fn test_save_in_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does/not/exist");

    let err = HtmlExport::new("<p>x</p>").save_in(&missing).unwrap_err();
    assert_eq!(err.code(), 8);
}

#[test]
fn test_export_metadata() {
    let export = HtmlExport::new("");
    assert_eq!(export.file_name(), "converted.html");
    assert_eq!(export.mime_type(), EXPORT_MIME_TYPE);
    assert_eq!(EXPORT_MIME_TYPE, "text/html");
}
