//! Conversion history example
//!
//! Records a few conversions, shows deduplication and eviction, then
//! exports the most recent result to a temporary directory.
//!
//! Run with: cargo run --example conversion_history

use markdown_html_converter::{ConversionError, ConversionHistory, HtmlExport, MarkdownConverter};

fn main() -> Result<(), ConversionError> {
    println!("=== Conversion History Example ===\n");

    let converter = MarkdownConverter::new();
    let mut history = ConversionHistory::with_capacity(3);

    for markdown in ["# One", "# Two", "# One", "# Three", "# Four"] {
        let result = converter.convert_document(markdown)?;
        println!(
            "Converted {markdown:?}: {} words, {} characters",
            result.word_count(),
            result.character_count()
        );
        history.record(result);
    }

    println!("\nHistory (most recent first, capacity {}):", history.capacity());
    for entry in history.iter() {
        println!("  {:?} -> {}", entry.original_markdown(), entry.html_output());
    }

    match converter.convert_document("   ") {
        Err(e) => println!("\nBlank document rejected: {e}"),
        Ok(_) => println!("\nBlank document unexpectedly accepted"),
    }

    if let Some(latest) = history.latest() {
        let export = HtmlExport::from_result(latest);
        let path = export.save_in(std::env::temp_dir())?;
        println!(
            "\nExported {} ({}) to {} with ETag {}",
            export.file_name(),
            export.mime_type(),
            path.display(),
            export.etag()
        );
    }

    Ok(())
}
