/// Example demonstrating deterministic HTML output
///
/// Identical Markdown always converts to identical HTML, so the export
/// ETag is stable across runs and converter instances.
///
/// Run with: cargo run --example deterministic_output
use markdown_html_converter::{HtmlExport, MarkdownConverter};

fn main() {
    println!("=== Deterministic HTML Output Example ===\n");

    let markdown = "\
# Main Title

This is a paragraph with **bold** and *italic* text.

Here's a [link](https://example.com) and an image: ![Test Image](image.png)

1. First item
2. Second item with `inline code`

```rust
fn main() {
    println!(\"Hello, world!\");
}
```";

    println!("Converting Markdown to HTML 5 times...\n");

    let outputs: Vec<String> = (0..5)
        .map(|_| MarkdownConverter::new().convert(markdown))
        .collect();
    let etags: Vec<String> = outputs
        .iter()
        .map(|html| HtmlExport::new(html.as_str()).etag())
        .collect();

    for (i, etag) in etags.iter().enumerate() {
        println!("Run {}: {} bytes, ETag {}", i + 1, outputs[i].len(), etag);
    }

    let identical = outputs.windows(2).all(|pair| pair[0] == pair[1]);
    println!("\nAll outputs identical: {identical}");
    println!("\nHTML:\n{}", outputs[0]);
}
