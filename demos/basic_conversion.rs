//! Basic conversion example demonstrating the Markdown converter

use markdown_html_converter::converter::MarkdownConverter;
use markdown_html_converter::options::{ConversionOptions, LineBreakMode};

fn main() {
    println!("=== Markdown HTML Converter - Basic Examples ===\n");

    // Example 1: Heading and paragraph
    show(
        "Heading and paragraph",
        &MarkdownConverter::new(),
        "# Welcome\n\nThis is a **test** document.",
    );

    // Example 2: Lists and tables
    show(
        "Lists and tables",
        &MarkdownConverter::new(),
        "* apples\n* pears\n\n| Fruit | Count |\n|:------|------:|\n| apple | 3 |",
    );

    // Example 3: Code is never reformatted
    show(
        "Code blocks",
        &MarkdownConverter::new(),
        "```rust\nlet x = *ptr; // not italic\n```\n\nInline `**raw**` stays raw.",
    );

    // Example 4: GitHub-style line breaks and emoji
    let github = MarkdownConverter::with_options(ConversionOptions {
        line_breaks: LineBreakMode::Github,
        enable_emoji: true,
        ..Default::default()
    });
    show("GitHub line breaks", &github, "first line\nsecond line :rocket:");

    // Example 5: Malformed input degrades to literal text
    show(
        "Malformed input",
        &MarkdownConverter::new(),
        "**unclosed and [broken](link",
    );
}

fn show(title: &str, converter: &MarkdownConverter, markdown: &str) {
    println!("{title}");
    println!("Input Markdown:");
    println!("{markdown}\n");

    println!("Output HTML:");
    println!("{}", converter.convert(markdown));
    println!("---\n");
}
