//! Text extraction from various file formats

use crate::error::{AtsOptimizerError, Result};
use pulldown_cmark::{Event, Options, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let display = path.display().to_string();

        // pdf-extract is synchronous and can be slow on large documents.
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string()))
            .await
            .map_err(|e| AtsOptimizerError::PdfExtraction(format!("Extraction task for '{}' failed: {}", display, e)))?
            .map_err(|e| {
                AtsOptimizerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", display, e))
            })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Flatten markdown to plain text: one line per block, formatting markers
/// and raw HTML dropped, inline code kept.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut text = String::with_capacity(markdown.len());
    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak | Event::Rule => text.push('\n'),
            Event::End(Tag::TableCell) => text.push(' '),
            Event::End(
                Tag::Paragraph
                | Tag::Heading(..)
                | Tag::Item
                | Tag::CodeBlock(_)
                | Tag::BlockQuote
                | Tag::TableHead
                | Tag::TableRow,
            ) => text.push('\n'),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text() {
        let markdown = "# John Doe\n\n**Software Engineer** at _Acme_\n\n## Skills\n\n- React\n- `Node.js`\n- <b>HTML</b> & CSS\n\n---\n\nBuilt services\nin Rust.";
        let text = markdown_to_text(markdown);
        assert_eq!(
            text,
            "John Doe\nSoftware Engineer at Acme\nSkills\nReact\nNode.js\nHTML & CSS\nBuilt services in Rust."
        );
    }

    #[test]
    fn test_markdown_table() {
        let markdown = "| Skill | Years |\n|---|---|\n| Rust | 3 |\n";
        assert_eq!(markdown_to_text(markdown), "Skill Years\nRust 3");
    }
}
