use anyhow::{Context, Result};
use itertools::Itertools;
use std::fs;
use std::path::Path;

const PAGE_BREAK: char = '\u{c}';

pub trait Document {
    fn page_count(&self) -> usize;

    fn page_text(&self, index: usize) -> Option<&str>;
}

pub fn extract_text(document: &dyn Document) -> String {
    (0..document.page_count())
        .filter_map(|index| document.page_text(index))
        .join("\n")
}

#[derive(Clone, Debug)]
pub struct TextDocument {
    pages: Vec<String>,
}

impl TextDocument {
    pub fn open(path: &Path) -> Result<TextDocument> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read document {}", path.display()))?;
        Ok(TextDocument::from_text(&content))
    }

    pub fn from_text(content: &str) -> TextDocument {
        TextDocument {
            pages: content.split(PAGE_BREAK).map(|p| p.to_owned()).collect(),
        }
    }
}

impl Document for TextDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Option<&str> {
        self.pages
            .get(index)
            .map(|page| page.as_str())
            .filter(|page| !page.trim().is_empty())
    }
}
