//! Input manager for loading documents from the filesystem

use crate::error::{Result, ResumeMatcherError};
use crate::input::extractor::{extract, Document, ExtractedContent};
use crate::input::file_detector::DocumentFormat;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

/// Loads files, detects their format, and runs extraction.
///
/// Extraction itself is repeatable, but the underlying [`Document`] is
/// consumed per call; the manager keeps an extracted-content cache so a path
/// is only read and decoded once.
pub struct InputManager {
    cache: HashMap<String, ExtractedContent>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a file and extract its content.
    ///
    /// File I/O errors (missing file, unreadable path) are the only hard
    /// failures; an unsupported or undecodable format yields empty content.
    pub async fn extract_content(&mut self, path: &Path) -> Result<ExtractedContent> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached extraction for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let format = detect_format(path);
        if format == DocumentFormat::Unknown {
            warn!(
                "Unsupported file type for {}, treating as empty",
                path.display()
            );
        } else {
            info!("Extracting {:?} content from: {}", format, path.display());
        }

        let bytes = tokio::fs::read(path).await?;
        let content = extract(Document::new(bytes, format));

        if self.enable_cache {
            self.cache.insert(path_str, content.clone());
        }

        Ok(content)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

fn detect_format(path: &Path) -> DocumentFormat {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(DocumentFormat::from_extension)
        .unwrap_or(DocumentFormat::Unknown)
}
