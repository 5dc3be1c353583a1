//! Text extraction from various document formats
//!
//! Extraction is total: a document that cannot be decoded yields empty
//! content rather than an error, and downstream stages are expected to
//! degrade gracefully when `text` is empty. A [`Document`] is consumed by
//! extraction; callers that need the raw bytes afterwards must retain their
//! own copy.

use crate::input::file_detector::DocumentFormat;
use log::warn;
use lopdf::Object;
use pulldown_cmark::Parser;
use regex::Regex;
use std::io::Read;

/// Raw document bytes plus their declared format.
pub struct Document {
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
}

impl Document {
    pub fn new(bytes: Vec<u8>, format: DocumentFormat) -> Self {
        Self { bytes, format }
    }
}

/// Result of text extraction. Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContent {
    pub text: String,
    pub embedded_image: Option<EmbeddedImage>,
    pub page_texts: Vec<String>,
}

impl ExtractedContent {
    fn empty() -> Self {
        Self {
            text: String::new(),
            embedded_image: None,
            page_texts: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// First embedded raster image found in a PDF, in page order.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub data: Vec<u8>,
    pub kind: ImageKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// DCTDecode stream, usable as a JPEG file verbatim
    Jpeg,
    /// Decompressed raw sample data for other filters
    Raw,
}

/// Extract text (and, for PDFs, an optional embedded image) from a document.
///
/// Consumes the document. Never fails: unsupported formats and decode
/// errors produce empty content.
pub fn extract(document: Document) -> ExtractedContent {
    match document.format {
        DocumentFormat::Pdf => extract_pdf(&document.bytes),
        DocumentFormat::Docx => extract_docx(&document.bytes),
        DocumentFormat::Text => ExtractedContent {
            text: String::from_utf8_lossy(&document.bytes).into_owned(),
            embedded_image: None,
            page_texts: Vec::new(),
        },
        DocumentFormat::Markdown => extract_markdown(&document.bytes),
        DocumentFormat::Unknown => {
            warn!("Unknown document format, yielding empty content");
            ExtractedContent::empty()
        }
    }
}

/// PDF: per-page text in page order joined with page separators, plus the
/// first embedded raster image if any.
fn extract_pdf(bytes: &[u8]) -> ExtractedContent {
    let page_texts = match pdf_extract::extract_text_from_mem_by_pages(bytes) {
        Ok(pages) => pages.iter().map(|p| p.trim().to_string()).collect(),
        Err(e) => {
            warn!("PDF text extraction failed: {}", e);
            Vec::new()
        }
    };

    let text = page_texts.join("\n\n");
    let embedded_image = find_first_pdf_image(bytes);

    ExtractedContent {
        text,
        embedded_image,
        page_texts,
    }
}

/// Scan pages in order for the first image XObject.
fn find_first_pdf_image(bytes: &[u8]) -> Option<EmbeddedImage> {
    let doc = match lopdf::Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("PDF parse for image scan failed: {}", e);
            return None;
        }
    };

    for (_page_number, page_id) in doc.get_pages() {
        // A page that fails to resolve must not end the scan; later pages
        // may still carry an image
        let page_dict = match doc.get_dictionary(page_id) {
            Ok(dict) => dict,
            Err(_) => continue,
        };
        let resources = match page_dict
            .get(b"Resources")
            .and_then(|obj| resolve(&doc, obj).as_dict())
        {
            Ok(dict) => dict,
            Err(_) => continue,
        };
        let xobjects = match resources
            .get(b"XObject")
            .and_then(|obj| resolve(&doc, obj).as_dict())
        {
            Ok(dict) => dict,
            Err(_) => continue,
        };

        for (_name, value) in xobjects.iter() {
            let stream = match resolve(&doc, value).as_stream() {
                Ok(stream) => stream,
                Err(_) => continue,
            };
            let is_image = stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map(|n| n == b"Image")
                .unwrap_or(false);
            if !is_image {
                continue;
            }

            if stream_has_filter(&doc, stream, b"DCTDecode") {
                return Some(EmbeddedImage {
                    data: stream.content.clone(),
                    kind: ImageKind::Jpeg,
                });
            }
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            return Some(EmbeddedImage {
                data,
                kind: ImageKind::Raw,
            });
        }
    }

    None
}

fn stream_has_filter(doc: &lopdf::Document, stream: &lopdf::Stream, name: &[u8]) -> bool {
    let filter = match stream.dict.get(b"Filter") {
        Ok(obj) => resolve(doc, obj),
        Err(_) => return false,
    };
    match filter {
        Object::Name(n) => n.as_slice() == name,
        Object::Array(items) => items
            .iter()
            .any(|item| matches!(resolve(doc, item), Object::Name(n) if n.as_slice() == name)),
        _ => false,
    }
}

fn resolve<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// DOCX: paragraph text from word/document.xml in document order.
/// Images are not extracted from DOCX.
fn extract_docx(bytes: &[u8]) -> ExtractedContent {
    let xml = match read_docx_document_xml(bytes) {
        Ok(xml) => xml,
        Err(e) => {
            warn!("DOCX extraction failed: {}", e);
            return ExtractedContent::empty();
        }
    };

    // One line per <w:p> paragraph; each paragraph is the concatenation of
    // its <w:t> text runs.
    let run_re = Regex::new(r"<w:t[^>]*>([^<]*)</w:t>").expect("Invalid DOCX run regex");
    let mut paragraphs = Vec::new();
    for paragraph_xml in xml.split("</w:p>") {
        let mut paragraph = String::new();
        for cap in run_re.captures_iter(paragraph_xml) {
            paragraph.push_str(&unescape_xml(&cap[1]));
        }
        let paragraph = paragraph.trim().to_string();
        if !paragraph.is_empty() {
            paragraphs.push(paragraph);
        }
    }

    ExtractedContent {
        text: paragraphs.join("\n"),
        embedded_image: None,
        page_texts: Vec::new(),
    }
}

fn read_docx_document_xml(bytes: &[u8]) -> anyhow::Result<String> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)?;
    let mut file = archive.by_name("word/document.xml")?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)?;
    Ok(xml)
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Markdown: strip formatting down to plain text.
fn extract_markdown(bytes: &[u8]) -> ExtractedContent {
    let markdown = String::from_utf8_lossy(bytes);
    let mut text = String::new();

    use pulldown_cmark::{Event, Tag};

    for event in Parser::new(&markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => {
                text.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak => {
                text.push('\n');
            }
            // Block boundaries become line breaks; inline spans do not
            Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => {
                if !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }

    ExtractedContent {
        text: text.trim().to_string(),
        embedded_image: None,
        page_texts: Vec::new(),
    }
}
