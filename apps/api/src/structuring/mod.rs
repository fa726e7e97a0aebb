//! Structuring: turns raw CV text into a [`CvDocument`].
//!
//! `AppState` holds an `Arc<dyn CvStructurer>`. The default implementation
//! asks the LLM to fill the sectioned template; when the reply carries no
//! usable document, the raw text is kept in a single `custom` section so the
//! user still gets a renderable CV.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::cv::{CvDocument, EntryItem, ListSection, RenderingOptions, SectionData, SectionKey};
use crate::errors::AppError;
use crate::llm_client::{extract_json_object, LlmClient, MODEL};
use crate::structuring::prompts::{structure_cv_prompt, STRUCTURE_CV_SYSTEM};

pub const FALLBACK_SECTION_TITLE: &str = "Extracted CV Content";

/// Outcome of one structuring call.
#[derive(Debug, Clone)]
pub struct StructuredCv {
    pub document: CvDocument,
    /// Human-readable name of what produced the document.
    pub method: String,
    pub fallback_used: bool,
}

/// Turns extracted CV text into a sectioned document.
#[async_trait]
pub trait CvStructurer: Send + Sync {
    async fn structure(&self, text: &str) -> Result<StructuredCv, AppError>;
}

/// Default structurer: one LLM call through [`LlmClient`].
pub struct LlmCvStructurer {
    llm: LlmClient,
}

impl LlmCvStructurer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CvStructurer for LlmCvStructurer {
    async fn structure(&self, text: &str) -> Result<StructuredCv, AppError> {
        let reply = self
            .llm
            .call_text(&structure_cv_prompt(text), STRUCTURE_CV_SYSTEM)
            .await?;

        let (document, fallback_used) = match parse_reply(&reply) {
            Some(document) => (document, false),
            None => {
                warn!(
                    reply_chars = reply.len(),
                    "LLM reply held no usable CV document, using raw-text fallback"
                );
                (fallback_document(text), true)
            }
        };

        info!(
            sections = document.sections.len(),
            fallback_used, "Structured CV text"
        );

        Ok(StructuredCv {
            document,
            method: format!("LLM ({MODEL})"),
            fallback_used,
        })
    }
}

/// Parses the first JSON object in a model reply. A reply that decodes but
/// contains no known section is treated as unusable.
pub fn parse_reply(reply: &str) -> Option<CvDocument> {
    let json = extract_json_object(reply)?;
    let document: CvDocument = serde_json::from_str(json).ok()?;
    if document.sections.is_empty() {
        return None;
    }
    Some(document)
}

/// Paragraphs separated by blank lines, with `\r\n` treated as `\n`.
fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

/// A document holding the raw text as one `custom` entry per paragraph.
pub fn fallback_document(text: &str) -> CvDocument {
    let items = paragraphs(text)
        .into_iter()
        .map(|p| EntryItem {
            description: p,
            ..EntryItem::default()
        })
        .collect();

    let mut document = CvDocument {
        section_order: vec![SectionKey::Custom.as_str().to_string()],
        options: RenderingOptions::default(),
        ..CvDocument::default()
    };
    document.insert(SectionData::Custom(ListSection {
        section_title: FALLBACK_SECTION_TITLE.to_string(),
        items,
    }));
    document
}
