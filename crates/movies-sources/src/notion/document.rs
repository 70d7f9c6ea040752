//! Notion page and property value shapes
//!
//! Only the property types the movie database uses are modelled. Any other
//! property type in a response deserializes to [`PropertyValue::Unsupported`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Notion rejects rich text segments longer than this
pub const MAX_TEXT_SEGMENT_CHARS: usize = 2000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Assigned by Notion, unrelated to the IMDb id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<Cover>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title { title: Vec<RichText> },
    RichText { rich_text: Vec<RichText> },
    Number { number: Option<f64> },
    Checkbox { checkbox: bool },
    MultiSelect { multi_select: Vec<SelectOption> },
    Date { date: Option<DateValue> },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    pub fn title(content: &str) -> Self {
        Self::Title { title: RichText::segments(content) }
    }

    pub fn rich_text(content: &str) -> Self {
        Self::RichText { rich_text: RichText::segments(content) }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::RichText { .. } => "rich_text",
            Self::Number { .. } => "number",
            Self::Checkbox { .. } => "checkbox",
            Self::MultiSelect { .. } => "multi_select",
            Self::Date { .. } => "date",
            Self::Unsupported => "unsupported",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default = "default_text_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    /// Only present in responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
}

fn default_text_type() -> String {
    "text".to_string()
}

impl RichText {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: default_text_type(),
            text: Some(TextContent { content: content.into() }),
            plain_text: None,
        }
    }

    /// Split content into segments Notion accepts; empty content has no segment
    pub fn segments(content: &str) -> Vec<Self> {
        let chars: Vec<char> = content.chars().collect();
        chars
            .chunks(MAX_TEXT_SEGMENT_CHARS)
            .map(|chunk| Self::text(chunk.iter().collect::<String>()))
            .collect()
    }

    pub fn plain(&self) -> &str {
        self.plain_text
            .as_deref()
            .or_else(|| self.text.as_ref().map(|t| t.content.as_str()))
            .unwrap_or("")
    }

    pub fn concat(segments: &[RichText]) -> String {
        segments.iter().map(RichText::plain).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cover {
    External { external: ExternalFile },
    /// Files uploaded to Notion; their URLs expire, so they are not used as posters
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}
