use crate::error::RecognizerError;
use crate::intent::Slot;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Coarse entity categories reported by a statistical NER model.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Person,
    CreativeWork,
    Language,
    Organization,
    GeopoliticalEntity,
    Group,
    Other,
}

impl EntityCategory {
    /// Maps spaCy-style labels (`PERSON`, `WORK_OF_ART`, `GPE`, ...).
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "PERSON" | "PER" => Self::Person,
            "WORK_OF_ART" | "MOVIE" => Self::CreativeWork,
            "LANGUAGE" => Self::Language,
            "ORG" => Self::Organization,
            "GPE" => Self::GeopoliticalEntity,
            "NORP" => Self::Group,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn slot(self) -> Option<Slot> {
        match self {
            Self::Person => Some(Slot::Person),
            Self::CreativeWork => Some(Slot::Movie),
            Self::Language => Some(Slot::Language),
            Self::Organization => Some(Slot::Company),
            Self::GeopoliticalEntity => Some(Slot::Country),
            Self::Group => Some(Slot::Genre),
            Self::Other => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecognizedSpan {
    pub category: EntityCategory,
    pub text: String,
}

impl RecognizedSpan {
    #[must_use]
    pub fn new(category: EntityCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// Statistical fallback consulted when no pattern rule matches.
#[async_trait]
pub trait EntityRecognizer: Send + Sync + Debug {
    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>, RecognizerError>;
}

/// Recognizer used when no entity service is configured; never finds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecognizer;

#[async_trait]
impl EntityRecognizer for NullRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<RecognizedSpan>, RecognizerError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct NerResponse {
    #[serde(default)]
    entities: Vec<NerEntity>,
}

#[derive(Debug, Deserialize)]
struct NerEntity {
    label: String,
    text: String,
}

/// Client for an HTTP entity service that accepts `{"text": ...}` and answers
/// `{"entities": [{"label": ..., "text": ...}]}`.
#[derive(Debug, Clone)]
pub struct HttpEntityRecognizer {
    client: reqwest::Client,
    url: String,
}

impl HttpEntityRecognizer {
    pub fn new(url: impl Into<String>) -> Result<Self, RecognizerError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl EntityRecognizer for HttpEntityRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>, RecognizerError> {
        let response = self
            .client
            .post(&self.url)
            .json(&NerRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecognizerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: NerResponse = response.json().await?;
        Ok(parsed
            .entities
            .into_iter()
            .map(|entity| RecognizedSpan::new(EntityCategory::from_label(&entity.label), entity.text))
            .collect())
    }
}
