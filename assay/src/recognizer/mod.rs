pub mod ner;
pub mod rules;

pub use ner::{EntityCategory, EntityRecognizer, HttpEntityRecognizer, NullRecognizer, RecognizedSpan};
pub use rules::{PatternRule, RULES, match_rules};

use crate::intent::{EntityBinding, Intent};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of reading one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recognition {
    /// A pattern rule fired.
    Matched {
        intent: Intent,
        entities: EntityBinding,
    },
    /// No rule fired but the NER fallback found entities. There is no
    /// template for this outcome; the session answers it like `Unknown`.
    FindInformation { entities: EntityBinding },
    Unknown,
}

impl Recognition {
    #[must_use]
    pub const fn intent(&self) -> Option<Intent> {
        match self {
            Self::Matched { intent, .. } => Some(*intent),
            Self::FindInformation { .. } | Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Matched { intent, .. } => intent.to_string(),
            Self::FindInformation { .. } => "FindInformation".to_string(),
            Self::Unknown => "Unknown".to_string(),
        }
    }

    #[must_use]
    pub fn entities(&self) -> Option<&EntityBinding> {
        match self {
            Self::Matched { entities, .. } | Self::FindInformation { entities } => Some(entities),
            Self::Unknown => None,
        }
    }
}

/// Trims, drops trailing question marks and lowercases. Idempotent.
#[must_use]
pub fn normalize_question(question: &str) -> String {
    question
        .trim()
        .trim_end_matches('?')
        .trim()
        .to_lowercase()
}

/// Two-stage recognizer: ordered pattern rules, then the NER fallback.
#[derive(Debug, Clone)]
pub struct Recognizer {
    rules: &'static [PatternRule],
    fallback: Arc<dyn EntityRecognizer>,
}

impl Recognizer {
    #[must_use]
    pub fn new(fallback: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            rules: RULES.as_slice(),
            fallback,
        }
    }

    /// Pattern stage only; no I/O.
    #[must_use]
    pub fn match_patterns(&self, question: &str) -> Option<(Intent, EntityBinding)> {
        match_rules(self.rules, &normalize_question(question))
    }

    pub async fn recognize(&self, question: &str) -> Recognition {
        let normalized = normalize_question(question);

        if let Some((intent, entities)) = match_rules(self.rules, &normalized) {
            debug!(%intent, %entities, "pattern rule matched");
            return Recognition::Matched { intent, entities };
        }

        let spans = match self.fallback.recognize(&normalized).await {
            Ok(spans) => spans,
            Err(e) => {
                warn!("entity fallback failed: {e}");
                Vec::new()
            }
        };

        let mut entities = EntityBinding::new();
        for span in spans {
            if let Some(slot) = span.category.slot()
                && !span.text.trim().is_empty()
            {
                entities.bind(slot, &span.text);
            }
        }

        if entities.is_empty() {
            debug!("no rule and no entities for {normalized:?}");
            Recognition::Unknown
        } else {
            debug!(%entities, "entity fallback produced bindings");
            Recognition::FindInformation { entities }
        }
    }
}
