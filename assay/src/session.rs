use crate::catalog::synthesize;
use crate::executor::GraphExecutor;
use crate::recognizer::{Recognition, Recognizer};
use crate::render::{self, EXECUTION_FAILED, NO_RESULTS, NOT_UNDERSTOOD, RENDER_FALLBACK};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// How a turn ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Answered,
    /// Unknown, FindInformation, or a recognized intent missing a slot.
    NotUnderstood,
    NoResults,
    ExecutionFailed,
    RenderFailed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub recognition: Recognition,
    pub outcome: Outcome,
    pub text: String,
}

impl Reply {
    fn new(recognition: Recognition, outcome: Outcome, text: impl Into<String>) -> Self {
        Self {
            recognition,
            outcome,
            text: text.into(),
        }
    }
}

/// Runs recognize → synthesize → execute → render for one question at a time.
///
/// Holds the store connection for its whole lifetime. Turns must not overlap;
/// callers await each `answer` before starting the next.
#[derive(Debug)]
pub struct Session {
    recognizer: Recognizer,
    executor: Arc<dyn GraphExecutor>,
}

impl Session {
    #[must_use]
    pub fn new(recognizer: Recognizer, executor: Arc<dyn GraphExecutor>) -> Self {
        Self {
            recognizer,
            executor,
        }
    }

    /// Answers one question. Every failure is contained in the returned reply.
    pub async fn answer(&self, question: &str) -> Reply {
        let recognition = self.recognizer.recognize(question).await;

        let Recognition::Matched { intent, entities } = &recognition else {
            debug!(outcome = %recognition.label(), "no answerable intent");
            return Reply::new(recognition, Outcome::NotUnderstood, NOT_UNDERSTOOD);
        };
        let (intent, entities) = (*intent, entities.clone());

        let query = match synthesize(intent, &entities) {
            Ok(query) => query,
            Err(e) => {
                debug!("synthesis failed: {e}");
                return Reply::new(recognition, Outcome::NotUnderstood, NOT_UNDERSTOOD);
            }
        };

        let rows = match self.executor.execute(&query).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(template = query.template_id, "query execution failed: {e}");
                return Reply::new(recognition, Outcome::ExecutionFailed, EXECUTION_FAILED);
            }
        };

        if rows.is_empty() {
            return Reply::new(recognition, Outcome::NoResults, NO_RESULTS);
        }

        match render::try_render(intent, &entities, &rows) {
            Ok(text) => Reply::new(recognition, Outcome::Answered, text),
            Err(e) => {
                warn!(%intent, "render failed: {e}");
                Reply::new(recognition, Outcome::RenderFailed, RENDER_FALLBACK)
            }
        }
    }

    /// Releases the store connection.
    pub async fn close(&self) {
        self.executor.close().await;
    }
}
