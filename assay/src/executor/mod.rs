pub mod neo4j;

pub use neo4j::Neo4jExecutor;

use crate::catalog::GraphQuery;
use crate::error::ExecutionError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// One row returned by the graph store, keyed by the template's field names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultRow {
    fields: BTreeMap<String, Value>,
}

impl ResultRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for ResultRow {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// The graph store as seen by the engine. Rows come back in store order and
/// must be kept in that order.
#[async_trait]
pub trait GraphExecutor: Send + Sync + Debug {
    async fn execute(&self, query: &GraphQuery) -> Result<Vec<ResultRow>, ExecutionError>;

    /// Releases the store connection. Called once, after the last turn.
    async fn close(&self) {}
}
