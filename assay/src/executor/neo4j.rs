use super::{GraphExecutor, ResultRow};
use crate::catalog::GraphQuery;
use crate::config::StoreConfig;
use crate::error::ExecutionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct TxRequest<'a> {
    statements: [Statement<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Statement<'a> {
    statement: &'a str,
    parameters: &'a BTreeMap<&'static str, String>,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    columns: Vec<String>,
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

/// Executor speaking the Neo4j transactional HTTP API.
#[derive(Debug)]
pub struct Neo4jExecutor {
    /// Dropped by `close`, which releases the pooled connections.
    client: Mutex<Option<reqwest::Client>>,
    base_url: String,
    commit_url: String,
    user: String,
    password: Option<String>,
}

impl Neo4jExecutor {
    pub fn new(store: &StoreConfig) -> Result<Self, ExecutionError> {
        let client = reqwest::Client::builder().build()?;
        let base_url = store.uri.trim_end_matches('/').to_string();
        let commit_url = format!("{base_url}/db/{}/tx/commit", store.database);

        Ok(Self {
            client: Mutex::new(Some(client)),
            base_url,
            commit_url,
            user: store.user.clone(),
            password: store.password.clone(),
        })
    }

    /// Builds the executor and checks the store answers before any turn runs.
    pub async fn connect(store: &StoreConfig) -> Result<Self, ExecutionError> {
        let executor = Self::new(store)?;
        executor.ping().await?;
        info!("connected to graph store at {}", executor.base_url);
        Ok(executor)
    }

    /// A handle onto the shared pool, or `Closed` once `close` has run.
    fn client(&self) -> Result<reqwest::Client, ExecutionError> {
        self.client
            .lock()
            .ok()
            .and_then(|client| client.clone())
            .ok_or(ExecutionError::Closed)
    }

    async fn ping(&self) -> Result<(), ExecutionError> {
        let response = self
            .client()?
            .get(&self.base_url)
            .basic_auth(&self.user, self.password.as_deref())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ExecutionError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl GraphExecutor for Neo4jExecutor {
    async fn execute(&self, query: &GraphQuery) -> Result<Vec<ResultRow>, ExecutionError> {
        debug!(template = query.template_id, "executing query");

        let request = TxRequest {
            statements: [Statement {
                statement: query.cypher,
                parameters: &query.params,
            }],
        };

        let response = self
            .client()?
            .post(&self.commit_url)
            .basic_auth(&self.user, self.password.as_deref())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExecutionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: TxResponse = response.json().await?;
        rows_from_response(body)
    }

    async fn close(&self) {
        if let Ok(mut client) = self.client.lock()
            && client.take().is_some()
        {
            info!("released graph store connection to {}", self.base_url);
        }
    }
}

fn rows_from_response(mut body: TxResponse) -> Result<Vec<ResultRow>, ExecutionError> {
    if let Some(error) = body.errors.into_iter().next() {
        return Err(ExecutionError::Query {
            code: error.code,
            message: error.message,
        });
    }

    if body.results.is_empty() {
        return Err(ExecutionError::Malformed("no statement result".to_string()));
    }
    let result = body.results.swap_remove(0);

    result
        .data
        .into_iter()
        .map(|data| {
            if data.row.len() != result.columns.len() {
                return Err(ExecutionError::Malformed(format!(
                    "row has {} values for {} columns",
                    data.row.len(),
                    result.columns.len()
                )));
            }
            Ok(result.columns.iter().cloned().zip(data.row).collect())
        })
        .collect()
}
