//! BigQuery `jobs.query` client.

use super::conversion::to_tabular;
use super::dto::{ErrorEnvelope, JobReference, QueryRequest, QueryResponse};
use async_trait::async_trait;
use postboard_core::TabularResult;
use postboard_error::SourceError;
use postboard_interface::{PostQuery, QueryExecutor};
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, error, instrument, warn};

const BIGQUERY_API_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";
const DEFAULT_WAIT_MS: u64 = 10_000;

/// Query executor backed by the BigQuery REST API.
///
/// The executor holds an already-minted OAuth bearer token; obtaining and
/// refreshing it is left to the caller.
#[derive(Debug, Clone)]
pub struct BigQueryExecutor {
    client: Client,
    base_url: String,
    project_id: String,
    access_token: String,
    location: Option<String>,
}

impl BigQueryExecutor {
    /// Creates a new BigQuery executor.
    ///
    /// # Arguments
    ///
    /// * `project_id` - Project the query jobs are billed to
    /// * `access_token` - OAuth bearer token with BigQuery read scope
    pub fn new(project_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        let project_id = project_id.into();
        debug!(project_id = %project_id, "Creating BigQuery executor");
        Self {
            client: Client::new(),
            base_url: BIGQUERY_API_URL.to_string(),
            project_id,
            access_token: access_token.into(),
            location: None,
        }
    }

    /// Uses a caller-configured HTTP client (timeouts, proxies).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Points the executor at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the dataset location (e.g. "US", "europe-west2").
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Project the jobs run in.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Starts the query with `jobs.query`.
    #[instrument(skip(self, query, sql), fields(query = %query.label()))]
    async fn start_query(&self, query: &PostQuery, sql: String) -> Result<QueryResponse, SourceError> {
        let url = format!("{}/projects/{}/queries", self.base_url, self.project_id);
        let body = QueryRequest::builder()
            .query(sql)
            .max_results(*query.limit())
            .timeout_ms(Some(DEFAULT_WAIT_MS))
            .location(self.location.clone())
            .build()
            .map_err(|e| SourceError::rejected(query.label(), e.to_string()))?;

        debug!(url = %url, "Submitting BigQuery job");
        self.send(query, self.client.post(&url).json(&body)).await
    }

    /// Fetches results of a submitted job with `jobs.getQueryResults`.
    #[instrument(skip(self, query), fields(query = %query.label(), job_id = %job.job_id))]
    async fn get_results(
        &self,
        query: &PostQuery,
        job: &JobReference,
        page_token: Option<&str>,
    ) -> Result<QueryResponse, SourceError> {
        let url = format!(
            "{}/projects/{}/queries/{}",
            self.base_url, job.project_id, job.job_id
        );
        let mut params = vec![
            ("maxResults", query.limit().to_string()),
            ("timeoutMs", DEFAULT_WAIT_MS.to_string()),
        ];
        if let Some(location) = job.location.as_ref().or(self.location.as_ref()) {
            params.push(("location", location.clone()));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        debug!(url = %url, "Fetching BigQuery job results");
        self.send(query, self.client.get(&url).query(&params)).await
    }

    async fn send(
        &self,
        query: &PostQuery,
        request: RequestBuilder,
    ) -> Result<QueryResponse, SourceError> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to reach BigQuery");
                SourceError::unavailable(query.label(), format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            error!(status = %status, message = %message, "BigQuery returned error");
            return Err(classify_status(query.label(), status, message));
        }

        response.json::<QueryResponse>().await.map_err(|e| {
            error!(error = ?e, "Failed to parse BigQuery response");
            SourceError::unavailable(query.label(), format!("unreadable response: {}", e))
        })
    }
}

/// Maps a non-success status to the source error taxonomy.
///
/// Authentication failures and server-side trouble mean the store is
/// unavailable; every other client error means the query was refused.
fn classify_status(query: &str, status: StatusCode, message: String) -> SourceError {
    let reason = format!("{} {}", status.as_u16(), message);
    if status == StatusCode::UNAUTHORIZED || status.is_server_error() {
        SourceError::unavailable(query, reason)
    } else {
        SourceError::rejected(query, reason)
    }
}

#[async_trait]
impl QueryExecutor for BigQueryExecutor {
    #[instrument(skip(self, query), fields(query = %query.label(), project_id = %self.project_id))]
    async fn execute(&self, query: &PostQuery) -> Result<TabularResult, SourceError> {
        let sql = query.to_sql()?;
        let mut response = self.start_query(query, sql).await?;
        let mut schema = None;
        let mut rows = Vec::new();

        loop {
            let job = response.job_reference.take();

            if !response.job_complete {
                let job = job.ok_or_else(|| {
                    SourceError::unavailable(query.label(), "incomplete job without a job reference")
                })?;
                debug!("Job still running, polling for results");
                response = self.get_results(query, &job, None).await?;
                continue;
            }

            if schema.is_none() {
                schema = response.schema.take();
            }
            rows.extend(response.rows.take().unwrap_or_default());

            match (response.page_token.take(), job) {
                (Some(token), Some(job)) if (rows.len() as u64) < *query.limit() => {
                    debug!(fetched = rows.len(), "Fetching next page");
                    response = self.get_results(query, &job, Some(&token)).await?;
                }
                _ => break,
            }
        }

        let Some(schema) = schema else {
            warn!("Completed job returned no schema");
            return Err(SourceError::unavailable(
                query.label(),
                "completed job returned no schema",
            ));
        };

        rows.truncate(*query.limit() as usize);
        let result = to_tabular(&schema, rows);
        debug!(rows = result.rows().len(), "Query complete");
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "bigquery"
    }
}
