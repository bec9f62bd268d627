//! Batch-job lifecycle client.
//!
//! Every operation routes through the dispatch layer against the async batch
//! base URL. State transitions are never flipped locally: the client re-reads
//! the authoritative state from the platform response and fails when it does
//! not match the requested target.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use forcebridge_client::{
    Client, ClientConfig, Error, ErrorKind, Headers, RequestMethod, Result,
};

use crate::refs::{BatchRef, JobRef};
use crate::types::{BatchInfo, BatchResult, CreateJobRequest, Job, JobState, JobOperation};

/// Client for the asynchronous batch-job API.
///
/// # Example
///
/// ```rust,ignore
/// use forcebridge_bulk::{BulkClient, JobOperation};
/// use forcebridge_client::ClientConfig;
/// use serde_json::json;
///
/// let client = BulkClient::new(ClientConfig::new("consumer_key", "consumer_secret"))?;
/// client.inner().login("user@example.com", "password", "token").await?;
///
/// let job = client.create_job(JobOperation::Insert, "Account", "JSON", None).await?;
/// let batch = client.add_batch(&job, &json!([{"Name": "Acme"}])).await?;
/// client.close_job(&job).await?;
///
/// let results = client.get_batch_results(&job, &batch).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BulkClient {
    client: Client,
}

impl BulkClient {
    /// Create a new bulk client with an empty session.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(config)?,
        })
    }

    /// Create a bulk client from an existing dispatch client, sharing its
    /// session.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying dispatch client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    // =========================================================================
    // Job Operations
    // =========================================================================

    /// Declare a new job.
    ///
    /// `external_id_field_name` is included in the descriptor only for upsert
    /// jobs with a non-empty value; whether to require it for upsert is left
    /// to the caller.
    #[instrument(skip(self))]
    pub async fn create_job(
        &self,
        operation: JobOperation,
        object: &str,
        content_type: &str,
        external_id_field_name: Option<&str>,
    ) -> Result<Job> {
        let mut request = CreateJobRequest::new(operation, object, content_type);
        if operation.is_upsert() {
            if let Some(field) = external_id_field_name.filter(|field| !field.is_empty()) {
                request = request.with_external_id_field(field);
            }
        }

        let params = serde_json::to_value(&request)?;
        let value = self
            .client
            .request_batch("", Some(&params), RequestMethod::Post, Headers::new())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a job by reference.
    #[instrument(skip(self, job))]
    pub async fn get_job<'a>(&self, job: impl Into<JobRef<'a>>) -> Result<Job> {
        let id = job.into().resolve()?;
        let value = self
            .client
            .request_batch(&format!("/{}", id), None, RequestMethod::Get, Headers::new())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Close a job so no further batches can be added.
    #[instrument(skip(self, job))]
    pub async fn close_job<'a>(&self, job: impl Into<JobRef<'a>>) -> Result<Job> {
        self.set_job_state(job.into(), JobState::Closed).await
    }

    /// Abort a job; unprocessed batches will not run.
    #[instrument(skip(self, job))]
    pub async fn abort_job<'a>(&self, job: impl Into<JobRef<'a>>) -> Result<Job> {
        self.set_job_state(job.into(), JobState::Aborted).await
    }

    /// Request a state change and verify the platform actually applied it.
    async fn set_job_state(&self, job: JobRef<'_>, target: JobState) -> Result<Job> {
        let id = job.resolve()?;
        let params = serde_json::to_value(crate::types::SetJobStateRequest { state: target })?;
        let value = self
            .client
            .request_batch(
                &format!("/{}", id),
                Some(&params),
                RequestMethod::Post,
                Headers::new(),
            )
            .await?;

        let job: Job = serde_json::from_value(value)?;
        if job.state != target {
            return Err(Error::new(ErrorKind::StateTransition {
                expected: target.as_str().to_string(),
                actual: job.state.as_str().to_string(),
            }));
        }
        Ok(job)
    }

    // =========================================================================
    // Batch Operations
    // =========================================================================

    /// Submit a batch payload under a job.
    ///
    /// A bare job id is looked up first so the returned [`BatchInfo`] carries
    /// a real job back-reference.
    #[instrument(skip(self, job, payload))]
    pub async fn add_batch<'a>(
        &self,
        job: impl Into<JobRef<'a>>,
        payload: &Value,
    ) -> Result<BatchInfo> {
        let job = self.materialize_job(job.into()).await?;
        let value = self
            .client
            .request_batch(
                &format!("/{}/batch", job.id),
                Some(payload),
                RequestMethod::Post,
                Headers::new(),
            )
            .await?;
        BatchInfo::from_value(value, job)
    }

    /// Fetch every batch of a job, in the platform's listing order.
    #[instrument(skip(self, job))]
    pub async fn get_job_batches<'a>(&self, job: impl Into<JobRef<'a>>) -> Result<Vec<BatchInfo>> {
        let job = self.materialize_job(job.into()).await?;
        let value = self
            .client
            .request_batch(
                &format!("/{}/batch", job.id),
                None,
                RequestMethod::Get,
                Headers::new(),
            )
            .await?;

        let entries = match value {
            Value::Array(entries) => entries,
            Value::Object(mut map) => match map.remove("batchInfo") {
                Some(Value::Array(entries)) => entries,
                Some(single) => vec![single],
                None => {
                    return Err(Error::new(ErrorKind::Decode(
                        "batch listing is missing batchInfo".to_string(),
                    )))
                }
            },
            _ => {
                return Err(Error::new(ErrorKind::Decode(
                    "unexpected batch listing shape".to_string(),
                )))
            }
        };

        entries
            .into_iter()
            .map(|entry| BatchInfo::from_value(entry, Arc::clone(&job)))
            .collect()
    }

    /// Fetch one batch of a job.
    #[instrument(skip(self, job, batch))]
    pub async fn get_batch_info<'a, 'b>(
        &self,
        job: impl Into<JobRef<'a>>,
        batch: impl Into<BatchRef<'b>>,
    ) -> Result<BatchInfo> {
        let batch_id = batch.into().resolve()?.to_string();
        let job = self.materialize_job(job.into()).await?;
        let value = self
            .client
            .request_batch(
                &format!("/{}/batch/{}", job.id, batch_id),
                None,
                RequestMethod::Get,
                Headers::new(),
            )
            .await?;
        BatchInfo::from_value(value, job)
    }

    /// Fetch the results of a completed batch, one [`BatchResult`] per record
    /// in platform response order.
    ///
    /// A bare batch id is looked up first so every result carries a real
    /// batch back-reference.
    #[instrument(skip(self, job, batch))]
    pub async fn get_batch_results<'a, 'b>(
        &self,
        job: impl Into<JobRef<'a>>,
        batch: impl Into<BatchRef<'b>>,
    ) -> Result<Vec<BatchResult>> {
        let job = job.into();
        let batch = batch.into();
        let job_id = job.resolve()?.to_string();

        let info = match batch.as_info() {
            Some(info) => {
                batch.resolve()?;
                Arc::new(info.clone())
            }
            None => Arc::new(self.get_batch_info(job, batch).await?),
        };

        let value = self
            .client
            .request_batch(
                &format!("/{}/batch/{}/result", job_id, info.id),
                None,
                RequestMethod::Get,
                Headers::new(),
            )
            .await?;

        let records = match value {
            Value::Array(records) => records,
            other => vec![other],
        };

        Ok(records
            .into_iter()
            .map(|record| BatchResult::from_value(record, Arc::clone(&info)))
            .collect())
    }

    /// Resolve a job reference to a materialized job, fetching it only when a
    /// bare id was supplied.
    async fn materialize_job(&self, job: JobRef<'_>) -> Result<Arc<Job>> {
        match job.as_job() {
            Some(job) => {
                JobRef::from(job).resolve()?;
                Ok(Arc::new(job.clone()))
            }
            None => {
                let id = job.resolve()?;
                Ok(Arc::new(self.get_job(id).await?))
            }
        }
    }
}
