//! Job and batch lifecycle types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use forcebridge_client::Result;

/// Batch-job operation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobOperation {
    /// Insert new records
    Insert,
    /// Update existing records
    Update,
    /// Upsert based on external ID
    Upsert,
    /// Delete records
    Delete,
    /// Query records
    Query,
}

impl JobOperation {
    /// Get the API string for this operation.
    pub fn api_name(&self) -> &'static str {
        match self {
            JobOperation::Insert => "insert",
            JobOperation::Update => "update",
            JobOperation::Upsert => "upsert",
            JobOperation::Delete => "delete",
            JobOperation::Query => "query",
        }
    }

    /// Check if this operation keys on an external id field.
    pub fn is_upsert(&self) -> bool {
        matches!(self, JobOperation::Upsert)
    }
}

/// Batch-job states.
///
/// The platform owns the authoritative state; a job transitions to Closed or
/// Aborted only through explicit client calls, while Failed is reached on the
/// platform side outside client control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// Job is open and accepting batches
    Open,
    /// Job was closed by the client
    Closed,
    /// Job was aborted by the client
    Aborted,
    /// Job failed
    Failed,
}

impl JobState {
    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobState::Open)
    }

    /// The wire name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Open => "Open",
            JobState::Closed => "Closed",
            JobState::Aborted => "Aborted",
            JobState::Failed => "Failed",
        }
    }
}

/// Processing states of one submitted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchState {
    /// Waiting to be picked up
    Queued,
    /// Being processed
    InProgress,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
    /// Skipped because the owning job was aborted
    NotProcessed,
}

impl BatchState {
    /// Check if the batch is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BatchState::Completed | BatchState::Failed | BatchState::NotProcessed
        )
    }
}

/// A declared asynchronous bulk operation that batches are submitted against.
///
/// Known fields are promoted to typed attributes; everything else the platform
/// sends is kept in the open `fields` map for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub operation: JobOperation,
    pub object: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(
        rename = "externalIdFieldName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_id_field_name: Option<String>,
    pub state: JobState,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Job {
    /// Look up a platform-supplied field that has no typed attribute.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Job-creation descriptor posted to the batch base path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub operation: JobOperation,
    pub object: String,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id_field_name: Option<String>,
}

impl CreateJobRequest {
    /// Create a new job request.
    pub fn new(
        operation: JobOperation,
        object: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            object: object.into(),
            content_type: content_type.into(),
            external_id_field_name: None,
        }
    }

    /// Set the external id field for upsert jobs.
    pub fn with_external_id_field(mut self, field: impl Into<String>) -> Self {
        self.external_id_field_name = Some(field.into());
        self
    }
}

/// State-change document for close/abort requests.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SetJobStateRequest {
    pub state: JobState,
}

/// One submitted chunk of work within a [`Job`], with its own processing
/// state and a back-reference to the owning job.
#[derive(Debug, Clone)]
pub struct BatchInfo {
    pub id: String,
    pub state: BatchState,
    /// Platform-supplied fields beyond the typed attributes.
    pub fields: Map<String, Value>,
    job: Arc<Job>,
}

#[derive(Debug, Deserialize)]
struct BatchInfoData {
    id: String,
    state: BatchState,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl BatchInfo {
    /// Materialize a batch info from a platform payload, attaching the owning
    /// job as a read-only back-reference.
    pub(crate) fn from_value(value: Value, job: Arc<Job>) -> Result<Self> {
        let data: BatchInfoData = serde_json::from_value(value)?;
        Ok(Self {
            id: data.id,
            state: data.state,
            fields: data.fields,
            job,
        })
    }

    /// The owning job. Navigation only; mutating job state goes through the
    /// client.
    pub fn job(&self) -> &Job {
        &self.job
    }

    /// Look up a platform-supplied field that has no typed attribute.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// One outcome record produced after a batch completes, with a back-reference
/// to the batch it belongs to.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Platform-supplied result fields. A non-object record is kept under the
    /// `"value"` key.
    pub fields: Map<String, Value>,
    batch: Arc<BatchInfo>,
}

impl BatchResult {
    pub(crate) fn from_value(value: Value, batch: Arc<BatchInfo>) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        Self { fields, batch }
    }

    /// The batch this result belongs to.
    pub fn batch(&self) -> &BatchInfo {
        &self.batch
    }

    /// Look up a result field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
