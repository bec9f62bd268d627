//! Pure id-or-entity reference resolution for jobs and batches.
//!
//! Every lifecycle operation accepts either a bare identifier string or an
//! already-materialized entity. Resolution never issues a network call; the
//! client fetches an entity only when the result must carry a fully-populated
//! back-reference.

use forcebridge_client::{Error, ErrorKind, Result};

use crate::types::{BatchInfo, Job};

/// A job parameter: either a bare id or a materialized [`Job`].
#[derive(Debug, Clone, Copy)]
pub enum JobRef<'a> {
    Id(&'a str),
    Job(&'a Job),
}

impl<'a> From<&'a str> for JobRef<'a> {
    fn from(id: &'a str) -> Self {
        JobRef::Id(id)
    }
}

impl<'a> From<&'a String> for JobRef<'a> {
    fn from(id: &'a String) -> Self {
        JobRef::Id(id)
    }
}

impl<'a> From<&'a Job> for JobRef<'a> {
    fn from(job: &'a Job) -> Self {
        JobRef::Job(job)
    }
}

impl<'a> JobRef<'a> {
    /// Resolve to a job id without touching the network.
    pub fn resolve(&self) -> Result<&'a str> {
        match *self {
            JobRef::Id(id) if !id.is_empty() => Ok(id),
            JobRef::Id(_) => Err(Error::new(ErrorKind::InvalidReference(
                "empty job id".to_string(),
            ))),
            JobRef::Job(job) if !job.id.is_empty() => Ok(&job.id),
            JobRef::Job(_) => Err(Error::new(ErrorKind::InvalidReference(
                "job has an empty id".to_string(),
            ))),
        }
    }

    /// The materialized job, when one was supplied.
    pub(crate) fn as_job(&self) -> Option<&'a Job> {
        match *self {
            JobRef::Job(job) => Some(job),
            JobRef::Id(_) => None,
        }
    }
}

/// A batch parameter: either a bare id or a materialized [`BatchInfo`].
#[derive(Debug, Clone, Copy)]
pub enum BatchRef<'a> {
    Id(&'a str),
    Info(&'a BatchInfo),
}

impl<'a> From<&'a str> for BatchRef<'a> {
    fn from(id: &'a str) -> Self {
        BatchRef::Id(id)
    }
}

impl<'a> From<&'a String> for BatchRef<'a> {
    fn from(id: &'a String) -> Self {
        BatchRef::Id(id)
    }
}

impl<'a> From<&'a BatchInfo> for BatchRef<'a> {
    fn from(info: &'a BatchInfo) -> Self {
        BatchRef::Info(info)
    }
}

impl<'a> BatchRef<'a> {
    /// Resolve to a batch id without touching the network.
    pub fn resolve(&self) -> Result<&'a str> {
        match *self {
            BatchRef::Id(id) if !id.is_empty() => Ok(id),
            BatchRef::Id(_) => Err(Error::new(ErrorKind::InvalidReference(
                "empty batch id".to_string(),
            ))),
            BatchRef::Info(info) if !info.id.is_empty() => Ok(&info.id),
            BatchRef::Info(_) => Err(Error::new(ErrorKind::InvalidReference(
                "batch info has an empty id".to_string(),
            ))),
        }
    }

    /// The materialized batch info, when one was supplied.
    pub(crate) fn as_info(&self) -> Option<&'a BatchInfo> {
        match *self {
            BatchRef::Info(info) => Some(info),
            BatchRef::Id(_) => None,
        }
    }
}
