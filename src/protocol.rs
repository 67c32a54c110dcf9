//! Concourse wire protocol
//!
//! The orchestrator hands every step a JSON request on stdin and expects a
//! JSON response on stdout. Reader and writer are injected so the steps
//! stay testable and nothing global gets redirected; diagnostics never
//! travel through these sinks.

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Source;
use crate::error::ResourceError;

/// A single version entry as the orchestrator sees it. The `build` field
/// carries the artifact's repository path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub build: String,
}

/// A name/value pair surfaced in the build page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub value: String,
}

/// Request envelope shared by the three steps.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "P: DeserializeOwned"))]
pub struct Request<P> {
    pub source: Source,
    #[serde(default)]
    pub version: Option<Version>,
    #[serde(default)]
    pub params: Option<P>,
}

/// Response envelope of the `in` and `out` steps.
#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub version: Version,
    pub metadata: Vec<Metadata>,
}

pub fn read_request<P, R>(reader: R) -> Result<Request<P>, ResourceError>
where
    P: DeserializeOwned,
    R: Read,
{
    serde_json::from_reader(reader).map_err(ResourceError::Request)
}

pub fn write_response<T, W>(writer: &mut W, response: &T) -> Result<(), ResourceError>
where
    T: Serialize,
    W: Write,
{
    serde_json::to_writer(&mut *writer, response).map_err(ResourceError::Response)?;
    writer
        .write_all(b"\n")
        .map_err(|err| ResourceError::Response(serde_json::Error::io(err)))
}
