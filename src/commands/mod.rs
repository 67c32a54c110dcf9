//! Resource step implementations
//!
//! Each step reads its request from an injected reader, talks to the
//! repository through an [`ArtifactClient`](crate::client::ArtifactClient)
//! produced by an injected connector, and writes its JSON response to an
//! injected writer. The shipped binary wires these to stdin/stdout and the
//! JFrog CLI client; tests wire them to buffers and stubs.

pub mod check;
pub mod get;
pub mod put;
