//! The `check` step: report artifact versions newer than the last build.

use std::io::{Read, Write};

use tracing::info;

use crate::client::{ArtifactClient, ClientError, FileSpec};
use crate::config::Source;
use crate::error::ResourceError;
use crate::logging;
use crate::protocol::{self, Request, Version};
use crate::version::resolver::resolve_versions;

/// Run the step: read the request from `input`, search the repository via
/// the client produced by `connect`, and write the ordered version list
/// to `output`.
pub fn run<R, W, C, F>(input: R, output: &mut W, connect: F) -> Result<(), ResourceError>
where
    R: Read,
    W: Write,
    C: ArtifactClient,
    F: FnOnce(&Source) -> Result<C, ClientError>,
{
    let request: Request<serde_json::Value> = protocol::read_request(input)?;
    let source = request.source;
    logging::init(&source.log_level);
    source.validate_with_pattern()?;

    let client = connect(&source)?;
    let spec = FileSpec::builder()
        .pattern(source.pattern.as_str())
        .props(source.props.as_str())
        .recursive(source.recursive)
        .flat(source.flat)
        .regexp(source.regexp)
        .build();
    let results = client.search(&spec)?;
    let candidates: Vec<String> = results.into_iter().map(|entry| entry.path).collect();
    info!("search returned {} candidate file(s)", candidates.len());

    let previous = request.version.map(|v| v.build).unwrap_or_default();
    let versions: Vec<Version> = resolve_versions(&candidates, &source.version, &previous)?
        .into_iter()
        .map(|build| Version { build })
        .collect();
    protocol::write_response(output, &versions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockArtifactClient, SearchEntry};
    use serde_json::json;

    fn entry(path: &str) -> SearchEntry {
        SearchEntry {
            path: path.to_string(),
            ..SearchEntry::default()
        }
    }

    fn request(source: serde_json::Value, version: Option<&str>) -> Vec<u8> {
        let mut body = json!({ "source": source });
        if let Some(build) = version {
            body["version"] = json!({ "build": build });
        }
        body.to_string().into_bytes()
    }

    #[test]
    fn emits_every_path_when_no_constraint_is_configured() {
        let mut client = MockArtifactClient::new();
        client.expect_search().returning(|_| {
            Ok(vec![entry("repo/b.zip"), entry("repo/a-1.0.0.zip")])
        });

        let input = request(
            json!({ "url": "https://art.example.com", "apiKey": "k", "pattern": "repo/*" }),
            None,
        );
        let mut output = Vec::new();
        run(&input[..], &mut output, move |_| Ok(client)).unwrap();

        let versions: Vec<serde_json::Value> = serde_json::from_slice(&output).unwrap();
        assert_eq!(versions[0]["build"], "repo/b.zip");
        assert_eq!(versions[1]["build"], "repo/a-1.0.0.zip");
    }

    #[test]
    fn ranks_versions_and_reannounces_the_previous_build() {
        let mut client = MockArtifactClient::new();
        client
            .expect_search()
            .withf(|spec| spec.pattern == "repo/a-*.zip" && spec.recursive)
            .returning(|_| {
                Ok(vec![
                    entry("repo/a-2.0.0.zip"),
                    entry("repo/a-1.0.0.zip"),
                    entry("repo/a-1.5.0.zip"),
                ])
            });

        let input = request(
            json!({
                "url": "https://art.example.com",
                "apiKey": "k",
                "pattern": "repo/a-*.zip",
                "version": ">=1.0.0 <2.0.0"
            }),
            Some("repo/a-1.0.0.zip"),
        );
        let mut output = Vec::new();
        run(&input[..], &mut output, move |_| Ok(client)).unwrap();

        let versions: Vec<serde_json::Value> = serde_json::from_slice(&output).unwrap();
        let builds: Vec<&str> = versions.iter().map(|v| v["build"].as_str().unwrap()).collect();
        assert_eq!(builds, vec!["repo/a-1.0.0.zip", "repo/a-1.5.0.zip"]);
    }

    #[test]
    fn missing_pattern_is_a_configuration_error() {
        let input = request(json!({ "url": "https://art.example.com", "apiKey": "k" }), None);
        let mut output = Vec::new();
        let err = run(&input[..], &mut output, |_| Ok(MockArtifactClient::new())).unwrap_err();
        assert!(matches!(err, ResourceError::Config(_)));
        assert!(output.is_empty());
    }

    #[test]
    fn search_failures_are_fatal() {
        let mut client = MockArtifactClient::new();
        client.expect_search().returning(|_| {
            Err(ClientError::CommandFailed {
                operation: "search".to_string(),
                stderr: "connection refused".to_string(),
            })
        });

        let input = request(
            json!({ "url": "https://art.example.com", "apiKey": "k", "pattern": "repo/*" }),
            None,
        );
        let mut output = Vec::new();
        let err = run(&input[..], &mut output, move |_| Ok(client)).unwrap_err();
        assert!(matches!(err, ResourceError::Client(_)));
    }
}
