//! The `in` step: fetch the requested artifact into the step directory.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::client::{ArtifactClient, ClientError, DownloadOptions, FileSpec};
use crate::config::{InParams, Source};
use crate::error::ResourceError;
use crate::logging;
use crate::paths::base_name;
use crate::protocol::{self, Metadata, Request, StepResponse};

/// Run the step: download the artifact named by the request's version into
/// `directory`, optionally writing its properties document next to it, and
/// report download metadata.
pub fn run<R, W, C, F>(
    input: R,
    output: &mut W,
    directory: &Path,
    connect: F,
) -> Result<(), ResourceError>
where
    R: Read,
    W: Write,
    C: ArtifactClient,
    F: FnOnce(&Source) -> Result<C, ClientError>,
{
    let request: Request<InParams> = protocol::read_request(input)?;
    let source = request.source;
    logging::init(&source.log_level);
    source.validate()?;

    let mut params = request.params.unwrap_or_default();
    params.apply_defaults();

    let version = request.version.ok_or(ResourceError::MissingVersion)?;
    let file_path = version.build.clone();

    let file_name = if params.filename.is_empty() {
        base_name(&file_path).to_string()
    } else {
        params.filename.clone()
    };
    let destination = directory.join(file_name);

    let spec = FileSpec::builder()
        .pattern(file_path.as_str())
        .target(destination.display().to_string())
        .props(source.props.as_str())
        .flat(!params.not_flat)
        .build();

    let client = connect(&source)?;
    info!("downloading file '{}'", file_path);
    let started = Instant::now();
    client.download(
        &spec,
        &DownloadOptions {
            threads: params.threads,
            split_count: params.split_count,
            min_split: params.min_split,
        },
    )?;
    let elapsed = started.elapsed();
    info!("finished downloading file '{}'", file_path);

    if !params.props_filename.is_empty() {
        info!("fetching properties of '{}'", file_path);
        let document = fetch_properties(&client, &file_path)?;
        let props_path = directory.join(&params.props_filename);
        if let Some(parent) = props_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ResourceError::WriteFile {
                path: props_path.display().to_string(),
                source,
            })?;
        }
        fs::write(&props_path, document).map_err(|source| ResourceError::WriteFile {
            path: props_path.display().to_string(),
            source,
        })?;
    }

    let metadata = vec![
        Metadata {
            name: "downloaded_file".to_string(),
            value: file_path,
        },
        Metadata {
            name: "download_time".to_string(),
            value: format!("{elapsed:?}"),
        },
    ];
    protocol::write_response(output, &StepResponse { version, metadata })
}

/// Look the artifact up again and render its property map as a JSON
/// document. An artifact without properties yields an empty map.
fn fetch_properties<C: ArtifactClient>(client: &C, path: &str) -> Result<String, ResourceError> {
    let spec = FileSpec::builder().pattern(path).build();
    let properties = client
        .search(&spec)?
        .into_iter()
        .next()
        .map(|entry| entry.properties)
        .unwrap_or_default();
    Ok(serde_json::json!({ "properties": properties }).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockArtifactClient, SearchEntry, TransferSummary};
    use serde_json::json;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn request(params: serde_json::Value) -> Vec<u8> {
        json!({
            "source": { "url": "https://art.example.com", "apiKey": "k" },
            "version": { "build": "repo/app-1.2.0.zip" },
            "params": params
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn downloads_to_the_step_directory_and_reports_metadata() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("app-1.2.0.zip").display().to_string();

        let mut client = MockArtifactClient::new();
        client
            .expect_download()
            .withf(move |spec, options| {
                spec.pattern == "repo/app-1.2.0.zip"
                    && spec.target == dest
                    && spec.flat
                    && !spec.recursive
                    && options.threads == 3
            })
            .returning(|_, _| Ok(TransferSummary::default()));

        let input = request(json!({}));
        let mut output = Vec::new();
        run(&input[..], &mut output, dir.path(), move |_| Ok(client)).unwrap();

        let response: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(response["version"]["build"], "repo/app-1.2.0.zip");
        assert_eq!(response["metadata"][0]["name"], "downloaded_file");
        assert_eq!(response["metadata"][0]["value"], "repo/app-1.2.0.zip");
        assert_eq!(response["metadata"][1]["name"], "download_time");
    }

    #[test]
    fn filename_param_renames_the_download_target() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("renamed.zip").display().to_string();

        let mut client = MockArtifactClient::new();
        client
            .expect_download()
            .withf(move |spec, _| spec.target == dest)
            .returning(|_, _| Ok(TransferSummary::default()));

        let input = request(json!({ "filename": "renamed.zip" }));
        let mut output = Vec::new();
        run(&input[..], &mut output, dir.path(), move |_| Ok(client)).unwrap();
    }

    #[test]
    fn writes_the_properties_document_when_requested() {
        let dir = TempDir::new().unwrap();

        let mut client = MockArtifactClient::new();
        client
            .expect_download()
            .returning(|_, _| Ok(TransferSummary::default()));
        client.expect_search().returning(|_| {
            Ok(vec![SearchEntry {
                path: "repo/app-1.2.0.zip".to_string(),
                properties: HashMap::from([(
                    "env".to_string(),
                    vec!["prod".to_string()],
                )]),
            }])
        });

        let input = request(json!({ "props_filename": "meta/props.json" }));
        let mut output = Vec::new();
        run(&input[..], &mut output, dir.path(), move |_| Ok(client)).unwrap();

        let written = fs::read_to_string(dir.path().join("meta/props.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["properties"]["env"][0], "prod");
    }

    #[test]
    fn a_request_without_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let input = json!({
            "source": { "url": "https://art.example.com", "apiKey": "k" }
        })
        .to_string()
        .into_bytes();
        let mut output = Vec::new();
        let err = run(&input[..], &mut output, dir.path(), |_| {
            Ok(MockArtifactClient::new())
        })
        .unwrap_err();
        assert!(matches!(err, ResourceError::MissingVersion));
    }
}
