//! The `out` step: upload artifacts from the step directory.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::client::{ArtifactClient, ClientError, FileSpec, UploadOptions};
use crate::config::{OutParams, Source};
use crate::error::ResourceError;
use crate::logging;
use crate::paths::{ensure_trailing_slash, strip_leading_slash};
use crate::protocol::{self, Metadata, Request, StepResponse, Version};

/// Run the step: upload the files selected by the params from `directory`
/// to the configured target and report upload metadata. Any failed file
/// fails the whole step.
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
    let request: Request<OutParams> = protocol::read_request(input)?;
    let source = request.source;
    logging::init(&source.log_level);

    let mut params = request.params.unwrap_or_default();
    if params.target.is_empty() {
        return Err(ResourceError::MissingTarget);
    }
    params.apply_defaults();
    source.validate()?;

    let local = step_path(directory, &params.source);
    let target = ensure_trailing_slash(&params.target);
    let props = merge_props(&params, directory)?;

    let spec = FileSpec::builder()
        .pattern(local.as_str())
        .target(target.as_str())
        .props(props)
        .regexp(source.regexp)
        .recursive(true)
        .flat(true)
        .build();

    let client = connect(&source)?;
    info!("uploading file(s) to target '{}'", target);
    let started = Instant::now();
    let summary = client.upload(
        &spec,
        &UploadOptions {
            threads: params.threads,
            explode_archive: params.explode_archive,
        },
    )?;
    if summary.failure > 0 {
        return Err(ResourceError::UploadFailed {
            failed: summary.failure,
        });
    }
    let elapsed = started.elapsed();
    info!("finished uploading file(s) to target '{}'", target);

    let metadata = vec![
        Metadata {
            name: "total_uploaded".to_string(),
            value: summary.success.to_string(),
        },
        Metadata {
            name: "upload_time".to_string(),
            value: format!("{elapsed:?}"),
        },
    ];
    protocol::write_response(
        output,
        &StepResponse {
            version: Version { build: local },
            metadata,
        },
    )
}

/// The upload pattern: the step directory joined with the params' source
/// glob.
fn step_path(directory: &Path, source: &str) -> String {
    format!(
        "{}{}",
        ensure_trailing_slash(&directory.display().to_string()),
        strip_leading_slash(source)
    )
}

/// Combine the literal props with the contents of `props_from_file`,
/// semicolon-joined.
fn merge_props(params: &OutParams, directory: &Path) -> Result<String, ResourceError> {
    let mut props = params.props.clone();
    if !params.props_from_file.is_empty() {
        let path = directory.join(strip_leading_slash(&params.props_from_file));
        let contents = fs::read_to_string(&path).map_err(|source| ResourceError::PropsFile {
            path: path.display().to_string(),
            source,
        })?;
        if !props.is_empty() {
            props.push(';');
        }
        props.push_str(contents.trim_end());
    }
    Ok(props)
}
