//! `cas get`: blobs by digest

use crate::errors::CliError;
use crate::render::Palette;
use bzlcache_remote::{CacheService, RemoteCacheClient, classify_error};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// `--output` names a single file, so it takes a single digest
pub fn check_output_args(output: Option<&Path>, digests: &[String]) -> Result<(), CliError> {
    if output.is_some() && digests.len() != 1 {
        return Err(CliError::invalid_argument(format!(
            "--output takes exactly one digest, got {}",
            digests.len()
        )));
    }
    Ok(())
}

/// Fetch every blob in order, writing contents to `out` (or the output
/// file) and per-digest failures to `err`
pub async fn get<S, W, E>(
    client: &RemoteCacheClient<S>,
    digests: &[String],
    output: Option<&Path>,
    executable: bool,
    palette: Palette,
    out: &mut W,
    err: &mut E,
) -> Result<(), CliError>
where
    S: CacheService,
    W: Write + ?Sized,
    E: Write + ?Sized,
{
    check_output_args(output, digests)?;
    let report = client.get_blobs(digests.iter().cloned()).await;

    for outcome in report.outcomes() {
        match &outcome.result {
            Ok(bytes) => match output {
                Some(path) => write_file(path, bytes, executable)?,
                None => out.write_all(bytes).map_err(CliError::stdout)?,
            },
            Err(e) => {
                tracing::debug!(digest = %outcome.input, error = %e, "Blob not retrieved");
                writeln!(
                    err,
                    "{}: {}",
                    palette.input(&outcome.input),
                    palette.error(classify_error(e))
                )
                .map_err(CliError::stderr)?;
            }
        }
    }
    out.flush().map_err(CliError::stdout)?;

    if report.has_failures() {
        return Err(CliError::partial_failure(
            "blobs",
            report.failure_count(),
            report.len(),
        ));
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8], executable: bool) -> Result<(), CliError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(if executable { 0o755 } else { 0o644 });
    }
    #[cfg(not(unix))]
    let _ = executable;

    let file = options
        .open(path)
        .map_err(|e| CliError::file("open", path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| CliError::file("write", path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Blob written");
    Ok(())
}
