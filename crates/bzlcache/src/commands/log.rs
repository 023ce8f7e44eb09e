//! `log`: print Bazel gRPC log files

use crate::errors::CliError;
use crate::render::{RenderOptions, write_log_event};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Print every file in order, stopping at the first one that fails to decode.
///
/// With several files each gets a `path` / `------` header.
pub fn print_files<W: Write + ?Sized>(
    files: &[PathBuf],
    options: RenderOptions,
    json: bool,
    out: &mut W,
) -> miette::Result<()> {
    let with_headers = files.len() > 1;
    for (i, path) in files.iter().enumerate() {
        if with_headers {
            if i > 0 {
                writeln!(out).map_err(CliError::stdout)?;
            }
            writeln!(out, "{}\n------", path.display()).map_err(CliError::stdout)?;
        }
        print_file(path, options, json, out)?;
    }
    out.flush().map_err(CliError::stdout)?;
    Ok(())
}

fn print_file<W: Write + ?Sized>(
    path: &Path,
    options: RenderOptions,
    json: bool,
    out: &mut W,
) -> miette::Result<()> {
    let reader = bzlcache_log::open(path)?;
    let mut count = 0usize;

    for event in reader {
        let event = event.map_err(|e| e.with_path(path))?;
        let written = if json {
            serde_json::to_writer(&mut *out, &event)
                .map_err(io::Error::from)
                .and_then(|()| writeln!(out))
        } else {
            let separator = if count > 0 { writeln!(out) } else { Ok(()) };
            separator.and_then(|()| write_log_event(out, options, &event))
        };
        written.map_err(CliError::stdout)?;
        count += 1;
    }

    tracing::debug!(path = %path.display(), events = count, "Log file printed");
    Ok(())
}
