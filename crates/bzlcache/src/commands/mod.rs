//! Command implementations
//!
//! Each command writes to the writers it is given, so tests drive them
//! with in-memory buffers and a fake cache service.

pub mod ac;
pub mod cas;
pub mod log;

#[cfg(test)]
pub(crate) mod testing;

use crate::cli::RemoteArgs;
use crate::render::{Palette, RenderOptions};
use bzlcache_remote::RemoteCacheClient;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Command {
    AcGet {
        remote: RemoteArgs,
        json: bool,
        digests: Vec<String>,
    },
    CasGet {
        remote: RemoteArgs,
        output: Option<PathBuf>,
        executable: bool,
        digests: Vec<String>,
    },
    Log {
        files: Vec<PathBuf>,
        show_metadata: bool,
        json: bool,
    },
}

impl Command {
    /// Name used in logs and spans
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AcGet { .. } => "ac get",
            Self::CasGet { .. } => "cas get",
            Self::Log { .. } => "log",
        }
    }
}

/// Run a command against the real stdout and stderr
pub async fn execute(command: Command, palette: Palette) -> miette::Result<()> {
    match command {
        Command::AcGet {
            remote,
            json,
            digests,
        } => {
            let client = RemoteCacheClient::connect(&remote.to_config()?).await?;
            let mut out = io::stdout().lock();
            ac::get(&client, &digests, json, palette, &mut out).await?;
        }
        Command::CasGet {
            remote,
            output,
            executable,
            digests,
        } => {
            cas::check_output_args(output.as_deref(), &digests)?;
            let client = RemoteCacheClient::connect(&remote.to_config()?).await?;
            let mut out = io::stdout().lock();
            let mut err = io::stderr().lock();
            cas::get(
                &client,
                &digests,
                output.as_deref(),
                executable,
                palette,
                &mut out,
                &mut err,
            )
            .await?;
        }
        Command::Log {
            files,
            show_metadata,
            json,
        } => {
            let options = RenderOptions {
                palette,
                show_metadata,
            };
            // Decoding is blocking file I/O
            tokio::task::spawn_blocking(move || {
                let mut out = io::stdout().lock();
                log::print_files(&files, options, json, &mut out)
            })
            .await
            .map_err(|e| miette::miette!("Log reader task failed: {e}"))??;
        }
    }
    Ok(())
}
