//! Action cache entries as handed to renderers
//!
//! These mirror the REAPI `ActionResult` family but keep only what the
//! inspection tooling shows. Missing digests on the wire become empty
//! `/0` digests so that every output entry can be rendered.

use crate::digest::Digest;
use crate::reapi;
use serde::Serialize;

/// Cached metadata of a previously executed action
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ActionResult {
    pub output_files: Vec<OutputFile>,
    pub output_file_symlinks: Vec<OutputSymlink>,
    pub output_symlinks: Vec<OutputSymlink>,
    pub output_directories: Vec<OutputDirectory>,
    pub output_directory_symlinks: Vec<OutputSymlink>,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout_digest: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr_digest: Option<Digest>,
}

/// A regular output file of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub path: String,
    pub digest: Digest,
    pub is_executable: bool,
}

/// An output symlink (file, directory or untyped)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSymlink {
    pub path: String,
    pub target: String,
}

/// An output directory, addressed by the digest of its `Tree` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDirectory {
    pub path: String,
    pub tree_digest: Digest,
}

impl ActionResult {
    /// Whether the action produced no outputs at all
    #[must_use]
    pub fn has_outputs(&self) -> bool {
        !(self.output_files.is_empty()
            && self.output_file_symlinks.is_empty()
            && self.output_symlinks.is_empty()
            && self.output_directories.is_empty()
            && self.output_directory_symlinks.is_empty())
    }
}

fn digest_or_empty(d: Option<reapi::Digest>) -> Digest {
    d.map(Digest::from).unwrap_or_else(|| Digest::new("", 0))
}

impl From<reapi::ActionResult> for ActionResult {
    fn from(ar: reapi::ActionResult) -> Self {
        Self {
            output_files: ar.output_files.into_iter().map(OutputFile::from).collect(),
            output_file_symlinks: ar
                .output_file_symlinks
                .into_iter()
                .map(OutputSymlink::from)
                .collect(),
            output_symlinks: ar
                .output_symlinks
                .into_iter()
                .map(OutputSymlink::from)
                .collect(),
            output_directories: ar
                .output_directories
                .into_iter()
                .map(OutputDirectory::from)
                .collect(),
            output_directory_symlinks: ar
                .output_directory_symlinks
                .into_iter()
                .map(OutputSymlink::from)
                .collect(),
            exit_code: ar.exit_code,
            stdout_digest: ar.stdout_digest.map(Digest::from),
            stderr_digest: ar.stderr_digest.map(Digest::from),
        }
    }
}

impl From<reapi::OutputFile> for OutputFile {
    fn from(f: reapi::OutputFile) -> Self {
        Self {
            path: f.path,
            digest: digest_or_empty(f.digest),
            is_executable: f.is_executable,
        }
    }
}

impl From<reapi::OutputSymlink> for OutputSymlink {
    fn from(s: reapi::OutputSymlink) -> Self {
        Self {
            path: s.path,
            target: s.target,
        }
    }
}

impl From<reapi::OutputDirectory> for OutputDirectory {
    fn from(d: reapi::OutputDirectory) -> Self {
        Self {
            path: d.path,
            tree_digest: digest_or_empty(d.tree_digest),
        }
    }
}
