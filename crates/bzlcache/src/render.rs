//! Human-readable rendering of cache entries and log events
//!
//! Everything writes to an [`io::Write`] so commands can target stdout and
//! tests can target a `Vec<u8>`. Colors come from an explicit [`Palette`].

use bzlcache_log::event::{
    FindMissingBlobs, GetActionResult, GetCapabilities, Read, UpdateActionResult,
    Write as WriteCall,
};
use bzlcache_log::{EventDetails, LogEvent};
use bzlcache_remote::{
    ActionResult, Digest, OutputDirectory, OutputFile, OutputSymlink, code_name,
};
use chrono::{Local, TimeDelta};
use crossterm::style::{StyledContent, Stylize, style};
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

/// Terminal colors, or none
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// No escape sequences at all
    pub const fn plain() -> Self {
        Self::new(false)
    }

    /// Colors unless disabled or stdout is not a terminal
    pub fn detect(no_color: bool) -> Self {
        Self::new(!no_color && io::stdout().is_terminal())
    }

    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    fn paint(
        self,
        text: impl Display,
        f: impl FnOnce(StyledContent<String>) -> StyledContent<String>,
    ) -> String {
        if self.enabled {
            f(style(text.to_string())).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn field(self, name: &str) -> String {
        self.paint(name, |s| s.bold())
    }

    pub fn digest(self, digest: &Digest) -> String {
        self.paint(digest, |s| s.dim())
    }

    pub fn faint(self, text: impl Display) -> String {
        self.paint(text, |s| s.dim())
    }

    pub fn path(self, path: &str) -> String {
        self.paint(path, |s| s.cyan())
    }

    /// Digest given on the command line
    pub fn input(self, text: &str) -> String {
        self.paint(text, |s| s.yellow().bold())
    }

    pub fn error(self, text: impl Display) -> String {
        self.paint(text, |s| s.red().bold())
    }

    pub fn target(self, text: &str) -> String {
        self.paint(text, |s| s.magenta().bold())
    }

    fn executable_marker(self) -> String {
        self.paint("x ", |s| s.red())
    }

    fn request_marker(self) -> String {
        self.paint("-->", |s| s.green())
    }

    fn response_marker(self) -> String {
        self.paint("<--", |s| s.red())
    }

    /// gRPC status code name, green when OK and faint when NOT_FOUND
    pub fn code(self, code: i32) -> String {
        let name = code_name(code);
        if code == i32::from(tonic::Code::Ok) {
            self.paint(name, |s| s.green())
        } else if code == i32::from(tonic::Code::NotFound) {
            self.paint(name, |s| s.dim())
        } else {
            self.paint(name, |s| s.red())
        }
    }

    /// `service::Method`
    pub fn method(self, service: &str, method: &str) -> String {
        format!(
            "{}::{}",
            self.paint(service, |s| s.cyan()),
            self.paint(method, |s| s.yellow())
        )
    }
}

/// Options for rendering log events
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub palette: Palette,
    pub show_metadata: bool,
}

/// Short duration text such as `1.5s`, `250ms` or `12µs`
pub fn format_duration(delta: TimeDelta) -> String {
    match delta.to_std() {
        Ok(d) => format!("{d:?}"),
        Err(_) => delta
            .abs()
            .to_std()
            .map_or_else(|_| "?".to_string(), |d| format!("-{d:?}")),
    }
}

/// Write an action result, one line per populated field
pub fn write_action_result<W: Write + ?Sized>(
    out: &mut W,
    palette: Palette,
    prefix: &str,
    result: &ActionResult,
) -> io::Result<()> {
    let nested = format!("{prefix}  ");

    if !result.output_files.is_empty() {
        writeln!(out, "{prefix}{}:", palette.field("OutputFiles"))?;
        for file in &result.output_files {
            write_output_file(out, palette, &nested, file)?;
        }
    }
    write_symlinks(out, palette, prefix, "OutputFileSymlinks", &result.output_file_symlinks)?;
    write_symlinks(out, palette, prefix, "OutputSymlinks", &result.output_symlinks)?;
    if !result.output_directories.is_empty() {
        writeln!(out, "{prefix}{}:", palette.field("OutputDirectories"))?;
        for dir in &result.output_directories {
            write_output_directory(out, palette, &nested, dir)?;
        }
    }
    write_symlinks(
        out,
        palette,
        prefix,
        "OutputDirectorySymlinks",
        &result.output_directory_symlinks,
    )?;

    if result.exit_code != 0 {
        writeln!(out, "{prefix}{}: {}", palette.field("ExitCode"), result.exit_code)?;
    }
    if let Some(d) = result.stdout_digest.as_ref().filter(|d| d.size_bytes > 0) {
        writeln!(out, "{prefix}{}: {}", palette.field("Stdout"), palette.digest(d))?;
    }
    if let Some(d) = result.stderr_digest.as_ref().filter(|d| d.size_bytes > 0) {
        writeln!(out, "{prefix}{}: {}", palette.field("Stderr"), palette.digest(d))?;
    }
    Ok(())
}

fn write_output_file<W: Write + ?Sized>(
    out: &mut W,
    palette: Palette,
    prefix: &str,
    file: &OutputFile,
) -> io::Result<()> {
    let marker = if file.is_executable {
        palette.executable_marker()
    } else {
        String::new()
    };
    writeln!(out, "{prefix}- {marker}{}", palette.path(&file.path))?;
    writeln!(out, "{prefix}  |- {}", palette.digest(&file.digest))
}

fn write_output_directory<W: Write + ?Sized>(
    out: &mut W,
    palette: Palette,
    prefix: &str,
    dir: &OutputDirectory,
) -> io::Result<()> {
    writeln!(out, "{prefix}- {}", palette.path(&dir.path))?;
    writeln!(out, "{prefix}  |- {}", palette.digest(&dir.tree_digest))
}

fn write_symlinks<W: Write + ?Sized>(
    out: &mut W,
    palette: Palette,
    prefix: &str,
    title: &str,
    links: &[OutputSymlink],
) -> io::Result<()> {
    if links.is_empty() {
        return Ok(());
    }
    writeln!(out, "{prefix}{}:", palette.field(title))?;
    for link in links {
        writeln!(
            out,
            "{prefix}  - {} -> {}",
            palette.path(&link.path),
            palette.path(&link.target)
        )?;
    }
    Ok(())
}

const EVENT_PREFIX: &str = "    ";

/// Write one log event: header line, status, metadata, then the call itself
pub fn write_log_event<W: Write + ?Sized>(
    out: &mut W,
    options: RenderOptions,
    event: &LogEvent,
) -> io::Result<()> {
    let p = options.palette;
    let prefix = EVENT_PREFIX;

    let start = event.start_time.map_or_else(
        || "-".to_string(),
        |t| {
            t.with_timezone(&Local)
                .format("%d %b %Y %H:%M:%S%.3f")
                .to_string()
        },
    );
    let (service, method) = event.service_and_method();
    write!(
        out,
        "[{start}] {} - {}",
        p.method(service, method),
        p.code(event.status.code)
    )?;
    match event.duration() {
        Some(d) => writeln!(out, " ({})", format_duration(d))?,
        None => writeln!(out)?,
    }

    if !event.status.message.is_empty() {
        writeln!(
            out,
            "{prefix}{}: {}",
            p.field("Message"),
            p.faint(&event.status.message)
        )?;
    }

    if options.show_metadata {
        write_metadata(out, p, event)?;
    }

    match &event.details {
        Some(EventDetails::GetCapabilities(d)) => write_get_capabilities(out, p, d),
        Some(EventDetails::GetActionResult(d)) => write_get_action_result(out, p, d),
        Some(EventDetails::UpdateActionResult(d)) => write_update_action_result(out, p, d),
        Some(EventDetails::Read(d)) => write_read(out, p, d),
        Some(EventDetails::Write(d)) => write_write(out, p, d),
        Some(EventDetails::FindMissingBlobs(d)) => write_find_missing_blobs(out, p, d),
        None => Ok(()),
    }
}

fn write_metadata<W: Write + ?Sized>(out: &mut W, p: Palette, event: &LogEvent) -> io::Result<()> {
    let prefix = EVENT_PREFIX;
    let m = &event.metadata;

    writeln!(out, "{prefix}{}:", p.field("Metadata"))?;
    writeln!(
        out,
        "{prefix}|- {}:\t\t\t{} ({}) / {}",
        p.field("Tool"),
        m.tool_name,
        m.tool_version,
        m.invocation_id
    )?;
    if let Some(id) = &m.action_id {
        writeln!(out, "{prefix}|- {}:\t\t{id}", p.field("ActionId"))?;
    }
    if let Some(id) = &m.correlated_invocations_id {
        writeln!(out, "{prefix}|- {}:\t{id}", p.field("CorrelatedInvocationsId"))?;
    }
    if let Some(mnemonic) = &m.action_mnemonic {
        writeln!(out, "{prefix}|- {}:\t\t{mnemonic}", p.field("ActionMnemonic"))?;
    }
    if let Some(id) = &m.target_id {
        writeln!(out, "{prefix}|- {}:\t\t{}", p.field("TargetId"), p.target(id))?;
    }
    if let Some(id) = &m.configuration_id {
        writeln!(out, "{prefix}|- {}:\t\t{id}", p.field("ConfigurationId"))?;
    }
    Ok(())
}

/// Writer for the `|- Field: value` lines under a request or response marker
struct Section<'a, W: ?Sized> {
    out: &'a mut W,
    p: Palette,
}

impl<W: Write + ?Sized> Section<'_, W> {
    fn request(&mut self) -> io::Result<()> {
        writeln!(self.out, "{EVENT_PREFIX}{}", self.p.request_marker())
    }

    fn response(&mut self) -> io::Result<()> {
        writeln!(self.out, "{EVENT_PREFIX}{}", self.p.response_marker())
    }

    fn value(&mut self, name: &str, value: impl Display) -> io::Result<()> {
        writeln!(self.out, "{EVENT_PREFIX}\t|- {}: {value}", self.p.field(name))
    }

    fn list<T>(
        &mut self,
        name: &str,
        items: &[T],
        show: impl Fn(Palette, &T) -> String,
    ) -> io::Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "{EVENT_PREFIX}\t|- {}", self.p.field(name))?;
        for item in items {
            writeln!(self.out, "{EVENT_PREFIX}\t   - {}", show(self.p, item))?;
        }
        Ok(())
    }

    fn positive(&mut self, name: &str, value: i64) -> io::Result<()> {
        if value > 0 {
            self.value(name, value)?;
        }
        Ok(())
    }

    fn instance_name(&mut self, name: Option<&str>) -> io::Result<()> {
        match name {
            Some(name) => self.value("InstanceName", name),
            None => Ok(()),
        }
    }
}

fn write_get_capabilities<W: Write + ?Sized>(
    out: &mut W,
    p: Palette,
    d: &GetCapabilities,
) -> io::Result<()> {
    let mut s = Section { out, p };
    s.request()?;
    s.instance_name(d.request.instance_name.as_deref())?;

    s.response()?;
    let r = &d.response;
    if let Some(c) = &r.cache_capabilities {
        s.value(
            "CacheCapabilities",
            format!(
                "digest_functions={:?} update_enabled={} max_batch_total_size_bytes={} symlink_absolute_path_strategy={} supported_compressors={:?}",
                c.digest_functions,
                c.update_enabled,
                c.max_batch_total_size_bytes,
                c.symlink_absolute_path_strategy,
                c.supported_compressors
            ),
        )?;
    }
    if let Some(c) = &r.execution_capabilities {
        s.value(
            "ExecutionCapabilities",
            format!(
                "digest_function={} exec_enabled={} digest_functions={:?}",
                c.digest_function, c.exec_enabled, c.digest_functions
            ),
        )?;
    }
    for (name, version) in [
        ("DeprecatedApiVersion", &r.deprecated_api_version),
        ("LowApiVersion", &r.low_api_version),
        ("HighApiVersion", &r.high_api_version),
    ] {
        if let Some(v) = version {
            s.value(name, v)?;
        }
    }
    Ok(())
}

fn write_get_action_result<W: Write + ?Sized>(
    out: &mut W,
    p: Palette,
    d: &GetActionResult,
) -> io::Result<()> {
    let mut s = Section { out, p };
    s.request()?;
    let r = &d.request;
    s.instance_name(r.instance_name.as_deref())?;
    if let Some(digest) = &r.action_digest {
        s.value("ActionDigest", p.digest(digest))?;
    }
    if r.inline_stdout {
        s.value("InlineStdout", true)?;
    }
    if r.inline_stderr {
        s.value("InlineStderr", true)?;
    }
    s.list("InlineOutputFiles", &r.inline_output_files, |_, f| f.clone())?;

    s.response()?;
    if let Some(result) = &d.response {
        write_action_result(&mut *s.out, p, &format!("{EVENT_PREFIX}\t|- "), result)?;
    }
    Ok(())
}

fn write_update_action_result<W: Write + ?Sized>(
    out: &mut W,
    p: Palette,
    d: &UpdateActionResult,
) -> io::Result<()> {
    let mut s = Section { out, p };
    s.request()?;
    let r = &d.request;
    s.instance_name(r.instance_name.as_deref())?;
    if let Some(digest) = r.action_digest.as_ref().filter(|d| d.size_bytes > 0) {
        s.value("ActionDigest", p.digest(digest))?;
    }
    if let Some(result) = &r.action_result {
        writeln!(s.out, "{EVENT_PREFIX}\t|- {}:", p.field("ActionResult"))?;
        write_action_result(&mut *s.out, p, &format!("{EVENT_PREFIX}\t\t|- "), result)?;
    }
    if let Some(policy) = &r.results_cache_policy {
        writeln!(s.out, "{EVENT_PREFIX}\t|- {}:", p.field("ResultsCachePolicy"))?;
        writeln!(
            s.out,
            "{EVENT_PREFIX}\t\t|- {}: {}",
            p.field("Priority"),
            policy.priority
        )?;
    }

    s.response()?;
    if let Some(result) = &d.response {
        write_action_result(&mut *s.out, p, &format!("{EVENT_PREFIX}\t|- "), result)?;
    }
    Ok(())
}

fn write_read<W: Write + ?Sized>(out: &mut W, p: Palette, d: &Read) -> io::Result<()> {
    let mut s = Section { out, p };
    s.request()?;
    if !d.request.resource_name.is_empty() {
        s.value("ResourceName", p.faint(&d.request.resource_name))?;
    }
    s.positive("ReadOffset", d.request.read_offset)?;
    s.positive("ReadLimit", d.request.read_limit)?;

    s.response()?;
    s.positive("NumReads", d.response.num_reads)?;
    s.positive("BytesRead", d.response.bytes_read)
}

fn write_write<W: Write + ?Sized>(out: &mut W, p: Palette, d: &WriteCall) -> io::Result<()> {
    let mut s = Section { out, p };
    s.request()?;
    let r = &d.request;
    s.list("ResourceNames", &r.resource_names, |p, n| p.faint(n))?;
    s.list("Offsets", &r.offsets, |_, o| o.to_string())?;
    s.list("FinishWrites", &r.finish_writes, |_, f| u8::from(*f).to_string())?;
    s.positive("NumWrites", r.num_writes)?;
    s.positive("BytesSent", r.bytes_sent)?;

    s.response()?;
    s.positive("CommittedSize", d.response.committed_size)
}

fn write_find_missing_blobs<W: Write + ?Sized>(
    out: &mut W,
    p: Palette,
    d: &FindMissingBlobs,
) -> io::Result<()> {
    let mut s = Section { out, p };
    s.request()?;
    s.instance_name(d.request.instance_name.as_deref())?;
    s.list("BlobDigests", &d.request.blob_digests, |p, d| p.digest(d))?;

    s.response()?;
    s.list(
        "MissingBlobDigests",
        &d.response.missing_blob_digests,
        |p, d| p.digest(d),
    )
}
