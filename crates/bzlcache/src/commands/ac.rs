//! `ac get`: action results by digest

use crate::errors::CliError;
use crate::render::{Palette, write_action_result};
use bzlcache_remote::{ActionResult, CacheService, RemoteCacheClient, Report, classify_error};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonOutcome<'a> {
    digest: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a ActionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Look up every digest in order and print what was found
pub async fn get<S, W>(
    client: &RemoteCacheClient<S>,
    digests: &[String],
    json: bool,
    palette: Palette,
    out: &mut W,
) -> Result<(), CliError>
where
    S: CacheService,
    W: Write + ?Sized,
{
    let report = client.get_action_results(digests.iter().cloned()).await;

    let written = if json {
        write_json(out, &report)
    } else {
        write_text(out, palette, &report)
    };
    written
        .and_then(|()| out.flush())
        .map_err(CliError::stdout)?;

    if report.has_failures() {
        return Err(CliError::partial_failure(
            "action results",
            report.failure_count(),
            report.len(),
        ));
    }
    Ok(())
}

fn write_text<W: Write + ?Sized>(
    out: &mut W,
    palette: Palette,
    report: &Report<ActionResult>,
) -> io::Result<()> {
    for (i, outcome) in report.outcomes().iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        match &outcome.result {
            Ok(result) => {
                writeln!(out, "{}:", palette.input(&outcome.input))?;
                write_action_result(out, palette, "  ", result)?;
            }
            Err(e) => writeln!(
                out,
                "{}: {}",
                palette.input(&outcome.input),
                palette.error(classify_error(e))
            )?,
        }
    }
    Ok(())
}

fn write_json<W: Write + ?Sized>(out: &mut W, report: &Report<ActionResult>) -> io::Result<()> {
    let outcomes: Vec<JsonOutcome<'_>> = report
        .outcomes()
        .iter()
        .map(|o| JsonOutcome {
            digest: &o.input,
            result: o.result.as_ref().ok(),
            error: o.result.as_ref().err().map(classify_error),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &outcomes)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::FakeCache;
    use bzlcache_remote::reapi;

    fn cache() -> FakeCache {
        let mut cache = FakeCache::default();
        cache.action_results.insert(
            "aaa".to_string(),
            reapi::ActionResult {
                exit_code: 2,
                ..Default::default()
            },
        );
        cache
    }

    #[tokio::test]
    async fn test_prints_hits_and_misses_in_order() {
        let client = RemoteCacheClient::new(cache(), "");
        let digests = vec!["aaa/10".to_string(), "a/b/c".to_string(), "zzz".to_string()];
        let mut out = Vec::new();

        let err = get(&client, &digests, false, Palette::plain(), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CliError::PartialFailure {
                failed: 2,
                total: 3,
                ..
            }
        ));
        let text = String::from_utf8(out).unwrap();
        let mut blocks = text.split("\n\n");
        assert_eq!(blocks.next().unwrap(), "aaa/10:\n  ExitCode: 2");
        assert!(blocks.next().unwrap().starts_with("a/b/c: Malformed digest"));
        assert_eq!(blocks.next().unwrap(), "zzz: Not found\n");
    }

    #[tokio::test]
    async fn test_all_hits_succeed() {
        let client = RemoteCacheClient::new(cache(), "");
        let mut out = Vec::new();
        get(&client, &["aaa".to_string()], false, Palette::plain(), &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "aaa:\n  ExitCode: 2\n");
    }

    #[tokio::test]
    async fn test_json_output() {
        let client = RemoteCacheClient::new(cache(), "");
        let mut out = Vec::new();
        let digests = vec!["aaa".to_string(), "bbb".to_string()];
        let _ = get(&client, &digests, true, Palette::plain(), &mut out).await;

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["digest"], "aaa");
        assert_eq!(value[0]["result"]["exit_code"], 2);
        assert!(value[0].get("error").is_none());
        assert_eq!(value[1]["error"], "Not found");
    }
}
