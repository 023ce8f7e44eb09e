use crate::commands::Command;
use crate::errors::CliError;
use crate::tracing::{LogLevel, TracingFormat};
use bzlcache_remote::RemoteConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bzlcache")]
#[command(about = "Show Bazel remote cache entries (AC and CAS) and gRPC logs")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    #[arg(long, global = true, help = "Disable color output")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        name = "action-cache",
        visible_alias = "ac",
        about = "Action cache operations"
    )]
    ActionCache {
        #[command(subcommand)]
        subcommand: ActionCacheCommands,
    },
    #[command(about = "Content addressable storage operations")]
    Cas {
        #[command(subcommand)]
        subcommand: CasCommands,
    },
    #[command(
        about = "Print gRPC remote execution log files in a human-readable form",
        after_help = "To generate a log file:\n  \
            bazel build --remote_cache=grpc://localhost:9092 \
            --experimental_remote_grpc_log=/tmp/grpc.log //...\n\n\
            To print it:\n  bzlcache log /tmp/grpc.log"
    )]
    Log {
        #[arg(short = 'm', long, help = "Show metadata of all log entries")]
        show_metadata: bool,
        #[arg(long, help = "Print one JSON object per entry")]
        json: bool,
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ActionCacheCommands {
    #[command(about = "Get action result metadata from the remote cache")]
    Get {
        #[command(flatten)]
        remote: RemoteArgs,
        #[arg(long, help = "Print results as JSON")]
        json: bool,
        #[arg(required = true, value_name = "DIGEST", help = "<hash> or <hash>/<size>")]
        digests: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CasCommands {
    #[command(about = "Get blobs from the remote cache")]
    Get {
        #[command(flatten)]
        remote: RemoteArgs,
        #[arg(short = 'o', long, help = "Output file to write the blob")]
        output: Option<PathBuf>,
        #[arg(
            short = 'x',
            long = "exec",
            requires = "output",
            help = "The blob content is executable"
        )]
        executable: bool,
        #[arg(required = true, value_name = "DIGEST", help = "<hash>/<size>")]
        digests: Vec<String>,
    },
}

/// Connection flags shared by the commands talking to a cache
#[derive(Args, Debug, Clone, Default)]
pub struct RemoteArgs {
    #[arg(
        short = 'r',
        long,
        env = "BAZEL_REMOTE_CACHE",
        help = "Remote cache address (<host>:<port>, grpc://, grpcs://)"
    )]
    pub remote: Option<String>,

    #[arg(
        short = 'i',
        long,
        default_value = "",
        help = "Instance name of the remote cache"
    )]
    pub instance_name: String,

    #[arg(
        long,
        env = "BAZEL_REMOTE_CACHE_TOKEN",
        hide_env_values = true,
        help = "Bearer token sent with every request"
    )]
    pub token: Option<String>,

    #[arg(
        long,
        default_value_t = 5,
        value_name = "SECS",
        help = "Time allowed to establish the connection"
    )]
    pub connect_timeout: u64,
}

impl RemoteArgs {
    /// Cache configuration, failing when no address was given
    pub fn to_config(&self) -> Result<RemoteConfig, CliError> {
        let endpoint = self
            .remote
            .as_deref()
            .filter(|r| !r.is_empty())
            .ok_or(CliError::MissingRemote)?;

        let mut config = RemoteConfig::new(endpoint)
            .with_instance_name(&self.instance_name)
            .with_connect_timeout_secs(self.connect_timeout);
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            config = config.with_bearer_token(token);
        }
        Ok(config)
    }
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::ActionCache { subcommand } => match subcommand {
                ActionCacheCommands::Get {
                    remote,
                    json,
                    digests,
                } => Self::AcGet {
                    remote,
                    json,
                    digests,
                },
            },
            Commands::Cas { subcommand } => match subcommand {
                CasCommands::Get {
                    remote,
                    output,
                    executable,
                    digests,
                } => Self::CasGet {
                    remote,
                    output,
                    executable,
                    digests,
                },
            },
            Commands::Log {
                show_metadata,
                json,
                files,
            } => Self::Log {
                files,
                show_metadata,
                json,
            },
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["bzlcache", "log", "grpc.log"]).unwrap();

        assert_eq!(cli.level, LogLevel::Warn);
        assert_eq!(cli.log_format, TracingFormat::Compact);
        assert!(!cli.no_color);
        assert!(matches!(
            cli.command,
            Commands::Log {
                show_metadata: false,
                json: false,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_log_level_parsing() {
        let cli = Cli::try_parse_from(["bzlcache", "--level", "debug", "log", "a"]).unwrap();
        assert_eq!(cli.level, LogLevel::Debug);

        let cli = Cli::try_parse_from(["bzlcache", "log", "a", "-l", "error"]).unwrap();
        assert_eq!(cli.level, LogLevel::Error);

        assert!(Cli::try_parse_from(["bzlcache", "-l", "loud", "log", "a"]).is_err());
    }

    #[test]
    fn test_cli_log_format_parsing() {
        let cli = Cli::try_parse_from(["bzlcache", "--log-format", "json", "log", "a"]).unwrap();
        assert_eq!(cli.log_format, TracingFormat::Json);

        let cli = Cli::try_parse_from(["bzlcache", "log", "a", "--log-format", "dev"]).unwrap();
        assert_eq!(cli.log_format, TracingFormat::Dev);

        assert!(Cli::try_parse_from(["bzlcache", "--log-format", "xml", "log", "a"]).is_err());
    }

    #[test]
    fn test_ac_alias_and_flags() {
        let cli = Cli::try_parse_from([
            "bzlcache", "ac", "get", "-r", "localhost:9092", "-i", "main", "--json", "abc", "def/3",
        ])
        .unwrap();

        let Commands::ActionCache {
            subcommand:
                ActionCacheCommands::Get {
                    remote,
                    json,
                    digests,
                },
        } = cli.command
        else {
            panic!("expected ac get");
        };
        assert!(json);
        assert_eq!(digests, ["abc", "def/3"]);
        assert_eq!(remote.remote.as_deref(), Some("localhost:9092"));
        assert_eq!(remote.instance_name, "main");
        assert_eq!(remote.connect_timeout, 5);
    }

    #[test]
    fn test_action_cache_full_name() {
        assert!(Cli::try_parse_from(["bzlcache", "action-cache", "get", "abc"]).is_ok());
    }

    #[test]
    fn test_get_requires_digest() {
        assert!(Cli::try_parse_from(["bzlcache", "ac", "get"]).is_err());
        assert!(Cli::try_parse_from(["bzlcache", "cas", "get"]).is_err());
        assert!(Cli::try_parse_from(["bzlcache", "log"]).is_err());
    }

    #[test]
    fn test_cas_exec_requires_output() {
        assert!(Cli::try_parse_from(["bzlcache", "cas", "get", "-x", "a/1"]).is_err());

        let cli =
            Cli::try_parse_from(["bzlcache", "cas", "get", "-x", "-o", "out", "a/1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cas {
                subcommand: CasCommands::Get {
                    executable: true,
                    output: Some(_),
                    ..
                }
            }
        ));
    }

    #[test]
    fn test_log_flags() {
        let cli = Cli::try_parse_from(["bzlcache", "--no-color", "log", "-m", "a.log", "b.log"])
            .unwrap();
        assert!(cli.no_color);
        let Command::Log {
            files,
            show_metadata,
            json,
        } = Command::from(cli.command)
        else {
            panic!("expected log");
        };
        assert!(show_metadata);
        assert!(!json);
        assert_eq!(files, [PathBuf::from("a.log"), PathBuf::from("b.log")]);
    }

    #[test]
    fn test_remote_config_from_args() {
        let args = RemoteArgs {
            remote: Some("grpcs://cache.example.com".to_string()),
            instance_name: "ci".to_string(),
            token: Some("s3cret".to_string()),
            connect_timeout: 10,
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.endpoint, "grpcs://cache.example.com");
        assert_eq!(config.instance_name, "ci");
        assert_eq!(config.connect_timeout_secs, 10);
        assert!(config.auth.is_some());
    }

    #[test]
    fn test_missing_remote() {
        let args = RemoteArgs {
            remote: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(args.to_config(), Err(CliError::MissingRemote)));
        assert!(matches!(
            RemoteArgs::default().to_config(),
            Err(CliError::MissingRemote)
        ));
    }
}
