use bzlcache::cli::parse;
use bzlcache::commands::{self, Command};
use bzlcache::errors::CliError;
use bzlcache::render::Palette;
use bzlcache::tracing::{TracingConfig, init_tracing};
use tracing::Instrument;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    if let Err(error) = run().await {
        eprintln!("{error:?}");
        std::process::exit(1);
    }
}

async fn run() -> miette::Result<()> {
    let cli = parse();

    init_tracing(TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
    })?;

    let palette = Palette::detect(cli.no_color);
    let command: Command = cli.command.into();
    let span = tracing::info_span!("command", command = command.name());

    tokio::select! {
        result = commands::execute(command, palette).instrument(span) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("Interrupted by Ctrl-C");
            Err(CliError::Interrupted.into())
        }
    }
}
