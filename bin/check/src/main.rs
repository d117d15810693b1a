use meetgate_check::{config::CheckConfig, replay::read_tokens, run::replay};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(fmt_layer)
        .init();

    // Load configuration from environment
    let config_file = std::env::var_os("MEETGATE_CONFIG").map(PathBuf::from);
    let config = match CheckConfig::load(config_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let tokens = match read_tokens(std::io::stdin().lock()) {
        Ok(tokens) => tokens,
        Err(e) => {
            error!(error = %e, "failed to read tokens from stdin");
            return ExitCode::FAILURE;
        }
    };
    info!(count = tokens.len(), "tokens read");

    let stdout = std::io::stdout().lock();
    match replay(config.gate, tokens, config.output.pretty, stdout).await {
        Ok(report) if report.summary.rejected > 0 => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "replay failed");
            ExitCode::FAILURE
        }
    }
}
