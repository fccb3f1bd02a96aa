mod cli;
mod commands;

use std::path::Path;

use tabsplit_common::TabSplitError;
use tabsplit_config::TabSplitConfig;
use tracing_subscriber::EnvFilter;

use cli::Command;
use commands::SimulateOptions;

fn load_config(path: Option<&str>) -> Result<TabSplitConfig, TabSplitError> {
    let config = match path {
        Some(p) => tabsplit_config::load_config_from(Path::new(p))?,
        None => tabsplit_config::load_config()?,
    };
    Ok(config)
}

async fn run(command: Command, config: &TabSplitConfig) -> Result<String, TabSplitError> {
    match command {
        Command::Layout { window, monitors } => commands::layout(config, window, &monitors),
        Command::Url { url, lang } => Ok(commands::url(config, &url, lang.as_deref())),
        Command::Simulate {
            url,
            lang,
            window,
            monitors,
            redirect,
        } => {
            let report = commands::simulate(
                config,
                SimulateOptions {
                    url,
                    lang,
                    window,
                    monitors,
                    redirect,
                },
            )
            .await?;
            serde_json::to_string_pretty(&report)
                .map_err(|e| TabSplitError::Other(format!("failed to render report: {e}")))
        }
        Command::Config => Ok(tabsplit_config::config_to_json(config)),
    }
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let args = cli::parse();

    // Config first so its logging level can seed the filter
    let loaded = load_config(args.config.as_deref());

    let default_directive = match &loaded {
        Ok(config) => format!("tabsplit={}", config.logging.level.as_directive()),
        Err(_) => "tabsplit=info".to_string(),
    };
    let log_directive = args.log_level.as_deref().unwrap_or(&default_directive);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "tabsplit=info".parse().expect("static directive")),
            ),
        )
        .init();

    tracing::debug!("tabsplit v{} starting", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        TabSplitConfig::default()
    });

    match run(args.command, &config).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
