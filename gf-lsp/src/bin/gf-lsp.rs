use anyhow::{Context, Result};
use gf_config::Loader;
use gf_lsp::GfLanguageServer;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable naming an extra config file layered over the defaults, skipped
/// when the file does not exist.
const CONFIG_ENV: &str = "GF_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    let mut loader = Loader::new();
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        loader = loader.with_optional_file(std::path::PathBuf::from(path));
    }
    let config = loader.build().context("failed to load gf configuration")?;

    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log.level.as_str())),
        )
        .init();

    let stdin = stdin();
    let stdout = stdout();
    let (service, socket) =
        LspService::new(|client| GfLanguageServer::with_config(client, &config));
    Server::new(stdin, stdout, socket).serve(service).await;
    Ok(())
}
