mod action;
mod app;
mod app_state;
mod cli;
mod component;
mod components;
mod controls;
mod core;
mod dispatch;
mod focus;
mod inflight;
mod paste;
mod selection;
mod theme;
mod view;
mod widgets;

use clap::Parser;
use crt_proto::config::Config;
use crt_proto::HttpMediaServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let data_dir = crt_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("console.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG overrides; keep HTTP client internals quiet by default.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("crt log: {}", log_path.display());
    tracing::info!("crt starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let loaded = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {:#}", e);
        Config::default()
    });
    if let Some(server) = args.server {
        config.server.base_url = server;
    }

    let server = HttpMediaServer::new(
        &config.server.base_url,
        config.server.request_timeout(),
    )?;
    let server_url = server.base_url().to_string();
    tracing::info!("media server: {}", server_url);

    app::App::new(server, server_url, &config).run().await
}
