use std::sync::Arc;

use clap::Parser;

use metascrub::access::AllowedRoots;
use metascrub::tools::ffprobe::FfprobeProbe;
use metascrub::tools::script::ScriptSanitizer;
use metascrub::{cli, config, http};

/// Wait for the first Ctrl+C (graceful shutdown: in-flight scans and cleans drain).
/// A second Ctrl+C while draining force-exits immediately.
async fn wait_for_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down -- waiting for in-flight requests...");
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nmetascrub: forced exit");
            std::process::exit(1);
        }
    });
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .init();

    let args = cli::Args::parse();

    let file_config = config::find_config_file(args.config.as_deref())
        .and_then(|path| {
            match config::load_config(&path) {
                Ok(cfg) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    Some(cfg)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {}", e);
                    None
                }
            }
        });

    let config = config::Config::resolve(file_config, &args);

    if config.roots.is_empty() {
        eprintln!("error: no root directories configured (pass paths or set BASE_DIRS)");
        std::process::exit(1);
    }
    for path in &config.roots {
        if !path.exists() {
            eprintln!("error: path does not exist: {}", path.display());
            std::process::exit(1);
        }
        if !path.is_dir() {
            eprintln!("error: not a directory: {}", path.display());
            std::process::exit(1);
        }
    }

    let Some(sanitizer) = ScriptSanitizer::from_command(&config.sanitizer) else {
        eprintln!("error: sanitizer command is empty");
        std::process::exit(1);
    };
    let probe = FfprobeProbe::new(config.ffprobe.clone());
    if !probe.is_available().await {
        tracing::warn!(
            "{} is not runnable -- every scan will report zero files with metadata",
            probe.program()
        );
    }

    tracing::info!("Allowed root directories:");
    for path in &config.roots {
        tracing::info!("  {}", path.display());
    }
    tracing::info!("Sanitizer: {}", config.sanitizer.join(" "));

    let state = http::state::AppState {
        roots: Arc::new(AllowedRoots::new(config.roots.clone())),
        probe: Arc::new(probe),
        sanitizer: Arc::new(sanitizer),
        static_dir: config.static_dir.clone(),
    };
    let app = http::build_router(state);

    let host = if config.localhost { "127.0.0.1" } else { "0.0.0.0" };
    let addr = format!("{}:{}", host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("error: failed to bind {}: {}", addr, e);
            std::process::exit(1);
        });
    tracing::info!("metascrub listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
    {
        tracing::error!("HTTP server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Goodbye.");
}
