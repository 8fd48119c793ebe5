//! Brandkit CLI and REST API entry point.
//!
//! Binary name: `brandkit`
//!
//! Parses CLI arguments, initializes tracing and services, then dispatches to
//! the appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;
mod traced;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,brandkit=debug",
        _ => "trace",
    };
    brandkit_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    brandkit_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Neither needs the completion service.
    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(*shell, &mut cmd, "brandkit", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Speak { text, out } => return cli::speak::speak(text, out, cli.json).await,
        _ => {}
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat {
            voice_dir,
            snapshot,
        } => {
            cli::chat::chat(&state, voice_dir, snapshot, cli.json).await?;
        }

        Commands::Generate {
            name,
            description,
            snapshot,
        } => {
            cli::generate::generate(&state, name, description, snapshot, cli.json).await?;
        }

        Commands::Extract {
            property,
            instructions,
            text,
        } => {
            cli::extract::extract(&state, &property, instructions.as_deref(), &text, cli.json)
                .await?;
        }

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} Brandkit API listening on {}",
                    console::style("◆").cyan().bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, data_dir = %state.data_dir.display(), "server started");

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Completions { .. } | Commands::Speak { .. } => {}
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed is
/// logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
