// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cadence metrics server binary.

use std::path::PathBuf;

use cadence_server::{create_app_state, create_router};
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Cadence server - code-frequency interval metrics over HTTP.
#[derive(Parser, Debug)]
#[command(
	name = "cadence-server",
	about = "Cadence code-frequency metrics server",
	version
)]
struct Args {
	/// TOML config file (default: /etc/cadence/server.toml)
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Subcommands for cadence-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!(
			"cadence-server version: {}\nPlatform:               {}-{}",
			env!("CARGO_PKG_VERSION"),
			std::env::consts::OS,
			std::env::consts::ARCH
		);
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match args.config {
		Some(path) => cadence_server_config::load_config_with_file(path)?,
		None => cadence_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	config.log_summary();
	tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting cadence-server");

	let pool = cadence_server_db::create_pool(&config.database.url).await?;
	let state = create_app_state(pool, &config)?;

	let app = create_router(state).layer(TraceLayer::new_for_http());

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
