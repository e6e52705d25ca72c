//! Finanças Enterprise API entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use financas_api::api::{create_router, route_table, with_layers, AppState};
use financas_api::clock;
use financas_api::config::{Config, LogFormat, Variant};
use financas_api::error::ApiError;
use financas_api::metrics;
use financas_api::utils::shutdown_signal;

/// Finanças Enterprise API.
#[derive(Parser, Debug)]
#[command(name = "financas-api")]
#[command(about = "Static JSON endpoints for the Finanças Enterprise API")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Route table to serve (overrides API_VARIANT).
    #[arg(long, value_enum)]
    variant: Option<Variant>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Bind address (overrides HOST).
        #[arg(long)]
        host: Option<String>,

        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Route table to serve (overrides API_VARIANT).
        #[arg(long, value_enum)]
        variant: Option<Variant>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the route table for a variant.
    Routes {
        /// Route table to print (defaults to API_VARIANT).
        #[arg(long, value_enum)]
        variant: Option<Variant>,
    },
}

/// CLI values that take precedence over the environment.
#[derive(Debug)]
struct Overrides {
    host: Option<String>,
    port: Option<u16>,
    variant: Option<Variant>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clock::init();

    // Parse CLI arguments
    let args = Args::parse();

    // Configuration drives the log format, so load it before logging is up
    let loaded = Config::load();

    // Initialize logging
    let verbose = args.verbose || loaded.as_ref().map(|c| c.verbose).unwrap_or(false);
    let fallback_level = loaded
        .as_ref()
        .map(|c| c.rust_log.clone())
        .unwrap_or_else(|_| "info".to_string());
    let json = loaded
        .as_ref()
        .map(|c| c.log_format == LogFormat::Json)
        .unwrap_or(false);

    let filter = if verbose {
        EnvFilter::new("financas_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level))
    };

    tracing_subscriber::registry()
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(loaded),
        Some(Command::Routes { variant }) => cmd_routes(loaded, variant),
        Some(Command::Serve {
            host,
            port,
            variant,
        }) => {
            cmd_serve(
                loaded,
                Overrides {
                    host,
                    port,
                    variant,
                },
            )
            .await
        }
        None => {
            cmd_serve(
                loaded,
                Overrides {
                    host: None,
                    port: args.port,
                    variant: args.variant,
                },
            )
            .await
        }
    }
}

/// Check configuration validity.
fn cmd_check_config(loaded: Result<Config, envy::Error>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("FINANÇAS API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match loaded {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}:{}", config.host, config.port);
    println!("  Variant: {}", config.api_variant);
    println!("  CORS: {}", if config.cors_permissive { "Permissive" } else { "Disabled" });
    println!("  Metrics: {}", if config.enable_metrics { "Enabled" } else { "Disabled" });
    println!("  Log Format: {}", config.log_format);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the route table for a variant.
fn cmd_routes(
    loaded: Result<Config, envy::Error>,
    variant: Option<Variant>,
) -> anyhow::Result<()> {
    let variant = match variant {
        Some(v) => v,
        None => loaded?.api_variant,
    };

    println!("Routes ({}):", variant);
    for (method, path) in route_table(variant) {
        println!("  {:<6} {}", method, path);
    }
    println!("  {:<6} {} (when ENABLE_METRICS=true)", "GET", "/metrics");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(
    loaded: Result<Config, envy::Error>,
    overrides: Overrides,
) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        ApiError::from(e)
    })?;

    // Override with CLI args if provided
    if let Some(host) = overrides.host {
        config.host = host;
    }
    if let Some(port) = overrides.port {
        config.port = port;
    }
    if let Some(variant) = overrides.variant {
        config.api_variant = variant;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ApiError::InvalidConfig(e).into());
    }

    info!("Configuration loaded successfully");
    info!(variant = config.api_variant.as_ref(), "Serving route table");

    // Create app state
    let mut app_state = AppState::new(config.api_variant);
    if config.enable_metrics {
        let handle = metrics::install_exporter().map_err(ApiError::from)?;
        app_state = app_state.with_metrics(handle);
        info!("Prometheus metrics exposed at /metrics");
    }

    let router = with_layers(create_router(app_state), config.cors_permissive);

    // Start HTTP server
    let addr = config.socket_addr().map_err(ApiError::InvalidConfig)?;
    let listener = TcpListener::bind(addr).await.map_err(ApiError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ApiError::from)?;

    info!("HTTP server stopped");
    Ok(())
}
