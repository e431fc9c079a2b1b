use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use burr_counter::{
    config, create_router, execute_run, generate_correlation_id, init_config, init_telemetry,
    AppDependencies, CounterInput, ShutdownCoordinator,
};

#[derive(Parser)]
#[command(name = "burr-counter")]
#[command(about = "HTTP service that runs a bounded counting workflow")]
#[command(long_about = "Serves a health check on GET / and runs the \"count up to N\" workflow \
                       on POST /run, returning the workflow's final state as JSON.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Address to bind, overriding configuration
        #[arg(long, help = "Host to bind, e.g. 127.0.0.1")]
        host: Option<String>,
        /// Port to bind, overriding configuration
        #[arg(long, help = "Port to listen on")]
        port: Option<u16>,
    },
    /// Run the counter workflow once and print the result as JSON
    Run {
        /// Upper bound to count to
        #[arg(long, short = 'n', allow_negative_numbers = true)]
        number: i64,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => tokio::runtime::Runtime::new()?.block_on(async { serve_command(None, None).await }),
        Some(Commands::Serve { host, port }) => {
            tokio::runtime::Runtime::new()?.block_on(async { serve_command(host, port).await })
        }
        Some(Commands::Run { number }) => {
            tokio::runtime::Runtime::new()?.block_on(async { run_command(number).await })
        }
        Some(Commands::Config) => config_command(),
    }
}

async fn serve_command(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut settings = config()?.clone();
    init_telemetry(&settings.observability)?;
    init_config()?;

    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    let bind_address = settings.server.bind_address();
    let app = create_router(AppDependencies::from_config(&settings)).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("{} started on http://{}", settings.app.title, bind_address);
    tracing::info!("Available endpoints:");
    tracing::info!("  GET  /     - Health check");
    tracing::info!("  POST /run  - Count up to {{\"number\": N}}");

    axum::serve(listener, app)
        .with_graceful_shutdown(ShutdownCoordinator::new().wait_for_shutdown())
        .await?;

    ShutdownCoordinator::shutdown_all_services();
    Ok(())
}

async fn run_command(number: i64) -> Result<()> {
    let settings = config()?;
    init_telemetry(&settings.observability)?;

    let dependencies = AppDependencies::from_config(settings);
    let correlation_id = generate_correlation_id();

    match execute_run(&dependencies, CounterInput { number }, &correlation_id).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("{}", e)),
    }
}

fn config_command() -> Result<()> {
    print!("{}", config()?.to_toml()?);
    Ok(())
}
