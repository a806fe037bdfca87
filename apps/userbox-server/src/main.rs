use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use users::domain::service::Service;
use users::infra::memory::InMemoryUsersRepository;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Userbox Server - users CRUD API over an in-memory collection
#[derive(Parser)]
#[command(name = "userbox-server")]
#[command(about = "Userbox Server - users CRUD API over an in-memory collection")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    runtime::logging::init_logging_from_config(config.logging.as_ref());
    tracing::info!("Userbox Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let api_config: ApiIngressConfig = config
        .module_config("api_ingress")?
        .unwrap_or_default();

    // The collection is constructed here and injected down the stack;
    // nothing else holds a reference to it.
    let repo = Arc::new(InMemoryUsersRepository::seeded());
    let service = Arc::new(Service::new(repo));

    let ingress = ApiIngress::new(api_config);
    let router = ingress.build_router(service);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    ingress.serve(addr, router).await
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    let _: Option<ApiIngressConfig> = config.module_config("api_ingress")?;

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
