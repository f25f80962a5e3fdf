use clap::{Parser, Subcommand};
use hs_core::Settings;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "hs", about = "Security alert and telemetry webhook receiver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the destination tables if needed, then accept webhooks.
    Serve {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Create the destination tables if needed.
    InitDb {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the OpenAPI document.
    Openapi,
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings, ExitCode> {
    Settings::load(path.as_deref()).map_err(|err| {
        eprintln!("failed to load configuration: {err}");
        ExitCode::FAILURE
    })
}

fn init_tracing(settings: &Settings) {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log)))
        .init();
}

fn init_db(settings: &Settings) -> Result<(), ExitCode> {
    hs_db::schema::connect_and_bootstrap(&settings.db, &settings.tables)
        .map(drop)
        .map_err(|err| {
            error!("database setup failed: {err}");
            ExitCode::FAILURE
        })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Serve { config } => serve(config).await,
        Command::InitDb { config } => load_settings(config).and_then(|settings| {
            init_tracing(&settings);
            init_db(&settings)
        }),
        Command::Openapi => {
            println!("{}", hs_serve::openapi::generate_spec());
            Ok(())
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

async fn serve(config: Option<PathBuf>) -> Result<(), ExitCode> {
    let settings = load_settings(config)?;
    init_tracing(&settings);
    info!(db = ?settings.db, tables = ?settings.tables, "starting hooksink");

    let addr: SocketAddr = settings.bind.parse().map_err(|err| {
        error!(bind = %settings.bind, "invalid bind address: {err}");
        ExitCode::FAILURE
    })?;
    init_db(&settings)?;

    let state = hs_serve::AppState::new(settings);
    hs_serve::serve(state, addr).await.map_err(|err| {
        error!("serve error: {err}");
        ExitCode::FAILURE
    })
}
