use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seatbook::{api, config::AppConfig, today};
use seatbook_core::service::{ReservationService, SharedService};
use seatbook_core::table::Backend;

#[derive(Parser)]
#[command(name = "seatbook")]
#[command(about = "Reserve and release bus seats, one day at a time")]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

/// Settings that take precedence over the config file.
#[derive(Args)]
struct Overrides {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of seats on the bus
    #[arg(long, global = true)]
    capacity: Option<u32>,

    /// Reservation file
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Storage backend: sheet or sqlite
    #[arg(long, global = true, value_parser = parse_backend)]
    backend: Option<Backend>,

    /// Sheet holding the reservations (sheet backend)
    #[arg(long, global = true)]
    sheet: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty reservation file
    Init,
    /// Reserve a seat
    Reserve {
        #[arg(short, long)]
        seat: String,

        /// Holder's name
        #[arg(short, long)]
        name: String,

        /// Holder's identity document
        #[arg(long)]
        document: String,

        /// Day of travel (defaults to today, dd/mm/yyyy)
        #[arg(short, long)]
        day: Option<String>,
    },
    /// Cancel a reservation
    Cancel {
        #[arg(short, long)]
        seat: String,

        /// Day of travel (defaults to today, dd/mm/yyyy)
        #[arg(short, long)]
        day: Option<String>,
    },
    /// Show the seat map of a day
    Map {
        /// Day of travel (defaults to today, dd/mm/yyyy)
        #[arg(short, long)]
        day: Option<String>,

        /// Print the map as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start the HTTP API
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,

        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

fn parse_backend(s: &str) -> Result<Backend, String> {
    Backend::from_str(s).ok_or_else(|| format!("unknown backend '{}' (expected sheet or sqlite)", s))
}

/// Initialize tracing on stderr so stdout only carries command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(
        |_| "seatbook=info,seatbook_core=info,tower_http=info".into(),
    ));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_config(overrides: Overrides) -> AppConfig {
    let mut config = AppConfig::load(overrides.config.as_deref());
    if let Some(capacity) = overrides.capacity {
        config.capacity = capacity;
    }
    if let Some(file) = overrides.file {
        config.data_file = Some(file);
    }
    if let Some(backend) = overrides.backend {
        config.backend = backend;
    }
    if let Some(sheet) = overrides.sheet {
        config.sheet = sheet;
    }
    config
}

/// Print an outcome followed by the refreshed map of its day.
fn report(
    service: &mut ReservationService,
    result: Result<impl ToString, impl ToString>,
    success: bool,
    day: &str,
) -> ExitCode {
    match result {
        Ok(outcome) => println!("{}", outcome.to_string()),
        Err(e) => eprintln!("{}", e.to_string()),
    }
    print!("{}", service.map(day));
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let config = resolve_config(cli.overrides);

    match cli.command {
        Commands::Init => {
            let path = config.create_table()?;
            println!("Created {}", path.display());
        }
        Commands::Reserve {
            seat,
            name,
            document,
            day,
        } => {
            let mut service = config.build_service()?;
            let day = day.unwrap_or_else(today);
            let result = service.reserve(&seat, &name, &document, &day);
            let success = result.as_ref().is_ok_and(|o| o.is_success());
            return Ok(report(&mut service, result, success, &day));
        }
        Commands::Cancel { seat, day } => {
            let mut service = config.build_service()?;
            let day = day.unwrap_or_else(today);
            let result = service.cancel(&seat, &day);
            let success = result.as_ref().is_ok_and(|o| o.is_success());
            return Ok(report(&mut service, result, success, &day));
        }
        Commands::Map { day, json } => {
            let mut service = config.build_service()?;
            let day = day.unwrap_or_else(today);
            if json {
                println!("{}", serde_json::to_string_pretty(&service.seat_map(&day))?);
            } else {
                print!("{}", service.map(&day));
            }
        }
        Commands::Serve { port, host } => {
            let service = SharedService::new(config.build_service()?);
            let app = api::create_router(service);

            let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
            tracing::info!("seatbook listening on http://{}:{}", host, port);

            axum::serve(listener, app).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
