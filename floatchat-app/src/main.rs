use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use floatchat_app::{config::AppConfig, server, workflow};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Parser)]
#[command(name = "floatchat", version, about = "Synthetic ARGO float profiles from free-text questions")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "floatchat.yaml")]
    config: String,

    /// Overrides `log_level` from the config file (RUST_LOG wins over both).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the JSON a `POST /query` would return.
    Query {
        query: Vec<String>,
        #[arg(long)]
        pretty: bool,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Answer a chat message the way the dashboard does.
    Chat { message: Vec<String> },
    /// Write CSV, JSON and a chart for a query.
    Export {
        query: Vec<String>,
        #[arg(long)]
        output_dir: Option<String>,
    },
    /// Run the HTTP API.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_logging(&config.log_level)?;

    match cli.command {
        Command::Query {
            query,
            pretty,
            lat,
            lon,
        } => {
            let query = join_or_default(&query, &config.default_query);
            let profile = workflow::build_profile(&query, lat.zip(lon))?;
            println!("{}", workflow::render_query_response(&profile, pretty)?);
        }
        Command::Chat { message } => {
            let message = join_or_default(&message, &config.default_query);
            println!("{}", workflow::run_chat(&message)?);
        }
        Command::Export { query, output_dir } => {
            let query = join_or_default(&query, &config.default_query);
            let output_dir = output_dir.unwrap_or(config.output_dir);
            let profile = workflow::build_profile(&query, None)?;
            let files = workflow::export_profile(&profile, &output_dir)?;
            workflow::print_summary_report(&profile, &files);
            println!("\nExport complete. Results are in '{}'", files.run_dir.display());
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            server::serve(&config).await?;
        }
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn join_or_default(words: &[String], default: &str) -> String {
    if words.is_empty() {
        default.to_string()
    } else {
        words.join(" ")
    }
}
