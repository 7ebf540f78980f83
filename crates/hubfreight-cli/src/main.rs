use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hubfreight_cli::commands::{catalog::handle_catalog, load_catalog, quote::handle_quote};
use hubfreight_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hub delivery cost optimizer")]
struct Cli {
    /// Catalog JSON file; the built-in reference catalog is used when omitted.
    #[arg(long, global = true, env = "HUBFREIGHT_CATALOG_PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the cheapest delivery path for an order.
    Quote {
        /// Order as a JSON object of product to quantity, e.g. '{"A": 1, "D": 2}'.
        order: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Include the per-leg cost breakdown.
        #[arg(long)]
        breakdown: bool,
    },
    /// Print the loaded catalog.
    Catalog {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Command::Quote {
            order,
            format,
            breakdown,
        } => handle_quote(&catalog, &order, format, breakdown),
        Command::Catalog { format } => handle_catalog(&catalog, format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
