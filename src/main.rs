mod interactive;

use std::process;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use kcal::config::{self, ApiConfig};
use kcal::panel::{ActionOutcome, PanelAction, SearchPanel};
use kcal::OpenFoodFactsClient;

#[derive(Parser)]
#[command(
    name = "kcal",
    author,
    version,
    about = "Look up calories and macros in the Open Food Facts database",
    long_about = r#"kcal — find nutrition facts by barcode or by product name/category.

Without a subcommand an interactive panel opens: type `b <barcode>` or
`n <name>` and press Enter. Results come from the public Open Food Facts API.

Examples:
  kcal barcode 3017620422003
  kcal search yogurt
  OFF_LANG=en kcal search "peanut butter"
"#,
    after_help = "Configuration is read from `.env` (or --env-file) and OFF_BASE_URL, OFF_USER_AGENT, OFF_TIMEOUT_SECS, OFF_LANG, OFF_COUNTRY."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Print each request as a curl command along with the raw response
    #[arg(long, global = true)]
    trace_requests: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single product by barcode
    #[command(about = "Look up a product by barcode", long_about = "Fetch one product by its barcode and print name, brand, packaging, serving size, categories and nutrients.")]
    Barcode { barcode: String },
    /// Search products by name or category
    #[command(about = "Search products by name or category", long_about = "Run a full-text search (20 results) and keep the products whose name, categories or category tags contain the term and that carry nutrient data.")]
    Search { term: String },
    /// Open the interactive panel (default)
    Interactive,
}

fn build_panel(env_file: Option<&str>) -> SearchPanel {
    config::load_env_file(env_file);
    let api_config = ApiConfig::from_env();
    tracing::info!(base_url = %api_config.base_url, lang = %api_config.lang, country = %api_config.country, "using product database");
    match OpenFoodFactsClient::new(api_config) {
        Ok(client) => SearchPanel::new(client),
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::red("Failed to create HTTP client"), e);
            process::exit(1);
        }
    }
}

async fn run_once(mut panel: SearchPanel, action: PanelAction) {
    let outcome = panel.trigger(action).await;
    match outcome {
        ActionOutcome::Failed(_) => {
            eprintln!("{}", yansi::Paint::new(panel.output()).red());
            process::exit(1);
        }
        ActionOutcome::EmptyInput | ActionOutcome::NotFound => {
            println!("{}", yansi::Paint::new(panel.output()).yellow());
        }
        ActionOutcome::Found(_) => {
            println!("{}", panel.output());
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing; stderr keeps the panel output clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // CLI parsing
    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.trace_requests {
        kcal::api::set_trace_requests(true);
    }

    let mut panel = build_panel(cli.env_file.as_deref());

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Barcode { barcode } => {
            panel.barcode_input = barcode;
            run_once(panel, PanelAction::BarcodeSearch).await;
        }
        Commands::Search { term } => {
            panel.name_input = term;
            run_once(panel, PanelAction::NameSearch).await;
        }
        Commands::Interactive => {
            if let Err(e) = interactive::run(panel).await {
                tracing::error!(%e, "interactive session ended with an I/O error");
                eprintln!("{}: {}", yansi::Paint::red("I/O error"), e);
                process::exit(1);
            }
        }
    }
}
