use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sf")]
#[command(about = "Storefront menu, cart and order history", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (base -> site -> local...)
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    /// Catalog JSON path; overrides /catalog/path
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the menu, optionally filtered
    Menu {
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,

        /// Category name ("All Items" for every category)
        #[arg(long)]
        category: Option<String>,
    },

    /// List category picker options
    Categories,

    /// Show one item's detail screen
    Item {
        #[arg(long)]
        category: String,

        #[arg(long)]
        id: String,
    },

    /// Add items to a fresh cart and submit it to the order history
    Submit {
        /// CATEGORY/ID, repeat for more units
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },

    /// Print the stored order history
    History,

    /// Delete the stored order history. Guardrail: requires --yes.
    ClearHistory {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();
    let catalog = cli.catalog.as_deref();

    match cli.cmd {
        Commands::Menu { search, category } => {
            let mut session = commands::open_session(&cli.config_paths, catalog)?;
            commands::menu::print_menu(&mut session, search, category);
        }

        Commands::Categories => {
            let session = commands::open_session(&cli.config_paths, catalog)?;
            commands::menu::print_categories(&session);
        }

        Commands::Item { category, id } => {
            let session = commands::open_session(&cli.config_paths, catalog)?;
            commands::menu::print_item(&session, &category, &id)?;
        }

        Commands::Submit { items } => {
            let mut session = commands::open_session(&cli.config_paths, catalog)?;
            commands::order::submit(&mut session, &items).await?;
        }

        Commands::History => {
            let session = commands::open_session(&cli.config_paths, catalog)?;
            commands::order::print_history(&session).await;
        }

        Commands::ClearHistory { yes } => {
            let cfg = commands::load_config(&cli.config_paths)?;
            let history = commands::open_history(&cfg)?;
            commands::order::clear_history(&history, yes).await?;
        }

        Commands::ConfigHash { paths } => {
            let loaded = commands::load_layers(&paths)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}

/// Logs go to stderr so command output stays clean on stdout.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
