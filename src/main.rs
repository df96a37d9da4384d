//! CLI entry point for folio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::content::Category;

#[derive(Parser)]
#[command(name = "folio-rs")]
#[command(version)]
#[command(about = "A portfolio and blog site generator driven by markdown content", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new blog post, book or project
    New {
        /// Category (blog, books, projects)
        category: Category,

        /// Title of the new entry
        title: String,
    },

    /// Generate page data
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List the entries of a category in page order
    List {
        /// Category (blog, books, projects)
        #[arg(default_value = "blog")]
        category: Category,
    },

    /// Show a single entry
    Show {
        /// Category (blog, books, projects)
        category: Category,

        /// Entry slug (file name without extension)
        slug: String,

        /// Print the body rendered as HTML
        #[arg(long)]
        html: bool,
    },

    /// Remove generated page data
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { category, title } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Creating new {} entry: {}", category, title);
            let path = folio.new_entry(category, &title)?;
            println!("Created: {:?}", path);
        }

        Commands::Generate { watch } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Generating page data...");

            let report = folio_rs::commands::generate::run_with_report(&folio)?;
            if report.failed_pages > 0 {
                println!(
                    "Generated with {} page(s) in error state, see log for details",
                    report.failed_pages
                );
            } else {
                println!("Generated successfully!");
            }

            if watch {
                folio_rs::commands::generate::watch(&folio).await?;
            }
        }

        Commands::List { category } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::list::run(&folio, category)?;
        }

        Commands::Show {
            category,
            slug,
            html,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::show::run(&folio, category, &slug, html)?;
        }

        Commands::Clean => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
