//! CLI entry point for stitch-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stitch-rs")]
#[command(version)]
#[command(about = "Assembles static site pages from shared fragments, markdown posts and JSON indexes", long_about = None)]
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
    /// Assemble one page, e.g. `/post.html?slug=hello`
    #[command(alias = "r")]
    Render {
        /// Site-absolute URL of the page
        url: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Assemble every page into the public folder
    #[command(alias = "g")]
    Generate,

    /// Start a preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// List posts or WebGL demos
    List {
        /// Type of content to list (post, webgl)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Rewrite relative image links in markdown sources
    FixImages,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "stitch_rs=debug,info"
    } else {
        "stitch_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Render { url, output } => {
            let site = stitch_rs::Site::new(&base_dir)?;
            stitch_rs::commands::render::run(&site, &url, output.as_deref()).await?;
        }

        Commands::Generate => {
            let site = stitch_rs::Site::new(&base_dir)?;
            tracing::info!("Assembling pages...");
            site.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip, open } => {
            let site = stitch_rs::Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            stitch_rs::server::start(&site, &ip, port, open).await?;
        }

        Commands::List { r#type } => {
            let site = stitch_rs::Site::new(&base_dir)?;
            stitch_rs::commands::list::run(&site, &r#type).await?;
        }

        Commands::FixImages => {
            let site = stitch_rs::Site::new(&base_dir)?;
            let touched = stitch_rs::commands::fix_images::run(&site)?;
            println!("Done. Updated {} file(s).", touched);
        }

        Commands::Clean => {
            let site = stitch_rs::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("stitch-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
