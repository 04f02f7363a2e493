//! trailhead CLI
//!
//! Loads a JSON route manifest and lists, matches, or reverse-routes it.

mod error;
mod manifest;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;
use trailhead_router::{RouteMatch, RouteTable};

use crate::manifest::Manifest;

/// Inspect and exercise a route manifest.
#[derive(Parser)]
#[command(name = "trailhead")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Route manifest (JSON).
    #[arg(short, long, env = "TRAILHEAD_MANIFEST", default_value = "routes.json")]
    manifest: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every route, with mounted routes flattened in.
    Routes,

    /// Resolve a request, following mounts.
    Match {
        /// HTTP method.
        method: String,
        /// Request path.
        path: String,
    },

    /// Build a concrete path from a route name or key.
    Path {
        /// Route name, or key derived from the template (e.g. `user_id`).
        key: String,
        /// Values for the template's variables, in order.
        values: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let manifest = Manifest::load(&cli.manifest)?;
    let table = manifest
        .build()
        .with_context(|| format!("Invalid manifest {}", cli.manifest.display()))?;
    debug!(entries = table.len(), "route table built");

    match cli.command {
        Commands::Routes => list_routes(&table),
        Commands::Match { method, path } => resolve(&table, &method.to_ascii_uppercase(), path)?,
        Commands::Path { key, values } => println!("{}", table.generate_path(&key, &values[..])?),
    }

    Ok(())
}

fn list_routes(table: &RouteTable<String>) {
    let mut count = 0;
    table.for_each_route(|route| {
        count += 1;
        let name = route.name.as_deref().unwrap_or("-");
        println!(
            "{:<7} {:<40} {:<20} {}",
            route.method.as_str(),
            route.template(),
            route.key(),
            name
        );
    });
    if count == 0 {
        info!("No routes declared.");
    }
}

fn resolve(table: &RouteTable<String>, method: &str, mut path: String) -> anyhow::Result<()> {
    let mut table = table;
    loop {
        table = match table.match_route(&path, method) {
            Some(RouteMatch::Action {
                handler,
                params,
                template,
                options,
            }) => {
                println!("{method} {path} -> {handler} ({template})");
                let mut params: Vec<_> = params.iter().collect();
                params.sort_unstable();
                for (name, value) in params {
                    println!("  {name} = {value}");
                }
                if !options.is_empty() {
                    println!("  options: {}", serde_json::to_string(options)?);
                }
                return Ok(());
            }
            Some(RouteMatch::Delegate {
                sub_app,
                rewritten_path,
                original_path,
                ..
            }) => {
                info!("{original_path} delegated to mount as {rewritten_path}");
                path = rewritten_path;
                sub_app.as_ref()
            }
            None => bail!("No route matched {method} {path}"),
        };
    }
}
