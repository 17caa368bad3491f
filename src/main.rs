use clap::{Parser, Subcommand, ValueEnum};
use ghost_catalog::catalog::Catalog;
use ghost_catalog::data::Catalogs;
use ghost_catalog::facets::ALL;
use ghost_catalog::output::{self, Listing};
use ghost_catalog::query::Query;
use ghost_catalog::session::{BrowseSession, SessionCommand};
use ghost_catalog::{config, engine, generate};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shared flags for the listing commands.
#[derive(clap::Args, Clone)]
struct QueryArgs {
    /// Case-insensitive substring of the name or description
    #[arg(long, short, default_value = "")]
    search: String,

    /// Exact category label; "All" disables the filter
    #[arg(long, short, default_value = ALL)]
    category: String,

    /// Page to show, 1-indexed (out-of-range values are clamped)
    #[arg(long, short, default_value_t = 1)]
    page: usize,

    /// Print the query result as JSON
    #[arg(long)]
    json: bool,
}

impl QueryArgs {
    fn query(&self) -> Query {
        Query::new(self.search.clone(), self.category.clone(), self.page)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Hub {
    Modules,
    Projects,
}

#[derive(Parser)]
#[command(name = "ghost-catalog")]
#[command(about = "Browse the GhostMicro module library and project tutorials")]
#[command(long_about = "\
Browse the GhostMicro module library and project tutorials

Two catalogs ship built in: the library hub (downloadable modules) and the
project hub (step-by-step tutorials, six per page). Both can be searched
by name or description and narrowed to one category.

Examples:

  ghost-catalog projects --search esp32 --page 2
  ghost-catalog modules --category Security
  ghost-catalog project esp32-lora-long-range
  ghost-catalog browse projects
  ghost-catalog generate --output dist

Config (optional) is read from <config-dir>/config.toml. It can point either
catalog at a TOML or JSON file and change page sizes and site colors.

Run 'ghost-catalog gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Log more (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List library modules
    Modules(QueryArgs),
    /// List project tutorials
    Projects(QueryArgs),
    /// Show one project manual by slug
    Project {
        slug: String,
        #[arg(long)]
        json: bool,
    },
    /// Show one module by archive file name
    Module {
        file: String,
        #[arg(long)]
        json: bool,
    },
    /// List the categories of a hub
    Categories {
        #[arg(value_enum)]
        hub: Hub,
    },
    /// Browse a hub interactively
    Browse {
        #[arg(value_enum)]
        hub: Hub,
    },
    /// Render the static HTML site
    Generate {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Validate both catalogs and print their versions
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site_config = config::load_config(&cli.config_dir)?;
    let catalogs = Catalogs::resolve(&site_config, &cli.config_dir)?;

    match cli.command {
        Command::Modules(args) => list("Modules", &catalogs.modules, &args)?,
        Command::Projects(args) => list("Projects", &catalogs.projects, &args)?,
        Command::Project { slug, json } => match engine::resolve(&catalogs.projects, &slug) {
            Some(project) if json => print_json(project)?,
            Some(project) => output::print_lines(&output::format_project_detail(project)),
            None => not_found("project", &slug),
        },
        Command::Module { file, json } => match engine::resolve(&catalogs.modules, &file) {
            Some(module) if json => print_json(module)?,
            Some(module) => {
                let url = site_config.modules.download_url(&module.file);
                output::print_lines(&output::format_module_detail(module, &url));
            }
            None => not_found("module", &file),
        },
        Command::Categories { hub } => {
            let categories = match hub {
                Hub::Modules => catalogs.modules.categories(),
                Hub::Projects => catalogs.projects.categories(),
            };
            output::print_lines(&output::format_categories(categories));
        }
        Command::Browse { hub } => match hub {
            Hub::Modules => browse("Modules", &catalogs.modules)?,
            Hub::Projects => browse("Projects", &catalogs.projects)?,
        },
        Command::Generate { output: dir } => {
            println!("==> Generating site → {}", dir.display());
            let summary = generate::generate(&catalogs, &site_config, &dir)?;
            output::print_lines(&output::format_generate_summary(&summary));
        }
        Command::Check => {
            println!("==> Checking catalogs");
            catalogs.modules.validate()?;
            catalogs.projects.validate()?;
            output::print_lines(&output::format_check("Modules", &catalogs.modules));
            output::print_lines(&output::format_check("Projects", &catalogs.projects));
            println!("==> Catalogs are valid");
        }
        // Printed before config loading.
        Command::GenConfig => {}
    }

    Ok(())
}

/// stderr subscriber; stdout carries command output only.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list<T: Listing + Serialize>(
    heading: &str,
    catalog: &Catalog<T>,
    args: &QueryArgs,
) -> Result<(), serde_json::Error> {
    let query = args.query();
    let result = engine::evaluate_query(catalog, &query);
    if args.json {
        print_json(&result)?;
    } else {
        output::print_listing(heading, &query, &result);
    }
    Ok(())
}

fn print_json<S: Serialize + ?Sized>(value: &S) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn not_found(kind: &str, id: &str) -> ! {
    output::print_lines(&output::format_not_found(kind, id));
    std::process::exit(1);
}

/// Line-driven session: render, read a command, apply, repeat until `q` or
/// end of input.
fn browse<T: Listing>(heading: &str, catalog: &Catalog<T>) -> std::io::Result<()> {
    let mut session = BrowseSession::new(catalog);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();

    loop {
        let result = session.evaluate();
        output::print_listing(heading, session.query(), &result);

        loop {
            print!("> ");
            stdout.flush()?;
            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }
            match SessionCommand::parse(&line) {
                Ok(command) => {
                    if !session.apply(command) {
                        return Ok(());
                    }
                    break;
                }
                Err(err) => eprintln!("{err}"),
            }
        }
    }
}
