//! atlas-sql CLI
//!
//! Compiles JSON query documents into SQL.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use atlas_sql_core::PlaceholderStyle;

/// Compile JSON query documents into SQL.
#[derive(Parser)]
#[command(name = "atlas-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Query document file, `-` for stdin. Holds one document or an array.
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Placeholder syntax variables are rewritten into.
    #[arg(
        short,
        long,
        value_enum,
        env = "ATLAS_SQL_PLACEHOLDERS",
        default_value_t = Style::Keep
    )]
    placeholders: Style,

    /// JSON file with variable values, an object keyed by variable name.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Style {
    Keep,
    Question,
    Numbered,
    Named,
}

impl From<Style> for PlaceholderStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Keep => Self::Keep,
            Style::Question => Self::Question,
            Style::Numbered => Self::Numbered,
            Style::Named => Self::Named,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SQL of every document, one statement per line.
    Compile {
        /// Also print bound values after each statement.
        #[arg(long)]
        show_values: bool,
    },

    /// Validate documents without printing SQL.
    Check,

    /// List the variables each document expects.
    Placeholders,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let source = commands::read_input(&cli.input)?;
    let queries = commands::parse_queries(&source)?;
    info!(count = queries.len(), "Parsed query documents");

    match cli.command {
        Commands::Compile { show_values } => {
            let params = match &cli.params {
                Some(path) => commands::load_params(path)?,
                None => atlas_sql_core::Params::new(),
            };
            let style = PlaceholderStyle::from(cli.placeholders);
            for bound in commands::compile_all(&queries, &params, style)? {
                println!("{}", bound.sql);
                if show_values {
                    println!("-- {}", commands::describe_values(&bound));
                }
            }
        }

        Commands::Check => {
            let compiled = commands::check_all(&queries)?;
            info!("{compiled} queries compiled successfully.");
        }

        Commands::Placeholders => {
            for (position, names) in commands::placeholders(&queries)?.iter().enumerate() {
                if names.is_empty() {
                    println!("{position}: (none)");
                } else {
                    println!("{position}: {}", names.join(", "));
                }
            }
        }
    }

    Ok(())
}
