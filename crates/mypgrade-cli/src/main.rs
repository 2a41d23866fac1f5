//! mypgrade CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use mypgrade_core::model::Criterion;

mod commands;

#[derive(Parser)]
#[command(name = "mypgrade", version, about = "MYP criterion score and GPA tracker")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// State file path (overrides the config file)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and an empty state file
    Init,

    /// Show the grade dashboard
    Show {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show every recorded score for one subject
    Subject {
        /// Subject id (e.g. "math")
        id: String,
    },

    /// Record a score for a subject criterion
    Add {
        /// Subject id (e.g. "math")
        subject: String,

        /// Criterion: A, B, C or D
        criterion: Criterion,

        /// Score between 0 and 8
        #[arg(allow_hyphen_values = true)]
        score: String,
    },

    /// Remove a recorded score by its attempt number
    Remove {
        /// Subject id (e.g. "math")
        subject: String,

        /// Criterion: A, B, C or D
        criterion: Criterion,

        /// Attempt number as shown by `mypgrade subject` (starting at 1)
        attempt: usize,
    },

    /// Import scores from an exported CSV file
    Import {
        /// Path to the CSV file
        file: PathBuf,

        /// Merge without asking for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Clear all scores and restore the default subjects
    Reset {
        /// Reset without asking for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Print the grade boundary table
    Boundaries,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mypgrade=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = commands::Paths {
        config: cli.config,
        state: cli.state,
    };

    let result = match cli.command {
        Commands::Init => commands::init::execute(&paths),
        Commands::Show { format } => commands::show::execute(&paths, format),
        Commands::Subject { id } => commands::subject::execute(&paths, id),
        Commands::Add {
            subject,
            criterion,
            score,
        } => commands::add::execute(&paths, subject, criterion, score),
        Commands::Remove {
            subject,
            criterion,
            attempt,
        } => commands::remove::execute(&paths, subject, criterion, attempt),
        Commands::Import { file, yes } => commands::import::execute(&paths, file, yes).await,
        Commands::Reset { yes } => commands::reset::execute(&paths, yes),
        Commands::Boundaries => commands::boundaries::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
