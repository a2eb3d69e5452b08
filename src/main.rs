//! MatMind - wrestling practice journal
//!
//! Command-line entry point. Every command prints pretty JSON on stdout.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;

#[derive(Parser)]
#[command(name = "matmind", version, about = "Wrestling practice journal")]
struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a practice and check for new achievements
    Log {
        /// Minutes on the mat
        #[arg(long)]
        duration: f64,
        /// Perceived intensity, 0-10
        #[arg(long)]
        intensity: f64,
        /// Practice day, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List practices in the order they were logged
    List,
    /// Delete a practice by id
    Delete { id: String },
    /// Dashboard stats with phase, level and weekly goal
    Stats,
    /// Training summary over a trailing range
    Insights {
        /// Trailing days to cover, 0 for all time
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Current journey phase
    Phase,
    /// Current identity level
    Level,
    /// Earned badges and milestones
    Badges {
        /// Show every catalog entry with progress
        #[arg(long)]
        all: bool,
    },
    /// Re-evaluate achievements against the stored practices
    Evaluate,
    /// Export practices and profile as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace all data with an export file or a list of practices
    Import { file: PathBuf },
    /// Delete all practices and the profile
    Reset {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
    /// Show or change settings
    Config {
        /// Sessions per week to aim for
        #[arg(long)]
        weekly_target: Option<u32>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = cli
        .data_dir
        .unwrap_or_else(matmind::storage::config::get_data_dir);
    let mut app = app::App::open(&data_dir)?;

    let output = match cli.command {
        Commands::Log {
            duration,
            intensity,
            date,
            notes,
        } => app.log(duration, intensity, date.as_deref(), notes)?,
        Commands::List => app.list()?,
        Commands::Delete { id } => app.delete(&id)?,
        Commands::Stats => app.stats()?,
        Commands::Insights { days } => app.insights(days)?,
        Commands::Phase => app.phase()?,
        Commands::Level => app.level()?,
        Commands::Badges { all } => app.badges(all)?,
        Commands::Evaluate => app.evaluate()?,
        Commands::Export { output } => app.export(output.as_deref())?,
        Commands::Import { file } => app.import(&file)?,
        Commands::Reset { yes } => app.reset(yes)?,
        Commands::Config { weekly_target } => app.config(weekly_target)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
