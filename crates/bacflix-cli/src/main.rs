use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "bacflix", version, about = "BacFlix study planner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Curriculum branches
    Branch {
        #[command(subcommand)]
        action: commands::branch::BranchAction,
    },
    /// Subjects of the active branch
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Weekly plan
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Individual tasks of the plan
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Weekly statistics
    Stats,
    /// Focus/break timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Flashcard review
    Cards {
        #[command(subcommand)]
        action: commands::cards::CardsAction,
    },
    /// Switch the active view (plan, stats, cards)
    Tab {
        tab: String,
    },
    /// Print a motivational quote
    Quote,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BACFLIX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Branch { action } => commands::branch::run(action),
        Commands::Subject { action } => commands::subject::run(action),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Cards { action } => commands::cards::run(action),
        Commands::Tab { tab } => commands::tab::run(&tab),
        Commands::Quote => commands::quote::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
