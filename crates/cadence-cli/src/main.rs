//! Cadence CLI
//!
//! Command-line front end for the recurring task scheduler and the outreach
//! sequencer. State is kept in a local JSON file between invocations.
//!
//! # Usage
//!
//! ```bash
//! cadence recur preview --kind weekly --weekdays mon,thu --count 6
//! cadence task create --title "Weekly review" --repeat weekly --limit 12
//! cadence campaign create --name "Dental clinics" --delays 0,3,4,7,7
//! cadence prospect enroll --campaign <id> --agency "Bright Smiles" --email hi@brightsmiles.test
//! cadence prospect replied <id> --response interested --format json
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

mod commands;
mod config;
mod output;
mod state;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(version)]
#[command(about = "Recurring tasks and outreach sequences", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    /// State file holding tasks, campaigns and CRM records
    #[arg(long, env = "CADENCE_STATE")]
    state: Option<PathBuf>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = output::OutputFormat::Table)]
    format: output::OutputFormat,

    /// Evaluate as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect recurrence policies
    Recur {
        #[command(subcommand)]
        action: RecurCommands,
    },
    /// Manage tasks and recurring series
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Manage outreach campaigns
    Campaign {
        #[command(subcommand)]
        action: CampaignCommands,
    },
    /// Move prospects through a campaign's sequence
    Prospect {
        #[command(subcommand)]
        action: ProspectCommands,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Recurrence options shared by `recur preview` and `task create`
#[derive(Args, Clone, Debug)]
struct RecurrenceArgs {
    /// Interval between occurrences, in units of the recurrence kind
    #[arg(long, default_value_t = 1)]
    interval: i64,
    /// Weekly only: days to recur on, e.g. mon,wed,fri
    #[arg(long)]
    weekdays: Option<String>,
    /// Last date an occurrence may fall on
    #[arg(long)]
    until: Option<NaiveDate>,
    /// Maximum number of occurrences
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Subcommand)]
enum RecurCommands {
    /// List the dates a policy would produce
    Preview {
        /// daily, weekly, monthly or yearly
        #[arg(long)]
        kind: String,
        #[command(flatten)]
        recurrence: RecurrenceArgs,
        /// Date to count from (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// List all tasks
    List,
    /// Get task details
    Get { id: String },
    /// Create a task, optionally recurring
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// low, medium, high or urgent
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        goal: Option<String>,
        /// Recurrence kind: daily, weekly, monthly or yearly
        #[arg(long)]
        repeat: Option<String>,
        #[command(flatten)]
        recurrence: RecurrenceArgs,
    },
    /// Create the next occurrence of a series
    Next { id: String },
    /// Create every remaining occurrence of a series
    Fill { id: String },
    /// Create occurrences until the series reaches today (or --to)
    Advance {
        id: String,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Mark a task done
    Complete { id: String },
    /// List a series' occurrences
    Occurrences { id: String },
    /// Delete a recurring task and all its occurrences
    DeleteSeries { id: String },
}

#[derive(Subcommand)]
enum CampaignCommands {
    /// List all campaigns
    List,
    /// Get campaign details
    Get { id: String },
    /// Create a campaign
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        niche: Option<String>,
        /// Days before each step, e.g. 0,3,4,7,7
        #[arg(long, value_delimiter = ',', required = true)]
        delays: Vec<u32>,
    },
    /// Replace a campaign's step delays
    Delays {
        id: String,
        #[arg(long, value_delimiter = ',', required = true)]
        delays: Vec<u32>,
    },
    /// Stop accepting new prospects
    Archive { id: String },
    /// Funnel counts, response rate and pipeline value
    Stats { id: String },
    /// Prospects due for their next step
    Due {
        id: String,
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum ProspectCommands {
    /// Get prospect details
    Get { id: String },
    /// Enroll a prospect in a campaign
    Enroll {
        #[arg(long)]
        campaign: String,
        #[arg(long)]
        agency: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        niche: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        /// Id of the discovered lead this prospect came from
        #[arg(long)]
        lead: Option<String>,
    },
    /// Record that the current step's message went out
    Sent { id: String },
    /// Record a reply
    Replied {
        id: String,
        /// interested, not-interested or other
        #[arg(long)]
        response: String,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Show config and state file locations
    Path,
    /// Write a default configuration file
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let state_path = cli.state.unwrap_or_else(config::default_state_path);
    let settings = config::load(&config_path)?;

    cadence_common::telemetry::init_tracing(&settings.log_filter);

    let format = cli.format;
    match cli.command {
        Commands::Config { action } => commands::config::handle(action, &settings, &config_path, &state_path, format),
        Commands::Recur { action } => {
            let today = cli.today.unwrap_or_else(|| chrono::Utc::now().date_naive());
            commands::recur::handle(action, today, format)
        }
        command => {
            let ctx = commands::Context::open(&settings, state_path, cli.today)?;
            match command {
                Commands::Task { action } => commands::tasks::handle(action, &ctx, format).await,
                Commands::Campaign { action } => commands::campaigns::handle(action, &ctx, format).await,
                Commands::Prospect { action } => commands::prospects::handle(action, &ctx, format).await,
                Commands::Config { .. } | Commands::Recur { .. } => Ok(()),
            }
        }
    }
}
