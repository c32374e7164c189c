use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use membership_reports::clock::{Clock, FixedClock, SystemClock};
use membership_reports::config::Config;
use membership_reports::{db, report};

#[derive(Parser)]
#[command(name = "membership-reports")]
#[command(about = "Membership and event attendance reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import event check-ins from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Report on the whole membership
    Members {
        /// Compute class years as of this date instead of today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Report on the attendees of one event
    Event {
        id: Uuid,
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn clock(as_of: Option<NaiveDate>) -> Box<dyn Clock> {
    match as_of {
        Some(date) => Box::new(FixedClock::at_date(date)),
        None => Box::new(SystemClock),
    }
}

fn emit(rendered: String, out: Option<PathBuf>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Report written to {}.", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &csv).await?;
            info!("imported {inserted} check-ins from {}", csv.display());
            println!("Inserted {inserted} check-ins from {}.", csv.display());
        }
        Commands::Members { as_of, format, out } => {
            let snapshot = db::load_snapshot(&pool).await?;
            let report = report::member_report(&snapshot, clock(as_of).as_ref());
            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&report)?,
                Format::Markdown => report::markdown::render_member_report(&report),
            };
            emit(rendered, out)?;
        }
        Commands::Event {
            id,
            as_of,
            format,
            out,
        } => {
            let snapshot = db::load_snapshot(&pool).await?;
            let report = report::event_report(&snapshot, id, clock(as_of).as_ref())?;
            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&report)?,
                Format::Markdown => report::markdown::render_event_report(&report),
            };
            emit(rendered, out)?;
        }
    }

    Ok(())
}
