//! Pairwise - weekly doubles planner
//!
//! Collects a fixed pool of players during the registration days of each
//! week, then locks the week and publishes a rotation that keeps teammate
//! repeats to a minimum.

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod display;
mod state;

use cli::{Cli, Command};
use pairwise_core::{PeriodStore, Result};
use state::AppState;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        if e.is_rejection() {
            eprintln!("{}", e);
            std::process::exit(2);
        }
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut app = AppState::new(cli)?;
    let now = Utc::now();
    let capacity = app.controller.config().capacity;

    match &cli.command {
        Command::Status => {
            let period = app.controller.check_lock(&now)?;
            let open = app.controller.entry_window_open(&now);
            print!("{}", display::render_period(&period, open, capacity));
        }
        Command::Add { name } => {
            let period = app.controller.add_participant(&now, name)?;
            println!(
                "Added {} ({}/{} players).",
                name.trim(),
                period.roster.len(),
                capacity
            );
            if period.locked {
                let open = app.controller.entry_window_open(&now);
                print!("{}", display::render_period(&period, open, capacity));
            }
        }
        Command::Lock => {
            let period = app.controller.check_lock(&now)?;
            if period.locked {
                println!("{} is locked.", period.key);
            } else {
                println!(
                    "{} stays open ({}/{} players, registration open today).",
                    period.key,
                    period.roster.len(),
                    capacity
                );
            }
        }
        Command::Weeks => {
            let store = app.controller.store();
            for key in store.list_keys()? {
                let state = match store.load(&key)? {
                    Some(p) if p.locked => format!("locked, {} matches", p.schedule.len()),
                    Some(p) => format!("open, {} players", p.roster.len()),
                    None => "missing".to_string(),
                };
                println!("{}  ({})", key, state);
            }
            tracing::debug!(dir = %app.data_dir().display(), "Listed weeks");
        }
    }

    Ok(())
}
