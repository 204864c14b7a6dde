//! # Musicrec
//!
//! Keeps per-user artist preferences in a flat file and answers simple
//! questions about them: who you resemble, what's popular, who likes the most.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive menu (asks for your name)
//! musicrec
//!
//! # Interactive menu for a known user, custom store file
//! musicrec --file ./musicrecplus.txt --user alice
//!
//! # One-shot queries
//! musicrec recommend alice
//! musicrec popular --limit 5 --json
//! musicrec most-likes
//! ```

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use musicrec::{algorithm, cli, completion, config, db, session};
use std::io::{self, Write};

/// Main entry point for the musicrec application.
///
/// Initializes logging, parses command-line arguments, loads the store and
/// either runs a one-shot query or the interactive session. Only the
/// interactive session writes the store back.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug musicrec` - Enable debug logging
/// - `RUST_LOG=musicrec::algorithm=trace musicrec recommend alice` - Per-candidate overlaps
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    // Completions don't need the store.
    if let Some(cli::Command::Completion { shell }) = args.command {
        let mut cmd = cli::Args::command();
        completion::generate_completions(
            completion::shell_to_completion_shell(shell),
            &mut cmd,
            &mut io::stdout(),
        );
        return Ok(());
    }

    let mut runtime = config::RuntimeConfig::new(args.file.as_deref())?;
    if let Some(cli::Command::Popular { limit, .. }) = &args.command {
        runtime = runtime.with_popular_limit(*limit);
    }
    debug!("Runtime configuration: {runtime:?}");

    let mut store = db::load(&runtime.store_path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        None => {
            let stdin = io::stdin();
            let (user, end) = session::Session::new(&mut store, stdin.lock(), &mut out)
                .with_popular_limit(runtime.popular_limit)
                .start(args.user.as_deref())?;

            info!("Session for {user:?} ended ({end:?})");
            db::save(&store, &runtime.store_path)?;
        }
        Some(cli::Command::Recommend { user }) => {
            let rec = algorithm::recommendations(&user, &store)?;
            session::write_recommendation(&mut out, &rec)?;
        }
        Some(cli::Command::Popular { json, .. }) => {
            if json {
                let top = algorithm::most_popular(&store, runtime.popular_limit);
                serde_json::to_writer_pretty(&mut out, &top)?;
                writeln!(out)?;
            } else {
                session::write_most_popular(&mut out, &store, runtime.popular_limit)?;
            }
        }
        Some(cli::Command::Highest) => {
            session::write_highest_popularity(&mut out, &store)?;
        }
        Some(cli::Command::MostLikes) => {
            session::write_most_likes(&mut out, &store)?;
        }
        Some(cli::Command::Show { user }) => {
            let prefs = store
                .get(&user)
                .ok_or_else(|| anyhow!("User `{user}` not found"))?;
            session::write_preferences(&mut out, prefs)?;
        }
        Some(cli::Command::Completion { .. }) => unreachable!("handled before loading the store"),
    }

    Ok(())
}
