//! # Command-Line Interface Module
//!
//! Defines the command-line interface with Clap derive macros.
//!
//! Without a subcommand, `musicrec` starts the interactive menu. Subcommands
//! run a single query against the store and exit without saving.
//!
//! ## Examples
//!
//! ```bash
//! musicrec --user alice
//! musicrec recommend alice
//! musicrec popular --limit 5 --json
//! musicrec completion bash
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "musicrec")]
#[command(about = "Musicrec: artist preferences, recommendations & popularity from a flat file")]
#[command(version)]
pub struct Args {
    /// Preference store file
    ///
    /// Defaults to `musicrecplus.txt` in the platform data directory. The
    /// file is created if it doesn't exist.
    #[arg(long, short, env = "MUSICREC_FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// User name for the interactive session
    ///
    /// Skips the name prompt. Append `$` to keep your preferences private.
    #[arg(long, short)]
    pub user: Option<String>,

    /// Optional one-shot query; omit to start the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot queries and utilities.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recommend artists for a user
    ///
    /// Finds the public user sharing the most artists (who still has
    /// something new to offer) and lists their artists the user doesn't
    /// already like.
    Recommend {
        /// User to recommend for
        user: String,
    },

    /// Show the most popular artists among public users
    Popular {
        /// Number of artists to show
        #[arg(long, short, default_value = "3")]
        limit: usize,

        /// Print the ranking as JSON with counts
        #[arg(long)]
        json: bool,
    },

    /// Show how many users like the most popular artist
    Highest,

    /// Show the public user(s) with the most liked artists
    MostLikes,

    /// Show a user's stored preferences
    Show {
        /// User whose preferences to list
        user: String,
    },

    /// Generate shell completions
    ///
    /// Usage: musicrec completion bash > ~/.local/share/bash-completion/completions/musicrec
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
