//! Per-user artist preferences with naive similarity recommendations.
//!
//! Core modules:
//! - [`store`] - Users, preference sets and the ordered store
//! - [`algorithm`] - Recommendations and popularity queries
//! - [`db`] - Flat-file load and save
//! - [`session`] - Interactive menu loop
//!
//! ### Supporting Modules
//!
//! - [`config`] - Store location and runtime settings
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use musicrec::{algorithm, config, db};
//! use anyhow::Result;
//!
//! let path = config::default_store_path()?;
//! let store = db::load(&path)?;
//!
//! match algorithm::recommendations("alice", &store)? {
//!     algorithm::Recommendation::Found { source, artists } => {
//!         println!("Because you're like {source}: {}", artists.join(", "));
//!     }
//!     algorithm::Recommendation::Unavailable => println!("Nothing to recommend"),
//! }
//!
//! for entry in algorithm::most_popular(&store, 3) {
//!     println!("{} ({})", entry.artist, entry.count);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Privacy
//!
//! A user name ending in `$` is private: that user can ask for
//! recommendations but is never used as a source, and is left out of the
//! popularity and most-likes queries.
//!
//! ## Error Handling
//!
//! Fallible functions return `anyhow::Result`. Malformed lines in the store
//! file are skipped with a warning rather than failing the load.

pub mod algorithm;
pub mod cli;
pub mod completion;
pub mod config;
pub mod db;
pub mod session;
pub mod store;
