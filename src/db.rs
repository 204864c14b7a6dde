//! # Flat-File Persistence
//!
//! Loads and saves a [`Store`] as a line-oriented text file:
//!
//! ```text
//! UserName:Artist1,Artist2,Artist3
//! ```
//!
//! There is no escaping, so `:`, `,` and newlines are not allowed inside
//! names. The whole file is read at startup and the whole store is written
//! back at save time.
//!
//! ## Malformed Lines
//!
//! A line without exactly one `:` is skipped with a warning instead of
//! aborting the load. Blank lines are ignored silently.

use crate::store::{PreferenceSet, Store};
use anyhow::{bail, Context, Result};
use log::{debug, info, trace, warn};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Separates the user name from the artist list.
pub const FIELD_SEPARATOR: &str = ":";
/// Separates artists within the list.
pub const ARTIST_SEPARATOR: &str = ",";

/// Parse one record into a user name and preference set.
///
/// # Errors
///
/// Returns an error if the line doesn't contain exactly one `:` or the user
/// name is empty.
pub fn parse_line(line: &str) -> Result<(String, PreferenceSet)> {
    let mut fields = line.split(FIELD_SEPARATOR);
    let (Some(user), Some(artists), None) = (fields.next(), fields.next(), fields.next()) else {
        bail!("expected exactly one `{FIELD_SEPARATOR}` separator");
    };

    let user = user.trim();
    if user.is_empty() {
        bail!("empty user name");
    }

    let prefs = artists.split(ARTIST_SEPARATOR).collect::<PreferenceSet>();
    Ok((user.to_owned(), prefs))
}

/// Serialize one record, without the trailing newline.
#[must_use]
pub fn format_line(user: &str, prefs: &PreferenceSet) -> String {
    let artists = prefs.as_slice().join(ARTIST_SEPARATOR);
    format!("{user}{FIELD_SEPARATOR}{artists}")
}

/// Parse a whole file's contents, skipping malformed lines.
#[must_use]
pub fn parse_store(contents: &str) -> Store {
    let mut store = Store::new();
    let mut skipped = 0usize;

    for (lineno, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok((user, prefs)) => {
                trace!("Line {}: `{user}` likes {} artists", lineno + 1, prefs.len());
                if store.set(&user, prefs).is_some() {
                    warn!("Line {}: user `{user}` appears more than once, keeping the later record", lineno + 1);
                }
            }
            Err(e) => {
                warn!("Skipping malformed line {}: {e}", lineno + 1);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {skipped} malformed line(s)");
    }

    store
}

/// Load the store from `path`, creating an empty file if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the file can't be created or read.
pub fn load(path: &Path) -> Result<Store> {
    // Touch the file so a first run leaves an empty store behind.
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to create store file at {}", path.display()))?;

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read store file {}", path.display()))?;

    let store = parse_store(&contents);
    info!("Loaded {} user(s) from {}", store.len(), path.display());
    Ok(store)
}

/// Render the whole store in file format, one line per user.
#[must_use]
pub fn render_store(store: &Store) -> String {
    store
        .iter()
        .map(|(user, prefs)| format_line(user.name(), prefs) + "\n")
        .collect()
}

/// Overwrite `path` with the full contents of `store`.
///
/// Data goes to a temporary file next to `path` which then replaces it, so
/// an interrupted save leaves the previous file intact.
///
/// # Errors
///
/// Returns an error if the temporary file can't be written or persisted.
pub fn save(store: &Store, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(render_store(store).as_bytes())
        .context("Failed to write store contents")?;
    tmp.flush().context("Failed to flush store contents")?;

    tmp.persist(path)
        .with_context(|| format!("Failed to replace store file {}", path.display()))?;

    debug!("Wrote {} record(s)", store.len());
    info!("Saved {} user(s) to {}", store.len(), path.display());
    Ok(())
}
