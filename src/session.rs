//! # Interactive Session
//!
//! The menu-driven loop around the query engine. Input and output are
//! generic so the whole session can be driven from memory in tests.
//!
//! | Key | Action |
//! |-----|--------|
//! | `e` | Enter preferences (replaces the current ones) |
//! | `r` | Get recommendations |
//! | `p` | Show most popular artists |
//! | `h` | How popular is the most popular |
//! | `m` | Which user has the most likes |
//! | `q` | Save and quit |
//! | `s` | Show preferences |
//!
//! End of input at any prompt behaves like `q`.

use crate::algorithm::{self, Recommendation};
use crate::store::{has_reserved_chars, AddOutcome, PreferenceBuilder, PreferenceSet, Store};
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::io::{BufRead, Write};

pub const NAME_PROMPT: &str =
    "Enter your name (put a $ symbol after your name if you wish your preferences to remain private): ";
pub const ARTIST_PROMPT: &str = "Enter an artist that you like (Enter to finish):";
pub const MENU: &str = "Enter a letter to choose an option:
e - Enter preferences
r - Get recommendations
p - Show most popular artists
h - How popular is the most popular
m - Which user has the most likes
q - Save and quit
s - Show Preferences";

pub const NO_RECOMMENDATIONS: &str = "No recommendations available at this time.";
pub const NO_ARTISTS: &str = "Sorry, no artists found";
pub const INVALID_OPTION: &str = "That is not an option.";

/// Menu actions selectable by a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    EnterPreferences,
    Recommendations,
    MostPopular,
    HighestPopularity,
    MostLikes,
    SaveAndQuit,
    ShowPreferences,
}

impl MenuOption {
    /// Parse a menu letter. Surrounding whitespace is ignored; case is not.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "e" => Some(Self::EnterPreferences),
            "r" => Some(Self::Recommendations),
            "p" => Some(Self::MostPopular),
            "h" => Some(Self::HighestPopularity),
            "m" => Some(Self::MostLikes),
            "q" => Some(Self::SaveAndQuit),
            "s" => Some(Self::ShowPreferences),
            _ => None,
        }
    }
}

/// How a session ended. Either way the caller is expected to save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user chose `q`.
    Quit,
    /// Input ran out before `q`.
    EndOfInput,
}

/// Write a recommendation result, one artist per line.
pub fn write_recommendation(out: &mut dyn Write, rec: &Recommendation) -> Result<()> {
    match rec {
        Recommendation::Unavailable => writeln!(out, "{NO_RECOMMENDATIONS}")?,
        Recommendation::Found { artists, .. } => {
            for artist in artists {
                writeln!(out, "{artist}")?;
            }
        }
    }
    Ok(())
}

/// Write the top `limit` artists, one per line.
pub fn write_most_popular(out: &mut dyn Write, store: &Store, limit: usize) -> Result<()> {
    let top = algorithm::most_popular(store, limit);
    if top.is_empty() {
        writeln!(out, "{NO_ARTISTS}")?;
    }
    for entry in &top {
        writeln!(out, "{}", entry.artist)?;
    }
    Ok(())
}

/// Write how many users like the most popular artist.
pub fn write_highest_popularity(out: &mut dyn Write, store: &Store) -> Result<()> {
    match algorithm::highest_popularity(store) {
        Some(count) => writeln!(out, "{count}")?,
        None => writeln!(out, "{NO_ARTISTS}")?,
    }
    Ok(())
}

/// Write every user tied for the most likes, one per line.
pub fn write_most_likes(out: &mut dyn Write, store: &Store) -> Result<()> {
    for user in algorithm::most_likes_users(store) {
        writeln!(out, "{user}")?;
    }
    Ok(())
}

/// Write a user's preferences, one per line.
pub fn write_preferences(out: &mut dyn Write, prefs: &PreferenceSet) -> Result<()> {
    for artist in prefs.iter() {
        writeln!(out, "{artist}")?;
    }
    Ok(())
}

/// One user's interactive session over a borrowed store.
pub struct Session<'a, R, W> {
    store: &'a mut Store,
    input: R,
    output: W,
    popular_limit: usize,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(store: &'a mut Store, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            popular_limit: algorithm::DEFAULT_POPULAR_LIMIT,
        }
    }

    #[must_use]
    pub fn with_popular_limit(mut self, limit: usize) -> Self {
        self.popular_limit = limit;
        self
    }

    /// Print `prompt` and read one line without its line ending.
    ///
    /// Returns `None` at end of input.
    pub fn prompt_line(&mut self, prompt: &str) -> Result<Option<String>> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Ask for a user name until a storable one is given.
    ///
    /// Returns `None` at end of input.
    pub fn prompt_user_name(&mut self) -> Result<Option<String>> {
        loop {
            let Some(name) = self.prompt_line(NAME_PROMPT)? else {
                return Ok(None);
            };
            let name = name.trim();

            if name.is_empty() {
                writeln!(self.output, "Your name can't be empty.")?;
            } else if has_reserved_chars(name) {
                warn!("Rejected user name containing reserved characters: {name:?}");
                writeln!(self.output, "Your name can't contain ':' or ','.")?;
            } else {
                return Ok(Some(name.to_owned()));
            }
        }
    }

    /// Read artist names until an empty line (or end of input).
    ///
    /// Names are title-cased; duplicates and names with `:` or `,` are
    /// rejected with a message. The result is sorted.
    pub fn enter_preferences(&mut self) -> Result<PreferenceSet> {
        let mut builder = PreferenceBuilder::new();

        while let Some(raw) = self.prompt_line(ARTIST_PROMPT)? {
            if raw.is_empty() {
                break;
            }

            match builder.add(&raw) {
                AddOutcome::Added(artist) => debug!("Added `{artist}`"),
                AddOutcome::Duplicate(_) => {
                    writeln!(self.output, "You already added {raw} to your likes.")?;
                }
                AddOutcome::Reserved => {
                    writeln!(self.output, "Artist names can't contain ':' or ','.")?;
                }
                AddOutcome::Blank => {}
            }
        }

        Ok(builder.finish())
    }

    /// Make sure `user` exists, asking for preferences if they are new.
    pub fn ensure_user(&mut self, user: &str) -> Result<()> {
        if self.store.contains(user) {
            debug!("Returning user `{user}`");
            return Ok(());
        }

        info!("New user `{user}`");
        let prefs = self.enter_preferences()?;
        self.store.set(user, prefs);
        Ok(())
    }

    /// Run the menu loop for `user` until `q` or end of input.
    ///
    /// `user` must already be in the store; see [`Session::ensure_user`].
    pub fn run(&mut self, user: &str) -> Result<SessionEnd> {
        loop {
            let Some(choice) = self.prompt_line(MENU)? else {
                warn!("Input closed, saving and quitting");
                return Ok(SessionEnd::EndOfInput);
            };

            let Some(option) = MenuOption::parse(&choice) else {
                writeln!(self.output, "{INVALID_OPTION}")?;
                continue;
            };

            debug!("Menu option {option:?}");
            match option {
                MenuOption::EnterPreferences => {
                    let prefs = self.enter_preferences()?;
                    self.store.set(user, prefs);
                }
                MenuOption::Recommendations => {
                    let rec = algorithm::recommendations(user, self.store)?;
                    write_recommendation(&mut self.output, &rec)?;
                }
                MenuOption::MostPopular => {
                    write_most_popular(&mut self.output, self.store, self.popular_limit)?;
                }
                MenuOption::HighestPopularity => {
                    write_highest_popularity(&mut self.output, self.store)?;
                }
                MenuOption::MostLikes => {
                    write_most_likes(&mut self.output, self.store)?;
                }
                MenuOption::SaveAndQuit => return Ok(SessionEnd::Quit),
                MenuOption::ShowPreferences => {
                    let prefs = self.store.get(user).cloned().unwrap_or_default();
                    write_preferences(&mut self.output, &prefs)?;
                }
            }
        }
    }

    /// Full session: ask for the name unless given, register the user if
    /// new, then run the menu.
    ///
    /// Returns the user name (if one was obtained) and how the session ended.
    pub fn start(&mut self, user: Option<&str>) -> Result<(Option<String>, SessionEnd)> {
        let user = match user {
            Some(name) if name.trim().is_empty() || has_reserved_chars(name) => {
                bail!("Invalid user name {name:?}: names can't be empty or contain ':' or ','");
            }
            Some(name) => name.trim().to_owned(),
            None => match self.prompt_user_name()? {
                Some(name) => name,
                None => return Ok((None, SessionEnd::EndOfInput)),
            },
        };

        self.ensure_user(&user)?;
        let end = self.run(&user)?;
        Ok((Some(user), end))
    }
}
