//! # Preference Store
//!
//! In-memory data model shared by every other module:
//!
//! - [`UserId`] - a user name plus its privacy flag
//! - [`PreferenceSet`] - sorted, duplicate-free, title-cased artist names
//! - [`PreferenceBuilder`] - incremental construction with duplicate rejection
//! - [`Store`] - ordered mapping from user to preference set
//!
//! ## Privacy
//!
//! A user name ending in [`PRIVATE_MARKER`] is private. The flag is computed
//! once when the [`UserId`] is built and never re-parsed at query sites.
//!
//! ## Iteration Order
//!
//! [`Store`] iterates users in the order they were loaded from the file, with
//! users created during a session appended at the end. Replacing a user's
//! preferences keeps their position. Tie-breaking in [`crate::algorithm`]
//! depends on this order.

use serde::Serialize;
use std::fmt;

/// Suffix that marks a user's preferences as private.
pub const PRIVATE_MARKER: char = '$';

/// Characters the flat file format cannot represent inside a name.
pub const RESERVED_CHARS: [char; 3] = [':', ',', '\n'];

/// Normalize an artist name to title case.
///
/// The first letter following a non-letter (or the start of the string) is
/// upper-cased and every other letter is lower-cased, so `"ac/dc"` becomes
/// `"Ac/Dc"` and `"2pac"` becomes `"2Pac"`.
#[must_use]
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_cased = false;

    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(ch);
            prev_cased = false;
        }
    }

    out
}

/// Returns true if `name` contains a character the file format reserves.
#[must_use]
pub fn has_reserved_chars(name: &str) -> bool {
    name.contains(RESERVED_CHARS)
}

/// A user name with its derived privacy flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UserId {
    name: String,
    private: bool,
}

impl UserId {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let private = name.ends_with(PRIVATE_MARKER);
        Self { name, private }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Private users are left out of every cross-user query.
    pub const fn is_private(&self) -> bool {
        self.private
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Sorted, duplicate-free list of title-cased artist names.
///
/// Only constructible through normalization, so every instance upholds the
/// sorting and uniqueness invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PreferenceSet(Vec<String>);

impl PreferenceSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Binary search; the set is always sorted.
    pub fn contains(&self, artist: &str) -> bool {
        self.0.binary_search_by(|probe| probe.as_str().cmp(artist)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for PreferenceSet {
    /// Title-cases, sorts and de-duplicates. Blank names are dropped.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut artists: Vec<String> = iter
            .into_iter()
            .map(|raw| raw.as_ref().trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map(|raw| title_case(&raw))
            .collect();
        artists.sort();
        artists.dedup();
        Self(artists)
    }
}

/// What happened to one entry offered to a [`PreferenceBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The normalized name was added.
    Added(String),
    /// The normalized name was already present.
    Duplicate(String),
    /// The name contains `:` or `,` and cannot be stored.
    Reserved,
    /// The entry was blank after trimming.
    Blank,
}

/// Collects artist names one at a time, rejecting duplicates.
#[derive(Debug, Default)]
pub struct PreferenceBuilder {
    artists: Vec<String>,
}

impl PreferenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, raw: &str) -> AddOutcome {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return AddOutcome::Blank;
        }
        if has_reserved_chars(trimmed) {
            return AddOutcome::Reserved;
        }

        let artist = title_case(trimmed);
        if self.artists.contains(&artist) {
            AddOutcome::Duplicate(artist)
        } else {
            self.artists.push(artist.clone());
            AddOutcome::Added(artist)
        }
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    #[must_use]
    pub fn finish(mut self) -> PreferenceSet {
        self.artists.sort();
        PreferenceSet(self.artists)
    }
}

/// Ordered mapping from user to preference set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    entries: Vec<(UserId, PreferenceSet)>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(user, _)| user.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&PreferenceSet> {
        self.position(name).map(|idx| &self.entries[idx].1)
    }

    /// Replace the user's preferences, or append a new user at the end.
    ///
    /// Returns the previous set if the user already existed.
    pub fn set(&mut self, name: &str, prefs: PreferenceSet) -> Option<PreferenceSet> {
        match self.position(name) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, prefs)),
            None => {
                self.entries.push((UserId::new(name), prefs));
                None
            }
        }
    }

    /// All users in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &PreferenceSet)> + '_ {
        self.entries.iter().map(|(user, prefs)| (user, prefs))
    }

    /// Users without the privacy marker, in store order.
    pub fn public(&self) -> impl Iterator<Item = (&UserId, &PreferenceSet)> + '_ {
        self.iter().filter(|(user, _)| !user.is_private())
    }
}

impl<N: AsRef<str>> FromIterator<(N, PreferenceSet)> for Store {
    fn from_iter<I: IntoIterator<Item = (N, PreferenceSet)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (name, prefs) in iter {
            store.set(name.as_ref(), prefs);
        }
        store
    }
}
