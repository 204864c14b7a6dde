//! Recommendation and popularity queries over a [`Store`].
//!
//! Every function here is a pure read of the store; printing is left to
//! [`crate::session`] and the one-shot commands in `main`.

use crate::store::{PreferenceSet, Store};
use anyhow::{anyhow, Result};
use log::{debug, trace};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Number of artists shown by [`most_popular`] unless configured otherwise.
pub const DEFAULT_POPULAR_LIMIT: usize = 3;

/// Outcome of [`recommendations`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    /// No other public user shares an artist and has something new to offer.
    Unavailable,
    /// Artists liked by `source` that the requester doesn't have yet.
    Found { source: String, artists: Vec<String> },
}

/// An artist and the number of public users who like it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistCount {
    pub artist: String,
    pub count: usize,
}

/// Count of artists present in both sets.
#[must_use]
pub fn overlap(target: &HashSet<&str>, other: &PreferenceSet) -> usize {
    other.iter().filter(|artist| target.contains(artist)).count()
}

/// Recommend artists from the single most similar public user.
///
/// # Selection
///
/// Users are scanned in store order, skipping `user` itself and private users.
/// A candidate replaces the current best only when its overlap is strictly
/// greater than the best so far (starting at 0) and is not equal to the size
/// of the candidate's own set. The second rule rejects candidates whose whole
/// set the requester already likes, since they have nothing to add. Ties go
/// to whoever was scanned first.
///
/// # Errors
///
/// Returns an error if `user` is not in the store.
///
/// # Examples
///
/// ```
/// use musicrec::algorithm::{recommendations, Recommendation};
/// use musicrec::store::{PreferenceSet, Store};
///
/// let store: Store = [
///     ("alice", ["Adele", "Muse"].into_iter().collect::<PreferenceSet>()),
///     ("bob", ["Adele", "Muse", "Queen"].into_iter().collect()),
/// ]
/// .into_iter()
/// .collect();
///
/// let rec = recommendations("alice", &store)?;
/// assert_eq!(rec, Recommendation::Found {
///     source: "bob".to_string(),
///     artists: vec!["Queen".to_string()],
/// });
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn recommendations(user: &str, store: &Store) -> Result<Recommendation> {
    let target = store
        .get(user)
        .ok_or_else(|| anyhow!("User `{user}` not found"))?;
    let target_set: HashSet<&str> = target.iter().collect();

    let mut best: Option<(&str, &PreferenceSet)> = None;
    let mut best_overlap = 0;

    for (candidate, prefs) in store.public() {
        if candidate.name() == user {
            continue;
        }

        let shared = overlap(&target_set, prefs);
        trace!("Overlap between `{user}` and `{candidate}`: {shared}/{}", prefs.len());

        if shared > best_overlap && shared != prefs.len() {
            best = Some((candidate.name(), prefs));
            best_overlap = shared;
        }
    }

    let Some((source, prefs)) = best else {
        debug!("No qualifying neighbour for `{user}`");
        return Ok(Recommendation::Unavailable);
    };

    debug!("Best neighbour for `{user}` is `{source}` with {best_overlap} shared artists");
    let artists = prefs
        .iter()
        .filter(|artist| !target_set.contains(artist))
        .map(str::to_owned)
        .collect();

    Ok(Recommendation::Found {
        source: source.to_owned(),
        artists,
    })
}

/// Rank every artist by how many public users like it, most popular first.
///
/// Artists with equal counts keep the order in which they were first seen
/// while scanning the store.
#[must_use]
pub fn most_popular_ranked(store: &Store) -> Vec<ArtistCount> {
    let mut ranking: Vec<ArtistCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (_, prefs) in store.public() {
        for artist in prefs.iter() {
            match index.get(artist) {
                Some(&idx) => ranking[idx].count += 1,
                None => {
                    index.insert(artist, ranking.len());
                    ranking.push(ArtistCount {
                        artist: artist.to_owned(),
                        count: 1,
                    });
                }
            }
        }
    }

    // `sort_by` is stable, which preserves first-seen order among ties.
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking
}

/// The top `limit` entries of [`most_popular_ranked`].
///
/// Empty when no public user likes any artist.
#[must_use]
pub fn most_popular(store: &Store, limit: usize) -> Vec<ArtistCount> {
    let mut ranking = most_popular_ranked(store);
    ranking.truncate(limit);
    ranking
}

/// How many public users like the most popular artist.
///
/// `None` when no public user likes any artist.
#[must_use]
pub fn highest_popularity(store: &Store) -> Option<usize> {
    most_popular_ranked(store).first().map(|top| top.count)
}

/// Every public user whose preference set is the largest, in store order.
#[must_use]
pub fn most_likes_users(store: &Store) -> Vec<String> {
    let Some(max) = store.public().map(|(_, prefs)| prefs.len()).max() else {
        return Vec::new();
    };

    store
        .public()
        .filter(|(_, prefs)| prefs.len() == max)
        .map(|(user, _)| user.name().to_owned())
        .collect()
}
