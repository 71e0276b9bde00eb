//! Library grouping.
//!
//! Builds the groups each library view hands to its virtual list:
//! - albums and artists bucketed by initial (`A`..`Z`, `#` for the rest)
//! - tracks grouped per album, albums ordered by artist, year and title
//!
//! An optional text filter narrows the members; a bucket left with nothing
//! in it is dropped entirely, so navigating to it becomes a no-op.

use std::cmp::Ordering;

use crate::library::{Album, Artist, Library, Track};
use crate::traits::Group;

/// Bucket label for a name: its first alphanumeric character, uppercased.
///
/// Names starting with a digit, or with no alphanumeric character at all,
/// land in `#`.
pub fn initial_bucket(name: &str) -> String {
    match name.chars().find(|c| c.is_alphanumeric()) {
        Some(c) if c.is_alphabetic() => c.to_uppercase().collect(),
        _ => "#".to_string(),
    }
}

/// Case-insensitive substring filter; `None` or blank matches everything.
#[derive(Debug, Clone, Default)]
pub struct TextFilter {
    needle: Option<String>,
}

impl TextFilter {
    pub fn new(query: &str) -> Self {
        let query = query.trim();
        Self {
            needle: (!query.is_empty()).then(|| query.to_lowercase()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    pub fn matches(&self, text: &str) -> bool {
        match &self.needle {
            Some(needle) => text.to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Buckets name-sorted entities by the initial of `name`.
///
/// `#` always sorts before the letters. A name whose first character is not
/// alphanumeric sorts by its full text but buckets by a later character, so
/// entities are regrouped by bucket (keeping name order inside each) before
/// runs are cut; every bucket yields exactly one group.
fn bucket_by_initial<T>(prefix: &str, sorted: Vec<T>, name: impl Fn(&T) -> &str) -> Vec<Group<T>> {
    let mut keyed: Vec<(String, T)> = sorted
        .into_iter()
        .map(|entity| (initial_bucket(name(&entity)), entity))
        .collect();
    // Stable, so the incoming name order survives within a bucket
    keyed.sort_by(|(a, _), (b, _)| (a.as_str() != "#", a).cmp(&(b.as_str() != "#", b)));

    let mut groups: Vec<Group<T>> = Vec::new();
    for (bucket, entity) in keyed {
        match groups.last_mut() {
            Some(group) if group.label == bucket => group.members.push(entity),
            _ => groups.push(Group::new(format!("{}:{}", prefix, bucket), bucket, vec![entity])),
        }
    }

    groups
}

/// Albums bucketed by the initial of their title.
pub fn album_groups_by_initial(library: &Library, filter: &TextFilter) -> Vec<Group<Album>> {
    let mut albums: Vec<Album> = library
        .albums()
        .iter()
        .filter(|album| filter.matches(&album.title) || filter.matches(library.album_artist_name(album)))
        .cloned()
        .collect();
    albums.sort_by(|a, b| compare_names(&a.title, &b.title).then(a.year.cmp(&b.year)));
    bucket_by_initial("albums", albums, |album| album.title.as_str())
}

/// Artists bucketed by the initial of their name.
pub fn artist_groups_by_initial(library: &Library, filter: &TextFilter) -> Vec<Group<Artist>> {
    let mut artists: Vec<Artist> = library
        .artists()
        .iter()
        .filter(|artist| filter.matches(&artist.name))
        .cloned()
        .collect();
    artists.sort_by(|a, b| compare_names(&a.name, &b.name));
    bucket_by_initial("artists", artists, |artist| artist.name.as_str())
}

/// Header label of an album group.
pub fn album_label(library: &Library, album: &Album) -> String {
    let artist = library.album_artist_name(album);
    match album.year {
        Some(year) => format!("{} — {} ({})", artist, album.title, year),
        None => format!("{} — {}", artist, album.title),
    }
}

/// One group per album holding its tracks in track-number order.
///
/// With an active filter, an album whose label matches keeps all its tracks;
/// otherwise only matching tracks are kept and albums left empty are dropped.
/// Without a filter, albums with no tracks are kept as empty groups.
pub fn track_groups_by_album(library: &Library, filter: &TextFilter) -> Vec<Group<Track>> {
    let mut albums: Vec<&Album> = library.albums().iter().collect();
    albums.sort_by(|a, b| {
        compare_names(library.album_artist_name(a), library.album_artist_name(b))
            .then(a.year.cmp(&b.year))
            .then_with(|| compare_names(&a.title, &b.title))
    });

    albums
        .into_iter()
        .filter_map(|album| {
            let label = album_label(library, album);
            let label_matches = filter.matches(&label);
            let tracks: Vec<Track> = library
                .album_tracks(album.id)
                .filter(|track| label_matches || filter.matches(&track.title))
                .cloned()
                .collect();

            if filter.is_active() && tracks.is_empty() {
                return None;
            }
            Some(Group::new(format!("album:{}", album.id), label, tracks))
        })
        .collect()
}
