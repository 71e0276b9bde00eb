use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::traits::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub starred: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: u64,
    pub artist_id: u64,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub starred: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: u64,
    pub album_id: u64,
    pub title: String,
    #[serde(default)]
    pub track_number: u32,
    pub duration_secs: u32,
    #[serde(default)]
    pub bit_depth: Option<u8>,
    #[serde(default)]
    pub sample_rate_hz: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
}

impl Entity for Artist {
    type Id = u64;

    fn entity_id(&self) -> u64 {
        self.id
    }
}

impl Entity for Album {
    type Id = u64;

    fn entity_id(&self) -> u64 {
        self.id
    }
}

impl Entity for Track {
    type Id = u64;

    fn entity_id(&self) -> u64 {
        self.id
    }
}

/// An in-memory music library snapshot.
///
/// Entities are stored in file order; lookups by id go through indices built
/// once at construction.
#[derive(Debug, Clone, Default)]
pub struct Library {
    artists: Vec<Artist>,
    albums: Vec<Album>,
    tracks: Vec<Track>,
    artist_index: HashMap<u64, usize>,
    album_index: HashMap<u64, usize>,
    albums_by_artist: HashMap<u64, Vec<usize>>,
    tracks_by_album: HashMap<u64, Vec<usize>>,
}

impl Library {
    pub fn new(artists: Vec<Artist>, albums: Vec<Album>, tracks: Vec<Track>) -> Self {
        let artist_index = artists.iter().enumerate().map(|(i, a)| (a.id, i)).collect();
        let album_index = albums.iter().enumerate().map(|(i, a)| (a.id, i)).collect();

        let mut albums_by_artist: HashMap<u64, Vec<usize>> = HashMap::new();
        for (index, album) in albums.iter().enumerate() {
            albums_by_artist.entry(album.artist_id).or_default().push(index);
        }

        let mut tracks_by_album: HashMap<u64, Vec<usize>> = HashMap::new();
        for (index, track) in tracks.iter().enumerate() {
            tracks_by_album.entry(track.album_id).or_default().push(index);
        }
        for indices in tracks_by_album.values_mut() {
            indices.sort_by_key(|&i| (tracks[i].track_number, tracks[i].id));
        }

        Self {
            artists,
            albums,
            tracks,
            artist_index,
            album_index,
            albums_by_artist,
            tracks_by_album,
        }
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn artist(&self, id: u64) -> Option<&Artist> {
        self.artist_index.get(&id).map(|&i| &self.artists[i])
    }

    pub fn album(&self, id: u64) -> Option<&Album> {
        self.album_index.get(&id).map(|&i| &self.albums[i])
    }

    /// Albums of an artist in file order.
    pub fn artist_albums(&self, artist_id: u64) -> impl Iterator<Item = &Album> + '_ {
        self.albums_by_artist
            .get(&artist_id)
            .into_iter()
            .flatten()
            .map(|&i| &self.albums[i])
    }

    /// Tracks of an album ordered by track number.
    pub fn album_tracks(&self, album_id: u64) -> impl Iterator<Item = &Track> + '_ {
        self.tracks_by_album
            .get(&album_id)
            .into_iter()
            .flatten()
            .map(|&i| &self.tracks[i])
    }

    /// Name of the album's artist, or an empty string for dangling references.
    pub fn album_artist_name(&self, album: &Album) -> &str {
        self.artist(album.artist_id).map(|a| a.name.as_str()).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.albums.is_empty() && self.tracks.is_empty()
    }

    /// Total playing time of an album in seconds.
    pub fn album_duration(&self, album_id: u64) -> u32 {
        self.album_tracks(album_id).map(|t| t.duration_secs).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: u64, album_id: u64, track_number: u32) -> Track {
        Track {
            id,
            album_id,
            title: format!("Track {}", id),
            track_number,
            duration_secs: 100,
            bit_depth: None,
            sample_rate_hz: None,
            format: None,
        }
    }

    #[test]
    fn test_album_tracks_sorted_by_number() {
        let library = Library::new(
            vec![Artist { id: 1, name: "Low".into(), starred: false }],
            vec![Album {
                id: 10,
                artist_id: 1,
                title: "Things We Lost in the Fire".into(),
                year: Some(2001),
                cover_art: None,
                starred: false,
            }],
            vec![track(3, 10, 2), track(1, 10, 3), track(2, 10, 1)],
        );

        let ids: Vec<_> = library.album_tracks(10).map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(library.album_duration(10), 300);
        assert_eq!(library.album_artist_name(library.album(10).unwrap()), "Low");
        assert_eq!(library.album_tracks(99).count(), 0);
        assert_eq!(library.artist_albums(1).count(), 1);
        assert_eq!(library.artist_albums(2).count(), 0);
    }
}
