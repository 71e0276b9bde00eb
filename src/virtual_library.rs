use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::library::{Album, Artist, Library, Track};

const DEFAULT_ARTISTS: usize = 200;
const DEFAULT_ALBUMS_PER_ARTIST: (usize, usize) = (1, 8);
const DEFAULT_TRACKS_PER_ALBUM: (usize, usize) = (4, 16);

const ADJECTIVES: &[&str] = &[
    "Silent", "Electric", "Golden", "Broken", "Velvet", "Hollow", "Crimson", "Distant",
    "Northern", "Paper", "Glass", "Wild", "Quiet", "Neon", "Frozen", "Lunar",
];

const NOUNS: &[&str] = &[
    "Harbor", "Engine", "Garden", "Signal", "Mirror", "Orchard", "Tide", "Circuit",
    "Lantern", "Canyon", "Static", "Meadow", "Satellite", "River", "Parade", "Ember",
];

const TRACK_WORDS: &[&str] = &[
    "Morning", "Drift", "Weight", "Coast", "Echo", "Pulse", "Shelter", "Fade",
    "Motion", "Haze", "Return", "Spiral", "Glow", "Shadow", "Window", "Wire",
];

const FORMATS: &[(&str, Option<u8>, Option<u32>)] = &[
    ("flac", Some(16), Some(44_100)),
    ("flac", Some(24), Some(96_000)),
    ("flac", Some(24), Some(192_000)),
    ("mp3", None, Some(44_100)),
    ("opus", None, Some(48_000)),
];

/// Deterministic synthetic library for demos, benchmarks and tests.
///
/// The same seed and sizes always produce the same library.
pub struct VirtualLibrary {
    artists: usize,
    albums_per_artist: (usize, usize),
    tracks_per_album: (usize, usize),
    seed: u64,
}

impl Default for VirtualLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualLibrary {
    pub fn new() -> Self {
        Self {
            artists: DEFAULT_ARTISTS,
            albums_per_artist: DEFAULT_ALBUMS_PER_ARTIST,
            tracks_per_album: DEFAULT_TRACKS_PER_ALBUM,
            seed: 42,
        }
    }

    /// Ranges are inclusive; a range whose max is below its min is treated as `min..=min`.
    pub fn with_config(
        artists: usize,
        albums_per_artist: (usize, usize),
        tracks_per_album: (usize, usize),
        seed: u64,
    ) -> Self {
        Self {
            artists,
            albums_per_artist,
            tracks_per_album,
            seed,
        }
    }

    pub fn generate(&self) -> Library {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut artists = Vec::with_capacity(self.artists);
        let mut albums = Vec::new();
        let mut tracks = Vec::new();
        let mut next_id = 1u64;

        for _ in 0..self.artists {
            let artist = Artist {
                id: next_id,
                name: band_name(&mut rng),
                starred: rng.gen_bool(0.1),
            };
            next_id += 1;

            for _ in 0..pick(&mut rng, self.albums_per_artist) {
                let album = Album {
                    id: next_id,
                    artist_id: artist.id,
                    title: album_title(&mut rng),
                    year: Some(rng.gen_range(1965..=2025)),
                    cover_art: None,
                    starred: rng.gen_bool(0.05),
                };
                next_id += 1;

                let (format, bit_depth, sample_rate_hz) = FORMATS[rng.gen_range(0..FORMATS.len())];
                for track_number in 1..=pick(&mut rng, self.tracks_per_album) {
                    tracks.push(Track {
                        id: next_id,
                        album_id: album.id,
                        title: track_title(&mut rng),
                        track_number: track_number as u32,
                        duration_secs: rng.gen_range(90..=600),
                        bit_depth,
                        sample_rate_hz,
                        format: Some(format.to_string()),
                    });
                    next_id += 1;
                }
                albums.push(album);
            }
            artists.push(artist);
        }

        Library::new(artists, albums, tracks)
    }
}

fn pick(rng: &mut StdRng, (min, max): (usize, usize)) -> usize {
    rng.gen_range(min..=max.max(min))
}

fn word<'a>(rng: &mut StdRng, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or("Untitled")
}

fn band_name(rng: &mut StdRng) -> String {
    match rng.gen_range(0..4) {
        0 => format!("The {} {}s", word(rng, ADJECTIVES), word(rng, NOUNS)),
        1 => format!("{} {}", word(rng, NOUNS), word(rng, NOUNS)),
        2 => format!("{} {}", rng.gen_range(2..=999), word(rng, NOUNS)),
        _ => format!("{} {}", word(rng, ADJECTIVES), word(rng, NOUNS)),
    }
}

fn album_title(rng: &mut StdRng) -> String {
    match rng.gen_range(0..3) {
        0 => word(rng, NOUNS).to_string(),
        1 => format!("{} {}", word(rng, ADJECTIVES), word(rng, NOUNS)),
        _ => format!("{} of the {}", word(rng, TRACK_WORDS), word(rng, NOUNS)),
    }
}

fn track_title(rng: &mut StdRng) -> String {
    match rng.gen_range(0..3) {
        0 => word(rng, TRACK_WORDS).to_string(),
        1 => format!("{} {}", word(rng, ADJECTIVES), word(rng, TRACK_WORDS)),
        _ => format!("{} ({})", word(rng, TRACK_WORDS), word(rng, NOUNS)),
    }
}
