use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{anyhow, Context, Result};
use brotli::Decompressor;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::library::{Album, Artist, Library, Track};

/// Current library file format version.
pub const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryHeader {
    pub version: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryFooter {
    pub total_artists: Option<usize>,
    pub total_albums: Option<usize>,
    pub total_tracks: Option<usize>,
}

/// A parsed library file.
#[derive(Debug, Clone)]
pub struct LibraryData {
    pub header: LibraryHeader,
    pub footer: Option<LibraryFooter>,
    pub library: Library,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LibraryLine {
    Header {
        version: String,
        #[serde(default)]
        metadata: serde_json::Value,
    },
    Artist(Artist),
    Album(Album),
    Track(Track),
    Footer {
        total_artists: Option<usize>,
        total_albums: Option<usize>,
        total_tracks: Option<usize>,
    },
}

/// Parses a library snapshot from disk.
///
/// The file is JSON Lines: a `header` line first, then `artist`, `album`
/// and `track` lines in any order, and an optional `footer` with totals.
/// Paths ending in `.br` are Brotli-decompressed on the fly.
///
/// # Examples
///
/// ```no_run
/// # use rshelf::parse_library;
/// # fn main() -> anyhow::Result<()> {
/// let data = parse_library("library.jsonl.br")?;
/// println!("{} albums", data.library.albums().len());
/// # Ok(())
/// # }
/// ```
pub fn parse_library(file_path: &str) -> Result<LibraryData> {
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open file: {}", file_path))?;

    let reader: Box<dyn BufRead> = if file_path.ends_with(".br") {
        Box::new(BufReader::new(Decompressor::new(file, 4096)))
    } else {
        Box::new(BufReader::new(file))
    };

    let data = read_library(reader)?;
    info!(
        path = file_path,
        artists = data.library.artists().len(),
        albums = data.library.albums().len(),
        tracks = data.library.tracks().len(),
        "loaded library"
    );
    Ok(data)
}

/// Parses a library snapshot from any buffered reader.
pub fn read_library(reader: impl BufRead) -> Result<LibraryData> {
    let mut header: Option<LibraryHeader> = None;
    let mut footer: Option<LibraryFooter> = None;
    let mut artists = Vec::new();
    let mut albums = Vec::new();
    let mut tracks = Vec::new();
    let mut seen_artists = HashSet::new();
    let mut seen_albums = HashSet::new();
    let mut seen_tracks = HashSet::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result
            .with_context(|| format!("Failed to read line {}", line_num + 1))?;

        if line.trim().is_empty() {
            continue;
        }

        let library_line: LibraryLine = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse JSON at line {}", line_num + 1))?;

        match library_line {
            LibraryLine::Header { version, metadata } => {
                if header.is_some() || !(artists.is_empty() && albums.is_empty() && tracks.is_empty()) {
                    return Err(anyhow!("Header must be first line (found at line {})", line_num + 1));
                }
                header = Some(LibraryHeader { version, metadata });
            }

            LibraryLine::Artist(artist) => {
                if !seen_artists.insert(artist.id) {
                    return Err(anyhow!("Duplicate artist ID '{}' at line {}", artist.id, line_num + 1));
                }
                artists.push(artist);
            }

            LibraryLine::Album(album) => {
                if !seen_albums.insert(album.id) {
                    return Err(anyhow!("Duplicate album ID '{}' at line {}", album.id, line_num + 1));
                }
                albums.push(album);
            }

            LibraryLine::Track(track) => {
                if !seen_tracks.insert(track.id) {
                    return Err(anyhow!("Duplicate track ID '{}' at line {}", track.id, line_num + 1));
                }
                tracks.push(track);
            }

            LibraryLine::Footer { total_artists, total_albums, total_tracks } => {
                footer = Some(LibraryFooter {
                    total_artists,
                    total_albums,
                    total_tracks,
                });
            }
        }
    }

    let header = header.ok_or_else(|| anyhow!("Missing header line"))?;

    let dangling_albums = albums.iter().filter(|a| !seen_artists.contains(&a.artist_id)).count();
    let dangling_tracks = tracks.iter().filter(|t| !seen_albums.contains(&t.album_id)).count();
    if dangling_albums > 0 || dangling_tracks > 0 {
        warn!(dangling_albums, dangling_tracks, "library contains references to unknown entities");
    }

    if let Some(footer) = &footer {
        let mismatch = |expected: Option<usize>, actual: usize| expected.is_some_and(|n| n != actual);
        if mismatch(footer.total_artists, artists.len())
            || mismatch(footer.total_albums, albums.len())
            || mismatch(footer.total_tracks, tracks.len())
        {
            warn!(?footer, "footer totals do not match library contents");
        }
    }

    Ok(LibraryData {
        header,
        footer,
        library: Library::new(artists, albums, tracks),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<LibraryData> {
        read_library(text.as_bytes())
    }

    #[test]
    fn test_parse_minimal() {
        let data = parse(concat!(
            r#"{"type":"header","version":"1.0"}"#, "\n",
            r#"{"type":"artist","id":1,"name":"Stereolab"}"#, "\n",
            "\n",
            r#"{"type":"album","id":2,"artist_id":1,"title":"Dots and Loops","year":1997}"#, "\n",
            r#"{"type":"track","id":3,"album_id":2,"title":"Brakhage","track_number":1,"duration_secs":383}"#, "\n",
            r#"{"type":"footer","total_artists":1,"total_albums":1,"total_tracks":1}"#, "\n",
        ))
        .unwrap();

        assert_eq!(data.header.version, "1.0");
        assert_eq!(data.library.album(2).map(|a| a.year), Some(Some(1997)));
        assert_eq!(data.library.album_tracks(2).count(), 1);
        assert_eq!(data.footer.and_then(|f| f.total_tracks), Some(1));
    }

    #[test]
    fn test_missing_header() {
        let err = parse(r#"{"type":"artist","id":1,"name":"Can"}"#).unwrap_err();
        assert!(err.to_string().contains("Missing header"));
    }

    #[test]
    fn test_header_not_first() {
        let err = parse(concat!(
            r#"{"type":"artist","id":1,"name":"Can"}"#, "\n",
            r#"{"type":"header","version":"1.0"}"#, "\n",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_duplicate_id() {
        let err = parse(concat!(
            r#"{"type":"header","version":"1.0"}"#, "\n",
            r#"{"type":"artist","id":1,"name":"Can"}"#, "\n",
            r#"{"type":"artist","id":1,"name":"Neu!"}"#, "\n",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate artist ID '1' at line 3"));
    }

    #[test]
    fn test_bad_json_reports_line() {
        let err = parse(concat!(
            r#"{"type":"header","version":"1.0"}"#, "\n",
            "{not json}\n",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
