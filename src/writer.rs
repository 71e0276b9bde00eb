use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use anyhow::{Result, Context};
use brotli::enc::BrotliEncoderParams;
use brotli::CompressorWriter;

use crate::library::{Album, Artist, Library, Track};
use crate::reader::FORMAT_VERSION;

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LineRef<'a> {
    Header {
        version: &'a str,
        metadata: &'a serde_json::Value,
    },
    Artist(&'a Artist),
    Album(&'a Album),
    Track(&'a Track),
    Footer {
        total_artists: usize,
        total_albums: usize,
        total_tracks: usize,
    },
}

pub struct LibraryWriter {
    writer: Box<dyn Write>,
    artist_count: usize,
    album_count: usize,
    track_count: usize,
}

impl LibraryWriter {
    /// Creates a new LibraryWriter for the specified file path.
    ///
    /// Brotli compression is enabled when the path ends with `.br`
    /// (e.g. `library.jsonl.br`), using quality 6 and a 4 MiB window.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use rshelf::LibraryWriter;
    /// # fn main() -> anyhow::Result<()> {
    /// let mut writer = LibraryWriter::new("library.jsonl.br")?;
    /// writer.write_header(serde_json::json!({ "tool": "example" }))?;
    /// writer.write_footer()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(file_path: &str) -> Result<Self> {
        let file = File::create(file_path)
            .with_context(|| format!("Failed to create file: {}", file_path))?;

        let writer: Box<dyn Write> = if file_path.ends_with(".br") {
            let buf_writer = BufWriter::new(file);
            let params = BrotliEncoderParams {
                quality: 6,
                lgwin: 22,
                ..Default::default()
            };
            Box::new(CompressorWriter::with_params(buf_writer, 4096, &params))
        } else {
            Box::new(BufWriter::new(file))
        };

        Ok(LibraryWriter {
            writer,
            artist_count: 0,
            album_count: 0,
            track_count: 0,
        })
    }

    pub fn write_header(&mut self, metadata: serde_json::Value) -> Result<()> {
        self.write_line(&LineRef::Header {
            version: FORMAT_VERSION,
            metadata: &metadata,
        })
    }

    pub fn write_artist(&mut self, artist: &Artist) -> Result<()> {
        self.write_line(&LineRef::Artist(artist))?;
        self.artist_count += 1;
        Ok(())
    }

    pub fn write_album(&mut self, album: &Album) -> Result<()> {
        self.write_line(&LineRef::Album(album))?;
        self.album_count += 1;
        Ok(())
    }

    pub fn write_track(&mut self, track: &Track) -> Result<()> {
        self.write_line(&LineRef::Track(track))?;
        self.track_count += 1;
        Ok(())
    }

    /// Writes the footer with the totals written so far and flushes.
    pub fn write_footer(&mut self) -> Result<()> {
        self.write_line(&LineRef::Footer {
            total_artists: self.artist_count,
            total_albums: self.album_count,
            total_tracks: self.track_count,
        })?;

        self.writer.flush()
            .context("Failed to flush writer")?;

        Ok(())
    }

    /// Writes a complete library: header, all entities and the footer.
    pub fn write_library(&mut self, library: &Library, metadata: serde_json::Value) -> Result<()> {
        self.write_header(metadata)?;
        for artist in library.artists() {
            self.write_artist(artist)?;
        }
        for album in library.albums() {
            self.write_album(album)?;
        }
        for track in library.tracks() {
            self.write_track(track)?;
        }
        self.write_footer()
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .context("Failed to serialize to JSON")?;

        writeln!(self.writer, "{}", json)
            .context("Failed to write line")?;

        Ok(())
    }
}

impl Drop for LibraryWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
