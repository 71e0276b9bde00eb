//! Asynchronous library file loading.
//!
//! This module handles loading library files in background threads,
//! keeping the GUI responsive during file I/O operations.

use eframe::egui;
use rshelf::{parse_library, Library, LibraryData, VirtualLibrary};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::warn;

/// Result of a completed loading operation.
pub enum LoadResult {
    /// Loading completed successfully
    Success {
        /// The parsed library file
        data: LibraryData,
        /// Path to the file that was loaded
        path: PathBuf,
    },
    /// Loading failed with an error
    Error(String),
    /// No loading operation in progress
    None,
}

/// Manages asynchronous loading of library files.
///
/// A background thread parses the file and sends the result through a
/// channel; the GUI thread polls it once per frame.
pub struct AsyncLoader {
    /// Set while a background load is running
    in_progress: Arc<AtomicBool>,

    /// Channel receiver for loading results
    loading_receiver: Option<Receiver<Result<LibraryData, String>>>,

    /// Path of the file currently being loaded
    pending_load_path: Option<PathBuf>,
}

impl AsyncLoader {
    /// Creates a new async loader with no active loading operation.
    pub fn new() -> Self {
        Self {
            in_progress: Arc::new(AtomicBool::new(false)),
            loading_receiver: None,
            pending_load_path: None,
        }
    }

    /// Checks if a loading operation is currently in progress.
    pub fn is_loading(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Starts loading a library file asynchronously from the specified path.
    ///
    /// Call `check_completion()` once per frame to pick up the result.
    /// `ctx` is used to request a repaint when loading completes.
    pub fn start_file_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.loading_receiver = Some(receiver);
        self.in_progress.store(true, Ordering::Release);
        self.pending_load_path = Some(path.clone());

        let in_progress = Arc::clone(&self.in_progress);
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = match path.to_str() {
                Some(path_str) => parse_library(path_str).map_err(|e| format!("{:#}", e)),
                None => Err(format!("Path is not valid UTF-8: {}", path.display())),
            };

            if let Err(error) = &result {
                warn!(path = %path.display(), %error, "failed to load library");
            }

            let _ = sender.send(result);
            in_progress.store(false, Ordering::Release);
            ctx_handle.request_repaint();
        });
    }

    /// Generates the demo library in-memory.
    ///
    /// Generation is fast enough to run synchronously on the GUI thread.
    pub fn load_demo_library(&self) -> Library {
        VirtualLibrary::new().generate()
    }

    /// Checks if background loading has completed and returns the result if available.
    pub fn check_completion(&mut self) -> LoadResult {
        let Some(receiver) = &self.loading_receiver else {
            return LoadResult::None;
        };
        let Ok(result) = receiver.try_recv() else {
            return LoadResult::None;
        };

        self.loading_receiver = None;
        let path = self.pending_load_path.take();
        match (result, path) {
            (Ok(data), Some(path)) => LoadResult::Success { data, path },
            (Ok(_), None) => LoadResult::Error("Load finished without a pending path".to_string()),
            (Err(error_msg), _) => LoadResult::Error(error_msg),
        }
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}
