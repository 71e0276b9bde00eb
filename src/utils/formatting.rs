//! Text formatting utilities for the library viewer.
//!
//! This module provides helper functions for formatting values in a human-readable way.

use sysinfo::{System, RefreshKind, ProcessRefreshKind, Pid};
use rshelf::Track;

/// Formats a count with thousands separators.
///
/// # Examples
/// ```ignore
/// assert_eq!(format_count(1000), "1,000");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

/// Formats a duration in seconds as `m:ss`, or `h:mm:ss` from one hour up.
pub fn format_duration(secs: u32) -> String {
    let (hours, minutes, seconds) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Short quality badge for a track, e.g. `FLAC 24/96` or `MP3`.
///
/// Returns `None` when the track carries no format information.
pub fn quality_badge(track: &Track) -> Option<String> {
    let format = track.format.as_deref()?.to_uppercase();
    match (track.bit_depth, track.sample_rate_hz) {
        (Some(bits), Some(rate)) => {
            let khz = rate as f32 / 1000.0;
            if khz.fract() == 0.0 {
                Some(format!("{} {}/{}", format, bits, khz as u32))
            } else {
                Some(format!("{} {}/{:.1}", format, bits, khz))
            }
        }
        _ => Some(format),
    }
}

/// Gets the current process memory usage in megabytes.
///
/// Returns 0.0 if the process information cannot be retrieved.
pub fn get_current_memory_mb() -> f64 {
    let mut sys = System::new_with_specifics(
        RefreshKind::new().with_processes(ProcessRefreshKind::new().with_memory())
    );
    sys.refresh_processes_specifics(ProcessRefreshKind::new().with_memory());

    sys.process(Pid::from_u32(std::process::id()))
        .map(|process| process.memory() as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

/// Formats memory usage in MB as a human-readable string.
pub fn format_memory_mb(memory_mb: f64) -> String {
    if memory_mb > 1024.0 {
        format!("Memory: {:.2} GB", memory_mb / 1024.0)
    } else {
        format!("Memory: {:.1} MB", memory_mb)
    }
}
