use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Cumulative counter persisted across runs, guarded by a CRC so a torn or
/// hand-edited file restores as "nothing saved" instead of a bogus total.
/// Stored at ~/.local/share/geigermon/counter.json.
#[derive(Debug, Serialize, Deserialize)]
struct SavedCounter {
    count:    u64,
    saved_at: i64,
    crc:      u32,
}

impl SavedCounter {
    fn checksum(count: u64, saved_at: i64) -> u32 {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&count.to_le_bytes());
        bytes[8..].copy_from_slice(&saved_at.to_le_bytes());
        crc32(&bytes)
    }

    fn is_valid(&self) -> bool {
        self.crc == Self::checksum(self.count, self.saved_at)
    }
}

pub fn state_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("geigermon").join("counter.json"))
}

/// Restore the saved cumulative count. Missing, unreadable, or
/// checksum-failing files all yield `None`.
pub fn load() -> Option<u64> {
    state_path().and_then(|p| load_from(&p))
}

pub fn load_from(path: &Path) -> Option<u64> {
    let text = fs::read_to_string(path).ok()?;
    let saved: SavedCounter = serde_json::from_str(&text).ok()?;
    if saved.is_valid() { Some(saved.count) } else { None }
}

/// Persist the cumulative count (best-effort).
pub fn save(count: u64) {
    if let Some(path) = state_path() {
        save_to(&path, count);
    }
}

pub fn save_to(path: &Path, count: u64) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let saved_at = chrono::Local::now().timestamp();
    let saved = SavedCounter {
        count,
        saved_at,
        crc: SavedCounter::checksum(count, saved_at),
    };
    if let Ok(json) = serde_json::to_string(&saved) {
        let _ = fs::write(path, json);
    }
}

/// Delete the saved counter, so the next run starts the series from zero.
pub fn forget() {
    if let Some(path) = state_path() {
        let _ = fs::remove_file(path);
    }
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFF_u32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB8_8320;
            } else {
                crc >>= 1;
            }
        }
    }
    !crc
}
