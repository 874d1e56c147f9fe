//! Persistence store for the meta-progression record.
//!
//! The on-disk format is an opaque checksummed binary file:
//! - Version magic (8 bytes)
//! - Data length (4 bytes)
//! - Bincode-serialized record (variable length)
//! - SHA256 checksum over the preceding bytes (32 bytes)
//!
//! Any corruption (wrong magic, bad checksum, undecodable payload) is
//! reported as an absent record so the ledger falls back to a fresh
//! default; the corrupt data is never propagated.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::constants::{SAVE_FILE_NAME, SAVE_VERSION_MAGIC};

use super::types::MetaProgressionRecord;

/// Backing store for the single durable record.
pub trait ProgressStore {
    /// Loads the record. `None` means absent or unreadable; the caller
    /// starts fresh.
    fn load(&mut self) -> Option<MetaProgressionRecord>;

    /// Persists the record.
    fn save(&mut self, record: &MetaProgressionRecord) -> io::Result<()>;
}

/// Checksummed binary file store in the platform data directory.
pub struct FileStore {
    save_path: PathBuf,
}

impl FileStore {
    /// Creates a store at the platform-appropriate location.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "holdout").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory")
        })?;

        let data_dir = project_dirs.data_dir();
        fs::create_dir_all(data_dir)?;

        Ok(Self {
            save_path: data_dir.join(SAVE_FILE_NAME),
        })
    }

    /// Creates a store at an explicit path. Used by tests and embedders
    /// that manage their own save location.
    pub fn at_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    fn read_record(&self) -> io::Result<MetaProgressionRecord> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);

        if version != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl ProgressStore for FileStore {
    fn load(&mut self) -> Option<MetaProgressionRecord> {
        if !self.save_exists() {
            return None;
        }
        match self.read_record() {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("discarding unreadable progress save: {}", e);
                None
            }
        }
    }

    fn save(&mut self, record: &MetaProgressionRecord) -> io::Result<()> {
        let data = bincode::serialize(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        Ok(())
    }
}

/// In-memory store for tests and headless simulations.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Option<MetaProgressionRecord>,
    /// Number of successful saves, for asserting write-through behavior.
    pub save_count: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with an existing record.
    pub fn with_record(record: MetaProgressionRecord) -> Self {
        Self {
            record: Some(record),
            save_count: 0,
        }
    }

    pub fn stored(&self) -> Option<&MetaProgressionRecord> {
        self.record.as_ref()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&mut self) -> Option<MetaProgressionRecord> {
        self.record.clone()
    }

    fn save(&mut self, record: &MetaProgressionRecord) -> io::Result<()> {
        self.record = Some(record.clone());
        self.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store(name: &str) -> FileStore {
        let path = std::env::temp_dir().join(format!(
            "holdout_store_test_{}_{}.dat",
            std::process::id(),
            name
        ));
        fs::remove_file(&path).ok();
        FileStore::at_path(path)
    }

    #[test]
    fn test_file_store_roundtrip() {
        let mut store = scratch_store("roundtrip");

        let mut record = MetaProgressionRecord::fresh();
        record.total_games_played = 3;
        record.total_enemies_killed = 250;
        record.meta_currency = 1234;
        record.enemy_kill_counts.insert("Fast Enemy".to_string(), 99);
        record.unlocked_cosmetics.insert("Golden Armor".to_string());

        store.save(&record).expect("save should succeed");
        let loaded = store.load().expect("load should find the record");
        assert_eq!(loaded, record);

        fs::remove_file(&store.save_path).ok();
    }

    #[test]
    fn test_missing_file_loads_none() {
        let mut store = scratch_store("missing");
        assert!(store.load().is_none());
    }

    #[test]
    fn test_corrupt_file_loads_none() {
        let mut store = scratch_store("corrupt");
        fs::write(&store.save_path, b"definitely not a save file").unwrap();

        assert!(store.load().is_none());

        fs::remove_file(&store.save_path).ok();
    }

    #[test]
    fn test_tampered_payload_fails_checksum() {
        let mut store = scratch_store("tampered");

        let record = MetaProgressionRecord::fresh();
        store.save(&record).unwrap();

        // Flip a byte in the payload region.
        let mut bytes = fs::read(&store.save_path).unwrap();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        fs::write(&store.save_path, &bytes).unwrap();

        assert!(store.load().is_none());

        fs::remove_file(&store.save_path).ok();
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryStore::new();
        assert!(store.load().is_none());

        let record = MetaProgressionRecord::fresh();
        store.save(&record).unwrap();
        store.save(&record).unwrap();

        assert_eq!(store.save_count, 2);
        assert_eq!(store.load().unwrap(), record);
    }
}
