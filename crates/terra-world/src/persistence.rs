//! Save state: world seed and focus position.
//!
//! Storage is an explicit collaborator implementing [`SaveStore`]; nothing in
//! the world crate reaches for a global save location.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use terra_common::{PersistenceError, SchemaVersion};
use tracing::{debug, info};

/// Result type for save operations.
pub type SaveResult<T> = Result<T, PersistenceError>;

/// Everything needed to resume a world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Schema version of this record
    #[serde(default)]
    pub version: SchemaVersion,
    /// World seed
    pub world_seed: i32,
    /// Focus X in world units
    pub focus_x: f32,
    /// Focus Y in world units
    pub focus_y: f32,
}

impl SaveData {
    /// Creates save data for a seed and focus position.
    #[must_use]
    pub fn new(world_seed: i32, focus: Vec2) -> Self {
        Self {
            version: SchemaVersion::SAVE_DATA,
            world_seed,
            focus_x: focus.x,
            focus_y: focus.y,
        }
    }

    /// Returns the saved focus position.
    #[must_use]
    pub fn focus(&self) -> Vec2 {
        Vec2::new(self.focus_x, self.focus_y)
    }

    /// Rejects data written by an incompatible schema.
    pub fn check_version(&self) -> SaveResult<()> {
        if SchemaVersion::SAVE_DATA.can_read(&self.version) {
            Ok(())
        } else {
            Err(PersistenceError::VersionMismatch {
                expected: SchemaVersion::SAVE_DATA.to_string(),
                actual: self.version.to_string(),
            })
        }
    }
}

/// Durable storage for [`SaveData`].
pub trait SaveStore {
    /// Returns whether a save exists.
    fn has_save(&self) -> bool;

    /// Loads the save, or `None` when there is none.
    fn load(&self) -> SaveResult<Option<SaveData>>;

    /// Writes the save, replacing any previous one.
    fn save(&mut self, data: &SaveData) -> SaveResult<()>;

    /// Removes the save if present.
    fn delete(&mut self) -> SaveResult<()>;
}

/// Keeps the save in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Stored record
    data: Option<SaveData>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `data`.
    #[must_use]
    pub fn with_data(data: SaveData) -> Self {
        Self { data: Some(data) }
    }
}

impl SaveStore for MemoryStore {
    fn has_save(&self) -> bool {
        self.data.is_some()
    }

    fn load(&self) -> SaveResult<Option<SaveData>> {
        if let Some(data) = &self.data {
            data.check_version()?;
        }
        Ok(self.data)
    }

    fn save(&mut self, data: &SaveData) -> SaveResult<()> {
        self.data = Some(*data);
        Ok(())
    }

    fn delete(&mut self) -> SaveResult<()> {
        self.data = None;
        Ok(())
    }
}

/// Stores the save as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Save file path
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store writing to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the save file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the temp path for atomic writes.
    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }
}

impl SaveStore for JsonFileStore {
    fn has_save(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> SaveResult<Option<SaveData>> {
        if !self.has_save() {
            debug!("No save at {}", self.path.display());
            return Ok(None);
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let data: SaveData = serde_json::from_reader(reader)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        data.check_version()?;

        info!(
            "Loaded save: seed={}, focus=({}, {})",
            data.world_seed, data.focus_x, data.focus_y
        );
        Ok(Some(data))
    }

    fn save(&mut self, data: &SaveData) -> SaveResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file, then rename over the old save
        let temp_path = self.temp_path();
        {
            let mut writer = BufWriter::new(File::create(&temp_path)?);
            serde_json::to_writer_pretty(&mut writer, data)
                .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
            writer.flush()?;
        }
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            PersistenceError::Io(e)
        })?;

        info!(
            "Saved game: seed={}, focus=({}, {})",
            data.world_seed, data.focus_x, data.focus_y
        );
        Ok(())
    }

    fn delete(&mut self) -> SaveResult<()> {
        if self.has_save() {
            fs::remove_file(&self.path)?;
            info!("Deleted save {}", self.path.display());
        }
        Ok(())
    }
}
