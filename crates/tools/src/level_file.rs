//! Saved level descriptors: the three seeds plus the grid shape.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use dungeon_core::LevelDescriptor;

pub const LEVEL_FILE_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LevelFile {
    pub format_version: u32,
    pub level: LevelDescriptor,
    /// xxh3 of the generated level, checked on load when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<u64>,
}

impl LevelFile {
    pub fn new(level: LevelDescriptor, fingerprint: u64) -> Self {
        Self { format_version: LEVEL_FILE_FORMAT_VERSION, level, fingerprint: Some(fingerprint) }
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if file.format_version != LEVEL_FILE_FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported level file format version {}", file.format_version),
            ));
        }
        Ok(file)
    }
}
