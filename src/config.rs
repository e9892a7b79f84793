use crate::render::{OrbitCamera, Projection};
use crate::scene::AssetLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Editor settings, read from an optional JSON file. Missing keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Entries in the external mesh table.
    pub mesh_count: u32,
    /// Entries in the external texture table.
    pub texture_count: u32,
    pub save_dir: PathBuf,
    pub save_prefix: String,
    pub save_slots: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    /// Fixed seed for texture and starter-mesh choices.
    pub rng_seed: Option<u64>,
    pub camera: OrbitCamera,
    pub projection: Projection,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mesh_count: 56,
            texture_count: 31,
            save_dir: PathBuf::from("."),
            save_prefix: "sceneSave".to_string(),
            save_slots: 5,
            window_width: 960,
            window_height: 640,
            title: "Scene Editor".to_string(),
            rng_seed: None,
            camera: OrbitCamera::default(),
            projection: Projection::default(),
        }
    }
}

impl EditorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Ground square and light sphere ids must exist.
        if self.mesh_count <= crate::scene::SPHERE_MESH {
            return Err(ConfigError::Invalid(format!(
                "mesh_count {} does not cover the light mesh {}",
                self.mesh_count,
                crate::scene::SPHERE_MESH
            )));
        }
        if self.texture_count == 0 {
            return Err(ConfigError::Invalid("texture_count must be positive".into()));
        }
        if self.save_slots == 0 {
            return Err(ConfigError::Invalid("save_slots must be positive".into()));
        }
        Ok(())
    }

    pub fn asset_limits(&self) -> AssetLimits {
        AssetLimits {
            mesh_count: self.mesh_count,
            texture_count: self.texture_count,
        }
    }

    /// Path of save slot `slot` (1-based), `None` past the configured count.
    pub fn slot_path(&self, slot: u32) -> Option<PathBuf> {
        if slot == 0 || slot > self.save_slots {
            return None;
        }
        Some(
            self.save_dir
                .join(format!("{}{}.sav", self.save_prefix, slot)),
        )
    }
}
