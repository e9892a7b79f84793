use crate::scene::AssetLimits;

/// Decodes meshes and textures and uploads them wherever the renderer keeps
/// them. The tables only track which ids have been handed over.
pub trait AssetLoader {
    fn load_mesh(&mut self, id: u32) -> Result<(), AssetError>;
    fn load_texture(&mut self, id: u32) -> Result<(), AssetError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("no such mesh id {id} (table holds {count})")]
    NoSuchMesh { id: u32, count: u32 },
    #[error("no such texture id {id} (table holds {count})")]
    NoSuchTexture { id: u32, count: u32 },
    #[error("failed to load {kind} {id}: {reason}")]
    Load {
        kind: &'static str,
        id: u32,
        reason: String,
    },
}

/// Loaded flags for the fixed mesh and texture tables.
pub struct AssetTables {
    meshes: Vec<bool>,
    textures: Vec<bool>,
}

impl AssetTables {
    pub fn new(limits: AssetLimits) -> Self {
        Self {
            meshes: vec![false; limits.mesh_count as usize],
            textures: vec![false; limits.texture_count as usize],
        }
    }

    pub fn mesh_count(&self) -> u32 {
        self.meshes.len() as u32
    }

    pub fn texture_count(&self) -> u32 {
        self.textures.len() as u32
    }

    pub fn is_mesh_loaded(&self, id: u32) -> bool {
        self.meshes.get(id as usize).copied().unwrap_or(false)
    }

    pub fn is_texture_loaded(&self, id: u32) -> bool {
        self.textures.get(id as usize).copied().unwrap_or(false)
    }

    /// Loads mesh `id` unless it already is.
    pub fn ensure_mesh(&mut self, id: u32, loader: &mut dyn AssetLoader) -> Result<(), AssetError> {
        let count = self.mesh_count();
        let loaded = self
            .meshes
            .get_mut(id as usize)
            .ok_or(AssetError::NoSuchMesh { id, count })?;
        if !*loaded {
            log::debug!("Loading mesh {}", id);
            loader.load_mesh(id)?;
            *loaded = true;
        }
        Ok(())
    }

    /// Loads texture `id` unless it already is.
    pub fn ensure_texture(
        &mut self,
        id: u32,
        loader: &mut dyn AssetLoader,
    ) -> Result<(), AssetError> {
        let count = self.texture_count();
        let loaded = self
            .textures
            .get_mut(id as usize)
            .ok_or(AssetError::NoSuchTexture { id, count })?;
        if !*loaded {
            log::debug!("Loading texture {}", id);
            loader.load_texture(id)?;
            *loaded = true;
        }
        Ok(())
    }
}
