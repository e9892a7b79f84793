//! Flat binary scene files.
//!
//! Layout, native byte order, no padding:
//!
//! | field            | type           |
//! |------------------|----------------|
//! | camera distance  | `f32`          |
//! | camera yaw       | `f32`          |
//! | camera pitch     | `f32`          |
//! | light spread     | `f32`          |
//! | object count     | `i32`          |
//! | objects          | `count` × [`SceneObjectRecord`] |
//!
//! There is no version tag or checksum. Reading validates the count, the
//! record length and the asset ids so a foreign or truncated file never
//! reaches the live scene.

use crate::render::OrbitCamera;
use crate::scene::{AssetLimits, SceneError, SceneObject, SceneState, MAX_OBJECTS};
use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("scene file ends early")]
    Truncated,
    #[error("scene file holds {0} objects (allowed 0..={MAX_OBJECTS})")]
    ObjectCount(i32),
    #[error("scene file rejected: {0}")]
    Scene(#[from] SceneError),
}

pub type Result<T> = std::result::Result<T, SerializationError>;

/// On-disk form of a [`SceneObject`], 76 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SceneObjectRecord {
    pub position: [f32; 4],
    pub scale: f32,
    pub angles: [f32; 3],
    pub diffuse: f32,
    pub specular: f32,
    pub ambient: f32,
    pub shine: f32,
    pub rgb: [f32; 3],
    pub brightness: f32,
    pub mesh_id: i32,
    pub texture_id: i32,
    pub texture_scale: f32,
}

pub const HEADER_SIZE: usize = 4 * std::mem::size_of::<f32>() + std::mem::size_of::<i32>();
pub const RECORD_SIZE: usize = std::mem::size_of::<SceneObjectRecord>();

impl From<&SceneObject> for SceneObjectRecord {
    fn from(object: &SceneObject) -> Self {
        Self {
            position: object.position.to_array(),
            scale: object.scale,
            angles: object.angles,
            diffuse: object.diffuse,
            specular: object.specular,
            ambient: object.ambient,
            shine: object.shine,
            rgb: object.rgb.to_array(),
            brightness: object.brightness,
            mesh_id: object.mesh_id as i32,
            texture_id: object.texture_id as i32,
            texture_scale: object.texture_scale,
        }
    }
}

impl SceneObjectRecord {
    fn into_object(self, limits: AssetLimits) -> Result<SceneObject> {
        let mesh_id = u32::try_from(self.mesh_id).map_err(|_| SceneError::InvalidMesh {
            id: self.mesh_id as u32,
            count: limits.mesh_count,
        })?;
        let texture_id = u32::try_from(self.texture_id).map_err(|_| SceneError::InvalidTexture {
            id: self.texture_id as u32,
            count: limits.texture_count,
        })?;
        let object = SceneObject {
            position: Vec4::from_array(self.position),
            scale: self.scale,
            angles: self.angles,
            diffuse: self.diffuse,
            specular: self.specular,
            ambient: self.ambient,
            shine: self.shine,
            rgb: Vec3::from_array(self.rgb),
            brightness: self.brightness,
            mesh_id,
            texture_id,
            texture_scale: self.texture_scale,
        };
        limits.check(&object)?;
        Ok(object)
    }
}

pub fn write_scene<W: Write>(scene: &SceneState, writer: &mut W) -> Result<()> {
    let objects = scene.objects.objects();
    writer.write_all(&scene.camera.distance.to_ne_bytes())?;
    writer.write_all(&scene.camera.yaw_deg.to_ne_bytes())?;
    writer.write_all(&scene.camera.pitch_deg.to_ne_bytes())?;
    writer.write_all(&scene.light_spread().to_ne_bytes())?;
    writer.write_all(&(objects.len() as i32).to_ne_bytes())?;

    let records: Vec<SceneObjectRecord> = objects.iter().map(SceneObjectRecord::from).collect();
    writer.write_all(bytemuck::cast_slice(&records))?;
    Ok(())
}

/// Reads a whole scene. Asset ids are checked against `limits`.
pub fn read_scene<R: Read>(reader: &mut R, limits: AssetLimits) -> Result<SceneState> {
    let distance = read_f32(reader)?;
    let yaw_deg = read_f32(reader)?;
    let pitch_deg = read_f32(reader)?;
    let light_spread = read_f32(reader)?;
    let count = i32::from_ne_bytes(read_array(reader)?);
    let len = usize::try_from(count)
        .ok()
        .filter(|len| *len <= MAX_OBJECTS)
        .ok_or(SerializationError::ObjectCount(count))?;

    let mut records = vec![SceneObjectRecord::zeroed(); len];
    read_exact(reader, bytemuck::cast_slice_mut(&mut records))?;
    let objects = records
        .into_iter()
        .map(|record| record.into_object(limits))
        .collect::<Result<Vec<_>>>()?;

    let mut scene = SceneState::new(
        OrbitCamera {
            distance,
            yaw_deg,
            pitch_deg,
        },
        limits,
    );
    scene.set_light_spread(light_spread);
    scene.objects.replace(objects)?;
    Ok(scene)
}

pub fn save_scene_to_file(scene: &SceneState, path: &Path) -> Result<()> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE + RECORD_SIZE * scene.objects.len());
    write_scene(scene, &mut bytes)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

pub fn load_scene_from_file(path: &Path, limits: AssetLimits) -> Result<SceneState> {
    let bytes = std::fs::read(path)?;
    read_scene(&mut bytes.as_slice(), limits)
}

fn read_f32<R: Read>(reader: &mut R) -> Result<f32> {
    Ok(f32::from_ne_bytes(read_array(reader)?))
}

fn read_array<R: Read>(reader: &mut R) -> Result<[u8; 4]> {
    let mut buf = [0u8; 4];
    read_exact(reader, &mut buf)?;
    Ok(buf)
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|err| match err.kind() {
        std::io::ErrorKind::UnexpectedEof => SerializationError::Truncated,
        _ => SerializationError::Io(err),
    })
}
