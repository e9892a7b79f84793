pub mod serialization;

use crate::render::OrbitCamera;
use glam::{Mat4, Vec3, Vec4};

/// Upper bound on live objects, ground and lights included.
pub const MAX_OBJECTS: usize = 1024;
/// Indices below this are the ground (0) and the two lights (1, 2).
pub const NUM_LIGHTS_AND_GROUND: usize = 3;
pub const GROUND_INDEX: usize = 0;
pub const LIGHT_INDICES: [usize; 2] = [1, 2];

/// Mesh id of the unit square used for the ground.
pub const GROUND_MESH: u32 = 0;
/// Mesh id of the unit sphere used for light markers.
pub const SPHERE_MESH: u32 = 55;

const DEFAULT_SCALE: f32 = 0.005;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("scene is full ({MAX_OBJECTS} objects)")]
    CapacityExhausted,
    #[error("object index {index} out of range (live count {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("object {0} is the ground or a light and cannot be removed")]
    ReservedObject(usize),
    #[error("no such mesh id {id} (table holds {count})")]
    InvalidMesh { id: u32, count: u32 },
    #[error("no such texture id {id} (table holds {count})")]
    InvalidTexture { id: u32, count: u32 },
}

/// Sizes of the externally owned mesh and texture tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetLimits {
    pub mesh_count: u32,
    pub texture_count: u32,
}

impl AssetLimits {
    pub fn check(&self, object: &SceneObject) -> Result<(), SceneError> {
        if object.mesh_id >= self.mesh_count {
            return Err(SceneError::InvalidMesh {
                id: object.mesh_id,
                count: self.mesh_count,
            });
        }
        if object.texture_id >= self.texture_count {
            return Err(SceneError::InvalidTexture {
                id: object.texture_id,
                count: self.texture_count,
            });
        }
        Ok(())
    }
}

/// One placed mesh with its transform and material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    /// Homogeneous position, w is always 1.
    pub position: Vec4,
    pub scale: f32,
    /// Rotations about X, Y and Z in degrees.
    pub angles: [f32; 3],
    pub diffuse: f32,
    pub specular: f32,
    pub ambient: f32,
    pub shine: f32,
    pub rgb: Vec3,
    /// Multiplies all colours.
    pub brightness: f32,
    pub mesh_id: u32,
    pub texture_id: u32,
    pub texture_scale: f32,
}

impl SceneObject {
    /// Defaults for a freshly added object sitting at `position`.
    pub fn placed(mesh_id: u32, texture_id: u32, position: Vec4) -> Self {
        let scale = if mesh_id == GROUND_MESH || mesh_id == SPHERE_MESH {
            1.0
        } else {
            DEFAULT_SCALE
        };
        Self {
            position: position.truncate().extend(1.0),
            scale,
            angles: [0.0, 180.0, 0.0],
            diffuse: 1.0,
            specular: 0.5,
            ambient: 0.7,
            shine: 10.0,
            rgb: Vec3::splat(0.7),
            brightness: 1.0,
            mesh_id,
            texture_id,
            texture_scale: 2.0,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        compose_transform_matrix(self.position.truncate(), self.angles, self.scale)
    }

    pub fn field(&self, field: ObjectField) -> f32 {
        match field {
            ObjectField::PositionX => self.position.x,
            ObjectField::PositionY => self.position.y,
            ObjectField::PositionZ => self.position.z,
            ObjectField::Scale => self.scale,
            ObjectField::AngleX => self.angles[0],
            ObjectField::AngleY => self.angles[1],
            ObjectField::AngleZ => self.angles[2],
            ObjectField::Diffuse => self.diffuse,
            ObjectField::Specular => self.specular,
            ObjectField::Ambient => self.ambient,
            ObjectField::Shine => self.shine,
            ObjectField::Red => self.rgb.x,
            ObjectField::Green => self.rgb.y,
            ObjectField::Blue => self.rgb.z,
            ObjectField::Brightness => self.brightness,
            ObjectField::TextureScale => self.texture_scale,
        }
    }

    pub fn field_mut(&mut self, field: ObjectField) -> &mut f32 {
        match field {
            ObjectField::PositionX => &mut self.position.x,
            ObjectField::PositionY => &mut self.position.y,
            ObjectField::PositionZ => &mut self.position.z,
            ObjectField::Scale => &mut self.scale,
            ObjectField::AngleX => &mut self.angles[0],
            ObjectField::AngleY => &mut self.angles[1],
            ObjectField::AngleZ => &mut self.angles[2],
            ObjectField::Diffuse => &mut self.diffuse,
            ObjectField::Specular => &mut self.specular,
            ObjectField::Ambient => &mut self.ambient,
            ObjectField::Shine => &mut self.shine,
            ObjectField::Red => &mut self.rgb.x,
            ObjectField::Green => &mut self.rgb.y,
            ObjectField::Blue => &mut self.rgb.z,
            ObjectField::Brightness => &mut self.brightness,
            ObjectField::TextureScale => &mut self.texture_scale,
        }
    }
}

/// Names a single float attribute of a [`SceneObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectField {
    PositionX,
    PositionY,
    PositionZ,
    Scale,
    AngleX,
    AngleY,
    AngleZ,
    Diffuse,
    Specular,
    Ambient,
    Shine,
    Red,
    Green,
    Blue,
    Brightness,
    TextureScale,
}

/// Fixed-capacity, densely packed object array.
///
/// Deleting swaps the last live object into the freed slot, so indices of
/// non-reserved objects are not stable across deletions.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObjectStore {
    objects: Vec<SceneObject>,
    limits: AssetLimits,
}

impl SceneObjectStore {
    pub fn new(limits: AssetLimits) -> Self {
        Self {
            objects: Vec::with_capacity(MAX_OBJECTS),
            limits,
        }
    }

    pub fn limits(&self) -> AssetLimits {
        self.limits
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.objects.len() >= MAX_OBJECTS
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn get(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(index)
    }

    pub fn set(&mut self, index: usize, object: SceneObject) -> Result<(), SceneError> {
        self.limits.check(&object)?;
        let len = self.objects.len();
        let slot = self
            .objects
            .get_mut(index)
            .ok_or(SceneError::IndexOutOfRange { index, len })?;
        *slot = object;
        Ok(())
    }

    /// Appends `object` and returns its index.
    pub fn add(&mut self, object: SceneObject) -> Result<usize, SceneError> {
        if self.is_full() {
            return Err(SceneError::CapacityExhausted);
        }
        self.limits.check(&object)?;
        self.objects.push(object);
        Ok(self.objects.len() - 1)
    }

    /// Appends an exact copy of the object at `index`.
    pub fn duplicate(&mut self, index: usize) -> Result<usize, SceneError> {
        let object = *self.get(index).ok_or(SceneError::IndexOutOfRange {
            index,
            len: self.objects.len(),
        })?;
        self.add(object)
    }

    pub fn delete(&mut self, index: usize) -> Result<(), SceneError> {
        if index < NUM_LIGHTS_AND_GROUND {
            return Err(SceneError::ReservedObject(index));
        }
        if index >= self.objects.len() {
            return Err(SceneError::IndexOutOfRange {
                index,
                len: self.objects.len(),
            });
        }
        self.objects.swap_remove(index);
        Ok(())
    }

    /// Replaces the whole content, validating count and asset ids first.
    pub fn replace(&mut self, objects: Vec<SceneObject>) -> Result<(), SceneError> {
        if objects.len() > MAX_OBJECTS {
            return Err(SceneError::CapacityExhausted);
        }
        for object in &objects {
            self.limits.check(object)?;
        }
        self.objects = objects;
        Ok(())
    }

    pub fn ground(&self) -> Option<&SceneObject> {
        self.get(GROUND_INDEX)
    }

    pub fn has_reserved(&self) -> bool {
        self.objects.len() >= NUM_LIGHTS_AND_GROUND
    }
}

impl std::ops::Index<usize> for SceneObjectStore {
    type Output = SceneObject;

    fn index(&self, index: usize) -> &SceneObject {
        &self.objects[index]
    }
}

/// Everything that gets saved: camera, spotlight spread and the objects.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub camera: OrbitCamera,
    light_spread: f32,
    pub objects: SceneObjectStore,
}

impl SceneState {
    pub fn new(camera: OrbitCamera, limits: AssetLimits) -> Self {
        Self {
            camera,
            light_spread: -1.0,
            objects: SceneObjectStore::new(limits),
        }
    }

    /// Spotlight cone parameter: -1 lights everything, 1 lights nothing.
    pub fn light_spread(&self) -> f32 {
        self.light_spread
    }

    pub fn set_light_spread(&mut self, spread: f32) {
        self.light_spread = spread;
        self.clamp_light_spread();
    }

    pub fn light_spread_mut(&mut self) -> &mut f32 {
        &mut self.light_spread
    }

    pub fn clamp_light_spread(&mut self) {
        self.light_spread = self.light_spread.clamp(-1.0, 1.0);
    }
}

/// Rotation `Rz * Ry * Rx` from angles in degrees.
pub fn rotation_matrix(angles_deg: [f32; 3]) -> Mat4 {
    Mat4::from_rotation_z(angles_deg[2].to_radians())
        * Mat4::from_rotation_y(angles_deg[1].to_radians())
        * Mat4::from_rotation_x(angles_deg[0].to_radians())
}

/// Scale first, then rotate about X, Y, Z, then translate.
pub fn compose_transform_matrix(position: Vec3, rotation_deg: [f32; 3], scale: f32) -> Mat4 {
    Mat4::from_translation(position) * rotation_matrix(rotation_deg) * Mat4::from_scale(Vec3::splat(scale))
}
