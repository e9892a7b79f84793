mod camera;
pub mod pick;
pub mod ray;

pub use camera::{frustum, CameraField, OrbitCamera, Projection, ScrollDirection};
pub use pick::{ObjectPicker, PickOutcome, PickPixel, PickTag, TagTarget};
pub use ray::{placement_point, Ray};

use crate::assets::{AssetError, AssetLoader, AssetTables};
use crate::scene::{rotation_matrix, SceneObject, SceneState, LIGHT_INDICES};
use glam::{Mat4, Vec3, Vec4};

/// Base colour boost applied to every object's material products.
const MATERIAL_GAIN: f32 = 4.0;

/// Per-frame values shared by every draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Mat4,
    pub view: Mat4,
    /// First light, a point light, in eye space.
    pub light_position: Vec4,
    /// Second light, a directional light (w = 0), in eye space.
    pub light2_position: Vec4,
    pub light_rgb_bright: Vec3,
    pub light2_rgb_bright: Vec3,
    /// Spotlight axis of the first light, in eye space.
    pub light_rotation: Vec4,
    pub spread: f32,
}

/// Everything the external shader needs for one object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectUniforms {
    pub model_view: Mat4,
    pub ambient_product: Vec3,
    pub diffuse_product: Vec3,
    pub specular_product: Vec3,
    pub shininess: f32,
    pub texture_scale: f32,
    pub mesh_id: u32,
    pub texture_id: u32,
}

/// Draw submission, implemented outside the core.
pub trait SceneRenderer {
    fn begin_frame(&mut self, frame: &FrameUniforms);
    fn draw_object(&mut self, index: usize, object: &ObjectUniforms);
    fn end_frame(&mut self);
}

pub fn frame_uniforms(scene: &SceneState, projection: Mat4) -> FrameUniforms {
    let view = scene.camera.view();
    let light1 = scene.objects.get(LIGHT_INDICES[0]);
    let light2 = scene.objects.get(LIGHT_INDICES[1]);

    let light_position = light1.map_or(Vec4::ZERO, |light| view * light.position);
    let light2_position = light2.map_or(Vec4::ZERO, |light| {
        view * light.position.truncate().extend(0.0)
    });
    let light_rotation = light1.map_or(Vec4::ZERO, |light| {
        view * rotation_matrix(light.angles) * Vec4::Y
    });

    FrameUniforms {
        projection,
        view,
        light_position,
        light2_position,
        light_rgb_bright: light1.map_or(Vec3::ZERO, |light| light.rgb * light.brightness),
        light2_rgb_bright: light2.map_or(Vec3::ZERO, |light| light.rgb * light.brightness),
        light_rotation,
        spread: scene.light_spread().clamp(-1.0, 1.0),
    }
}

pub fn object_uniforms(view: &Mat4, object: &SceneObject) -> ObjectUniforms {
    let rgb = object.rgb * object.brightness * MATERIAL_GAIN;
    ObjectUniforms {
        model_view: *view * object.model_matrix(),
        ambient_product: rgb * object.ambient,
        diffuse_product: rgb * object.diffuse,
        specular_product: rgb * object.specular,
        shininess: object.shine,
        texture_scale: object.texture_scale,
        mesh_id: object.mesh_id,
        texture_id: object.texture_id,
    }
}

/// Draws every live object once, loading meshes and textures on first use.
pub fn render_scene(
    scene: &SceneState,
    projection: Mat4,
    assets: &mut AssetTables,
    loader: &mut dyn AssetLoader,
    renderer: &mut dyn SceneRenderer,
) -> Result<(), AssetError> {
    let frame = frame_uniforms(scene, projection);
    renderer.begin_frame(&frame);
    for (index, object) in scene.objects.objects().iter().enumerate() {
        assets.ensure_texture(object.texture_id, loader)?;
        assets.ensure_mesh(object.mesh_id, loader)?;
        renderer.draw_object(index, &object_uniforms(&frame.view, object));
    }
    renderer.end_frame();
    Ok(())
}
