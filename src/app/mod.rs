mod input;
mod menu;
mod timing;
pub mod tool;

pub use input::{key_action, mouse_button_action, scroll_action, InputAction};
pub use menu::{array_menu, main_menu, MenuItem};
pub use timing::FrameTiming;
pub use tool::{LightSlot, ToolBinding, ToolChannel, ToolMode, ToolPair, ToolTarget};

use crate::assets::{AssetError, AssetLoader, AssetTables};
use crate::config::{ConfigError, EditorConfig};
use crate::render::{
    placement_point, render_scene, ObjectPicker, PickOutcome, PickPixel, SceneRenderer,
    TagTarget,
};
use crate::scene::serialization::{load_scene_from_file, save_scene_to_file, SerializationError};
use crate::scene::{
    SceneError, SceneObject, SceneState, GROUND_INDEX, GROUND_MESH, NUM_LIGHTS_AND_GROUND,
    SPHERE_MESH,
};

use glam::{Mat4, Vec2, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::ModifiersState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    SelectTool(ToolMode),
    AddObject { mesh_id: u32 },
    Duplicate,
    Delete,
    SetTexture(u32),
    SetGroundTexture(u32),
    Save(u32),
    Load(u32),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Exit,
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Owns the scene and everything needed to edit it from mouse and menu input.
pub struct EditorSession {
    config: EditorConfig,
    scene: SceneState,
    current: Option<usize>,
    tool: ToolBinding,
    mode: Option<ToolMode>,
    picker: ObjectPicker,
    assets: AssetTables,
    timing: FrameTiming,
    rng: StdRng,
    cursor: Vec2,
    modifiers: ModifiersState,
    width: u32,
    height: u32,
}

impl EditorSession {
    /// Starts with the ground, both lights and one random mesh, in camera
    /// rotate mode.
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let limits = config.asset_limits();
        let width = config.window_width.max(1);
        let height = config.window_height.max(1);

        let mut session = Self {
            scene: SceneState::new(config.camera, limits),
            current: None,
            tool: ToolBinding::new(),
            mode: None,
            picker: ObjectPicker::new(),
            assets: AssetTables::new(limits),
            timing: FrameTiming::new(config.title.clone(), Instant::now()),
            rng,
            cursor: Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
            modifiers: ModifiersState::empty(),
            width,
            height,
            config,
        };
        session.populate_initial_scene()?;
        Ok(session)
    }

    fn populate_initial_scene(&mut self) -> Result<(), EditorError> {
        let mut ground = SceneObject::placed(GROUND_MESH, self.random_texture(), Vec4::W);
        ground.scale = 10.0;
        ground.angles[0] = 90.0;
        ground.texture_scale = 5.0;
        self.scene.objects.add(ground)?;

        for (position, scale) in [
            (Vec4::new(2.0, 1.0, 1.0, 1.0), 0.1),
            (Vec4::new(-2.0, 2.0, -2.0, 1.0), 0.2),
        ] {
            let mut light = SceneObject::placed(SPHERE_MESH, 0, position);
            light.scale = scale;
            light.brightness = 0.2;
            self.scene.objects.add(light)?;
        }

        let starter = self.rng.random_range(0..self.config.mesh_count);
        self.add_object(starter)?;
        self.select_mode(ToolMode::CameraRotate);
        log::info!(
            "Scene initialised with {} objects (starter mesh {})",
            self.scene.objects.len(),
            starter
        );
        Ok(())
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn mode(&self) -> Option<ToolMode> {
        self.mode
    }

    pub fn tool(&self) -> &ToolBinding {
        &self.tool
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn projection(&self) -> Mat4 {
        self.config.projection.matrix(self.width, self.height)
    }

    fn random_texture(&mut self) -> u32 {
        self.rng.random_range(0..self.config.texture_count)
    }

    /// Cursor in [0, 1] with y up, the space tool deltas are measured in.
    fn cursor_normalized(&self) -> Vec2 {
        Vec2::new(
            self.cursor.x / self.width as f32,
            1.0 - self.cursor.y / self.height as f32,
        )
    }

    fn cursor_ndc(&self) -> Vec2 {
        self.cursor_normalized() * 2.0 - Vec2::ONE
    }

    fn pick_pixel(&self) -> PickPixel {
        PickPixel::from_screen(self.cursor.x, self.cursor.y, self.width, self.height)
    }

    // ---- tools ----

    /// Current object if it is one the user may edit.
    fn editable_current(&self) -> Option<usize> {
        self.current
            .filter(|&index| index >= NUM_LIGHTS_AND_GROUND && index < self.scene.objects.len())
    }

    /// Binds `mode`, or leaves the tool alone when it needs a selection and
    /// there is none.
    fn bind_mode(&mut self, mode: ToolMode) -> bool {
        let selected = self.editable_current();
        let Some((primary, secondary)) = mode.pairs(self.scene.camera.yaw_deg, selected) else {
            return false;
        };
        self.tool.clear();
        self.tool.activate(primary, secondary);
        self.mode = Some(mode);
        true
    }

    fn select_mode(&mut self, mode: ToolMode) {
        if !self.bind_mode(mode) {
            log::debug!("{:?} needs a selected object, keeping {:?}", mode, self.mode);
        }
    }

    /// Binds the active mode again after a structural edit or a selection
    /// change.
    fn rebind(&mut self) {
        let Some(mode) = self.mode else {
            self.tool.clear();
            return;
        };
        if !self.bind_mode(mode) {
            self.tool.clear();
            self.mode = None;
        }
    }

    // ---- structural edits ----

    /// Adds `mesh_id` on the ground under the cursor and selects it.
    pub fn add_object(&mut self, mesh_id: u32) -> Result<Option<usize>, EditorError> {
        self.tool.clear();
        let Some(ground) = self.scene.objects.ground().copied() else {
            log::warn!("Cannot place mesh {} without a ground object", mesh_id);
            self.rebind();
            return Ok(None);
        };
        let position = placement_point(
            self.cursor_ndc(),
            &self.scene.camera.view(),
            &self.projection(),
            &ground,
        );
        let texture_id = self.random_texture();
        let object = SceneObject::placed(mesh_id, texture_id, position);
        match self.scene.objects.add(object) {
            Ok(index) => {
                log::debug!("Added mesh {} as object {}", mesh_id, index);
                self.current = Some(index);
                self.select_mode(ToolMode::PositionScale);
                Ok(Some(index))
            }
            Err(SceneError::CapacityExhausted) => {
                log::debug!("Scene full, mesh {} not added", mesh_id);
                self.rebind();
                Ok(None)
            }
            Err(err) => {
                self.rebind();
                Err(err.into())
            }
        }
    }

    fn duplicate_current(&mut self) -> Result<(), EditorError> {
        let Some(index) = self.editable_current() else {
            return Ok(());
        };
        self.tool.clear();
        match self.scene.objects.duplicate(index) {
            Ok(copy) => {
                self.current = Some(copy);
                self.select_mode(ToolMode::PositionScale);
                Ok(())
            }
            Err(SceneError::CapacityExhausted) => {
                log::debug!("Scene full, object {} not duplicated", index);
                self.rebind();
                Ok(())
            }
            Err(err) => {
                self.rebind();
                Err(err.into())
            }
        }
    }

    fn delete_current(&mut self) -> Result<(), EditorError> {
        let Some(index) = self.editable_current() else {
            return Ok(());
        };
        self.tool.clear();
        if let Err(err) = self.scene.objects.delete(index) {
            self.rebind();
            return Err(err.into());
        }
        log::debug!("Deleted object {}", index);
        self.current = None;
        self.select_mode(ToolMode::CameraRotate);
        Ok(())
    }

    /// Picks under the cursor and returns the object the command should act on.
    ///
    /// A new selection moves the active tool onto it.
    fn pick_target(&mut self, target: &mut dyn TagTarget) -> Option<usize> {
        let outcome = self
            .picker
            .pick(&self.scene.objects, self.pick_pixel(), target);
        if let PickOutcome::Reserved(index) = outcome {
            log::debug!("Pick hit reserved object {}, keeping selection", index);
        }
        let previous = self.current;
        self.current = outcome.resolve(previous);
        if self.current != previous {
            self.rebind();
        }
        self.editable_current()
    }

    // ---- commands ----

    /// Runs a menu command. Commands that edit an object first pick the one
    /// under the cursor.
    pub fn execute(
        &mut self,
        command: EditorCommand,
        target: &mut dyn TagTarget,
    ) -> Result<CommandOutcome, EditorError> {
        match command {
            EditorCommand::SelectTool(mode) => {
                if mode.needs_selection() {
                    self.pick_target(target);
                }
                self.select_mode(mode);
            }
            EditorCommand::AddObject { mesh_id } => {
                self.add_object(mesh_id)?;
            }
            EditorCommand::Duplicate => {
                if self.pick_target(target).is_some() {
                    self.duplicate_current()?;
                }
            }
            EditorCommand::Delete => {
                if self.pick_target(target).is_some() {
                    self.delete_current()?;
                }
            }
            EditorCommand::SetTexture(texture_id) => {
                if let Some(index) = self.pick_target(target) {
                    self.set_texture(index, texture_id)?;
                }
            }
            EditorCommand::SetGroundTexture(texture_id) => {
                self.set_texture(GROUND_INDEX, texture_id)?;
            }
            EditorCommand::Save(slot) => self.save_slot(slot),
            EditorCommand::Load(slot) => self.load_slot(slot),
            EditorCommand::Exit => {
                log::info!("Exit requested");
                return Ok(CommandOutcome::Exit);
            }
        }
        Ok(CommandOutcome::Continue)
    }

    fn set_texture(&mut self, index: usize, texture_id: u32) -> Result<(), EditorError> {
        let Some(mut object) = self.scene.objects.get(index).copied() else {
            return Ok(());
        };
        object.texture_id = texture_id;
        self.scene.objects.set(index, object)?;
        Ok(())
    }

    // ---- persistence ----

    pub fn save_slot(&mut self, slot: u32) {
        let Some(path) = self.config.slot_path(slot) else {
            log::warn!("No save slot {}", slot);
            return;
        };
        match save_scene_to_file(&self.scene, &path) {
            Ok(()) => log::info!("Scene saved to {:?}", path),
            Err(e) => log::warn!("Failed to save scene to {:?}: {}", path, e),
        }
    }

    pub fn load_slot(&mut self, slot: u32) {
        let Some(path) = self.config.slot_path(slot) else {
            log::warn!("No save slot {}", slot);
            return;
        };
        let loaded = match load_scene_from_file(&path, self.config.asset_limits()) {
            Ok(loaded) => loaded,
            Err(SerializationError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No saved scene at {:?}", path);
                return;
            }
            Err(e) => {
                log::warn!("Failed to load scene from {:?}: {}", path, e);
                return;
            }
        };
        if loaded.objects.len() < NUM_LIGHTS_AND_GROUND {
            log::warn!(
                "Ignoring {:?}: {} objects, the ground and both lights are required",
                path,
                loaded.objects.len()
            );
            return;
        }

        self.tool.clear();
        self.scene = loaded;
        // A file holding only the ground and lights leaves nothing selected.
        self.current = Some(self.scene.objects.len() - 1)
            .filter(|&index| index >= NUM_LIGHTS_AND_GROUND);
        self.select_mode(ToolMode::CameraRotate);
        log::info!(
            "Scene loaded from {:?} ({} objects)",
            path,
            self.scene.objects.len()
        );
    }

    // ---- input ----

    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    /// Cursor moved to window pixel `(x, y)`, origin top-left.
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = Vec2::new(x, y);
        if self.tool.engaged().is_some() {
            let cursor = self.cursor_normalized();
            self.tool.update(&mut self.scene, cursor);
        }
    }

    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match mouse_button_action(button, state, self.modifiers) {
            Some(InputAction::Engage(channel)) => {
                let cursor = self.cursor_normalized();
                self.tool.engage(channel, cursor);
            }
            Some(InputAction::Release) => self.tool.release(),
            _ => {}
        }
    }

    pub fn scroll(&mut self, delta: MouseScrollDelta) {
        if let Some(InputAction::Zoom(direction)) = scroll_action(delta) {
            self.scene.camera.zoom(direction);
        }
    }

    pub fn reshape(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        log::debug!("Viewport resized to {}x{}", self.width, self.height);
    }

    /// Routes a window event. Only the exit key and close button end the
    /// session.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> CommandOutcome {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, shutting down...");
                return CommandOutcome::Exit;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if key_action(event.physical_key, event.state) == Some(InputAction::Exit) {
                    log::info!("Escape pressed, shutting down...");
                    return CommandOutcome::Exit;
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => self.set_modifiers(modifiers.state()),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_button(*button, *state),
            WindowEvent::MouseWheel { delta, .. } => self.scroll(*delta),
            WindowEvent::Resized(size) => self.reshape(size.width, size.height),
            _ => {}
        }
        CommandOutcome::Continue
    }

    // ---- drawing ----

    pub fn render_frame(
        &mut self,
        loader: &mut dyn AssetLoader,
        renderer: &mut dyn SceneRenderer,
    ) -> Result<(), EditorError> {
        let projection = self.projection();
        render_scene(&self.scene, projection, &mut self.assets, loader, renderer)?;
        self.timing.frame_drawn();
        Ok(())
    }

    /// Window title with the frame rate, once per second.
    pub fn frame_title(&mut self, now: Instant) -> Option<String> {
        self.timing.update(now, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{FrameUniforms, ObjectUniforms, PickTag, ScrollDirection};
    use crate::scene::serialization::write_scene;
    use crate::scene::MAX_OBJECTS;
    use std::path::PathBuf;

    /// Tag buffer where only `covering` is under the cursor.
    struct CoverTarget {
        covering: Option<usize>,
        stencil: u8,
    }

    impl CoverTarget {
        fn over(index: usize) -> Self {
            Self {
                covering: Some(index),
                stencil: 0,
            }
        }

        fn empty() -> Self {
            Self {
                covering: None,
                stencil: 0,
            }
        }
    }

    impl TagTarget for CoverTarget {
        fn begin_pass(&mut self, _pixel: PickPixel) {
            self.stencil = 0;
        }

        fn draw_tagged(&mut self, index: usize, _object: &SceneObject, tag: PickTag) {
            if Some(index) == self.covering {
                self.stencil = tag.raw();
            }
        }

        fn read_tag(&mut self, _pixel: PickPixel) -> Option<PickTag> {
            Some(PickTag::from_raw(self.stencil))
        }
    }

    struct NullLoader;

    impl AssetLoader for NullLoader {
        fn load_mesh(&mut self, _id: u32) -> Result<(), AssetError> {
            Ok(())
        }

        fn load_texture(&mut self, _id: u32) -> Result<(), AssetError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingRenderer {
        draws: usize,
    }

    impl SceneRenderer for CountingRenderer {
        fn begin_frame(&mut self, _frame: &FrameUniforms) {}

        fn draw_object(&mut self, _index: usize, _object: &ObjectUniforms) {
            self.draws += 1;
        }

        fn end_frame(&mut self) {}
    }

    fn temp_save_dir() -> PathBuf {
        let nonce = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let dir = std::env::temp_dir().join(format!(
            "scene_editor_session_{}_{}",
            std::process::id(),
            nonce
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn session() -> EditorSession {
        EditorSession::new(EditorConfig {
            rng_seed: Some(42),
            save_dir: temp_save_dir(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn starts_with_ground_lights_and_one_mesh() {
        let session = session();
        let objects = session.scene().objects.objects();
        assert_eq!(objects.len(), 4);
        assert_eq!(objects[GROUND_INDEX].mesh_id, GROUND_MESH);
        assert_eq!(objects[GROUND_INDEX].scale, 10.0);
        assert_eq!(objects[GROUND_INDEX].angles[0], 90.0);
        assert_eq!(objects[1].mesh_id, SPHERE_MESH);
        assert_eq!(objects[1].texture_id, 0);
        assert_eq!(objects[2].scale, 0.2);
        assert_eq!(objects[2].brightness, 0.2);
        assert_eq!(session.current(), Some(3));
        assert_eq!(session.mode(), Some(ToolMode::CameraRotate));
        assert_eq!(session.scene().light_spread(), -1.0);
    }

    #[test]
    fn seeded_sessions_are_reproducible() {
        let a = session();
        let b = session();
        assert_eq!(a.scene().objects, b.scene().objects);
    }

    #[test]
    fn added_object_lands_under_the_cursor() {
        let mut session = session();
        let index = session.add_object(7).unwrap().unwrap();
        assert_eq!(index, 4);
        let object = session.scene().objects[index];
        // Cursor starts at the window centre, which looks at the origin.
        assert!(object.position.abs_diff_eq(Vec4::W, 1e-3));
        assert!(object.texture_id < 31);
        assert_eq!(object.scale, 0.005);
        assert_eq!(session.current(), Some(4));
        assert_eq!(session.mode(), Some(ToolMode::PositionScale));
    }

    #[test]
    fn full_scene_ignores_add_and_duplicate() {
        let mut session = session();
        while session.scene().objects.len() < MAX_OBJECTS {
            session.add_object(3).unwrap();
        }
        let snapshot = session.scene().clone();

        assert_eq!(session.add_object(3).unwrap(), None);
        session
            .execute(EditorCommand::Duplicate, &mut CoverTarget::over(500))
            .unwrap();
        assert_eq!(session.scene(), &snapshot);
        assert_eq!(session.current(), Some(500));
        assert_eq!(session.mode(), Some(ToolMode::PositionScale));
        assert!(session.tool().is_bound());
    }

    #[test]
    fn delete_picks_then_returns_to_camera() {
        let mut session = session();
        session.add_object(9).unwrap();
        session
            .execute(EditorCommand::Delete, &mut CoverTarget::over(3))
            .unwrap();
        assert_eq!(session.scene().objects.len(), 4);
        assert_eq!(session.scene().objects[3].mesh_id, 9);
        assert_eq!(session.current(), None);
        assert_eq!(session.mode(), Some(ToolMode::CameraRotate));
    }

    #[test]
    fn reserved_pick_never_deletes_ground_or_lights() {
        let mut session = session();
        session
            .execute(EditorCommand::Delete, &mut CoverTarget::over(3))
            .unwrap();
        assert_eq!(session.current(), None);

        for reserved in 0..NUM_LIGHTS_AND_GROUND {
            session
                .execute(EditorCommand::Delete, &mut CoverTarget::over(reserved))
                .unwrap();
        }
        assert_eq!(session.scene().objects.len(), 3);
    }

    #[test]
    fn duplicate_copies_the_picked_object() {
        let mut session = session();
        session
            .execute(EditorCommand::Duplicate, &mut CoverTarget::over(3))
            .unwrap();
        let objects = session.scene().objects.objects();
        assert_eq!(objects.len(), 5);
        assert_eq!(objects[4], objects[3]);
        assert_eq!(session.current(), Some(4));
    }

    #[test]
    fn drag_edits_the_selected_material() {
        let mut session = session();
        session
            .execute(
                EditorCommand::SelectTool(ToolMode::MaterialColor),
                &mut CoverTarget::over(3),
            )
            .unwrap();
        assert_eq!(session.mode(), Some(ToolMode::MaterialColor));
        let before = session.scene().objects[3];

        session.cursor_moved(480.0, 320.0);
        session.mouse_button(MouseButton::Left, ElementState::Pressed);
        session.cursor_moved(576.0, 320.0);
        session.mouse_button(MouseButton::Left, ElementState::Released);
        session.cursor_moved(900.0, 10.0);

        let after = session.scene().objects[3];
        assert!((after.rgb.x - (before.rgb.x + 0.1)).abs() < 1e-5);
        assert_eq!(after.rgb.y, before.rgb.y);
    }

    #[test]
    fn shift_drag_uses_the_secondary_pair() {
        let mut session = session();
        let distance = session.scene().camera.distance;
        let pitch = session.scene().camera.pitch_deg;
        session.set_modifiers(ModifiersState::SHIFT);
        session.cursor_moved(480.0, 320.0);
        session.mouse_button(MouseButton::Left, ElementState::Pressed);
        session.cursor_moved(480.0, 256.0);

        let camera = session.scene().camera;
        assert_eq!(camera.distance, distance);
        assert!((camera.pitch_deg - (pitch - 9.0)).abs() < 1e-3);
    }

    #[test]
    fn object_tool_without_selection_keeps_the_previous_tool() {
        let mut session = session();
        session
            .execute(EditorCommand::Delete, &mut CoverTarget::over(3))
            .unwrap();
        session
            .execute(
                EditorCommand::SelectTool(ToolMode::PositionScale),
                &mut CoverTarget::empty(),
            )
            .unwrap();
        assert_eq!(session.mode(), Some(ToolMode::CameraRotate));
        assert!(session.tool().is_bound());
    }

    #[test]
    fn stale_selection_leaves_delete_and_tool_untouched() {
        let mut session = session();
        session.add_object(5).unwrap();
        let snapshot = session.scene().clone();
        session.current = Some(MAX_OBJECTS);

        session
            .execute(EditorCommand::Delete, &mut CoverTarget::empty())
            .unwrap();
        assert_eq!(session.scene(), &snapshot);
        assert_eq!(session.mode(), Some(ToolMode::PositionScale));
        assert!(session.tool().is_bound());

        session.rebind();
        assert_eq!(session.mode(), None);
        assert!(!session.tool().is_bound());
    }

    #[test]
    fn reloaded_scene_of_ground_and_lights_has_no_selection() {
        let mut session = session();
        session
            .execute(EditorCommand::Delete, &mut CoverTarget::over(3))
            .unwrap();
        session.save_slot(1);
        let saved = session.scene().clone();

        session.load_slot(1);
        assert_eq!(session.current(), None);
        assert_eq!(session.mode(), Some(ToolMode::CameraRotate));

        for command in [
            EditorCommand::Duplicate,
            EditorCommand::Delete,
            EditorCommand::SetTexture(9),
            EditorCommand::SelectTool(ToolMode::MaterialColor),
        ] {
            session.load_slot(1);
            session.execute(command, &mut CoverTarget::empty()).unwrap();
            session.execute(command, &mut CoverTarget::over(2)).unwrap();
            assert_eq!(session.scene(), &saved, "{command:?}");
            assert_eq!(session.current(), None);
            assert_eq!(session.mode(), Some(ToolMode::CameraRotate));
            assert!(session.tool().is_bound());
        }
        let _ = std::fs::remove_dir_all(&session.config().save_dir);
    }

    #[test]
    fn picking_a_new_object_moves_the_tool_onto_it() {
        let mut session = session();
        session.add_object(5).unwrap();
        assert_eq!(session.mode(), Some(ToolMode::PositionScale));
        let before = session.scene().clone();

        session
            .execute(EditorCommand::SetTexture(7), &mut CoverTarget::over(3))
            .unwrap();
        assert_eq!(session.current(), Some(3));
        assert_eq!(session.mode(), Some(ToolMode::PositionScale));

        session.cursor_moved(480.0, 320.0);
        session.mouse_button(MouseButton::Left, ElementState::Pressed);
        session.cursor_moved(576.0, 320.0);
        session.mouse_button(MouseButton::Left, ElementState::Released);

        let objects = session.scene().objects.objects();
        assert_ne!(objects[3].position, before.objects[3].position);
        assert_eq!(objects[4], before.objects[4]);
    }

    #[test]
    fn files_without_the_reserved_objects_are_refused() {
        let mut session = session();
        let mut short = SceneState::new(session.scene().camera, session.config().asset_limits());
        short
            .objects
            .add(SceneObject::placed(GROUND_MESH, 0, Vec4::W))
            .unwrap();
        short
            .objects
            .add(SceneObject::placed(SPHERE_MESH, 0, Vec4::W))
            .unwrap();
        let mut bytes = Vec::new();
        write_scene(&short, &mut bytes).unwrap();
        std::fs::write(session.config().slot_path(5).unwrap(), bytes).unwrap();

        session.add_object(8).unwrap();
        let snapshot = session.scene().clone();
        session.load_slot(5);

        assert_eq!(session.scene(), &snapshot);
        assert_eq!(session.current(), Some(4));
        assert_eq!(session.mode(), Some(ToolMode::PositionScale));
        let _ = std::fs::remove_dir_all(&session.config().save_dir);
    }

    #[test]
    fn scroll_zooms_the_camera() {
        let mut session = session();
        session.scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        assert!((session.scene().camera.distance - (15.0 * 0.8 - 0.05)).abs() < 1e-4);
        let mut expected = session.scene().camera;
        expected.zoom(ScrollDirection::Down);
        session.scroll(MouseScrollDelta::LineDelta(0.0, -1.0));
        assert_eq!(session.scene().camera, expected);
    }

    #[test]
    fn textures_are_validated() {
        let mut session = session();
        session
            .execute(EditorCommand::SetTexture(12), &mut CoverTarget::over(3))
            .unwrap();
        assert_eq!(session.scene().objects[3].texture_id, 12);

        session
            .execute(EditorCommand::SetGroundTexture(4), &mut CoverTarget::empty())
            .unwrap();
        assert_eq!(session.scene().objects[GROUND_INDEX].texture_id, 4);

        let result = session.execute(EditorCommand::SetTexture(31), &mut CoverTarget::over(3));
        assert!(matches!(
            result,
            Err(EditorError::Scene(SceneError::InvalidTexture { id: 31, .. }))
        ));
        assert_eq!(session.scene().objects[3].texture_id, 12);
    }

    #[test]
    fn save_then_load_restores_the_scene() {
        let mut session = session();
        session.add_object(11).unwrap();
        session.scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        session.execute(EditorCommand::Save(2), &mut CoverTarget::empty()).unwrap();
        let saved = session.scene().clone();

        session.add_object(12).unwrap();
        session.scroll(MouseScrollDelta::LineDelta(0.0, -1.0));
        session.execute(EditorCommand::Load(2), &mut CoverTarget::empty()).unwrap();

        assert_eq!(session.scene(), &saved);
        assert_eq!(session.current(), Some(4));
        assert_eq!(session.mode(), Some(ToolMode::CameraRotate));
        let _ = std::fs::remove_dir_all(&session.config().save_dir);
    }

    #[test]
    fn missing_or_broken_saves_leave_the_scene_alone() {
        let mut session = session();
        let snapshot = session.scene().clone();

        session.load_slot(3);
        assert_eq!(session.scene(), &snapshot);

        let path = session.config().slot_path(4).unwrap();
        std::fs::write(&path, [0u8; 7]).unwrap();
        session.load_slot(4);
        assert_eq!(session.scene(), &snapshot);
        assert_eq!(session.current(), Some(3));

        session.load_slot(99);
        assert_eq!(session.scene(), &snapshot);
        let _ = std::fs::remove_dir_all(&session.config().save_dir);
    }

    #[test]
    fn exit_command_ends_the_session() {
        let mut session = session();
        assert_eq!(
            session
                .execute(EditorCommand::Exit, &mut CoverTarget::empty())
                .unwrap(),
            CommandOutcome::Exit
        );
    }

    #[test]
    fn frames_draw_every_object() {
        let mut session = session();
        let mut renderer = CountingRenderer::default();
        session.render_frame(&mut NullLoader, &mut renderer).unwrap();
        assert_eq!(renderer.draws, 4);
    }
}
