use super::tool::{LightSlot, ToolMode};
use super::EditorCommand;

/// Entries per submenu when a long list is split up.
const CHUNK: usize = 10;

/// Popup menu layout. The window layer turns it into real menus and sends the
/// chosen command back to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    Entry { label: String, command: EditorCommand },
    Submenu { label: String, items: Vec<MenuItem> },
}

impl MenuItem {
    fn entry(label: impl Into<String>, command: EditorCommand) -> Self {
        Self::Entry {
            label: label.into(),
            command,
        }
    }

    fn submenu(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self::Submenu {
            label: label.into(),
            items,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Entry { label, .. } | Self::Submenu { label, .. } => label,
        }
    }
}

/// Splits `labels` into "1-10", "11-20", ... submenus.
pub fn array_menu(labels: &[String], command: impl Fn(u32) -> EditorCommand) -> Vec<MenuItem> {
    labels
        .chunks(CHUNK)
        .enumerate()
        .map(|(chunk, names)| {
            let first = chunk * CHUNK;
            let items = names
                .iter()
                .enumerate()
                .map(|(offset, name)| {
                    MenuItem::entry(name.clone(), command((first + offset) as u32))
                })
                .collect();
            MenuItem::submenu(format!("{}-{}", first + 1, first + names.len()), items)
        })
        .collect()
}

pub fn main_menu(
    mesh_labels: &[String],
    texture_labels: &[String],
    save_prefix: &str,
    save_slots: u32,
) -> Vec<MenuItem> {
    let slot_labels: Vec<String> = (1..=save_slots)
        .map(|slot| format!("{}{}", save_prefix, slot))
        .collect();
    let slot_menu = |command: fn(u32) -> EditorCommand| {
        slot_labels
            .iter()
            .zip(1..)
            .map(|(label, slot)| MenuItem::entry(label.clone(), command(slot)))
            .collect::<Vec<_>>()
    };
    let tool = |label: &str, mode: ToolMode| MenuItem::entry(label, EditorCommand::SelectTool(mode));

    vec![
        tool("Rotate/Move Camera", ToolMode::CameraRotate),
        MenuItem::submenu(
            "Add object",
            array_menu(mesh_labels, |mesh_id| EditorCommand::AddObject { mesh_id }),
        ),
        tool("Position/Scale", ToolMode::PositionScale),
        tool("Rotation/Texture Scale", ToolMode::RotationTextureScale),
        MenuItem::submenu(
            "Material",
            vec![
                tool("R/G/B/All", ToolMode::MaterialColor),
                tool("Ambient/Diffuse/Specular/Shine", ToolMode::MaterialShading),
            ],
        ),
        MenuItem::submenu("Texture", array_menu(texture_labels, EditorCommand::SetTexture)),
        MenuItem::submenu(
            "Ground Texture",
            array_menu(texture_labels, EditorCommand::SetGroundTexture),
        ),
        MenuItem::submenu(
            "Lights",
            vec![
                tool("Move Light 1", ToolMode::LightMove(LightSlot::First)),
                tool("R/G/B/All Light 1", ToolMode::LightColor(LightSlot::First)),
                tool("Rot/Spread light 1", ToolMode::LightRotateSpread),
                tool("Move Light 2", ToolMode::LightMove(LightSlot::Second)),
                tool("R/G/B/All Light 2", ToolMode::LightColor(LightSlot::Second)),
            ],
        ),
        MenuItem::entry("Duplicate", EditorCommand::Duplicate),
        MenuItem::submenu("Save", slot_menu(EditorCommand::Save)),
        MenuItem::submenu("Load", slot_menu(EditorCommand::Load)),
        MenuItem::entry("Delete", EditorCommand::Delete),
        MenuItem::entry("EXIT", EditorCommand::Exit),
    ]
}
