use super::tool::ToolChannel;
use crate::render::ScrollDirection;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Engage(ToolChannel),
    Release,
    Zoom(ScrollDirection),
    Exit,
}

/// Left drag drives the primary pair; shift+left or middle drags the secondary.
pub fn mouse_button_action(
    button: MouseButton,
    state: ElementState,
    modifiers: ModifiersState,
) -> Option<InputAction> {
    match (button, state) {
        (MouseButton::Left, ElementState::Pressed) if modifiers.shift_key() => {
            Some(InputAction::Engage(ToolChannel::Secondary))
        }
        (MouseButton::Left, ElementState::Pressed) => Some(InputAction::Engage(ToolChannel::Primary)),
        (MouseButton::Middle, ElementState::Pressed) => {
            Some(InputAction::Engage(ToolChannel::Secondary))
        }
        (MouseButton::Left | MouseButton::Middle, ElementState::Released) => {
            Some(InputAction::Release)
        }
        _ => None,
    }
}

pub fn scroll_action(delta: MouseScrollDelta) -> Option<InputAction> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(position) => position.y,
    };
    if y > 0.0 {
        Some(InputAction::Zoom(ScrollDirection::Up))
    } else if y < 0.0 {
        Some(InputAction::Zoom(ScrollDirection::Down))
    } else {
        None
    }
}

pub fn key_action(key: PhysicalKey, state: ElementState) -> Option<InputAction> {
    match (key, state) {
        (PhysicalKey::Code(KeyCode::Escape), ElementState::Pressed) => Some(InputAction::Exit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn buttons_pick_the_channel() {
        let none = ModifiersState::empty();
        assert_eq!(
            mouse_button_action(MouseButton::Left, ElementState::Pressed, none),
            Some(InputAction::Engage(ToolChannel::Primary))
        );
        assert_eq!(
            mouse_button_action(MouseButton::Left, ElementState::Pressed, ModifiersState::SHIFT),
            Some(InputAction::Engage(ToolChannel::Secondary))
        );
        assert_eq!(
            mouse_button_action(MouseButton::Middle, ElementState::Pressed, none),
            Some(InputAction::Engage(ToolChannel::Secondary))
        );
        assert_eq!(
            mouse_button_action(MouseButton::Middle, ElementState::Released, none),
            Some(InputAction::Release)
        );
        assert_eq!(
            mouse_button_action(MouseButton::Right, ElementState::Pressed, none),
            None
        );
    }

    #[test]
    fn scrolling_zooms() {
        assert_eq!(
            scroll_action(MouseScrollDelta::LineDelta(0.0, 1.0)),
            Some(InputAction::Zoom(ScrollDirection::Up))
        );
        assert_eq!(
            scroll_action(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.0))),
            Some(InputAction::Zoom(ScrollDirection::Down))
        );
        assert_eq!(scroll_action(MouseScrollDelta::LineDelta(3.0, 0.0)), None);
    }

    #[test]
    fn escape_exits() {
        assert_eq!(
            key_action(PhysicalKey::Code(KeyCode::Escape), ElementState::Pressed),
            Some(InputAction::Exit)
        );
        assert_eq!(
            key_action(PhysicalKey::Code(KeyCode::Escape), ElementState::Released),
            None
        );
        assert_eq!(
            key_action(PhysicalKey::Code(KeyCode::KeyA), ElementState::Pressed),
            None
        );
    }
}
