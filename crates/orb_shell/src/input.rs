use bevy::prelude::*;

use crate::canvas::CanvasLayout;

/// Window position of a click or tap that started this frame.
pub fn just_pressed_screen_position(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else if touch_input.any_just_pressed() {
        let touch = touch_input.iter_just_pressed().next()?;
        Some(touch.position())
    } else {
        None
    }
}

/// Surface-local position of a click or tap that started this frame, the way
/// a canvas click listener reports it. Presses outside the surface are dropped.
pub fn just_pressed_surface_position(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    windows: &Query<&Window>,
    layout: &CanvasLayout,
) -> Option<Vec2> {
    let position = just_pressed_screen_position(button_input, touch_input, windows)?;
    layout.to_surface(position)
}
