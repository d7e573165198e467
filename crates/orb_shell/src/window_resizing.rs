#[cfg(target_arch = "wasm32")]
use bevy::prelude::*;
#[cfg(target_arch = "wasm32")]
use bevy::window::PrimaryWindow;

// wgpu rejects surfaces past the maximum texture extent, 2048 on most mobile GPUs
#[cfg(target_arch = "wasm32")]
const MAX_SURFACE_EXTENT: f32 = 2048.0;

/// Size of the browser viewport in CSS pixels, if the page exposes one.
#[cfg(target_arch = "wasm32")]
pub fn browser_inner_size() -> Option<Vec2> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Vec2::new(width as f32, height as f32))
}

#[cfg(target_arch = "wasm32")]
pub fn handle_browser_resize(mut primary_query: Query<&mut Window, With<PrimaryWindow>>) {
    let Some(target) = browser_inner_size() else {
        return;
    };
    let target = target.min(Vec2::splat(MAX_SURFACE_EXTENT));

    for mut window in &mut primary_query {
        let current = Vec2::new(window.resolution.width(), window.resolution.height());
        if (current - target).abs().max_element() > f32::EPSILON {
            debug!("Resizing window from {current} to {target}");
            window.resolution.set(target.x, target.y);
        }
    }
}
