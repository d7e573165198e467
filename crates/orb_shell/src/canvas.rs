use bevy::math::Vec2;

/// Placement of the square drawing surface inside the window.
///
/// The surface is the largest square that fits the screen and is centered on
/// the longer axis. `left` and `top` are offsets from the window's top-left
/// corner, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasLayout {
    pub size: f32,
    pub left: f32,
    pub top: f32,
}

impl CanvasLayout {
    pub fn fit(screen_width: f32, screen_height: f32) -> Self {
        if screen_width < screen_height {
            Self {
                size: screen_width,
                left: 0.0,
                top: (screen_height - screen_width) / 2.0,
            }
        } else {
            Self {
                size: screen_height,
                left: (screen_width - screen_height) / 2.0,
                top: 0.0,
            }
        }
    }

    /// Converts a window position (origin top-left, y down) to a surface-local
    /// one. Positions outside the surface are not clicks on it.
    pub fn to_surface(&self, window_position: Vec2) -> Option<Vec2> {
        let local = window_position - Vec2::new(self.left, self.top);
        let inside = (0.0..self.size).contains(&local.x) && (0.0..self.size).contains(&local.y);
        inside.then_some(local)
    }

    /// Converts a surface-local position to Bevy world space for a 2D camera
    /// centered on a window of the given size (origin center, y up).
    pub fn to_world(&self, surface_position: Vec2, window_size: Vec2) -> Vec2 {
        Vec2::new(
            self.left + surface_position.x - window_size.x / 2.0,
            window_size.y / 2.0 - (self.top + surface_position.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_screen_centers_vertically() {
        let layout = CanvasLayout::fit(320.0, 480.0);
        assert_eq!(
            layout,
            CanvasLayout {
                size: 320.0,
                left: 0.0,
                top: 80.0
            },
            "portrait screens use the width as the surface size"
        );
    }

    #[test]
    fn landscape_screen_centers_horizontally() {
        let layout = CanvasLayout::fit(800.0, 600.0);
        assert_eq!(layout.size, 600.0, "landscape screens use the height");
        assert_eq!(layout.left, 100.0, "surface is centered horizontally");
        assert_eq!(layout.top, 0.0, "no vertical offset in landscape");
    }

    #[test]
    fn clicks_outside_the_surface_are_dropped() {
        let layout = CanvasLayout::fit(320.0, 480.0);
        assert_eq!(
            layout.to_surface(Vec2::new(10.0, 90.0)),
            Some(Vec2::new(10.0, 10.0)),
            "offset is removed from clicks inside the surface"
        );
        assert_eq!(
            layout.to_surface(Vec2::new(10.0, 40.0)),
            None,
            "clicks above the surface are ignored"
        );
        assert_eq!(
            layout.to_surface(Vec2::new(10.0, 400.0)),
            None,
            "the bottom edge is exclusive"
        );
    }

    #[test]
    fn surface_center_maps_to_world_origin_offset() {
        let layout = CanvasLayout::fit(320.0, 480.0);
        let world = layout.to_world(Vec2::new(160.0, 160.0), Vec2::new(320.0, 480.0));
        assert_eq!(world, Vec2::ZERO, "surface center is the window center");
        let corner = layout.to_world(Vec2::ZERO, Vec2::new(320.0, 480.0));
        assert_eq!(corner, Vec2::new(-160.0, 160.0), "top-left corner is up and left");
    }
}
