use bevy::prelude::*;
use bevy::utils::HashMap;
use orb_shell::canvas::CanvasLayout;
use orb_shell::input::just_pressed_surface_position;
use strum::IntoEnumIterator;

use crate::config::OrbConfig;
use crate::controller::OrbGame;
use crate::grid::OrbColor;
use crate::surface::SpriteSurface;

/// Plugin that runs an [`OrbGame`] inside Bevy: it steps the game on the fixed
/// clock, feeds it clicks, and shows what it painted with sprites.
pub struct BoardPlugin;

/// The running game.
#[derive(Resource, Deref, DerefMut)]
pub struct Session(pub OrbGame);

#[derive(Resource)]
struct OrbImages(HashMap<OrbColor, Handle<Image>>);

/// Sprite showing the `n`th painted orb.
#[derive(Component)]
struct OrbSprite(usize);

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteSurface>()
            .add_systems(Startup, setup)
            .add_systems(FixedUpdate, step_game)
            .add_systems(
                Update,
                (
                    update_layout,
                    track_image_sizes,
                    handle_clicks,
                    sync_sprites,
                )
                    .chain(),
            );
    }
}

fn setup(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<OrbConfig>) {
    let images: HashMap<_, _> = OrbColor::iter()
        .map(|color| (color, asset_server.load(color.image_path())))
        .collect();

    let placeholder = images.get(&OrbColor::default()).cloned().unwrap_or_default();
    for index in 0..config.grid_size * config.grid_size {
        commands.spawn((
            Sprite::from_image(placeholder.clone()),
            Transform::default(),
            Visibility::Hidden,
            OrbSprite(index),
        ));
    }

    commands.insert_resource(OrbImages(images));
}

fn update_layout(windows: Query<&Window>, mut surface: ResMut<SpriteSurface>) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let layout = CanvasLayout::fit(window.width(), window.height());
    if *surface.layout() != layout {
        debug!("Drawing surface is now {layout:?}");
        surface.set_layout(layout);
    }
}

// Images decode asynchronously; until a size is known the orb is not painted
fn track_image_sizes(
    images: Res<OrbImages>,
    assets: Res<Assets<Image>>,
    mut surface: ResMut<SpriteSurface>,
) {
    for (&color, handle) in &images.0 {
        if surface.image_size(color).is_some() {
            continue;
        }
        if let Some(image) = assets.get(handle) {
            debug!("Loaded the {color} orb image");
            surface.set_image_size(color, image.size_f32());
        }
    }
}

fn handle_clicks(
    button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    surface: Res<SpriteSurface>,
    mut session: ResMut<Session>,
) {
    let Some(position) =
        just_pressed_surface_position(&button_input, &touch_input, &windows, surface.layout())
    else {
        return;
    };

    match session.click(position.x, position.y, surface.layout().size) {
        Ok(outcome) => debug!("Click at {position}: {outcome:?}"),
        Err(err) => warn!("Click at {position} failed: {err}"),
    }
}

fn step_game(mut session: ResMut<Session>, mut surface: ResMut<SpriteSurface>) {
    session.frame(&mut *surface);
}

fn sync_sprites(
    windows: Query<&Window>,
    images: Res<OrbImages>,
    surface: Res<SpriteSurface>,
    mut sprites: Query<(&OrbSprite, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let window_size = window.size();

    for (OrbSprite(index), mut sprite, mut transform, mut visibility) in &mut sprites {
        let painted = surface.draws().get(*index).and_then(|draw| {
            let image_size = surface.image_size(draw.color)?;
            let handle = images.0.get(&draw.color)?;
            Some((draw, image_size, handle))
        });

        let Some((draw, image_size, handle)) = painted else {
            *visibility = Visibility::Hidden;
            continue;
        };

        if sprite.image != *handle {
            sprite.image = handle.clone();
        }
        let center = surface
            .layout()
            .to_world(draw.center(image_size), window_size);
        transform.translation = center.extend(*index as f32 * 0.001);
        transform.scale = draw.scale.extend(1.0);
        *visibility = Visibility::Visible;
    }
}
