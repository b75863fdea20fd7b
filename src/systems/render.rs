//! Draws the world onto an SDL canvas.

use std::collections::HashMap;

use bevy_ecs::world::World;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;
use tracing::trace;

use crate::asset::{Asset, TextureCatalog};
use crate::error::{GameError, GameResult};
use crate::systems::animation::AnimationPlayer;
use crate::systems::components::{Position, Renderable};

const BACKGROUND: Color = Color::RGB(0, 0, 0);

/// Loaded textures, by asset.
pub type TextureStore = HashMap<Asset, Texture>;

/// Source rectangle of frame `frame` in a sheet laid out left to right, top to bottom.
fn frame_rect(sheet_size: (u32, u32), frame_size: (u32, u32), frame: u16) -> Rect {
    let columns = (sheet_size.0 / frame_size.0).max(1);
    let frame = frame as u32;
    Rect::new(
        ((frame % columns) * frame_size.0) as i32,
        ((frame / columns) * frame_size.1) as i32,
        frame_size.0,
        frame_size.1,
    )
}

/// Clears the canvas and draws every renderable entity, back to front.
///
/// Animated entities use their animation's current sheet and frame. Entities whose
/// texture was never loaded are skipped.
pub fn draw_world(canvas: &mut Canvas<Window>, textures: &TextureStore, world: &mut World) -> GameResult<()> {
    let mut sprites: Vec<(Position, Renderable, Option<(Asset, u16)>)> = world
        .query::<(&Position, &Renderable, Option<&AnimationPlayer>)>()
        .iter(world)
        .map(|(position, sprite, animation)| (*position, *sprite, animation.map(|a| (a.sheet(), a.frame()))))
        .collect();
    sprites.sort_by_key(|(_, sprite, _)| sprite.layer);

    let catalog = world.resource::<TextureCatalog>();

    canvas.set_draw_color(BACKGROUND);
    canvas.clear();

    for (position, sprite, animation) in sprites {
        let (asset, frame) = animation.unwrap_or((sprite.asset, 0));
        let Some(texture) = textures.get(&asset) else {
            trace!(%asset, "Skipping sprite without texture");
            continue;
        };

        let source = match (asset.frame_size(), catalog.size(asset)) {
            (Some(frame_size), Some(sheet_size)) => Some(frame_rect(
                (sheet_size.x, sheet_size.y),
                (frame_size.x, frame_size.y),
                frame,
            )),
            _ => None,
        };
        let target = Rect::from_center(
            Point::new(position.0.x.round() as i32, position.0.y.round() as i32),
            sprite.size.x as u32,
            sprite.size.y as u32,
        );

        canvas.copy(texture, source, target).map_err(GameError::Sdl)?;
    }

    Ok(())
}
