use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::entity::Direction;
use crate::map::{Cell, Effect};
use crate::session::Session;

const BACKGROUND: Color = Color::RGB(12, 12, 24);
const WALL: Color = Color::RGB(40, 60, 160);
const DOT: Color = Color::RGB(255, 230, 150);
const SPEED_BOOST: Color = Color::RGB(80, 220, 220);
const INVULNERABILITY: Color = Color::RGB(220, 120, 220);
const PLAYER: Color = Color::RGB(255, 210, 0);
const PLAYER_INVULNERABLE: Color = Color::RGB(255, 255, 255);
const GHOST: Color = Color::RGB(220, 60, 60);

/// Screen pixel for a continuous coordinate.
///
/// Entities snap to their grid cell when drawn: `floor(pos) * tile_size`.
pub fn to_pixel(pos: f32, tile_size: u32) -> i32 {
    pos.floor() as i32 * tile_size as i32
}

/// Draws one frame of the session: background, map cells, then entities.
///
/// Flat-color squares stand in for sprites; the simulation does not care
/// what the cells look like.
pub fn draw_frame(
    canvas: &mut Canvas<Window>,
    session: &Session,
    tile_size: u32,
) -> Result<(), String> {
    canvas.set_draw_color(BACKGROUND);
    canvas.clear();

    for ((x, y), cell) in session.map.cells_for_render() {
        draw_cell(canvas, x, y, cell, tile_size)?;
    }

    for ghost in &session.ghosts {
        let rect = tile_rect(ghost.body.x, ghost.body.y, tile_size);
        canvas.set_draw_color(GHOST);
        canvas.fill_rect(rect).map_err(|e| e.to_string())?;
    }

    draw_player(canvas, session, tile_size)?;

    canvas.present();
    Ok(())
}

fn tile_rect(x: f32, y: f32, tile_size: u32) -> Rect {
    Rect::new(
        to_pixel(x, tile_size),
        to_pixel(y, tile_size),
        tile_size,
        tile_size,
    )
}

fn draw_cell(
    canvas: &mut Canvas<Window>,
    x: i32,
    y: i32,
    cell: Cell,
    tile_size: u32,
) -> Result<(), String> {
    let px = x * tile_size as i32;
    let py = y * tile_size as i32;

    let rect = match cell {
        // Walls fill the whole tile
        Cell::Wall => Rect::new(px, py, tile_size, tile_size),
        // Collectibles sit centered at half tile size
        Cell::Collectible(_) => {
            let inset = (tile_size / 4) as i32;
            Rect::new(px + inset, py + inset, tile_size / 2, tile_size / 2)
        }
    };
    let color = match cell {
        Cell::Wall => WALL,
        Cell::Collectible(Effect::None) => DOT,
        Cell::Collectible(Effect::SpeedBoost) => SPEED_BOOST,
        Cell::Collectible(Effect::Invulnerability) => INVULNERABILITY,
    };

    canvas.set_draw_color(color);
    canvas.fill_rect(rect).map_err(|e| e.to_string())
}

fn draw_player(
    canvas: &mut Canvas<Window>,
    session: &Session,
    tile_size: u32,
) -> Result<(), String> {
    let body = &session.player.body;
    let rect = tile_rect(body.x, body.y, tile_size);

    let color = if session.player.is_invulnerable() {
        PLAYER_INVULNERABLE
    } else {
        PLAYER
    };
    canvas.set_draw_color(color);
    canvas.fill_rect(rect).map_err(|e| e.to_string())?;

    // A small dark notch on the facing edge stands in for the mouth sprite
    if let Some(facing) = body.facing {
        let notch = facing_notch(rect, facing, tile_size);
        canvas.set_draw_color(BACKGROUND);
        canvas.fill_rect(notch).map_err(|e| e.to_string())?;
    }

    Ok(())
}

fn facing_notch(tile: Rect, facing: Direction, tile_size: u32) -> Rect {
    let notch = (tile_size / 4).max(1);
    let mid = |span: u32| (span / 2 - notch / 2) as i32;

    match facing {
        Direction::Right => Rect::new(
            tile.x + (tile_size - notch) as i32,
            tile.y + mid(tile_size),
            notch,
            notch,
        ),
        Direction::Left => Rect::new(tile.x, tile.y + mid(tile_size), notch, notch),
        Direction::Down => Rect::new(
            tile.x + mid(tile_size),
            tile.y + (tile_size - notch) as i32,
            notch,
            notch,
        ),
        Direction::Up => Rect::new(tile.x + mid(tile_size), tile.y, notch, notch),
    }
}
