//! Tile based sprite compositor for a 160x128 RGB565 panel.
//!
//! The screen is split into 16x16 tiles. A render pass only redraws tiles
//! touched by a sprite whose table entry changed since the previous pass,
//! both where it was and where it is now.

use alloc::vec::Vec;

use embedded_graphics::{
    Drawable,
    mono_font::{MonoTextStyleBuilder, ascii::FONT_5X7},
    pixelcolor::Rgb565,
    prelude::{DrawTarget, Point, RgbColor, Size},
    primitives::Rectangle,
    text::{Baseline, Text},
};
use log::{debug, trace};

use crate::{
    color::{self, color565},
    error::{FormatError, Result},
    image::ImageBuffer,
};

pub const SPRITE_WIDTH: usize = 8;
pub const SPRITE_HEIGHT: usize = 8;
/// Maximum number of concurrently active sprites.
pub const NSPRITES: usize = 8;

pub const SCREEN_WIDTH: usize = 160;
pub const SCREEN_HEIGHT: usize = 128;
pub const TILE_WIDTH: usize = 16;
pub const TILE_HEIGHT: usize = 16;
pub const TILES_X: usize = SCREEN_WIDTH / TILE_WIDTH;
pub const NTILES: usize = TILES_X * (SCREEN_HEIGHT / TILE_HEIGHT);

pub const SPRITE_PIXELS: usize = SPRITE_WIDTH * SPRITE_HEIGHT;
pub const TILE_PIXELS: usize = TILE_WIDTH * TILE_HEIGHT;

// A sprite touches at most four tiles only while it is no larger than a tile.
const _: () = assert!(TILE_WIDTH >= SPRITE_WIDTH && TILE_HEIGHT >= SPRITE_HEIGHT);
const _: () = assert!(SCREEN_WIDTH % TILE_WIDTH == 0 && SCREEN_HEIGHT % TILE_HEIGHT == 0);

pub type Pos = i16;
/// One packed sprite image, as produced by [`ImageBuffer::pack`].
pub type SpriteData = [u16; SPRITE_PIXELS];
pub type TileBuffer = [u16; TILE_PIXELS];

/// Entry of the sprite table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sprite {
    /// Drawn on the next render pass when set.
    pub active: bool,
    pub x: Pos,
    pub y: Pos,
    /// Index into the tileset.
    pub image: u8,
}

/// Converts an 8x8 raw image into tileset data.
pub fn sprite_data(image: &ImageBuffer) -> Result<SpriteData> {
    let dims = image.dimensions();
    if dims.width() != SPRITE_WIDTH || dims.height() != SPRITE_HEIGHT {
        return Err(FormatError::InvalidDimensions {
            width: dims.width(),
            height: dims.height(),
        }
        .into());
    }
    let mut data = [0u16; SPRITE_PIXELS];
    data.copy_from_slice(&image.pack());
    Ok(data)
}

/// Tile containing the given pixel, clamped to the valid tile range.
fn pos_to_tile_id(x: i32, y: i32) -> usize {
    let tile = (y / TILE_HEIGHT as i32) * TILES_X as i32 + x / TILE_WIDTH as i32;
    tile.clamp(0, NTILES as i32 - 1) as usize
}

/// Top-left pixel of a tile.
pub fn tile_origin(tile: usize) -> (usize, usize) {
    ((tile % TILES_X) * TILE_WIDTH, (tile / TILES_X) * TILE_HEIGHT)
}

fn tile_area(x: usize, y: usize) -> Rectangle {
    Rectangle::new(
        Point::new(x as i32, y as i32),
        Size::new(TILE_WIDTH as u32, TILE_HEIGHT as u32),
    )
}

pub struct SpriteEngine {
    pub bgcolor: u16,
    pub sprites: [Sprite; NSPRITES],
    previous: [Sprite; NSPRITES],
    dirty: [bool; NTILES],
    tileset: Vec<SpriteData>,
}

impl SpriteEngine {
    /// Black background, all sprites inactive and every tile dirty.
    pub fn new(tileset: Vec<SpriteData>) -> Self {
        debug!("Sprite engine with {} tileset entries", tileset.len());
        SpriteEngine {
            bgcolor: color565(0, 0, 0),
            sprites: [Sprite::default(); NSPRITES],
            previous: [Sprite::default(); NSPRITES],
            dirty: [true; NTILES],
            tileset,
        }
    }

    pub fn tileset(&self) -> &[SpriteData] {
        &self.tileset
    }

    pub fn is_dirty(&self, tile: usize) -> bool {
        self.dirty.get(tile).copied().unwrap_or(false)
    }

    pub fn dirty_tiles(&self) -> impl Iterator<Item = usize> + '_ {
        self.dirty
            .iter()
            .enumerate()
            .filter_map(|(tile, &dirty)| dirty.then_some(tile))
    }

    /// Forces a full redraw, e.g. after changing `bgcolor`.
    pub fn invalidate_all(&mut self) {
        self.dirty.fill(true);
    }

    fn invalidate_touching_tiles(&mut self, sprite: Sprite) {
        if !sprite.active {
            return;
        }
        let (x, y) = (sprite.x as i32, sprite.y as i32);
        let right = x + SPRITE_WIDTH as i32 - 1;
        let bottom = y + SPRITE_HEIGHT as i32 - 1;
        for (cx, cy) in [(x, y), (right, y), (x, bottom), (right, bottom)] {
            self.dirty[pos_to_tile_id(cx, cy)] = true;
        }
    }

    /// Marks the old and new tiles of every changed sprite as dirty.
    pub fn update(&mut self) {
        for i in 0..NSPRITES {
            let (current, previous) = (self.sprites[i], self.previous[i]);
            if current == previous {
                continue;
            }
            trace!("Sprite {} changed: {:?} -> {:?}", i, previous, current);
            self.invalidate_touching_tiles(previous);
            self.invalidate_touching_tiles(current);
            self.previous[i] = current;
        }
    }

    /// Fills `buffer` with the background and blits every active sprite
    /// overlapping the tile at (`x0`, `y0`), in table order.
    pub fn render_tile(&self, buffer: &mut TileBuffer, x0: i32, y0: i32) {
        buffer.fill(self.bgcolor);

        let (sw, sh) = (SPRITE_WIDTH as i32, SPRITE_HEIGHT as i32);
        let (tw, th) = (TILE_WIDTH as i32, TILE_HEIGHT as i32);

        for sprite in &self.sprites {
            let (x, y) = (sprite.x as i32, sprite.y as i32);
            if !sprite.active || x < x0 - sw || x >= x0 + tw || y < y0 - sh || y >= y0 + th {
                continue;
            }
            let Some(data) = self.tileset.get(sprite.image as usize) else {
                trace!("Sprite image {} not in tileset", sprite.image);
                continue;
            };

            let deltax = x - x0;
            let deltay = y - y0;

            let srcx_lo = (-deltax).max(0);
            let srcx_hi = (tw - deltax).min(sw);
            let dstx_lo = deltax.max(0);
            let dstx_hi = tw.min(deltax + sw);
            let w = (srcx_hi - srcx_lo).min(dstx_hi - dstx_lo);

            let srcy_lo = (-deltay).max(0);
            let srcy_hi = (th - deltay).min(sh);
            let dsty_lo = deltay.max(0);
            let dsty_hi = th.min(deltay + sh);
            let h = (srcy_hi - srcy_lo).min(dsty_hi - dsty_lo);

            if w <= 0 || h <= 0 {
                continue;
            }
            let w = w as usize;
            for row in 0..h {
                let src = ((srcy_lo + row) * sw + srcx_lo) as usize;
                let dst = ((dsty_lo + row) * tw + dstx_lo) as usize;
                buffer[dst..dst + w].copy_from_slice(&data[src..src + w]);
            }
        }
    }

    /// Renders every dirty tile in row-major order and hands it to `upload`
    /// together with its top-left pixel. A tile stays dirty if its upload
    /// fails. Returns the number of tiles uploaded.
    pub fn render_sprites<E>(
        &mut self,
        mut upload: impl FnMut(&TileBuffer, usize, usize) -> core::result::Result<(), E>,
    ) -> core::result::Result<usize, E> {
        self.update();

        let mut buffer = [0u16; TILE_PIXELS];
        let mut uploaded = 0;
        for tile in 0..NTILES {
            if !self.dirty[tile] {
                continue;
            }
            let (x, y) = tile_origin(tile);
            self.render_tile(&mut buffer, x as i32, y as i32);
            upload(&buffer, x, y)?;
            self.dirty[tile] = false;
            uploaded += 1;
        }
        debug!("Uploaded {} dirty tiles", uploaded);
        Ok(uploaded)
    }

    /// [`render_sprites`](Self::render_sprites) onto an RGB565 draw target.
    pub fn draw<D>(&mut self, target: &mut D) -> core::result::Result<usize, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.render_sprites(|buffer, x, y| {
            target.fill_contiguous(&tile_area(x, y), buffer.iter().map(|&v| color::unpack(v)))
        })
    }
}

/// Clears one tile to a single packed color.
pub fn colorfill_tile<D>(target: &mut D, color: u16, x: usize, y: usize) -> core::result::Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.fill_solid(&tile_area(x, y), color::unpack(color))
}

/// Draws one 5x7 character, white on black, into the text grid.
///
/// Cells are 6 pixels wide and 11 pixels high with an 8 pixel margin.
pub fn print_char<D>(target: &mut D, row: i32, col: i32, ch: char) -> core::result::Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyleBuilder::new()
        .font(&FONT_5X7)
        .text_color(Rgb565::WHITE)
        .background_color(Rgb565::BLACK)
        .build();
    let mut utf8 = [0u8; 4];
    let position = Point::new(8 + col * 6, 8 + row * 11);
    Text::with_baseline(ch.encode_utf8(&mut utf8), position, style, Baseline::Top).draw(target)?;
    Ok(())
}
