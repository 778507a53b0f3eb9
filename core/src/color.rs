//! RGB888 to RGB565 packing.
//!
//! Sprite values are RGB565 words with their two bytes swapped.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888, raw::RawU16};
use embedded_graphics::prelude::RgbColor;

/// Packs one 8-bit RGB triplet into a byte-swapped RGB565 value.
///
/// Red keeps its top 5 bits, green its top 6 and blue its top 5; the
/// resulting word is then byte-swapped.
#[inline]
pub fn color565(r: u8, g: u8, b: u8) -> u16 {
    let lsb = rgb565_word(r, g, b) as u32;
    let msb = (lsb >> 8) | (lsb << 8);
    (msb & 0xFFFF) as u16
}

/// The plain RGB565 word: R in bits 15..11, G in 10..5, B in 4..0.
#[inline]
pub fn rgb565_word(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

#[inline]
pub fn pack_pixel(pixel: Rgb888) -> u16 {
    color565(pixel.r(), pixel.g(), pixel.b())
}

/// Undoes the byte swap of [`color565`], giving back the `Rgb565` color.
pub fn unpack(packed: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(packed.swap_bytes()))
}
