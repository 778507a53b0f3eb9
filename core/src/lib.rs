#![no_std]

pub mod color;
pub mod engine;
pub mod error;
pub mod image;
pub mod literal;
pub mod loader;

extern crate alloc;

pub use color::color565;
pub use engine::{Sprite, SpriteEngine};
pub use error::{AccessError, Error, FormatError, Result};
pub use image::{Dimensions, ImageBuffer};
pub use literal::{SpriteLiteral, write_literal};
pub use loader::load_image;
