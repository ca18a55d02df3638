//! Texture objects and the texture units they are bound to.

mod texture_2d;
mod unit;

pub use self::texture_2d::{MipMap, Sampler2D, Texture2D};
pub use self::unit::{TexCoordGeneration, TextureUnit};

use std::cell::RefCell;
use std::rc::Rc;

/// The number of mip levels above the base level a texture can have.
pub const LOG2_MAX_TEXTURE_SIZE: u32 = 11;
/// The largest width or height of a texture, without border.
pub const MAX_TEXTURE_SIZE: u32 = 1 << LOG2_MAX_TEXTURE_SIZE;

/// A texture object shared by the name table and every unit binding it.
pub type TextureRef = Rc<RefCell<Texture2D>>;
