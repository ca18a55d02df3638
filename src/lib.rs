//! # What is This?
//!
//! `softgl` is the texturing front-end of a software OpenGL 1.x context. It
//! keeps the fixed-function texture state (texture objects, texture units,
//! texture environments and texture coordinate generation), validates every
//! entry point against it, and translates the accumulated state into the
//! normalized sampler configuration consumed by a rasterizer `Device`.
//!
//! ```rust
//! use softgl::prelude::*;
//!
//! let device = HeadlessDevice::new(HeadlessParams::default());
//! let mut ctx = Context::new(device);
//!
//! let names = ctx.gen_textures(1);
//! ctx.bind_texture(GL_TEXTURE_2D, names[0]);
//! ctx.tex_env(GL_TEXTURE_ENV, GL_RGB_SCALE, 2.0);
//! assert_eq!(ctx.get_error(), None);
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

#[macro_use]
pub mod errors;

pub mod context;
pub mod device;
pub mod enums;
pub mod math;
pub mod texture;
pub mod utils;

pub mod prelude {
    pub use crate::context::{Context, ContextParams};
    pub use crate::device::headless::{HeadlessDevice, HeadlessParams};
    pub use crate::device::{Device, DeviceInfo};
    pub use crate::enums::*;
    pub use crate::errors::Error;
}
