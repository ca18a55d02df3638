use crate::device::{ImageDataLayout, ImageRef};
use crate::enums::*;
use crate::math::{Vector3, Vector4};

use super::LOG2_MAX_TEXTURE_SIZE;

/// The sampling state of a texture object. Values are kept as the symbolic
/// constants they were specified with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler2D {
    pub min_filter: GLenum,
    pub mag_filter: GLenum,
    pub wrap_s_mode: GLenum,
    pub wrap_t_mode: GLenum,
    pub border_color: Vector4<f32>,
}

impl Default for Sampler2D {
    fn default() -> Self {
        Sampler2D {
            min_filter: GL_NEAREST_MIPMAP_LINEAR,
            mag_filter: GL_LINEAR,
            wrap_s_mode: GL_REPEAT,
            wrap_t_mode: GL_REPEAT,
            border_color: Vector4::new(0.0, 0.0, 0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MipMap {
    pub width: u32,
    pub height: u32,
}

/// A 2D texture object. The device image is created lazily, once the base
/// level receives its first image.
#[derive(Debug)]
pub struct Texture2D {
    internal_format: GLenum,
    mipmaps: [MipMap; LOG2_MAX_TEXTURE_SIZE as usize + 1],
    sampler: Sampler2D,
    device_image: Option<ImageRef>,
}

impl Default for Texture2D {
    fn default() -> Self {
        Texture2D::new()
    }
}

impl Texture2D {
    pub fn new() -> Self {
        Texture2D {
            internal_format: GL_RGBA,
            mipmaps: [MipMap::default(); LOG2_MAX_TEXTURE_SIZE as usize + 1],
            sampler: Sampler2D::default(),
            device_image: None,
        }
    }

    /// Texture objects only exist for the 2D target, so this is always
    /// `GL_TEXTURE_2D`.
    #[inline]
    pub fn target(&self) -> GLenum {
        GL_TEXTURE_2D
    }

    #[inline]
    pub fn is_texture_2d(&self) -> bool {
        self.target() == GL_TEXTURE_2D
    }

    #[inline]
    pub fn internal_format(&self) -> GLenum {
        self.internal_format
    }

    #[inline]
    pub fn set_internal_format(&mut self, internal_format: GLenum) {
        self.internal_format = internal_format;
    }

    pub fn width_at_lod(&self, lod: u32) -> u32 {
        self.mipmaps.get(lod as usize).map(|v| v.width).unwrap_or(0)
    }

    pub fn height_at_lod(&self, lod: u32) -> u32 {
        self.mipmaps.get(lod as usize).map(|v| v.height).unwrap_or(0)
    }

    pub fn set_lod_dimensions(&mut self, lod: u32, width: u32, height: u32) {
        if let Some(v) = self.mipmaps.get_mut(lod as usize) {
            v.width = width;
            v.height = height;
        }
    }

    #[inline]
    pub fn sampler(&self) -> &Sampler2D {
        &self.sampler
    }

    #[inline]
    pub fn sampler_mut(&mut self) -> &mut Sampler2D {
        &mut self.sampler
    }

    #[inline]
    pub fn device_image(&self) -> Option<&ImageRef> {
        self.device_image.as_ref()
    }

    #[inline]
    pub fn set_device_image(&mut self, image: ImageRef) {
        self.device_image = Some(image);
    }

    /// Defines the image of mip level `lod`. When `pixels` is `None` the level
    /// only gets its dimensions, and its texels are left untouched.
    pub fn upload_texture_data(
        &mut self,
        lod: u32,
        internal_format: GLenum,
        layout: &ImageDataLayout,
        pixels: Option<&[u8]>,
    ) {
        self.internal_format = internal_format;
        self.set_lod_dimensions(lod, layout.selection.width, layout.selection.height);

        if let Some(pixels) = pixels {
            self.replace_sub_texture_data(lod, layout, Vector3::new(0, 0, 0), pixels);
        }
    }

    pub fn replace_sub_texture_data(
        &self,
        lod: u32,
        layout: &ImageDataLayout,
        offset: Vector3<i32>,
        pixels: &[u8],
    ) {
        match self.device_image {
            Some(ref image) => image.write_texels(lod, offset, pixels, layout),
            // The base level has not been defined yet, so there is nothing to hold
            // the texels of this level.
            None => debug!("Texture has no device image, dropping texels of level {}.", lod),
        }
    }

    pub fn download_texture_data(&self, lod: u32, layout: &ImageDataLayout, pixels: &mut [u8]) {
        match self.device_image {
            Some(ref image) => image.read_texels(lod, Vector3::new(0, 0, 0), pixels, layout),
            None => debug!("Texture has no device image, nothing to read from level {}.", lod),
        }
    }
}
