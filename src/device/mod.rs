//! The rasterizer backend, which should be responsible for only one thing:
//! turning the normalized sampler and texture environment configuration into
//! pixels. The context never performs any pixel math itself, every image
//! creation and blit is delegated to a `Device`.

pub mod headless;
pub mod pixel;

use std::fmt::Debug;
use std::rc::Rc;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::math::{Vector2, Vector3, Vector4};

pub use self::pixel::{
    ImageDataLayout, ImageExtent, PackingSpecification, PixelDataType, PixelFormat, PixelType,
};

/// The capabilities reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    /// The number of texture units, fixes the size of the per-context unit array.
    pub num_texture_units: u32,
    /// Whether images with non-power-of-two dimensions can be created.
    pub supports_npot_textures: bool,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        DeviceInfo {
            num_texture_units: 2,
            supports_npot_textures: true,
        }
    }
}

/// A mipmapped image owned by the device.
pub trait Image: Debug {
    fn pixel_format(&self) -> PixelFormat;

    fn number_of_levels(&self) -> u32;

    fn width_at_level(&self, level: u32) -> u32;

    fn height_at_level(&self, level: u32) -> u32;

    /// Unpacks the pixels described by `layout` from `data` into `level`, starting
    /// at texel `offset`. Texels falling outside of the level are dropped.
    fn write_texels(&self, level: u32, offset: Vector3<i32>, data: &[u8], layout: &ImageDataLayout);

    /// Packs the texels of `level` starting at `offset` into `data` as described
    /// by `layout`.
    fn read_texels(
        &self,
        level: u32,
        offset: Vector3<i32>,
        data: &mut [u8],
        layout: &ImageDataLayout,
    );
}

pub type ImageRef = Rc<dyn Image>;

pub trait Device {
    fn info(&self) -> DeviceInfo;

    /// Creates an image with a full mip chain, clamped to `max_level`.
    fn create_image(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        depth: u32,
        max_level: u32,
    ) -> ImageRef;

    /// Copies a `size` block of the current color buffer at `src` into `level`
    /// of `image` at `dst`.
    fn blit_from_color_buffer(
        &mut self,
        image: &dyn Image,
        level: u32,
        size: Vector2<u32>,
        src: Vector2<i32>,
        dst: Vector3<i32>,
    );

    /// Same as `blit_from_color_buffer`, but reads the depth buffer.
    fn blit_from_depth_buffer(
        &mut self,
        image: &dyn Image,
        level: u32,
        size: Vector2<u32>,
        src: Vector2<i32>,
        dst: Vector3<i32>,
    );

    /// Replaces the sampler configuration of a texture unit.
    fn set_sampler_config(&mut self, unit: usize, config: SamplerConfig);

    fn options(&self) -> RasterizerOptions;

    fn set_options(&mut self, options: RasterizerOptions);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MipMapFilter {
    None,
    Nearest,
    Linear,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureWrapMode {
    Repeat,
    MirroredRepeat,
    Clamp,
    ClampToBorder,
    ClampToEdge,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureEnvMode {
    Add,
    Blend,
    Combine,
    Decal,
    Modulate,
    Replace,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureCombinator {
    Add,
    AddSigned,
    Dot3RGB,
    Dot3RGBA,
    Interpolate,
    Modulate,
    Replace,
    Subtract,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureOperand {
    OneMinusSourceAlpha,
    OneMinusSourceColor,
    SourceAlpha,
    SourceColor,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureSource {
    Constant,
    Previous,
    PrimaryColor,
    Texture,
    /// The output of another texture unit, identified by its index.
    TextureStage(u8),
}

/// The fixed function texture environment of one texture unit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedFunctionTextureEnvironment {
    pub env_mode: TextureEnvMode,
    pub color: Vector4<f32>,
    pub alpha_scale: f32,
    pub rgb_scale: f32,
    pub alpha_combinator: TextureCombinator,
    pub rgb_combinator: TextureCombinator,
    pub alpha_operand: [TextureOperand; 3],
    pub rgb_operand: [TextureOperand; 3],
    pub alpha_source: [TextureSource; 3],
    pub rgb_source: [TextureSource; 3],
}

impl Default for FixedFunctionTextureEnvironment {
    fn default() -> Self {
        FixedFunctionTextureEnvironment {
            env_mode: TextureEnvMode::Modulate,
            color: Vector4::new(0.0, 0.0, 0.0, 0.0),
            alpha_scale: 1.0,
            rgb_scale: 1.0,
            alpha_combinator: TextureCombinator::Modulate,
            rgb_combinator: TextureCombinator::Modulate,
            alpha_operand: [
                TextureOperand::SourceAlpha,
                TextureOperand::SourceAlpha,
                TextureOperand::SourceAlpha,
            ],
            rgb_operand: [
                TextureOperand::SourceColor,
                TextureOperand::SourceColor,
                TextureOperand::SourceAlpha,
            ],
            alpha_source: [
                TextureSource::Texture,
                TextureSource::Previous,
                TextureSource::Constant,
            ],
            rgb_source: [
                TextureSource::Texture,
                TextureSource::Previous,
                TextureSource::Constant,
            ],
        }
    }
}

/// Everything a texture unit needs to sample its bound image.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    pub bound_image: Option<ImageRef>,
    pub level_of_detail_bias: f32,
    pub mipmap_filter: MipMapFilter,
    pub texture_mag_filter: TextureFilter,
    pub texture_min_filter: TextureFilter,
    pub texture_wrap_u: TextureWrapMode,
    pub texture_wrap_v: TextureWrapMode,
    pub border_color: Vector4<f32>,
    pub fixed_function_texture_environment: FixedFunctionTextureEnvironment,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            bound_image: None,
            level_of_detail_bias: 0.0,
            mipmap_filter: MipMapFilter::Linear,
            texture_mag_filter: TextureFilter::Linear,
            texture_min_filter: TextureFilter::Nearest,
            texture_wrap_u: TextureWrapMode::Repeat,
            texture_wrap_v: TextureWrapMode::Repeat,
            border_color: Vector4::new(0.0, 0.0, 0.0, 0.0),
            fixed_function_texture_environment: FixedFunctionTextureEnvironment::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TexCoordGenerationMode {
    ObjectLinear,
    EyeLinear,
    SphereMap,
    ReflectionMap,
    NormalMap,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TexCoordGenerationConfig {
    pub mode: TexCoordGenerationMode,
    pub coefficients: Vector4<f32>,
}

impl Default for TexCoordGenerationConfig {
    fn default() -> Self {
        TexCoordGenerationConfig {
            mode: TexCoordGenerationMode::EyeLinear,
            coefficients: Vector4::new(0.0, 0.0, 0.0, 0.0),
        }
    }
}

bitflags! {
    /// The texture coordinate components that are generated instead of being
    /// taken from the vertex.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TexCoordGenerationCoordinate: u8 {
        const S = 1 << 0;
        const T = 1 << 1;
        const R = 1 << 2;
        const Q = 1 << 3;
    }
}

/// Rasterizer wide options, indexed by texture unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RasterizerOptions {
    pub texcoord_generation_enabled_coordinates: SmallVec<[TexCoordGenerationCoordinate; 8]>,
    pub texcoord_generation_config: SmallVec<[[TexCoordGenerationConfig; 4]; 8]>,
}
