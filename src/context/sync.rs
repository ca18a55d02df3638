//! Translation of the texture state into the configuration of the `Device`.
//!
//! Both parts of the configuration are rebuilt from scratch and pushed as a
//! whole, and only when their dirty flag is set. The symbolic values stored by
//! the context have been validated by the entry points, anything else reaching
//! the translation is a bug.

use crate::device::*;
use crate::enums::*;
use crate::texture::{TexCoordGeneration, TextureUnit};

use super::{Context, DirtyFlags};

fn min_filter(v: GLenum) -> (TextureFilter, MipMapFilter) {
    match v {
        GL_NEAREST => (TextureFilter::Nearest, MipMapFilter::None),
        GL_LINEAR => (TextureFilter::Linear, MipMapFilter::None),
        GL_NEAREST_MIPMAP_NEAREST => (TextureFilter::Nearest, MipMapFilter::Nearest),
        GL_LINEAR_MIPMAP_NEAREST => (TextureFilter::Linear, MipMapFilter::Nearest),
        GL_NEAREST_MIPMAP_LINEAR => (TextureFilter::Nearest, MipMapFilter::Linear),
        GL_LINEAR_MIPMAP_LINEAR => (TextureFilter::Linear, MipMapFilter::Linear),
        _ => unreachable!("Invalid min filter {:#x}.", v),
    }
}

fn mag_filter(v: GLenum) -> TextureFilter {
    match v {
        GL_NEAREST => TextureFilter::Nearest,
        GL_LINEAR => TextureFilter::Linear,
        _ => unreachable!("Invalid mag filter {:#x}.", v),
    }
}

fn wrap_mode(v: GLenum) -> TextureWrapMode {
    match v {
        GL_CLAMP => TextureWrapMode::Clamp,
        GL_CLAMP_TO_BORDER => TextureWrapMode::ClampToBorder,
        GL_CLAMP_TO_EDGE => TextureWrapMode::ClampToEdge,
        GL_REPEAT => TextureWrapMode::Repeat,
        GL_MIRRORED_REPEAT => TextureWrapMode::MirroredRepeat,
        _ => unreachable!("Invalid wrap mode {:#x}.", v),
    }
}

fn env_mode(v: GLenum) -> TextureEnvMode {
    match v {
        GL_ADD => TextureEnvMode::Add,
        GL_BLEND => TextureEnvMode::Blend,
        GL_COMBINE => TextureEnvMode::Combine,
        GL_DECAL => TextureEnvMode::Decal,
        GL_MODULATE => TextureEnvMode::Modulate,
        GL_REPLACE => TextureEnvMode::Replace,
        _ => unreachable!("Invalid texture env mode {:#x}.", v),
    }
}

fn combinator(v: GLenum) -> TextureCombinator {
    match v {
        GL_ADD => TextureCombinator::Add,
        GL_ADD_SIGNED => TextureCombinator::AddSigned,
        GL_DOT3_RGB => TextureCombinator::Dot3RGB,
        GL_DOT3_RGBA => TextureCombinator::Dot3RGBA,
        GL_INTERPOLATE => TextureCombinator::Interpolate,
        GL_MODULATE => TextureCombinator::Modulate,
        GL_REPLACE => TextureCombinator::Replace,
        GL_SUBTRACT => TextureCombinator::Subtract,
        _ => unreachable!("Invalid texture combinator {:#x}.", v),
    }
}

fn operand(v: GLenum) -> TextureOperand {
    match v {
        GL_ONE_MINUS_SRC_ALPHA => TextureOperand::OneMinusSourceAlpha,
        GL_ONE_MINUS_SRC_COLOR => TextureOperand::OneMinusSourceColor,
        GL_SRC_ALPHA => TextureOperand::SourceAlpha,
        GL_SRC_COLOR => TextureOperand::SourceColor,
        _ => unreachable!("Invalid texture operand {:#x}.", v),
    }
}

fn source(v: GLenum) -> TextureSource {
    match v {
        GL_CONSTANT => TextureSource::Constant,
        GL_PREVIOUS => TextureSource::Previous,
        GL_PRIMARY_COLOR => TextureSource::PrimaryColor,
        GL_TEXTURE => TextureSource::Texture,
        GL_TEXTURE0..=GL_TEXTURE31 => TextureSource::TextureStage((v - GL_TEXTURE0) as u8),
        _ => unreachable!("Invalid texture source {:#x}.", v),
    }
}

fn texture_environment(unit: &TextureUnit) -> FixedFunctionTextureEnvironment {
    let mut env = FixedFunctionTextureEnvironment {
        env_mode: env_mode(unit.env_mode),
        color: unit.env_color,
        alpha_scale: unit.alpha_scale,
        rgb_scale: unit.rgb_scale,
        alpha_combinator: combinator(unit.alpha_combinator),
        rgb_combinator: combinator(unit.rgb_combinator),
        ..FixedFunctionTextureEnvironment::default()
    };

    for i in 0..3 {
        env.alpha_operand[i] = operand(unit.alpha_operand[i]);
        env.alpha_source[i] = source(unit.alpha_source[i]);
        env.rgb_operand[i] = operand(unit.rgb_operand[i]);
        env.rgb_source[i] = source(unit.rgb_source[i]);
    }

    env
}

fn sampler_config(unit: &TextureUnit) -> SamplerConfig {
    let texture_2d = unit.texture_2d_target_texture().borrow();
    let sampler = texture_2d.sampler();
    let (texture_min_filter, mipmap_filter) = min_filter(sampler.min_filter);

    SamplerConfig {
        bound_image: texture_2d.device_image().cloned(),
        level_of_detail_bias: unit.level_of_detail_bias,
        mipmap_filter,
        texture_mag_filter: mag_filter(sampler.mag_filter),
        texture_min_filter,
        texture_wrap_u: wrap_mode(sampler.wrap_s_mode),
        texture_wrap_v: wrap_mode(sampler.wrap_t_mode),
        border_color: sampler.border_color,
        fixed_function_texture_environment: texture_environment(unit),
    }
}

fn texcoord_generation_config(generation: &TexCoordGeneration) -> TexCoordGenerationConfig {
    let mut config = TexCoordGenerationConfig::default();
    match generation.generation_mode {
        GL_OBJECT_LINEAR => {
            config.mode = TexCoordGenerationMode::ObjectLinear;
            config.coefficients = generation.object_plane_coefficients;
        }
        GL_EYE_LINEAR => {
            config.mode = TexCoordGenerationMode::EyeLinear;
            config.coefficients = generation.eye_plane_coefficients;
        }
        GL_SPHERE_MAP => config.mode = TexCoordGenerationMode::SphereMap,
        GL_REFLECTION_MAP => config.mode = TexCoordGenerationMode::ReflectionMap,
        GL_NORMAL_MAP => config.mode = TexCoordGenerationMode::NormalMap,
        v => unreachable!("Invalid texture coordinate generation mode {:#x}.", v),
    }

    config
}

const COORDINATES: [TexCoordGenerationCoordinate; 4] = [
    TexCoordGenerationCoordinate::S,
    TexCoordGenerationCoordinate::T,
    TexCoordGenerationCoordinate::R,
    TexCoordGenerationCoordinate::Q,
];

impl<D: Device> Context<D> {
    /// Pushes the parts of the device configuration that are out of date. This
    /// is done implicitly by `end`.
    pub fn sync_device_config(&mut self) {
        self.sync_device_sampler_config();
        self.sync_device_texcoord_config();
    }

    fn sync_device_sampler_config(&mut self) {
        if !self.dirty.contains(DirtyFlags::SAMPLER_CONFIG) {
            return;
        }

        self.dirty.remove(DirtyFlags::SAMPLER_CONFIG);

        for (i, unit) in self.texture_units.iter().enumerate() {
            if !unit.texture_2d_enabled {
                continue;
            }

            trace!("Pushes sampler config of texture unit {}.", i);
            self.device.set_sampler_config(i, sampler_config(unit));
        }
    }

    fn sync_device_texcoord_config(&mut self) {
        if !self.dirty.contains(DirtyFlags::TEXCOORD_GENERATION) {
            return;
        }

        self.dirty.remove(DirtyFlags::TEXCOORD_GENERATION);

        let num_units = self.texture_units.len();
        let mut options = self.device.options();
        options
            .texcoord_generation_enabled_coordinates
            .resize(num_units, TexCoordGenerationCoordinate::empty());
        options
            .texcoord_generation_config
            .resize(num_units, [TexCoordGenerationConfig::default(); 4]);

        for (i, unit) in self.texture_units.iter().enumerate() {
            let mut enabled_coordinates = TexCoordGenerationCoordinate::empty();
            let mut configs = [TexCoordGenerationConfig::default(); 4];

            for (j, generation) in unit.tex_coord_generation.iter().enumerate() {
                if !generation.enabled {
                    continue;
                }

                enabled_coordinates |= COORDINATES[j];
                configs[j] = texcoord_generation_config(generation);
            }

            options.texcoord_generation_enabled_coordinates[i] = enabled_coordinates;
            options.texcoord_generation_config[i] = configs;
        }

        trace!("Pushes rasterizer options.");
        self.device.set_options(options);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn translation() {
        assert_eq!(
            min_filter(GL_LINEAR_MIPMAP_NEAREST),
            (TextureFilter::Linear, MipMapFilter::Nearest)
        );
        assert_eq!(min_filter(GL_NEAREST), (TextureFilter::Nearest, MipMapFilter::None));
        assert_eq!(wrap_mode(GL_CLAMP_TO_BORDER), TextureWrapMode::ClampToBorder);
        assert_eq!(source(GL_TEXTURE3), TextureSource::TextureStage(3));
        assert_eq!(source(GL_PRIMARY_COLOR), TextureSource::PrimaryColor);
        assert_eq!(combinator(GL_DOT3_RGBA), TextureCombinator::Dot3RGBA);
    }

    #[test]
    #[should_panic]
    fn unvalidated_value() {
        wrap_mode(GL_LINEAR);
    }
}
