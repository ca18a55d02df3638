use std::rc::Rc;

use crate::enums::*;
use crate::math::Vector4;

use super::TextureRef;

/// The texture coordinate generation state of one coordinate component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoordGeneration {
    pub enabled: bool,
    pub generation_mode: GLenum,
    pub object_plane_coefficients: Vector4<f32>,
    /// Kept in eye space, transformed once when they are specified.
    pub eye_plane_coefficients: Vector4<f32>,
}

impl TexCoordGeneration {
    /// Returns the initial state of the component with index `i` of S, T, R and Q.
    pub fn for_component(i: usize) -> Self {
        let mut plane = Vector4::new(0.0, 0.0, 0.0, 0.0);
        if i < 2 {
            plane[i] = 1.0;
        }

        TexCoordGeneration {
            enabled: false,
            generation_mode: GL_EYE_LINEAR,
            object_plane_coefficients: plane,
            eye_plane_coefficients: plane,
        }
    }
}

/// A texture unit with its 2D binding, its texture environment and the
/// coordinate generation state of S, T, R and Q.
#[derive(Debug, Clone)]
pub struct TextureUnit {
    texture_2d_target_texture: TextureRef,
    pub texture_2d_enabled: bool,
    pub env_mode: GLenum,
    pub env_color: Vector4<f32>,
    pub alpha_scale: f32,
    pub rgb_scale: f32,
    pub alpha_combinator: GLenum,
    pub rgb_combinator: GLenum,
    pub alpha_operand: [GLenum; 3],
    pub rgb_operand: [GLenum; 3],
    pub alpha_source: [GLenum; 3],
    pub rgb_source: [GLenum; 3],
    pub level_of_detail_bias: f32,
    pub tex_coord_generation: [TexCoordGeneration; 4],
}

impl TextureUnit {
    pub fn new(default_texture_2d: TextureRef) -> Self {
        TextureUnit {
            texture_2d_target_texture: default_texture_2d,
            texture_2d_enabled: false,
            env_mode: GL_MODULATE,
            env_color: Vector4::new(0.0, 0.0, 0.0, 0.0),
            alpha_scale: 1.0,
            rgb_scale: 1.0,
            alpha_combinator: GL_MODULATE,
            rgb_combinator: GL_MODULATE,
            alpha_operand: [GL_SRC_ALPHA, GL_SRC_ALPHA, GL_SRC_ALPHA],
            rgb_operand: [GL_SRC_COLOR, GL_SRC_COLOR, GL_SRC_ALPHA],
            alpha_source: [GL_TEXTURE, GL_PREVIOUS, GL_CONSTANT],
            rgb_source: [GL_TEXTURE, GL_PREVIOUS, GL_CONSTANT],
            level_of_detail_bias: 0.0,
            tex_coord_generation: [
                TexCoordGeneration::for_component(0),
                TexCoordGeneration::for_component(1),
                TexCoordGeneration::for_component(2),
                TexCoordGeneration::for_component(3),
            ],
        }
    }

    #[inline]
    pub fn texture_2d_target_texture(&self) -> &TextureRef {
        &self.texture_2d_target_texture
    }

    #[inline]
    pub fn set_texture_2d_target_texture(&mut self, texture: TextureRef) {
        self.texture_2d_target_texture = texture;
    }

    /// Returns true if `texture` is the object bound to the 2D target.
    #[inline]
    pub fn is_bound(&self, texture: &TextureRef) -> bool {
        Rc::ptr_eq(&self.texture_2d_target_texture, texture)
    }
}
