extern crate softgl;

use softgl::device::{TexCoordGenerationCoordinate, TexCoordGenerationMode, TextureCombinator};
use softgl::device::{TextureEnvMode, TextureOperand, TextureSource};
use softgl::math::{Matrix4, Vector3, Vector4};
use softgl::prelude::*;

fn context() -> Context<HeadlessDevice> {
    Context::new(HeadlessDevice::new(HeadlessParams::default()))
}

fn assert_close(a: Vector4<f32>, b: Vector4<f32>) {
    for i in 0..4 {
        assert!((a[i] - b[i]).abs() < 1e-6, "{:?} != {:?}", a, b);
    }
}

#[test]
fn scales() {
    let mut ctx = context();
    ctx.enable(GL_TEXTURE_2D);

    ctx.tex_env(GL_TEXTURE_ENV, GL_RGB_SCALE, 3.0);
    assert_eq!(ctx.get_error(), Some(Error::InvalidValue));
    ctx.tex_env(GL_TEXTURE_ENV, GL_ALPHA_SCALE, 0.5);
    assert_eq!(ctx.get_error(), Some(Error::InvalidValue));

    ctx.tex_env(GL_TEXTURE_ENV, GL_RGB_SCALE, 2.0);
    ctx.tex_env(GL_TEXTURE_ENV, GL_ALPHA_SCALE, 4.0);
    assert_eq!(ctx.get_error(), None);

    ctx.sync_device_config();
    let env = ctx
        .device()
        .sampler_config(0)
        .unwrap()
        .fixed_function_texture_environment;
    assert_eq!(env.rgb_scale, 2.0);
    assert_eq!(env.alpha_scale, 4.0);
}

#[test]
fn combiners() {
    let mut ctx = context();
    ctx.enable(GL_TEXTURE_2D);

    ctx.tex_env(GL_TEXTURE_ENV, GL_TEXTURE_ENV_MODE, GL_COMBINE as f32);
    ctx.tex_env(GL_TEXTURE_ENV, GL_COMBINE_RGB, GL_DOT3_RGB as f32);
    ctx.tex_env(GL_TEXTURE_ENV, GL_COMBINE_ALPHA, GL_SUBTRACT as f32);
    ctx.tex_env(GL_TEXTURE_ENV, GL_OPERAND1_RGB, GL_ONE_MINUS_SRC_COLOR as f32);
    ctx.tex_env(GL_TEXTURE_ENV, GL_OPERAND2_ALPHA, GL_ONE_MINUS_SRC_ALPHA as f32);
    ctx.tex_env(GL_TEXTURE_ENV, GL_SRC1_RGB, GL_TEXTURE1 as f32);
    ctx.tex_env(GL_TEXTURE_ENV, GL_SRC0_ALPHA, GL_PRIMARY_COLOR as f32);
    ctx.tex_envfv(GL_TEXTURE_ENV, GL_TEXTURE_ENV_COLOR, [0.1, 0.2, 0.3, 0.4]);
    ctx.tex_env(GL_TEXTURE_FILTER_CONTROL, GL_TEXTURE_LOD_BIAS, 1.5);
    assert_eq!(ctx.get_error(), None);

    ctx.sync_device_config();
    let config = ctx.device().sampler_config(0).unwrap().clone();
    let env = config.fixed_function_texture_environment;

    assert_eq!(config.level_of_detail_bias, 1.5);
    assert_eq!(env.env_mode, TextureEnvMode::Combine);
    assert_eq!(env.rgb_combinator, TextureCombinator::Dot3RGB);
    assert_eq!(env.alpha_combinator, TextureCombinator::Subtract);
    assert_eq!(env.rgb_operand[1], TextureOperand::OneMinusSourceColor);
    assert_eq!(env.alpha_operand[2], TextureOperand::OneMinusSourceAlpha);
    assert_eq!(env.rgb_source[1], TextureSource::TextureStage(1));
    assert_eq!(env.rgb_source[2], TextureSource::Constant);
    assert_eq!(env.alpha_source[0], TextureSource::PrimaryColor);
    assert_eq!(env.color, Vector4::new(0.1, 0.2, 0.3, 0.4));
}

#[test]
fn env_legality() {
    let mut ctx = context();

    // Dot products only combine colors.
    ctx.tex_env(GL_TEXTURE_ENV, GL_COMBINE_ALPHA, GL_DOT3_RGBA as f32);
    assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
    ctx.tex_env(GL_TEXTURE_ENV, GL_OPERAND0_ALPHA, GL_SRC_COLOR as f32);
    assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
    ctx.tex_env(GL_TEXTURE_ENV, GL_SRC0_RGB, GL_REPLACE as f32);
    assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
    ctx.tex_env(GL_TEXTURE_ENV, GL_TEXTURE_ENV_MODE, GL_SUBTRACT as f32);
    assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
    ctx.tex_env(GL_TEXTURE_FILTER_CONTROL, GL_RGB_SCALE, 1.0);
    assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
    ctx.tex_env(GL_TEXTURE_2D, GL_RGB_SCALE, 1.0);
    assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
    ctx.tex_envfv(GL_TEXTURE_FILTER_CONTROL, GL_TEXTURE_ENV_COLOR, [0.0; 4]);
    assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));

    let unit = ctx.active_texture_unit();
    assert_eq!(unit.alpha_combinator, GL_MODULATE);
    assert_eq!(unit.rgb_source[0], GL_TEXTURE);
    assert_eq!(unit.env_mode, GL_MODULATE);
}

#[test]
fn env_writes_active_unit() {
    let mut ctx = context();

    ctx.active_texture(GL_TEXTURE1);
    ctx.tex_env(GL_TEXTURE_ENV, GL_TEXTURE_ENV_MODE, GL_DECAL as f32);

    assert_eq!(ctx.texture_unit(0).unwrap().env_mode, GL_MODULATE);
    assert_eq!(ctx.texture_unit(1).unwrap().env_mode, GL_DECAL);
}

#[test]
fn sphere_map_legality() {
    let mut ctx = context();

    for &coord in &[GL_R, GL_Q] {
        ctx.tex_gen(coord, GL_TEXTURE_GEN_MODE, GL_SPHERE_MAP as i32);
        assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
    }

    for &mode in &[GL_REFLECTION_MAP, GL_NORMAL_MAP] {
        ctx.tex_gen(GL_Q, GL_TEXTURE_GEN_MODE, mode as i32);
        assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));

        ctx.tex_gen(GL_R, GL_TEXTURE_GEN_MODE, mode as i32);
        assert_eq!(ctx.get_error(), None);
    }

    for &coord in &[GL_S, GL_T] {
        ctx.tex_gen(coord, GL_TEXTURE_GEN_MODE, GL_SPHERE_MAP as i32);
        assert_eq!(ctx.get_error(), None);
    }

    ctx.tex_genfv(GL_Q, GL_TEXTURE_GEN_MODE, [GL_SPHERE_MAP as f32, 0.0, 0.0, 0.0]);
    assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));

    ctx.tex_gen(GL_S, GL_OBJECT_PLANE, GL_SPHERE_MAP as i32);
    assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
    ctx.tex_gen(GL_S + 4, GL_TEXTURE_GEN_MODE, GL_EYE_LINEAR as i32);
    assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));

    let generation = ctx.active_texture_unit().tex_coord_generation;
    assert_eq!(generation[0].generation_mode, GL_SPHERE_MAP);
    assert_eq!(generation[2].generation_mode, GL_NORMAL_MAP);
    assert_eq!(generation[3].generation_mode, GL_EYE_LINEAR);
}

#[test]
fn eye_plane_is_not_recomputed() {
    let mut ctx = context();

    let v1 = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
    ctx.load_matrix(&v1);
    ctx.tex_genfv(GL_S, GL_EYE_PLANE, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(ctx.get_error(), None);

    // The inverse translation moves the input by (-1, -2, -3) scaled by w.
    let expected = Vector4::new(0.0, -2.0, -3.0, 1.0);
    let eye_plane = ctx.active_texture_unit().tex_coord_generation[0].eye_plane_coefficients;
    assert_close(eye_plane, expected);

    ctx.load_matrix(&Matrix4::from_scale(2.0));
    let eye_plane_after = ctx.active_texture_unit().tex_coord_generation[0].eye_plane_coefficients;
    assert_eq!(eye_plane_after, eye_plane);

    // Object planes are kept as is.
    ctx.tex_genfv(GL_S, GL_OBJECT_PLANE, [1.0, 2.0, 3.0, 4.0]);
    let object_plane = ctx.active_texture_unit().tex_coord_generation[0].object_plane_coefficients;
    assert_eq!(object_plane, Vector4::new(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn singular_model_view() {
    let mut ctx = context();

    ctx.load_matrix(&Matrix4::from_scale(0.0));
    ctx.tex_genfv(GL_T, GL_EYE_PLANE, [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(ctx.get_error(), None);

    let eye_plane = ctx.active_texture_unit().tex_coord_generation[1].eye_plane_coefficients;
    assert_eq!(eye_plane, Vector4::new(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn texcoord_generation_sync() {
    let mut ctx = context();

    ctx.active_texture(GL_TEXTURE1);
    ctx.tex_gen(GL_S, GL_TEXTURE_GEN_MODE, GL_OBJECT_LINEAR as i32);
    ctx.tex_genfv(GL_S, GL_OBJECT_PLANE, [1.0, 2.0, 3.0, 4.0]);
    ctx.tex_gen(GL_T, GL_TEXTURE_GEN_MODE, GL_SPHERE_MAP as i32);
    ctx.tex_genfv(GL_R, GL_EYE_PLANE, [0.0, 0.0, 1.0, 0.0]);
    ctx.enable(GL_TEXTURE_GEN_S);
    ctx.enable(GL_TEXTURE_GEN_T);
    ctx.enable(GL_TEXTURE_GEN_R);
    assert_eq!(ctx.get_error(), None);

    ctx.sync_device_config();
    let options = ctx.device().options();

    assert_eq!(
        options.texcoord_generation_enabled_coordinates[0],
        TexCoordGenerationCoordinate::empty()
    );
    assert_eq!(
        options.texcoord_generation_enabled_coordinates[1],
        TexCoordGenerationCoordinate::S
            | TexCoordGenerationCoordinate::T
            | TexCoordGenerationCoordinate::R
    );

    let configs = options.texcoord_generation_config[1];
    assert_eq!(configs[0].mode, TexCoordGenerationMode::ObjectLinear);
    assert_eq!(configs[0].coefficients, Vector4::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(configs[1].mode, TexCoordGenerationMode::SphereMap);
    assert_eq!(configs[2].mode, TexCoordGenerationMode::EyeLinear);
    assert_eq!(configs[2].coefficients, Vector4::new(0.0, 0.0, 1.0, 0.0));
}
