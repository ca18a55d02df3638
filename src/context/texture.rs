//! Texture entry points: names and bindings, texture units, texture
//! environments, texture coordinate generation, texture parameters and the
//! transfer of texture images.

use std::cell::RefCell;
use std::rc::Rc;

use crate::device::{Device, ImageDataLayout, ImageExtent, PixelFormat};
use crate::enums::*;
use crate::errors::*;
use crate::math::{SquareMatrix, Vector2, Vector3, Vector4};
use crate::texture::{
    Texture2D, TextureRef, TextureUnit, LOG2_MAX_TEXTURE_SIZE, MAX_TEXTURE_SIZE,
};

use super::list::Command;
use super::pixel::{pixel_format_for_internal_format, validated_pixel_type};
use super::{Context, DirtyFlags};

/// The client array of texture coordinates of one texture unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TexCoordPointer {
    pub size: GLint,
    pub data_type: GLenum,
    pub stride: GLsizei,
    pub data: Rc<[u8]>,
}

fn is_valid_level(level: GLint) -> bool {
    level >= 0 && level as u32 <= LOG2_MAX_TEXTURE_SIZE
}

fn is_valid_size(width: GLsizei, height: GLsizei) -> bool {
    let max = (MAX_TEXTURE_SIZE + 2) as GLsizei;
    width >= 0 && height >= 0 && width <= max && height <= max
}

/// Returns true if `offset..offset + size` lies within `0..extent`.
fn fits(offset: GLint, size: GLsizei, extent: u32) -> bool {
    offset >= 0 && i64::from(offset) + i64::from(size) <= i64::from(extent)
}

fn is_power_of_two(v: GLsizei) -> bool {
    v > 0 && (v & (v - 1)) == 0
}

fn is_valid_source(source: GLenum) -> bool {
    match source {
        GL_CONSTANT | GL_PREVIOUS | GL_PRIMARY_COLOR | GL_TEXTURE => true,
        GL_TEXTURE0..=GL_TEXTURE31 => true,
        _ => false,
    }
}

fn is_valid_wrap_mode(mode: GLenum) -> bool {
    match mode {
        GL_CLAMP | GL_CLAMP_TO_BORDER | GL_CLAMP_TO_EDGE | GL_MIRRORED_REPEAT | GL_REPEAT => true,
        _ => false,
    }
}

/// Checks the generation mode against the coordinate it is set on.
fn validate_generation_mode(coord: GLenum, mode: GLenum) -> Result<()> {
    match mode {
        GL_EYE_LINEAR | GL_OBJECT_LINEAR | GL_SPHERE_MAP | GL_NORMAL_MAP | GL_REFLECTION_MAP => {}
        _ => return Err(Error::InvalidEnum),
    }

    fail_if!((coord == GL_R || coord == GL_Q) && mode == GL_SPHERE_MAP, InvalidEnum);
    fail_if!(
        coord == GL_Q && (mode == GL_REFLECTION_MAP || mode == GL_NORMAL_MAP),
        InvalidEnum
    );

    Ok(())
}

impl<D: Device> Context<D> {
    #[inline]
    fn active_texture_unit_mut(&mut self) -> &mut TextureUnit {
        &mut self.texture_units[self.active_texture_unit_index]
    }

    /// Returns the texture object bound to the 2D target of the active unit.
    #[inline]
    fn active_texture_2d(&self) -> TextureRef {
        self.texture_units[self.active_texture_unit_index]
            .texture_2d_target_texture()
            .clone()
    }

    fn texture_unit_index(&self, texture: GLenum) -> Result<usize> {
        let num_units = self.texture_units.len() as GLenum;
        fail_if!(texture < GL_TEXTURE0 || texture >= GL_TEXTURE0 + num_units, InvalidEnum);
        Ok((texture - GL_TEXTURE0) as usize)
    }

    #[inline]
    pub fn active_texture_unit(&self) -> &TextureUnit {
        &self.texture_units[self.active_texture_unit_index]
    }

    #[inline]
    pub fn active_texture_unit_index(&self) -> usize {
        self.active_texture_unit_index
    }

    #[inline]
    pub fn texture_unit(&self, index: usize) -> Option<&TextureUnit> {
        self.texture_units.get(index)
    }

    #[inline]
    pub fn texture_units(&self) -> &[TextureUnit] {
        &self.texture_units
    }

    /// Returns the object that texture name 0 refers to.
    #[inline]
    pub fn default_texture_2d(&self) -> &TextureRef {
        &self.default_texture_2d
    }

    /// Returns the texture object registered under `name`, if it has been
    /// materialized.
    pub fn texture(&self, name: GLuint) -> Option<TextureRef> {
        if name == 0 {
            return Some(self.default_texture_2d.clone());
        }

        self.allocated_textures.get(&name).and_then(|v| v.clone())
    }

    /// Returns the current texture coordinates of a texture unit.
    #[inline]
    pub fn current_tex_coord(&self, unit: usize) -> Option<Vector4<f32>> {
        self.current_vertex_tex_coord.get(unit).cloned()
    }

    /// Returns the texture coordinate array of a texture unit.
    #[inline]
    pub fn tex_coord_pointer_of(&self, unit: usize) -> Option<&TexCoordPointer> {
        self.client_tex_coord_pointer
            .get(unit)
            .and_then(|v| v.as_ref())
    }

    #[inline]
    pub fn client_active_texture_index(&self) -> usize {
        self.client_active_texture
    }
}

impl<D: Device> Context<D> {
    /// Selects the texture unit that subsequent texture state calls act on.
    pub fn active_texture(&mut self, texture: GLenum) {
        match self.texture_unit_index(texture) {
            Ok(index) => self.active_texture_unit_index = index,
            Err(err) => {
                self.latch::<()>(Err(err));
            }
        }
    }

    /// Selects the texture unit whose client array `tex_coord_pointer` sets.
    pub fn client_active_texture(&mut self, texture: GLenum) {
        match self.texture_unit_index(texture) {
            Ok(index) => self.client_active_texture = index,
            Err(err) => {
                self.latch::<()>(Err(err));
            }
        }
    }

    /// Reserves `n` unused texture names. The texture objects are created once
    /// the names are bound.
    pub fn gen_textures(&mut self, n: GLsizei) -> Vec<GLuint> {
        let result = self.gen_textures_internal(n);
        self.latch(result).unwrap_or_default()
    }

    fn gen_textures_internal(&mut self, n: GLsizei) -> Result<Vec<GLuint>> {
        fail_if!(n < 0, InvalidValue);
        fail_if!(self.in_draw_state, InvalidOperation);

        let names = self.name_allocator.allocate(n as usize);
        for &name in &names {
            self.allocated_textures.insert(name, None);
        }

        Ok(names)
    }

    /// Deletes texture objects. Units that have one of them bound revert to
    /// the default texture. Name 0, unknown names and names without an object
    /// are skipped.
    pub fn delete_textures(&mut self, names: &[GLuint]) {
        let result = self.delete_textures_internal(names);
        self.latch(result);
    }

    fn delete_textures_internal(&mut self, names: &[GLuint]) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);

        for &name in names {
            if name == 0 {
                continue;
            }

            let texture = match self.allocated_textures.get(&name) {
                Some(Some(v)) => v.clone(),
                _ => continue,
            };

            self.name_allocator.free(name);

            for unit in self.texture_units.iter_mut() {
                if texture.borrow().is_texture_2d() && unit.is_bound(&texture) {
                    unit.set_texture_2d_target_texture(self.default_texture_2d.clone());
                    self.dirty |= DirtyFlags::SAMPLER_CONFIG;
                }
            }

            self.allocated_textures.remove(&name);
        }

        Ok(())
    }

    /// Binds the texture object `name` to `target` of the active unit. Unknown
    /// names are materialized on the fly unless disabled by `ContextParams`.
    pub fn bind_texture(&mut self, target: GLenum, name: GLuint) {
        let result = self.bind_texture_internal(target, name);
        self.latch(result);
    }

    fn bind_texture_internal(&mut self, target: GLenum, name: GLuint) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);

        match target {
            GL_TEXTURE_2D => {}
            GL_TEXTURE_1D | GL_TEXTURE_3D | GL_TEXTURE_1D_ARRAY | GL_TEXTURE_2D_ARRAY
            | GL_TEXTURE_CUBE_MAP => {
                warn!(
                    "Binding to target {:#x} is not supported, only GL_TEXTURE_2D is.",
                    target
                );
                return Ok(());
            }
            _ => return Err(Error::InvalidEnum),
        }

        let texture_2d = if name == 0 {
            self.default_texture_2d.clone()
        } else {
            match self.allocated_textures.get(&name) {
                Some(Some(texture)) => {
                    fail_if!(!texture.borrow().is_texture_2d(), InvalidOperation);
                    texture.clone()
                }
                Some(None) => self.materialize_texture_2d(name),
                None => {
                    fail_if!(!self.params.implicit_texture_names, InvalidOperation);
                    self.name_allocator.reserve(name);
                    self.materialize_texture_2d(name)
                }
            }
        };

        self.active_texture_unit_mut()
            .set_texture_2d_target_texture(texture_2d);
        self.dirty |= DirtyFlags::SAMPLER_CONFIG;
        Ok(())
    }

    fn materialize_texture_2d(&mut self, name: GLuint) -> TextureRef {
        let texture = Rc::new(RefCell::new(Texture2D::new()));
        self.allocated_textures.insert(name, Some(texture.clone()));
        texture
    }

    /// Returns true if `name` refers to a materialized texture object.
    pub fn is_texture(&mut self, name: GLuint) -> bool {
        if self.in_draw_state {
            self.latch::<()>(Err(Error::InvalidOperation));
            return false;
        }

        name != 0 && self.allocated_textures.get(&name).map_or(false, |v| v.is_some())
    }
}

impl<D: Device> Context<D> {
    /// Sets the current texture coordinates of unit 0.
    pub fn tex_coord(&mut self, s: GLfloat, t: GLfloat, r: GLfloat, q: GLfloat) {
        if self.record(Command::TexCoord([s, t, r, q])) {
            return;
        }

        self.current_vertex_tex_coord[0] = Vector4::new(s, t, r, q);
    }

    /// Sets the current texture coordinates of the unit `target`.
    pub fn multi_tex_coord(
        &mut self,
        target: GLenum,
        s: GLfloat,
        t: GLfloat,
        r: GLfloat,
        q: GLfloat,
    ) {
        if self.record(Command::MultiTexCoord(target, [s, t, r, q])) {
            return;
        }

        match self.texture_unit_index(target) {
            Ok(index) => self.current_vertex_tex_coord[index] = Vector4::new(s, t, r, q),
            Err(err) => {
                self.latch::<()>(Err(err));
            }
        }
    }

    /// Sets the texture coordinate array of the client active unit.
    pub fn tex_coord_pointer(
        &mut self,
        size: GLint,
        data_type: GLenum,
        stride: GLsizei,
        data: Rc<[u8]>,
    ) {
        let result = self.tex_coord_pointer_internal(size, data_type, stride, data);
        self.latch(result);
    }

    fn tex_coord_pointer_internal(
        &mut self,
        size: GLint,
        data_type: GLenum,
        stride: GLsizei,
        data: Rc<[u8]>,
    ) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(size < 1 || size > 4, InvalidValue);
        fail_if!(
            data_type != GL_SHORT
                && data_type != GL_INT
                && data_type != GL_FLOAT
                && data_type != GL_DOUBLE,
            InvalidEnum
        );
        fail_if!(stride < 0, InvalidValue);

        self.client_tex_coord_pointer[self.client_active_texture] = Some(TexCoordPointer {
            size,
            data_type,
            stride,
            data,
        });

        Ok(())
    }
}

impl<D: Device> Context<D> {
    /// Sets a scalar parameter of the texture environment of the active unit.
    pub fn tex_env(&mut self, target: GLenum, pname: GLenum, param: GLfloat) {
        if self.record(Command::TexEnv(target, pname, param)) {
            return;
        }

        let result = self.tex_env_internal(target, pname, param);
        self.latch(result);
    }

    fn tex_env_internal(&mut self, target: GLenum, pname: GLenum, param: GLfloat) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(target != GL_TEXTURE_ENV && target != GL_TEXTURE_FILTER_CONTROL, InvalidEnum);
        fail_if!(target == GL_TEXTURE_FILTER_CONTROL && pname != GL_TEXTURE_LOD_BIAS, InvalidEnum);

        let value = param as GLenum;
        let unit = self.active_texture_unit_mut();

        if target == GL_TEXTURE_FILTER_CONTROL {
            unit.level_of_detail_bias = param;
            self.dirty |= DirtyFlags::SAMPLER_CONFIG;
            return Ok(());
        }

        match pname {
            GL_ALPHA_SCALE => {
                fail_if!(param != 1.0 && param != 2.0 && param != 4.0, InvalidValue);
                unit.alpha_scale = param;
            }
            GL_RGB_SCALE => {
                fail_if!(param != 1.0 && param != 2.0 && param != 4.0, InvalidValue);
                unit.rgb_scale = param;
            }
            GL_COMBINE_ALPHA => match value {
                GL_ADD | GL_ADD_SIGNED | GL_INTERPOLATE | GL_MODULATE | GL_REPLACE
                | GL_SUBTRACT => unit.alpha_combinator = value,
                _ => return Err(Error::InvalidEnum),
            },
            GL_COMBINE_RGB => match value {
                GL_ADD | GL_ADD_SIGNED | GL_DOT3_RGB | GL_DOT3_RGBA | GL_INTERPOLATE
                | GL_MODULATE | GL_REPLACE | GL_SUBTRACT => unit.rgb_combinator = value,
                _ => return Err(Error::InvalidEnum),
            },
            GL_OPERAND0_ALPHA..=GL_OPERAND2_ALPHA => match value {
                GL_ONE_MINUS_SRC_ALPHA | GL_SRC_ALPHA => {
                    unit.alpha_operand[(pname - GL_OPERAND0_ALPHA) as usize] = value;
                }
                _ => return Err(Error::InvalidEnum),
            },
            GL_OPERAND0_RGB..=GL_OPERAND2_RGB => match value {
                GL_ONE_MINUS_SRC_ALPHA | GL_ONE_MINUS_SRC_COLOR | GL_SRC_ALPHA | GL_SRC_COLOR => {
                    unit.rgb_operand[(pname - GL_OPERAND0_RGB) as usize] = value;
                }
                _ => return Err(Error::InvalidEnum),
            },
            GL_SRC0_ALPHA..=GL_SRC2_ALPHA => {
                fail_if!(!is_valid_source(value), InvalidEnum);
                unit.alpha_source[(pname - GL_SRC0_ALPHA) as usize] = value;
            }
            GL_SRC0_RGB..=GL_SRC2_RGB => {
                fail_if!(!is_valid_source(value), InvalidEnum);
                unit.rgb_source[(pname - GL_SRC0_RGB) as usize] = value;
            }
            GL_TEXTURE_ENV_MODE => match value {
                GL_ADD | GL_BLEND | GL_COMBINE | GL_DECAL | GL_MODULATE | GL_REPLACE => {
                    unit.env_mode = value;
                }
                _ => return Err(Error::InvalidEnum),
            },
            _ => return Err(Error::InvalidEnum),
        }

        self.dirty |= DirtyFlags::SAMPLER_CONFIG;
        Ok(())
    }

    /// Sets a parameter of the texture environment of the active unit. Besides
    /// `GL_TEXTURE_ENV_COLOR`, every scalar parameter of `tex_env` is accepted
    /// and takes its value from `params[0]`.
    pub fn tex_envfv(&mut self, target: GLenum, pname: GLenum, params: [GLfloat; 4]) {
        if self.record(Command::TexEnvfv(target, pname, params)) {
            return;
        }

        let result = if pname == GL_TEXTURE_ENV_COLOR {
            self.tex_env_color(target, params)
        } else {
            self.tex_env_internal(target, pname, params[0])
        };

        self.latch(result);
    }

    fn tex_env_color(&mut self, target: GLenum, params: [GLfloat; 4]) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(target != GL_TEXTURE_ENV, InvalidEnum);

        self.active_texture_unit_mut().env_color = Vector4::from(params);
        self.dirty |= DirtyFlags::SAMPLER_CONFIG;
        Ok(())
    }
}

impl<D: Device> Context<D> {
    /// Sets the generation mode of the coordinate `coord` of the active unit.
    pub fn tex_gen(&mut self, coord: GLenum, pname: GLenum, param: GLint) {
        if self.record(Command::TexGen(coord, pname, param)) {
            return;
        }

        let result = self.tex_gen_internal(coord, pname, param);
        self.latch(result);
    }

    fn tex_gen_internal(&mut self, coord: GLenum, pname: GLenum, param: GLint) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(coord < GL_S || coord > GL_Q, InvalidEnum);
        fail_if!(pname != GL_TEXTURE_GEN_MODE, InvalidEnum);

        let mode = param as GLenum;
        validate_generation_mode(coord, mode)?;

        let i = (coord - GL_S) as usize;
        self.active_texture_unit_mut().tex_coord_generation[i].generation_mode = mode;
        self.dirty |= DirtyFlags::TEXCOORD_GENERATION;
        Ok(())
    }

    /// Sets the generation mode or one of the planes of the coordinate `coord`
    /// of the active unit. Eye planes are transformed by the inverse of the
    /// current model-view matrix and kept in eye space.
    pub fn tex_genfv(&mut self, coord: GLenum, pname: GLenum, params: [GLfloat; 4]) {
        if self.record(Command::TexGenfv(coord, pname, params)) {
            return;
        }

        let result = self.tex_genfv_internal(coord, pname, params);
        self.latch(result);
    }

    fn tex_genfv_internal(
        &mut self,
        coord: GLenum,
        pname: GLenum,
        params: [GLfloat; 4],
    ) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(coord < GL_S || coord > GL_Q, InvalidEnum);

        let i = (coord - GL_S) as usize;
        match pname {
            GL_TEXTURE_GEN_MODE => {
                let mode = params[0] as GLenum;
                validate_generation_mode(coord, mode)?;
                self.active_texture_unit_mut().tex_coord_generation[i].generation_mode = mode;
            }
            GL_OBJECT_PLANE => {
                self.active_texture_unit_mut().tex_coord_generation[i].object_plane_coefficients =
                    Vector4::from(params);
            }
            GL_EYE_PLANE => {
                let inverse_model_view = match self.model_view_matrix.invert() {
                    Some(v) => v,
                    None => {
                        warn!("Model-view matrix is singular, eye plane is kept untransformed.");
                        SquareMatrix::identity()
                    }
                };

                let coefficients = inverse_model_view * Vector4::from(params);
                self.active_texture_unit_mut().tex_coord_generation[i].eye_plane_coefficients =
                    coefficients;
            }
            _ => return Err(Error::InvalidEnum),
        }

        self.dirty |= DirtyFlags::TEXCOORD_GENERATION;
        Ok(())
    }
}

impl<D: Device> Context<D> {
    /// Sets a scalar parameter of the texture object bound to the active unit.
    pub fn tex_parameter(&mut self, target: GLenum, pname: GLenum, param: GLfloat) {
        if self.record(Command::TexParameter(target, pname, param)) {
            return;
        }

        let result = self.tex_parameter_internal(target, pname, param);
        self.latch(result);
    }

    fn tex_parameter_internal(
        &mut self,
        target: GLenum,
        pname: GLenum,
        param: GLfloat,
    ) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(target != GL_TEXTURE_2D, InvalidEnum);

        let value = param as GLenum;
        let texture_2d = self.active_texture_2d();
        let mut texture_2d = texture_2d.borrow_mut();
        let sampler = texture_2d.sampler_mut();

        match pname {
            GL_TEXTURE_MIN_FILTER => match value {
                GL_NEAREST
                | GL_LINEAR
                | GL_NEAREST_MIPMAP_NEAREST
                | GL_LINEAR_MIPMAP_NEAREST
                | GL_NEAREST_MIPMAP_LINEAR
                | GL_LINEAR_MIPMAP_LINEAR => sampler.min_filter = value,
                _ => return Err(Error::InvalidEnum),
            },
            GL_TEXTURE_MAG_FILTER => match value {
                GL_NEAREST | GL_LINEAR => sampler.mag_filter = value,
                _ => return Err(Error::InvalidEnum),
            },
            GL_TEXTURE_WRAP_S => {
                fail_if!(!is_valid_wrap_mode(value), InvalidEnum);
                sampler.wrap_s_mode = value;
            }
            GL_TEXTURE_WRAP_T => {
                fail_if!(!is_valid_wrap_mode(value), InvalidEnum);
                sampler.wrap_t_mode = value;
            }
            _ => return Err(Error::InvalidEnum),
        }

        self.dirty |= DirtyFlags::SAMPLER_CONFIG;
        Ok(())
    }

    /// Sets a vector parameter of the texture object bound to the active unit,
    /// only `GL_TEXTURE_BORDER_COLOR` is supported.
    pub fn tex_parameterfv(&mut self, target: GLenum, pname: GLenum, params: [GLfloat; 4]) {
        if self.record(Command::TexParameterfv(target, pname, params)) {
            return;
        }

        let result = self.tex_parameterfv_internal(target, pname, params);
        self.latch(result);
    }

    fn tex_parameterfv_internal(
        &mut self,
        target: GLenum,
        pname: GLenum,
        params: [GLfloat; 4],
    ) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(target != GL_TEXTURE_2D, InvalidEnum);
        fail_if!(pname != GL_TEXTURE_BORDER_COLOR, InvalidEnum);

        self.active_texture_2d().borrow_mut().sampler_mut().border_color = Vector4::from(params);
        self.dirty |= DirtyFlags::SAMPLER_CONFIG;
        Ok(())
    }

    /// Queries a parameter of mip level `level` of the texture object bound to
    /// the active unit.
    pub fn get_tex_parameter_integerv(
        &mut self,
        target: GLenum,
        level: GLint,
        pname: GLenum,
    ) -> Option<GLint> {
        let result = self.get_tex_parameter_integerv_internal(target, level, pname);
        self.latch(result)
    }

    fn get_tex_parameter_integerv_internal(
        &self,
        target: GLenum,
        level: GLint,
        pname: GLenum,
    ) -> Result<GLint> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(target != GL_TEXTURE_2D, InvalidEnum);
        fail_if!(
            pname != GL_TEXTURE_WIDTH
                && pname != GL_TEXTURE_HEIGHT
                && pname != GL_TEXTURE_INTERNAL_FORMAT,
            InvalidEnum
        );
        fail_if!(!is_valid_level(level), InvalidValue);

        let texture_2d = self.active_texture_2d();
        let texture_2d = texture_2d.borrow();

        let v = match pname {
            GL_TEXTURE_WIDTH => texture_2d.width_at_lod(level as u32) as GLint,
            GL_TEXTURE_HEIGHT => texture_2d.height_at_lod(level as u32) as GLint,
            _ => texture_2d.internal_format() as GLint,
        };

        Ok(v)
    }
}

impl<D: Device> Context<D> {
    fn validate_image_size(&self, width: GLsizei, height: GLsizei, border: GLint) -> Result<()> {
        fail_if!(!is_valid_size(width, height), InvalidValue);
        if !self.device_info.supports_npot_textures {
            fail_if!(!is_power_of_two(width) || !is_power_of_two(height), InvalidValue);
        }
        fail_if!(border != 0, InvalidValue);
        Ok(())
    }

    /// Defines the image of mip level `level` of the texture object bound to
    /// the active unit. The device image is created when the base level is
    /// specified. Without `data` the level is defined but its texels are left
    /// untouched.
    pub fn tex_image_2d(
        &mut self,
        target: GLenum,
        level: GLint,
        internal_format: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: GLenum,
        data_type: GLenum,
        data: Option<&[u8]>,
    ) {
        let result = self.tex_image_2d_internal(
            target,
            level,
            internal_format as GLenum,
            width,
            height,
            border,
            format,
            data_type,
            data,
        );

        self.latch(result);
    }

    fn tex_image_2d_internal(
        &mut self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: GLenum,
        data_type: GLenum,
        data: Option<&[u8]>,
    ) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(
            internal_format == GL_NONE || format == GL_NONE || data_type == GL_NONE,
            InvalidEnum
        );

        let pixel_type = validated_pixel_type(target, internal_format, format, data_type)?;
        fail_if!(!is_valid_level(level), InvalidValue);
        self.validate_image_size(width, height, border)?;

        let layout = ImageDataLayout {
            pixel_type,
            packing: self.unpack,
            dimensions: ImageExtent::new(width as u32, height as u32, 1),
            selection: ImageExtent::new(width as u32, height as u32, 1),
        };

        if let Some(data) = data {
            fail_if!(data.len() < layout.byte_size(), InvalidOperation);
        }

        let texture_2d = self.active_texture_2d();
        let mut texture_2d = texture_2d.borrow_mut();

        if level == 0 {
            // Levels specified before the base level stay undefined in the new
            // image until they are specified again.
            let image = self.device.create_image(
                pixel_format_for_internal_format(internal_format),
                width as u32,
                height as u32,
                1,
                LOG2_MAX_TEXTURE_SIZE,
            );

            texture_2d.set_device_image(image);
            self.dirty |= DirtyFlags::SAMPLER_CONFIG;
        }

        texture_2d.upload_texture_data(level as u32, internal_format, &layout, data);
        Ok(())
    }

    /// Replaces a region of mip level `level` of the texture object bound to
    /// the active unit.
    pub fn tex_sub_image_2d(
        &mut self,
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        data_type: GLenum,
        data: &[u8],
    ) {
        let result = self.tex_sub_image_2d_internal(
            target, level, xoffset, yoffset, width, height, format, data_type, data,
        );

        self.latch(result);
    }

    fn tex_sub_image_2d_internal(
        &mut self,
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        data_type: GLenum,
        data: &[u8],
    ) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(!is_valid_level(level), InvalidValue);
        fail_if!(!is_valid_size(width, height), InvalidValue);

        let texture_2d = self.active_texture_2d();
        let texture_2d = texture_2d.borrow();
        fail_if!(texture_2d.device_image().is_none(), InvalidOperation);

        fail_if!(format == GL_NONE || data_type == GL_NONE, InvalidEnum);
        let internal_format = texture_2d.internal_format();
        let pixel_type = validated_pixel_type(target, internal_format, format, data_type)?;

        let level = level as u32;
        fail_if!(
            !fits(xoffset, width, texture_2d.width_at_lod(level))
                || !fits(yoffset, height, texture_2d.height_at_lod(level)),
            InvalidValue
        );

        let layout = ImageDataLayout {
            pixel_type,
            packing: self.unpack,
            dimensions: ImageExtent::new(width as u32, height as u32, 1),
            selection: ImageExtent::new(width as u32, height as u32, 1),
        };

        fail_if!(data.len() < layout.byte_size(), InvalidOperation);

        let offset = Vector3::new(xoffset, yoffset, 0);
        texture_2d.replace_sub_texture_data(level, &layout, offset, data);
        Ok(())
    }

    /// Defines mip level `level` of the texture object bound to the active unit
    /// with a block of the color or depth buffer, depending on the internal
    /// format.
    pub fn copy_tex_image_2d(
        &mut self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
    ) {
        let command =
            Command::CopyTexImage2D(target, level, internal_format, x, y, width, height, border);
        if self.record(command) {
            return;
        }

        let result = self.copy_tex_image_2d_internal(
            target,
            level,
            internal_format,
            x,
            y,
            width,
            height,
            border,
        );

        self.latch(result);
    }

    fn copy_tex_image_2d_internal(
        &mut self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
    ) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(internal_format == GL_NONE, InvalidEnum);

        let pixel_type = validated_pixel_type(target, internal_format, GL_NONE, GL_NONE)?;
        fail_if!(!is_valid_level(level), InvalidValue);
        self.validate_image_size(width, height, border)?;

        let texture_2d = self.active_texture_2d();
        let mut texture_2d = texture_2d.borrow_mut();
        fail_if!(level != 0 && texture_2d.device_image().is_none(), InvalidOperation);

        if level == 0 {
            let image = self.device.create_image(
                pixel_format_for_internal_format(internal_format),
                width as u32,
                height as u32,
                1,
                LOG2_MAX_TEXTURE_SIZE,
            );

            texture_2d.set_device_image(image);
            self.dirty |= DirtyFlags::SAMPLER_CONFIG;
        }

        texture_2d.set_internal_format(internal_format);
        texture_2d.set_lod_dimensions(level as u32, width as u32, height as u32);

        let image = match texture_2d.device_image() {
            Some(v) => v.clone(),
            None => return Err(Error::InvalidOperation),
        };

        let size = Vector2::new(width as u32, height as u32);
        let src = Vector2::new(x, y);
        let dst = Vector3::new(0, 0, 0);

        match pixel_type.format {
            PixelFormat::DepthComponent => {
                self.device
                    .blit_from_depth_buffer(&*image, level as u32, size, src, dst)
            }
            PixelFormat::StencilIndex => {
                warn!("Copying from the stencil buffer is not supported.");
            }
            _ => self
                .device
                .blit_from_color_buffer(&*image, level as u32, size, src, dst),
        }

        Ok(())
    }

    /// Replaces a region of mip level `level` of the texture object bound to
    /// the active unit with a block of the color or depth buffer.
    pub fn copy_tex_sub_image_2d(
        &mut self,
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
    ) {
        let command =
            Command::CopyTexSubImage2D(target, level, xoffset, yoffset, x, y, width, height);
        if self.record(command) {
            return;
        }

        let result = self.copy_tex_sub_image_2d_internal(
            target, level, xoffset, yoffset, x, y, width, height,
        );

        self.latch(result);
    }

    fn copy_tex_sub_image_2d_internal(
        &mut self,
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
    ) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(target != GL_TEXTURE_2D, InvalidEnum);
        fail_if!(!is_valid_level(level), InvalidValue);
        fail_if!(!is_valid_size(width, height), InvalidValue);

        let texture_2d = self.active_texture_2d();
        let texture_2d = texture_2d.borrow();
        let image = match texture_2d.device_image() {
            Some(v) => v.clone(),
            None => return Err(Error::InvalidOperation),
        };

        let level = level as u32;
        fail_if!(
            !fits(xoffset, width, texture_2d.width_at_lod(level))
                || !fits(yoffset, height, texture_2d.height_at_lod(level)),
            InvalidValue
        );

        let size = Vector2::new(width as u32, height as u32);
        let src = Vector2::new(x, y);
        let dst = Vector3::new(xoffset, yoffset, 0);

        match pixel_format_for_internal_format(texture_2d.internal_format()) {
            PixelFormat::DepthComponent => {
                self.device.blit_from_depth_buffer(&*image, level, size, src, dst)
            }
            PixelFormat::StencilIndex => {
                warn!("Copying from the stencil buffer is not supported.");
            }
            _ => self.device.blit_from_color_buffer(&*image, level, size, src, dst),
        }

        Ok(())
    }

    /// Reads mip level `level` of the texture object bound to the active unit
    /// into `pixels`.
    pub fn get_tex_image(
        &mut self,
        target: GLenum,
        level: GLint,
        format: GLenum,
        data_type: GLenum,
        pixels: &mut [u8],
    ) {
        let result = self.get_tex_image_internal(target, level, format, data_type, pixels);
        self.latch(result);
    }

    fn get_tex_image_internal(
        &mut self,
        target: GLenum,
        level: GLint,
        format: GLenum,
        data_type: GLenum,
        pixels: &mut [u8],
    ) -> Result<()> {
        fail_if!(!is_valid_level(level), InvalidValue);
        fail_if!(format == GL_NONE || data_type == GL_NONE, InvalidEnum);
        let pixel_type = validated_pixel_type(target, GL_NONE, format, data_type)?;

        let texture_2d = self.active_texture_2d();
        let texture_2d = texture_2d.borrow();

        let level = level as u32;
        let width = texture_2d.width_at_lod(level);
        let height = texture_2d.height_at_lod(level);

        let layout = ImageDataLayout {
            pixel_type,
            packing: self.pack,
            dimensions: ImageExtent::new(width, height, 1),
            selection: ImageExtent::new(width, height, 1),
        };

        fail_if!(pixels.len() < layout.byte_size(), InvalidOperation);

        texture_2d.download_texture_data(level, &layout, pixels);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::device::headless::{HeadlessDevice, HeadlessParams};

    fn context() -> Context<HeadlessDevice> {
        Context::new(HeadlessDevice::new(HeadlessParams::default()))
    }

    #[test]
    fn validation_helpers() {
        assert!(is_power_of_two(1) && is_power_of_two(64));
        assert!(!is_power_of_two(0) && !is_power_of_two(3));

        assert!(is_valid_level(0) && is_valid_level(11));
        assert!(!is_valid_level(-1) && !is_valid_level(12));

        assert!(is_valid_size(2050, 0));
        assert!(!is_valid_size(2051, 1) && !is_valid_size(1, -1));

        assert!(is_valid_source(GL_TEXTURE31));
        assert!(!is_valid_source(GL_TEXTURE31 + 1));
    }

    #[test]
    fn units() {
        let mut ctx = context();

        ctx.active_texture(GL_TEXTURE1);
        assert_eq!(ctx.active_texture_unit_index(), 1);

        ctx.active_texture(GL_TEXTURE2);
        assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
        assert_eq!(ctx.active_texture_unit_index(), 1);

        ctx.multi_tex_coord(GL_TEXTURE1, 1.0, 2.0, 3.0, 4.0);
        ctx.tex_coord(5.0, 6.0, 7.0, 8.0);
        assert_eq!(ctx.current_tex_coord(1), Some(Vector4::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(ctx.current_tex_coord(0), Some(Vector4::new(5.0, 6.0, 7.0, 8.0)));

        ctx.multi_tex_coord(GL_TEXTURE3, 1.0, 2.0, 3.0, 4.0);
        assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
    }

    #[test]
    fn tex_coord_pointer() {
        let mut ctx = context();
        let data: Rc<[u8]> = Rc::from(vec![0u8; 32]);

        ctx.client_active_texture(GL_TEXTURE1);
        ctx.tex_coord_pointer(2, GL_FLOAT, 8, data.clone());
        assert_eq!(ctx.get_error(), None);
        assert!(ctx.tex_coord_pointer_of(0).is_none());
        assert_eq!(ctx.tex_coord_pointer_of(1).map(|v| v.size), Some(2));

        ctx.tex_coord_pointer(5, GL_FLOAT, 0, data.clone());
        assert_eq!(ctx.get_error(), Some(Error::InvalidValue));
        ctx.tex_coord_pointer(2, GL_UNSIGNED_BYTE, 0, data.clone());
        assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
        ctx.tex_coord_pointer(2, GL_SHORT, -4, data);
        assert_eq!(ctx.get_error(), Some(Error::InvalidValue));
    }

    #[test]
    fn tex_parameters() {
        let mut ctx = context();

        ctx.tex_parameter(GL_TEXTURE_2D, GL_TEXTURE_MIN_FILTER, GL_LINEAR_MIPMAP_NEAREST as f32);
        ctx.tex_parameter(GL_TEXTURE_2D, GL_TEXTURE_WRAP_T, GL_MIRRORED_REPEAT as f32);
        ctx.tex_parameterfv(GL_TEXTURE_2D, GL_TEXTURE_BORDER_COLOR, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(ctx.get_error(), None);

        {
            let texture = ctx.default_texture_2d().borrow();
            assert_eq!(texture.sampler().min_filter, GL_LINEAR_MIPMAP_NEAREST);
            assert_eq!(texture.sampler().wrap_t_mode, GL_MIRRORED_REPEAT);
            assert_eq!(texture.sampler().border_color, Vector4::new(0.5, 0.5, 0.5, 1.0));
        }

        ctx.tex_parameter(GL_TEXTURE_2D, GL_TEXTURE_MAG_FILTER, GL_LINEAR_MIPMAP_LINEAR as f32);
        assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
        ctx.tex_parameter(GL_TEXTURE_3D, GL_TEXTURE_MAG_FILTER, GL_LINEAR as f32);
        assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
        ctx.tex_parameterfv(GL_TEXTURE_2D, GL_TEXTURE_WRAP_S, [0.0; 4]);
        assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
        assert_eq!(ctx.default_texture_2d().borrow().sampler().mag_filter, GL_LINEAR);
    }
}
