//! The client-facing context. Every entry point validates its arguments against
//! the current state, latches an `Error` on failure and otherwise mutates the
//! texture state, marking the parts of the device configuration it affects as
//! dirty. The dirty parts are pushed to the `Device` lazily, see
//! `Context::sync_device_config`.

mod list;
mod pixel;
mod settings;
mod sync;
mod texture;

pub use self::list::Command;
pub use self::pixel::{pixel_format_for_internal_format, validated_pixel_type};
pub use self::settings::ContextParams;
pub use self::texture::TexCoordPointer;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::device::{Device, DeviceInfo, PackingSpecification};
use crate::enums::*;
use crate::errors::*;
use crate::math::{Matrix4, SquareMatrix, Vector4};
use crate::texture::{Texture2D, TextureRef, TextureUnit};
use crate::utils::NameAllocator;

use self::list::CallLists;

bitflags! {
    /// The parts of the device configuration that are out of date.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        const SAMPLER_CONFIG = 1 << 0;
        const TEXCOORD_GENERATION = 1 << 1;
    }
}

pub struct Context<D: Device> {
    device: D,
    device_info: DeviceInfo,
    params: ContextParams,

    error: Option<Error>,
    in_draw_state: bool,
    current_draw_mode: GLenum,
    dirty: DirtyFlags,
    model_view_matrix: Matrix4<f32>,

    name_allocator: NameAllocator,
    allocated_textures: HashMap<GLuint, Option<TextureRef>>,
    default_texture_2d: TextureRef,
    texture_units: SmallVec<[TextureUnit; 8]>,
    active_texture_unit_index: usize,
    client_active_texture: usize,
    current_vertex_tex_coord: SmallVec<[Vector4<f32>; 8]>,
    client_tex_coord_pointer: SmallVec<[Option<TexCoordPointer>; 8]>,

    pack: PackingSpecification,
    unpack: PackingSpecification,

    lists: CallLists,
}

impl<D: Device> Context<D> {
    /// Creates a new `Context` with default `ContextParams`.
    pub fn new(device: D) -> Self {
        Context::with_params(device, ContextParams::default())
    }

    /// Creates a new `Context` driving `device`. The number of texture units is
    /// fixed by the capabilities reported by the device.
    pub fn with_params(device: D, params: ContextParams) -> Self {
        let device_info = device.info();
        info!(
            "Creates context with {} texture units (npot textures: {}).",
            device_info.num_texture_units, device_info.supports_npot_textures
        );

        // There is always an active unit.
        let num_units = device_info.num_texture_units.max(1) as usize;
        let default_texture_2d = Rc::new(RefCell::new(Texture2D::new()));

        let texture_units = (0..num_units)
            .map(|_| TextureUnit::new(default_texture_2d.clone()))
            .collect();

        let mut current_vertex_tex_coord = SmallVec::new();
        current_vertex_tex_coord.resize(num_units, Vector4::new(0.0, 0.0, 0.0, 1.0));

        let mut client_tex_coord_pointer = SmallVec::new();
        client_tex_coord_pointer.resize(num_units, None);

        Context {
            device,
            device_info,
            params,

            error: None,
            in_draw_state: false,
            current_draw_mode: GL_NONE,
            dirty: DirtyFlags::all(),
            model_view_matrix: Matrix4::identity(),

            name_allocator: NameAllocator::new(),
            allocated_textures: HashMap::new(),
            default_texture_2d,
            texture_units,
            active_texture_unit_index: 0,
            client_active_texture: 0,
            current_vertex_tex_coord,
            client_tex_coord_pointer,

            pack: PackingSpecification::default(),
            unpack: PackingSpecification::default(),

            lists: CallLists::default(),
        }
    }

    #[inline]
    pub fn device(&self) -> &D {
        &self.device
    }

    #[inline]
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    #[inline]
    pub fn params(&self) -> ContextParams {
        self.params
    }

    /// Returns the latched error and clears it.
    #[inline]
    pub fn get_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// Returns the parts of the device configuration that will be pushed by the
    /// next sync.
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Records the error of a failed entry point. The first error is kept until
    /// it is fetched with `get_error`.
    fn latch<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(err) => {
                trace!("{}", err);
                if self.error.is_none() {
                    self.error = Some(err);
                }

                None
            }
        }
    }
}

impl<D: Device> Context<D> {
    /// Starts specifying the vertices of a primitive. Most state changes are
    /// illegal until the matching `end`.
    pub fn begin(&mut self, mode: GLenum) {
        let result = self.begin_internal(mode);
        self.latch(result);
    }

    fn begin_internal(&mut self, mode: GLenum) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(mode > GL_POLYGON, InvalidEnum);

        self.in_draw_state = true;
        self.current_draw_mode = mode;
        Ok(())
    }

    /// Finishes the primitive, the device is brought up to date before it
    /// rasterizes anything.
    pub fn end(&mut self) {
        if !self.in_draw_state {
            self.latch::<()>(Err(Error::InvalidOperation));
            return;
        }

        self.in_draw_state = false;
        self.current_draw_mode = GL_NONE;
        self.sync_device_config();
    }

    #[inline]
    pub fn in_draw_state(&self) -> bool {
        self.in_draw_state
    }

    /// Returns the primitive mode of the current `begin`, or `GL_NONE`.
    #[inline]
    pub fn current_draw_mode(&self) -> GLenum {
        self.current_draw_mode
    }
}

impl<D: Device> Context<D> {
    pub fn enable(&mut self, capability: GLenum) {
        if self.record(Command::Enable(capability)) {
            return;
        }

        let result = self.set_capability(capability, true);
        self.latch(result);
    }

    pub fn disable(&mut self, capability: GLenum) {
        if self.record(Command::Disable(capability)) {
            return;
        }

        let result = self.set_capability(capability, false);
        self.latch(result);
    }

    fn set_capability(&mut self, capability: GLenum, enabled: bool) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);

        let unit = &mut self.texture_units[self.active_texture_unit_index];
        match capability {
            GL_TEXTURE_2D => {
                unit.texture_2d_enabled = enabled;
                self.dirty |= DirtyFlags::SAMPLER_CONFIG;
            }
            GL_TEXTURE_GEN_S..=GL_TEXTURE_GEN_Q => {
                let i = (capability - GL_TEXTURE_GEN_S) as usize;
                unit.tex_coord_generation[i].enabled = enabled;
                self.dirty |= DirtyFlags::TEXCOORD_GENERATION;
            }
            GL_TEXTURE_1D | GL_TEXTURE_3D | GL_TEXTURE_1D_ARRAY | GL_TEXTURE_2D_ARRAY
            | GL_TEXTURE_CUBE_MAP => {
                warn!(
                    "Capability {:#x} is not supported, only GL_TEXTURE_2D is.",
                    capability
                );
            }
            _ => return Err(Error::InvalidEnum),
        }

        Ok(())
    }

    pub fn is_enabled(&mut self, capability: GLenum) -> bool {
        let result = self.is_enabled_internal(capability);
        self.latch(result).unwrap_or(false)
    }

    fn is_enabled_internal(&self, capability: GLenum) -> Result<bool> {
        fail_if!(self.in_draw_state, InvalidOperation);

        let unit = &self.texture_units[self.active_texture_unit_index];
        match capability {
            GL_TEXTURE_2D => Ok(unit.texture_2d_enabled),
            GL_TEXTURE_GEN_S..=GL_TEXTURE_GEN_Q => {
                let i = (capability - GL_TEXTURE_GEN_S) as usize;
                Ok(unit.tex_coord_generation[i].enabled)
            }
            GL_TEXTURE_1D | GL_TEXTURE_3D | GL_TEXTURE_1D_ARRAY | GL_TEXTURE_2D_ARRAY
            | GL_TEXTURE_CUBE_MAP => Ok(false),
            _ => Err(Error::InvalidEnum),
        }
    }
}

impl<D: Device> Context<D> {
    /// Replaces the model-view matrix.
    pub fn load_matrix(&mut self, matrix: &Matrix4<f32>) {
        let result = self.set_model_view_matrix(*matrix);
        self.latch(result);
    }

    pub fn load_identity(&mut self) {
        let result = self.set_model_view_matrix(Matrix4::identity());
        self.latch(result);
    }

    /// Post-multiplies the model-view matrix by `matrix`.
    pub fn mult_matrix(&mut self, matrix: &Matrix4<f32>) {
        let m = self.model_view_matrix * *matrix;
        let result = self.set_model_view_matrix(m);
        self.latch(result);
    }

    fn set_model_view_matrix(&mut self, matrix: Matrix4<f32>) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);
        self.model_view_matrix = matrix;
        Ok(())
    }

    #[inline]
    pub fn model_view_matrix(&self) -> Matrix4<f32> {
        self.model_view_matrix
    }
}

impl<D: Device> Context<D> {
    /// Sets how client pixel data is unpacked by uploads and packed by
    /// downloads.
    pub fn pixel_store(&mut self, pname: GLenum, param: GLint) {
        let result = self.pixel_store_internal(pname, param);
        self.latch(result);
    }

    fn pixel_store_internal(&mut self, pname: GLenum, param: GLint) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);

        match pname {
            GL_PACK_ALIGNMENT | GL_UNPACK_ALIGNMENT => {
                fail_if!(param != 1 && param != 2 && param != 4 && param != 8, InvalidValue);

                let packing = if pname == GL_PACK_ALIGNMENT {
                    &mut self.pack
                } else {
                    &mut self.unpack
                };

                packing.byte_alignment = param as u32;
            }
            GL_PACK_ROW_LENGTH | GL_UNPACK_ROW_LENGTH => {
                fail_if!(param < 0, InvalidValue);

                let packing = if pname == GL_PACK_ROW_LENGTH {
                    &mut self.pack
                } else {
                    &mut self.unpack
                };

                packing.row_length = param as u32;
            }
            _ => return Err(Error::InvalidEnum),
        }

        Ok(())
    }

    #[inline]
    pub fn pack_specification(&self) -> PackingSpecification {
        self.pack
    }

    #[inline]
    pub fn unpack_specification(&self) -> PackingSpecification {
        self.unpack
    }
}
