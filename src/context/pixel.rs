//! Negotiation between the symbolic pixel formats of the client API and the
//! formats understood by the device.

use crate::device::{PixelDataType, PixelFormat, PixelType};
use crate::enums::*;
use crate::errors::*;

fn is_valid_internal_format(internal_format: GLenum) -> bool {
    match internal_format {
        1 | 2 | 3 | 4 => true,
        GL_ALPHA | GL_ALPHA8 => true,
        GL_LUMINANCE | GL_LUMINANCE8 | GL_LUMINANCE_ALPHA | GL_LUMINANCE8_ALPHA8 => true,
        GL_INTENSITY | GL_INTENSITY8 => true,
        GL_RED | GL_R8 | GL_RG | GL_RG8 | GL_RGB | GL_RGB8 | GL_RGBA | GL_RGBA8 => true,
        GL_DEPTH_COMPONENT
        | GL_DEPTH_COMPONENT16
        | GL_DEPTH_COMPONENT24
        | GL_DEPTH_COMPONENT32 => true,
        GL_STENCIL_INDEX => true,
        _ => false,
    }
}

fn is_depth_internal_format(internal_format: GLenum) -> bool {
    match internal_format {
        GL_DEPTH_COMPONENT
        | GL_DEPTH_COMPONENT16
        | GL_DEPTH_COMPONENT24
        | GL_DEPTH_COMPONENT32 => true,
        _ => false,
    }
}

fn pixel_format(format: GLenum) -> Option<PixelFormat> {
    let v = match format {
        GL_RED => PixelFormat::Red,
        GL_GREEN => PixelFormat::Green,
        GL_BLUE => PixelFormat::Blue,
        GL_ALPHA => PixelFormat::Alpha,
        GL_RG => PixelFormat::RG,
        GL_RGB => PixelFormat::RGB,
        GL_BGR => PixelFormat::BGR,
        GL_RGBA => PixelFormat::RGBA,
        GL_BGRA => PixelFormat::BGRA,
        GL_LUMINANCE => PixelFormat::Luminance,
        GL_LUMINANCE_ALPHA => PixelFormat::LuminanceAlpha,
        GL_DEPTH_COMPONENT => PixelFormat::DepthComponent,
        GL_STENCIL_INDEX => PixelFormat::StencilIndex,
        _ => return None,
    };

    Some(v)
}

fn pixel_data_type(data_type: GLenum) -> Option<PixelDataType> {
    let v = match data_type {
        GL_BYTE => PixelDataType::Byte,
        GL_UNSIGNED_BYTE => PixelDataType::UnsignedByte,
        GL_SHORT => PixelDataType::Short,
        GL_UNSIGNED_SHORT => PixelDataType::UnsignedShort,
        GL_INT => PixelDataType::Int,
        GL_UNSIGNED_INT => PixelDataType::UnsignedInt,
        GL_FLOAT => PixelDataType::Float,
        _ => return None,
    };

    Some(v)
}

/// Maps a validated internal format to the format of the device image that
/// stores it.
///
/// # Panics
///
/// Panics if `internal_format` has not been validated by `validated_pixel_type`.
pub fn pixel_format_for_internal_format(internal_format: GLenum) -> PixelFormat {
    match internal_format {
        GL_ALPHA | GL_ALPHA8 => PixelFormat::Alpha,
        1 | GL_LUMINANCE | GL_LUMINANCE8 => PixelFormat::Luminance,
        2 | GL_LUMINANCE_ALPHA | GL_LUMINANCE8_ALPHA8 => PixelFormat::LuminanceAlpha,
        GL_INTENSITY | GL_INTENSITY8 => PixelFormat::Intensity,
        GL_RED | GL_R8 => PixelFormat::Red,
        GL_RG | GL_RG8 => PixelFormat::RG,
        3 | GL_RGB | GL_RGB8 => PixelFormat::RGB,
        4 | GL_RGBA | GL_RGBA8 => PixelFormat::RGBA,
        GL_DEPTH_COMPONENT
        | GL_DEPTH_COMPONENT16
        | GL_DEPTH_COMPONENT24
        | GL_DEPTH_COMPONENT32 => PixelFormat::DepthComponent,
        GL_STENCIL_INDEX => PixelFormat::StencilIndex,
        _ => unreachable!("Unvalidated internal format {:#x}.", internal_format),
    }
}

/// Validates the format arguments of a pixel transfer and returns the layout of
/// one client pixel.
///
/// `GL_NONE` skips the check of an argument. Without a client `format` the
/// pixel type describes the internal format instead, which is what copies from
/// the framebuffer need.
pub fn validated_pixel_type(
    target: GLenum,
    internal_format: GLenum,
    format: GLenum,
    data_type: GLenum,
) -> Result<PixelType> {
    fail_if!(target != GL_TEXTURE_2D, InvalidEnum);

    if internal_format != GL_NONE {
        fail_if!(!is_valid_internal_format(internal_format), InvalidValue);
    }

    let client_format = if format != GL_NONE {
        Some(pixel_format(format).ok_or(Error::InvalidEnum)?)
    } else {
        None
    };

    let data_type = if data_type != GL_NONE {
        pixel_data_type(data_type).ok_or(Error::InvalidEnum)?
    } else {
        PixelDataType::UnsignedByte
    };

    if internal_format != GL_NONE && format != GL_NONE {
        fail_if!(
            is_depth_internal_format(internal_format) != (format == GL_DEPTH_COMPONENT),
            InvalidOperation
        );
    }

    let format = match client_format {
        Some(v) => v,
        None if internal_format != GL_NONE => pixel_format_for_internal_format(internal_format),
        None => return Err(Error::InvalidEnum),
    };

    Ok(PixelType { format, data_type })
}
