//! Client-side pixel formats and the byte layout of pixel transfers.

use byteorder::{ByteOrder, NativeEndian};

use crate::math::Vector4;

/// List of all the possible pixel formats of images and client pixel data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelFormat {
    Alpha,
    BGR,
    BGRA,
    Blue,
    DepthComponent,
    Green,
    Intensity,
    Luminance,
    LuminanceAlpha,
    Red,
    RG,
    RGB,
    RGBA,
    StencilIndex,
}

impl PixelFormat {
    /// Returns the number of components of this format.
    pub fn components(self) -> usize {
        match self {
            PixelFormat::Alpha
            | PixelFormat::Blue
            | PixelFormat::DepthComponent
            | PixelFormat::Green
            | PixelFormat::Intensity
            | PixelFormat::Luminance
            | PixelFormat::Red
            | PixelFormat::StencilIndex => 1,
            PixelFormat::LuminanceAlpha | PixelFormat::RG => 2,
            PixelFormat::BGR | PixelFormat::RGB => 3,
            PixelFormat::BGRA | PixelFormat::RGBA => 4,
        }
    }

    /// Expands the components of a client pixel into an RGBA texel.
    pub fn expand(self, c: [f64; 4]) -> Vector4<f64> {
        match self {
            PixelFormat::Alpha => Vector4::new(0.0, 0.0, 0.0, c[0]),
            PixelFormat::Blue => Vector4::new(0.0, 0.0, c[0], 1.0),
            PixelFormat::Green => Vector4::new(0.0, c[0], 0.0, 1.0),
            PixelFormat::Red => Vector4::new(c[0], 0.0, 0.0, 1.0),
            PixelFormat::Intensity => Vector4::new(c[0], c[0], c[0], c[0]),
            PixelFormat::DepthComponent
            | PixelFormat::Luminance
            | PixelFormat::StencilIndex => Vector4::new(c[0], c[0], c[0], 1.0),
            PixelFormat::LuminanceAlpha => Vector4::new(c[0], c[0], c[0], c[1]),
            PixelFormat::RG => Vector4::new(c[0], c[1], 0.0, 1.0),
            PixelFormat::RGB => Vector4::new(c[0], c[1], c[2], 1.0),
            PixelFormat::BGR => Vector4::new(c[2], c[1], c[0], 1.0),
            PixelFormat::RGBA => Vector4::new(c[0], c[1], c[2], c[3]),
            PixelFormat::BGRA => Vector4::new(c[2], c[1], c[0], c[3]),
        }
    }

    /// Selects the components of this format out of an RGBA texel.
    pub fn select(self, t: Vector4<f64>) -> [f64; 4] {
        match self {
            PixelFormat::Alpha => [t.w, 0.0, 0.0, 0.0],
            PixelFormat::Blue => [t.z, 0.0, 0.0, 0.0],
            PixelFormat::Green => [t.y, 0.0, 0.0, 0.0],
            PixelFormat::DepthComponent
            | PixelFormat::Intensity
            | PixelFormat::Luminance
            | PixelFormat::Red
            | PixelFormat::StencilIndex => [t.x, 0.0, 0.0, 0.0],
            PixelFormat::LuminanceAlpha => [t.x, t.w, 0.0, 0.0],
            PixelFormat::RG => [t.x, t.y, 0.0, 0.0],
            PixelFormat::RGB => [t.x, t.y, t.z, 0.0],
            PixelFormat::BGR => [t.z, t.y, t.x, 0.0],
            PixelFormat::RGBA => [t.x, t.y, t.z, t.w],
            PixelFormat::BGRA => [t.z, t.y, t.x, t.w],
        }
    }

    /// Discards the components an image of this format does not store.
    pub fn mask(self, t: Vector4<f64>) -> Vector4<f64> {
        self.expand(self.select(t))
    }
}

/// List of all the possible component types of client pixel data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelDataType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
}

impl PixelDataType {
    /// Returns the size in bytes of one component.
    pub fn size(self) -> usize {
        match self {
            PixelDataType::Byte | PixelDataType::UnsignedByte => 1,
            PixelDataType::Short | PixelDataType::UnsignedShort => 2,
            PixelDataType::Int | PixelDataType::UnsignedInt | PixelDataType::Float => 4,
        }
    }

    /// Reads one component, normalizing integer types. Signed integers map
    /// `c` to `(2c + 1) / (2^b - 1)`, so that every value has an exact inverse.
    pub fn decode(self, bytes: &[u8]) -> f64 {
        match self {
            PixelDataType::Byte => signed_to_float(f64::from(bytes[0] as i8), 8),
            PixelDataType::UnsignedByte => f64::from(bytes[0]) / 255.0,
            PixelDataType::Short => signed_to_float(f64::from(NativeEndian::read_i16(bytes)), 16),
            PixelDataType::UnsignedShort => f64::from(NativeEndian::read_u16(bytes)) / 65535.0,
            PixelDataType::Int => signed_to_float(f64::from(NativeEndian::read_i32(bytes)), 32),
            PixelDataType::UnsignedInt => {
                f64::from(NativeEndian::read_u32(bytes)) / f64::from(u32::max_value())
            }
            PixelDataType::Float => f64::from(NativeEndian::read_f32(bytes)),
        }
    }

    /// Writes one component, clamping and scaling into the range of integer types.
    pub fn encode(self, v: f64, bytes: &mut [u8]) {
        let unsigned = v.max(0.0).min(1.0);
        let signed = v.max(-1.0).min(1.0);

        match self {
            PixelDataType::Byte => bytes[0] = float_to_signed(signed, 8) as i8 as u8,
            PixelDataType::UnsignedByte => bytes[0] = (unsigned * 255.0).round() as u8,
            PixelDataType::Short => {
                NativeEndian::write_i16(bytes, float_to_signed(signed, 16) as i16)
            }
            PixelDataType::UnsignedShort => {
                NativeEndian::write_u16(bytes, (unsigned * 65535.0).round() as u16)
            }
            PixelDataType::Int => {
                NativeEndian::write_i32(bytes, float_to_signed(signed, 32) as i32)
            }
            PixelDataType::UnsignedInt => NativeEndian::write_u32(
                bytes,
                (unsigned * f64::from(u32::max_value())).round() as u32,
            ),
            PixelDataType::Float => NativeEndian::write_f32(bytes, v as f32),
        }
    }
}

#[inline]
fn signed_to_float(c: f64, bits: i32) -> f64 {
    (2.0 * c + 1.0) / (2f64.powi(bits) - 1.0)
}

#[inline]
fn float_to_signed(v: f64, bits: i32) -> f64 {
    ((v * (2f64.powi(bits) - 1.0) - 1.0) / 2.0).round()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelType {
    pub format: PixelFormat,
    pub data_type: PixelDataType,
}

impl PixelType {
    /// Returns the size in bytes of one pixel.
    #[inline]
    pub fn pixel_size(&self) -> usize {
        self.format.components() * self.data_type.size()
    }

    /// Reads one pixel as an RGBA texel.
    pub fn decode(&self, bytes: &[u8]) -> Vector4<f64> {
        let size = self.data_type.size();
        let mut c = [0.0; 4];
        for (i, v) in c.iter_mut().take(self.format.components()).enumerate() {
            *v = self.data_type.decode(&bytes[i * size..]);
        }

        self.format.expand(c)
    }

    /// Writes one RGBA texel as a pixel.
    pub fn encode(&self, texel: Vector4<f64>, bytes: &mut [u8]) {
        let size = self.data_type.size();
        let c = self.format.select(texel);
        for (i, v) in c.iter().take(self.format.components()).enumerate() {
            self.data_type.encode(*v, &mut bytes[i * size..]);
        }
    }
}

/// How rows of client pixel data are laid out in memory.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PackingSpecification {
    /// The number of pixels of a row, 0 means the width of the image.
    pub row_length: u32,
    /// The alignment of the start of each row, one of 1, 2, 4 or 8.
    pub byte_alignment: u32,
}

impl Default for PackingSpecification {
    fn default() -> Self {
        PackingSpecification {
            row_length: 0,
            byte_alignment: 4,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ImageExtent {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl ImageExtent {
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        ImageExtent {
            width,
            height,
            depth,
        }
    }
}

/// Describes a block of client pixel data: its pixel type, its packing, the
/// dimensions of the whole client image and the part of it that is transferred.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageDataLayout {
    pub pixel_type: PixelType,
    pub packing: PackingSpecification,
    pub dimensions: ImageExtent,
    pub selection: ImageExtent,
}

impl ImageDataLayout {
    /// Returns the distance in bytes between the starts of two rows.
    pub fn row_stride(&self) -> usize {
        let row_length = if self.packing.row_length > 0 {
            self.packing.row_length
        } else {
            self.dimensions.width
        };

        let alignment = self.packing.byte_alignment.max(1) as usize;
        let bytes = row_length as usize * self.pixel_type.pixel_size();
        (bytes + alignment - 1) / alignment * alignment
    }

    /// Returns the offset in bytes of the pixel at `(x, y, z)` of the selection.
    pub fn byte_offset(&self, x: u32, y: u32, z: u32) -> usize {
        let row_stride = self.row_stride();
        let image_stride = row_stride * self.dimensions.height as usize;
        let pixel_size = self.pixel_type.pixel_size();
        z as usize * image_stride + y as usize * row_stride + x as usize * pixel_size
    }

    /// Returns the number of bytes a buffer needs to hold the selection. The
    /// padding after the last row is not required.
    pub fn byte_size(&self) -> usize {
        let s = self.selection;
        if s.width == 0 || s.height == 0 || s.depth == 0 {
            return 0;
        }

        let last_row = self.byte_offset(0, s.height - 1, s.depth - 1);
        last_row + s.width as usize * self.pixel_type.pixel_size()
    }
}
