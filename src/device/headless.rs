//! An in-memory `Device`. Images keep RGBA texels for every mip level, and the
//! configurations pushed by the context are recorded so they can be inspected.

use std::cell::RefCell;
use std::rc::Rc;

use byteorder::{ByteOrder, NativeEndian};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::*;
use crate::math::{Vector2, Vector3, Vector4};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessParams {
    pub info: DeviceInfo,
    /// Sets the size of the color and depth buffers.
    pub framebuffer_width: u32,
    pub framebuffer_height: u32,
}

impl Default for HeadlessParams {
    fn default() -> Self {
        HeadlessParams {
            info: DeviceInfo::default(),
            framebuffer_width: 64,
            framebuffer_height: 64,
        }
    }
}

#[derive(Debug, Clone)]
struct Level {
    width: u32,
    height: u32,
    texels: Vec<Vector4<f64>>,
}

#[derive(Debug)]
pub struct HeadlessImage {
    format: PixelFormat,
    levels: RefCell<Vec<Level>>,
}

impl HeadlessImage {
    pub fn new(format: PixelFormat, width: u32, height: u32, max_level: u32) -> Self {
        let mut levels = Vec::new();
        let (mut w, mut h) = (width, height);

        for _ in 0..=max_level {
            levels.push(Level {
                width: w,
                height: h,
                texels: vec![Vector4::new(0.0, 0.0, 0.0, 0.0); (w * h) as usize],
            });

            if w <= 1 && h <= 1 {
                break;
            }

            w = (w / 2).max(1);
            h = (h / 2).max(1);
        }

        HeadlessImage {
            format,
            levels: RefCell::new(levels),
        }
    }

    /// Returns the texel at `(x, y)` of `level`.
    pub fn texel(&self, level: u32, x: u32, y: u32) -> Option<Vector4<f64>> {
        let levels = self.levels.borrow();
        let v = levels.get(level as usize)?;
        if x >= v.width || y >= v.height {
            return None;
        }

        Some(v.texels[(y * v.width + x) as usize])
    }
}

impl Image for HeadlessImage {
    fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    fn number_of_levels(&self) -> u32 {
        self.levels.borrow().len() as u32
    }

    fn width_at_level(&self, level: u32) -> u32 {
        self.levels
            .borrow()
            .get(level as usize)
            .map(|v| v.width)
            .unwrap_or(0)
    }

    fn height_at_level(&self, level: u32) -> u32 {
        self.levels
            .borrow()
            .get(level as usize)
            .map(|v| v.height)
            .unwrap_or(0)
    }

    fn write_texels(
        &self,
        level: u32,
        offset: Vector3<i32>,
        data: &[u8],
        layout: &ImageDataLayout,
    ) {
        let mut levels = self.levels.borrow_mut();
        let dst = match levels.get_mut(level as usize) {
            Some(v) => v,
            None => {
                debug!("Image has no level {}, dropping texels.", level);
                return;
            }
        };

        let size = layout.pixel_type.pixel_size();
        for y in 0..layout.selection.height {
            for x in 0..layout.selection.width {
                let (dx, dy) = (offset.x + x as i32, offset.y + y as i32);
                if dx < 0 || dy < 0 || dx as u32 >= dst.width || dy as u32 >= dst.height {
                    continue;
                }

                let o = layout.byte_offset(x, y, 0);
                if let Some(bytes) = data.get(o..o + size) {
                    let texel = self.format.mask(layout.pixel_type.decode(bytes));
                    dst.texels[(dy as u32 * dst.width + dx as u32) as usize] = texel;
                }
            }
        }
    }

    fn read_texels(
        &self,
        level: u32,
        offset: Vector3<i32>,
        data: &mut [u8],
        layout: &ImageDataLayout,
    ) {
        let levels = self.levels.borrow();
        let src = match levels.get(level as usize) {
            Some(v) => v,
            None => return,
        };

        let size = layout.pixel_type.pixel_size();
        for y in 0..layout.selection.height {
            for x in 0..layout.selection.width {
                let (sx, sy) = (offset.x + x as i32, offset.y + y as i32);
                if sx < 0 || sy < 0 || sx as u32 >= src.width || sy as u32 >= src.height {
                    continue;
                }

                let o = layout.byte_offset(x, y, 0);
                if let Some(bytes) = data.get_mut(o..o + size) {
                    let texel = src.texels[(sy as u32 * src.width + sx as u32) as usize];
                    layout.pixel_type.encode(texel, bytes);
                }
            }
        }
    }
}

pub struct HeadlessDevice {
    info: DeviceInfo,
    framebuffer_size: Vector2<u32>,
    color_buffer: Vec<Vector4<f32>>,
    depth_buffer: Vec<f32>,
    sampler_configs: SmallVec<[Option<SamplerConfig>; 8]>,
    options: RasterizerOptions,
    sampler_config_pushes: usize,
    options_pushes: usize,
    images: Vec<Rc<HeadlessImage>>,
}

impl HeadlessDevice {
    pub fn new(params: HeadlessParams) -> Self {
        let units = params.info.num_texture_units as usize;
        let texels = (params.framebuffer_width * params.framebuffer_height) as usize;

        let mut options = RasterizerOptions::default();
        options
            .texcoord_generation_enabled_coordinates
            .resize(units, TexCoordGenerationCoordinate::empty());
        options
            .texcoord_generation_config
            .resize(units, [TexCoordGenerationConfig::default(); 4]);

        let mut sampler_configs = SmallVec::new();
        sampler_configs.resize(units, None);

        HeadlessDevice {
            info: params.info,
            framebuffer_size: Vector2::new(params.framebuffer_width, params.framebuffer_height),
            color_buffer: vec![Vector4::new(0.0, 0.0, 0.0, 0.0); texels],
            depth_buffer: vec![1.0; texels],
            sampler_configs,
            options,
            sampler_config_pushes: 0,
            options_pushes: 0,
            images: Vec::new(),
        }
    }

    /// Fills the whole color buffer.
    pub fn clear_color_buffer(&mut self, color: Vector4<f32>) {
        for v in &mut self.color_buffer {
            *v = color;
        }
    }

    /// Fills the whole depth buffer.
    pub fn clear_depth_buffer(&mut self, depth: f32) {
        for v in &mut self.depth_buffer {
            *v = depth;
        }
    }

    pub fn set_color_buffer_pixel(&mut self, x: u32, y: u32, color: Vector4<f32>) {
        if let Some(i) = self.framebuffer_index(x as i32, y as i32) {
            self.color_buffer[i] = color;
        }
    }

    pub fn set_depth_buffer_pixel(&mut self, x: u32, y: u32, depth: f32) {
        if let Some(i) = self.framebuffer_index(x as i32, y as i32) {
            self.depth_buffer[i] = depth;
        }
    }

    /// Returns the last sampler configuration pushed for `unit`.
    pub fn sampler_config(&self, unit: usize) -> Option<&SamplerConfig> {
        self.sampler_configs.get(unit).and_then(|v| v.as_ref())
    }

    /// Returns how many times `set_sampler_config` has been called.
    pub fn sampler_config_pushes(&self) -> usize {
        self.sampler_config_pushes
    }

    /// Returns how many times `set_options` has been called.
    pub fn options_pushes(&self) -> usize {
        self.options_pushes
    }

    /// Returns all the images created so far, oldest first.
    pub fn images(&self) -> &[Rc<HeadlessImage>] {
        &self.images
    }

    fn framebuffer_index(&self, x: i32, y: i32) -> Option<usize> {
        let (w, h) = (self.framebuffer_size.x, self.framebuffer_size.y);
        if x < 0 || y < 0 || x as u32 >= w || y as u32 >= h {
            None
        } else {
            Some((y as u32 * w + x as u32) as usize)
        }
    }

    fn blit<F>(
        &self,
        image: &dyn Image,
        level: u32,
        size: Vector2<u32>,
        src: Vector2<i32>,
        dst: Vector3<i32>,
        fetch: F,
    ) where
        F: Fn(usize) -> Vector4<f32>,
    {
        let layout = ImageDataLayout {
            pixel_type: PixelType {
                format: PixelFormat::RGBA,
                data_type: PixelDataType::Float,
            },
            packing: PackingSpecification {
                row_length: 0,
                byte_alignment: 1,
            },
            dimensions: ImageExtent::new(size.x, size.y, 1),
            selection: ImageExtent::new(size.x, size.y, 1),
        };

        let mut bytes = vec![0u8; layout.byte_size()];
        for y in 0..size.y {
            for x in 0..size.x {
                // Origins near the limits of `i32` read outside of the framebuffer.
                let texel = src
                    .x
                    .checked_add(x as i32)
                    .and_then(|sx| src.y.checked_add(y as i32).map(|sy| (sx, sy)))
                    .and_then(|(sx, sy)| self.framebuffer_index(sx, sy))
                    .map(|i| fetch(i))
                    .unwrap_or_else(|| Vector4::new(0.0, 0.0, 0.0, 0.0));

                let o = layout.byte_offset(x, y, 0);
                for (c, v) in [texel.x, texel.y, texel.z, texel.w].iter().enumerate() {
                    NativeEndian::write_f32(&mut bytes[o + c * 4..], *v);
                }
            }
        }

        image.write_texels(level, dst, &bytes, &layout);
    }
}

impl Device for HeadlessDevice {
    fn info(&self) -> DeviceInfo {
        self.info
    }

    fn create_image(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        _: u32,
        max_level: u32,
    ) -> ImageRef {
        let image = Rc::new(HeadlessImage::new(format, width, height, max_level));
        self.images.push(image.clone());
        image
    }

    fn blit_from_color_buffer(
        &mut self,
        image: &dyn Image,
        level: u32,
        size: Vector2<u32>,
        src: Vector2<i32>,
        dst: Vector3<i32>,
    ) {
        let colors = &self.color_buffer;
        self.blit(image, level, size, src, dst, |i| colors[i]);
    }

    fn blit_from_depth_buffer(
        &mut self,
        image: &dyn Image,
        level: u32,
        size: Vector2<u32>,
        src: Vector2<i32>,
        dst: Vector3<i32>,
    ) {
        let depths = &self.depth_buffer;
        self.blit(image, level, size, src, dst, |i| {
            Vector4::new(depths[i], depths[i], depths[i], 1.0)
        });
    }

    fn set_sampler_config(&mut self, unit: usize, config: SamplerConfig) {
        if unit >= self.sampler_configs.len() {
            self.sampler_configs.resize(unit + 1, None);
        }

        self.sampler_configs[unit] = Some(config);
        self.sampler_config_pushes += 1;
    }

    fn options(&self) -> RasterizerOptions {
        self.options.clone()
    }

    fn set_options(&mut self, options: RasterizerOptions) {
        self.options = options;
        self.options_pushes += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mip_chain() {
        let image = HeadlessImage::new(PixelFormat::RGBA, 8, 2, 11);
        assert_eq!(image.number_of_levels(), 4);
        assert_eq!(image.width_at_level(0), 8);
        assert_eq!(image.height_at_level(1), 1);
        assert_eq!(image.width_at_level(3), 1);
        assert_eq!(image.width_at_level(4), 0);

        let image = HeadlessImage::new(PixelFormat::RGBA, 8, 8, 1);
        assert_eq!(image.number_of_levels(), 2);
    }

    #[test]
    fn blit_color() {
        let mut device = HeadlessDevice::new(HeadlessParams::default());
        device.set_color_buffer_pixel(3, 4, Vector4::new(1.0, 0.5, 0.0, 1.0));

        let image = device.create_image(PixelFormat::RGB, 4, 4, 1, 0);
        device.blit_from_color_buffer(
            &*image,
            0,
            Vector2::new(2, 2),
            Vector2::new(2, 3),
            Vector3::new(1, 1, 0),
        );

        let image = device.images()[0].clone();
        assert_eq!(image.texel(0, 2, 2), Some(Vector4::new(1.0, 0.5, 0.0, 1.0)));
        assert_eq!(image.texel(0, 1, 1), Some(Vector4::new(0.0, 0.0, 0.0, 1.0)));
        assert_eq!(image.texel(0, 0, 0), Some(Vector4::new(0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn blit_depth() {
        let mut device = HeadlessDevice::new(HeadlessParams::default());
        device.clear_depth_buffer(0.25);

        let image = device.create_image(PixelFormat::DepthComponent, 2, 2, 1, 0);
        device.blit_from_depth_buffer(
            &*image,
            0,
            Vector2::new(2, 2),
            Vector2::new(0, 0),
            Vector3::new(0, 0, 0),
        );

        let image = device.images()[0].clone();
        assert_eq!(image.texel(0, 1, 1), Some(Vector4::new(0.25, 0.25, 0.25, 1.0)));
    }
}
