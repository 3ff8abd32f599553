use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{VinciError, VinciResult};

/// Row-major RGBA8 pixel buffer, top-down (row 0 is the top of the canvas).
///
/// Pixels are straight (not premultiplied) alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl Frame {
    /// Frame of `width * height` pixels, all set to `fill`.
    pub fn filled(width: u32, height: u32, fill: Rgba8) -> VinciResult<Self> {
        if width == 0 || height == 0 {
            return Err(VinciError::validation("frame width/height must be > 0"));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        })
    }

    /// Wrap a pixel buffer of exactly `width * height` entries.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>) -> VinciResult<Self> {
        let expected = width as usize * height as usize;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(VinciError::validation(format!(
                "frame has {} pixels, expected {width}x{height} = {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Interpret tightly packed RGBA8 bytes.
    pub fn from_rgba8_bytes(width: u32, height: u32, bytes: &[u8]) -> VinciResult<Self> {
        if bytes.len() % 4 != 0 {
            return Err(VinciError::validation(format!(
                "rgba8 buffer length {} is not a multiple of 4",
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Rgba8::new(px[0], px[1], px[2], px[3]))
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Decode an encoded image (PNG or any format `image` recognizes).
    pub fn from_image_bytes(bytes: &[u8]) -> VinciResult<Self> {
        let rgba = image::load_from_memory(bytes)
            .context("decode image from memory")?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8_bytes(width, height, rgba.as_raw())
    }

    /// Decode an image file from disk.
    pub fn from_png_path(path: impl AsRef<Path>) -> VinciResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        Self::from_image_bytes(&bytes)
    }

    /// Read a JSON array of `[r, g, b, a]` quadruples, row-major and top-down.
    ///
    /// The array carries no dimensions, so the caller supplies them.
    pub fn from_json_reader<R: std::io::Read>(r: R, width: u32, height: u32) -> VinciResult<Self> {
        let pixels: Vec<Rgba8> = serde_json::from_reader(r)
            .map_err(|e| VinciError::serde(format!("parse pixel array JSON: {e}")))?;
        Self::from_pixels(width, height, pixels)
    }

    /// [`Frame::from_json_reader`] over a file.
    pub fn from_json_path(path: impl AsRef<Path>, width: u32, height: u32) -> VinciResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VinciError::validation(format!("open pixel array '{}': {e}", path.display()))
        })?;
        Self::from_json_reader(BufReader::new(f), width, height)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major and top-down.
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Pixel at top-down coordinates, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Tightly packed RGBA8 bytes.
    pub fn to_rgba8_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_array()).collect()
    }

    /// Encode as PNG at `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> VinciResult<()> {
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            &self.to_rgba8_bytes(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
