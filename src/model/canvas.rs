use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::foundation::core::{Color, Point, Rect, Rgba8};
use crate::foundation::error::{VinciError, VinciResult};
use crate::model::block::{Block, SimpleBlock};

/// Id of the single block a fresh canvas starts with.
pub const ROOT_BLOCK_ID: &str = "0";

/// Source image read by image-reference colors. Top-down, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl SourceImage {
    /// Wrap a pixel buffer of exactly `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba8>) -> VinciResult<Self> {
        let expected = u64::from(width) * u64::from(height);
        if pixels.len() as u64 != expected {
            return Err(VinciError::validation(format!(
                "source image has {} pixels, expected {width}x{height} = {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
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
}

/// Block-structured canvas edited by the interpreter.
///
/// Blocks are kept in insertion order; that order is the paint order used by the
/// rasterizer.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Rgba8,
    blocks: IndexMap<String, Block>,
    #[serde(skip)]
    source: Option<Arc<SourceImage>>,
}

impl Canvas {
    /// Canvas holding one full-size block `"0"` filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba8) -> VinciResult<Self> {
        if width == 0 || height == 0 {
            return Err(VinciError::validation("canvas width/height must be > 0"));
        }
        let mut blocks = IndexMap::new();
        blocks.insert(
            ROOT_BLOCK_ID.to_owned(),
            Block::Simple(SimpleBlock::from_rect(
                Rect::canvas(width, height)?,
                Color::Rgba(background),
            )),
        );
        Ok(Self {
            width,
            height,
            background,
            blocks,
            source: None,
        })
    }

    /// Build a canvas from a preset configuration.
    ///
    /// Without presets this is [`Canvas::new`] with a white background.
    pub fn from_initial_config(cfg: &InitialConfig) -> VinciResult<Self> {
        let mut canvas = Self::new(cfg.width, cfg.height, Rgba8::WHITE)?;

        let uses_image = cfg
            .blocks
            .iter()
            .any(|b| matches!(b.fill(), Ok(Color::ImageRef { .. })));
        match &cfg.source_png_data {
            Some(pixels) => {
                canvas.source = Some(Arc::new(SourceImage::new(
                    cfg.width,
                    cfg.height,
                    pixels.clone(),
                )?));
            }
            None if uses_image => {
                return Err(VinciError::validation(
                    "preset blocks reference the source image but no sourcePngData was given",
                ));
            }
            None => {}
        }

        if cfg.blocks.is_empty() {
            return Ok(canvas);
        }

        canvas.blocks.clear();
        let mut seen = HashSet::new();
        for preset in &cfg.blocks {
            if !seen.insert(preset.block_id.as_str()) {
                return Err(VinciError::validation(format!(
                    "duplicate preset block id [{}]",
                    preset.block_id
                )));
            }
            let block = SimpleBlock::new(preset.bottom_left, preset.top_right, preset.fill()?)?;
            canvas.insert(preset.block_id.clone(), Block::Simple(block))?;
        }
        Ok(canvas)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full canvas size as a point.
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Full canvas area.
    pub fn area(&self) -> u64 {
        self.size().area()
    }

    /// Number of top-level blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Return `true` when no block is present.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Look up a block by id.
    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// Look up a block by id, failing with `BlockNotFound`.
    pub fn block(&self, id: &str) -> VinciResult<&Block> {
        self.blocks
            .get(id)
            .ok_or_else(|| VinciError::block_not_found(id))
    }

    /// Insert or replace a block.
    ///
    /// Replacing keeps the id's position in paint order; new ids go last.
    pub fn insert(&mut self, id: impl Into<String>, block: Block) -> VinciResult<()> {
        let id = id.into();
        let bounds = Rect::canvas(self.width, self.height)?;
        if !bounds.contains_rect(block.rect()) {
            return Err(VinciError::validation(format!(
                "block [{id}] ({}) lies outside the {}x{} canvas",
                block.rect(),
                self.width,
                self.height
            )));
        }
        self.blocks.insert(id, block);
        Ok(())
    }

    /// Remove a block, preserving the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Block> {
        self.blocks.shift_remove(id)
    }

    /// Ids in paint order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    /// `(id, block)` pairs in paint order.
    pub fn blocks(&self) -> impl Iterator<Item = (&str, &Block)> {
        self.blocks.iter().map(|(id, b)| (id.as_str(), b))
    }

    /// All leaves of all blocks, in paint order.
    pub fn simplify(&self) -> Vec<&SimpleBlock> {
        self.blocks.values().flat_map(Block::leaves).collect()
    }

    /// Largest top-level id that is a plain integer.
    pub fn max_numeric_id(&self) -> Option<u64> {
        self.blocks.keys().filter_map(|id| id.parse::<u64>().ok()).max()
    }

    /// Source image used by image-reference colors.
    pub fn source_image(&self) -> Option<&SourceImage> {
        self.source.as_deref()
    }

    /// Replace the source image. Its dimensions must match the canvas.
    pub fn set_source_image(&mut self, image: SourceImage) -> VinciResult<()> {
        if image.width != self.width || image.height != self.height {
            return Err(VinciError::validation(format!(
                "source image is {}x{}, canvas is {}x{}",
                image.width, image.height, self.width, self.height
            )));
        }
        self.source = Some(Arc::new(image));
        Ok(())
    }
}

/// Preset canvas layout, as loaded from JSON.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialConfig {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Preset blocks; empty means a single white root block.
    #[serde(default)]
    pub blocks: Vec<PresetBlock>,
    /// Where the source image came from. Informational only.
    #[serde(
        default,
        rename = "sourcePngJSON",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_png_json: Option<String>,
    /// Source image pixels, top-down and row-major.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_png_data: Option<Vec<Rgba8>>,
}

impl InitialConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> VinciResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| VinciError::serde(format!("parse initial configuration JSON: {e}")))
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(s: &str) -> VinciResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> VinciResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VinciError::validation(format!(
                "open initial configuration '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// One preset block. Exactly one of `color` and `png_bottom_left_point` is expected;
/// `color` wins when both are present.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetBlock {
    /// Block id.
    pub block_id: String,
    /// Lower-left corner.
    pub bottom_left: Point,
    /// Upper-right corner.
    pub top_right: Point,
    /// Literal fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    /// Source-image anchor for image-reference fills.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png_bottom_left_point: Option<Point>,
}

impl PresetBlock {
    fn fill(&self) -> VinciResult<Color> {
        match (self.color, self.png_bottom_left_point) {
            (Some(c), _) => Ok(Color::Rgba(c)),
            (None, Some(anchor)) => Ok(Color::ImageRef { anchor }),
            (None, None) => Err(VinciError::validation(format!(
                "preset block [{}] has neither color nor pngBottomLeftPoint",
                self.block_id
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/canvas.rs"]
mod tests;
