use crate::foundation::core::{Color, Point, Rect};
use crate::foundation::error::VinciResult;

/// Uniformly filled leaf rectangle.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SimpleBlock {
    #[serde(flatten)]
    rect: Rect,
    color: Color,
}

impl SimpleBlock {
    /// Create a leaf, failing with `InvalidBlock` on inverted or zero-area corners.
    pub fn new(bottom_left: Point, top_right: Point, color: Color) -> VinciResult<Self> {
        Ok(Self::from_rect(Rect::new(bottom_left, top_right)?, color))
    }

    /// Create a leaf from an already validated rectangle.
    pub fn from_rect(rect: Rect, color: Color) -> Self {
        Self { rect, color }
    }

    /// Covered rectangle.
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Fill color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Replace the fill color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Same fill over a different rectangle. Image anchors are kept as-is.
    pub(crate) fn with_rect(&self, rect: Rect) -> Self {
        Self {
            rect,
            color: self.color,
        }
    }

    /// Same leaf translated by `to - from`, with image anchors re-based.
    pub(crate) fn offset(&self, from: Point, to: Point) -> VinciResult<Self> {
        Ok(Self {
            rect: self.rect.offset(from, to)?,
            color: self.color.rebased(from, to)?,
        })
    }
}

/// Rectangle partitioned into simple leaves.
///
/// The leaves are expected to tile the rectangle exactly; this is maintained by the
/// interpreter and not re-checked here.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ComplexBlock {
    #[serde(flatten)]
    rect: Rect,
    children: Vec<SimpleBlock>,
}

impl ComplexBlock {
    /// Create a composite block, failing with `InvalidBlock` on degenerate corners.
    pub fn new(
        bottom_left: Point,
        top_right: Point,
        children: Vec<SimpleBlock>,
    ) -> VinciResult<Self> {
        Ok(Self::from_rect(Rect::new(bottom_left, top_right)?, children))
    }

    /// Create a composite block from an already validated rectangle.
    pub fn from_rect(rect: Rect, children: Vec<SimpleBlock>) -> Self {
        Self { rect, children }
    }

    /// Covered rectangle.
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Child leaves in insertion order.
    pub fn children(&self) -> &[SimpleBlock] {
        &self.children
    }
}

/// A named canvas region: either one leaf or a partition of leaves.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Uniform leaf.
    Simple(SimpleBlock),
    /// Partition of leaves.
    Complex(ComplexBlock),
}

impl Block {
    /// Covered rectangle.
    pub fn rect(&self) -> &Rect {
        match self {
            Block::Simple(b) => b.rect(),
            Block::Complex(b) => b.rect(),
        }
    }

    /// Extent on both axes.
    pub fn size(&self) -> Point {
        self.rect().size()
    }

    /// Covered area.
    pub fn area(&self) -> u64 {
        self.rect().area()
    }

    /// Leaves of this block: itself for a simple block, the children otherwise.
    pub fn leaves(&self) -> &[SimpleBlock] {
        match self {
            Block::Simple(b) => std::slice::from_ref(b),
            Block::Complex(b) => b.children(),
        }
    }

    /// This block's content placed at `target`, which must have the same size.
    ///
    /// Simple content keeps its color; complex content has every leaf translated by
    /// `target.bottom_left - self.bottom_left`.
    pub(crate) fn relocated(&self, target: &Rect) -> VinciResult<Block> {
        let from = self.rect().bottom_left();
        let to = target.bottom_left();
        match self {
            Block::Simple(b) => Ok(Block::Simple(SimpleBlock::from_rect(
                *target,
                b.color().rebased(from, to)?,
            ))),
            Block::Complex(b) => {
                let children = b
                    .children
                    .iter()
                    .map(|leaf| leaf.offset(from, to))
                    .collect::<VinciResult<Vec<_>>>()?;
                Ok(Block::Complex(ComplexBlock::from_rect(*target, children)))
            }
        }
    }
}

impl From<SimpleBlock> for Block {
    fn from(b: SimpleBlock) -> Self {
        Block::Simple(b)
    }
}

impl From<ComplexBlock> for Block {
    fn from(b: ComplexBlock) -> Self {
        Block::Complex(b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/block.rs"]
mod tests;
