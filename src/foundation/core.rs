use std::fmt;
use std::ops::Add;

use crate::foundation::error::{VinciError, VinciResult};

/// Integer canvas coordinate, bottom-up (`y = 0` is the bottom edge).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Point {
    /// Horizontal coordinate.
    pub x: u32,
    /// Vertical coordinate.
    pub y: u32,
}

impl Point {
    /// The canvas origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a point.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Componentwise subtraction, `None` when either axis would go negative.
    pub fn checked_sub(self, other: Point) -> Option<Point> {
        Some(Point::new(
            self.x.checked_sub(other.x)?,
            self.y.checked_sub(other.y)?,
        ))
    }

    /// Componentwise subtraction clamped to zero.
    pub fn diff(self, other: Point) -> Point {
        Point::new(
            self.x.saturating_sub(other.x),
            self.y.saturating_sub(other.y),
        )
    }

    /// `x * y`, for points used as sizes.
    pub fn area(self) -> u64 {
        u64::from(self.x) * u64::from(self.y)
    }

    /// Move this point by the vector `to - from`.
    ///
    /// Adds before subtracting so that points at or beyond `from` never underflow.
    pub fn offset(self, from: Point, to: Point) -> Option<Point> {
        Some(Point::new(
            self.x.checked_add(to.x)?.checked_sub(from.x)?,
            self.y.checked_add(to.y)?.checked_sub(from.y)?,
        ))
    }

    /// Boundary-exclusive containment.
    pub fn is_strictly_inside(self, rect: &Rect) -> bool {
        rect.bottom_left.x < self.x
            && self.x < rect.top_right.x
            && rect.bottom_left.y < self.y
            && self.y < rect.top_right.y
    }

    /// Boundary-inclusive containment.
    pub fn is_inside(self, rect: &Rect) -> bool {
        rect.bottom_left.x <= self.x
            && self.x <= rect.top_right.x
            && rect.bottom_left.y <= self.y
            && self.y <= rect.top_right.y
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<[u32; 2]> for Point {
    fn from([x, y]: [u32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [u32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Axis-aligned rectangle spanning `[bottom_left, top_right]`.
///
/// Constructed rectangles are always non-degenerate: both axes have positive extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    bottom_left: Point,
    top_right: Point,
}

impl Rect {
    /// Create a validated rectangle.
    pub fn new(bottom_left: Point, top_right: Point) -> VinciResult<Self> {
        if bottom_left.x > top_right.x || bottom_left.y > top_right.y {
            return Err(VinciError::invalid_block(format!(
                "corners are inverted: {bottom_left} to {top_right}"
            )));
        }
        let rect = Self {
            bottom_left,
            top_right,
        };
        if rect.area() == 0 {
            return Err(VinciError::invalid_block(format!(
                "block size cannot be 0: {bottom_left} to {top_right}"
            )));
        }
        Ok(rect)
    }

    /// Rectangle covering a whole `width x height` canvas.
    pub fn canvas(width: u32, height: u32) -> VinciResult<Self> {
        Self::new(Point::ORIGIN, Point::new(width, height))
    }

    /// Inclusive lower-left corner.
    pub fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    /// Upper-right corner.
    pub fn top_right(&self) -> Point {
        self.top_right
    }

    /// Extent on both axes.
    pub fn size(&self) -> Point {
        self.top_right.diff(self.bottom_left)
    }

    /// Covered area.
    pub fn area(&self) -> u64 {
        self.size().area()
    }

    /// Return `true` when `other` lies entirely within `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.bottom_left.is_inside(self) && other.top_right.is_inside(self)
    }

    /// Overlapping area with `other`.
    pub fn overlap_area(&self, other: &Rect) -> u64 {
        let w = self
            .top_right
            .x
            .min(other.top_right.x)
            .saturating_sub(self.bottom_left.x.max(other.bottom_left.x));
        let h = self
            .top_right
            .y
            .min(other.top_right.y)
            .saturating_sub(self.bottom_left.y.max(other.bottom_left.y));
        u64::from(w) * u64::from(h)
    }

    /// Split along the vertical line `x` into `(left, right)`.
    pub fn split_vertical(&self, x: u32) -> VinciResult<(Rect, Rect)> {
        Ok((
            Rect::new(self.bottom_left, Point::new(x, self.top_right.y))?,
            Rect::new(Point::new(x, self.bottom_left.y), self.top_right)?,
        ))
    }

    /// Split along the horizontal line `y` into `(bottom, top)`.
    pub fn split_horizontal(&self, y: u32) -> VinciResult<(Rect, Rect)> {
        Ok((
            Rect::new(self.bottom_left, Point::new(self.top_right.x, y))?,
            Rect::new(Point::new(self.bottom_left.x, y), self.top_right)?,
        ))
    }

    /// Quarters around `p`: bottom-left, bottom-right, top-right, top-left.
    pub fn quadrants(&self, p: Point) -> VinciResult<[Rect; 4]> {
        let (bl, tr) = (self.bottom_left, self.top_right);
        Ok([
            Rect::new(bl, p)?,
            Rect::new(Point::new(p.x, bl.y), Point::new(tr.x, p.y))?,
            Rect::new(p, tr)?,
            Rect::new(Point::new(bl.x, p.y), Point::new(p.x, tr.y))?,
        ])
    }

    /// Same-size rectangle moved by `to - from`.
    pub fn offset(&self, from: Point, to: Point) -> VinciResult<Self> {
        let moved = |p: Point| {
            p.offset(from, to).ok_or_else(|| {
                VinciError::invalid_block(format!("cannot move {p} from {from} to {to}"))
            })
        };
        Self::new(moved(self.bottom_left)?, moved(self.top_right)?)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.bottom_left, self.top_right)
    }
}

/// Straight-alpha RGBA8.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, the default canvas background.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Fully transparent black, used for unpainted cells.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as an array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

/// Fill of a leaf block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// Literal color.
    Rgba(Rgba8),
    /// Pixels read from the source image; `anchor` is the source point (bottom-up)
    /// shown at the leaf's bottom-left corner.
    ImageRef {
        /// Bottom-left anchor in source-image coordinates.
        anchor: Point,
    },
}

impl Color {
    /// Re-base an image reference when its block moves by `to - from`.
    ///
    /// Literal colors are returned unchanged.
    pub fn rebased(self, from: Point, to: Point) -> VinciResult<Color> {
        match self {
            Color::Rgba(_) => Ok(self),
            Color::ImageRef { anchor } => {
                let anchor = anchor.offset(from, to).ok_or_else(|| {
                    VinciError::invalid_block(format!(
                        "image anchor {anchor} cannot move from {from} to {to}"
                    ))
                })?;
                Ok(Color::ImageRef { anchor })
            }
        }
    }
}

impl From<Rgba8> for Color {
    fn from(c: Rgba8) -> Self {
        Color::Rgba(c)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
